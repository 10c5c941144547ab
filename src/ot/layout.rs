//! Compiled GSUB/GPOS tables and the stage-by-stage lookup driver.

use alloc::vec::Vec;

use ttf_parser::opentype_layout::{
    Coverage, FeatureIndex, LanguageIndex, LanguageSystem, Lookup, LookupIndex, LookupSubtable,
    ScriptIndex,
};

use super::apply::{Apply, ApplyContext, LookupSettings};
use super::set_digest::SetDigest;
use crate::buffer::Buffer;
use crate::face::Face;
use crate::plan::ShapePlan;
use crate::Tag;

pub const MAX_NESTING_LEVEL: usize = 64;
pub const MAX_CONTEXT_LENGTH: usize = 64;

/// Bits of a lookup's flag word.
pub mod lookup_flags {
    pub const RIGHT_TO_LEFT: u16 = 0x0001;
    pub const IGNORE_MARKS: u16 = 0x0008;
    pub const IGNORE_FLAGS: u16 = 0x000E;
    pub const USE_MARK_FILTERING_SET: u16 = 0x0010;
    pub const MARK_ATTACHMENT_TYPE_MASK: u16 = 0xFF00;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TableIndex {
    GSUB = 0,
    GPOS = 1,
}

impl TableIndex {
    pub fn iter() -> impl Iterator<Item = TableIndex> {
        [TableIndex::GSUB, TableIndex::GPOS].into_iter()
    }

    /// GPOS edits positions in place; GSUB writes an output run.
    fn in_place(self) -> bool {
        self == TableIndex::GPOS
    }
}

/// A subtable kind of one of the two layout tables.
pub trait Subtable<'a>: LookupSubtable<'a> + Apply {
    const TABLE: TableIndex;

    fn first_coverage(&self) -> Coverage<'a>;

    /// Reverse chaining subtables are applied last glyph first.
    fn is_reverse(&self) -> bool {
        false
    }
}

/// A lookup with its subtables parsed up front.
#[derive(Clone)]
pub struct CompiledLookup<S> {
    pub subtables: Vec<S>,
    /// Every glyph any subtable's coverage may start at.
    pub digest: SetDigest,
    /// Set when all subtables run backwards.
    pub reverse: bool,
    /// The flag word in the low 16 bits, the mark filtering set above.
    pub props: u32,
}

impl<'a, S: Subtable<'a>> CompiledLookup<S> {
    fn compile(lookup: Lookup<'a>) -> Self {
        let subtables: Vec<S> = lookup.subtables.into_iter::<S>().collect();

        let mut digest = SetDigest::new();
        for subtable in &subtables {
            add_coverage(&mut digest, subtable.first_coverage());
        }

        let mut props = u32::from(lookup.flags.0);
        if let Some(set) = lookup.mark_filtering_set {
            props |= u32::from(set) << 16;
        }

        CompiledLookup {
            reverse: !subtables.is_empty() && subtables.iter().all(S::is_reverse),
            subtables,
            digest,
            props,
        }
    }
}

impl<S: Apply> Apply for CompiledLookup<S> {
    fn apply(&self, ctx: &mut ApplyContext) -> Option<()> {
        if !self.digest.may_have_glyph(ctx.buffer.cur(0).as_glyph()) {
            return None;
        }

        self.subtables.iter().find_map(|subtable| subtable.apply(ctx))
    }
}

fn add_coverage(digest: &mut SetDigest, coverage: Coverage) {
    match coverage {
        Coverage::Format1 { glyphs } => digest.add_array(glyphs),
        Coverage::Format2 { records } => {
            for record in records {
                digest.add_range(record.start, record.end);
            }
        }
    }
}

/// A GSUB or GPOS table with its lookups compiled.
#[derive(Clone)]
pub struct CompiledTable<'a, S> {
    pub inner: ttf_parser::opentype_layout::LayoutTable<'a>,
    pub lookups: Vec<CompiledLookup<S>>,
}

impl<'a, S: Subtable<'a>> CompiledTable<'a, S> {
    pub fn new(inner: ttf_parser::opentype_layout::LayoutTable<'a>) -> Self {
        let lookups = inner.lookups.into_iter().map(CompiledLookup::compile).collect();
        CompiledTable { inner, lookups }
    }
}

impl<S> CompiledTable<'_, S> {
    pub fn lookup(&self, index: LookupIndex) -> Option<&CompiledLookup<S>> {
        self.lookups.get(usize::from(index))
    }
}

pub type SubstitutionTable<'a> = CompiledTable<'a, ttf_parser::gsub::SubstitutionSubtable<'a>>;
pub type PositioningTable<'a> = CompiledTable<'a, ttf_parser::gpos::PositioningSubtable<'a>>;

/// The script a layout table was resolved to.
#[derive(Clone, Copy, Debug)]
pub struct ScriptChoice {
    pub index: ScriptIndex,
    pub tag: Tag,
    /// `false` when one of the default scripts stood in.
    pub exact: bool,
}

/// Script, language and feature lookups on the raw table.
pub trait LayoutTableExt {
    fn choose_script(&self, script_tags: &[Tag]) -> Option<ScriptChoice>;
    fn choose_language(&self, script: ScriptIndex, lang_tags: &[Tag]) -> Option<LanguageIndex>;
    fn required_feature(
        &self,
        script: ScriptIndex,
        lang: Option<LanguageIndex>,
    ) -> Option<(FeatureIndex, Tag)>;
    fn language_feature(
        &self,
        script: ScriptIndex,
        lang: Option<LanguageIndex>,
        tag: Tag,
    ) -> Option<FeatureIndex>;
}

// Tried in order once none of the requested scripts is present. Plenty of
// fonts file everything under 'dflt' or, for any script, under 'latn'.
const FALLBACK_SCRIPTS: [Tag; 3] = [
    crate::tag::DEFAULT_SCRIPT,
    crate::tag::DEFAULT_LANGUAGE,
    Tag::from_bytes(b"latn"),
];

impl<'a> LayoutTableExt for ttf_parser::opentype_layout::LayoutTable<'a> {
    fn choose_script(&self, script_tags: &[Tag]) -> Option<ScriptChoice> {
        let find = |tags: &[Tag], exact: bool| {
            tags.iter().find_map(|&tag| {
                let index = self.scripts.index(tag)?;
                Some(ScriptChoice { index, tag, exact })
            })
        };

        find(script_tags, true).or_else(|| find(&FALLBACK_SCRIPTS, false))
    }

    fn choose_language(&self, script: ScriptIndex, lang_tags: &[Tag]) -> Option<LanguageIndex> {
        let languages = self.scripts.get(script)?.languages;
        lang_tags
            .iter()
            .chain(core::iter::once(&crate::tag::DEFAULT_LANGUAGE))
            .find_map(|&tag| languages.index(tag))
    }

    fn required_feature(
        &self,
        script: ScriptIndex,
        lang: Option<LanguageIndex>,
    ) -> Option<(FeatureIndex, Tag)> {
        let index = language_system(self, script, lang)?.required_feature?;
        Some((index, self.features.get(index)?.tag))
    }

    fn language_feature(
        &self,
        script: ScriptIndex,
        lang: Option<LanguageIndex>,
        tag: Tag,
    ) -> Option<FeatureIndex> {
        language_system(self, script, lang)?
            .feature_indices
            .into_iter()
            .find(|&index| self.features.get(index).map(|feature| feature.tag) == Some(tag))
    }
}

fn language_system<'a>(
    table: &ttf_parser::opentype_layout::LayoutTable<'a>,
    script: ScriptIndex,
    lang: Option<LanguageIndex>,
) -> Option<LanguageSystem<'a>> {
    let script = table.scripts.get(script)?;
    match lang {
        Some(index) => script.languages.get(index),
        None => script.default_language,
    }
}

/// Loads GDEF classes into the buffer and resets ligature state before GSUB.
pub fn substitute_start(face: &Face, buffer: &mut Buffer) {
    for info in &mut buffer.info {
        info.set_glyph_props(face.glyph_props(info.as_glyph()));
        info.set_lig_props(0);
    }
}

/// Pause callback: forget which glyphs earlier stages substituted.
pub fn clear_substitution_flags(_: &ShapePlan, _: &Face, buffer: &mut Buffer) {
    buffer.info.iter_mut().for_each(|info| info.clear_substituted());
}

/// Runs every stage of the plan's map against `table`, calling each stage's
/// pause hook once its lookups are done.
pub fn apply_layout_table<'a, S: Subtable<'a>>(
    plan: &ShapePlan,
    face: &Face,
    buffer: &mut Buffer,
    table: Option<&CompiledTable<'a, S>>,
) {
    let mut ctx = ApplyContext::new(S::TABLE, face, buffer);

    for (stage_index, stage) in plan.ot_map.stages(S::TABLE).iter().enumerate() {
        if let Some(table) = table {
            let lookups = plan.ot_map.stage_lookups(S::TABLE, stage_index);
            for lookup_map in lookups {
                let Some(lookup) = table.lookup(lookup_map.index) else {
                    continue;
                };

                // Nothing in the buffer can start this lookup.
                if !lookup.digest.may_have(&ctx.digest) {
                    continue;
                }

                log::trace!(
                    "{:?} stage {} lookup {} mask {:#x}",
                    S::TABLE,
                    stage_index,
                    lookup_map.index,
                    lookup_map.mask
                );

                ctx.set_lookup(LookupSettings::new(lookup_map, lookup.props));
                run_lookup(&mut ctx, lookup, lookup.reverse);
            }
        }

        if let Some(pause) = stage.pause_func {
            log::trace!("{:?} pause after stage {}", S::TABLE, stage_index);
            pause(plan, face, ctx.buffer);
            ctx.digest = SetDigest::from_infos(&ctx.buffer.info);
        }
    }
}

/// Applies a substitution lookup built in memory rather than read from
/// GSUB, with whatever settings the context holds.
pub fn apply_synthesized_substitution(ctx: &mut ApplyContext, lookup: &impl Apply) {
    run_lookup(ctx, lookup, false);
}

fn run_lookup(ctx: &mut ApplyContext, lookup: &impl Apply, reverse: bool) {
    if ctx.buffer.is_empty() || ctx.lookup.mask == 0 {
        return;
    }

    if reverse {
        // Reverse lookups substitute in place.
        debug_assert!(!ctx.buffer.have_output);
        ctx.buffer.idx = ctx.buffer.len() - 1;
        loop {
            apply_at_cursor(ctx, lookup);
            if ctx.buffer.idx == 0 {
                break;
            }
            ctx.buffer.idx -= 1;
        }
        return;
    }

    let in_place = ctx.table.in_place();
    if !in_place {
        ctx.buffer.clear_output();
    }

    ctx.buffer.idx = 0;
    while ctx.buffer.idx < ctx.buffer.len() {
        if !apply_at_cursor(ctx, lookup) {
            ctx.buffer.next_glyph();
        }
    }

    if !in_place {
        ctx.buffer.swap_buffers();
    }
}

/// Tries `lookup` on the glyph under the cursor. A successful application
/// moves the cursor itself.
fn apply_at_cursor(ctx: &mut ApplyContext, lookup: &impl Apply) -> bool {
    let cur = *ctx.buffer.cur(0);
    cur.mask & ctx.lookup.mask != 0
        && ctx.glyph_allowed(&cur, ctx.lookup.props)
        && ctx.spend_op()
        && lookup.apply(ctx).is_some()
}
