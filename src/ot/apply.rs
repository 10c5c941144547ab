//! Per-lookup state threaded through GSUB and GPOS application.

use ttf_parser::opentype_layout::{LookupIndex, SequenceLookupRecord};
use ttf_parser::{GlyphId, LazyArray16};

use super::layout::{lookup_flags, CompiledLookup, TableIndex};
use super::layout::{MAX_CONTEXT_LENGTH, MAX_NESTING_LEVEL};
use super::map::LookupMap;
use super::matching::InputMatch;
use super::set_digest::SetDigest;
use crate::buffer::{Buffer, GlyphInfo, GlyphPropsFlags};
use crate::face::Face;
use crate::unicode::GeneralCategory;
use crate::Mask;

/// Something that can be applied at the buffer cursor.
pub trait Apply {
    /// Returns `None` when nothing matched; the caller then advances.
    fn apply(&self, ctx: &mut ApplyContext) -> Option<()>;
}

/// Checks whether a lookup would apply to a fixed glyph sequence, without
/// touching a buffer.
pub trait WouldApply {
    fn would_apply(&self, ctx: &WouldApplyContext) -> bool;
}

pub struct WouldApplyContext<'a> {
    pub glyphs: &'a [GlyphId],
    /// Reject rules that need backtrack or lookahead context.
    pub zero_context: bool,
}

/// How the lookup being applied treats the buffer.
#[derive(Clone, Copy, Debug)]
pub struct LookupSettings {
    pub index: LookupIndex,
    /// The flag word in the low 16 bits, the mark filtering set above.
    pub props: u32,
    pub mask: Mask,
    pub auto_zwnj: bool,
    pub auto_zwj: bool,
    pub random: bool,
    pub per_syllable: bool,
}

impl LookupSettings {
    pub fn new(map: &LookupMap, props: u32) -> Self {
        LookupSettings {
            index: map.index,
            props,
            mask: map.mask,
            auto_zwnj: map.auto_zwnj,
            auto_zwj: map.auto_zwj,
            random: map.random,
            per_syllable: map.per_syllable,
        }
    }

    /// Settings for a lookup the feature map did not schedule.
    pub fn unscheduled(mask: Mask, props: u32) -> Self {
        LookupSettings {
            index: u16::MAX,
            props,
            mask,
            auto_zwnj: true,
            auto_zwj: true,
            random: false,
            per_syllable: false,
        }
    }

    fn flags(&self) -> u16 {
        self.props as u16
    }
}

/// Result of the last mark-to-base search: the base found, if any, and
/// the index the search started from.
#[derive(Clone, Copy, Default, Debug)]
pub struct BaseCache {
    pub base: Option<usize>,
    pub until: usize,
}

/// How a glyph came to replace the one under the cursor.
#[derive(Clone, Copy)]
enum Origin {
    Single,
    Ligature(GlyphPropsFlags),
    Component(GlyphPropsFlags),
}

pub struct ApplyContext<'a, 'b> {
    pub table: TableIndex,
    pub face: &'a Face<'b>,
    pub buffer: &'a mut Buffer,
    pub lookup: LookupSettings,
    /// How many nested lookups deep we are.
    pub depth: usize,
    pub base_cache: BaseCache,
    /// Every glyph that entered the buffer during this pass.
    pub digest: SetDigest,
    rng: u32,
}

impl<'a, 'b> ApplyContext<'a, 'b> {
    pub fn new(table: TableIndex, face: &'a Face<'b>, buffer: &'a mut Buffer) -> Self {
        ApplyContext {
            table,
            face,
            digest: SetDigest::from_infos(&buffer.info),
            buffer,
            lookup: LookupSettings::unscheduled(1, 0),
            depth: 0,
            base_cache: BaseCache::default(),
            rng: 1,
        }
    }

    pub fn set_lookup(&mut self, lookup: LookupSettings) {
        self.lookup = lookup;
        self.base_cache = BaseCache::default();
    }

    pub fn is_nested(&self) -> bool {
        self.depth != 0
    }

    /// Takes one unit from the buffer's operation budget. Once it is gone,
    /// every remaining lookup degrades to copying its input.
    pub fn spend_op(&mut self) -> bool {
        if self.buffer.max_ops <= 0 {
            return false;
        }

        self.buffer.max_ops -= 1;
        if self.buffer.max_ops == 0 {
            log::warn!(
                "operation budget exhausted in {:?} lookup {}",
                self.table,
                self.lookup.index
            );
        }

        true
    }

    /// `minstd_rand`, seeded with 1 for every table pass.
    pub fn next_random(&mut self) -> u32 {
        self.rng = (u64::from(self.rng) * 48271 % 2147483647) as u32;
        self.rng
    }

    /// Applies lookup `index` of the current table at the cursor, as a
    /// nested lookup of a contextual rule.
    pub fn recurse(&mut self, index: LookupIndex) -> Option<()> {
        if self.depth >= MAX_NESTING_LEVEL {
            return None;
        }

        self.buffer.max_ops -= 1;
        if self.buffer.max_ops < 0 {
            return None;
        }

        let saved = self.lookup;
        self.lookup.index = index;
        self.depth += 1;

        let face = self.face;
        let applied = match self.table {
            TableIndex::GSUB => face
                .gsub
                .as_ref()
                .and_then(|table| table.lookup(index))
                .and_then(|lookup| self.apply_nested_lookup(lookup)),
            TableIndex::GPOS => face
                .gpos
                .as_ref()
                .and_then(|table| table.lookup(index))
                .and_then(|lookup| self.apply_nested_lookup(lookup)),
        };

        self.depth -= 1;
        self.lookup = saved;
        applied
    }

    fn apply_nested_lookup<S: Apply>(&mut self, lookup: &CompiledLookup<S>) -> Option<()> {
        self.lookup.props = lookup.props;
        lookup.apply(self)
    }

    /// Whether a lookup with `props` looks at `info` at all.
    pub fn glyph_allowed(&self, info: &GlyphInfo, props: u32) -> bool {
        let flags = props as u16;
        let class = info.glyph_props();

        if class & flags & lookup_flags::IGNORE_FLAGS != 0 {
            return false;
        }

        if class & GlyphPropsFlags::MARK.bits() == 0 {
            return true;
        }

        if flags & lookup_flags::USE_MARK_FILTERING_SET != 0 {
            let set = (props >> 16) as u16;
            return self
                .face
                .tables()
                .gdef
                .map_or(false, |gdef| gdef.is_mark_glyph(info.as_glyph(), Some(set)));
        }

        match flags & lookup_flags::MARK_ATTACHMENT_TYPE_MASK {
            0 => true,
            wanted => wanted == class & lookup_flags::MARK_ATTACHMENT_TYPE_MASK,
        }
    }

    /// Whether the current lookup reads right to left for cursive chains.
    pub fn right_to_left(&self) -> bool {
        self.lookup.flags() & lookup_flags::RIGHT_TO_LEFT != 0
    }

    /// Updates the class bits of the glyph under the cursor for its
    /// replacement `glyph`. GDEF wins over any guess.
    fn mark_substituted(&mut self, glyph: GlyphId, origin: Origin) {
        self.digest.add(glyph);

        let mut props = self.buffer.cur(0).glyph_props() | GlyphPropsFlags::SUBSTITUTED.bits();
        let guess = match origin {
            Origin::Single => GlyphPropsFlags::empty(),
            Origin::Ligature(guess) => {
                // Only the most recent of ligation and multiplication counts.
                props |= GlyphPropsFlags::LIGATED.bits();
                props &= !GlyphPropsFlags::MULTIPLIED.bits();
                guess
            }
            Origin::Component(guess) => {
                props |= GlyphPropsFlags::MULTIPLIED.bits();
                guess
            }
        };

        if self.face.has_glyph_classes() {
            props = (props & GlyphPropsFlags::PRESERVE.bits()) | self.face.glyph_props(glyph);
        } else if !guess.is_empty() {
            props = (props & GlyphPropsFlags::PRESERVE.bits()) | guess.bits();
        }

        self.buffer.cur_mut(0).set_glyph_props(props);
    }

    pub fn replace_glyph(&mut self, glyph: GlyphId) {
        self.mark_substituted(glyph, Origin::Single);
        self.buffer.replace_glyph(u32::from(glyph.0));
    }

    pub fn replace_glyph_in_place(&mut self, glyph: GlyphId) {
        self.mark_substituted(glyph, Origin::Single);
        self.buffer.cur_mut(0).glyph_id = u32::from(glyph.0);
    }

    fn replace_with_ligature(&mut self, glyph: GlyphId, guess: GlyphPropsFlags) {
        self.mark_substituted(glyph, Origin::Ligature(guess));
        self.buffer.replace_glyph(u32::from(glyph.0));
    }

    pub fn output_component(&mut self, glyph: GlyphId, guess: GlyphPropsFlags) {
        self.mark_substituted(glyph, Origin::Component(guess));
        self.buffer.output_glyph(u32::from(glyph.0));
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum LigatureKind {
    /// A base followed only by marks. Stays a base so later marks attach.
    Base,
    /// Only marks. Keeps its old ligature id so it can still attach to
    /// the ligature those marks belonged to.
    Mark,
    Ligature,
}

/// The component a mark that sat on component `comp` of a ligature with
/// `last` components ends up on, once `so_far` components precede it.
fn moved_component(so_far: u8, last: u8, comp: u8) -> u8 {
    so_far.wrapping_sub(last).wrapping_add(comp.min(last))
}

/// Replaces the matched input with `glyph`. Marks between and right after
/// the matched glyphs are renumbered onto the new ligature's components.
pub fn ligate(ctx: &mut ApplyContext, input: &InputMatch, glyph: GlyphId) {
    let buffer = &mut *ctx.buffer;
    buffer.merge_clusters(buffer.idx, input.end);

    let first = buffer.info[input.positions[0]];
    let rest_are_marks = input.positions[1..]
        .iter()
        .all(|&i| buffer.info[i].is_mark());
    let kind = if !rest_are_marks {
        LigatureKind::Ligature
    } else if first.is_base_glyph() {
        LigatureKind::Base
    } else if first.is_mark() {
        LigatureKind::Mark
    } else {
        LigatureKind::Ligature
    };

    let (lig_id, guess) = match kind {
        LigatureKind::Ligature => (buffer.allocate_lig_id(), GlyphPropsFlags::LIGATURE),
        _ => (0, GlyphPropsFlags::empty()),
    };

    let cur = buffer.cur_mut(0);
    let mut last_lig_id = cur.lig_id();
    let mut last_comps = cur.lig_num_comps();
    let mut so_far = last_comps;

    if kind == LigatureKind::Ligature {
        cur.set_lig_props_for_ligature(lig_id, input.components);
        if cur.general_category() == GeneralCategory::NonspacingMark {
            cur.set_general_category(GeneralCategory::OtherLetter);
        }
    }

    ctx.replace_with_ligature(glyph, guess);
    let buffer = &mut *ctx.buffer;

    for &position in &input.positions[1..] {
        while buffer.idx < position {
            if kind == LigatureKind::Ligature {
                let cur = buffer.cur_mut(0);
                let comp = match cur.lig_comp() {
                    0 => last_comps,
                    comp => comp,
                };
                cur.set_lig_props_for_mark(lig_id, moved_component(so_far, last_comps, comp));
            }
            buffer.next_glyph();
        }

        let component = buffer.cur(0);
        last_lig_id = component.lig_id();
        last_comps = component.lig_num_comps();
        so_far = so_far.wrapping_add(last_comps);

        buffer.skip_glyph();
    }

    if kind == LigatureKind::Mark || last_lig_id == 0 {
        return;
    }

    // Marks that trail the match but sat on the last component.
    let (idx, len) = (buffer.idx, buffer.len());
    for info in &mut buffer.info[idx..len] {
        let comp = info.lig_comp();
        if info.lig_id() != last_lig_id || comp == 0 {
            break;
        }

        info.set_lig_props_for_mark(lig_id, moved_component(so_far, last_comps, comp));
    }
}

/// Runs the nested lookups of a matched contextual rule.
///
/// Input positions are kept as output-side indices, so the ones after a
/// nested lookup that grew or shrank the buffer get shifted along.
pub fn apply_nested(
    ctx: &mut ApplyContext,
    input: InputMatch,
    records: LazyArray16<SequenceLookupRecord>,
) {
    let InputMatch {
        mut positions, end, ..
    } = input;

    let rebase = ctx.buffer.backtrack_len() as isize - ctx.buffer.idx as isize;
    for position in positions.iter_mut() {
        *position = (*position as isize + rebase) as usize;
    }
    let mut end = (end as isize + rebase) as usize;

    for record in records {
        let at = usize::from(record.sequence_index);
        let Some(&start) = positions.get(at) else {
            continue;
        };

        let before = ctx.buffer.backtrack_len() + ctx.buffer.lookahead_len();

        // Earlier nested lookups may have deleted this glyph.
        if start >= before {
            continue;
        }

        if !ctx.buffer.move_to(start) || ctx.buffer.max_ops <= 0 {
            break;
        }

        if ctx.recurse(record.lookup_list_index).is_none() {
            continue;
        }

        let after = ctx.buffer.backtrack_len() + ctx.buffer.lookahead_len();
        let mut delta = after as isize - before as isize;
        if delta == 0 {
            continue;
        }

        // Growth is taken to happen right after `start`; shrinkage eats
        // the positions following it. `end` never moves before `start`.
        let moved_end = end as isize + delta;
        if moved_end < start as isize {
            delta += start as isize - moved_end;
            end = start;
        } else {
            end = moved_end as usize;
        }

        let next = at + 1;
        if delta > 0 {
            let grown = delta as usize;
            if positions.len() + grown > MAX_CONTEXT_LENGTH {
                break;
            }

            positions.insert_many(next, (1..=grown).map(|k| start + k));
            for position in &mut positions[next + grown..] {
                *position += grown;
            }
        } else {
            let removed = (-delta as usize).min(positions.len() - next);
            positions.drain(next..next + removed);
            for position in &mut positions[next..] {
                *position = position.saturating_sub(removed);
            }
        }
    }

    ctx.buffer.move_to(end);
}
