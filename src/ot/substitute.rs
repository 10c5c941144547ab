//! GSUB application.

use ttf_parser::gsub::*;
use ttf_parser::opentype_layout::Coverage;
use ttf_parser::{GlyphId, LazyArray16};

use super::apply::{ligate, Apply, ApplyContext, WouldApply, WouldApplyContext};
use super::contextual::by_coverage;
use super::layout::{apply_layout_table, CompiledLookup, Subtable, TableIndex};
use super::map::Map;
use super::matching::{match_backtrack, match_input, match_lookahead};
use crate::buffer::{Buffer, GlyphPropsFlags};
use crate::face::Face;
use crate::plan::ShapePlan;

pub fn substitute(plan: &ShapePlan, face: &Face, buffer: &mut Buffer) {
    apply_layout_table(plan, face, buffer, face.gsub.as_ref());
}

impl<'a> Subtable<'a> for SubstitutionSubtable<'a> {
    const TABLE: TableIndex = TableIndex::GSUB;

    fn first_coverage(&self) -> Coverage<'a> {
        self.coverage()
    }

    fn is_reverse(&self) -> bool {
        matches!(self, Self::ReverseChainSingle(_))
    }
}

/// Whether any GSUB lookup that `feature_tag` enables in the map would
/// replace `glyphs`. The syllabic shapers use it to find out which
/// conjunct forms a font has.
pub fn would_substitute(
    map: &Map,
    face: &Face,
    feature_tag: ttf_parser::Tag,
    glyphs: &[GlyphId],
    zero_context: bool,
) -> bool {
    let Some(table) = face.gsub.as_ref() else {
        return false;
    };

    let Some(feature) = map
        .feature_index(TableIndex::GSUB, feature_tag)
        .and_then(|index| table.inner.features.get(index))
    else {
        return false;
    };

    let ctx = WouldApplyContext {
        glyphs,
        zero_context,
    };

    feature
        .lookup_indices
        .into_iter()
        .filter_map(|index| table.lookup(index))
        .any(|lookup| lookup.would_apply(&ctx))
}

impl<S: WouldApply> WouldApply for CompiledLookup<S> {
    fn would_apply(&self, ctx: &WouldApplyContext) -> bool {
        ctx.glyphs
            .first()
            .map_or(false, |&glyph| self.digest.may_have_glyph(glyph))
            && self.subtables.iter().any(|subtable| subtable.would_apply(ctx))
    }
}

impl WouldApply for SubstitutionSubtable<'_> {
    fn would_apply(&self, ctx: &WouldApplyContext) -> bool {
        match self {
            Self::Ligature(t) => t.would_apply(ctx),
            Self::Context(t) => t.would_apply(ctx),
            Self::ChainContext(t) => t.would_apply(ctx),
            // The rest replace exactly one glyph.
            _ => ctx.glyphs.len() == 1 && self.coverage().contains(ctx.glyphs[0]),
        }
    }
}

impl Apply for SubstitutionSubtable<'_> {
    fn apply(&self, ctx: &mut ApplyContext) -> Option<()> {
        match self {
            Self::Single(t) => t.apply(ctx),
            Self::Multiple(t) => t.apply(ctx),
            Self::Alternate(t) => t.apply(ctx),
            Self::Ligature(t) => t.apply(ctx),
            Self::Context(t) => t.apply(ctx),
            Self::ChainContext(t) => t.apply(ctx),
            Self::ReverseChainSingle(t) => t.apply(ctx),
        }
    }
}

impl Apply for SingleSubstitution<'_> {
    fn apply(&self, ctx: &mut ApplyContext) -> Option<()> {
        let glyph = ctx.buffer.cur(0).as_glyph();
        let replacement = match *self {
            // The delta is added modulo 65536.
            Self::Format1 { coverage, delta } => coverage
                .get(glyph)
                .map(|_| GlyphId(glyph.0.wrapping_add(delta as u16))),
            Self::Format2 {
                coverage,
                substitutes,
            } => coverage.get(glyph).and_then(|index| substitutes.get(index)),
        }?;

        ctx.replace_glyph(replacement);
        Some(())
    }
}

impl Apply for MultipleSubstitution<'_> {
    fn apply(&self, ctx: &mut ApplyContext) -> Option<()> {
        let index = self.coverage.get(ctx.buffer.cur(0).as_glyph())?;
        let substitutes = self.sequences.get(index)?.substitutes;

        match substitutes.len() {
            // Invalid in OpenType; Uniscribe deletes the glyph.
            0 => ctx.buffer.delete_glyph(),
            // Not a multiplication.
            1 => ctx.replace_glyph(substitutes.get(0)?),
            _ => expand(ctx, substitutes),
        }

        Some(())
    }
}

/// Replaces the cursor glyph with `substitutes`, numbering them as
/// components of the glyph they came from.
fn expand(ctx: &mut ApplyContext, substitutes: LazyArray16<GlyphId>) {
    let source = *ctx.buffer.cur(0);
    let guess = if source.is_ligature() {
        GlyphPropsFlags::BASE_GLYPH
    } else {
        GlyphPropsFlags::empty()
    };

    for (component, glyph) in substitutes.into_iter().enumerate() {
        // A glyph sitting on a ligature keeps its component.
        if source.lig_id() == 0 {
            ctx.buffer
                .cur_mut(0)
                .set_lig_props_for_component(component as u8);
        }
        ctx.output_component(glyph, guess);
    }

    ctx.buffer.skip_glyph();
}

impl Apply for AlternateSubstitution<'_> {
    fn apply(&self, ctx: &mut ApplyContext) -> Option<()> {
        let index = self.coverage.get(ctx.buffer.cur(0).as_glyph())?;
        let alternates = self.alternate_sets.get(index)?.alternates;
        if alternates.is_empty() {
            return None;
        }

        // The feature value selects the alternate, counting from 1. This
        // breaks if two features enabled the lookup at once.
        let mask = ctx.lookup.mask;
        let mut choice = (ctx.buffer.cur(0).mask & mask) >> mask.trailing_zeros();

        if choice == Map::MAX_VALUE && ctx.lookup.random {
            ctx.buffer.unsafe_to_break_all();
            choice = ctx.next_random() % u32::from(alternates.len()) + 1;
        }

        let index = u16::try_from(choice).ok()?.checked_sub(1)?;
        ctx.replace_glyph(alternates.get(index)?);
        Some(())
    }
}

impl Apply for LigatureSubstitution<'_> {
    fn apply(&self, ctx: &mut ApplyContext) -> Option<()> {
        let index = self.coverage.get(ctx.buffer.cur(0).as_glyph())?;
        self.ligature_sets
            .get(index)?
            .into_iter()
            .find_map(|ligature| form_ligature(ctx, ligature))
    }
}

impl WouldApply for LigatureSubstitution<'_> {
    fn would_apply(&self, ctx: &WouldApplyContext) -> bool {
        let Some(set) = self
            .coverage
            .get(ctx.glyphs[0])
            .and_then(|index| self.ligature_sets.get(index))
        else {
            return false;
        };

        set.into_iter().any(|ligature| {
            let components = ligature.components;
            ctx.glyphs.len() == usize::from(components.len()) + 1
                && components.into_iter().eq(ctx.glyphs[1..].iter().copied())
        })
    }
}

fn form_ligature(ctx: &mut ApplyContext, ligature: Ligature) -> Option<()> {
    let components = ligature.components;

    // A ligature of one component is a plain replacement.
    if components.is_empty() {
        ctx.replace_glyph(ligature.glyph);
        return Some(());
    }

    let is_component = |glyph: GlyphId, i: u16| components.get(i) == Some(glyph);
    let input = match_input(ctx, components.len(), &is_component)?;
    ligate(ctx, &input, ligature.glyph);
    Some(())
}

impl Apply for ReverseChainSingleSubstitution<'_> {
    fn apply(&self, ctx: &mut ApplyContext) -> Option<()> {
        // Never runs as a nested lookup.
        if ctx.is_nested() {
            return None;
        }

        let index = self.coverage.get(ctx.buffer.cur(0).as_glyph())?;
        let replacement = self.substitutes.get(index)?;

        let (backtrack_coverages, lookahead_coverages) =
            (self.backtrack_coverages, self.lookahead_coverages);
        let backtrack = by_coverage(move |i| backtrack_coverages.get(i));
        let lookahead = by_coverage(move |i| lookahead_coverages.get(i));

        let start = match_backtrack(ctx, self.backtrack_coverages.len(), &backtrack)?;
        let end = match_lookahead(
            ctx,
            self.lookahead_coverages.len(),
            &lookahead,
            ctx.buffer.idx + 1,
        )?;

        ctx.buffer.unsafe_to_break_from_outbuffer(start, end);
        ctx.replace_glyph_in_place(replacement);

        // The cursor stays; the backward loop moves it.
        Some(())
    }
}
