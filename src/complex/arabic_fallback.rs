//! Arabic shaping for fonts without `init`/`medi`/`fina`/`rlig` lookups.
//!
//! The lookups are synthesized from the font's cmap coverage of the Arabic
//! Presentation Forms blocks. Fonts that look Windows-1256 encoded get a
//! fixed set of lookups over their glyph ids instead.

use alloc::vec;
use alloc::vec::Vec;

use ttf_parser::GlyphId;

use super::arabic_table::{
    ARABIC_SHAPING, FIRST_ARABIC_SHAPE, LAST_ARABIC_SHAPE, LIGATURES, MARK_LIGATURES,
};
use super::arabic_win1256;
use crate::buffer::Buffer;
use crate::face::Face;
use crate::ot::apply::{ligate, Apply, ApplyContext, LookupSettings};
use crate::ot::layout::{apply_synthesized_substitution, lookup_flags};
use crate::ot::matching::match_input;
use crate::ot::{Map, TableIndex};
use crate::{Mask, Tag};

/// Features in the column order of `ARABIC_SHAPING`, then the ligatures.
const FALLBACK_FEATURES: &[Tag] = &[
    Tag::from_bytes(b"isol"),
    Tag::from_bytes(b"fina"),
    Tag::from_bytes(b"init"),
    Tag::from_bytes(b"medi"),
    Tag::from_bytes(b"rlig"),
    Tag::from_bytes(b"rlig"),
];

pub enum FallbackSubtable {
    /// Sorted by the input glyph.
    Single(Vec<(GlyphId, GlyphId)>),
    /// Sorted by the first glyph. Each second glyph comes with its ligature.
    Ligature(Vec<(GlyphId, Vec<(GlyphId, GlyphId)>)>),
}

impl Apply for FallbackSubtable {
    fn apply(&self, ctx: &mut ApplyContext) -> Option<()> {
        let glyph = ctx.buffer.cur(0).as_glyph();
        match self {
            Self::Single(pairs) => {
                let index = pairs.binary_search_by_key(&glyph, |&(g, _)| g).ok()?;
                ctx.replace_glyph(pairs[index].1);
                Some(())
            }
            Self::Ligature(sets) => {
                let index = sets.binary_search_by_key(&glyph, |(g, _)| *g).ok()?;
                sets[index]
                    .1
                    .iter()
                    .find_map(|&(second, ligature)| ligate_pair(ctx, second, ligature))
            }
        }
    }
}

fn ligate_pair(ctx: &mut ApplyContext, second: GlyphId, ligature: GlyphId) -> Option<()> {
    let is_second = |glyph: GlyphId, _: u16| glyph == second;
    let input = match_input(ctx, 1, &is_second)?;
    ligate(ctx, &input, ligature);
    Some(())
}

pub struct FallbackLookup {
    pub props: u32,
    pub subtables: Vec<FallbackSubtable>,
}

impl Apply for FallbackLookup {
    fn apply(&self, ctx: &mut ApplyContext) -> Option<()> {
        self.subtables.iter().find_map(|subtable| subtable.apply(ctx))
    }
}

pub struct ArabicFallbackPlan {
    lookups: Vec<(Mask, FallbackLookup)>,
}

impl ArabicFallbackPlan {
    pub fn new(map: &Map, face: &Face) -> ArabicFallbackPlan {
        log::debug!("synthesizing Arabic fallback lookups");

        if let Some(plan) = Self::from_unicode(map, face) {
            return plan;
        }

        if let Some(plan) = Self::from_win1256(map, face) {
            log::debug!("using Windows-1256 fallback lookups");
            return plan;
        }

        ArabicFallbackPlan {
            lookups: Vec::new(),
        }
    }

    fn from_unicode(map: &Map, face: &Face) -> Option<ArabicFallbackPlan> {
        let lookups: Vec<_> = FALLBACK_FEATURES
            .iter()
            .enumerate()
            .filter_map(|(i, &tag)| {
                let mask = map.one_mask(tag);
                if mask == 0 {
                    return None;
                }

                synthesize_lookup(face, i).map(|lookup| (mask, lookup))
            })
            .collect();

        (!lookups.is_empty()).then_some(ArabicFallbackPlan { lookups })
    }

    fn from_win1256(map: &Map, face: &Face) -> Option<ArabicFallbackPlan> {
        if !arabic_win1256::is_win1256_font(face) {
            return None;
        }

        let lookups: Vec<_> = arabic_win1256::lookups()
            .into_iter()
            .filter_map(|(tag, lookup)| {
                let mask = map.one_mask(tag);
                (mask != 0).then_some((mask, lookup))
            })
            .collect();

        (!lookups.is_empty()).then_some(ArabicFallbackPlan { lookups })
    }

    pub fn shape(&self, face: &Face, buffer: &mut Buffer) {
        let mut ctx = ApplyContext::new(TableIndex::GSUB, face, buffer);
        for (mask, lookup) in &self.lookups {
            ctx.set_lookup(LookupSettings::unscheduled(*mask, lookup.props));
            apply_synthesized_substitution(&mut ctx, lookup);
        }
    }
}

fn synthesize_lookup(face: &Face, feature_index: usize) -> Option<FallbackLookup> {
    match feature_index {
        0..=3 => synthesize_single(face, feature_index),
        4 => synthesize_ligature(face, LIGATURES, u32::from(lookup_flags::IGNORE_MARKS)),
        _ => synthesize_ligature(face, MARK_LIGATURES, 0),
    }
}

fn synthesize_single(face: &Face, feature_index: usize) -> Option<FallbackLookup> {
    let mut pairs: Vec<(GlyphId, GlyphId)> = (FIRST_ARABIC_SHAPE..=LAST_ARABIC_SHAPE)
        .filter_map(|u| {
            let shaped = ARABIC_SHAPING[(u - FIRST_ARABIC_SHAPE) as usize][feature_index];
            if shaped == 0 {
                return None;
            }

            let glyph = face.get_nominal_glyph(u)?;
            let shaped_glyph = face.get_nominal_glyph(u32::from(shaped))?;
            (glyph != shaped_glyph).then_some((glyph, shaped_glyph))
        })
        .collect();

    if pairs.is_empty() {
        return None;
    }

    pairs.sort_by_key(|&(glyph, _)| glyph);
    pairs.dedup_by_key(|&mut (glyph, _)| glyph);

    Some(FallbackLookup {
        props: u32::from(lookup_flags::IGNORE_MARKS),
        subtables: vec![FallbackSubtable::Single(pairs)],
    })
}

fn synthesize_ligature(
    face: &Face,
    table: &[(u16, &[(u16, u16)])],
    props: u32,
) -> Option<FallbackLookup> {
    let mut sets: Vec<(GlyphId, Vec<(GlyphId, GlyphId)>)> = table
        .iter()
        .filter_map(|&(first, pairs)| {
            let first_glyph = face.get_nominal_glyph(u32::from(first))?;
            let ligatures: Vec<_> = pairs
                .iter()
                .filter_map(|&(second, ligature)| {
                    Some((
                        face.get_nominal_glyph(u32::from(second))?,
                        face.get_nominal_glyph(u32::from(ligature))?,
                    ))
                })
                .collect();

            (!ligatures.is_empty()).then_some((first_glyph, ligatures))
        })
        .collect();

    if sets.is_empty() {
        return None;
    }

    sets.sort_by_key(|(glyph, _)| *glyph);
    sets.dedup_by_key(|(glyph, _)| *glyph);

    Some(FallbackLookup {
        props,
        subtables: vec![FallbackSubtable::Ligature(sets)],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shaping_table_covers_beh() {
        let beh = ARABIC_SHAPING[(0x0628 - FIRST_ARABIC_SHAPE) as usize];
        assert_eq!(beh, [0xFE8F, 0xFE90, 0xFE91, 0xFE92]);
    }

    #[test]
    fn lam_alef_is_built_from_shaped_forms() {
        // Initial LAM with final ALEF makes the isolated ligature.
        let (first, pairs) = LIGATURES[0];
        assert_eq!(first, 0xFEDF);
        assert!(pairs.contains(&(0xFE8E, 0xFEFB)));
    }

    #[test]
    fn shadda_comes_first_in_mark_ligatures() {
        let (first, pairs) = MARK_LIGATURES[0];
        assert_eq!(first, 0x0651);
        assert!(pairs.contains(&(0x064E, 0xFC60)));
    }
}
