//! Script-specific shapers.
//!
//! A shaper is picked once per plan by [`ComplexShaper::categorize`] and is
//! then consulted at fixed points of the shaping pipeline.

mod arabic;
mod arabic_fallback;
mod arabic_table;
mod arabic_win1256;
mod hangul;
mod hebrew;
mod indic;
mod indic_machine;
mod indic_table;
mod khmer;
mod khmer_machine;
mod machine;
mod myanmar;
mod myanmar_machine;
mod syllabic;
mod thai;
mod universal;
mod universal_machine;
mod universal_table;

use crate::buffer::Buffer;
use crate::common::{script, Direction, Script};
use crate::face::Face;
use crate::ot::normalize::{ShapeNormalizationMode, ShapeNormalizeContext};
use crate::plan::{ShapePlan, ShapePlanner};
use crate::{unicode_norm, Tag};

/// The longest run of marks the normalizer and the syllabic shapers sort.
pub const MAX_COMBINING_MARKS: usize = 32;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ZeroWidthMarksMode {
    None,
    ByGdefEarly,
    ByGdefLate,
}

/// Per-plan data precomputed by a shaper.
pub enum ShaperData {
    Arabic(arabic::ArabicShapePlan),
    Hangul(hangul::HangulShapePlan),
    Indic(indic::IndicShapePlan),
    Khmer(khmer::KhmerShapePlan),
    Universal(universal::UniversalShapePlan),
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ComplexShaper {
    Default,
    /// No mark zeroing and no fallback positioning. Used when `morx` does
    /// the script-specific work.
    Dumb,
    /// `Dumb` without normalization, for Zawgyi-encoded Myanmar.
    DumbNoNormalization,
    Arabic,
    Hangul,
    Hebrew,
    Indic,
    Khmer,
    Myanmar,
    Thai,
    Universal,
}

impl ComplexShaper {
    pub fn categorize(
        script: Script,
        direction: Direction,
        chosen_gsub_script: Option<Tag>,
    ) -> ComplexShaper {
        let default_or = |shaper| {
            if chosen_gsub_script == Some(crate::tag::DEFAULT_SCRIPT)
                || chosen_gsub_script == Some(Tag::from_bytes(b"latn"))
            {
                ComplexShaper::Default
            } else {
                shaper
            }
        };

        match script {
            script::ARABIC | script::SYRIAC => {
                // Arabic gets fallback shaping even when the font has no
                // Arabic script, but only in horizontal text.
                if (chosen_gsub_script != Some(crate::tag::DEFAULT_SCRIPT)
                    || script == script::ARABIC)
                    && direction.is_horizontal()
                {
                    ComplexShaper::Arabic
                } else {
                    ComplexShaper::Default
                }
            }

            script::THAI | script::LAO => ComplexShaper::Thai,

            script::HANGUL => ComplexShaper::Hangul,

            script::HEBREW => ComplexShaper::Hebrew,

            script::BENGALI
            | script::DEVANAGARI
            | script::GUJARATI
            | script::GURMUKHI
            | script::KANNADA
            | script::MALAYALAM
            | script::ORIYA
            | script::TAMIL
            | script::TELUGU
            | script::SINHALA => {
                if chosen_gsub_script.map_or(false, |tag| tag.to_bytes()[3] == b'3') {
                    default_or(ComplexShaper::Universal)
                } else {
                    default_or(ComplexShaper::Indic)
                }
            }

            script::KHMER => ComplexShaper::Khmer,

            script::MYANMAR => {
                // `mymr` predates the Myanmar shaping model.
                if chosen_gsub_script == Some(Tag::from_bytes(b"mymr")) {
                    ComplexShaper::Default
                } else {
                    default_or(ComplexShaper::Myanmar)
                }
            }

            script::MYANMAR_ZAWGYI => ComplexShaper::DumbNoNormalization,

            s if universal::is_universal_script(s) => default_or(ComplexShaper::Universal),

            _ => ComplexShaper::Default,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ComplexShaper::Default => "default",
            ComplexShaper::Dumb => "dumb",
            ComplexShaper::DumbNoNormalization => "dumb-no-normalization",
            ComplexShaper::Arabic => "arabic",
            ComplexShaper::Hangul => "hangul",
            ComplexShaper::Hebrew => "hebrew",
            ComplexShaper::Indic => "indic",
            ComplexShaper::Khmer => "khmer",
            ComplexShaper::Myanmar => "myanmar",
            ComplexShaper::Thai => "thai",
            ComplexShaper::Universal => "universal",
        }
    }

    /// Adds the shaper's features and pauses, before the common ones.
    pub fn collect_features(self, planner: &mut ShapePlanner) {
        match self {
            ComplexShaper::Arabic => arabic::collect_features(planner),
            ComplexShaper::Hangul => hangul::collect_features(planner),
            ComplexShaper::Indic => indic::collect_features(planner),
            ComplexShaper::Khmer => khmer::collect_features(planner),
            ComplexShaper::Myanmar => myanmar::collect_features(planner),
            ComplexShaper::Universal => universal::collect_features(planner),
            _ => {}
        }
    }

    /// Adjusts features after the common and user ones were added.
    pub fn override_features(self, planner: &mut ShapePlanner) {
        match self {
            ComplexShaper::Hangul => hangul::override_features(planner),
            ComplexShaper::Indic => indic::override_features(planner),
            ComplexShaper::Khmer => khmer::override_features(planner),
            _ => {}
        }
    }

    pub fn create_data(self, plan: &ShapePlan, face: &Face) -> Option<ShaperData> {
        match self {
            ComplexShaper::Arabic => Some(ShaperData::Arabic(arabic::ArabicShapePlan::new(
                plan, face,
            ))),
            ComplexShaper::Hangul => Some(ShaperData::Hangul(hangul::HangulShapePlan::new(
                &plan.ot_map,
            ))),
            ComplexShaper::Indic => Some(ShaperData::Indic(indic::IndicShapePlan::new(plan))),
            ComplexShaper::Khmer => Some(ShaperData::Khmer(khmer::KhmerShapePlan::new(
                &plan.ot_map,
            ))),
            ComplexShaper::Universal => Some(ShaperData::Universal(
                universal::UniversalShapePlan::new(plan, face),
            )),
            _ => None,
        }
    }

    pub fn preprocess_text(self, plan: &ShapePlan, face: &Face, buffer: &mut Buffer) {
        match self {
            ComplexShaper::Hangul => hangul::preprocess_text(plan, face, buffer),
            ComplexShaper::Thai => thai::preprocess_text(plan, face, buffer),
            _ => {}
        }
    }

    pub fn postprocess_glyphs(self, plan: &ShapePlan, face: &Face, buffer: &mut Buffer) {
        if self == ComplexShaper::Arabic {
            arabic::postprocess_glyphs(plan, face, buffer);
        }
    }

    pub fn normalization_preference(self) -> ShapeNormalizationMode {
        match self {
            ComplexShaper::DumbNoNormalization | ComplexShaper::Hangul => {
                ShapeNormalizationMode::None
            }
            ComplexShaper::Indic
            | ComplexShaper::Khmer
            | ComplexShaper::Myanmar
            | ComplexShaper::Universal => ShapeNormalizationMode::ComposedDiacriticsNoShortCircuit,
            _ => ShapeNormalizationMode::Auto,
        }
    }

    pub fn decompose(self, ctx: &ShapeNormalizeContext, ab: char) -> Option<(char, Option<char>)> {
        match self {
            ComplexShaper::Indic => indic::decompose(ctx, ab),
            ComplexShaper::Khmer => khmer::decompose(ctx, ab),
            _ => unicode_norm::decompose(ab),
        }
    }

    pub fn compose(self, ctx: &ShapeNormalizeContext, a: char, b: char) -> Option<char> {
        match self {
            ComplexShaper::Hebrew => hebrew::compose(ctx, a, b),
            ComplexShaper::Indic => indic::compose(ctx, a, b),
            ComplexShaper::Khmer | ComplexShaper::Universal => syllabic::compose(ctx, a, b),
            _ => unicode_norm::compose(a, b),
        }
    }

    /// Sets per-glyph masks. Must not change the characters.
    pub fn setup_masks(self, plan: &ShapePlan, face: &Face, buffer: &mut Buffer) {
        match self {
            ComplexShaper::Arabic => arabic::setup_masks(plan, face, buffer),
            ComplexShaper::Hangul => hangul::setup_masks(plan, face, buffer),
            ComplexShaper::Indic => indic::setup_masks(plan, face, buffer),
            ComplexShaper::Khmer => khmer::setup_masks(plan, face, buffer),
            ComplexShaper::Myanmar => myanmar::setup_masks(plan, face, buffer),
            ComplexShaper::Universal => universal::setup_masks(plan, face, buffer),
            _ => {}
        }
    }

    /// When set, GPOS is only applied if the font chose this GPOS script.
    pub fn gpos_tag(self) -> Option<Tag> {
        match self {
            ComplexShaper::Hebrew => Some(Tag::from_bytes(b"hebr")),
            _ => None,
        }
    }

    pub fn reorder_marks(self, plan: &ShapePlan, buffer: &mut Buffer, start: usize, end: usize) {
        if self == ComplexShaper::Arabic {
            arabic::reorder_marks(plan, buffer, start, end);
        }
    }

    /// When to zero mark advances and whether to position marks
    /// geometrically when the font cannot.
    pub fn marks_behavior(self) -> (ZeroWidthMarksMode, bool) {
        match self {
            ComplexShaper::Dumb | ComplexShaper::DumbNoNormalization => {
                (ZeroWidthMarksMode::None, false)
            }
            ComplexShaper::Arabic => (ZeroWidthMarksMode::ByGdefLate, true),
            ComplexShaper::Hangul | ComplexShaper::Indic | ComplexShaper::Khmer => {
                (ZeroWidthMarksMode::None, false)
            }
            ComplexShaper::Thai => (ZeroWidthMarksMode::ByGdefLate, false),
            ComplexShaper::Myanmar | ComplexShaper::Universal => {
                (ZeroWidthMarksMode::ByGdefEarly, false)
            }
            _ => (ZeroWidthMarksMode::ByGdefLate, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorize_by_script() {
        let ltr = Direction::LeftToRight;
        let rtl = Direction::RightToLeft;
        assert_eq!(ComplexShaper::categorize(script::ARABIC, rtl, None), ComplexShaper::Arabic);
        assert_eq!(
            ComplexShaper::categorize(script::ARABIC, Direction::TopToBottom, None),
            ComplexShaper::Default
        );
        assert_eq!(ComplexShaper::categorize(script::HANGUL, ltr, None), ComplexShaper::Hangul);
        assert_eq!(ComplexShaper::categorize(script::LATIN, ltr, None), ComplexShaper::Default);
        assert_eq!(ComplexShaper::categorize(script::LAO, ltr, None), ComplexShaper::Thai);
    }

    #[test]
    fn indic_follows_chosen_script() {
        let ltr = Direction::LeftToRight;
        let dev = |tag: &[u8; 4]| {
            ComplexShaper::categorize(script::DEVANAGARI, ltr, Some(Tag::from_bytes(tag)))
        };
        assert_eq!(dev(b"dev2"), ComplexShaper::Indic);
        assert_eq!(dev(b"dev3"), ComplexShaper::Universal);
        assert_eq!(dev(b"DFLT"), ComplexShaper::Default);
        assert_eq!(dev(b"latn"), ComplexShaper::Default);
    }

    #[test]
    fn myanmar_variants() {
        let ltr = Direction::LeftToRight;
        let mym = |tag: &[u8; 4]| {
            ComplexShaper::categorize(script::MYANMAR, ltr, Some(Tag::from_bytes(tag)))
        };
        assert_eq!(mym(b"mym2"), ComplexShaper::Myanmar);
        assert_eq!(mym(b"mymr"), ComplexShaper::Default);
        assert_eq!(
            ComplexShaper::categorize(script::MYANMAR_ZAWGYI, ltr, None),
            ComplexShaper::DumbNoNormalization
        );
    }

    #[test]
    fn universal_scripts() {
        let ltr = Direction::LeftToRight;
        assert_eq!(
            ComplexShaper::categorize(script::TIBETAN, ltr, Some(Tag::from_bytes(b"tibt"))),
            ComplexShaper::Universal
        );
        assert_eq!(
            ComplexShaper::categorize(script::BALINESE, ltr, Some(Tag::from_bytes(b"DFLT"))),
            ComplexShaper::Default
        );
    }
}
