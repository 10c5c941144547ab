use alloc::vec::Vec;

use crate::aat;
use crate::common::{Direction, Feature, Language, Script};
use crate::complex::{ComplexShaper, ShaperData, ZeroWidthMarksMode};
use crate::face::Face;
use crate::ot::{self, kern, FeatureFlags, TableIndex};
use crate::{Mask, Tag};

/// A reusable plan for shaping a text buffer.
///
/// A plan is tied to the segment properties and the user features it was
/// created with. It can be reused for any buffer with the same properties,
/// see [`shape_with_plan`](crate::shape_with_plan).
pub struct ShapePlan {
    pub(crate) direction: Direction,
    pub(crate) script: Option<Script>,
    pub(crate) language: Option<Language>,
    pub(crate) shaper: ComplexShaper,
    pub(crate) ot_map: ot::Map,
    pub(crate) aat_map: aat::Map,
    pub(crate) data: Option<ShaperData>,

    pub(crate) frac_mask: Mask,
    pub(crate) numr_mask: Mask,
    pub(crate) dnom_mask: Mask,
    pub(crate) rtlm_mask: Mask,
    pub(crate) kern_mask: Mask,
    pub(crate) trak_mask: Mask,

    pub(crate) requested_kerning: bool,
    pub(crate) has_frac: bool,
    pub(crate) has_vert: bool,
    pub(crate) has_gpos_mark: bool,
    pub(crate) zero_marks: bool,
    pub(crate) fallback_glyph_classes: bool,
    pub(crate) fallback_mark_positioning: bool,
    pub(crate) adjust_mark_positioning_when_zeroing: bool,

    pub(crate) apply_gpos: bool,
    pub(crate) apply_kern: bool,
    pub(crate) apply_kerx: bool,
    pub(crate) apply_morx: bool,
    pub(crate) apply_trak: bool,

    pub(crate) user_features: Vec<Feature>,
}

impl ShapePlan {
    /// Returns a plan that can be used for shaping any buffer with the
    /// provided properties.
    pub fn new(
        face: &Face,
        direction: Direction,
        script: Option<Script>,
        language: Option<&Language>,
        user_features: &[Feature],
    ) -> Self {
        debug_assert_ne!(direction, Direction::Invalid);
        let mut planner = ShapePlanner::new(face, direction, script, language);
        planner.collect_features(user_features);
        planner.compile(language, user_features)
    }

    /// The name of the complex shaper picked for this plan.
    pub fn shaper_name(&self) -> &'static str {
        self.shaper.name()
    }

    /// The direction the plan was built for.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// The script the plan was built for.
    pub fn script(&self) -> Option<Script> {
        self.script
    }

    /// The language the plan was built for.
    pub fn language(&self) -> Option<&Language> {
        self.language.as_ref()
    }
}

impl core::fmt::Debug for ShapePlan {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("ShapePlan")
            .field("direction", &self.direction)
            .field("script", &self.script)
            .field("language", &self.language)
            .field("shaper", &self.shaper)
            .field("ot_map", &self.ot_map)
            .finish()
    }
}

const fn global(flags: FeatureFlags) -> FeatureFlags {
    flags.union(FeatureFlags::GLOBAL)
}

/// Added before the complex shaper collects its own features.
const EARLY_FEATURES: &[(Tag, FeatureFlags, u32)] = &[
    // Automatic fractions.
    (Tag::from_bytes(b"frac"), FeatureFlags::empty(), 1),
    (Tag::from_bytes(b"numr"), FeatureFlags::empty(), 1),
    (Tag::from_bytes(b"dnom"), FeatureFlags::empty(), 1),
    (Tag::from_bytes(b"rand"), global(FeatureFlags::RANDOM), ot::Map::MAX_VALUE),
    // Lets the user turn tracking off.
    (Tag::from_bytes(b"trak"), global(FeatureFlags::HAS_FALLBACK), 1),
    // Private tags: the first is treated as required, the second as discretionary.
    (Tag::from_bytes(b"Harf"), FeatureFlags::GLOBAL, 1),
    (Tag::from_bytes(b"HARF"), FeatureFlags::GLOBAL, 1),
];

/// Added after the complex shaper, for every direction.
const LATE_FEATURES: &[(Tag, FeatureFlags, u32)] = &[
    (Tag::from_bytes(b"Buzz"), FeatureFlags::GLOBAL, 1),
    (Tag::from_bytes(b"BUZZ"), FeatureFlags::GLOBAL, 1),
    (Tag::from_bytes(b"abvm"), FeatureFlags::GLOBAL, 1),
    (Tag::from_bytes(b"blwm"), FeatureFlags::GLOBAL, 1),
    (Tag::from_bytes(b"ccmp"), FeatureFlags::GLOBAL, 1),
    (Tag::from_bytes(b"locl"), FeatureFlags::GLOBAL, 1),
    (Tag::from_bytes(b"mark"), FeatureFlags::GLOBAL_MANUAL_JOINERS, 1),
    (Tag::from_bytes(b"mkmk"), FeatureFlags::GLOBAL_MANUAL_JOINERS, 1),
    (Tag::from_bytes(b"rlig"), FeatureFlags::GLOBAL, 1),
];

const HORIZONTAL_FEATURES: &[(Tag, FeatureFlags, u32)] = &[
    (Tag::from_bytes(b"calt"), FeatureFlags::GLOBAL, 1),
    (Tag::from_bytes(b"clig"), FeatureFlags::GLOBAL, 1),
    (Tag::from_bytes(b"curs"), FeatureFlags::GLOBAL, 1),
    (Tag::from_bytes(b"dist"), FeatureFlags::GLOBAL, 1),
    (Tag::from_bytes(b"kern"), FeatureFlags::GLOBAL_HAS_FALLBACK, 1),
    (Tag::from_bytes(b"liga"), FeatureFlags::GLOBAL, 1),
    (Tag::from_bytes(b"rclt"), FeatureFlags::GLOBAL, 1),
];

/// `vert` is looked up under any script or language system of the font.
const VERTICAL_FEATURES: &[(Tag, FeatureFlags, u32)] =
    &[(Tag::from_bytes(b"vert"), global(FeatureFlags::GLOBAL_SEARCH), 1)];

fn direction_features(direction: Direction) -> &'static [(Tag, FeatureFlags, u32)] {
    const LTR: &[(Tag, FeatureFlags, u32)] = &[
        (Tag::from_bytes(b"ltra"), FeatureFlags::GLOBAL, 1),
        (Tag::from_bytes(b"ltrm"), FeatureFlags::GLOBAL, 1),
    ];
    // `rtlm` is only applied to mirrored characters without a mirror.
    const RTL: &[(Tag, FeatureFlags, u32)] = &[
        (Tag::from_bytes(b"rtla"), FeatureFlags::GLOBAL, 1),
        (Tag::from_bytes(b"rtlm"), FeatureFlags::empty(), 1),
    ];
    match direction {
        Direction::LeftToRight => LTR,
        Direction::RightToLeft => RTL,
        _ => &[],
    }
}

/// Which positioning tables a font offers.
#[derive(Clone, Copy, Default)]
struct PositioningTables {
    gsub: bool,
    gpos: bool,
    gpos_kern: bool,
    kerx: bool,
    kern: bool,
}

/// The tables that position a buffer.
#[derive(Clone, Copy, PartialEq, Default, Debug)]
struct Positioning {
    gpos: bool,
    kerx: bool,
    kern: bool,
}

impl PositioningTables {
    /// GPOS beats kerx only in a font that has GSUB too. Kerning falls back
    /// to kerx or kern when GPOS has none.
    fn choose(self) -> Positioning {
        let mut chosen = Positioning::default();
        if self.kerx && !(self.gsub && self.gpos) {
            chosen.kerx = true;
        } else if self.gpos {
            chosen.gpos = true;
        }

        if !chosen.kerx && !(chosen.gpos && self.gpos_kern) {
            chosen.kerx = self.kerx;
            chosen.kern = !self.kerx && self.kern;
        }

        chosen
    }
}

/// Collects the features of a future plan.
///
/// Complex shapers receive it in their feature hooks.
pub struct ShapePlanner<'a> {
    pub face: &'a Face<'a>,
    pub direction: Direction,
    pub script: Option<Script>,
    pub ot_map: ot::MapBuilder<'a>,
    pub aat_map: aat::MapBuilder,
    pub apply_morx: bool,
    pub shaper: ComplexShaper,
    zero_width_marks: ZeroWidthMarksMode,
    fallback_mark_positioning: bool,
}

impl<'a> ShapePlanner<'a> {
    pub fn new(
        face: &'a Face<'a>,
        direction: Direction,
        script: Option<Script>,
        language: Option<&Language>,
    ) -> Self {
        let ot_map = ot::MapBuilder::new(face, script, language);
        let mut shaper = script.map_or(ComplexShaper::Default, |script| {
            ComplexShaper::categorize(script, direction, ot_map.chosen_script(TableIndex::GSUB))
        });

        // Mark handling follows the script, even when morx takes over below.
        let (zero_width_marks, fallback_mark_positioning) = shaper.marks_behavior();

        // Vertical text goes through morx only when GSUB has nothing to offer.
        let apply_morx = face.has_morx() && (direction.is_horizontal() || face.gsub.is_none());

        // morx does the script-specific work itself.
        if apply_morx
            && !matches!(shaper, ComplexShaper::Default | ComplexShaper::DumbNoNormalization)
        {
            shaper = ComplexShaper::Dumb;
        }

        ShapePlanner {
            face,
            direction,
            script,
            ot_map,
            aat_map: aat::MapBuilder::new(),
            apply_morx,
            shaper,
            zero_width_marks,
            fallback_mark_positioning,
        }
    }

    fn add_features(&mut self, features: &[(Tag, FeatureFlags, u32)]) {
        for &(tag, flags, value) in features {
            self.ot_map.add_feature(tag, flags, value);
        }
    }

    pub fn collect_features(&mut self, user_features: &[Feature]) {
        self.ot_map.enable_feature(Tag::from_bytes(b"rvrn"), FeatureFlags::empty(), 1);
        self.ot_map.add_gsub_pause(None);

        self.add_features(direction_features(self.direction));
        self.add_features(EARLY_FEATURES);

        let shaper = self.shaper;
        shaper.collect_features(self);

        self.add_features(LATE_FEATURES);
        if self.direction.is_horizontal() {
            self.add_features(HORIZONTAL_FEATURES);
        } else {
            self.add_features(VERTICAL_FEATURES);
        }

        for feature in user_features {
            let flags = match feature.is_global() {
                true => FeatureFlags::GLOBAL,
                false => FeatureFlags::empty(),
            };
            self.ot_map.add_feature(feature.tag, flags, feature.value);

            // Features without a morx mapping are ignored there.
            if self.apply_morx {
                let _ = self.aat_map.add_feature(self.face, feature.tag, feature.value);
            }
        }

        shaper.override_features(self);
    }

    pub fn compile(mut self, language: Option<&Language>, user_features: &[Feature]) -> ShapePlan {
        let face = self.face;
        let ot_map = self.ot_map.compile();
        let aat_map = match self.apply_morx {
            true => self.aat_map.compile(face),
            false => aat::Map::default(),
        };

        let one_mask = |tag: &[u8; 4]| ot_map.one_mask(Tag::from_bytes(tag));
        let frac_mask = one_mask(b"frac");
        let numr_mask = one_mask(b"numr");
        let dnom_mask = one_mask(b"dnom");

        let kern_tag = match self.direction.is_horizontal() {
            true => Tag::from_bytes(b"kern"),
            false => Tag::from_bytes(b"vkrn"),
        };
        let kern_mask = ot_map.mask(kern_tag).0;
        let trak_mask = ot_map.mask(Tag::from_bytes(b"trak")).0;

        // A shaper that wants a specific GPOS script gets no GPOS otherwise.
        let gpos_tag = self.shaper.gpos_tag();
        let gpos_usable = gpos_tag.is_none() || gpos_tag == ot_map.chosen_script(TableIndex::GPOS);

        let positioning = PositioningTables {
            gsub: face.gsub.is_some(),
            gpos: gpos_usable && face.gpos.is_some(),
            gpos_kern: ot_map.feature_index(TableIndex::GPOS, kern_tag).is_some(),
            kerx: face.has_kerx(),
            kern: kern::has_kerning(face),
        }
        .choose();

        let zero_marks = self.zero_width_marks != ZeroWidthMarksMode::None
            && !positioning.kerx
            && !(positioning.kern && kern::has_machine_kerning(face));

        let adjust_marks = !positioning.gpos
            && !positioning.kerx
            && !(positioning.kern && kern::has_cross_kerning(face));

        let mut plan = ShapePlan {
            direction: self.direction,
            script: self.script,
            language: language.cloned(),
            shaper: self.shaper,
            data: None,
            frac_mask,
            numr_mask,
            dnom_mask,
            rtlm_mask: one_mask(b"rtlm"),
            kern_mask,
            trak_mask,
            requested_kerning: kern_mask != 0,
            has_frac: frac_mask != 0 || (numr_mask != 0 && dnom_mask != 0),
            has_vert: one_mask(b"vert") != 0,
            has_gpos_mark: one_mask(b"mark") != 0,
            zero_marks,
            fallback_glyph_classes: !face.has_glyph_classes(),
            fallback_mark_positioning: adjust_marks && self.fallback_mark_positioning,
            // Emoji sequences formed by morx expect marks to keep their offsets.
            adjust_mark_positioning_when_zeroing: adjust_marks && !self.apply_morx,
            apply_gpos: positioning.gpos,
            apply_kern: positioning.kern,
            apply_kerx: positioning.kerx,
            apply_morx: self.apply_morx,
            apply_trak: trak_mask != 0 && face.has_trak(),
            ot_map,
            aat_map,
            user_features: user_features.to_vec(),
        };

        plan.data = plan.shaper.create_data(&plan, face);

        log::debug!(
            "plan created: shaper {}, GSUB script {:?}, GPOS script {:?}, {} GSUB and {} GPOS lookups",
            plan.shaper.name(),
            plan.ot_map.chosen_script(TableIndex::GSUB),
            plan.ot_map.chosen_script(TableIndex::GPOS),
            plan.ot_map.lookup_count(TableIndex::GSUB),
            plan.ot_map.lookup_count(TableIndex::GPOS),
        );

        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_plan_is_send_and_sync() {
        fn ensure_send_and_sync<T: Send + Sync>() {}
        ensure_send_and_sync::<ShapePlan>();
    }

    fn chosen(gpos: bool, kerx: bool, kern: bool) -> Positioning {
        Positioning { gpos, kerx, kern }
    }

    #[test]
    fn kerx_wins_without_gsub() {
        let tables = PositioningTables {
            gpos: true,
            gpos_kern: true,
            kerx: true,
            ..PositioningTables::default()
        };
        assert_eq!(tables.choose(), chosen(false, true, false));
    }

    #[test]
    fn gpos_wins_in_an_opentype_font() {
        let tables = PositioningTables {
            gsub: true,
            gpos: true,
            gpos_kern: true,
            kerx: true,
            kern: true,
        };
        assert_eq!(tables.choose(), chosen(true, false, false));
    }

    #[test]
    fn kerning_falls_back_when_gpos_has_none() {
        let tables = PositioningTables {
            gsub: true,
            gpos: true,
            kern: true,
            ..PositioningTables::default()
        };
        assert_eq!(tables.choose(), chosen(true, false, true));

        let tables = PositioningTables {
            kerx: true,
            ..tables
        };
        assert_eq!(tables.choose(), chosen(true, true, false));
    }

    #[test]
    fn kern_table_alone() {
        let tables = PositioningTables {
            kern: true,
            ..PositioningTables::default()
        };
        assert_eq!(tables.choose(), chosen(false, false, true));
        assert_eq!(PositioningTables::default().choose(), Positioning::default());
    }

    #[test]
    fn direction_features_follow_the_direction() {
        let tags = |d| direction_features(d).iter().map(|f| f.0).collect::<alloc::vec::Vec<_>>();
        assert_eq!(tags(Direction::LeftToRight), [Tag::from_bytes(b"ltra"), Tag::from_bytes(b"ltrm")]);
        assert_eq!(tags(Direction::RightToLeft), [Tag::from_bytes(b"rtla"), Tag::from_bytes(b"rtlm")]);
        assert!(tags(Direction::TopToBottom).is_empty());
    }
}
