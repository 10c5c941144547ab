use alloc::vec::Vec;

use crate::face::Face;
use crate::Tag;

/// Subtable flags enabled for each `morx` chain.
#[derive(Clone, Default, Debug)]
pub struct Map {
    pub chain_flags: Vec<u32>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FeatureInfo {
    pub kind: u16,
    pub setting: u16,
    pub is_exclusive: bool,
}

/// Collects the AAT feature settings requested through OpenType tags.
#[derive(Default)]
pub struct MapBuilder {
    pub features: Vec<FeatureInfo>,
}

/// AAT feature types used by the tag mapping.
pub mod feature_type {
    pub const LIGATURES: u16 = 1;
    pub const LETTER_CASE: u16 = 3;
    pub const VERTICAL_SUBSTITUTION: u16 = 4;
    pub const NUMBER_SPACING: u16 = 6;
    pub const VERTICAL_POSITION: u16 = 10;
    pub const FRACTIONS: u16 = 11;
    pub const TYPOGRAPHIC_EXTRAS: u16 = 14;
    pub const MATHEMATICAL_EXTRAS: u16 = 15;
    pub const CHARACTER_ALTERNATIVES: u16 = 17;
    pub const STYLE_OPTIONS: u16 = 19;
    pub const CHARACTER_SHAPE: u16 = 20;
    pub const NUMBER_CASE: u16 = 21;
    pub const TEXT_SPACING: u16 = 22;
    pub const TRANSLITERATION: u16 = 23;
    pub const RUBY_KANA: u16 = 28;
    pub const ITALIC_CJK_ROMAN: u16 = 32;
    pub const CASE_SENSITIVE_LAYOUT: u16 = 33;
    pub const ALTERNATE_KANA: u16 = 34;
    pub const STYLISTIC_ALTERNATIVES: u16 = 35;
    pub const CONTEXTUAL_ALTERNATIVES: u16 = 36;
    pub const LOWER_CASE: u16 = 37;
    pub const UPPER_CASE: u16 = 38;
}

/// The deprecated small caps selector of `LETTER_CASE`.
pub const LETTER_CASE_SMALL_CAPS: u16 = 3;
/// The small caps selector of `LOWER_CASE`.
pub const LOWER_CASE_SMALL_CAPS: u16 = 1;

/// An OpenType tag with its AAT feature type and the selectors that turn
/// it on and off.
struct FeatureMapping {
    tag: Tag,
    kind: u16,
    enable: u16,
    disable: u16,
}

const fn mapping(tag: &[u8; 4], kind: u16, enable: u16, disable: u16) -> FeatureMapping {
    FeatureMapping {
        tag: Tag::from_bytes(tag),
        kind,
        enable,
        disable,
    }
}

/// Sorted by tag.
#[rustfmt::skip]
const FEATURE_MAPPINGS: &[FeatureMapping] = {
    use feature_type::*;
    &[
        mapping(b"afrc", FRACTIONS, 1, 0),
        mapping(b"c2pc", UPPER_CASE, 2, 0),
        mapping(b"c2sc", UPPER_CASE, 1, 0),
        mapping(b"calt", CONTEXTUAL_ALTERNATIVES, 0, 1),
        mapping(b"case", CASE_SENSITIVE_LAYOUT, 0, 1),
        mapping(b"clig", LIGATURES, 18, 19),
        mapping(b"cpsp", CASE_SENSITIVE_LAYOUT, 2, 3),
        mapping(b"cswh", CONTEXTUAL_ALTERNATIVES, 4, 5),
        mapping(b"dlig", LIGATURES, 4, 5),
        mapping(b"expt", CHARACTER_SHAPE, 10, 16),
        mapping(b"frac", FRACTIONS, 2, 0),
        mapping(b"fwid", TEXT_SPACING, 1, 7),
        mapping(b"halt", TEXT_SPACING, 6, 7),
        mapping(b"hkna", ALTERNATE_KANA, 0, 1),
        mapping(b"hlig", LIGATURES, 20, 21),
        mapping(b"hngl", TRANSLITERATION, 1, 0),
        mapping(b"hojo", CHARACTER_SHAPE, 12, 16),
        mapping(b"hwid", TEXT_SPACING, 2, 7),
        mapping(b"ital", ITALIC_CJK_ROMAN, 2, 3),
        mapping(b"jp04", CHARACTER_SHAPE, 11, 16),
        mapping(b"jp78", CHARACTER_SHAPE, 2, 16),
        mapping(b"jp83", CHARACTER_SHAPE, 3, 16),
        mapping(b"jp90", CHARACTER_SHAPE, 4, 16),
        mapping(b"liga", LIGATURES, 2, 3),
        mapping(b"lnum", NUMBER_CASE, 1, 2),
        mapping(b"mgrk", MATHEMATICAL_EXTRAS, 10, 11),
        mapping(b"nlck", CHARACTER_SHAPE, 13, 16),
        mapping(b"onum", NUMBER_CASE, 0, 2),
        mapping(b"ordn", VERTICAL_POSITION, 3, 0),
        mapping(b"palt", TEXT_SPACING, 5, 7),
        mapping(b"pcap", LOWER_CASE, 2, 0),
        mapping(b"pkna", TEXT_SPACING, 0, 7),
        mapping(b"pnum", NUMBER_SPACING, 1, 4),
        mapping(b"pwid", TEXT_SPACING, 0, 7),
        mapping(b"qwid", TEXT_SPACING, 4, 7),
        mapping(b"ruby", RUBY_KANA, 2, 3),
        mapping(b"sinf", VERTICAL_POSITION, 4, 0),
        mapping(b"smcp", LOWER_CASE, 1, 0),
        mapping(b"smpl", CHARACTER_SHAPE, 1, 16),
        mapping(b"ss01", STYLISTIC_ALTERNATIVES, 2, 3),
        mapping(b"ss02", STYLISTIC_ALTERNATIVES, 4, 5),
        mapping(b"ss03", STYLISTIC_ALTERNATIVES, 6, 7),
        mapping(b"ss04", STYLISTIC_ALTERNATIVES, 8, 9),
        mapping(b"ss05", STYLISTIC_ALTERNATIVES, 10, 11),
        mapping(b"ss06", STYLISTIC_ALTERNATIVES, 12, 13),
        mapping(b"ss07", STYLISTIC_ALTERNATIVES, 14, 15),
        mapping(b"ss08", STYLISTIC_ALTERNATIVES, 16, 17),
        mapping(b"ss09", STYLISTIC_ALTERNATIVES, 18, 19),
        mapping(b"ss10", STYLISTIC_ALTERNATIVES, 20, 21),
        mapping(b"ss11", STYLISTIC_ALTERNATIVES, 22, 23),
        mapping(b"ss12", STYLISTIC_ALTERNATIVES, 24, 25),
        mapping(b"ss13", STYLISTIC_ALTERNATIVES, 26, 27),
        mapping(b"ss14", STYLISTIC_ALTERNATIVES, 28, 29),
        mapping(b"ss15", STYLISTIC_ALTERNATIVES, 30, 31),
        mapping(b"ss16", STYLISTIC_ALTERNATIVES, 32, 33),
        mapping(b"ss17", STYLISTIC_ALTERNATIVES, 34, 35),
        mapping(b"ss18", STYLISTIC_ALTERNATIVES, 36, 37),
        mapping(b"ss19", STYLISTIC_ALTERNATIVES, 38, 39),
        mapping(b"ss20", STYLISTIC_ALTERNATIVES, 40, 41),
        mapping(b"subs", VERTICAL_POSITION, 2, 0),
        mapping(b"sups", VERTICAL_POSITION, 1, 0),
        mapping(b"swsh", CONTEXTUAL_ALTERNATIVES, 2, 3),
        mapping(b"titl", STYLE_OPTIONS, 4, 0),
        mapping(b"tnam", CHARACTER_SHAPE, 14, 16),
        mapping(b"tnum", NUMBER_SPACING, 0, 4),
        mapping(b"trad", CHARACTER_SHAPE, 0, 16),
        mapping(b"twid", TEXT_SPACING, 3, 7),
        mapping(b"unic", LETTER_CASE, 14, 15),
        mapping(b"valt", TEXT_SPACING, 5, 7),
        mapping(b"vert", VERTICAL_SUBSTITUTION, 0, 1),
        mapping(b"vhal", TEXT_SPACING, 6, 7),
        mapping(b"vkna", ALTERNATE_KANA, 2, 3),
        mapping(b"vpal", TEXT_SPACING, 5, 7),
        mapping(b"vrt2", VERTICAL_SUBSTITUTION, 0, 1),
        mapping(b"vrtr", VERTICAL_SUBSTITUTION, 2, 3),
        mapping(b"zero", TYPOGRAPHIC_EXTRAS, 4, 5),
    ]
};

impl MapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the AAT setting for an OpenType feature, if the font's
    /// `feat` table exposes one.
    pub fn add_feature(&mut self, face: &Face, tag: Tag, value: u32) -> Option<()> {
        let feat = face.tables().feat?;

        if tag == Tag::from_bytes(b"aalt") {
            let exposed = feat
                .names
                .find(feature_type::CHARACTER_ALTERNATIVES)
                .map_or(false, |f| !f.setting_names.is_empty());

            if exposed {
                self.features.push(FeatureInfo {
                    kind: feature_type::CHARACTER_ALTERNATIVES,
                    setting: value as u16,
                    is_exclusive: true,
                });
            }

            return Some(());
        }

        let index = FEATURE_MAPPINGS
            .binary_search_by(|m| m.tag.cmp(&tag))
            .ok()?;
        let mapping = &FEATURE_MAPPINGS[index];

        let mut feature = feat.names.find(mapping.kind);
        if feature.map_or(true, |f| f.setting_names.is_empty())
            && mapping.kind == feature_type::LOWER_CASE
            && mapping.enable == LOWER_CASE_SMALL_CAPS
        {
            // Chains may only know the deprecated small caps selector.
            feature = feat.names.find(feature_type::LETTER_CASE);
        }

        let feature = feature.filter(|f| !f.setting_names.is_empty())?;
        self.features.push(FeatureInfo {
            kind: mapping.kind,
            setting: if value != 0 {
                mapping.enable
            } else {
                mapping.disable
            },
            is_exclusive: feature.exclusive,
        });

        Some(())
    }

    pub fn compile(&mut self, face: &Face) -> Map {
        sort_and_merge(&mut self.features);
        Map {
            chain_flags: super::metamorphosis::compile_flags(face, &self.features),
        }
    }
}

/// Sorts features by type and keeps the last setting of each exclusive
/// type, or of each on/off pair of a non-exclusive one.
fn sort_and_merge(features: &mut Vec<FeatureInfo>) {
    // Non-exclusive selectors come in even/odd on/off pairs, so the low bit
    // is masked out when looking for duplicates.
    let key = |f: &FeatureInfo| {
        if f.is_exclusive {
            (f.kind, 0)
        } else {
            (f.kind, f.setting & !1)
        }
    };

    features.sort_by_key(key);

    let mut merged: Vec<FeatureInfo> = Vec::with_capacity(features.len());
    for &feature in features.iter() {
        match merged.last_mut() {
            Some(last) if key(last) == key(&feature) => *last = feature,
            _ => merged.push(feature),
        }
    }

    *features = merged;
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn mappings_are_sorted() {
        assert!(FEATURE_MAPPINGS.windows(2).all(|w| w[0].tag < w[1].tag));
    }

    #[test]
    fn later_settings_win() {
        let liga_on = FeatureInfo {
            kind: feature_type::LIGATURES,
            setting: 2,
            is_exclusive: false,
        };
        let liga_off = FeatureInfo { setting: 3, ..liga_on };
        let dlig_on = FeatureInfo { setting: 4, ..liga_on };

        let mut features = vec![liga_on, dlig_on, liga_off];
        sort_and_merge(&mut features);
        assert_eq!(features, vec![liga_off, dlig_on]);
    }

    #[test]
    fn exclusive_types_keep_one_setting() {
        let upper = FeatureInfo {
            kind: feature_type::UPPER_CASE,
            setting: 1,
            is_exclusive: true,
        };
        let petite = FeatureInfo { setting: 2, ..upper };

        let mut features = vec![upper, petite];
        sort_and_merge(&mut features);
        assert_eq!(features, vec![petite]);
    }
}
