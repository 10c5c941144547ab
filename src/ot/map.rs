//! Feature collection, mask allocation and lookup staging.

use alloc::vec::Vec;

use ttf_parser::opentype_layout::{FeatureIndex, LanguageIndex, LookupIndex, ScriptIndex, VariationIndex};

use super::layout::{LayoutTableExt, TableIndex};
use crate::buffer::{glyph_flag, Buffer};
use crate::common::{Language, Script};
use crate::face::Face;
use crate::plan::ShapePlan;
use crate::{Mask, Tag};

/// A callback invoked between two feature stages.
pub type PauseFunc = fn(&ShapePlan, &Face, &mut Buffer);

#[derive(Clone)]
pub struct Map {
    found_script: [bool; 2],
    chosen_script: [Option<Tag>; 2],
    global_mask: Mask,
    features: Vec<FeatureMap>,
    lookups: [Vec<LookupMap>; 2],
    stages: [Vec<StageMap>; 2],
}

#[derive(Clone, Copy, Debug)]
pub struct FeatureMap {
    tag: Tag,
    // GSUB/GPOS
    index: [Option<FeatureIndex>; 2],
    stage: [usize; 2],
    shift: u32,
    mask: Mask,
    // mask for value=1, for quick access
    one_mask: Mask,
    auto_zwnj: bool,
    auto_zwj: bool,
    random: bool,
    per_syllable: bool,
    needs_fallback: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct LookupMap {
    pub index: LookupIndex,
    pub auto_zwnj: bool,
    pub auto_zwj: bool,
    pub random: bool,
    pub per_syllable: bool,
    pub mask: Mask,
}

#[derive(Clone, Copy)]
pub struct StageMap {
    // Cumulative
    pub last_lookup: usize,
    pub pause_func: Option<PauseFunc>,
}

impl Map {
    pub const MAX_BITS: u32 = 8;
    pub const MAX_VALUE: u32 = (1 << Self::MAX_BITS) - 1;

    #[inline]
    pub fn found_script(&self, table_index: TableIndex) -> bool {
        self.found_script[table_index as usize]
    }

    #[inline]
    pub fn chosen_script(&self, table_index: TableIndex) -> Option<Tag> {
        self.chosen_script[table_index as usize]
    }

    #[inline]
    pub fn global_mask(&self) -> Mask {
        self.global_mask
    }

    fn feature(&self, feature_tag: Tag) -> Option<&FeatureMap> {
        self.features
            .binary_search_by_key(&feature_tag, |f| f.tag)
            .ok()
            .map(|idx| &self.features[idx])
    }

    /// Returns the mask of the feature and the shift of its value.
    #[inline]
    pub fn mask(&self, feature_tag: Tag) -> (Mask, u32) {
        self.feature(feature_tag).map_or((0, 0), |f| (f.mask, f.shift))
    }

    #[inline]
    pub fn one_mask(&self, feature_tag: Tag) -> Mask {
        self.feature(feature_tag).map_or(0, |f| f.one_mask)
    }

    /// Whether the feature was requested with a fallback but the font
    /// does not implement it.
    #[inline]
    pub fn needs_fallback(&self, feature_tag: Tag) -> bool {
        self.feature(feature_tag).map_or(false, |f| f.needs_fallback)
    }

    #[inline]
    pub fn feature_index(&self, table_index: TableIndex, feature_tag: Tag) -> Option<FeatureIndex> {
        self.feature(feature_tag)
            .and_then(|f| f.index[table_index as usize])
    }

    #[inline]
    pub fn feature_stage(&self, table_index: TableIndex, feature_tag: Tag) -> Option<usize> {
        self.feature(feature_tag)
            .map(|f| f.stage[table_index as usize])
    }

    #[inline]
    pub fn stages(&self, table_index: TableIndex) -> &[StageMap] {
        &self.stages[table_index as usize]
    }

    pub fn stage_lookups(&self, table_index: TableIndex, stage: usize) -> &[LookupMap] {
        let stages = &self.stages[table_index as usize];
        let lookups = &self.lookups[table_index as usize];

        let start = stage
            .checked_sub(1)
            .and_then(|prev| stages.get(prev))
            .map_or(0, |prev| prev.last_lookup);

        let end = stages
            .get(stage)
            .map_or(lookups.len(), |stage| stage.last_lookup);

        lookups.get(start..end).unwrap_or(&[])
    }

    /// The total number of lookups scheduled for a table.
    pub fn lookup_count(&self, table_index: TableIndex) -> usize {
        self.lookups[table_index as usize].len()
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
    pub struct FeatureFlags: u32 {
        /// Feature applies to all characters; results in no mask allocated for it.
        const GLOBAL = 0x01;
        /// Has fallback implementation, so include mask bit even if feature not found.
        const HAS_FALLBACK = 0x02;
        /// Don't skip over ZWNJ when matching **context**.
        const MANUAL_ZWNJ = 0x04;
        /// Don't skip over ZWJ when matching **input**.
        const MANUAL_ZWJ = 0x08;
        const MANUAL_JOINERS = Self::MANUAL_ZWNJ.bits() | Self::MANUAL_ZWJ.bits();
        const GLOBAL_MANUAL_JOINERS = Self::GLOBAL.bits() | Self::MANUAL_JOINERS.bits();
        const GLOBAL_HAS_FALLBACK = Self::GLOBAL.bits() | Self::HAS_FALLBACK.bits();
        /// If feature not found in LangSys, look for it in global feature list and pick one.
        const GLOBAL_SEARCH = 0x10;
        /// Randomly select a glyph from an AlternateSubstFormat1 subtable.
        const RANDOM = 0x20;
        /// Do not match across syllable boundaries.
        const PER_SYLLABLE = 0x40;
    }
}

#[derive(Clone, Copy, Debug)]
struct FeatureInfo {
    tag: Tag,
    // sequence#, used for stable sorting only
    seq: usize,
    max_value: u32,
    flags: FeatureFlags,
    // for non-global features, what should the unset glyphs take
    default_value: u32,
    // GSUB/GPOS
    stage: [usize; 2],
}

struct StageInfo {
    index: usize,
    pause_func: Option<PauseFunc>,
}

pub struct MapBuilder<'a> {
    face: &'a Face<'a>,
    found_script: [bool; 2],
    chosen_script: [Option<Tag>; 2],
    script_index: [Option<ScriptIndex>; 2],
    lang_index: [Option<LanguageIndex>; 2],
    current_stage: [usize; 2],
    feature_infos: Vec<FeatureInfo>,
    stages: [Vec<StageInfo>; 2],
}

impl<'a> MapBuilder<'a> {
    pub fn new(face: &'a Face<'a>, script: Option<Script>, language: Option<&Language>) -> Self {
        // Fetch script/language indices for GSUB/GPOS. Features missing from
        // both tables will not get mask bits.
        let (script_tags, lang_tags) = crate::tag::tags_from_script_and_language(script, language);

        let mut found_script = [false; 2];
        let mut chosen_script = [None; 2];
        let mut script_index = [None; 2];
        let mut lang_index = [None; 2];

        for (table_index, table) in face.layout_tables() {
            let ti = table_index as usize;
            if let Some(choice) = table.choose_script(&script_tags) {
                chosen_script[ti] = Some(choice.tag);
                found_script[ti] = choice.exact;
                script_index[ti] = Some(choice.index);
                lang_index[ti] = table.choose_language(choice.index, &lang_tags);
            }
        }

        Self {
            face,
            found_script,
            chosen_script,
            script_index,
            lang_index,
            current_stage: [0, 0],
            feature_infos: Vec::new(),
            stages: [Vec::new(), Vec::new()],
        }
    }

    #[inline]
    pub fn chosen_script(&self, table_index: TableIndex) -> Option<Tag> {
        self.chosen_script[table_index as usize]
    }

    #[inline]
    pub fn found_script(&self, table_index: TableIndex) -> bool {
        self.found_script[table_index as usize]
    }

    pub fn has_feature(&self, tag: Tag) -> bool {
        self.find_feature(tag, false).iter().any(Option::is_some)
    }

    /// The feature's index under the chosen script and language of each
    /// table. `global_search` falls back to any feature with the tag.
    fn find_feature(&self, tag: Tag, global_search: bool) -> [Option<FeatureIndex>; 2] {
        let mut index = [None; 2];
        for (table_index, table) in self.face.layout_tables() {
            let ti = table_index as usize;
            index[ti] = self.script_index[ti]
                .and_then(|script| table.language_feature(script, self.lang_index[ti], tag));
        }

        if global_search && index == [None, None] {
            for (table_index, table) in self.face.layout_tables() {
                index[table_index as usize] = table.features.index(tag);
            }
        }

        index
    }

    pub fn add_feature(&mut self, tag: Tag, flags: FeatureFlags, value: u32) {
        if tag.is_null() {
            return;
        }

        let seq = self.feature_infos.len();
        self.feature_infos.push(FeatureInfo {
            tag,
            seq,
            max_value: value,
            flags,
            default_value: if flags.contains(FeatureFlags::GLOBAL) {
                value
            } else {
                0
            },
            stage: self.current_stage,
        });
    }

    #[inline]
    pub fn enable_feature(&mut self, tag: Tag, flags: FeatureFlags, value: u32) {
        self.add_feature(tag, flags | FeatureFlags::GLOBAL, value);
    }

    #[inline]
    pub fn disable_feature(&mut self, tag: Tag) {
        self.add_feature(tag, FeatureFlags::GLOBAL, 0);
    }

    #[inline]
    pub fn add_gsub_pause(&mut self, pause: Option<PauseFunc>) {
        self.add_pause(TableIndex::GSUB, pause);
    }

    #[inline]
    pub fn add_gpos_pause(&mut self, pause: Option<PauseFunc>) {
        self.add_pause(TableIndex::GPOS, pause);
    }

    fn add_pause(&mut self, table_index: TableIndex, pause: Option<PauseFunc>) {
        self.stages[table_index as usize].push(StageInfo {
            index: self.current_stage[table_index as usize],
            pause_func: pause,
        });

        self.current_stage[table_index as usize] += 1;
    }

    pub fn compile(&mut self) -> Map {
        let global_bit_shift = glyph_flag::DEFINED.count_ones();
        let global_bit = 1 << global_bit_shift;

        let mut map = Map {
            found_script: self.found_script,
            chosen_script: self.chosen_script,
            global_mask: global_bit,
            features: Vec::new(),
            lookups: [Vec::new(), Vec::new()],
            stages: [Vec::new(), Vec::new()],
        };

        let mut required = [None; 2];
        for (table_index, table) in self.face.layout_tables() {
            let ti = table_index as usize;
            required[ti] = self.script_index[ti]
                .and_then(|script| table.required_feature(script, self.lang_index[ti]));
        }

        merge_duplicates(&mut self.feature_infos);
        let required_tags = required.map(|feature| feature.map(|(_, tag)| tag));
        let required_stage = self.allocate_features(&mut map, global_bit_shift, required_tags);

        self.add_gsub_pause(None);
        self.add_gpos_pause(None);

        for table_index in TableIndex::iter() {
            let ti = table_index as usize;
            let variation_index = self
                .face
                .layout_table(table_index)
                .and_then(|t| t.variations?.find_index(self.face.variation_coordinates()));

            let required = required[ti].map(|(index, _)| (index, required_stage[ti]));
            self.compile_stages(&mut map, table_index, variation_index, required, global_bit);
        }

        map
    }

    /// Gives mask bits to the features the font or a fallback implements.
    /// Returns the stage of each table's required feature, which is stage 0
    /// unless a shaper staged its tag.
    fn allocate_features(
        &mut self,
        map: &mut Map,
        global_bit_shift: u32,
        required_tags: [Option<Tag>; 2],
    ) -> [usize; 2] {
        let global_bit = map.global_mask;
        let mut required_stage = [0; 2];
        let mut next_bit = global_bit_shift + 1;

        for info in core::mem::take(&mut self.feature_infos) {
            let uses_global_bit = info.flags.contains(FeatureFlags::GLOBAL) && info.max_value == 1;
            let bits_needed = if uses_global_bit {
                0
            } else {
                Map::MAX_BITS.min(u32::BITS - info.max_value.leading_zeros())
            };

            // Disabled, or out of bits.
            if info.max_value == 0 || next_bit + bits_needed >= u32::BITS {
                continue;
            }

            let stages = required_stage.iter_mut().zip(required_tags).zip(info.stage);
            for ((stage, tag), feature_stage) in stages {
                if tag == Some(info.tag) {
                    *stage = feature_stage;
                }
            }

            let index = self.find_feature(info.tag, info.flags.contains(FeatureFlags::GLOBAL_SEARCH));
            let found = index.iter().any(Option::is_some);
            if !found && !info.flags.contains(FeatureFlags::HAS_FALLBACK) {
                continue;
            }

            let (shift, mask) = if uses_global_bit {
                (global_bit_shift, global_bit)
            } else {
                let shift = next_bit;
                next_bit += bits_needed;
                let mask = (1 << next_bit) - (1 << shift);
                map.global_mask |= (info.default_value << shift) & mask;
                (shift, mask)
            };

            map.features.push(FeatureMap {
                tag: info.tag,
                index,
                stage: info.stage,
                shift,
                mask,
                one_mask: (1 << shift) & mask,
                auto_zwnj: !info.flags.contains(FeatureFlags::MANUAL_ZWNJ),
                auto_zwj: !info.flags.contains(FeatureFlags::MANUAL_ZWJ),
                random: info.flags.contains(FeatureFlags::RANDOM),
                per_syllable: info.flags.contains(FeatureFlags::PER_SYLLABLE),
                needs_fallback: !found,
            });
        }

        required_stage
    }

    fn compile_stages(
        &self,
        map: &mut Map,
        table_index: TableIndex,
        variation_index: Option<VariationIndex>,
        required: Option<(FeatureIndex, usize)>,
        global_bit: Mask,
    ) {
        let ti = table_index as usize;
        let mut pauses = self.stages[ti].iter().peekable();

        for stage in 0..self.current_stage[ti] {
            let mut lookups = Vec::new();

            if let Some((feature_index, _)) = required.filter(|&(_, s)| s == stage) {
                let template = LookupMap {
                    index: 0,
                    auto_zwnj: true,
                    auto_zwj: true,
                    random: false,
                    per_syllable: false,
                    mask: global_bit,
                };
                self.collect_lookups(&mut lookups, table_index, feature_index, variation_index, template);
            }

            for feature in map.features.iter().filter(|f| f.stage[ti] == stage) {
                let Some(feature_index) = feature.index[ti] else {
                    continue;
                };

                let template = LookupMap {
                    index: 0,
                    auto_zwnj: feature.auto_zwnj,
                    auto_zwj: feature.auto_zwj,
                    random: feature.random,
                    per_syllable: feature.per_syllable,
                    mask: feature.mask,
                };
                self.collect_lookups(&mut lookups, table_index, feature_index, variation_index, template);
            }

            // A lookup runs once per stage, under every mask that asked for it.
            lookups.sort_by_key(|lookup| lookup.index);
            lookups.dedup_by(|later, kept| {
                let same = later.index == kept.index;
                if same {
                    kept.mask |= later.mask;
                    kept.auto_zwnj &= later.auto_zwnj;
                    kept.auto_zwj &= later.auto_zwj;
                }
                same
            });
            map.lookups[ti].extend(lookups);

            if let Some(pause) = pauses.next_if(|pause| pause.index == stage) {
                map.stages[ti].push(StageMap {
                    last_lookup: map.lookups[ti].len(),
                    pause_func: pause.pause_func,
                });
            }
        }
    }

    /// Adds the lookups of a feature, or of its substitute under the
    /// active feature variation.
    fn collect_lookups(
        &self,
        lookups: &mut Vec<LookupMap>,
        table_index: TableIndex,
        feature_index: FeatureIndex,
        variation_index: Option<VariationIndex>,
        template: LookupMap,
    ) {
        let Some(table) = self.face.layout_table(table_index) else {
            return;
        };

        let feature = variation_index
            .and_then(|v| table.variations?.find_substitute(feature_index, v))
            .or_else(|| table.features.get(feature_index));

        let Some(feature) = feature else {
            return;
        };

        let count = table.lookups.len();
        let indices = feature.lookup_indices.into_iter().filter(|&index| index < count);
        lookups.extend(indices.map(|index| LookupMap { index, ..template }));
    }
}

/// Sorts the requests by tag and folds the ones for the same tag together.
fn merge_duplicates(infos: &mut Vec<FeatureInfo>) {
    infos.sort_by(|a, b| a.tag.cmp(&b.tag).then(a.seq.cmp(&b.seq)));
    infos.dedup_by(|later, kept| {
        if later.tag != kept.tag {
            return false;
        }

        if later.flags.contains(FeatureFlags::GLOBAL) {
            kept.flags |= FeatureFlags::GLOBAL;
            kept.max_value = later.max_value;
            kept.default_value = later.default_value;
        } else {
            // A ranged request keeps the earlier default for the rest.
            kept.flags.remove(FeatureFlags::GLOBAL);
            kept.max_value = kept.max_value.max(later.max_value);
        }

        kept.flags |= later.flags & FeatureFlags::HAS_FALLBACK;
        kept.stage[0] = kept.stage[0].min(later.stage[0]);
        kept.stage[1] = kept.stage[1].min(later.stage[1]);
        true
    });
}

impl core::fmt::Debug for Map {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Map")
            .field("chosen_script", &self.chosen_script)
            .field("global_mask", &self.global_mask)
            .field("features", &self.features.len())
            .field("gsub_lookups", &self.lookups[0].len())
            .field("gpos_lookups", &self.lookups[1].len())
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn info(tag: &[u8; 4], seq: usize, flags: FeatureFlags, value: u32, stage: usize) -> FeatureInfo {
        FeatureInfo {
            tag: Tag::from_bytes(tag),
            seq,
            max_value: value,
            flags,
            default_value: if flags.contains(FeatureFlags::GLOBAL) { value } else { 0 },
            stage: [stage, stage],
        }
    }

    #[test]
    fn ranged_request_makes_a_feature_ranged() {
        let mut infos = vec![
            info(b"liga", 0, FeatureFlags::GLOBAL, 1, 2),
            info(b"kern", 1, FeatureFlags::GLOBAL_HAS_FALLBACK, 1, 3),
            info(b"liga", 2, FeatureFlags::empty(), 3, 1),
        ];
        merge_duplicates(&mut infos);

        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].tag, Tag::from_bytes(b"kern"));

        let liga = infos[1];
        assert!(!liga.flags.contains(FeatureFlags::GLOBAL));
        assert_eq!(liga.max_value, 3);
        assert_eq!(liga.default_value, 1);
        assert_eq!(liga.stage, [1, 1]);
    }

    #[test]
    fn later_global_request_wins() {
        let mut infos = vec![
            info(b"smcp", 0, FeatureFlags::empty(), 1, 0),
            info(b"smcp", 1, FeatureFlags::GLOBAL, 0, 0),
        ];
        merge_duplicates(&mut infos);

        assert_eq!(infos.len(), 1);
        assert!(infos[0].flags.contains(FeatureFlags::GLOBAL));
        assert_eq!(infos[0].max_value, 0);
        assert_eq!(infos[0].default_value, 0);
    }

    #[test]
    fn fallback_flag_survives_merging() {
        let mut infos = vec![
            info(b"kern", 0, FeatureFlags::GLOBAL, 1, 0),
            info(b"kern", 1, FeatureFlags::GLOBAL_HAS_FALLBACK, 1, 0),
        ];
        merge_duplicates(&mut infos);
        assert!(infos[0].flags.contains(FeatureFlags::HAS_FALLBACK));
    }
}
