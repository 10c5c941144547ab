//! Universal Shaping Engine.
//! https://docs.microsoft.com/en-us/typography/script-development/use

use core::ops::Range;

use super::arabic::{self, ArabicShapePlan};
use super::universal_machine::{self, SyllableType};
use super::syllabic::{self, for_each_syllable};
use super::{universal_table, ShaperData};
use crate::buffer::{Buffer, GlyphInfo};
use crate::common::{script, Script};
use crate::face::Face;
use crate::ot::{layout, FeatureFlags};
use crate::plan::{ShapePlan, ShapePlanner};
use crate::{Mask, Tag};

pub type Category = u8;

#[allow(dead_code, non_upper_case_globals)]
pub mod category {
    pub const O: u8 = 0; // OTHER

    pub const B: u8 = 1; // BASE
    pub const N: u8 = 4; // BASE_NUM
    pub const GB: u8 = 5; // BASE_OTHER
    pub const CGJ: u8 = 6;
    pub const SUB: u8 = 11; // CONS_SUB
    pub const H: u8 = 12; // HALANT

    pub const HN: u8 = 13; // HALANT_NUM
    pub const ZWNJ: u8 = 14;
    pub const WJ: u8 = 16;
    pub const RSV: u8 = 17; // reserved characters
    pub const R: u8 = 18; // REPHA
    pub const S: u8 = 19; // SYM

    pub const VPre: u8 = 22;
    pub const VMPre: u8 = 23;
    pub const FAbv: u8 = 24;
    pub const FBlw: u8 = 25;
    pub const FPst: u8 = 26;
    pub const MAbv: u8 = 27;
    pub const MBlw: u8 = 28;
    pub const MPst: u8 = 29;
    pub const MPre: u8 = 30;
    pub const CMAbv: u8 = 31;
    pub const CMBlw: u8 = 32;
    pub const VAbv: u8 = 33;
    pub const VBlw: u8 = 34;
    pub const VPst: u8 = 35;
    pub const VMAbv: u8 = 37;
    pub const VMBlw: u8 = 38;
    pub const VMPst: u8 = 39;
    pub const SMAbv: u8 = 41;
    pub const SMBlw: u8 = 42;
    pub const CS: u8 = 43; // CONS_WITH_STACKER
    pub const IS: u8 = 44; // HALANT_OR_VOWEL_MODIFIER
    pub const HVM: u8 = IS;
    pub const FMAbv: u8 = 45;
    pub const FMBlw: u8 = 46;
    pub const FMPst: u8 = 47;
    pub const Sk: u8 = 48; // SAKOT
}

// Applied all at once before reordering, constrained to the syllable.
const BASIC_FEATURES: &[Tag] = &[
    Tag::from_bytes(b"rkrf"),
    Tag::from_bytes(b"abvf"),
    Tag::from_bytes(b"blwf"),
    Tag::from_bytes(b"half"),
    Tag::from_bytes(b"pstf"),
    Tag::from_bytes(b"vatu"),
    Tag::from_bytes(b"cjct"),
];

const TOPOGRAPHICAL_FEATURES: [Tag; 4] = [
    Tag::from_bytes(b"isol"),
    Tag::from_bytes(b"init"),
    Tag::from_bytes(b"medi"),
    Tag::from_bytes(b"fina"),
];

// Same order as TOPOGRAPHICAL_FEATURES.
#[derive(Clone, Copy, PartialEq)]
enum JoiningForm {
    Isolated = 0,
    Initial,
    Medial,
    Terminal,
}

// Applied all at once after reordering and clearing syllables.
const OTHER_FEATURES: &[Tag] = &[
    Tag::from_bytes(b"abvs"),
    Tag::from_bytes(b"blws"),
    Tag::from_bytes(b"haln"),
    Tag::from_bytes(b"pres"),
    Tag::from_bytes(b"psts"),
];

const POST_BASE_FLAGS: u64 = flag64(category::FAbv)
    | flag64(category::FBlw)
    | flag64(category::FPst)
    | flag64(category::FMAbv)
    | flag64(category::FMBlw)
    | flag64(category::FMPst)
    | flag64(category::MAbv)
    | flag64(category::MBlw)
    | flag64(category::MPst)
    | flag64(category::MPre)
    | flag64(category::VAbv)
    | flag64(category::VBlw)
    | flag64(category::VPst)
    | flag64(category::VPre)
    | flag64(category::VMAbv)
    | flag64(category::VMBlw)
    | flag64(category::VMPst)
    | flag64(category::VMPre);

const fn flag64(c: Category) -> u64 {
    1 << c
}

impl GlyphInfo {
    fn use_category(&self) -> Category {
        self.complex_category()
    }

    fn set_use_category(&mut self, c: Category) {
        self.set_complex_category(c)
    }

    fn is_halant_use(&self) -> bool {
        matches!(self.use_category(), category::H | category::IS) && !self.is_ligated()
    }
}

pub struct UniversalShapePlan {
    rphf_mask: Mask,
    arabic_plan: Option<ArabicShapePlan>,
}

impl UniversalShapePlan {
    pub fn new(plan: &ShapePlan, face: &Face) -> UniversalShapePlan {
        let arabic_plan = plan
            .script
            .filter(|s| has_arabic_joining(*s))
            .map(|_| ArabicShapePlan::new(plan, face));

        UniversalShapePlan {
            rphf_mask: plan.ot_map.one_mask(Tag::from_bytes(b"rphf")),
            arabic_plan,
        }
    }
}

pub fn is_universal_script(s: Script) -> bool {
    matches!(
        s,
        script::TIBETAN
            | script::MONGOLIAN
            | script::BUHID
            | script::HANUNOO
            | script::TAGALOG
            | script::TAGBANWA
            | script::LIMBU
            | script::TAI_LE
            | script::BUGINESE
            | script::KHAROSHTHI
            | script::SYLOTI_NAGRI
            | script::TIFINAGH
            | script::BALINESE
            | script::NKO
            | script::PHAGS_PA
            | script::CHAM
            | script::KAYAH_LI
            | script::LEPCHA
            | script::REJANG
            | script::SAURASHTRA
            | script::SUNDANESE
            | script::EGYPTIAN_HIEROGLYPHS
            | script::JAVANESE
            | script::KAITHI
            | script::MEETEI_MAYEK
            | script::TAI_THAM
            | script::TAI_VIET
            | script::BATAK
            | script::BRAHMI
            | script::MANDAIC
            | script::CHAKMA
            | script::MIAO
            | script::SHARADA
            | script::TAKRI
            | script::DUPLOYAN
            | script::GRANTHA
            | script::KHOJKI
            | script::KHUDAWADI
            | script::MAHAJANI
            | script::MANICHAEAN
            | script::MODI
            | script::PAHAWH_HMONG
            | script::PSALTER_PAHLAVI
            | script::SIDDHAM
            | script::TIRHUTA
            | script::AHOM
            | script::MULTANI
            | script::ADLAM
            | script::BHAIKSUKI
            | script::MARCHEN
            | script::NEWA
            | script::MASARAM_GONDI
            | script::SOYOMBO
            | script::ZANABAZAR_SQUARE
            | script::DOGRA
            | script::GUNJALA_GONDI
            | script::HANIFI_ROHINGYA
            | script::MAKASAR
            | script::MEDEFAIDRIN
            | script::OLD_SOGDIAN
            | script::SOGDIAN
            | script::ELYMAIC
            | script::NANDINAGARI
            | script::NYIAKENG_PUACHUE_HMONG
            | script::WANCHO
            | script::CHORASMIAN
            | script::DIVES_AKURU
            | script::KHITAN_SMALL_SCRIPT
            | script::YEZIDI
            | script::CYPRO_MINOAN
            | script::OLD_UYGHUR
            | script::TANGSA
            | script::TOTO
            | script::VITHKUQI
    )
}

/// Scripts with joining data, shaped with Arabic-style topographical forms.
fn has_arabic_joining(script: Script) -> bool {
    matches!(
        script,
        script::ADLAM
            | script::ARABIC
            | script::CHORASMIAN
            | script::HANIFI_ROHINGYA
            | script::MANDAIC
            | script::MANICHAEAN
            | script::MONGOLIAN
            | script::NKO
            | script::OLD_UYGHUR
            | script::PHAGS_PA
            | script::PSALTER_PAHLAVI
            | script::SOGDIAN
            | script::SYRIAC
    )
}

pub fn collect_features(planner: &mut ShapePlanner) {
    let map = &mut planner.ot_map;
    let per_syllable = FeatureFlags::PER_SYLLABLE;
    let manual = FeatureFlags::MANUAL_ZWJ | FeatureFlags::PER_SYLLABLE;

    map.add_gsub_pause(Some(setup_syllables));

    // Pre-processing, one syllable at a time.
    let preprocessing = [
        (b"locl", per_syllable),
        (b"ccmp", per_syllable),
        (b"nukt", per_syllable),
        (b"akhn", manual),
    ];
    for (tag, flags) in preprocessing {
        map.enable_feature(Tag::from_bytes(tag), flags, 1);
    }

    // Reordering. Both features are recorded right after they apply.
    map.add_gsub_pause(Some(layout::clear_substitution_flags));
    map.add_feature(Tag::from_bytes(b"rphf"), manual, 1);
    map.add_gsub_pause(Some(record_rphf));
    map.add_gsub_pause(Some(layout::clear_substitution_flags));
    map.enable_feature(Tag::from_bytes(b"pref"), manual, 1);
    map.add_gsub_pause(Some(record_pref));

    for &tag in BASIC_FEATURES {
        map.enable_feature(tag, manual, 1);
    }
    map.add_gsub_pause(Some(reorder));
    map.add_gsub_pause(Some(syllabic::clear_syllables));

    for tag in TOPOGRAPHICAL_FEATURES {
        map.add_feature(tag, FeatureFlags::empty(), 1);
    }
    map.add_gsub_pause(None);

    for &tag in OTHER_FEATURES {
        map.enable_feature(tag, FeatureFlags::MANUAL_ZWJ, 1);
    }
}

fn universal_plan(plan: &ShapePlan) -> Option<&UniversalShapePlan> {
    match &plan.data {
        Some(ShaperData::Universal(universal_plan)) => Some(universal_plan),
        _ => None,
    }
}

fn setup_syllables(plan: &ShapePlan, _: &Face, buffer: &mut Buffer) {
    universal_machine::find_syllables(buffer);
    for_each_syllable(buffer, |buffer, range| {
        buffer.unsafe_to_break(range.start, range.end)
    });

    let Some(universal_plan) = universal_plan(plan) else {
        return;
    };

    setup_rphf_mask(universal_plan.rphf_mask, buffer);
    if universal_plan.arabic_plan.is_none() {
        setup_topographical_masks(plan, buffer);
    }
}

/// A repha candidate is a lone R or the first three glyphs of a syllable.
fn setup_rphf_mask(mask: Mask, buffer: &mut Buffer) {
    if mask == 0 {
        return;
    }

    for_each_syllable(buffer, |buffer, range| {
        let len = if buffer.info[range.start].use_category() == category::R {
            1
        } else {
            range.len().min(3)
        };

        for info in &mut buffer.info[range.start..range.start + len] {
            info.mask |= mask;
        }
    });
}

/// Gives each syllable of a script without joining data a positional form,
/// treating every cluster as joining on both sides.
fn setup_topographical_masks(plan: &ShapePlan, buffer: &mut Buffer) {
    let global = plan.ot_map.global_mask();
    let masks = TOPOGRAPHICAL_FEATURES.map(|tag| {
        let mask = plan.ot_map.one_mask(tag);
        if mask == global {
            0
        } else {
            mask
        }
    });

    let all_masks = masks.iter().fold(0, |acc, mask| acc | mask);
    if all_masks == 0 {
        return;
    }

    let mut previous: Option<(Range<usize>, JoiningForm)> = None;
    for_each_syllable(buffer, |buffer, range| {
        let kind = buffer.info[range.start].syllable() & 0x0F;
        if kind == SyllableType::HieroglyphCluster as u8 || kind == SyllableType::NonCluster as u8 {
            previous = None;
            return;
        }

        let mut set_form = |range: Range<usize>, form: JoiningForm| {
            for info in &mut buffer.info[range] {
                info.mask = (info.mask & !all_masks) | masks[form as usize];
            }
        };

        // Joining onto the previous syllable upgrades its form.
        let form = match previous.take() {
            Some((last, JoiningForm::Terminal)) => {
                set_form(last, JoiningForm::Medial);
                JoiningForm::Terminal
            }
            Some((last, JoiningForm::Isolated)) => {
                set_form(last, JoiningForm::Initial);
                JoiningForm::Terminal
            }
            _ => JoiningForm::Isolated,
        };

        set_form(range.clone(), form);
        previous = Some((range, form));
    });
}

/// A substituted glyph under the rphf mask is the repha now.
fn record_rphf(plan: &ShapePlan, _: &Face, buffer: &mut Buffer) {
    let mask = universal_plan(plan).map_or(0, |universal_plan| universal_plan.rphf_mask);
    if mask == 0 {
        return;
    }

    for_each_syllable(buffer, |buffer, range| {
        let repha = buffer.info[range]
            .iter_mut()
            .take_while(|info| info.mask & mask != 0)
            .find(|info| info.is_substituted());

        if let Some(info) = repha {
            info.set_use_category(category::R);
        }
    });
}

/// A substituted pref behaves like a pre-base vowel from here on.
fn record_pref(_: &ShapePlan, _: &Face, buffer: &mut Buffer) {
    for_each_syllable(buffer, |buffer, range| {
        let pref = buffer.info[range]
            .iter_mut()
            .find(|info| info.is_substituted());

        if let Some(info) = pref {
            info.set_use_category(category::VPre);
        }
    });
}

fn reorder(_: &ShapePlan, face: &Face, buffer: &mut Buffer) {
    syllabic::insert_dotted_circles(
        face,
        buffer,
        SyllableType::BrokenCluster as u8,
        category::B,
        Some(category::R),
        None,
    );

    for_each_syllable(buffer, reorder_syllable);
}

fn reorder_syllable(buffer: &mut Buffer, range: Range<usize>) {
    const REORDERED: [SyllableType; 4] = [
        SyllableType::ViramaTerminatedCluster,
        SyllableType::SakotTerminatedCluster,
        SyllableType::StandardCluster,
        SyllableType::BrokenCluster,
    ];

    let kind = buffer.info[range.start].syllable() & 0x0F;
    if !REORDERED.iter().any(|&t| t as u8 == kind) {
        return;
    }

    move_repha(buffer, range.clone());
    move_pre_base_vowels(buffer, range);
}

fn is_post_base(info: &GlyphInfo) -> bool {
    flag64(info.use_category()) & POST_BASE_FLAGS != 0 || info.is_halant_use()
}

/// Moves a leading repha in front of the first post-base glyph, or to the
/// end of the syllable when there is none.
fn move_repha(buffer: &mut Buffer, range: Range<usize>) {
    let start = range.start;
    if range.len() < 2 || buffer.info[start].use_category() != category::R {
        return;
    }

    let target = buffer.info[start + 1..range.end]
        .iter()
        .position(is_post_base)
        .map_or(range.end - 1, |offset| start + offset);

    buffer.merge_clusters(start, target + 1);
    buffer.info[start..=target].rotate_left(1);
}

/// Moves pre-base vowels back to just after the last halant before them.
fn move_pre_base_vowels(buffer: &mut Buffer, range: Range<usize>) {
    let mut after_halant = range.start;
    for i in range {
        let info = &buffer.info[i];
        // Only the first part of a decomposed vowel moves.
        let is_pre_base_vowel = matches!(info.use_category(), category::VPre | category::VMPre)
            && info.lig_comp() == 0;

        if info.is_halant_use() {
            after_halant = i + 1;
        } else if is_pre_base_vowel && after_halant < i {
            buffer.merge_clusters(after_halant, i + 1);
            buffer.info[after_halant..=i].rotate_right(1);
        }
    }
}

pub fn setup_masks(plan: &ShapePlan, _: &Face, buffer: &mut Buffer) {
    // Joining runs first; the category overwrites the same slot.
    if let Some(arabic_plan) = universal_plan(plan).and_then(|p| p.arabic_plan.as_ref()) {
        arabic::setup_masks_inner(arabic_plan, plan.script, buffer);
    }

    for info in buffer.info_slice_mut() {
        info.set_use_category(universal_table::get_category(info.glyph_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn buffer_with(categories: &[Category]) -> Buffer {
        let mut buffer = Buffer::new();
        for (i, &c) in categories.iter().enumerate() {
            let mut info = GlyphInfo {
                cluster: i as u32,
                glyph_id: i as u32,
                ..GlyphInfo::default()
            };
            info.set_use_category(c);
            info.set_syllable(0x10 | SyllableType::StandardCluster as u8);
            buffer.info.push(info);
        }
        buffer
    }

    fn order(buffer: &Buffer) -> Vec<u32> {
        buffer.info.iter().map(|i| i.glyph_id).collect()
    }

    #[test]
    fn repha_moves_before_post_base() {
        let mut buffer = buffer_with(&[category::R, category::B, category::SUB, category::VAbv]);
        reorder_syllable(&mut buffer, 0..4);
        assert_eq!(order(&buffer), vec![1, 2, 0, 3]);
        assert!(buffer.info[..3].iter().all(|i| i.cluster == 0));
        assert_eq!(buffer.info[3].cluster, 3);
    }

    #[test]
    fn repha_moves_to_end() {
        let mut buffer = buffer_with(&[category::R, category::B, category::SUB]);
        reorder_syllable(&mut buffer, 0..3);
        assert_eq!(order(&buffer), vec![1, 2, 0]);
    }

    #[test]
    fn pre_base_vowel_moves_after_halant() {
        let mut buffer = buffer_with(&[
            category::B,
            category::H,
            category::B,
            category::VPre,
        ]);
        reorder_syllable(&mut buffer, 0..4);
        assert_eq!(order(&buffer), vec![0, 1, 3, 2]);
    }

    #[test]
    fn pre_base_vowel_moves_to_start() {
        let mut buffer = buffer_with(&[category::B, category::SUB, category::VPre]);
        reorder_syllable(&mut buffer, 0..3);
        assert_eq!(order(&buffer), vec![2, 0, 1]);
    }

    #[test]
    fn non_clusters_are_left_alone() {
        let mut buffer = buffer_with(&[category::O, category::VPre]);
        for info in &mut buffer.info {
            info.set_syllable(0x10 | SyllableType::NonCluster as u8);
        }
        reorder_syllable(&mut buffer, 0..2);
        assert_eq!(order(&buffer), vec![0, 1]);
    }

    #[test]
    fn repha_mask_covers_the_syllable_head() {
        let mut buffer = buffer_with(&[category::B, category::H, category::B, category::VAbv]);
        buffer.info[3].set_syllable(0x20 | SyllableType::StandardCluster as u8);
        setup_rphf_mask(0b1000, &mut buffer);

        let masked: Vec<bool> = buffer.info.iter().map(|i| i.mask & 0b1000 != 0).collect();
        assert_eq!(masked, vec![true, true, true, true]);

        let mut buffer = buffer_with(&[category::R, category::B, category::H]);
        setup_rphf_mask(0b1000, &mut buffer);
        let masked: Vec<bool> = buffer.info.iter().map(|i| i.mask & 0b1000 != 0).collect();
        assert_eq!(masked, vec![true, false, false]);
    }

    #[test]
    fn script_lists() {
        assert!(is_universal_script(script::BALINESE));
        assert!(!is_universal_script(script::DEVANAGARI));
        assert!(has_arabic_joining(script::MONGOLIAN));
        assert!(!has_arabic_joining(script::TIBETAN));
    }
}
