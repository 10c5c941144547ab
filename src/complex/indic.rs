use core::cmp;

use ttf_parser::GlyphId;

use super::indic_machine::{self, SyllableType};
use super::syllabic::{self, for_each_syllable};
use super::{indic_table, ShaperData};
use crate::buffer::{Buffer, GlyphInfo};
use crate::common::{script, Script};
use crate::face::Face;
use crate::ot::normalize::ShapeNormalizeContext;
use crate::ot::{substitute, FeatureFlags, Map, TableIndex};
use crate::plan::{ShapePlan, ShapePlanner};
use crate::unicode::{CharExt, GeneralCategoryExt};
use crate::{unicode_norm, Mask, Tag};

pub type Category = u8;
pub type Position = u8;

/// Syllabic categories shared by the Indic, Khmer and Myanmar shapers.
#[allow(dead_code)]
pub mod category {
    pub const X: u8 = 0;
    pub const C: u8 = 1;
    pub const V: u8 = 2;
    pub const N: u8 = 3;
    pub const H: u8 = 4;
    pub const ZWNJ: u8 = 5;
    pub const ZWJ: u8 = 6;
    pub const M: u8 = 7;
    pub const SM: u8 = 8;
    pub const A: u8 = 9;
    pub const VD: u8 = A;
    pub const PLACEHOLDER: u8 = 10;
    pub const GB: u8 = PLACEHOLDER;
    pub const DOTTED_CIRCLE: u8 = 11;
    /// Register shifter.
    pub const RS: u8 = 12;
    /// Atomically-encoded repha.
    pub const REPHA: u8 = 14;
    pub const RA: u8 = 15;
    /// Consonant medial.
    pub const CM: u8 = 16;
    /// Avagraha and the like, which take marks.
    pub const SYMBOL: u8 = 17;
    /// Consonant with stacker.
    pub const CS: u8 = 18;

    // Khmer and Myanmar.
    pub const VABV: u8 = 20;
    pub const VBLW: u8 = 21;
    pub const VPRE: u8 = 22;
    pub const VPST: u8 = 23;

    // Khmer.
    pub const ROBATIC: u8 = 25;
    pub const XGROUP: u8 = 26;
    pub const YGROUP: u8 = 27;

    // Myanmar.
    /// Asat.
    pub const AS: u8 = 32;
    pub const MH: u8 = 35;
    pub const MR: u8 = 36;
    pub const MW: u8 = 37;
    pub const MY: u8 = 38;
    /// Pwo and other tones.
    pub const PT: u8 = 39;
    /// Variation selectors.
    pub const VS: u8 = 40;
    pub const ML: u8 = 41;
    /// Independent vowel; the Myanmar tables reuse `V`.
    pub const IV: u8 = V;
}

/// Where a character ends up relative to the base consonant.
#[allow(dead_code)]
pub mod position {
    pub const START: u8 = 0;
    pub const RA_TO_BECOME_REPH: u8 = 1;
    pub const PRE_M: u8 = 2;
    pub const PRE_C: u8 = 3;
    pub const BASE_C: u8 = 4;
    pub const AFTER_MAIN: u8 = 5;
    pub const ABOVE_C: u8 = 6;
    pub const BEFORE_SUB: u8 = 7;
    pub const BELOW_C: u8 = 8;
    pub const AFTER_SUB: u8 = 9;
    pub const BEFORE_POST: u8 = 10;
    pub const POST_C: u8 = 11;
    pub const AFTER_POST: u8 = 12;
    pub const SMVD: u8 = 13;
    pub const END: u8 = 14;
}

const INDIC_FEATURES: &[(Tag, FeatureFlags)] = &[
    // Basic features.
    // Applied in order, one at a time, after initial reordering, constrained
    // to the syllable.
    (
        Tag::from_bytes(b"nukt"),
        FeatureFlags::GLOBAL_MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    (
        Tag::from_bytes(b"akhn"),
        FeatureFlags::GLOBAL_MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    (
        Tag::from_bytes(b"rphf"),
        FeatureFlags::MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    (
        Tag::from_bytes(b"rkrf"),
        FeatureFlags::GLOBAL_MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    (
        Tag::from_bytes(b"pref"),
        FeatureFlags::MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    (
        Tag::from_bytes(b"blwf"),
        FeatureFlags::MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    (
        Tag::from_bytes(b"abvf"),
        FeatureFlags::MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    (
        Tag::from_bytes(b"half"),
        FeatureFlags::MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    (
        Tag::from_bytes(b"pstf"),
        FeatureFlags::MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    (
        Tag::from_bytes(b"vatu"),
        FeatureFlags::GLOBAL_MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    (
        Tag::from_bytes(b"cjct"),
        FeatureFlags::GLOBAL_MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    // Other features.
    // Applied all at once after final reordering, constrained to the
    // syllable. Some fonts intermix the lookups of init, pres, abvs and blws.
    (
        Tag::from_bytes(b"init"),
        FeatureFlags::MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    (
        Tag::from_bytes(b"pres"),
        FeatureFlags::GLOBAL_MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    (
        Tag::from_bytes(b"abvs"),
        FeatureFlags::GLOBAL_MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    (
        Tag::from_bytes(b"blws"),
        FeatureFlags::GLOBAL_MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    (
        Tag::from_bytes(b"psts"),
        FeatureFlags::GLOBAL_MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    (
        Tag::from_bytes(b"haln"),
        FeatureFlags::GLOBAL_MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
];

// Same order as INDIC_FEATURES.
#[allow(dead_code)]
mod indic_feature {
    pub const NUKT: usize = 0;
    pub const AKHN: usize = 1;
    pub const RPHF: usize = 2;
    pub const RKRF: usize = 3;
    pub const PREF: usize = 4;
    pub const BLWF: usize = 5;
    pub const ABVF: usize = 6;
    pub const HALF: usize = 7;
    pub const PSTF: usize = 8;
    pub const VATU: usize = 9;
    pub const CJCT: usize = 10;
    pub const INIT: usize = 11;
    pub const PRES: usize = 12;
    pub const ABVS: usize = 13;
    pub const BLWS: usize = 14;
    pub const PSTS: usize = 15;
    pub const HALN: usize = 16;
}

const BASIC_FEATURES_COUNT: usize = 11;

const fn flag(c: Category) -> u64 {
    1 << c
}

// Vowels and placeholders are treated as consonants. Vowels cannot occur in
// consonant syllables, so vowel syllables can share the consonant logic.
const CONSONANT_FLAGS: u64 = flag(category::C)
    | flag(category::CS)
    | flag(category::RA)
    | flag(category::CM)
    | flag(category::V)
    | flag(category::PLACEHOLDER)
    | flag(category::DOTTED_CIRCLE);

const JOINER_FLAGS: u64 = flag(category::ZWJ) | flag(category::ZWNJ);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum RephPosition {
    AfterMain,
    BeforeSub,
    AfterSub,
    BeforePost,
    AfterPost,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum RephMode {
    /// Reph formed out of an initial Ra,H sequence.
    Implicit,
    /// Reph formed out of an initial Ra,H,ZWJ sequence.
    Explicit,
    /// Encoded repha character, needs reordering.
    LogRepha,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum BlwfMode {
    /// Below-forms feature applied to pre-base and post-base.
    PreAndPost,
    /// Below-forms feature applied to post-base only.
    PostOnly,
}

#[derive(Clone, Copy, Debug)]
struct IndicConfig {
    script: Option<Script>,
    has_old_spec: bool,
    virama: u32,
    reph_pos: RephPosition,
    reph_mode: RephMode,
    blwf_mode: BlwfMode,
}

impl IndicConfig {
    const fn new(
        script: Option<Script>,
        has_old_spec: bool,
        virama: u32,
        reph_pos: RephPosition,
        reph_mode: RephMode,
        blwf_mode: BlwfMode,
    ) -> Self {
        IndicConfig {
            script,
            has_old_spec,
            virama,
            reph_pos,
            reph_mode,
            blwf_mode,
        }
    }
}

#[rustfmt::skip]
const INDIC_CONFIGS: &[IndicConfig] = &[
    IndicConfig::new(None, false, 0, RephPosition::BeforePost, RephMode::Implicit, BlwfMode::PreAndPost),
    IndicConfig::new(Some(script::DEVANAGARI), true, 0x094D, RephPosition::BeforePost, RephMode::Implicit, BlwfMode::PreAndPost),
    IndicConfig::new(Some(script::BENGALI), true, 0x09CD, RephPosition::AfterSub, RephMode::Implicit, BlwfMode::PreAndPost),
    IndicConfig::new(Some(script::GURMUKHI), true, 0x0A4D, RephPosition::BeforeSub, RephMode::Implicit, BlwfMode::PreAndPost),
    IndicConfig::new(Some(script::GUJARATI), true, 0x0ACD, RephPosition::BeforePost, RephMode::Implicit, BlwfMode::PreAndPost),
    IndicConfig::new(Some(script::ORIYA), true, 0x0B4D, RephPosition::AfterMain, RephMode::Implicit, BlwfMode::PreAndPost),
    IndicConfig::new(Some(script::TAMIL), true, 0x0BCD, RephPosition::AfterPost, RephMode::Implicit, BlwfMode::PreAndPost),
    IndicConfig::new(Some(script::TELUGU), true, 0x0C4D, RephPosition::AfterPost, RephMode::Explicit, BlwfMode::PostOnly),
    IndicConfig::new(Some(script::KANNADA), true, 0x0CCD, RephPosition::AfterPost, RephMode::Implicit, BlwfMode::PostOnly),
    IndicConfig::new(Some(script::MALAYALAM), true, 0x0D4D, RephPosition::AfterMain, RephMode::LogRepha, BlwfMode::PreAndPost),
    IndicConfig::new(Some(script::SINHALA), false, 0x0DCA, RephPosition::AfterPost, RephMode::Explicit, BlwfMode::PreAndPost),
];

pub struct IndicShapePlan {
    config: IndicConfig,
    is_old_spec: bool,
    /// Whether `would_substitute` checks ignore the surrounding context.
    zero_context: bool,
    mask_array: [Mask; INDIC_FEATURES.len()],
}

impl IndicShapePlan {
    pub fn new(plan: &ShapePlan) -> Self {
        let config = INDIC_CONFIGS[1..]
            .iter()
            .find(|c| c.script == plan.script)
            .copied()
            .unwrap_or(INDIC_CONFIGS[0]);

        // Old-spec tags are the ones not ending in '2'.
        let is_old_spec = config.has_old_spec
            && plan
                .ot_map
                .chosen_script(TableIndex::GSUB)
                .map_or(true, |tag| tag.to_bytes()[3] != b'2');

        // New-spec fonts match without context. Old-spec Malayalam still
        // uses it.
        let zero_context = is_old_spec && plan.script != Some(script::MALAYALAM);

        IndicShapePlan {
            config,
            is_old_spec,
            zero_context,
            mask_array: feature_masks(&plan.ot_map),
        }
    }

    fn would_substitute(&self, map: &Map, face: &Face, feature: &[u8; 4], glyphs: &[GlyphId]) -> bool {
        substitute::would_substitute(map, face, Tag::from_bytes(feature), glyphs, self.zero_context)
    }
}

fn feature_masks(map: &Map) -> [Mask; INDIC_FEATURES.len()] {
    let mut mask_array = [0; INDIC_FEATURES.len()];
    for (mask, &(tag, flags)) in mask_array.iter_mut().zip(INDIC_FEATURES) {
        *mask = if flags.contains(FeatureFlags::GLOBAL) {
            0
        } else {
            map.one_mask(tag)
        };
    }
    mask_array
}

impl GlyphInfo {
    pub(crate) fn indic_category(&self) -> Category {
        self.complex_category()
    }

    fn set_indic_category(&mut self, c: Category) {
        self.set_complex_category(c)
    }

    pub(crate) fn indic_position(&self) -> Position {
        self.complex_aux()
    }

    fn set_indic_position(&mut self, p: Position) {
        self.set_complex_aux(p)
    }

    fn is_indic_one_of(&self, flags: u64) -> bool {
        // Once ligated, the category says nothing about the glyph.
        if self.is_ligated() {
            return false;
        }

        flag(self.indic_category()) & flags != 0
    }

    fn is_indic_joiner(&self) -> bool {
        self.is_indic_one_of(JOINER_FLAGS)
    }

    fn is_indic_consonant(&self) -> bool {
        self.is_indic_one_of(CONSONANT_FLAGS)
    }

    fn is_indic_halant(&self) -> bool {
        self.is_indic_one_of(flag(category::H))
    }
}

pub fn collect_features(planner: &mut ShapePlanner) {
    // Before any lookups have been applied.
    planner.ot_map.add_gsub_pause(Some(setup_syllables));

    planner
        .ot_map
        .enable_feature(Tag::from_bytes(b"locl"), FeatureFlags::PER_SYLLABLE, 1);
    // ccmp is not required, but usually applied first when used at all.
    planner
        .ot_map
        .enable_feature(Tag::from_bytes(b"ccmp"), FeatureFlags::PER_SYLLABLE, 1);

    planner.ot_map.add_gsub_pause(Some(initial_reordering));

    for &(tag, flags) in &INDIC_FEATURES[..BASIC_FEATURES_COUNT] {
        planner.ot_map.add_feature(tag, flags, 1);
        planner.ot_map.add_gsub_pause(None);
    }

    planner.ot_map.add_gsub_pause(Some(final_reordering));

    for &(tag, flags) in &INDIC_FEATURES[BASIC_FEATURES_COUNT..] {
        planner.ot_map.add_feature(tag, flags, 1);
    }
}

pub fn override_features(planner: &mut ShapePlanner) {
    planner.ot_map.disable_feature(Tag::from_bytes(b"liga"));
    planner.ot_map.add_gsub_pause(None);
}

pub fn decompose(_: &ShapeNormalizeContext, ab: char) -> Option<(char, Option<char>)> {
    match ab {
        // DEVANAGARI LETTER RRA
        '\u{0931}'
        // BENGALI LETTER RRA and RHA
        | '\u{09DC}' | '\u{09DD}'
        // TAMIL LETTER AU
        | '\u{0B94}' => None,
        _ => unicode_norm::decompose(ab),
    }
}

pub fn compose(_: &ShapeNormalizeContext, a: char, b: char) -> Option<char> {
    compose_chars(a, b)
}

fn compose_chars(a: char, b: char) -> Option<char> {
    // Split matras stay split.
    if a.general_category().is_mark() {
        return None;
    }

    // Composition exclusion we still want: BENGALI LETTER YYA.
    if a == '\u{09AF}' && b == '\u{09BC}' {
        return Some('\u{09DF}');
    }

    unicode_norm::compose(a, b)
}

pub fn setup_masks(_: &ShapePlan, _: &Face, buffer: &mut Buffer) {
    // Masks are set up later, during initial reordering.
    for info in buffer.info_slice_mut() {
        let (category, position) = indic_table::get_categories(info.glyph_id);
        info.set_indic_category(category);
        info.set_indic_position(position);
    }
}

fn setup_syllables(_: &ShapePlan, _: &Face, buffer: &mut Buffer) {
    indic_machine::find_syllables(buffer);
    for_each_syllable(buffer, |buffer, range| {
        buffer.unsafe_to_break(range.start, range.end)
    });
}

fn initial_reordering(plan: &ShapePlan, face: &Face, buffer: &mut Buffer) {
    let Some(ShaperData::Indic(indic_plan)) = &plan.data else {
        return;
    };

    let would_substitute = |feature: &[u8; 4], glyphs: &[GlyphId]| {
        indic_plan.would_substitute(&plan.ot_map, face, feature, glyphs)
    };

    update_consonant_positions(indic_plan, face, &would_substitute, buffer);
    syllabic::insert_dotted_circles(
        face,
        buffer,
        SyllableType::BrokenCluster as u8,
        category::DOTTED_CIRCLE,
        Some(category::REPHA),
        Some(position::END),
    );

    for_each_syllable(buffer, |buffer, range| {
        let kind = buffer.info[range.start].syllable() & 0x0F;
        // Vowel syllables look like consonant ones, and broken clusters got
        // their dotted circle already.
        if kind == SyllableType::ConsonantSyllable as u8
            || kind == SyllableType::VowelSyllable as u8
            || kind == SyllableType::StandaloneCluster as u8
            || kind == SyllableType::BrokenCluster as u8
        {
            initial_reordering_consonant_syllable(
                indic_plan,
                &would_substitute,
                range.start,
                range.end,
                buffer,
            );
        }
    });
}

/// Moves consonants the font gives below-base or post-base forms out of the
/// way of base detection.
fn update_consonant_positions(
    indic_plan: &IndicShapePlan,
    face: &Face,
    would_substitute: &dyn Fn(&[u8; 4], &[GlyphId]) -> bool,
    buffer: &mut Buffer,
) {
    if indic_plan.config.virama == 0 {
        return;
    }

    let Some(virama) = face.get_nominal_glyph(indic_plan.config.virama) else {
        return;
    };

    for info in buffer.info_slice_mut() {
        if info.indic_position() == position::BASE_C {
            let consonant = info.as_glyph();
            info.set_indic_position(consonant_position(would_substitute, consonant, virama));
        }
    }
}

fn consonant_position(
    would_substitute: &dyn Fn(&[u8; 4], &[GlyphId]) -> bool,
    consonant: GlyphId,
    virama: GlyphId,
) -> Position {
    // Old-spec fonts order Consonant,Virama and new-spec ones Virama,Consonant,
    // but some fonts copied lookups across, so both orders are tried.
    let forms = |feature: &[u8; 4]| {
        would_substitute(feature, &[virama, consonant])
            || would_substitute(feature, &[consonant, virama])
    };

    if forms(b"blwf") || forms(b"vatu") {
        position::BELOW_C
    } else if forms(b"pstf") || forms(b"pref") {
        position::POST_C
    } else {
        position::BASE_C
    }
}

// https://docs.microsoft.com/en-us/typography/script-development/devanagari
fn initial_reordering_consonant_syllable(
    indic_plan: &IndicShapePlan,
    would_substitute: &dyn Fn(&[u8; 4], &[GlyphId]) -> bool,
    start: usize,
    end: usize,
    buffer: &mut Buffer,
) {
    // Legacy Kannada text uses Ra,H,ZWJ for what is Ra,ZWJ,H.
    if buffer.script == Some(script::KANNADA)
        && start + 3 <= end
        && buffer.info[start].is_indic_one_of(flag(category::RA))
        && buffer.info[start + 1].is_indic_one_of(flag(category::H))
        && buffer.info[start + 2].is_indic_one_of(flag(category::ZWJ))
    {
        buffer.merge_clusters(start + 1, start + 3);
        buffer.info.swap(start + 1, start + 2);
    }

    // 1. Find the base consonant.
    //
    // Walk back from the end of the syllable until a consonant without a
    // below-base or post-base form is found, or the first consonant is
    // reached. An initial Ra,H that forms a reph is not a candidate.
    let mut base = end;
    let mut has_reph = false;

    {
        let mut limit = start;
        let reph_mode = indic_plan.config.reph_mode;
        if indic_plan.mask_array[indic_feature::RPHF] != 0
            && start + 3 <= end
            && ((reph_mode == RephMode::Implicit && !buffer.info[start + 2].is_indic_joiner())
                || (reph_mode == RephMode::Explicit
                    && buffer.info[start + 2].indic_category() == category::ZWJ))
        {
            let glyphs = [
                buffer.info[start].as_glyph(),
                buffer.info[start + 1].as_glyph(),
                buffer.info[start + 2].as_glyph(),
            ];
            if would_substitute(b"rphf", &glyphs[..2])
                || (reph_mode == RephMode::Explicit && would_substitute(b"rphf", &glyphs))
            {
                limit += 2;
                while limit < end && buffer.info[limit].is_indic_joiner() {
                    limit += 1;
                }
                base = start;
                has_reph = true;
            }
        } else if reph_mode == RephMode::LogRepha
            && buffer.info[start].indic_category() == category::REPHA
        {
            limit += 1;
            while limit < end && buffer.info[limit].is_indic_joiner() {
                limit += 1;
            }
            base = start;
            has_reph = true;
        }

        let mut i = end;
        let mut seen_below = false;
        loop {
            i -= 1;
            let info = &buffer.info[i];
            if info.is_indic_consonant() {
                let pos = info.indic_position();
                // Post-base forms have to follow below-base forms.
                if pos != position::BELOW_C && (pos != position::POST_C || seen_below) {
                    base = i;
                    break;
                }

                if pos == position::BELOW_C {
                    seen_below = true;
                }

                base = i;
            } else if start < i
                && info.indic_category() == category::ZWJ
                && buffer.info[i - 1].indic_category() == category::H
            {
                // ZWJ after a halant asks for an explicit half form and stops
                // the search. ZWJ before a halant asks for a subjoined form.
                break;
            }

            if i <= limit {
                break;
            }
        }

        // With no other consonant the reph does not form and Ra is the base.
        if has_reph && base == start && limit - base <= 2 {
            has_reph = false;
        }
    }

    // 2. Decomposing matras and 3. canonical mark order were taken care of
    // by normalization.

    for info in &mut buffer.info[start..base] {
        let pos = info.indic_position();
        info.set_indic_position(cmp::min(position::PRE_C, pos));
    }

    if base < end {
        buffer.info[base].set_indic_position(position::BASE_C);
    }

    if has_reph {
        buffer.info[start].set_indic_position(position::RA_TO_BECOME_REPH);
    }

    // Old-spec fonts expect the first post-base halant after the last
    // consonant. Kannada only does it when no halant is there already.
    if indic_plan.is_old_spec {
        let disallow_double_halants = buffer.script == Some(script::KANNADA);
        if let Some(i) = (base + 1..end).find(|&i| buffer.info[i].indic_category() == category::H) {
            let mut j = end - 1;
            while j > i {
                if buffer.info[j].is_indic_consonant()
                    || (disallow_double_halants && buffer.info[j].indic_category() == category::H)
                {
                    break;
                }
                j -= 1;
            }

            if buffer.info[j].indic_category() != category::H && j > i {
                buffer.info[i..=j].rotate_left(1);
            }
        }
    }

    // Attach misc marks to the previous character so they move with it.
    {
        let attached = flag(category::ZWJ)
            | flag(category::ZWNJ)
            | flag(category::N)
            | flag(category::RS)
            | flag(category::CM)
            | flag(category::H);

        let mut last_pos = position::START;
        for i in start..end {
            if flag(buffer.info[i].indic_category()) & attached != 0 {
                buffer.info[i].set_indic_position(last_pos);

                // A halant does not move with a left matra.
                if buffer.info[i].indic_category() == category::H
                    && buffer.info[i].indic_position() == position::PRE_M
                {
                    if let Some(j) = (start + 1..=i)
                        .rev()
                        .find(|&j| buffer.info[j - 1].indic_position() != position::PRE_M)
                    {
                        let pos = buffer.info[j - 1].indic_position();
                        buffer.info[i].set_indic_position(pos);
                    }
                }
            } else if buffer.info[i].indic_position() != position::SMVD {
                last_pos = buffer.info[i].indic_position();
            }
        }
    }

    // Post-base consonants own everything since the last consonant or matra.
    {
        let mut last = base;
        for i in base + 1..end {
            if buffer.info[i].is_indic_consonant() {
                let pos = buffer.info[i].indic_position();
                for info in &mut buffer.info[last + 1..i] {
                    if info.indic_position() < position::SMVD {
                        info.set_indic_position(pos);
                    }
                }
                last = i;
            } else if buffer.info[i].indic_category() == category::M {
                last = i;
            }
        }
    }

    {
        // The syllable byte holds each glyph's original offset while sorting.
        let syllable = buffer.info[start].syllable();
        for (i, info) in buffer.info[start..end].iter_mut().enumerate() {
            info.set_syllable(i as u8);
        }

        buffer.info[start..end].sort_by_key(|info| info.indic_position());

        base = (start..end)
            .find(|&i| buffer.info[i].indic_position() == position::BASE_C)
            .unwrap_or(end);

        // Pre-base clusters are merged in final reordering. After the base,
        // merge whatever moved; in old-spec mode halants move, so merge it
        // all.
        if indic_plan.is_old_spec || end - start > 127 {
            buffer.merge_clusters(base, end);
        } else {
            for i in base..end {
                if buffer.info[i].syllable() != 255 {
                    let mut min = i;
                    let mut max = i;
                    let mut j = start + usize::from(buffer.info[i].syllable());
                    while j != i {
                        min = cmp::min(min, j);
                        max = cmp::max(max, j);
                        let next = start + usize::from(buffer.info[j].syllable());
                        buffer.info[j].set_syllable(255);
                        j = next;
                    }

                    buffer.merge_clusters(cmp::max(base, min), max + 1);
                }
            }
        }

        for info in &mut buffer.info[start..end] {
            info.set_syllable(syllable);
        }
    }

    // Masks.
    {
        let masks = &indic_plan.mask_array;

        for info in &mut buffer.info[start..end] {
            if info.indic_position() != position::RA_TO_BECOME_REPH {
                break;
            }
            info.mask |= masks[indic_feature::RPHF];
        }

        let mut pre_base = masks[indic_feature::HALF];
        if !indic_plan.is_old_spec && indic_plan.config.blwf_mode == BlwfMode::PreAndPost {
            pre_base |= masks[indic_feature::BLWF];
        }
        for info in &mut buffer.info[start..base] {
            info.mask |= pre_base;
        }

        let post_base =
            masks[indic_feature::BLWF] | masks[indic_feature::ABVF] | masks[indic_feature::PSTF];
        for info in &mut buffer.info[cmp::min(base + 1, end)..end] {
            info.mask |= post_base;
        }
    }

    if indic_plan.is_old_spec && buffer.script == Some(script::DEVANAGARI) {
        // Old-spec eyelash Ra: Ra,H below half forms takes `blwf` too, unless
        // written Ra,H,ZWJ.
        for i in start..base.saturating_sub(1) {
            if buffer.info[i].indic_category() == category::RA
                && buffer.info[i + 1].indic_category() == category::H
                && (i + 2 == base || buffer.info[i + 2].indic_category() != category::ZWJ)
            {
                buffer.info[i].mask |= indic_plan.mask_array[indic_feature::BLWF];
                buffer.info[i + 1].mask |= indic_plan.mask_array[indic_feature::BLWF];
            }
        }
    }

    let pref_len = 2;
    if indic_plan.mask_array[indic_feature::PREF] != 0 && base + pref_len < end {
        // Mark the first Halant,Ra that forms `pref` for reordering.
        for i in base + 1..end - pref_len + 1 {
            let glyphs = [buffer.info[i].as_glyph(), buffer.info[i + 1].as_glyph()];
            if would_substitute(b"pref", &glyphs) {
                buffer.info[i].mask |= indic_plan.mask_array[indic_feature::PREF];
                buffer.info[i + 1].mask |= indic_plan.mask_array[indic_feature::PREF];
                break;
            }
        }
    }

    // A ZWNJ disables half forms back to the previous consonant. Joiners
    // block `cjct` just by being there.
    for i in start + 1..end {
        if buffer.info[i].is_indic_joiner() {
            let non_joiner = buffer.info[i].indic_category() == category::ZWNJ;
            let mut j = i;
            loop {
                j -= 1;

                if non_joiner {
                    buffer.info[j].mask &= !indic_plan.mask_array[indic_feature::HALF];
                }

                if j <= start || buffer.info[j].is_indic_consonant() {
                    break;
                }
            }
        }
    }
}

fn final_reordering(plan: &ShapePlan, face: &Face, buffer: &mut Buffer) {
    let Some(ShaperData::Indic(indic_plan)) = &plan.data else {
        return;
    };

    // Ligation may have lost the halant category of a virama; recover it.
    let virama = match indic_plan.config.virama {
        0 => None,
        u => face.get_nominal_glyph(u).map(|g| u32::from(g.0)),
    };

    for_each_syllable(buffer, |buffer, range| {
        // A virama split off a ligature is a halant again.
        if let Some(virama) = virama {
            for info in &mut buffer.info[range.clone()] {
                if info.glyph_id == virama && info.is_ligated() && info.is_multiplied() {
                    info.set_indic_category(category::H);
                    info.clear_ligated_and_multiplied();
                }
            }
        }

        final_reordering_syllable(indic_plan, range.start, range.end, buffer);
    });
}

fn final_reordering_syllable(
    indic_plan: &IndicShapePlan,
    start: usize,
    end: usize,
    buffer: &mut Buffer,
) {
    // 4. Final reordering, after the basic forms were applied.
    let pref_mask = indic_plan.mask_array[indic_feature::PREF];
    let mut try_pref = pref_mask != 0;

    let mut base = start;
    while base < end {
        if buffer.info[base].indic_position() >= position::BASE_C {
            if try_pref && base + 1 < end {
                if let Some(i) = (base + 1..end).find(|&i| buffer.info[i].mask & pref_mask != 0) {
                    if !(buffer.info[i].is_substituted()
                        && buffer.info[i].is_ligated_and_didnt_multiply())
                    {
                        // A `pref` candidate that formed nothing; the base is
                        // around here.
                        base = i;
                        while base < end && buffer.info[base].is_indic_halant() {
                            base += 1;
                        }

                        if base < end {
                            buffer.info[base].set_indic_position(position::BASE_C);
                        }

                        try_pref = false;
                    }
                }
            }

            // Malayalam skips over unformed below (but not post) forms.
            if buffer.script == Some(script::MALAYALAM) {
                let mut i = base + 1;
                while i < end {
                    while i < end && buffer.info[i].is_indic_joiner() {
                        i += 1;
                    }

                    if i == end || !buffer.info[i].is_indic_halant() {
                        break;
                    }

                    i += 1;

                    while i < end && buffer.info[i].is_indic_joiner() {
                        i += 1;
                    }

                    if i < end
                        && buffer.info[i].is_indic_consonant()
                        && buffer.info[i].indic_position() == position::BELOW_C
                    {
                        base = i;
                        buffer.info[base].set_indic_position(position::BASE_C);
                    }

                    i += 1;
                }
            }

            if start < base && base < end && buffer.info[base].indic_position() > position::BASE_C {
                base -= 1;
            }

            break;
        }

        base += 1;
    }

    if base == end && start < base && buffer.info[base - 1].is_indic_one_of(flag(category::ZWJ)) {
        base -= 1;
    }

    if base < end {
        while start < base
            && buffer.info[base].is_indic_one_of(flag(category::N) | flag(category::H))
        {
            base -= 1;
        }
    }

    // Reorder matras.
    //
    // A pre-base matra moves after the last standalone halant, after its
    // initial position and before the main consonant. It skips a halant
    // followed by ZWJ; a halant followed by ZWNJ ends the syllable already.
    if start + 1 < end && start < base {
        // With the base lost, position before the last glyph.
        let mut new_pos = if base == end { base - 2 } else { base - 1 };

        // Malayalam and Tamil `half` forms are chillus and ligated viramas;
        // the matra goes after them.
        if buffer.script != Some(script::MALAYALAM) && buffer.script != Some(script::TAMIL) {
            loop {
                while new_pos > start
                    && !buffer.info[new_pos].is_indic_one_of(flag(category::M) | flag(category::H))
                {
                    new_pos -= 1;
                }

                // Only a halant that does not belong to the matra itself.
                if buffer.info[new_pos].is_indic_halant()
                    && buffer.info[new_pos].indic_position() != position::PRE_M
                {
                    if new_pos + 1 < end
                        && buffer.info[new_pos + 1].indic_category() == category::ZWJ
                        && new_pos > start
                    {
                        new_pos -= 1;
                        continue;
                    }
                } else {
                    new_pos = start;
                }

                break;
            }
        }

        if start < new_pos && buffer.info[new_pos].indic_position() != position::PRE_M {
            let mut i = new_pos;
            while i > start {
                if buffer.info[i - 1].indic_position() == position::PRE_M {
                    let old_pos = i - 1;
                    if old_pos < base && base <= new_pos {
                        base -= 1;
                    }

                    buffer.info[old_pos..=new_pos].rotate_left(1);

                    // Merging after the move is what keeps the clusters
                    // monotone here.
                    buffer.merge_clusters(new_pos, cmp::min(end, base + 1));

                    new_pos -= 1;
                }
                i -= 1;
            }
        } else if let Some(i) =
            (start..base).find(|&i| buffer.info[i].indic_position() == position::PRE_M)
        {
            buffer.merge_clusters(i, cmp::min(end, base + 1));
        }
    }

    // Reorder reph.
    //
    // A reph written as Ra,H(,ZWJ) moves only if it ligated; an encoded repha
    // moves only if it did not, since then the font handles it.
    if start + 1 < end
        && buffer.info[start].indic_position() == position::RA_TO_BECOME_REPH
        && ((buffer.info[start].indic_category() == category::REPHA)
            ^ buffer.info[start].is_ligated_and_didnt_multiply())
    {
        let new_reph_pos = reph_target(indic_plan.config.reph_pos, start, end, base, buffer);

        buffer.merge_clusters(start, new_reph_pos + 1);
        buffer.info[start..=new_reph_pos].rotate_left(1);

        if start < base && base <= new_reph_pos {
            base -= 1;
        }
    }

    // Reorder pre-base-reordering consonants that actually ligated.
    if try_pref && base + 1 < end {
        if let Some(i) = (base + 1..end).find(|&i| buffer.info[i].mask & pref_mask != 0) {
            if buffer.info[i].is_ligated_and_didnt_multiply() {
                // Same target as a pre-base matra, otherwise right before the
                // main consonant.
                let mut new_pos = base;
                if buffer.script != Some(script::MALAYALAM) && buffer.script != Some(script::TAMIL)
                {
                    while new_pos > start
                        && !buffer.info[new_pos - 1]
                            .is_indic_one_of(flag(category::M) | flag(category::H))
                    {
                        new_pos -= 1;
                    }
                }

                if new_pos > start
                    && buffer.info[new_pos - 1].is_indic_halant()
                    && new_pos < end
                    && buffer.info[new_pos].is_indic_joiner()
                {
                    new_pos += 1;
                }

                let old_pos = i;
                buffer.merge_clusters(new_pos, old_pos + 1);
                buffer.info[new_pos..=old_pos].rotate_right(1);
            }
        }
    }

    // `init` applies to a left matra at word start.
    if buffer.info[start].indic_position() == position::PRE_M {
        let prev_is_letter_or_mark = start > 0
            && (1..=12).contains(&buffer.info[start - 1].general_category().to_rb());
        if !prev_is_letter_or_mark {
            buffer.info[start].mask |= indic_plan.mask_array[indic_feature::INIT];
        } else {
            buffer.unsafe_to_break(start - 1, start + 1);
        }
    }
}

/// Where the reph of a syllable ends up.
fn reph_target(
    reph_pos: RephPosition,
    start: usize,
    end: usize,
    base: usize,
    buffer: &Buffer,
) -> usize {
    // After the first explicit halant between the reph and the base, or
    // after the joiner following it.
    let after_first_halant = || {
        let mut pos = start + 1;
        while pos < base && !buffer.info[pos].is_indic_halant() {
            pos += 1;
        }

        if pos < base && buffer.info[pos].is_indic_halant() {
            if pos + 1 < base && buffer.info[pos + 1].is_indic_joiner() {
                pos += 1;
            }
            Some(pos)
        } else {
            None
        }
    };

    if reph_pos != RephPosition::AfterPost {
        if let Some(pos) = after_first_halant() {
            return pos;
        }

        if reph_pos == RephPosition::AfterMain {
            let mut pos = base;
            while pos + 1 < end && buffer.info[pos + 1].indic_position() <= position::AFTER_MAIN {
                pos += 1;
            }

            if pos < end {
                return pos;
            }
        }

        if reph_pos == RephPosition::AfterSub {
            let mut pos = base;
            while pos + 1 < end
                && !matches!(
                    buffer.info[pos + 1].indic_position(),
                    position::POST_C | position::AFTER_POST | position::SMVD
                )
            {
                pos += 1;
            }

            if pos < end {
                return pos;
            }
        }
    }

    if let Some(pos) = after_first_halant() {
        return pos;
    }

    // Otherwise at the end of the syllable, before trailing modifiers.
    let mut pos = end - 1;
    while pos > start && buffer.info[pos].indic_position() == position::SMVD {
        pos -= 1;
    }

    // After a Matra,Halant sequence the reph goes before the halant so it can
    // interact with the matra.
    if buffer.info[pos].is_indic_halant() {
        for info in &buffer.info[base + 1..pos] {
            if info.indic_category() == category::M {
                pos -= 1;
            }
        }
    }

    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;
    use crate::buffer::GlyphPropsFlags;

    fn syllable(code_points: &[u32]) -> Buffer {
        let mut buffer = Buffer::new();
        buffer.script = Some(script::DEVANAGARI);
        for (i, &u) in code_points.iter().enumerate() {
            let mut info = GlyphInfo {
                glyph_id: u,
                cluster: i as u32,
                ..GlyphInfo::default()
            };
            let (category, position) = indic_table::get_categories(u);
            info.set_indic_category(category);
            info.set_indic_position(position);
            buffer.info.push(info);
        }
        buffer
    }

    fn plan() -> IndicShapePlan {
        let mut mask_array = [0; INDIC_FEATURES.len()];
        for (i, mask) in mask_array.iter_mut().enumerate() {
            *mask = 1 << (i + 1);
        }

        IndicShapePlan {
            config: INDIC_CONFIGS[1],
            is_old_spec: false,
            zero_context: false,
            mask_array,
        }
    }

    fn order(buffer: &Buffer) -> Vec<u32> {
        buffer.info.iter().map(|i| i.glyph_id).collect()
    }

    #[test]
    fn left_matra_moves_to_front() {
        // KA, VIRAMA, SSA, VOWEL SIGN I
        let mut buffer = syllable(&[0x0915, 0x094D, 0x0937, 0x093F]);
        initial_reordering_consonant_syllable(&plan(), &|_, _| false, 0, 4, &mut buffer);

        assert_eq!(order(&buffer), vec![0x093F, 0x0915, 0x094D, 0x0937]);
        assert_eq!(buffer.info[3].indic_position(), position::BASE_C);
        // Half forms before the base.
        let half = plan().mask_array[indic_feature::HALF];
        assert_ne!(buffer.info[1].mask & half, 0);
        assert_eq!(buffer.info[3].mask & half, 0);
    }

    #[test]
    fn initial_ra_halant_becomes_reph() {
        // RA, VIRAMA, KA
        let mut buffer = syllable(&[0x0930, 0x094D, 0x0915]);
        let rphf_only = |feature: &[u8; 4], _: &[GlyphId]| feature == b"rphf";
        initial_reordering_consonant_syllable(&plan(), &rphf_only, 0, 3, &mut buffer);

        assert_eq!(order(&buffer), vec![0x0930, 0x094D, 0x0915]);
        assert_eq!(buffer.info[0].indic_position(), position::RA_TO_BECOME_REPH);
        assert_ne!(buffer.info[0].mask & plan().mask_array[indic_feature::RPHF], 0);
        assert_eq!(buffer.info[2].indic_position(), position::BASE_C);
    }

    #[test]
    fn lone_ra_halant_stays_base() {
        // RA, VIRAMA, ZWNJ would not reph; RA, VIRAMA alone is too short.
        let mut buffer = syllable(&[0x0930, 0x094D]);
        initial_reordering_consonant_syllable(&plan(), &|_, _| true, 0, 2, &mut buffer);
        assert_eq!(buffer.info[0].indic_position(), position::BASE_C);
    }

    #[test]
    fn zwnj_blocks_half_form() {
        // KA, VIRAMA, ZWNJ, SSA
        let mut buffer = syllable(&[0x0915, 0x094D, 0x200C, 0x0937]);
        initial_reordering_consonant_syllable(&plan(), &|_, _| false, 0, 4, &mut buffer);

        let half = plan().mask_array[indic_feature::HALF];
        assert!(buffer.info[..2].iter().all(|i| i.mask & half == 0));
    }

    #[test]
    fn ligated_reph_moves_after_base() {
        // A formed reph, KA, VOWEL SIGN II.
        let mut buffer = syllable(&[0x0930, 0x0915, 0x0940]);
        buffer.info[0].set_indic_position(position::RA_TO_BECOME_REPH);
        buffer.info[0].set_glyph_props((GlyphPropsFlags::SUBSTITUTED | GlyphPropsFlags::LIGATED).bits());
        buffer.info[1].set_indic_position(position::BASE_C);

        final_reordering_syllable(&plan(), 0, 3, &mut buffer);
        assert_eq!(order(&buffer), vec![0x0915, 0x0940, 0x0930]);
        assert!(buffer.info.iter().all(|i| i.cluster == 0));
    }

    #[test]
    fn left_matra_at_text_start_gets_init() {
        let mut buffer = syllable(&[0x093F, 0x0915]);
        buffer.info[0].set_indic_position(position::PRE_M);
        buffer.info[1].set_indic_position(position::BASE_C);

        final_reordering_syllable(&plan(), 0, 2, &mut buffer);
        assert_ne!(buffer.info[0].mask & plan().mask_array[indic_feature::INIT], 0);
    }

    #[test]
    fn composition_exceptions() {
        assert_eq!(compose_chars('\u{09AF}', '\u{09BC}'), Some('\u{09DF}'));
        assert_eq!(compose_chars('\u{093F}', '\u{0915}'), None);
    }
}
