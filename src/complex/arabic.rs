use alloc::boxed::Box;

use super::arabic_fallback::ArabicFallbackPlan;
use super::ShaperData;
use crate::buffer::{Buffer, BufferScratchFlags, GlyphInfo, GlyphPosition};
use crate::face::Face;
use crate::ot::FeatureFlags;
use crate::plan::{ShapePlan, ShapePlanner};
use crate::unicode::{CharExt, GeneralCategory};
use crate::{script, Mask, Script, Tag};

const ARABIC_HAS_STCH: BufferScratchFlags = BufferScratchFlags::COMPLEX0;

const ARABIC_FEATURES: &[Tag] = &[
    Tag::from_bytes(b"isol"),
    Tag::from_bytes(b"fina"),
    Tag::from_bytes(b"fin2"),
    Tag::from_bytes(b"fin3"),
    Tag::from_bytes(b"medi"),
    Tag::from_bytes(b"med2"),
    Tag::from_bytes(b"init"),
];

fn feature_is_syriac(tag: Tag) -> bool {
    matches!(tag.to_bytes()[3], b'2' | b'3')
}

/// What a glyph does in its word, stored in `complex_aux`.
///
/// The first values index `ARABIC_FEATURES`.
mod action {
    pub const ISOL: u8 = 0;
    pub const FINA: u8 = 1;
    pub const FIN2: u8 = 2;
    pub const FIN3: u8 = 3;
    pub const MEDI: u8 = 4;
    pub const MED2: u8 = 5;
    pub const INIT: u8 = 6;
    pub const NONE: u8 = 7;

    // Pieces of a glyph multiplied by `stch`.
    pub const STCH_FIXED: u8 = 8;
    pub const STCH_REPEATING: u8 = 9;
}

impl GlyphInfo {
    fn arabic_shaping_action(&self) -> u8 {
        self.complex_aux()
    }

    fn set_arabic_shaping_action(&mut self, action: u8) {
        self.set_complex_aux(action)
    }

    fn is_stch(&self) -> bool {
        matches!(
            self.arabic_shaping_action(),
            action::STCH_FIXED | action::STCH_REPEATING
        )
    }
}

/// Joining classes; the first six are state table columns.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum JoiningType {
    U = 0,
    L,
    R,
    D,
    GroupAlaph,
    GroupDalathRish,
    T,
}

fn joining_type(u: char, gc: GeneralCategory) -> JoiningType {
    use unicode_joining_type::JoiningType as Jt;

    match u {
        '\u{0710}' => return JoiningType::GroupAlaph,
        '\u{0715}' | '\u{0716}' | '\u{072A}' | '\u{072F}' => return JoiningType::GroupDalathRish,
        _ => {}
    }

    match unicode_joining_type::get_joining_type(u) {
        Jt::DualJoining | Jt::JoinCausing => JoiningType::D,
        Jt::LeftJoining => JoiningType::L,
        Jt::RightJoining => JoiningType::R,
        Jt::Transparent => JoiningType::T,
        _ => {
            let transparent_category = matches!(
                gc,
                GeneralCategory::NonspacingMark
                    | GeneralCategory::EnclosingMark
                    | GeneralCategory::Format
            );

            // ZWNJ, the Mongolian vowel separator and the prepended
            // concatenation marks are non-joining despite their category.
            let explicitly_non_joining = matches!(
                u,
                '\u{200C}'
                    | '\u{180E}'
                    | '\u{0600}'..='\u{0605}'
                    | '\u{06DD}'
                    | '\u{070F}'
                    | '\u{0890}'
                    | '\u{0891}'
                    | '\u{08E2}'
            );

            if transparent_category && !explicitly_non_joining {
                JoiningType::T
            } else {
                JoiningType::U
            }
        }
    }
}

// (prev_action, curr_action, next_state) by state and joining type.
#[rustfmt::skip]
const STATE_TABLE: [[(u8, u8, u8); 6]; 7] = {
    use action::*;
    [
        //  U                   L                  R                  D                  Alaph              DalathRish

        // 0: prev was U, not willing to join.
        [(NONE, NONE, 0), (NONE, ISOL, 2), (NONE, ISOL, 1), (NONE, ISOL, 2), (NONE, ISOL, 1), (NONE, ISOL, 6)],
        // 1: prev was R or ISOL/ALAPH, not willing to join.
        [(NONE, NONE, 0), (NONE, ISOL, 2), (NONE, ISOL, 1), (NONE, ISOL, 2), (NONE, FIN2, 5), (NONE, ISOL, 6)],
        // 2: prev was D/L in ISOL form, willing to join.
        [(NONE, NONE, 0), (NONE, ISOL, 2), (INIT, FINA, 1), (INIT, FINA, 3), (INIT, FINA, 4), (INIT, FINA, 6)],
        // 3: prev was D in FINA form, willing to join.
        [(NONE, NONE, 0), (NONE, ISOL, 2), (MEDI, FINA, 1), (MEDI, FINA, 3), (MEDI, FINA, 4), (MEDI, FINA, 6)],
        // 4: prev was FINA ALAPH, not willing to join.
        [(NONE, NONE, 0), (NONE, ISOL, 2), (MED2, ISOL, 1), (MED2, ISOL, 2), (MED2, FIN2, 5), (MED2, ISOL, 6)],
        // 5: prev was FIN2/FIN3 ALAPH, not willing to join.
        [(NONE, NONE, 0), (NONE, ISOL, 2), (ISOL, ISOL, 1), (ISOL, ISOL, 2), (ISOL, FIN2, 5), (ISOL, ISOL, 6)],
        // 6: prev was DALATH/RISH, not willing to join.
        [(NONE, NONE, 0), (NONE, ISOL, 2), (NONE, ISOL, 1), (NONE, ISOL, 2), (NONE, FIN3, 5), (NONE, ISOL, 6)],
    ]
};

pub struct ArabicShapePlan {
    // Indexed by action; NONE maps to 0.
    mask_array: [Mask; ARABIC_FEATURES.len() + 1],
    fallback_plan: Option<Box<ArabicFallbackPlan>>,
    do_fallback: bool,
    has_stch: bool,
}

impl ArabicShapePlan {
    pub fn new(plan: &ShapePlan, face: &Face) -> ArabicShapePlan {
        let map = &plan.ot_map;

        let mut do_fallback = plan.script == Some(script::ARABIC);
        let mut mask_array = [0; ARABIC_FEATURES.len() + 1];
        for (mask, &feature) in mask_array.iter_mut().zip(ARABIC_FEATURES) {
            *mask = map.one_mask(feature);
            do_fallback &= feature_is_syriac(feature) || map.needs_fallback(feature);
        }

        let fallback_plan = do_fallback.then(|| Box::new(ArabicFallbackPlan::new(map, face)));

        ArabicShapePlan {
            mask_array,
            fallback_plan,
            do_fallback,
            has_stch: map.one_mask(Tag::from_bytes(b"stch")) != 0,
        }
    }
}

pub fn collect_features(planner: &mut ShapePlanner) {
    // Features follow the Arabic shaping order with pauses between most of
    // them. The pause between init/medi/... and rlig is required.
    planner
        .ot_map
        .enable_feature(Tag::from_bytes(b"stch"), FeatureFlags::empty(), 1);
    planner.ot_map.add_gsub_pause(Some(record_stch));

    planner
        .ot_map
        .enable_feature(Tag::from_bytes(b"ccmp"), FeatureFlags::empty(), 1);
    planner
        .ot_map
        .enable_feature(Tag::from_bytes(b"locl"), FeatureFlags::empty(), 1);

    planner.ot_map.add_gsub_pause(None);

    let is_arabic = planner.script == Some(script::ARABIC);
    for &feature in ARABIC_FEATURES {
        let has_fallback = is_arabic && !feature_is_syriac(feature);
        let flags = if has_fallback {
            FeatureFlags::HAS_FALLBACK
        } else {
            FeatureFlags::empty()
        };
        planner.ot_map.add_feature(feature, flags, 1);
        planner.ot_map.add_gsub_pause(None);
    }

    // In Arabic a ZWJ also means "don't ligate".
    planner.ot_map.enable_feature(
        Tag::from_bytes(b"rlig"),
        FeatureFlags::MANUAL_ZWJ | FeatureFlags::HAS_FALLBACK,
        1,
    );

    if is_arabic {
        planner.ot_map.add_gsub_pause(Some(fallback_shape));
    }

    // No pause after rclt.
    planner
        .ot_map
        .enable_feature(Tag::from_bytes(b"rclt"), FeatureFlags::MANUAL_ZWJ, 1);
    planner
        .ot_map
        .enable_feature(Tag::from_bytes(b"calt"), FeatureFlags::MANUAL_ZWJ, 1);
    planner.ot_map.add_gsub_pause(None);

    // cswh is off by default.
    planner
        .ot_map
        .enable_feature(Tag::from_bytes(b"mset"), FeatureFlags::empty(), 1);
}

fn arabic_joining(buffer: &mut Buffer) {
    let mut prev: Option<usize> = None;
    let mut state = 0;

    for &u in buffer.context(0) {
        let this_type = joining_type(u, u.general_category());
        if this_type == JoiningType::T {
            continue;
        }

        state = STATE_TABLE[state][this_type as usize].2 as usize;
        break;
    }

    for i in 0..buffer.len() {
        let info = &buffer.info[i];
        let this_type = joining_type(info.as_char(), info.general_category());
        if this_type == JoiningType::T {
            buffer.info[i].set_arabic_shaping_action(action::NONE);
            continue;
        }

        let (prev_action, curr_action, next_state) = STATE_TABLE[state][this_type as usize];
        if prev_action != action::NONE {
            if let Some(prev) = prev {
                buffer.info[prev].set_arabic_shaping_action(prev_action);
                buffer.unsafe_to_break(prev, i + 1);
            }
        }

        buffer.info[i].set_arabic_shaping_action(curr_action);

        prev = Some(i);
        state = usize::from(next_state);
    }

    let post_context: Option<char> = buffer
        .context(1)
        .iter()
        .copied()
        .find(|&u| joining_type(u, u.general_category()) != JoiningType::T);

    if let Some(u) = post_context {
        let this_type = joining_type(u, u.general_category());
        let (prev_action, _, _) = STATE_TABLE[state][this_type as usize];
        if prev_action != action::NONE {
            if let Some(prev) = prev {
                buffer.info[prev].set_arabic_shaping_action(prev_action);
            }
        }
    }
}

fn mongolian_variation_selectors(buffer: &mut Buffer) {
    // Free variation selectors take the action of their base.
    for i in 1..buffer.len() {
        if matches!(buffer.info[i].glyph_id, 0x180B..=0x180D | 0x180F) {
            let prev = buffer.info[i - 1].arabic_shaping_action();
            buffer.info[i].set_arabic_shaping_action(prev);
        }
    }
}

pub fn setup_masks_inner(arabic_plan: &ArabicShapePlan, script: Option<Script>, buffer: &mut Buffer) {
    arabic_joining(buffer);
    if script == Some(script::MONGOLIAN) {
        mongolian_variation_selectors(buffer);
    }

    for info in buffer.info_slice_mut() {
        let action = usize::from(info.arabic_shaping_action());
        info.mask |= arabic_plan.mask_array.get(action).copied().unwrap_or(0);
    }
}

pub fn setup_masks(plan: &ShapePlan, _: &Face, buffer: &mut Buffer) {
    let Some(ShaperData::Arabic(arabic_plan)) = &plan.data else {
        return;
    };

    setup_masks_inner(arabic_plan, plan.script, buffer);
}

fn fallback_shape(plan: &ShapePlan, face: &Face, buffer: &mut Buffer) {
    let Some(ShaperData::Arabic(arabic_plan)) = &plan.data else {
        return;
    };

    if !arabic_plan.do_fallback {
        return;
    }

    if let Some(fallback_plan) = &arabic_plan.fallback_plan {
        fallback_plan.shape(face, buffer);
    }
}

// Stretch feature: "stch".
// See https://docs.microsoft.com/en-us/typography/script-development/syriac
// The same mechanism serves the Arabic subtending marks.

/// Pause after `stch`: remember the pieces of every multiplied glyph.
fn record_stch(plan: &ShapePlan, _: &Face, buffer: &mut Buffer) {
    let Some(ShaperData::Arabic(arabic_plan)) = &plan.data else {
        return;
    };

    if !arabic_plan.has_stch {
        return;
    }

    // rtlm, frac and the like come before stch, but they are assumed not
    // to multiply anything.
    let mut has_stch = false;
    for info in buffer.info_slice_mut() {
        if info.is_multiplied() {
            let action = if info.lig_comp() % 2 != 0 {
                action::STCH_REPEATING
            } else {
                action::STCH_FIXED
            };
            info.set_arabic_shaping_action(action);
            has_stch = true;
        }
    }

    if has_stch {
        buffer.scratch_flags |= ARABIC_HAS_STCH;
    }
}

/// See https://github.com/harfbuzz/harfbuzz/commit/6e6f82b6f3dde0fc6c3c7d991d9ec6cfff57823d#commitcomment-14248516
fn is_word_category(gc: GeneralCategory) -> bool {
    matches!(
        gc,
        GeneralCategory::Unassigned
            | GeneralCategory::PrivateUse
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
            | GeneralCategory::SpacingMark
            | GeneralCategory::EnclosingMark
            | GeneralCategory::NonspacingMark
            | GeneralCategory::DecimalNumber
            | GeneralCategory::LetterNumber
            | GeneralCategory::OtherNumber
            | GeneralCategory::CurrencySymbol
            | GeneralCategory::ModifierSymbol
            | GeneralCategory::MathSymbol
            | GeneralCategory::OtherSymbol
    )
}

/// How many extra copies of the repeating tiles fill `w_total`, and how
/// much neighbouring copies overlap to make them fit exactly.
fn stretch_repeats(w_total: i32, w_fixed: i32, w_repeating: i32, n_repeating: i32) -> (i32, i32) {
    let w_remaining = w_total - w_fixed;

    let mut n_copies = 0;
    if w_remaining > w_repeating && w_repeating > 0 {
        n_copies = w_remaining / w_repeating - 1;
    }

    // One more copy squeezed together may fit better.
    let mut extra_repeat_overlap = 0;
    let shortfall = w_remaining - w_repeating * (n_copies + 1);
    if shortfall > 0 && n_repeating > 0 {
        n_copies += 1;
        let excess = (n_copies + 1) * w_repeating - w_remaining;
        if excess > 0 {
            extra_repeat_overlap = excess / (n_copies * n_repeating);
        }
    }

    (n_copies, extra_repeat_overlap)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum StchStep {
    Measure,
    Cut,
}

fn apply_stch(face: &Face, buffer: &mut Buffer) {
    if !buffer.scratch_flags.contains(ARABIC_HAS_STCH) {
        return;
    }

    // The Arabic shaper always works in RTL, so stretched pieces extend
    // towards the preceding glyphs.
    //
    // The first pass counts the extra glyphs, the buffer then grows by that
    // much and the second pass fills it from the end.
    let original_len = buffer.len();
    let mut extra_glyphs_needed = 0;

    for step in [StchStep::Measure, StchStep::Cut] {
        let mut j = buffer.len();
        let mut i = original_len;
        while i != 0 {
            if !buffer.info[i - 1].is_stch() {
                if step == StchStep::Cut {
                    j -= 1;
                    buffer.info[j] = buffer.info[i - 1];
                    buffer.pos[j] = buffer.pos[i - 1];
                }

                i -= 1;
                continue;
            }

            let mut w_total = 0;
            let mut w_fixed = 0;
            let mut w_repeating = 0;
            let mut n_repeating = 0;

            let end = i;
            while i != 0 && buffer.info[i - 1].is_stch() {
                i -= 1;
                let width = face.glyph_h_advance(buffer.info[i].as_glyph());
                if buffer.info[i].arabic_shaping_action() == action::STCH_FIXED {
                    w_fixed += width;
                } else {
                    w_repeating += width;
                    n_repeating += 1;
                }
            }

            let start = i;
            let mut context = i;
            while context != 0
                && !buffer.info[context - 1].is_stch()
                && (buffer.info[context - 1].is_default_ignorable()
                    || is_word_category(buffer.info[context - 1].general_category()))
            {
                context -= 1;
                w_total += buffer.pos[context].x_advance;
            }

            let (n_copies, extra_repeat_overlap) =
                stretch_repeats(w_total, w_fixed, w_repeating, n_repeating);

            log::trace!(
                "stch run {}..{} in word from {}: {} extra copies",
                start,
                end,
                context,
                n_copies
            );

            if step == StchStep::Measure {
                extra_glyphs_needed += (n_copies * n_repeating) as usize;
            } else {
                buffer.unsafe_to_break(context, end);
                let mut x_offset = 0;
                for k in (start + 1..=end).rev() {
                    let width = face.glyph_h_advance(buffer.info[k - 1].as_glyph());

                    let mut repeat = 1;
                    if buffer.info[k - 1].arabic_shaping_action() == action::STCH_REPEATING {
                        repeat += n_copies;
                    }

                    for n in 0..repeat {
                        x_offset -= width;
                        if n > 0 {
                            x_offset += extra_repeat_overlap;
                        }

                        buffer.pos[k - 1].x_offset = x_offset;

                        j -= 1;
                        buffer.info[j] = buffer.info[k - 1];
                        buffer.pos[j] = buffer.pos[k - 1];
                    }
                }
            }
        }

        if step == StchStep::Measure {
            let new_len = original_len + extra_glyphs_needed;
            buffer.info.resize(new_len, GlyphInfo::default());
            buffer.pos.resize(new_len, GlyphPosition::default());
        }
    }
}

pub fn postprocess_glyphs(_: &ShapePlan, face: &Face, buffer: &mut Buffer) {
    apply_stch(face, buffer);
}

/// Modifier combining marks, <https://www.unicode.org/reports/tr53/>.
fn is_modifier_combining_mark(info: &GlyphInfo) -> bool {
    matches!(
        info.glyph_id,
        // HAMZA ABOVE, HAMZA BELOW, MARK NOON GHUNNA
        0x0654 | 0x0655 | 0x0658
        // SMALL HIGH SEEN, SMALL LOW SEEN, SMALL HIGH YEH, SMALL HIGH NOON
        | 0x06DC | 0x06E3 | 0x06E7 | 0x06E8
        // SMALL LOW WAW, SMALL HIGH WAW
        | 0x08D3 | 0x08F3
    )
}

/// Moves modifier combining marks of class 220 and 230 to the front of the
/// mark sequence `start..end`.
pub fn reorder_marks(_: &ShapePlan, buffer: &mut Buffer, start: usize, end: usize) {
    reorder_modifier_marks(buffer, start, end);
}

fn reorder_modifier_marks(buffer: &mut Buffer, mut start: usize, end: usize) {
    log::trace!("reordering Arabic marks in {}..{}", start, end);

    let mut i = start;
    for cc in [220u8, 230] {
        while i < end && buffer.info[i].modified_combining_class() < cc {
            i += 1;
        }

        if i == end {
            break;
        }

        if buffer.info[i].modified_combining_class() > cc {
            continue;
        }

        let mut j = i;
        while j < end
            && buffer.info[j].modified_combining_class() == cc
            && is_modifier_combining_mark(&buffer.info[j])
        {
            j += 1;
        }

        if i == j {
            continue;
        }

        buffer.merge_clusters(start, j);
        buffer.info[start..j].rotate_right(j - i);

        // Renumber so the sequence stays sorted for the normalizer. 22 and
        // 26 sort before every Arabic class and fall back to 220 and 230 in
        // fallback mark positioning.
        let new_start = start + j - i;
        let new_cc = if cc == 220 { 22 } else { 26 };
        for info in &mut buffer.info[start..new_start] {
            info.set_modified_combining_class(new_cc);
        }
        start = new_start;

        i = j;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn buffer(code_points: &[u32]) -> Buffer {
        let mut buffer = Buffer::new();
        for (i, &u) in code_points.iter().enumerate() {
            buffer.add(u, i as u32);
        }
        let mut flags = BufferScratchFlags::default();
        for info in &mut buffer.info {
            info.init_unicode_props(&mut flags);
        }
        buffer
    }

    fn actions(buffer: &Buffer) -> Vec<u8> {
        buffer.info.iter().map(|i| i.arabic_shaping_action()).collect()
    }

    #[test]
    fn lam_alef() {
        let mut b = buffer(&[0x0644, 0x0627]);
        arabic_joining(&mut b);
        assert_eq!(actions(&b), vec![action::INIT, action::FINA]);
    }

    #[test]
    fn three_behs() {
        let mut b = buffer(&[0x0628, 0x0628, 0x0628]);
        arabic_joining(&mut b);
        assert_eq!(actions(&b), vec![action::INIT, action::MEDI, action::FINA]);
    }

    #[test]
    fn marks_are_transparent() {
        // BEH, FATHA, BEH
        let mut b = buffer(&[0x0628, 0x064E, 0x0628]);
        arabic_joining(&mut b);
        assert_eq!(actions(&b), vec![action::INIT, action::NONE, action::FINA]);
    }

    #[test]
    fn zwnj_breaks_joining() {
        let mut b = buffer(&[0x0628, 0x200C, 0x0628]);
        arabic_joining(&mut b);
        assert_eq!(actions(&b), vec![action::ISOL, action::NONE, action::ISOL]);
    }

    #[test]
    fn context_joins() {
        let mut b = buffer(&[0x0628]);
        b.set_pre_context("\u{0628}");
        b.set_post_context("\u{0628}");
        arabic_joining(&mut b);
        assert_eq!(actions(&b), vec![action::MEDI]);
    }

    #[test]
    fn syriac_alaph_after_dalath() {
        // BETH, DALATH, ALAPH
        let mut b = buffer(&[0x0712, 0x0715, 0x0710]);
        arabic_joining(&mut b);
        assert_eq!(actions(&b), vec![action::INIT, action::FINA, action::FIN3]);
    }

    #[test]
    fn stretch_fills_the_word() {
        // 900 units left after the fixed tile. Three 200 unit copies leave a
        // shortfall, so a fourth is added and the copies overlap by 25.
        assert_eq!(stretch_repeats(1000, 100, 200, 1), (4, 25));
        assert_eq!(stretch_repeats(1000, 100, 250, 1), (3, 33));
        // Nothing to stretch over.
        assert_eq!(stretch_repeats(0, 100, 200, 1), (0, 0));
    }

    #[test]
    fn hamza_above_moves_to_front() {
        // FATHA, HAMZA ABOVE, SHADDA
        let mut b = buffer(&[0x064E, 0x0654, 0x0651]);
        b.info[0].set_modified_combining_class(230);
        b.info[1].set_modified_combining_class(230);
        b.info[2].set_modified_combining_class(231);

        // The hamza does not lead the class 230 run yet.
        reorder_modifier_marks(&mut b, 0, 3);
        let glyphs: Vec<u32> = b.info.iter().map(|i| i.glyph_id).collect();
        assert_eq!(glyphs, vec![0x064E, 0x0654, 0x0651]);

        // HAMZA ABOVE, MADDA
        let mut b = buffer(&[0x0654, 0x0653]);
        b.info[0].set_modified_combining_class(230);
        b.info[1].set_modified_combining_class(230);
        reorder_modifier_marks(&mut b, 0, 2);
        assert_eq!(b.info[0].glyph_id, 0x0654);
        assert_eq!(b.info[0].modified_combining_class(), 26);
        assert_eq!(b.info[1].modified_combining_class(), 230);
    }

    #[test]
    fn hamza_below_moves_before_kasra() {
        // SUKUN (above), HAMZA BELOW
        let mut b = buffer(&[0x0652, 0x0655]);
        b.info[0].set_modified_combining_class(200);
        b.info[1].set_modified_combining_class(220);
        reorder_modifier_marks(&mut b, 0, 2);
        let glyphs: Vec<u32> = b.info.iter().map(|i| i.glyph_id).collect();
        assert_eq!(glyphs, vec![0x0655, 0x0652]);
        assert_eq!(b.info[0].modified_combining_class(), 22);
        assert_eq!(b.info[0].cluster, b.info[1].cluster);
    }
}
