use ttf_parser::GlyphId;

use crate::aat;
use crate::buffer::{
    glyph_flag, Buffer, BufferClusterLevel, BufferFlags, BufferScratchFlags, GlyphInfo,
    GlyphPropsFlags,
};
use crate::common::{script, Direction, Feature};
use crate::complex::ZeroWidthMarksMode;
use crate::face::Face;
use crate::ot::{self, fallback, layout, normalize};
use crate::plan::ShapePlan;
use crate::unicode::{CharExt, GeneralCategory};
use crate::{GlyphBuffer, Mask, UnicodeBuffer};

/// Shapes `buffer` with `face`, building a plan for it first.
///
/// The buffer is consumed; [`GlyphBuffer::clear`] hands its allocation back
/// as a [`UnicodeBuffer`].
///
/// Planning costs more than shaping a short string. When a face is used
/// for many strings, keep a plan around with [`shape_with_plan`] or let
/// [`shape_cached`](crate::shape_cached) do it.
pub fn shape(face: &Face, features: &[Feature], mut buffer: UnicodeBuffer) -> GlyphBuffer {
    buffer.0.guess_segment_properties();
    let plan = ShapePlan::new(
        face,
        buffer.0.direction,
        buffer.0.script,
        buffer.0.language.as_ref(),
        features,
    );
    shape_with_plan(face, &plan, buffer)
}

/// Shapes `buffer` with a prebuilt plan and the features it was built with.
///
/// The plan has to match the buffer's direction and script. Debug builds
/// assert that.
pub fn shape_with_plan(face: &Face, plan: &ShapePlan, buffer: UnicodeBuffer) -> GlyphBuffer {
    shape_with_features(face, plan, &plan.user_features, buffer)
}

/// Shapes with `plan`, taking feature ranges from `features`.
///
/// `features` must compile to the same plan, only the ranges of non-global
/// features may differ.
pub(crate) fn shape_with_features(
    face: &Face,
    plan: &ShapePlan,
    features: &[Feature],
    buffer: UnicodeBuffer,
) -> GlyphBuffer {
    let mut buffer = buffer.0;
    buffer.guess_segment_properties();

    debug_assert_eq!(buffer.direction, plan.direction);
    debug_assert_eq!(
        buffer.script.unwrap_or(script::UNKNOWN),
        plan.script.unwrap_or(script::UNKNOWN)
    );

    if !buffer.is_empty() {
        let run = Run {
            plan,
            face,
            features,
            direction: buffer.direction,
        };
        run.shape(&mut buffer);
    }

    GlyphBuffer(buffer)
}

/// Shapes without consulting any layout table.
///
/// Each character becomes its nominal glyph with the font's advance, so
/// nothing is substituted, reordered or attached and every glyph keeps its
/// own cluster. Default ignorables turn into a zero-advance space when the
/// font maps one. Use it for fonts without OpenType or AAT layout.
pub fn shape_fallback(face: &Face, buffer: UnicodeBuffer) -> GlyphBuffer {
    let mut buffer = buffer.0;
    buffer.guess_segment_properties();
    buffer.clear_positions();

    let space = face.get_nominal_glyph(u32::from(' '));
    let horizontal = buffer.direction.is_horizontal();

    for (info, pos) in buffer.info.iter_mut().zip(&mut buffer.pos) {
        info.mask = 0;

        if let (Some(space), true) = (space, info.as_char().is_default_ignorable()) {
            info.glyph_id = u32::from(space.0);
            continue;
        }

        let glyph = face.get_nominal_glyph(info.glyph_id).unwrap_or(GlyphId(0));
        info.glyph_id = u32::from(glyph.0);

        if horizontal {
            pos.x_advance = face.glyph_h_advance(glyph);
        } else {
            pos.y_advance = face.glyph_v_advance(glyph);
            pos.x_offset -= face.glyph_h_origin(glyph);
            pos.y_offset -= face.glyph_v_origin(glyph);
        }
    }

    if buffer.direction.is_backward() {
        buffer.reverse();
    }

    GlyphBuffer(buffer)
}

/// One shaping call: what stays fixed while the buffer goes through the
/// pipeline.
struct Run<'a> {
    plan: &'a ShapePlan,
    face: &'a Face<'a>,
    features: &'a [Feature],
    /// The direction the caller asked for. The buffer may run in the
    /// script's native direction in between.
    direction: Direction,
}

impl Run<'_> {
    fn shape(&self, buffer: &mut Buffer) {
        buffer.scratch_flags = BufferScratchFlags::empty();
        buffer.max_ops = i32::try_from(buffer.len())
            .ok()
            .and_then(|len| len.checked_mul(Buffer::MAX_OPS_FACTOR))
            .map_or(Buffer::MAX_OPS_DEFAULT, |ops| ops.max(Buffer::MAX_OPS_MIN));
        buffer.clear_output();

        self.prepare(buffer);
        self.substitute(buffer);
        self.position(buffer);
        self.finish_glyphs(buffer);
        propagate_flags(buffer);

        buffer.direction = self.direction;
        buffer.max_ops = Buffer::MAX_OPS_DEFAULT;
    }

    /// Masks, character properties, clusters and native direction.
    fn prepare(&self, buffer: &mut Buffer) {
        buffer.reset_masks(self.plan.ot_map.global_mask());
        set_unicode_props(buffer);
        insert_dotted_circle(buffer, self.face);
        form_clusters(buffer);
        ensure_native_direction(buffer);

        self.plan.shaper.preprocess_text(self.plan, self.face, buffer);
    }

    fn substitute(&self, buffer: &mut Buffer) {
        let (plan, face) = (self.plan, self.face);

        self.substitute_chars(buffer);
        normalize::normalize(plan, face, buffer);
        self.setup_masks(buffer);

        // Still needs the characters, so before glyph mapping.
        if plan.fallback_mark_positioning {
            fallback::recategorize_marks(plan, face, buffer);
        }

        // The normalizer stored glyph indices already.
        for info in &mut buffer.info {
            info.glyph_id = info.glyph_index();
        }

        layout::substitute_start(face, buffer);
        if plan.fallback_glyph_classes {
            synthesize_glyph_classes(buffer);
        }

        if plan.apply_morx {
            aat::substitute(plan, face, buffer);
        } else {
            ot::substitute::substitute(plan, face, buffer);
        }
    }

    /// Mirrors characters in backward runs and swaps in vertical forms,
    /// when the font has the replacement.
    fn substitute_chars(&self, buffer: &mut Buffer) {
        let face = self.face;

        if self.direction.is_backward() {
            let rtlm_mask = self.plan.rtlm_mask;
            for info in &mut buffer.info {
                match info.as_char().mirrored().map(u32::from) {
                    Some(c) if c != info.glyph_id && face.has_glyph(c) => info.glyph_id = c,
                    // Left to the `rtlm` feature.
                    _ => info.mask |= rtlm_mask,
                }
            }
        }

        if self.direction.is_vertical() && !self.plan.has_vert {
            for info in &mut buffer.info {
                let vertical = info.as_char().vertical().map(u32::from);
                if let Some(c) = vertical.filter(|&c| c != info.glyph_id && face.has_glyph(c)) {
                    info.glyph_id = c;
                }
            }
        }
    }

    fn setup_masks(&self, buffer: &mut Buffer) {
        let plan = self.plan;
        if plan.has_frac && buffer.scratch_flags.contains(BufferScratchFlags::HAS_NON_ASCII) {
            let masks = FractionMasks {
                numr: plan.numr_mask,
                frac: plan.frac_mask,
                dnom: plan.dnom_mask,
            };
            mark_fractions(masks, buffer);
        }

        plan.shaper.setup_masks(plan, self.face, buffer);

        for feature in self.features.iter().filter(|f| !f.is_global()) {
            let (mask, shift) = plan.ot_map.mask(feature.tag);
            buffer.set_masks(feature.value << shift, mask, feature.start, feature.end);
        }
    }

    fn position(&self, buffer: &mut Buffer) {
        let (plan, face) = (self.plan, self.face);

        buffer.clear_positions();
        set_nominal_advances(face, buffer);
        if buffer
            .scratch_flags
            .contains(BufferScratchFlags::HAS_SPACE_FALLBACK)
        {
            fallback::adjust_spaces(plan, face, buffer);
        }

        // Zeroing a mark in forward text keeps it over the glyph before by
        // moving its offset back. Backward text gets that from the final
        // reversal, and fallback positioning places marks itself.
        let shift_zeroed =
            plan.adjust_mark_positioning_when_zeroing && buffer.direction.is_forward();
        let (zero_marks, _) = plan.shaper.marks_behavior();
        let zero_early = plan.zero_marks && zero_marks == ZeroWidthMarksMode::ByGdefEarly;
        let zero_late = plan.zero_marks && zero_marks == ZeroWidthMarksMode::ByGdefLate;

        ot::position::position_start(buffer);
        if zero_early {
            zero_mark_widths(buffer, shift_zeroed);
        }

        if plan.apply_gpos {
            ot::position::position(plan, face, buffer);
        } else if plan.apply_kerx {
            aat::position(plan, face, buffer);
        } else if plan.apply_kern {
            ot::kern::kern(plan, face, buffer);
        }

        if plan.apply_trak {
            aat::track(plan, face, buffer);
        }

        if zero_late {
            zero_mark_widths(buffer, shift_zeroed);
        }

        // Attachment offsets are resolved only once everything that can
        // change an advance has run.
        zero_width_default_ignorables(buffer);
        if plan.apply_morx {
            aat::zero_width_deleted_glyphs(buffer);
        }
        ot::position::position_finish_offsets(buffer);

        if plan.fallback_mark_positioning {
            fallback::position_marks(plan, face, buffer, shift_zeroed);
        }

        if buffer.direction.is_backward() {
            buffer.reverse();
        }
    }

    fn finish_glyphs(&self, buffer: &mut Buffer) {
        hide_default_ignorables(buffer, self.face);

        if self.plan.apply_morx {
            aat::remove_deleted_glyphs(buffer);
        }

        self.plan
            .shaper
            .postprocess_glyphs(self.plan, self.face, buffer);
    }
}

fn set_nominal_advances(face: &Face, buffer: &mut Buffer) {
    let horizontal = buffer.direction.is_horizontal();
    for (info, pos) in buffer.info.iter().zip(&mut buffer.pos) {
        let glyph = info.as_glyph();
        if horizontal {
            pos.x_advance = face.glyph_h_advance(glyph);
        } else {
            pos.y_advance = face.glyph_v_advance(glyph);
            pos.x_offset -= face.glyph_h_origin(glyph);
            pos.y_offset -= face.glyph_v_origin(glyph);
        }
    }
}

const FRACTION_SLASH: u32 = 0x2044;

#[derive(Clone, Copy)]
struct FractionMasks {
    numr: Mask,
    frac: Mask,
    dnom: Mask,
}

/// Digits before a fraction slash get `numr`, digits after it `dnom`. The
/// whole run gets `frac`.
fn mark_fractions(masks: FractionMasks, buffer: &mut Buffer) {
    // The numerator is the visually first part.
    let (before, after) = if buffer.direction.is_forward() {
        (masks.numr, masks.dnom)
    } else {
        (masks.dnom, masks.numr)
    };

    let is_digit = |info: &GlyphInfo| info.general_category() == GeneralCategory::DecimalNumber;

    let mut i = 0;
    while i < buffer.len() {
        if buffer.info[i].glyph_id != FRACTION_SLASH {
            i += 1;
            continue;
        }

        let start = buffer.info[..i]
            .iter()
            .rposition(|info| !is_digit(info))
            .map_or(0, |p| p + 1);
        let end = buffer.info[i + 1..]
            .iter()
            .position(|info| !is_digit(info))
            .map_or(buffer.len(), |p| i + 1 + p);

        buffer.unsafe_to_break(start, end);
        for (k, info) in buffer.info[start..end].iter_mut().enumerate() {
            info.mask |= masks.frac;
            match (start + k).cmp(&i) {
                core::cmp::Ordering::Less => info.mask |= before,
                core::cmp::Ordering::Greater => info.mask |= after,
                core::cmp::Ordering::Equal => {}
            }
        }

        i = end;
    }
}

const EMOJI_MODIFIERS: core::ops::RangeInclusive<u32> = 0x1F3FB..=0x1F3FF;
const TAGS: core::ops::RangeInclusive<u32> = 0xE0020..=0xE007F;

/// Fills in the Unicode properties and marks grapheme continuations.
///
/// Only as much of the grapheme rules is followed as keeps graphemes whole
/// when a run is reversed: marks, emoji modifiers, ZWJ with the
/// pictograph after it and tag characters continue what came before.
fn set_unicode_props(buffer: &mut Buffer) {
    let mut i = 0;
    while i < buffer.len() {
        let scratch = &mut buffer.scratch_flags;
        let info = &mut buffer.info[i];
        info.init_unicode_props(scratch);

        let modifier = info.general_category() == GeneralCategory::ModifierSymbol
            && EMOJI_MODIFIERS.contains(&info.glyph_id);
        if modifier || TAGS.contains(&info.glyph_id) {
            info.set_continuation();
        } else if info.is_zwj() {
            info.set_continuation();
            let joins_pictograph = buffer
                .info
                .get(i + 1)
                .map_or(false, |next| next.as_char().is_emoji_extended_pictographic());
            if joins_pictograph {
                i += 1;
                let next = &mut buffer.info[i];
                next.init_unicode_props(&mut buffer.scratch_flags);
                next.set_continuation();
            }
        }

        i += 1;
    }
}

const DOTTED_CIRCLE: u32 = 0x25CC;

/// Gives a mark at the very start of the text a dotted circle to sit on.
fn insert_dotted_circle(buffer: &mut Buffer, face: &Face) {
    let wanted = buffer.flags.contains(BufferFlags::BEGINNING_OF_TEXT)
        && !buffer
            .flags
            .contains(BufferFlags::DO_NOT_INSERT_DOTTED_CIRCLE)
        && buffer.context_len[0] == 0
        && buffer.info[0].is_unicode_mark();
    if !wanted || !face.has_glyph(DOTTED_CIRCLE) {
        return;
    }

    let first = buffer.info[0];
    let mut circle = GlyphInfo {
        glyph_id: DOTTED_CIRCLE,
        mask: first.mask,
        cluster: first.cluster,
        ..GlyphInfo::default()
    };
    circle.init_unicode_props(&mut buffer.scratch_flags);

    buffer.clear_output();
    buffer.output_info(circle);
    while buffer.idx < buffer.len() {
        buffer.next_glyph();
    }
    buffer.swap_buffers();
}

/// Merges each grapheme into one cluster, or at finer cluster levels only
/// marks it unsafe to break.
fn form_clusters(buffer: &mut Buffer) {
    if !buffer
        .scratch_flags
        .contains(BufferScratchFlags::HAS_NON_ASCII)
    {
        return;
    }

    let merge = buffer.cluster_level == BufferClusterLevel::MonotoneGraphemes;
    let mut start = 0;
    while start < buffer.len() {
        let end = buffer.next_grapheme(start);
        if merge {
            buffer.merge_clusters(start, end);
        } else {
            buffer.unsafe_to_break(start, end);
        }
        start = end;
    }
}

/// Turns the buffer around when the requested direction is not the
/// script's own. Vertical text is always shaped top to bottom.
fn ensure_native_direction(buffer: &mut Buffer) {
    let direction = buffer.direction;
    let native = buffer
        .script
        .and_then(Direction::from_script)
        .unwrap_or_default();

    let against_script =
        direction.is_horizontal() && native != Direction::Invalid && direction != native;
    let upward = direction.is_vertical() && direction != Direction::TopToBottom;
    if !against_script && !upward {
        return;
    }

    // Graphemes keep their order inside. Clusters were merged already
    // unless the level is per character.
    let merge = buffer.cluster_level == BufferClusterLevel::MonotoneCharacters;
    let mut start = 0;
    while start < buffer.len() {
        let end = buffer.next_grapheme(start);
        if merge {
            buffer.merge_clusters(start, end);
        }
        buffer.reverse_range(start, end);
        start = end;
    }

    buffer.reverse();
    buffer.direction = direction.reverse();
}

/// GDEF classes for fonts without them: nonspacing marks are marks,
/// everything else a base.
fn synthesize_glyph_classes(buffer: &mut Buffer) {
    for info in &mut buffer.info {
        // Default ignorables stay bases, or lookups that skip marks would
        // skip variation selectors and CGJ too.
        let mark = info.general_category() == GeneralCategory::NonspacingMark
            && !info.is_default_ignorable();
        let class = if mark {
            GlyphPropsFlags::MARK
        } else {
            GlyphPropsFlags::BASE_GLYPH
        };
        info.set_glyph_props(class.bits());
    }
}

fn zero_width_default_ignorables(buffer: &mut Buffer) {
    let keeps_ignorables = buffer.flags.intersects(
        BufferFlags::PRESERVE_DEFAULT_IGNORABLES | BufferFlags::REMOVE_DEFAULT_IGNORABLES,
    );
    if keeps_ignorables
        || !buffer
            .scratch_flags
            .contains(BufferScratchFlags::HAS_DEFAULT_IGNORABLES)
    {
        return;
    }

    for (info, pos) in buffer.info.iter().zip(&mut buffer.pos) {
        if info.is_default_ignorable() {
            pos.x_advance = 0;
            pos.y_advance = 0;
            pos.x_offset = 0;
            pos.y_offset = 0;
        }
    }
}

fn zero_mark_widths(buffer: &mut Buffer, shift_offsets: bool) {
    let marks = buffer.info.iter().zip(&mut buffer.pos).filter(|(info, _)| info.is_mark());
    for (_, pos) in marks {
        if shift_offsets {
            pos.x_offset -= pos.x_advance;
            pos.y_offset -= pos.y_advance;
        }
        pos.x_advance = 0;
        pos.y_advance = 0;
    }
}

/// Replaces default ignorables by the invisible glyph, or by a space, or
/// deletes them when there is neither.
fn hide_default_ignorables(buffer: &mut Buffer, face: &Face) {
    if !buffer
        .scratch_flags
        .contains(BufferScratchFlags::HAS_DEFAULT_IGNORABLES)
        || buffer
            .flags
            .contains(BufferFlags::PRESERVE_DEFAULT_IGNORABLES)
    {
        return;
    }

    let replacement = if buffer.flags.contains(BufferFlags::REMOVE_DEFAULT_IGNORABLES) {
        None
    } else {
        buffer
            .invisible
            .or_else(|| face.get_nominal_glyph(u32::from(' ')))
    };

    match replacement {
        Some(glyph) => buffer
            .info
            .iter_mut()
            .filter(|info| info.is_default_ignorable())
            .for_each(|info| info.glyph_id = u32::from(glyph.0)),
        None => buffer.delete_glyphs_inplace(GlyphInfo::is_default_ignorable),
    }
}

/// Spreads unsafe-to-break over every glyph of a cluster that has it on
/// one glyph.
fn propagate_flags(buffer: &mut Buffer) {
    if !buffer
        .scratch_flags
        .contains(BufferScratchFlags::HAS_UNSAFE_TO_BREAK)
    {
        return;
    }

    let mut start = 0;
    while start < buffer.len() {
        let end = buffer.next_cluster(start);
        let cluster = &mut buffer.info[start..end];
        if cluster
            .iter()
            .any(|info| info.mask & glyph_flag::UNSAFE_TO_BREAK != 0)
        {
            cluster
                .iter_mut()
                .for_each(|info| info.mask |= glyph_flag::UNSAFE_TO_BREAK);
        }
        start = end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn buffer_from(text: &str) -> Buffer {
        let mut buffer = Buffer::new();
        for (i, c) in text.chars().enumerate() {
            buffer.add(u32::from(c), i as u32);
        }
        buffer.direction = Direction::LeftToRight;
        buffer
    }

    fn clusters(buffer: &Buffer) -> Vec<u32> {
        buffer.info.iter().map(|i| i.cluster).collect()
    }

    #[test]
    fn zwj_pictographic_is_continuation() {
        let mut buffer = buffer_from("a\u{200D}\u{1F600}b");
        set_unicode_props(&mut buffer);
        assert!(!buffer.info[0].is_continuation());
        assert!(buffer.info[1].is_continuation());
        assert!(buffer.info[2].is_continuation());
        assert!(!buffer.info[3].is_continuation());
    }

    #[test]
    fn graphemes_merge_clusters() {
        let mut buffer = buffer_from("e\u{301}\u{302}x");
        set_unicode_props(&mut buffer);
        form_clusters(&mut buffer);
        assert_eq!(clusters(&buffer), [0, 0, 0, 3]);
    }

    #[test]
    fn character_level_marks_unsafe_instead() {
        let mut buffer = buffer_from("e\u{301}x");
        buffer.cluster_level = BufferClusterLevel::Characters;
        set_unicode_props(&mut buffer);
        form_clusters(&mut buffer);
        assert_eq!(clusters(&buffer), [0, 1, 2]);
        assert!(buffer.info[1].unsafe_to_break());
    }

    #[test]
    fn rtl_latin_is_reversed_by_grapheme() {
        let mut buffer = buffer_from("ab\u{301}");
        buffer.direction = Direction::RightToLeft;
        buffer.script = Some(script::LATIN);
        set_unicode_props(&mut buffer);
        form_clusters(&mut buffer);
        ensure_native_direction(&mut buffer);
        assert_eq!(buffer.direction, Direction::LeftToRight);
        let chars: Vec<u32> = buffer.info.iter().map(|i| i.glyph_id).collect();
        assert_eq!(chars, [u32::from('b'), 0x301, u32::from('a')]);
    }

    #[test]
    fn unsafe_to_break_spreads_over_cluster() {
        let mut buffer = buffer_from("abc");
        for info in &mut buffer.info {
            info.cluster = 0;
        }
        buffer.info[1].mask |= glyph_flag::UNSAFE_TO_BREAK;
        buffer.scratch_flags |= BufferScratchFlags::HAS_UNSAFE_TO_BREAK;
        propagate_flags(&mut buffer);
        assert!(buffer.info.iter().all(|info| info.unsafe_to_break()));
    }

    #[test]
    fn fraction_digits_get_numerator_and_denominator() {
        let mut buffer = buffer_from("x12\u{2044}34 5");
        set_unicode_props(&mut buffer);

        let masks = FractionMasks {
            numr: 1 << 1,
            frac: 1 << 2,
            dnom: 1 << 3,
        };
        mark_fractions(masks, &mut buffer);

        let got: Vec<u32> = buffer.info.iter().map(|i| i.mask & 0b1110).collect();
        assert_eq!(got, [0, 0b0110, 0b0110, 0b0100, 0b1100, 0b1100, 0, 0]);
        assert!(buffer.info[2].unsafe_to_break());
        assert!(!buffer.info[6].unsafe_to_break());
    }

    #[test]
    fn backward_fraction_swaps_the_parts() {
        let mut buffer = buffer_from("1\u{2044}2");
        buffer.direction = Direction::RightToLeft;
        set_unicode_props(&mut buffer);

        let masks = FractionMasks {
            numr: 1 << 1,
            frac: 1 << 2,
            dnom: 1 << 3,
        };
        mark_fractions(masks, &mut buffer);

        let got: Vec<u32> = buffer.info.iter().map(|i| i.mask & 0b1110).collect();
        assert_eq!(got, [0b1100, 0b0100, 0b0110]);
    }
}
