use core::ops::Range;

use crate::buffer::{Buffer, BufferFlags, BufferScratchFlags, GlyphInfo};
use crate::face::Face;
use crate::plan::ShapePlan;
use crate::ot::normalize::ShapeNormalizeContext;
use crate::unicode::{CharExt, GeneralCategoryExt};
use crate::unicode_norm;

const DOTTED_CIRCLE: u32 = 0x25CC;

/// Puts a dotted circle at the front of every broken syllable, after a
/// leading repha if the script has one.
///
/// The syllable machines set `HAS_BROKEN_SYLLABLE` when they find one.
pub fn insert_dotted_circles(
    face: &Face,
    buffer: &mut Buffer,
    broken_syllable_type: u8,
    dottedcircle_category: u8,
    repha_category: Option<u8>,
    dottedcircle_position: Option<u8>,
) {
    if buffer.flags.contains(BufferFlags::DO_NOT_INSERT_DOTTED_CIRCLE) {
        return;
    }

    if !buffer
        .scratch_flags
        .contains(BufferScratchFlags::HAS_BROKEN_SYLLABLE)
    {
        return;
    }

    let Some(glyph) = face.get_nominal_glyph(DOTTED_CIRCLE) else {
        return;
    };

    // Runs inside a GSUB pause, so the record carries a glyph id already.
    let mut dottedcircle = GlyphInfo {
        glyph_id: u32::from(glyph.0),
        ..GlyphInfo::default()
    };
    dottedcircle.set_complex_category(dottedcircle_category);
    if let Some(position) = dottedcircle_position {
        dottedcircle.set_complex_aux(position);
    }

    buffer.clear_output();
    buffer.idx = 0;

    let mut last_syllable = 0;
    while buffer.idx < buffer.len() {
        let cur = *buffer.cur(0);
        let syllable = cur.syllable();
        if syllable == last_syllable || syllable & 0x0F != broken_syllable_type {
            buffer.next_glyph();
            continue;
        }

        last_syllable = syllable;

        // A leading repha keeps its place in front of the circle.
        let is_repha = |info: &GlyphInfo| Some(info.complex_category()) == repha_category;
        while buffer.idx < buffer.len()
            && buffer.cur(0).syllable() == syllable
            && is_repha(buffer.cur(0))
        {
            buffer.next_glyph();
        }

        let mut circle = dottedcircle;
        circle.cluster = cur.cluster;
        circle.mask = cur.mask;
        circle.set_syllable(syllable);
        buffer.output_info(circle);
    }

    buffer.swap_buffers();
}

/// Calls `f` with the range of every syllable in turn. `f` may reorder
/// glyphs within the range but must not change the buffer's length.
pub fn for_each_syllable(buffer: &mut Buffer, mut f: impl FnMut(&mut Buffer, Range<usize>)) {
    let mut start = 0;
    while start < buffer.len() {
        let end = buffer.next_syllable(start);
        f(buffer, start..end);
        start = end;
    }
}

/// Composition for the syllabic shapers: split matras stay split.
pub fn compose(_: &ShapeNormalizeContext, a: char, b: char) -> Option<char> {
    if a.general_category().is_mark() {
        return None;
    }

    unicode_norm::compose(a, b)
}

/// Forgets the syllables once per-syllable features are done, so that later
/// lookups may match across them.
pub fn clear_syllables(_: &ShapePlan, _: &Face, buffer: &mut Buffer) {
    for info in buffer.info_slice_mut() {
        info.set_syllable(0);
    }
}
