//! Legacy `kern` table application.

use ttf_parser::GlyphId;

use super::apply::{ApplyContext, LookupSettings};
use super::layout::{lookup_flags, TableIndex};
use super::matching::Skipper;
use super::position::attach_type;
use crate::buffer::{Buffer, BufferScratchFlags};
use crate::face::Face;
use crate::plan::ShapePlan;
use crate::Mask;

/// Applies the pair subtables (formats 0, 2 and 3) of the `kern` table.
///
/// State machine subtables are left to fonts that also ship `kerx`.
pub fn kern(plan: &ShapePlan, face: &Face, buffer: &mut Buffer) {
    let Some(table) = face.tables().kern else {
        return;
    };

    let mut seen_cross_stream = false;
    for subtable in table.subtables {
        if subtable.variable || subtable.has_state_machine {
            continue;
        }

        if buffer.direction.is_horizontal() != subtable.horizontal {
            continue;
        }

        if !plan.requested_kerning {
            continue;
        }

        if !seen_cross_stream && subtable.has_cross_stream {
            seen_cross_stream = true;
            attach_all(buffer);
        }

        let reverse = buffer.direction.is_backward();
        if reverse {
            buffer.reverse();
        }

        apply_pair_kerning(
            face,
            buffer,
            plan.kern_mask,
            subtable.has_cross_stream,
            |left, right| subtable.glyphs_kerning(left, right).map_or(0, i32::from),
        );

        if reverse {
            buffer.reverse();
        }
    }
}

/// Chains every glyph to its logical predecessor so that cross-stream
/// offsets accumulate along the run.
pub(crate) fn attach_all(buffer: &mut Buffer) {
    let chain = if buffer.direction.is_forward() { -1 } else { 1 };
    for pos in &mut buffer.pos {
        pos.set_attach_type(attach_type::CURSIVE);
        pos.set_attach_chain(chain);
    }
}

/// Kerns each pair of non-mark glyphs carrying `kern_mask`.
///
/// The value is split between the two glyphs, or applied as a perpendicular
/// offset to the second glyph for cross-stream subtables.
pub(crate) fn apply_pair_kerning(
    face: &Face,
    buffer: &mut Buffer,
    kern_mask: Mask,
    cross_stream: bool,
    get_kerning: impl Fn(GlyphId, GlyphId) -> i32,
) {
    let mut ctx = ApplyContext::new(TableIndex::GPOS, face, buffer);
    ctx.set_lookup(LookupSettings::unscheduled(
        kern_mask,
        u32::from(lookup_flags::IGNORE_MARKS),
    ));

    let mut i = 0;
    while i < ctx.buffer.len() {
        let next = if ctx.buffer.info[i].mask & kern_mask != 0 {
            Skipper::new(&ctx, i, false).advance()
        } else {
            None
        };

        let Some(j) = next else {
            i += 1;
            continue;
        };

        let kern = get_kerning(ctx.buffer.info[i].as_glyph(), ctx.buffer.info[j].as_glyph());
        if kern != 0 {
            kern_pair(ctx.buffer, i, j, kern, cross_stream);
            ctx.buffer.unsafe_to_break(i, j + 1);
        }

        i = j;
    }
}

fn kern_pair(buffer: &mut Buffer, i: usize, j: usize, kern: i32, cross_stream: bool) {
    let horizontal = buffer.direction.is_horizontal();
    let pos = &mut buffer.pos;

    if cross_stream {
        if horizontal {
            pos[j].y_offset = kern;
        } else {
            pos[j].x_offset = kern;
        }
        buffer.scratch_flags |= BufferScratchFlags::HAS_GPOS_ATTACHMENT;
        return;
    }

    // The first glyph takes the smaller half.
    let first = kern >> 1;
    let second = kern - first;
    let (a, b) = pos.split_at_mut(j);
    let (before, after) = (&mut a[i], &mut b[0]);
    if horizontal {
        before.x_advance += first;
        after.x_advance += second;
        after.x_offset += second;
    } else {
        before.y_advance += first;
        after.y_advance += second;
        after.y_offset += second;
    }
}

pub fn has_kerning(face: &Face) -> bool {
    face.tables().kern.is_some()
}

pub fn has_machine_kerning(face: &Face) -> bool {
    face.tables()
        .kern
        .map_or(false, |kern| kern.subtables.into_iter().any(|s| s.has_state_machine))
}

pub fn has_cross_kerning(face: &Face) -> bool {
    face.tables()
        .kern
        .map_or(false, |kern| kern.subtables.into_iter().any(|s| s.has_cross_stream))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::GlyphPosition;
    use alloc::vec;

    #[test]
    fn odd_kerning_favours_the_second_glyph() {
        let mut buffer = Buffer::new();
        buffer.direction = crate::Direction::LeftToRight;
        buffer.pos = vec![GlyphPosition::default(); 3];

        kern_pair(&mut buffer, 0, 2, -51, false);
        assert_eq!(buffer.pos[0].x_advance, -26);
        assert_eq!(buffer.pos[2].x_advance, -25);
        assert_eq!(buffer.pos[2].x_offset, -25);
        assert_eq!(buffer.pos[1].x_advance, 0);
    }

    #[test]
    fn cross_stream_kerning_offsets_the_second_glyph() {
        let mut buffer = Buffer::new();
        buffer.direction = crate::Direction::LeftToRight;
        buffer.pos = vec![GlyphPosition::default(); 2];

        kern_pair(&mut buffer, 0, 1, 120, true);
        assert_eq!(buffer.pos[1].y_offset, 120);
        assert_eq!(buffer.pos[0].x_advance, 0);
        assert!(buffer
            .scratch_flags
            .contains(BufferScratchFlags::HAS_GPOS_ATTACHMENT));
    }
}
