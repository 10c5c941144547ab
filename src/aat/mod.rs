//! Apple Advanced Typography: `morx` substitution, `kerx` kerning and
//! `trak` tracking.

mod extended_kerning;
mod map;
mod metamorphosis;
mod tracking;

pub use map::{Map, MapBuilder};

use ttf_parser::{apple_layout, FromData};

use crate::buffer::Buffer;
use crate::face::Face;
use crate::plan::ShapePlan;

/// Glyph id `morx` ligatures leave behind for consumed components.
pub const DELETED_GLYPH: u32 = 0xFFFF;

const START_STATE: u16 = 0;

/// The class of the current glyph, or end of text past the last one.
fn glyph_class<T: FromData>(machine: &apple_layout::ExtendedStateTable<T>, buffer: &Buffer) -> u16 {
    if buffer.idx < buffer.len() {
        machine
            .class(buffer.cur(0).as_glyph())
            .unwrap_or(u16::from(apple_layout::class::OUT_OF_BOUNDS))
    } else {
        u16::from(apple_layout::class::END_OF_TEXT)
    }
}

pub fn substitute(plan: &ShapePlan, face: &Face, buffer: &mut Buffer) {
    metamorphosis::apply(plan, face, buffer);
}

pub fn position(plan: &ShapePlan, face: &Face, buffer: &mut Buffer) {
    extended_kerning::apply(plan, face, buffer);
}

pub fn track(plan: &ShapePlan, face: &Face, buffer: &mut Buffer) {
    tracking::apply(plan, face, buffer);
}

pub fn zero_width_deleted_glyphs(buffer: &mut Buffer) {
    for (info, pos) in buffer.info.iter().zip(buffer.pos.iter_mut()) {
        if info.glyph_id == DELETED_GLYPH {
            pos.x_advance = 0;
            pos.y_advance = 0;
            pos.x_offset = 0;
            pos.y_offset = 0;
        }
    }
}

pub fn remove_deleted_glyphs(buffer: &mut Buffer) {
    buffer.delete_glyphs_inplace(|info| info.glyph_id == DELETED_GLYPH);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn deleted_glyphs_are_dropped() {
        let mut buffer = Buffer::new();
        buffer.add(1, 0);
        buffer.add(DELETED_GLYPH, 1);
        buffer.add(2, 2);
        for pos in &mut buffer.pos {
            pos.x_advance = 100;
        }

        zero_width_deleted_glyphs(&mut buffer);
        assert_eq!(buffer.pos[1].x_advance, 0);

        remove_deleted_glyphs(&mut buffer);
        let glyphs: Vec<u32> = buffer.info.iter().map(|i| i.glyph_id).collect();
        assert_eq!(glyphs, vec![1, 2]);
        assert_eq!(buffer.pos.len(), 2);
    }
}
