//! Comparing two shaping results.

use crate::buffer::{glyph_flag, GlyphBuffer, GlyphInfo, GlyphPosition};

bitflags::bitflags! {
    /// Kinds of differences found by [`diff`].
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DiffFlags: u16 {
        /// The buffers hold a different number of glyphs.
        const LENGTH_MISMATCH      = 0x0001;
        /// The compared buffer contains `.notdef` glyphs.
        const NOTDEF_PRESENT       = 0x0002;
        /// Some glyph ids differ.
        const GLYPH_MISMATCH       = 0x0004;
        /// Some clusters differ.
        const CLUSTER_MISMATCH     = 0x0008;
        /// Some glyph flags differ.
        const GLYPH_FLAGS_MISMATCH = 0x0010;
        /// Some advances or offsets differ.
        const POSITION_MISMATCH    = 0x0020;
    }
}

/// The first glyph that differs between two buffers.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Mismatch {
    /// Index of the glyph in both buffers.
    pub index: usize,
    /// Glyph id in the reference buffer.
    pub expected: u32,
    /// Glyph id in the compared buffer.
    pub actual: u32,
}

/// A report produced by [`diff`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct BufferDiff {
    /// Everything that differs.
    pub flags: DiffFlags,
    /// The first differing glyph, if any of the compared glyphs differ.
    pub first_mismatch: Option<Mismatch>,
}

impl BufferDiff {
    /// Checks that nothing but `.notdef` presence was reported.
    pub fn is_match(&self) -> bool {
        (self.flags - DiffFlags::NOTDEF_PRESENT).is_empty()
    }
}

/// Compares a shaping result against a reference.
///
/// Glyphs are compared pairwise up to the shorter length. Positions are
/// compared only when both buffers have them.
pub fn diff(reference: &GlyphBuffer, other: &GlyphBuffer) -> BufferDiff {
    let mut report = BufferDiff::default();

    let ref_infos = reference.glyph_infos();
    let infos = other.glyph_infos();

    if ref_infos.len() != infos.len() {
        report.flags |= DiffFlags::LENGTH_MISMATCH;
    }

    if infos.iter().any(|info| info.glyph_id == 0) {
        report.flags |= DiffFlags::NOTDEF_PRESENT;
    }

    for (index, (a, b)) in ref_infos.iter().zip(infos).enumerate() {
        let flags = compare_infos(a, b);
        if !flags.is_empty() {
            report.flags |= flags;
            report.first_mismatch.get_or_insert(Mismatch {
                index,
                expected: a.glyph_id,
                actual: b.glyph_id,
            });
        }
    }

    if reference.0.have_positions && other.0.have_positions {
        let ref_positions = reference.glyph_positions();
        let positions = other.glyph_positions();
        for (index, (a, b)) in ref_positions.iter().zip(positions).enumerate() {
            if !same_position(a, b) {
                report.flags |= DiffFlags::POSITION_MISMATCH;
                report.first_mismatch.get_or_insert(Mismatch {
                    index,
                    expected: ref_infos[index].glyph_id,
                    actual: infos[index].glyph_id,
                });
                break;
            }
        }
    }

    report
}

fn compare_infos(a: &GlyphInfo, b: &GlyphInfo) -> DiffFlags {
    let mut flags = DiffFlags::empty();
    if a.glyph_id != b.glyph_id {
        flags |= DiffFlags::GLYPH_MISMATCH;
    }
    if a.cluster != b.cluster {
        flags |= DiffFlags::CLUSTER_MISMATCH;
    }
    if (a.mask ^ b.mask) & glyph_flag::DEFINED != 0 {
        flags |= DiffFlags::GLYPH_FLAGS_MISMATCH;
    }
    flags
}

fn same_position(a: &GlyphPosition, b: &GlyphPosition) -> bool {
    a.x_advance == b.x_advance
        && a.y_advance == b.y_advance
        && a.x_offset == b.x_offset
        && a.y_offset == b.y_offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;

    fn glyphs(ids: &[(u32, u32)]) -> GlyphBuffer {
        let mut buffer = Buffer::new();
        for &(glyph, cluster) in ids {
            buffer.add(glyph, cluster);
        }
        buffer.clear_positions();
        for (i, pos) in buffer.pos.iter_mut().enumerate() {
            pos.x_advance = 100 * (i as i32 + 1);
        }
        GlyphBuffer(buffer)
    }

    #[test]
    fn identical() {
        let a = glyphs(&[(3, 0), (4, 1)]);
        let b = glyphs(&[(3, 0), (4, 1)]);
        let report = diff(&a, &b);
        assert!(report.is_match());
        assert_eq!(report.first_mismatch, None);
    }

    #[test]
    fn glyph_and_cluster() {
        let a = glyphs(&[(3, 0), (4, 1), (5, 2)]);
        let b = glyphs(&[(3, 0), (6, 1), (5, 1)]);
        let report = diff(&a, &b);
        assert!(report.flags.contains(DiffFlags::GLYPH_MISMATCH));
        assert!(report.flags.contains(DiffFlags::CLUSTER_MISMATCH));
        assert_eq!(
            report.first_mismatch,
            Some(Mismatch {
                index: 1,
                expected: 4,
                actual: 6
            })
        );
    }

    #[test]
    fn length_and_notdef() {
        let a = glyphs(&[(3, 0), (4, 1)]);
        let b = glyphs(&[(3, 0), (4, 1), (0, 2)]);
        let report = diff(&a, &b);
        assert!(report.flags.contains(DiffFlags::LENGTH_MISMATCH));
        assert!(report.flags.contains(DiffFlags::NOTDEF_PRESENT));
        assert!(!report.is_match());
    }

    #[test]
    fn positions() {
        let a = glyphs(&[(3, 0), (4, 1)]);
        let mut b = glyphs(&[(3, 0), (4, 1)]);
        b.0.pos[1].y_offset = 50;
        let report = diff(&a, &b);
        assert_eq!(report.flags, DiffFlags::POSITION_MISMATCH);
        assert_eq!(report.first_mismatch.map(|m| m.index), Some(1));
    }
}
