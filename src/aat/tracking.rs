//! `trak` tracking.

#[cfg(not(feature = "std"))]
use core_maths::CoreFloat;

use alloc::vec::Vec;

use ttf_parser::trak;

use crate::buffer::Buffer;
use crate::face::Face;
use crate::plan::ShapePlan;

pub fn apply(plan: &ShapePlan, face: &Face, buffer: &mut Buffer) -> Option<()> {
    let ptem = face.points_per_em?;
    if ptem <= 0.0 {
        return None;
    }

    let table = face.tables().trak?;
    let horizontal = buffer.direction.is_horizontal();
    let data = if horizontal {
        &table.horizontal
    } else {
        &table.vertical
    };

    let tracking = default_tracking(data, ptem)?;
    if tracking == 0 {
        return Some(());
    }

    let offset = tracking / 2;

    // Tracking goes on the first glyph of each grapheme.
    let mut start = 0;
    while start < buffer.len() {
        let end = buffer.next_grapheme(start);
        if buffer.info[start].mask & plan.trak_mask != 0 {
            let pos = &mut buffer.pos[start];
            if horizontal {
                pos.x_advance += tracking;
                pos.x_offset += offset;
            } else {
                pos.y_advance += tracking;
                pos.y_offset += offset;
            }
        }
        start = end;
    }

    Some(())
}

/// The value of the normal track (track value 0) at `ptem`.
fn default_tracking(data: &trak::TrackData, ptem: f32) -> Option<i32> {
    let track = data.tracks.into_iter().find(|t| t.value == 0.0)?;
    let sizes: Vec<f32> = data.sizes.into_iter().map(|s| s.0).collect();
    let values: Vec<i16> = track.values.into_iter().collect();
    interpolate(&sizes, &values, ptem)
}

/// Linear interpolation of per-size values. Sizes past either end
/// extrapolate from the nearest pair.
fn interpolate(sizes: &[f32], values: &[i16], ptem: f32) -> Option<i32> {
    match sizes.len() {
        0 => return None,
        1 => return values.first().map(|&v| i32::from(v)),
        _ => {}
    }

    let mut index = 0;
    while index < sizes.len() - 1 && sizes[index] < ptem {
        index += 1;
    }
    let index = index.saturating_sub(1);

    let s0 = sizes[index];
    let s1 = sizes[index + 1];
    let v0 = f32::from(*values.get(index)?);
    let v1 = f32::from(*values.get(index + 1)?);

    let t = if s0 == s1 { 0.0 } else { (ptem - s0) / (s1 - s0) };
    Some((t * v1 + (1.0 - t) * v0).round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_sizes() {
        let sizes = [9.0, 12.0, 24.0];
        let values = [-10, 0, 20];
        assert_eq!(interpolate(&sizes, &values, 9.0), Some(-10));
        assert_eq!(interpolate(&sizes, &values, 12.0), Some(0));
        assert_eq!(interpolate(&sizes, &values, 24.0), Some(20));
    }

    #[test]
    fn between_and_beyond() {
        let sizes = [12.0, 24.0];
        let values = [0, 20];
        assert_eq!(interpolate(&sizes, &values, 18.0), Some(10));
        assert_eq!(interpolate(&sizes, &values, 36.0), Some(40));
        assert_eq!(interpolate(&sizes, &values, 6.0), Some(-10));
    }

    #[test]
    fn single_size() {
        assert_eq!(interpolate(&[12.0], &[7], 100.0), Some(7));
        assert_eq!(interpolate(&[], &[], 12.0), None);
    }
}
