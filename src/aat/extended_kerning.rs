//! `kerx` extended kerning.

use smallvec::SmallVec;
use ttf_parser::{ankr, apple_layout, kerx, FromData};

use super::{glyph_class, START_STATE};
use crate::buffer::{Buffer, BufferScratchFlags};
use crate::face::Face;
use crate::ot::kern::{apply_pair_kerning, attach_all};
use crate::ot::position::attach_type;
use crate::plan::ShapePlan;

/// Whether the subtable is for this buffer's direction, and wanted at all.
fn is_enabled(plan: &ShapePlan, buffer: &Buffer, subtable: &kerx::Subtable) -> bool {
    if subtable.variable || buffer.direction.is_horizontal() != subtable.horizontal {
        return false;
    }

    // Pair kerning is what the `kern` feature turns off.
    let kerns_pairs = matches!(
        subtable.format,
        kerx::Format::Format0(_) | kerx::Format::Format2(_) | kerx::Format::Format6(_)
    );
    plan.requested_kerning || !kerns_pairs
}

pub fn apply(plan: &ShapePlan, face: &Face, buffer: &mut Buffer) -> Option<()> {
    let table = face.tables().kerx?;
    let backward = buffer.direction.is_backward();

    let mut attached_all = false;
    for subtable in table.subtables {
        if !is_enabled(plan, buffer, &subtable) {
            continue;
        }

        if subtable.has_cross_stream && !attached_all {
            // Not flagged as a GPOS attachment until an offset shows up.
            attach_all(buffer);
            attached_all = true;
        }

        if backward {
            buffer.reverse();
        }

        match subtable.format {
            kerx::Format::Format1(ref sub) => {
                let mut driver = ActionDriver {
                    table: sub,
                    marked: SmallVec::new(),
                    cross_stream: subtable.has_cross_stream,
                    tuple_count: subtable.tuple_count,
                    kern_mask: plan.kern_mask,
                };
                drive(&sub.state_table, &mut driver, buffer);
            }
            kerx::Format::Format4(ref sub) => {
                let mut driver = AnchorDriver {
                    table: sub,
                    ankr: face.tables().ankr.clone(),
                    mark: None,
                };
                drive(&sub.state_table, &mut driver, buffer);
            }
            _ => apply_pair_kerning(
                face,
                buffer,
                plan.kern_mask,
                subtable.has_cross_stream,
                |left, right| subtable.glyphs_kerning(left, right).map_or(0, i32::from),
            ),
        }

        if backward {
            buffer.reverse();
        }
    }

    Some(())
}

trait KerningDriver<T: FromData> {
    fn is_actionable(&self, entry: &apple_layout::GenericStateEntry<T>) -> bool;
    fn transition(&mut self, entry: &apple_layout::GenericStateEntry<T>, buffer: &mut Buffer)
        -> Option<()>;
}

/// Marks the spots where breaking would change what the machine does.
fn mark_unsafe_to_break<T: FromData>(
    machine: &apple_layout::ExtendedStateTable<T>,
    driver: &dyn KerningDriver<T>,
    buffer: &mut Buffer,
    state: u16,
    entry: &apple_layout::GenericStateEntry<T>,
) {
    let idx = buffer.idx;
    let len = buffer.len();

    // Restarting in the start state could go differently unless the machine
    // just falls back to it without doing anything.
    let falls_back = entry.new_state == START_STATE && !entry.has_advance();
    if state != START_STATE && idx < len && (driver.is_actionable(entry) || !falls_back) {
        buffer.unsafe_to_break(idx.saturating_sub(1), idx + 1);
    }

    // Text could end right after the next glyph.
    let end_entry = machine.entry(state, u16::from(apple_layout::class::END_OF_TEXT));
    if idx + 2 <= len && end_entry.is_some_and(|end| driver.is_actionable(&end)) {
        buffer.unsafe_to_break(idx, idx + 2);
    }
}

fn drive<T: FromData>(
    machine: &apple_layout::ExtendedStateTable<T>,
    driver: &mut dyn KerningDriver<T>,
    buffer: &mut Buffer,
) {
    let mut state = START_STATE;
    buffer.idx = 0;

    while let Some(entry) = machine.entry(state, glyph_class(machine, buffer)) {
        mark_unsafe_to_break(machine, &*driver, buffer, state, &entry);

        // A failed action leaves the glyphs as they are.
        let _ = driver.transition(&entry, buffer);
        state = entry.new_state;

        if buffer.idx >= buffer.len() {
            break;
        }

        if entry.has_advance() || buffer.max_ops <= 0 {
            buffer.next_glyph();
        }
        buffer.max_ops -= 1;
    }
}

/// Adds one kerning value to the glyph at `idx`.
///
/// Cross-stream values move attached glyphs perpendicular to the line, and
/// -0x8000 detaches the glyph again.
fn add_kerning(buffer: &mut Buffer, idx: usize, value: i32, cross_stream: bool, kern_mask: u32) {
    let horizontal = buffer.direction.is_horizontal();
    let kerned = buffer.info[idx].mask & kern_mask != 0;
    let pos = &mut buffer.pos[idx];

    if !cross_stream {
        if !kerned {
            return;
        }

        if horizontal {
            pos.x_advance += value;
            pos.x_offset += value;
        } else if pos.y_offset == 0 {
            pos.y_advance += value;
            pos.y_offset += value;
        }
        return;
    }

    let attached = pos.attach_type() != 0;
    let offset = if horizontal { &mut pos.y_offset } else { &mut pos.x_offset };
    if value == -0x8000 {
        *offset = 0;
        pos.set_attach_type(0);
        pos.set_attach_chain(0);
    } else if attached {
        *offset += value;
        buffer.scratch_flags |= BufferScratchFlags::HAS_GPOS_ATTACHMENT;
    }
}

/// Format 1: kerning values popped from a stack of marked glyphs.
struct ActionDriver<'a> {
    table: &'a kerx::Subtable1<'a>,
    marked: SmallVec<[usize; MAX_MARKED]>,
    cross_stream: bool,
    tuple_count: u32,
    kern_mask: u32,
}

const MAX_MARKED: usize = 8;

impl KerningDriver<kerx::EntryData> for ActionDriver<'_> {
    fn is_actionable(&self, entry: &apple_layout::GenericStateEntry<kerx::EntryData>) -> bool {
        entry.extra.action_index != 0xFFFF
    }

    fn transition(
        &mut self,
        entry: &apple_layout::GenericStateEntry<kerx::EntryData>,
        buffer: &mut Buffer,
    ) -> Option<()> {
        if entry.has_reset() {
            self.marked.clear();
        }

        if entry.has_push() {
            // Overflowing the stack empties it.
            if self.marked.len() == MAX_MARKED {
                self.marked.clear();
            } else {
                self.marked.push(buffer.idx);
            }
        }

        if !self.is_actionable(entry) {
            return Some(());
        }

        let stride = u16::try_from(self.tuple_count.max(1)).ok()?;
        let mut action_index = entry.extra.action_index;

        // Each value pops one glyph. An odd value ends the list.
        while let Some(idx) = self.marked.pop() {
            let value = i32::from(self.table.glyphs_kerning(action_index)?);
            action_index = action_index.checked_add(stride)?;
            if idx >= buffer.len() {
                continue;
            }

            add_kerning(buffer, idx, value & !1, self.cross_stream, self.kern_mask);
            if value & 1 != 0 {
                break;
            }
        }

        Some(())
    }
}

/// Format 4: attaches glyphs to the marked glyph through `ankr` points.
struct AnchorDriver<'a> {
    table: &'a kerx::Subtable4<'a>,
    ankr: Option<ankr::Table<'a>>,
    mark: Option<usize>,
}

impl KerningDriver<kerx::EntryData> for AnchorDriver<'_> {
    fn is_actionable(&self, entry: &apple_layout::GenericStateEntry<kerx::EntryData>) -> bool {
        entry.extra.action_index != 0xFFFF
    }

    fn transition(
        &mut self,
        entry: &apple_layout::GenericStateEntry<kerx::EntryData>,
        buffer: &mut Buffer,
    ) -> Option<()> {
        if let Some(mark) = self.mark.filter(|_| self.is_actionable(entry)) {
            if buffer.idx < buffer.len() {
                self.attach(entry.extra.action_index, mark, buffer)?;
            }
        }

        if entry.has_mark() {
            self.mark = Some(buffer.idx);
        }

        Some(())
    }
}

impl AnchorDriver<'_> {
    /// Attaches the current glyph to `mark`, lining up the anchor points
    /// the action names.
    fn attach(&self, action_index: u16, mark: usize, buffer: &mut Buffer) -> Option<()> {
        if let Some(ankr) = &self.ankr {
            let (mark_point, cur_point) = self.table.anchor_points.get(action_index)?;
            let anchor = |glyph, point: u16| {
                ankr.points(glyph)
                    .and_then(|points| points.get(u32::from(point)))
                    .map_or((0, 0), |p| (i32::from(p.x), i32::from(p.y)))
            };

            let (mark_x, mark_y) = anchor(buffer.info[mark].as_glyph(), mark_point);
            let (cur_x, cur_y) = anchor(buffer.cur(0).as_glyph(), cur_point);
            let pos = buffer.cur_pos_mut();
            pos.x_offset = mark_x - cur_x;
            pos.y_offset = mark_y - cur_y;
        }

        let chain = mark as i16 - buffer.idx as i16;
        let pos = buffer.cur_pos_mut();
        pos.set_attach_type(attach_type::MARK);
        pos.set_attach_chain(chain);
        buffer.scratch_flags |= BufferScratchFlags::HAS_GPOS_ATTACHMENT;
        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction;

    fn buffer(direction: Direction) -> Buffer {
        let mut buffer = Buffer::new();
        buffer.direction = direction;
        buffer.add(1, 0);
        buffer.add(2, 1);
        buffer.info[1].mask = 0x2;
        buffer
    }

    #[test]
    fn kerning_needs_the_kern_mask() {
        let mut buffer = buffer(Direction::LeftToRight);
        add_kerning(&mut buffer, 0, -40, false, 0x2);
        add_kerning(&mut buffer, 1, -40, false, 0x2);
        assert_eq!(buffer.pos[0].x_advance, 0);
        assert_eq!(buffer.pos[1].x_advance, -40);
        assert_eq!(buffer.pos[1].x_offset, -40);
    }

    #[test]
    fn vertical_kerning_skips_offset_glyphs() {
        let mut buffer = buffer(Direction::TopToBottom);
        buffer.pos[1].y_offset = 10;
        add_kerning(&mut buffer, 1, 30, false, 0x2);
        assert_eq!(buffer.pos[1].y_advance, 0);
    }

    #[test]
    fn cross_stream_kerning_moves_attached_glyphs() {
        let mut buffer = buffer(Direction::LeftToRight);
        add_kerning(&mut buffer, 1, 50, true, 0x2);
        assert_eq!(buffer.pos[1].y_offset, 0);

        attach_all(&mut buffer);
        add_kerning(&mut buffer, 1, 50, true, 0x2);
        assert_eq!(buffer.pos[1].y_offset, 50);
        assert!(buffer
            .scratch_flags
            .contains(BufferScratchFlags::HAS_GPOS_ATTACHMENT));

        add_kerning(&mut buffer, 1, -0x8000, true, 0x2);
        assert_eq!(buffer.pos[1].y_offset, 0);
        assert_eq!(buffer.pos[1].attach_type(), 0);
    }
}
