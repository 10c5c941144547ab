//! GPOS application and attachment resolution.

use core_maths::CoreFloat;
use smallvec::SmallVec;
use ttf_parser::gpos::*;
use ttf_parser::opentype_layout::Coverage;

use super::apply::{Apply, ApplyContext, BaseCache};
use super::layout::{apply_layout_table, lookup_flags, Subtable, TableIndex};
use super::matching::{Skipper, Verdict};
use crate::buffer::{Buffer, BufferScratchFlags, GlyphInfo, GlyphPosition};
use crate::face::Face;
use crate::plan::ShapePlan;
use crate::Direction;

pub fn position(plan: &ShapePlan, face: &Face, buffer: &mut Buffer) {
    apply_layout_table(plan, face, buffer, face.gpos.as_ref());
}

/// How a glyph hangs off the glyph its attach chain points at.
pub mod attach_type {
    pub const MARK: u8 = 1;
    pub const CURSIVE: u8 = 2;
}

impl<'a> Subtable<'a> for PositioningSubtable<'a> {
    const TABLE: TableIndex = TableIndex::GPOS;

    fn first_coverage(&self) -> Coverage<'a> {
        self.coverage()
    }
}

impl Apply for PositioningSubtable<'_> {
    fn apply(&self, ctx: &mut ApplyContext) -> Option<()> {
        match self {
            Self::Single(t) => t.apply(ctx),
            Self::Pair(t) => t.apply(ctx),
            Self::Cursive(t) => t.apply(ctx),
            Self::MarkToBase(t) => t.apply(ctx),
            Self::MarkToLigature(t) => t.apply(ctx),
            Self::MarkToMark(t) => t.apply(ctx),
            Self::Context(t) => t.apply(ctx),
            Self::ChainContext(t) => t.apply(ctx),
        }
    }
}

#[derive(Clone, Copy)]
enum Axis {
    X,
    Y,
}

/// Whether device tables apply on the x and y axes: a ppem is set or the
/// face is varied.
fn device_axes(face: &Face) -> (bool, bool) {
    let (ppem_x, ppem_y) = face.pixels_per_em().unwrap_or((0, 0));
    let varied = face.coords().next().is_some();
    (ppem_x != 0 || varied, ppem_y != 0 || varied)
}

fn device_delta(face: &Face, device: &Device, axis: Axis) -> i32 {
    let delta = match device {
        Device::Hinting(hinting) => match axis {
            Axis::X => hinting.x_delta(face.units_per_em, face.pixels_per_em()),
            Axis::Y => hinting.y_delta(face.units_per_em, face.pixels_per_em()),
        },
        Device::Variation(variation) => variation_delta(face, variation),
    };

    delta.unwrap_or(0)
}

fn variation_delta(face: &Face, variation: &VariationDevice) -> Option<i32> {
    let delta = face
        .tables()
        .gdef?
        .glyph_variation_delta(
            variation.outer_index,
            variation.inner_index,
            face.variation_coordinates(),
        )?
        .round();

    (delta >= i32::MIN as f32 && delta < i32::MAX as f32).then_some(delta as i32)
}

fn anchor_point(face: &Face, anchor: &Anchor) -> (i32, i32) {
    let (use_x, use_y) = device_axes(face);
    let mut x = i32::from(anchor.x);
    let mut y = i32::from(anchor.y);

    if let Some(device) = anchor.x_device.filter(|_| use_x) {
        x += device_delta(face, &device, Axis::X);
    }

    if let Some(device) = anchor.y_device.filter(|_| use_y) {
        y += device_delta(face, &device, Axis::Y);
    }

    (x, y)
}

fn is_noop(record: &ValueRecord) -> bool {
    record.x_placement == 0
        && record.y_placement == 0
        && record.x_advance == 0
        && record.y_advance == 0
        && record.x_placement_device.is_none()
        && record.y_placement_device.is_none()
        && record.x_advance_device.is_none()
        && record.y_advance_device.is_none()
}

/// Adds `record` to the position of glyph `idx`. Only the advance along the
/// run's direction is touched. Returns whether anything was added.
fn apply_value(ctx: &mut ApplyContext, record: &ValueRecord, idx: usize) -> bool {
    let face = ctx.face;
    let horizontal = ctx.buffer.direction.is_horizontal();
    let (use_x, use_y) = device_axes(face);
    let pos = &mut ctx.buffer.pos[idx];
    let mut changed = false;

    let mut add = |target: &mut i32, delta: i32| {
        *target += delta;
        changed = true;
    };

    if record.x_placement != 0 {
        add(&mut pos.x_offset, i32::from(record.x_placement));
    }
    if record.y_placement != 0 {
        add(&mut pos.y_offset, i32::from(record.y_placement));
    }
    if horizontal && record.x_advance != 0 {
        add(&mut pos.x_advance, i32::from(record.x_advance));
    }
    // Font space grows upward, vertical advances downward.
    if !horizontal && record.y_advance != 0 {
        add(&mut pos.y_advance, -i32::from(record.y_advance));
    }

    if use_x {
        if let Some(device) = record.x_placement_device {
            add(&mut pos.x_offset, device_delta(face, &device, Axis::X));
        }
        if let Some(device) = record.x_advance_device.filter(|_| horizontal) {
            add(&mut pos.x_advance, device_delta(face, &device, Axis::X));
        }
    }

    if use_y {
        if let Some(device) = record.y_placement_device {
            add(&mut pos.y_offset, device_delta(face, &device, Axis::Y));
        }
        if let Some(device) = record.y_advance_device.filter(|_| !horizontal) {
            add(&mut pos.y_advance, -device_delta(face, &device, Axis::Y));
        }
    }

    changed
}

impl Apply for SingleAdjustment<'_> {
    fn apply(&self, ctx: &mut ApplyContext) -> Option<()> {
        let glyph = ctx.buffer.cur(0).as_glyph();
        let record = match *self {
            Self::Format1 { coverage, value } => coverage.get(glyph).map(|_| value),
            Self::Format2 { coverage, values } => coverage.get(glyph).and_then(|i| values.get(i)),
        }?;

        let idx = ctx.buffer.idx;
        apply_value(ctx, &record, idx);
        ctx.buffer.idx += 1;
        Some(())
    }
}

impl Apply for PairAdjustment<'_> {
    fn apply(&self, ctx: &mut ApplyContext) -> Option<()> {
        let first = ctx.buffer.cur(0).as_glyph();
        let first_index = self.coverage().get(first)?;

        let second_idx = Skipper::new(ctx, ctx.buffer.idx, false).advance()?;
        let second = ctx.buffer.info[second_idx].as_glyph();

        let (record1, record2) = match self {
            Self::Format1 { sets, .. } => sets.get(first_index)?.get(second)?,
            Self::Format2 {
                classes, matrix, ..
            } => matrix.get((classes.0.get(first), classes.1.get(second)))?,
        };

        let idx = ctx.buffer.idx;
        let changed = apply_value(ctx, &record1, idx) | apply_value(ctx, &record2, second_idx);
        if changed {
            ctx.buffer.unsafe_to_break(idx, second_idx + 1);
        }

        // Unless it was adjusted too, the second glyph may start a pair of
        // its own.
        ctx.buffer.idx = if is_noop(&record2) {
            second_idx
        } else {
            second_idx + 1
        };

        Some(())
    }
}

impl Apply for CursiveAdjustment<'_> {
    fn apply(&self, ctx: &mut ApplyContext) -> Option<()> {
        let this_index = self.coverage.get(ctx.buffer.cur(0).as_glyph())?;
        let entry = self.sets.entry(this_index)?;

        let prev_idx = Skipper::new(ctx, ctx.buffer.idx, false).retreat()?;
        let prev_index = self.coverage.get(ctx.buffer.info[prev_idx].as_glyph())?;
        let exit = self.sets.exit(prev_index)?;

        let exit = anchor_point(ctx.face, &exit);
        let entry = anchor_point(ctx.face, &entry);

        let (i, j) = (prev_idx, ctx.buffer.idx);
        let direction = ctx.buffer.direction;
        let right_to_left = ctx.right_to_left();
        ctx.buffer.unsafe_to_break(i, j + 1);

        let pos = &mut ctx.buffer.pos;
        if direction != Direction::Invalid {
            join_advances(pos, direction, i, j, exit, entry);
        }

        // On the cross axis the child is moved onto its parent. Which glyph
        // is the child depends on the lookup's flag, not the run direction.
        let (child, parent, shift) = if right_to_left {
            (i, j, (entry.0 - exit.0, entry.1 - exit.1))
        } else {
            (j, i, (exit.0 - entry.0, exit.1 - entry.1))
        };

        reverse_cursive_chain(pos, child, direction, parent);

        pos[child].set_attach_type(attach_type::CURSIVE);
        pos[child].set_attach_chain((parent as isize - child as isize) as i16);
        if direction.is_horizontal() {
            pos[child].y_offset = shift.1;
        } else {
            pos[child].x_offset = shift.0;
        }

        // A parent attached to its own child is let go.
        if pos[parent].attach_chain() == -pos[child].attach_chain() {
            pos[parent].set_attach_chain(0);
        }

        ctx.buffer.scratch_flags |= BufferScratchFlags::HAS_GPOS_ATTACHMENT;
        ctx.buffer.idx += 1;
        Some(())
    }
}

/// Moves the exit point of glyph `i` onto the entry point of glyph `j`
/// along the run's direction.
fn join_advances(
    pos: &mut [GlyphPosition],
    direction: Direction,
    i: usize,
    j: usize,
    exit: (i32, i32),
    entry: (i32, i32),
) {
    let vertical = direction.is_vertical();
    let (exit, entry) = if vertical {
        (exit.1, entry.1)
    } else {
        (exit.0, entry.0)
    };

    let axis = |p: &GlyphPosition| {
        if vertical {
            [p.y_advance, p.y_offset]
        } else {
            [p.x_advance, p.x_offset]
        }
    };

    let [mut advance_i, mut offset_i] = axis(&pos[i]);
    let [mut advance_j, mut offset_j] = axis(&pos[j]);

    if direction.is_forward() {
        advance_i = exit + offset_i;
        let d = entry + offset_j;
        advance_j -= d;
        offset_j -= d;
    } else {
        let d = exit + offset_i;
        advance_i -= d;
        offset_i -= d;
        // Bottom-to-top leaves the entry glyph's own offset out.
        advance_j = if vertical { entry } else { entry + offset_j };
    }

    let store = |p: &mut GlyphPosition, advance: i32, offset: i32| {
        if vertical {
            p.y_advance = advance;
            p.y_offset = offset;
        } else {
            p.x_advance = advance;
            p.x_offset = offset;
        }
    };

    store(&mut pos[i], advance_i, offset_i);
    store(&mut pos[j], advance_j, offset_j);
}

/// Turns the cursive chain hanging off `start` around so that it hangs off
/// `new_parent` instead, flipping the cross-axis offsets on the way.
fn reverse_cursive_chain(
    pos: &mut [GlyphPosition],
    start: usize,
    direction: Direction,
    new_parent: usize,
) {
    let mut links: SmallVec<[(usize, usize, i16, u8); 8]> = SmallVec::new();

    let mut i = start;
    loop {
        let chain = pos[i].attach_chain();
        let kind = pos[i].attach_type();
        if chain == 0 || kind & attach_type::CURSIVE == 0 {
            break;
        }

        pos[i].set_attach_chain(0);
        let Some(j) = i.checked_add_signed(isize::from(chain)) else {
            break;
        };
        if j == new_parent || j >= pos.len() {
            break;
        }

        links.push((i, j, chain, kind));
        i = j;
    }

    // Each link reads the old offset of the glyph below it, so the far end
    // goes first.
    for &(i, j, chain, kind) in links.iter().rev() {
        if direction.is_horizontal() {
            pos[j].y_offset = -pos[i].y_offset;
        } else {
            pos[j].x_offset = -pos[i].x_offset;
        }

        pos[j].set_attach_chain(-chain);
        pos[j].set_attach_type(kind);
    }
}

/// Places the cursor mark on anchor `row` of the glyph at `target_idx`.
/// Returns `None` when there is no anchor for the mark's class, which leaves
/// the mark to later subtables.
fn attach_mark(
    ctx: &mut ApplyContext,
    marks: MarkArray,
    mark_index: u16,
    anchors: AnchorMatrix,
    row: u16,
    target_idx: usize,
) -> Option<()> {
    let (class, mark_anchor) = marks.get(mark_index)?;
    let target_anchor = anchors.get(row, class)?;

    let (mark_x, mark_y) = anchor_point(ctx.face, &mark_anchor);
    let (target_x, target_y) = anchor_point(ctx.face, &target_anchor);

    let idx = ctx.buffer.idx;
    ctx.buffer.unsafe_to_break(target_idx, idx + 1);

    let pos = ctx.buffer.cur_pos_mut();
    pos.x_offset = target_x - mark_x;
    pos.y_offset = target_y - mark_y;
    pos.set_attach_type(attach_type::MARK);
    pos.set_attach_chain((target_idx as isize - idx as isize) as i16);

    ctx.buffer.scratch_flags |= BufferScratchFlags::HAS_GPOS_ATTACHMENT;
    ctx.buffer.idx += 1;
    Some(())
}

impl Apply for MarkToBaseAdjustment<'_> {
    fn apply(&self, ctx: &mut ApplyContext) -> Option<()> {
        let mark_index = self.mark_coverage.get(ctx.buffer.cur(0).as_glyph())?;
        let base_idx = find_mark_base(ctx)?;

        // The GDEF class of the base is not checked: real fonts get it wrong.
        let base_index = self.base_coverage.get(ctx.buffer.info[base_idx].as_glyph())?;
        attach_mark(ctx, self.marks, mark_index, self.anchors, base_index, base_idx)
    }
}

/// Finds the glyph the cursor mark sits on. The search resumes where the
/// previous mark of the same lookup stopped, which keeps runs of marks
/// linear.
fn find_mark_base(ctx: &mut ApplyContext) -> Option<usize> {
    let idx = ctx.buffer.idx;
    if ctx.base_cache.until > idx {
        ctx.base_cache = BaseCache::default();
    }

    let found = {
        let skipper =
            Skipper::new(ctx, 0, false).with_props(u32::from(lookup_flags::IGNORE_MARKS));
        let info = &ctx.buffer.info;
        (ctx.base_cache.until..idx)
            .rev()
            .find(|&j| skipper.classify(&info[j]) == Verdict::Match && takes_marks(info, j))
    };

    let base = found.or(ctx.base_cache.base);
    ctx.base_cache = BaseCache { base, until: idx };
    base
}

/// Of the glyphs a multiple substitution produced, only the first takes
/// marks, unless a mark already sits inside the sequence.
fn takes_marks(info: &[GlyphInfo], idx: usize) -> bool {
    let this = &info[idx];
    if idx == 0 || !this.is_multiplied() || this.lig_comp() == 0 {
        return true;
    }

    let prev = &info[idx - 1];
    prev.is_mark()
        || !prev.is_multiplied()
        || this.lig_id() != prev.lig_id()
        || this.lig_comp() != prev.lig_comp() + 1
}

impl Apply for MarkToLigatureAdjustment<'_> {
    fn apply(&self, ctx: &mut ApplyContext) -> Option<()> {
        let mark_index = self.mark_coverage.get(ctx.buffer.cur(0).as_glyph())?;

        let lig_idx = Skipper::new(ctx, ctx.buffer.idx, false)
            .with_props(u32::from(lookup_flags::IGNORE_MARKS))
            .retreat()?;

        let lig_index = self.ligature_coverage.get(ctx.buffer.info[lig_idx].as_glyph())?;
        let components = self.ligature_array.get(lig_index)?;
        if components.rows == 0 {
            return None;
        }

        // A mark that came out of this very ligature goes back on its own
        // component, anything else on the last one.
        let ligature = ctx.buffer.info[lig_idx];
        let mark = *ctx.buffer.cur(0);
        let own = ligature.lig_id() != 0
            && ligature.lig_id() == mark.lig_id()
            && mark.lig_comp() > 0;
        let component = if own {
            u16::from(mark.lig_comp()).min(components.rows)
        } else {
            components.rows
        };

        attach_mark(ctx, self.marks, mark_index, components, component - 1, lig_idx)
    }
}

impl Apply for MarkToMarkAdjustment<'_> {
    fn apply(&self, ctx: &mut ApplyContext) -> Option<()> {
        let mark1_index = self.mark1_coverage.get(ctx.buffer.cur(0).as_glyph())?;

        // Only marks are looked through, whatever the lookup's flags say.
        let props = ctx.lookup.props & !u32::from(lookup_flags::IGNORE_FLAGS);
        let prev_idx = Skipper::new(ctx, ctx.buffer.idx, false)
            .with_props(props)
            .retreat()?;

        let prev = ctx.buffer.info[prev_idx];
        if !prev.is_mark() || !marks_combine(ctx.buffer.cur(0), &prev) {
            return None;
        }

        let mark2_index = self.mark2_coverage.get(prev.as_glyph())?;
        attach_mark(ctx, self.marks, mark1_index, self.mark2_matrix, mark2_index, prev_idx)
    }
}

/// Whether mark `a` may stack on mark `b`.
fn marks_combine(a: &GlyphInfo, b: &GlyphInfo) -> bool {
    let (id_a, comp_a) = (a.lig_id(), a.lig_comp());
    let (id_b, comp_b) = (b.lig_id(), b.lig_comp());

    if id_a == id_b {
        // Same base, or the same component of one ligature.
        id_a == 0 || comp_a == comp_b
    } else {
        // One of the two is itself a ligature of marks.
        (id_a > 0 && comp_a == 0) || (id_b > 0 && comp_b == 0)
    }
}

/// Clears attachment state before GPOS runs.
pub fn position_start(buffer: &mut Buffer) {
    for pos in &mut buffer.pos {
        pos.set_attach_chain(0);
        pos.set_attach_type(0);
    }
}

/// Resolves attachment chains into absolute offsets.
pub fn position_finish_offsets(buffer: &mut Buffer) {
    if !buffer
        .scratch_flags
        .contains(BufferScratchFlags::HAS_GPOS_ATTACHMENT)
    {
        return;
    }

    let direction = buffer.direction;
    for i in 0..buffer.len() {
        resolve_attachment(&mut buffer.pos, i, direction);
    }
}

/// Folds the offsets of everything glyph `i` hangs off into its own.
fn resolve_attachment(pos: &mut [GlyphPosition], i: usize, direction: Direction) {
    let chain = pos[i].attach_chain();
    if chain == 0 {
        return;
    }

    let kind = pos[i].attach_type();
    pos[i].set_attach_chain(0);

    let Some(j) = i
        .checked_add_signed(isize::from(chain))
        .filter(|&j| j < pos.len())
    else {
        return;
    };

    resolve_attachment(pos, j, direction);
    let parent = pos[j];

    match kind {
        attach_type::MARK => {
            // A mark is drawn from the pen position after its target, so
            // the advances in between are taken back out.
            let between = if direction.is_forward() {
                j..i
            } else {
                j + 1..i + 1
            };
            let (dx, dy) = between.fold((0, 0), |(x, y), k| {
                (x + pos[k].x_advance, y + pos[k].y_advance)
            });

            let sign = if direction.is_forward() { -1 } else { 1 };
            pos[i].x_offset += parent.x_offset + sign * dx;
            pos[i].y_offset += parent.y_offset + sign * dy;
        }
        attach_type::CURSIVE => {
            if direction.is_horizontal() {
                pos[i].y_offset += parent.y_offset;
            } else {
                pos[i].x_offset += parent.x_offset;
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn advances(xs: &[i32]) -> alloc::vec::Vec<GlyphPosition> {
        xs.iter()
            .map(|&x_advance| GlyphPosition {
                x_advance,
                ..GlyphPosition::default()
            })
            .collect()
    }

    #[test]
    fn mark_offset_takes_back_the_base_advance() {
        let mut pos = advances(&[500, 0]);
        pos[0].x_offset = 10;
        pos[1].x_offset = 100;
        pos[1].set_attach_type(attach_type::MARK);
        pos[1].set_attach_chain(-1);

        resolve_attachment(&mut pos, 1, Direction::LeftToRight);
        assert_eq!(pos[1].x_offset, 100 + 10 - 500);
        assert_eq!(pos[1].attach_chain(), 0);
    }

    #[test]
    fn mark_offset_right_to_left_counts_its_own_advance() {
        let mut pos = advances(&[500, 30]);
        pos[1].set_attach_type(attach_type::MARK);
        pos[1].set_attach_chain(-1);

        resolve_attachment(&mut pos, 1, Direction::RightToLeft);
        assert_eq!(pos[1].x_offset, 30);
    }

    #[test]
    fn stacked_marks_resolve_through_the_chain() {
        let mut pos = advances(&[400, 0, 0]);
        pos[1].y_offset = 200;
        pos[1].set_attach_type(attach_type::MARK);
        pos[1].set_attach_chain(-1);
        pos[2].y_offset = 50;
        pos[2].set_attach_type(attach_type::MARK);
        pos[2].set_attach_chain(-1);

        resolve_attachment(&mut pos, 2, Direction::LeftToRight);
        assert_eq!(pos[2].y_offset, 250);
        assert_eq!(pos[2].x_offset, -400);
    }

    #[test]
    fn out_of_range_chain_is_dropped() {
        let mut pos = advances(&[100]);
        pos[0].x_offset = 7;
        pos[0].set_attach_type(attach_type::MARK);
        pos[0].set_attach_chain(-3);

        resolve_attachment(&mut pos, 0, Direction::LeftToRight);
        assert_eq!(pos[0].x_offset, 7);
        assert_eq!(pos[0].attach_chain(), 0);
    }

    #[test]
    fn cursive_chain_is_turned_around() {
        // 2 hangs off 1, 1 off 0. Glyph 2 is about to hang off 3.
        let mut pos = vec![GlyphPosition::default(); 4];
        for (i, y) in [(1, 10), (2, 20)] {
            pos[i].y_offset = y;
            pos[i].set_attach_type(attach_type::CURSIVE);
            pos[i].set_attach_chain(-1);
        }

        reverse_cursive_chain(&mut pos, 2, Direction::LeftToRight, 3);

        assert_eq!(pos[2].attach_chain(), 0);
        assert_eq!(pos[1].attach_chain(), 1);
        assert_eq!(pos[1].y_offset, -20);
        assert_eq!(pos[0].attach_chain(), 1);
        assert_eq!(pos[0].attach_type(), attach_type::CURSIVE);
        assert_eq!(pos[0].y_offset, -10);
    }

    #[test]
    fn right_to_left_join_moves_the_exit_glyph() {
        let mut pos = advances(&[600, 700]);
        join_advances(&mut pos, Direction::RightToLeft, 0, 1, (50, 0), (650, 0));
        assert_eq!(pos[0].x_advance, 550);
        assert_eq!(pos[0].x_offset, -50);
        assert_eq!(pos[1].x_advance, 650);
    }

    #[test]
    fn left_to_right_join_moves_the_entry_glyph() {
        let mut pos = advances(&[600, 700]);
        join_advances(&mut pos, Direction::LeftToRight, 0, 1, (580, 0), (20, 0));
        assert_eq!(pos[0].x_advance, 580);
        assert_eq!(pos[1].x_advance, 680);
        assert_eq!(pos[1].x_offset, -20);
    }
}
