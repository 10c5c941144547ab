//! Geometric mark placement and space widths for fonts without GPOS data.

use ttf_parser::GlyphId;

use crate::buffer::Buffer;
use crate::common::Direction;
use crate::face::{Face, GlyphExtents};
use crate::plan::ShapePlan;
use crate::unicode::{combining_class as class, space, GeneralCategory};

// Hebrew, Arabic, Thai, Lao and Tibetan fixed-position classes after the
// reordering permutation has been applied.
mod modified {
    pub const SHEVA: u8 = 22;
    pub const HATAF_SEGOL: u8 = 15;
    pub const HATAF_PATAH: u8 = 16;
    pub const HATAF_QAMATS: u8 = 17;
    pub const HIRIQ: u8 = 23;
    pub const TSERE: u8 = 18;
    pub const SEGOL: u8 = 19;
    pub const PATAH: u8 = 20;
    pub const QAMATS: u8 = 21;
    pub const HOLAM: u8 = 14;
    pub const QUBUTS: u8 = 24;
    pub const DAGESH: u8 = 12;
    pub const METEG: u8 = 25;
    pub const RAFE: u8 = 13;
    pub const SHIN_DOT: u8 = 10;
    pub const SIN_DOT: u8 = 11;
    pub const POINT_VARIKA: u8 = 26;

    pub const FATHATAN: u8 = 28;
    pub const DAMMATAN: u8 = 29;
    pub const KASRATAN: u8 = 30;
    pub const FATHA: u8 = 31;
    pub const DAMMA: u8 = 32;
    pub const KASRA: u8 = 33;
    pub const SHADDA: u8 = 27;
    pub const SUKUN: u8 = 34;
    pub const SUPERSCRIPT_ALEF: u8 = 35;
    pub const SUPERSCRIPT_ALAPH: u8 = 36;

    pub const THAI_SARA_U: u8 = 3;
    pub const THAI_MAI: u8 = 107;
    pub const LAO_SIGN_U: u8 = 118;
    pub const LAO_MAI: u8 = 122;

    pub const TIBETAN_SIGN_AA: u8 = 129;
    pub const TIBETAN_SIGN_I: u8 = 132;
    pub const TIBETAN_SIGN_U: u8 = 131;
}

/// Thai and Lao marks the Unicode data leaves at class 0, and the Thai
/// virama, get a position of their own.
fn thai_lao_class(u: u32, mcc: u8) -> u8 {
    match (u, mcc) {
        (0x0E31 | 0x0E34..=0x0E37 | 0x0E47 | 0x0E4C..=0x0E4E, 0) => class::ABOVE_RIGHT,
        (0x0EB1 | 0x0EB4..=0x0EB7 | 0x0EBB | 0x0ECC | 0x0ECD, 0) => class::ABOVE,
        (0x0EBC, 0) => class::BELOW,
        (0x0E3A, c) if c != 0 => class::BELOW_RIGHT,
        _ => mcc,
    }
}

/// Maps script-specific combining classes onto the generic positional ones.
fn recategorize_combining_class(u: u32, mcc: u8) -> u8 {
    use modified as m;

    if mcc >= 200 {
        return mcc;
    }

    match thai_lao_class(u, mcc) {
        m::SHEVA | m::HATAF_SEGOL | m::HATAF_PATAH | m::HATAF_QAMATS | m::HIRIQ | m::TSERE
        | m::SEGOL | m::PATAH | m::QAMATS | m::QUBUTS | m::METEG => class::BELOW,
        m::RAFE => class::ATTACHED_ABOVE,
        m::SHIN_DOT => class::ABOVE_RIGHT,
        m::SIN_DOT | m::HOLAM => class::ABOVE_LEFT,
        m::POINT_VARIKA => class::ABOVE,

        m::FATHATAN | m::DAMMATAN | m::FATHA | m::DAMMA | m::SHADDA | m::SUKUN
        | m::SUPERSCRIPT_ALEF | m::SUPERSCRIPT_ALAPH => class::ABOVE,
        m::KASRATAN | m::KASRA => class::BELOW,

        m::THAI_SARA_U => class::BELOW_RIGHT,
        m::THAI_MAI => class::ABOVE_RIGHT,
        m::LAO_SIGN_U => class::BELOW,
        m::LAO_MAI => class::ABOVE,

        m::TIBETAN_SIGN_AA | m::TIBETAN_SIGN_U => class::BELOW,
        m::TIBETAN_SIGN_I => class::ABOVE,

        // Dagesh stays in the middle.
        other => other,
    }
}

/// Pause callback that turns script-specific classes into positional ones
/// before fallback mark positioning runs.
pub fn recategorize_marks(_: &ShapePlan, _: &Face, buffer: &mut Buffer) {
    for info in &mut buffer.info {
        if info.general_category() == GeneralCategory::NonspacingMark {
            let mcc = recategorize_combining_class(info.glyph_id, info.modified_combining_class());
            info.set_modified_combining_class(mcc);
        }
    }
}

fn zero_mark_advances(buffer: &mut Buffer, start: usize, end: usize, adjust_offsets: bool) {
    let marks = buffer.info[start..end]
        .iter()
        .zip(&mut buffer.pos[start..end])
        .filter(|(info, _)| info.general_category() == GeneralCategory::NonspacingMark);

    for (_, pos) in marks {
        if adjust_offsets {
            pos.x_offset -= pos.x_advance;
            pos.y_offset -= pos.y_advance;
        }
        pos.x_advance = 0;
        pos.y_advance = 0;
    }
}

fn is_below(mcc: u8) -> bool {
    matches!(
        mcc,
        class::DOUBLE_BELOW
            | class::BELOW_LEFT
            | class::BELOW
            | class::BELOW_RIGHT
            | class::ATTACHED_BELOW_LEFT
            | class::ATTACHED_BELOW
    )
}

fn is_above(mcc: u8) -> bool {
    matches!(
        mcc,
        class::DOUBLE_ABOVE
            | class::ABOVE_LEFT
            | class::ABOVE
            | class::ABOVE_RIGHT
            | class::ATTACHED_ABOVE
            | class::ATTACHED_ABOVE_RIGHT
    )
}

/// The horizontal offset that aligns `mark` with `base`. LEFT and RIGHT
/// marks are centered like the rest.
fn align_mark(mcc: u8, direction: Direction, base: &GlyphExtents, mark: &GlyphExtents) -> i32 {
    let left = base.x_bearing - mark.x_bearing;
    match mcc {
        // Double marks straddle the end of the base.
        class::DOUBLE_BELOW | class::DOUBLE_ABOVE if direction.is_horizontal() => {
            let edge = if direction.is_forward() { base.width } else { 0 };
            left + edge - mark.width / 2
        }
        class::ATTACHED_BELOW_LEFT | class::BELOW_LEFT | class::ABOVE_LEFT => left,
        class::ATTACHED_ABOVE_RIGHT | class::BELOW_RIGHT | class::ABOVE_RIGHT => {
            left + base.width - mark.width
        }
        _ => left + (base.width - mark.width) / 2,
    }
}

/// Puts `mark` below or above everything already stacked on the base and
/// returns its vertical offset. `stack` grows to include the mark.
fn stack_mark(mcc: u8, y_gap: i32, stack: &mut GlyphExtents, mark: &GlyphExtents) -> i32 {
    let attached = matches!(
        mcc,
        class::ATTACHED_BELOW_LEFT
            | class::ATTACHED_BELOW
            | class::ATTACHED_ABOVE
            | class::ATTACHED_ABOVE_RIGHT
    );
    let gap = if attached { 0 } else { y_gap };

    if is_below(mcc) {
        stack.height -= gap;
        let mut offset = stack.y_bearing + stack.height - mark.y_bearing;

        // A below mark never moves up.
        if (y_gap > 0) == (offset > 0) {
            stack.height -= offset;
            offset = 0;
        }

        stack.height += mark.height;
        offset
    } else if is_above(mcc) {
        stack.y_bearing += gap;
        stack.height -= gap;
        let mut offset = stack.y_bearing - (mark.y_bearing + mark.height);

        // An above mark moves down by half at most.
        if (y_gap > 0) != (offset > 0) {
            let correction = -offset / 2;
            stack.y_bearing += correction;
            stack.height -= correction;
            offset += correction;
        }

        stack.y_bearing -= mark.height;
        stack.height += mark.height;
        offset
    } else {
        0
    }
}

/// The slice of a ligature's box that one of its components takes.
fn component_cell(base: GlyphExtents, component: i32, count: i32, ltr: bool) -> GlyphExtents {
    let cell = if ltr { component } else { count - 1 - component };
    GlyphExtents {
        x_bearing: base.x_bearing + cell * base.width / count,
        width: base.width / count,
        ..base
    }
}

fn position_around_base(
    plan: &ShapePlan,
    face: &Face,
    buffer: &mut Buffer,
    base: usize,
    end: usize,
    adjust_offsets: bool,
) {
    buffer.unsafe_to_break(base, end);

    let base_info = buffer.info[base];
    let base_pos = buffer.pos[base];
    let base_glyph = base_info.as_glyph();

    let Some(mut base_extents) = face.glyph_extents(base_glyph) else {
        zero_mark_advances(buffer, base + 1, end, adjust_offsets);
        return;
    };

    // The advance is a better width than the ink, and works for blank glyphs too.
    base_extents.y_bearing += base_pos.y_offset;
    base_extents.x_bearing = 0;
    base_extents.width = face.glyph_h_advance(base_glyph);

    let lig_id = base_info.lig_id();
    let components = i32::from(base_info.lig_num_comps());
    let ltr_components = if plan.direction.is_horizontal() {
        plan.direction == Direction::LeftToRight
    } else {
        plan.script.and_then(Direction::from_script) != Some(Direction::RightToLeft)
    };

    let direction = buffer.direction;
    let y_gap = face.units_per_em() / 16;

    // Mark offsets count from the mark's own origin; `pen` leads back to
    // the base's.
    let sign = if direction.is_forward() { -1 } else { 1 };
    let (mut pen_x, mut pen_y) = if direction.is_forward() {
        (-base_pos.x_advance, -base_pos.y_advance)
    } else {
        (0, 0)
    };

    let mut last_component = None;
    let mut last_class = None;
    let mut component_extents = base_extents;
    let mut stack = base_extents;

    for (info, pos) in buffer.info[base + 1..end]
        .iter()
        .zip(&mut buffer.pos[base + 1..end])
    {
        let mcc = info.modified_combining_class();
        if mcc == 0 {
            pen_x += sign * pos.x_advance;
            pen_y += sign * pos.y_advance;
            continue;
        }

        if components > 1 {
            // Marks that don't belong to a known component go on the last one.
            let own = i32::from(info.lig_comp()) - 1;
            let component = if lig_id != 0 && lig_id == info.lig_id() && own < components {
                own
            } else {
                components - 1
            };

            if last_component != Some(component) {
                last_component = Some(component);
                last_class = None;
                component_extents =
                    component_cell(base_extents, component, components, ltr_components);
            }
        }

        if last_class != Some(mcc) {
            last_class = Some(mcc);
            stack = component_extents;
        }

        if let Some(mark_extents) = face.glyph_extents(info.as_glyph()) {
            pos.x_offset = align_mark(mcc, direction, &stack, &mark_extents);
            pos.y_offset = stack_mark(mcc, y_gap, &mut stack, &mark_extents);
        }

        pos.x_advance = 0;
        pos.y_advance = 0;
        pos.x_offset += pen_x;
        pos.y_offset += pen_y;
    }
}

/// Places marks around their base using glyph extents and combining classes.
pub fn position_marks(plan: &ShapePlan, face: &Face, buffer: &mut Buffer, adjust_offsets: bool) {
    let len = buffer.len();
    let mut base = 0;
    while base < len {
        let end = (base + 1..len)
            .find(|&i| !buffer.info[i].is_unicode_mark())
            .unwrap_or(len);

        // Marks at the very start have no base.
        if end - base > 1 && !buffer.info[base].is_unicode_mark() {
            position_around_base(plan, face, buffer, base, end, adjust_offsets);
        }

        base = end;
    }
}

enum SpaceWidth {
    Fixed(i32),
    Like(GlyphId),
    Halved,
}

fn space_width(face: &Face, space_type: space::Space) -> Option<SpaceWidth> {
    let upem = face.units_per_em();
    let width = match space_type {
        space::SPACE_EM
        | space::SPACE_EM_2
        | space::SPACE_EM_3
        | space::SPACE_EM_4
        | space::SPACE_EM_5
        | space::SPACE_EM_6
        | space::SPACE_EM_16 => {
            let n = i32::from(space_type);
            SpaceWidth::Fixed((upem + n / 2) / n)
        }
        space::SPACE_4_EM_18 => SpaceWidth::Fixed(upem * 4 / 18),
        space::SPACE_FIGURE => {
            SpaceWidth::Like(('0'..='9').find_map(|c| face.get_nominal_glyph(u32::from(c)))?)
        }
        space::SPACE_PUNCTUATION => SpaceWidth::Like(
            face.get_nominal_glyph(u32::from('.'))
                .or_else(|| face.get_nominal_glyph(u32::from(',')))?,
        ),
        space::SPACE_NARROW => SpaceWidth::Halved,
        _ => return None,
    };

    Some(width)
}

/// Gives space characters that were mapped to U+0020 their proper width.
pub fn adjust_spaces(_: &ShapePlan, face: &Face, buffer: &mut Buffer) {
    let horizontal = buffer.direction.is_horizontal();
    for (info, pos) in buffer.info.iter().zip(&mut buffer.pos) {
        if !info.is_unicode_space() || info.is_ligated() {
            continue;
        }

        let Some(width) = space_width(face, info.space_fallback()) else {
            continue;
        };

        match (width, horizontal) {
            (SpaceWidth::Fixed(width), true) => pos.x_advance = width,
            (SpaceWidth::Fixed(width), false) => pos.y_advance = -width,
            (SpaceWidth::Like(glyph), true) => pos.x_advance = face.glyph_h_advance(glyph),
            (SpaceWidth::Like(glyph), false) => pos.y_advance = face.glyph_v_advance(glyph),
            (SpaceWidth::Halved, true) => pos.x_advance /= 2,
            (SpaceWidth::Halved, false) => pos.y_advance /= 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extents(x_bearing: i32, y_bearing: i32, width: i32, height: i32) -> GlyphExtents {
        GlyphExtents {
            x_bearing,
            y_bearing,
            width,
            height,
        }
    }

    #[test]
    fn hebrew_points_become_positional() {
        assert_eq!(recategorize_combining_class(0x05B0, modified::SHEVA), class::BELOW);
        assert_eq!(recategorize_combining_class(0x05C1, modified::SHIN_DOT), class::ABOVE_RIGHT);
        assert_eq!(recategorize_combining_class(0x05C2, modified::SIN_DOT), class::ABOVE_LEFT);
        assert_eq!(recategorize_combining_class(0x05BC, modified::DAGESH), modified::DAGESH);
    }

    #[test]
    fn thai_above_vowels_align_right() {
        assert_eq!(recategorize_combining_class(0x0E31, 0), class::ABOVE_RIGHT);
        assert_eq!(recategorize_combining_class(0x0E3A, class::VIRAMA), class::BELOW_RIGHT);
        assert_eq!(recategorize_combining_class(0x0EBC, 0), class::BELOW);
        assert_eq!(recategorize_combining_class(0x0E01, 0), 0);
    }

    #[test]
    fn attached_classes_pass_through() {
        assert_eq!(recategorize_combining_class(0x0301, class::ABOVE), class::ABOVE);
        assert_eq!(recategorize_combining_class(0x0328, class::ATTACHED_BELOW), class::ATTACHED_BELOW);
    }

    #[test]
    fn marks_align_to_the_base() {
        let base = extents(0, 700, 500, -700);
        let mark = extents(10, 100, 200, -100);
        let ltr = Direction::LeftToRight;

        assert_eq!(align_mark(class::ABOVE, ltr, &base, &mark), 140);
        assert_eq!(align_mark(class::ABOVE_LEFT, ltr, &base, &mark), -10);
        assert_eq!(align_mark(class::BELOW_RIGHT, ltr, &base, &mark), 290);
        assert_eq!(align_mark(class::DOUBLE_ABOVE, ltr, &base, &mark), 390);
        assert_eq!(align_mark(class::DOUBLE_ABOVE, Direction::RightToLeft, &base, &mark), -110);
    }

    #[test]
    fn above_marks_stack_upwards() {
        let mut stack = extents(0, 700, 500, -700);
        let mark = extents(0, 100, 200, -100);

        assert_eq!(stack_mark(class::ABOVE, 62, &mut stack, &mark), 762);
        assert_eq!(stack_mark(class::ABOVE, 62, &mut stack, &mark), 924);
        assert_eq!(stack.y_bearing, 1024);
    }

    #[test]
    fn below_marks_never_move_up() {
        let mark = extents(0, -20, 200, -80);
        let mut stack = extents(0, 700, 500, -700);
        assert_eq!(stack_mark(class::BELOW, 62, &mut stack, &mark), -42);

        let low_mark = extents(0, -100, 200, -80);
        let mut stack = extents(0, 700, 500, -700);
        assert_eq!(stack_mark(class::BELOW, 62, &mut stack, &low_mark), 0);
    }

    #[test]
    fn attached_marks_skip_the_gap() {
        let mut stack = extents(0, 700, 500, -700);
        let mark = extents(0, 100, 200, -100);
        assert_eq!(stack_mark(class::ATTACHED_ABOVE, 62, &mut stack, &mark), 700);
    }

    #[test]
    fn ligature_components_split_the_box() {
        let base = extents(0, 700, 900, -700);
        assert_eq!(component_cell(base, 0, 3, true).x_bearing, 0);
        assert_eq!(component_cell(base, 2, 3, true).x_bearing, 600);
        assert_eq!(component_cell(base, 0, 3, false).x_bearing, 600);
        assert_eq!(component_cell(base, 1, 3, false).width, 300);
    }
}
