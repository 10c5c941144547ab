//! Thai and Lao.
//!
//! SARA AM is always split into NIKHAHIT and SARA AA. Fonts without Thai
//! GSUB additionally get the legacy PUA glyphs for shifted marks.
//! See <https://linux.thai.net/~thep/th-otf/shaping.html>.

use alloc::vec::Vec;

use crate::buffer::{Buffer, BufferClusterLevel};
use crate::face::Face;
use crate::ot::TableIndex;
use crate::plan::ShapePlan;
use crate::script;
use crate::unicode::GeneralCategory;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Consonant {
    NC = 0,
    AC,
    RC,
    DC,
    NotConsonant,
}

fn consonant_type(u: u32) -> Consonant {
    match u {
        0x0E1B | 0x0E1D | 0x0E1F => Consonant::AC,
        0x0E0D | 0x0E10 => Consonant::RC,
        0x0E0E | 0x0E0F => Consonant::DC,
        0x0E01..=0x0E2E => Consonant::NC,
        _ => Consonant::NotConsonant,
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Mark {
    /// Above vowel.
    AV = 0,
    /// Below vowel.
    BV,
    /// Tone mark.
    T,
}

fn mark_type(u: u32) -> Option<Mark> {
    match u {
        0x0E31 | 0x0E34..=0x0E37 | 0x0E47 | 0x0E4D..=0x0E4E => Some(Mark::AV),
        0x0E38..=0x0E3A => Some(Mark::BV),
        0x0E48..=0x0E4C => Some(Mark::T),
        _ => None,
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Action {
    Nop,
    /// Shift the mark down.
    SD,
    /// Shift the mark left.
    SL,
    /// Shift the mark down-left.
    SDL,
    /// Remove the descender from the base.
    RD,
}

struct PuaMapping {
    u: u32,
    win_pua: u32,
    mac_pua: u32,
}

const fn m(u: u32, win_pua: u32, mac_pua: u32) -> PuaMapping {
    PuaMapping { u, win_pua, mac_pua }
}

const SD_MAPPINGS: &[PuaMapping] = &[
    m(0x0E48, 0xF70A, 0xF88B), // MAI EK
    m(0x0E49, 0xF70B, 0xF88E), // MAI THO
    m(0x0E4A, 0xF70C, 0xF891), // MAI TRI
    m(0x0E4B, 0xF70D, 0xF894), // MAI CHATTAWA
    m(0x0E4C, 0xF70E, 0xF897), // THANTHAKHAT
    m(0x0E38, 0xF718, 0xF89B), // SARA U
    m(0x0E39, 0xF719, 0xF89C), // SARA UU
    m(0x0E3A, 0xF71A, 0xF89D), // PHINTHU
];

const SDL_MAPPINGS: &[PuaMapping] = &[
    m(0x0E48, 0xF705, 0xF88C), // MAI EK
    m(0x0E49, 0xF706, 0xF88F), // MAI THO
    m(0x0E4A, 0xF707, 0xF892), // MAI TRI
    m(0x0E4B, 0xF708, 0xF895), // MAI CHATTAWA
    m(0x0E4C, 0xF709, 0xF898), // THANTHAKHAT
];

const SL_MAPPINGS: &[PuaMapping] = &[
    m(0x0E48, 0xF713, 0xF88A), // MAI EK
    m(0x0E49, 0xF714, 0xF88D), // MAI THO
    m(0x0E4A, 0xF715, 0xF890), // MAI TRI
    m(0x0E4B, 0xF716, 0xF893), // MAI CHATTAWA
    m(0x0E4C, 0xF717, 0xF896), // THANTHAKHAT
    m(0x0E31, 0xF710, 0xF884), // MAI HAN-AKAT
    m(0x0E34, 0xF701, 0xF885), // SARA I
    m(0x0E35, 0xF702, 0xF886), // SARA II
    m(0x0E36, 0xF703, 0xF887), // SARA UE
    m(0x0E37, 0xF704, 0xF888), // SARA UEE
    m(0x0E47, 0xF712, 0xF889), // MAITAIKHU
    m(0x0E4D, 0xF711, 0xF899), // NIKHAHIT
];

const RD_MAPPINGS: &[PuaMapping] = &[
    m(0x0E0D, 0xF70F, 0xF89A), // YO YING
    m(0x0E10, 0xF700, 0xF89E), // THO THAN
];

fn pua_shape(u: u32, action: Action, face: &Face) -> u32 {
    let mappings = match action {
        Action::Nop => return u,
        Action::SD => SD_MAPPINGS,
        Action::SDL => SDL_MAPPINGS,
        Action::SL => SL_MAPPINGS,
        Action::RD => RD_MAPPINGS,
    };

    mappings
        .iter()
        .find(|pua| pua.u == u)
        .and_then(|pua| {
            [pua.win_pua, pua.mac_pua]
                .into_iter()
                .find(|&c| face.get_nominal_glyph(c).is_some())
        })
        .unwrap_or(u)
}

// What the cluster above looks like so far.
const T0: u8 = 0;
const T1: u8 = 1;
const T2: u8 = 2;
const T3: u8 = 3;

// Indexed by `Consonant`.
const ABOVE_START_STATE: [u8; 5] = [T0, T1, T0, T0, T3];

// Indexed by state and `Mark`.
#[rustfmt::skip]
const ABOVE_STATE_MACHINE: [[(Action, u8); 3]; 4] = [
    //         AV                   BV                  T
    /* T0 */ [(Action::Nop, T3), (Action::Nop, T0), (Action::SD, T3)],
    /* T1 */ [(Action::SL, T2),  (Action::Nop, T1), (Action::SDL, T2)],
    /* T2 */ [(Action::Nop, T3), (Action::Nop, T2), (Action::SL, T3)],
    /* T3 */ [(Action::Nop, T3), (Action::Nop, T3), (Action::Nop, T3)],
];

/// No descender.
const B0: u8 = 0;
/// Removable descender.
const B1: u8 = 1;
/// Strict descender.
const B2: u8 = 2;

const BELOW_START_STATE: [u8; 5] = [B0, B0, B1, B2, B2];

#[rustfmt::skip]
const BELOW_STATE_MACHINE: [[(Action, u8); 3]; 3] = [
    //         AV                   BV                  T
    /* B0 */ [(Action::Nop, B0), (Action::Nop, B2), (Action::Nop, B0)],
    /* B1 */ [(Action::Nop, B1), (Action::RD, B2),  (Action::Nop, B1)],
    /* B2 */ [(Action::Nop, B2), (Action::SD, B2),  (Action::Nop, B2)],
];

/// Runs both state machines over the buffer, returning the action for every
/// mark and the index of its base.
fn pua_actions(buffer: &Buffer) -> impl Iterator<Item = (usize, usize, Action)> + '_ {
    let mut above_state = ABOVE_START_STATE[Consonant::NotConsonant as usize];
    let mut below_state = BELOW_START_STATE[Consonant::NotConsonant as usize];
    let mut base = 0;

    buffer.info.iter().enumerate().filter_map(move |(i, info)| {
        let Some(mark) = mark_type(info.glyph_id) else {
            let ct = consonant_type(info.glyph_id) as usize;
            above_state = ABOVE_START_STATE[ct];
            below_state = BELOW_START_STATE[ct];
            base = i;
            return None;
        };

        let (above_action, next_above) = ABOVE_STATE_MACHINE[usize::from(above_state)][mark as usize];
        let (below_action, next_below) = BELOW_STATE_MACHINE[usize::from(below_state)][mark as usize];
        above_state = next_above;
        below_state = next_below;

        // At least one of the actions is a no-op.
        let action = if above_action != Action::Nop {
            above_action
        } else {
            below_action
        };

        Some((base, i, action))
    })
}

fn do_pua_shaping(face: &Face, buffer: &mut Buffer) {
    let actions: Vec<_> = pua_actions(buffer).collect();
    for (base, i, action) in actions {
        buffer.unsafe_to_break(base, i);
        let target = if action == Action::RD { base } else { i };
        buffer.info[target].glyph_id = pua_shape(buffer.info[target].glyph_id, action, face);
    }
}

// Lao code points are the Thai ones plus 0x80.

fn is_sara_am(u: u32) -> bool {
    (u & !0x0080) == 0x0E33
}

fn nikhahit_from_sara_am(u: u32) -> u32 {
    u - 0x0E33 + 0x0E4D
}

fn sara_aa_from_sara_am(u: u32) -> u32 {
    u - 1
}

fn is_tone_mark(u: u32) -> bool {
    let u = u & !0x0080;
    matches!(u, 0x0E34..=0x0E37 | 0x0E47..=0x0E4E | 0x0E31)
}

/// Decomposes SARA AM into NIKHAHIT and SARA AA and moves the NIKHAHIT in
/// front of any preceding tone marks.
fn decompose_sara_am(buffer: &mut Buffer) {
    buffer.clear_output();
    buffer.idx = 0;
    while buffer.idx < buffer.len() {
        let u = buffer.cur(0).glyph_id;
        if !is_sara_am(u) {
            buffer.next_glyph();
            continue;
        }

        buffer.output_glyph(nikhahit_from_sara_am(u));
        if let Some(nikhahit) = buffer.out_info.last_mut() {
            nikhahit.set_continuation();
            // Zeroed as a ccc=0 mark.
            nikhahit.set_general_category(GeneralCategory::NonspacingMark);
        }
        buffer.replace_glyph(sara_aa_from_sara_am(u));

        let end = buffer.out_len();
        let mut start = end - 2;
        while start > 0 && is_tone_mark(buffer.out_info[start - 1].glyph_id) {
            start -= 1;
        }

        if start + 2 < end {
            buffer.merge_out_clusters(start, end);
            buffer.out_info[start..end - 1].rotate_right(1);
        } else if start != 0 && buffer.cluster_level == BufferClusterLevel::MonotoneGraphemes {
            // NIKHAHIT is combining, so it joins the previous cluster.
            buffer.merge_out_clusters(start - 1, end);
        }
    }

    buffer.swap_buffers();
}

pub fn preprocess_text(plan: &ShapePlan, face: &Face, buffer: &mut Buffer) {
    decompose_sara_am(buffer);

    // Fonts with Thai GSUB handle the rest.
    if plan.script == Some(script::THAI) && !plan.ot_map.found_script(TableIndex::GSUB) {
        do_pua_shaping(face, buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use crate::buffer::GlyphInfo;

    fn buffer(code_points: &[u32]) -> Buffer {
        let mut buffer = Buffer::new();
        for (i, &u) in code_points.iter().enumerate() {
            buffer.info.push(GlyphInfo {
                glyph_id: u,
                cluster: i as u32,
                ..GlyphInfo::default()
            });
        }
        buffer
    }

    fn code_points(buffer: &Buffer) -> Vec<u32> {
        buffer.info.iter().map(|i| i.glyph_id).collect()
    }

    #[test]
    fn sara_am_alone() {
        let mut b = buffer(&[0x0E33]);
        decompose_sara_am(&mut b);
        assert_eq!(code_points(&b), vec![0x0E4D, 0x0E32]);
        assert!(b.info[0].is_continuation());
    }

    #[test]
    fn nikhahit_moves_before_tone_mark() {
        let mut b = buffer(&[0x0E14, 0x0E4B, 0x0E33]);
        decompose_sara_am(&mut b);
        assert_eq!(code_points(&b), vec![0x0E14, 0x0E4D, 0x0E4B, 0x0E32]);
        assert_eq!(b.info[1].cluster, 1);
        assert_eq!(b.info[3].cluster, 1);
    }

    #[test]
    fn existing_nikhahit_stays() {
        let mut b = buffer(&[0x0E14, 0x0E4B, 0x0E4D, 0x0E32]);
        decompose_sara_am(&mut b);
        assert_eq!(code_points(&b), vec![0x0E14, 0x0E4B, 0x0E4D, 0x0E32]);
    }

    #[test]
    fn lao_sara_am() {
        let mut b = buffer(&[0x0E94, 0x0EB3]);
        decompose_sara_am(&mut b);
        assert_eq!(code_points(&b), vec![0x0E94, 0x0ECD, 0x0EB2]);
    }

    #[test]
    fn tone_mark_on_ascender_shifts_down_left() {
        // PO PLA has an ascender.
        let b = buffer(&[0x0E1B, 0x0E48]);
        let actions: Vec<_> = pua_actions(&b).collect();
        assert_eq!(actions, vec![(0, 1, Action::SDL)]);
    }

    #[test]
    fn below_vowel_removes_descender() {
        // YO YING, SARA U
        let b = buffer(&[0x0E0D, 0x0E38]);
        let actions: Vec<_> = pua_actions(&b).collect();
        assert_eq!(actions, vec![(0, 1, Action::RD)]);
    }

    #[test]
    fn tone_mark_after_above_vowel_is_left_alone() {
        // KO KAI, SARA I, MAI EK
        let b = buffer(&[0x0E01, 0x0E34, 0x0E48]);
        let actions: Vec<_> = pua_actions(&b).collect();
        assert_eq!(actions, vec![(0, 1, Action::Nop), (0, 2, Action::Nop)]);
    }
}
