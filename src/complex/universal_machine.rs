//! Syllable segmentation for the Universal Shaping Engine.
//!
//! The transition tables are generated by Ragel from `universal_machine.rl`.

use alloc::vec::Vec;

use super::machine::{scan, Action, SpanTable};
use super::universal::category;
use crate::buffer::{Buffer, BufferScratchFlags, GlyphInfo};

const MACHINE_TRANS_KEYS: &[u8] = &[
    12, 48, 1, 15, 1, 1, 12, 48, 1, 1, 0, 48, 11, 48, 11, 48, 1, 15, 1, 1, 22, 48, 23, 48, 24, 47,
    25, 47, 26, 47, 45, 46, 46, 46, 24, 48, 24, 48, 24, 48, 1, 1, 24, 48, 23, 48, 23, 48, 23, 48,
    22, 48, 22, 48, 22, 48, 22, 48, 11, 48, 1, 48, 13, 13, 4, 4, 11, 48, 41, 42, 42, 42, 11, 48,
    22, 48, 23, 48, 24, 47, 25, 47, 26, 47, 45, 46, 46, 46, 24, 48, 24, 48, 24, 48, 24, 48, 23, 48,
    23, 48, 23, 48, 22, 48, 22, 48, 22, 48, 22, 48, 11, 48, 1, 48, 1, 15, 4, 4, 13, 13, 12, 48, 1,
    48, 11, 48, 41, 42, 42, 42, 1, 5, 0,
];

const MACHINE_KEY_SPANS: &[u8] = &[
    37, 15, 1, 37, 1, 49, 38, 38, 15, 1, 27, 26, 24, 23, 22, 2, 1, 25, 25, 25, 1, 25, 26, 26, 26,
    27, 27, 27, 27, 38, 48, 1, 1, 38, 2, 1, 38, 27, 26, 24, 23, 22, 2, 1, 25, 25, 25, 25, 26, 26,
    26, 27, 27, 27, 27, 38, 48, 15, 1, 1, 37, 48, 38, 2, 1, 5,
];

const MACHINE_INDEX_OFFSETS: &[u16] = &[
    0, 38, 54, 56, 94, 96, 146, 185, 224, 240, 242, 270, 297, 322, 346, 369, 372, 374, 400, 426,
    452, 454, 480, 507, 534, 561, 589, 617, 645, 673, 712, 761, 763, 765, 804, 807, 809, 848, 876,
    903, 928, 952, 975, 978, 980, 1006, 1032, 1058, 1084, 1111, 1138, 1165, 1193, 1221, 1249, 1277,
    1316, 1365, 1381, 1383, 1385, 1423, 1472, 1511, 1514, 1516,
];

const MACHINE_INDICIES: &[u8] = &[
    1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 0, 0, 0, 1, 0, 3, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 4, 2, 3, 2, 6, 5, 5, 5, 5, 5, 5, 5,
    5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 5, 6, 5, 5, 5, 6, 5, 7, 5,
    8, 9, 10, 8, 11, 12, 10, 10, 10, 10, 10, 3, 13, 14, 10, 15, 8, 8, 16, 17, 10, 10, 18, 19, 20,
    21, 22, 23, 24, 18, 25, 26, 27, 28, 29, 30, 10, 31, 32, 33, 10, 34, 35, 36, 37, 38, 39, 40, 13,
    10, 42, 1, 41, 41, 43, 41, 41, 41, 41, 41, 41, 44, 45, 46, 47, 48, 49, 50, 44, 51, 9, 52, 53,
    54, 55, 41, 56, 57, 58, 41, 41, 41, 41, 59, 60, 61, 62, 1, 41, 42, 1, 41, 41, 43, 41, 41, 41,
    41, 41, 41, 44, 45, 46, 47, 48, 49, 50, 44, 51, 52, 52, 53, 54, 55, 41, 56, 57, 58, 41, 41, 41,
    41, 59, 60, 61, 62, 1, 41, 42, 63, 63, 63, 63, 63, 63, 63, 63, 63, 63, 63, 63, 63, 64, 63, 42,
    63, 44, 45, 46, 47, 48, 41, 41, 41, 41, 41, 41, 53, 54, 55, 41, 56, 57, 58, 41, 41, 41, 41, 45,
    60, 61, 62, 65, 41, 45, 46, 47, 48, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41, 56, 57, 58, 41, 41,
    41, 41, 41, 60, 61, 62, 65, 41, 46, 47, 48, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41,
    41, 41, 41, 41, 41, 60, 61, 62, 41, 47, 48, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41,
    41, 41, 41, 41, 41, 60, 61, 62, 41, 48, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41,
    41, 41, 41, 41, 60, 61, 62, 41, 60, 61, 41, 61, 41, 46, 47, 48, 41, 41, 41, 41, 41, 41, 41, 41,
    41, 41, 56, 57, 58, 41, 41, 41, 41, 41, 60, 61, 62, 65, 41, 46, 47, 48, 41, 41, 41, 41, 41, 41,
    41, 41, 41, 41, 41, 57, 58, 41, 41, 41, 41, 41, 60, 61, 62, 65, 41, 46, 47, 48, 41, 41, 41, 41,
    41, 41, 41, 41, 41, 41, 41, 41, 58, 41, 41, 41, 41, 41, 60, 61, 62, 65, 41, 67, 66, 46, 47, 48,
    41, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41, 41, 60, 61, 62, 65, 41, 45,
    46, 47, 48, 41, 41, 41, 41, 41, 41, 53, 54, 55, 41, 56, 57, 58, 41, 41, 41, 41, 45, 60, 61, 62,
    65, 41, 45, 46, 47, 48, 41, 41, 41, 41, 41, 41, 41, 54, 55, 41, 56, 57, 58, 41, 41, 41, 41, 45,
    60, 61, 62, 65, 41, 45, 46, 47, 48, 41, 41, 41, 41, 41, 41, 41, 41, 55, 41, 56, 57, 58, 41, 41,
    41, 41, 45, 60, 61, 62, 65, 41, 44, 45, 46, 47, 48, 41, 50, 44, 41, 41, 41, 53, 54, 55, 41, 56,
    57, 58, 41, 41, 41, 41, 45, 60, 61, 62, 65, 41, 44, 45, 46, 47, 48, 41, 68, 44, 41, 41, 41, 53,
    54, 55, 41, 56, 57, 58, 41, 41, 41, 41, 45, 60, 61, 62, 65, 41, 44, 45, 46, 47, 48, 41, 41, 44,
    41, 41, 41, 53, 54, 55, 41, 56, 57, 58, 41, 41, 41, 41, 45, 60, 61, 62, 65, 41, 44, 45, 46, 47,
    48, 49, 50, 44, 41, 41, 41, 53, 54, 55, 41, 56, 57, 58, 41, 41, 41, 41, 45, 60, 61, 62, 65, 41,
    42, 1, 41, 41, 43, 41, 41, 41, 41, 41, 41, 44, 45, 46, 47, 48, 49, 50, 44, 51, 41, 52, 53, 54,
    55, 41, 56, 57, 58, 41, 41, 41, 41, 59, 60, 61, 62, 1, 41, 42, 63, 63, 63, 63, 63, 63, 63, 63,
    63, 63, 63, 63, 63, 64, 63, 63, 63, 63, 63, 63, 63, 45, 46, 47, 48, 63, 63, 63, 63, 63, 63, 63,
    63, 63, 63, 56, 57, 58, 63, 63, 63, 63, 63, 60, 61, 62, 65, 63, 70, 69, 11, 71, 42, 1, 41, 41,
    43, 41, 41, 41, 41, 41, 41, 44, 45, 46, 47, 48, 49, 50, 44, 51, 9, 52, 53, 54, 55, 41, 56, 57,
    58, 41, 17, 72, 41, 59, 60, 61, 62, 1, 41, 17, 72, 73, 72, 73, 3, 6, 74, 74, 75, 74, 74, 74,
    74, 74, 74, 18, 19, 20, 21, 22, 23, 24, 18, 25, 27, 27, 28, 29, 30, 74, 31, 32, 33, 74, 74, 74,
    74, 37, 38, 39, 40, 6, 74, 18, 19, 20, 21, 22, 74, 74, 74, 74, 74, 74, 28, 29, 30, 74, 31, 32,
    33, 74, 74, 74, 74, 19, 38, 39, 40, 76, 74, 19, 20, 21, 22, 74, 74, 74, 74, 74, 74, 74, 74, 74,
    74, 31, 32, 33, 74, 74, 74, 74, 74, 38, 39, 40, 76, 74, 20, 21, 22, 74, 74, 74, 74, 74, 74, 74,
    74, 74, 74, 74, 74, 74, 74, 74, 74, 74, 74, 38, 39, 40, 74, 21, 22, 74, 74, 74, 74, 74, 74, 74,
    74, 74, 74, 74, 74, 74, 74, 74, 74, 74, 74, 38, 39, 40, 74, 22, 74, 74, 74, 74, 74, 74, 74, 74,
    74, 74, 74, 74, 74, 74, 74, 74, 74, 74, 38, 39, 40, 74, 38, 39, 74, 39, 74, 20, 21, 22, 74, 74,
    74, 74, 74, 74, 74, 74, 74, 74, 31, 32, 33, 74, 74, 74, 74, 74, 38, 39, 40, 76, 74, 20, 21, 22,
    74, 74, 74, 74, 74, 74, 74, 74, 74, 74, 74, 32, 33, 74, 74, 74, 74, 74, 38, 39, 40, 76, 74, 20,
    21, 22, 74, 74, 74, 74, 74, 74, 74, 74, 74, 74, 74, 74, 33, 74, 74, 74, 74, 74, 38, 39, 40, 76,
    74, 20, 21, 22, 74, 74, 74, 74, 74, 74, 74, 74, 74, 74, 74, 74, 74, 74, 74, 74, 74, 74, 38, 39,
    40, 76, 74, 19, 20, 21, 22, 74, 74, 74, 74, 74, 74, 28, 29, 30, 74, 31, 32, 33, 74, 74, 74, 74,
    19, 38, 39, 40, 76, 74, 19, 20, 21, 22, 74, 74, 74, 74, 74, 74, 74, 29, 30, 74, 31, 32, 33, 74,
    74, 74, 74, 19, 38, 39, 40, 76, 74, 19, 20, 21, 22, 74, 74, 74, 74, 74, 74, 74, 74, 30, 74, 31,
    32, 33, 74, 74, 74, 74, 19, 38, 39, 40, 76, 74, 18, 19, 20, 21, 22, 74, 24, 18, 74, 74, 74, 28,
    29, 30, 74, 31, 32, 33, 74, 74, 74, 74, 19, 38, 39, 40, 76, 74, 18, 19, 20, 21, 22, 74, 77, 18,
    74, 74, 74, 28, 29, 30, 74, 31, 32, 33, 74, 74, 74, 74, 19, 38, 39, 40, 76, 74, 18, 19, 20, 21,
    22, 74, 74, 18, 74, 74, 74, 28, 29, 30, 74, 31, 32, 33, 74, 74, 74, 74, 19, 38, 39, 40, 76, 74,
    18, 19, 20, 21, 22, 23, 24, 18, 74, 74, 74, 28, 29, 30, 74, 31, 32, 33, 74, 74, 74, 74, 19, 38,
    39, 40, 76, 74, 3, 6, 74, 74, 75, 74, 74, 74, 74, 74, 74, 18, 19, 20, 21, 22, 23, 24, 18, 25,
    74, 27, 28, 29, 30, 74, 31, 32, 33, 74, 74, 74, 74, 37, 38, 39, 40, 6, 74, 3, 74, 74, 74, 74,
    74, 74, 74, 74, 74, 74, 74, 74, 74, 4, 74, 74, 74, 74, 74, 74, 74, 19, 20, 21, 22, 74, 74, 74,
    74, 74, 74, 74, 74, 74, 74, 31, 32, 33, 74, 74, 74, 74, 74, 38, 39, 40, 76, 74, 3, 78, 78, 78,
    78, 78, 78, 78, 78, 78, 78, 78, 78, 78, 4, 78, 79, 74, 14, 74, 6, 78, 78, 78, 78, 78, 78, 78,
    78, 78, 78, 78, 78, 78, 78, 78, 78, 78, 78, 78, 78, 78, 78, 78, 78, 78, 78, 78, 78, 78, 78, 78,
    6, 78, 78, 78, 6, 78, 9, 74, 74, 74, 9, 74, 74, 74, 74, 74, 3, 6, 14, 74, 75, 74, 74, 74, 74,
    74, 74, 18, 19, 20, 21, 22, 23, 24, 18, 25, 26, 27, 28, 29, 30, 74, 31, 32, 33, 74, 34, 35, 74,
    37, 38, 39, 40, 6, 74, 3, 6, 74, 74, 75, 74, 74, 74, 74, 74, 74, 18, 19, 20, 21, 22, 23, 24,
    18, 25, 26, 27, 28, 29, 30, 74, 31, 32, 33, 74, 74, 74, 74, 37, 38, 39, 40, 6, 74, 34, 35, 74,
    35, 74, 9, 78, 78, 78, 9, 78, 0,
];

const MACHINE_TRANS_TARGS: &[u8] = &[
    5, 8, 5, 36, 2, 5, 1, 47, 5, 6, 5, 31, 33, 57, 58, 60, 61, 34, 37, 38, 39, 40, 41, 51, 52, 54,
    62, 55, 48, 49, 50, 44, 45, 46, 63, 64, 65, 56, 42, 43, 5, 5, 7, 0, 10, 11, 12, 13, 14, 25, 26,
    28, 29, 22, 23, 24, 17, 18, 19, 30, 15, 16, 5, 5, 9, 20, 5, 21, 27, 5, 32, 5, 35, 5, 5, 3, 4,
    53, 5, 59,
];

const MACHINE_TRANS_ACTIONS: &[u8] = &[
    1, 0, 2, 3, 0, 4, 0, 5, 8, 5, 9, 0, 5, 10, 0, 10, 3, 0, 5, 5, 0, 0, 0, 5, 5, 5, 3, 3, 5, 5, 5,
    5, 5, 5, 0, 0, 0, 3, 0, 0, 11, 12, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0, 5, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    13, 14, 0, 0, 15, 0, 0, 16, 0, 17, 0, 18, 19, 0, 0, 5, 20, 0,
];

const MACHINE_FROM_STATE_ACTIONS: &[u8] = &[
    0, 0, 0, 0, 0, 7, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0,
];

const MACHINE_EOF_TRANS: &[u8] = &[
    1, 3, 3, 6, 6, 0, 42, 42, 64, 64, 42, 42, 42, 42, 42, 42, 42, 42, 42, 42, 67, 42, 42, 42, 42,
    42, 42, 42, 42, 42, 64, 70, 72, 42, 74, 74, 75, 75, 75, 75, 75, 75, 75, 75, 75, 75, 75, 75, 75,
    75, 75, 75, 75, 75, 75, 75, 75, 79, 75, 75, 79, 75, 75, 75, 75, 79,
];

const MACHINE: SpanTable = SpanTable {
    trans_keys: MACHINE_TRANS_KEYS,
    key_spans: MACHINE_KEY_SPANS,
    index_offsets: MACHINE_INDEX_OFFSETS,
    indices: MACHINE_INDICIES,
    trans_targs: MACHINE_TRANS_TARGS,
    trans_actions: MACHINE_TRANS_ACTIONS,
    from_state_actions: MACHINE_FROM_STATE_ACTIONS,
    eof_trans: MACHINE_EOF_TRANS,
    start: 5,
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SyllableType {
    IndependentCluster,
    ViramaTerminatedCluster,
    SakotTerminatedCluster,
    StandardCluster,
    NumberJoinerTerminatedCluster,
    NumeralCluster,
    SymbolCluster,
    HieroglyphCluster,
    BrokenCluster,
    NonCluster,
}

fn action(id: u8) -> Action {
    use SyllableType::*;

    match id {
        5 => Action::Extend,
        3 => Action::ExtendAs(BrokenCluster as u8),
        10 => Action::ExtendAs(NonCluster as u8),
        8 => Action::EmitThrough(IndependentCluster as u8),
        13 => Action::EmitThrough(StandardCluster as u8),
        11 => Action::EmitThrough(BrokenCluster as u8),
        9 => Action::EmitThrough(NonCluster as u8),
        14 => Action::EmitBefore(ViramaTerminatedCluster as u8),
        15 => Action::EmitBefore(SakotTerminatedCluster as u8),
        12 => Action::EmitBefore(StandardCluster as u8),
        17 => Action::EmitBefore(NumberJoinerTerminatedCluster as u8),
        16 => Action::EmitBefore(NumeralCluster as u8),
        18 => Action::EmitBefore(SymbolCluster as u8),
        19 => Action::EmitBefore(BrokenCluster as u8),
        1 => Action::EmitToken(StandardCluster as u8),
        2 => Action::EmitPending,
        _ => Action::None,
    }
}

fn not_ccs_default_ignorable(info: &GlyphInfo) -> bool {
    !(matches!(info.complex_category(), category::O | category::RSV) && info.is_default_ignorable())
}

/// Default ignorables are invisible to the grammar; a ZWNJ is too when a
/// mark follows it.
fn included_glyphs(infos: &[GlyphInfo]) -> Vec<usize> {
    let mut included = Vec::with_capacity(infos.len());
    for (i, info) in infos.iter().enumerate() {
        if !not_ccs_default_ignorable(info) {
            continue;
        }

        if info.complex_category() == category::ZWNJ {
            let next = infos[i + 1..]
                .iter()
                .find(|next| not_ccs_default_ignorable(next));
            if next.map_or(false, |next| next.is_unicode_mark()) {
                continue;
            }
        }

        included.push(i);
    }

    included
}

pub fn find_syllables(buffer: &mut Buffer) {
    let len = buffer.len();
    let included = included_glyphs(&buffer.info[..len]);
    let categories: Vec<u8> = included
        .iter()
        .map(|&i| buffer.info[i].complex_category())
        .collect();

    let mut serial = super::machine::SyllableSerial::default();
    scan(&MACHINE, &categories, action, |ts, te, kind| {
        let start = included[ts];
        let end = included.get(te).copied().unwrap_or(len);
        let syllable = serial.next(kind);
        for info in &mut buffer.info[start..end] {
            info.set_syllable(syllable);
        }

        if kind == SyllableType::BrokenCluster as u8 {
            buffer.scratch_flags |= BufferScratchFlags::HAS_BROKEN_SYLLABLE;
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn syllables(categories: &[u8]) -> Vec<(usize, usize, u8)> {
        let mut found = Vec::new();
        scan(&MACHINE, categories, action, |s, e, k| found.push((s, e, k)));
        found
    }

    #[test]
    fn base_with_vowel_is_standard() {
        use category::*;
        assert_eq!(
            syllables(&[B, VAbv]),
            vec![(0, 2, SyllableType::StandardCluster as u8)]
        );
    }

    #[test]
    fn lone_vowel_sign_is_broken() {
        use category::*;
        let found = syllables(&[VAbv]);
        assert_eq!(found, vec![(0, 1, SyllableType::BrokenCluster as u8)]);
    }

    #[test]
    fn virama_terminates() {
        use category::*;
        let found = syllables(&[B, H, O]);
        assert_eq!(found[0], (0, 2, SyllableType::ViramaTerminatedCluster as u8));
        assert_eq!(found[1], (2, 3, SyllableType::IndependentCluster as u8));
    }

    #[test]
    fn other_is_independent() {
        let found = syllables(&[category::O, category::O]);
        assert_eq!(found.len(), 2);
        assert!(found
            .iter()
            .all(|&(_, _, k)| k == SyllableType::IndependentCluster as u8));
    }
}
