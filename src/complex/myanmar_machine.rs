//! Syllable segmentation for Myanmar.
//!
//! The transition tables are generated by Ragel from `myanmar_machine.rl`.

use alloc::vec::Vec;

use super::machine::{scan, Action, ClassTable, SyllableSerial};
use crate::buffer::{Buffer, BufferScratchFlags};

const TRANS_KEYS: &[u8] = &[
    0, 21, 1, 21, 3, 19, 3, 5, 1, 21, 1, 19, 1, 19, 3, 19, 3, 19, 1, 19, 1, 19, 1, 21, 3, 19, 0, 8,
    1, 19, 1, 19, 1, 20, 1, 19, 1, 21, 1, 21, 1, 19, 1, 21, 1, 21, 1, 21, 1, 21, 1, 21, 3, 19, 3,
    5, 1, 21, 1, 19, 1, 19, 3, 19, 3, 19, 1, 19, 1, 19, 1, 21, 3, 19, 0, 8, 1, 21, 1, 19, 1, 19, 1,
    20, 1, 19, 1, 21, 1, 21, 1, 19, 1, 21, 1, 21, 1, 21, 1, 21, 1, 21, 1, 21, 1, 21, 0, 21, 0, 8,
    0, 0,
];

const CHAR_CLASS: &[i8] = &[
    0, 0, 1, 2, 3, 3, 4, 5, 6, 7, 7, 4, 4, 4, 8, 4, 4, 9, 4, 10, 11, 12, 13, 4, 4, 4, 4, 4, 4, 4,
    4, 14, 4, 4, 15, 16, 17, 18, 19, 20, 21, 0, 0,
];

const INDEX_OFFSETS: &[i16] = &[
    0, 22, 43, 60, 63, 84, 103, 122, 139, 156, 175, 194, 215, 232, 241, 260, 279, 299, 318, 339,
    360, 379, 400, 421, 442, 463, 484, 501, 504, 525, 544, 563, 580, 597, 616, 635, 656, 673, 682,
    703, 722, 741, 761, 780, 801, 822, 841, 862, 883, 904, 925, 946, 967, 988, 1010, 0, 0,
];

const INDICES: &[i8] = &[
    2, 3, 4, 5, 1, 6, 7, 2, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 23, 24, 25, 22,
    26, 27, 22, 22, 22, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 25, 22, 26, 22, 22, 22, 22,
    22, 22, 22, 31, 40, 22, 22, 22, 22, 37, 25, 22, 26, 23, 22, 25, 22, 26, 27, 22, 22, 22, 41, 22,
    22, 31, 42, 43, 22, 22, 22, 37, 22, 42, 23, 22, 25, 22, 26, 27, 22, 22, 22, 22, 22, 22, 31, 22,
    22, 22, 22, 22, 37, 44, 22, 25, 22, 26, 37, 22, 22, 22, 22, 22, 22, 22, 45, 22, 22, 22, 22, 37,
    25, 22, 26, 22, 22, 22, 22, 22, 22, 22, 22, 45, 22, 22, 22, 22, 37, 25, 22, 26, 22, 22, 22, 22,
    22, 22, 22, 22, 22, 22, 22, 22, 22, 37, 23, 22, 25, 22, 26, 27, 22, 22, 22, 41, 22, 22, 31, 22,
    22, 22, 22, 22, 37, 23, 22, 25, 22, 26, 27, 22, 22, 22, 41, 22, 22, 31, 42, 22, 22, 22, 22, 37,
    23, 22, 25, 22, 26, 27, 22, 22, 22, 41, 22, 22, 31, 42, 22, 22, 22, 22, 37, 22, 42, 25, 22, 26,
    22, 22, 22, 22, 22, 22, 22, 31, 22, 22, 22, 22, 22, 37, 2, 22, 22, 22, 22, 22, 22, 22, 2, 23,
    22, 25, 22, 26, 27, 22, 22, 22, 28, 29, 22, 31, 22, 22, 22, 22, 22, 37, 23, 22, 25, 22, 26, 27,
    22, 22, 22, 22, 29, 22, 31, 22, 22, 22, 22, 22, 37, 23, 22, 25, 22, 26, 27, 22, 22, 22, 28, 29,
    30, 31, 22, 22, 22, 22, 22, 37, 46, 23, 22, 25, 22, 26, 27, 22, 22, 22, 28, 29, 30, 31, 22, 22,
    22, 22, 22, 37, 23, 22, 25, 22, 26, 27, 22, 22, 22, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 22,
    39, 23, 22, 25, 22, 26, 27, 22, 22, 22, 28, 29, 30, 31, 46, 22, 22, 22, 22, 37, 22, 39, 23, 22,
    25, 22, 26, 27, 22, 22, 22, 28, 29, 30, 31, 46, 22, 22, 22, 22, 37, 23, 22, 25, 22, 26, 27, 22,
    22, 22, 28, 29, 30, 31, 22, 33, 22, 35, 22, 37, 22, 39, 23, 22, 25, 22, 26, 27, 22, 22, 22, 28,
    29, 30, 31, 46, 33, 22, 22, 22, 37, 22, 39, 23, 22, 25, 22, 26, 27, 22, 22, 22, 28, 29, 30, 31,
    47, 33, 34, 35, 22, 37, 22, 39, 23, 22, 25, 22, 26, 27, 22, 22, 22, 28, 29, 30, 31, 22, 33, 34,
    35, 22, 37, 22, 39, 23, 24, 25, 22, 26, 27, 22, 22, 22, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37,
    22, 39, 49, 48, 6, 48, 48, 48, 48, 48, 48, 48, 13, 50, 48, 48, 48, 48, 19, 49, 48, 6, 3, 48,
    49, 48, 6, 7, 48, 48, 48, 51, 48, 48, 13, 52, 53, 48, 48, 48, 19, 48, 52, 3, 48, 49, 48, 6, 7,
    48, 48, 48, 48, 48, 48, 13, 48, 48, 48, 48, 48, 19, 54, 48, 49, 48, 6, 19, 48, 48, 48, 48, 48,
    48, 48, 55, 48, 48, 48, 48, 19, 49, 48, 6, 48, 48, 48, 48, 48, 48, 48, 48, 55, 48, 48, 48, 48,
    19, 49, 48, 6, 48, 48, 48, 48, 48, 48, 48, 48, 48, 48, 48, 48, 48, 19, 3, 48, 49, 48, 6, 7, 48,
    48, 48, 51, 48, 48, 13, 48, 48, 48, 48, 48, 19, 3, 48, 49, 48, 6, 7, 48, 48, 48, 51, 48, 48,
    13, 52, 48, 48, 48, 48, 19, 3, 48, 49, 48, 6, 7, 48, 48, 48, 51, 48, 48, 13, 52, 48, 48, 48,
    48, 19, 48, 52, 49, 48, 6, 48, 48, 48, 48, 48, 48, 48, 13, 48, 48, 48, 48, 48, 19, 56, 48, 48,
    48, 48, 48, 48, 48, 56, 3, 4, 49, 48, 6, 7, 48, 48, 48, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19,
    20, 21, 3, 48, 49, 48, 6, 7, 48, 48, 48, 10, 11, 48, 13, 48, 48, 48, 48, 48, 19, 3, 48, 49, 48,
    6, 7, 48, 48, 48, 48, 11, 48, 13, 48, 48, 48, 48, 48, 19, 3, 48, 49, 48, 6, 7, 48, 48, 48, 10,
    11, 12, 13, 48, 48, 48, 48, 48, 19, 57, 3, 48, 49, 48, 6, 7, 48, 48, 48, 10, 11, 12, 13, 48,
    48, 48, 48, 48, 19, 3, 48, 49, 48, 6, 7, 48, 48, 48, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19,
    48, 21, 3, 48, 49, 48, 6, 7, 48, 48, 48, 10, 11, 12, 13, 57, 48, 48, 48, 48, 19, 48, 21, 3, 48,
    49, 48, 6, 7, 48, 48, 48, 10, 11, 12, 13, 57, 48, 48, 48, 48, 19, 3, 48, 49, 48, 6, 7, 48, 48,
    48, 10, 11, 12, 13, 48, 15, 48, 17, 48, 19, 48, 21, 3, 48, 49, 48, 6, 7, 48, 48, 48, 10, 11,
    12, 13, 57, 15, 48, 48, 48, 19, 48, 21, 3, 48, 49, 48, 6, 7, 48, 48, 48, 10, 11, 12, 13, 58,
    15, 16, 17, 48, 19, 48, 21, 3, 48, 49, 48, 6, 7, 48, 48, 48, 10, 11, 12, 13, 48, 15, 16, 17,
    48, 19, 48, 21, 3, 4, 49, 48, 6, 7, 48, 48, 48, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 48, 21,
    23, 24, 25, 22, 26, 27, 22, 22, 22, 28, 29, 30, 31, 59, 33, 34, 35, 36, 37, 38, 39, 23, 60, 25,
    22, 26, 27, 22, 22, 22, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 22, 39, 2, 3, 4, 49, 48, 6, 7,
    2, 2, 48, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 2, 61, 61, 61, 61, 61, 61, 2, 2, 0,
    0,
];

const INDEX_DEFAULTS: &[i8] = &[
    1, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22, 22,
    22, 22, 48, 48, 48, 48, 48, 48, 48, 48, 48, 48, 48, 48, 48, 48, 48, 48, 48, 48, 48, 48, 48, 48,
    48, 48, 48, 22, 22, 48, 61, 0, 0,
];

const COND_TARGS: &[i8] = &[
    0, 0, 1, 26, 37, 0, 27, 29, 51, 54, 39, 40, 41, 28, 43, 44, 46, 47, 48, 30, 50, 45, 0, 2, 13,
    0, 3, 5, 14, 15, 16, 4, 18, 19, 21, 22, 23, 6, 25, 20, 12, 9, 10, 11, 7, 8, 17, 24, 0, 0, 36,
    33, 34, 35, 31, 32, 38, 42, 49, 52, 53, 0, 0, 0,
];

const COND_ACTIONS: &[i8] = &[
    0, 3, 0, 0, 0, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 5, 0, 0, 6, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 7, 8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 9, 0, 0,
];

const FROM_STATE_ACTIONS: &[i8] = &[
    2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

const EOF_TRANS: &[i8] = &[
    1, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23, 23,
    23, 23, 49, 49, 49, 49, 49, 49, 49, 49, 49, 49, 49, 49, 49, 49, 49, 49, 49, 49, 49, 49, 49, 49,
    49, 49, 49, 23, 23, 49, 62, 0, 0,
];

const MACHINE: ClassTable = ClassTable {
    trans_keys: TRANS_KEYS,
    char_class: CHAR_CLASS,
    index_offsets: INDEX_OFFSETS,
    indices: INDICES,
    index_defaults: INDEX_DEFAULTS,
    cond_targs: COND_TARGS,
    cond_actions: COND_ACTIONS,
    from_state_actions: FROM_STATE_ACTIONS,
    eof_trans: EOF_TRANS,
    start: 0,
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SyllableType {
    ConsonantSyllable = 0,
    PunctuationCluster,
    BrokenCluster,
    NonMyanmarCluster,
}

fn action(id: u8) -> Action {
    use SyllableType::*;

    match id {
        6 => Action::EmitThrough(ConsonantSyllable as u8),
        3 | 4 => Action::EmitThrough(NonMyanmarCluster as u8),
        8 => Action::EmitThrough(BrokenCluster as u8),
        5 => Action::EmitBefore(ConsonantSyllable as u8),
        7 => Action::EmitBefore(BrokenCluster as u8),
        9 => Action::EmitBefore(NonMyanmarCluster as u8),
        _ => Action::None,
    }
}

pub fn find_syllables(buffer: &mut Buffer) {
    let len = buffer.len();
    let categories: Vec<u8> = buffer.info[..len]
        .iter()
        .map(|info| info.complex_category())
        .collect();

    let mut serial = SyllableSerial::default();
    scan(&MACHINE, &categories, action, |start, end, kind| {
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
    use crate::complex::indic::category::*;

    fn syllables(categories: &[u8]) -> Vec<(usize, usize, u8)> {
        let mut found = Vec::new();
        scan(&MACHINE, categories, action, |s, e, k| found.push((s, e, k)));
        found
    }

    #[test]
    fn kinzi_is_one_syllable() {
        // nga, asat, virama, ka
        assert_eq!(
            syllables(&[RA, AS, H, C]),
            vec![(0, 4, SyllableType::ConsonantSyllable as u8)]
        );
    }

    #[test]
    fn medials_and_vowels_stay_together() {
        assert_eq!(
            syllables(&[C, MR, VPRE, VBLW]),
            vec![(0, 4, SyllableType::ConsonantSyllable as u8)]
        );
    }

    #[test]
    fn leading_vowel_sign_is_broken() {
        let found = syllables(&[VPRE, C]);
        assert_eq!(found[0], (0, 1, SyllableType::BrokenCluster as u8));
        assert_eq!(found[1], (1, 2, SyllableType::ConsonantSyllable as u8));
    }
}
