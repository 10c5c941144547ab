//! Syllable segmentation for Khmer.
//!
//! The transition tables are generated by Ragel from `khmer_machine.rl`.

use alloc::vec::Vec;

use super::machine::{scan, Action, ClassTable, SyllableSerial};
use crate::buffer::{Buffer, BufferScratchFlags};

const TRANS_KEYS: &[u8] = &[
    3, 10, 3, 10, 0, 0, 3, 10, 3, 10, 3, 10, 3, 10, 3, 10, 3, 10, 3, 10, 3, 10, 3, 10, 0, 0, 3, 10,
    3, 10, 3, 10, 3, 10, 3, 10, 3, 10, 3, 10, 0, 11, 2, 11, 0, 0, 2, 11, 11, 11, 2, 11, 2, 11, 2,
    11, 2, 11, 2, 11, 0, 0, 2, 11, 2, 11, 11, 11, 2, 11, 2, 11, 2, 11, 2, 11, 2, 11, 3, 10, 0, 0,
];

const CHAR_CLASS: &[i8] = &[
    0, 0, 1, 2, 3, 3, 1, 1, 1, 4, 4, 1, 1, 1, 0, 1, 1, 1, 1, 5, 6, 7, 8, 1, 9, 10, 11, 0, 0,
];

const INDEX_OFFSETS: &[i16] = &[
    0, 8, 16, 17, 25, 33, 41, 49, 57, 65, 73, 81, 89, 90, 98, 106, 114, 122, 130, 138, 146, 158,
    168, 169, 179, 180, 190, 200, 210, 220, 230, 231, 241, 251, 252, 262, 272, 282, 292, 302, 0, 0,
];

const INDICES: &[i8] = &[
    1, 0, 2, 0, 0, 0, 3, 4, 1, 0, 0, 0, 0, 0, 0, 4, 5, 1, 0, 2, 0, 0, 0, 0, 4, 6, 0, 0, 0, 0, 0, 0,
    2, 7, 0, 0, 0, 0, 0, 0, 8, 9, 0, 2, 0, 0, 0, 0, 10, 9, 0, 0, 0, 0, 0, 0, 10, 11, 0, 2, 0, 0, 0,
    0, 12, 11, 0, 0, 0, 0, 0, 0, 12, 14, 13, 15, 13, 13, 13, 16, 17, 14, 18, 18, 18, 18, 18, 18,
    17, 19, 14, 13, 15, 13, 13, 13, 13, 17, 20, 13, 13, 13, 13, 13, 13, 15, 21, 13, 13, 13, 13, 13,
    13, 22, 23, 13, 15, 13, 13, 13, 13, 24, 23, 13, 13, 13, 13, 13, 13, 24, 25, 13, 15, 13, 13, 13,
    13, 26, 25, 13, 13, 13, 13, 13, 13, 26, 29, 28, 30, 31, 3, 15, 24, 26, 22, 28, 17, 19, 33, 34,
    32, 2, 10, 12, 8, 3, 4, 5, 29, 35, 36, 32, 2, 10, 12, 8, 32, 4, 5, 5, 35, 6, 32, 32, 32, 32, 8,
    32, 2, 5, 35, 7, 32, 32, 32, 32, 32, 32, 8, 5, 35, 37, 32, 2, 32, 32, 8, 32, 10, 5, 35, 38, 32,
    2, 10, 32, 8, 32, 12, 5, 33, 36, 32, 2, 10, 12, 8, 32, 4, 5, 40, 30, 41, 39, 15, 24, 26, 22,
    16, 17, 19, 42, 43, 39, 15, 24, 26, 22, 39, 17, 19, 19, 42, 20, 39, 39, 39, 39, 22, 39, 15, 19,
    42, 21, 39, 39, 39, 39, 39, 39, 22, 19, 42, 44, 39, 15, 39, 39, 22, 39, 24, 19, 42, 45, 39, 15,
    24, 39, 22, 39, 26, 19, 30, 43, 39, 15, 24, 26, 22, 39, 17, 19, 14, 46, 15, 46, 46, 46, 46, 17,
    0, 0,
];

const INDEX_DEFAULTS: &[i8] = &[
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 13, 18, 13, 13, 13, 13, 13, 13, 13, 13, 28, 32, 32, 32, 32, 32,
    32, 32, 32, 32, 39, 39, 39, 39, 39, 39, 39, 39, 39, 46, 0, 0,
];

const COND_TARGS: &[i8] = &[
    20, 1, 25, 29, 23, 24, 4, 5, 26, 7, 27, 9, 28, 20, 11, 34, 38, 32, 20, 33, 14, 15, 35, 17, 36,
    19, 37, 20, 20, 21, 30, 39, 20, 22, 0, 2, 3, 6, 8, 20, 31, 10, 12, 13, 16, 18, 20, 0, 0,
];

const COND_ACTIONS: &[i8] = &[
    1, 0, 2, 2, 2, 0, 0, 0, 2, 0, 2, 0, 2, 3, 0, 2, 4, 4, 5, 0, 0, 0, 2, 0, 2, 0, 2, 0, 8, 2, 0, 9,
    10, 0, 0, 0, 0, 0, 0, 11, 4, 0, 0, 0, 0, 0, 12, 0, 0,
];

const FROM_STATE_ACTIONS: &[i8] = &[
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 7, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
];

const EOF_TRANS: &[i8] = &[
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 14, 19, 14, 14, 14, 14, 14, 14, 14, 14, 28, 33, 33, 33, 33, 33,
    33, 33, 33, 33, 40, 40, 40, 40, 40, 40, 40, 40, 40, 47, 0, 0,
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
    start: 20,
};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SyllableType {
    ConsonantSyllable = 0,
    BrokenCluster,
    NonKhmerCluster,
}

fn action(id: u8) -> Action {
    use SyllableType::*;

    match id {
        2 => Action::Extend,
        4 => Action::ExtendAs(BrokenCluster as u8),
        9 => Action::ExtendAs(NonKhmerCluster as u8),
        8 => Action::EmitThrough(NonKhmerCluster as u8),
        10 => Action::EmitBefore(ConsonantSyllable as u8),
        11 => Action::EmitBefore(BrokenCluster as u8),
        12 => Action::EmitBefore(NonKhmerCluster as u8),
        1 => Action::EmitToken(ConsonantSyllable as u8),
        3 => Action::EmitToken(BrokenCluster as u8),
        5 => Action::EmitPending,
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
    fn coeng_joins_consonants() {
        assert_eq!(
            syllables(&[C, H, C, VPRE]),
            vec![(0, 4, SyllableType::ConsonantSyllable as u8)]
        );
    }

    #[test]
    fn two_syllables() {
        let found = syllables(&[C, VPST, RA, VABV]);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].0..found[0].1, 0..2);
        assert_eq!(found[1].0..found[1].1, 2..4);
    }

    #[test]
    fn orphan_vowel_sign_is_broken() {
        assert_eq!(
            syllables(&[VPRE]),
            vec![(0, 1, SyllableType::BrokenCluster as u8)]
        );
    }

    #[test]
    fn unknown_is_non_khmer() {
        assert_eq!(
            syllables(&[X]),
            vec![(0, 1, SyllableType::NonKhmerCluster as u8)]
        );
    }
}
