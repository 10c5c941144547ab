//! Indic syllable segmentation.
//!
//! The grammar is matched with small combinators over sets of end
//! positions, so alternatives and repetitions never need to backtrack. At
//! every position the longest syllable wins; ties go to the kind listed
//! first in [`SyllableType`].

use smallvec::SmallVec;

use super::indic::category::*;
use super::machine::SyllableSerial;
use crate::buffer::{Buffer, BufferScratchFlags};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SyllableType {
    ConsonantSyllable = 0,
    VowelSyllable,
    StandaloneCluster,
    SymbolCluster,
    BrokenCluster,
    NonIndicCluster,
}

/// Every position a pattern may end at, sorted and without duplicates.
type Ends = SmallVec<[usize; 8]>;

fn insert(ends: &mut Ends, p: usize) {
    if let Err(i) = ends.binary_search(&p) {
        ends.insert(i, p);
    }
}

fn union(mut a: Ends, b: Ends) -> Ends {
    for p in b {
        insert(&mut a, p);
    }
    a
}

fn one(cs: &[u8], from: &[usize], accept: impl Fn(u8) -> bool) -> Ends {
    let mut ends = Ends::new();
    for &p in from {
        if p < cs.len() && accept(cs[p]) {
            insert(&mut ends, p + 1);
        }
    }
    ends
}

fn is(cs: &[u8], from: &[usize], category: u8) -> Ends {
    one(cs, from, |c| c == category)
}

fn optional(from: &[usize], f: impl Fn(&[usize]) -> Ends) -> Ends {
    union(Ends::from_slice(from), f(from))
}

fn repeat(from: &[usize], f: impl Fn(&[usize]) -> Ends) -> Ends {
    let mut all = Ends::from_slice(from);
    let mut frontier = all.clone();
    while !frontier.is_empty() {
        let mut next = Ends::new();
        for p in f(&frontier) {
            if all.binary_search(&p).is_err() {
                insert(&mut all, p);
                next.push(p);
            }
        }
        frontier = next;
    }
    all
}

fn match_c(cs: &[u8], from: &[usize]) -> Ends {
    one(cs, from, |c| c == C || c == RA)
}

fn match_n(cs: &[u8], from: &[usize]) -> Ends {
    let rs = optional(from, |f| is(cs, &is(cs, f, ZWNJ), RS));
    let rs = union(rs, is(cs, from, RS));
    optional(&rs, |f| optional(&is(cs, f, N), |f| is(cs, f, N)))
}

fn match_z(cs: &[u8], from: &[usize]) -> Ends {
    one(cs, from, |c| c == ZWJ || c == ZWNJ)
}

fn match_reph(cs: &[u8], from: &[usize]) -> Ends {
    union(is(cs, &is(cs, from, RA), H), is(cs, from, REPHA))
}

fn match_cn(cs: &[u8], from: &[usize]) -> Ends {
    let c = match_c(cs, from);
    let zwj = optional(&c, |f| is(cs, f, ZWJ));
    optional(&zwj, |f| match_n(cs, f))
}

fn match_symbol(cs: &[u8], from: &[usize]) -> Ends {
    optional(&is(cs, from, SYMBOL), |f| is(cs, f, N))
}

fn match_matra_group(cs: &[u8], from: &[usize]) -> Ends {
    let joiners = repeat(from, |f| match_z(cs, f));
    let matra = is(cs, &joiners, M);
    let nukta = optional(&matra, |f| is(cs, f, N));
    optional(&nukta, |f| is(cs, f, H))
}

fn match_syllable_tail(cs: &[u8], from: &[usize]) -> Ends {
    let modifiers = optional(from, |f| {
        let sm = is(cs, &optional(f, |f| match_z(cs, f)), SM);
        let sm = optional(&sm, |f| is(cs, f, SM));
        optional(&sm, |f| is(cs, f, ZWNJ))
    });
    // Vedic signs share the `A` category.
    repeat(&modifiers, |f| is(cs, f, A))
}

fn match_halant_group(cs: &[u8], from: &[usize]) -> Ends {
    let halant = is(cs, &optional(from, |f| match_z(cs, f)), H);
    optional(&halant, |f| optional(&is(cs, f, ZWJ), |f| is(cs, f, N)))
}

fn match_final_halant_group(cs: &[u8], from: &[usize]) -> Ends {
    union(
        match_halant_group(cs, from),
        is(cs, &is(cs, from, H), ZWNJ),
    )
}

fn match_medial_group(cs: &[u8], from: &[usize]) -> Ends {
    optional(from, |f| is(cs, f, CM))
}

fn match_halant_or_matra_group(cs: &[u8], from: &[usize]) -> Ends {
    union(
        match_final_halant_group(cs, from),
        repeat(from, |f| match_matra_group(cs, f)),
    )
}

fn match_complex_syllable_tail(cs: &[u8], from: &[usize]) -> Ends {
    let stacked = repeat(from, |f| match_cn(cs, &match_halant_group(cs, f)));
    let medial = match_medial_group(cs, &stacked);
    let matras = match_halant_or_matra_group(cs, &medial);
    match_syllable_tail(cs, &matras)
}

fn match_consonant_syllable(cs: &[u8], from: &[usize]) -> Ends {
    let prefix = optional(from, |f| one(cs, f, |c| c == REPHA || c == CS));
    match_complex_syllable_tail(cs, &match_cn(cs, &prefix))
}

fn match_vowel_syllable(cs: &[u8], from: &[usize]) -> Ends {
    let reph = optional(from, |f| match_reph(cs, f));
    let vowel = optional(&is(cs, &reph, V), |f| match_n(cs, f));
    union(is(cs, &vowel, ZWJ), match_complex_syllable_tail(cs, &vowel))
}

fn match_standalone_cluster(cs: &[u8], from: &[usize]) -> Ends {
    let placeholder = is(
        cs,
        &optional(from, |f| one(cs, f, |c| c == REPHA || c == CS)),
        PLACEHOLDER,
    );
    let circle = is(cs, &optional(from, |f| match_reph(cs, f)), DOTTED_CIRCLE);
    let base = optional(&union(placeholder, circle), |f| match_n(cs, f));
    match_complex_syllable_tail(cs, &base)
}

fn match_symbol_cluster(cs: &[u8], from: &[usize]) -> Ends {
    match_syllable_tail(cs, &match_symbol(cs, from))
}

fn match_broken_cluster(cs: &[u8], from: &[usize]) -> Ends {
    let reph = optional(from, |f| match_reph(cs, f));
    let n = optional(&reph, |f| match_n(cs, f));
    match_complex_syllable_tail(cs, &n)
}

/// The syllable starting at `start`, as its length and kind.
fn match_syllable(cs: &[u8], start: usize) -> (usize, SyllableType) {
    let from = [start];
    let candidates = [
        (match_consonant_syllable(cs, &from), SyllableType::ConsonantSyllable),
        (match_vowel_syllable(cs, &from), SyllableType::VowelSyllable),
        (match_standalone_cluster(cs, &from), SyllableType::StandaloneCluster),
        (match_symbol_cluster(cs, &from), SyllableType::SymbolCluster),
        (match_broken_cluster(cs, &from), SyllableType::BrokenCluster),
    ];

    let mut best = (1, SyllableType::NonIndicCluster);
    let mut best_end = start;
    for (ends, kind) in candidates {
        if let Some(&end) = ends.last() {
            if end > best_end {
                best_end = end;
                best = (end - start, kind);
            }
        }
    }

    best
}

pub fn find_syllables(buffer: &mut Buffer) {
    let categories: SmallVec<[u8; 64]> = buffer
        .info
        .iter()
        .map(|info| info.complex_category())
        .collect();

    let mut serial = SyllableSerial::default();
    let mut start = 0;
    while start < categories.len() {
        let (len, kind) = match_syllable(&categories, start);
        if kind == SyllableType::BrokenCluster {
            buffer.scratch_flags |= BufferScratchFlags::HAS_BROKEN_SYLLABLE;
        }

        let syllable = serial.next(kind as u8);
        for info in &mut buffer.info[start..start + len] {
            info.set_syllable(syllable);
        }

        start += len;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn syllables(categories: &[u8]) -> Vec<(usize, SyllableType)> {
        let mut out = Vec::new();
        let mut start = 0;
        while start < categories.len() {
            let (len, kind) = match_syllable(categories, start);
            out.push((len, kind));
            start += len;
        }
        out
    }

    #[test]
    fn conjunct_with_matra() {
        // KA, VIRAMA, SSA, VOWEL SIGN I
        assert_eq!(
            syllables(&[C, H, C, M]),
            vec![(4, SyllableType::ConsonantSyllable)]
        );
    }

    #[test]
    fn reph_and_modifiers() {
        // RA, VIRAMA, KA, VOWEL SIGN AA, ANUSVARA
        assert_eq!(
            syllables(&[RA, H, C, M, SM]),
            vec![(5, SyllableType::ConsonantSyllable)]
        );
    }

    #[test]
    fn halant_zwnj_ends_syllable() {
        assert_eq!(
            syllables(&[C, H, ZWNJ, C]),
            vec![
                (3, SyllableType::ConsonantSyllable),
                (1, SyllableType::ConsonantSyllable),
            ]
        );
    }

    #[test]
    fn independent_vowel() {
        assert_eq!(
            syllables(&[V, SM, C]),
            vec![
                (2, SyllableType::VowelSyllable),
                (1, SyllableType::ConsonantSyllable),
            ]
        );
    }

    #[test]
    fn orphan_matra_is_broken() {
        assert_eq!(
            syllables(&[M, C]),
            vec![
                (1, SyllableType::BrokenCluster),
                (1, SyllableType::ConsonantSyllable),
            ]
        );
    }

    #[test]
    fn placeholder_carries_marks() {
        assert_eq!(
            syllables(&[PLACEHOLDER, M, X]),
            vec![
                (2, SyllableType::StandaloneCluster),
                (1, SyllableType::NonIndicCluster),
            ]
        );
    }

    #[test]
    fn broken_flag_is_set() {
        let mut buffer = Buffer::new();
        for c in [M, C] {
            let mut info = crate::buffer::GlyphInfo::default();
            info.set_complex_category(c);
            buffer.info.push(info);
        }

        find_syllables(&mut buffer);
        assert!(buffer
            .scratch_flags
            .contains(BufferScratchFlags::HAS_BROKEN_SYLLABLE));
        assert_ne!(buffer.info[0].syllable(), buffer.info[1].syllable());
        assert_eq!(buffer.info[0].syllable() & 0x0F, SyllableType::BrokenCluster as u8);
    }
}
