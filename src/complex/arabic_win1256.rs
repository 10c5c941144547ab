//! Hand-made lookups for legacy fonts whose glyph ids follow the
//! Windows-1256 code page.

use alloc::vec;
use alloc::vec::Vec;

use ttf_parser::GlyphId;

use super::arabic_fallback::{FallbackLookup, FallbackSubtable};
use crate::face::Face;
use crate::ot::layout::lookup_flags;
use crate::Tag;

/// ALEF, LAM, ALEF MAKSURA, YEH and SUKUN with their Windows-1256 glyphs.
const SIGNATURE: &[(u32, u16)] = &[
    (0x0627, 199),
    (0x0644, 225),
    (0x0649, 236),
    (0x064A, 237),
    (0x0652, 250),
];

#[rustfmt::skip]
const INIT_MEDI: &[(u16, u16)] = &[
    (198, 162), (200, 4), (201, 5), (202, 5), (203, 6), (204, 7), (205, 9), (206, 11),
    (211, 13), (212, 14), (213, 15), (214, 26), (223, 140), (225, 141), (227, 142),
    (228, 143), (236, 154), (237, 154),
];

const INIT: &[(u16, u16)] = &[(218, 27), (219, 30), (221, 128), (222, 131), (229, 144)];

const MEDI: &[(u16, u16)] = &[(218, 28), (219, 31), (221, 129), (222, 138), (229, 149)];

#[rustfmt::skip]
const FINA: &[(u16, u16)] = &[
    (194, 2), (195, 1), (197, 3), (198, 181), (199, 0), (201, 159), (204, 8), (205, 10),
    (206, 12), (218, 29), (219, 127), (229, 152), (236, 160), (237, 156),
];

const MEDI_FINA_LAM_ALEF: &[(u16, u16)] = &[(165, 170), (178, 179), (180, 185), (252, 255)];

/// LAM followed by an ALEF form.
const LAM_ALEF: (u16, &[(u16, u16)]) = (225, &[(199, 165), (195, 178), (194, 180), (197, 252)]);

/// SHADDA followed by FATHA, DAMMA or KASRA.
const SHADDA: (u16, &[(u16, u16)]) = (248, &[(243, 172), (245, 173), (246, 175)]);

pub fn is_win1256_font(face: &Face) -> bool {
    SIGNATURE
        .iter()
        .all(|&(u, glyph)| face.get_nominal_glyph(u) == Some(GlyphId(glyph)))
}

fn single(pairs: &[(u16, u16)]) -> FallbackSubtable {
    FallbackSubtable::Single(
        pairs
            .iter()
            .map(|&(from, to)| (GlyphId(from), GlyphId(to)))
            .collect(),
    )
}

fn ligature((first, pairs): (u16, &[(u16, u16)])) -> FallbackSubtable {
    let pairs = pairs
        .iter()
        .map(|&(second, lig)| (GlyphId(second), GlyphId(lig)))
        .collect();
    FallbackSubtable::Ligature(vec![(GlyphId(first), pairs)])
}

/// The lookups in application order, with the feature that enables each.
pub fn lookups() -> Vec<(Tag, FallbackLookup)> {
    let ignore_marks = u32::from(lookup_flags::IGNORE_MARKS);
    vec![
        (
            Tag::from_bytes(b"rlig"),
            FallbackLookup {
                props: ignore_marks,
                subtables: vec![ligature(LAM_ALEF)],
            },
        ),
        (
            Tag::from_bytes(b"init"),
            FallbackLookup {
                props: ignore_marks,
                subtables: vec![single(INIT_MEDI), single(INIT)],
            },
        ),
        (
            Tag::from_bytes(b"medi"),
            FallbackLookup {
                props: ignore_marks,
                subtables: vec![single(INIT_MEDI), single(MEDI), single(MEDI_FINA_LAM_ALEF)],
            },
        ),
        (
            Tag::from_bytes(b"fina"),
            FallbackLookup {
                props: ignore_marks,
                subtables: vec![single(FINA), single(MEDI_FINA_LAM_ALEF)],
            },
        ),
        (
            Tag::from_bytes(b"rlig"),
            FallbackLookup {
                props: 0,
                subtables: vec![ligature(SHADDA)],
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_tables_are_sorted() {
        for table in [INIT_MEDI, INIT, MEDI, FINA, MEDI_FINA_LAM_ALEF] {
            assert!(table.windows(2).all(|w| w[0].0 < w[1].0));
        }
    }

    #[test]
    fn lookup_order() {
        let tags: Vec<_> = lookups().into_iter().map(|(tag, _)| tag).collect();
        assert_eq!(
            tags,
            [b"rlig", b"init", b"medi", b"fina", b"rlig"].map(|t| Tag::from_bytes(t))
        );
    }
}
