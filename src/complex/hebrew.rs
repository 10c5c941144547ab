use core::convert::TryFrom;

use crate::ot::normalize::ShapeNormalizeContext;
use crate::unicode_norm;

/// Dagesh presentation forms for U+05D0..=U+05EA.
/// Some letters have none encoded.
const S_DAGESH_FORMS: &[u32] = &[
    0xFB30, // ALEF
    0xFB31, // BET
    0xFB32, // GIMEL
    0xFB33, // DALET
    0xFB34, // HE
    0xFB35, // VAV
    0xFB36, // ZAYIN
    0x0000, // HET
    0xFB38, // TET
    0xFB39, // YOD
    0xFB3A, // FINAL KAF
    0xFB3B, // KAF
    0xFB3C, // LAMED
    0x0000, // FINAL MEM
    0xFB3E, // MEM
    0x0000, // FINAL NUN
    0xFB40, // NUN
    0xFB41, // SAMEKH
    0x0000, // AYIN
    0xFB43, // FINAL PE
    0xFB44, // PE
    0x0000, // FINAL TSADI
    0xFB46, // TSADI
    0xFB47, // QOF
    0xFB48, // RESH
    0xFB49, // SHIN
    0xFB4A, // TAV
];

/// Presentation forms excluded from canonical composition but still wanted
/// by fonts without GPOS mark positioning.
fn compose_presentation_form(a: u32, b: u32) -> Option<u32> {
    let ab = match (b, a) {
        // HIRIQ
        (0x05B4, 0x05D9) => 0xFB1D,
        // PATAH
        (0x05B7, 0x05D9) => 0xFB1F,
        (0x05B7, 0x05D0) => 0xFB2E,
        // QAMATS
        (0x05B8, 0x05D0) => 0xFB2F,
        // HOLAM
        (0x05B9, 0x05D5) => 0xFB4B,
        // DAGESH
        (0x05BC, 0x05D0..=0x05EA) => S_DAGESH_FORMS[(a - 0x05D0) as usize],
        (0x05BC, 0xFB2A) => 0xFB2C,
        (0x05BC, 0xFB2B) => 0xFB2D,
        // RAFE
        (0x05BF, 0x05D1) => 0xFB4C,
        (0x05BF, 0x05DB) => 0xFB4D,
        (0x05BF, 0x05E4) => 0xFB4E,
        // SHIN DOT
        (0x05C1, 0x05E9) => 0xFB2A,
        (0x05C1, 0xFB49) => 0xFB2C,
        // SIN DOT
        (0x05C2, 0x05E9) => 0xFB2B,
        (0x05C2, 0xFB49) => 0xFB2D,
        _ => 0,
    };

    (ab != 0).then_some(ab)
}

pub fn compose(ctx: &ShapeNormalizeContext, a: char, b: char) -> Option<char> {
    if let Some(ab) = unicode_norm::compose(a, b) {
        return Some(ab);
    }

    if ctx.plan.has_gpos_mark {
        return None;
    }

    // https://bugzilla.mozilla.org/show_bug.cgi?id=728866
    compose_presentation_form(a as u32, b as u32).and_then(|ab| char::try_from(ab).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dagesh_forms() {
        // BET + DAGESH
        assert_eq!(compose_presentation_form(0x05D1, 0x05BC), Some(0xFB31));
        // HET has no dagesh form.
        assert_eq!(compose_presentation_form(0x05D7, 0x05BC), None);
        // SHIN WITH SHIN DOT + DAGESH
        assert_eq!(compose_presentation_form(0xFB2A, 0x05BC), Some(0xFB2C));
    }

    #[test]
    fn shin_and_sin_dots() {
        assert_eq!(compose_presentation_form(0x05E9, 0x05C1), Some(0xFB2A));
        assert_eq!(compose_presentation_form(0x05E9, 0x05C2), Some(0xFB2B));
        assert_eq!(compose_presentation_form(0xFB49, 0x05C2), Some(0xFB2D));
    }

    #[test]
    fn unrelated_pairs() {
        assert_eq!(compose_presentation_form(0x05D0, 0x05C1), None);
        assert_eq!(compose_presentation_form(0x0041, 0x05BC), None);
    }
}
