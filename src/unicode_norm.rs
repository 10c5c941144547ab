use core::convert::TryFrom;

use smallvec::SmallVec;

const S_BASE: u32 = 0xAC00;
const L_BASE: u32 = 0x1100;
const V_BASE: u32 = 0x1161;
const T_BASE: u32 = 0x11A7;
const L_COUNT: u32 = 19;
const V_COUNT: u32 = 21;
const T_COUNT: u32 = 28;
const N_COUNT: u32 = V_COUNT * T_COUNT;
const S_COUNT: u32 = L_COUNT * N_COUNT;

/// Canonical composition of a pair. Hangul is handled algorithmically.
pub fn compose(a: char, b: char) -> Option<char> {
    if let Some(ab) = compose_hangul(a as u32, b as u32) {
        return char::try_from(ab).ok();
    }

    unicode_normalization::char::compose(a, b)
}

/// Single-step canonical decomposition.
///
/// Returns `(a, None)` for singleton decompositions and `(a, Some(b))` for
/// pairs, where `a` may itself be decomposable further.
pub fn decompose(ab: char) -> Option<(char, Option<char>)> {
    if let Some((a, b)) = decompose_hangul(ab as u32) {
        return Some((char::try_from(a).ok()?, char::try_from(b).ok()));
    }

    let mut parts: SmallVec<[char; 4]> = SmallVec::new();
    unicode_normalization::char::decompose_canonical(ab, |c| parts.push(c));

    match parts.as_slice() {
        [] => None,
        [a] if *a == ab => None,
        [a] => Some((*a, None)),
        [a, b] => Some((*a, Some(*b))),
        [init @ .., last] => {
            // Rebuild the first half of a multi-level decomposition.
            let mut a = init[0];
            for &c in &init[1..] {
                a = unicode_normalization::char::compose(a, c)?;
            }

            Some((a, Some(*last)))
        }
    }
}

fn compose_hangul(l: u32, v: u32) -> Option<u32> {
    if (L_BASE..L_BASE + L_COUNT).contains(&l) && (V_BASE..V_BASE + V_COUNT).contains(&v) {
        Some(S_BASE + (l - L_BASE) * N_COUNT + (v - V_BASE) * T_COUNT)
    } else if (S_BASE..=S_BASE + S_COUNT - T_COUNT).contains(&l)
        && (T_BASE + 1..T_BASE + T_COUNT).contains(&v)
        && (l - S_BASE) % T_COUNT == 0
    {
        Some(l + (v - T_BASE))
    } else {
        None
    }
}

fn decompose_hangul(ab: u32) -> Option<(u32, u32)> {
    let si = ab.wrapping_sub(S_BASE);
    if si >= S_COUNT {
        return None;
    }

    if si % T_COUNT != 0 {
        // LV,T
        Some((S_BASE + (si / T_COUNT) * T_COUNT, T_BASE + (si % T_COUNT)))
    } else {
        // L,V
        Some((L_BASE + si / N_COUNT, V_BASE + (si % N_COUNT) / T_COUNT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latin() {
        assert_eq!(compose('A', '\u{0301}'), Some('Á'));
        assert_eq!(decompose('Á'), Some(('A', Some('\u{0301}'))));
        assert_eq!(decompose('a'), None);
    }

    #[test]
    fn two_level() {
        // U+1EA5 = U+00E2 U+0301 = a U+0302 U+0301
        assert_eq!(decompose('\u{1EA5}'), Some(('\u{00E2}', Some('\u{0301}'))));
    }

    #[test]
    fn singleton() {
        assert_eq!(decompose('\u{2126}'), Some(('\u{03A9}', None)));
    }

    #[test]
    fn hangul() {
        assert_eq!(decompose('\u{D4DB}'), Some(('\u{D4CC}', Some('\u{11B6}'))));
        assert_eq!(decompose('\u{D4CC}'), Some(('\u{1111}', Some('\u{1171}'))));
        assert_eq!(compose('\u{1111}', '\u{1171}'), Some('\u{D4CC}'));
        assert_eq!(compose('\u{D4CC}', '\u{11B6}'), Some('\u{D4DB}'));
    }
}
