use super::ShaperData;
use crate::buffer::{Buffer, BufferClusterLevel, BufferFlags, GlyphInfo};
use crate::face::Face;
use crate::ot::{FeatureFlags, Map};
use crate::plan::{ShapePlan, ShapePlanner};
use crate::{Mask, Tag};

const LJMO: u8 = 1;
const VJMO: u8 = 2;
const TJMO: u8 = 3;

const L_BASE: u32 = 0x1100;
const V_BASE: u32 = 0x1161;
const T_BASE: u32 = 0x11A7;
const L_COUNT: u32 = 19;
const V_COUNT: u32 = 21;
const T_COUNT: u32 = 28;
const N_COUNT: u32 = V_COUNT * T_COUNT;
const S_COUNT: u32 = L_COUNT * N_COUNT;
const S_BASE: u32 = 0xAC00;

const DOTTED_CIRCLE: u32 = 0x25CC;

impl GlyphInfo {
    fn hangul_shaping_feature(&self) -> u8 {
        self.complex_aux()
    }

    fn set_hangul_shaping_feature(&mut self, feature: u8) {
        self.set_complex_aux(feature)
    }
}

pub struct HangulShapePlan {
    mask_array: [Mask; 4],
}

impl HangulShapePlan {
    pub fn new(map: &Map) -> Self {
        HangulShapePlan {
            mask_array: [
                0,
                map.one_mask(Tag::from_bytes(b"ljmo")),
                map.one_mask(Tag::from_bytes(b"vjmo")),
                map.one_mask(Tag::from_bytes(b"tjmo")),
            ],
        }
    }
}

pub fn collect_features(planner: &mut ShapePlanner) {
    for tag in [b"ljmo", b"vjmo", b"tjmo"] {
        planner
            .ot_map
            .add_feature(Tag::from_bytes(tag), FeatureFlags::empty(), 1);
    }
}

pub fn override_features(planner: &mut ShapePlanner) {
    // Some CJK fonts put all their jamo lookups in `calt`, which Uniscribe
    // does not apply for Hangul.
    planner.ot_map.disable_feature(Tag::from_bytes(b"calt"));
}

fn is_combining_l(u: u32) -> bool {
    (L_BASE..L_BASE + L_COUNT).contains(&u)
}

fn is_combining_v(u: u32) -> bool {
    (V_BASE..V_BASE + V_COUNT).contains(&u)
}

fn is_combining_t(u: u32) -> bool {
    (T_BASE + 1..T_BASE + T_COUNT).contains(&u)
}

fn is_combined_s(u: u32) -> bool {
    (S_BASE..S_BASE + S_COUNT).contains(&u)
}

fn is_l(u: u32) -> bool {
    matches!(u, 0x1100..=0x115F | 0xA960..=0xA97C)
}

fn is_v(u: u32) -> bool {
    matches!(u, 0x1160..=0x11A7 | 0xD7B0..=0xD7C6)
}

fn is_t(u: u32) -> bool {
    matches!(u, 0x11A8..=0x11FF | 0xD7CB..=0xD7FB)
}

fn is_tone_mark(u: u32) -> bool {
    matches!(u, 0x302E | 0x302F)
}

/// The precomposed syllable for `<L,V,T?>`, if Unicode has one.
fn compose_syllable(l: u32, v: u32, t: Option<u32>) -> Option<u32> {
    if !is_combining_l(l) || !is_combining_v(v) {
        return None;
    }

    let t_index = match t {
        Some(t) if is_combining_t(t) => t - T_BASE,
        Some(_) => return None,
        None => 0,
    };

    Some(S_BASE + (l - L_BASE) * N_COUNT + (v - V_BASE) * T_COUNT + t_index)
}

/// Splits a precomposed syllable into its jamo. The trailing one is
/// `T_BASE` for an LV syllable.
fn decompose_syllable(s: u32) -> [u32; 3] {
    let l_index = (s - S_BASE) / N_COUNT;
    let n_index = (s - S_BASE) % N_COUNT;
    [
        L_BASE + l_index,
        V_BASE + n_index / T_COUNT,
        T_BASE + n_index % T_COUNT,
    ]
}

fn is_zero_width_char(face: &Face, u: u32) -> bool {
    face.get_nominal_glyph(u)
        .map_or(false, |glyph| face.glyph_h_advance(glyph) == 0)
}

/// Composes whole syllables the font supports and decomposes the rest into
/// jamo tagged for `ljmo`/`vjmo`/`tjmo`. A tone mark after a syllable moves
/// in front of it unless it overstrikes.
pub fn preprocess_text(_: &ShapePlan, face: &Face, buffer: &mut Buffer) {
    buffer.clear_output();

    // Extent of the last syllable in the output; valid when start < end.
    let mut start = 0;
    let mut end = 0;
    buffer.idx = 0;
    while buffer.idx < buffer.len() {
        let u = buffer.cur(0).glyph_id;

        if is_tone_mark(u) {
            if start < end && end == buffer.out_len() {
                buffer.unsafe_to_break_from_outbuffer(start, buffer.idx);
                buffer.next_glyph();
                if !is_zero_width_char(face, u) {
                    buffer.merge_out_clusters(start, end + 1);
                    buffer.out_info[start..=end].rotate_right(1);
                }
            } else if !buffer
                .flags
                .contains(BufferFlags::DO_NOT_INSERT_DOTTED_CIRCLE)
                && face.has_glyph(DOTTED_CIRCLE)
            {
                // No syllable to sit on; give the mark a dotted circle.
                let chars = if is_zero_width_char(face, u) {
                    [DOTTED_CIRCLE, u]
                } else {
                    [u, DOTTED_CIRCLE]
                };
                buffer.replace_glyphs(1, 2, &chars);
            } else {
                buffer.next_glyph();
            }

            start = buffer.out_len();
            end = start;
            continue;
        }

        // A potential syllable start, used once `end` moves past it.
        start = buffer.out_len();

        if is_l(u) && buffer.idx + 1 < buffer.len() {
            let l = u;
            let v = buffer.cur(1).glyph_id;
            if is_v(v) {
                let t = if buffer.idx + 2 < buffer.len() && is_t(buffer.cur(2).glyph_id) {
                    Some(buffer.cur(2).glyph_id)
                } else {
                    None
                };

                let len = if t.is_some() { 3 } else { 2 };
                buffer.unsafe_to_break(buffer.idx, buffer.idx + len);

                if let Some(s) = compose_syllable(l, v, t) {
                    if face.has_glyph(s) {
                        buffer.replace_glyphs(len, 1, &[s]);
                        end = start + 1;
                        continue;
                    }
                }

                // Old Hangul or a font without the precomposed glyph.
                buffer.cur_mut(0).set_hangul_shaping_feature(LJMO);
                buffer.next_glyph();
                buffer.cur_mut(0).set_hangul_shaping_feature(VJMO);
                buffer.next_glyph();
                if t.is_some() {
                    buffer.cur_mut(0).set_hangul_shaping_feature(TJMO);
                    buffer.next_glyph();
                }
                end = start + len;

                if buffer.cluster_level == BufferClusterLevel::MonotoneGraphemes {
                    buffer.merge_out_clusters(start, end);
                }

                continue;
            }
        } else if is_combined_s(u) {
            // <LV>, <LVT> or <LV,T>.
            let s = u;
            let has_glyph = face.has_glyph(s);
            let jamo = decompose_syllable(s);
            let is_lv = jamo[2] == T_BASE;
            let next_is_t = buffer.idx + 1 < buffer.len() && is_t(buffer.cur(1).glyph_id);

            if is_lv && next_is_t && is_combining_t(buffer.cur(1).glyph_id) {
                let new_s = s + (buffer.cur(1).glyph_id - T_BASE);
                if face.has_glyph(new_s) {
                    buffer.replace_glyphs(2, 1, &[new_s]);
                    end = start + 1;
                    continue;
                }

                buffer.unsafe_to_break(buffer.idx, buffer.idx + 2);
            }

            // Decompose when the font lacks the syllable, or when an LV is
            // followed by a T it cannot combine with.
            if !has_glyph || (is_lv && next_is_t) {
                if face.has_glyph(jamo[0])
                    && face.has_glyph(jamo[1])
                    && (is_lv || face.has_glyph(jamo[2]))
                {
                    let mut len = if is_lv { 2 } else { 3 };
                    buffer.replace_glyphs(1, len, &jamo);

                    // The following T belongs to the syllable.
                    if has_glyph && is_lv {
                        buffer.next_glyph();
                        len += 1;
                    }

                    end = start + len;
                    buffer.out_info[start].set_hangul_shaping_feature(LJMO);
                    buffer.out_info[start + 1].set_hangul_shaping_feature(VJMO);
                    if start + 2 < end {
                        buffer.out_info[start + 2].set_hangul_shaping_feature(TJMO);
                    }

                    if buffer.cluster_level == BufferClusterLevel::MonotoneGraphemes {
                        buffer.merge_out_clusters(start, end);
                    }

                    continue;
                }
            }

            if has_glyph {
                end = start + 1;
                buffer.next_glyph();
                continue;
            }
        }

        // Not a syllable; `end <= start` keeps tone marks from moving.
        buffer.next_glyph();
    }

    buffer.swap_buffers();
}

pub fn setup_masks(plan: &ShapePlan, _: &Face, buffer: &mut Buffer) {
    let Some(ShaperData::Hangul(hangul_plan)) = &plan.data else {
        return;
    };

    for info in buffer.info_slice_mut() {
        let feature = usize::from(info.hangul_shaping_feature());
        info.mask |= hangul_plan.mask_array.get(feature).copied().unwrap_or(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composes_modern_syllables() {
        assert_eq!(compose_syllable(0x1100, 0x1161, None), Some(0xAC00));
        assert_eq!(compose_syllable(0x1100, 0x1161, Some(0x11A8)), Some(0xAC01));
        assert_eq!(compose_syllable(0x1112, 0x1175, Some(0x11C2)), Some(0xD7A3));
    }

    #[test]
    fn old_hangul_does_not_compose() {
        // Old Hangul initial and vowel.
        assert_eq!(compose_syllable(0x1113, 0x1161, None), None);
        assert_eq!(compose_syllable(0x1100, 0x1176, None), None);
        // Old Hangul final.
        assert_eq!(compose_syllable(0x1100, 0x1161, Some(0x11C3)), None);
    }

    #[test]
    fn decomposes_syllables() {
        assert_eq!(decompose_syllable(0xAC00), [0x1100, 0x1161, T_BASE]);
        assert_eq!(decompose_syllable(0xAC01), [0x1100, 0x1161, 0x11A8]);
    }

    #[test]
    fn jamo_classes() {
        assert!(is_l(0xA960));
        assert!(is_v(0x1160));
        assert!(is_t(0xD7FB));
        assert!(!is_t(0x11A7));
        assert!(is_tone_mark(0x302E));
    }
}
