use super::indic::category;
use super::khmer_machine::{self, SyllableType};
use super::syllabic::{self, for_each_syllable};
use super::{indic_table, ShaperData};
use crate::buffer::{Buffer, GlyphInfo};
use crate::face::Face;
use crate::ot::normalize::ShapeNormalizeContext;
use crate::ot::{FeatureFlags, Map};
use crate::plan::{ShapePlan, ShapePlanner};
use crate::{unicode_norm, Mask, Tag};

const KHMER_FEATURES: &[(Tag, FeatureFlags)] = &[
    // Basic features.
    // Applied all at once, before reordering, constrained to the syllable.
    (
        Tag::from_bytes(b"pref"),
        FeatureFlags::MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    (
        Tag::from_bytes(b"blwf"),
        FeatureFlags::MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    (
        Tag::from_bytes(b"abvf"),
        FeatureFlags::MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    (
        Tag::from_bytes(b"pstf"),
        FeatureFlags::MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    (
        Tag::from_bytes(b"cfar"),
        FeatureFlags::MANUAL_JOINERS.union(FeatureFlags::PER_SYLLABLE),
    ),
    // Other features.
    // Applied all at once after clearing syllables.
    (Tag::from_bytes(b"pres"), FeatureFlags::GLOBAL_MANUAL_JOINERS),
    (Tag::from_bytes(b"abvs"), FeatureFlags::GLOBAL_MANUAL_JOINERS),
    (Tag::from_bytes(b"blws"), FeatureFlags::GLOBAL_MANUAL_JOINERS),
    (Tag::from_bytes(b"psts"), FeatureFlags::GLOBAL_MANUAL_JOINERS),
];

// Same order as KHMER_FEATURES.
mod khmer_feature {
    pub const PREF: usize = 0;
    pub const BLWF: usize = 1;
    pub const ABVF: usize = 2;
    pub const PSTF: usize = 3;
    pub const CFAR: usize = 4;
}

/// Syllabic category of a Khmer character.
///
/// The groups follow what Uniscribe accepts in a syllable.
fn khmer_category(u: u32) -> u8 {
    match u {
        0x179A => category::RA,
        0x1780..=0x17A2 => category::C,
        0x17A3..=0x17B3 => category::V,
        0x17B6 => category::VPST,
        0x17B7..=0x17BA => category::VABV,
        0x17BB..=0x17BD => category::VBLW,
        // Split matras; the pre-base part is split off by `decompose`.
        0x17BE..=0x17C0 | 0x17C4 | 0x17C5 => category::VPST,
        0x17C1..=0x17C3 => category::VPRE,
        0x17C9 | 0x17CA | 0x17CC => category::ROBATIC,
        0x17C6 | 0x17CB | 0x17CD..=0x17D1 => category::XGROUP,
        0x17C7 | 0x17C8 | 0x17D3 | 0x17DD => category::YGROUP,
        0x17D2 => category::H,
        0x17E0..=0x17E9 => category::PLACEHOLDER,
        0x1780..=0x17FF | 0x19E0..=0x19FF => category::X,
        _ => indic_table::get_categories(u).0,
    }
}

impl GlyphInfo {
    fn khmer_category(&self) -> u8 {
        self.complex_category()
    }
}

pub struct KhmerShapePlan {
    mask_array: [Mask; KHMER_FEATURES.len()],
}

impl KhmerShapePlan {
    pub fn new(map: &Map) -> Self {
        let mut mask_array = [0; KHMER_FEATURES.len()];
        for (mask, &(tag, flags)) in mask_array.iter_mut().zip(KHMER_FEATURES) {
            *mask = if flags.contains(FeatureFlags::GLOBAL) {
                0
            } else {
                map.one_mask(tag)
            };
        }

        KhmerShapePlan { mask_array }
    }
}

pub fn collect_features(planner: &mut ShapePlanner) {
    // Before any lookups have been applied.
    planner.ot_map.add_gsub_pause(Some(setup_syllables));
    planner.ot_map.add_gsub_pause(Some(reorder));

    // Uniscribe does not pause between the basic features.
    planner
        .ot_map
        .enable_feature(Tag::from_bytes(b"locl"), FeatureFlags::PER_SYLLABLE, 1);
    planner
        .ot_map
        .enable_feature(Tag::from_bytes(b"ccmp"), FeatureFlags::PER_SYLLABLE, 1);

    for &(tag, flags) in KHMER_FEATURES {
        planner.ot_map.add_feature(tag, flags, 1);
    }
}

pub fn override_features(planner: &mut ShapePlanner) {
    // `clig` is one of the required Khmer features.
    planner
        .ot_map
        .enable_feature(Tag::from_bytes(b"clig"), FeatureFlags::empty(), 1);
    planner.ot_map.disable_feature(Tag::from_bytes(b"liga"));
}

fn setup_syllables(_: &ShapePlan, _: &Face, buffer: &mut Buffer) {
    khmer_machine::find_syllables(buffer);
    for_each_syllable(buffer, |buffer, range| {
        buffer.unsafe_to_break(range.start, range.end)
    });
}

fn reorder(plan: &ShapePlan, face: &Face, buffer: &mut Buffer) {
    syllabic::insert_dotted_circles(
        face,
        buffer,
        SyllableType::BrokenCluster as u8,
        category::DOTTED_CIRCLE,
        Some(category::REPHA),
        None,
    );

    let Some(ShaperData::Khmer(khmer_plan)) = &plan.data else {
        return;
    };

    for_each_syllable(buffer, |buffer, range| {
        let kind = buffer.info[range.start].syllable() & 0x0F;
        if kind == SyllableType::ConsonantSyllable as u8
            || kind == SyllableType::BrokenCluster as u8
        {
            reorder_consonant_syllable(khmer_plan, range.start, range.end, buffer);
        }
    });
}

fn reorder_consonant_syllable(plan: &KhmerShapePlan, start: usize, end: usize, buffer: &mut Buffer) {
    // Everything after the base may take a post-base form.
    let mask = plan.mask_array[khmer_feature::BLWF]
        | plan.mask_array[khmer_feature::ABVF]
        | plan.mask_array[khmer_feature::PSTF];
    for info in &mut buffer.info[start + 1..end] {
        info.mask |= mask;
    }

    let mut num_coengs = 0;
    for i in start + 1..end {
        // A Coeng followed by Ro moves with it in front of the base and forms
        // `pref`. Only the first two Coeng clusters are considered.
        if buffer.info[i].khmer_category() == category::H && num_coengs <= 2 && i + 1 < end {
            num_coengs += 1;

            if buffer.info[i + 1].khmer_category() == category::RA {
                buffer.info[i].mask |= plan.mask_array[khmer_feature::PREF];
                buffer.info[i + 1].mask |= plan.mask_array[khmer_feature::PREF];

                buffer.merge_clusters(start, i + 2);
                buffer.info[start..i + 2].rotate_right(2);

                // What follows gets `cfar`, which tells apart
                // Coeng Ro + Coeng X from Coeng X + Coeng Ro.
                let cfar = plan.mask_array[khmer_feature::CFAR];
                if cfar != 0 {
                    for info in &mut buffer.info[i + 2..end] {
                        info.mask |= cfar;
                    }
                }

                num_coengs = 2;
            }
        } else if buffer.info[i].khmer_category() == category::VPRE {
            // Left matra moves to the start.
            buffer.merge_clusters(start, i + 1);
            buffer.info[start..=i].rotate_right(1);
        }
    }
}

/// Split matras without a Unicode decomposition.
fn is_split_matra(c: char) -> bool {
    matches!(c, '\u{17BE}' | '\u{17BF}' | '\u{17C0}' | '\u{17C4}' | '\u{17C5}')
}

pub fn decompose(_: &ShapeNormalizeContext, ab: char) -> Option<(char, Option<char>)> {
    if is_split_matra(ab) {
        return Some(('\u{17C1}', Some(ab)));
    }

    unicode_norm::decompose(ab)
}

pub fn setup_masks(_: &ShapePlan, _: &Face, buffer: &mut Buffer) {
    // Masks are set up later, in the reordering pause.
    for info in buffer.info_slice_mut() {
        info.set_complex_category(khmer_category(info.glyph_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn syllable(code_points: &[u32]) -> Buffer {
        let mut buffer = Buffer::new();
        for (i, &u) in code_points.iter().enumerate() {
            let mut info = GlyphInfo {
                glyph_id: u,
                cluster: i as u32,
                ..GlyphInfo::default()
            };
            info.set_complex_category(khmer_category(u));
            buffer.info.push(info);
        }
        buffer
    }

    fn plan() -> KhmerShapePlan {
        KhmerShapePlan {
            mask_array: [0x2, 0x4, 0x8, 0x10, 0x20, 0, 0, 0, 0],
        }
    }

    #[test]
    fn categories() {
        assert_eq!(khmer_category(0x1780), category::C);
        assert_eq!(khmer_category(0x179A), category::RA);
        assert_eq!(khmer_category(0x17D2), category::H);
        assert_eq!(khmer_category(0x17C1), category::VPRE);
        assert_eq!(khmer_category(0x17CC), category::ROBATIC);
        assert_eq!(khmer_category(0x25CC), category::DOTTED_CIRCLE);
    }

    #[test]
    fn coeng_ro_moves_to_front() {
        // KA, COENG, RO, AA
        let mut buffer = syllable(&[0x1780, 0x17D2, 0x179A, 0x17B6]);
        reorder_consonant_syllable(&plan(), 0, 4, &mut buffer);

        let order: Vec<u32> = buffer.info.iter().map(|i| i.glyph_id).collect();
        assert_eq!(order, vec![0x17D2, 0x179A, 0x1780, 0x17B6]);
        assert_ne!(buffer.info[0].mask & 0x2, 0);
        assert_ne!(buffer.info[1].mask & 0x2, 0);
        assert_ne!(buffer.info[3].mask & 0x20, 0);
        assert!(buffer.info[..3].iter().all(|i| i.cluster == 0));
    }

    #[test]
    fn pre_base_matra_moves_to_front() {
        // KA, COENG, KA, E
        let mut buffer = syllable(&[0x1780, 0x17D2, 0x1780, 0x17C1]);
        reorder_consonant_syllable(&plan(), 0, 4, &mut buffer);

        assert_eq!(buffer.info[0].glyph_id, 0x17C1);
        assert_eq!(buffer.info[0].mask & 0x2, 0);
        assert_ne!(buffer.info[2].mask & 0x4, 0);
    }

    #[test]
    fn split_matras() {
        assert!(is_split_matra('\u{17C4}'));
        assert!(!is_split_matra('\u{17B6}'));
    }
}
