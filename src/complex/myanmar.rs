use super::indic::{category, position};
use super::myanmar_machine::{self, SyllableType};
use super::indic_table;
use super::syllabic::{self, for_each_syllable};
use crate::buffer::{Buffer, GlyphInfo};
use crate::face::Face;
use crate::ot::FeatureFlags;
use crate::plan::{ShapePlan, ShapePlanner};
use crate::Tag;

const MYANMAR_FEATURES: &[Tag] = &[
    // Basic features.
    // Applied in order, one at a time, after reordering, constrained to the
    // syllable.
    Tag::from_bytes(b"rphf"),
    Tag::from_bytes(b"pref"),
    Tag::from_bytes(b"blwf"),
    Tag::from_bytes(b"pstf"),
    // Other features.
    // Applied all at once after clearing syllables.
    Tag::from_bytes(b"pres"),
    Tag::from_bytes(b"abvs"),
    Tag::from_bytes(b"blws"),
    Tag::from_bytes(b"psts"),
];

/// Syllabic category of a Myanmar character.
fn myanmar_category(u: u32) -> u8 {
    match u {
        0x1004 | 0x101B | 0x105A => category::RA,
        0x1000..=0x1020 | 0x103F | 0x104E | 0x1050 | 0x1051 | 0x105B..=0x105D | 0x1061
        | 0x1065 | 0x1066 | 0x106E..=0x1070 | 0x1075..=0x1081 | 0x108E | 0xAA60..=0xAA76 => {
            category::C
        }
        0x1021..=0x102A | 0x1052..=0x1055 => category::IV,
        0x102B | 0x102C | 0x1056 | 0x1057 | 0x1062 | 0x1067 | 0x1068 | 0x1083 => category::VPST,
        0x102D | 0x102E | 0x1033..=0x1035 | 0x1071..=0x1074 | 0x1085 | 0x1086 | 0x109D => {
            category::VABV
        }
        0x102F | 0x1030 | 0x1058 | 0x1059 => category::VBLW,
        0x1031 | 0x1084 => category::VPRE,
        0x1032 | 0x1036 => category::A,
        // Dot below.
        0x1037 => category::N,
        0x1038 | 0x1087..=0x108D | 0x108F | 0x109A..=0x109C => category::SM,
        0x1039 => category::H,
        0x103A => category::AS,
        0x103B | 0x105E | 0x105F => category::MY,
        0x103C => category::MR,
        0x103D | 0x1082 => category::MW,
        0x103E | 0x1060 => category::MH,
        0x1063 | 0x1064 | 0x1069..=0x106D | 0xAA7B => category::PT,
        0x1040..=0x1049 | 0x1090..=0x1099 => category::GB,
        0xFE00..=0xFE0F => category::VS,
        0x002D | 0x00A0 | 0x00D7 | 0x2012..=0x2015 | 0x2022 | 0x25FB..=0x25FE => category::GB,
        _ => indic_table::get_categories(u).0,
    }
}

impl GlyphInfo {
    fn myanmar_category(&self) -> u8 {
        self.complex_category()
    }

    fn myanmar_position(&self) -> u8 {
        self.complex_aux()
    }

    fn set_myanmar_position(&mut self, pos: u8) {
        self.set_complex_aux(pos)
    }

    fn is_myanmar_consonant(&self) -> bool {
        matches!(
            self.myanmar_category(),
            category::C
                | category::CS
                | category::RA
                | category::CM
                | category::IV
                | category::GB
                | category::DOTTED_CIRCLE
        ) && !self.is_ligated()
    }
}

pub fn collect_features(planner: &mut ShapePlanner) {
    // Before any lookups have been applied.
    planner.ot_map.add_gsub_pause(Some(setup_syllables));

    planner
        .ot_map
        .enable_feature(Tag::from_bytes(b"locl"), FeatureFlags::PER_SYLLABLE, 1);
    // ccmp is not required, but usually applied first when used at all.
    planner
        .ot_map
        .enable_feature(Tag::from_bytes(b"ccmp"), FeatureFlags::PER_SYLLABLE, 1);

    planner.ot_map.add_gsub_pause(Some(reorder));

    for feature in &MYANMAR_FEATURES[..4] {
        planner.ot_map.enable_feature(
            *feature,
            FeatureFlags::MANUAL_ZWJ | FeatureFlags::PER_SYLLABLE,
            1,
        );
        planner.ot_map.add_gsub_pause(None);
    }

    planner.ot_map.add_gsub_pause(Some(syllabic::clear_syllables));

    for feature in &MYANMAR_FEATURES[4..] {
        planner
            .ot_map
            .enable_feature(*feature, FeatureFlags::MANUAL_ZWJ, 1);
    }
}

fn setup_syllables(_: &ShapePlan, _: &Face, buffer: &mut Buffer) {
    myanmar_machine::find_syllables(buffer);
    for_each_syllable(buffer, |buffer, range| {
        buffer.unsafe_to_break(range.start, range.end)
    });
}

fn reorder(_: &ShapePlan, face: &Face, buffer: &mut Buffer) {
    syllabic::insert_dotted_circles(
        face,
        buffer,
        SyllableType::BrokenCluster as u8,
        category::DOTTED_CIRCLE,
        None,
        None,
    );

    for_each_syllable(buffer, |buffer, range| {
        let kind = buffer.info[range.start].syllable() & 0x0F;
        // Dotted circles are in place, so broken clusters reorder like
        // consonant syllables.
        if kind == SyllableType::ConsonantSyllable as u8
            || kind == SyllableType::BrokenCluster as u8
        {
            reorder_consonant_syllable(range.start, range.end, buffer);
        }
    });
}

// https://docs.microsoft.com/en-us/typography/script-development/myanmar
fn reorder_consonant_syllable(start: usize, end: usize, buffer: &mut Buffer) {
    let mut base = end;
    let mut has_reph = false;

    let mut limit = start;
    // Kinzi: Ra, Asat, Halant at the start.
    if start + 3 <= end
        && buffer.info[start].myanmar_category() == category::RA
        && buffer.info[start + 1].myanmar_category() == category::AS
        && buffer.info[start + 2].myanmar_category() == category::H
    {
        limit += 3;
        base = start;
        has_reph = true;
    }

    if !has_reph {
        base = limit;
    }

    if let Some(i) = (limit..end).find(|&i| buffer.info[i].is_myanmar_consonant()) {
        base = i;
    }

    // Assign positions.
    let mut i = start;
    let reph_end = start + if has_reph { 3 } else { 0 };
    while i < reph_end {
        buffer.info[i].set_myanmar_position(position::AFTER_MAIN);
        i += 1;
    }

    while i < base {
        buffer.info[i].set_myanmar_position(position::PRE_C);
        i += 1;
    }

    if i < end {
        buffer.info[i].set_myanmar_position(position::BASE_C);
        i += 1;
    }

    let mut pos = position::AFTER_MAIN;
    for i in i..end {
        let cat = buffer.info[i].myanmar_category();

        if cat == category::MR {
            buffer.info[i].set_myanmar_position(position::PRE_C);
            continue;
        }

        if cat == category::VPRE {
            buffer.info[i].set_myanmar_position(position::PRE_M);
            continue;
        }

        if cat == category::VS {
            let prev = buffer.info[i - 1].myanmar_position();
            buffer.info[i].set_myanmar_position(prev);
            continue;
        }

        if pos == position::AFTER_MAIN && cat == category::VBLW {
            pos = position::BELOW_C;
            buffer.info[i].set_myanmar_position(pos);
            continue;
        }

        if pos == position::BELOW_C && cat == category::A {
            buffer.info[i].set_myanmar_position(position::BEFORE_SUB);
            continue;
        }

        if pos == position::BELOW_C && cat == category::VBLW {
            buffer.info[i].set_myanmar_position(pos);
            continue;
        }

        if pos == position::BELOW_C && cat != category::A {
            pos = position::AFTER_SUB;
            buffer.info[i].set_myanmar_position(pos);
            continue;
        }

        buffer.info[i].set_myanmar_position(pos);
    }

    buffer.sort(start, end, |a, b| a.myanmar_position() > b.myanmar_position());

    // Flip the left-matra sequence.
    let mut first_left_matra = end;
    let mut last_left_matra = end;
    for i in start..end {
        if buffer.info[i].myanmar_position() == position::PRE_M {
            if first_left_matra == end {
                first_left_matra = i;
            }

            last_left_matra = i;
        }
    }

    if first_left_matra < last_left_matra {
        buffer.reverse_range(first_left_matra, last_left_matra + 1);

        // Put variation selectors back after their matra.
        let mut i = first_left_matra;
        for j in i..=last_left_matra {
            if buffer.info[j].myanmar_category() == category::VPRE {
                buffer.reverse_range(i, j + 1);
                i = j + 1;
            }
        }
    }
}

pub fn setup_masks(_: &ShapePlan, _: &Face, buffer: &mut Buffer) {
    // No masks, just the categories.
    for info in buffer.info_slice_mut() {
        info.set_complex_category(myanmar_category(info.glyph_id));
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
            info.set_complex_category(myanmar_category(u));
            buffer.info.push(info);
        }
        buffer
    }

    fn order(buffer: &Buffer) -> Vec<u32> {
        buffer.info.iter().map(|i| i.glyph_id).collect()
    }

    #[test]
    fn categories() {
        assert_eq!(myanmar_category(0x1000), category::C);
        assert_eq!(myanmar_category(0x1004), category::RA);
        assert_eq!(myanmar_category(0x103A), category::AS);
        assert_eq!(myanmar_category(0x1039), category::H);
        assert_eq!(myanmar_category(0x1031), category::VPRE);
        assert_eq!(myanmar_category(0x103C), category::MR);
        assert_eq!(myanmar_category(0x1037), category::N);
        assert_eq!(myanmar_category(0x25CC), category::DOTTED_CIRCLE);
    }

    #[test]
    fn kinzi_moves_after_base() {
        // NGA, ASAT, VIRAMA, KA
        let mut buffer = syllable(&[0x1004, 0x103A, 0x1039, 0x1000]);
        reorder_consonant_syllable(0, 4, &mut buffer);
        assert_eq!(order(&buffer), vec![0x1000, 0x1004, 0x103A, 0x1039]);
    }

    #[test]
    fn medial_ra_and_vowel_e_move_before_base() {
        // KA, MEDIAL RA, VOWEL SIGN E
        let mut buffer = syllable(&[0x1000, 0x103C, 0x1031]);
        reorder_consonant_syllable(0, 3, &mut buffer);
        assert_eq!(order(&buffer), vec![0x1031, 0x103C, 0x1000]);
    }

    #[test]
    fn below_vowel_before_anusvara() {
        // KA, VOWEL SIGN U, ANUSVARA
        let mut buffer = syllable(&[0x1000, 0x102F, 0x1036]);
        reorder_consonant_syllable(0, 3, &mut buffer);
        assert_eq!(order(&buffer), vec![0x1000, 0x1036, 0x102F]);
    }
}
