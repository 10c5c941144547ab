use crate::font_builder::{FontBuilder, Lookup};
use crate::shape;

fn latin_font() -> Vec<u8> {
    let mut builder = FontBuilder::new(500);
    let f = builder.glyph('f', 300); // 1
    let i = builder.glyph('i', 250); // 2
    let fi = builder.unmapped_glyph(520); // 3
    builder.glyph('\u{0301}', 0); // 4
    let v = builder.glyph('V', 600); // 5
    let a = builder.glyph('A', 650); // 6

    builder
        .gsub()
        .script(b"DFLT")
        .feature(b"liga", Lookup::Ligature(vec![(vec![f, i], fi)]));
    builder
        .gpos()
        .script(b"DFLT")
        .feature(b"kern", Lookup::Pair(vec![(v, a, -80)]));
    builder.build()
}

#[test]
fn plain_advances() {
    assert_eq!(
        shape(&latin_font(), "VfA", ""),
        "gid5=0+600|gid1=1+300|gid6=2+650"
    );
}

#[test]
fn ligature() {
    assert_eq!(shape(&latin_font(), "fi", ""), "gid3=0+520");
}

#[test]
fn ligature_disabled() {
    assert_eq!(
        shape(&latin_font(), "fi", "--features=-liga"),
        "gid1=0+300|gid2=1+250"
    );
}

#[test]
fn ligature_disabled_in_range() {
    assert_eq!(
        shape(&latin_font(), "fifi", "--features=liga[2:]=0"),
        "gid3=0+520|gid1=2+300|gid2=3+250"
    );
}

#[test]
fn ligature_absorbs_following_mark_cluster() {
    assert_eq!(
        shape(&latin_font(), "fi\u{0301}", ""),
        "gid3=0+520|gid4=0+0"
    );
}

#[test]
fn pair_kerning() {
    assert_eq!(shape(&latin_font(), "VA", ""), "gid5=0+520|gid6=1+650");
}

#[test]
fn pair_kerning_disabled() {
    assert_eq!(
        shape(&latin_font(), "VA", "--features=-kern"),
        "gid5=0+600|gid6=1+650"
    );
}

#[test]
fn unsafe_to_break_covers_whole_cluster() {
    // Kerning marks the second glyph, the mark sharing its cluster follows.
    assert_eq!(
        shape(&latin_font(), "VA\u{0301}", "--show-flags"),
        "gid5=0+520|gid6=1+650#1|gid4=1+0#1"
    );
}

#[test]
fn right_to_left_latin_is_reversed() {
    assert_eq!(
        shape(&latin_font(), "VA", "--direction=rtl --features=-kern"),
        "gid6=1+650|gid5=0+600"
    );
}

#[test]
fn characters_cluster_level_keeps_mark_cluster() {
    assert_eq!(
        shape(&latin_font(), "A\u{0301}", "--cluster-level=2"),
        "gid6=0+650|gid4=1+0"
    );
}

#[test]
fn not_found_glyph() {
    assert_eq!(
        shape(&latin_font(), "fx", "--not-found-glyph=6"),
        "gid1=0+300|gid6=1+650"
    );
    assert_eq!(shape(&latin_font(), "fx", ""), "gid1=0+300|gid0=1+500");
}

fn fraction_font() -> Vec<u8> {
    let mut builder = FontBuilder::new(500);
    let one = builder.glyph('1', 500); // 1
    let two = builder.glyph('2', 500); // 2
    builder.glyph('\u{2044}', 100); // 3
    let one_numr = builder.unmapped_glyph(300); // 4
    let two_numr = builder.unmapped_glyph(300); // 5
    let one_dnom = builder.unmapped_glyph(310); // 6
    let two_dnom = builder.unmapped_glyph(310); // 7

    builder
        .gsub()
        .script(b"DFLT")
        .feature(
            b"numr",
            Lookup::Single(vec![(one, one_numr), (two, two_numr)]),
        )
        .feature(
            b"dnom",
            Lookup::Single(vec![(one, one_dnom), (two, two_dnom)]),
        );
    builder.build()
}

#[test]
fn fraction() {
    assert_eq!(
        shape(&fraction_font(), "1\u{2044}2", ""),
        "gid4=0+300|gid3=1+100|gid7=2+310"
    );
}

#[test]
fn fraction_with_multi_digit_parts() {
    assert_eq!(
        shape(&fraction_font(), "12\u{2044}21", ""),
        "gid4=0+300|gid5=1+300|gid3=2+100|gid7=3+310|gid6=4+310"
    );
}

#[test]
fn fraction_is_unsafe_to_break() {
    assert_eq!(
        shape(&fraction_font(), "1\u{2044}2", "--show-flags"),
        "gid4=0+300|gid3=1+100#1|gid7=2+310#1"
    );
}

#[test]
fn digits_without_slash_are_untouched() {
    assert_eq!(
        shape(&fraction_font(), "12", ""),
        "gid1=0+500|gid2=1+500"
    );
}

fn mark_font() -> Vec<u8> {
    let mut builder = FontBuilder::new(500);
    let a = builder.glyph('a', 500); // 1
    let acute = builder.glyph('\u{0301}', 0); // 2
    builder
        .gpos()
        .script(b"DFLT")
        .feature(
            b"mark",
            Lookup::MarkToBase {
                marks: vec![(acute, (100, 500))],
                bases: vec![(a, (250, 600))],
            },
        );
    builder.build()
}

#[test]
fn mark_to_base() {
    assert_eq!(
        shape(&mark_font(), "a\u{0301}", ""),
        "gid1=0+500|gid2=0@-350,100+0"
    );
}

#[test]
fn mark_to_base_without_advances() {
    assert_eq!(
        shape(&mark_font(), "a\u{0301}", "--ned"),
        "gid1|gid2@150,100"
    );
}
