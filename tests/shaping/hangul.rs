use crate::font_builder::{FontBuilder, Lookup};
use crate::shape;

fn hangul_font() -> Vec<u8> {
    let mut builder = FontBuilder::new(500);
    builder.glyph('\u{1100}', 1000); // 1
    builder.glyph('\u{1161}', 0); // 2
    builder.glyph('\u{AC00}', 1000); // 3
    builder.build()
}

#[test]
fn jamo_compose_into_syllable() {
    assert_eq!(shape(&hangul_font(), "\u{1100}\u{1161}", ""), "gid3=0+1000");
}

#[test]
fn precomposed_syllable() {
    assert_eq!(shape(&hangul_font(), "\u{AC00}", ""), "gid3=0+1000");
}

#[test]
fn syllables_stay_separate() {
    assert_eq!(
        shape(&hangul_font(), "\u{1100}\u{1161}\u{AC00}", ""),
        "gid3=0+1000|gid3=2+1000"
    );
}

fn thai_font() -> Vec<u8> {
    let mut builder = FontBuilder::new(500);
    let ko_kai = builder.glyph('\u{0E01}', 600); // 1
    builder.glyph('\u{0E4D}', 0); // 2, nikhahit
    builder.glyph('\u{0E32}', 400); // 3, sara aa
    builder
        .gsub()
        .script(b"thai")
        .feature(b"ccmp", Lookup::Single(vec![(ko_kai, ko_kai)]));
    builder.build()
}

#[test]
fn sara_am_is_decomposed() {
    assert_eq!(
        shape(&thai_font(), "\u{0E01}\u{0E33}", ""),
        "gid1=0+600|gid2=0+0|gid3=0+400"
    );
}
