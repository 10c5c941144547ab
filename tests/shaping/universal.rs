use crate::font_builder::{FontBuilder, Lookup};
use crate::shape;

fn balinese_font() -> Vec<u8> {
    let mut builder = FontBuilder::new(500);
    let ka = builder.glyph('\u{1B13}', 600); // 1
    builder.glyph('\u{1B3F}', 300); // 2, taling repa
    builder.glyph('\u{1B3E}', 300); // 3, taling
    builder.glyph('\u{1B44}', 0); // 4, adeg adeg
    builder
        .gsub()
        .script(b"bali")
        .feature(b"ccmp", Lookup::Single(vec![(ka, ka)]));
    builder.build()
}

#[test]
fn pre_base_vowel_moves_before_base() {
    assert_eq!(
        shape(&balinese_font(), "\u{1B13}\u{1B3F}", ""),
        "gid2=0+300|gid1=0+600"
    );
}

#[test]
fn pre_base_vowel_stays_in_its_syllable() {
    assert_eq!(
        shape(&balinese_font(), "\u{1B13}\u{1B3E}\u{1B13}", ""),
        "gid3=0+300|gid1=0+600|gid1=2+600"
    );
}

#[test]
fn pre_base_vowel_stops_after_virama() {
    assert_eq!(
        shape(&balinese_font(), "\u{1B13}\u{1B44}\u{1B13}\u{1B3E}", ""),
        "gid1=0+600|gid4=0+0|gid3=2+300|gid1=2+600"
    );
}
