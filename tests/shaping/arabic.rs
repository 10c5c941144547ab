use crate::font_builder::{FontBuilder, Lookup};
use crate::shape;

fn arabic_font() -> Vec<u8> {
    let mut builder = FontBuilder::new(500);
    let lam = builder.glyph('\u{0644}', 500); // 1
    let alef = builder.glyph('\u{0627}', 300); // 2
    let lam_init = builder.unmapped_glyph(450); // 3
    let alef_fina = builder.unmapped_glyph(320); // 4
    let lam_alef = builder.unmapped_glyph(700); // 5

    builder
        .gsub()
        .script(b"arab")
        .feature(b"init", Lookup::Single(vec![(lam, lam_init)]))
        .feature(b"fina", Lookup::Single(vec![(alef, alef_fina)]))
        .feature(
            b"rlig",
            Lookup::Ligature(vec![(vec![lam_init, alef_fina], lam_alef)]),
        );
    builder.build()
}

#[test]
fn lam_alef_ligature() {
    assert_eq!(shape(&arabic_font(), "\u{0644}\u{0627}", ""), "gid5=0+700");
}

#[test]
fn joining_forms_without_ligature() {
    assert_eq!(
        shape(&arabic_font(), "\u{0644}\u{0627}", "--features=-rlig"),
        "gid4=1+320|gid3=0+450"
    );
}

#[test]
fn zwnj_breaks_joining() {
    // No space glyph, so the joiner is removed and its cluster merges into
    // the glyph before it in visual order.
    assert_eq!(
        shape(&arabic_font(), "\u{0644}\u{200C}\u{0627}", ""),
        "gid2=1+300|gid1=0+500"
    );
}

#[test]
fn isolated_forms_are_left_alone() {
    assert_eq!(
        shape(&arabic_font(), "\u{0627}\u{0627}", ""),
        "gid2=1+300|gid2=0+300"
    );
}

fn presentation_forms_font() -> Vec<u8> {
    let mut builder = FontBuilder::new(500);
    builder.glyph('\u{0644}', 500); // 1
    builder.glyph('\u{0627}', 300); // 2
    builder.glyph('\u{FEDF}', 450); // 3, lam initial
    builder.glyph('\u{FE8E}', 320); // 4, alef final
    builder.glyph('\u{FEFB}', 700); // 5, lam-alef isolated
    builder.build()
}

#[test]
fn fallback_shaping_from_presentation_forms() {
    assert_eq!(
        shape(&presentation_forms_font(), "\u{0644}\u{0627}", ""),
        "gid5=0+700"
    );
}

#[test]
fn fallback_joining_forms() {
    assert_eq!(
        shape(
            &presentation_forms_font(),
            "\u{0644}\u{0627}",
            "--features=-rlig"
        ),
        "gid4=1+320|gid3=0+450"
    );
}
