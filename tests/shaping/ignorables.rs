use crate::font_builder::FontBuilder;
use crate::shape;

fn font() -> Vec<u8> {
    let mut builder = FontBuilder::new(500);
    builder.glyph('A', 600); // 1
    builder.glyph('B', 700); // 2
    builder.glyph(' ', 250); // 3
    builder.build()
}

#[test]
fn hidden_with_space_glyph() {
    assert_eq!(
        shape(&font(), "A\u{200B}B", ""),
        "gid1=0+600|gid3=1+0|gid2=2+700"
    );
}

#[test]
fn hidden_with_invisible_glyph() {
    assert_eq!(
        shape(&font(), "A\u{200B}B", "--invisible-glyph=2"),
        "gid1=0+600|gid2=1+0|gid2=2+700"
    );
}

#[test]
fn removed() {
    assert_eq!(
        shape(&font(), "A\u{200B}B", "--remove-default-ignorables"),
        "gid1=0+600|gid2=2+700"
    );
}

#[test]
fn preserved() {
    assert_eq!(
        shape(&font(), "A\u{200B}B", "--preserve-default-ignorables"),
        "gid1=0+600|gid0=1+500|gid2=2+700"
    );
}

#[test]
fn preserve_wins_over_remove() {
    assert_eq!(
        shape(
            &font(),
            "A\u{200B}B",
            "--preserve-default-ignorables --remove-default-ignorables"
        ),
        "gid1=0+600|gid0=1+500|gid2=2+700"
    );
}

#[test]
fn space_variants_use_space_fallback() {
    // EM SPACE has no glyph and becomes a space as wide as the em.
    assert_eq!(shape(&font(), "A\u{2003}B", ""), "gid1=0+600|gid3=1+1000|gid2=2+700");
}
