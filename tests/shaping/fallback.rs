use crate::font_builder::{FontBuilder, Lookup};

fn shape_fallback(font_data: &[u8], text: &str, direction: buzzshape::Direction) -> String {
    let face = buzzshape::Face::from_slice(font_data, 0).unwrap();
    let mut buffer = buzzshape::UnicodeBuffer::new();
    buffer.push_str(text);
    buffer.set_direction(direction);
    let glyphs = buzzshape::shape_fallback(&face, buffer);
    glyphs.serialize(&face, buzzshape::SerializeFlags::default())
}

fn font(with_space: bool) -> Vec<u8> {
    let mut builder = FontBuilder::new(500);
    let f = builder.glyph('f', 300); // 1
    let i = builder.glyph('i', 250); // 2
    builder.glyph('A', 600); // 3
    builder.glyph('B', 700); // 4
    if with_space {
        builder.glyph(' ', 200); // 5
    }
    let fi = builder.unmapped_glyph(520);
    builder
        .gsub()
        .script(b"DFLT")
        .feature(b"liga", Lookup::Ligature(vec![(vec![f, i], fi)]));
    builder.build()
}

#[test]
fn layout_is_ignored() {
    let data = font(true);
    assert_eq!(crate::shape(&data, "fi", ""), "gid6=0+520");
    assert_eq!(
        shape_fallback(&data, "fi", buzzshape::Direction::LeftToRight),
        "gid1=0+300|gid2=1+250"
    );
}

#[test]
fn ignorables_become_empty_spaces() {
    assert_eq!(
        shape_fallback(&font(true), "A\u{200B}B", buzzshape::Direction::LeftToRight),
        "gid3=0+600|gid5=1+0|gid4=2+700"
    );
}

#[test]
fn ignorables_without_space_map_as_usual() {
    assert_eq!(
        shape_fallback(&font(false), "A\u{200B}B", buzzshape::Direction::LeftToRight),
        "gid3=0+600|gid0=1+500|gid4=2+700"
    );
}

#[test]
fn backward_text_is_reversed() {
    assert_eq!(
        shape_fallback(&font(true), "AB", buzzshape::Direction::RightToLeft),
        "gid4=1+700|gid3=0+600"
    );
}

#[test]
fn every_glyph_is_safe_to_break() {
    let data = font(true);
    let face = buzzshape::Face::from_slice(&data, 0).unwrap();
    let mut buffer = buzzshape::UnicodeBuffer::new();
    buffer.push_str("fiAB");
    let glyphs = buzzshape::shape_fallback(&face, buffer);
    assert_eq!(glyphs.len(), 4);
    assert!(glyphs.glyph_infos().iter().all(|info| !info.unsafe_to_break()));
}
