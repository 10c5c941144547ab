/*!
`buzzshape` is a complex-text shaping engine.

It takes a run of Unicode text with uniform script, language and direction,
plus a font, and produces positioned glyphs: the font's substitutions,
ligatures, reordering and mark positioning applied.

```ignore
let face = buzzshape::Face::from_slice(&font_data, 0).unwrap();
let mut buffer = buzzshape::UnicodeBuffer::new();
buffer.push_str("Hello");
let glyphs = buzzshape::shape(&face, &[], buffer);
```
*/

#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod aat;
mod buffer;
mod common;
mod complex;
mod diff;
mod face;
mod ot;
mod plan;
#[cfg(feature = "std")]
mod plan_cache;
mod shape;
mod tag;
mod tag_table;
mod text_parser;
mod unicode;
mod unicode_norm;

pub use ttf_parser::Tag;

pub use crate::buffer::{
    glyph_flag, BufferClusterLevel, BufferFlags, GlyphBuffer, GlyphInfo, GlyphPosition,
    SerializeFlags, UnicodeBuffer,
};
pub use crate::common::{script, Direction, Feature, Language, Script, Variation};
pub use crate::diff::{diff, BufferDiff, DiffFlags, Mismatch};
pub use crate::face::{Face, GlyphExtents};
pub use crate::plan::ShapePlan;
#[cfg(feature = "std")]
pub use crate::plan_cache::{shape_cached, ShapePlanCache};
pub use crate::shape::{shape, shape_fallback, shape_with_plan};
pub use crate::tag::{
    tags_from_script_and_language, LanguageTags, ScriptTags, DEFAULT_LANGUAGE, DEFAULT_SCRIPT,
};

type Mask = u32;
