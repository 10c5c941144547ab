//! Unicode normalization driven by what the font can render.
//!
//! Every grapheme is decomposed in a chain of 1:2 steps, marks are reordered
//! by combining class and then recomposed if the shaper prefers it. Unlike
//! plain NFC/NFD, a decomposition or composition only happens when the font
//! has a glyph for the result, so precomposed glyphs win when `ccmp` is weak
//! and decompositions rescue characters the font lacks.

use ttf_parser::GlyphId;

use crate::buffer::{Buffer, BufferScratchFlags, GlyphInfo};
use crate::complex::MAX_COMBINING_MARKS;
use crate::face::Face;
use crate::plan::ShapePlan;
use crate::unicode::{space, CharExt};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ShapeNormalizationMode {
    None,
    Decomposed,
    /// Never composes base-to-base.
    ComposedDiacritics,
    /// Always fully decomposes and then recomposes back.
    ComposedDiacriticsNoShortCircuit,
    Auto,
}

impl Default for ShapeNormalizationMode {
    fn default() -> Self {
        Self::Auto
    }
}

impl ShapeNormalizationMode {
    /// Whether a character the font has is kept without decomposing it.
    fn might_short_circuit(self) -> bool {
        !matches!(self, Self::Decomposed | Self::ComposedDiacriticsNoShortCircuit)
    }

    fn recomposes(self) -> bool {
        matches!(self, Self::ComposedDiacritics | Self::ComposedDiacriticsNoShortCircuit)
    }
}

/// What a shaper's decompose and compose hooks get to see.
pub struct ShapeNormalizeContext<'a, 'b> {
    pub plan: &'a ShapePlan,
    pub buffer: &'a mut Buffer,
    pub face: &'a Face<'b>,
}

impl ShapeNormalizeContext<'_, '_> {
    fn decompose(&self, ab: char) -> Option<(char, Option<char>)> {
        self.plan.shaper.decompose(self, ab)
    }

    fn compose(&self, a: char, b: char) -> Option<char> {
        self.plan.shaper.compose(self, a, b)
    }
}

pub fn normalize(plan: &ShapePlan, face: &Face, buffer: &mut Buffer) {
    if buffer.is_empty() {
        return;
    }

    let mode = match plan.shaper.normalization_preference() {
        // Decomposing would help GPOS mark positioning, but composed output
        // is what existing fonts are tested against.
        ShapeNormalizationMode::Auto => ShapeNormalizationMode::ComposedDiacritics,
        mode => mode,
    };

    let mut ctx = ShapeNormalizeContext { plan, buffer, face };
    let all_simple = decompose_round(
        &mut ctx,
        mode.might_short_circuit(),
        mode == ShapeNormalizationMode::None,
    );

    if !all_simple {
        reorder_round(&mut ctx);
    }

    if ctx.buffer.scratch_flags.contains(BufferScratchFlags::HAS_CGJ) {
        unhide_needless_cgj(ctx.buffer);
    }

    if !all_simple && mode.recomposes() {
        recompose_round(&mut ctx);
    }
}

/// Returns `true` when no cluster had marks, so the later rounds can be skipped.
fn decompose_round(
    ctx: &mut ShapeNormalizeContext,
    might_short_circuit: bool,
    always_short_circuit: bool,
) -> bool {
    let mut all_simple = true;
    let count = ctx.buffer.len();
    ctx.buffer.clear_output();
    ctx.buffer.idx = 0;

    while ctx.buffer.idx < count {
        // Simple clusters run up to the base the next marks sit on.
        let next_mark = (ctx.buffer.idx + 1..count).find(|&i| ctx.buffer.info[i].is_unicode_mark());
        let simple_end = next_mark.map_or(count, |mark| mark - 1);

        if might_short_circuit {
            map_nominal_glyphs(ctx, simple_end);
        }

        while ctx.buffer.idx < simple_end {
            decompose_current_character(ctx, might_short_circuit);
        }

        if ctx.buffer.idx == count {
            break;
        }

        all_simple = false;
        let end = (ctx.buffer.idx + 1..count)
            .find(|&i| !ctx.buffer.info[i].is_unicode_mark())
            .unwrap_or(count);
        decompose_multi_char_cluster(ctx, end, always_short_circuit);
    }

    ctx.buffer.swap_buffers();
    all_simple
}

/// Passes characters up to `end` straight through as long as the font has
/// them.
fn map_nominal_glyphs(ctx: &mut ShapeNormalizeContext, end: usize) {
    let start = ctx.buffer.idx;
    let mut mapped = 0;
    for info in &mut ctx.buffer.info[start..end] {
        let Some(glyph) = ctx.face.get_nominal_glyph(info.glyph_id) else {
            break;
        };

        info.set_glyph_index(u32::from(glyph.0));
        mapped += 1;
    }

    ctx.buffer.next_glyphs(mapped);
}

fn reorder_round(ctx: &mut ShapeNormalizeContext) {
    let count = ctx.buffer.len();
    let mut start = 0;
    while start < count {
        if ctx.buffer.info[start].modified_combining_class() == 0 {
            start += 1;
            continue;
        }

        let end = (start + 1..count)
            .find(|&i| ctx.buffer.info[i].modified_combining_class() == 0)
            .unwrap_or(count);

        // The sort is quadratic, so long runs are left alone.
        if end - start <= MAX_COMBINING_MARKS {
            ctx.buffer.sort(start, end, compare_combining_class);
            ctx.plan.shaper.reorder_marks(ctx.plan, ctx.buffer, start, end);
        }

        start = end + 1;
    }
}

/// A CGJ that did not block any reordering is made skippable again.
fn unhide_needless_cgj(buffer: &mut Buffer) {
    for i in 1..buffer.len().saturating_sub(1) {
        if buffer.info[i].glyph_id == 0x034F {
            let last = buffer.info[i - 1].modified_combining_class();
            let next = buffer.info[i + 1].modified_combining_class();
            if next == 0 || last <= next {
                buffer.info[i].unhide();
            }
        }
    }
}

fn recompose_round(ctx: &mut ShapeNormalizeContext) {
    let count = ctx.buffer.len();
    let mut starter = 0;
    ctx.buffer.clear_output();
    ctx.buffer.next_glyph();

    while ctx.buffer.idx < count {
        if compose_into_starter(ctx, starter) {
            continue;
        }

        ctx.buffer.next_glyph();
        if ctx.buffer.prev().modified_combining_class() == 0 {
            starter = ctx.buffer.out_len() - 1;
        }
    }

    ctx.buffer.swap_buffers();
}

/// Folds the current mark into the starter when nothing between them
/// blocks it and the font has the composed character.
///
/// Characters of class zero never compose with a starter. This keeps
/// Hangul jamo apart as well.
fn compose_into_starter(ctx: &mut ShapeNormalizeContext, starter: usize) -> bool {
    let cur = *ctx.buffer.cur(0);
    if !cur.is_unicode_mark() {
        return false;
    }

    let blocked = starter != ctx.buffer.out_len() - 1
        && ctx.buffer.prev().modified_combining_class() >= cur.modified_combining_class();
    if blocked {
        return false;
    }

    let a = ctx.buffer.out_info[starter].as_char();
    let Some(composed) = ctx.compose(a, cur.as_char()) else {
        return false;
    };
    let Some(glyph) = ctx.face.get_nominal_glyph(u32::from(composed)) else {
        return false;
    };

    // Copy to the output, then merge it into the starter.
    ctx.buffer.next_glyph();
    let end = ctx.buffer.out_len();
    ctx.buffer.merge_out_clusters(starter, end);
    ctx.buffer.out_info.pop();

    let mut flags = ctx.buffer.scratch_flags;
    let info = &mut ctx.buffer.out_info[starter];
    info.glyph_id = u32::from(composed);
    info.set_glyph_index(u32::from(glyph.0));
    info.init_unicode_props(&mut flags);
    ctx.buffer.scratch_flags = flags;
    true
}

fn compare_combining_class(a: &GlyphInfo, b: &GlyphInfo) -> bool {
    a.modified_combining_class() > b.modified_combining_class()
}

fn set_glyph(info: &mut GlyphInfo, face: &Face) {
    if let Some(glyph) = face.get_nominal_glyph(info.glyph_id) {
        info.set_glyph_index(u32::from(glyph.0));
    }
}

/// Writes a decomposition of `ab` the font can render and returns the
/// number of characters written, zero if nothing decomposed.
fn decompose(ctx: &mut ShapeNormalizeContext, shortest: bool, ab: char) -> u32 {
    let Some((a, b)) = ctx.decompose(ab) else {
        return 0;
    };

    // The second half is never decomposed further.
    let b = match b.map(|b| (b, ctx.face.get_nominal_glyph(u32::from(b)))) {
        Some((_, None)) => return 0,
        Some((b, Some(glyph))) => Some((b, glyph)),
        None => None,
    };

    let a_glyph = ctx.face.get_nominal_glyph(u32::from(a));
    let deeper = if !shortest || a_glyph.is_none() {
        decompose(ctx, shortest, a)
    } else {
        0
    };

    let written = match (deeper, a_glyph) {
        (0, Some(glyph)) => {
            ctx.buffer.output_char(u32::from(a), u32::from(glyph.0));
            1
        }
        (0, None) => return 0,
        (n, _) => n,
    };

    match b {
        Some((b, glyph)) => {
            ctx.buffer.output_char(u32::from(b), u32::from(glyph.0));
            written + 1
        }
        None => written,
    }
}

fn decompose_current_character(ctx: &mut ShapeNormalizeContext, shortest: bool) {
    let u = ctx.buffer.cur(0).as_char();
    let glyph = ctx.face.get_nominal_glyph(u32::from(u));

    if (!shortest || glyph.is_none()) && decompose(ctx, shortest, u) > 0 {
        ctx.buffer.skip_glyph();
        return;
    }

    let glyph = glyph
        .or_else(|| space_fallback(ctx, u))
        // U+2011 is the only no-break variant of a character that is not a space.
        .or_else(|| match u {
            '\u{2011}' => ctx.face.get_nominal_glyph(0x2010),
            _ => None,
        })
        .unwrap_or(ctx.buffer.not_found);

    ctx.buffer.next_char(u32::from(glyph.0));
}

/// Shows a space the font lacks as U+0020 or the invisible glyph, and
/// records the width positioning should give it.
fn space_fallback(ctx: &mut ShapeNormalizeContext, u: char) -> Option<GlyphId> {
    if !ctx.buffer.cur(0).is_unicode_space() {
        return None;
    }

    let space_type = u.space_fallback();
    if space_type == space::NOT_SPACE {
        return None;
    }

    let glyph = ctx.face.get_nominal_glyph(0x0020).or(ctx.buffer.invisible)?;
    ctx.buffer.cur_mut(0).set_space_fallback(space_type);
    ctx.buffer.scratch_flags |= BufferScratchFlags::HAS_SPACE_FALLBACK;
    Some(glyph)
}

/// Clusters with variation selectors are not normalized. A base and
/// selector pair the font maps becomes one glyph, anything else passes
/// through for GSUB to handle.
fn handle_variation_selector_cluster(ctx: &mut ShapeNormalizeContext, end: usize) {
    let face = ctx.face;
    let buffer = &mut *ctx.buffer;
    while buffer.idx < end {
        let has_selector = buffer.idx + 1 < end && buffer.cur(1).as_char().is_variation_selector();
        if !has_selector {
            set_glyph(buffer.cur_mut(0), face);
            buffer.next_glyph();
            continue;
        }

        let (base, selector) = (buffer.cur(0).as_char(), buffer.cur(1).as_char());
        match face.glyph_variation_index(base, selector) {
            Some(glyph) => {
                buffer.cur_mut(0).set_glyph_index(u32::from(glyph.0));
                let unicode = buffer.cur(0).glyph_id;
                buffer.replace_glyphs(2, 1, &[unicode]);
            }
            None => {
                for _ in 0..2 {
                    set_glyph(buffer.cur_mut(0), face);
                    buffer.next_glyph();
                }
            }
        }

        // Any further selectors pass through.
        while buffer.idx < end && buffer.cur(0).as_char().is_variation_selector() {
            set_glyph(buffer.cur_mut(0), face);
            buffer.next_glyph();
        }
    }
}

fn decompose_multi_char_cluster(ctx: &mut ShapeNormalizeContext, end: usize, short_circuit: bool) {
    let has_selector = ctx.buffer.info[ctx.buffer.idx..end]
        .iter()
        .any(|info| info.as_char().is_variation_selector());

    if has_selector {
        handle_variation_selector_cluster(ctx, end);
    } else {
        while ctx.buffer.idx < end {
            decompose_current_character(ctx, short_circuit);
        }
    }
}
