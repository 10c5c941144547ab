//! Glyph sequence matching that skips what the current lookup ignores.

use smallvec::SmallVec;
use ttf_parser::opentype_layout::ClassDefinition;
use ttf_parser::GlyphId;

use super::apply::ApplyContext;
use super::layout::{TableIndex, MAX_CONTEXT_LENGTH};
use crate::buffer::GlyphInfo;
use crate::Mask;

/// Tests a glyph against the `n`-th element of a pattern.
pub type MatchFunc<'a> = dyn Fn(GlyphId, u16) -> bool + 'a;

/// The value is a glyph id.
pub fn match_glyph(glyph: GlyphId, value: u16) -> bool {
    glyph.0 == value
}

/// The value is a class in `class_def`.
pub fn match_class<'a>(class_def: ClassDefinition<'a>) -> impl Fn(GlyphId, u16) -> bool + 'a {
    move |glyph, value| class_def.get(glyph) == value
}

/// The glyphs an input sequence matched, starting at the cursor.
#[derive(Clone, Debug)]
pub struct InputMatch {
    /// Buffer indices of all matched glyphs, the cursor's included.
    pub positions: SmallVec<[usize; 8]>,
    /// One past the last matched glyph.
    pub end: usize,
    /// Ligature components the matched glyphs add up to.
    pub components: u8,
}

/// Matches the cursor glyph followed by `len` more glyphs accepted by `f`.
///
/// Glyphs attached to different components of an earlier ligature never
/// match together. The exceptions are marks of the ligature itself and
/// marks on a ligature this lookup skips anyway.
pub fn match_input(ctx: &ApplyContext, len: u16, f: &MatchFunc) -> Option<InputMatch> {
    let count = usize::from(len) + 1;
    if count > MAX_CONTEXT_LENGTH {
        return None;
    }

    let first = *ctx.buffer.cur(0);
    let first_attached = first.lig_id() != 0 && first.lig_comp() != 0;

    let mut skipper = Skipper::new(ctx, ctx.buffer.idx, false).matching(f);
    let mut positions = SmallVec::new();
    positions.push(ctx.buffer.idx);
    let mut components = first.lig_num_comps();
    let mut base_skippable = None;

    for _ in 1..count {
        let index = skipper.advance()?;
        let this = &ctx.buffer.info[index];
        let attached = this.lig_id() != 0 && this.lig_comp() != 0;

        if first_attached {
            let same_component =
                this.lig_id() == first.lig_id() && this.lig_comp() == first.lig_comp();
            if !same_component
                && !*base_skippable
                    .get_or_insert_with(|| ligature_base_skippable(&skipper, first.lig_id()))
            {
                return None;
            }
        } else if attached && this.lig_id() != first.lig_id() {
            return None;
        }

        components = components.wrapping_add(this.lig_num_comps());
        positions.push(index);
    }

    Some(InputMatch {
        end: positions[positions.len() - 1] + 1,
        positions,
        components,
    })
}

/// Whether the already output base of ligature `lig_id` is one the lookup
/// skips.
fn ligature_base_skippable(skipper: &Skipper, lig_id: u8) -> bool {
    skipper
        .ctx
        .buffer
        .out_info
        .iter()
        .rev()
        .take_while(|info| info.lig_id() == lig_id)
        .find(|info| info.lig_comp() == 0)
        .map_or(false, |base| skipper.skippable(base) == Skippable::Yes)
}

/// Matches `len` glyphs before the cursor on the output side. Returns the
/// index of the earliest one.
pub fn match_backtrack(ctx: &ApplyContext, len: u16, f: &MatchFunc) -> Option<usize> {
    let start = ctx.buffer.backtrack_len();
    let mut skipper = Skipper::new(ctx, start, true).matching(f);
    (0..len).try_fold(start, |_, _| skipper.retreat())
}

/// Matches `len` glyphs from index `from` on. Returns one past the last.
pub fn match_lookahead(ctx: &ApplyContext, len: u16, f: &MatchFunc, from: usize) -> Option<usize> {
    let mut skipper = Skipper::new(ctx, from - 1, true).matching(f);
    (0..len).try_fold(from, |_, _| skipper.advance().map(|index| index + 1))
}

/// What a skipper makes of one glyph.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Verdict {
    Match,
    Reject,
    Skip,
}

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Skippable {
    No,
    Yes,
    /// Default ignorables: skipped only when they do not match.
    Maybe,
}

/// Walks the buffer from a start index over the glyphs the current lookup
/// ignores.
///
/// It borrows the context immutably, so it is built where it is needed
/// and never stored.
pub struct Skipper<'a, 'b> {
    ctx: &'a ApplyContext<'a, 'b>,
    props: u32,
    ignore_zwnj: bool,
    ignore_zwj: bool,
    ignore_hidden: bool,
    mask: Mask,
    syllable: u8,
    matcher: Option<&'a MatchFunc<'a>>,
    matched: u16,
    index: usize,
}

impl<'a, 'b> Skipper<'a, 'b> {
    /// Context matching looks at glyphs of any feature and always steps
    /// over ZWJ.
    pub fn new(ctx: &'a ApplyContext<'a, 'b>, start: usize, context: bool) -> Self {
        let lookup = &ctx.lookup;
        let positioning = ctx.table == TableIndex::GPOS;
        let syllable = if lookup.per_syllable && start == ctx.buffer.idx {
            ctx.buffer.cur(0).syllable()
        } else {
            0
        };

        Skipper {
            ctx,
            props: lookup.props,
            ignore_zwnj: positioning || (context && lookup.auto_zwnj),
            ignore_zwj: context || lookup.auto_zwj,
            ignore_hidden: positioning,
            mask: if context { u32::MAX } else { lookup.mask },
            syllable,
            matcher: None,
            matched: 0,
            index: start,
        }
    }

    pub fn with_props(mut self, props: u32) -> Self {
        self.props = props;
        self
    }

    pub fn matching(mut self, f: &'a MatchFunc<'a>) -> Self {
        self.matcher = Some(f);
        self
    }

    /// Moves to the next glyph that is not skipped and returns its index
    /// if it matches.
    pub fn advance(&mut self) -> Option<usize> {
        let len = self.ctx.buffer.len();
        while self.index + 1 < len {
            self.index += 1;
            match self.classify(&self.ctx.buffer.info[self.index]) {
                Verdict::Match => {
                    self.matched += 1;
                    return Some(self.index);
                }
                Verdict::Reject => return None,
                Verdict::Skip => {}
            }
        }

        None
    }

    /// Like `advance`, walking backwards over the output side.
    pub fn retreat(&mut self) -> Option<usize> {
        while self.index > 0 {
            self.index -= 1;
            match self.classify(self.ctx.buffer.backtrack_info(self.index)) {
                Verdict::Match => {
                    self.matched += 1;
                    return Some(self.index);
                }
                Verdict::Reject => return None,
                Verdict::Skip => {}
            }
        }

        None
    }

    pub fn classify(&self, info: &GlyphInfo) -> Verdict {
        let skip = self.skippable(info);
        if skip == Skippable::Yes {
            return Verdict::Skip;
        }

        let eligible = info.mask & self.mask != 0
            && (self.syllable == 0 || self.syllable == info.syllable());

        // `None` means there is no pattern to compare against.
        let matches = match self.matcher {
            _ if !eligible => Some(false),
            Some(f) => Some(f(info.as_glyph(), self.matched)),
            None => None,
        };

        match (matches, skip) {
            (Some(true), _) | (None, Skippable::No) => Verdict::Match,
            (_, Skippable::No) => Verdict::Reject,
            _ => Verdict::Skip,
        }
    }

    pub fn skippable(&self, info: &GlyphInfo) -> Skippable {
        if !self.ctx.glyph_allowed(info, self.props) {
            return Skippable::Yes;
        }

        let ignorable = info.is_default_ignorable()
            && (self.ignore_zwnj || !info.is_zwnj())
            && (self.ignore_zwj || !info.is_zwj())
            && (self.ignore_hidden || !info.is_hidden());

        if ignorable {
            Skippable::Maybe
        } else {
            Skippable::No
        }
    }
}
