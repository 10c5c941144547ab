//! Contextual and chained contextual lookups, shared by GSUB and GPOS.
//!
//! Every format is reduced to a [`Rule`]: three glyph sequences, each a
//! length plus a test for the glyph at a given position, and the nested
//! lookups to run once all three match.

use ttf_parser::opentype_layout::{
    ChainedContextLookup, ChainedSequenceRule, ContextLookup, Coverage,
    SequenceLookupRecord, SequenceRule,
};
use ttf_parser::{GlyphId, LazyArray16};

use super::apply::{apply_nested, Apply, ApplyContext, WouldApply, WouldApplyContext};
use super::matching::{
    match_backtrack, match_class, match_glyph, match_input, match_lookahead, MatchFunc,
};

/// One of a rule's glyph sequences.
#[derive(Clone, Copy)]
struct Sequence<'f> {
    len: u16,
    test: &'f MatchFunc<'f>,
}

const EMPTY: Sequence<'static> = Sequence {
    len: 0,
    test: &|_, _| false,
};

struct Rule<'f> {
    backtrack: Sequence<'f>,
    /// Everything after the cursor glyph, which the caller already checked.
    input: Sequence<'f>,
    lookahead: Sequence<'f>,
}

impl Rule<'_> {
    /// Matches input, then lookahead, then backtrack.
    fn apply(&self, ctx: &mut ApplyContext, records: LazyArray16<SequenceLookupRecord>) -> Option<()> {
        let input = match_input(ctx, self.input.len, self.input.test)?;
        let end = match_lookahead(ctx, self.lookahead.len, self.lookahead.test, input.end)?;
        let start = match_backtrack(ctx, self.backtrack.len, self.backtrack.test)?;

        ctx.buffer.unsafe_to_break_from_outbuffer(start, end);
        apply_nested(ctx, input, records);
        Some(())
    }

    fn would_apply(&self, ctx: &WouldApplyContext) -> bool {
        let has_context = self.backtrack.len != 0 || self.lookahead.len != 0;
        let tail = &ctx.glyphs[1..];

        !(ctx.zero_context && has_context)
            && tail.len() == usize::from(self.input.len)
            && (0..self.input.len).zip(tail).all(|(i, &glyph)| (self.input.test)(glyph, i))
    }
}

/// Compares the glyph at position `i` with `values[i]`.
fn by_value<'a>(
    values: LazyArray16<'a, u16>,
    compare: &'a MatchFunc<'a>,
) -> impl Fn(GlyphId, u16) -> bool + 'a {
    move |glyph, i| values.get(i).map_or(false, |value| compare(glyph, value))
}

/// Looks the glyph at position `i` up in the `i`-th coverage table.
pub(super) fn by_coverage<'a>(
    coverage_at: impl Fn(u16) -> Option<Coverage<'a>> + 'a,
) -> impl Fn(GlyphId, u16) -> bool + 'a {
    move |glyph, i| coverage_at(i).map_or(false, |coverage| coverage.contains(glyph))
}

const GLYPH_IDS: &MatchFunc<'static> = &match_glyph;

/// How the values of a format 1 or 2 rule are compared, per sequence.
#[derive(Clone, Copy)]
struct Comparison<'f> {
    backtrack: &'f MatchFunc<'f>,
    input: &'f MatchFunc<'f>,
    lookahead: &'f MatchFunc<'f>,
}

impl<'f> Comparison<'f> {
    fn glyphs() -> Self {
        Comparison {
            backtrack: GLYPH_IDS,
            input: GLYPH_IDS,
            lookahead: GLYPH_IDS,
        }
    }
}

/// A rule whose sequences hold glyph ids or classes.
trait ValueRule<'a>: Copy {
    fn sequences(&self) -> [LazyArray16<'a, u16>; 3];
    fn records(&self) -> LazyArray16<'a, SequenceLookupRecord>;

    /// Builds the matching rule and hands it to `f`.
    fn with_rule<R>(&self, cmp: Comparison, f: impl FnOnce(&Rule) -> R) -> R {
        let [backtrack, input, lookahead] = self.sequences();
        let back_test = by_value(backtrack, cmp.backtrack);
        let input_test = by_value(input, cmp.input);
        let ahead_test = by_value(lookahead, cmp.lookahead);

        f(&Rule {
            backtrack: Sequence { len: backtrack.len(), test: &back_test },
            input: Sequence { len: input.len(), test: &input_test },
            lookahead: Sequence { len: lookahead.len(), test: &ahead_test },
        })
    }
}

impl<'a> ValueRule<'a> for SequenceRule<'a> {
    fn sequences(&self) -> [LazyArray16<'a, u16>; 3] {
        [LazyArray16::default(), self.input, LazyArray16::default()]
    }

    fn records(&self) -> LazyArray16<'a, SequenceLookupRecord> {
        self.lookups
    }
}

impl<'a> ValueRule<'a> for ChainedSequenceRule<'a> {
    fn sequences(&self) -> [LazyArray16<'a, u16>; 3] {
        [self.backtrack, self.input, self.lookahead]
    }

    fn records(&self) -> LazyArray16<'a, SequenceLookupRecord> {
        self.lookups
    }
}

/// Applies the first rule of `rules` that matches.
fn apply_first<'a, R: ValueRule<'a>>(
    ctx: &mut ApplyContext,
    rules: impl IntoIterator<Item = R>,
    cmp: Comparison,
) -> Option<()> {
    rules
        .into_iter()
        .find_map(|rule| rule.with_rule(cmp, |matcher| matcher.apply(ctx, rule.records())))
}

fn would_apply_any<'a, R: ValueRule<'a>>(
    ctx: &WouldApplyContext,
    rules: impl IntoIterator<Item = R>,
    cmp: Comparison,
) -> bool {
    rules
        .into_iter()
        .any(|rule| rule.with_rule(cmp, |matcher| matcher.would_apply(ctx)))
}

impl Apply for ContextLookup<'_> {
    fn apply(&self, ctx: &mut ApplyContext) -> Option<()> {
        let glyph = ctx.buffer.cur(0).as_glyph();
        match *self {
            Self::Format1 { coverage, sets } => {
                let set = sets.get(coverage.get(glyph)?)?;
                apply_first(ctx, set, Comparison::glyphs())
            }
            Self::Format2 {
                coverage,
                classes,
                sets,
            } => {
                coverage.get(glyph)?;
                let set = sets.get(classes.get(glyph))?;
                let input = match_class(classes);
                let cmp = Comparison { input: &input, ..Comparison::glyphs() };
                apply_first(ctx, set, cmp)
            }
            Self::Format3 {
                coverage,
                coverages,
                lookups,
            } => {
                coverage.get(glyph)?;
                let input_test = by_coverage(move |i| coverages.get(i));
                let rule = Rule {
                    backtrack: EMPTY,
                    input: Sequence { len: coverages.len(), test: &input_test },
                    lookahead: EMPTY,
                };
                rule.apply(ctx, lookups)
            }
        }
    }
}

impl WouldApply for ContextLookup<'_> {
    fn would_apply(&self, ctx: &WouldApplyContext) -> bool {
        let glyph = ctx.glyphs[0];
        match *self {
            Self::Format1 { coverage, sets } => coverage
                .get(glyph)
                .and_then(|index| sets.get(index))
                .map_or(false, |set| would_apply_any(ctx, set, Comparison::glyphs())),
            Self::Format2 { classes, sets, .. } => sets.get(classes.get(glyph)).map_or(false, |set| {
                let input = match_class(classes);
                would_apply_any(ctx, set, Comparison { input: &input, ..Comparison::glyphs() })
            }),
            Self::Format3 { coverages, .. } => {
                let input_test = by_coverage(move |i| coverages.get(i));
                Rule {
                    backtrack: EMPTY,
                    input: Sequence { len: coverages.len(), test: &input_test },
                    lookahead: EMPTY,
                }
                .would_apply(ctx)
            }
        }
    }
}

impl Apply for ChainedContextLookup<'_> {
    fn apply(&self, ctx: &mut ApplyContext) -> Option<()> {
        let glyph = ctx.buffer.cur(0).as_glyph();
        match *self {
            Self::Format1 { coverage, sets } => {
                let set = sets.get(coverage.get(glyph)?)?;
                apply_first(ctx, set, Comparison::glyphs())
            }
            Self::Format2 {
                coverage,
                backtrack_classes,
                input_classes,
                lookahead_classes,
                sets,
            } => {
                coverage.get(glyph)?;
                let set = sets.get(input_classes.get(glyph))?;
                let back = match_class(backtrack_classes);
                let input = match_class(input_classes);
                let ahead = match_class(lookahead_classes);
                let cmp = Comparison {
                    backtrack: &back,
                    input: &input,
                    lookahead: &ahead,
                };
                apply_first(ctx, set, cmp)
            }
            Self::Format3 {
                coverage,
                backtrack_coverages,
                input_coverages,
                lookahead_coverages,
                lookups,
            } => {
                coverage.get(glyph)?;
                let back = by_coverage(move |i| backtrack_coverages.get(i));
                let input = by_coverage(move |i| input_coverages.get(i));
                let ahead = by_coverage(move |i| lookahead_coverages.get(i));
                let rule = Rule {
                    backtrack: Sequence { len: backtrack_coverages.len(), test: &back },
                    input: Sequence { len: input_coverages.len(), test: &input },
                    lookahead: Sequence { len: lookahead_coverages.len(), test: &ahead },
                };
                rule.apply(ctx, lookups)
            }
        }
    }
}

impl WouldApply for ChainedContextLookup<'_> {
    fn would_apply(&self, ctx: &WouldApplyContext) -> bool {
        let glyph = ctx.glyphs[0];
        match *self {
            Self::Format1 { coverage, sets } => coverage
                .get(glyph)
                .and_then(|index| sets.get(index))
                .map_or(false, |set| would_apply_any(ctx, set, Comparison::glyphs())),
            Self::Format2 {
                input_classes,
                sets,
                ..
            } => sets.get(input_classes.get(glyph)).map_or(false, |set| {
                // Only the input sequence is compared here.
                let input = match_class(input_classes);
                would_apply_any(ctx, set, Comparison { input: &input, ..Comparison::glyphs() })
            }),
            Self::Format3 {
                backtrack_coverages,
                input_coverages,
                lookahead_coverages,
                ..
            } => {
                let input = by_coverage(move |i| input_coverages.get(i));
                Rule {
                    backtrack: Sequence { len: backtrack_coverages.len(), test: EMPTY.test },
                    input: Sequence { len: input_coverages.len(), test: &input },
                    lookahead: Sequence { len: lookahead_coverages.len(), test: EMPTY.test },
                }
                .would_apply(ctx)
            }
        }
    }
}
