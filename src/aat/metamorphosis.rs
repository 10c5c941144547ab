//! `morx` glyph metamorphosis.

use alloc::vec::Vec;
use core::ops::Range;

use ttf_parser::{apple_layout, morx, FromData, GlyphId, LazyArray32};

use super::map::{feature_type, FeatureInfo, LETTER_CASE_SMALL_CAPS, LOWER_CASE_SMALL_CAPS};
use super::{glyph_class, DELETED_GLYPH, START_STATE};
use crate::buffer::{Buffer, GlyphInfo, UnicodeProps};
use crate::face::Face;
use crate::ot::layout::MAX_CONTEXT_LENGTH;
use crate::plan::ShapePlan;

/// Computes the subtable flags of every chain for the requested settings.
///
/// `features` must be sorted by type and setting.
pub fn compile_flags(face: &Face, features: &[FeatureInfo]) -> Vec<u32> {
    let Some(morx) = face.tables().morx.clone() else {
        return Vec::new();
    };

    let has_feature = |kind: u16, setting: u16| {
        features
            .binary_search_by(|f| (f.kind, f.setting).cmp(&(kind, setting)))
            .is_ok()
    };

    morx.chains
        .into_iter()
        .map(|chain| {
            let mut flags = chain.default_flags;
            for feature in chain.features {
                let requested = has_feature(feature.kind, feature.setting)
                    || (feature.kind == feature_type::LETTER_CASE
                        && feature.setting == LETTER_CASE_SMALL_CAPS
                        && has_feature(feature_type::LOWER_CASE, LOWER_CASE_SMALL_CAPS));

                if requested {
                    flags &= feature.disable_flags;
                    flags |= feature.enable_flags;
                }
            }
            flags
        })
        .collect()
}

pub fn apply(plan: &ShapePlan, face: &Face, buffer: &mut Buffer) -> Option<()> {
    let morx = face.tables().morx.clone()?;

    for (i, chain) in morx.chains.into_iter().enumerate() {
        let flags = plan
            .aat_map
            .chain_flags
            .get(i)
            .copied()
            .unwrap_or(chain.default_flags);

        for subtable in chain.subtables {
            if subtable.feature_flags & flags == 0 {
                continue;
            }

            if !subtable.coverage.is_all_directions()
                && buffer.direction.is_vertical() != subtable.coverage.is_vertical()
            {
                continue;
            }

            // The buffer is in logical order. Bit 28 selects logical or
            // layout order and bit 30 reverses it.
            let reverse = if subtable.coverage.is_logical() {
                subtable.coverage.is_backwards()
            } else {
                subtable.coverage.is_backwards() != buffer.direction.is_backward()
            };

            log::trace!("applying morx subtable, reversed: {}", reverse);

            if reverse {
                buffer.reverse();
            }

            apply_subtable(&subtable.kind, face, buffer);

            if reverse {
                buffer.reverse();
            }
        }
    }

    Some(())
}

/// Entry flag shared by every `morx` state machine.
const DONT_ADVANCE: u16 = 0x4000;
const SET_MARK: u16 = 0x8000;
const NO_ACTION: u16 = 0xFFFF;

trait StateTableDriver<T: FromData> {
    /// Whether the driver edits glyphs in place instead of writing to the
    /// output buffer.
    fn in_place(&self) -> bool;
    fn is_actionable(&self, entry: &apple_layout::GenericStateEntry<T>, buffer: &Buffer) -> bool;
    fn transition(&mut self, entry: &apple_layout::GenericStateEntry<T>, buffer: &mut Buffer)
        -> Option<()>;

    fn can_advance(&self, entry: &apple_layout::GenericStateEntry<T>) -> bool {
        entry.flags & DONT_ADVANCE == 0
    }
}

/// Whether a break before the current glyph shapes the same.
///
/// It does when this transition does nothing, when restarting from the
/// start state ends up in the same place, and when the end of text would
/// not act after the previous glyph.
fn is_safe_to_break<T: FromData>(
    machine: &apple_layout::ExtendedStateTable<T>,
    driver: &dyn StateTableDriver<T>,
    buffer: &Buffer,
    state: u16,
    class: u16,
    entry: &apple_layout::GenericStateEntry<T>,
) -> bool {
    if driver.is_actionable(entry, buffer) {
        return false;
    }

    let advances = driver.can_advance(entry);
    let restarts_alike = state == START_STATE
        || (!advances && entry.new_state == START_STATE)
        || machine.entry(START_STATE, class).is_some_and(|restart| {
            !driver.is_actionable(&restart, buffer)
                && restart.new_state == entry.new_state
                && driver.can_advance(&restart) == advances
        });

    restarts_alike
        && machine
            .entry(state, u16::from(apple_layout::class::END_OF_TEXT))
            .is_some_and(|end| !driver.is_actionable(&end, buffer))
}

fn drive<T: FromData>(
    machine: &apple_layout::ExtendedStateTable<T>,
    driver: &mut dyn StateTableDriver<T>,
    buffer: &mut Buffer,
) {
    if !driver.in_place() {
        buffer.clear_output();
    }

    let mut state = START_STATE;
    buffer.idx = 0;
    loop {
        let class = glyph_class(machine, buffer);
        let Some(entry) = machine.entry(state, class) else {
            break;
        };

        let mid_text = buffer.idx < buffer.len() && buffer.backtrack_len() > 0;
        if mid_text && !is_safe_to_break(machine, &*driver, buffer, state, class, &entry) {
            let start = buffer.backtrack_len() - 1;
            buffer.unsafe_to_break_from_outbuffer(start, buffer.idx + 1);
        }

        // A failed action leaves the glyphs as they are.
        let _ = driver.transition(&entry, buffer);
        state = entry.new_state;

        if buffer.idx >= buffer.len() {
            break;
        }

        if driver.can_advance(&entry) {
            buffer.next_glyph();
            continue;
        }

        if buffer.max_ops <= 0 {
            log::warn!("morx state machine ran out of operations");
            buffer.next_glyph();
        }
        buffer.max_ops -= 1;
    }

    if !driver.in_place() {
        buffer.swap_buffers();
    }
}

fn apply_subtable(kind: &morx::SubtableKind, face: &Face, buffer: &mut Buffer) {
    let classes_face = face.has_glyph_classes().then_some(face);

    match kind {
        morx::SubtableKind::Rearrangement(ref table) => {
            let mut driver = RearrangementDriver { marked: 0..0 };
            drive::<()>(table, &mut driver, buffer);
        }
        morx::SubtableKind::Contextual(ref table) => {
            let mut driver = ContextualDriver { table, classes_face, mark: None };
            drive::<morx::ContextualEntryData>(&table.state, &mut driver, buffer);
        }
        morx::SubtableKind::Ligature(ref table) => {
            let mut driver = LigatureDriver {
                table,
                components: [0; MAX_COMPONENTS],
                component_count: 0,
            };
            drive::<u16>(&table.state, &mut driver, buffer);
        }
        morx::SubtableKind::NonContextual(ref lookup) => {
            for info in &mut buffer.info {
                if let Some(replacement) = lookup.value(info.as_glyph()) {
                    set_glyph(info, replacement, classes_face);
                }
            }
        }
        morx::SubtableKind::Insertion(ref table) => {
            let mut driver = InsertionDriver { mark: 0, glyphs: table.glyphs };
            drive::<morx::InsertionEntryData>(&table.state, &mut driver, buffer);
        }
    }
}

fn set_glyph(info: &mut GlyphInfo, glyph: u16, classes_face: Option<&Face>) {
    info.glyph_id = u32::from(glyph);
    if let Some(face) = classes_face {
        info.set_glyph_props(face.glyph_props(GlyphId(glyph)));
    }
}

/// Reorders the glyphs between a first and a last mark.
struct RearrangementDriver {
    marked: Range<usize>,
}

impl RearrangementDriver {
    const MARK_FIRST: u16 = 0x8000;
    const MARK_LAST: u16 = 0x2000;
    const VERB: u16 = 0x000F;
}

/// How many glyphs each verb moves from the start and the end of the
/// marked range. A value of 3 moves two and swaps them.
#[rustfmt::skip]
const REARRANGEMENT_VERBS: [(u8, u8); 16] = [
    (0, 0), // no change
    (1, 0), // Ax => xA
    (0, 1), // xD => Dx
    (1, 1), // AxD => DxA
    (2, 0), // ABx => xAB
    (3, 0), // ABx => xBA
    (0, 2), // xCD => CDx
    (0, 3), // xCD => DCx
    (1, 2), // AxCD => CDxA
    (1, 3), // AxCD => DCxA
    (2, 1), // ABxD => DxAB
    (3, 1), // ABxD => DxBA
    (2, 2), // ABxCD => CDxAB
    (3, 2), // ABxCD => CDxBA
    (2, 3), // ABxCD => DCxAB
    (3, 3), // ABxCD => DCxBA
];

/// Applies a rearrangement verb to `infos`.
fn rearrange(infos: &mut [GlyphInfo], verb: u16) {
    let (m_start, m_end) = REARRANGEMENT_VERBS[usize::from(verb & 0x0F)];
    let l = usize::from(m_start.min(2));
    let r = usize::from(m_end.min(2));

    let len = infos.len();
    if len < l + r || len > MAX_CONTEXT_LENGTH {
        return;
    }

    // Start piece to the end, end piece to the front, middle in between.
    infos.rotate_left(l);
    infos[..len - l].rotate_right(r);

    if m_start == 3 {
        infos.swap(len - 1, len - 2);
    }

    if m_end == 3 {
        infos.swap(0, 1);
    }
}

impl StateTableDriver<()> for RearrangementDriver {
    fn in_place(&self) -> bool {
        true
    }

    fn is_actionable(&self, entry: &apple_layout::GenericStateEntry<()>, _: &Buffer) -> bool {
        entry.flags & Self::VERB != 0 && !self.marked.is_empty()
    }

    fn transition(
        &mut self,
        entry: &apple_layout::GenericStateEntry<()>,
        buffer: &mut Buffer,
    ) -> Option<()> {
        let after_current = (buffer.idx + 1).min(buffer.len());
        if entry.flags & Self::MARK_FIRST != 0 {
            self.marked.start = buffer.idx;
        }

        if entry.flags & Self::MARK_LAST != 0 {
            self.marked.end = after_current;
        }

        let verb = entry.flags & Self::VERB;
        if verb != 0 && !self.marked.is_empty() && self.marked.len() <= MAX_CONTEXT_LENGTH {
            let Range { start, end } = self.marked;
            buffer.merge_clusters(start, after_current);
            buffer.merge_clusters(start, end);
            rearrange(&mut buffer.info[start..end], verb);
        }

        Some(())
    }
}

/// Swaps the marked and the current glyph through per-entry lookups.
struct ContextualDriver<'a> {
    table: &'a morx::ContextualSubtable<'a>,
    classes_face: Option<&'a Face<'a>>,
    mark: Option<usize>,
}

impl StateTableDriver<morx::ContextualEntryData> for ContextualDriver<'_> {
    fn in_place(&self) -> bool {
        true
    }

    fn is_actionable(
        &self,
        entry: &apple_layout::GenericStateEntry<morx::ContextualEntryData>,
        buffer: &Buffer,
    ) -> bool {
        let at_end = buffer.idx == buffer.len();
        (!at_end || self.mark.is_some())
            && (entry.extra.mark_index != NO_ACTION || entry.extra.current_index != NO_ACTION)
    }

    fn transition(
        &mut self,
        entry: &apple_layout::GenericStateEntry<morx::ContextualEntryData>,
        buffer: &mut Buffer,
    ) -> Option<()> {
        // At the end of text only a marked glyph can change.
        if buffer.idx == buffer.len() && self.mark.is_none() {
            return Some(());
        }

        // Without a mark the first glyph stands in for it.
        let mark = self.mark.unwrap_or(0);
        if entry.extra.mark_index != NO_ACTION && mark < buffer.len() {
            let lookup = self.table.lookup(u32::from(entry.extra.mark_index))?;
            if let Some(glyph) = lookup.value(buffer.info[mark].as_glyph()) {
                buffer.unsafe_to_break(mark, (buffer.idx + 1).min(buffer.len()));
                set_glyph(&mut buffer.info[mark], glyph, self.classes_face);
            }
        }

        if entry.extra.current_index != NO_ACTION && !buffer.is_empty() {
            let idx = buffer.idx.min(buffer.len() - 1);
            let lookup = self.table.lookup(u32::from(entry.extra.current_index))?;
            if let Some(glyph) = lookup.value(buffer.info[idx].as_glyph()) {
                set_glyph(&mut buffer.info[idx], glyph, self.classes_face);
            }
        }

        if entry.flags & SET_MARK != 0 {
            self.mark = Some(buffer.idx);
        }

        Some(())
    }
}

/// Inserts glyphs from a list at the marked or the current glyph.
struct InsertionDriver<'a> {
    mark: usize,
    glyphs: LazyArray32<'a, GlyphId>,
}

impl InsertionDriver<'_> {
    const CURRENT_INSERT_BEFORE: u16 = 0x0800;
    const MARKED_INSERT_BEFORE: u16 = 0x0400;
    const CURRENT_INSERT_COUNT: u16 = 0x03E0;
    const MARKED_INSERT_COUNT: u16 = 0x001F;

    /// Outputs `count` glyphs from the insertion list before or after the
    /// current glyph.
    fn insert(&self, buffer: &mut Buffer, start: u16, count: u16, before: bool) -> Option<()> {
        let after = !before && buffer.idx < buffer.len();
        if after {
            buffer.copy_glyph();
        }

        // Kashida-like and split-vowel insertions are treated alike.
        for i in 0..u32::from(count) {
            let glyph = self.glyphs.get(u32::from(start) + i)?;
            buffer.output_glyph(u32::from(glyph.0));
        }

        if after {
            buffer.skip_glyph();
        }

        Some(())
    }

    /// Inserts at the mark, then returns to where the output was.
    fn insert_at_mark(&self, buffer: &mut Buffer, index: u16, count: u16, before: bool) -> Option<()> {
        let resume = buffer.out_len() + usize::from(count);
        buffer.move_to(self.mark);
        self.insert(buffer, index, count, before)?;
        buffer.move_to(resume);

        let end = (buffer.idx + 1).min(buffer.len());
        buffer.unsafe_to_break_from_outbuffer(self.mark, end);
        Some(())
    }
}

impl StateTableDriver<morx::InsertionEntryData> for InsertionDriver<'_> {
    fn in_place(&self) -> bool {
        false
    }

    fn is_actionable(
        &self,
        entry: &apple_layout::GenericStateEntry<morx::InsertionEntryData>,
        _: &Buffer,
    ) -> bool {
        let counts = entry.flags & (Self::CURRENT_INSERT_COUNT | Self::MARKED_INSERT_COUNT);
        let indices = [entry.extra.current_insert_index, entry.extra.marked_insert_index];
        counts != 0 && indices != [NO_ACTION; 2]
    }

    fn transition(
        &mut self,
        entry: &apple_layout::GenericStateEntry<morx::InsertionEntryData>,
        buffer: &mut Buffer,
    ) -> Option<()> {
        let flags = entry.flags;
        let new_mark = buffer.out_len();

        if entry.extra.marked_insert_index != NO_ACTION {
            let count = flags & Self::MARKED_INSERT_COUNT;
            buffer.max_ops -= i32::from(count);
            if buffer.max_ops <= 0 {
                return Some(());
            }

            let before = flags & Self::MARKED_INSERT_BEFORE != 0;
            self.insert_at_mark(buffer, entry.extra.marked_insert_index, count, before)?;
        }

        if flags & SET_MARK != 0 {
            self.mark = new_mark;
        }

        if entry.extra.current_insert_index != NO_ACTION {
            let count = (flags & Self::CURRENT_INSERT_COUNT) >> 5;
            buffer.max_ops -= i32::from(count);
            if buffer.max_ops < 0 {
                return Some(());
            }

            let start = buffer.out_len();
            let before = flags & Self::CURRENT_INSERT_BEFORE != 0;
            self.insert(buffer, entry.extra.current_insert_index, count, before)?;

            // Without advancing, the inserted glyphs are processed next.
            let skip = if self.can_advance(entry) { usize::from(count) } else { 0 };
            buffer.move_to(start + skip);
        }

        Some(())
    }
}

const MAX_COMPONENTS: usize = 64;

/// Forms ligatures out of a stack of component positions.
struct LigatureDriver<'a> {
    table: &'a morx::LigatureSubtable<'a>,
    /// A ring of output positions, `component_count` of them in use.
    components: [usize; MAX_COMPONENTS],
    component_count: usize,
}

impl LigatureDriver<'_> {
    const SET_COMPONENT: u16 = 0x8000;
    const PERFORM_ACTION: u16 = 0x2000;

    const ACTION_LAST: u32 = 0x8000_0000;
    const ACTION_STORE: u32 = 0x4000_0000;
    const ACTION_OFFSET: u32 = 0x3FFF_FFFF;

    fn component(&self, i: usize) -> usize {
        self.components[i % MAX_COMPONENTS]
    }

    fn push_component(&mut self, position: usize) {
        // The same position is never stacked twice.
        if self.component_count > 0 && self.component(self.component_count - 1) == position {
            self.component_count -= 1;
        }

        self.components[self.component_count % MAX_COMPONENTS] = position;
        self.component_count += 1;
    }

    /// The component value an action gives `glyph`. Actions carry a signed
    /// 30-bit offset into the component table.
    fn component_value(&self, action: u32, glyph: u32) -> Option<u16> {
        let offset = (((action & Self::ACTION_OFFSET) << 2) as i32) >> 2;
        let index = (glyph as i32).wrapping_add(offset);
        self.table.components.get(index as u32)
    }

    /// Runs the ligature actions starting at `action_index` over the
    /// stacked components. The caller restores the buffer position.
    fn perform(&mut self, buffer: &mut Buffer, mut action_index: u16) {
        let mut ligature_index: u16 = 0;
        let mut cursor = self.component_count;
        while cursor > 0 {
            cursor -= 1;
            buffer.move_to(self.component(cursor));

            let Some(action) = self.table.ligature_actions.get(u32::from(action_index)) else {
                return;
            };
            let Some(value) = self.component_value(action, buffer.cur(0).glyph_id) else {
                return;
            };
            ligature_index = ligature_index.wrapping_add(value);

            if action & (Self::ACTION_STORE | Self::ACTION_LAST) != 0 {
                let Some(ligature) = self.table.ligatures.get(u32::from(ligature_index)) else {
                    return;
                };
                self.form_ligature(buffer, cursor, ligature);
            }

            if action & Self::ACTION_LAST != 0 {
                return;
            }
            action_index = action_index.wrapping_add(1);
        }

        // Ran out of components.
        self.component_count = 0;
    }

    /// Puts `ligature` on the component at `first` and deletes the
    /// components stacked after it.
    fn form_ligature(&mut self, buffer: &mut Buffer, first: usize, ligature: GlyphId) {
        buffer.replace_glyph(u32::from(ligature.0));
        let end = self.component(self.component_count - 1) + 1;

        while self.component_count - 1 > first {
            self.component_count -= 1;
            buffer.move_to(self.component(self.component_count));
            let info = buffer.cur_mut(0);
            let props = info.unicode_props() | UnicodeProps::IGNORABLE.bits();
            info.set_unicode_props(props);
            buffer.replace_glyph(DELETED_GLYPH);
        }

        buffer.move_to(end);
        let out_len = buffer.out_len();
        buffer.merge_out_clusters(self.component(first), out_len);
    }
}

impl StateTableDriver<u16> for LigatureDriver<'_> {
    fn in_place(&self) -> bool {
        false
    }

    fn is_actionable(&self, entry: &apple_layout::GenericStateEntry<u16>, _: &Buffer) -> bool {
        entry.flags & Self::PERFORM_ACTION != 0
    }

    fn transition(
        &mut self,
        entry: &apple_layout::GenericStateEntry<u16>,
        buffer: &mut Buffer,
    ) -> Option<()> {
        if entry.flags & Self::SET_COMPONENT != 0 {
            self.push_component(buffer.out_len());
        }

        let acts = self.is_actionable(entry, buffer) && self.component_count > 0;
        if acts && buffer.idx < buffer.len() {
            let resume = buffer.out_len();
            self.perform(buffer, entry.extra);
            buffer.move_to(resume);
        }

        Some(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn infos(glyphs: &[u32]) -> Vec<GlyphInfo> {
        glyphs
            .iter()
            .map(|&glyph_id| GlyphInfo {
                glyph_id,
                ..GlyphInfo::default()
            })
            .collect()
    }

    fn glyphs(infos: &[GlyphInfo]) -> Vec<u32> {
        infos.iter().map(|i| i.glyph_id).collect()
    }

    #[test]
    fn rearrangement_verbs() {
        // A=1 B=2 x=3 C=4 D=5
        let cases: &[(u16, &[u32], &[u32])] = &[
            (1, &[1, 3], &[3, 1]),
            (2, &[3, 5], &[5, 3]),
            (3, &[1, 3, 5], &[5, 3, 1]),
            (5, &[1, 2, 3], &[3, 2, 1]),
            (8, &[1, 3, 4, 5], &[4, 5, 3, 1]),
            (11, &[1, 2, 3, 5], &[5, 3, 2, 1]),
            (15, &[1, 2, 3, 4, 5], &[5, 4, 3, 2, 1]),
        ];

        for &(verb, input, expected) in cases {
            let mut v = infos(input);
            rearrange(&mut v, verb);
            assert_eq!(glyphs(&v), expected, "verb {}", verb);
        }
    }

    #[test]
    fn rearrangement_needs_enough_glyphs() {
        let mut v = infos(&[1, 2]);
        rearrange(&mut v, 12);
        assert_eq!(glyphs(&v), vec![1, 2]);
    }
}
