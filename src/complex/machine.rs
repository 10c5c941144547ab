//! A driver for the table-encoded syllable scanners.
//!
//! Every syllabic shaper segments its buffer with a longest-match scanner
//! compiled by Ragel into flat transition tables. The tables differ per
//! script, the scanning loop does not: it walks the category sequence,
//! remembers where the current token started, and on every transition runs
//! one of a handful of actions that either extend the token or emit it as a
//! syllable of a given kind.

/// What a transition asks the scanner to do.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    /// Nothing beyond the state change.
    None,
    /// The token now ends after the current element.
    Extend,
    /// The token now ends after the current element and, if nothing longer
    /// matches, is a syllable of this kind.
    ExtendAs(u8),
    /// Emit a syllable ending after the current element.
    EmitThrough(u8),
    /// Emit a syllable ending before the current element and rescan it.
    EmitBefore(u8),
    /// Emit a syllable ending at the last recorded token end.
    EmitToken(u8),
    /// Emit the syllable recorded by the last `ExtendAs`.
    EmitPending,
}

/// Transition lookup for one table encoding.
pub trait StateTable {
    fn start(&self) -> usize;

    /// Transition index for `category` in `state`.
    fn transition(&self, state: usize, category: u8) -> usize;

    /// Transition taken at the end of input, if any.
    fn eof_transition(&self, state: usize) -> Option<usize>;

    fn target(&self, transition: usize) -> usize;

    fn action(&self, transition: usize) -> u8;

    /// Whether entering `state` starts a new token.
    fn starts_token(&self, state: usize) -> bool;
}

/// Tables in Ragel's `-F1` layout with a category-to-class indirection.
pub struct ClassTable {
    pub trans_keys: &'static [u8],
    pub char_class: &'static [i8],
    pub index_offsets: &'static [i16],
    pub indices: &'static [i8],
    pub index_defaults: &'static [i8],
    pub cond_targs: &'static [i8],
    pub cond_actions: &'static [i8],
    pub from_state_actions: &'static [i8],
    pub eof_trans: &'static [i8],
    pub start: usize,
}

impl StateTable for ClassTable {
    fn start(&self) -> usize {
        self.start
    }

    fn transition(&self, state: usize, category: u8) -> usize {
        let default = self.index_defaults[state] as usize;
        if category == 0 || usize::from(category) > self.char_class.len() {
            return default;
        }

        let class = self.char_class[usize::from(category) - 1];
        let lo = self.trans_keys[state * 2] as i8;
        let hi = self.trans_keys[state * 2 + 1] as i8;
        if class < lo || class > hi {
            return default;
        }

        let offset = self.index_offsets[state] as usize + (class - lo) as usize;
        self.indices[offset] as usize
    }

    fn eof_transition(&self, state: usize) -> Option<usize> {
        match self.eof_trans[state] {
            0 => None,
            n => Some(n as usize - 1),
        }
    }

    fn target(&self, transition: usize) -> usize {
        self.cond_targs[transition] as usize
    }

    fn action(&self, transition: usize) -> u8 {
        self.cond_actions[transition] as u8
    }

    fn starts_token(&self, state: usize) -> bool {
        self.from_state_actions[state] != 0
    }
}

/// Tables in Ragel's flat layout, keyed by category spans.
pub struct SpanTable {
    pub trans_keys: &'static [u8],
    pub key_spans: &'static [u8],
    pub index_offsets: &'static [u16],
    pub indices: &'static [u8],
    pub trans_targs: &'static [u8],
    pub trans_actions: &'static [u8],
    pub from_state_actions: &'static [u8],
    pub eof_trans: &'static [u8],
    pub start: usize,
}

impl StateTable for SpanTable {
    fn start(&self) -> usize {
        self.start
    }

    fn transition(&self, state: usize, category: u8) -> usize {
        let span = usize::from(self.key_spans[state]);
        let lo = self.trans_keys[state * 2];
        let hi = self.trans_keys[state * 2 + 1];
        let i = if span > 0 && lo <= category && category <= hi {
            usize::from(category - lo)
        } else {
            span
        };

        usize::from(self.indices[usize::from(self.index_offsets[state]) + i])
    }

    fn eof_transition(&self, state: usize) -> Option<usize> {
        match self.eof_trans[state] {
            0 => None,
            n => Some(usize::from(n) - 1),
        }
    }

    fn target(&self, transition: usize) -> usize {
        usize::from(self.trans_targs[transition])
    }

    fn action(&self, transition: usize) -> u8 {
        self.trans_actions[transition]
    }

    fn starts_token(&self, state: usize) -> bool {
        self.from_state_actions[state] != 0
    }
}

/// Runs the scanner over `categories`, reporting every syllable as
/// `(start, end, kind)`.
///
/// `actions` maps the table's action ids to scanner actions.
pub fn scan<T, A, F>(table: &T, categories: &[u8], actions: A, mut found: F)
where
    T: StateTable,
    A: Fn(u8) -> Action,
    F: FnMut(usize, usize, u8),
{
    let eof = categories.len();
    let mut state = table.start();
    let mut ts = 0;
    let mut te = 0;
    let mut pending = 0;
    let mut p = 0;

    loop {
        if table.starts_token(state) {
            ts = p;
        }

        let transition = if p == eof {
            match table.eof_transition(state) {
                Some(t) => t,
                None => break,
            }
        } else {
            table.transition(state, categories[p])
        };

        state = table.target(transition);

        let mut next = p + 1;
        match actions(table.action(transition)) {
            Action::None => {}
            Action::Extend => te = p + 1,
            Action::ExtendAs(kind) => {
                te = p + 1;
                pending = kind;
            }
            Action::EmitThrough(kind) => {
                te = p + 1;
                found(ts, te, kind);
            }
            Action::EmitBefore(kind) => {
                te = p;
                found(ts, te, kind);
                next = p;
            }
            Action::EmitToken(kind) => {
                found(ts, te, kind);
                next = te;
            }
            Action::EmitPending => {
                found(ts, te, pending);
                next = te;
            }
        }

        if next > eof {
            break;
        }

        p = next;
    }
}

/// Packs a syllable serial and kind into the per-glyph syllable byte.
///
/// Serials cycle through 1..=15 so that neighbouring syllables always differ.
#[derive(Default)]
pub struct SyllableSerial(u8);

impl SyllableSerial {
    pub fn next(&mut self, kind: u8) -> u8 {
        self.0 = if self.0 >= 15 { 1 } else { self.0 + 1 };
        (self.0 << 4) | kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serial_wraps_and_skips_zero() {
        let mut serial = SyllableSerial::default();
        assert_eq!(serial.next(2), 0x12);
        for _ in 0..13 {
            serial.next(0);
        }
        assert_eq!(serial.next(0), 0xF0);
        assert_eq!(serial.next(1), 0x11);
    }
}
