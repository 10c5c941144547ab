use crate::Tag;

/// A byte cursor used for parsing features and variations in the
/// `hb-shape` command line syntax.
pub struct TextParser<'a> {
    pos: usize,
    text: &'a str,
}

impl<'a> TextParser<'a> {
    #[inline]
    pub fn new(text: &'a str) -> Self {
        TextParser { pos: 0, text }
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    #[inline]
    pub fn curr_byte(&self) -> Option<u8> {
        self.text.as_bytes().get(self.pos).copied()
    }

    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn skip_spaces(&mut self) {
        while let Some(c) = self.curr_byte() {
            if !c.is_ascii_whitespace() && c != 0x0B {
                break;
            }
            self.advance(1);
        }
    }

    /// Consumes `c` after optional spaces. Returns `None` if the next byte differs.
    pub fn consume_byte(&mut self, c: u8) -> Option<()> {
        self.skip_spaces();
        if self.curr_byte()? == c {
            self.advance(1);
            Some(())
        } else {
            None
        }
    }

    pub fn consume_bytes<F>(&mut self, f: F) -> &'a str
    where
        F: Fn(u8) -> bool,
    {
        let start = self.pos;
        while let Some(c) = self.curr_byte() {
            if !f(c) {
                break;
            }
            self.advance(1);
        }

        &self.text[start..self.pos]
    }

    /// Parses a feature or axis tag, optionally quoted.
    pub fn consume_tag(&mut self) -> Option<Tag> {
        self.skip_spaces();

        let quote = match self.curr_byte() {
            Some(c @ b'\'') | Some(c @ b'"') => {
                self.advance(1);
                Some(c)
            }
            _ => None,
        };

        let tag = self.consume_bytes(|c| c.is_ascii_alphanumeric() || c == b'_');
        if tag.is_empty() || tag.len() > 4 {
            return None;
        }

        if let Some(quote) = quote {
            // CSS expects exactly four bytes between the quotes.
            if tag.len() != 4 || self.curr_byte()? != quote {
                return None;
            }

            self.advance(1);
        }

        Some(Tag::from_bytes_lossy(tag.as_bytes()))
    }

    pub fn consume_i32(&mut self) -> Option<i32> {
        self.skip_spaces();

        let start = self.pos;
        if matches!(self.curr_byte(), Some(b'-') | Some(b'+')) {
            self.advance(1);
        }

        self.consume_bytes(|c| c.is_ascii_digit());
        self.text[start..self.pos].parse().ok()
    }

    pub fn consume_f32(&mut self) -> Option<f32> {
        self.skip_spaces();

        let start = self.pos;
        if matches!(self.curr_byte(), Some(b'-') | Some(b'+')) {
            self.advance(1);
        }

        self.consume_bytes(|c| c.is_ascii_digit() || c == b'.' || c == b'e' || c == b'E');
        self.text[start..self.pos].parse().ok()
    }

    /// Parses `on` / `off`, the CSS aliases of 1 and 0.
    pub fn consume_bool(&mut self) -> Option<bool> {
        self.skip_spaces();

        let start = self.pos;
        let word = self.consume_bytes(|c| c.is_ascii_alphabetic());
        match word {
            "on" => Some(true),
            "off" => Some(false),
            _ => {
                self.pos = start;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_tag_needs_four_bytes() {
        assert!(TextParser::new("'kern'").consume_tag().is_some());
        assert!(TextParser::new("'ker'").consume_tag().is_none());
        assert!(TextParser::new("\"kern'").consume_tag().is_none());
    }

    #[test]
    fn short_tag_is_padded() {
        let tag = TextParser::new("cv1").consume_tag().unwrap();
        assert_eq!(&tag.to_bytes(), b"cv1 ");
    }

    #[test]
    fn numbers() {
        assert_eq!(TextParser::new(" -12]").consume_i32(), Some(-12));
        assert_eq!(TextParser::new("1.5").consume_f32(), Some(1.5));
        assert_eq!(TextParser::new("off").consume_bool(), Some(false));
    }
}
