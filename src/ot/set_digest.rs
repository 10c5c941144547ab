//! A lossy glyph-set filter used to skip lookups that cannot match.

use ttf_parser::GlyphId;

use crate::buffer::GlyphInfo;

const MASK_BITS: u32 = u32::BITS;

/// One bit-pattern per shift. A glyph maps to bit `(gid >> shift) % 32`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
struct BitsPattern<const SHIFT: u32> {
    mask: u32,
}

impl<const SHIFT: u32> BitsPattern<SHIFT> {
    #[inline]
    fn mask_for(g: GlyphId) -> u32 {
        1 << ((u32::from(g.0) >> SHIFT) & (MASK_BITS - 1))
    }

    #[inline]
    fn add(&mut self, g: GlyphId) {
        self.mask |= Self::mask_for(g);
    }

    fn add_range(&mut self, a: GlyphId, b: GlyphId) -> bool {
        if self.mask == u32::MAX {
            return false;
        }

        if (u32::from(b.0) >> SHIFT) - (u32::from(a.0) >> SHIFT) >= MASK_BITS - 1 {
            self.mask = u32::MAX;
            false
        } else {
            let ma = Self::mask_for(a);
            let mb = Self::mask_for(b);
            self.mask |= mb
                .wrapping_add(mb.wrapping_sub(ma))
                .wrapping_sub(u32::from(mb < ma));
            true
        }
    }

    #[inline]
    fn may_have(&self, o: &Self) -> bool {
        self.mask & o.mask != 0
    }

    #[inline]
    fn may_have_glyph(&self, g: GlyphId) -> bool {
        self.mask & Self::mask_for(g) != 0
    }
}

/// Three bit patterns combined; a glyph "may be" in the set only when all
/// three agree.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct SetDigest {
    a: BitsPattern<4>,
    b: BitsPattern<0>,
    c: BitsPattern<9>,
}

impl SetDigest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_infos(infos: &[GlyphInfo]) -> Self {
        let mut digest = Self::new();
        for info in infos {
            digest.add(info.as_glyph());
        }
        digest
    }

    pub fn add(&mut self, g: GlyphId) {
        self.a.add(g);
        self.b.add(g);
        self.c.add(g);
    }

    pub fn add_array(&mut self, glyphs: impl IntoIterator<Item = GlyphId>) {
        for g in glyphs {
            self.add(g);
        }
    }

    pub fn add_range(&mut self, a: GlyphId, b: GlyphId) {
        // Every pattern must see the range, no short-circuiting.
        let _ = self.a.add_range(a, b);
        let _ = self.b.add_range(a, b);
        let _ = self.c.add_range(a, b);
    }

    pub fn may_have(&self, o: &Self) -> bool {
        self.a.may_have(&o.a) && self.b.may_have(&o.b) && self.c.may_have(&o.c)
    }

    pub fn may_have_glyph(&self, g: GlyphId) -> bool {
        self.a.may_have_glyph(g) && self.b.may_have_glyph(g) && self.c.may_have_glyph(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_glyphs() {
        let mut digest = SetDigest::new();
        digest.add(GlyphId(10));
        digest.add(GlyphId(300));
        assert!(digest.may_have_glyph(GlyphId(10)));
        assert!(digest.may_have_glyph(GlyphId(300)));
        assert!(!digest.may_have_glyph(GlyphId(11)));
    }

    #[test]
    fn ranges_cover_their_ends() {
        let mut digest = SetDigest::new();
        digest.add_range(GlyphId(40), GlyphId(60));
        for g in 40..=60 {
            assert!(digest.may_have_glyph(GlyphId(g)));
        }
    }

    #[test]
    fn wide_range_saturates() {
        let mut digest = SetDigest::new();
        digest.add_range(GlyphId(0), GlyphId(5000));
        assert!(digest.may_have_glyph(GlyphId(4321)));
    }

    #[test]
    fn disjoint_sets() {
        let mut a = SetDigest::new();
        a.add(GlyphId(1));
        let mut b = SetDigest::new();
        b.add(GlyphId(2));
        assert!(!a.may_have(&b));
        b.add(GlyphId(1));
        assert!(a.may_have(&b));
    }
}
