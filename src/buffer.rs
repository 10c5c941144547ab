use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::min;
use core::convert::TryFrom;
use core::fmt::Write as _;

use ttf_parser::GlyphId;

use crate::common::{Direction, Language, Script};
use crate::face::Face;
use crate::unicode::{space, CharExt, GeneralCategory, GeneralCategoryExt};

const CONTEXT_LENGTH: usize = 5;

pub mod glyph_flag {
    /// Indicates that if input text is broken at the beginning of the cluster
    /// this glyph is part of, then both sides need to be re-shaped,
    /// as the result might be different.
    ///
    /// On the flip side, it means that when this flag is not present,
    /// then it's safe to break the glyph-run at the beginning of this
    /// cluster, and the two sides represent the exact same result one
    /// would get if breaking input text at the beginning of this cluster
    /// and shaping the two sides separately.
    pub const UNSAFE_TO_BREAK: u32 = 0x0000_0001;

    /// All the currently defined flags.
    pub const DEFINED: u32 = UNSAFE_TO_BREAK;
}

/// Holds the positions of the glyph in both horizontal and vertical directions.
///
/// All positions are relative to the current point.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug)]
pub struct GlyphPosition {
    /// How much the line advances after drawing this glyph when setting text in
    /// horizontal direction.
    pub x_advance: i32,
    /// How much the line advances after drawing this glyph when setting text in
    /// vertical direction.
    pub y_advance: i32,
    /// How much the glyph moves on the X-axis before drawing it, this should
    /// not affect how much the line advances.
    pub x_offset: i32,
    /// How much the glyph moves on the Y-axis before drawing it, this should
    /// not affect how much the line advances.
    pub y_offset: i32,
    pub(crate) var: u32,
}

unsafe impl bytemuck::Zeroable for GlyphPosition {}
unsafe impl bytemuck::Pod for GlyphPosition {}

impl GlyphPosition {
    #[inline]
    pub(crate) fn attach_chain(&self) -> i16 {
        // glyph to which this attaches to, relative to current glyphs;
        // negative for going back, positive for forward.
        let v: &[i16; 2] = bytemuck::cast_ref(&self.var);
        v[0]
    }

    #[inline]
    pub(crate) fn set_attach_chain(&mut self, n: i16) {
        let v: &mut [i16; 2] = bytemuck::cast_mut(&mut self.var);
        v[0] = n;
    }

    #[inline]
    pub(crate) fn attach_type(&self) -> u8 {
        // attachment type
        // Note! if attach_chain() is zero, the value of attach_type() is irrelevant.
        let v: &[u8; 4] = bytemuck::cast_ref(&self.var);
        v[2]
    }

    #[inline]
    pub(crate) fn set_attach_type(&mut self, n: u8) {
        let v: &mut [u8; 4] = bytemuck::cast_mut(&mut self.var);
        v[2] = n;
    }
}

/// A glyph info.
#[repr(C)]
#[derive(Clone, Copy, Default, Debug)]
pub struct GlyphInfo {
    /// A selected glyph.
    ///
    /// Guarantee to be <= `u16::MAX`.
    pub glyph_id: u32,
    pub(crate) mask: u32,
    /// An index to the start of the grapheme cluster in the original string.
    ///
    /// [Read more on clusters](https://harfbuzz.github.io/clusters.html).
    pub cluster: u32,
    pub(crate) var1: u32,
    pub(crate) var2: u32,
}

unsafe impl bytemuck::Zeroable for GlyphInfo {}
unsafe impl bytemuck::Pod for GlyphInfo {}

const IS_LIG_BASE: u8 = 0x10;

impl GlyphInfo {
    /// Indicates that if input text is broken at the beginning of the cluster
    /// this glyph is part of, then both sides need to be re-shaped.
    pub fn unsafe_to_break(&self) -> bool {
        self.mask & glyph_flag::UNSAFE_TO_BREAK != 0
    }

    #[inline]
    pub(crate) fn as_char(&self) -> char {
        char::try_from(self.glyph_id).unwrap_or('\0')
    }

    #[inline]
    pub(crate) fn as_glyph(&self) -> GlyphId {
        debug_assert!(self.glyph_id <= u32::from(u16::MAX));
        GlyphId(self.glyph_id as u16)
    }

    // Var allocation: unicode_props
    // Used during the entire shaping process to hold the Unicode properties.

    #[inline]
    pub(crate) fn unicode_props(&self) -> u16 {
        let v: &[u16; 2] = bytemuck::cast_ref(&self.var2);
        v[0]
    }

    #[inline]
    pub(crate) fn set_unicode_props(&mut self, n: u16) {
        let v: &mut [u16; 2] = bytemuck::cast_mut(&mut self.var2);
        v[0] = n;
    }

    pub(crate) fn init_unicode_props(&mut self, scratch_flags: &mut BufferScratchFlags) {
        let u = self.as_char();
        let gc = u.general_category();
        let mut props = gc.to_rb() as u16;

        if u as u32 >= 0x80 {
            *scratch_flags |= BufferScratchFlags::HAS_NON_ASCII;

            if u.is_default_ignorable() {
                props |= UnicodeProps::IGNORABLE.bits();
                *scratch_flags |= BufferScratchFlags::HAS_DEFAULT_IGNORABLES;

                match u as u32 {
                    0x200C => props |= UnicodeProps::CF_ZWNJ.bits(),
                    0x200D => props |= UnicodeProps::CF_ZWJ.bits(),

                    // Mongolian Free Variation Selectors need to be remembered
                    // because although we need to hide them like default-ignorables,
                    // they need to non-ignorable during shaping. This is similar to
                    // what we do for joiners in Indic-like shapers, but since the
                    // FVSes are GC=Mn, we have use a separate bit to remember them.
                    0x180B..=0x180D | 0x180F => props |= UnicodeProps::HIDDEN.bits(),

                    // TAG characters need similar treatment.
                    0xE0020..=0xE007F => props |= UnicodeProps::HIDDEN.bits(),

                    // COMBINING GRAPHEME JOINER should not be skipped during GSUB either.
                    0x034F => {
                        props |= UnicodeProps::HIDDEN.bits();
                        *scratch_flags |= BufferScratchFlags::HAS_CGJ;
                    }

                    _ => {}
                }
            }

            if gc.is_mark() {
                props |= UnicodeProps::CONTINUATION.bits();
                props |= (u.modified_combining_class() as u16) << 8;
            }
        }

        self.set_unicode_props(props);
    }

    #[inline]
    pub(crate) fn general_category(&self) -> GeneralCategory {
        let n = self.unicode_props() & UnicodeProps::GENERAL_CATEGORY.bits();
        GeneralCategory::from_rb(u32::from(n))
    }

    #[inline]
    pub(crate) fn set_general_category(&mut self, gc: GeneralCategory) {
        // Clears top-byte.
        let gc = gc.to_rb() as u16;
        let n = gc | (self.unicode_props() & (0xFF & !UnicodeProps::GENERAL_CATEGORY.bits()));
        self.set_unicode_props(n);
    }

    #[inline]
    pub(crate) fn space_fallback(&self) -> space::Space {
        if self.general_category() == GeneralCategory::SpaceSeparator {
            (self.unicode_props() >> 8) as u8
        } else {
            space::NOT_SPACE
        }
    }

    #[inline]
    pub(crate) fn set_space_fallback(&mut self, space: space::Space) {
        if self.general_category() == GeneralCategory::SpaceSeparator {
            let n = ((space as u16) << 8) | (self.unicode_props() & 0xFF);
            self.set_unicode_props(n);
        }
    }

    #[inline]
    pub(crate) fn is_unicode_mark(&self) -> bool {
        self.general_category().is_mark()
    }

    #[inline]
    pub(crate) fn modified_combining_class(&self) -> u8 {
        if self.is_unicode_mark() {
            (self.unicode_props() >> 8) as u8
        } else {
            0
        }
    }

    #[inline]
    pub(crate) fn set_modified_combining_class(&mut self, mcc: u8) {
        if self.is_unicode_mark() {
            let n = ((mcc as u16) << 8) | (self.unicode_props() & 0xFF);
            self.set_unicode_props(n);
        }
    }

    #[inline]
    pub(crate) fn is_default_ignorable(&self) -> bool {
        let n = self.unicode_props() & UnicodeProps::IGNORABLE.bits();
        n != 0 && !self.is_ligated()
    }

    #[inline]
    pub(crate) fn is_default_ignorable_and_not_hidden(&self) -> bool {
        let m = UnicodeProps::IGNORABLE.bits() | UnicodeProps::HIDDEN.bits();
        let n = self.unicode_props() & m;
        n == UnicodeProps::IGNORABLE.bits() && !self.is_ligated()
    }

    #[inline]
    pub(crate) fn is_hidden(&self) -> bool {
        self.unicode_props() & UnicodeProps::HIDDEN.bits() != 0
    }

    #[inline]
    pub(crate) fn unhide(&mut self) {
        let mut n = self.unicode_props();
        n &= !UnicodeProps::HIDDEN.bits();
        self.set_unicode_props(n);
    }

    #[inline]
    pub(crate) fn is_continuation(&self) -> bool {
        self.unicode_props() & UnicodeProps::CONTINUATION.bits() != 0
    }

    #[inline]
    pub(crate) fn set_continuation(&mut self) {
        let mut n = self.unicode_props();
        n |= UnicodeProps::CONTINUATION.bits();
        self.set_unicode_props(n);
    }

    #[inline]
    pub(crate) fn reset_continuation(&mut self) {
        let mut n = self.unicode_props();
        n &= !UnicodeProps::CONTINUATION.bits();
        self.set_unicode_props(n);
    }

    #[inline]
    pub(crate) fn is_unicode_space(&self) -> bool {
        self.general_category() == GeneralCategory::SpaceSeparator
    }

    #[inline]
    pub(crate) fn is_unicode_format(&self) -> bool {
        self.general_category() == GeneralCategory::Format
    }

    #[inline]
    pub(crate) fn is_zwnj(&self) -> bool {
        self.is_unicode_format() && (self.unicode_props() & UnicodeProps::CF_ZWNJ.bits() != 0)
    }

    #[inline]
    pub(crate) fn is_zwj(&self) -> bool {
        self.is_unicode_format() && (self.unicode_props() & UnicodeProps::CF_ZWJ.bits() != 0)
    }

    #[inline]
    pub(crate) fn is_joiner(&self) -> bool {
        let m = UnicodeProps::CF_ZWNJ.bits() | UnicodeProps::CF_ZWJ.bits();
        self.is_unicode_format() && (self.unicode_props() & m != 0)
    }

    #[inline]
    pub(crate) fn flip_joiners(&mut self) {
        if !self.is_unicode_format() {
            return;
        }

        let n = self.unicode_props() ^ UnicodeProps::CF_ZWNJ.bits() ^ UnicodeProps::CF_ZWJ.bits();
        self.set_unicode_props(n);
    }

    // Var allocation: glyph_index
    // Used during normalization only, before `glyph_props` takes over var1.

    #[inline]
    pub(crate) fn glyph_index(&self) -> u32 {
        self.var1
    }

    #[inline]
    pub(crate) fn set_glyph_index(&mut self, n: u32) {
        self.var1 = n;
    }

    // Var allocation: glyph_props
    // Used during the GSUB/GPOS processing to store GDEF glyph properties.

    #[inline]
    pub(crate) fn glyph_props(&self) -> u16 {
        let v: &[u16; 2] = bytemuck::cast_ref(&self.var1);
        v[0]
    }

    #[inline]
    pub(crate) fn set_glyph_props(&mut self, n: u16) {
        let v: &mut [u16; 2] = bytemuck::cast_mut(&mut self.var1);
        v[0] = n;
    }

    #[inline]
    pub(crate) fn is_base_glyph(&self) -> bool {
        self.glyph_props() & GlyphPropsFlags::BASE_GLYPH.bits() != 0
    }

    #[inline]
    pub(crate) fn is_ligature(&self) -> bool {
        self.glyph_props() & GlyphPropsFlags::LIGATURE.bits() != 0
    }

    #[inline]
    pub(crate) fn is_mark(&self) -> bool {
        self.glyph_props() & GlyphPropsFlags::MARK.bits() != 0
    }

    #[inline]
    pub(crate) fn is_substituted(&self) -> bool {
        self.glyph_props() & GlyphPropsFlags::SUBSTITUTED.bits() != 0
    }

    #[inline]
    pub(crate) fn is_ligated(&self) -> bool {
        self.glyph_props() & GlyphPropsFlags::LIGATED.bits() != 0
    }

    #[inline]
    pub(crate) fn is_multiplied(&self) -> bool {
        self.glyph_props() & GlyphPropsFlags::MULTIPLIED.bits() != 0
    }

    #[inline]
    pub(crate) fn is_ligated_and_didnt_multiply(&self) -> bool {
        self.is_ligated() && !self.is_multiplied()
    }

    #[inline]
    pub(crate) fn clear_ligated_and_multiplied(&mut self) {
        let mut n = self.glyph_props();
        n &= !(GlyphPropsFlags::LIGATED | GlyphPropsFlags::MULTIPLIED).bits();
        self.set_glyph_props(n);
    }

    #[inline]
    pub(crate) fn clear_substituted(&mut self) {
        let mut n = self.glyph_props();
        n &= !GlyphPropsFlags::SUBSTITUTED.bits();
        self.set_glyph_props(n);
    }

    // Var allocation: lig_props
    //
    // When a ligature is formed the ligature glyph and any marks in between get
    // the same newly allocated lig_id. The ligature glyph stores the number of
    // components, the marks store which component they follow.
    //
    // A multiple substitution gives all its output glyphs lig_id 0 and
    // lig_comp 0, 1, 2 ... respectively.

    #[inline]
    pub(crate) fn lig_props(&self) -> u8 {
        let v: &[u8; 4] = bytemuck::cast_ref(&self.var1);
        v[2]
    }

    #[inline]
    pub(crate) fn set_lig_props(&mut self, n: u8) {
        let v: &mut [u8; 4] = bytemuck::cast_mut(&mut self.var1);
        v[2] = n;
    }

    #[inline]
    pub(crate) fn set_lig_props_for_ligature(&mut self, lig_id: u8, lig_num_comps: u8) {
        self.set_lig_props((lig_id << 5) | IS_LIG_BASE | (lig_num_comps & 0x0F));
    }

    #[inline]
    pub(crate) fn set_lig_props_for_mark(&mut self, lig_id: u8, lig_comp: u8) {
        self.set_lig_props((lig_id << 5) | (lig_comp & 0x0F));
    }

    #[inline]
    pub(crate) fn set_lig_props_for_component(&mut self, comp: u8) {
        self.set_lig_props_for_mark(0, comp);
    }

    #[inline]
    pub(crate) fn lig_id(&self) -> u8 {
        self.lig_props() >> 5
    }

    #[inline]
    pub(crate) fn is_ligated_internal(&self) -> bool {
        self.lig_props() & IS_LIG_BASE != 0
    }

    #[inline]
    pub(crate) fn lig_comp(&self) -> u8 {
        if self.is_ligated_internal() {
            0
        } else {
            self.lig_props() & 0x0F
        }
    }

    #[inline]
    pub(crate) fn lig_num_comps(&self) -> u8 {
        if self.is_ligature() && self.is_ligated_internal() {
            self.lig_props() & 0x0F
        } else {
            1
        }
    }

    // Var allocation: syllable
    // Used during the GSUB/GPOS processing to store the syllable serial (high
    // nibble) and type (low nibble).

    #[inline]
    pub(crate) fn syllable(&self) -> u8 {
        let v: &[u8; 4] = bytemuck::cast_ref(&self.var1);
        v[3]
    }

    #[inline]
    pub(crate) fn set_syllable(&mut self, n: u8) {
        let v: &mut [u8; 4] = bytemuck::cast_mut(&mut self.var1);
        v[3] = n;
    }

    // Var allocation: complex_category, complex_aux
    // Two bytes reserved for the per-script shapers.

    #[inline]
    pub(crate) fn complex_category(&self) -> u8 {
        let v: &[u8; 4] = bytemuck::cast_ref(&self.var2);
        v[2]
    }

    #[inline]
    pub(crate) fn set_complex_category(&mut self, n: u8) {
        let v: &mut [u8; 4] = bytemuck::cast_mut(&mut self.var2);
        v[2] = n;
    }

    #[inline]
    pub(crate) fn complex_aux(&self) -> u8 {
        let v: &[u8; 4] = bytemuck::cast_ref(&self.var2);
        v[3]
    }

    #[inline]
    pub(crate) fn set_complex_aux(&mut self, n: u8) {
        let v: &mut [u8; 4] = bytemuck::cast_mut(&mut self.var2);
        v[3] = n;
    }
}

bitflags::bitflags! {
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct GlyphPropsFlags: u16 {
        // The following three match LookupFlags::Ignore* numbers.
        const BASE_GLYPH    = 0x02;
        const LIGATURE      = 0x04;
        const MARK          = 0x08;
        const CLASS_MASK    = Self::BASE_GLYPH.bits() | Self::LIGATURE.bits() | Self::MARK.bits();

        // The following are used internally; not derived from GDEF.
        const SUBSTITUTED   = 0x10;
        const LIGATED       = 0x20;
        const MULTIPLIED    = 0x40;

        const PRESERVE      = Self::SUBSTITUTED.bits() | Self::LIGATED.bits() | Self::MULTIPLIED.bits();
    }
}

bitflags::bitflags! {
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct UnicodeProps: u16 {
        const GENERAL_CATEGORY  = 0x001F;
        const IGNORABLE         = 0x0020;
        // MONGOLIAN FREE VARIATION SELECTOR 1..4, CGJ or TAG characters
        const HIDDEN            = 0x0040;
        const CONTINUATION      = 0x0080;

        // If GEN_CAT=FORMAT, top byte masks:
        const CF_ZWJ            = 0x0100;
        const CF_ZWNJ           = 0x0200;
    }
}

bitflags::bitflags! {
    /// Flags for buffers.
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BufferFlags: u32 {
        /// Indicates that special handling of the beginning of text paragraph can be applied to this buffer. Should usually be set, unless you are passing to the buffer only part of the text without the full context.
        const BEGINNING_OF_TEXT             = 1 << 1;
        /// Indicates that special handling of the end of text paragraph can be applied to this buffer, similar to [`BufferFlags::BEGINNING_OF_TEXT`].
        const END_OF_TEXT                   = 1 << 2;
        /// Indicates that characters with Default_Ignorable Unicode property should use the corresponding glyph from the font, instead of hiding them (done by replacing them with the space glyph and zeroing the advance width.) This flag takes precedence over [`BufferFlags::REMOVE_DEFAULT_IGNORABLES`].
        const PRESERVE_DEFAULT_IGNORABLES   = 1 << 3;
        /// Indicates that characters with Default_Ignorable Unicode property should be removed from glyph string instead of hiding them (done by replacing them with the space glyph and zeroing the advance width.) [`BufferFlags::PRESERVE_DEFAULT_IGNORABLES`] takes precedence over this flag.
        const REMOVE_DEFAULT_IGNORABLES     = 1 << 4;
        /// Indicates that a dotted circle should not be inserted in the rendering of incorrect character sequences (such as `<0905 093E>`).
        const DO_NOT_INSERT_DOTTED_CIRCLE   = 1 << 5;
    }
}

bitflags::bitflags! {
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
    pub(crate) struct BufferScratchFlags: u32 {
        const HAS_NON_ASCII             = 0x0000_0001;
        const HAS_DEFAULT_IGNORABLES    = 0x0000_0002;
        const HAS_SPACE_FALLBACK        = 0x0000_0004;
        const HAS_GPOS_ATTACHMENT       = 0x0000_0008;
        const HAS_UNSAFE_TO_BREAK       = 0x0000_0010;
        const HAS_CGJ                   = 0x0000_0020;
        const HAS_BROKEN_SYLLABLE       = 0x0000_0040;

        // Reserved for complex shapers' internal use.
        const COMPLEX0                  = 0x0100_0000;
        const COMPLEX1                  = 0x0200_0000;
        const COMPLEX2                  = 0x0400_0000;
        const COMPLEX3                  = 0x0800_0000;
    }
}

bitflags::bitflags! {
    /// Flags used for serialization with [`GlyphBuffer::serialize`].
    #[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SerializeFlags: u8 {
        /// Do not serialize glyph cluster.
        const NO_CLUSTERS       = 0b0000_0001;
        /// Do not serialize glyph position information.
        const NO_POSITIONS      = 0b0000_0010;
        /// Do no serialize glyph name.
        const NO_GLYPH_NAMES    = 0b0000_0100;
        /// Serialize glyph extents.
        const GLYPH_EXTENTS     = 0b0000_1000;
        /// Serialize glyph flags.
        const GLYPH_FLAGS       = 0b0001_0000;
        /// Do not serialize glyph advances, glyph offsets will reflect absolute
        /// glyph positions.
        const NO_ADVANCES       = 0b0010_0000;
    }
}

/// A cluster level.
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum BufferClusterLevel {
    #[default]
    MonotoneGraphemes,
    MonotoneCharacters,
    Characters,
}

#[inline]
pub(crate) fn set_cluster(info: &mut GlyphInfo, cluster: u32, mask: u32) {
    if info.cluster != cluster {
        if mask & glyph_flag::UNSAFE_TO_BREAK != 0 {
            info.mask |= glyph_flag::UNSAFE_TO_BREAK;
        } else {
            info.mask &= !glyph_flag::UNSAFE_TO_BREAK;
        }
    }

    info.cluster = cluster;
}

/// The shaping workspace shared by [`UnicodeBuffer`] and [`GlyphBuffer`].
///
/// `info` holds the records being read; during a substitution pass `out_info`
/// receives the rewritten records and the two are swapped by `swap_buffers`.
#[derive(Clone, Debug)]
pub(crate) struct Buffer {
    // Information about how the text in the buffer should be treated.
    pub flags: BufferFlags,
    pub cluster_level: BufferClusterLevel,
    pub invisible: Option<GlyphId>,
    pub not_found: GlyphId,
    pub replacement: char,

    // Buffer contents.
    pub direction: Direction,
    pub script: Option<Script>,
    pub language: Option<Language>,

    pub have_output: bool,
    pub have_positions: bool,

    pub idx: usize,
    pub info: Vec<GlyphInfo>,
    pub pos: Vec<GlyphPosition>,
    pub out_info: Vec<GlyphInfo>,

    pub serial: u8,
    pub scratch_flags: BufferScratchFlags,
    pub max_ops: i32,

    /// Text before / after the main buffer contents, ordered outward.
    /// Index 0 is for "pre-context", 1 for "post-context".
    pub context: [[char; CONTEXT_LENGTH]; 2],
    pub context_len: [usize; 2],
}

impl Buffer {
    pub const MAX_OPS_FACTOR: i32 = 1024;
    pub const MAX_OPS_MIN: i32 = 16384;
    pub const MAX_OPS_DEFAULT: i32 = 0x1FFF_FFFF;

    pub fn new() -> Self {
        Buffer {
            flags: BufferFlags::empty(),
            cluster_level: BufferClusterLevel::default(),
            invisible: None,
            not_found: GlyphId(0),
            replacement: char::REPLACEMENT_CHARACTER,
            direction: Direction::Invalid,
            script: None,
            language: None,
            have_output: false,
            have_positions: false,
            idx: 0,
            info: Vec::new(),
            pos: Vec::new(),
            out_info: Vec::new(),
            serial: 0,
            scratch_flags: BufferScratchFlags::default(),
            max_ops: Self::MAX_OPS_DEFAULT,
            context: [['\0'; CONTEXT_LENGTH]; 2],
            context_len: [0, 0],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.info.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.info.is_empty()
    }

    #[inline]
    pub fn out_len(&self) -> usize {
        self.out_info.len()
    }

    #[inline]
    pub fn info_slice(&self) -> &[GlyphInfo] {
        &self.info
    }

    #[inline]
    pub fn info_slice_mut(&mut self) -> &mut [GlyphInfo] {
        &mut self.info
    }

    #[inline]
    pub fn cur(&self, i: usize) -> &GlyphInfo {
        &self.info[self.idx + i]
    }

    #[inline]
    pub fn cur_mut(&mut self, i: usize) -> &mut GlyphInfo {
        let idx = self.idx + i;
        &mut self.info[idx]
    }

    #[inline]
    pub fn cur_pos_mut(&mut self) -> &mut GlyphPosition {
        let i = self.idx;
        &mut self.pos[i]
    }

    #[inline]
    pub fn prev(&self) -> &GlyphInfo {
        let len = self.out_len();
        &self.out_info[len.saturating_sub(1)]
    }

    #[inline]
    pub fn prev_mut(&mut self) -> &mut GlyphInfo {
        let len = self.out_len();
        &mut self.out_info[len.saturating_sub(1)]
    }

    #[inline]
    pub fn backtrack_len(&self) -> usize {
        if self.have_output {
            self.out_len()
        } else {
            self.idx
        }
    }

    #[inline]
    pub fn lookahead_len(&self) -> usize {
        self.len() - self.idx
    }

    /// Returns the glyph before position `i` of the backtrack, looking into
    /// `out_info` while an output pass is running.
    #[inline]
    pub fn backtrack_info(&self, i: usize) -> &GlyphInfo {
        if self.have_output {
            &self.out_info[i]
        } else {
            &self.info[i]
        }
    }

    #[inline]
    pub fn backtrack_info_mut(&mut self, i: usize) -> &mut GlyphInfo {
        if self.have_output {
            &mut self.out_info[i]
        } else {
            &mut self.info[i]
        }
    }

    #[inline]
    fn next_serial(&mut self) -> u8 {
        let n = self.serial;
        self.serial = self.serial.wrapping_add(1);
        n
    }

    pub fn allocate_lig_id(&mut self) -> u8 {
        let mut lig_id = self.next_serial() & 0x07;
        if lig_id == 0 {
            // In case of overflow.
            lig_id = self.next_serial() & 0x07;
        }

        lig_id
    }

    pub fn context(&self, side: usize) -> &[char] {
        &self.context[side][..self.context_len[side]]
    }

    fn clear_context(&mut self, side: usize) {
        self.context_len[side] = 0;
    }

    pub fn reset(&mut self) {
        self.flags = BufferFlags::empty();
        self.cluster_level = BufferClusterLevel::default();
        self.invisible = None;
        self.not_found = GlyphId(0);
        self.replacement = char::REPLACEMENT_CHARACTER;
        self.clear();
    }

    pub fn clear(&mut self) {
        self.direction = Direction::Invalid;
        self.script = None;
        self.language = None;

        self.have_output = false;
        self.have_positions = false;

        self.idx = 0;
        self.info.clear();
        self.pos.clear();
        self.out_info.clear();
        self.serial = 0;
        self.scratch_flags = BufferScratchFlags::default();

        self.context_len = [0, 0];
    }

    #[inline]
    pub fn add(&mut self, codepoint: u32, cluster: u32) {
        self.info.push(GlyphInfo {
            glyph_id: codepoint,
            cluster,
            ..GlyphInfo::default()
        });
        self.pos.push(GlyphPosition::default());
    }

    /// Appends `text[item_offset..item_offset + item_length]`, keeping up to
    /// five code points on each side as context.
    ///
    /// Invalid scalar values are replaced with `replacement`.
    pub fn add_codepoints(&mut self, text: &[u32], item_offset: usize, item_length: usize) {
        let replacement = self.replacement;
        let sanitize = |u: u32| char::from_u32(u).unwrap_or(replacement);

        let item_offset = min(item_offset, text.len());
        let item_end = min(item_offset + item_length, text.len());

        // If buffer is empty and pre-context provided, install it.
        // This check is written this way, to make sure people can
        // provide pre-context in one add call, then provide
        // text in a follow-up call.
        if self.is_empty() && item_offset > 0 {
            self.clear_context(0);
            for &u in text[..item_offset].iter().rev().take(CONTEXT_LENGTH) {
                let n = self.context_len[0];
                self.context[0][n] = sanitize(u);
                self.context_len[0] += 1;
            }
        }

        for (i, &u) in text[item_offset..item_end].iter().enumerate() {
            self.add(sanitize(u) as u32, (item_offset + i) as u32);
        }

        self.clear_context(1);
        for &u in text[item_end..].iter().take(CONTEXT_LENGTH) {
            let n = self.context_len[1];
            self.context[1][n] = sanitize(u);
            self.context_len[1] += 1;
        }
    }

    pub fn set_pre_context(&mut self, text: &str) {
        self.clear_context(0);
        for c in text.chars().rev().take(CONTEXT_LENGTH) {
            let n = self.context_len[0];
            self.context[0][n] = c;
            self.context_len[0] += 1;
        }
    }

    pub fn set_post_context(&mut self, text: &str) {
        self.clear_context(1);
        for c in text.chars().take(CONTEXT_LENGTH) {
            let n = self.context_len[1];
            self.context[1][n] = c;
            self.context_len[1] += 1;
        }
    }

    pub fn guess_segment_properties(&mut self) {
        if self.script.is_none() {
            for info in &self.info {
                match info.as_char().script() {
                    crate::script::COMMON | crate::script::INHERITED | crate::script::UNKNOWN => {}
                    s => {
                        self.script = Some(s);
                        break;
                    }
                }
            }
        }

        if self.direction == Direction::Invalid {
            if let Some(script) = self.script {
                self.direction = Direction::from_script(script).unwrap_or_default();
            }

            if self.direction == Direction::Invalid {
                self.direction = Direction::LeftToRight;
            }
        }
    }

    pub fn clear_output(&mut self) {
        self.have_output = true;
        self.have_positions = false;
        self.out_info.clear();
    }

    pub fn clear_positions(&mut self) {
        self.have_output = false;
        self.have_positions = true;

        self.pos.clear();
        self.pos.resize(self.len(), GlyphPosition::default());
    }

    /// Makes the output of the current pass the input of the next one.
    pub fn swap_buffers(&mut self) {
        debug_assert!(self.have_output);
        if !self.have_output {
            return;
        }

        // Copy whatever was not consumed.
        if self.idx < self.len() {
            self.out_info.extend_from_slice(&self.info[self.idx..]);
        }

        self.have_output = false;
        core::mem::swap(&mut self.info, &mut self.out_info);
        self.out_info.clear();
        self.pos.resize(self.info.len(), GlyphPosition::default());
        self.idx = 0;
    }

    pub fn remove_output(&mut self) {
        self.have_output = false;
        self.have_positions = false;
        self.out_info.clear();
    }

    pub fn reset_masks(&mut self, mask: u32) {
        for info in &mut self.info {
            info.mask = mask;
        }
    }

    pub fn add_masks(&mut self, mask: u32) {
        for info in &mut self.info {
            info.mask |= mask;
        }
    }

    pub fn set_masks(&mut self, mut value: u32, mask: u32, cluster_start: u32, cluster_end: u32) {
        if mask == 0 {
            return;
        }

        let not_mask = !mask;
        value &= mask;

        if cluster_start == 0 && cluster_end == u32::MAX {
            for info in &mut self.info {
                info.mask = (info.mask & not_mask) | value;
            }

            return;
        }

        for info in &mut self.info {
            if cluster_start <= info.cluster && info.cluster < cluster_end {
                info.mask = (info.mask & not_mask) | value;
            }
        }
    }

    pub fn reverse_range(&mut self, start: usize, end: usize) {
        if end - start < 2 {
            return;
        }

        self.info[start..end].reverse();
        if self.have_positions {
            self.pos[start..end].reverse();
        }
    }

    pub fn reverse(&mut self) {
        if self.is_empty() {
            return;
        }

        self.reverse_range(0, self.len());
    }

    /// Reverses runs of glyphs grouped by `group`, then the whole buffer, so
    /// the groups keep their internal order.
    pub fn reverse_groups<F>(&mut self, group: F, merge_clusters: bool)
    where
        F: Fn(&GlyphInfo, &GlyphInfo) -> bool,
    {
        if self.is_empty() {
            return;
        }

        let mut start = 0;
        let mut i = 1;
        while i < self.len() {
            if !group(&self.info[i - 1], &self.info[i]) {
                if merge_clusters {
                    self.merge_clusters(start, i);
                }

                self.reverse_range(start, i);
                start = i;
            }

            i += 1;
        }

        if merge_clusters {
            self.merge_clusters(start, i);
        }

        self.reverse_range(start, i);
        self.reverse();
    }

    pub fn reverse_clusters(&mut self) {
        self.reverse_groups(|a, b| a.cluster == b.cluster, false);
    }

    pub fn reverse_graphemes(&mut self) {
        let merge = self.cluster_level == BufferClusterLevel::MonotoneCharacters;
        self.reverse_groups(|_, b| b.is_continuation(), merge);
    }

    #[inline]
    fn group_end<F>(&self, mut start: usize, group: F) -> usize
    where
        F: Fn(&GlyphInfo, &GlyphInfo) -> bool,
    {
        start += 1;

        while start < self.len() && group(&self.info[start - 1], &self.info[start]) {
            start += 1;
        }

        start
    }

    #[inline]
    pub fn next_cluster(&self, start: usize) -> usize {
        self.group_end(start, |a, b| a.cluster == b.cluster)
    }

    #[inline]
    pub fn next_syllable(&self, start: usize) -> usize {
        if start >= self.len() {
            return start;
        }

        let syllable = self.info[start].syllable();
        let mut start = start + 1;
        while start < self.len() && syllable == self.info[start].syllable() {
            start += 1;
        }

        start
    }

    #[inline]
    pub fn next_grapheme(&self, start: usize) -> usize {
        self.group_end(start, |_, b| b.is_continuation())
    }

    #[inline]
    pub fn next_glyph(&mut self) {
        if self.have_output {
            self.out_info.push(self.info[self.idx]);
        }

        self.idx += 1;
    }

    #[inline]
    pub fn next_glyphs(&mut self, n: usize) {
        if self.have_output {
            self.out_info.extend_from_slice(&self.info[self.idx..self.idx + n]);
        }

        self.idx += n;
    }

    /// Copies glyph at idx to output but doesn't advance idx.
    #[inline]
    pub fn copy_glyph(&mut self) {
        self.out_info.push(self.info[self.idx]);
    }

    /// Advances idx without copying to output.
    #[inline]
    pub fn skip_glyph(&mut self) {
        self.idx += 1;
    }

    pub fn replace_glyphs(&mut self, num_in: usize, num_out: usize, glyph_data: &[u32]) {
        self.merge_clusters(self.idx, self.idx + num_in);

        let orig_info = if self.idx < self.len() {
            self.info[self.idx]
        } else {
            *self.prev()
        };

        for &glyph_id in &glyph_data[..num_out] {
            let mut info = orig_info;
            info.glyph_id = glyph_id;
            self.out_info.push(info);
        }

        self.idx += num_in;
    }

    pub fn replace_glyph(&mut self, glyph_index: u32) {
        let mut info = self.info[self.idx];
        info.glyph_id = glyph_index;
        self.out_info.push(info);
        self.idx += 1;
    }

    /// Makes a copy of the glyph at idx to output and replaces its glyph id.
    pub fn output_glyph(&mut self, glyph_index: u32) {
        if self.idx == self.len() && self.out_info.is_empty() {
            return;
        }

        let mut info = if self.idx < self.len() {
            self.info[self.idx]
        } else {
            *self.prev()
        };

        info.glyph_id = glyph_index;
        self.out_info.push(info);
    }

    pub fn output_info(&mut self, glyph_info: GlyphInfo) {
        self.out_info.push(glyph_info);
    }

    /// Outputs a new character while keeping the current cluster and mask.
    pub fn output_char(&mut self, unichar: u32, glyph: u32) {
        self.cur_mut(0).set_glyph_index(glyph);
        // Make a copy so the scratch flags are not borrowed twice.
        let mut flags = self.scratch_flags;
        self.output_glyph(unichar);
        if let Some(last) = self.out_info.last_mut() {
            last.init_unicode_props(&mut flags);
        }
        self.scratch_flags = flags;
    }

    /// Copies the current character to output, storing its glyph.
    pub fn next_char(&mut self, glyph: u32) {
        self.cur_mut(0).set_glyph_index(glyph);
        self.next_glyph();
    }

    /// Merges clusters for deleting the current glyph, and skips it.
    pub fn delete_glyph(&mut self) {
        let cluster = self.info[self.idx].cluster;

        if (self.idx + 1 < self.len() && cluster == self.info[self.idx + 1].cluster)
            || (!self.out_info.is_empty() && cluster == self.prev().cluster)
        {
            // Cluster survives; do nothing.
            self.skip_glyph();
            return;
        }

        if !self.out_info.is_empty() {
            // Merge cluster backward.
            if cluster < self.prev().cluster {
                let mask = self.info[self.idx].mask;
                let old_cluster = self.prev().cluster;

                let mut i = self.out_len();
                while i != 0 && self.out_info[i - 1].cluster == old_cluster {
                    set_cluster(&mut self.out_info[i - 1], cluster, mask);
                    i -= 1;
                }
            }

            self.skip_glyph();
            return;
        }

        if self.idx + 1 < self.len() {
            // Merge cluster forward.
            self.merge_clusters(self.idx, self.idx + 2);
        }

        self.skip_glyph();
    }

    /// Removes every glyph matching `filter` without an output pass.
    pub fn delete_glyphs_inplace<F>(&mut self, filter: F)
    where
        F: Fn(&GlyphInfo) -> bool,
    {
        // Merge clusters and delete filtered glyphs.
        // NOTE: We can't use out-buffer as we have positioning data.
        let mut j = 0;
        let len = self.len();
        for i in 0..len {
            if filter(&self.info[i]) {
                // Merge clusters.
                // Same logic as delete_glyph(), but for in-place removal.
                let cluster = self.info[i].cluster;
                if i + 1 < len && cluster == self.info[i + 1].cluster {
                    // Cluster survives; do nothing.
                    continue;
                }

                if j != 0 {
                    // Merge cluster backward.
                    if cluster < self.info[j - 1].cluster {
                        let mask = self.info[i].mask;
                        let old_cluster = self.info[j - 1].cluster;

                        let mut k = j;
                        while k > 0 && self.info[k - 1].cluster == old_cluster {
                            set_cluster(&mut self.info[k - 1], cluster, mask);
                            k -= 1;
                        }
                    }

                    continue;
                }

                if i + 1 < len {
                    // Merge cluster forward.
                    self.merge_clusters(i, i + 2);
                }

                continue;
            }

            if j != i {
                self.info[j] = self.info[i];
                self.pos[j] = self.pos[i];
            }

            j += 1;
        }

        self.info.truncate(j);
        self.pos.truncate(j);
    }

    /// Moves the output position to `i`, pulling glyphs from the input or
    /// pushing them back into it.
    pub fn move_to(&mut self, i: usize) -> bool {
        if !self.have_output {
            debug_assert!(i <= self.len());
            self.idx = i;
            return true;
        }

        debug_assert!(i <= self.out_len() + (self.len() - self.idx));

        if self.out_len() < i {
            let count = i - self.out_len();
            self.out_info
                .extend_from_slice(&self.info[self.idx..self.idx + count]);
            self.idx += count;
        } else if self.out_len() > i {
            // Tricky part: rewinding...
            let count = self.out_len() - i;

            if self.idx < count {
                // Make room in front of the input.
                let extra = count - self.idx;
                self.info
                    .splice(0..0, core::iter::repeat(GlyphInfo::default()).take(extra));
                self.idx += extra;
            }

            self.idx -= count;
            let (start, end) = (self.idx, self.idx + count);
            self.info[start..end].copy_from_slice(&self.out_info[i..]);
            self.out_info.truncate(i);
        }

        true
    }

    /// Gives the glyphs in `start..end` the lowest cluster value among them.
    ///
    /// The merge grows to take in neighbours that share a cluster with
    /// either edge, glyphs already in the output included. At the
    /// characters level clusters stay apart and the range is only marked
    /// unsafe to break.
    pub fn merge_clusters(&mut self, start: usize, end: usize) {
        if end - start < 2 {
            return;
        }

        if self.cluster_level == BufferClusterLevel::Characters {
            self.unsafe_to_break(start, end);
            return;
        }

        let Some(cluster) = self.info[start..end].iter().map(|info| info.cluster).min() else {
            return;
        };

        let mut end = end;
        while end < self.len() && self.info[end].cluster == self.info[end - 1].cluster {
            end += 1;
        }

        let mut start = start;
        while start > self.idx && self.info[start - 1].cluster == self.info[start].cluster {
            start -= 1;
        }

        // Reaching the cursor continues the run into the output.
        if start == self.idx {
            let edge = self.info[start].cluster;
            for info in self.out_info.iter_mut().rev().take_while(|info| info.cluster == edge) {
                set_cluster(info, cluster, 0);
            }
        }

        for info in &mut self.info[start..end] {
            set_cluster(info, cluster, 0);
        }
    }

    pub fn merge_out_clusters(&mut self, mut start: usize, mut end: usize) {
        if self.cluster_level == BufferClusterLevel::Characters {
            return;
        }

        if end - start < 2 {
            return;
        }

        let mut cluster = self.out_info[start].cluster;

        for i in start + 1..end {
            cluster = min(cluster, self.out_info[i].cluster);
        }

        // Extend start.
        while start != 0 && self.out_info[start - 1].cluster == self.out_info[start].cluster {
            start -= 1;
        }

        // Extend end.
        while end < self.out_len() && self.out_info[end - 1].cluster == self.out_info[end].cluster
        {
            end += 1;
        }

        // If we hit the end of out-buffer, continue in buffer.
        if end == self.out_len() {
            let end_cluster = self.out_info[end - 1].cluster;
            let mut i = self.idx;
            while i < self.len() && self.info[i].cluster == end_cluster {
                set_cluster(&mut self.info[i], cluster, 0);
                i += 1;
            }
        }

        for info in &mut self.out_info[start..end] {
            set_cluster(info, cluster, 0);
        }
    }

    pub fn unsafe_to_break(&mut self, start: usize, end: usize) {
        if end - start < 2 {
            return;
        }

        self.unsafe_to_break_impl(start, end);
    }

    fn unsafe_to_break_impl(&mut self, start: usize, end: usize) {
        let cluster = find_min_cluster(&self.info[start..end], u32::MAX);
        if set_unsafe_to_break(&mut self.info[start..end], cluster) {
            self.scratch_flags |= BufferScratchFlags::HAS_UNSAFE_TO_BREAK;
        }
    }

    pub fn unsafe_to_break_all(&mut self) {
        let len = self.len();
        if len > 0 {
            self.unsafe_to_break_impl(0, len);
        }
    }

    /// Same as `unsafe_to_break`, but the range starts in `out_info` and
    /// ends in `info`.
    pub fn unsafe_to_break_from_outbuffer(&mut self, start: usize, end: usize) {
        if !self.have_output {
            self.unsafe_to_break_impl(start, end);
            return;
        }

        debug_assert!(start <= self.out_len());
        debug_assert!(self.idx <= end);

        let mut cluster = u32::MAX;
        cluster = find_min_cluster(&self.out_info[start..], cluster);
        cluster = find_min_cluster(&self.info[self.idx..end], cluster);

        let (idx, out_len) = (self.idx, self.out_len());
        let a = set_unsafe_to_break(&mut self.out_info[start..out_len], cluster);
        let b = set_unsafe_to_break(&mut self.info[idx..end], cluster);
        if a || b {
            self.scratch_flags |= BufferScratchFlags::HAS_UNSAFE_TO_BREAK;
        }
    }

    /// Stable insertion sort that keeps clusters monotone by merging the
    /// clusters of every moved run.
    pub fn sort<F>(&mut self, start: usize, end: usize, greater: F)
    where
        F: Fn(&GlyphInfo, &GlyphInfo) -> bool,
    {
        debug_assert!(!self.have_positions);

        for i in start + 1..end {
            let mut j = i;
            while j > start && greater(&self.info[j - 1], &self.info[i]) {
                j -= 1;
            }

            if i == j {
                continue;
            }

            // Move item i to occupy place for item j, shift what's in between.
            self.merge_clusters(j, i + 1);
            self.info[j..=i].rotate_right(1);
        }
    }

    pub fn swap_info(&mut self, a: usize, b: usize) {
        self.info.swap(a, b);
    }
}

fn find_min_cluster(infos: &[GlyphInfo], mut cluster: u32) -> u32 {
    for info in infos {
        cluster = min(cluster, info.cluster);
    }

    cluster
}

fn set_unsafe_to_break(infos: &mut [GlyphInfo], cluster: u32) -> bool {
    let mut changed = false;
    for info in infos {
        if info.cluster != cluster {
            info.mask |= glyph_flag::UNSAFE_TO_BREAK;
            changed = true;
        }
    }

    changed
}

/// A buffer that contains an input string ready for shaping.
#[derive(Clone, Debug)]
pub struct UnicodeBuffer(pub(crate) Buffer);

impl UnicodeBuffer {
    /// Create a new `UnicodeBuffer`.
    #[inline]
    pub fn new() -> UnicodeBuffer {
        UnicodeBuffer(Buffer::new())
    }

    /// Returns the length of the data of the buffer.
    ///
    /// This corresponds to the number of unicode codepoints contained in the
    /// buffer.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the buffer contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Pushes a string to a buffer.
    ///
    /// Clusters are byte offsets into `str`.
    #[inline]
    pub fn push_str(&mut self, str: &str) {
        self.0.info.reserve(str.len());
        self.0.pos.reserve(str.len());

        for (i, c) in str.char_indices() {
            self.add(c, i as u32);
        }
    }

    /// Sets the pre-context for this buffer.
    pub fn set_pre_context(&mut self, str: &str) {
        self.0.set_pre_context(str);
    }

    /// Sets the post-context for this buffer.
    pub fn set_post_context(&mut self, str: &str) {
        self.0.set_post_context(str);
    }

    /// Appends a character to a buffer with the given cluster value.
    #[inline]
    pub fn add(&mut self, codepoint: char, cluster: u32) {
        self.0.add(codepoint as u32, cluster);
        self.0.clear_context(1);
    }

    /// Appends `text[item_offset..item_offset + item_length]`.
    ///
    /// Up to five code points before and after the item are kept as
    /// context, so joining and mark handling work across run boundaries.
    /// Clusters are indices into `text`.
    pub fn add_codepoints(&mut self, text: &[u32], item_offset: usize, item_length: usize) {
        self.0.add_codepoints(text, item_offset, item_length);
    }

    /// Set the text direction of the `Buffer`'s contents.
    #[inline]
    pub fn set_direction(&mut self, direction: Direction) {
        self.0.direction = direction;
    }

    /// Returns the `Buffer`'s text direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.0.direction
    }

    /// Set the script from an ISO15924 tag.
    #[inline]
    pub fn set_script(&mut self, script: Script) {
        self.0.script = Some(script);
    }

    /// Get the ISO15924 script tag.
    pub fn script(&self) -> Script {
        self.0.script.unwrap_or(crate::script::UNKNOWN)
    }

    /// Set the buffer language.
    #[inline]
    pub fn set_language(&mut self, lang: Language) {
        self.0.language = Some(lang);
    }

    /// Get the buffer language.
    #[inline]
    pub fn language(&self) -> Option<Language> {
        self.0.language.clone()
    }

    /// Guess the segment properties (direction, language, script) for the
    /// current buffer.
    #[inline]
    pub fn guess_segment_properties(&mut self) {
        self.0.guess_segment_properties();
    }

    /// Set the flags for this buffer.
    #[inline]
    pub fn set_flags(&mut self, flags: BufferFlags) {
        self.0.flags = flags;
    }

    /// Get the flags for this buffer.
    #[inline]
    pub fn flags(&self) -> BufferFlags {
        self.0.flags
    }

    /// Set the cluster level of the buffer.
    #[inline]
    pub fn set_cluster_level(&mut self, cluster_level: BufferClusterLevel) {
        self.0.cluster_level = cluster_level;
    }

    /// Retrieve the cluster level of the buffer.
    #[inline]
    pub fn cluster_level(&self) -> BufferClusterLevel {
        self.0.cluster_level
    }

    /// Sets the glyph that replaces invisible characters in the shaping
    /// result. By default the glyph of U+0020 SPACE is used.
    #[inline]
    pub fn set_invisible_glyph(&mut self, glyph: u16) {
        self.0.invisible = Some(GlyphId(glyph));
    }

    /// Sets the glyph used for characters the font cannot map.
    #[inline]
    pub fn set_not_found_glyph(&mut self, glyph: u16) {
        self.0.not_found = GlyphId(glyph);
    }

    /// Sets the character that replaces invalid input code points.
    #[inline]
    pub fn set_replacement_codepoint(&mut self, c: char) {
        self.0.replacement = c;
    }

    /// Resets clusters.
    #[inline]
    pub fn reset_clusters(&mut self) {
        for (i, info) in self.0.info.iter_mut().enumerate() {
            info.cluster = i as u32;
        }
    }

    /// Clear the contents of the buffer.
    #[inline]
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl Default for UnicodeBuffer {
    fn default() -> UnicodeBuffer {
        UnicodeBuffer::new()
    }
}

/// A buffer that contains the results of the shaping process.
#[derive(Clone)]
pub struct GlyphBuffer(pub(crate) Buffer);

impl GlyphBuffer {
    /// Returns the length of the data of the buffer.
    ///
    /// When called before shaping this is the number of unicode codepoints
    /// contained in the buffer. When called after shaping it returns the number
    /// of glyphs stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the buffer contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the glyph infos.
    #[inline]
    pub fn glyph_infos(&self) -> &[GlyphInfo] {
        &self.0.info
    }

    /// Get the glyph positions.
    #[inline]
    pub fn glyph_positions(&self) -> &[GlyphPosition] {
        &self.0.pos
    }

    /// Clears the content of the glyph buffer and returns an empty
    /// `UnicodeBuffer` reusing the existing allocation.
    #[inline]
    pub fn clear(mut self) -> UnicodeBuffer {
        self.0.clear();
        UnicodeBuffer(self.0)
    }

    /// Converts the glyph buffer content into a string in the hb-shape text
    /// format.
    pub fn serialize(&self, face: &Face, flags: SerializeFlags) -> String {
        self.serialize_impl(face, flags).unwrap_or_default()
    }

    fn serialize_impl(&self, face: &Face, flags: SerializeFlags) -> Result<String, core::fmt::Error> {
        let mut s = String::with_capacity(64);

        let info = self.glyph_infos();
        let pos = self.glyph_positions();
        let mut x = 0;
        let mut y = 0;
        for (info, pos) in info.iter().zip(pos) {
            if !flags.contains(SerializeFlags::NO_GLYPH_NAMES) {
                match face.glyph_name(info.as_glyph()) {
                    Some(name) => s.push_str(name),
                    None => write!(&mut s, "gid{}", info.glyph_id)?,
                }
            } else {
                write!(&mut s, "{}", info.glyph_id)?;
            }

            if !flags.contains(SerializeFlags::NO_CLUSTERS) {
                write!(&mut s, "={}", info.cluster)?;
            }

            if !flags.contains(SerializeFlags::NO_POSITIONS) {
                if x + pos.x_offset != 0 || y + pos.y_offset != 0 {
                    write!(&mut s, "@{},{}", x + pos.x_offset, y + pos.y_offset)?;
                }

                if !flags.contains(SerializeFlags::NO_ADVANCES) {
                    write!(&mut s, "+{}", pos.x_advance)?;
                    if pos.y_advance != 0 {
                        write!(&mut s, ",{}", pos.y_advance)?;
                    }
                }
            }

            if flags.contains(SerializeFlags::GLYPH_FLAGS) {
                if info.mask & glyph_flag::DEFINED != 0 {
                    write!(&mut s, "#{:X}", info.mask & glyph_flag::DEFINED)?;
                }
            }

            if flags.contains(SerializeFlags::GLYPH_EXTENTS) {
                let extents = face.glyph_extents(info.as_glyph()).unwrap_or_default();
                write!(
                    &mut s,
                    "<{},{},{},{}>",
                    extents.x_bearing, extents.y_bearing, extents.width, extents.height
                )?;
            }

            if flags.contains(SerializeFlags::NO_ADVANCES) {
                x += pos.x_advance;
                y += pos.y_advance;
            }

            s.push('|');
        }

        // Remove last `|`.
        s.pop();

        Ok(s)
    }
}

impl core::fmt::Debug for GlyphBuffer {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        fmt.debug_struct("GlyphBuffer")
            .field("glyph_positions", &self.glyph_positions())
            .field("glyph_infos", &self.glyph_infos())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn buffer_with_clusters(clusters: &[u32]) -> Buffer {
        let mut buffer = Buffer::new();
        for (i, &c) in clusters.iter().enumerate() {
            buffer.add(0x61 + i as u32, c);
        }
        buffer
    }

    fn clusters(buffer: &Buffer) -> Vec<u32> {
        buffer.info.iter().map(|i| i.cluster).collect()
    }

    #[test]
    fn merge_extends_to_neighbours() {
        let mut buffer = buffer_with_clusters(&[0, 1, 2, 2, 3]);
        buffer.merge_clusters(1, 3);
        assert_eq!(clusters(&buffer), vec![0, 1, 1, 1, 3]);
    }

    #[test]
    fn merge_reaches_into_the_output() {
        let mut buffer = buffer_with_clusters(&[1, 2, 2, 0]);
        buffer.clear_output();
        buffer.next_glyph();
        buffer.next_glyph();
        buffer.merge_clusters(2, 4);

        let out: Vec<u32> = buffer.out_info.iter().map(|i| i.cluster).collect();
        assert_eq!(out, vec![1, 0]);
        assert_eq!(clusters(&buffer)[2..], [0, 0]);
    }

    #[test]
    fn merge_in_characters_level_only_marks() {
        let mut buffer = buffer_with_clusters(&[0, 1, 2]);
        buffer.cluster_level = BufferClusterLevel::Characters;
        buffer.merge_clusters(0, 3);
        assert_eq!(clusters(&buffer), vec![0, 1, 2]);
        assert!(!buffer.info[0].unsafe_to_break());
        assert!(buffer.info[1].unsafe_to_break());
        assert!(buffer.info[2].unsafe_to_break());
        assert!(buffer.scratch_flags.contains(BufferScratchFlags::HAS_UNSAFE_TO_BREAK));
    }

    #[test]
    fn sort_merges_moved_runs() {
        let mut buffer = buffer_with_clusters(&[0, 1, 2]);
        buffer.info[0].glyph_id = 3;
        buffer.info[1].glyph_id = 1;
        buffer.info[2].glyph_id = 2;
        buffer.sort(0, 3, |a, b| a.glyph_id > b.glyph_id);
        let glyphs: Vec<u32> = buffer.info.iter().map(|i| i.glyph_id).collect();
        assert_eq!(glyphs, vec![1, 2, 3]);
        assert_eq!(clusters(&buffer), vec![0, 0, 0]);
    }

    #[test]
    fn reverse_twice_is_identity() {
        let mut buffer = buffer_with_clusters(&[0, 1, 1, 2]);
        buffer.have_positions = true;
        buffer.reverse();
        assert_eq!(clusters(&buffer), vec![2, 1, 1, 0]);
        buffer.reverse();
        assert_eq!(clusters(&buffer), vec![0, 1, 1, 2]);
    }

    #[test]
    fn reverse_clusters_keeps_inner_order() {
        let mut buffer = buffer_with_clusters(&[0, 1, 1, 2]);
        buffer.reverse_clusters();
        let glyphs: Vec<u32> = buffer.info.iter().map(|i| i.glyph_id).collect();
        assert_eq!(glyphs, vec![0x64, 0x62, 0x63, 0x61]);
    }

    #[test]
    fn output_pass() {
        let mut buffer = buffer_with_clusters(&[0, 1, 2]);
        buffer.clear_output();
        buffer.next_glyph();
        buffer.replace_glyphs(2, 1, &[42]);
        buffer.swap_buffers();
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.pos.len(), 2);
        assert_eq!(buffer.info[1].glyph_id, 42);
        assert_eq!(clusters(&buffer), vec![0, 1]);
    }

    #[test]
    fn move_to_rewinds() {
        let mut buffer = buffer_with_clusters(&[0, 1, 2, 3]);
        buffer.clear_output();
        buffer.next_glyphs(3);
        assert!(buffer.move_to(1));
        assert_eq!(buffer.out_len(), 1);
        assert_eq!(buffer.idx, 1);
        assert!(buffer.move_to(4));
        buffer.swap_buffers();
        assert_eq!(clusters(&buffer), vec![0, 1, 2, 3]);
    }

    #[test]
    fn delete_merges_backward() {
        let mut buffer = buffer_with_clusters(&[0, 1, 2]);
        buffer.clear_output();
        buffer.next_glyph();
        buffer.delete_glyph();
        buffer.next_glyph();
        buffer.swap_buffers();
        assert_eq!(buffer.len(), 2);
        assert_eq!(clusters(&buffer), vec![0, 2]);
    }

    #[test]
    fn codepoints_context() {
        let text: Vec<u32> = "abcdefghij".chars().map(|c| c as u32).collect();
        let mut buffer = Buffer::new();
        buffer.add_codepoints(&text, 7, 1);
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.info[0].cluster, 7);
        assert_eq!(buffer.context(0), &['g', 'f', 'e', 'd', 'c']);
        assert_eq!(buffer.context(1), &['i', 'j']);
    }

    #[test]
    fn invalid_codepoint_is_replaced() {
        let mut buffer = Buffer::new();
        buffer.add_codepoints(&[0x61, 0xD800], 0, 2);
        assert_eq!(buffer.info[1].glyph_id, 0xFFFD);
    }

    #[test]
    fn lig_props_packing() {
        let mut info = GlyphInfo::default();
        info.set_glyph_props(GlyphPropsFlags::LIGATURE.bits());
        info.set_lig_props_for_ligature(5, 3);
        assert_eq!(info.lig_id(), 5);
        assert_eq!(info.lig_num_comps(), 3);
        assert_eq!(info.lig_comp(), 0);

        info.set_lig_props_for_mark(5, 2);
        assert_eq!(info.lig_comp(), 2);
        assert_eq!(info.lig_num_comps(), 1);
    }

    #[test]
    fn unicode_props() {
        let mut flags = BufferScratchFlags::default();
        let mut info = GlyphInfo {
            glyph_id: 0x200D,
            ..GlyphInfo::default()
        };
        info.init_unicode_props(&mut flags);
        assert!(info.is_zwj());
        assert!(info.is_default_ignorable());
        assert!(flags.contains(BufferScratchFlags::HAS_DEFAULT_IGNORABLES));

        let mut mark = GlyphInfo {
            glyph_id: 0x0301,
            ..GlyphInfo::default()
        };
        mark.init_unicode_props(&mut flags);
        assert!(mark.is_continuation());
        assert_eq!(mark.modified_combining_class(), 230);
    }
}
