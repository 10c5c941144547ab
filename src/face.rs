#[cfg(not(feature = "std"))]
use core_maths::CoreFloat;

use core::sync::atomic::{AtomicU32, Ordering};

use ttf_parser::gdef::GlyphClass;
use ttf_parser::opentype_layout::LayoutTable;
use ttf_parser::{GlyphId, PlatformId};

use crate::buffer::GlyphPropsFlags;
use crate::ot::{PositioningTable, SubstitutionTable, TableIndex};
use crate::Variation;

/// Windows symbol fonts map their glyphs into the private use area.
const WINDOWS_SYMBOL: u16 = 0;

/// Character maps in order of preference: symbol first, then full
/// repertoire, then BMP-only, then MacRoman.
const CMAP_PREFERENCE: &[(PlatformId, u16)] = &[
    (PlatformId::Windows, WINDOWS_SYMBOL),
    (PlatformId::Windows, 10),
    (PlatformId::Unicode, 6),
    (PlatformId::Unicode, 4),
    (PlatformId::Windows, 1),
    (PlatformId::Unicode, 3),
    (PlatformId::Unicode, 2),
    (PlatformId::Unicode, 1),
    (PlatformId::Unicode, 0),
    (PlatformId::Macintosh, 0),
];

static NEXT_FACE_ID: AtomicU32 = AtomicU32::new(1);

/// The ink box of a glyph in font units.
///
/// `y_bearing` is the top edge, so `height` is negative for anything with
/// ink below the top.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct GlyphExtents {
    pub x_bearing: i32,
    pub y_bearing: i32,
    pub width: i32,
    pub height: i32,
}

/// A font face ready for shaping.
///
/// Borrows the font data and keeps the parsed face next to its compiled
/// GSUB and GPOS lookups, the character map shaping reads from and the
/// sizes that bitmap extents and `trak` depend on.
#[derive(Clone)]
pub struct Face<'a> {
    pub(crate) ttfp_face: ttf_parser::Face<'a>,
    /// Tells plans built for different faces apart.
    pub(crate) id: u32,
    pub(crate) units_per_em: u16,
    pixels_per_em: Option<(u16, u16)>,
    pub(crate) points_per_em: Option<f32>,
    cmap_subtable: Option<u16>,
    pub(crate) gsub: Option<SubstitutionTable<'a>>,
    pub(crate) gpos: Option<PositioningTable<'a>>,
}

impl<'a> AsRef<ttf_parser::Face<'a>> for Face<'a> {
    #[inline]
    fn as_ref(&self) -> &ttf_parser::Face<'a> {
        &self.ttfp_face
    }
}

impl<'a> core::ops::Deref for Face<'a> {
    type Target = ttf_parser::Face<'a>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.ttfp_face
    }
}

impl<'a> Face<'a> {
    /// Parses face `face_index` of `data`.
    ///
    /// Returns `None` for anything that is not a font, or an index past the
    /// end of a collection.
    pub fn from_slice(data: &'a [u8], face_index: u32) -> Option<Self> {
        ttf_parser::Face::parse(data, face_index)
            .ok()
            .map(Self::from_face)
    }

    /// Wraps an already parsed face.
    pub fn from_face(face: ttf_parser::Face<'a>) -> Self {
        let tables = face.tables();
        let gsub = tables.gsub.map(SubstitutionTable::new);
        let gpos = tables.gpos.map(PositioningTable::new);

        Face {
            id: NEXT_FACE_ID.fetch_add(1, Ordering::Relaxed),
            units_per_em: face.units_per_em(),
            pixels_per_em: None,
            points_per_em: None,
            cmap_subtable: preferred_cmap_subtable(&face),
            gsub,
            gpos,
            ttfp_face: face,
        }
    }

    #[inline]
    pub fn units_per_em(&self) -> i32 {
        i32::from(self.units_per_em)
    }

    #[inline]
    pub(crate) fn pixels_per_em(&self) -> Option<(u16, u16)> {
        self.pixels_per_em
    }

    /// The pixel size device tables and bitmap strikes are picked for.
    /// Unset by default.
    #[inline]
    pub fn set_pixels_per_em(&mut self, ppem: Option<(u16, u16)>) {
        self.pixels_per_em = ppem;
    }

    /// The point size `trak` tracking is interpolated for. Unset by default.
    #[inline]
    pub fn set_points_per_em(&mut self, ptem: Option<f32>) {
        self.points_per_em = ptem;
    }

    /// Moves the face to a new instance. Axes the font lacks are skipped.
    pub fn set_variations(&mut self, variations: &[Variation]) {
        for variation in variations {
            if self
                .ttfp_face
                .set_variation(variation.tag, variation.value)
                .is_none()
            {
                log::debug!("no {} axis to vary", variation.tag);
            }
        }
    }

    /// Normalized variation coordinates, used to tell apart plans built for
    /// different instances of the same face.
    pub(crate) fn coords(&self) -> impl Iterator<Item = i16> + '_ {
        self.ttfp_face.variation_coordinates().iter().map(|c| c.get())
    }

    pub(crate) fn has_glyph(&self, c: u32) -> bool {
        self.get_nominal_glyph(c).is_some()
    }

    pub(crate) fn get_nominal_glyph(&self, c: u32) -> Option<GlyphId> {
        let index = self.cmap_subtable?;
        let subtable = self.tables().cmap?.subtables.get(index)?;

        let code = match subtable.platform_id {
            PlatformId::Macintosh if c > 0x7F => unicode_to_macroman(c),
            _ => c,
        };

        if let Some(glyph) = subtable.glyph_index(code) {
            return Some(glyph);
        }

        // Text written against a symbol font uses U+0000..00FF for what the
        // font keeps at U+F000..F0FF.
        let symbol = subtable.platform_id == PlatformId::Windows
            && subtable.encoding_id == WINDOWS_SYMBOL;
        if symbol && c <= 0xFF {
            return subtable.glyph_index(0xF000 + c);
        }

        None
    }

    pub(crate) fn glyph_variation_index(&self, c: char, vs: char) -> Option<GlyphId> {
        self.ttfp_face.glyph_variation_index(c, vs)
    }

    pub(crate) fn glyph_h_advance(&self, glyph: GlyphId) -> i32 {
        self.glyph_advance(glyph, false) as i32
    }

    /// Vertical advances point down, so they come out negative.
    pub(crate) fn glyph_v_advance(&self, glyph: GlyphId) -> i32 {
        -(self.glyph_advance(glyph, true) as i32)
    }

    /// Whether metrics of an instance have to be read off the outline: the
    /// face is moved off its default and has no metric variations.
    fn metrics_from_outline(&self) -> bool {
        let face = &self.ttfp_face;
        face.is_variable()
            && face.tables().hvar.is_none()
            && face.tables().vvar.is_none()
    }

    fn glyph_advance(&self, glyph: GlyphId, vertical: bool) -> u32 {
        let face = &self.ttfp_face;

        if self.metrics_from_outline()
            && face.has_non_default_variation_coordinates()
            && face.glyph_phantom_points(glyph).is_none()
        {
            let Some(bbox) = face.glyph_bounding_box(glyph) else {
                return 0;
            };
            let span = if vertical {
                bbox.y_max + bbox.y_min
            } else {
                bbox.x_max + bbox.x_min
            };
            return span as u32;
        }

        let tables = face.tables();
        match (vertical, tables.vmtx.is_some(), tables.hmtx.is_some()) {
            (true, true, _) => u32::from(face.glyph_ver_advance(glyph).unwrap_or(0)),
            // Without vmtx every glyph is one line tall.
            (true, false, _) => (face.ascender() - face.descender()) as u32,
            (false, _, true) => u32::from(face.glyph_hor_advance(glyph).unwrap_or(0)),
            (false, _, false) => u32::from(face.units_per_em()),
        }
    }

    pub(crate) fn glyph_h_origin(&self, glyph: GlyphId) -> i32 {
        self.glyph_h_advance(glyph) / 2
    }

    pub(crate) fn glyph_v_origin(&self, glyph: GlyphId) -> i32 {
        let face = &self.ttfp_face;
        if let Some(y) = face.glyph_y_origin(glyph) {
            return i32::from(y);
        }

        let Some(extents) = self.glyph_extents(glyph) else {
            return i32::from(face.ascender());
        };

        if face.tables().vmtx.is_some() {
            extents.y_bearing + self.glyph_side_bearing(glyph, true)
        } else {
            // Center the ink within one line height.
            let line = i32::from(face.ascender() - face.descender());
            extents.y_bearing + ((line + extents.height) >> 1)
        }
    }

    fn glyph_side_bearing(&self, glyph: GlyphId, vertical: bool) -> i32 {
        let face = &self.ttfp_face;

        if self.metrics_from_outline() {
            return face.glyph_bounding_box(glyph).map_or(0, |bbox| {
                i32::from(if vertical { bbox.x_min } else { bbox.y_min })
            });
        }

        let bearing = if vertical {
            face.glyph_ver_side_bearing(glyph)
        } else {
            face.glyph_hor_side_bearing(glyph)
        };
        i32::from(bearing.unwrap_or(0))
    }

    /// Returns the ink box of a glyph, or `None` when neither an outline nor
    /// a bitmap knows the glyph.
    pub fn glyph_extents(&self, glyph: GlyphId) -> Option<GlyphExtents> {
        self.bitmap_extents(glyph)
            .or_else(|| self.outline_extents(glyph))
    }

    /// Extents of a PNG strike scaled to font units. Other bitmap formats
    /// carry no usable metrics.
    fn bitmap_extents(&self, glyph: GlyphId) -> Option<GlyphExtents> {
        let ppem = self.pixels_per_em.map_or(u16::MAX, |(x, _)| x);
        let image = self.ttfp_face.glyph_raster_image(glyph, ppem)?;
        if image.format != ttf_parser::RasterImageFormat::PNG {
            return None;
        }

        let scale = f32::from(self.units_per_em) / f32::from(image.pixels_per_em);
        let scaled = |v: f32| (v * scale).round() as i32;

        Some(GlyphExtents {
            x_bearing: scaled(f32::from(image.x)),
            y_bearing: scaled(f32::from(image.y) + f32::from(image.height)),
            width: scaled(f32::from(image.width)),
            height: scaled(-f32::from(image.height)),
        })
    }

    fn outline_extents(&self, glyph: GlyphId) -> Option<GlyphExtents> {
        let bbox = match self.ttfp_face.tables().glyf {
            Some(glyf) => match glyf.bbox(glyph) {
                Some(bbox) => bbox,
                // An empty glyf entry is a glyph without ink, not a missing one.
                None => return Some(GlyphExtents::default()),
            },
            None => self.ttfp_face.glyph_bounding_box(glyph)?,
        };

        Some(GlyphExtents {
            x_bearing: i32::from(bbox.x_min),
            y_bearing: i32::from(bbox.y_max),
            width: i32::from(bbox.width()),
            height: i32::from(bbox.y_min) - i32::from(bbox.y_max),
        })
    }

    pub(crate) fn glyph_name(&self, glyph: GlyphId) -> Option<&str> {
        self.ttfp_face.glyph_name(glyph)
    }

    /// GDEF class bits of `glyph`, with the mark attachment class in the
    /// high byte.
    pub(crate) fn glyph_props(&self, glyph: GlyphId) -> u16 {
        let Some(gdef) = self.tables().gdef else {
            return 0;
        };

        let class = match gdef.glyph_class(glyph) {
            Some(GlyphClass::Base) => GlyphPropsFlags::BASE_GLYPH,
            Some(GlyphClass::Ligature) => GlyphPropsFlags::LIGATURE,
            Some(GlyphClass::Mark) => {
                let attachment = gdef.glyph_mark_attachment_class(glyph);
                return (attachment << 8) | GlyphPropsFlags::MARK.bits();
            }
            _ => return 0,
        };

        class.bits()
    }

    pub(crate) fn has_glyph_classes(&self) -> bool {
        self.tables()
            .gdef
            .map_or(false, |gdef| gdef.has_glyph_classes())
    }

    pub(crate) fn layout_table(&self, table: TableIndex) -> Option<&LayoutTable<'a>> {
        match table {
            TableIndex::GSUB => self.gsub.as_ref().map(|compiled| &compiled.inner),
            TableIndex::GPOS => self.gpos.as_ref().map(|compiled| &compiled.inner),
        }
    }

    /// The layout tables the face has, GSUB first.
    pub(crate) fn layout_tables(
        &self,
    ) -> impl Iterator<Item = (TableIndex, &LayoutTable<'a>)> + '_ {
        TableIndex::iter().filter_map(move |table| Some((table, self.layout_table(table)?)))
    }

    pub(crate) fn has_morx(&self) -> bool {
        self.tables().morx.is_some()
    }

    pub(crate) fn has_kerx(&self) -> bool {
        self.tables().kerx.is_some()
    }

    pub(crate) fn has_trak(&self) -> bool {
        self.tables().trak.is_some()
    }
}

fn preferred_cmap_subtable(face: &ttf_parser::Face) -> Option<u16> {
    let subtables = face.tables().cmap?.subtables;
    CMAP_PREFERENCE.iter().find_map(|&(platform, encoding)| {
        subtables
            .into_iter()
            .position(|s| s.platform_id == platform && s.encoding_id == encoding)
            .and_then(|index| u16::try_from(index).ok())
    })
}

/// Upper half of the Mac OS Roman code page, indexed from 0x80.
#[rustfmt::skip]
static MACROMAN_HIGH: &[u16] = &[
    0x00C4, 0x00C5, 0x00C7, 0x00C9, 0x00D1, 0x00D6, 0x00DC, 0x00E1,
    0x00E0, 0x00E2, 0x00E4, 0x00E3, 0x00E5, 0x00E7, 0x00E9, 0x00E8,
    0x00EA, 0x00EB, 0x00ED, 0x00EC, 0x00EE, 0x00EF, 0x00F1, 0x00F3,
    0x00F2, 0x00F4, 0x00F6, 0x00F5, 0x00FA, 0x00F9, 0x00FB, 0x00FC,
    0x2020, 0x00B0, 0x00A2, 0x00A3, 0x00A7, 0x2022, 0x00B6, 0x00DF,
    0x00AE, 0x00A9, 0x2122, 0x00B4, 0x00A8, 0x2260, 0x00C6, 0x00D8,
    0x221E, 0x00B1, 0x2264, 0x2265, 0x00A5, 0x00B5, 0x2202, 0x2211,
    0x220F, 0x03C0, 0x222B, 0x00AA, 0x00BA, 0x03A9, 0x00E6, 0x00F8,
    0x00BF, 0x00A1, 0x00AC, 0x221A, 0x0192, 0x2248, 0x2206, 0x00AB,
    0x00BB, 0x2026, 0x00A0, 0x00C0, 0x00C3, 0x00D5, 0x0152, 0x0153,
    0x2013, 0x2014, 0x201C, 0x201D, 0x2018, 0x2019, 0x00F7, 0x25CA,
    0x00FF, 0x0178, 0x2044, 0x20AC, 0x2039, 0x203A, 0xFB01, 0xFB02,
    0x2021, 0x00B7, 0x201A, 0x201E, 0x2030, 0x00C2, 0x00CA, 0x00C1,
    0x00CB, 0x00C8, 0x00CD, 0x00CE, 0x00CF, 0x00CC, 0x00D3, 0x00D4,
    0xF8FF, 0x00D2, 0x00DA, 0x00DB, 0x00D9, 0x0131, 0x02C6, 0x02DC,
    0x00AF, 0x02D8, 0x02D9, 0x02DA, 0x00B8, 0x02DD, 0x02DB, 0x02C7,
];

/// Maps a character above ASCII to its MacRoman code, or 0 (`.notdef`).
fn unicode_to_macroman(c: u32) -> u32 {
    u16::try_from(c)
        .ok()
        .and_then(|u| MACROMAN_HIGH.iter().position(|&m| m == u))
        .map_or(0, |index| 0x80 + index as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn macroman_upper_half() {
        assert_eq!(unicode_to_macroman(0x00C4), 0x80);
        assert_eq!(unicode_to_macroman(0x02C7), 0xFF);
        assert_eq!(unicode_to_macroman(0x20AC), 0xDB);
        assert_eq!(unicode_to_macroman(0x0410), 0);
        assert_eq!(unicode_to_macroman(0x1F600), 0);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(Face::from_slice(&[0, 1, 0, 0], 0).is_none());
        assert!(Face::from_slice(b"not a font", 0).is_none());
    }
}
