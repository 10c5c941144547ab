
pub use unicode_properties::GeneralCategory;
use unicode_properties::UnicodeGeneralCategory;

use crate::{script, Script};

/// A Unicode scalar value or an unmapped codepoint stored in a glyph slot.
pub type CodePoint = u32;

/// Conversion between `GeneralCategory` and the 5-bit code packed into glyph info.
pub trait GeneralCategoryExt {
    fn to_rb(&self) -> u32;
    fn from_rb(gc: u32) -> Self;
    fn is_mark(&self) -> bool;
    fn is_letter(&self) -> bool;
}

impl GeneralCategoryExt for GeneralCategory {
    fn to_rb(&self) -> u32 {
        match *self {
            GeneralCategory::Control => 0,
            GeneralCategory::Format => 1,
            GeneralCategory::Unassigned => 2,
            GeneralCategory::PrivateUse => 3,
            GeneralCategory::Surrogate => 4,
            GeneralCategory::LowercaseLetter => 5,
            GeneralCategory::ModifierLetter => 6,
            GeneralCategory::OtherLetter => 7,
            GeneralCategory::TitlecaseLetter => 8,
            GeneralCategory::UppercaseLetter => 9,
            GeneralCategory::SpacingMark => 10,
            GeneralCategory::EnclosingMark => 11,
            GeneralCategory::NonspacingMark => 12,
            GeneralCategory::DecimalNumber => 13,
            GeneralCategory::LetterNumber => 14,
            GeneralCategory::OtherNumber => 15,
            GeneralCategory::ConnectorPunctuation => 16,
            GeneralCategory::DashPunctuation => 17,
            GeneralCategory::ClosePunctuation => 18,
            GeneralCategory::FinalPunctuation => 19,
            GeneralCategory::InitialPunctuation => 20,
            GeneralCategory::OtherPunctuation => 21,
            GeneralCategory::OpenPunctuation => 22,
            GeneralCategory::CurrencySymbol => 23,
            GeneralCategory::ModifierSymbol => 24,
            GeneralCategory::MathSymbol => 25,
            GeneralCategory::OtherSymbol => 26,
            GeneralCategory::LineSeparator => 27,
            GeneralCategory::ParagraphSeparator => 28,
            GeneralCategory::SpaceSeparator => 29,
        }
    }

    fn from_rb(gc: u32) -> Self {
        match gc {
            0 => GeneralCategory::Control,
            1 => GeneralCategory::Format,
            2 => GeneralCategory::Unassigned,
            3 => GeneralCategory::PrivateUse,
            4 => GeneralCategory::Surrogate,
            5 => GeneralCategory::LowercaseLetter,
            6 => GeneralCategory::ModifierLetter,
            7 => GeneralCategory::OtherLetter,
            8 => GeneralCategory::TitlecaseLetter,
            9 => GeneralCategory::UppercaseLetter,
            10 => GeneralCategory::SpacingMark,
            11 => GeneralCategory::EnclosingMark,
            12 => GeneralCategory::NonspacingMark,
            13 => GeneralCategory::DecimalNumber,
            14 => GeneralCategory::LetterNumber,
            15 => GeneralCategory::OtherNumber,
            16 => GeneralCategory::ConnectorPunctuation,
            17 => GeneralCategory::DashPunctuation,
            18 => GeneralCategory::ClosePunctuation,
            19 => GeneralCategory::FinalPunctuation,
            20 => GeneralCategory::InitialPunctuation,
            21 => GeneralCategory::OtherPunctuation,
            22 => GeneralCategory::OpenPunctuation,
            23 => GeneralCategory::CurrencySymbol,
            24 => GeneralCategory::ModifierSymbol,
            25 => GeneralCategory::MathSymbol,
            26 => GeneralCategory::OtherSymbol,
            27 => GeneralCategory::LineSeparator,
            28 => GeneralCategory::ParagraphSeparator,
            29 => GeneralCategory::SpaceSeparator,
            _ => GeneralCategory::Unassigned,
        }
    }

    #[inline]
    fn is_mark(&self) -> bool {
        matches!(
            *self,
            GeneralCategory::SpacingMark
                | GeneralCategory::EnclosingMark
                | GeneralCategory::NonspacingMark
        )
    }

    #[inline]
    fn is_letter(&self) -> bool {
        matches!(
            *self,
            GeneralCategory::LowercaseLetter
                | GeneralCategory::ModifierLetter
                | GeneralCategory::OtherLetter
                | GeneralCategory::TitlecaseLetter
                | GeneralCategory::UppercaseLetter
        )
    }
}

/// Space widths used when a font has no glyph for a space character.
pub mod space {
    pub type Space = u8;

    pub const NOT_SPACE: Space = 0;
    pub const SPACE_EM: Space = 1;
    pub const SPACE_EM_2: Space = 2;
    pub const SPACE_EM_3: Space = 3;
    pub const SPACE_EM_4: Space = 4;
    pub const SPACE_EM_5: Space = 5;
    pub const SPACE_EM_6: Space = 6;
    pub const SPACE_EM_16: Space = 16;
    /// 4/18th of an EM.
    pub const SPACE_4_EM_18: Space = 17;
    pub const SPACE: Space = 18;
    pub const SPACE_FIGURE: Space = 19;
    pub const SPACE_PUNCTUATION: Space = 20;
    pub const SPACE_NARROW: Space = 21;
}

#[allow(dead_code)]
pub mod combining_class {
    pub const NOT_REORDERED: u8 = 0;
    pub const OVERLAY: u8 = 1;
    pub const NUKTA: u8 = 7;
    pub const KANA_VOICING: u8 = 8;
    pub const VIRAMA: u8 = 9;
    pub const ATTACHED_BELOW_LEFT: u8 = 200;
    pub const ATTACHED_BELOW: u8 = 202;
    pub const ATTACHED_ABOVE: u8 = 214;
    pub const ATTACHED_ABOVE_RIGHT: u8 = 216;
    pub const BELOW_LEFT: u8 = 218;
    pub const BELOW: u8 = 220;
    pub const BELOW_RIGHT: u8 = 222;
    pub const LEFT: u8 = 224;
    pub const RIGHT: u8 = 226;
    pub const ABOVE_LEFT: u8 = 228;
    pub const ABOVE: u8 = 230;
    pub const ABOVE_RIGHT: u8 = 232;
    pub const DOUBLE_BELOW: u8 = 233;
    pub const DOUBLE_ABOVE: u8 = 234;
    pub const IOTA_SUBSCRIPT: u8 = 240;
}

/// Maps a canonical combining class onto the class used for mark reordering.
///
/// Hebrew fixed-position classes follow the SBL Hebrew ordering, Arabic
/// shadda moves before the other harakat, Telugu length marks are zeroed so
/// they do not reorder around the virama, Thai sara u / uu sort before the
/// phinthu, and Tibetan sign u sorts before sign i.
fn modify_combining_class(ccc: u8) -> u8 {
    match ccc {
        // Hebrew
        10 => 22, // sheva
        11 => 15, // hataf segol
        12 => 16, // hataf patah
        13 => 17, // hataf qamats
        14 => 23, // hiriq
        15 => 18, // tsere
        16 => 19, // segol
        17 => 20, // patah
        18 => 21, // qamats
        19 => 14, // holam
        20 => 24, // qubuts
        21 => 12, // dagesh
        22 => 25, // meteg
        23 => 13, // rafe
        24 => 10, // shin dot
        25 => 11, // sin dot
        26 => 26, // point varika

        // Arabic
        27 => 28, // fathatan
        28 => 29, // dammatan
        29 => 30, // kasratan
        30 => 31, // fatha
        31 => 32, // damma
        32 => 33, // kasra
        33 => 27, // shadda
        34 => 34, // sukun
        35 => 35, // superscript alef

        // Telugu
        84 | 91 => 0,

        // Thai
        103 => 3,

        // Tibetan
        130 => 132, // sign i
        132 => 131, // sign u

        _ => ccc,
    }
}

pub trait CharExt {
    fn script(self) -> Script;
    fn general_category(self) -> GeneralCategory;
    fn space_fallback(self) -> space::Space;
    fn combining_class(self) -> u8;
    fn modified_combining_class(self) -> u8;
    fn mirrored(self) -> Option<char>;
    fn is_emoji_extended_pictographic(self) -> bool;
    fn is_emoji_modifier(self) -> bool;
    fn is_regional_indicator(self) -> bool;
    fn is_default_ignorable(self) -> bool;
    fn is_hidden(self) -> bool;
    fn is_variation_selector(self) -> bool;
    fn vertical(self) -> Option<char>;
}

impl CharExt for char {
    fn script(self) -> Script {
        script_from_char(self)
    }

    #[inline]
    fn general_category(self) -> GeneralCategory {
        UnicodeGeneralCategory::general_category(self)
    }

    fn space_fallback(self) -> space::Space {
        use space::*;

        // All GC=Zs chars that can use a fallback.
        match self {
            '\u{0020}' => SPACE,             // SPACE
            '\u{00A0}' => SPACE,             // NO-BREAK SPACE
            '\u{2000}' => SPACE_EM_2,        // EN QUAD
            '\u{2001}' => SPACE_EM,          // EM QUAD
            '\u{2002}' => SPACE_EM_2,        // EN SPACE
            '\u{2003}' => SPACE_EM,          // EM SPACE
            '\u{2004}' => SPACE_EM_3,        // THREE-PER-EM SPACE
            '\u{2005}' => SPACE_EM_4,        // FOUR-PER-EM SPACE
            '\u{2006}' => SPACE_EM_6,        // SIX-PER-EM SPACE
            '\u{2007}' => SPACE_FIGURE,      // FIGURE SPACE
            '\u{2008}' => SPACE_PUNCTUATION, // PUNCTUATION SPACE
            '\u{2009}' => SPACE_EM_5,        // THIN SPACE
            '\u{200A}' => SPACE_EM_16,       // HAIR SPACE
            '\u{202F}' => SPACE_NARROW,      // NARROW NO-BREAK SPACE
            '\u{205F}' => SPACE_4_EM_18,     // MEDIUM MATHEMATICAL SPACE
            '\u{3000}' => SPACE_EM,          // IDEOGRAPHIC SPACE
            _ => NOT_SPACE,                  // OGHAM SPACE MARK
        }
    }

    #[inline]
    fn combining_class(self) -> u8 {
        unicode_ccc::get_canonical_combining_class(self) as u8
    }

    fn modified_combining_class(self) -> u8 {
        match self {
            // Sakot goes after any tone marks.
            '\u{1A60}' => 254,
            // Padma goes after any vowel marks.
            '\u{0FC6}' => 254,
            // Tsa-phru goes before U+0F74.
            '\u{0F39}' => 127,
            _ => modify_combining_class(self.combining_class()),
        }
    }

    #[inline]
    fn mirrored(self) -> Option<char> {
        unicode_bidi_mirroring::get_mirrored(self)
    }

    fn is_emoji_extended_pictographic(self) -> bool {
        is_extended_pictographic(self as u32)
    }

    #[inline]
    fn is_emoji_modifier(self) -> bool {
        matches!(self, '\u{1F3FB}'..='\u{1F3FF}')
    }

    #[inline]
    fn is_regional_indicator(self) -> bool {
        matches!(self, '\u{1F1E6}'..='\u{1F1FF}')
    }

    /// Default_Ignorable codepoints.
    ///
    /// U+115F, U+1160, U+3164 and U+FFA0 are Default_Ignorable, but fonts
    /// render them with regular spacing glyphs, so they are not hidden.
    /// U+1BCA0..1BCA3 are excluded as well.
    fn is_default_ignorable(self) -> bool {
        let ch = self as u32;
        let plane = ch >> 16;
        if plane == 0 {
            let page = ch >> 8;
            match page {
                0x00 => ch == 0x00AD,
                0x03 => ch == 0x034F,
                0x06 => ch == 0x061C,
                0x17 => (0x17B4..=0x17B5).contains(&ch),
                0x18 => (0x180B..=0x180F).contains(&ch),
                0x20 => {
                    (0x200B..=0x200F).contains(&ch)
                        || (0x202A..=0x202E).contains(&ch)
                        || (0x2060..=0x206F).contains(&ch)
                }
                0xFE => (0xFE00..=0xFE0F).contains(&ch) || ch == 0xFEFF,
                0xFF => (0xFFF0..=0xFFF8).contains(&ch),
                _ => false,
            }
        } else {
            match plane {
                0x01 => (0x1D173..=0x1D17A).contains(&ch),
                0x0E => (0xE0000..=0xE0FFF).contains(&ch),
                _ => false,
            }
        }
    }

    /// Default ignorables that are never made visible, even when the
    /// buffer preserves them: CGJ, Mongolian variation selectors and tags.
    fn is_hidden(self) -> bool {
        matches!(
            self,
            '\u{034F}' | '\u{180B}'..='\u{180D}' | '\u{180F}' | '\u{E0020}'..='\u{E007F}'
        )
    }

    #[inline]
    fn is_variation_selector(self) -> bool {
        // Mongolian free variation selectors are handled by the Arabic shaper.
        matches!(self, '\u{FE00}'..='\u{FE0F}' | '\u{E0100}'..='\u{E01EF}')
    }

    fn vertical(self) -> Option<char> {
        let u: u32 = match self as u32 {
            0x2013 => 0xFE32, // EN DASH
            0x2014 => 0xFE31, // EM DASH
            0x2025 => 0xFE30, // TWO DOT LEADER
            0x2026 => 0xFE19, // HORIZONTAL ELLIPSIS
            0x3001 => 0xFE11, // IDEOGRAPHIC COMMA
            0x3002 => 0xFE12, // IDEOGRAPHIC FULL STOP
            0x3008 => 0xFE3F, // LEFT ANGLE BRACKET
            0x3009 => 0xFE40, // RIGHT ANGLE BRACKET
            0x300A => 0xFE3D, // LEFT DOUBLE ANGLE BRACKET
            0x300B => 0xFE3E, // RIGHT DOUBLE ANGLE BRACKET
            0x300C => 0xFE41, // LEFT CORNER BRACKET
            0x300D => 0xFE42, // RIGHT CORNER BRACKET
            0x300E => 0xFE43, // LEFT WHITE CORNER BRACKET
            0x300F => 0xFE44, // RIGHT WHITE CORNER BRACKET
            0x3010 => 0xFE3B, // LEFT BLACK LENTICULAR BRACKET
            0x3011 => 0xFE3C, // RIGHT BLACK LENTICULAR BRACKET
            0x3014 => 0xFE39, // LEFT TORTOISE SHELL BRACKET
            0x3015 => 0xFE3A, // RIGHT TORTOISE SHELL BRACKET
            0x3016 => 0xFE17, // LEFT WHITE LENTICULAR BRACKET
            0x3017 => 0xFE18, // RIGHT WHITE LENTICULAR BRACKET
            0xFE4F => 0xFE34, // WAVY LOW LINE
            0xFF01 => 0xFE15, // FULLWIDTH EXCLAMATION MARK
            0xFF08 => 0xFE35, // FULLWIDTH LEFT PARENTHESIS
            0xFF09 => 0xFE36, // FULLWIDTH RIGHT PARENTHESIS
            0xFF0C => 0xFE10, // FULLWIDTH COMMA
            0xFF1A => 0xFE13, // FULLWIDTH COLON
            0xFF1B => 0xFE14, // FULLWIDTH SEMICOLON
            0xFF1F => 0xFE16, // FULLWIDTH QUESTION MARK
            0xFF3B => 0xFE47, // FULLWIDTH LEFT SQUARE BRACKET
            0xFF3D => 0xFE48, // FULLWIDTH RIGHT SQUARE BRACKET
            0xFF3F => 0xFE33, // FULLWIDTH LOW LINE
            0xFF5B => 0xFE37, // FULLWIDTH LEFT CURLY BRACKET
            0xFF5D => 0xFE38, // FULLWIDTH RIGHT CURLY BRACKET
            _ => return None,
        };

        char::from_u32(u)
    }
}

#[rustfmt::skip]
fn is_extended_pictographic(u: u32) -> bool {
    matches!(u,
        0x00A9 | 0x00AE | 0x203C | 0x2049 | 0x2122 | 0x2139 |
        0x2194..=0x2199 | 0x21A9..=0x21AA | 0x231A..=0x231B | 0x2328 | 0x2388 |
        0x23CF | 0x23E9..=0x23F3 | 0x23F8..=0x23FA | 0x24C2 | 0x25AA..=0x25AB |
        0x25B6 | 0x25C0 | 0x25FB..=0x25FE | 0x2600..=0x2605 | 0x2607..=0x2612 |
        0x2614..=0x2685 | 0x2690..=0x2705 | 0x2708..=0x2712 | 0x2714 | 0x2716 |
        0x271D | 0x2721 | 0x2728 | 0x2733..=0x2734 | 0x2744 | 0x2747 | 0x274C |
        0x274E | 0x2753..=0x2755 | 0x2757 | 0x2763..=0x2767 | 0x2795..=0x2797 |
        0x27A1 | 0x27B0 | 0x27BF | 0x2934..=0x2935 | 0x2B05..=0x2B07 |
        0x2B1B..=0x2B1C | 0x2B50 | 0x2B55 | 0x3030 | 0x303D | 0x3297 | 0x3299 |
        0x1F000..=0x1F0FF | 0x1F10D..=0x1F10F | 0x1F12F | 0x1F16C..=0x1F171 |
        0x1F17E..=0x1F17F | 0x1F18E | 0x1F191..=0x1F19A | 0x1F1AD..=0x1F1E5 |
        0x1F201..=0x1F20F | 0x1F21A | 0x1F22F | 0x1F232..=0x1F23A |
        0x1F23C..=0x1F23F | 0x1F249..=0x1F3FA | 0x1F400..=0x1F53D |
        0x1F546..=0x1F64F | 0x1F680..=0x1F6FF | 0x1F774..=0x1F77F |
        0x1F7D5..=0x1F7FF | 0x1F80C..=0x1F80F | 0x1F848..=0x1F84F |
        0x1F85A..=0x1F85F | 0x1F888..=0x1F88F | 0x1F8AE..=0x1F8FF |
        0x1F90C..=0x1F93A | 0x1F93C..=0x1F945 | 0x1F947..=0x1FAFF |
        0x1FC00..=0x1FFFD
    )
}

/// Returns the script of a character.
pub fn script_from_char(c: char) -> Script {
    use unicode_script as us;

    match us::Script::from(c) {
        us::Script::Common => script::COMMON,
        us::Script::Inherited => script::INHERITED,
        us::Script::Adlam => script::ADLAM,
        us::Script::Caucasian_Albanian => script::CAUCASIAN_ALBANIAN,
        us::Script::Ahom => script::AHOM,
        us::Script::Arabic => script::ARABIC,
        us::Script::Imperial_Aramaic => script::IMPERIAL_ARAMAIC,
        us::Script::Armenian => script::ARMENIAN,
        us::Script::Avestan => script::AVESTAN,
        us::Script::Balinese => script::BALINESE,
        us::Script::Bamum => script::BAMUM,
        us::Script::Bassa_Vah => script::BASSA_VAH,
        us::Script::Batak => script::BATAK,
        us::Script::Bengali => script::BENGALI,
        us::Script::Bhaiksuki => script::BHAIKSUKI,
        us::Script::Bopomofo => script::BOPOMOFO,
        us::Script::Brahmi => script::BRAHMI,
        us::Script::Braille => script::BRAILLE,
        us::Script::Buginese => script::BUGINESE,
        us::Script::Buhid => script::BUHID,
        us::Script::Chakma => script::CHAKMA,
        us::Script::Canadian_Aboriginal => script::CANADIAN_SYLLABICS,
        us::Script::Carian => script::CARIAN,
        us::Script::Cham => script::CHAM,
        us::Script::Cherokee => script::CHEROKEE,
        us::Script::Chorasmian => script::CHORASMIAN,
        us::Script::Coptic => script::COPTIC,
        us::Script::Cypro_Minoan => script::CYPRO_MINOAN,
        us::Script::Cypriot => script::CYPRIOT,
        us::Script::Cyrillic => script::CYRILLIC,
        us::Script::Devanagari => script::DEVANAGARI,
        us::Script::Dives_Akuru => script::DIVES_AKURU,
        us::Script::Dogra => script::DOGRA,
        us::Script::Deseret => script::DESERET,
        us::Script::Duployan => script::DUPLOYAN,
        us::Script::Egyptian_Hieroglyphs => script::EGYPTIAN_HIEROGLYPHS,
        us::Script::Elbasan => script::ELBASAN,
        us::Script::Elymaic => script::ELYMAIC,
        us::Script::Ethiopic => script::ETHIOPIC,
        us::Script::Georgian => script::GEORGIAN,
        us::Script::Glagolitic => script::GLAGOLITIC,
        us::Script::Gunjala_Gondi => script::GUNJALA_GONDI,
        us::Script::Masaram_Gondi => script::MASARAM_GONDI,
        us::Script::Gothic => script::GOTHIC,
        us::Script::Grantha => script::GRANTHA,
        us::Script::Greek => script::GREEK,
        us::Script::Gujarati => script::GUJARATI,
        us::Script::Gurmukhi => script::GURMUKHI,
        us::Script::Hangul => script::HANGUL,
        us::Script::Han => script::HAN,
        us::Script::Hanunoo => script::HANUNOO,
        us::Script::Hatran => script::HATRAN,
        us::Script::Hebrew => script::HEBREW,
        us::Script::Hiragana => script::HIRAGANA,
        us::Script::Anatolian_Hieroglyphs => script::ANATOLIAN_HIEROGLYPHS,
        us::Script::Pahawh_Hmong => script::PAHAWH_HMONG,
        us::Script::Nyiakeng_Puachue_Hmong => script::NYIAKENG_PUACHUE_HMONG,
        us::Script::Old_Hungarian => script::OLD_HUNGARIAN,
        us::Script::Old_Italic => script::OLD_ITALIC,
        us::Script::Javanese => script::JAVANESE,
        us::Script::Kayah_Li => script::KAYAH_LI,
        us::Script::Katakana => script::KATAKANA,
        us::Script::Kawi => script::KAWI,
        us::Script::Kharoshthi => script::KHAROSHTHI,
        us::Script::Khmer => script::KHMER,
        us::Script::Khitan_Small_Script => script::KHITAN_SMALL_SCRIPT,
        us::Script::Khojki => script::KHOJKI,
        us::Script::Kannada => script::KANNADA,
        us::Script::Kaithi => script::KAITHI,
        us::Script::Tai_Tham => script::TAI_THAM,
        us::Script::Lao => script::LAO,
        us::Script::Latin => script::LATIN,
        us::Script::Lepcha => script::LEPCHA,
        us::Script::Limbu => script::LIMBU,
        us::Script::Linear_A => script::LINEAR_A,
        us::Script::Linear_B => script::LINEAR_B,
        us::Script::Lisu => script::LISU,
        us::Script::Lycian => script::LYCIAN,
        us::Script::Lydian => script::LYDIAN,
        us::Script::Mahajani => script::MAHAJANI,
        us::Script::Makasar => script::MAKASAR,
        us::Script::Mandaic => script::MANDAIC,
        us::Script::Manichaean => script::MANICHAEAN,
        us::Script::Marchen => script::MARCHEN,
        us::Script::Medefaidrin => script::MEDEFAIDRIN,
        us::Script::Mende_Kikakui => script::MENDE_KIKAKUI,
        us::Script::Meroitic_Cursive => script::MEROITIC_CURSIVE,
        us::Script::Meroitic_Hieroglyphs => script::MEROITIC_HIEROGLYPHS,
        us::Script::Malayalam => script::MALAYALAM,
        us::Script::Modi => script::MODI,
        us::Script::Mongolian => script::MONGOLIAN,
        us::Script::Mro => script::MRO,
        us::Script::Meetei_Mayek => script::MEETEI_MAYEK,
        us::Script::Multani => script::MULTANI,
        us::Script::Myanmar => script::MYANMAR,
        us::Script::Nag_Mundari => script::NAG_MUNDARI,
        us::Script::Nandinagari => script::NANDINAGARI,
        us::Script::Old_North_Arabian => script::OLD_NORTH_ARABIAN,
        us::Script::Nabataean => script::NABATAEAN,
        us::Script::Newa => script::NEWA,
        us::Script::Nko => script::NKO,
        us::Script::Nushu => script::NUSHU,
        us::Script::Ogham => script::OGHAM,
        us::Script::Ol_Chiki => script::OL_CHIKI,
        us::Script::Old_Turkic => script::OLD_TURKIC,
        us::Script::Old_Uyghur => script::OLD_UYGHUR,
        us::Script::Oriya => script::ORIYA,
        us::Script::Osage => script::OSAGE,
        us::Script::Osmanya => script::OSMANYA,
        us::Script::Palmyrene => script::PALMYRENE,
        us::Script::Pau_Cin_Hau => script::PAU_CIN_HAU,
        us::Script::Old_Permic => script::OLD_PERMIC,
        us::Script::Phags_Pa => script::PHAGS_PA,
        us::Script::Inscriptional_Pahlavi => script::INSCRIPTIONAL_PAHLAVI,
        us::Script::Psalter_Pahlavi => script::PSALTER_PAHLAVI,
        us::Script::Phoenician => script::PHOENICIAN,
        us::Script::Miao => script::MIAO,
        us::Script::Inscriptional_Parthian => script::INSCRIPTIONAL_PARTHIAN,
        us::Script::Rejang => script::REJANG,
        us::Script::Hanifi_Rohingya => script::HANIFI_ROHINGYA,
        us::Script::Runic => script::RUNIC,
        us::Script::Samaritan => script::SAMARITAN,
        us::Script::Old_South_Arabian => script::OLD_SOUTH_ARABIAN,
        us::Script::Saurashtra => script::SAURASHTRA,
        us::Script::SignWriting => script::SIGNWRITING,
        us::Script::Shavian => script::SHAVIAN,
        us::Script::Sharada => script::SHARADA,
        us::Script::Siddham => script::SIDDHAM,
        us::Script::Khudawadi => script::KHUDAWADI,
        us::Script::Sinhala => script::SINHALA,
        us::Script::Sogdian => script::SOGDIAN,
        us::Script::Old_Sogdian => script::OLD_SOGDIAN,
        us::Script::Sora_Sompeng => script::SORA_SOMPENG,
        us::Script::Soyombo => script::SOYOMBO,
        us::Script::Sundanese => script::SUNDANESE,
        us::Script::Syloti_Nagri => script::SYLOTI_NAGRI,
        us::Script::Syriac => script::SYRIAC,
        us::Script::Tagbanwa => script::TAGBANWA,
        us::Script::Takri => script::TAKRI,
        us::Script::Tai_Le => script::TAI_LE,
        us::Script::New_Tai_Lue => script::NEW_TAI_LUE,
        us::Script::Tamil => script::TAMIL,
        us::Script::Tangsa => script::TANGSA,
        us::Script::Tangut => script::TANGUT,
        us::Script::Tai_Viet => script::TAI_VIET,
        us::Script::Telugu => script::TELUGU,
        us::Script::Tifinagh => script::TIFINAGH,
        us::Script::Tagalog => script::TAGALOG,
        us::Script::Thaana => script::THAANA,
        us::Script::Thai => script::THAI,
        us::Script::Tibetan => script::TIBETAN,
        us::Script::Tirhuta => script::TIRHUTA,
        us::Script::Toto => script::TOTO,
        us::Script::Ugaritic => script::UGARITIC,
        us::Script::Vai => script::VAI,
        us::Script::Vithkuqi => script::VITHKUQI,
        us::Script::Warang_Citi => script::WARANG_CITI,
        us::Script::Wancho => script::WANCHO,
        us::Script::Old_Persian => script::OLD_PERSIAN,
        us::Script::Cuneiform => script::CUNEIFORM,
        us::Script::Yezidi => script::YEZIDI,
        us::Script::Yi => script::YI,
        us::Script::Zanabazar_Square => script::ZANABAZAR_SQUARE,
        _ => script::UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn general_category_roundtrips_through_packed_code() {
        for c in ['a', 'A', '\u{0301}', '1', ' ', '\u{200D}', '\u{0E31}'] {
            let gc = CharExt::general_category(c);
            assert_eq!(GeneralCategory::from_rb(gc.to_rb()), gc);
        }
    }

    #[test]
    fn modified_classes() {
        // shadda sorts before fatha
        assert!('\u{0651}'.modified_combining_class() < '\u{064E}'.modified_combining_class());
        // Telugu length mark
        assert_eq!('\u{0C55}'.modified_combining_class(), 0);
        assert_eq!('\u{0E38}'.modified_combining_class(), 3);
        assert_eq!('\u{1A60}'.modified_combining_class(), 254);
    }

    #[test]
    fn ignorables() {
        assert!('\u{200D}'.is_default_ignorable());
        assert!('\u{00AD}'.is_default_ignorable());
        assert!(!'\u{115F}'.is_default_ignorable());
        assert!('\u{E0041}'.is_hidden());
        assert!(!'a'.is_default_ignorable());
    }

    #[test]
    fn scripts() {
        assert_eq!('a'.script(), script::LATIN);
        assert_eq!('\u{0628}'.script(), script::ARABIC);
        assert_eq!('\u{0915}'.script(), script::DEVANAGARI);
        assert_eq!(' '.script(), script::COMMON);
    }

    #[test]
    fn vertical_forms() {
        assert_eq!('\u{3001}'.vertical(), Some('\u{FE11}'));
        assert_eq!('a'.vertical(), None);
    }
}
