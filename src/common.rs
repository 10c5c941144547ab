use alloc::string::String;
use core::ops::{Bound, RangeBounds};

use crate::text_parser::TextParser;
use crate::Tag;

/// Defines the direction in which text is to be read.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default)]
pub enum Direction {
    /// Initial, unset direction.
    #[default]
    Invalid,
    /// Text is set horizontally from left to right.
    LeftToRight,
    /// Text is set horizontally from right to left.
    RightToLeft,
    /// Text is set vertically from top to bottom.
    TopToBottom,
    /// Text is set vertically from bottom to top.
    BottomToTop,
}

impl Direction {
    #[inline]
    pub(crate) fn is_horizontal(self) -> bool {
        matches!(self, Direction::LeftToRight | Direction::RightToLeft)
    }

    #[inline]
    pub(crate) fn is_vertical(self) -> bool {
        matches!(self, Direction::TopToBottom | Direction::BottomToTop)
    }

    #[inline]
    pub(crate) fn is_forward(self) -> bool {
        matches!(self, Direction::LeftToRight | Direction::TopToBottom)
    }

    #[inline]
    pub(crate) fn is_backward(self) -> bool {
        matches!(self, Direction::RightToLeft | Direction::BottomToTop)
    }

    #[inline]
    pub(crate) fn reverse(self) -> Self {
        match self {
            Direction::LeftToRight => Direction::RightToLeft,
            Direction::RightToLeft => Direction::LeftToRight,
            Direction::TopToBottom => Direction::BottomToTop,
            Direction::BottomToTop => Direction::TopToBottom,
            Direction::Invalid => Direction::Invalid,
        }
    }

    /// Returns the horizontal direction a script is natively written in.
    ///
    /// Scripts that can be written in either direction return `None`.
    pub(crate) fn from_script(script: Script) -> Option<Self> {
        if RIGHT_TO_LEFT_SCRIPTS.contains(&script) {
            Some(Direction::RightToLeft)
        } else if BIDIRECTIONAL_SCRIPTS.contains(&script) {
            None
        } else {
            Some(Direction::LeftToRight)
        }
    }
}

const RIGHT_TO_LEFT_SCRIPTS: &[Script] = &[
    script::ADLAM,
    script::ARABIC,
    script::AVESTAN,
    script::CHORASMIAN,
    script::CYPRIOT,
    script::ELYMAIC,
    script::HANIFI_ROHINGYA,
    script::HATRAN,
    script::HEBREW,
    script::IMPERIAL_ARAMAIC,
    script::INSCRIPTIONAL_PAHLAVI,
    script::INSCRIPTIONAL_PARTHIAN,
    script::KHAROSHTHI,
    script::LYDIAN,
    script::MANDAIC,
    script::MANICHAEAN,
    script::MENDE_KIKAKUI,
    script::MEROITIC_CURSIVE,
    script::MEROITIC_HIEROGLYPHS,
    script::NABATAEAN,
    script::NKO,
    script::OLD_NORTH_ARABIAN,
    script::OLD_SOGDIAN,
    script::OLD_SOUTH_ARABIAN,
    script::OLD_TURKIC,
    script::OLD_UYGHUR,
    script::PALMYRENE,
    script::PHOENICIAN,
    script::PSALTER_PAHLAVI,
    script::SAMARITAN,
    script::SOGDIAN,
    script::SYRIAC,
    script::THAANA,
    script::YEZIDI,
];

/// Historic scripts found written either way.
const BIDIRECTIONAL_SCRIPTS: &[Script] = &[script::OLD_HUNGARIAN, script::OLD_ITALIC, script::RUNIC];

impl core::str::FromStr for Direction {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Only the first letter matters, like in `hb-shape`.
        match s.as_bytes().first().map(|c| c.to_ascii_lowercase()) {
            Some(b'l') => Ok(Direction::LeftToRight),
            Some(b'r') => Ok(Direction::RightToLeft),
            Some(b't') => Ok(Direction::TopToBottom),
            Some(b'b') => Ok(Direction::BottomToTop),
            _ => Err("invalid direction"),
        }
    }
}

/// A text language.
///
/// Stored as a lowercase BCP 47 tag, e.g. `en-us` or `zh-hant-hk`.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Language(String);

impl Language {
    /// Returns the language as a string.
    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the primary subtag, e.g. `zh` for `zh-Hant`.
    pub(crate) fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or("")
    }
}

impl core::str::FromStr for Language {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err("invalid language");
        }

        let canonical = s
            .chars()
            .map(|c| if c == '_' { '-' } else { c.to_ascii_lowercase() })
            .collect();
        Ok(Language(canonical))
    }
}

impl core::fmt::Display for Language {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A text script.
///
/// A script can be any four letter tag, not only the
/// ones listed in [`script`].
#[allow(missing_docs)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Script(pub(crate) Tag);

impl Script {
    #[inline]
    pub(crate) const fn from_bytes(bytes: &[u8; 4]) -> Self {
        Script(Tag::from_bytes(bytes))
    }

    /// Converts an ISO 15924 script tag to a corresponding `Script`.
    pub fn from_iso15924_tag(tag: Tag) -> Option<Script> {
        if tag.is_null() {
            return None;
        }

        // One capital letter followed by three small ones.
        let tag = Tag((tag.as_u32() & 0xDFDFDFDF) | 0x00202020);
        let code = tag.to_bytes();

        if let Some(&(_, script)) = SCRIPT_ALIASES.iter().find(|(alias, _)| **alias == code) {
            return Some(script);
        }

        // Anything else that looks like a code is kept as is.
        let is_code = tag.as_u32() & 0xE0E0E0E0 == 0x40606060;
        Some(if is_code { Script(tag) } else { script::UNKNOWN })
    }

    /// Returns script's tag.
    #[inline]
    pub fn tag(&self) -> Tag {
        self.0
    }
}

/// Old private-use codes still in use, and script variants, with the
/// script they stand for.
const SCRIPT_ALIASES: &[(&[u8; 4], Script)] = &[
    (b"Qaai", script::INHERITED),
    (b"Qaac", script::COPTIC),
    (b"Aran", script::ARABIC),
    (b"Cyrs", script::CYRILLIC),
    (b"Geok", script::GEORGIAN),
    (b"Hans", script::HAN),
    (b"Hant", script::HAN),
    (b"Jamo", script::HANGUL),
    (b"Latf", script::LATIN),
    (b"Latg", script::LATIN),
    (b"Syre", script::SYRIAC),
    (b"Syrj", script::SYRIAC),
    (b"Syrn", script::SYRIAC),
];

impl core::str::FromStr for Script {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = Tag::from_bytes_lossy(s.as_bytes());
        Script::from_iso15924_tag(tag).ok_or("invalid script")
    }
}

/// A feature tag with an accompanying range specifying on which subslice of
/// `shape`s input it should be applied.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Feature {
    /// The tag of the feature.
    pub tag: Tag,
    /// The value of the feature. 0 disables it, 1 enables it and larger
    /// values select an alternate.
    pub value: u32,
    /// The cluster to start applying this feature setting (inclusive).
    pub start: u32,
    /// The cluster to end applying this feature setting (exclusive).
    pub end: u32,
}

impl Feature {
    /// Create a new `Feature` struct.
    pub fn new(tag: Tag, value: u32, range: impl RangeBounds<usize>) -> Feature {
        let start = match range.start_bound() {
            Bound::Included(&included) => included as u32,
            Bound::Excluded(&excluded) => excluded as u32 + 1,
            Bound::Unbounded => 0,
        };

        let end = match range.end_bound() {
            Bound::Included(&included) => included as u32 + 1,
            Bound::Excluded(&excluded) => excluded as u32,
            Bound::Unbounded => u32::MAX,
        };

        Feature {
            tag,
            value,
            start,
            end,
        }
    }

    /// Checks that the feature covers the whole buffer.
    #[inline]
    pub fn is_global(&self) -> bool {
        self.start == 0 && self.end == u32::MAX
    }
}

impl core::str::FromStr for Feature {
    type Err = &'static str;

    /// Parses a `Feature` from a string.
    ///
    /// Possible values:
    ///
    /// - `kern` -> kern .. 1
    /// - `+kern` -> kern .. 1
    /// - `-kern` -> kern .. 0
    /// - `kern=0` -> kern .. 0
    /// - `kern=1` -> kern .. 1
    /// - `aalt=2` -> altr .. 2
    /// - `kern[]` -> kern .. 1
    /// - `kern[:]` -> kern .. 1
    /// - `kern[5:]` -> kern 5.. 1
    /// - `kern[:5]` -> kern ..=5 1
    /// - `kern[3:5]` -> kern 3..=5 1
    /// - `kern[3]` -> kern 3..=4 1
    /// - `aalt[3:5]=2` -> kern 3..=5 1
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_feature(s).ok_or("invalid feature")
    }
}

fn parse_feature(s: &str) -> Option<Feature> {
    let mut p = TextParser::new(s);

    let value = match p.curr_byte()? {
        b'-' => {
            p.advance(1);
            0
        }
        b'+' => {
            p.advance(1);
            1
        }
        _ => 1,
    };

    let tag = p.consume_tag()?;
    let (start, end) = match p.consume_byte(b'[') {
        Some(()) => parse_cluster_range(&mut p)?,
        None => (0, u32::MAX),
    };

    let has_equal = p.consume_byte(b'=').is_some();
    let explicit = p
        .consume_i32()
        .or_else(|| p.consume_bool().map(i32::from));
    if has_equal && explicit.is_none() {
        return None;
    }

    p.skip_spaces();
    if !p.at_end() {
        return None;
    }

    // Negative values wrap around.
    let value = explicit.map_or(value, |v| v as u32);
    Some(Feature {
        tag,
        value,
        start,
        end,
    })
}

/// Parses `start:end]`, `start]` or `]` after an opening bracket. Either
/// bound may be left out and negative numbers wrap around.
fn parse_cluster_range(p: &mut TextParser) -> Option<(u32, u32)> {
    let start = p.consume_i32().map(|v| v as u32);
    let end = if matches!(p.curr_byte(), Some(b':' | b';')) {
        p.advance(1);
        p.consume_i32().map_or(u32::MAX, |v| v as u32)
    } else {
        // A single index covers one cluster.
        match start {
            Some(start) if start != u32::MAX => start + 1,
            _ => u32::MAX,
        }
    };

    p.consume_byte(b']')?;
    Some((start.unwrap_or(0), end))
}

/// A font variation value.
#[repr(C)]
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Variation {
    /// The tag of the variation axis.
    pub tag: Tag,
    /// The value of the variation axis, in design units.
    pub value: f32,
}

impl core::str::FromStr for Variation {
    type Err = &'static str;

    /// Parses `wght=500` or `wght 500`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut p = TextParser::new(s);
        let variation = p.consume_tag().and_then(|tag| {
            p.consume_byte(b'=');
            let value = p.consume_f32()?;
            p.skip_spaces();
            p.at_end().then_some(Variation { tag, value })
        });

        variation.ok_or("invalid variation")
    }
}

/// Declares each script as a constant with its ISO 15924 code.
macro_rules! scripts {
    ($($name:ident = $code:literal,)*) => {
        $(pub const $name: Script = Script::from_bytes($code);)*
    };
}

/// Predefined scripts.
pub mod script {
    #![allow(missing_docs)]

    use crate::Script;

    scripts! {
        // Unicode 1.1
        COMMON = b"Zyyy",
        INHERITED = b"Zinh",
        ARABIC = b"Arab",
        ARMENIAN = b"Armn",
        BENGALI = b"Beng",
        CYRILLIC = b"Cyrl",
        DEVANAGARI = b"Deva",
        GEORGIAN = b"Geor",
        GREEK = b"Grek",
        GUJARATI = b"Gujr",
        GURMUKHI = b"Guru",
        HANGUL = b"Hang",
        HAN = b"Hani",
        HEBREW = b"Hebr",
        HIRAGANA = b"Hira",
        KANNADA = b"Knda",
        KATAKANA = b"Kana",
        LAO = b"Laoo",
        LATIN = b"Latn",
        MALAYALAM = b"Mlym",
        ORIYA = b"Orya",
        TAMIL = b"Taml",
        TELUGU = b"Telu",
        THAI = b"Thai",
        // Unicode 2.0
        TIBETAN = b"Tibt",
        // Unicode 3.0
        BOPOMOFO = b"Bopo",
        BRAILLE = b"Brai",
        CANADIAN_SYLLABICS = b"Cans",
        CHEROKEE = b"Cher",
        ETHIOPIC = b"Ethi",
        KHMER = b"Khmr",
        MONGOLIAN = b"Mong",
        MYANMAR = b"Mymr",
        OGHAM = b"Ogam",
        RUNIC = b"Runr",
        SINHALA = b"Sinh",
        SYRIAC = b"Syrc",
        THAANA = b"Thaa",
        YI = b"Yiii",
        // Unicode 3.1
        DESERET = b"Dsrt",
        GOTHIC = b"Goth",
        OLD_ITALIC = b"Ital",
        // Unicode 3.2
        BUHID = b"Buhd",
        HANUNOO = b"Hano",
        TAGALOG = b"Tglg",
        TAGBANWA = b"Tagb",
        // Unicode 4.0
        CYPRIOT = b"Cprt",
        LIMBU = b"Limb",
        LINEAR_B = b"Linb",
        OSMANYA = b"Osma",
        SHAVIAN = b"Shaw",
        TAI_LE = b"Tale",
        UGARITIC = b"Ugar",
        // Unicode 4.1
        BUGINESE = b"Bugi",
        COPTIC = b"Copt",
        GLAGOLITIC = b"Glag",
        KHAROSHTHI = b"Khar",
        NEW_TAI_LUE = b"Talu",
        OLD_PERSIAN = b"Xpeo",
        SYLOTI_NAGRI = b"Sylo",
        TIFINAGH = b"Tfng",
        // Unicode 5.0
        UNKNOWN = b"Zzzz",
        BALINESE = b"Bali",
        CUNEIFORM = b"Xsux",
        NKO = b"Nkoo",
        PHAGS_PA = b"Phag",
        PHOENICIAN = b"Phnx",
        // Unicode 5.1
        CARIAN = b"Cari",
        CHAM = b"Cham",
        KAYAH_LI = b"Kali",
        LEPCHA = b"Lepc",
        LYCIAN = b"Lyci",
        LYDIAN = b"Lydi",
        OL_CHIKI = b"Olck",
        REJANG = b"Rjng",
        SAURASHTRA = b"Saur",
        SUNDANESE = b"Sund",
        VAI = b"Vaii",
        // Unicode 5.2
        AVESTAN = b"Avst",
        BAMUM = b"Bamu",
        EGYPTIAN_HIEROGLYPHS = b"Egyp",
        IMPERIAL_ARAMAIC = b"Armi",
        INSCRIPTIONAL_PAHLAVI = b"Phli",
        INSCRIPTIONAL_PARTHIAN = b"Prti",
        JAVANESE = b"Java",
        KAITHI = b"Kthi",
        LISU = b"Lisu",
        MEETEI_MAYEK = b"Mtei",
        OLD_SOUTH_ARABIAN = b"Sarb",
        OLD_TURKIC = b"Orkh",
        SAMARITAN = b"Samr",
        TAI_THAM = b"Lana",
        TAI_VIET = b"Tavt",
        // Unicode 6.0
        BATAK = b"Batk",
        BRAHMI = b"Brah",
        MANDAIC = b"Mand",
        // Unicode 6.1
        CHAKMA = b"Cakm",
        MEROITIC_CURSIVE = b"Merc",
        MEROITIC_HIEROGLYPHS = b"Mero",
        MIAO = b"Plrd",
        SHARADA = b"Shrd",
        SORA_SOMPENG = b"Sora",
        TAKRI = b"Takr",
        // Unicode 7.0
        BASSA_VAH = b"Bass",
        CAUCASIAN_ALBANIAN = b"Aghb",
        DUPLOYAN = b"Dupl",
        ELBASAN = b"Elba",
        GRANTHA = b"Gran",
        KHOJKI = b"Khoj",
        KHUDAWADI = b"Sind",
        LINEAR_A = b"Lina",
        MAHAJANI = b"Mahj",
        MANICHAEAN = b"Mani",
        MENDE_KIKAKUI = b"Mend",
        MODI = b"Modi",
        MRO = b"Mroo",
        NABATAEAN = b"Nbat",
        OLD_NORTH_ARABIAN = b"Narb",
        OLD_PERMIC = b"Perm",
        PAHAWH_HMONG = b"Hmng",
        PALMYRENE = b"Palm",
        PAU_CIN_HAU = b"Pauc",
        PSALTER_PAHLAVI = b"Phlp",
        SIDDHAM = b"Sidd",
        TIRHUTA = b"Tirh",
        WARANG_CITI = b"Wara",
        // Unicode 8.0
        AHOM = b"Ahom",
        ANATOLIAN_HIEROGLYPHS = b"Hluw",
        HATRAN = b"Hatr",
        MULTANI = b"Mult",
        OLD_HUNGARIAN = b"Hung",
        SIGNWRITING = b"Sgnw",
        // Unicode 9.0
        ADLAM = b"Adlm",
        BHAIKSUKI = b"Bhks",
        MARCHEN = b"Marc",
        OSAGE = b"Osge",
        TANGUT = b"Tang",
        NEWA = b"Newa",
        // Unicode 10.0
        MASARAM_GONDI = b"Gonm",
        NUSHU = b"Nshu",
        SOYOMBO = b"Soyo",
        ZANABAZAR_SQUARE = b"Zanb",
        // Unicode 11.0
        DOGRA = b"Dogr",
        GUNJALA_GONDI = b"Gong",
        HANIFI_ROHINGYA = b"Rohg",
        MAKASAR = b"Maka",
        MEDEFAIDRIN = b"Medf",
        OLD_SOGDIAN = b"Sogo",
        SOGDIAN = b"Sogd",
        // Unicode 12.0
        ELYMAIC = b"Elym",
        NANDINAGARI = b"Nand",
        NYIAKENG_PUACHUE_HMONG = b"Hmnp",
        WANCHO = b"Wcho",
        // Unicode 13.0
        CHORASMIAN = b"Chrs",
        DIVES_AKURU = b"Diak",
        KHITAN_SMALL_SCRIPT = b"Kits",
        YEZIDI = b"Yezi",
        // Unicode 14.0
        CYPRO_MINOAN = b"Cpmn",
        OLD_UYGHUR = b"Ougr",
        TANGSA = b"Tnsa",
        TOTO = b"Toto",
        VITHKUQI = b"Vith",
        // Unicode 15.0
        KAWI = b"Kawi",
        NAG_MUNDARI = b"Nagm",

        SCRIPT_MATH = b"Zmth",

        // https://github.com/harfbuzz/harfbuzz/issues/1162
        MYANMAR_ZAWGYI = b"Qaag",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    macro_rules! test_feature {
        ($name:ident, $text:expr, $tag:expr, $value:expr, $range:expr) => {
            #[test]
            fn $name() {
                assert_eq!(
                    Feature::from_str($text).unwrap(),
                    Feature::new(Tag::from_bytes($tag), $value, $range)
                );
            }
        };
    }

    test_feature!(parse_feature_1, "kern", b"kern", 1, ..);
    test_feature!(parse_feature_2, "+kern", b"kern", 1, ..);
    test_feature!(parse_feature_3, "-kern", b"kern", 0, ..);
    test_feature!(parse_feature_4, "kern=0", b"kern", 0, ..);
    test_feature!(parse_feature_5, "kern=1", b"kern", 1, ..);
    test_feature!(parse_feature_6, "kern=2", b"kern", 2, ..);
    test_feature!(parse_feature_7, "kern[]", b"kern", 1, ..);
    test_feature!(parse_feature_8, "kern[:]", b"kern", 1, ..);
    test_feature!(parse_feature_9, "kern[5:]", b"kern", 1, 5..);
    test_feature!(parse_feature_10, "kern[:5]", b"kern", 1, ..=4);
    test_feature!(parse_feature_11, "kern[3:5]", b"kern", 1, 3..=4);
    test_feature!(parse_feature_12, "kern[3]", b"kern", 1, 3..=3);
    test_feature!(parse_feature_13, "kern[3:5]=2", b"kern", 2, 3..=4);
    test_feature!(parse_feature_14, "kern=on", b"kern", 1, ..);
    test_feature!(parse_feature_15, "kern=off", b"kern", 0, ..);
    test_feature!(parse_feature_16, "'kern'", b"kern", 1, ..);

    #[test]
    fn parse_feature_errors() {
        assert!(Feature::from_str("").is_err());
        assert!(Feature::from_str("kern=").is_err());
        assert!(Feature::from_str("kern[3:5").is_err());
        assert!(Feature::from_str("abcdefg").is_err());
    }

    #[test]
    fn parse_variation() {
        let v = Variation::from_str("wght=500").unwrap();
        assert_eq!(v.tag, Tag::from_bytes(b"wght"));
        assert_eq!(v.value, 500.0);

        let v = Variation::from_str("wdth 75.5").unwrap();
        assert_eq!(v.value, 75.5);

        assert!(Variation::from_str("wght=").is_err());
    }

    #[test]
    fn parse_script() {
        assert_eq!(Script::from_str("arab"), Ok(script::ARABIC));
        assert_eq!(Script::from_str("LATN"), Ok(script::LATIN));
        assert_eq!(Script::from_str("Qaai"), Ok(script::INHERITED));
        assert_eq!(Script::from_str("Syrj"), Ok(script::SYRIAC));
        assert_eq!(Script::from_str("1234"), Ok(script::UNKNOWN));
    }

    #[test]
    fn parse_language() {
        let lang = Language::from_str("zh_Hant_HK").unwrap();
        assert_eq!(lang.as_str(), "zh-hant-hk");
        assert_eq!(lang.primary(), "zh");
        assert!(Language::from_str("").is_err());
    }

    #[test]
    fn script_direction() {
        assert_eq!(Direction::from_script(script::ARABIC), Some(Direction::RightToLeft));
        assert_eq!(Direction::from_script(script::LATIN), Some(Direction::LeftToRight));
        assert_eq!(Direction::from_script(script::OLD_ITALIC), None);
        assert_eq!(Direction::RightToLeft.reverse(), Direction::LeftToRight);
        assert!(Direction::BottomToTop.is_backward());
    }
}
