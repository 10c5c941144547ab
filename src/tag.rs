//! Mapping of scripts and BCP 47 languages to OpenType tags.

use smallvec::SmallVec;

use crate::common::{script, Language, Script};
use crate::tag_table::LANGUAGES;
use crate::Tag;

/// The OpenType script tag used when a font has no script-specific entry.
pub const DEFAULT_SCRIPT: Tag = Tag::from_bytes(b"DFLT");
/// The OpenType language system tag used when no language matches.
pub const DEFAULT_LANGUAGE: Tag = Tag::from_bytes(b"dflt");

/// OpenType script tags, most preferred first.
pub type ScriptTags = SmallVec<[Tag; 3]>;
/// OpenType language system tags, most preferred first.
pub type LanguageTags = SmallVec<[Tag; 3]>;

/// Converts a script and a language to OpenType script and language tags,
/// most preferred first.
///
/// A private use subtag of the form `x-hbscXXXX` or `x-hbotXXXX` forces the
/// script or language tag respectively.
pub fn tags_from_script_and_language(
    script: Option<Script>,
    language: Option<&Language>,
) -> (ScriptTags, LanguageTags) {
    let mut script_tags = ScriptTags::new();
    let mut language_tags = LanguageTags::new();
    let mut needs_script = true;
    let mut needs_language = true;

    if let Some(language) = language {
        let lang = language.as_str();
        let (limit, private_use) = split_private_use(lang);

        if let Some(private_use) = private_use {
            if let Some(tag) = parse_private_use_subtag(private_use, "-hbsc", u8::to_ascii_lowercase)
            {
                script_tags.push(tag);
                needs_script = false;
            }

            if let Some(tag) = parse_private_use_subtag(private_use, "-hbot", u8::to_ascii_uppercase)
            {
                language_tags.push(tag);
                needs_language = false;
            }
        }

        if needs_language {
            tags_from_language(lang, limit, &mut language_tags);
        }
    }

    if needs_script {
        if let Some(script) = script {
            all_tags_from_script(script, &mut script_tags);
        }
    }

    (script_tags, language_tags)
}

/// Returns the end of the public part of `lang` and the private use part,
/// if any.
fn split_private_use(lang: &str) -> (usize, Option<&str>) {
    let bytes = lang.as_bytes();
    if bytes.starts_with(b"x-") {
        return (0, Some(lang));
    }

    let mut limit = bytes.len();
    let mut private_use = None;
    for s in 1..bytes.len() {
        if bytes[s - 1] == b'-' && bytes.get(s + 1) == Some(&b'-') {
            if bytes[s] == b'x' {
                private_use = Some(&lang[s..]);
                if limit == bytes.len() {
                    limit = s - 1;
                }
                break;
            } else if limit == bytes.len() {
                limit = s - 1;
            }
        }
    }

    (limit, private_use)
}

fn parse_private_use_subtag(
    private_use: &str,
    prefix: &str,
    normalize: fn(&u8) -> u8,
) -> Option<Tag> {
    let start = private_use.find(prefix)? + prefix.len();
    let rest = private_use[start..].as_bytes();

    let mut tag = [0u8; 4];
    if rest.first() == Some(&b'-') {
        let hex = rest.get(1..9)?;
        for (i, pair) in hex.chunks(2).enumerate() {
            let hi = (pair[0] as char).to_digit(16)?;
            let lo = (pair[1] as char).to_digit(16)?;
            tag[i] = (hi * 16 + lo) as u8;
        }
    } else {
        let len = rest
            .iter()
            .take(4)
            .take_while(|c| c.is_ascii_alphanumeric())
            .count();
        if len == 0 {
            return None;
        }

        tag = [b' '; 4];
        for (dst, src) in tag.iter_mut().zip(&rest[..len]) {
            *dst = normalize(src);
        }
    }

    let mut tag = Tag::from_bytes(&tag);
    // Keep a forced tag distinct from the default one.
    if tag.0 & 0xDFDF_DFDF == DEFAULT_SCRIPT.0 {
        tag = Tag(tag.0 ^ !0xDFDF_DFDF);
    }

    Some(tag)
}

fn all_tags_from_script(script: Script, tags: &mut ScriptTags) {
    if let Some(tag) = new_tag_from_script(script) {
        // Myanmar never got a third-generation tag.
        if tag != Tag::from_bytes(b"mym2") {
            let mut bytes = tag.to_bytes();
            bytes[3] = b'3';
            tags.push(Tag::from_bytes(&bytes));
        }

        tags.push(tag);
    }

    tags.push(old_tag_from_script(script));
}

fn old_tag_from_script(script: Script) -> Tag {
    match script {
        // Both kana scripts share one tag.
        script::HIRAGANA | script::KATAKANA => Tag::from_bytes(b"kana"),

        // Tags whose ISO code repeats a letter end in spaces instead.
        script::LAO => Tag::from_bytes(b"lao "),
        script::YI => Tag::from_bytes(b"yi  "),
        script::NKO => Tag::from_bytes(b"nko "),
        script::VAI => Tag::from_bytes(b"vai "),

        _ => Tag(script.tag().0 | 0x2000_0000),
    }
}

fn new_tag_from_script(script: Script) -> Option<Tag> {
    let tag = match script {
        script::BENGALI => b"bng2",
        script::DEVANAGARI => b"dev2",
        script::GUJARATI => b"gjr2",
        script::GURMUKHI => b"gur2",
        script::KANNADA => b"knd2",
        script::MALAYALAM => b"mlm2",
        script::ORIYA => b"ory2",
        script::TAMIL => b"tml2",
        script::TELUGU => b"tel2",
        script::MYANMAR => b"mym2",
        _ => return None,
    };

    Some(Tag::from_bytes(tag))
}

fn tags_from_language(lang: &str, limit: usize, tags: &mut LanguageTags) {
    if tags_from_complex_language(lang, limit, tags) {
        return;
    }

    let public = &lang[..limit];
    let primary_len = public
        .bytes()
        .position(|c| !c.is_ascii_alphanumeric())
        .unwrap_or(public.len());
    let mut primary = &public[..primary_len];

    // An extended language subtag replaces the macrolanguage.
    if public.as_bytes().get(primary_len) == Some(&b'-') {
        let rest = &public[primary_len + 1..];
        let extlang = rest.split('-').next().unwrap_or("");
        if extlang.len() == 3 && extlang.bytes().all(|c| c.is_ascii_alphabetic()) {
            primary = extlang;
        }
    }

    let first = LANGUAGES.partition_point(|(l, _)| *l < primary);
    let found = LANGUAGES[first..]
        .iter()
        .take_while(|(l, _)| *l == primary)
        .map(|(_, tag)| *tag);
    let before = tags.len();
    tags.extend(found);
    if tags.len() != before {
        return;
    }

    if primary.len() == 3 {
        let mut bytes = [b' '; 4];
        for (dst, src) in bytes.iter_mut().zip(primary.bytes()) {
            *dst = src.to_ascii_uppercase();
        }
        tags.push(Tag::from_bytes(&bytes));
    }
}

/// Checks that `subtag` (with its leading dash) occurs in `lang` before
/// `limit` as a whole subtag.
fn subtag_matches(lang: &str, limit: usize, subtag: &str) -> bool {
    let public = &lang[..limit];
    let mut from = 0;
    while let Some(pos) = public[from..].find(subtag) {
        let end = from + pos + subtag.len();
        match public.as_bytes().get(end) {
            Some(c) if c.is_ascii_alphanumeric() => from = end,
            _ => return true,
        }
    }

    false
}

fn lang_matches(lang: &str, spec: &str) -> bool {
    lang.starts_with(spec)
        && matches!(lang.as_bytes().get(spec.len()), None | Some(b'-'))
}

fn tags_from_complex_language(lang: &str, limit: usize, tags: &mut LanguageTags) -> bool {
    let tag = if subtag_matches(lang, limit, "-fonipa") {
        b"IPPH"
    } else if subtag_matches(lang, limit, "-fonnapa") {
        b"APPH"
    } else if subtag_matches(lang, limit, "-geok") {
        b"KGE "
    } else if subtag_matches(lang, limit, "-syre") {
        b"SYRE"
    } else if subtag_matches(lang, limit, "-syrj") {
        b"SYRJ"
    } else if subtag_matches(lang, limit, "-syrn") {
        b"SYRN"
    } else if lang_matches(lang, "ga") && subtag_matches(lang, limit, "-latg") {
        b"IRT "
    } else if lang_matches(lang, "el") && subtag_matches(lang, limit, "-polyton") {
        b"PGR "
    } else if lang_matches(lang, "ro") && subtag_matches(lang, limit, "-md") {
        b"MOL "
    } else if lang_matches(lang, "art-lojban") {
        b"JBO "
    } else if lang_matches(lang, "zh") {
        if subtag_matches(lang, limit, "-hans") {
            b"ZHS "
        } else if subtag_matches(lang, limit, "-hk") {
            b"ZHH "
        } else if subtag_matches(lang, limit, "-mo") {
            b"ZHTM"
        } else if subtag_matches(lang, limit, "-tw") || subtag_matches(lang, limit, "-hant") {
            b"ZHT "
        } else {
            b"ZHS "
        }
    } else if lang_matches(lang, "yue") && subtag_matches(lang, limit, "-hans") {
        b"ZHS "
    } else {
        return false;
    };

    tags.push(Tag::from_bytes(tag));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    fn lang_tags(lang: &str) -> LanguageTags {
        let lang = Language::from_str(lang).unwrap();
        tags_from_script_and_language(None, Some(&lang)).1
    }

    fn first_lang_tag(lang: &str) -> Tag {
        lang_tags(lang).first().copied().unwrap_or(DEFAULT_LANGUAGE)
    }

    fn tag(s: &[u8; 4]) -> Tag {
        Tag::from_bytes(s)
    }

    #[test]
    fn old_script_tags() {
        let (tags, _) = tags_from_script_and_language(Some(script::LATIN), None);
        assert_eq!(tags.as_slice(), &[tag(b"latn")]);

        let (tags, _) = tags_from_script_and_language(Some(script::HIRAGANA), None);
        assert_eq!(tags.as_slice(), &[tag(b"kana")]);

        let (tags, _) = tags_from_script_and_language(Some(script::LAO), None);
        assert_eq!(tags.as_slice(), &[tag(b"lao ")]);

        let (tags, _) = tags_from_script_and_language(Some(script::COMMON), None);
        assert_eq!(tags.as_slice(), &[tag(b"zyyy")]);
    }

    #[test]
    fn indic_script_tags() {
        let (tags, _) = tags_from_script_and_language(Some(script::DEVANAGARI), None);
        assert_eq!(tags.as_slice(), &[tag(b"dev3"), tag(b"dev2"), tag(b"deva")]);

        let (tags, _) = tags_from_script_and_language(Some(script::MYANMAR), None);
        assert_eq!(tags.as_slice(), &[tag(b"mym2"), tag(b"mymr")]);
    }

    #[test]
    fn no_script() {
        let (tags, _) = tags_from_script_and_language(None, None);
        assert!(tags.is_empty());
    }

    #[test]
    fn simple_languages() {
        assert_eq!(first_lang_tag("en"), tag(b"ENG "));
        assert_eq!(first_lang_tag("en_US"), tag(b"ENG "));
        assert_eq!(first_lang_tag("ar"), tag(b"ARA "));
        assert_eq!(first_lang_tag("fa"), tag(b"FAR "));
        assert_eq!(first_lang_tag("az"), tag(b"AZE "));
        assert_eq!(first_lang_tag("alt"), tag(b"ALT "));
        assert_eq!(first_lang_tag("eve"), tag(b"EVN "));
        assert_eq!(first_lang_tag("cfm"), tag(b"HAL "));
        assert_eq!(first_lang_tag("flm"), tag(b"HAL "));
        assert_eq!(first_lang_tag("man"), tag(b"MNK "));
        assert_eq!(first_lang_tag("tru"), tag(b"TUA "));
        assert_eq!(first_lang_tag("als"), tag(b"SQI "));
        assert_eq!(first_lang_tag("hy"), tag(b"HYE0"));
        assert_eq!(first_lang_tag("hyw"), tag(b"HYE "));
        assert_eq!(first_lang_tag("tr@foo=bar"), tag(b"TRK "));
    }

    #[test]
    fn multiple_language_tags() {
        assert_eq!(lang_tags("ml").as_slice(), &[tag(b"MAL "), tag(b"MLR ")]);
        assert_eq!(lang_tags("aii").as_slice(), &[tag(b"SWA "), tag(b"SYR ")]);

        let lang = Language::from_str("ml").unwrap();
        let (scripts, langs) = tags_from_script_and_language(Some(script::MALAYALAM), Some(&lang));
        assert_eq!(scripts.as_slice(), &[tag(b"mlm3"), tag(b"mlm2"), tag(b"mlym")]);
        assert_eq!(langs.as_slice(), &[tag(b"MAL "), tag(b"MLR ")]);
    }

    #[test]
    fn unknown_languages() {
        assert_eq!(first_lang_tag("xyz"), tag(b"XYZ "));
        assert_eq!(first_lang_tag("und"), tag(b"UND "));
        assert_eq!(first_lang_tag("xy"), DEFAULT_LANGUAGE);
        assert_eq!(first_lang_tag("asdf-asdf-wer-x-hbot"), DEFAULT_LANGUAGE);
    }

    #[test]
    fn extended_language_subtag() {
        assert_eq!(first_lang_tag("ar-aao"), tag(b"ARA "));
        assert_eq!(first_lang_tag("ar-001"), tag(b"ARA "));
    }

    #[test]
    fn chinese() {
        assert_eq!(first_lang_tag("zh"), tag(b"ZHS "));
        assert_eq!(first_lang_tag("zh-cn"), tag(b"ZHS "));
        assert_eq!(first_lang_tag("zh-hk"), tag(b"ZHH "));
        assert_eq!(first_lang_tag("zh-hant-hk"), tag(b"ZHH "));
        assert_eq!(first_lang_tag("zh-mo"), tag(b"ZHTM"));
        assert_eq!(first_lang_tag("zh-hant-mo"), tag(b"ZHTM"));
        assert_eq!(first_lang_tag("zh-tw"), tag(b"ZHT "));
        assert_eq!(first_lang_tag("zh-hant"), tag(b"ZHT "));
        assert_eq!(first_lang_tag("zh-hans-tw"), tag(b"ZHS "));
        assert_eq!(first_lang_tag("yue"), tag(b"ZHH "));
        assert_eq!(first_lang_tag("yue-hans"), tag(b"ZHS "));
    }

    #[test]
    fn variant_subtags() {
        assert_eq!(first_lang_tag("en-fonipa"), tag(b"IPPH"));
        assert_eq!(first_lang_tag("en-fonnapa"), tag(b"APPH"));
        assert_eq!(first_lang_tag("en-a-fonipa"), tag(b"ENG "));
        assert_eq!(first_lang_tag("en-fonipax"), tag(b"ENG "));
        assert_eq!(first_lang_tag("ka-geok"), tag(b"KGE "));
        assert_eq!(first_lang_tag("ga-latg"), tag(b"IRT "));
        assert_eq!(first_lang_tag("ro-md"), tag(b"MOL "));
        assert_eq!(first_lang_tag("el-polyton"), tag(b"PGR "));
        assert_eq!(first_lang_tag("syr-syre"), tag(b"SYRE"));
        assert_eq!(first_lang_tag("art-lojban"), tag(b"JBO "));
    }

    #[test]
    fn private_use_language() {
        assert_eq!(first_lang_tag("x-hbot-41424344"), tag(b"ABCD"));
        assert_eq!(first_lang_tag("x-hbotabc"), tag(b"ABC "));
        assert_eq!(first_lang_tag("fa-x-hbotabc-hbot-41686121-zxc"), tag(b"ABC "));
        assert_eq!(first_lang_tag("fa-x-hbot-41686121-hbotabc"), tag(b"Aha!"));
        assert_eq!(first_lang_tag("x-hbot-4142432"), DEFAULT_LANGUAGE);
        assert_eq!(first_lang_tag("x-hbot-1a2b3c4x"), DEFAULT_LANGUAGE);
        assert_eq!(first_lang_tag("x-hbotdflt"), tag(b"dflt"));
    }

    #[test]
    fn private_use_script() {
        let lang = Language::from_str("x-hbscdflt").unwrap();
        let (scripts, _) = tags_from_script_and_language(Some(script::LATIN), Some(&lang));
        assert_eq!(scripts.as_slice(), &[DEFAULT_SCRIPT]);

        let lang = Language::from_str("en-x-hbsccopt").unwrap();
        let (scripts, langs) = tags_from_script_and_language(Some(script::LATIN), Some(&lang));
        assert_eq!(scripts.as_slice(), &[tag(b"copt")]);
        assert_eq!(langs.as_slice(), &[tag(b"ENG ")]);
    }
}
