//! BCP 47 primary language subtags and their OpenType language system tags.
//!
//! Sorted by language; a language may map to several tags in preference order.

use crate::Tag;

pub(crate) const LANGUAGES: &[(&str, Tag)] = &[
    ("aa", Tag::from_bytes(b"AFR ")),
    ("aao", Tag::from_bytes(b"ARA ")),
    ("ab", Tag::from_bytes(b"ABK ")),
    ("af", Tag::from_bytes(b"AFK ")),
    ("aii", Tag::from_bytes(b"SWA ")),
    ("aii", Tag::from_bytes(b"SYR ")),
    ("ak", Tag::from_bytes(b"AKA ")),
    ("als", Tag::from_bytes(b"SQI ")),
    ("alt", Tag::from_bytes(b"ALT ")),
    ("am", Tag::from_bytes(b"AMH ")),
    ("amw", Tag::from_bytes(b"SYR ")),
    ("an", Tag::from_bytes(b"ARG ")),
    ("ar", Tag::from_bytes(b"ARA ")),
    ("arb", Tag::from_bytes(b"ARA ")),
    ("ary", Tag::from_bytes(b"MOR ")),
    ("arz", Tag::from_bytes(b"ARA ")),
    ("as", Tag::from_bytes(b"ASM ")),
    ("ast", Tag::from_bytes(b"AST ")),
    ("av", Tag::from_bytes(b"AVR ")),
    ("ay", Tag::from_bytes(b"AYM ")),
    ("az", Tag::from_bytes(b"AZE ")),
    ("ba", Tag::from_bytes(b"BSH ")),
    ("be", Tag::from_bytes(b"BEL ")),
    ("bg", Tag::from_bytes(b"BGR ")),
    ("bgr", Tag::from_bytes(b"QIN ")),
    ("bho", Tag::from_bytes(b"BHO ")),
    ("bi", Tag::from_bytes(b"BIS ")),
    ("bm", Tag::from_bytes(b"BMB ")),
    ("bn", Tag::from_bytes(b"BEN ")),
    ("bo", Tag::from_bytes(b"TIB ")),
    ("br", Tag::from_bytes(b"BRE ")),
    ("bs", Tag::from_bytes(b"BOS ")),
    ("ca", Tag::from_bytes(b"CAT ")),
    ("cbl", Tag::from_bytes(b"QIN ")),
    ("ce", Tag::from_bytes(b"CHE ")),
    ("cfm", Tag::from_bytes(b"HAL ")),
    ("ch", Tag::from_bytes(b"CHA ")),
    ("chr", Tag::from_bytes(b"CHR ")),
    ("cja", Tag::from_bytes(b"CJA ")),
    ("cjm", Tag::from_bytes(b"CJM ")),
    ("cka", Tag::from_bytes(b"QIN ")),
    ("ckb", Tag::from_bytes(b"KUR ")),
    ("cld", Tag::from_bytes(b"SYR ")),
    ("cmn", Tag::from_bytes(b"ZHS ")),
    ("cmr", Tag::from_bytes(b"QIN ")),
    ("cnb", Tag::from_bytes(b"QIN ")),
    ("cnh", Tag::from_bytes(b"QIN ")),
    ("cnk", Tag::from_bytes(b"QIN ")),
    ("cnw", Tag::from_bytes(b"QIN ")),
    ("co", Tag::from_bytes(b"COS ")),
    ("cr", Tag::from_bytes(b"CRE ")),
    ("crh", Tag::from_bytes(b"CRT ")),
    ("cs", Tag::from_bytes(b"CSY ")),
    ("csh", Tag::from_bytes(b"QIN ")),
    ("csy", Tag::from_bytes(b"QIN ")),
    ("ctd", Tag::from_bytes(b"QIN ")),
    ("cu", Tag::from_bytes(b"CSL ")),
    ("cv", Tag::from_bytes(b"CHU ")),
    ("cy", Tag::from_bytes(b"WEL ")),
    ("czt", Tag::from_bytes(b"QIN ")),
    ("da", Tag::from_bytes(b"DAN ")),
    ("dao", Tag::from_bytes(b"QIN ")),
    ("de", Tag::from_bytes(b"DEU ")),
    ("doi", Tag::from_bytes(b"DGR ")),
    ("drh", Tag::from_bytes(b"MNG ")),
    ("dv", Tag::from_bytes(b"DIV ")),
    ("dv", Tag::from_bytes(b"DHV ")),
    ("dz", Tag::from_bytes(b"DZN ")),
    ("ee", Tag::from_bytes(b"EWE ")),
    ("el", Tag::from_bytes(b"ELL ")),
    ("en", Tag::from_bytes(b"ENG ")),
    ("eo", Tag::from_bytes(b"NTO ")),
    ("es", Tag::from_bytes(b"ESP ")),
    ("et", Tag::from_bytes(b"ETI ")),
    ("eu", Tag::from_bytes(b"EUQ ")),
    ("eve", Tag::from_bytes(b"EVN ")),
    ("fa", Tag::from_bytes(b"FAR ")),
    ("ff", Tag::from_bytes(b"FUL ")),
    ("fi", Tag::from_bytes(b"FIN ")),
    ("fil", Tag::from_bytes(b"PIL ")),
    ("fj", Tag::from_bytes(b"FJI ")),
    ("flm", Tag::from_bytes(b"HAL ")),
    ("fo", Tag::from_bytes(b"FOS ")),
    ("fr", Tag::from_bytes(b"FRA ")),
    ("fur", Tag::from_bytes(b"FRL ")),
    ("fy", Tag::from_bytes(b"FRI ")),
    ("ga", Tag::from_bytes(b"IRI ")),
    ("gd", Tag::from_bytes(b"GAE ")),
    ("gl", Tag::from_bytes(b"GAL ")),
    ("gn", Tag::from_bytes(b"GUA ")),
    ("gsw", Tag::from_bytes(b"ALS ")),
    ("gu", Tag::from_bytes(b"GUJ ")),
    ("gv", Tag::from_bytes(b"MNX ")),
    ("ha", Tag::from_bytes(b"HAU ")),
    ("hak", Tag::from_bytes(b"ZHS ")),
    ("haw", Tag::from_bytes(b"HAW ")),
    ("he", Tag::from_bytes(b"IWR ")),
    ("hi", Tag::from_bytes(b"HIN ")),
    ("hlt", Tag::from_bytes(b"QIN ")),
    ("ho", Tag::from_bytes(b"HMO ")),
    ("hr", Tag::from_bytes(b"HRV ")),
    ("hsn", Tag::from_bytes(b"ZHS ")),
    ("ht", Tag::from_bytes(b"HAI ")),
    ("hu", Tag::from_bytes(b"HUN ")),
    ("hy", Tag::from_bytes(b"HYE0")),
    ("hy", Tag::from_bytes(b"HYE ")),
    ("hyw", Tag::from_bytes(b"HYE ")),
    ("hz", Tag::from_bytes(b"HER ")),
    ("ia", Tag::from_bytes(b"INA ")),
    ("id", Tag::from_bytes(b"IND ")),
    ("ie", Tag::from_bytes(b"ILE ")),
    ("ig", Tag::from_bytes(b"IBO ")),
    ("ii", Tag::from_bytes(b"YIM ")),
    ("ik", Tag::from_bytes(b"IPK ")),
    ("io", Tag::from_bytes(b"IDO ")),
    ("is", Tag::from_bytes(b"ISL ")),
    ("it", Tag::from_bytes(b"ITA ")),
    ("iu", Tag::from_bytes(b"INU ")),
    ("iu", Tag::from_bytes(b"INUK")),
    ("ja", Tag::from_bytes(b"JAN ")),
    ("jbo", Tag::from_bytes(b"JBO ")),
    ("jv", Tag::from_bytes(b"JAV ")),
    ("ka", Tag::from_bytes(b"KAT ")),
    ("kg", Tag::from_bytes(b"KON0")),
    ("kha", Tag::from_bytes(b"KSI ")),
    ("ki", Tag::from_bytes(b"KIK ")),
    ("kj", Tag::from_bytes(b"KUA ")),
    ("kk", Tag::from_bytes(b"KAZ ")),
    ("kl", Tag::from_bytes(b"GRN ")),
    ("km", Tag::from_bytes(b"KHM ")),
    ("kn", Tag::from_bytes(b"KAN ")),
    ("ko", Tag::from_bytes(b"KOR ")),
    ("kok", Tag::from_bytes(b"KOK ")),
    ("kr", Tag::from_bytes(b"KNR ")),
    ("ks", Tag::from_bytes(b"KSH ")),
    ("ksw", Tag::from_bytes(b"KSW ")),
    ("ku", Tag::from_bytes(b"KUR ")),
    ("kv", Tag::from_bytes(b"KOM ")),
    ("kw", Tag::from_bytes(b"COR ")),
    ("ky", Tag::from_bytes(b"KIR ")),
    ("la", Tag::from_bytes(b"LAT ")),
    ("lb", Tag::from_bytes(b"LTZ ")),
    ("lg", Tag::from_bytes(b"LUG ")),
    ("li", Tag::from_bytes(b"LIM ")),
    ("ln", Tag::from_bytes(b"LIN ")),
    ("lo", Tag::from_bytes(b"LAO ")),
    ("lt", Tag::from_bytes(b"LTH ")),
    ("lu", Tag::from_bytes(b"LUB ")),
    ("lus", Tag::from_bytes(b"MIZ ")),
    ("lv", Tag::from_bytes(b"LVI ")),
    ("mai", Tag::from_bytes(b"MTH ")),
    ("man", Tag::from_bytes(b"MNK ")),
    ("mg", Tag::from_bytes(b"MLG ")),
    ("mh", Tag::from_bytes(b"MAH ")),
    ("mi", Tag::from_bytes(b"MRI ")),
    ("mk", Tag::from_bytes(b"MKD ")),
    ("ml", Tag::from_bytes(b"MAL ")),
    ("ml", Tag::from_bytes(b"MLR ")),
    ("mn", Tag::from_bytes(b"MNG ")),
    ("mni", Tag::from_bytes(b"MNI ")),
    ("mnw", Tag::from_bytes(b"MON ")),
    ("mr", Tag::from_bytes(b"MAR ")),
    ("mrh", Tag::from_bytes(b"QIN ")),
    ("ms", Tag::from_bytes(b"MLY ")),
    ("mt", Tag::from_bytes(b"MTS ")),
    ("my", Tag::from_bytes(b"BRM ")),
    ("na", Tag::from_bytes(b"NAU ")),
    ("nan", Tag::from_bytes(b"ZHS ")),
    ("nb", Tag::from_bytes(b"NOR ")),
    ("nd", Tag::from_bytes(b"NDB ")),
    ("ne", Tag::from_bytes(b"NEP ")),
    ("new", Tag::from_bytes(b"NEW ")),
    ("ng", Tag::from_bytes(b"NDG ")),
    ("nl", Tag::from_bytes(b"NLD ")),
    ("nn", Tag::from_bytes(b"NYN ")),
    ("no", Tag::from_bytes(b"NOR ")),
    ("nr", Tag::from_bytes(b"NDB ")),
    ("nv", Tag::from_bytes(b"NAV ")),
    ("ny", Tag::from_bytes(b"CHI ")),
    ("oc", Tag::from_bytes(b"OCI ")),
    ("oj", Tag::from_bytes(b"OJB ")),
    ("om", Tag::from_bytes(b"ORO ")),
    ("or", Tag::from_bytes(b"ORI ")),
    ("os", Tag::from_bytes(b"OSS ")),
    ("pa", Tag::from_bytes(b"PAN ")),
    ("pck", Tag::from_bytes(b"QIN ")),
    ("pes", Tag::from_bytes(b"FAR ")),
    ("pi", Tag::from_bytes(b"PAL ")),
    ("pl", Tag::from_bytes(b"PLK ")),
    ("prs", Tag::from_bytes(b"DRI ")),
    ("ps", Tag::from_bytes(b"PAS ")),
    ("pt", Tag::from_bytes(b"PTG ")),
    ("qu", Tag::from_bytes(b"QUZ ")),
    ("rm", Tag::from_bytes(b"RMS ")),
    ("rn", Tag::from_bytes(b"RUN ")),
    ("ro", Tag::from_bytes(b"ROM ")),
    ("ru", Tag::from_bytes(b"RUS ")),
    ("rw", Tag::from_bytes(b"RUA ")),
    ("sa", Tag::from_bytes(b"SAN ")),
    ("sat", Tag::from_bytes(b"SAT ")),
    ("sc", Tag::from_bytes(b"SRD ")),
    ("sck", Tag::from_bytes(b"SAD ")),
    ("sd", Tag::from_bytes(b"SND ")),
    ("se", Tag::from_bytes(b"NSM ")),
    ("sez", Tag::from_bytes(b"QIN ")),
    ("sg", Tag::from_bytes(b"SGO ")),
    ("shn", Tag::from_bytes(b"SHN ")),
    ("si", Tag::from_bytes(b"SNH ")),
    ("sk", Tag::from_bytes(b"SKY ")),
    ("sl", Tag::from_bytes(b"SLV ")),
    ("sm", Tag::from_bytes(b"SMO ")),
    ("sn", Tag::from_bytes(b"SNA ")),
    ("so", Tag::from_bytes(b"SML ")),
    ("sq", Tag::from_bytes(b"SQI ")),
    ("sr", Tag::from_bytes(b"SRB ")),
    ("ss", Tag::from_bytes(b"SWZ ")),
    ("st", Tag::from_bytes(b"SOT ")),
    ("su", Tag::from_bytes(b"SUN ")),
    ("sv", Tag::from_bytes(b"SVE ")),
    ("sw", Tag::from_bytes(b"SWK ")),
    ("syc", Tag::from_bytes(b"SYR ")),
    ("syr", Tag::from_bytes(b"SYR ")),
    ("ta", Tag::from_bytes(b"TAM ")),
    ("tcp", Tag::from_bytes(b"QIN ")),
    ("tcz", Tag::from_bytes(b"QIN ")),
    ("te", Tag::from_bytes(b"TEL ")),
    ("tg", Tag::from_bytes(b"TAJ ")),
    ("th", Tag::from_bytes(b"THA ")),
    ("ti", Tag::from_bytes(b"TGY ")),
    ("tk", Tag::from_bytes(b"TKM ")),
    ("tl", Tag::from_bytes(b"TGL ")),
    ("tn", Tag::from_bytes(b"TNA ")),
    ("to", Tag::from_bytes(b"TGN ")),
    ("tr", Tag::from_bytes(b"TRK ")),
    ("tru", Tag::from_bytes(b"TUA ")),
    ("tru", Tag::from_bytes(b"SYR ")),
    ("ts", Tag::from_bytes(b"TSG ")),
    ("tt", Tag::from_bytes(b"TAT ")),
    ("tw", Tag::from_bytes(b"TWI ")),
    ("ty", Tag::from_bytes(b"THT ")),
    ("ug", Tag::from_bytes(b"UYG ")),
    ("uk", Tag::from_bytes(b"UKR ")),
    ("ur", Tag::from_bytes(b"URD ")),
    ("uz", Tag::from_bytes(b"UZB ")),
    ("ve", Tag::from_bytes(b"VEN ")),
    ("vi", Tag::from_bytes(b"VIT ")),
    ("vo", Tag::from_bytes(b"VOL ")),
    ("wa", Tag::from_bytes(b"WLN ")),
    ("wo", Tag::from_bytes(b"WLF ")),
    ("wuu", Tag::from_bytes(b"ZHS ")),
    ("xh", Tag::from_bytes(b"XHS ")),
    ("yi", Tag::from_bytes(b"JII ")),
    ("yo", Tag::from_bytes(b"YBA ")),
    ("yos", Tag::from_bytes(b"QIN ")),
    ("yue", Tag::from_bytes(b"ZHH ")),
    ("za", Tag::from_bytes(b"ZHA ")),
    ("zom", Tag::from_bytes(b"QIN ")),
    ("zu", Tag::from_bytes(b"ZUL ")),
];
