//! Universal Shaping Engine categories.
//!
//! Regenerate with `scripts/gen-universal-table.py`, which derives the
//! categories from the UCD's IndicSyllabicCategory and
//! IndicPositionalCategory plus the USE overrides. Anything not listed is `O`.

use super::universal::category::*;
use super::universal::Category;

#[rustfmt::skip]
const TABLE: &[(u32, u32, Category)] = &[
    (0x00A0, 0x00A0, GB),
    (0x00D7, 0x00D7, GB),
    (0x034F, 0x034F, CGJ),
    (0x0900, 0x0902, VMAbv),
    (0x0903, 0x0903, VMPst),
    (0x0904, 0x0939, B),
    (0x093A, 0x093A, VAbv),
    (0x093B, 0x093B, VPst),
    (0x093C, 0x093C, CMBlw),
    (0x093D, 0x093D, B),
    (0x093E, 0x093E, VPst),
    (0x093F, 0x093F, VPre),
    (0x0940, 0x0940, VPst),
    (0x0941, 0x0948, VBlw),
    (0x0949, 0x094C, VPst),
    (0x094D, 0x094D, H),
    (0x094E, 0x094E, VPre),
    (0x094F, 0x094F, VPst),
    (0x0950, 0x0950, B),
    (0x0951, 0x0951, VMAbv),
    (0x0952, 0x0952, VMBlw),
    (0x0953, 0x0954, VMAbv),
    (0x0955, 0x0955, VAbv),
    (0x0956, 0x0957, VBlw),
    (0x0958, 0x0961, B),
    (0x0962, 0x0963, VBlw),
    (0x0966, 0x096F, B),
    (0x0971, 0x0980, B),
    (0x0981, 0x0981, VMAbv),
    (0x0982, 0x0983, VMPst),
    (0x0985, 0x098C, B),
    (0x098F, 0x0990, B),
    (0x0993, 0x09A8, B),
    (0x09AA, 0x09B0, B),
    (0x09B2, 0x09B2, B),
    (0x09B6, 0x09B9, B),
    (0x09BC, 0x09BC, CMBlw),
    (0x09BD, 0x09BD, B),
    (0x09BE, 0x09BE, VPst),
    (0x09BF, 0x09BF, VPre),
    (0x09C0, 0x09C0, VPst),
    (0x09C1, 0x09C4, VBlw),
    (0x09C7, 0x09C8, VPre),
    (0x09CB, 0x09CC, VPst),
    (0x09CD, 0x09CD, H),
    (0x09CE, 0x09CE, B),
    (0x09D7, 0x09D7, VPst),
    (0x09DC, 0x09DD, B),
    (0x09DF, 0x09E1, B),
    (0x09E2, 0x09E3, VBlw),
    (0x09E6, 0x09F1, B),
    (0x09F4, 0x09F9, B),
    (0x09FC, 0x09FC, B),
    (0x09FE, 0x09FE, VMAbv),
    (0x0A01, 0x0A02, VMAbv),
    (0x0A03, 0x0A03, VMPst),
    (0x0A05, 0x0A0A, B),
    (0x0A0F, 0x0A10, B),
    (0x0A13, 0x0A28, B),
    (0x0A2A, 0x0A30, B),
    (0x0A32, 0x0A33, B),
    (0x0A35, 0x0A36, B),
    (0x0A38, 0x0A39, B),
    (0x0A3C, 0x0A3C, CMBlw),
    (0x0A3E, 0x0A3E, VPst),
    (0x0A3F, 0x0A3F, VPre),
    (0x0A40, 0x0A40, VPst),
    (0x0A41, 0x0A42, VAbv),
    (0x0A47, 0x0A48, VAbv),
    (0x0A4B, 0x0A4C, VAbv),
    (0x0A4D, 0x0A4D, H),
    (0x0A51, 0x0A51, VMAbv),
    (0x0A59, 0x0A5C, B),
    (0x0A5E, 0x0A5E, B),
    (0x0A66, 0x0A6F, B),
    (0x0A70, 0x0A71, VMAbv),
    (0x0A72, 0x0A74, B),
    (0x0A75, 0x0A75, VMAbv),
    (0x0A81, 0x0A82, VMAbv),
    (0x0A83, 0x0A83, VMPst),
    (0x0A85, 0x0A8D, B),
    (0x0A8F, 0x0A91, B),
    (0x0A93, 0x0AA8, B),
    (0x0AAA, 0x0AB0, B),
    (0x0AB2, 0x0AB3, B),
    (0x0AB5, 0x0AB9, B),
    (0x0ABC, 0x0ABC, CMBlw),
    (0x0ABD, 0x0ABD, B),
    (0x0ABE, 0x0ABE, VPst),
    (0x0ABF, 0x0ABF, VPre),
    (0x0AC0, 0x0AC0, VPst),
    (0x0AC1, 0x0AC4, VAbv),
    (0x0AC5, 0x0AC5, VBlw),
    (0x0AC7, 0x0AC8, VBlw),
    (0x0AC9, 0x0AC9, VPst),
    (0x0ACB, 0x0ACC, VPst),
    (0x0ACD, 0x0ACD, H),
    (0x0AD0, 0x0AD0, B),
    (0x0AE0, 0x0AE1, B),
    (0x0AE2, 0x0AE3, VAbv),
    (0x0AE6, 0x0AEF, B),
    (0x0AF9, 0x0AF9, B),
    (0x0AFA, 0x0AFF, VMAbv),
    (0x0B01, 0x0B01, VMAbv),
    (0x0B02, 0x0B03, VMPst),
    (0x0B05, 0x0B0C, B),
    (0x0B0F, 0x0B10, B),
    (0x0B13, 0x0B28, B),
    (0x0B2A, 0x0B30, B),
    (0x0B32, 0x0B33, B),
    (0x0B35, 0x0B39, B),
    (0x0B3C, 0x0B3C, CMBlw),
    (0x0B3D, 0x0B3D, B),
    (0x0B3E, 0x0B3E, VPst),
    (0x0B3F, 0x0B3F, VAbv),
    (0x0B40, 0x0B40, VPst),
    (0x0B41, 0x0B44, VBlw),
    (0x0B47, 0x0B47, VPre),
    (0x0B48, 0x0B48, VPst),
    (0x0B4B, 0x0B4C, VPst),
    (0x0B4D, 0x0B4D, H),
    (0x0B55, 0x0B55, VMAbv),
    (0x0B56, 0x0B56, VAbv),
    (0x0B57, 0x0B57, VPst),
    (0x0B5C, 0x0B5D, B),
    (0x0B5F, 0x0B61, B),
    (0x0B62, 0x0B63, VBlw),
    (0x0B66, 0x0B6F, B),
    (0x0B71, 0x0B77, B),
    (0x0B82, 0x0B82, VMAbv),
    (0x0B83, 0x0B83, B),
    (0x0B85, 0x0B8A, B),
    (0x0B8E, 0x0B90, B),
    (0x0B92, 0x0B95, B),
    (0x0B99, 0x0B9A, B),
    (0x0B9C, 0x0B9C, B),
    (0x0B9E, 0x0B9F, B),
    (0x0BA3, 0x0BA4, B),
    (0x0BA8, 0x0BAA, B),
    (0x0BAE, 0x0BB9, B),
    (0x0BBE, 0x0BBF, VPst),
    (0x0BC0, 0x0BC0, VBlw),
    (0x0BC1, 0x0BC2, VPst),
    (0x0BC6, 0x0BC8, VPre),
    (0x0BCA, 0x0BCC, VPst),
    (0x0BCD, 0x0BCD, H),
    (0x0BD0, 0x0BD0, B),
    (0x0BD7, 0x0BD7, VPst),
    (0x0BE6, 0x0BF2, B),
    (0x0C00, 0x0C00, VMAbv),
    (0x0C01, 0x0C03, VMPst),
    (0x0C04, 0x0C04, VMAbv),
    (0x0C05, 0x0C0C, B),
    (0x0C0E, 0x0C10, B),
    (0x0C12, 0x0C28, B),
    (0x0C2A, 0x0C39, B),
    (0x0C3C, 0x0C3C, CMBlw),
    (0x0C3D, 0x0C3D, B),
    (0x0C3E, 0x0C40, VBlw),
    (0x0C41, 0x0C44, VPst),
    (0x0C46, 0x0C48, VBlw),
    (0x0C4A, 0x0C4C, VBlw),
    (0x0C4D, 0x0C4D, H),
    (0x0C55, 0x0C56, VBlw),
    (0x0C58, 0x0C5A, B),
    (0x0C5D, 0x0C5D, B),
    (0x0C60, 0x0C61, B),
    (0x0C62, 0x0C63, VBlw),
    (0x0C66, 0x0C6F, B),
    (0x0C78, 0x0C7E, B),
    (0x0C80, 0x0C80, B),
    (0x0C81, 0x0C81, VMAbv),
    (0x0C82, 0x0C83, VMPst),
    (0x0C85, 0x0C8C, B),
    (0x0C8E, 0x0C90, B),
    (0x0C92, 0x0CA8, B),
    (0x0CAA, 0x0CB3, B),
    (0x0CB5, 0x0CB9, B),
    (0x0CBC, 0x0CBC, CMBlw),
    (0x0CBD, 0x0CBD, B),
    (0x0CBE, 0x0CBE, VPst),
    (0x0CBF, 0x0CBF, VBlw),
    (0x0CC0, 0x0CC4, VPst),
    (0x0CC6, 0x0CC6, VBlw),
    (0x0CC7, 0x0CC8, VPst),
    (0x0CCA, 0x0CCB, VPst),
    (0x0CCC, 0x0CCC, VBlw),
    (0x0CCD, 0x0CCD, H),
    (0x0CD5, 0x0CD6, VPst),
    (0x0CDD, 0x0CDE, B),
    (0x0CE0, 0x0CE1, B),
    (0x0CE2, 0x0CE3, VBlw),
    (0x0CE6, 0x0CEF, B),
    (0x0CF1, 0x0CF2, B),
    (0x0D00, 0x0D01, VMAbv),
    (0x0D02, 0x0D03, VMPst),
    (0x0D04, 0x0D0C, B),
    (0x0D0E, 0x0D10, B),
    (0x0D12, 0x0D3A, B),
    (0x0D3B, 0x0D3C, H),
    (0x0D3D, 0x0D3D, B),
    (0x0D3E, 0x0D40, VPst),
    (0x0D41, 0x0D44, VAbv),
    (0x0D46, 0x0D48, VPre),
    (0x0D4A, 0x0D4C, VPst),
    (0x0D4D, 0x0D4D, H),
    (0x0D4E, 0x0D4E, R),
    (0x0D54, 0x0D56, B),
    (0x0D57, 0x0D57, VPst),
    (0x0D58, 0x0D61, B),
    (0x0D62, 0x0D63, VAbv),
    (0x0D66, 0x0D78, B),
    (0x0D7A, 0x0D7F, B),
    (0x0D81, 0x0D81, VMAbv),
    (0x0D82, 0x0D83, VMPst),
    (0x0D85, 0x0D96, B),
    (0x0D9A, 0x0DB1, B),
    (0x0DB3, 0x0DBB, B),
    (0x0DBD, 0x0DBD, B),
    (0x0DC0, 0x0DC6, B),
    (0x0DCA, 0x0DCA, H),
    (0x0DCF, 0x0DD1, VPst),
    (0x0DD2, 0x0DD4, VBlw),
    (0x0DD6, 0x0DD6, VBlw),
    (0x0DD8, 0x0DD8, VPst),
    (0x0DD9, 0x0DD9, VPre),
    (0x0DDA, 0x0DDA, VPst),
    (0x0DDB, 0x0DDB, VPre),
    (0x0DDC, 0x0DDF, VPst),
    (0x0DE6, 0x0DEF, B),
    (0x0DF2, 0x0DF3, VPst),
    (0x0F00, 0x0F00, B),
    (0x0F18, 0x0F19, VMBlw),
    (0x0F20, 0x0F33, B),
    (0x0F35, 0x0F35, VMBlw),
    (0x0F37, 0x0F37, VMBlw),
    (0x0F39, 0x0F39, VMAbv),
    (0x0F3E, 0x0F3F, VMPst),
    (0x0F40, 0x0F47, B),
    (0x0F49, 0x0F6C, B),
    (0x0F71, 0x0F71, VBlw),
    (0x0F72, 0x0F73, VAbv),
    (0x0F74, 0x0F79, VBlw),
    (0x0F7A, 0x0F7D, VAbv),
    (0x0F7E, 0x0F7E, VMAbv),
    (0x0F7F, 0x0F7F, VMPst),
    (0x0F80, 0x0F81, VAbv),
    (0x0F82, 0x0F83, VMAbv),
    (0x0F84, 0x0F84, H),
    (0x0F86, 0x0F87, VMAbv),
    (0x0F88, 0x0F8C, B),
    (0x0F8D, 0x0F97, SUB),
    (0x0F99, 0x0FBC, SUB),
    (0x0FC6, 0x0FC6, VMBlw),
    (0x1700, 0x1711, B),
    (0x1712, 0x1712, VAbv),
    (0x1713, 0x1713, VBlw),
    (0x1714, 0x1714, H),
    (0x1715, 0x1715, VPst),
    (0x171F, 0x1731, B),
    (0x1732, 0x1732, VAbv),
    (0x1733, 0x1733, VBlw),
    (0x1734, 0x1734, H),
    (0x1740, 0x1751, B),
    (0x1752, 0x1752, VAbv),
    (0x1753, 0x1753, VBlw),
    (0x1760, 0x176C, B),
    (0x176E, 0x1770, B),
    (0x1772, 0x1772, VAbv),
    (0x1773, 0x1773, VBlw),
    (0x1810, 0x1819, B),
    (0x1820, 0x1878, B),
    (0x1880, 0x1884, B),
    (0x1885, 0x1886, VMAbv),
    (0x1887, 0x18A8, B),
    (0x18A9, 0x18A9, VMAbv),
    (0x18AA, 0x18AA, B),
    (0x1900, 0x191E, B),
    (0x1920, 0x1921, VAbv),
    (0x1922, 0x1922, VBlw),
    (0x1923, 0x1924, VPst),
    (0x1925, 0x1928, VAbv),
    (0x1929, 0x192B, SUB),
    (0x1930, 0x1931, FPst),
    (0x1932, 0x1932, VMBlw),
    (0x1933, 0x1938, FPst),
    (0x1939, 0x1939, VMBlw),
    (0x193A, 0x193A, VMAbv),
    (0x193B, 0x193B, VMBlw),
    (0x1946, 0x196D, B),
    (0x1970, 0x1974, B),
    (0x1980, 0x19AB, B),
    (0x19B0, 0x19C9, B),
    (0x19D0, 0x19DA, B),
    (0x1A00, 0x1A16, B),
    (0x1A17, 0x1A17, VAbv),
    (0x1A18, 0x1A18, VBlw),
    (0x1A19, 0x1A19, VPre),
    (0x1A1A, 0x1A1A, VPst),
    (0x1A1B, 0x1A1B, VAbv),
    (0x1A20, 0x1A54, B),
    (0x1A55, 0x1A55, MPst),
    (0x1A56, 0x1A56, MBlw),
    (0x1A57, 0x1A57, MPst),
    (0x1A58, 0x1A58, VMAbv),
    (0x1A59, 0x1A59, FAbv),
    (0x1A5A, 0x1A5E, MBlw),
    (0x1A60, 0x1A60, Sk),
    (0x1A61, 0x1A61, VPst),
    (0x1A62, 0x1A62, VAbv),
    (0x1A63, 0x1A64, VPst),
    (0x1A65, 0x1A68, VAbv),
    (0x1A69, 0x1A6A, VBlw),
    (0x1A6B, 0x1A6B, VAbv),
    (0x1A6C, 0x1A6C, VBlw),
    (0x1A6D, 0x1A6D, VPst),
    (0x1A6E, 0x1A6E, VPre),
    (0x1A6F, 0x1A70, VPst),
    (0x1A71, 0x1A72, VPre),
    (0x1A73, 0x1A73, VAbv),
    (0x1A74, 0x1A7C, VMAbv),
    (0x1A7F, 0x1A7F, VMBlw),
    (0x1A80, 0x1A89, B),
    (0x1A90, 0x1A99, B),
    (0x1AA7, 0x1AA7, B),
    (0x1B00, 0x1B02, VMAbv),
    (0x1B03, 0x1B03, FAbv),
    (0x1B04, 0x1B04, VMPst),
    (0x1B05, 0x1B33, B),
    (0x1B34, 0x1B34, CMAbv),
    (0x1B35, 0x1B35, VPst),
    (0x1B36, 0x1B37, VAbv),
    (0x1B38, 0x1B3D, VBlw),
    (0x1B3E, 0x1B41, VPre),
    (0x1B42, 0x1B43, VAbv),
    (0x1B44, 0x1B44, H),
    (0x1B45, 0x1B4C, B),
    (0x1B50, 0x1B59, B),
    (0x1B6B, 0x1B6B, SMAbv),
    (0x1B6C, 0x1B6C, SMBlw),
    (0x1B6D, 0x1B73, SMAbv),
    (0x1B80, 0x1B80, VMAbv),
    (0x1B81, 0x1B81, FAbv),
    (0x1B82, 0x1B82, VMPst),
    (0x1B83, 0x1BA0, B),
    (0x1BA1, 0x1BA1, MPst),
    (0x1BA2, 0x1BA3, MBlw),
    (0x1BA4, 0x1BA4, VAbv),
    (0x1BA5, 0x1BA5, VBlw),
    (0x1BA6, 0x1BA6, VPre),
    (0x1BA7, 0x1BA7, VPst),
    (0x1BA8, 0x1BA9, VAbv),
    (0x1BAA, 0x1BAA, VPst),
    (0x1BAB, 0x1BAB, IS),
    (0x1BAC, 0x1BAD, MBlw),
    (0x1BAE, 0x1BE5, B),
    (0x1BE6, 0x1BE6, CMAbv),
    (0x1BE7, 0x1BE7, VPst),
    (0x1BE8, 0x1BE9, VAbv),
    (0x1BEA, 0x1BEC, VPst),
    (0x1BED, 0x1BED, VAbv),
    (0x1BEE, 0x1BEE, VPst),
    (0x1BEF, 0x1BEF, VAbv),
    (0x1BF0, 0x1BF1, FAbv),
    (0x1BF2, 0x1BF3, VPst),
    (0x1C00, 0x1C23, B),
    (0x1C24, 0x1C25, SUB),
    (0x1C26, 0x1C26, VPst),
    (0x1C27, 0x1C29, VPre),
    (0x1C2A, 0x1C2B, VPst),
    (0x1C2C, 0x1C2C, VBlw),
    (0x1C2D, 0x1C33, FAbv),
    (0x1C34, 0x1C35, VMPre),
    (0x1C36, 0x1C36, FMAbv),
    (0x1C37, 0x1C37, CMBlw),
    (0x1C40, 0x1C49, B),
    (0x1C4D, 0x1C4F, B),
    (0x1CD0, 0x1CD2, VMAbv),
    (0x1CD4, 0x1CD4, VMAbv),
    (0x1CD5, 0x1CD9, VMBlw),
    (0x1CDA, 0x1CDB, VMAbv),
    (0x1CDC, 0x1CDF, VMBlw),
    (0x1CE0, 0x1CE0, VMAbv),
    (0x1CE1, 0x1CE1, VMPst),
    (0x1CE2, 0x1CE8, VMAbv),
    (0x1CE9, 0x1CEC, B),
    (0x1CED, 0x1CED, VMBlw),
    (0x1CEE, 0x1CF3, B),
    (0x1CF4, 0x1CF4, VMAbv),
    (0x1CF5, 0x1CF6, B),
    (0x1CF7, 0x1CF7, VMPst),
    (0x1CF8, 0x1CF9, VMAbv),
    (0x1CFA, 0x1CFA, B),
    (0x200C, 0x200C, ZWNJ),
    (0x2012, 0x2015, GB),
    (0x2022, 0x2022, GB),
    (0x2060, 0x2060, WJ),
    (0x25CC, 0x25CC, GB),
    (0x25FB, 0x25FE, GB),
    (0xA800, 0xA801, B),
    (0xA802, 0xA802, VMAbv),
    (0xA803, 0xA805, B),
    (0xA806, 0xA806, H),
    (0xA807, 0xA80A, B),
    (0xA80B, 0xA80B, VMAbv),
    (0xA80C, 0xA822, B),
    (0xA823, 0xA824, VPst),
    (0xA825, 0xA825, VBlw),
    (0xA826, 0xA826, VAbv),
    (0xA827, 0xA827, VPst),
    (0xA82C, 0xA82C, H),
    (0xA840, 0xA866, B),
    (0xA867, 0xA868, SUB),
    (0xA869, 0xA870, B),
    (0xA871, 0xA871, SUB),
    (0xA872, 0xA873, B),
    (0xA880, 0xA881, VMPst),
    (0xA882, 0xA8B3, B),
    (0xA8B4, 0xA8B4, MPst),
    (0xA8B5, 0xA8BD, VPst),
    (0xA8BE, 0xA8C0, VPre),
    (0xA8C1, 0xA8C3, VPst),
    (0xA8C4, 0xA8C4, H),
    (0xA8C5, 0xA8C5, VMAbv),
    (0xA8D0, 0xA8D9, B),
    (0xA8E0, 0xA8F1, VMAbv),
    (0xA8F2, 0xA8F7, B),
    (0xA8FB, 0xA8FB, B),
    (0xA8FD, 0xA8FE, B),
    (0xA8FF, 0xA8FF, VBlw),
    (0xA900, 0xA925, B),
    (0xA926, 0xA927, VAbv),
    (0xA928, 0xA928, VBlw),
    (0xA929, 0xA92A, VAbv),
    (0xA92B, 0xA92D, VMBlw),
    (0xA930, 0xA946, B),
    (0xA947, 0xA947, VAbv),
    (0xA948, 0xA948, VBlw),
    (0xA949, 0xA94E, VAbv),
    (0xA94F, 0xA951, MBlw),
    (0xA952, 0xA952, MPst),
    (0xA953, 0xA953, H),
    (0xA980, 0xA981, VMAbv),
    (0xA982, 0xA982, FAbv),
    (0xA983, 0xA983, VMPst),
    (0xA984, 0xA9B2, B),
    (0xA9B3, 0xA9B3, CMAbv),
    (0xA9B4, 0xA9B5, VPst),
    (0xA9B6, 0xA9B7, VAbv),
    (0xA9B8, 0xA9B9, VBlw),
    (0xA9BA, 0xA9BB, VPre),
    (0xA9BC, 0xA9BC, VAbv),
    (0xA9BD, 0xA9BD, MBlw),
    (0xA9BE, 0xA9BE, MPst),
    (0xA9BF, 0xA9BF, MBlw),
    (0xA9C0, 0xA9C0, H),
    (0xA9CF, 0xA9D9, B),
    (0xAA00, 0xAA28, B),
    (0xAA29, 0xAA2C, VAbv),
    (0xAA2D, 0xAA2D, VBlw),
    (0xAA2E, 0xAA2E, VAbv),
    (0xAA2F, 0xAA2F, VPst),
    (0xAA30, 0xAA30, VPre),
    (0xAA31, 0xAA32, VAbv),
    (0xAA33, 0xAA34, MPst),
    (0xAA35, 0xAA36, MBlw),
    (0xAA40, 0xAA42, B),
    (0xAA43, 0xAA43, FAbv),
    (0xAA44, 0xAA4B, B),
    (0xAA4C, 0xAA4C, FAbv),
    (0xAA4D, 0xAA4D, FPst),
    (0xAA50, 0xAA59, B),
    (0xAA80, 0xAAAF, B),
    (0xAAB0, 0xAAB0, VMAbv),
    (0xAAB1, 0xAAB1, B),
    (0xAAB2, 0xAAB3, VAbv),
    (0xAAB4, 0xAAB4, VBlw),
    (0xAAB5, 0xAAB6, B),
    (0xAAB7, 0xAAB7, VMAbv),
    (0xAAB8, 0xAAB8, VAbv),
    (0xAAB9, 0xAABD, B),
    (0xAABE, 0xAABE, VAbv),
    (0xAABF, 0xAABF, VMAbv),
    (0xAAC0, 0xAAC0, B),
    (0xAAC1, 0xAAC1, VMAbv),
    (0xAAC2, 0xAAC2, B),
    (0xAADB, 0xAADD, B),
    (0xAAE0, 0xAAEA, B),
    (0xAAEB, 0xAAEB, VPst),
    (0xAAEC, 0xAAEC, VBlw),
    (0xAAED, 0xAAED, VAbv),
    (0xAAEE, 0xAAEF, VPst),
    (0xAAF2, 0xAAF4, B),
    (0xAAF5, 0xAAF5, VPst),
    (0xAAF6, 0xAAF6, H),
    (0xABC0, 0xABE2, B),
    (0xABE3, 0xABE4, VPst),
    (0xABE5, 0xABE5, VAbv),
    (0xABE6, 0xABE7, VPst),
    (0xABE8, 0xABE8, VAbv),
    (0xABE9, 0xABEA, VPst),
    (0xABEC, 0xABEC, VMPst),
    (0xABED, 0xABED, H),
    (0xABF0, 0xABF9, B),
    (0x10A00, 0x10A00, B),
    (0x10A01, 0x10A01, VAbv),
    (0x10A02, 0x10A03, VBlw),
    (0x10A05, 0x10A06, VAbv),
    (0x10A0C, 0x10A0C, VAbv),
    (0x10A0D, 0x10A0D, VMBlw),
    (0x10A0E, 0x10A0F, VMAbv),
    (0x10A10, 0x10A13, B),
    (0x10A15, 0x10A17, B),
    (0x10A19, 0x10A35, B),
    (0x10A38, 0x10A39, VMAbv),
    (0x10A3A, 0x10A3A, VMBlw),
    (0x10A3F, 0x10A3F, H),
    (0x10A40, 0x10A48, B),
    (0x11000, 0x11000, VMPst),
    (0x11001, 0x11001, VMAbv),
    (0x11002, 0x11002, VMPst),
    (0x11003, 0x11037, B),
    (0x11038, 0x1103B, VAbv),
    (0x1103C, 0x11041, VBlw),
    (0x11042, 0x11045, VAbv),
    (0x11046, 0x11046, H),
    (0x11052, 0x1106F, B),
    (0x11070, 0x11070, H),
    (0x11071, 0x11072, B),
    (0x11073, 0x11074, VAbv),
    (0x11075, 0x11075, B),
    (0x1107F, 0x1107F, H),
    (0x11080, 0x11081, VMAbv),
    (0x11082, 0x11082, VMPst),
    (0x11083, 0x110AF, B),
    (0x110B0, 0x110B2, VPst),
    (0x110B3, 0x110B4, VBlw),
    (0x110B5, 0x110B6, VAbv),
    (0x110B7, 0x110B8, VPst),
    (0x110B9, 0x110B9, H),
    (0x110BA, 0x110BA, CMBlw),
    (0x110C2, 0x110C2, VBlw),
    (0x110D0, 0x110E8, B),
    (0x110F0, 0x110F9, B),
    (0x11100, 0x11102, VMAbv),
    (0x11103, 0x11126, B),
    (0x11127, 0x11129, VAbv),
    (0x1112A, 0x1112B, VBlw),
    (0x1112C, 0x1112C, VPre),
    (0x1112D, 0x11130, VAbv),
    (0x11131, 0x11132, VMAbv),
    (0x11133, 0x11134, H),
    (0x11136, 0x1113F, B),
    (0x11144, 0x11144, B),
    (0x11145, 0x11146, VPst),
    (0x11147, 0x11147, B),
    (0x11150, 0x11172, B),
    (0x11173, 0x11173, CMBlw),
    (0x11176, 0x11176, B),
    (0x11180, 0x11181, VMAbv),
    (0x11182, 0x11182, VMPst),
    (0x11183, 0x111B2, B),
    (0x111B3, 0x111B5, VPst),
    (0x111B6, 0x111BB, VBlw),
    (0x111BC, 0x111BE, VAbv),
    (0x111BF, 0x111BF, VPst),
    (0x111C0, 0x111C0, H),
    (0x111C1, 0x111C4, B),
    (0x111C9, 0x111C9, VMAbv),
    (0x111CA, 0x111CA, CMBlw),
    (0x111CB, 0x111CC, VAbv),
    (0x111CE, 0x111CE, VPre),
    (0x111CF, 0x111CF, VMAbv),
    (0x111D0, 0x111DA, B),
    (0x111DC, 0x111DC, B),
    (0x111E1, 0x111F4, B),
    (0x11200, 0x11211, B),
    (0x11213, 0x1122B, B),
    (0x1122C, 0x1122E, VPst),
    (0x1122F, 0x1122F, VBlw),
    (0x11230, 0x11231, VAbv),
    (0x11232, 0x11233, VPst),
    (0x11234, 0x11234, VMAbv),
    (0x11235, 0x11235, H),
    (0x11236, 0x11236, CMBlw),
    (0x11237, 0x11237, VMAbv),
    (0x1123E, 0x1123E, VMAbv),
    (0x11280, 0x11286, B),
    (0x11288, 0x11288, B),
    (0x1128A, 0x1128D, B),
    (0x1128F, 0x1129D, B),
    (0x1129F, 0x112A8, B),
    (0x112B0, 0x112DE, B),
    (0x112DF, 0x112DF, VMAbv),
    (0x112E0, 0x112E2, VPst),
    (0x112E3, 0x112E4, VBlw),
    (0x112E5, 0x112E8, VAbv),
    (0x112E9, 0x112E9, CMBlw),
    (0x112EA, 0x112EA, H),
    (0x112F0, 0x112F9, B),
    (0x11300, 0x11301, VMAbv),
    (0x11302, 0x11303, VMPst),
    (0x11305, 0x1130C, B),
    (0x1130F, 0x11310, B),
    (0x11313, 0x11328, B),
    (0x1132A, 0x11330, B),
    (0x11332, 0x11333, B),
    (0x11335, 0x11339, B),
    (0x1133B, 0x1133C, CMBlw),
    (0x1133D, 0x1133D, B),
    (0x1133E, 0x1133F, VPst),
    (0x11340, 0x11340, VAbv),
    (0x11341, 0x11344, VPst),
    (0x11347, 0x11348, VPre),
    (0x1134B, 0x1134C, VPst),
    (0x1134D, 0x1134D, H),
    (0x11350, 0x11350, B),
    (0x11357, 0x11357, VMPst),
    (0x1135D, 0x11361, B),
    (0x11362, 0x11363, VPst),
    (0x11366, 0x1136C, VMAbv),
    (0x11370, 0x11374, VMAbv),
    (0x11400, 0x11434, B),
    (0x11435, 0x11437, VPst),
    (0x11438, 0x1143D, VBlw),
    (0x1143E, 0x1143F, VAbv),
    (0x11440, 0x11441, VPst),
    (0x11442, 0x11442, H),
    (0x11443, 0x11444, VMAbv),
    (0x11445, 0x11445, VMPst),
    (0x11446, 0x11446, CMBlw),
    (0x11447, 0x1144A, B),
    (0x11450, 0x11459, B),
    (0x1145E, 0x1145E, VMAbv),
    (0x1145F, 0x11461, B),
    (0x11480, 0x114AF, B),
    (0x114B0, 0x114B2, VPst),
    (0x114B3, 0x114B8, VBlw),
    (0x114B9, 0x114B9, VPre),
    (0x114BA, 0x114BA, VAbv),
    (0x114BB, 0x114BB, VPre),
    (0x114BC, 0x114BE, VPst),
    (0x114BF, 0x114C0, VMAbv),
    (0x114C1, 0x114C1, VMPst),
    (0x114C2, 0x114C2, H),
    (0x114C3, 0x114C3, CMBlw),
    (0x114C4, 0x114C5, B),
    (0x114C7, 0x114C7, B),
    (0x114D0, 0x114D9, B),
    (0x11580, 0x115AE, B),
    (0x115AF, 0x115B1, VPst),
    (0x115B2, 0x115B5, VBlw),
    (0x115B8, 0x115B9, VPre),
    (0x115BA, 0x115BB, VPst),
    (0x115BC, 0x115BD, VMAbv),
    (0x115BE, 0x115BE, VMPst),
    (0x115BF, 0x115BF, H),
    (0x115C0, 0x115C0, CMBlw),
    (0x115D8, 0x115DB, B),
    (0x115DC, 0x115DD, VBlw),
    (0x11600, 0x1162F, B),
    (0x11630, 0x11632, VPst),
    (0x11633, 0x11638, VBlw),
    (0x11639, 0x1163A, VAbv),
    (0x1163B, 0x1163C, VPst),
    (0x1163D, 0x1163D, VMAbv),
    (0x1163E, 0x1163E, VMPst),
    (0x1163F, 0x1163F, H),
    (0x11640, 0x11640, VMAbv),
    (0x11644, 0x11644, B),
    (0x11650, 0x11659, B),
    (0x11680, 0x116AA, B),
    (0x116AB, 0x116AB, VMAbv),
    (0x116AC, 0x116AC, VMPst),
    (0x116AD, 0x116AD, VAbv),
    (0x116AE, 0x116AF, VPst),
    (0x116B0, 0x116B1, VBlw),
    (0x116B2, 0x116B5, VAbv),
    (0x116B6, 0x116B6, H),
    (0x116B7, 0x116B7, CMBlw),
    (0x116B8, 0x116B8, B),
    (0x116C0, 0x116C9, B),
    (0x11700, 0x1171A, B),
    (0x1171D, 0x1171F, MBlw),
    (0x11720, 0x11721, VPst),
    (0x11722, 0x11723, VAbv),
    (0x11724, 0x11725, VBlw),
    (0x11726, 0x11726, VPre),
    (0x11727, 0x1172A, VAbv),
    (0x1172B, 0x1172B, H),
    (0x11730, 0x1173B, B),
    (0x11740, 0x11746, B),
    (0x11800, 0x1182B, B),
    (0x1182C, 0x1182E, VPst),
    (0x1182F, 0x11832, VBlw),
    (0x11833, 0x11836, VAbv),
    (0x11837, 0x11837, VMAbv),
    (0x11838, 0x11838, VMPst),
    (0x11839, 0x11839, H),
    (0x1183A, 0x1183A, CMBlw),
    (0x118E0, 0x118F2, B),
    (0x118FF, 0x11906, B),
    (0x11909, 0x11909, B),
    (0x1190C, 0x11913, B),
    (0x11915, 0x11916, B),
    (0x11918, 0x1192F, B),
    (0x11930, 0x11934, VPst),
    (0x11935, 0x11935, VPre),
    (0x11937, 0x11937, VPre),
    (0x11938, 0x11938, VPst),
    (0x1193B, 0x1193C, VMAbv),
    (0x1193D, 0x1193E, H),
    (0x1193F, 0x1193F, B),
    (0x11940, 0x11940, MPst),
    (0x11941, 0x11941, B),
    (0x11942, 0x11942, MPst),
    (0x11943, 0x11943, CMBlw),
    (0x11950, 0x11959, B),
    (0x119A0, 0x119A7, B),
    (0x119AA, 0x119D0, B),
    (0x119D1, 0x119D3, VPst),
    (0x119D4, 0x119D7, VBlw),
    (0x119DA, 0x119DB, VAbv),
    (0x119DC, 0x119DD, VPst),
    (0x119DE, 0x119DF, VMPst),
    (0x119E0, 0x119E0, H),
    (0x119E1, 0x119E1, B),
    (0x119E3, 0x119E3, B),
    (0x119E4, 0x119E4, VPre),
    (0x11A00, 0x11A00, B),
    (0x11A01, 0x11A02, VAbv),
    (0x11A03, 0x11A03, VBlw),
    (0x11A04, 0x11A0A, VAbv),
    (0x11A0B, 0x11A32, B),
    (0x11A33, 0x11A33, FAbv),
    (0x11A34, 0x11A34, H),
    (0x11A35, 0x11A38, VMAbv),
    (0x11A39, 0x11A39, VMPst),
    (0x11A3A, 0x11A3A, B),
    (0x11A3B, 0x11A3E, FAbv),
    (0x11A47, 0x11A47, H),
    (0x11A50, 0x11A50, B),
    (0x11A51, 0x11A52, VAbv),
    (0x11A53, 0x11A53, VBlw),
    (0x11A54, 0x11A56, VAbv),
    (0x11A57, 0x11A57, VPre),
    (0x11A58, 0x11A58, VPst),
    (0x11A59, 0x11A5A, VBlw),
    (0x11A5B, 0x11A5B, VAbv),
    (0x11A5C, 0x11A89, B),
    (0x11A8A, 0x11A95, FAbv),
    (0x11A96, 0x11A96, VMAbv),
    (0x11A97, 0x11A97, VMPst),
    (0x11A98, 0x11A98, VMAbv),
    (0x11A99, 0x11A99, H),
    (0x11A9D, 0x11A9D, B),
    (0x11AB0, 0x11AF8, B),
    (0x11C00, 0x11C08, B),
    (0x11C0A, 0x11C2E, B),
    (0x11C2F, 0x11C2F, VPst),
    (0x11C30, 0x11C31, VAbv),
    (0x11C32, 0x11C36, VBlw),
    (0x11C38, 0x11C3B, VAbv),
    (0x11C3C, 0x11C3D, VMAbv),
    (0x11C3E, 0x11C3E, VMPst),
    (0x11C3F, 0x11C3F, H),
    (0x11C40, 0x11C40, B),
    (0x11C50, 0x11C6C, B),
    (0x11C72, 0x11C8F, B),
    (0x11C92, 0x11CA7, SUB),
    (0x11CA9, 0x11CAF, SUB),
    (0x11CB0, 0x11CB0, VAbv),
    (0x11CB1, 0x11CB1, VPst),
    (0x11CB2, 0x11CB2, VBlw),
    (0x11CB3, 0x11CB3, VAbv),
    (0x11CB4, 0x11CB4, VPst),
    (0x11CB5, 0x11CB6, VMAbv),
    (0x11D00, 0x11D06, B),
    (0x11D08, 0x11D09, B),
    (0x11D0B, 0x11D30, B),
    (0x11D31, 0x11D33, VAbv),
    (0x11D34, 0x11D36, VBlw),
    (0x11D3A, 0x11D3A, VAbv),
    (0x11D3C, 0x11D3D, VAbv),
    (0x11D3F, 0x11D3F, VAbv),
    (0x11D40, 0x11D41, VMAbv),
    (0x11D42, 0x11D42, CMBlw),
    (0x11D43, 0x11D43, VMAbv),
    (0x11D44, 0x11D45, H),
    (0x11D46, 0x11D46, R),
    (0x11D47, 0x11D47, VMAbv),
    (0x11D50, 0x11D59, B),
    (0x11D60, 0x11D65, B),
    (0x11D67, 0x11D68, B),
    (0x11D6A, 0x11D89, B),
    (0x11D8A, 0x11D8E, VPst),
    (0x11D90, 0x11D91, VAbv),
    (0x11D93, 0x11D94, VPst),
    (0x11D95, 0x11D95, VMAbv),
    (0x11D96, 0x11D96, VMPst),
    (0x11D97, 0x11D97, H),
    (0x11D98, 0x11D98, B),
    (0x11DA0, 0x11DA9, B),
    (0x11EE0, 0x11EF2, B),
    (0x11EF3, 0x11EF3, VAbv),
    (0x11EF4, 0x11EF4, VBlw),
    (0x11EF5, 0x11EF5, VPre),
    (0x11EF6, 0x11EF6, VPst),
];

pub fn get_category(u: u32) -> Category {
    use core::cmp::Ordering;

    TABLE
        .binary_search_by(|&(start, end, _)| {
            if u < start {
                Ordering::Greater
            } else if u > end {
                Ordering::Less
            } else {
                Ordering::Equal
            }
        })
        .map_or(O, |i| TABLE[i].2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_are_sorted() {
        assert!(TABLE.windows(2).all(|w| w[0].1 < w[1].0));
    }

    #[test]
    fn balinese() {
        assert_eq!(get_category(0x1B03), FAbv);
        assert_eq!(get_category(0x1B13), B);
        assert_eq!(get_category(0x1B34), CMAbv);
        assert_eq!(get_category(0x1B36), VAbv);
        assert_eq!(get_category(0x1B38), VBlw);
        assert_eq!(get_category(0x1B3A), VBlw);
        assert_eq!(get_category(0x1B3C), VBlw);
        assert_eq!(get_category(0x1B3E), VPre);
        assert_eq!(get_category(0x1B3F), VPre);
        assert_eq!(get_category(0x1B41), VPre);
        assert_eq!(get_category(0x1B44), H);
        assert_eq!(get_category(0x1B6C), SMBlw);
    }

    #[test]
    fn javanese_and_sundanese() {
        assert_eq!(get_category(0xA9B3), CMAbv);
        assert_eq!(get_category(0xA9BA), VPre);
        assert_eq!(get_category(0xA9BB), VPre);
        assert_eq!(get_category(0xA9C0), H);
        assert_eq!(get_category(0x1BA5), VBlw);
        assert_eq!(get_category(0x1BA6), VPre);
        assert_eq!(get_category(0x1BAB), IS);
    }

    #[test]
    fn devanagari() {
        assert_eq!(get_category(0x0915), B);
        assert_eq!(get_category(0x093A), VAbv);
        assert_eq!(get_category(0x094D), H);
        assert_eq!(get_category(0x093F), VPre);
        assert_eq!(get_category(0x093C), CMBlw);
    }

    #[test]
    fn shared() {
        assert_eq!(get_category(0x25CC), GB);
        assert_eq!(get_category(0x200C), ZWNJ);
        assert_eq!(get_category(0x0041), O);
    }
}
