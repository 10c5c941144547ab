//! Indic syllabic categories and matra positions, derived from the per-script
//! character tables of the Indic shaping documents.
//!
//! Code points missing from the table are `X` at `END`.

use super::indic::{category::*, position::*, Category, Position};

#[rustfmt::skip]
const TABLE: &[(u32, Category, Position)] = &[
    (0x00A0, PLACEHOLDER, BASE_C),
    (0x00B2, SM, SMVD),
    (0x00B3, SM, SMVD),
    (0x00D7, PLACEHOLDER, BASE_C),
    (0x0900, SM, SMVD),
    (0x0901, SM, SMVD),
    (0x0902, SM, SMVD),
    (0x0903, SM, SMVD),
    (0x0904, V, BASE_C),
    (0x0905, V, BASE_C),
    (0x0906, V, BASE_C),
    (0x0907, V, BASE_C),
    (0x0908, V, BASE_C),
    (0x0909, V, BASE_C),
    (0x090A, V, BASE_C),
    (0x090B, V, BASE_C),
    (0x090C, V, BASE_C),
    (0x090D, V, BASE_C),
    (0x090E, V, BASE_C),
    (0x090F, V, BASE_C),
    (0x0910, V, BASE_C),
    (0x0911, V, BASE_C),
    (0x0912, V, BASE_C),
    (0x0913, V, BASE_C),
    (0x0914, V, BASE_C),
    (0x0915, C, BASE_C),
    (0x0916, C, BASE_C),
    (0x0917, C, BASE_C),
    (0x0918, C, BASE_C),
    (0x0919, C, BASE_C),
    (0x091A, C, BASE_C),
    (0x091B, C, BASE_C),
    (0x091C, C, BASE_C),
    (0x091D, C, BASE_C),
    (0x091E, C, BASE_C),
    (0x091F, C, BASE_C),
    (0x0920, C, BASE_C),
    (0x0921, C, BASE_C),
    (0x0922, C, BASE_C),
    (0x0923, C, BASE_C),
    (0x0924, C, BASE_C),
    (0x0925, C, BASE_C),
    (0x0926, C, BASE_C),
    (0x0927, C, BASE_C),
    (0x0928, C, BASE_C),
    (0x0929, C, BASE_C),
    (0x092A, C, BASE_C),
    (0x092B, C, BASE_C),
    (0x092C, C, BASE_C),
    (0x092D, C, BASE_C),
    (0x092E, C, BASE_C),
    (0x092F, C, BASE_C),
    (0x0930, RA, BASE_C),
    (0x0931, C, BASE_C),
    (0x0932, C, BASE_C),
    (0x0933, C, BASE_C),
    (0x0934, C, BASE_C),
    (0x0935, C, BASE_C),
    (0x0936, C, BASE_C),
    (0x0937, C, BASE_C),
    (0x0938, C, BASE_C),
    (0x0939, C, BASE_C),
    (0x093A, M, AFTER_SUB),
    (0x093B, M, AFTER_SUB),
    (0x093C, N, END),
    (0x093D, SYMBOL, SMVD),
    (0x093E, M, AFTER_SUB),
    (0x093F, M, PRE_M),
    (0x0940, M, AFTER_SUB),
    (0x0941, M, AFTER_SUB),
    (0x0942, M, AFTER_SUB),
    (0x0943, M, AFTER_SUB),
    (0x0944, M, AFTER_SUB),
    (0x0945, M, AFTER_SUB),
    (0x0946, M, AFTER_SUB),
    (0x0947, M, AFTER_SUB),
    (0x0948, M, AFTER_SUB),
    (0x0949, M, AFTER_SUB),
    (0x094A, M, AFTER_SUB),
    (0x094B, M, AFTER_SUB),
    (0x094C, M, AFTER_SUB),
    (0x094D, H, END),
    (0x094E, M, PRE_M),
    (0x094F, M, AFTER_SUB),
    (0x0951, A, SMVD),
    (0x0952, A, SMVD),
    (0x0953, SM, SMVD),
    (0x0954, SM, SMVD),
    (0x0955, M, AFTER_SUB),
    (0x0956, M, AFTER_SUB),
    (0x0957, M, AFTER_SUB),
    (0x0958, C, BASE_C),
    (0x0959, C, BASE_C),
    (0x095A, C, BASE_C),
    (0x095B, C, BASE_C),
    (0x095C, C, BASE_C),
    (0x095D, C, BASE_C),
    (0x095E, C, BASE_C),
    (0x095F, C, BASE_C),
    (0x0960, V, BASE_C),
    (0x0961, V, BASE_C),
    (0x0962, M, AFTER_SUB),
    (0x0963, M, AFTER_SUB),
    (0x0966, PLACEHOLDER, BASE_C),
    (0x0967, PLACEHOLDER, BASE_C),
    (0x0968, PLACEHOLDER, BASE_C),
    (0x0969, PLACEHOLDER, BASE_C),
    (0x096A, PLACEHOLDER, BASE_C),
    (0x096B, PLACEHOLDER, BASE_C),
    (0x096C, PLACEHOLDER, BASE_C),
    (0x096D, PLACEHOLDER, BASE_C),
    (0x096E, PLACEHOLDER, BASE_C),
    (0x096F, PLACEHOLDER, BASE_C),
    (0x0972, V, BASE_C),
    (0x0973, V, BASE_C),
    (0x0974, V, BASE_C),
    (0x0975, V, BASE_C),
    (0x0976, V, BASE_C),
    (0x0977, V, BASE_C),
    (0x0978, C, BASE_C),
    (0x0979, C, BASE_C),
    (0x097A, C, BASE_C),
    (0x097B, C, BASE_C),
    (0x097C, C, BASE_C),
    (0x097D, C, BASE_C),
    (0x097E, C, BASE_C),
    (0x097F, C, BASE_C),
    (0x0980, PLACEHOLDER, BASE_C),
    (0x0981, SM, SMVD),
    (0x0982, SM, SMVD),
    (0x0983, SM, SMVD),
    (0x0985, V, BASE_C),
    (0x0986, V, BASE_C),
    (0x0987, V, BASE_C),
    (0x0988, V, BASE_C),
    (0x0989, V, BASE_C),
    (0x098A, V, BASE_C),
    (0x098B, V, BASE_C),
    (0x098C, V, BASE_C),
    (0x098F, V, BASE_C),
    (0x0990, V, BASE_C),
    (0x0993, V, BASE_C),
    (0x0994, V, BASE_C),
    (0x0995, C, BASE_C),
    (0x0996, C, BASE_C),
    (0x0997, C, BASE_C),
    (0x0998, C, BASE_C),
    (0x0999, C, BASE_C),
    (0x099A, C, BASE_C),
    (0x099B, C, BASE_C),
    (0x099C, C, BASE_C),
    (0x099D, C, BASE_C),
    (0x099E, C, BASE_C),
    (0x099F, C, BASE_C),
    (0x09A0, C, BASE_C),
    (0x09A1, C, BASE_C),
    (0x09A2, C, BASE_C),
    (0x09A3, C, BASE_C),
    (0x09A4, C, BASE_C),
    (0x09A5, C, BASE_C),
    (0x09A6, C, BASE_C),
    (0x09A7, C, BASE_C),
    (0x09A8, C, BASE_C),
    (0x09AA, C, BASE_C),
    (0x09AB, C, BASE_C),
    (0x09AC, C, BASE_C),
    (0x09AD, C, BASE_C),
    (0x09AE, C, BASE_C),
    (0x09AF, C, BASE_C),
    (0x09B0, RA, BASE_C),
    (0x09B2, C, BASE_C),
    (0x09B6, C, BASE_C),
    (0x09B7, C, BASE_C),
    (0x09B8, C, BASE_C),
    (0x09B9, C, BASE_C),
    (0x09BC, N, END),
    (0x09BD, SYMBOL, SMVD),
    (0x09BE, M, AFTER_POST),
    (0x09BF, M, PRE_M),
    (0x09C0, M, AFTER_POST),
    (0x09C1, M, AFTER_SUB),
    (0x09C2, M, AFTER_SUB),
    (0x09C3, M, AFTER_SUB),
    (0x09C4, M, AFTER_SUB),
    (0x09C7, M, PRE_M),
    (0x09C8, M, PRE_M),
    (0x09CB, M, AFTER_POST),
    (0x09CC, M, AFTER_POST),
    (0x09CD, H, END),
    (0x09CE, C, BASE_C),
    (0x09D7, M, AFTER_POST),
    (0x09DC, C, BASE_C),
    (0x09DD, C, BASE_C),
    (0x09DF, C, BASE_C),
    (0x09E0, V, BASE_C),
    (0x09E1, V, BASE_C),
    (0x09E2, M, AFTER_SUB),
    (0x09E3, M, AFTER_SUB),
    (0x09E6, PLACEHOLDER, BASE_C),
    (0x09E7, PLACEHOLDER, BASE_C),
    (0x09E8, PLACEHOLDER, BASE_C),
    (0x09E9, PLACEHOLDER, BASE_C),
    (0x09EA, PLACEHOLDER, BASE_C),
    (0x09EB, PLACEHOLDER, BASE_C),
    (0x09EC, PLACEHOLDER, BASE_C),
    (0x09ED, PLACEHOLDER, BASE_C),
    (0x09EE, PLACEHOLDER, BASE_C),
    (0x09EF, PLACEHOLDER, BASE_C),
    (0x09F0, RA, BASE_C),
    (0x09F1, C, BASE_C),
    (0x09F2, SYMBOL, SMVD),
    (0x09F3, SYMBOL, SMVD),
    (0x09F4, PLACEHOLDER, BASE_C),
    (0x09F5, PLACEHOLDER, BASE_C),
    (0x09F6, PLACEHOLDER, BASE_C),
    (0x09F7, PLACEHOLDER, BASE_C),
    (0x09F8, PLACEHOLDER, BASE_C),
    (0x09F9, PLACEHOLDER, BASE_C),
    (0x09FA, SYMBOL, SMVD),
    (0x09FB, SYMBOL, SMVD),
    (0x09FC, PLACEHOLDER, BASE_C),
    (0x09FE, SM, SMVD),
    (0x0A01, SM, SMVD),
    (0x0A02, SM, SMVD),
    (0x0A03, SM, SMVD),
    (0x0A05, V, BASE_C),
    (0x0A06, V, BASE_C),
    (0x0A07, V, BASE_C),
    (0x0A08, V, BASE_C),
    (0x0A09, V, BASE_C),
    (0x0A0A, V, BASE_C),
    (0x0A0F, V, BASE_C),
    (0x0A10, V, BASE_C),
    (0x0A13, V, BASE_C),
    (0x0A14, V, BASE_C),
    (0x0A15, C, BASE_C),
    (0x0A16, C, BASE_C),
    (0x0A17, C, BASE_C),
    (0x0A18, C, BASE_C),
    (0x0A19, C, BASE_C),
    (0x0A1A, C, BASE_C),
    (0x0A1B, C, BASE_C),
    (0x0A1C, C, BASE_C),
    (0x0A1D, C, BASE_C),
    (0x0A1E, C, BASE_C),
    (0x0A1F, C, BASE_C),
    (0x0A20, C, BASE_C),
    (0x0A21, C, BASE_C),
    (0x0A22, C, BASE_C),
    (0x0A23, C, BASE_C),
    (0x0A24, C, BASE_C),
    (0x0A25, C, BASE_C),
    (0x0A26, C, BASE_C),
    (0x0A27, C, BASE_C),
    (0x0A28, C, BASE_C),
    (0x0A2A, C, BASE_C),
    (0x0A2B, C, BASE_C),
    (0x0A2C, C, BASE_C),
    (0x0A2D, C, BASE_C),
    (0x0A2E, C, BASE_C),
    (0x0A2F, C, BASE_C),
    (0x0A30, RA, BASE_C),
    (0x0A32, C, BASE_C),
    (0x0A33, C, BASE_C),
    (0x0A35, C, BASE_C),
    (0x0A36, C, BASE_C),
    (0x0A38, C, BASE_C),
    (0x0A39, C, BASE_C),
    (0x0A3C, N, END),
    (0x0A3E, M, AFTER_POST),
    (0x0A3F, M, PRE_M),
    (0x0A40, M, AFTER_POST),
    (0x0A41, M, AFTER_POST),
    (0x0A42, M, AFTER_POST),
    (0x0A47, M, AFTER_POST),
    (0x0A48, M, AFTER_POST),
    (0x0A4B, M, AFTER_POST),
    (0x0A4C, M, AFTER_POST),
    (0x0A4D, H, END),
    (0x0A51, A, SMVD),
    (0x0A59, C, BASE_C),
    (0x0A5A, C, BASE_C),
    (0x0A5B, C, BASE_C),
    (0x0A5C, C, BASE_C),
    (0x0A5E, C, BASE_C),
    (0x0A66, PLACEHOLDER, BASE_C),
    (0x0A67, PLACEHOLDER, BASE_C),
    (0x0A68, PLACEHOLDER, BASE_C),
    (0x0A69, PLACEHOLDER, BASE_C),
    (0x0A6A, PLACEHOLDER, BASE_C),
    (0x0A6B, PLACEHOLDER, BASE_C),
    (0x0A6C, PLACEHOLDER, BASE_C),
    (0x0A6D, PLACEHOLDER, BASE_C),
    (0x0A6E, PLACEHOLDER, BASE_C),
    (0x0A6F, PLACEHOLDER, BASE_C),
    (0x0A70, SM, SMVD),
    (0x0A71, SM, SMVD),
    (0x0A72, PLACEHOLDER, BASE_C),
    (0x0A73, PLACEHOLDER, BASE_C),
    (0x0A75, CM, BASE_C),
    (0x0A81, SM, SMVD),
    (0x0A82, SM, SMVD),
    (0x0A83, SM, SMVD),
    (0x0A85, V, BASE_C),
    (0x0A86, V, BASE_C),
    (0x0A87, V, BASE_C),
    (0x0A88, V, BASE_C),
    (0x0A89, V, BASE_C),
    (0x0A8A, V, BASE_C),
    (0x0A8B, V, BASE_C),
    (0x0A8C, V, BASE_C),
    (0x0A8D, V, BASE_C),
    (0x0A8F, V, BASE_C),
    (0x0A90, V, BASE_C),
    (0x0A91, V, BASE_C),
    (0x0A93, V, BASE_C),
    (0x0A94, V, BASE_C),
    (0x0A95, C, BASE_C),
    (0x0A96, C, BASE_C),
    (0x0A97, C, BASE_C),
    (0x0A98, C, BASE_C),
    (0x0A99, C, BASE_C),
    (0x0A9A, C, BASE_C),
    (0x0A9B, C, BASE_C),
    (0x0A9C, C, BASE_C),
    (0x0A9D, C, BASE_C),
    (0x0A9E, C, BASE_C),
    (0x0A9F, C, BASE_C),
    (0x0AA0, C, BASE_C),
    (0x0AA1, C, BASE_C),
    (0x0AA2, C, BASE_C),
    (0x0AA3, C, BASE_C),
    (0x0AA4, C, BASE_C),
    (0x0AA5, C, BASE_C),
    (0x0AA6, C, BASE_C),
    (0x0AA7, C, BASE_C),
    (0x0AA8, C, BASE_C),
    (0x0AAA, C, BASE_C),
    (0x0AAB, C, BASE_C),
    (0x0AAC, C, BASE_C),
    (0x0AAD, C, BASE_C),
    (0x0AAE, C, BASE_C),
    (0x0AAF, C, BASE_C),
    (0x0AB0, RA, BASE_C),
    (0x0AB2, C, BASE_C),
    (0x0AB3, C, BASE_C),
    (0x0AB5, C, BASE_C),
    (0x0AB6, C, BASE_C),
    (0x0AB7, C, BASE_C),
    (0x0AB8, C, BASE_C),
    (0x0AB9, C, BASE_C),
    (0x0ABC, N, END),
    (0x0ABD, SYMBOL, SMVD),
    (0x0ABE, M, AFTER_POST),
    (0x0ABF, M, PRE_M),
    (0x0AC0, M, AFTER_POST),
    (0x0AC1, M, AFTER_POST),
    (0x0AC2, M, AFTER_POST),
    (0x0AC3, M, AFTER_POST),
    (0x0AC4, M, AFTER_POST),
    (0x0AC5, M, AFTER_SUB),
    (0x0AC7, M, AFTER_SUB),
    (0x0AC8, M, AFTER_SUB),
    (0x0AC9, M, AFTER_POST),
    (0x0ACB, M, AFTER_POST),
    (0x0ACC, M, AFTER_POST),
    (0x0ACD, H, END),
    (0x0AE0, V, BASE_C),
    (0x0AE1, V, BASE_C),
    (0x0AE2, M, AFTER_POST),
    (0x0AE3, M, AFTER_POST),
    (0x0AE6, PLACEHOLDER, BASE_C),
    (0x0AE7, PLACEHOLDER, BASE_C),
    (0x0AE8, PLACEHOLDER, BASE_C),
    (0x0AE9, PLACEHOLDER, BASE_C),
    (0x0AEA, PLACEHOLDER, BASE_C),
    (0x0AEB, PLACEHOLDER, BASE_C),
    (0x0AEC, PLACEHOLDER, BASE_C),
    (0x0AED, PLACEHOLDER, BASE_C),
    (0x0AEE, PLACEHOLDER, BASE_C),
    (0x0AEF, PLACEHOLDER, BASE_C),
    (0x0AF0, SYMBOL, SMVD),
    (0x0AF1, SYMBOL, SMVD),
    (0x0AF9, C, BASE_C),
    (0x0AFA, A, SMVD),
    (0x0AFB, A, SMVD),
    (0x0AFC, A, SMVD),
    (0x0AFD, N, END),
    (0x0AFE, N, END),
    (0x0AFF, N, END),
    (0x0B01, SM, BEFORE_SUB),
    (0x0B02, SM, SMVD),
    (0x0B03, SM, SMVD),
    (0x0B05, V, BASE_C),
    (0x0B06, V, BASE_C),
    (0x0B07, V, BASE_C),
    (0x0B08, V, BASE_C),
    (0x0B09, V, BASE_C),
    (0x0B0A, V, BASE_C),
    (0x0B0B, V, BASE_C),
    (0x0B0C, V, BASE_C),
    (0x0B0F, V, BASE_C),
    (0x0B10, V, BASE_C),
    (0x0B13, V, BASE_C),
    (0x0B14, V, BASE_C),
    (0x0B15, C, BASE_C),
    (0x0B16, C, BASE_C),
    (0x0B17, C, BASE_C),
    (0x0B18, C, BASE_C),
    (0x0B19, C, BASE_C),
    (0x0B1A, C, BASE_C),
    (0x0B1B, C, BASE_C),
    (0x0B1C, C, BASE_C),
    (0x0B1D, C, BASE_C),
    (0x0B1E, C, BASE_C),
    (0x0B1F, C, BASE_C),
    (0x0B20, C, BASE_C),
    (0x0B21, C, BASE_C),
    (0x0B22, C, BASE_C),
    (0x0B23, C, BASE_C),
    (0x0B24, C, BASE_C),
    (0x0B25, C, BASE_C),
    (0x0B26, C, BASE_C),
    (0x0B27, C, BASE_C),
    (0x0B28, C, BASE_C),
    (0x0B2A, C, BASE_C),
    (0x0B2B, C, BASE_C),
    (0x0B2C, C, BASE_C),
    (0x0B2D, C, BASE_C),
    (0x0B2E, C, BASE_C),
    (0x0B2F, C, BASE_C),
    (0x0B30, RA, BASE_C),
    (0x0B32, C, BASE_C),
    (0x0B33, C, BASE_C),
    (0x0B35, C, BASE_C),
    (0x0B36, C, BASE_C),
    (0x0B37, C, BASE_C),
    (0x0B38, C, BASE_C),
    (0x0B39, C, BASE_C),
    (0x0B3C, N, END),
    (0x0B3D, SYMBOL, SMVD),
    (0x0B3E, M, AFTER_POST),
    (0x0B3F, M, AFTER_MAIN),
    (0x0B40, M, AFTER_POST),
    (0x0B41, M, AFTER_SUB),
    (0x0B42, M, AFTER_SUB),
    (0x0B43, M, AFTER_SUB),
    (0x0B44, M, AFTER_SUB),
    (0x0B47, M, PRE_M),
    (0x0B48, M, AFTER_POST),
    (0x0B4B, M, AFTER_POST),
    (0x0B4C, M, AFTER_POST),
    (0x0B4D, H, END),
    (0x0B56, M, AFTER_MAIN),
    (0x0B57, M, AFTER_POST),
    (0x0B5C, C, BASE_C),
    (0x0B5D, C, BASE_C),
    (0x0B5F, C, BASE_C),
    (0x0B60, V, BASE_C),
    (0x0B61, V, BASE_C),
    (0x0B62, M, AFTER_SUB),
    (0x0B63, M, AFTER_SUB),
    (0x0B66, PLACEHOLDER, BASE_C),
    (0x0B67, PLACEHOLDER, BASE_C),
    (0x0B68, PLACEHOLDER, BASE_C),
    (0x0B69, PLACEHOLDER, BASE_C),
    (0x0B6A, PLACEHOLDER, BASE_C),
    (0x0B6B, PLACEHOLDER, BASE_C),
    (0x0B6C, PLACEHOLDER, BASE_C),
    (0x0B6D, PLACEHOLDER, BASE_C),
    (0x0B6E, PLACEHOLDER, BASE_C),
    (0x0B6F, PLACEHOLDER, BASE_C),
    (0x0B70, SYMBOL, SMVD),
    (0x0B71, C, BASE_C),
    (0x0B72, PLACEHOLDER, BASE_C),
    (0x0B73, PLACEHOLDER, BASE_C),
    (0x0B74, PLACEHOLDER, BASE_C),
    (0x0B75, PLACEHOLDER, BASE_C),
    (0x0B76, PLACEHOLDER, BASE_C),
    (0x0B77, PLACEHOLDER, BASE_C),
    (0x0B82, SM, SMVD),
    (0x0B85, V, BASE_C),
    (0x0B86, V, BASE_C),
    (0x0B87, V, BASE_C),
    (0x0B88, V, BASE_C),
    (0x0B89, V, BASE_C),
    (0x0B8A, V, BASE_C),
    (0x0B8E, V, BASE_C),
    (0x0B8F, V, BASE_C),
    (0x0B90, V, BASE_C),
    (0x0B92, V, BASE_C),
    (0x0B93, V, BASE_C),
    (0x0B94, V, BASE_C),
    (0x0B95, C, BASE_C),
    (0x0B99, C, BASE_C),
    (0x0B9A, C, BASE_C),
    (0x0B9C, C, BASE_C),
    (0x0B9E, C, BASE_C),
    (0x0B9F, C, BASE_C),
    (0x0BA3, C, BASE_C),
    (0x0BA4, C, BASE_C),
    (0x0BA8, C, BASE_C),
    (0x0BA9, C, BASE_C),
    (0x0BAA, C, BASE_C),
    (0x0BAE, C, BASE_C),
    (0x0BAF, C, BASE_C),
    (0x0BB0, RA, BASE_C),
    (0x0BB1, C, BASE_C),
    (0x0BB2, C, BASE_C),
    (0x0BB3, C, BASE_C),
    (0x0BB4, C, BASE_C),
    (0x0BB5, C, BASE_C),
    (0x0BB6, C, BASE_C),
    (0x0BB7, C, BASE_C),
    (0x0BB8, C, BASE_C),
    (0x0BB9, C, BASE_C),
    (0x0BBE, M, AFTER_POST),
    (0x0BBF, M, AFTER_POST),
    (0x0BC0, M, AFTER_SUB),
    (0x0BC1, M, AFTER_POST),
    (0x0BC2, M, AFTER_POST),
    (0x0BC6, M, PRE_M),
    (0x0BC7, M, PRE_M),
    (0x0BC8, M, PRE_M),
    (0x0BCA, M, AFTER_POST),
    (0x0BCB, M, AFTER_POST),
    (0x0BCC, M, AFTER_POST),
    (0x0BCD, H, END),
    (0x0BD7, M, AFTER_POST),
    (0x0BE6, PLACEHOLDER, BASE_C),
    (0x0BE7, PLACEHOLDER, BASE_C),
    (0x0BE8, PLACEHOLDER, BASE_C),
    (0x0BE9, PLACEHOLDER, BASE_C),
    (0x0BEA, PLACEHOLDER, BASE_C),
    (0x0BEB, PLACEHOLDER, BASE_C),
    (0x0BEC, PLACEHOLDER, BASE_C),
    (0x0BED, PLACEHOLDER, BASE_C),
    (0x0BEE, PLACEHOLDER, BASE_C),
    (0x0BEF, PLACEHOLDER, BASE_C),
    (0x0BF0, PLACEHOLDER, BASE_C),
    (0x0BF1, PLACEHOLDER, BASE_C),
    (0x0BF2, PLACEHOLDER, BASE_C),
    (0x0BF3, SYMBOL, SMVD),
    (0x0BF4, SYMBOL, SMVD),
    (0x0BF5, SYMBOL, SMVD),
    (0x0BF6, SYMBOL, SMVD),
    (0x0BF7, SYMBOL, SMVD),
    (0x0BF8, SYMBOL, SMVD),
    (0x0BF9, SYMBOL, SMVD),
    (0x0BFA, SYMBOL, SMVD),
    (0x0C00, SM, SMVD),
    (0x0C01, SM, SMVD),
    (0x0C02, SM, SMVD),
    (0x0C03, SM, SMVD),
    (0x0C04, SM, SMVD),
    (0x0C05, V, BASE_C),
    (0x0C06, V, BASE_C),
    (0x0C07, V, BASE_C),
    (0x0C08, V, BASE_C),
    (0x0C09, V, BASE_C),
    (0x0C0A, V, BASE_C),
    (0x0C0B, V, BASE_C),
    (0x0C0C, V, BASE_C),
    (0x0C0E, V, BASE_C),
    (0x0C0F, V, BASE_C),
    (0x0C10, V, BASE_C),
    (0x0C12, V, BASE_C),
    (0x0C13, V, BASE_C),
    (0x0C14, V, BASE_C),
    (0x0C15, C, BASE_C),
    (0x0C16, C, BASE_C),
    (0x0C17, C, BASE_C),
    (0x0C18, C, BASE_C),
    (0x0C19, C, BASE_C),
    (0x0C1A, C, BASE_C),
    (0x0C1B, C, BASE_C),
    (0x0C1C, C, BASE_C),
    (0x0C1D, C, BASE_C),
    (0x0C1E, C, BASE_C),
    (0x0C1F, C, BASE_C),
    (0x0C20, C, BASE_C),
    (0x0C21, C, BASE_C),
    (0x0C22, C, BASE_C),
    (0x0C23, C, BASE_C),
    (0x0C24, C, BASE_C),
    (0x0C25, C, BASE_C),
    (0x0C26, C, BASE_C),
    (0x0C27, C, BASE_C),
    (0x0C28, C, BASE_C),
    (0x0C2A, C, BASE_C),
    (0x0C2B, C, BASE_C),
    (0x0C2C, C, BASE_C),
    (0x0C2D, C, BASE_C),
    (0x0C2E, C, BASE_C),
    (0x0C2F, C, BASE_C),
    (0x0C30, RA, BASE_C),
    (0x0C31, C, BASE_C),
    (0x0C32, C, BASE_C),
    (0x0C33, C, BASE_C),
    (0x0C34, C, BASE_C),
    (0x0C35, C, BASE_C),
    (0x0C36, C, BASE_C),
    (0x0C37, C, BASE_C),
    (0x0C38, C, BASE_C),
    (0x0C39, C, BASE_C),
    (0x0C3D, SYMBOL, SMVD),
    (0x0C3E, M, BEFORE_SUB),
    (0x0C3F, M, BEFORE_SUB),
    (0x0C40, M, BEFORE_SUB),
    (0x0C41, M, BEFORE_SUB),
    (0x0C42, M, BEFORE_SUB),
    (0x0C43, M, AFTER_SUB),
    (0x0C44, M, AFTER_SUB),
    (0x0C46, M, BEFORE_SUB),
    (0x0C47, M, BEFORE_SUB),
    (0x0C48, M, AFTER_SUB),
    (0x0C4A, M, BEFORE_SUB),
    (0x0C4B, M, BEFORE_SUB),
    (0x0C4C, M, BEFORE_SUB),
    (0x0C4D, H, END),
    (0x0C55, M, BEFORE_SUB),
    (0x0C56, M, BEFORE_SUB),
    (0x0C58, C, BASE_C),
    (0x0C59, C, BASE_C),
    (0x0C5A, C, BASE_C),
    (0x0C60, V, BASE_C),
    (0x0C61, V, BASE_C),
    (0x0C62, M, BEFORE_SUB),
    (0x0C63, M, BEFORE_SUB),
    (0x0C66, PLACEHOLDER, BASE_C),
    (0x0C67, PLACEHOLDER, BASE_C),
    (0x0C68, PLACEHOLDER, BASE_C),
    (0x0C69, PLACEHOLDER, BASE_C),
    (0x0C6A, PLACEHOLDER, BASE_C),
    (0x0C6B, PLACEHOLDER, BASE_C),
    (0x0C6C, PLACEHOLDER, BASE_C),
    (0x0C6D, PLACEHOLDER, BASE_C),
    (0x0C6E, PLACEHOLDER, BASE_C),
    (0x0C6F, PLACEHOLDER, BASE_C),
    (0x0C78, PLACEHOLDER, BASE_C),
    (0x0C79, PLACEHOLDER, BASE_C),
    (0x0C7A, PLACEHOLDER, BASE_C),
    (0x0C7B, PLACEHOLDER, BASE_C),
    (0x0C7C, PLACEHOLDER, BASE_C),
    (0x0C7D, PLACEHOLDER, BASE_C),
    (0x0C7E, PLACEHOLDER, BASE_C),
    (0x0C7F, SYMBOL, SMVD),
    (0x0C81, SM, SMVD),
    (0x0C82, SM, SMVD),
    (0x0C83, SM, SMVD),
    (0x0C85, V, BASE_C),
    (0x0C86, V, BASE_C),
    (0x0C87, V, BASE_C),
    (0x0C88, V, BASE_C),
    (0x0C89, V, BASE_C),
    (0x0C8A, V, BASE_C),
    (0x0C8B, V, BASE_C),
    (0x0C8C, V, BASE_C),
    (0x0C8E, V, BASE_C),
    (0x0C8F, V, BASE_C),
    (0x0C90, V, BASE_C),
    (0x0C92, V, BASE_C),
    (0x0C93, V, BASE_C),
    (0x0C94, V, BASE_C),
    (0x0C95, C, BASE_C),
    (0x0C96, C, BASE_C),
    (0x0C97, C, BASE_C),
    (0x0C98, C, BASE_C),
    (0x0C99, C, BASE_C),
    (0x0C9A, C, BASE_C),
    (0x0C9B, C, BASE_C),
    (0x0C9C, C, BASE_C),
    (0x0C9D, C, BASE_C),
    (0x0C9E, C, BASE_C),
    (0x0C9F, C, BASE_C),
    (0x0CA0, C, BASE_C),
    (0x0CA1, C, BASE_C),
    (0x0CA2, C, BASE_C),
    (0x0CA3, C, BASE_C),
    (0x0CA4, C, BASE_C),
    (0x0CA5, C, BASE_C),
    (0x0CA6, C, BASE_C),
    (0x0CA7, C, BASE_C),
    (0x0CA8, C, BASE_C),
    (0x0CAA, C, BASE_C),
    (0x0CAB, C, BASE_C),
    (0x0CAC, C, BASE_C),
    (0x0CAD, C, BASE_C),
    (0x0CAE, C, BASE_C),
    (0x0CAF, C, BASE_C),
    (0x0CB0, RA, BASE_C),
    (0x0CB1, C, BASE_C),
    (0x0CB2, C, BASE_C),
    (0x0CB3, C, BASE_C),
    (0x0CB5, C, BASE_C),
    (0x0CB6, C, BASE_C),
    (0x0CB7, C, BASE_C),
    (0x0CB8, C, BASE_C),
    (0x0CB9, C, BASE_C),
    (0x0CBC, N, END),
    (0x0CBD, SYMBOL, SMVD),
    (0x0CBE, M, BEFORE_SUB),
    (0x0CBF, M, BEFORE_SUB),
    (0x0CC0, M, BEFORE_SUB),
    (0x0CC1, M, BEFORE_SUB),
    (0x0CC2, M, BEFORE_SUB),
    (0x0CC3, M, AFTER_SUB),
    (0x0CC4, M, AFTER_SUB),
    (0x0CC6, M, BEFORE_SUB),
    (0x0CC7, M, AFTER_SUB),
    (0x0CC8, M, AFTER_SUB),
    (0x0CCA, M, AFTER_SUB),
    (0x0CCB, M, AFTER_SUB),
    (0x0CCC, M, BEFORE_SUB),
    (0x0CCD, H, END),
    (0x0CD5, M, AFTER_SUB),
    (0x0CD6, M, AFTER_SUB),
    (0x0CDE, C, BASE_C),
    (0x0CE0, V, BASE_C),
    (0x0CE1, V, BASE_C),
    (0x0CE2, M, BEFORE_SUB),
    (0x0CE3, M, BEFORE_SUB),
    (0x0CE6, PLACEHOLDER, BASE_C),
    (0x0CE7, PLACEHOLDER, BASE_C),
    (0x0CE8, PLACEHOLDER, BASE_C),
    (0x0CE9, PLACEHOLDER, BASE_C),
    (0x0CEA, PLACEHOLDER, BASE_C),
    (0x0CEB, PLACEHOLDER, BASE_C),
    (0x0CEC, PLACEHOLDER, BASE_C),
    (0x0CED, PLACEHOLDER, BASE_C),
    (0x0CEE, PLACEHOLDER, BASE_C),
    (0x0CEF, PLACEHOLDER, BASE_C),
    (0x0CF1, CS, BASE_C),
    (0x0CF2, CS, BASE_C),
    (0x0D00, SM, SMVD),
    (0x0D01, SM, SMVD),
    (0x0D02, SM, SMVD),
    (0x0D03, SM, SMVD),
    (0x0D05, V, BASE_C),
    (0x0D06, V, BASE_C),
    (0x0D07, V, BASE_C),
    (0x0D08, V, BASE_C),
    (0x0D09, V, BASE_C),
    (0x0D0A, V, BASE_C),
    (0x0D0B, V, BASE_C),
    (0x0D0C, V, BASE_C),
    (0x0D0E, V, BASE_C),
    (0x0D0F, V, BASE_C),
    (0x0D10, V, BASE_C),
    (0x0D12, V, BASE_C),
    (0x0D13, V, BASE_C),
    (0x0D14, V, BASE_C),
    (0x0D15, C, BASE_C),
    (0x0D16, C, BASE_C),
    (0x0D17, C, BASE_C),
    (0x0D18, C, BASE_C),
    (0x0D19, C, BASE_C),
    (0x0D1A, C, BASE_C),
    (0x0D1B, C, BASE_C),
    (0x0D1C, C, BASE_C),
    (0x0D1D, C, BASE_C),
    (0x0D1E, C, BASE_C),
    (0x0D1F, C, BASE_C),
    (0x0D20, C, BASE_C),
    (0x0D21, C, BASE_C),
    (0x0D22, C, BASE_C),
    (0x0D23, C, BASE_C),
    (0x0D24, C, BASE_C),
    (0x0D25, C, BASE_C),
    (0x0D26, C, BASE_C),
    (0x0D27, C, BASE_C),
    (0x0D28, C, BASE_C),
    (0x0D29, C, BASE_C),
    (0x0D2A, C, BASE_C),
    (0x0D2B, C, BASE_C),
    (0x0D2C, C, BASE_C),
    (0x0D2D, C, BASE_C),
    (0x0D2E, C, BASE_C),
    (0x0D2F, C, BASE_C),
    (0x0D30, RA, BASE_C),
    (0x0D31, C, BASE_C),
    (0x0D32, C, BASE_C),
    (0x0D33, C, BASE_C),
    (0x0D34, C, BASE_C),
    (0x0D35, C, BASE_C),
    (0x0D36, C, BASE_C),
    (0x0D37, C, BASE_C),
    (0x0D38, C, BASE_C),
    (0x0D39, C, BASE_C),
    (0x0D3A, C, BASE_C),
    (0x0D3B, M, AFTER_SUB),
    (0x0D3C, M, AFTER_SUB),
    (0x0D3D, SYMBOL, SMVD),
    (0x0D3E, M, AFTER_POST),
    (0x0D3F, M, AFTER_POST),
    (0x0D40, M, AFTER_POST),
    (0x0D41, M, AFTER_POST),
    (0x0D42, M, AFTER_POST),
    (0x0D43, M, AFTER_POST),
    (0x0D44, M, AFTER_POST),
    (0x0D46, M, PRE_M),
    (0x0D47, M, PRE_M),
    (0x0D48, M, PRE_M),
    (0x0D4A, M, AFTER_POST),
    (0x0D4B, M, AFTER_POST),
    (0x0D4C, M, AFTER_POST),
    (0x0D4D, H, END),
    (0x0D4E, REPHA, END),
    (0x0D4F, SYMBOL, SMVD),
    (0x0D54, C, BASE_C),
    (0x0D55, C, BASE_C),
    (0x0D56, C, BASE_C),
    (0x0D57, M, AFTER_POST),
    (0x0D58, PLACEHOLDER, BASE_C),
    (0x0D59, PLACEHOLDER, BASE_C),
    (0x0D5A, PLACEHOLDER, BASE_C),
    (0x0D5B, PLACEHOLDER, BASE_C),
    (0x0D5C, PLACEHOLDER, BASE_C),
    (0x0D5D, PLACEHOLDER, BASE_C),
    (0x0D5E, PLACEHOLDER, BASE_C),
    (0x0D5F, V, BASE_C),
    (0x0D60, V, BASE_C),
    (0x0D61, V, BASE_C),
    (0x0D62, M, AFTER_POST),
    (0x0D63, M, AFTER_POST),
    (0x0D66, PLACEHOLDER, BASE_C),
    (0x0D67, PLACEHOLDER, BASE_C),
    (0x0D68, PLACEHOLDER, BASE_C),
    (0x0D69, PLACEHOLDER, BASE_C),
    (0x0D6A, PLACEHOLDER, BASE_C),
    (0x0D6B, PLACEHOLDER, BASE_C),
    (0x0D6C, PLACEHOLDER, BASE_C),
    (0x0D6D, PLACEHOLDER, BASE_C),
    (0x0D6E, PLACEHOLDER, BASE_C),
    (0x0D6F, PLACEHOLDER, BASE_C),
    (0x0D70, PLACEHOLDER, BASE_C),
    (0x0D71, PLACEHOLDER, BASE_C),
    (0x0D72, PLACEHOLDER, BASE_C),
    (0x0D73, PLACEHOLDER, BASE_C),
    (0x0D74, PLACEHOLDER, BASE_C),
    (0x0D75, PLACEHOLDER, BASE_C),
    (0x0D76, PLACEHOLDER, BASE_C),
    (0x0D77, PLACEHOLDER, BASE_C),
    (0x0D78, PLACEHOLDER, BASE_C),
    (0x0D79, SYMBOL, SMVD),
    (0x0D7A, C, BASE_C),
    (0x0D7B, C, BASE_C),
    (0x0D7C, C, BASE_C),
    (0x0D7D, C, BASE_C),
    (0x0D7E, C, BASE_C),
    (0x0D7F, C, BASE_C),
    (0x0D82, SM, SMVD),
    (0x0D83, SM, SMVD),
    (0x0D85, V, BASE_C),
    (0x0D86, V, BASE_C),
    (0x0D87, V, BASE_C),
    (0x0D88, V, BASE_C),
    (0x0D89, V, BASE_C),
    (0x0D8A, V, BASE_C),
    (0x0D8B, V, BASE_C),
    (0x0D8C, V, BASE_C),
    (0x0D8D, V, BASE_C),
    (0x0D8E, V, BASE_C),
    (0x0D8F, V, BASE_C),
    (0x0D90, V, BASE_C),
    (0x0D91, V, BASE_C),
    (0x0D92, V, BASE_C),
    (0x0D93, V, BASE_C),
    (0x0D94, V, BASE_C),
    (0x0D95, V, BASE_C),
    (0x0D96, V, BASE_C),
    (0x0D9A, C, BASE_C),
    (0x0D9B, C, BASE_C),
    (0x0D9C, C, BASE_C),
    (0x0D9D, C, BASE_C),
    (0x0D9E, C, BASE_C),
    (0x0D9F, C, BASE_C),
    (0x0DA0, C, BASE_C),
    (0x0DA1, C, BASE_C),
    (0x0DA2, C, BASE_C),
    (0x0DA3, C, BASE_C),
    (0x0DA4, C, BASE_C),
    (0x0DA5, C, BASE_C),
    (0x0DA6, C, BASE_C),
    (0x0DA7, C, BASE_C),
    (0x0DA8, C, BASE_C),
    (0x0DA9, C, BASE_C),
    (0x0DAA, C, BASE_C),
    (0x0DAB, C, BASE_C),
    (0x0DAC, C, BASE_C),
    (0x0DAD, C, BASE_C),
    (0x0DAE, C, BASE_C),
    (0x0DAF, C, BASE_C),
    (0x0DB0, C, BASE_C),
    (0x0DB1, C, BASE_C),
    (0x0DB3, C, BASE_C),
    (0x0DB4, C, BASE_C),
    (0x0DB5, C, BASE_C),
    (0x0DB6, C, BASE_C),
    (0x0DB7, C, BASE_C),
    (0x0DB8, C, BASE_C),
    (0x0DB9, C, BASE_C),
    (0x0DBA, C, BASE_C),
    (0x0DBB, RA, BASE_C),
    (0x0DBD, C, BASE_C),
    (0x0DC0, C, BASE_C),
    (0x0DC1, C, BASE_C),
    (0x0DC2, C, BASE_C),
    (0x0DC3, C, BASE_C),
    (0x0DC4, C, BASE_C),
    (0x0DC5, C, BASE_C),
    (0x0DC6, C, BASE_C),
    (0x0DCA, H, END),
    (0x0DCF, M, AFTER_SUB),
    (0x0DD0, M, AFTER_SUB),
    (0x0DD1, M, AFTER_SUB),
    (0x0DD2, M, AFTER_SUB),
    (0x0DD3, M, AFTER_SUB),
    (0x0DD4, M, AFTER_SUB),
    (0x0DD6, M, AFTER_SUB),
    (0x0DD8, M, AFTER_SUB),
    (0x0DD9, M, PRE_M),
    (0x0DDA, M, AFTER_SUB),
    (0x0DDB, M, PRE_M),
    (0x0DDC, M, AFTER_SUB),
    (0x0DDD, M, AFTER_SUB),
    (0x0DDE, M, AFTER_SUB),
    (0x0DDF, M, AFTER_SUB),
    (0x0DE6, PLACEHOLDER, BASE_C),
    (0x0DE7, PLACEHOLDER, BASE_C),
    (0x0DE8, PLACEHOLDER, BASE_C),
    (0x0DE9, PLACEHOLDER, BASE_C),
    (0x0DEA, PLACEHOLDER, BASE_C),
    (0x0DEB, PLACEHOLDER, BASE_C),
    (0x0DEC, PLACEHOLDER, BASE_C),
    (0x0DED, PLACEHOLDER, BASE_C),
    (0x0DEE, PLACEHOLDER, BASE_C),
    (0x0DEF, PLACEHOLDER, BASE_C),
    (0x0DF2, M, AFTER_SUB),
    (0x0DF3, M, AFTER_SUB),
    (0x1CD0, A, SMVD),
    (0x1CD1, A, SMVD),
    (0x1CD2, A, SMVD),
    (0x1CD4, A, SMVD),
    (0x1CD5, A, SMVD),
    (0x1CD6, A, SMVD),
    (0x1CD7, A, SMVD),
    (0x1CD8, A, SMVD),
    (0x1CD9, A, SMVD),
    (0x1CDA, A, SMVD),
    (0x1CDB, A, SMVD),
    (0x1CDC, A, SMVD),
    (0x1CDD, A, SMVD),
    (0x1CDE, A, SMVD),
    (0x1CDF, A, SMVD),
    (0x1CE0, A, SMVD),
    (0x1CE1, A, SMVD),
    (0x1CE2, SYMBOL, SMVD),
    (0x1CE8, SYMBOL, SMVD),
    (0x1CE9, SYMBOL, SMVD),
    (0x1CEC, SYMBOL, SMVD),
    (0x1CED, SYMBOL, SMVD),
    (0x1CEE, SYMBOL, SMVD),
    (0x1CF1, SYMBOL, SMVD),
    (0x1CF2, SM, SMVD),
    (0x1CF3, SM, SMVD),
    (0x1CF4, A, SMVD),
    (0x1CF5, CS, BASE_C),
    (0x1CF6, CS, BASE_C),
    (0x1CF8, A, SMVD),
    (0x1CF9, A, SMVD),
    (0x200C, ZWNJ, END),
    (0x200D, ZWJ, END),
    (0x2010, PLACEHOLDER, BASE_C),
    (0x2011, PLACEHOLDER, BASE_C),
    (0x2012, PLACEHOLDER, BASE_C),
    (0x2013, PLACEHOLDER, BASE_C),
    (0x2014, PLACEHOLDER, BASE_C),
    (0x2015, PLACEHOLDER, BASE_C),
    (0x2022, PLACEHOLDER, BASE_C),
    (0x2074, SM, SMVD),
    (0x2082, SM, SMVD),
    (0x2083, SM, SMVD),
    (0x2084, SM, SMVD),
    (0x25CC, DOTTED_CIRCLE, BASE_C),
    (0x25FB, PLACEHOLDER, BASE_C),
    (0x25FC, PLACEHOLDER, BASE_C),
    (0x25FD, PLACEHOLDER, BASE_C),
    (0x25FE, PLACEHOLDER, BASE_C),
    (0xA8E0, A, SMVD),
    (0xA8E1, A, SMVD),
    (0xA8E2, A, SMVD),
    (0xA8E3, A, SMVD),
    (0xA8E4, A, SMVD),
    (0xA8E5, A, SMVD),
    (0xA8E6, A, SMVD),
    (0xA8E7, A, SMVD),
    (0xA8E8, A, SMVD),
    (0xA8E9, A, SMVD),
    (0xA8EA, A, SMVD),
    (0xA8EB, A, SMVD),
    (0xA8EC, A, SMVD),
    (0xA8ED, A, SMVD),
    (0xA8EE, A, SMVD),
    (0xA8EF, A, SMVD),
    (0xA8F0, A, SMVD),
    (0xA8F1, A, SMVD),
    (0xA8F2, SM, SMVD),
    (0xA8F3, SM, SMVD),
    (0xA8FE, V, BASE_C),
    (0xA8FF, M, AFTER_SUB),
    (0x111E1, PLACEHOLDER, BASE_C),
    (0x111E2, PLACEHOLDER, BASE_C),
    (0x111E3, PLACEHOLDER, BASE_C),
    (0x111E4, PLACEHOLDER, BASE_C),
    (0x111E5, PLACEHOLDER, BASE_C),
    (0x111E6, PLACEHOLDER, BASE_C),
    (0x111E7, PLACEHOLDER, BASE_C),
    (0x111E8, PLACEHOLDER, BASE_C),
    (0x111E9, PLACEHOLDER, BASE_C),
    (0x111EA, PLACEHOLDER, BASE_C),
    (0x111EB, PLACEHOLDER, BASE_C),
    (0x111EC, PLACEHOLDER, BASE_C),
    (0x111ED, PLACEHOLDER, BASE_C),
    (0x111EE, PLACEHOLDER, BASE_C),
    (0x111EF, PLACEHOLDER, BASE_C),
    (0x111F0, PLACEHOLDER, BASE_C),
    (0x111F1, PLACEHOLDER, BASE_C),
    (0x111F2, PLACEHOLDER, BASE_C),
    (0x111F3, PLACEHOLDER, BASE_C),
    (0x111F4, PLACEHOLDER, BASE_C),
    (0x11301, SM, SMVD),
    (0x11303, SM, SMVD),
    (0x1133B, N, END),
    (0x1133C, N, END),
];

pub fn get_categories(u: u32) -> (Category, Position) {
    match TABLE.binary_search_by_key(&u, |&(cp, _, _)| cp) {
        Ok(i) => (TABLE[i].1, TABLE[i].2),
        Err(_) => (X, END),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted() {
        assert!(TABLE.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn devanagari() {
        assert_eq!(get_categories(0x0915), (C, BASE_C));
        assert_eq!(get_categories(0x0930), (RA, BASE_C));
        assert_eq!(get_categories(0x094D), (H, END));
        assert_eq!(get_categories(0x093F), (M, PRE_M));
        assert_eq!(get_categories(0x0902), (SM, SMVD));
    }

    #[test]
    fn script_specific_matras() {
        assert_eq!(get_categories(0x0940).1, AFTER_SUB);
        assert_eq!(get_categories(0x09BE).1, AFTER_POST);
        assert_eq!(get_categories(0x0C41).1, BEFORE_SUB);
    }

    #[test]
    fn shared_characters() {
        assert_eq!(get_categories(0x25CC), (DOTTED_CIRCLE, BASE_C));
        assert_eq!(get_categories(0x200D).0, ZWJ);
        assert_eq!(get_categories(0x0041), (X, END));
    }
}
