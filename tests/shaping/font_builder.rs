//! Synthesises minimal TrueType fonts, so tests need no binary fixtures.
//!
//! Only what shaping looks at is written: `head`, `hhea`, `maxp`, `hmtx`,
//! a format 12 `cmap` and optional `GSUB` and `GPOS`.

pub const CLASS_BASE: u16 = 1;
pub const CLASS_LIGATURE: u16 = 2;
pub const CLASS_MARK: u16 = 3;

pub const IGNORE_MARKS: u16 = 0x0008;

#[derive(Default)]
struct Writer(Vec<u8>);

impl Writer {
    fn u16(&mut self, v: u16) -> &mut Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    fn i16(&mut self, v: i16) -> &mut Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    fn u32(&mut self, v: u32) -> &mut Self {
        self.0.extend_from_slice(&v.to_be_bytes());
        self
    }

    fn tag(&mut self, tag: &[u8; 4]) -> &mut Self {
        self.0.extend_from_slice(tag);
        self
    }

    fn bytes(&mut self, data: &[u8]) -> &mut Self {
        self.0.extend_from_slice(data);
        self
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

fn offset16(v: usize) -> u16 {
    u16::try_from(v).expect("offset overflow in a test font")
}

fn coverage(glyphs: &[u16]) -> Vec<u8> {
    let mut w = Writer::default();
    w.u16(1).u16(glyphs.len() as u16);
    for &g in glyphs {
        w.u16(g);
    }
    w.0
}

fn anchor(x: i16, y: i16) -> Vec<u8> {
    let mut w = Writer::default();
    w.u16(1).i16(x).i16(y);
    w.0
}

/// Appends `blobs` after a header of `header_len` bytes and returns their
/// offsets from the start of the header.
fn layout_blobs(header_len: usize, blobs: &[Vec<u8>]) -> (Vec<u16>, Vec<u8>) {
    let mut offsets = Vec::new();
    let mut data = Vec::new();
    for blob in blobs {
        offsets.push(offset16(header_len + data.len()));
        data.extend_from_slice(blob);
    }
    (offsets, data)
}

/// A GSUB or GPOS lookup.
pub enum Lookup {
    /// `(from, to)`.
    Single(Vec<(u16, u16)>),
    /// `(components, ligature)`.
    Ligature(Vec<(Vec<u16>, u16)>),
    /// `(first, second, x_advance)` applied to the first glyph.
    Pair(Vec<(u16, u16, i16)>),
    /// A single mark class: `(glyph, anchor)` for marks and bases.
    MarkToBase {
        marks: Vec<(u16, (i16, i16))>,
        bases: Vec<(u16, (i16, i16))>,
    },
}

impl Lookup {
    fn kind(&self) -> u16 {
        match self {
            Lookup::Single(_) => 1,
            Lookup::Ligature(_) => 4,
            Lookup::Pair(_) => 2,
            Lookup::MarkToBase { .. } => 4,
        }
    }

    fn subtable(&self) -> Vec<u8> {
        match self {
            Lookup::Single(pairs) => {
                let mut pairs = pairs.clone();
                pairs.sort();
                let from: Vec<u16> = pairs.iter().map(|p| p.0).collect();

                let mut w = Writer::default();
                w.u16(2).u16(offset16(6 + 2 * pairs.len())).u16(pairs.len() as u16);
                for &(_, to) in &pairs {
                    w.u16(to);
                }
                w.bytes(&coverage(&from));
                w.0
            }
            Lookup::Ligature(ligatures) => {
                let mut firsts: Vec<u16> = ligatures.iter().map(|(c, _)| c[0]).collect();
                firsts.sort();
                firsts.dedup();

                let sets: Vec<Vec<u8>> = firsts
                    .iter()
                    .map(|&first| {
                        let tables: Vec<Vec<u8>> = ligatures
                            .iter()
                            .filter(|(c, _)| c[0] == first)
                            .map(|(components, ligature)| {
                                let mut w = Writer::default();
                                w.u16(*ligature).u16(components.len() as u16);
                                for &c in &components[1..] {
                                    w.u16(c);
                                }
                                w.0
                            })
                            .collect();

                        let (offsets, data) = layout_blobs(2 + 2 * tables.len(), &tables);
                        let mut w = Writer::default();
                        w.u16(tables.len() as u16);
                        for o in offsets {
                            w.u16(o);
                        }
                        w.bytes(&data);
                        w.0
                    })
                    .collect();

                let header_len = 6 + 2 * sets.len();
                let (offsets, data) = layout_blobs(header_len, &sets);
                let mut w = Writer::default();
                w.u16(1)
                    .u16(offset16(header_len + data.len()))
                    .u16(sets.len() as u16);
                for o in offsets {
                    w.u16(o);
                }
                w.bytes(&data).bytes(&coverage(&firsts));
                w.0
            }
            Lookup::Pair(pairs) => {
                let mut pairs = pairs.clone();
                pairs.sort();
                let mut firsts: Vec<u16> = pairs.iter().map(|p| p.0).collect();
                firsts.dedup();

                let sets: Vec<Vec<u8>> = firsts
                    .iter()
                    .map(|&first| {
                        let records: Vec<_> = pairs.iter().filter(|p| p.0 == first).collect();
                        let mut w = Writer::default();
                        w.u16(records.len() as u16);
                        for &&(_, second, x_advance) in &records {
                            w.u16(second).i16(x_advance);
                        }
                        w.0
                    })
                    .collect();

                let header_len = 10 + 2 * sets.len();
                let (offsets, data) = layout_blobs(header_len, &sets);
                let mut w = Writer::default();
                w.u16(1)
                    .u16(offset16(header_len + data.len()))
                    .u16(0x0004) // XAdvance
                    .u16(0)
                    .u16(sets.len() as u16);
                for o in offsets {
                    w.u16(o);
                }
                w.bytes(&data).bytes(&coverage(&firsts));
                w.0
            }
            Lookup::MarkToBase { marks, bases } => {
                let mut marks = marks.clone();
                marks.sort();
                let mut bases = bases.clone();
                bases.sort();

                let mark_anchors: Vec<Vec<u8>> =
                    marks.iter().map(|&(_, (x, y))| anchor(x, y)).collect();
                let (offsets, data) = layout_blobs(2 + 4 * marks.len(), &mark_anchors);
                let mut mark_array = Writer::default();
                mark_array.u16(marks.len() as u16);
                for o in offsets {
                    mark_array.u16(0).u16(o);
                }
                mark_array.bytes(&data);

                let base_anchors: Vec<Vec<u8>> =
                    bases.iter().map(|&(_, (x, y))| anchor(x, y)).collect();
                let (offsets, data) = layout_blobs(2 + 2 * bases.len(), &base_anchors);
                let mut base_array = Writer::default();
                base_array.u16(bases.len() as u16);
                for o in offsets {
                    base_array.u16(o);
                }
                base_array.bytes(&data);

                let mark_glyphs: Vec<u16> = marks.iter().map(|m| m.0).collect();
                let base_glyphs: Vec<u16> = bases.iter().map(|b| b.0).collect();
                let blobs = [
                    coverage(&mark_glyphs),
                    coverage(&base_glyphs),
                    mark_array.0,
                    base_array.0,
                ];
                let (offsets, data) = layout_blobs(12, &blobs);

                let mut w = Writer::default();
                w.u16(1)
                    .u16(offsets[0])
                    .u16(offsets[1])
                    .u16(1)
                    .u16(offsets[2])
                    .u16(offsets[3])
                    .bytes(&data);
                w.0
            }
        }
    }
}

/// Scripts, features and lookups of a GSUB or GPOS table.
///
/// Every script gets a default language system with all features.
#[derive(Default)]
pub struct LayoutBuilder {
    scripts: Vec<[u8; 4]>,
    features: Vec<([u8; 4], Vec<u16>)>,
    lookups: Vec<(u16, Vec<u8>)>,
}

impl LayoutBuilder {
    pub fn script(&mut self, tag: &[u8; 4]) -> &mut Self {
        self.scripts.push(*tag);
        self
    }

    /// Adds a lookup and a feature that references it.
    pub fn feature(&mut self, tag: &[u8; 4], lookup: Lookup) -> &mut Self {
        let index = self.lookups.len() as u16;
        let mut w = Writer::default();
        w.u16(lookup.kind()).u16(0).u16(1).u16(8);
        w.bytes(&lookup.subtable());
        self.lookups.push((index, w.0));

        match self.features.iter_mut().find(|(t, _)| t == tag) {
            Some((_, lookups)) => lookups.push(index),
            None => self.features.push((*tag, vec![index])),
        }
        self
    }

    fn build(&self) -> Vec<u8> {
        let mut features = self.features.clone();
        features.sort();
        let mut scripts = self.scripts.clone();
        scripts.sort();

        // Script list.
        let script_tables: Vec<Vec<u8>> = scripts
            .iter()
            .map(|_| {
                let mut w = Writer::default();
                // Script: default LangSys right after, no other LangSys.
                w.u16(4).u16(0);
                // LangSys
                w.u16(0).u16(0xFFFF).u16(features.len() as u16);
                for i in 0..features.len() {
                    w.u16(i as u16);
                }
                w.0
            })
            .collect();
        let (offsets, data) = layout_blobs(2 + 6 * scripts.len(), &script_tables);
        let mut script_list = Writer::default();
        script_list.u16(scripts.len() as u16);
        for (tag, offset) in scripts.iter().zip(offsets) {
            script_list.tag(tag).u16(offset);
        }
        script_list.bytes(&data);

        // Feature list.
        let feature_tables: Vec<Vec<u8>> = features
            .iter()
            .map(|(_, lookups)| {
                let mut w = Writer::default();
                w.u16(0).u16(lookups.len() as u16);
                for &l in lookups {
                    w.u16(l);
                }
                w.0
            })
            .collect();
        let (offsets, data) = layout_blobs(2 + 6 * features.len(), &feature_tables);
        let mut feature_list = Writer::default();
        feature_list.u16(features.len() as u16);
        for ((tag, _), offset) in features.iter().zip(offsets) {
            feature_list.tag(tag).u16(offset);
        }
        feature_list.bytes(&data);

        // Lookup list.
        let lookup_tables: Vec<Vec<u8>> = self.lookups.iter().map(|(_, l)| l.clone()).collect();
        let (offsets, data) = layout_blobs(2 + 2 * lookup_tables.len(), &lookup_tables);
        let mut lookup_list = Writer::default();
        lookup_list.u16(lookup_tables.len() as u16);
        for offset in offsets {
            lookup_list.u16(offset);
        }
        lookup_list.bytes(&data);

        let blobs = [script_list.0, feature_list.0, lookup_list.0];
        let (offsets, data) = layout_blobs(10, &blobs);
        let mut w = Writer::default();
        w.u16(1)
            .u16(0)
            .u16(offsets[0])
            .u16(offsets[1])
            .u16(offsets[2])
            .bytes(&data);
        w.0
    }
}

pub struct FontBuilder {
    advances: Vec<u16>,
    cmap: Vec<(u32, u16)>,
    gsub: Option<LayoutBuilder>,
    gpos: Option<LayoutBuilder>,
}

impl FontBuilder {
    /// Starts a font with a `.notdef` of the given advance.
    pub fn new(notdef_advance: u16) -> Self {
        FontBuilder {
            advances: vec![notdef_advance],
            cmap: Vec::new(),
            gsub: None,
            gpos: None,
        }
    }

    /// Adds a glyph mapped from `c` and returns its id.
    pub fn glyph(&mut self, c: char, advance: u16) -> u16 {
        let id = self.unmapped_glyph(advance);
        self.cmap.push((u32::from(c), id));
        id
    }

    /// Adds a glyph reachable only through GSUB.
    pub fn unmapped_glyph(&mut self, advance: u16) -> u16 {
        self.advances.push(advance);
        (self.advances.len() - 1) as u16
    }

    pub fn gsub(&mut self) -> &mut LayoutBuilder {
        self.gsub.get_or_insert_with(LayoutBuilder::default)
    }

    pub fn gpos(&mut self) -> &mut LayoutBuilder {
        self.gpos.get_or_insert_with(LayoutBuilder::default)
    }

    pub fn build(&self) -> Vec<u8> {
        let mut tables: Vec<([u8; 4], Vec<u8>)> = vec![
            (*b"cmap", self.cmap_table()),
            (*b"head", head_table()),
            (*b"hhea", self.hhea_table()),
            (*b"hmtx", self.hmtx_table()),
            (*b"maxp", self.maxp_table()),
        ];

        if let Some(gsub) = &self.gsub {
            tables.push((*b"GSUB", gsub.build()));
        }
        if let Some(gpos) = &self.gpos {
            tables.push((*b"GPOS", gpos.build()));
        }

        // Table records are looked up by binary search.
        tables.sort_by(|a, b| a.0.cmp(&b.0));

        let mut w = Writer::default();
        w.u32(0x0001_0000)
            .u16(tables.len() as u16)
            .u16(0)
            .u16(0)
            .u16(0);

        let mut offset = 12 + 16 * tables.len();
        for (tag, data) in &tables {
            w.tag(tag).u32(0).u32(offset as u32).u32(data.len() as u32);
            offset += padded_len(data.len());
        }

        for (_, data) in &tables {
            w.bytes(data);
            while w.len() % 4 != 0 {
                w.0.push(0);
            }
        }

        w.0
    }

    fn cmap_table(&self) -> Vec<u8> {
        let mut cmap = self.cmap.clone();
        cmap.sort();

        let mut w = Writer::default();
        w.u16(0).u16(1);
        // Windows, Unicode full repertoire.
        w.u16(3).u16(10).u32(12);
        w.u16(12)
            .u16(0)
            .u32(16 + 12 * cmap.len() as u32)
            .u32(0)
            .u32(cmap.len() as u32);
        for &(c, glyph) in &cmap {
            w.u32(c).u32(c).u32(u32::from(glyph));
        }
        w.0
    }

    fn hhea_table(&self) -> Vec<u8> {
        let max_advance = self.advances.iter().copied().max().unwrap_or(0);
        let mut w = Writer::default();
        w.u32(0x0001_0000)
            .i16(800) // ascender
            .i16(-200) // descender
            .i16(0)
            .u16(max_advance)
            .i16(0)
            .i16(0)
            .i16(0)
            .i16(1)
            .i16(0)
            .i16(0)
            .bytes(&[0; 8])
            .i16(0)
            .u16(self.advances.len() as u16);
        w.0
    }

    fn hmtx_table(&self) -> Vec<u8> {
        let mut w = Writer::default();
        for &advance in &self.advances {
            w.u16(advance).i16(0);
        }
        w.0
    }

    fn maxp_table(&self) -> Vec<u8> {
        let mut w = Writer::default();
        w.u32(0x0000_5000).u16(self.advances.len() as u16);
        w.0
    }
}

fn head_table() -> Vec<u8> {
    let mut w = Writer::default();
    w.u32(0x0001_0000) // version
        .u32(0x0001_0000) // font revision
        .u32(0) // checksum adjustment
        .u32(0x5F0F_3CF5) // magic
        .u16(0) // flags
        .u16(1000) // units per em
        .bytes(&[0; 16]) // created, modified
        .i16(0)
        .i16(-200)
        .i16(1000)
        .i16(800)
        .u16(0) // mac style
        .u16(8) // lowest rec ppem
        .i16(2) // font direction hint
        .i16(0) // index to loc format
        .i16(0); // glyph data format
    w.0
}

fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

#[test]
fn builds_a_parsable_font() {
    let mut builder = FontBuilder::new(500);
    let a = builder.glyph('a', 600);
    let b = builder.glyph('b', 700);
    builder
        .gsub()
        .script(b"DFLT")
        .feature(b"liga", Lookup::Ligature(vec![(vec![a, b], a)]));
    let data = builder.build();

    let face = ttf_parser::Face::parse(&data, 0).unwrap();
    assert_eq!(face.number_of_glyphs(), 3);
    assert_eq!(face.glyph_index('b'), Some(ttf_parser::GlyphId(b)));
    assert_eq!(face.glyph_hor_advance(ttf_parser::GlyphId(b)), Some(700));
    assert!(face.tables().gsub.is_some());
}
