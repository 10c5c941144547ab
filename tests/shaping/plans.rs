use std::str::FromStr;
use std::sync::Arc;

use buzzshape::{
    diff, script, DiffFlags, Direction, Face, Feature, SerializeFlags, ShapePlan, ShapePlanCache,
    Tag, UnicodeBuffer,
};

use crate::font_builder::{FontBuilder, Lookup};

fn font() -> Vec<u8> {
    let mut builder = FontBuilder::new(500);
    let f = builder.glyph('f', 300);
    let i = builder.glyph('i', 250);
    let fi = builder.unmapped_glyph(520);
    builder
        .gsub()
        .script(b"DFLT")
        .script(b"arab")
        .feature(b"liga", Lookup::Ligature(vec![(vec![f, i], fi)]));
    builder.build()
}

fn buffer(text: &str) -> UnicodeBuffer {
    let mut buffer = UnicodeBuffer::new();
    buffer.push_str(text);
    buffer.guess_segment_properties();
    buffer
}

#[test]
fn shape_with_plan_matches_shape() {
    let data = font();
    let face = Face::from_slice(&data, 0).unwrap();

    let plan = ShapePlan::new(
        &face,
        Direction::LeftToRight,
        Some(script::LATIN),
        None,
        &[],
    );
    assert_eq!(plan.shaper_name(), "default");

    let planned = buzzshape::shape_with_plan(&face, &plan, buffer("fifi"));
    let direct = buzzshape::shape(&face, &[], buffer("fifi"));
    assert_eq!(
        planned.serialize(&face, SerializeFlags::default()),
        direct.serialize(&face, SerializeFlags::default())
    );
    assert!(diff(&direct, &planned).is_match());
}

#[test]
fn plan_carries_user_features() {
    let data = font();
    let face = Face::from_slice(&data, 0).unwrap();
    let features = [Feature::from_str("-liga").unwrap()];

    let plan = ShapePlan::new(
        &face,
        Direction::LeftToRight,
        Some(script::LATIN),
        None,
        &features,
    );
    let glyphs = buzzshape::shape_with_plan(&face, &plan, buffer("fi"));
    assert_eq!(glyphs.len(), 2);
}

#[test]
fn arabic_plan_picks_arabic_shaper() {
    let data = font();
    let face = Face::from_slice(&data, 0).unwrap();
    let plan = ShapePlan::new(
        &face,
        Direction::RightToLeft,
        Some(script::ARABIC),
        None,
        &[],
    );
    assert_eq!(plan.shaper_name(), "arabic");
    assert_eq!(plan.direction(), Direction::RightToLeft);
    assert_eq!(plan.script(), Some(script::ARABIC));
}

#[test]
fn cache_reuses_plans() {
    let data = font();
    let face = Face::from_slice(&data, 0).unwrap();
    let cache = ShapePlanCache::new();
    assert!(cache.is_empty());

    let get = |features: &[Feature]| {
        cache.get(
            &face,
            Direction::LeftToRight,
            Some(script::LATIN),
            None,
            features,
        )
    };

    let a = get(&[]);
    let b = get(&[]);
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.len(), 1);

    // Ranged features share a plan regardless of the range.
    let liga = Tag::from_bytes(b"liga");
    let c = get(&[Feature::new(liga, 0, 0..1)]);
    let d = get(&[Feature::new(liga, 0, 3..7)]);
    assert!(Arc::ptr_eq(&c, &d));
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(cache.len(), 2);

    // A global feature is a different plan.
    let e = get(&[Feature::new(liga, 0, ..)]);
    assert!(!Arc::ptr_eq(&c, &e));
    assert_eq!(cache.len(), 3);
}

#[test]
fn cache_separates_faces_and_directions() {
    let data = font();
    let face1 = Face::from_slice(&data, 0).unwrap();
    let face2 = Face::from_slice(&data, 0).unwrap();
    let cache = ShapePlanCache::new();

    let a = cache.get(&face1, Direction::LeftToRight, Some(script::LATIN), None, &[]);
    let b = cache.get(&face2, Direction::LeftToRight, Some(script::LATIN), None, &[]);
    let c = cache.get(&face1, Direction::RightToLeft, Some(script::LATIN), None, &[]);
    assert!(!Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(cache.len(), 3);
}

#[test]
fn shape_cached_matches_shape() {
    let data = font();
    let face = Face::from_slice(&data, 0).unwrap();

    for _ in 0..2 {
        let cached = buzzshape::shape_cached(&face, &[], buffer("fif"));
        let direct = buzzshape::shape(&face, &[], buffer("fif"));
        assert!(diff(&direct, &cached).is_match());
        assert_eq!(cached.len(), 2);
    }
}

#[test]
fn diff_reports_ligature_mismatch() {
    let data = font();
    let face = Face::from_slice(&data, 0).unwrap();

    let with = buzzshape::shape(&face, &[], buffer("fi"));
    let without = buzzshape::shape(&face, &[Feature::from_str("-liga").unwrap()], buffer("fi"));

    let report = diff(&with, &without);
    assert!(report.flags.contains(DiffFlags::LENGTH_MISMATCH));
    assert!(report.flags.contains(DiffFlags::GLYPH_MISMATCH));
    let mismatch = report.first_mismatch.unwrap();
    assert_eq!(mismatch.index, 0);
    assert_eq!(mismatch.expected, 3);
    assert_eq!(mismatch.actual, 1);
}

#[test]
fn empty_buffer() {
    let data = font();
    let face = Face::from_slice(&data, 0).unwrap();
    let glyphs = buzzshape::shape(&face, &[], UnicodeBuffer::new());
    assert!(glyphs.is_empty());
    assert_eq!(glyphs.serialize(&face, SerializeFlags::default()), "");
}

#[test]
fn glyph_buffer_can_be_reused() {
    let data = font();
    let face = Face::from_slice(&data, 0).unwrap();
    let glyphs = buzzshape::shape(&face, &[], buffer("fi"));
    let mut unicode = glyphs.clear();
    assert!(unicode.is_empty());
    unicode.push_str("if");
    let glyphs = buzzshape::shape(&face, &[], unicode);
    assert_eq!(glyphs.len(), 2);
}

#[test]
fn cached_plans_use_the_callers_feature_ranges() {
    let data = font();
    let face = Face::from_slice(&data, 0).unwrap();
    let cache = ShapePlanCache::new();
    let flags = SerializeFlags::default();

    let first = [Feature::from_str("liga[0:2]=0").unwrap()];
    let second = [Feature::from_str("liga[2:4]=0").unwrap()];

    let a = cache.shape(&face, &first, buffer("fifi"));
    let b = cache.shape(&face, &second, buffer("fifi"));
    assert_eq!(cache.len(), 1);

    assert_eq!(
        a.serialize(&face, flags),
        buzzshape::shape(&face, &first, buffer("fifi")).serialize(&face, flags)
    );
    assert_eq!(
        b.serialize(&face, flags),
        buzzshape::shape(&face, &second, buffer("fifi")).serialize(&face, flags)
    );
    assert_eq!(b.serialize(&face, flags), "gid3=0+520|gid1=2+300|gid2=3+250");
}

#[test]
fn shape_cached_uses_the_callers_feature_ranges() {
    let data = font();
    let face = Face::from_slice(&data, 0).unwrap();
    let flags = SerializeFlags::default();

    for range in ["liga[0:2]=0", "liga[2:4]=0", "liga[0:2]=0"] {
        let features = [Feature::from_str(range).unwrap()];
        let cached = buzzshape::shape_cached(&face, &features, buffer("fifi"));
        let direct = buzzshape::shape(&face, &features, buffer("fifi"));
        assert_eq!(cached.serialize(&face, flags), direct.serialize(&face, flags));
    }
}

#[test]
fn concurrent_misses_store_one_plan() {
    let data = font();
    let face = Face::from_slice(&data, 0).unwrap();
    let cache = ShapePlanCache::new();

    let plans: Vec<Arc<ShapePlan>> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    cache.get(&face, Direction::LeftToRight, Some(script::LATIN), None, &[])
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(cache.len(), 1);
    let stored = cache.get(&face, Direction::LeftToRight, Some(script::LATIN), None, &[]);
    assert!(plans.iter().all(|plan| Arc::ptr_eq(plan, &stored)));
}
