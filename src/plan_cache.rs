//! Process-wide reuse of shape plans.

use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::{Mutex, MutexGuard};

use crate::common::{Direction, Feature, Language, Script};
use crate::complex::ComplexShaper;
use crate::face::Face;
use crate::ot::TableIndex;
use crate::plan::{ShapePlan, ShapePlanner};
use crate::{GlyphBuffer, UnicodeBuffer};

/// Everything a plan depends on.
#[derive(Clone, PartialEq, Eq, Debug)]
struct PlanKey {
    face_id: u32,
    variation_index: [Option<u32>; 2],
    direction: Direction,
    script: Option<Script>,
    language: Option<Language>,
    user_features: Vec<Feature>,
    shaper: ComplexShaper,
}

impl PlanKey {
    fn new(
        face: &Face,
        direction: Direction,
        script: Option<Script>,
        language: Option<&Language>,
        user_features: &[Feature],
    ) -> Self {
        let mut variation_index = [None; 2];
        for table_index in TableIndex::iter() {
            variation_index[table_index as usize] = face
                .layout_table(table_index)
                .and_then(|t| t.variations?.find_index(face.variation_coordinates()));
        }

        let user_features = user_features.iter().copied().map(normalize_range).collect();

        let shaper = ShapePlanner::new(face, direction, script, language).shaper;

        PlanKey {
            face_id: face.id,
            variation_index,
            direction,
            script,
            language: language.cloned(),
            user_features,
            shaper,
        }
    }
}

// Only whether a feature is global matters for the plan, not its range.
fn normalize_range(mut feature: Feature) -> Feature {
    if !feature.is_global() {
        feature.start = 1;
        feature.end = 2;
    }
    feature
}

/// A thread-safe store of shape plans.
///
/// Plans are keyed by face, segment properties and user features and live as
/// long as the cache does. Building a plan is the expensive part of shaping,
/// so shaping many short strings with one face benefits the most.
///
/// ```ignore
/// let cache = ShapePlanCache::new();
/// let plan = cache.get(&face, Direction::LeftToRight, Some(script::LATIN), None, &[]);
/// let glyphs = shape_with_plan(&face, &plan, buffer);
/// ```
pub struct ShapePlanCache {
    plans: Mutex<Vec<(PlanKey, Arc<ShapePlan>)>>,
}

impl ShapePlanCache {
    /// Creates an empty cache.
    pub const fn new() -> Self {
        ShapePlanCache {
            plans: Mutex::new(Vec::new()),
        }
    }

    /// Returns a plan for the given properties, building it on a miss.
    ///
    /// Ranges of non-global features are not part of the key, so the returned
    /// plan may carry the ranges of the call that built it. Use
    /// [`ShapePlanCache::shape`] to shape with the ranges of `user_features`.
    pub fn get(
        &self,
        face: &Face,
        direction: Direction,
        script: Option<Script>,
        language: Option<&Language>,
        user_features: &[Feature],
    ) -> Arc<ShapePlan> {
        let key = PlanKey::new(face, direction, script, language, user_features);

        if let Some(plan) = self.find(&key) {
            log::debug!(
                "plan cache hit: face {} {:?} {:?}",
                key.face_id,
                key.direction,
                key.shaper
            );
            return plan;
        }

        log::debug!(
            "plan cache miss: face {} {:?} {:?}",
            key.face_id,
            key.direction,
            key.shaper
        );

        // Built unlocked. Two threads missing at once both build, the first
        // insert wins.
        let plan = Arc::new(ShapePlan::new(
            face,
            direction,
            script,
            language,
            user_features,
        ));

        let mut plans = self.lock();
        if let Some((_, existing)) = plans.iter().find(|(k, _)| *k == key) {
            return existing.clone();
        }
        plans.push((key, plan.clone()));
        plan
    }

    /// Shapes `buffer` with a cached plan.
    pub fn shape(&self, face: &Face, features: &[Feature], mut buffer: UnicodeBuffer) -> GlyphBuffer {
        buffer.0.guess_segment_properties();
        let plan = self.get(
            face,
            buffer.0.direction,
            buffer.0.script,
            buffer.0.language.as_ref(),
            features,
        );
        crate::shape::shape_with_features(face, &plan, features, buffer)
    }

    fn find(&self, key: &PlanKey) -> Option<Arc<ShapePlan>> {
        self.lock()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, plan)| plan.clone())
    }

    // A poisoned lock only means another thread panicked mid-insert; the
    // stored plans are still complete.
    fn lock(&self) -> MutexGuard<'_, Vec<(PlanKey, Arc<ShapePlan>)>> {
        match self.plans.lock() {
            Ok(plans) => plans,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Returns the number of stored plans.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Checks that the cache holds no plans.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ShapePlanCache {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ShapePlanCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShapePlanCache")
            .field("len", &self.len())
            .finish()
    }
}

static GLOBAL_CACHE: ShapePlanCache = ShapePlanCache::new();

/// Like [`shape`](crate::shape), but reuses plans from a process-wide cache.
///
/// Plans are never evicted, which suits applications working with a small,
/// long-lived set of faces.
pub fn shape_cached(face: &Face, features: &[Feature], buffer: UnicodeBuffer) -> GlyphBuffer {
    GLOBAL_CACHE.shape(face, features, buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_is_send_and_sync() {
        fn assert_sync<T: Send + Sync>() {}
        assert_sync::<ShapePlanCache>();
    }

    #[test]
    fn feature_ranges_are_normalized() {
        let tag = crate::Tag::from_bytes(b"liga");
        let a = Feature::new(tag, 0, 3..5);
        let b = Feature::new(tag, 0, 10..20);
        let global = Feature::new(tag, 0, ..);

        assert_eq!(normalize_range(a), normalize_range(b));
        assert_ne!(normalize_range(a), normalize_range(global));
        assert_eq!(normalize_range(global), global);
    }
}
