//! OpenType layout: feature maps, GSUB/GPOS application and their fallbacks.

pub mod apply;
pub mod contextual;
pub mod fallback;
pub mod kern;
pub mod layout;
pub mod map;
pub mod matching;
pub mod normalize;
pub mod position;
pub mod set_digest;
pub mod substitute;

pub use layout::{PositioningTable, SubstitutionTable, TableIndex};
pub use map::{FeatureFlags, Map, MapBuilder};
