pub mod encoder;
pub mod hash;
pub mod types;

pub use encoder::encode_features;
pub use hash::stable_unit_hash;
pub use types::{FEATURE_COUNT, FeatureVector, SlotTime, hour_bucket};
