pub mod keys;
pub mod structs;

pub use keys::PredictionKey;
pub use structs::ResponseCache;
