pub mod curves;
pub mod heuristic;
pub mod normalization;
pub mod types;

pub use heuristic::{heuristic_score, score_slot};
pub use normalization::normalize_batch;
pub use types::{RushBreakdown, RushFactors, RushInput, ScoringMode};
