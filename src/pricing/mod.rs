pub mod engine;
pub mod types;

pub use engine::suggest_price;
pub use types::{PriceSuggestion, PriceTerms};
