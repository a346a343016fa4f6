pub mod lenient;
pub mod timestamps;
