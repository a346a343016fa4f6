pub mod forecast;
pub mod prediction;
pub mod server;
