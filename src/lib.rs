pub mod aggregation;
pub mod apis;
pub mod arguments;
pub mod cache;
pub mod config;
pub mod errors;
pub mod logger;
