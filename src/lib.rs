pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod scorer;
// cmd and reports are binary modules (declared in main.rs).
