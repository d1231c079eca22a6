//! Configuration loading and the load, fetch, save pipeline.

pub mod config;
pub mod pipeline;

pub use config::Config;
pub use pipeline::{PipelineError, RunSummary, run};
