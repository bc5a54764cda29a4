//! Configuration loading, merging and validation.
mod apply;
mod loader;
mod parse;
pub mod types;

#[cfg(test)]
mod tests;

pub use apply::{apply_config, build_benchmark_config};
pub use loader::load_config;
pub use types::{
    BenchmarkConfig, ConfigFile, DurationValue, OutputConfig, RequestConfig, RunnerConfig,
};

#[cfg(test)]
pub(crate) use loader::load_config_file;
pub(crate) use parse::parse_duration_value;
