//! CLI argument types and parsing helpers.
mod cli;
mod parsers;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{RunnerArgs, normalize_requests};
pub use types::{ExportKind, HttpMethod};

pub(crate) use parsers::parse_header;
