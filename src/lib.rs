//! Core library for the `volley` CLI.
//!
//! This crate provides the internal building blocks used by the binary: CLI
//! argument types, configuration parsing, the load-generation engine, report
//! aggregation, and export strategies. The primary user-facing interface is
//! the `volley` command-line application; library APIs may evolve as the CLI
//! grows.
pub mod ansi;
pub mod args;
pub mod config;
pub mod error;
pub mod logger;
pub mod output;
pub mod report;
pub mod runner;
pub mod shutdown;
