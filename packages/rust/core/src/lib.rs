//! Pipeline orchestration for backstageify.
//!
//! Wires the fetcher and catalog crates into the end-to-end `generate`
//! operation consumed by the CLI.

pub mod pipeline;

pub use pipeline::{GenerateConfig, GenerateResult, ProgressReporter, SilentProgress, generate};
