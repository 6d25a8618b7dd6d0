//! Shared types, error model, and configuration for backstageify.
//!
//! This crate is the foundation depended on by all other backstageify crates.
//! It provides:
//! - [`BackstageifyError`] — the unified error type
//! - Domain types ([`TemplateDescriptor`], [`Manifest`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, FetchSettings, DEFAULT_INDEX_URL, DEFAULT_NAMESPACE,
    DEFAULT_OUTPUT_PATH, config_dir, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{BackstageifyError, Result};
pub use types::{Manifest, TemplateDescriptor};
