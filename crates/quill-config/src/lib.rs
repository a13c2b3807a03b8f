//! # Quill Config
//!
//! Layered configuration loading for the Quill server: TOML files under
//! `config/` overridden by `QUILL_`-prefixed environment variables.

pub mod app_config;
pub mod loader;

pub use app_config::*;
pub use loader::ConfigLoader;
