//! Configuration loading and validation.
//!
//! A single TOML file under the user config directory; every key has a
//! default, so a missing file is a valid configuration.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, ServerConfig, UiConfig};
