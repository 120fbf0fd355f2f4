//! Configuration file loading for travelmate
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TRAVELMATE_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./travelmate.toml` or `./.travelmate.toml`
//! 4. Global: `~/.config/travelmate/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileClientConfig, FileConfig, FileRelayConfig, FileStoreBackend,
    FileStoreConfig, FileUpstreamConfig,
};
pub use loader::ConfigLoader;
