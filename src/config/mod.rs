//! Configuration module for simple-tray-clock.
//!
//! This module is split into several sub-modules:
//! - `types`: Core types, enums, and serde default helpers
//! - `config_struct`: Config struct definition
//! - `defaults`: Config Default implementation
//! - `io`: Config loading and saving

mod config_struct;
mod defaults;
mod io;
mod types;

// Re-export public types for external use
pub use config_struct::Config;
pub use io::load_config;
pub use types::ThemeMode;
