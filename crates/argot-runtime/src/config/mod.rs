//! Configuration module for the Argot runtime.
//!
//! This module provides layered configuration loading (files, environment,
//! programmatic overrides) and validation for the conversion vocabulary and
//! logging setup.

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, Profile, load_config, load_config_from_file};
pub use schema::{
    ArgotConfig, LogFormat, LogLevel, LogOutput, LogRotation, LoggingConfig, SpanEventConfig,
};
pub use validation::{validate_config, validate_conversion_options};
