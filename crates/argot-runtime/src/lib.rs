//! Argot Runtime - configuration and logging for hosts embedding Argot.
//!
//! This crate provides:
//! - Layered configuration loading (`ConfigLoader`) backed by figment
//! - Validation of the conversion vocabulary and logging settings
//! - Logging setup driven by the `[logging]` config section
//!
//! ```rust,ignore
//! use argot_core::Converter;
//! use argot_runtime::{config::load_config, logging};
//!
//! let config = load_config()?;
//! logging::init_from_config(&config.logging);
//!
//! let converter = Converter::new(config.conversion);
//! ```

pub mod config;
pub mod logging;

// Re-exports
pub use config::{ArgotConfig, ConfigError, ConfigLoader, ConfigResult, LoggingConfig};
pub use logging::{LoggingBuilder, SpanEvents};

// Re-export tracing for use by other crates
pub use tracing;
pub use tracing_subscriber;

/// Prelude module for convenient imports.
///
/// Provides the common logging macros and the `instrument` attribute.
pub mod prelude {
    pub use tracing::{Level, debug, error, info, instrument, span, trace, warn};
}
