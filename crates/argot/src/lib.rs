//! # Argot
//!
//! Typed conversion of chat command arguments.
//!
//! ## Overview
//!
//! A command declares an ordered list of parameter types. Argot takes the
//! whitespace-separated tokens a user typed after the command name and turns
//! them into typed values: integers, durations, URLs, and references to users,
//! channels, roles and messages looked up through a host-provided
//! [`Directory`](core::Directory).
//!
//! ```text
//! tokens ──▶ positional matching ──▶ entity resolution ──▶ defaults ──▶ messages ──▶ Arguments
//!                                    (resolvable types)                (message refs)
//! ```
//!
//! The first failing stage ends the conversion with a
//! [`ConversionError`](core::ConversionError) whose text can be shown to the
//! user as is.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use argot::prelude::*;
//!
//! let schema = Schema::new(vec![
//!     ParameterSpec::required(ParameterType::UserRef),
//!     ParameterSpec::required(ParameterType::Duration),
//!     ParameterSpec::optional(ParameterType::Sentence),
//! ])?;
//!
//! let config = load_config()?;
//! init_from_config(&config.logging);
//!
//! let converter = Converter::new(config.conversion);
//! match converter.convert(&split_tokens(input), &schema, &ctx, &directory).await {
//!     Ok(args) => mute(args.user(0), args.duration(1), args.text(2)).await,
//!     Err(err) => reply(err.to_string()).await,
//! }
//! ```
//!
//! ## Features
//!
//! - `toml-config`: load `argot.toml` configuration files (default)
//! - `yaml-config`: load `argot.yaml` configuration files
//! - `json-log`: enable the JSON log format

pub use argot_core as core;
pub use argot_runtime as runtime;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use argot::prelude::*;
/// ```
pub mod prelude {
    // Conversion entry points
    pub use argot_core::prelude::*;

    // Configuration and logging
    pub use argot_runtime::config::{ArgotConfig, ConfigLoader, load_config};
    pub use argot_runtime::logging::{LoggingBuilder, init_from_config};
}
