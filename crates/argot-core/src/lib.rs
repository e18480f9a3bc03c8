//! # Argot Core
//!
//! Typed command-argument conversion.
//!
//! Given the [`Schema`] a command declares and the whitespace-delimited tokens
//! a user typed, the [`Converter`] produces either one typed value per declared
//! parameter ([`Arguments`]) or a single user-facing [`ConversionError`].
//!
//! ## Pipeline
//!
//! Every conversion runs the same short-circuiting chain of stages:
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐
//! │ Matcher  │──▶│ Entities │──▶│ Defaults │──▶│ Messages │
//! └──────────┘   └──────────┘   └──────────┘   └──────────┘
//!  tokens→slots    Directory      CallContext    channel + id
//! ```
//!
//! - **Matcher** ([`matcher`]): assigns each token to the first unfilled
//!   parameter whose predicate ([`predicate`]) accepts it. Consuming types
//!   ([`consume`]) claim several tokens at once.
//! - **Entities** ([`resolver`]): raw user/channel/role identifiers are
//!   looked up through an injected [`Directory`].
//! - **Defaults** ([`defaults`]): absent optional parameters receive their
//!   static or context-computed default.
//! - **Messages** ([`resolver`]): message identifiers are fetched from the
//!   text channel resolved earlier in the same argument list.
//!
//! The first stage that fails ends the conversion; no partial result is ever
//! returned.
//!
//! ## Example
//!
//! ```rust,ignore
//! use argot_core::{Converter, InMemoryDirectory, ParameterSpec, ParameterType, Schema};
//!
//! let schema = Schema::new(vec![
//!     ParameterSpec::required(ParameterType::UserRef),
//!     ParameterSpec::optional(ParameterType::Sentence),
//! ])?;
//!
//! let tokens = argot_core::split_tokens("<@1234> spamming the channel");
//! let args = Converter::default()
//!     .convert(&tokens, &schema, &ctx, &directory)
//!     .await?;
//!
//! let user = args.user(0).unwrap();
//! let reason = args.text(1).unwrap_or("no reason given");
//! ```

pub mod consume;
pub mod convert;
pub mod defaults;
pub mod directory;
pub mod error;
pub mod matcher;
pub mod options;
pub mod predicate;
pub mod resolver;
pub mod schema;
pub mod tokens;
pub mod value;

pub use convert::{Arguments, Converter, convert};
pub use directory::{Directory, Entity, EntityKind, InMemoryDirectory, ScopeEntries};
pub use error::{ConversionError, ConversionResult, LookupError, LookupResult, SchemaError};
pub use matcher::Slot;
pub use options::ConversionOptions;
pub use schema::{Arity, DefaultFn, DefaultValue, ParameterSpec, ParameterType, Schema};
pub use tokens::{split_tokens, trim_to_id};
pub use value::{ArgValue, CallContext, Message, Role, TextChannel, User, VoiceChannel};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use super::{
        ArgValue, Arguments, CallContext, ConversionError, ConversionResult, Converter, Directory,
        ParameterSpec, ParameterType, Schema, split_tokens,
    };
}
