//! Error types for argument conversion.

use thiserror::Error;

use crate::schema::ParameterType;

/// Terminal failure of a conversion.
///
/// The `Display` output is the message shown to the user, so callers can
/// render it verbatim.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// A token was accepted by no unfilled parameter.
    #[error("Arguments passed do not match expected ones. Try using the help menu command.")]
    SchemaMismatch,

    /// A non-optional parameter received no token.
    #[error("You did not fill all of the non-optional arguments.")]
    MissingRequired {
        /// Schema index of the first unfilled parameter.
        index: usize,
    },

    /// The directory returned nothing (or failed) for an identifier.
    #[error("Couldn't retrieve {kind}: {raw}.")]
    ResolutionFailure {
        /// Type of the parameter being resolved.
        kind: ParameterType,
        /// The identifier as the user typed it.
        raw: String,
    },

    /// A message could not be fetched from the resolved channel.
    #[error("Couldn't retrieve message from given channel.")]
    MessageResolutionFailure,

    /// A consuming argument could not be parsed from the remaining tokens.
    #[error("Couldn't read a {kind} from: {input}.")]
    MalformedConsumingArgument {
        /// Type of the consuming parameter.
        kind: ParameterType,
        /// The tokens that were offered to the parser, space-joined.
        input: String,
    },
}

impl ConversionError {
    /// Creates a resolution failure for the given parameter type.
    pub fn resolution(kind: ParameterType, raw: impl Into<String>) -> Self {
        Self::ResolutionFailure {
            kind,
            raw: raw.into(),
        }
    }

    /// Creates a malformed consuming-argument error.
    pub fn malformed(kind: ParameterType, input: impl Into<String>) -> Self {
        Self::MalformedConsumingArgument {
            kind,
            input: input.into(),
        }
    }
}

/// Result type for conversion stages.
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Contract violations detected while building a [`Schema`](crate::Schema).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// A message parameter needs a text channel parameter to be fetched from.
    #[error("parameter {index}: message arguments must be paired with a text channel argument")]
    MessageWithoutTextChannel {
        /// Index of the message parameter.
        index: usize,
    },

    /// A static default cannot satisfy its parameter's type.
    #[error("parameter {index}: default value is not a valid {expected}")]
    DefaultTypeMismatch {
        /// Index of the offending parameter.
        index: usize,
        /// The declared parameter type.
        expected: ParameterType,
    },
}

/// Failure reported by a [`Directory`](crate::Directory) implementation.
///
/// The pipeline treats every lookup error the same as "not found"; the cause
/// is only logged.
#[derive(Debug, Clone, Error)]
#[error("lookup failed: {0}")]
pub struct LookupError(pub String);

impl LookupError {
    /// Creates a lookup error from any message.
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Result type for directory lookups.
pub type LookupResult<T> = Result<T, LookupError>;
