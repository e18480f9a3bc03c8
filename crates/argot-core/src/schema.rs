//! Parameter declarations.
//!
//! A command declares its arguments as an ordered [`Schema`] of
//! [`ParameterSpec`]s. The order only breaks ties while matching; users may
//! supply arguments in any order the predicates can tell apart.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::directory::EntityKind;
use crate::error::SchemaError;
use crate::value::{ArgValue, CallContext};

/// The kind of value a parameter accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterType {
    Integer,
    Double,
    Word,
    /// A boolean-like literal such as `yes` or `off`.
    Choice,
    /// Disables conversion; the command receives the raw tokens.
    Manual,
    Sentence,
    UserRef,
    /// Free text split on the configured separator.
    Splitter,
    Url,
    Duration,
    TextChannelRef,
    VoiceChannelRef,
    MessageRef,
    RoleRef,
}

/// How many tokens a parameter claims when it is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly the matched token.
    Single,
    /// As many leading tokens as its parser decides.
    MultiConsuming,
    /// Every remaining token.
    RemainingConsuming,
}

impl ParameterType {
    pub const ALL: [ParameterType; 14] = [
        Self::Integer,
        Self::Double,
        Self::Word,
        Self::Choice,
        Self::Manual,
        Self::Sentence,
        Self::UserRef,
        Self::Splitter,
        Self::Url,
        Self::Duration,
        Self::TextChannelRef,
        Self::VoiceChannelRef,
        Self::MessageRef,
        Self::RoleRef,
    ];

    /// Returns the arity class of this type.
    pub fn arity(self) -> Arity {
        match self {
            Self::Sentence | Self::Splitter => Arity::RemainingConsuming,
            Self::Duration => Arity::MultiConsuming,
            _ => Arity::Single,
        }
    }

    /// Returns the entity kind a [`Directory`](crate::Directory) resolves this
    /// type to, if it is a snowflake type.
    ///
    /// Messages are excluded: they are fetched from a channel, not a scope.
    pub fn entity_kind(self) -> Option<EntityKind> {
        match self {
            Self::UserRef => Some(EntityKind::User),
            Self::TextChannelRef => Some(EntityKind::TextChannel),
            Self::VoiceChannelRef => Some(EntityKind::VoiceChannel),
            Self::RoleRef => Some(EntityKind::Role),
            _ => None,
        }
    }

    /// Returns `true` if the entity stage resolves this type.
    pub fn is_resolvable(self) -> bool {
        self.entity_kind().is_some()
    }

    /// Human-readable name used in user-facing messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Double => "double",
            Self::Word => "word",
            Self::Choice => "choice",
            Self::Manual => "manual",
            Self::Sentence => "sentence",
            Self::UserRef => "user",
            Self::Splitter => "splitter",
            Self::Url => "url",
            Self::Duration => "duration",
            Self::TextChannelRef => "text channel",
            Self::VoiceChannelRef => "voice channel",
            Self::MessageRef => "message",
            Self::RoleRef => "role",
        }
    }

    /// Returns `true` if `value` can stand in this type's slot once the whole
    /// pipeline has run.
    ///
    /// Message slots may also hold a raw identifier because message fetching
    /// runs after defaults are filled.
    pub fn admits(self, value: &ArgValue) -> bool {
        match (self, value) {
            (Self::Integer, ArgValue::Integer(_))
            | (Self::Double, ArgValue::Double(_))
            | (Self::Choice, ArgValue::Boolean(_))
            | (Self::Word | Self::Sentence | Self::Url | Self::Manual, ArgValue::Text(_))
            | (Self::Splitter, ArgValue::List(_))
            | (Self::Duration, ArgValue::Duration(_))
            | (Self::UserRef, ArgValue::User(_))
            | (Self::TextChannelRef, ArgValue::TextChannel(_))
            | (Self::VoiceChannelRef, ArgValue::VoiceChannel(_))
            | (Self::RoleRef, ArgValue::Role(_))
            | (Self::MessageRef, ArgValue::Message(_) | ArgValue::Text(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParameterType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "integer" | "int" => Ok(Self::Integer),
            "double" | "number" => Ok(Self::Double),
            "word" => Ok(Self::Word),
            "choice" | "bool" | "boolean" => Ok(Self::Choice),
            "manual" => Ok(Self::Manual),
            "sentence" => Ok(Self::Sentence),
            "user" | "userref" => Ok(Self::UserRef),
            "splitter" => Ok(Self::Splitter),
            "url" => Ok(Self::Url),
            "duration" | "timestring" => Ok(Self::Duration),
            "textchannel" | "textchannelref" | "channel" => Ok(Self::TextChannelRef),
            "voicechannel" | "voicechannelref" => Ok(Self::VoiceChannelRef),
            "message" | "messageref" => Ok(Self::MessageRef),
            "role" | "roleref" => Ok(Self::RoleRef),
            _ => Err(format!("unknown parameter type: {s}")),
        }
    }
}

/// A context-computed default, e.g. "the invoking user".
pub type DefaultFn = Arc<dyn Fn(&CallContext) -> ArgValue + Send + Sync>;

/// What an absent optional parameter is filled with.
#[derive(Clone, Default)]
pub enum DefaultValue {
    /// Stays absent.
    #[default]
    None,
    Static(ArgValue),
    Computed(DefaultFn),
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A single declared parameter.
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    pub kind: ParameterType,
    pub optional: bool,
    pub default: DefaultValue,
}

impl ParameterSpec {
    /// A parameter the user must supply.
    pub fn required(kind: ParameterType) -> Self {
        Self {
            kind,
            optional: false,
            default: DefaultValue::None,
        }
    }

    /// A parameter that may stay absent.
    pub fn optional(kind: ParameterType) -> Self {
        Self {
            kind,
            optional: true,
            default: DefaultValue::None,
        }
    }

    /// Makes the parameter optional with a static default.
    pub fn with_default(mut self, value: ArgValue) -> Self {
        self.optional = true;
        self.default = DefaultValue::Static(value);
        self
    }

    /// Makes the parameter optional with a default computed from the call
    /// context.
    ///
    /// The closure runs after entity resolution, so it must return a value of
    /// the parameter's type: a resolved entity for reference parameters, not a
    /// raw identifier.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// ParameterSpec::optional(ParameterType::UserRef)
    ///     .with_default_fn(|ctx| ArgValue::User(ctx.author.clone()))
    /// ```
    pub fn with_default_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&CallContext) -> ArgValue + Send + Sync + 'static,
    {
        self.optional = true;
        self.default = DefaultValue::Computed(Arc::new(f));
        self
    }
}

/// An ordered, validated list of parameters.
///
/// Schemas are built once when a command is registered and shared between
/// every invocation of that command.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    params: Vec<ParameterSpec>,
}

impl Schema {
    /// Validates and creates a schema.
    ///
    /// # Errors
    ///
    /// - [`SchemaError::MessageWithoutTextChannel`] if a message parameter is
    ///   declared without any text channel parameter to fetch it from.
    /// - [`SchemaError::DefaultTypeMismatch`] if a static default does not
    ///   fit its parameter type.
    pub fn new(params: Vec<ParameterSpec>) -> Result<Self, SchemaError> {
        let has_text_channel = params
            .iter()
            .any(|p| p.kind == ParameterType::TextChannelRef);

        for (index, param) in params.iter().enumerate() {
            if param.kind == ParameterType::MessageRef && !has_text_channel {
                return Err(SchemaError::MessageWithoutTextChannel { index });
            }
            if let DefaultValue::Static(value) = &param.default {
                if !param.kind.admits(value) {
                    return Err(SchemaError::DefaultTypeMismatch {
                        index,
                        expected: param.kind,
                    });
                }
            }
        }

        Ok(Self { params })
    }

    pub fn params(&self) -> &[ParameterSpec] {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParameterSpec> {
        self.params.iter()
    }

    /// Returns `true` if any parameter has the given type.
    pub fn contains(&self, kind: ParameterType) -> bool {
        self.params.iter().any(|p| p.kind == kind)
    }

    /// Returns `true` if any parameter needs the entity stage.
    pub fn has_resolvable(&self) -> bool {
        self.params.iter().any(|p| p.kind.is_resolvable())
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a ParameterSpec;
    type IntoIter = std::slice::Iter<'a, ParameterSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}
