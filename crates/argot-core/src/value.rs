//! Converted argument values and the entities they may refer to.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A chat user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

/// A text channel inside a lookup scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChannel {
    pub id: String,
    pub name: String,
}

/// A voice channel inside a lookup scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceChannel {
    pub id: String,
    pub name: String,
}

/// A role inside a lookup scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
}

/// A message posted in a text channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub channel_id: String,
    pub author_id: String,
    pub content: String,
}

/// A single converted argument.
///
/// Parameter types without a dedicated representation (words, URLs, and
/// identifiers that have not been resolved yet) are carried as [`Text`].
///
/// [`Text`]: ArgValue::Text
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Integer(i64),
    Double(f64),
    Boolean(bool),
    Text(String),
    List(Vec<String>),
    Duration(Duration),
    User(User),
    TextChannel(TextChannel),
    VoiceChannel(VoiceChannel),
    Role(Role),
    Message(Message),
}

impl ArgValue {
    /// Returns the integer value, if this is an integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the floating-point value, if this is a double.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the boolean value, if this is a choice.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the text, if this is a word, sentence, URL or raw identifier.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Self::Duration(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_user(&self) -> Option<&User> {
        match self {
            Self::User(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_text_channel(&self) -> Option<&TextChannel> {
        match self {
            Self::TextChannel(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_voice_channel(&self) -> Option<&VoiceChannel> {
        match self {
            Self::VoiceChannel(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_role(&self) -> Option<&Role> {
        match self {
            Self::Role(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_message(&self) -> Option<&Message> {
        match self {
            Self::Message(v) => Some(v),
            _ => None,
        }
    }
}

impl std::fmt::Display for ArgValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
            Self::List(v) => write!(f, "[{}]", v.join(", ")),
            Self::Duration(v) => write!(f, "{}s", v.as_secs_f64()),
            Self::User(u) => write!(f, "@{} ({})", u.name, u.id),
            Self::TextChannel(c) => write!(f, "#{} ({})", c.name, c.id),
            Self::VoiceChannel(c) => write!(f, "{} ({})", c.name, c.id),
            Self::Role(r) => write!(f, "@{} ({})", r.name, r.id),
            Self::Message(m) => write!(f, "message {} in {}", m.id, m.channel_id),
        }
    }
}

/// Information about the invocation a conversion runs for.
///
/// Context-computed defaults receive this, and `scope` selects the container
/// (guild/server) entity lookups run in.
#[derive(Debug, Clone)]
pub struct CallContext {
    /// Lookup scope for users, channels and roles.
    pub scope: String,
    /// The user who issued the command.
    pub author: User,
    /// The channel the command was issued in.
    pub channel: TextChannel,
}

impl CallContext {
    /// Creates a new call context.
    pub fn new(scope: impl Into<String>, author: User, channel: TextChannel) -> Self {
        Self {
            scope: scope.into(),
            author,
            channel,
        }
    }
}
