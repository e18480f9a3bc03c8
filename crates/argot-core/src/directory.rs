//! The lookup capability the resolver stages depend on.
//!
//! A [`Directory`] knows how to turn a bare identifier into a live entity.
//! Implementations usually wrap a chat platform client or its cache; the
//! pipeline only needs "found", "not found" or "failed", and treats the last
//! two alike.
//!
//! [`InMemoryDirectory`] is a map-backed implementation for tests, demos and
//! cached deployments.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::LookupResult;
use crate::value::{ArgValue, Message, Role, TextChannel, User, VoiceChannel};

/// The kinds of entity a directory resolves within a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    TextChannel,
    VoiceChannel,
    Role,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "user",
            Self::TextChannel => "text channel",
            Self::VoiceChannel => "voice channel",
            Self::Role => "role",
        })
    }
}

/// A resolved entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    User(User),
    TextChannel(TextChannel),
    VoiceChannel(VoiceChannel),
    Role(Role),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::User(_) => EntityKind::User,
            Self::TextChannel(_) => EntityKind::TextChannel,
            Self::VoiceChannel(_) => EntityKind::VoiceChannel,
            Self::Role(_) => EntityKind::Role,
        }
    }
}

impl From<Entity> for ArgValue {
    fn from(entity: Entity) -> Self {
        match entity {
            Entity::User(u) => ArgValue::User(u),
            Entity::TextChannel(c) => ArgValue::TextChannel(c),
            Entity::VoiceChannel(c) => ArgValue::VoiceChannel(c),
            Entity::Role(r) => ArgValue::Role(r),
        }
    }
}

/// Resolves identifiers to entities.
///
/// Shared between concurrent conversions, so implementations must be
/// `Send + Sync`. Returning `Ok(None)` and returning an error both make the
/// conversion fail with a resolution error.
#[async_trait]
pub trait Directory: Send + Sync {
    /// Looks up an entity of `kind` by its bare identifier inside `scope`.
    async fn resolve(
        &self,
        kind: EntityKind,
        id: &str,
        scope: &str,
    ) -> LookupResult<Option<Entity>>;

    /// Fetches a message by identifier from `channel`.
    async fn fetch_message(&self, channel: &TextChannel, id: &str) -> LookupResult<Option<Message>>;
}

/// Entities known in one scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeEntries {
    pub text_channels: Vec<TextChannel>,
    pub voice_channels: Vec<VoiceChannel>,
    pub roles: Vec<Role>,
}

/// A [`Directory`] backed by plain collections.
///
/// Users are global; channels and roles belong to a scope. Roles resolve by
/// identifier first and then by case-insensitive name, so a plain role name
/// works in place of a mention.
///
/// Deserialises from documents shaped like:
///
/// ```json
/// {
///   "users": [{ "id": "1", "name": "alice" }],
///   "scopes": {
///     "guild": {
///       "text_channels": [{ "id": "10", "name": "general" }],
///       "roles": [{ "id": "20", "name": "Moderators" }]
///     }
///   },
///   "messages": [{ "id": "99", "channel_id": "10", "author_id": "1", "content": "hi" }]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InMemoryDirectory {
    pub users: Vec<User>,
    pub scopes: HashMap<String, ScopeEntries>,
    pub messages: Vec<Message>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    pub fn with_text_channel(mut self, scope: &str, channel: TextChannel) -> Self {
        self.scope_mut(scope).text_channels.push(channel);
        self
    }

    pub fn with_voice_channel(mut self, scope: &str, channel: VoiceChannel) -> Self {
        self.scope_mut(scope).voice_channels.push(channel);
        self
    }

    pub fn with_role(mut self, scope: &str, role: Role) -> Self {
        self.scope_mut(scope).roles.push(role);
        self
    }

    pub fn with_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    fn scope_mut(&mut self, scope: &str) -> &mut ScopeEntries {
        self.scopes.entry(scope.to_string()).or_default()
    }

    fn lookup(&self, kind: EntityKind, id: &str, scope: &str) -> Option<Entity> {
        if kind == EntityKind::User {
            return self
                .users
                .iter()
                .find(|u| u.id == id)
                .cloned()
                .map(Entity::User);
        }

        let entries = self.scopes.get(scope)?;
        match kind {
            EntityKind::TextChannel => entries
                .text_channels
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .map(Entity::TextChannel),
            EntityKind::VoiceChannel => entries
                .voice_channels
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .map(Entity::VoiceChannel),
            EntityKind::Role => entries
                .roles
                .iter()
                .find(|r| r.id == id)
                .or_else(|| entries.roles.iter().find(|r| r.name.eq_ignore_ascii_case(id)))
                .cloned()
                .map(Entity::Role),
            EntityKind::User => None,
        }
    }
}

#[async_trait]
impl Directory for InMemoryDirectory {
    async fn resolve(
        &self,
        kind: EntityKind,
        id: &str,
        scope: &str,
    ) -> LookupResult<Option<Entity>> {
        Ok(self.lookup(kind, id, scope))
    }

    async fn fetch_message(&self, channel: &TextChannel, id: &str) -> LookupResult<Option<Message>> {
        Ok(self
            .messages
            .iter()
            .find(|m| m.channel_id == channel.id && m.id == id)
            .cloned())
    }
}
