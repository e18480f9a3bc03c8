//! Stages that replace raw identifiers with resolved entities.

use tracing::{debug, warn};

use crate::directory::Directory;
use crate::error::{ConversionError, ConversionResult};
use crate::matcher::Slot;
use crate::schema::{ParameterType, Schema};
use crate::tokens::trim_to_id;
use crate::value::{ArgValue, TextChannel};

/// Resolves user, channel and role identifiers through `directory`.
///
/// Only filled slots of a resolvable type holding raw text are looked up;
/// everything else passes through unchanged.
///
/// # Errors
///
/// [`ConversionError::ResolutionFailure`] for the first identifier the
/// directory does not know, cannot look up, or answers with an entity of the
/// wrong kind.
pub async fn resolve_entities<D>(
    slots: Vec<Slot>,
    schema: &Schema,
    scope: &str,
    directory: &D,
) -> ConversionResult<Vec<Slot>>
where
    D: Directory + ?Sized,
{
    let mut resolved = Vec::with_capacity(slots.len());

    for (slot, spec) in slots.into_iter().zip(schema) {
        let raw = match &slot {
            Slot::Filled(ArgValue::Text(raw)) => Some(raw.clone()),
            _ => None,
        };
        let (Some(kind), Some(raw)) = (spec.kind.entity_kind(), raw) else {
            resolved.push(slot);
            continue;
        };

        let id = trim_to_id(&raw);
        let entity = match directory.resolve(kind, id, scope).await {
            Ok(Some(entity)) if entity.kind() == kind => entity,
            Ok(Some(entity)) => {
                warn!(expected = %kind, got = %entity.kind(), id, "directory returned wrong entity kind");
                return Err(ConversionError::resolution(spec.kind, raw));
            }
            Ok(None) => {
                debug!(%kind, id, scope, "entity not found");
                return Err(ConversionError::resolution(spec.kind, raw));
            }
            Err(err) => {
                warn!(%kind, id, scope, error = %err, "entity lookup failed");
                return Err(ConversionError::resolution(spec.kind, raw));
            }
        };

        resolved.push(Slot::Filled(entity.into()));
    }

    Ok(resolved)
}

/// Fetches message arguments from the text channel resolved earlier in the
/// same argument list.
///
/// Must run after entity resolution and default filling, since the channel
/// may come from either. Unfilled message slots and already fetched messages
/// pass through.
///
/// # Errors
///
/// [`ConversionError::MessageResolutionFailure`] if a message cannot be
/// fetched, or if a message identifier is present but no text channel was
/// resolved (an optional channel parameter left empty).
pub async fn resolve_messages<D>(
    slots: Vec<Slot>,
    schema: &Schema,
    directory: &D,
) -> ConversionResult<Vec<Slot>>
where
    D: Directory + ?Sized,
{
    let channel: Option<TextChannel> = slots
        .iter()
        .find_map(|slot| slot.value().and_then(ArgValue::as_text_channel))
        .cloned();

    let mut resolved = Vec::with_capacity(slots.len());

    for (slot, spec) in slots.into_iter().zip(schema) {
        if spec.kind != ParameterType::MessageRef {
            resolved.push(slot);
            continue;
        }

        let raw = match &slot {
            Slot::Unfilled | Slot::Filled(ArgValue::Message(_)) => None,
            Slot::Filled(ArgValue::Text(raw)) => Some(raw.clone()),
            Slot::Filled(_) => return Err(ConversionError::MessageResolutionFailure),
        };
        let Some(raw) = raw else {
            resolved.push(slot);
            continue;
        };

        let Some(channel) = channel.as_ref() else {
            debug!("message argument without a resolved text channel");
            return Err(ConversionError::MessageResolutionFailure);
        };

        let id = trim_to_id(&raw);
        let message = match directory.fetch_message(channel, id).await {
            Ok(Some(message)) => message,
            Ok(None) => {
                debug!(channel = %channel.id, id, "message not found");
                return Err(ConversionError::MessageResolutionFailure);
            }
            Err(err) => {
                warn!(channel = %channel.id, id, error = %err, "message lookup failed");
                return Err(ConversionError::MessageResolutionFailure);
            }
        };

        resolved.push(Slot::Filled(ArgValue::Message(message)));
    }

    Ok(resolved)
}
