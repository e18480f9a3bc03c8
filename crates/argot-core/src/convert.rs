//! The conversion driver.

use std::time::Duration;

use tracing::{debug, instrument, trace};

use crate::defaults::fill_defaults;
use crate::directory::Directory;
use crate::error::ConversionResult;
use crate::matcher::{Slot, match_positional};
use crate::options::ConversionOptions;
use crate::resolver::{resolve_entities, resolve_messages};
use crate::schema::{ParameterType, Schema};
use crate::value::{ArgValue, CallContext, Message, Role, TextChannel, User, VoiceChannel};

/// The converted arguments of one invocation.
///
/// Holds one entry per schema parameter, in declaration order. An entry is
/// `None` only when its parameter is optional, has no default and received no
/// token. Commands with a manual parameter instead receive one text entry per
/// raw token.
#[derive(Debug, Clone, PartialEq)]
pub struct Arguments {
    values: Vec<Option<ArgValue>>,
}

impl Arguments {
    fn from_slots(slots: Vec<Slot>) -> Self {
        Self {
            values: slots.into_iter().map(Slot::into_value).collect(),
        }
    }

    fn manual(tokens: &[String]) -> Self {
        Self {
            values: tokens
                .iter()
                .map(|t| Some(ArgValue::Text(t.clone())))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value at `index`, or `None` if it is absent or out of range.
    pub fn get(&self, index: usize) -> Option<&ArgValue> {
        self.values.get(index).and_then(Option::as_ref)
    }

    pub fn values(&self) -> &[Option<ArgValue>] {
        &self.values
    }

    pub fn into_values(self) -> Vec<Option<ArgValue>> {
        self.values
    }

    pub fn integer(&self, index: usize) -> Option<i64> {
        self.get(index).and_then(ArgValue::as_integer)
    }

    pub fn double(&self, index: usize) -> Option<f64> {
        self.get(index).and_then(ArgValue::as_double)
    }

    pub fn choice(&self, index: usize) -> Option<bool> {
        self.get(index).and_then(ArgValue::as_bool)
    }

    pub fn text(&self, index: usize) -> Option<&str> {
        self.get(index).and_then(ArgValue::as_text)
    }

    pub fn list(&self, index: usize) -> Option<&[String]> {
        self.get(index).and_then(ArgValue::as_list)
    }

    pub fn duration(&self, index: usize) -> Option<Duration> {
        self.get(index).and_then(ArgValue::as_duration)
    }

    pub fn user(&self, index: usize) -> Option<&User> {
        self.get(index).and_then(ArgValue::as_user)
    }

    pub fn text_channel(&self, index: usize) -> Option<&TextChannel> {
        self.get(index).and_then(ArgValue::as_text_channel)
    }

    pub fn voice_channel(&self, index: usize) -> Option<&VoiceChannel> {
        self.get(index).and_then(ArgValue::as_voice_channel)
    }

    pub fn role(&self, index: usize) -> Option<&Role> {
        self.get(index).and_then(ArgValue::as_role)
    }

    pub fn message(&self, index: usize) -> Option<&Message> {
        self.get(index).and_then(ArgValue::as_message)
    }
}

/// Converts raw tokens into [`Arguments`] according to a [`Schema`].
///
/// A converter only holds its [`ConversionOptions`]; it is cheap to clone and
/// safe to share between concurrent invocations.
///
/// # Example
///
/// ```rust,ignore
/// let converter = Converter::new(config.conversion.clone());
///
/// match converter.convert(&tokens, &schema, &ctx, &directory).await {
///     Ok(args) => run_command(args).await,
///     Err(err) => reply(err.to_string()).await,
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConversionOptions,
}

impl Converter {
    pub fn new(options: ConversionOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConversionOptions {
        &self.options
    }

    /// Runs the full pipeline.
    ///
    /// Stages run in a fixed order and the first error ends the conversion:
    ///
    /// 1. positional matching (always)
    /// 2. entity resolution, if any parameter is a user, channel or role
    /// 3. default filling (always)
    /// 4. message fetching, if any parameter is a message; this needs the text
    ///    channel produced by stage 2 or 3
    ///
    /// A schema containing a [`ParameterType::Manual`] parameter skips all of
    /// this and returns the tokens verbatim.
    #[instrument(skip_all, fields(params = schema.len(), tokens = tokens.len()))]
    pub async fn convert<D>(
        &self,
        tokens: &[String],
        schema: &Schema,
        ctx: &CallContext,
        directory: &D,
    ) -> ConversionResult<Arguments>
    where
        D: Directory + ?Sized,
    {
        if schema.contains(ParameterType::Manual) {
            debug!("manual schema, passing tokens through");
            return Ok(Arguments::manual(tokens));
        }

        let mut slots = match_positional(tokens, schema, &self.options)?;
        debug!(filled = slots.iter().filter(|s| s.is_filled()).count(), "tokens matched");

        slots = stage_if(schema.has_resolvable(), slots, |slots| {
            resolve_entities(slots, schema, &ctx.scope, directory)
        })
        .await?;

        slots = fill_defaults(slots, schema, ctx);

        slots = stage_if(schema.contains(ParameterType::MessageRef), slots, |slots| {
            resolve_messages(slots, schema, directory)
        })
        .await?;

        Ok(Arguments::from_slots(slots))
    }
}

/// Runs `stage` on `slots` when `enabled`, otherwise passes them through.
///
/// Stages whose precondition does not hold (no resolvable parameter, no
/// message parameter) are skipped without touching the directory.
async fn stage_if<F, Fut>(
    enabled: bool,
    slots: Vec<Slot>,
    stage: F,
) -> ConversionResult<Vec<Slot>>
where
    F: FnOnce(Vec<Slot>) -> Fut,
    Fut: Future<Output = ConversionResult<Vec<Slot>>>,
{
    if !enabled {
        trace!("stage skipped");
        return Ok(slots);
    }
    let slots = stage(slots).await?;
    debug!(filled = slots.iter().filter(|s| s.is_filled()).count(), "stage finished");
    Ok(slots)
}

/// Runs [`Converter::convert`] with default options.
pub async fn convert<D>(
    tokens: &[String],
    schema: &Schema,
    ctx: &CallContext,
    directory: &D,
) -> ConversionResult<Arguments>
where
    D: Directory + ?Sized,
{
    Converter::default()
        .convert(tokens, schema, ctx, directory)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemoryDirectory;
    use crate::error::ConversionError;
    use crate::schema::ParameterSpec;

    fn ctx() -> CallContext {
        CallContext::new(
            "guild",
            User {
                id: "1".into(),
                name: "alice".into(),
            },
            TextChannel {
                id: "10".into(),
                name: "general".into(),
            },
        )
    }

    #[test]
    fn test_manual_bypass() {
        let schema = Schema::new(vec![
            ParameterSpec::required(ParameterType::Integer),
            ParameterSpec::required(ParameterType::Manual),
        ])
        .unwrap();
        let tokens = vec!["not".to_string(), "a".into(), "number".into()];

        let args = tokio_test::block_on(convert(&tokens, &schema, &ctx(), &InMemoryDirectory::new()))
            .unwrap();
        assert_eq!(args.len(), 3);
        assert_eq!(args.text(0), Some("not"));
        assert_eq!(args.text(2), Some("number"));
    }

    #[test]
    fn test_custom_separator() {
        let schema = Schema::new(vec![ParameterSpec::required(ParameterType::Splitter)]).unwrap();
        let converter = Converter::new(ConversionOptions {
            separator: ',',
            ..Default::default()
        });
        let tokens = vec!["a,".to_string(), "b".into()];

        let args = tokio_test::block_on(converter.convert(
            &tokens,
            &schema,
            &ctx(),
            &InMemoryDirectory::new(),
        ))
        .unwrap();
        assert_eq!(args.list(0), Some(&["a".to_string(), "b".to_string()][..]));
    }

    #[test]
    fn test_skipped_stage_passes_slots_through() {
        let slots = vec![Slot::Unfilled, Slot::Filled(ArgValue::Integer(2))];
        let out = tokio_test::block_on(stage_if(false, slots.clone(), |_| async {
            Err(ConversionError::MessageResolutionFailure)
        }))
        .unwrap();
        assert_eq!(out, slots);
    }

    #[test]
    fn test_enabled_stage_short_circuits() {
        let err = tokio_test::block_on(stage_if(true, vec![Slot::Unfilled], |_| async {
            Err(ConversionError::MessageResolutionFailure)
        }))
        .unwrap_err();
        assert_eq!(err, ConversionError::MessageResolutionFailure);
    }

    #[test]
    fn test_accessors_on_absent_values() {
        let args = Arguments::from_slots(vec![Slot::Unfilled, Slot::Filled(ArgValue::Integer(1))]);
        assert_eq!(args.len(), 2);
        assert!(args.get(0).is_none());
        assert_eq!(args.integer(1), Some(1));
        assert_eq!(args.text(1), None);
        assert!(args.get(5).is_none());
    }
}
