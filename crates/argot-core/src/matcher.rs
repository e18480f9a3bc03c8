//! Positional matching of tokens to parameters.
//!
//! Tokens are taken front to back. Each one goes to the first parameter that
//! is still [`Slot::Unfilled`] and whose [predicate](crate::predicate)
//! accepts it, so users may supply arguments in any order the predicates can
//! tell apart. When several parameters would accept a token, declaration
//! order wins.

use tracing::trace;

use crate::consume;
use crate::error::{ConversionError, ConversionResult};
use crate::options::ConversionOptions;
use crate::predicate;
use crate::schema::{Arity, ParameterType, Schema};
use crate::value::ArgValue;

/// The working state of one parameter while the pipeline runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// No token or default has been assigned yet.
    Unfilled,
    /// Holds a converted (and possibly resolved) value.
    Filled(ArgValue),
}

impl Slot {
    pub fn is_filled(&self) -> bool {
        matches!(self, Self::Filled(_))
    }

    pub fn value(&self) -> Option<&ArgValue> {
        match self {
            Self::Filled(value) => Some(value),
            Self::Unfilled => None,
        }
    }

    pub fn into_value(self) -> Option<ArgValue> {
        match self {
            Self::Filled(value) => Some(value),
            Self::Unfilled => None,
        }
    }
}

/// Assigns `tokens` to the parameters of `schema`.
///
/// Returns one slot per parameter. Optional parameters that received no token
/// stay [`Slot::Unfilled`] for the default stage.
///
/// # Errors
///
/// - [`ConversionError::SchemaMismatch`] if a token fits no unfilled parameter.
/// - [`ConversionError::MalformedConsumingArgument`] if a duration cannot be
///   read from the remaining tokens.
/// - [`ConversionError::MissingRequired`] if a non-optional parameter is left
///   unfilled once the tokens run out.
pub fn match_positional(
    tokens: &[String],
    schema: &Schema,
    options: &ConversionOptions,
) -> ConversionResult<Vec<Slot>> {
    let mut slots = vec![Slot::Unfilled; schema.len()];
    let mut remaining: Vec<String> = tokens.to_vec();

    while let Some(token) = remaining.first() {
        let index = schema
            .iter()
            .enumerate()
            .position(|(i, spec)| {
                !slots[i].is_filled() && predicate::matches(token, spec.kind, options)
            })
            .ok_or(ConversionError::SchemaMismatch)?;

        let kind = schema.params()[index].kind;
        let (value, used) = convert_front(&remaining, kind, options)?;
        trace!(index, %kind, used, "matched argument");

        remaining.drain(..used);
        slots[index] = Slot::Filled(value);
    }

    if let Some(index) = schema
        .iter()
        .zip(&slots)
        .position(|(spec, slot)| !spec.optional && !slot.is_filled())
    {
        return Err(ConversionError::MissingRequired { index });
    }

    Ok(slots)
}

/// Converts the front of `remaining` into a value of type `kind`.
///
/// Returns the value and how many leading tokens it consumed.
fn convert_front(
    remaining: &[String],
    kind: ParameterType,
    options: &ConversionOptions,
) -> ConversionResult<(ArgValue, usize)> {
    let token = &remaining[0];

    let value = match kind.arity() {
        Arity::RemainingConsuming => {
            let value = match kind {
                ParameterType::Splitter => {
                    ArgValue::List(consume::splitter(remaining, options.separator))
                }
                _ => ArgValue::Text(consume::sentence(remaining)),
            };
            return Ok((value, remaining.len()));
        }
        Arity::MultiConsuming => {
            let (duration, used) = consume::duration(remaining)
                .ok_or_else(|| ConversionError::malformed(kind, consume::sentence(remaining)))?;
            return Ok((ArgValue::Duration(duration), used));
        }
        Arity::Single => match kind {
            // The predicates already validated these parses.
            ParameterType::Integer => predicate::parse_integer(token).map(ArgValue::Integer),
            ParameterType::Double => predicate::parse_double(token).map(ArgValue::Double),
            ParameterType::Choice => predicate::parse_choice(token, options).map(ArgValue::Boolean),
            _ => Some(ArgValue::Text(token.clone())),
        },
    };

    value
        .map(|v| (v, 1))
        .ok_or(ConversionError::SchemaMismatch)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::schema::ParameterSpec;

    fn toks(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn schema(params: Vec<ParameterSpec>) -> Schema {
        Schema::new(params).unwrap()
    }

    fn run(tokens: &[&str], params: Vec<ParameterSpec>) -> ConversionResult<Vec<Slot>> {
        match_positional(&toks(tokens), &schema(params), &ConversionOptions::default())
    }

    #[test]
    fn test_out_of_order_matching() {
        let slots = run(
            &["hello", "42"],
            vec![
                ParameterSpec::required(ParameterType::Integer),
                ParameterSpec::required(ParameterType::Word),
            ],
        )
        .unwrap();
        assert_eq!(slots[0], Slot::Filled(ArgValue::Integer(42)));
        assert_eq!(slots[1], Slot::Filled(ArgValue::Text("hello".into())));
    }

    #[test]
    fn test_first_declared_wins_ties() {
        let err = run(
            &["5"],
            vec![
                ParameterSpec::required(ParameterType::Word),
                ParameterSpec::required(ParameterType::Integer),
            ],
        )
        .unwrap_err();
        assert_eq!(err, ConversionError::MissingRequired { index: 1 });
    }

    #[test]
    fn test_no_matching_parameter() {
        let err = run(&["abc"], vec![ParameterSpec::required(ParameterType::Integer)]).unwrap_err();
        assert_eq!(err, ConversionError::SchemaMismatch);
    }

    #[test]
    fn test_too_many_tokens() {
        let err = run(&["a", "b"], vec![ParameterSpec::required(ParameterType::Word)]).unwrap_err();
        assert_eq!(err, ConversionError::SchemaMismatch);
    }

    #[test]
    fn test_missing_required() {
        let err = run(&[], vec![ParameterSpec::required(ParameterType::Integer)]).unwrap_err();
        assert_eq!(err, ConversionError::MissingRequired { index: 0 });
    }

    #[test]
    fn test_optional_left_unfilled() {
        let slots = run(
            &["7"],
            vec![
                ParameterSpec::required(ParameterType::Integer),
                ParameterSpec::optional(ParameterType::Choice),
            ],
        )
        .unwrap();
        assert_eq!(slots, vec![Slot::Filled(ArgValue::Integer(7)), Slot::Unfilled]);
    }

    #[test]
    fn test_sentence_claims_everything() {
        let slots = run(
            &["hello", "there", "friend"],
            vec![ParameterSpec::required(ParameterType::Sentence)],
        )
        .unwrap();
        assert_eq!(slots, vec![Slot::Filled(ArgValue::Text("hello there friend".into()))]);
    }

    #[test]
    fn test_sentence_after_single_tokens() {
        let slots = run(
            &["<@1234>", "being", "rude"],
            vec![
                ParameterSpec::required(ParameterType::UserRef),
                ParameterSpec::required(ParameterType::Sentence),
            ],
        )
        .unwrap();
        assert_eq!(slots[0], Slot::Filled(ArgValue::Text("<@1234>".into())));
        assert_eq!(slots[1], Slot::Filled(ArgValue::Text("being rude".into())));
    }

    #[test]
    fn test_splitter() {
        let slots = run(&["a", "b", "|", "c"], vec![ParameterSpec::required(ParameterType::Splitter)])
            .unwrap();
        assert_eq!(
            slots,
            vec![Slot::Filled(ArgValue::List(vec!["a b".into(), "c".into()]))]
        );
    }

    #[test]
    fn test_duration_consumes_only_its_tokens() {
        let slots = run(
            &["2", "hours", "10m", "spamming", "links"],
            vec![
                ParameterSpec::required(ParameterType::Duration),
                ParameterSpec::required(ParameterType::Sentence),
            ],
        )
        .unwrap();
        assert_eq!(slots[0], Slot::Filled(ArgValue::Duration(Duration::from_secs(7_800))));
        assert_eq!(slots[1], Slot::Filled(ArgValue::Text("spamming links".into())));
    }

    #[test]
    fn test_malformed_duration() {
        let err = run(&["later", "today"], vec![ParameterSpec::required(ParameterType::Duration)])
            .unwrap_err();
        assert_eq!(
            err,
            ConversionError::malformed(ParameterType::Duration, "later today")
        );
    }

    #[test]
    fn test_url_skips_non_urls() {
        let slots = run(
            &["look", "https://example.com"],
            vec![
                ParameterSpec::required(ParameterType::Url),
                ParameterSpec::required(ParameterType::Word),
            ],
        )
        .unwrap();
        assert_eq!(slots[0], Slot::Filled(ArgValue::Text("https://example.com".into())));
        assert_eq!(slots[1], Slot::Filled(ArgValue::Text("look".into())));
    }

    #[test]
    fn test_choice_and_double() {
        let slots = run(
            &["2.5", "no"],
            vec![
                ParameterSpec::required(ParameterType::Choice),
                ParameterSpec::required(ParameterType::Double),
            ],
        )
        .unwrap();
        assert_eq!(slots[0], Slot::Filled(ArgValue::Boolean(false)));
        assert_eq!(slots[1], Slot::Filled(ArgValue::Double(2.5)));
    }
}
