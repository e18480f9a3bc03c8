//! Parsing of the `--schema` argument.
//!
//! A schema is a whitespace-separated list of parameter type names. A trailing
//! `?` marks a parameter optional. Optional users default to the invoking
//! author and optional text channels to the invoking channel, which is what
//! chat commands usually want.

use anyhow::{Context, Result, bail};
use argot::core::{ArgValue, ParameterSpec, ParameterType, Schema};

pub fn parse_schema(spec: &str) -> Result<Schema> {
    let params = spec
        .split_whitespace()
        .map(parse_param)
        .collect::<Result<Vec<_>>>()?;
    if params.is_empty() {
        bail!("schema must declare at least one parameter");
    }
    Schema::new(params).with_context(|| format!("invalid schema '{spec}'"))
}

fn parse_param(word: &str) -> Result<ParameterSpec> {
    let (name, optional) = match word.strip_suffix('?') {
        Some(name) => (name, true),
        None => (word, false),
    };
    let kind: ParameterType = name.parse().map_err(anyhow::Error::msg)?;

    if !optional {
        return Ok(ParameterSpec::required(kind));
    }
    Ok(match kind {
        ParameterType::UserRef => ParameterSpec::optional(kind)
            .with_default_fn(|ctx| ArgValue::User(ctx.author.clone())),
        ParameterType::TextChannelRef => ParameterSpec::optional(kind)
            .with_default_fn(|ctx| ArgValue::TextChannel(ctx.channel.clone())),
        _ => ParameterSpec::optional(kind),
    })
}
