//! Convert CLI
//!
//! Runs one command line through the Argot conversion pipeline and prints the
//! result, which is handy for trying out schemas and configuration.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package convert-cli -- \
//!     --schema "user duration sentence?" \
//!     --directory directory.json \
//!     "<@2> 1h30m spamming links"
//! ```
//!
//! The directory file uses the `InMemoryDirectory` JSON layout. Without one,
//! only the invoking author and channel are known.

mod schema_arg;

use std::path::PathBuf;

use anyhow::{Context, Result};
use argot::core::{
    ArgValue, Arguments, CallContext, Converter, InMemoryDirectory, TextChannel, User,
    split_tokens,
};
use argot::runtime::config::ConfigLoader;
use argot::runtime::logging;
use clap::Parser;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::schema_arg::parse_schema;

/// Converts a command line against a parameter schema.
#[derive(Debug, Parser)]
#[command(name = "convert-cli", version)]
struct Cli {
    /// Parameter types in order, e.g. "word integer? sentence". A trailing `?`
    /// marks a parameter optional.
    #[arg(short, long)]
    schema: String,

    /// The text typed after the command name.
    input: String,

    /// JSON file describing the users, channels, roles and messages to resolve against.
    #[arg(short, long)]
    directory: Option<PathBuf>,

    /// Configuration file; the usual search locations are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lookup scope (guild/server) the command runs in.
    #[arg(long, default_value = "guild")]
    scope: String,

    #[arg(long, default_value = "1")]
    author_id: String,

    #[arg(long, default_value = "alice")]
    author_name: String,

    #[arg(long, default_value = "10")]
    channel_id: String,

    #[arg(long, default_value = "general")]
    channel_name: String,

    /// Print the arguments as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loader = match &cli.config {
        Some(path) => ConfigLoader::new().file(path),
        None => ConfigLoader::new(),
    };
    let config = loader.load().context("failed to load configuration")?;
    logging::init_from_config(&config.logging);

    let schema = parse_schema(&cli.schema)?;

    let author = User {
        id: cli.author_id.clone(),
        name: cli.author_name.clone(),
    };
    let channel = TextChannel {
        id: cli.channel_id.clone(),
        name: cli.channel_name.clone(),
    };
    let directory = load_directory(&cli, &author, &channel).await?;
    let ctx = CallContext::new(cli.scope.clone(), author, channel);

    let tokens = split_tokens(&cli.input);
    info!(tokens = tokens.len(), params = schema.len(), "converting");

    let converter = Converter::new(config.conversion);
    match converter.convert(&tokens, &schema, &ctx, &directory).await {
        Ok(args) if cli.json => {
            println!("{}", serde_json::to_string_pretty(&arguments_json(&args))?);
        }
        Ok(args) => print_arguments(&args),
        Err(err) => {
            // The message is meant for the person who typed the command.
            println!("{err}");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Loads the directory file and makes sure the invoking author and channel
/// resolve even when the file does not list them.
async fn load_directory(
    cli: &Cli,
    author: &User,
    channel: &TextChannel,
) -> Result<InMemoryDirectory> {
    let mut directory: InMemoryDirectory = match &cli.directory {
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("failed to read directory file {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid directory file {}", path.display()))?
        }
        None => InMemoryDirectory::new(),
    };

    if !directory.users.iter().any(|u| u.id == author.id) {
        directory = directory.with_user(author.clone());
    }
    let known_channel = directory
        .scopes
        .get(&cli.scope)
        .is_some_and(|s| s.text_channels.iter().any(|c| c.id == channel.id));
    if !known_channel {
        directory = directory.with_text_channel(&cli.scope, channel.clone());
    }

    debug!(
        users = directory.users.len(),
        scopes = directory.scopes.len(),
        messages = directory.messages.len(),
        "directory loaded"
    );
    Ok(directory)
}

fn print_arguments(args: &Arguments) {
    for (index, value) in args.values().iter().enumerate() {
        match value {
            Some(value) => println!("{index}: {value}"),
            None => println!("{index}: -"),
        }
    }
}

fn arguments_json(args: &Arguments) -> Value {
    Value::Array(
        args.values()
            .iter()
            .map(|value| value.as_ref().map_or(Value::Null, value_json))
            .collect(),
    )
}

fn value_json(value: &ArgValue) -> Value {
    match value {
        ArgValue::Integer(v) => json!(v),
        ArgValue::Double(v) => json!(v),
        ArgValue::Boolean(v) => json!(v),
        ArgValue::Text(v) => json!(v),
        ArgValue::List(v) => json!(v),
        ArgValue::Duration(v) => json!({ "seconds": v.as_secs_f64() }),
        ArgValue::User(v) => json!({ "user": v }),
        ArgValue::TextChannel(v) => json!({ "text_channel": v }),
        ArgValue::VoiceChannel(v) => json!({ "voice_channel": v }),
        ArgValue::Role(v) => json!({ "role": v }),
        ArgValue::Message(v) => json!({ "message": v }),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_value_json() {
        assert_eq!(value_json(&ArgValue::Integer(3)), json!(3));
        assert_eq!(
            value_json(&ArgValue::Duration(Duration::from_secs(90))),
            json!({ "seconds": 90.0 })
        );
        assert_eq!(
            value_json(&ArgValue::User(User {
                id: "1".into(),
                name: "alice".into(),
            })),
            json!({ "user": { "id": "1", "name": "alice" } })
        );
    }
}
