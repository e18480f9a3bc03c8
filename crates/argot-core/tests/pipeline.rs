use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use argot_core::{
    ArgValue, Arguments, CallContext, ConversionError, ConversionResult, Converter,
    InMemoryDirectory, Message, ParameterSpec, ParameterType, Role, Schema, TextChannel, User,
    VoiceChannel, split_tokens,
};

fn alice() -> User {
    User {
        id: "1".into(),
        name: "alice".into(),
    }
}

fn general() -> TextChannel {
    TextChannel {
        id: "10".into(),
        name: "general".into(),
    }
}

fn ctx() -> CallContext {
    CallContext::new("guild", alice(), general())
}

fn directory() -> InMemoryDirectory {
    InMemoryDirectory::new()
        .with_user(alice())
        .with_user(User {
            id: "2".into(),
            name: "bob".into(),
        })
        .with_text_channel("guild", general())
        .with_text_channel(
            "guild",
            TextChannel {
                id: "11".into(),
                name: "off-topic".into(),
            },
        )
        .with_voice_channel(
            "guild",
            VoiceChannel {
                id: "30".into(),
                name: "lounge".into(),
            },
        )
        .with_role(
            "guild",
            Role {
                id: "20".into(),
                name: "Moderators".into(),
            },
        )
        .with_message(Message {
            id: "99".into(),
            channel_id: "11".into(),
            author_id: "2".into(),
            content: "pinned rules".into(),
        })
        .with_message(Message {
            id: "98".into(),
            channel_id: "10".into(),
            author_id: "1".into(),
            content: "hello".into(),
        })
}

fn run(input: &str, params: Vec<ParameterSpec>) -> ConversionResult<Arguments> {
    let schema = Schema::new(params).unwrap();
    tokio_test::block_on(Converter::default().convert(
        &split_tokens(input),
        &schema,
        &ctx(),
        &directory(),
    ))
}

#[test]
fn test_slot_count_matches_schema() {
    let args = run(
        "7 hello",
        vec![
            ParameterSpec::required(ParameterType::Integer),
            ParameterSpec::required(ParameterType::Word),
            ParameterSpec::optional(ParameterType::Choice),
            ParameterSpec::optional(ParameterType::Double).with_default(ArgValue::Double(1.5)),
        ],
    )
    .unwrap();

    assert_eq!(args.len(), 4);
    assert_eq!(args.integer(0), Some(7));
    assert_eq!(args.text(1), Some("hello"));
    assert_eq!(args.get(2), None);
    assert_eq!(args.double(3), Some(1.5));
}

#[test]
fn test_first_fit_tie_break() {
    let err = run(
        "5",
        vec![
            ParameterSpec::required(ParameterType::Word),
            ParameterSpec::required(ParameterType::Integer),
        ],
    )
    .unwrap_err();
    assert_eq!(err, ConversionError::MissingRequired { index: 1 });
}

#[test]
fn test_consuming_exhaustion() {
    let args = run(
        "hello there friend",
        vec![ParameterSpec::required(ParameterType::Sentence)],
    )
    .unwrap();
    assert_eq!(args.text(0), Some("hello there friend"));
}

#[test]
fn test_splitter_behaviour() {
    let args = run("a b | c", vec![ParameterSpec::required(ParameterType::Splitter)]).unwrap();
    assert_eq!(args.list(0), Some(&["a b".to_string(), "c".to_string()][..]));

    let args = run("a b", vec![ParameterSpec::required(ParameterType::Splitter)]).unwrap();
    assert_eq!(args.list(0), Some(&["a b".to_string()][..]));
}

#[test]
fn test_missing_required() {
    let err = run("", vec![ParameterSpec::required(ParameterType::Integer)]).unwrap_err();
    assert_eq!(err, ConversionError::MissingRequired { index: 0 });
    assert_eq!(
        err.to_string(),
        "You did not fill all of the non-optional arguments."
    );
}

#[test]
fn test_no_token_reused_or_dropped() {
    let args = run(
        "ban 3 1h",
        vec![
            ParameterSpec::required(ParameterType::Word),
            ParameterSpec::required(ParameterType::Integer),
            ParameterSpec::required(ParameterType::Duration),
        ],
    )
    .unwrap();
    assert_eq!(args.text(0), Some("ban"));
    assert_eq!(args.integer(1), Some(3));
    assert_eq!(args.duration(2), Some(Duration::from_secs(3_600)));

    // A leftover token with nowhere to go is an error, never silently dropped.
    let err = run(
        "ban 3 1h extra",
        vec![
            ParameterSpec::required(ParameterType::Word),
            ParameterSpec::required(ParameterType::Integer),
            ParameterSpec::required(ParameterType::Duration),
        ],
    )
    .unwrap_err();
    assert_eq!(err, ConversionError::SchemaMismatch);
}

#[test]
fn test_moderation_command() {
    let args = run(
        "<@!2> 30m posting links | again",
        vec![
            ParameterSpec::required(ParameterType::UserRef),
            ParameterSpec::required(ParameterType::Duration),
            ParameterSpec::optional(ParameterType::Splitter),
        ],
    )
    .unwrap();

    assert_eq!(args.user(0).map(|u| u.name.as_str()), Some("bob"));
    assert_eq!(args.duration(1), Some(Duration::from_secs(1_800)));
    assert_eq!(
        args.list(2),
        Some(&["posting links".to_string(), "again".to_string()][..])
    );
}

#[test]
fn test_entities_of_every_kind() {
    let args = run(
        "<#10> 30 moderators",
        vec![
            ParameterSpec::required(ParameterType::TextChannelRef),
            ParameterSpec::required(ParameterType::VoiceChannelRef),
            ParameterSpec::required(ParameterType::RoleRef),
        ],
    )
    .unwrap();

    assert_eq!(args.text_channel(0), Some(&general()));
    assert_eq!(args.voice_channel(1).map(|c| c.name.as_str()), Some("lounge"));
    assert_eq!(args.role(2).map(|r| r.id.as_str()), Some("20"));
}

#[test]
fn test_resolution_failure_stops_pipeline() {
    let default_calls = Arc::new(AtomicUsize::new(0));
    let counter = default_calls.clone();

    let err = run(
        "<@404>",
        vec![
            ParameterSpec::required(ParameterType::UserRef),
            ParameterSpec::optional(ParameterType::TextChannelRef).with_default_fn(move |ctx| {
                counter.fetch_add(1, Ordering::SeqCst);
                ArgValue::TextChannel(ctx.channel.clone())
            }),
            ParameterSpec::optional(ParameterType::MessageRef),
        ],
    )
    .unwrap_err();

    assert_eq!(err, ConversionError::resolution(ParameterType::UserRef, "<@404>"));
    assert_eq!(err.to_string(), "Couldn't retrieve user: <@404>.");
    assert_eq!(default_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_message_from_given_channel() {
    let args = run(
        "99 <#11>",
        vec![
            ParameterSpec::required(ParameterType::MessageRef),
            ParameterSpec::required(ParameterType::TextChannelRef),
        ],
    )
    .unwrap();
    assert_eq!(args.message(0).map(|m| m.content.as_str()), Some("pinned rules"));
}

#[test]
fn test_message_from_default_channel() {
    // The channel comes from the invocation context when omitted.
    let schema = vec![
        ParameterSpec::required(ParameterType::MessageRef),
        ParameterSpec::optional(ParameterType::TextChannelRef)
            .with_default_fn(|ctx| ArgValue::TextChannel(ctx.channel.clone())),
    ];
    let args = run("98", schema.clone()).unwrap();
    assert_eq!(args.message(0).map(|m| m.content.as_str()), Some("hello"));

    let err = run("99", schema).unwrap_err();
    assert_eq!(err, ConversionError::MessageResolutionFailure);
    assert_eq!(
        err.to_string(),
        "Couldn't retrieve message from given channel."
    );
}

#[test]
fn test_wrapped_and_embedded_urls_kept_verbatim() {
    let params = || {
        vec![
            ParameterSpec::required(ParameterType::Url),
            ParameterSpec::optional(ParameterType::Sentence),
        ]
    };

    let args = run("<https://example.com/rules> read this", params()).unwrap();
    assert_eq!(args.text(0), Some("<https://example.com/rules>"));
    assert_eq!(args.text(1), Some("read this"));

    let args = run("see:https://example.com", params()).unwrap();
    assert_eq!(args.text(0), Some("see:https://example.com"));

    let err = run("example.com", vec![ParameterSpec::required(ParameterType::Url)]).unwrap_err();
    assert_eq!(err, ConversionError::SchemaMismatch);
}

#[test]
fn test_manual_bypass() {
    let args = run(
        "anything <@404> goes",
        vec![
            ParameterSpec::required(ParameterType::UserRef),
            ParameterSpec::required(ParameterType::Manual),
        ],
    )
    .unwrap();
    let values: Vec<_> = args.values().iter().flatten().cloned().collect();
    assert_eq!(
        values,
        vec![
            ArgValue::Text("anything".into()),
            ArgValue::Text("<@404>".into()),
            ArgValue::Text("goes".into()),
        ]
    );
}

#[test]
fn test_malformed_duration_is_reported() {
    let err = run(
        "tomorrow",
        vec![ParameterSpec::required(ParameterType::Duration)],
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Couldn't read a duration from: tomorrow.");
}

#[test]
fn test_determinism() {
    let params = || {
        vec![
            ParameterSpec::required(ParameterType::UserRef),
            ParameterSpec::optional(ParameterType::Integer).with_default(ArgValue::Integer(1)),
            ParameterSpec::optional(ParameterType::Sentence),
        ]
    };
    let first = run("reason here <@1>", params());
    for _ in 0..10 {
        assert_eq!(run("reason here <@1>", params()), first);
    }
}

#[tokio::test]
async fn test_concurrent_conversions_share_directory() {
    let directory = Arc::new(directory());
    let schema = Arc::new(
        Schema::new(vec![
            ParameterSpec::required(ParameterType::UserRef),
            ParameterSpec::optional(ParameterType::Sentence),
        ])
        .unwrap(),
    );
    let converter = Converter::default();

    let tasks: Vec<_> = ["<@1> hi", "<@2> hello there", "<@3> who"]
        .into_iter()
        .map(|input| {
            let directory = directory.clone();
            let schema = schema.clone();
            let converter = converter.clone();
            tokio::spawn(async move {
                converter
                    .convert(&split_tokens(input), &schema, &ctx(), directory.as_ref())
                    .await
            })
        })
        .collect();

    let mut results = Vec::new();
    for task in tasks {
        results.push(task.await.unwrap());
    }

    assert_eq!(results[0].as_ref().unwrap().user(0), Some(&alice()));
    assert_eq!(results[1].as_ref().unwrap().text(1), Some("hello there"));
    assert_eq!(
        results[2].as_ref().unwrap_err(),
        &ConversionError::resolution(ParameterType::UserRef, "<@3>")
    );
}
