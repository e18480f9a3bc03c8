//! Syntactic predicates that steer token matching.
//!
//! A predicate only answers "could this token be a value of that type?".
//! Types without a recognisable syntax accept every token, so their position
//! in the schema decides what they receive.

use url::Url;

use crate::options::ConversionOptions;
use crate::schema::ParameterType;

/// Returns `true` if `token` may be matched to a parameter of type `kind`.
pub fn matches(token: &str, kind: ParameterType, options: &ConversionOptions) -> bool {
    match kind {
        ParameterType::Integer => parse_integer(token).is_some(),
        ParameterType::Double => parse_double(token).is_some(),
        ParameterType::Choice => parse_choice(token, options).is_some(),
        ParameterType::Url => is_url(token, options),
        _ => true,
    }
}

pub fn parse_integer(token: &str) -> Option<i64> {
    token.parse().ok()
}

/// Parses a finite floating-point literal.
///
/// `inf` and `NaN` are rejected even though `f64::from_str` accepts them.
pub fn parse_double(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Maps a boolean-like literal to its value using the configured vocabulary.
pub fn parse_choice(token: &str, options: &ConversionOptions) -> Option<bool> {
    if options.truthy.iter().any(|t| t.eq_ignore_ascii_case(token)) {
        Some(true)
    } else if options.falsy.iter().any(|f| f.eq_ignore_ascii_case(token)) {
        Some(false)
    } else {
        None
    }
}

/// Returns `true` if `token` contains an absolute URL with an allowed scheme
/// and a host.
///
/// The URL may be wrapped or prefixed, as in `<https://example.com>` (link
/// preview suppressed) or `see:https://example.com`. The token itself is what
/// gets converted, so the wrapping is kept.
pub fn is_url(token: &str, options: &ConversionOptions) -> bool {
    // ASCII lowercasing keeps byte offsets, so indices into `lower` are valid in `token`.
    let lower = token.to_ascii_lowercase();

    options.url_schemes.iter().any(|scheme| {
        let prefix = format!("{}://", scheme.to_ascii_lowercase());
        lower
            .match_indices(&prefix)
            .any(|(start, _)| embedded_url(&token[start..]).is_some())
    })
}

/// Parses the URL at the start of `text`, ignoring trailing wrapping and
/// punctuation.
fn embedded_url(text: &str) -> Option<Url> {
    let end = text
        .find(|c: char| c.is_whitespace() || matches!(c, '<' | '>' | '"' | '\'' | '`'))
        .unwrap_or(text.len());
    let candidate = text[..end].trim_end_matches([')', ']', ',', '.', '!', '?', ';']);

    Url::parse(candidate).ok().filter(|url| url.host().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_predicates() {
        let opts = ConversionOptions::default();
        assert!(matches("42", ParameterType::Integer, &opts));
        assert!(matches("-7", ParameterType::Integer, &opts));
        assert!(!matches("4.2", ParameterType::Integer, &opts));
        assert!(matches("4.2", ParameterType::Double, &opts));
        assert!(matches("42", ParameterType::Double, &opts));
        assert!(!matches("NaN", ParameterType::Double, &opts));
        assert!(!matches("inf", ParameterType::Double, &opts));
        assert!(!matches("four", ParameterType::Double, &opts));
    }

    #[test]
    fn test_choice_vocabulary() {
        let opts = ConversionOptions::default();
        assert_eq!(parse_choice("YES", &opts), Some(true));
        assert_eq!(parse_choice("off", &opts), Some(false));
        assert_eq!(parse_choice("maybe", &opts), None);
    }

    #[test]
    fn test_custom_choice_vocabulary() {
        let opts = ConversionOptions {
            truthy: vec!["ja".into()],
            falsy: vec!["nein".into()],
            ..Default::default()
        };
        assert_eq!(parse_choice("Ja", &opts), Some(true));
        assert_eq!(parse_choice("yes", &opts), None);
    }

    #[test]
    fn test_url_predicate() {
        let opts = ConversionOptions::default();
        assert!(is_url("https://example.com/a?b=c", &opts));
        assert!(is_url("HTTP://example.com", &opts));
        assert!(!is_url("example.com", &opts));
        assert!(!is_url("ftp://example.com", &opts));
        assert!(!is_url("mailto:someone@example.com", &opts));
    }

    #[test]
    fn test_url_predicate_wrapped_and_embedded() {
        let opts = ConversionOptions::default();
        assert!(matches("<https://example.com>", ParameterType::Url, &opts));
        assert!(matches("(https://example.com)", ParameterType::Url, &opts));
        assert!(matches("see:https://example.com", ParameterType::Url, &opts));
        assert!(matches("docs:HTTPS://example.com/a.", ParameterType::Url, &opts));
        assert!(!matches("<ftp://example.com>", ParameterType::Url, &opts));
        assert!(!matches("<https://>", ParameterType::Url, &opts));
        assert!(!matches("https", ParameterType::Url, &opts));
    }

    #[test]
    fn test_unconstrained_types_accept_anything() {
        let opts = ConversionOptions::default();
        for kind in [
            ParameterType::Word,
            ParameterType::Sentence,
            ParameterType::Duration,
            ParameterType::UserRef,
            ParameterType::MessageRef,
        ] {
            assert!(matches("???", kind, &opts));
        }
    }
}
