//! Tunable conversion vocabulary.

use serde::{Deserialize, Serialize};

/// Settings that shape how tokens are recognised and converted.
///
/// Loaded as the `conversion` section of the runtime configuration; every
/// field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Character that separates the parts of a splitter argument.
    pub separator: char,

    /// Literals accepted as `true` by choice parameters (case-insensitive).
    pub truthy: Vec<String>,

    /// Literals accepted as `false` by choice parameters (case-insensitive).
    pub falsy: Vec<String>,

    /// URL schemes accepted by URL parameters.
    pub url_schemes: Vec<String>,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            separator: '|',
            truthy: to_strings(&["true", "t", "yes", "y", "on", "1"]),
            falsy: to_strings(&["false", "f", "no", "n", "off", "0"]),
            url_schemes: to_strings(&["http", "https"]),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
