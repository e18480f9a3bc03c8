//! Raw input handling.

/// Splits user input into whitespace-delimited tokens.
///
/// Runs of whitespace collapse, so no token is ever empty.
pub fn split_tokens(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_string).collect()
}

/// Strips mention formatting from an identifier.
///
/// Chat clients wrap identifiers as `<@id>`, `<@!id>`, `<#id>` or `<@&id>`;
/// lookups only want the bare `id`. Plain identifiers and names are returned
/// unchanged apart from surrounding whitespace.
pub fn trim_to_id(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(inner) = trimmed
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
    else {
        return trimmed;
    };
    inner.trim_start_matches(['@', '!', '#', '&'])
}
