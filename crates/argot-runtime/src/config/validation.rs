//! Configuration validation utilities.

use std::collections::HashSet;

use argot_core::ConversionOptions;

use super::error::{ConfigError, ConfigResult};
use super::schema::{ArgotConfig, LogOutput, LoggingConfig};

/// Validates the entire configuration.
pub fn validate_config(config: &ArgotConfig) -> ConfigResult<()> {
    validate_conversion_options(&config.conversion)?;
    validate_logging_config(&config.logging)?;
    Ok(())
}

/// Validates the conversion vocabulary.
pub fn validate_conversion_options(options: &ConversionOptions) -> ConfigResult<()> {
    if options.separator.is_whitespace() {
        // Tokens are already split on whitespace, so the separator would never be seen.
        return Err(ConfigError::validation(
            "Splitter separator cannot be a whitespace character",
        ));
    }

    validate_vocabulary(&options.truthy, "conversion.truthy")?;
    validate_vocabulary(&options.falsy, "conversion.falsy")?;

    let truthy: HashSet<String> = options.truthy.iter().map(|s| s.to_lowercase()).collect();
    if let Some(both) = options
        .falsy
        .iter()
        .find(|s| truthy.contains(&s.to_lowercase()))
    {
        return Err(ConfigError::validation(format!(
            "Literal '{both}' cannot be both truthy and falsy"
        )));
    }

    if options.url_schemes.is_empty() {
        return Err(ConfigError::missing_field("conversion.url_schemes"));
    }
    if let Some(bad) = options
        .url_schemes
        .iter()
        .find(|s| s.is_empty() || s.contains(':'))
    {
        return Err(ConfigError::validation(format!(
            "Invalid URL scheme: '{bad}'. Schemes are given without '://'"
        )));
    }

    Ok(())
}

fn validate_vocabulary(words: &[String], field: &str) -> ConfigResult<()> {
    if words.is_empty() {
        return Err(ConfigError::missing_field(field));
    }
    if let Some(bad) = words.iter().find(|w| w.is_empty() || w.contains(char::is_whitespace)) {
        return Err(ConfigError::validation(format!(
            "Invalid literal in {field}: '{bad}'. Literals must be single words"
        )));
    }
    Ok(())
}

/// Validates logging configuration.
fn validate_logging_config(logging: &LoggingConfig) -> ConfigResult<()> {
    if logging.output == LogOutput::File && logging.file_path.is_none() {
        return Err(ConfigError::missing_field("logging.file_path"));
    }

    if let Some(module) = logging.filters.keys().find(|m| m.trim().is_empty()) {
        return Err(ConfigError::validation(format!(
            "Invalid logging filter target: '{module}'"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&ArgotConfig::default()).is_ok());
    }

    #[test]
    fn test_whitespace_separator_rejected() {
        let mut config = ArgotConfig::default();
        config.conversion.separator = ' ';
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn test_overlapping_vocabulary_rejected() {
        let mut config = ArgotConfig::default();
        config.conversion.falsy.push("YES".into());
        let err = validate_config(&config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: Literal 'YES' cannot be both truthy and falsy"
        );
    }

    #[test]
    fn test_empty_vocabulary_rejected() {
        let mut config = ArgotConfig::default();
        config.conversion.truthy.clear();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::MissingField { field }) if field == "conversion.truthy"
        ));
    }

    #[test]
    fn test_url_schemes() {
        let mut config = ArgotConfig::default();
        config.conversion.url_schemes = vec!["https://".into()];
        assert!(validate_config(&config).is_err());

        config.conversion.url_schemes.clear();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::MissingField { .. })
        ));
    }

    #[test]
    fn test_file_output_needs_path() {
        let mut config = ArgotConfig::default();
        config.logging.output = LogOutput::File;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::MissingField { field }) if field == "logging.file_path"
        ));

        config.logging.file_path = Some(PathBuf::from("logs/argot.log"));
        assert!(validate_config(&config).is_ok());
    }
}
