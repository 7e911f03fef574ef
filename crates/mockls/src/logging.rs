//! Log output formats.

use strum::{Display, EnumString};

/// Supported logging output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LogFormat {
    /// Structured JSON suitable for ingestion by logging stacks.
    #[default]
    Json,
    /// Human-readable single line output.
    Compact,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("json", LogFormat::Json)]
    #[case("JSON", LogFormat::Json)]
    #[case("compact", LogFormat::Compact)]
    fn parses_formats(#[case] text: &str, #[case] expected: LogFormat) {
        assert_eq!(LogFormat::from_str(text), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_format() {
        let result: Result<LogFormat, strum::ParseError> = LogFormat::from_str("xml");
        assert!(result.is_err());
    }

    #[rstest]
    fn displays_in_snake_case() {
        assert_eq!(LogFormat::Compact.to_string(), "compact");
    }
}
