//! Prefix filtering and record parsing

use crate::error::ParseError;

/// Default prefix the firmware puts in front of telemetry lines
pub const DEFAULT_PREFIX: &str = "**";

/// Number of leading fields a record must carry
const REQUIRED_FIELDS: usize = 3;

/// Literal prefix match used to pick telemetry out of other console output
#[derive(Debug, Clone)]
pub struct PrefixFilter {
    prefix: String,
}

impl Default for PrefixFilter {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl PrefixFilter {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The text after the prefix, or `None` if the line does not start with it
    pub fn strip<'a>(&self, line: &'a str) -> Option<&'a str> {
        line.strip_prefix(self.prefix.as_str())
    }
}

/// One temperature/humidity reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Iteration counter reported by the device
    pub index: f64,
    /// Temperature in °C
    pub temperature: f64,
    /// Relative humidity in %
    pub humidity: f64,
}

impl Sample {
    /// Parse the whitespace-separated fields following the prefix.
    ///
    /// Every token must be a number, including trailing ones beyond the
    /// third, which are then ignored.
    pub fn parse(fields: &str) -> Result<Self, ParseError> {
        let values = fields
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<f64>()
                    .map_err(|source| ParseError::InvalidNumber {
                        token: token.to_string(),
                        line: fields.trim_end().to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<f64>, ParseError>>()?;

        if values.len() < REQUIRED_FIELDS {
            return Err(ParseError::MissingFields {
                found: values.len(),
                expected: REQUIRED_FIELDS,
                line: fields.trim_end().to_string(),
            });
        }

        Ok(Self {
            index: values[0],
            temperature: values[1],
            humidity: values[2],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches_literal_prefix() {
        let filter = PrefixFilter::default();

        assert_eq!(filter.strip("** 1 22.5 55.0\n"), Some(" 1 22.5 55.0\n"));
        assert_eq!(filter.strip("* 1 22.5 55.0\n"), None);
        assert_eq!(filter.strip(" ** 1 22.5 55.0\n"), None);
        assert_eq!(filter.strip("I (312) main: version 0.1.0\n"), None);
        assert_eq!(filter.strip(""), None);
    }

    #[test]
    fn test_filter_is_not_a_pattern() {
        let filter = PrefixFilter::new("T.");

        assert_eq!(filter.strip("T. 1 2 3"), Some(" 1 2 3"));
        assert_eq!(filter.strip("TX 1 2 3"), None);
    }

    #[test]
    fn test_parse_firmware_line() {
        let sample = Sample::parse(" 1 22.500000 55.000000\n").unwrap();

        assert_eq!(
            sample,
            Sample {
                index: 1.0,
                temperature: 22.5,
                humidity: 55.0
            }
        );
    }

    #[test]
    fn test_parse_ignores_extra_numeric_fields() {
        let sample = Sample::parse("7 20.1 40.2 1013.25 3.3").unwrap();
        assert_eq!(sample.index, 7.0);
        assert_eq!(sample.humidity, 40.2);
    }

    #[test]
    fn test_parse_rejects_non_numeric_token() {
        let err = Sample::parse(" 1 abc 55.0\n").unwrap_err();

        match err {
            ParseError::InvalidNumber { token, line, .. } => {
                assert_eq!(token, "abc");
                assert_eq!(line, " 1 abc 55.0");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_rejects_non_numeric_trailing_token() {
        assert!(matches!(
            Sample::parse("1 22.5 55.0 ok"),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_parse_requires_three_fields() {
        assert!(matches!(
            Sample::parse(" 1 22.5\n"),
            Err(ParseError::MissingFields { found: 2, .. })
        ));
        assert!(matches!(
            Sample::parse(""),
            Err(ParseError::MissingFields { found: 0, .. })
        ));
    }

    #[test]
    fn test_missing_fields_message() {
        let err = Sample::parse(" 4 21.5\n").unwrap_err();
        assert_eq!(
            err.to_string(),
            "record \" 4 21.5\" has 2 fields, expected at least 3"
        );
    }

    #[test]
    fn test_parse_accepts_float_spellings() {
        let sample = Sample::parse("1e1 -3.5 nan").unwrap();
        assert_eq!(sample.index, 10.0);
        assert_eq!(sample.temperature, -3.5);
        assert!(sample.humidity.is_nan());
    }
}
