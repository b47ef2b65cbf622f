//! Configuration options for content extraction.
//!
//! The `Options` struct carries the replaceable pattern tables. It can be
//! built in code or decoded from JSON, where every omitted table keeps its
//! default value.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::patterns::{PatternTables, Patterns};

/// Configuration options for content extraction.
///
/// # Example
///
/// ```rust
/// use rs_reader_view::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Override a single table from JSON
/// let options = Options::from_json(r#"{"patterns": {"block_tags": ["div", "td"]}}"#)?;
/// assert_eq!(options.patterns.block_tags, vec!["div", "td"]);
/// assert!(!options.patterns.content_markers.is_empty());
/// # Ok::<(), rs_reader_view::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Classification, removal and location tables.
    pub patterns: PatternTables,
}

impl Options {
    /// Decode options from a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| Error::Config(err.to_string()))
    }

    /// Compile the pattern tables.
    pub fn compile(&self) -> Result<Patterns> {
        self.patterns.compile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_yields_defaults() {
        let options = Options::from_json("{}").unwrap();
        assert_eq!(options, Options::default());
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let options =
            Options::from_json(r#"{"patterns": {"clutter_substrings": ["teaser"]}}"#).unwrap();
        assert_eq!(options.patterns.clutter_substrings, vec!["teaser"]);
        assert_eq!(
            options.patterns.attribute_whitelist,
            PatternTables::default().attribute_whitelist
        );
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = Options::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn options_round_trip_through_json() {
        let options = Options::default();
        let json = serde_json::to_string(&options).unwrap();
        assert_eq!(Options::from_json(&json).unwrap(), options);
    }
}
