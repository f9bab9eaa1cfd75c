//! Parsed dotted config paths.
//!
//! A [`ConfigPath`] is the sole addressing mechanism for documents: an ordered
//! list of section/key segments, parsed once from dotted form (`"database.host"`)
//! instead of being re-split on every traversal. There is no positional or
//! array-index syntax — list values are addressed as whole leaves.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// An ordered list of section/key names identifying a location in a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigPath {
    segments: Vec<String>,
}

impl ConfigPath {
    /// The path's segments, outermost section first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The final segment — the key the path ultimately names.
    pub fn leaf(&self) -> &str {
        self.segments
            .last()
            .map(String::as_str)
            .unwrap_or_default()
    }

    /// Extend this path with one more segment.
    pub fn child(&self, segment: &str) -> ConfigPath {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        ConfigPath { segments }
    }

    /// A path with a single segment, used as the root of document walks.
    pub(crate) fn root(segment: &str) -> ConfigPath {
        ConfigPath {
            segments: vec![segment.to_string()],
        }
    }
}

impl FromStr for ConfigPath {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<String> = s.split('.').map(str::to_string).collect();
        if segments.iter().any(|seg| seg.trim().is_empty()) {
            return Err(ConfigError::InvalidPath {
                path: s.to_string(),
            });
        }
        Ok(ConfigPath { segments })
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_path() {
        let path: ConfigPath = "host".parse().unwrap();
        assert_eq!(path.segments(), ["host"]);
        assert_eq!(path.leaf(), "host");
    }

    #[test]
    fn parses_nested_path() {
        let path: ConfigPath = "database.pool.size".parse().unwrap();
        assert_eq!(path.segments(), ["database", "pool", "size"]);
        assert_eq!(path.leaf(), "size");
    }

    #[test]
    fn display_round_trips() {
        let path: ConfigPath = "ui.theme".parse().unwrap();
        assert_eq!(path.to_string(), "ui.theme");
    }

    #[test]
    fn rejects_empty_string() {
        assert!("".parse::<ConfigPath>().is_err());
    }

    #[test]
    fn rejects_empty_segment() {
        assert!("a..b".parse::<ConfigPath>().is_err());
        assert!(".a".parse::<ConfigPath>().is_err());
        assert!("a.".parse::<ConfigPath>().is_err());
    }

    #[test]
    fn rejects_blank_segment() {
        assert!("a. .b".parse::<ConfigPath>().is_err());
    }

    #[test]
    fn child_appends_segment() {
        let path: ConfigPath = "keybindings".parse().unwrap();
        assert_eq!(path.child("save").to_string(), "keybindings.save");
    }
}
