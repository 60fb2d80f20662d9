//! Conflict data and resolution models

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A flat, JSON-shaped record: field name to value.
///
/// Field order is preserved, so conflict lists follow the caller's field order.
pub type Record = Map<String, Value>;

/// How a conflict between two versions of a record is settled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResolutionStrategy {
    /// Keep the caller's working copy
    Local,
    /// Keep the server's copy
    #[default]
    Remote,
    /// Field-by-field automatic merge
    Merge,
    /// Caller-supplied override applied on top of the server's copy
    Manual,
}

impl ResolutionStrategy {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
            Self::Merge => "merge",
            Self::Manual => "manual",
        }
    }
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolutionStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            "merge" => Ok(Self::Merge),
            "manual" => Ok(Self::Manual),
            other => Err(Error::InvalidStrategy(other.to_string())),
        }
    }
}

/// ISO-8601 production times of the two competing versions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictTimestamps {
    pub local: String,
    pub remote: String,
}

impl ConflictTimestamps {
    pub fn new(local: impl Into<String>, remote: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            remote: remote.into(),
        }
    }
}

/// Two (or three, with a common ancestor) versions of the same record.
///
/// Callers are responsible for the versions sharing one field set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictData {
    /// Caller's working copy
    pub local: Record,
    /// Server's current copy
    pub remote: Record,
    /// Last common ancestor, enables three-way merge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<Record>,
    pub timestamp: ConflictTimestamps,
}

impl ConflictData {
    #[must_use]
    pub const fn new(local: Record, remote: Record, timestamp: ConflictTimestamps) -> Self {
        Self {
            local,
            remote,
            base: None,
            timestamp,
        }
    }

    /// Attach the common ancestor
    #[must_use]
    pub fn with_base(mut self, base: Record) -> Self {
        self.base = Some(base);
        self
    }

    /// Build conflict data from any serializable record type.
    pub fn from_typed<T: Serialize>(
        local: &T,
        remote: &T,
        base: Option<&T>,
        timestamp: ConflictTimestamps,
    ) -> Result<Self> {
        Ok(Self {
            local: to_record(local)?,
            remote: to_record(remote)?,
            base: base.map(to_record).transpose()?,
            timestamp,
        })
    }
}

/// Outcome of a resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictResolution {
    pub resolved: Record,
    /// Strategy actually applied
    pub strategy: ResolutionStrategy,
    /// Fields left in genuine conflict; only the merge strategy sets this,
    /// and never to an empty list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflicts: Option<Vec<String>>,
}

impl ConflictResolution {
    #[must_use]
    pub const fn new(resolved: Record, strategy: ResolutionStrategy) -> Self {
        Self {
            resolved,
            strategy,
            conflicts: None,
        }
    }

    #[must_use]
    pub fn has_conflicts(&self) -> bool {
        self.conflicts.as_ref().is_some_and(|fields| !fields.is_empty())
    }

    /// Deserialize the resolved record back into the caller's type.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.resolved))?)
    }
}

/// Serialize a value and require the result to be a JSON object.
pub fn to_record<T: Serialize>(value: &T) -> Result<Record> {
    match serde_json::to_value(value)? {
        Value::Object(record) => Ok(record),
        other => Err(Error::NotARecord(json_kind(&other).to_string())),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
