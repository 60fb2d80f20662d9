//! Route table configuration.
//!
//! Provides the `RouteConfig` tables consulted by the access checks: the
//! built-in tables shipped with the crate, and JSON overrides loaded from disk
//! by deployments that customize their navigation.

mod defaults;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::access::RoutePattern;
use crate::error::{Error, Result};
use crate::models::Role;

/// Static route permission tables.
///
/// Loaded once and never mutated; matching is order-independent and there
/// is no deny rule, any matching pattern grants access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfig {
    /// Reachable without any role
    #[serde(default)]
    pub public_routes: Vec<RoutePattern>,
    /// Patterns each role may reach; a role without an entry is denied everywhere
    #[serde(default)]
    pub role_routes: BTreeMap<Role, Vec<RoutePattern>>,
    /// Replaces the role table for subjects whose status is `pending`
    #[serde(default)]
    pub pending_user_routes: Vec<RoutePattern>,
}

impl RouteConfig {
    /// The built-in tables, constructed on first use.
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<RouteConfig> = OnceLock::new();
        BUILTIN.get_or_init(|| Self {
            public_routes: builtin_patterns(defaults::PUBLIC_ROUTES),
            role_routes: Role::ALL
                .into_iter()
                .map(|role| (role, builtin_patterns(defaults::role_routes(role))))
                .collect(),
            pending_user_routes: builtin_patterns(defaults::PENDING_USER_ROUTES),
        })
    }

    /// Parse a route configuration from a raw JSON payload.
    pub fn parse(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|error| Error::InvalidConfig(error.to_string()))
    }

    /// Load a route configuration file.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw).map_err(|error| match error {
            Error::InvalidConfig(message) => {
                Error::InvalidConfig(format!("{}: {message}", path.display()))
            }
            other => other,
        })
    }

    /// Patterns granted to `role`, or `None` when the role has no entry.
    pub fn routes_for(&self, role: Role) -> Option<&[RoutePattern]> {
        self.role_routes.get(&role).map(Vec::as_slice)
    }
}

// Built-in tables are literals checked by tests; a bad entry is a programming error.
fn builtin_patterns(raw: &[&str]) -> Vec<RoutePattern> {
    raw.iter()
        .map(|pattern| {
            RoutePattern::parse(pattern)
                .unwrap_or_else(|_| panic!("built-in route pattern {pattern:?} is invalid"))
        })
        .collect()
}
