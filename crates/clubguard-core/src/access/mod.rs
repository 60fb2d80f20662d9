//! Role-based route access control.
//!
//! The free functions here evaluate against [`RouteConfig::builtin`]; use the
//! methods on [`RouteConfig`] directly to evaluate against loaded tables.

mod authorizer;
mod guard;
mod pattern;

pub use authorizer::{get_default_route, LOGIN_ROUTE, PENDING_APPROVAL_ROUTE};
pub use guard::{AccessDecision, PermissionChange};
pub use pattern::{matches_any, RoutePattern};

use crate::config::RouteConfig;
use crate::models::{AccountStatus, Role, Subject};

/// True when `path` is reachable without a role.
pub fn is_public_route(path: &str) -> bool {
    RouteConfig::builtin().is_public_route(path)
}

/// Whether the subject described by `role` and `status` may open `path`.
pub fn can_access_route(path: &str, role: Option<Role>, status: Option<&AccountStatus>) -> bool {
    RouteConfig::builtin().can_access_route(path, role, status)
}

pub fn guard(path: &str, subject: &Subject) -> AccessDecision {
    RouteConfig::builtin().guard(path, subject)
}

pub fn on_permission_change(
    previous: &Subject,
    current: &Subject,
    path: Option<&str>,
) -> Option<PermissionChange> {
    RouteConfig::builtin().on_permission_change(previous, current, path)
}
