//! clubguard-core - Core library for Clubguard
//!
//! This crate contains the role-based route access rules and the record
//! conflict resolver shared by every Clubguard front end (page guards,
//! data-sync workers, CLI). Both halves are pure: no I/O, no shared mutable
//! state, identical inputs always produce identical outputs.

pub mod access;
pub mod config;
pub mod conflict;
pub mod error;
pub mod models;
pub mod util;

pub use access::{
    can_access_route, get_default_route, guard, is_public_route, on_permission_change,
    AccessDecision, PermissionChange, RoutePattern,
};
pub use config::RouteConfig;
pub use conflict::{detect_conflicts, recommend_strategy, resolve, resolve_named};
pub use error::{Error, Result};
pub use models::{
    AccountStatus, ConflictData, ConflictResolution, ConflictTimestamps, Record,
    ResolutionStrategy, Role, Subject,
};
