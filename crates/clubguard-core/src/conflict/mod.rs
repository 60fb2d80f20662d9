//! Conflict resolution between versions of a JSON record.
//!
//! Strategies are `local`, `remote`, `manual` (caller override on top of
//! remote) and `merge`, a two- or three-way field merge. Fields edited on
//! both sides are settled by type-specific heuristics, see
//! [`heuristics::FieldMerge`]; whatever they cannot settle keeps the remote
//! value and is listed in [`crate::ConflictResolution::conflicts`].

pub mod equality;
pub mod heuristics;
mod resolver;

pub use equality::values_equal;
pub use heuristics::{resolve_field_conflict, FieldMerge};
pub use resolver::{
    detect_conflicts, recommend_strategy, resolve, resolve_named, CustomResolver,
    MANUAL_REVIEW_WINDOW_MS,
};
