//! Data models for Clubguard

mod conflict;
mod role;

pub use conflict::{
    to_record, ConflictData, ConflictResolution, ConflictTimestamps, Record, ResolutionStrategy,
};
pub use role::{AccountStatus, Role, Subject};
