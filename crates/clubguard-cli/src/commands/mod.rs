pub mod access;
pub mod common;
pub mod completions;
pub mod conflict;
