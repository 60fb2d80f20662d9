use std::env;
use std::path::{Path, PathBuf};

use clubguard_core::util::{normalize_text_option, now_rfc3339};
use clubguard_core::{ConflictData, ConflictTimestamps, Record, Role, RouteConfig, Subject};
use serde_json::Value;
use tracing::{debug, warn};

use crate::cli::RecordArgs;
use crate::error::CliError;

pub const ROUTES_ENV_VAR: &str = "CLUBGUARD_ROUTES";
const ROUTES_FILE_NAME: &str = "routes.json";

pub fn default_routes_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("clubguard").join(ROUTES_FILE_NAME))
}

/// Pick the route table file: explicit flag, then env var, then the user
/// config dir when the file exists there.
pub fn resolve_routes_path(
    explicit: Option<&Path>,
    env_value: Option<String>,
    default_path: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = normalize_text_option(env_value) {
        return Some(PathBuf::from(path));
    }
    default_path.filter(|path| path.is_file())
}

pub fn load_route_config(explicit: Option<&Path>) -> Result<RouteConfig, CliError> {
    let path = resolve_routes_path(
        explicit,
        env::var(ROUTES_ENV_VAR).ok(),
        default_routes_path(),
    );
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading route table");
            Ok(RouteConfig::load_from_path(&path)?)
        }
        None => Ok(RouteConfig::builtin().clone()),
    }
}

/// Build a subject from CLI flags; unknown roles degrade to unauthenticated.
pub fn parse_subject(role: Option<&str>, status: Option<&str>) -> Subject {
    let role_name = normalize_text_option(role.map(str::to_string));
    let status = normalize_text_option(status.map(str::to_string));
    if let Some(name) = role_name.as_deref() {
        if Role::parse(name).is_none() {
            warn!(role = name, "unknown role, treating subject as unauthenticated");
        }
    }
    Subject::from_raw(role_name.as_deref(), status.as_deref())
}

pub fn parse_role_strict(raw: &str) -> Result<Role, CliError> {
    Ok(raw.trim().parse::<Role>()?)
}

pub fn read_record(path: &Path) -> Result<Record, CliError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CliError::ReadRecord {
        path: path.to_path_buf(),
        source,
    })?;
    parse_record(&raw).ok_or_else(|| CliError::NotARecord(path.to_path_buf()))
}

pub fn parse_record(raw: &str) -> Option<Record> {
    match serde_json::from_str::<Value>(raw).ok()? {
        Value::Object(record) => Some(record),
        _ => None,
    }
}

pub fn load_conflict(args: &RecordArgs) -> Result<ConflictData, CliError> {
    let local = read_record(&args.local)?;
    let remote = read_record(&args.remote)?;
    let timestamp = ConflictTimestamps::new(
        normalize_text_option(args.local_time.clone()).unwrap_or_else(now_rfc3339),
        normalize_text_option(args.remote_time.clone()).unwrap_or_else(now_rfc3339),
    );

    let data = ConflictData::new(local, remote, timestamp);
    match &args.base {
        Some(path) => Ok(data.with_base(read_record(path)?)),
        None => Ok(data),
    }
}

pub fn format_pattern_list(patterns: &[clubguard_core::RoutePattern]) -> String {
    patterns
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
