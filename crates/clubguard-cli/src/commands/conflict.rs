use std::path::Path;

use clubguard_core::{
    detect_conflicts, recommend_strategy, resolve, resolve_named, ConflictData,
    ConflictTimestamps, Record,
};
use tracing::info;

use crate::cli::RecordArgs;
use crate::commands::common::load_conflict;
use crate::error::CliError;

pub fn run_resolve(
    records: &RecordArgs,
    strategy: Option<&str>,
    output_path: Option<&Path>,
) -> Result<(), CliError> {
    let data = load_conflict(records)?;

    let resolution = match strategy {
        Some(name) => resolve_named(&data, name.trim(), None)?,
        None => {
            let recommended = recommend_strategy(&data);
            info!(strategy = %recommended, "using recommended strategy");
            resolve(&data, recommended, None)
        }
    };

    if let Some(fields) = &resolution.conflicts {
        info!(?fields, "unresolved fields kept the remote value");
    }

    let rendered = serde_json::to_string_pretty(&resolution)?;
    if let Some(path) = output_path {
        std::fs::write(path, rendered)?;
        println!("{}", path.display());
    } else {
        println!("{rendered}");
    }
    Ok(())
}

pub fn run_detect(records: &RecordArgs, as_json: bool) -> Result<(), CliError> {
    let data = load_conflict(records)?;
    let fields = detect_conflicts(&data.local, &data.remote, data.base.as_ref());

    if as_json {
        println!("{}", serde_json::to_string_pretty(&fields)?);
    } else if fields.is_empty() {
        println!("No conflicting fields.");
    } else {
        for field in fields {
            println!("{field}");
        }
    }
    Ok(())
}

pub fn run_recommend(local_time: &str, remote_time: &str) {
    let data = ConflictData::new(
        Record::new(),
        Record::new(),
        ConflictTimestamps::new(local_time.trim(), remote_time.trim()),
    );
    println!("{}", recommend_strategy(&data));
}
