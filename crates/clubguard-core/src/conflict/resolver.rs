//! Record-level conflict resolution.

use serde_json::Value;
use tracing::{debug, warn};

use crate::conflict::equality::fields_equal;
use crate::conflict::heuristics::resolve_field_conflict;
use crate::error::Result;
use crate::models::{ConflictData, ConflictResolution, Record, ResolutionStrategy};
use crate::util::parse_instant_millis;

/// Edits closer together than this are treated as concurrent.
pub const MANUAL_REVIEW_WINDOW_MS: u64 = 5 * 60 * 1000;

/// Caller-supplied override for the manual strategy.
///
/// Receives `(local, remote, base)` and returns the fields to lay over the
/// remote copy.
pub type CustomResolver<'a> = dyn Fn(&Record, &Record, Option<&Record>) -> Record + 'a;

/// Settle a conflict with the given strategy.
///
/// Never mutates `data`. Only [`ResolutionStrategy::Merge`] reports
/// unresolved fields. `Manual` without a custom resolver falls back to the
/// remote copy and reports [`ResolutionStrategy::Remote`].
pub fn resolve(
    data: &ConflictData,
    strategy: ResolutionStrategy,
    custom: Option<&CustomResolver<'_>>,
) -> ConflictResolution {
    match strategy {
        ResolutionStrategy::Local => {
            ConflictResolution::new(data.local.clone(), ResolutionStrategy::Local)
        }
        ResolutionStrategy::Remote => {
            ConflictResolution::new(data.remote.clone(), ResolutionStrategy::Remote)
        }
        ResolutionStrategy::Merge => auto_merge(data),
        ResolutionStrategy::Manual => {
            let Some(custom) = custom else {
                return ConflictResolution::new(data.remote.clone(), ResolutionStrategy::Remote);
            };
            let mut resolved = data.remote.clone();
            resolved.extend(custom(&data.local, &data.remote, data.base.as_ref()));
            ConflictResolution::new(resolved, ResolutionStrategy::Manual)
        }
    }
}

/// [`resolve`] with the strategy given by name.
///
/// Fails with [`crate::Error::InvalidStrategy`] for an unknown name.
pub fn resolve_named(
    data: &ConflictData,
    strategy: &str,
    custom: Option<&CustomResolver<'_>>,
) -> Result<ConflictResolution> {
    Ok(resolve(data, strategy.parse()?, custom))
}

/// Fields in genuine conflict.
///
/// Without `base`, every field of `local` whose value differs from
/// `remote`. With `base`, only fields changed on both sides to different
/// values.
pub fn detect_conflicts(local: &Record, remote: &Record, base: Option<&Record>) -> Vec<String> {
    local
        .iter()
        .filter(|(field, local_value)| {
            let local_value = Some(*local_value);
            let remote_value = remote.get(*field);
            match base {
                None => !fields_equal(local_value, remote_value),
                Some(base) => {
                    let base_value = base.get(*field);
                    !fields_equal(local_value, base_value)
                        && !fields_equal(remote_value, base_value)
                        && !fields_equal(local_value, remote_value)
                }
            }
        })
        .map(|(field, _)| field.clone())
        .collect()
}

/// Suggest a strategy from the two versions' timestamps.
///
/// Within [`MANUAL_REVIEW_WINDOW_MS`] of each other: manual. Otherwise the
/// strictly newer side wins, remote on ties. Unparseable timestamps skip
/// the comparison and recommend remote.
pub fn recommend_strategy(data: &ConflictData) -> ResolutionStrategy {
    let local = parse_instant_millis(&data.timestamp.local);
    let remote = parse_instant_millis(&data.timestamp.remote);

    let (Some(local), Some(remote)) = (local, remote) else {
        warn!(
            local = %data.timestamp.local,
            remote = %data.timestamp.remote,
            "unparseable conflict timestamps, recommending remote"
        );
        return ResolutionStrategy::Remote;
    };

    if local.abs_diff(remote) < MANUAL_REVIEW_WINDOW_MS {
        ResolutionStrategy::Manual
    } else if local > remote {
        ResolutionStrategy::Local
    } else {
        ResolutionStrategy::Remote
    }
}

enum FieldOutcome {
    Take(Option<Value>),
    Unresolved,
}

fn auto_merge(data: &ConflictData) -> ConflictResolution {
    let mut resolved = data.remote.clone();
    let mut conflicts = Vec::new();

    for (field, local) in &data.local {
        let remote = data.remote.get(field);
        let outcome = match &data.base {
            None => merge_two_way(field, local, remote),
            Some(base) => merge_three_way(field, local, remote, base.get(field)),
        };

        match outcome {
            FieldOutcome::Take(value) => assign(&mut resolved, field, value),
            FieldOutcome::Unresolved => {
                conflicts.push(field.clone());
                assign(&mut resolved, field, remote.cloned());
            }
        }
    }

    debug!(
        three_way = data.base.is_some(),
        fields = data.local.len(),
        ?conflicts,
        "auto-merge finished"
    );

    ConflictResolution {
        resolved,
        strategy: ResolutionStrategy::Merge,
        conflicts: (!conflicts.is_empty()).then_some(conflicts),
    }
}

fn merge_two_way(field: &str, local: &Value, remote: Option<&Value>) -> FieldOutcome {
    if fields_equal(Some(local), remote) {
        return FieldOutcome::Take(remote.cloned());
    }
    resolve_field_conflict(field, local, remote)
        .map_or(FieldOutcome::Unresolved, |merged| FieldOutcome::Take(Some(merged)))
}

fn merge_three_way(
    field: &str,
    local: &Value,
    remote: Option<&Value>,
    base: Option<&Value>,
) -> FieldOutcome {
    let local_changed = !fields_equal(Some(local), base);
    let remote_changed = !fields_equal(remote, base);

    match (local_changed, remote_changed) {
        (false, false) => FieldOutcome::Take(base.cloned()),
        (true, false) => FieldOutcome::Take(Some(local.clone())),
        (false, true) => FieldOutcome::Take(remote.cloned()),
        (true, true) if fields_equal(Some(local), remote) => {
            FieldOutcome::Take(Some(local.clone()))
        }
        (true, true) => resolve_field_conflict(field, local, remote)
            .map_or(FieldOutcome::Unresolved, |merged| FieldOutcome::Take(Some(merged))),
    }
}

// An absent value removes the field, keeping the order of the others.
fn assign(record: &mut Record, field: &str, value: Option<Value>) {
    match value {
        Some(value) => {
            record.insert(field.to_string(), value);
        }
        None => {
            record.shift_remove(field);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConflictTimestamps;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(record) => record,
            other => panic!("not a record: {other}"),
        }
    }

    fn conflict(local: Value, remote: Value, base: Option<Value>) -> ConflictData {
        let data = ConflictData::new(
            record(local),
            record(remote),
            ConflictTimestamps::new("2024-03-01T10:00:00Z", "2024-03-01T12:00:00Z"),
        );
        match base {
            Some(base) => data.with_base(record(base)),
            None => data,
        }
    }

    fn merge(data: &ConflictData) -> ConflictResolution {
        resolve(data, ResolutionStrategy::Merge, None)
    }

    #[test]
    fn local_and_remote_return_the_chosen_copy() {
        let data = conflict(json!({"name": "A", "level": 1}), json!({"name": "B"}), None);

        let local = resolve(&data, ResolutionStrategy::Local, None);
        assert_eq!(local.resolved, data.local);
        assert_eq!(local.strategy, ResolutionStrategy::Local);
        assert_eq!(local.conflicts, None);

        let remote = resolve(&data, ResolutionStrategy::Remote, None);
        assert_eq!(remote.resolved, data.remote);
        assert_eq!(remote.strategy, ResolutionStrategy::Remote);
        assert_eq!(remote.conflicts, None);
    }

    #[test]
    fn manual_lays_override_over_remote() {
        let data = conflict(
            json!({"name": "Local", "level": 3}),
            json!({"name": "Remote", "level": 4, "club": "Eagles"}),
            None,
        );
        let pick_local_name: &CustomResolver<'_> = &|local, _, _| {
            let mut overrides = Record::new();
            overrides.insert("name".to_string(), local["name"].clone());
            overrides
        };

        let resolution = resolve(&data, ResolutionStrategy::Manual, Some(pick_local_name));
        assert_eq!(resolution.strategy, ResolutionStrategy::Manual);
        assert_eq!(
            resolution.resolved,
            record(json!({"name": "Local", "level": 4, "club": "Eagles"}))
        );
    }

    #[test]
    fn manual_receives_base() {
        let data = conflict(json!({"a": 1}), json!({"a": 2}), Some(json!({"a": 0})));
        let from_base: &CustomResolver<'_> = &|_, _, base| base.cloned().unwrap();
        let resolution = resolve(&data, ResolutionStrategy::Manual, Some(from_base));
        assert_eq!(resolution.resolved, record(json!({"a": 0})));
    }

    #[test]
    fn manual_without_resolver_falls_back_to_remote() {
        let data = conflict(json!({"a": 1}), json!({"a": 2}), None);
        let resolution = resolve(&data, ResolutionStrategy::Manual, None);
        assert_eq!(resolution.resolved, data.remote);
        assert_eq!(resolution.strategy, ResolutionStrategy::Remote);
    }

    #[test]
    fn resolve_named_rejects_unknown_strategy() {
        let data = conflict(json!({"a": 1}), json!({"a": 2}), None);
        let error = resolve_named(&data, "newest-wins", None).unwrap_err();
        assert!(matches!(error, crate::Error::InvalidStrategy(ref name) if name == "newest-wins"));
        assert_eq!(
            resolve_named(&data, "local", None).unwrap().resolved,
            data.local
        );
    }

    #[test]
    fn merge_of_identical_versions_is_identity() {
        let x = json!({"name": "Park", "tags": ["vault"], "meta": {"k": 1}, "note": null});
        let data = conflict(x.clone(), x.clone(), Some(x.clone()));
        let resolution = merge(&data);
        assert_eq!(resolution.resolved, record(x));
        assert_eq!(resolution.conflicts, None);
    }

    #[test]
    fn three_way_takes_one_sided_changes() {
        let local_only = merge(&conflict(json!({"a": 2}), json!({"a": 1}), Some(json!({"a": 1}))));
        assert_eq!(local_only.resolved["a"], json!(2));
        assert_eq!(local_only.conflicts, None);

        let remote_only = merge(&conflict(json!({"a": 1}), json!({"a": 7}), Some(json!({"a": 1}))));
        assert_eq!(remote_only.resolved["a"], json!(7));
        assert_eq!(remote_only.conflicts, None);
    }

    #[test]
    fn three_way_numeric_double_edit_takes_max() {
        let resolution = merge(&conflict(json!({"a": 5}), json!({"a": 3}), Some(json!({"a": 1}))));
        assert_eq!(resolution.resolved["a"], json!(5));
        assert_eq!(resolution.conflicts, None);
    }

    #[test]
    fn three_way_converged_edit_is_not_a_conflict() {
        let resolution = merge(&conflict(
            json!({"status": "approved"}),
            json!({"status": "approved"}),
            Some(json!({"status": "pending"})),
        ));
        assert_eq!(resolution.resolved["status"], json!("approved"));
        assert_eq!(resolution.conflicts, None);
    }

    #[test]
    fn three_way_unresolvable_keeps_remote_and_reports() {
        let resolution = merge(&conflict(
            json!({"paid": true, "name": "x"}),
            json!({"paid": null, "name": "x"}),
            Some(json!({"paid": false, "name": "x"})),
        ));
        assert_eq!(resolution.resolved["paid"], Value::Null);
        assert_eq!(resolution.conflicts, Some(vec!["paid".to_string()]));
    }

    #[test]
    fn three_way_keeps_remote_only_fields() {
        let resolution = merge(&conflict(
            json!({"a": 1}),
            json!({"a": 1, "added": "remote"}),
            Some(json!({"a": 1})),
        ));
        assert_eq!(resolution.resolved, record(json!({"a": 1, "added": "remote"})));
    }

    #[test]
    fn three_way_honours_remote_deletion() {
        let resolution = merge(&conflict(
            json!({"a": 1, "nickname": "Jo"}),
            json!({"a": 1}),
            Some(json!({"a": 1, "nickname": "Jo"})),
        ));
        assert_eq!(resolution.resolved, record(json!({"a": 1})));
        assert_eq!(resolution.conflicts, None);
    }

    #[test]
    fn two_way_array_union() {
        let resolution = merge(&conflict(
            json!({"tags": ["a", "b"]}),
            json!({"tags": ["b", "c"]}),
            None,
        ));
        assert_eq!(resolution.resolved["tags"], json!(["a", "b", "c"]));
        assert_eq!(resolution.conflicts, None);
    }

    #[test]
    fn two_way_unresolvable_fields_are_listed_in_local_order() {
        let resolution = merge(&conflict(
            json!({"zeta": true, "name": "Choi", "alpha": false}),
            json!({"zeta": false, "name": "Choi", "alpha": true}),
            None,
        ));
        assert_eq!(
            resolution.conflicts,
            Some(vec!["zeta".to_string(), "alpha".to_string()])
        );
        assert_eq!(
            resolution.resolved,
            record(json!({"zeta": false, "name": "Choi", "alpha": true}))
        );
    }

    #[test]
    fn two_way_local_only_field_is_merged_or_reported() {
        let resolution = merge(&conflict(
            json!({"a": 1, "memo": "new"}),
            json!({"a": 1}),
            None,
        ));
        assert_eq!(resolution.conflicts, Some(vec!["memo".to_string()]));
        assert_eq!(resolution.resolved, record(json!({"a": 1})));
    }

    #[test]
    fn merge_does_not_touch_inputs() {
        let data = conflict(json!({"a": [1]}), json!({"a": [2]}), None);
        let before = data.clone();
        let _ = merge(&data);
        assert_eq!(data, before);
    }

    #[test]
    fn resolve_is_deterministic() {
        let data = conflict(
            json!({"score": 3, "tags": ["x"], "ok": true}),
            json!({"score": 8, "tags": ["y"], "ok": false}),
            Some(json!({"score": 1, "tags": [], "ok": null})),
        );
        assert_eq!(merge(&data), merge(&data));
    }

    #[test]
    fn detect_two_way_lists_every_difference() {
        let local = record(json!({"a": 1, "b": 2, "c": 3}));
        let remote = record(json!({"a": 1, "b": 5, "c": 4}));
        assert_eq!(detect_conflicts(&local, &remote, None), vec!["b", "c"]);
    }

    #[test]
    fn detect_three_way_only_reports_divergent_double_edits() {
        let base = record(json!({"a": 1, "b": 1, "c": 1, "d": 1}));
        let local = record(json!({"a": 2, "b": 1, "c": 3, "d": 9}));
        let remote = record(json!({"a": 1, "b": 2, "c": 3, "d": 8}));
        assert_eq!(detect_conflicts(&local, &remote, Some(&base)), vec!["d"]);
    }

    #[test]
    fn detect_agrees_with_two_way_merge_candidates() {
        let data = conflict(json!({"ok": true, "n": 1}), json!({"ok": false, "n": 1}), None);
        assert_eq!(
            detect_conflicts(&data.local, &data.remote, None),
            merge(&data).conflicts.unwrap()
        );
    }

    fn timed(local: &str, remote: &str) -> ConflictData {
        ConflictData::new(
            Record::new(),
            Record::new(),
            ConflictTimestamps::new(local, remote),
        )
    }

    #[test]
    fn recommend_manual_for_close_edits() {
        let data = timed("2024-03-01T10:00:00Z", "2024-03-01T10:04:59Z");
        assert_eq!(recommend_strategy(&data), ResolutionStrategy::Manual);
    }

    #[test]
    fn recommend_newer_side_otherwise() {
        assert_eq!(
            recommend_strategy(&timed("2024-03-01T10:05:00Z", "2024-03-01T10:00:00Z")),
            ResolutionStrategy::Local
        );
        assert_eq!(
            recommend_strategy(&timed("2024-03-01T09:00:00Z", "2024-03-01T10:00:00Z")),
            ResolutionStrategy::Remote
        );
    }

    #[test]
    fn recommend_remote_when_timestamps_are_malformed() {
        assert_eq!(
            recommend_strategy(&timed("not a date", "2024-03-01T10:00:00Z")),
            ResolutionStrategy::Remote
        );
    }
}
