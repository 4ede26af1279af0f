// Copyright (c) 2025 - Cowboy AI, Inc.
//! Variable Maps
//!
//! Free-form node attributes and provisioner outputs are schema-free, so they
//! are carried as JSON values keyed by string. `serde_json::Map` keeps keys
//! sorted, which makes every rendered variable file deterministic.

use serde_json::{Map, Value};

/// Mapping from variable name to a dynamically-typed value
pub type VarMap = Map<String, Value>;

/// Merge `vars` into `target`, later keys overwriting earlier ones
///
/// Returns the keys whose existing value was replaced by a different one.
/// The merge itself never fails; the returned keys let a caller report or
/// reject conflicts without changing the merge.
pub fn merge_vars(target: &mut VarMap, vars: VarMap) -> Vec<String> {
    let mut overwritten = Vec::new();
    for (key, value) in vars {
        match target.get(&key) {
            Some(existing) if *existing != value => overwritten.push(key.clone()),
            _ => {}
        }
        target.insert(key, value);
    }
    overwritten
}

/// Convert a JSON object into a [`VarMap`]
///
/// Handy inside provisioners: `vars_from(json!({ "port": 8080 }))`.
/// Fails when `value` is not an object.
pub fn vars_from(value: Value) -> anyhow::Result<VarMap> {
    match value {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("expected a mapping of variables, got {other}"),
    }
}
