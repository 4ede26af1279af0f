// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure planning of variable files
//!
//! Turns a [`Composition`] into the list of filesystem effects needed to
//! materialize it, without touching the filesystem:
//!
//! ```text
//! Composition ──plan_var_files()──> [CleanDirectory, WriteVars, ...]
//!                                            │
//!                                            ▼
//!                                  VarFileExecutor::execute()
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::composition::Composition;
use crate::config::ComposeConfig;
use crate::domain::VarMap;

/// Extension of generated variable files
pub const VARS_FILE_EXTENSION: &str = "yml";

/// A filesystem effect produced by planning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VarFileEffect {
    /// Create the directory if missing and remove stale `*.yml` files
    CleanDirectory { path: PathBuf },

    /// Write `vars` as a YAML document
    WriteVars { path: PathBuf, vars: VarMap },
}

impl VarFileEffect {
    pub fn path(&self) -> &PathBuf {
        match self {
            VarFileEffect::CleanDirectory { path } | VarFileEffect::WriteVars { path, .. } => path,
        }
    }
}

/// Ordered effects for one composition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VarFilePlan {
    pub effects: Vec<VarFileEffect>,
}

impl VarFilePlan {
    /// Paths of the files that will be written
    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.effects.iter().filter_map(|effect| match effect {
            VarFileEffect::WriteVars { path, .. } => Some(path),
            VarFileEffect::CleanDirectory { .. } => None,
        })
    }
}

/// Plan the `group_vars/` and `host_vars/` files of a composition
///
/// Each directory is cleaned before its files are written. Only groups and
/// hosts with variables get a file.
pub fn plan_var_files(composition: &Composition, config: &ComposeConfig) -> VarFilePlan {
    let mut effects = Vec::new();

    let group_vars_path = config.group_vars_path();
    effects.push(VarFileEffect::CleanDirectory {
        path: group_vars_path.clone(),
    });
    for (group, vars) in &composition.group_vars {
        effects.push(VarFileEffect::WriteVars {
            path: group_vars_path.join(vars_file_name(group)),
            vars: vars.clone(),
        });
    }

    let host_vars_path = config.host_vars_path();
    effects.push(VarFileEffect::CleanDirectory {
        path: host_vars_path.clone(),
    });
    for (host, vars) in &composition.host_vars {
        effects.push(VarFileEffect::WriteVars {
            path: host_vars_path.join(vars_file_name(host)),
            vars: vars.clone(),
        });
    }

    VarFilePlan { effects }
}

/// File name for a group or host
///
/// `:` and path separators become `_`, as do leading dots, so the result is
/// always a single visible path component.
pub fn vars_file_name(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| match c {
            ':' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    let visible = stem.trim_start_matches('.');
    let hidden = stem.len() - visible.len();
    format!("{}{visible}.{VARS_FILE_EXTENSION}", "_".repeat(hidden))
}
