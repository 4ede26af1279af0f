// Copyright (c) 2025 - Cowboy AI, Inc.
//! Variable file executors
//!
//! Executors interpret a [`VarFilePlan`]. Effects run in order and the
//! first failure stops the run; files already written stay on disk.

use std::fs;
use std::path::Path;
use tracing::{debug, info};

use super::plan::{VarFileEffect, VarFilePlan, VARS_FILE_EXTENSION};
use crate::domain::VarMap;
use crate::errors::VarsWriteError;

/// Interprets variable file effects
pub trait VarFileExecutor {
    /// Execute every effect of the plan, in order
    fn execute(&mut self, plan: &VarFilePlan) -> Result<(), VarsWriteError>;
}

/// Writes variable files to the filesystem
#[derive(Debug, Default)]
pub struct FileSystemExecutor {
    written: usize,
    removed: usize,
}

impl FileSystemExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Stale files removed so far
    pub fn removed(&self) -> usize {
        self.removed
    }

    fn clean_directory(&mut self, path: &Path) -> Result<(), VarsWriteError> {
        fs::create_dir_all(path).map_err(|e| VarsWriteError::io(path, e))?;

        for entry in fs::read_dir(path).map_err(|e| VarsWriteError::io(path, e))? {
            let entry = entry.map_err(|e| VarsWriteError::io(path, e))?;
            let file = entry.path();
            let is_vars_file = file.is_file()
                && file.extension().and_then(|ext| ext.to_str()) == Some(VARS_FILE_EXTENSION);
            if is_vars_file {
                fs::remove_file(&file).map_err(|e| VarsWriteError::io(&file, e))?;
                debug!(path = %file.display(), "Removed stale vars file");
                self.removed += 1;
            }
        }
        Ok(())
    }

    fn write_vars(&mut self, path: &Path, vars: &VarMap) -> Result<(), VarsWriteError> {
        let document = serde_yaml::to_string(vars).map_err(|e| VarsWriteError::Serialization {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        fs::write(path, document).map_err(|e| VarsWriteError::io(path, e))?;
        debug!(path = %path.display(), keys = vars.len(), "Wrote vars file");
        self.written += 1;
        Ok(())
    }
}

impl VarFileExecutor for FileSystemExecutor {
    fn execute(&mut self, plan: &VarFilePlan) -> Result<(), VarsWriteError> {
        for effect in &plan.effects {
            match effect {
                VarFileEffect::CleanDirectory { path } => self.clean_directory(path)?,
                VarFileEffect::WriteVars { path, vars } => self.write_vars(path, vars)?,
            }
        }
        info!(written = self.written, removed = self.removed, "Vars files updated");
        Ok(())
    }
}

/// Records effects instead of performing them
///
/// Useful for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct LoggingExecutor {
    pub logged_effects: Vec<VarFileEffect>,
}

impl LoggingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn effects(&self) -> &[VarFileEffect] {
        &self.logged_effects
    }
}

impl VarFileExecutor for LoggingExecutor {
    fn execute(&mut self, plan: &VarFilePlan) -> Result<(), VarsWriteError> {
        for effect in &plan.effects {
            info!(path = %effect.path().display(), "Dry run: {}", effect_kind(effect));
            self.logged_effects.push(effect.clone());
        }
        Ok(())
    }
}

fn effect_kind(effect: &VarFileEffect) -> &'static str {
    match effect {
        VarFileEffect::CleanDirectory { .. } => "clean",
        VarFileEffect::WriteVars { .. } => "write",
    }
}
