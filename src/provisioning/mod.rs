// Copyright (c) 2025 - Cowboy AI, Inc.
//! Provisioning variable files
//!
//! Persists the group vars and host vars of a [`Composition`] under the
//! playbook directory, as `group_vars/<group>.yml` and
//! `host_vars/<hostname>.yml`. Planning is pure; executors perform the I/O.

pub mod executor;
pub mod plan;

pub use executor::{FileSystemExecutor, LoggingExecutor, VarFileExecutor};
pub use plan::{plan_var_files, vars_file_name, VarFileEffect, VarFilePlan};

use crate::composition::Composition;
use crate::config::ComposeConfig;
use crate::errors::VarsWriteError;

/// Plan and write the variable files of `composition`
pub fn write_var_files(composition: &Composition, config: &ComposeConfig) -> Result<VarFilePlan, VarsWriteError> {
    let plan = plan_var_files(composition, config);
    FileSystemExecutor::new().execute(&plan)?;
    Ok(plan)
}
