// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for cluster composition
//!
//! Failures are split by the phase in which they occur so callers can tell
//! a broken cluster definition apart from a generator or provisioner that
//! failed mid-pipeline:
//!
//! - [`ConfigurationError`] - raised while the cluster is being set up
//! - [`ComposeError`] - raised by user expressions while `compose` runs
//! - [`VarsWriteError`] - raised while persisting variable files
//!
//! Every error is translated once, at the call site of the user-supplied
//! closure, and then propagated unchanged.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while a cluster is being configured
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The cluster configuration block failed
    #[error("Error initializing cluster '{cluster_name}': {message}")]
    ClusterInitialize {
        cluster_name: String,
        message: String,
    },

    /// A node group with the same name is already registered
    #[error("Nodes {group_name} already exists in cluster '{cluster_name}'")]
    DuplicateNodeGroup {
        cluster_name: String,
        group_name: String,
    },

    /// A `/pattern/` multimachine filter is not a valid regular expression
    #[error("Invalid multimachine filter pattern '{pattern}': {message}")]
    InvalidFilterPattern { pattern: String, message: String },
}

/// Errors raised by user expressions while composing a cluster
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// An attribute generator failed for a node
    #[error(
        "Error computing attribute '{attribute}' for node {node_index} of group '{group_name}': {message}"
    )]
    AttributeExpression {
        attribute: String,
        node_index: usize,
        group_name: String,
        message: String,
    },

    /// A context vars provisioner failed
    #[error("Error computing context vars for ansible group '{ansible_group}': {message}")]
    ContextVarExpression {
        ansible_group: String,
        message: String,
    },

    /// A group vars provisioner failed
    #[error("Error computing group vars for ansible group '{ansible_group}': {message}")]
    GroupVarExpression {
        ansible_group: String,
        message: String,
    },

    /// A host vars provisioner failed
    #[error(
        "Error computing host vars for host '{host}' in ansible group '{ansible_group}': {message}"
    )]
    HostVarExpression {
        host: String,
        ansible_group: String,
        message: String,
    },
}

/// Errors raised while writing `group_vars` / `host_vars` files
#[derive(Debug, Error)]
pub enum VarsWriteError {
    /// Filesystem operation failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Variables could not be rendered as YAML
    #[error("Serialization error for {}: {message}", .path.display())]
    Serialization { path: PathBuf, message: String },
}

impl VarsWriteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Any error produced by this crate
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Compose(#[from] ComposeError),

    #[error(transparent)]
    VarsWrite(#[from] VarsWriteError),
}

impl Error {
    /// True when the failure happened before `compose` started
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }
}

/// Result type for cluster composition operations
pub type Result<T> = std::result::Result<T, Error>;

/// Render a user closure's error including its context chain
pub(crate) fn expression_message(err: &anyhow::Error) -> String {
    format!("{err:#}")
}
