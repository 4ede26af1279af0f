// Copyright (c) 2025 - Cowboy AI, Inc.
//! Configuration
//!
//! - [`ClusterDefaults`] - values a new [`Cluster`](crate::Cluster) starts with
//! - [`ComposeConfig`] - where provisioning files are written, loadable from
//!   the environment

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding [`ComposeConfig::playbook_path`]
pub const PLAYBOOK_PATH_ENV: &str = "CLUSTER_COMPOSE_PLAYBOOK_PATH";

/// Default base box for node groups
pub const DEFAULT_BOX: &str = "ubuntu/trusty64";

/// Default network domain
pub const DEFAULT_DOMAIN: &str = "vagrant";

/// Directory under the current directory holding the playbook
pub const DEFAULT_PLAYBOOK_DIR: &str = "provisioning";

/// Initial settings of a cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterDefaults {
    /// Base box used by node groups unless overridden
    #[serde(rename = "box", default = "default_box")]
    pub base_box: String,

    /// Network domain used for node fqdns; empty means bare hostnames
    #[serde(default = "default_domain")]
    pub domain: String,
}

fn default_box() -> String {
    DEFAULT_BOX.to_string()
}

fn default_domain() -> String {
    DEFAULT_DOMAIN.to_string()
}

impl Default for ClusterDefaults {
    fn default() -> Self {
        Self {
            base_box: default_box(),
            domain: default_domain(),
        }
    }
}

/// Settings for persisting variable files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComposeConfig {
    /// Root of the ansible playbook; `group_vars/` and `host_vars/` live here
    pub playbook_path: PathBuf,
}

impl ComposeConfig {
    pub fn new(playbook_path: impl Into<PathBuf>) -> Self {
        Self {
            playbook_path: playbook_path.into(),
        }
    }

    /// Load from the environment, falling back to `<cwd>/provisioning`
    pub fn from_env() -> std::io::Result<Self> {
        match std::env::var_os(PLAYBOOK_PATH_ENV) {
            Some(path) if !path.is_empty() => Ok(Self::new(path)),
            _ => Ok(Self::new(std::env::current_dir()?.join(DEFAULT_PLAYBOOK_DIR))),
        }
    }

    pub fn group_vars_path(&self) -> PathBuf {
        self.playbook_path.join("group_vars")
    }

    pub fn host_vars_path(&self) -> PathBuf {
        self.playbook_path.join("host_vars")
    }

    pub fn playbook_path(&self) -> &Path {
        &self.playbook_path
    }
}
