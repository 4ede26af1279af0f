// Copyright (c) 2025 - Cowboy AI, Inc.
//! Node - one expanded machine of the cluster
//!
//! Nodes are produced by [`NodeGroup::compose`](super::NodeGroup::compose)
//! and are never modified afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::VarMap;

/// A single machine descriptor
///
/// # Invariants
/// - `index` is the global position across the cluster, with no gaps
/// - `group_index` is the position inside the owning node group
/// - `fqdn` is `hostname` when the cluster domain is empty,
///   `hostname.domain` otherwise
/// - `ansible_groups` holds no duplicates and keeps declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Base image the machine is created from
    #[serde(rename = "box")]
    pub base_box: String,

    /// Machine name, prefixed with the cluster name
    pub boxname: String,

    /// Hostname, prefixed with the cluster name
    pub hostname: String,

    /// Fully qualified hostname
    pub fqdn: String,

    /// Alternative host names
    pub aliases: Vec<String>,

    pub ip: String,

    pub cpus: u32,

    /// Memory in MB
    pub memory: u32,

    /// Ansible groups the node belongs to
    pub ansible_groups: Vec<String>,

    /// Custom attributes
    pub attributes: VarMap,

    /// Position across the whole cluster
    pub index: usize,

    /// Position within the node group
    pub group_index: usize,
}

impl Node {
    pub fn belongs_to(&self, ansible_group: &str) -> bool {
        self.ansible_groups.iter().any(|g| g == ansible_group)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} accessible as {} {} {} => [{}, {} cpus, {} memory]",
            self.boxname,
            self.fqdn,
            self.aliases.join(","),
            self.ip,
            self.base_box,
            self.cpus,
            self.memory
        )
    }
}

/// Compute a node's fully qualified name
pub fn fqdn(hostname: &str, domain: &str) -> String {
    if domain.is_empty() {
        hostname.to_string()
    } else {
        format!("{hostname}.{domain}")
    }
}

/// Remove repeated group names, keeping the first occurrence
pub(crate) fn dedup_groups(groups: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(groups.len());
    for group in groups {
        if !unique.contains(&group) {
            unique.push(group);
        }
    }
    unique
}
