// Copyright (c) 2025 - Cowboy AI, Inc.
//! Node Group - a template for homogeneous nodes
//!
//! A node group describes `instances` nodes whose attributes are computed by
//! [`AttributeGenerator`]s. Groups are registered on a
//! [`Cluster`](crate::Cluster), which installs the default generators, and
//! are expanded into [`Node`]s when the cluster is composed.
//!
//! # Default generators
//!
//! | attribute        | default                                  |
//! |------------------|------------------------------------------|
//! | `box`            | the cluster box                          |
//! | `boxname`        | `{group_name}{node_index + 1}`           |
//! | `hostname`       | `{group_name}{node_index + 1}`           |
//! | `aliases`        | `[]`                                     |
//! | `ip`             | `172.31.{group_index}.{100 + node_index + 1}` |
//! | `cpus`           | `1`                                      |
//! | `memory`         | `256`                                    |
//! | `ansible_groups` | `[]`                                     |
//! | `attributes`     | `{}`                                     |

use tracing::debug;

use super::generator::{Attribute, AttributeGenerator};
use super::node::{dedup_groups, fqdn, Node};
use super::VarMap;
use crate::errors::ComposeError;

/// Default number of CPUs per node
pub const DEFAULT_CPUS: u32 = 1;

/// Default memory per node, in MB
pub const DEFAULT_MEMORY: u32 = 256;

/// Template describing `instances` homogeneous nodes
///
/// Generator fields are public so the configuration closure passed to
/// [`Cluster::nodes`](crate::Cluster::nodes) can override them.
#[derive(Debug)]
pub struct NodeGroup {
    uid: usize,
    name: String,
    instances: usize,

    pub base_box: AttributeGenerator<String>,
    pub boxname: AttributeGenerator<String>,
    pub hostname: AttributeGenerator<String>,
    pub aliases: AttributeGenerator<Vec<String>>,
    pub ip: AttributeGenerator<String>,
    pub cpus: AttributeGenerator<u32>,
    pub memory: AttributeGenerator<u32>,
    pub ansible_groups: AttributeGenerator<Vec<String>>,
    pub attributes: AttributeGenerator<VarMap>,
}

impl NodeGroup {
    /// Create a group with the default generators
    pub fn new(uid: usize, instances: usize, name: impl Into<String>, base_box: impl Into<String>) -> Self {
        Self {
            uid,
            name: name.into(),
            instances,
            base_box: AttributeGenerator::Constant(base_box.into()),
            boxname: default_name_generator(),
            hostname: default_name_generator(),
            aliases: AttributeGenerator::Constant(Vec::new()),
            ip: default_ip_generator(),
            cpus: AttributeGenerator::Constant(DEFAULT_CPUS),
            memory: AttributeGenerator::Constant(DEFAULT_MEMORY),
            ansible_groups: AttributeGenerator::Constant(Vec::new()),
            attributes: AttributeGenerator::Constant(VarMap::new()),
        }
    }

    /// Registration order within the cluster
    pub fn uid(&self) -> usize {
        self.uid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn instances(&self) -> usize {
        self.instances
    }

    /// Expand the group into its nodes
    ///
    /// `boxname` and `hostname` are prefixed with `{cluster_name}-`, and each
    /// node's global index is `cluster_offset + node_index`. The first failing
    /// generator aborts the expansion; no partial group is returned.
    pub fn compose(
        &self,
        cluster_name: &str,
        cluster_domain: &str,
        cluster_offset: usize,
    ) -> Result<Vec<Node>, ComposeError> {
        debug!(
            group = %self.name,
            instances = self.instances,
            offset = cluster_offset,
            "Expanding node group"
        );

        (0..self.instances)
            .map(|node_index| self.compose_node(cluster_name, cluster_domain, cluster_offset, node_index))
            .collect()
    }

    fn compose_node(
        &self,
        cluster_name: &str,
        cluster_domain: &str,
        cluster_offset: usize,
        node_index: usize,
    ) -> Result<Node, ComposeError> {
        let resolve_string = |attribute, generator: &AttributeGenerator<String>| {
            generator.resolve(attribute, self.uid, &self.name, node_index)
        };

        let base_box = resolve_string(Attribute::Box, &self.base_box)?;
        let boxname = format!("{cluster_name}-{}", resolve_string(Attribute::Boxname, &self.boxname)?);
        let hostname = format!("{cluster_name}-{}", resolve_string(Attribute::Hostname, &self.hostname)?);
        let aliases = self.aliases.resolve(Attribute::Aliases, self.uid, &self.name, node_index)?;
        let ip = resolve_string(Attribute::Ip, &self.ip)?;
        let cpus = self.cpus.resolve(Attribute::Cpus, self.uid, &self.name, node_index)?;
        let memory = self.memory.resolve(Attribute::Memory, self.uid, &self.name, node_index)?;
        let ansible_groups = self
            .ansible_groups
            .resolve(Attribute::AnsibleGroups, self.uid, &self.name, node_index)?;
        let attributes = self
            .attributes
            .resolve(Attribute::Attributes, self.uid, &self.name, node_index)?;

        Ok(Node {
            base_box,
            fqdn: fqdn(&hostname, cluster_domain),
            boxname,
            hostname,
            aliases,
            ip,
            cpus,
            memory,
            ansible_groups: dedup_groups(ansible_groups),
            attributes,
            index: cluster_offset + node_index,
            group_index: node_index,
        })
    }
}

/// `{group_name}{node_index + 1}`
pub fn default_name_generator() -> AttributeGenerator<String> {
    AttributeGenerator::computed(|_group_index, group_name: &str, node_index| {
        Ok(format!("{group_name}{}", node_index + 1))
    })
}

/// `172.31.{group_index}.{100 + node_index + 1}`
pub fn default_ip_generator() -> AttributeGenerator<String> {
    AttributeGenerator::computed(|group_index, _group_name: &str, node_index| {
        Ok(format!("172.31.{group_index}.{}", 100 + node_index + 1))
    })
}
