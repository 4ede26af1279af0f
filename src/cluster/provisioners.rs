// Copyright (c) 2025 - Cowboy AI, Inc.
//! Variable provisioner registries
//!
//! A provisioner computes a [`VarMap`] for an ansible group. Three kinds
//! exist, one per pipeline stage:
//!
//! - context vars: `(context, group_nodes)`, merged into the shared context
//! - group vars: `(context, group_nodes)`, merged into the group's vars
//! - host vars: `(context, node)`, merged into each member's vars
//!
//! Each registry keeps, per group, the provisioners in registration order.

use std::fmt;

use crate::domain::{Node, VarMap};

/// Provisioner scoped to all nodes of an ansible group
pub type GroupProvisioner = Box<dyn Fn(&VarMap, &[&Node]) -> anyhow::Result<VarMap>>;

/// Provisioner scoped to a single node
pub type HostProvisioner = Box<dyn Fn(&VarMap, &Node) -> anyhow::Result<VarMap>>;

/// Ordered provisioners keyed by ansible group
pub struct ProvisionerRegistry<P> {
    entries: Vec<(String, Vec<P>)>,
}

impl<P> ProvisionerRegistry<P> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append a provisioner for `ansible_group`
    pub fn register(&mut self, ansible_group: impl Into<String>, provisioner: P) {
        let ansible_group = ansible_group.into();
        match self.entries.iter_mut().find(|(group, _)| *group == ansible_group) {
            Some((_, provisioners)) => provisioners.push(provisioner),
            None => self.entries.push((ansible_group, vec![provisioner])),
        }
    }

    /// Provisioners registered for `ansible_group`, in registration order
    pub fn get(&self, ansible_group: &str) -> &[P] {
        self.entries
            .iter()
            .find(|(group, _)| group == ansible_group)
            .map(|(_, provisioners)| provisioners.as_slice())
            .unwrap_or(&[])
    }

    pub fn contains(&self, ansible_group: &str) -> bool {
        !self.get(ansible_group).is_empty()
    }

    /// Groups with at least one provisioner
    pub fn groups(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(group, _)| group.as_str())
    }
}

impl<P> Default for ProvisionerRegistry<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for ProvisionerRegistry<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(group, p)| (group, p.len())))
            .finish()
    }
}
