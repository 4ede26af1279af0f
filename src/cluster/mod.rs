// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cluster - the root aggregate of the composition engine
//!
//! A cluster owns an ordered set of [`NodeGroup`]s plus the three variable
//! provisioner registries, and turns them into a [`Composition`].
//!
//! # Compose pipeline
//!
//! ```text
//! NodeGroups ──expand──> Nodes ──aggregate──> AnsibleGroups
//!                                                  │
//!                        context vars <────────────┤
//!                        group vars   <────────────┤
//!                        host vars    <────────────┤
//!                        inventory    <── filter ──┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use cluster_compose::{Cluster, MultimachineFilter};
//! use cluster_compose::domain::vars_from;
//! use serde_json::json;
//!
//! let mut cluster = Cluster::new("demo");
//! cluster.set_domain("example.com");
//! cluster
//!     .nodes(2, "web", |group| {
//!         group.ansible_groups = vec!["web".to_string()].into();
//!     })
//!     .unwrap();
//! cluster.add_group_vars("web", |_context, nodes| {
//!     vars_from(json!({ "replicas": nodes.len() }))
//! });
//!
//! let composition = cluster.compose(&MultimachineFilter::All).unwrap();
//! assert_eq!(composition.nodes[1].fqdn, "demo-web2.example.com");
//! assert_eq!(composition.group_vars["web"]["replicas"], 2);
//! ```

pub mod groups;
pub mod pipeline;
pub mod provisioners;

pub use groups::AnsibleGroups;
pub use provisioners::{GroupProvisioner, HostProvisioner, ProvisionerRegistry};

use tracing::{debug, info};

use crate::composition::Composition;
use crate::config::ClusterDefaults;
use crate::domain::{Node, NodeGroup, VarMap};
use crate::errors::{expression_message, ComposeError, ConfigurationError};
use crate::filter::MultimachineFilter;
use crate::inventory::Inventory;

/// A set of node groups and the provisioners that compute their variables
#[derive(Debug)]
pub struct Cluster {
    name: String,
    base_box: String,
    domain: String,
    node_groups: Vec<NodeGroup>,
    context_vars: ProvisionerRegistry<GroupProvisioner>,
    group_vars: ProvisionerRegistry<GroupProvisioner>,
    host_vars: ProvisionerRegistry<HostProvisioner>,
}

impl Cluster {
    /// Create a cluster using [`ClusterDefaults`]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_defaults(name, ClusterDefaults::default())
    }

    pub fn with_defaults(name: impl Into<String>, defaults: ClusterDefaults) -> Self {
        Self {
            name: name.into(),
            base_box: defaults.base_box,
            domain: defaults.domain,
            node_groups: Vec::new(),
            context_vars: ProvisionerRegistry::new(),
            group_vars: ProvisionerRegistry::new(),
            host_vars: ProvisionerRegistry::new(),
        }
    }

    /// Create a cluster and run a configuration block on it
    ///
    /// Any failure of the block, including a duplicate node group, is
    /// reported as [`ConfigurationError::ClusterInitialize`].
    pub fn configure<F>(name: impl Into<String>, configure: F) -> Result<Self, ConfigurationError>
    where
        F: FnOnce(&mut Cluster) -> anyhow::Result<()>,
    {
        let mut cluster = Self::new(name);
        configure(&mut cluster).map_err(|e| ConfigurationError::ClusterInitialize {
            cluster_name: cluster.name.clone(),
            message: expression_message(&e),
        })?;
        Ok(cluster)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Default base box for node groups registered afterwards
    pub fn base_box(&self) -> &str {
        &self.base_box
    }

    pub fn set_box(&mut self, base_box: impl Into<String>) {
        self.base_box = base_box.into();
    }

    /// Network domain used to build node fqdns
    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn set_domain(&mut self, domain: impl Into<String>) {
        self.domain = domain.into();
    }

    /// Register a group of `instances` nodes
    ///
    /// The group gets the default generators, then `configure` may override
    /// them. Registering an existing name fails and leaves the existing
    /// group untouched.
    pub fn nodes<F>(
        &mut self,
        instances: usize,
        name: impl Into<String>,
        configure: F,
    ) -> Result<&NodeGroup, ConfigurationError>
    where
        F: FnOnce(&mut NodeGroup),
    {
        let name = name.into();
        if self.node_group(&name).is_some() {
            return Err(ConfigurationError::DuplicateNodeGroup {
                cluster_name: self.name.clone(),
                group_name: name,
            });
        }

        let mut group = NodeGroup::new(self.node_groups.len(), instances, name, self.base_box.clone());
        configure(&mut group);
        debug!(
            cluster = %self.name,
            group = %group.name(),
            uid = group.uid(),
            instances,
            "Registered node group"
        );

        self.node_groups.push(group);
        Ok(&self.node_groups[self.node_groups.len() - 1])
    }

    pub fn node_group(&self, name: &str) -> Option<&NodeGroup> {
        self.node_groups.iter().find(|group| group.name() == name)
    }

    /// Node groups in registration order
    pub fn node_groups(&self) -> &[NodeGroup] {
        &self.node_groups
    }

    /// Add a context vars provisioner for `ansible_group`
    pub fn add_context_vars<F>(&mut self, ansible_group: impl Into<String>, provisioner: F)
    where
        F: Fn(&VarMap, &[&Node]) -> anyhow::Result<VarMap> + 'static,
    {
        self.context_vars.register(ansible_group, Box::new(provisioner));
    }

    /// Add a group vars provisioner for `ansible_group`
    pub fn add_group_vars<F>(&mut self, ansible_group: impl Into<String>, provisioner: F)
    where
        F: Fn(&VarMap, &[&Node]) -> anyhow::Result<VarMap> + 'static,
    {
        self.group_vars.register(ansible_group, Box::new(provisioner));
    }

    /// Add a host vars provisioner for members of `ansible_group`
    pub fn add_host_vars<F>(&mut self, ansible_group: impl Into<String>, provisioner: F)
    where
        F: Fn(&VarMap, &Node) -> anyhow::Result<VarMap> + 'static,
    {
        self.host_vars.register(ansible_group, Box::new(provisioner));
    }

    pub fn context_vars(&self) -> &ProvisionerRegistry<GroupProvisioner> {
        &self.context_vars
    }

    pub fn group_vars(&self) -> &ProvisionerRegistry<GroupProvisioner> {
        &self.group_vars
    }

    pub fn host_vars(&self) -> &ProvisionerRegistry<HostProvisioner> {
        &self.host_vars
    }

    /// Expand node groups and resolve variables
    ///
    /// `filter` only narrows the inventory; every node is expanded and every
    /// variable map is computed regardless of it.
    pub fn compose(&self, filter: &MultimachineFilter) -> Result<Composition, ComposeError> {
        info!(cluster = %self.name, groups = self.node_groups.len(), "Composing cluster");

        let nodes = self.materialize_nodes()?;
        let groups = AnsibleGroups::aggregate(&nodes);
        debug!(nodes = nodes.len(), ansible_groups = groups.len(), "Nodes aggregated");

        let context = pipeline::resolve_context(&groups, &self.context_vars)?;
        let group_vars = pipeline::resolve_group_vars(&groups, &self.group_vars, &context)?;
        let host_vars = pipeline::resolve_host_vars(&nodes, &self.host_vars, &context)?;
        let inventory = Inventory::project(&groups, filter);

        info!(
            cluster = %self.name,
            nodes = nodes.len(),
            group_vars = group_vars.len(),
            host_vars = host_vars.len(),
            "Cluster composed"
        );

        Ok(Composition {
            cluster_name: self.name.clone(),
            multimachine_filter: filter.to_string(),
            nodes,
            inventory,
            context,
            group_vars,
            host_vars,
        })
    }

    fn materialize_nodes(&self) -> Result<Vec<Node>, ComposeError> {
        let mut nodes = Vec::new();
        for group in &self.node_groups {
            let expanded = group.compose(&self.name, &self.domain, nodes.len())?;
            nodes.extend(expanded);
        }
        Ok(nodes)
    }
}
