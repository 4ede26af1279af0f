// Copyright (c) 2025 - Cowboy AI, Inc.
//! Variable Provisioning Pipeline
//!
//! Three ordered stages run over the aggregated ansible groups:
//!
//! ```text
//! context vars ──> context ──┬──> group vars (per group)
//!                            └──> host vars  (per node)
//! ```
//!
//! Every stage merges provisioner outputs with [`merge_vars`], so later
//! provisioners (and later groups) overwrite earlier keys. Overwrites are
//! logged, never rejected.
//!
//! Provisioner failures are translated here, once, into the matching
//! [`ComposeError`] variant.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::groups::AnsibleGroups;
use super::provisioners::{GroupProvisioner, HostProvisioner, ProvisionerRegistry};
use crate::domain::{merge_vars, Node, VarMap};
use crate::errors::{expression_message, ComposeError};

/// Build the shared context from the context vars provisioners
pub fn resolve_context(
    groups: &AnsibleGroups<'_>,
    registry: &ProvisionerRegistry<GroupProvisioner>,
) -> Result<VarMap, ComposeError> {
    let mut context = VarMap::new();

    for (ansible_group, nodes) in groups.iter() {
        for provisioner in registry.get(ansible_group) {
            let vars = provisioner(&context, nodes).map_err(|e| {
                ComposeError::ContextVarExpression {
                    ansible_group: ansible_group.to_string(),
                    message: expression_message(&e),
                }
            })?;
            report_overwrites("context", ansible_group, merge_vars(&mut context, vars));
        }
    }

    debug!(keys = context.len(), "Context vars resolved");
    Ok(context)
}

/// Compute group vars; groups whose vars come out empty are omitted
pub fn resolve_group_vars(
    groups: &AnsibleGroups<'_>,
    registry: &ProvisionerRegistry<GroupProvisioner>,
    context: &VarMap,
) -> Result<BTreeMap<String, VarMap>, ComposeError> {
    let mut group_vars = BTreeMap::new();

    for (ansible_group, nodes) in groups.iter() {
        let mut vars = VarMap::new();
        for provisioner in registry.get(ansible_group) {
            let computed = provisioner(context, nodes).map_err(|e| {
                ComposeError::GroupVarExpression {
                    ansible_group: ansible_group.to_string(),
                    message: expression_message(&e),
                }
            })?;
            report_overwrites("group", ansible_group, merge_vars(&mut vars, computed));
        }

        if vars.is_empty() {
            continue;
        }
        debug!(group = %ansible_group, keys = vars.len(), "Group vars resolved");
        group_vars.insert(ansible_group.to_string(), vars);
    }

    Ok(group_vars)
}

/// Compute host vars keyed by hostname; hosts with no vars are omitted
///
/// For each node, the host vars provisioners of every group it belongs to
/// run in the node's own group order.
pub fn resolve_host_vars(
    nodes: &[Node],
    registry: &ProvisionerRegistry<HostProvisioner>,
    context: &VarMap,
) -> Result<BTreeMap<String, VarMap>, ComposeError> {
    let mut host_vars = BTreeMap::new();

    for node in nodes {
        let mut vars = VarMap::new();
        for ansible_group in &node.ansible_groups {
            for provisioner in registry.get(ansible_group) {
                let computed = provisioner(context, node).map_err(|e| {
                    ComposeError::HostVarExpression {
                        host: node.hostname.clone(),
                        ansible_group: ansible_group.clone(),
                        message: expression_message(&e),
                    }
                })?;
                report_overwrites("host", &node.hostname, merge_vars(&mut vars, computed));
            }
        }

        if vars.is_empty() {
            continue;
        }
        debug!(host = %node.hostname, keys = vars.len(), "Host vars resolved");
        host_vars.insert(node.hostname.clone(), vars);
    }

    Ok(host_vars)
}

fn report_overwrites(stage: &str, scope: &str, overwritten: Vec<String>) {
    if !overwritten.is_empty() {
        warn!(stage, scope, keys = ?overwritten, "Provisioner overwrote existing vars");
    }
}
