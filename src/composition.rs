// Copyright (c) 2025 - Cowboy AI, Inc.
//! Composition result
//!
//! Everything `compose` produces: the expanded nodes and the filtered
//! inventory, plus the context, group vars and host vars that the
//! persistence layer turns into files.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::{Node, VarMap};
use crate::inventory::Inventory;

/// Output of [`Cluster::compose`](crate::Cluster::compose)
#[derive(Debug, Clone, Serialize)]
pub struct Composition {
    pub cluster_name: String,

    /// Filter token applied to the inventory, empty when unfiltered
    pub multimachine_filter: String,

    /// Nodes in materialization order
    pub nodes: Vec<Node>,

    pub inventory: Inventory,

    /// Merged output of the context vars provisioners
    pub context: VarMap,

    /// Non-empty group vars, keyed by ansible group
    pub group_vars: BTreeMap<String, VarMap>,

    /// Non-empty host vars, keyed by hostname
    pub host_vars: BTreeMap<String, VarMap>,
}

impl Composition {
    /// Split into the nodes and the inventory
    pub fn into_parts(self) -> (Vec<Node>, Inventory) {
        (self.nodes, self.inventory)
    }

    pub fn node(&self, boxname: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.boxname == boxname)
    }

    /// Human readable listing of the composed cluster
    ///
    /// The short form prints one line per node; the verbose form lists every
    /// node attribute followed by the inventory.
    pub fn report(&self, verbose: bool) -> String {
        let mut lines = vec![format!(
            "==> cluster {} with {} nodes",
            self.cluster_name,
            self.nodes.len()
        )];

        if !verbose {
            lines.extend(self.nodes.iter().map(|node| format!("        {node}")));
            return join_lines(lines);
        }

        lines.push("- nodes".to_string());
        for node in &self.nodes {
            lines.push(String::new());
            lines.push(format!("   - {}", node.boxname));
            let rows: [(&str, String); 12] = [
                ("box", node.base_box.clone()),
                ("boxname", node.boxname.clone()),
                ("hostname", node.hostname.clone()),
                ("fqdn", node.fqdn.clone()),
                ("aliases", node.aliases.join(",")),
                ("ip", node.ip.clone()),
                ("cpus", node.cpus.to_string()),
                ("memory", node.memory.to_string()),
                ("ansible_groups", format!("{:?}", node.ansible_groups)),
                ("attributes", serde_json::Value::Object(node.attributes.clone()).to_string()),
                ("index", node.index.to_string()),
                ("group_index", node.group_index.to_string()),
            ];
            lines.extend(rows.iter().map(|(label, value)| format!("     {label:<14} {value}")));
        }

        lines.push(String::new());
        if self.multimachine_filter.is_empty() {
            lines.push("- ansible_groups".to_string());
        } else {
            lines.push(format!(
                "- ansible_groups (NB. filtered by {})",
                self.multimachine_filter
            ));
        }
        for (group, hosts) in self.inventory.iter() {
            lines.push(String::new());
            lines.push(format!("  - {group}"));
            lines.extend(hosts.iter().map(|host| format!("    - {host}")));
        }

        join_lines(lines)
    }
}

/// Newline-terminated text from report lines
fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
