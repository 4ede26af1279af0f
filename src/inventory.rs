// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Projection
//!
//! Maps each ansible group to the hostnames of its members, keeping only
//! machines that pass the [`MultimachineFilter`]. A meta entry
//! [`ALL_GROUPS_KEY`] lists every group so the provisioning tool can declare
//! the group hierarchy; it is never filtered. An ansible group that uses the
//! meta key as its own name is shadowed by the meta entry.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::cluster::AnsibleGroups;
use crate::filter::MultimachineFilter;

/// Key of the meta group listing every ansible group
pub const ALL_GROUPS_KEY: &str = "all_groups:children";

/// Ansible inventory: group name to hostnames
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    groups: Vec<(String, Vec<String>)>,
    children: Vec<String>,
}

impl Inventory {
    /// Project aggregated groups through the filter
    pub fn project(groups: &AnsibleGroups<'_>, filter: &MultimachineFilter) -> Self {
        let projected = groups
            .iter()
            .filter(|(name, _)| *name != ALL_GROUPS_KEY)
            .map(|(name, members)| {
                let hosts: Vec<String> = members
                    .iter()
                    .filter(|node| filter.matches(&node.boxname))
                    .map(|node| node.hostname.clone())
                    .collect();
                (name.to_string(), hosts)
            })
            .collect();

        Self {
            groups: projected,
            children: groups.names().map(str::to_string).collect(),
        }
    }

    /// Hosts of a group; [`ALL_GROUPS_KEY`] returns the group names
    pub fn get(&self, group: &str) -> Option<&[String]> {
        if group == ALL_GROUPS_KEY {
            return Some(&self.children);
        }
        self.groups
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, hosts)| hosts.as_slice())
    }

    /// Names of every ansible group, unfiltered
    pub fn groups(&self) -> &[String] {
        &self.children
    }

    /// Group entries followed by the [`ALL_GROUPS_KEY`] meta entry
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.groups
            .iter()
            .map(|(name, hosts)| (name.as_str(), hosts.as_slice()))
            .chain(std::iter::once((ALL_GROUPS_KEY, self.children.as_slice())))
    }

    /// Number of entries, including the meta entry
    pub fn len(&self) -> usize {
        self.groups.len() + 1
    }

    /// Always false: the [`ALL_GROUPS_KEY`] entry is present even for a
    /// cluster without nodes
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl Serialize for Inventory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (group, hosts) in self.iter() {
            map.serialize_entry(group, hosts)?;
        }
        map.end()
    }
}
