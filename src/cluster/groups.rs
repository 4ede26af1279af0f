// Copyright (c) 2025 - Cowboy AI, Inc.
//! Ansible group aggregation
//!
//! Folds the flat node list into named groups using each node's declared
//! `ansible_groups`. A node can sit in several groups, and groups can mix
//! nodes coming from different node groups.

use crate::domain::Node;

/// Nodes aggregated by ansible group
///
/// Groups are kept in first-appearance order; inside a group, nodes follow
/// the global materialization order.
#[derive(Debug, Clone, Default)]
pub struct AnsibleGroups<'a> {
    groups: Vec<(String, Vec<&'a Node>)>,
}

impl<'a> AnsibleGroups<'a> {
    pub fn aggregate(nodes: &'a [Node]) -> Self {
        let mut aggregated = Self::default();
        for node in nodes {
            for group in &node.ansible_groups {
                aggregated.push(group, node);
            }
        }
        aggregated
    }

    fn push(&mut self, group: &str, node: &'a Node) {
        match self.groups.iter_mut().find(|(name, _)| name == group) {
            Some((_, members)) => members.push(node),
            None => self.groups.push((group.to_string(), vec![node])),
        }
    }

    pub fn get(&self, group: &str) -> Option<&[&'a Node]> {
        self.groups
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, members)| members.as_slice())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[&'a Node])> {
        self.groups
            .iter()
            .map(|(name, members)| (name.as_str(), members.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NodeGroup;

    fn nodes() -> Vec<Node> {
        let mut web = NodeGroup::new(0, 2, "web", "box");
        web.ansible_groups = vec!["web".to_string(), "frontend".to_string()].into();
        let mut lb = NodeGroup::new(1, 1, "lb", "box");
        lb.ansible_groups = vec!["frontend".to_string()].into();

        let mut all = web.compose("c", "", 0).unwrap();
        all.extend(lb.compose("c", "", all.len()).unwrap());
        all
    }

    #[test]
    fn test_aggregate_preserves_order() {
        let nodes = nodes();
        let groups = AnsibleGroups::aggregate(&nodes);

        assert_eq!(groups.names().collect::<Vec<_>>(), vec!["web", "frontend"]);

        let frontend: Vec<_> = groups
            .get("frontend")
            .unwrap()
            .iter()
            .map(|n| n.hostname.as_str())
            .collect();
        assert_eq!(frontend, vec!["c-web1", "c-web2", "c-lb1"]);
        assert!(groups.get("db").is_none());
    }

    #[test]
    fn test_nodes_without_groups_are_not_aggregated() {
        let nodes = NodeGroup::new(0, 3, "bare", "box").compose("c", "", 0).unwrap();
        assert!(AnsibleGroups::aggregate(&nodes).is_empty());
    }
}
