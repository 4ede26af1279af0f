// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Node Expansion
//!
//! For arbitrary lists of node group sizes, composing a cluster must:
//! - produce exactly the sum of the instance counts
//! - number nodes 0..n without gaps, in registration order
//! - restart `group_index` at every group boundary
//! - derive default ips from the group uid and node index

use cluster_compose::{Cluster, Composition, MultimachineFilter};
use proptest::prelude::*;

// ============================================================================
// Helpers
// ============================================================================

/// Cluster with one node group per size, each in its own ansible group
fn compose_sizes(sizes: &[usize], domain: &str, filter: &MultimachineFilter) -> Composition {
    let mut cluster = Cluster::new("prop");
    cluster.set_domain(domain);
    for (uid, size) in sizes.iter().enumerate() {
        let group_name = format!("g{uid}x");
        let ansible_group = group_name.clone();
        cluster
            .nodes(*size, group_name, move |group| {
                group.ansible_groups = vec![ansible_group, "everyone".to_string()].into();
            })
            .expect("group names are unique");
    }
    cluster.compose(filter).expect("default generators never fail")
}

fn sizes_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..8, 0..6)
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_node_count_is_sum_of_instances(sizes in sizes_strategy()) {
        let composition = compose_sizes(&sizes, "", &MultimachineFilter::All);
        prop_assert_eq!(composition.nodes.len(), sizes.iter().sum::<usize>());
    }

    #[test]
    fn prop_global_index_is_contiguous(sizes in sizes_strategy()) {
        let composition = compose_sizes(&sizes, "", &MultimachineFilter::All);
        for (position, node) in composition.nodes.iter().enumerate() {
            prop_assert_eq!(node.index, position);
        }
    }

    #[test]
    fn prop_group_index_resets_per_group(sizes in sizes_strategy()) {
        let composition = compose_sizes(&sizes, "", &MultimachineFilter::All);
        let mut nodes = composition.nodes.iter();
        for (uid, size) in sizes.iter().enumerate() {
            for expected in 0..*size {
                let node = nodes.next().expect("node count matches sizes");
                prop_assert_eq!(node.group_index, expected);
                prop_assert_eq!(&node.boxname, &format!("prop-g{}x{}", uid, expected + 1));
                prop_assert_eq!(&node.ip, &format!("172.31.{}.{}", uid, 101 + expected));
            }
        }
        prop_assert!(nodes.next().is_none());
    }

    #[test]
    fn prop_fqdn_follows_domain(sizes in sizes_strategy(), domain in "([a-z]{1,8}(\\.[a-z]{2,4})?)?") {
        let composition = compose_sizes(&sizes, &domain, &MultimachineFilter::All);
        for node in &composition.nodes {
            if domain.is_empty() {
                prop_assert_eq!(&node.fqdn, &node.hostname);
            } else {
                prop_assert_eq!(&node.fqdn, &format!("{}.{}", node.hostname, domain));
            }
        }
    }

    #[test]
    fn prop_exact_filter_keeps_one_host(sizes in prop::collection::vec(1usize..5, 1..5), pick in any::<prop::sample::Index>()) {
        let unfiltered = compose_sizes(&sizes, "", &MultimachineFilter::All);
        let target = &unfiltered.nodes[pick.index(unfiltered.nodes.len())];

        let filter = MultimachineFilter::parse(&target.boxname).expect("boxnames are valid tokens");
        let filtered = compose_sizes(&sizes, "", &filter);

        prop_assert_eq!(filtered.inventory.get("everyone").unwrap(), [target.hostname.clone()]);
        prop_assert_eq!(filtered.inventory.groups(), unfiltered.inventory.groups());
        prop_assert_eq!(filtered.nodes, unfiltered.nodes);
    }
}
