// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cluster-compose
//!
//! Deterministic cluster definitions shared by the integration tests.
//! Fixtures are the only place that registers node groups and provisioners,
//! so tests read as assertions over a known cluster.

#![allow(dead_code)]

use cluster_compose::domain::vars_from;
use cluster_compose::{AttributeGenerator, Cluster};
use serde_json::json;

pub const CLUSTER_NAME: &str = "demo";
pub const DOMAIN: &str = "example.com";

/// One `web` group of two nodes with default generators
pub fn demo_web_cluster() -> Cluster {
    let mut cluster = Cluster::new(CLUSTER_NAME);
    cluster.set_domain(DOMAIN);
    cluster
        .nodes(2, "web", |_| {})
        .expect("Invalid fixture cluster");
    cluster
}

/// Three node groups spread over overlapping ansible groups
///
/// | node group | instances | ansible groups             |
/// |------------|-----------|----------------------------|
/// | lb         | 1         | lb, frontend               |
/// | web        | 2         | web, frontend              |
/// | db         | 3         | db + db_primary/db_replica |
pub fn three_tier_cluster() -> Cluster {
    let mut cluster = Cluster::new(CLUSTER_NAME);
    cluster.set_domain(DOMAIN);

    cluster
        .nodes(1, "lb", |group| {
            group.ansible_groups = vec!["lb".to_string(), "frontend".to_string()].into();
        })
        .expect("Invalid fixture cluster");
    cluster
        .nodes(2, "web", |group| {
            group.cpus = 2.into();
            group.ansible_groups = vec!["web".to_string(), "frontend".to_string()].into();
        })
        .expect("Invalid fixture cluster");
    cluster
        .nodes(3, "db", |group| {
            group.memory = 1024.into();
            group.ansible_groups = AttributeGenerator::computed(|_, _: &str, node_index| {
                let role = if node_index == 0 { "db_primary" } else { "db_replica" };
                Ok(vec!["db".to_string(), role.to_string()])
            });
        })
        .expect("Invalid fixture cluster");

    cluster
}

/// [`three_tier_cluster`] with provisioners on every stage
pub fn provisioned_three_tier_cluster() -> Cluster {
    let mut cluster = three_tier_cluster();

    cluster.add_context_vars("db", |_, nodes| {
        let hosts: Vec<_> = nodes.iter().map(|node| node.fqdn.clone()).collect();
        vars_from(json!({ "db_hosts": hosts }))
    });
    cluster.add_group_vars("web", |context, nodes| {
        vars_from(json!({ "upstream": context["db_hosts"], "web_count": nodes.len() }))
    });
    cluster.add_group_vars("lb", |_, _| Ok(Default::default()));
    cluster.add_host_vars("db", |_, node| vars_from(json!({ "role": "db", "listen": node.ip })));
    cluster.add_host_vars("db_primary", |_, _| vars_from(json!({ "role": "primary" })));

    cluster
}
