// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cluster Composition Tests
//!
//! End-to-end behaviour of `Cluster::compose`: node expansion, group
//! aggregation, the variable pipeline and the filtered inventory.

mod fixtures;

use anyhow::Result;
use cluster_compose::domain::vars_from;
use cluster_compose::{
    AttributeGenerator, Cluster, ComposeError, ConfigurationError, MultimachineFilter,
    ALL_GROUPS_KEY,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;

use fixtures::*;

#[test]
fn test_demo_web_cluster_end_to_end() -> Result<()> {
    let composition = demo_web_cluster().compose(&MultimachineFilter::All)?;

    let nodes = serde_json::to_value(&composition.nodes)?;
    assert_eq!(
        nodes,
        json!([
            {
                "box": "ubuntu/trusty64",
                "boxname": "demo-web1",
                "hostname": "demo-web1",
                "fqdn": "demo-web1.example.com",
                "aliases": [],
                "ip": "172.31.0.101",
                "cpus": 1,
                "memory": 256,
                "ansible_groups": [],
                "attributes": {},
                "index": 0,
                "group_index": 0
            },
            {
                "box": "ubuntu/trusty64",
                "boxname": "demo-web2",
                "hostname": "demo-web2",
                "fqdn": "demo-web2.example.com",
                "aliases": [],
                "ip": "172.31.0.102",
                "cpus": 1,
                "memory": 256,
                "ansible_groups": [],
                "attributes": {},
                "index": 1,
                "group_index": 1
            }
        ])
    );

    // no ansible groups declared: only the meta entry, listing nothing
    assert_eq!(composition.inventory.len(), 1);
    assert!(composition.inventory.get(ALL_GROUPS_KEY).unwrap().is_empty());
    Ok(())
}

#[test]
fn test_indexes_are_contiguous_across_groups() -> Result<()> {
    let composition = three_tier_cluster().compose(&MultimachineFilter::All)?;

    let positions: Vec<_> = composition
        .nodes
        .iter()
        .map(|node| (node.boxname.as_str(), node.index, node.group_index))
        .collect();
    assert_eq!(
        positions,
        vec![
            ("demo-lb1", 0, 0),
            ("demo-web1", 1, 0),
            ("demo-web2", 2, 1),
            ("demo-db1", 3, 0),
            ("demo-db2", 4, 1),
            ("demo-db3", 5, 2),
        ]
    );

    let ips: Vec<_> = composition.nodes.iter().map(|node| node.ip.as_str()).collect();
    assert_eq!(
        ips,
        vec![
            "172.31.0.101",
            "172.31.1.101",
            "172.31.1.102",
            "172.31.2.101",
            "172.31.2.102",
            "172.31.2.103",
        ]
    );
    Ok(())
}

#[test]
fn test_empty_domain_uses_bare_hostname() -> Result<()> {
    let mut cluster = demo_web_cluster();
    cluster.set_domain("");

    let composition = cluster.compose(&MultimachineFilter::All)?;
    assert!(composition.nodes.iter().all(|node| node.fqdn == node.hostname));
    Ok(())
}

#[test]
fn test_groups_follow_node_order() -> Result<()> {
    let composition = three_tier_cluster().compose(&MultimachineFilter::All)?;
    let inventory = &composition.inventory;

    assert_eq!(
        inventory.get("frontend").unwrap(),
        ["demo-lb1", "demo-web1", "demo-web2"]
    );
    assert_eq!(inventory.get("db_replica").unwrap(), ["demo-db2", "demo-db3"]);
    assert_eq!(
        inventory.get(ALL_GROUPS_KEY).unwrap(),
        ["lb", "frontend", "web", "db", "db_primary", "db_replica"]
    );
    Ok(())
}

#[test]
fn test_exact_filter_narrows_inventory_only() -> Result<()> {
    let mut cluster = provisioned_three_tier_cluster();
    cluster.add_host_vars("frontend", |_, node| vars_from(json!({ "name": node.hostname })));

    let filter = MultimachineFilter::parse("demo-web2")?;
    let composition = cluster.compose(&filter)?;

    assert_eq!(composition.nodes.len(), 6);
    assert_eq!(composition.inventory.get("web").unwrap(), ["demo-web2"]);
    assert_eq!(composition.inventory.get("frontend").unwrap(), ["demo-web2"]);
    assert!(composition.inventory.get("db").unwrap().is_empty());
    assert_eq!(composition.inventory.groups().len(), 6);

    // variables are still computed for every node
    assert!(composition.host_vars.contains_key("demo-lb1"));
    assert!(composition.host_vars.contains_key("demo-db3"));
    assert_eq!(composition.multimachine_filter, "demo-web2");
    Ok(())
}

#[test]
fn test_pattern_filter() -> Result<()> {
    let filter = MultimachineFilter::parse("/web.*/")?;
    let composition = three_tier_cluster().compose(&filter)?;

    assert_eq!(
        composition.inventory.get("frontend").unwrap(),
        ["demo-web1", "demo-web2"]
    );
    assert!(composition.inventory.get("lb").unwrap().is_empty());
    Ok(())
}

#[test]
fn test_variable_pipeline() -> Result<()> {
    let composition = provisioned_three_tier_cluster().compose(&MultimachineFilter::All)?;

    assert_eq!(
        composition.context,
        vars_from(json!({
            "db_hosts": ["demo-db1.example.com", "demo-db2.example.com", "demo-db3.example.com"]
        }))?
    );
    assert_eq!(composition.group_vars["web"]["web_count"], 2);
    assert_eq!(
        composition.group_vars["web"]["upstream"],
        composition.context["db_hosts"]
    );

    // lb's provisioner returned nothing, so no entry at all
    assert!(!composition.group_vars.contains_key("lb"));
    assert_eq!(composition.group_vars.len(), 1);

    // db then db_primary: the later group overwrites `role`
    assert_eq!(
        composition.host_vars["demo-db1"],
        vars_from(json!({ "role": "primary", "listen": "172.31.2.101" }))?
    );
    assert_eq!(
        composition.host_vars["demo-db2"],
        vars_from(json!({ "role": "db", "listen": "172.31.2.102" }))?
    );
    assert!(!composition.host_vars.contains_key("demo-web1"));
    Ok(())
}

#[test]
fn test_second_host_provisioner_wins() -> Result<()> {
    let mut cluster = demo_web_cluster();
    cluster.add_host_vars("web", |_, _| vars_from(json!({ "k": "first", "a": 1 })));
    cluster.add_host_vars("web", |_, _| vars_from(json!({ "k": "second" })));
    cluster
        .nodes(1, "tagged", |group| {
            group.ansible_groups = vec!["web".to_string()].into();
        })?;

    let composition = cluster.compose(&MultimachineFilter::All)?;
    assert_eq!(
        composition.host_vars["demo-tagged1"],
        vars_from(json!({ "k": "second", "a": 1 }))?
    );
    Ok(())
}

#[test]
fn test_context_conflicts_are_last_write_wins() -> Result<()> {
    let mut cluster = three_tier_cluster();
    cluster.add_context_vars("lb", |_, _| vars_from(json!({ "owner": "lb" })));
    cluster.add_context_vars("web", |_, _| vars_from(json!({ "owner": "web" })));

    let composition = cluster.compose(&MultimachineFilter::All)?;
    assert_eq!(composition.context["owner"], "web");
    Ok(())
}

#[test]
fn test_attribute_failure_aborts_compose() {
    let calls = Rc::new(Cell::new(0usize));
    let seen = Rc::clone(&calls);

    let mut cluster = demo_web_cluster();
    cluster
        .nodes(3, "db", move |group| {
            group.ip = AttributeGenerator::computed(move |_, _: &str, node_index| {
                seen.set(seen.get() + 1);
                anyhow::ensure!(node_index == 0, "no address left");
                Ok("10.0.0.1".to_string())
            });
        })
        .unwrap();

    let err = cluster.compose(&MultimachineFilter::All).unwrap_err();
    assert_eq!(
        err,
        ComposeError::AttributeExpression {
            attribute: "ip".to_string(),
            node_index: 1,
            group_name: "db".to_string(),
            message: "no address left".to_string(),
        }
    );
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_context_failure_is_wrapped() {
    let mut cluster = three_tier_cluster();
    cluster.add_context_vars("web", |_, _| anyhow::bail!("lookup failed"));

    let err = cluster.compose(&MultimachineFilter::All).unwrap_err();
    assert_eq!(
        err,
        ComposeError::ContextVarExpression {
            ansible_group: "web".to_string(),
            message: "lookup failed".to_string(),
        }
    );
}

#[test]
fn test_group_failure_is_wrapped() {
    let mut cluster = three_tier_cluster();
    cluster.add_group_vars("db", |_, _| anyhow::bail!("bad template"));

    let err = cluster.compose(&MultimachineFilter::All).unwrap_err();
    assert!(matches!(
        err,
        ComposeError::GroupVarExpression { ref ansible_group, .. } if ansible_group == "db"
    ));
}

#[test]
fn test_provisioners_for_unknown_groups_are_ignored() -> Result<()> {
    let mut cluster = demo_web_cluster();
    cluster.add_group_vars("ghost", |_, _| anyhow::bail!("never called"));
    cluster.add_host_vars("ghost", |_, _| anyhow::bail!("never called"));

    let composition = cluster.compose(&MultimachineFilter::All)?;
    assert!(composition.group_vars.is_empty());
    assert!(composition.host_vars.is_empty());
    Ok(())
}

#[test]
fn test_duplicate_group_is_a_configuration_error() {
    let mut cluster = demo_web_cluster();
    let err = cluster.nodes(7, "web", |_| {}).unwrap_err();

    assert_eq!(
        err,
        ConfigurationError::DuplicateNodeGroup {
            cluster_name: CLUSTER_NAME.to_string(),
            group_name: "web".to_string(),
        }
    );
    assert_eq!(cluster.node_group("web").unwrap().instances(), 2);
    assert!(cluster_compose::Error::from(err).is_configuration());
}

#[test]
fn test_configure_reports_cluster_name() {
    let err = Cluster::configure("broken", |_| anyhow::bail!("typo in definition")).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::ClusterInitialize {
            cluster_name: "broken".to_string(),
            message: "typo in definition".to_string(),
        }
    );
}
