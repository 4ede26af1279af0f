// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cluster Compose Demo
//!
//! Composes a sample three-tier cluster, writes its `group_vars` and
//! `host_vars` files and prints the resulting nodes and inventory.
//!
//! Run with: cargo run --bin cluster-compose -- up demo-web1
//!
//! Arguments follow the hosting tool convention: `<command> [target]`, where
//! a target is only honoured for `up` and `provision`.
//!
//! Environment:
//! - `CLUSTER_COMPOSE_PLAYBOOK_PATH` - playbook root (default `./provisioning`)
//! - `CLUSTER_COMPOSE_DRY_RUN` - log the file plan instead of writing it
//! - `CLUSTER_COMPOSE_VERBOSE` - print every node attribute

use anyhow::{Context, Result};
use cluster_compose::domain::vars_from;
use cluster_compose::provisioning::{
    plan_var_files, FileSystemExecutor, LoggingExecutor, VarFileExecutor,
};
use cluster_compose::{AttributeGenerator, Cluster, ComposeConfig, MultimachineFilter};
use serde_json::json;
use tracing::info;

fn demo_cluster() -> Result<Cluster> {
    let cluster = Cluster::configure("demo", |cluster| {
        cluster.set_box("ubuntu/jammy64");
        cluster.set_domain("demo.local");

        cluster.nodes(1, "lb", |group| {
            group.memory = 512.into();
            group.ansible_groups = vec!["lb".to_string(), "frontend".to_string()].into();
        })?;

        cluster.nodes(2, "web", |group| {
            group.cpus = 2.into();
            group.aliases = AttributeGenerator::computed(|_, name: &str, node_index| {
                Ok(vec![format!("{name}-{node_index}.internal")])
            });
            group.ansible_groups = vec!["web".to_string(), "frontend".to_string()].into();
        })?;

        cluster.nodes(2, "db", |group| {
            group.memory = 1024.into();
            group.ansible_groups = AttributeGenerator::computed(|_, _: &str, node_index| {
                let role = if node_index == 0 { "db_primary" } else { "db_replica" };
                Ok(vec!["db".to_string(), role.to_string()])
            });
        })?;

        cluster.add_context_vars("db", |_, nodes| {
            let hosts: Vec<_> = nodes.iter().map(|node| node.fqdn.clone()).collect();
            vars_from(json!({ "db_hosts": hosts }))
        });
        cluster.add_group_vars("web", |context, nodes| {
            let upstream = context.get("db_hosts").cloned().unwrap_or_default();
            vars_from(json!({ "upstream_db": upstream, "web_count": nodes.len() }))
        });
        cluster.add_host_vars("db_primary", |_, node| {
            vars_from(json!({ "replication_role": "primary", "listen": node.ip }))
        });
        cluster.add_host_vars("db_replica", |context, node| {
            let primary = context
                .get("db_hosts")
                .and_then(|hosts| hosts.get(0))
                .cloned()
                .context("db_hosts missing from context")?;
            vars_from(json!({ "replication_role": "replica", "primary": primary, "listen": node.ip }))
        });

        Ok(())
    })?;

    Ok(cluster)
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let filter = MultimachineFilter::from_command_args(&args)?;
    let config = ComposeConfig::from_env().context("Failed to resolve playbook path")?;
    let dry_run = std::env::var_os("CLUSTER_COMPOSE_DRY_RUN").is_some();
    let verbose = std::env::var_os("CLUSTER_COMPOSE_VERBOSE").is_some();

    info!("Playbook path: {}", config.playbook_path().display());
    if !filter.is_all() {
        info!("Targeting machines matching {}", filter);
    }

    let composition = demo_cluster()?.compose(&filter)?;

    let plan = plan_var_files(&composition, &config);
    if dry_run {
        LoggingExecutor::new().execute(&plan)?;
    } else {
        FileSystemExecutor::new()
            .execute(&plan)
            .context("Failed to write vars files")?;
    }

    print!("{}", composition.report(verbose));
    Ok(())
}
