// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cluster Domain Models
//!
//! Leaf concepts of the composition engine:
//!
//! - [`AttributeGenerator`] - constant or position-dependent attribute value
//! - [`Node`] - one expanded machine
//! - [`NodeGroup`] - template producing `N` homogeneous nodes
//! - [`VarMap`] - schema-free variable mapping used for attributes and
//!   provisioner outputs

pub mod generator;
pub mod node;
pub mod node_group;
pub mod vars;

pub use generator::{Attribute, AttributeGenerator, GeneratorFn};
pub use node::{fqdn, Node};
pub use node_group::{default_ip_generator, default_name_generator, NodeGroup};
pub use vars::{merge_vars, vars_from, VarMap};
