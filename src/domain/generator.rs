// Copyright (c) 2025 - Cowboy AI, Inc.
//! Attribute Generators
//!
//! Every node attribute is produced by an [`AttributeGenerator`]: either a
//! constant shared by all nodes of a group, or a function of the node's
//! position `(group_index, group_name, node_index)`.
//!
//! # Example
//!
//! ```rust
//! use cluster_compose::domain::{Attribute, AttributeGenerator};
//!
//! let cpus: AttributeGenerator<u32> = 2.into();
//! let ip = AttributeGenerator::computed(|group_index, _name: &str, node_index| {
//!     Ok(format!("10.0.{group_index}.{}", 10 + node_index))
//! });
//!
//! assert_eq!(cpus.resolve(Attribute::Cpus, 0, "web", 5).unwrap(), 2);
//! assert_eq!(ip.resolve(Attribute::Ip, 1, "web", 2).unwrap(), "10.0.1.12");
//! ```

use std::fmt;

use crate::errors::{expression_message, ComposeError};

/// Function computing an attribute from `(group_index, group_name, node_index)`
pub type GeneratorFn<T> = Box<dyn Fn(usize, &str, usize) -> anyhow::Result<T>>;

/// Names of the node attributes, used to report which generator failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Box,
    Boxname,
    Hostname,
    Aliases,
    Ip,
    Cpus,
    Memory,
    AnsibleGroups,
    Attributes,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Box => "box",
            Attribute::Boxname => "boxname",
            Attribute::Hostname => "hostname",
            Attribute::Aliases => "aliases",
            Attribute::Ip => "ip",
            Attribute::Cpus => "cpus",
            Attribute::Memory => "memory",
            Attribute::AnsibleGroups => "ansible_groups",
            Attribute::Attributes => "attributes",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A node attribute value, either literal or computed per node
pub enum AttributeGenerator<T> {
    /// Same value for every node
    Constant(T),
    /// Value derived from the node's position
    Computed(GeneratorFn<T>),
}

impl<T> AttributeGenerator<T> {
    /// Wrap a position-dependent function
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(usize, &str, usize) -> anyhow::Result<T> + 'static,
    {
        AttributeGenerator::Computed(Box::new(f))
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, AttributeGenerator::Computed(_))
    }
}

impl<T: Clone> AttributeGenerator<T> {
    /// Resolve the attribute for one node
    ///
    /// Constants are returned verbatim. A failing function is reported as
    /// [`ComposeError::AttributeExpression`] naming the attribute, the node
    /// index and the group; this is the only place where per-node attribute
    /// failures are translated.
    pub fn resolve(
        &self,
        attribute: Attribute,
        group_index: usize,
        group_name: &str,
        node_index: usize,
    ) -> Result<T, ComposeError> {
        match self {
            AttributeGenerator::Constant(value) => Ok(value.clone()),
            AttributeGenerator::Computed(f) => {
                f(group_index, group_name, node_index).map_err(|e| {
                    ComposeError::AttributeExpression {
                        attribute: attribute.to_string(),
                        node_index,
                        group_name: group_name.to_string(),
                        message: expression_message(&e),
                    }
                })
            }
        }
    }
}

impl<T> From<T> for AttributeGenerator<T> {
    fn from(value: T) -> Self {
        AttributeGenerator::Constant(value)
    }
}

impl From<&str> for AttributeGenerator<String> {
    fn from(value: &str) -> Self {
        AttributeGenerator::Constant(value.to_string())
    }
}

impl<T: fmt::Debug> fmt::Debug for AttributeGenerator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeGenerator::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            AttributeGenerator::Computed(_) => f.write_str("Computed(<fn>)"),
        }
    }
}
