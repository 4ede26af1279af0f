//! Cluster composition engine
//!
//! Expands a compact cluster definition (named groups of homogeneous nodes
//! with attribute generators) into concrete node descriptors, ansible
//! inventory groups, and the group/host variables a provisioning tool
//! consumes.

pub mod cluster;
pub mod composition;
pub mod config;
pub mod domain;
pub mod errors;
pub mod filter;
pub mod inventory;
pub mod provisioning;

// Re-export commonly used types
pub use cluster::Cluster;
pub use composition::Composition;
pub use config::{ClusterDefaults, ComposeConfig};
pub use domain::{AttributeGenerator, Node, NodeGroup, VarMap};
pub use errors::{ComposeError, ConfigurationError, Error, Result, VarsWriteError};
pub use filter::MultimachineFilter;
pub use inventory::{Inventory, ALL_GROUPS_KEY};
