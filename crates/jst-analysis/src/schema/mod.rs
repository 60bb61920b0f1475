//! Schema graph: arena-allocated schema nodes linked by labeled relations.
//!
//! Nodes are addressed by [`NodeId`]. Child relations store ids, so a node
//! may be shared by several parents or be its own ancestor.

pub mod codec;
pub mod graph;
pub mod node;
pub mod relation;

pub use graph::{NodeId, SchemaGraph};
pub use node::{Items, Schema};
pub use relation::{Edge, Relation};
