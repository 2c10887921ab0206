//! Query tree nodes.
//!
//! Nodes are immutable. Every builder call returns a new tree that shares the
//! untouched parts of the old one, so expressions and partial statements can be
//! reused freely.

pub mod builders;
pub mod node;
pub mod operators;
pub mod relation;
pub mod select;
pub mod values;

pub use node::{JoinKind, Node, NodeKind};
pub use operators::Operator;
pub use relation::Relation;
pub use select::Select;
pub use values::Value;
