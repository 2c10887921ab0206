//! Ergonomic constructors for leaf expressions.
//!
//! # Example
//! ```ignore
//! use relsql::ast::builders::*;
//!
//! let posts = count_of(post.field("id")?).label("posts");
//! let recent = post.field("published")?.gt(constant(cutoff));
//! ```

pub mod aggregates;

pub use aggregates::{avg, count, count_of, max, min, sum};

use crate::ast::{Node, NodeKind, Value};

/// A value bound as a query parameter.
pub fn constant(value: impl Into<Value>) -> Node {
    Node::new(NodeKind::Const(value.into()))
}

/// SQL text emitted verbatim. The caller is responsible for its safety.
pub fn raw(sql: impl Into<String>) -> Node {
    Node::new(NodeKind::Raw(sql.into()))
}

/// Reference to a projected output name, e.g. in ORDER BY.
pub fn label(name: impl Into<String>) -> Node {
    Node::new(NodeKind::Label(name.into()))
}

/// SQL function application.
pub fn func<I, N>(name: impl Into<String>, args: I) -> Node
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    Node::new(NodeKind::Function {
        name: name.into(),
        args: args.into_iter().map(Into::into).collect(),
    })
}
