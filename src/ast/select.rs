use crate::ast::{Node, NodeKind};

/// A SELECT statement.
///
/// Builder methods come from [`crate::ast::Relation`] and never touch the
/// receiver: each returns a new `Select` sharing every unchanged part, so a
/// partially built query can serve as a template for several others.
#[derive(Debug, Clone)]
pub struct Select {
    pub(crate) source: Node,
    pub(crate) project: Vec<Node>,
    pub(crate) joins: Vec<Node>,
    pub(crate) filter: Option<Node>,
    pub(crate) group: Vec<Node>,
    pub(crate) order: Vec<Node>,
}

impl Select {
    pub fn new(source: impl Into<Node>) -> Self {
        Self {
            source: source.into(),
            project: Vec::new(),
            joins: Vec::new(),
            filter: None,
            group: Vec::new(),
            order: Vec::new(),
        }
    }

    pub fn source(&self) -> &Node {
        &self.source
    }

    pub fn projections(&self) -> &[Node] {
        &self.project
    }

    pub fn joins(&self) -> &[Node] {
        &self.joins
    }

    pub fn condition(&self) -> Option<&Node> {
        self.filter.as_ref()
    }

    pub fn grouping(&self) -> &[Node] {
        &self.group
    }

    pub fn ordering(&self) -> &[Node] {
        &self.order
    }

    /// Output names of the projected fields, in projection order.
    pub fn row_keys(&self) -> Vec<Option<&str>> {
        self.project.iter().map(Node::row_key).collect()
    }

    /// Wrap as a subquery, usable as a join source or scalar expression.
    /// Each call yields a node with its own alias identity.
    pub fn subquery(&self) -> Node {
        Node::new(NodeKind::Subquery(self.clone()))
    }

    pub(crate) fn with_join(&self, join: Node) -> Self {
        let mut joins = self.joins.clone();
        joins.push(join);
        Self {
            joins,
            ..self.clone()
        }
    }

    pub(crate) fn with_filter(&self, expr: Node) -> Self {
        let filter = match &self.filter {
            Some(existing) => existing.and(expr),
            None => expr,
        };
        Self {
            filter: Some(filter),
            ..self.clone()
        }
    }
}
