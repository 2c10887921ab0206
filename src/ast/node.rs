use std::fmt;
use std::sync::Arc;

use crate::ast::{Operator, Select, Value};
use crate::error::{QueryError, QueryResult};
use crate::schema::{SchemaProvider, TableSchema};

/// Join flavours that carry an ON condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoinKind::Inner => write!(f, "INNER"),
            JoinKind::Left => write!(f, "LEFT"),
        }
    }
}

/// The node variants of a query tree.
///
/// Which compilation roles a variant supports is decided by the transpiler;
/// see [`crate::transpiler::Role`].
#[derive(Debug)]
pub enum NodeKind {
    /// A value bound as a parameter.
    Const(Value),
    /// SQL text passed through verbatim.
    Raw(String),
    /// Reference to a projected output name.
    Label(String),
    /// A column of a table or subquery.
    Field {
        table: Node,
        column: String,
        row_key: String,
    },
    /// SQL function application.
    Function { name: String, args: Vec<Node> },
    /// `left op right`
    Binary {
        op: Operator,
        left: Node,
        right: Node,
    },
    /// Descending wrapper, only meaningful in ORDER BY.
    Desc(Node),
    /// An expression with an output name.
    Labeled { label: String, expr: Node },
    Join {
        kind: JoinKind,
        table: Node,
        on: Node,
    },
    CrossJoin { table: Node },
    /// A base table from a schema provider.
    Table(TableSchema),
    /// A SELECT used as a table or scalar expression.
    Subquery(Select),
    /// A SELECT statement.
    Select(Select),
}

/// An immutable, shareable query tree node.
///
/// Cloning a `Node` shares the underlying node, so clones keep the same
/// identity. Table aliases are allocated per identity, which is what lets
/// two separately built references to the same table be self-joined.
#[derive(Clone)]
pub struct Node(Arc<NodeKind>);

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self(Arc::new(kind))
    }

    pub fn kind(&self) -> &NodeKind {
        &self.0
    }

    /// Whether both handles point at the same node.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn identity(&self) -> usize {
        Arc::as_ptr(&self.0) as *const () as usize
    }

    /// Build a base table node from a schema provider.
    pub fn table(provider: &impl SchemaProvider) -> Self {
        Self::new(NodeKind::Table(TableSchema::from_provider(provider)))
    }

    /// Look up a field on a table or subquery.
    ///
    /// Base tables match a column descriptor by logical name first, then by
    /// database column. Subqueries expose their projections by label.
    pub fn field(&self, name: &str) -> QueryResult<Node> {
        match self.kind() {
            NodeKind::Table(schema) => {
                let (column, row_key) = schema
                    .resolve(name)
                    .ok_or_else(|| QueryError::unknown_field(self, name))?;
                Ok(self.field_node(column, row_key))
            }
            NodeKind::Subquery(select) => {
                if select.projections().iter().any(|p| p.row_key() == Some(name)) {
                    Ok(self.field_node(name.to_string(), name.to_string()))
                } else {
                    Err(QueryError::unknown_field(self, name))
                }
            }
            _ => Err(QueryError::unknown_field(self, name)),
        }
    }

    fn field_node(&self, column: String, row_key: String) -> Node {
        Node::new(NodeKind::Field {
            table: self.clone(),
            column,
            row_key,
        })
    }

    /// The key this node contributes to result rows when projected.
    pub fn row_key(&self) -> Option<&str> {
        match self.kind() {
            NodeKind::Labeled { label, .. } => Some(label),
            NodeKind::Field { row_key, .. } => Some(row_key),
            _ => None,
        }
    }

    /// Wrap with an output name, producing a projection.
    pub fn label(&self, name: impl Into<String>) -> Node {
        Node::new(NodeKind::Labeled {
            label: name.into(),
            expr: self.clone(),
        })
    }

    /// Sort this expression descending in ORDER BY.
    pub fn desc(&self) -> Node {
        Node::new(NodeKind::Desc(self.clone()))
    }

    pub fn binary(&self, op: Operator, other: impl Into<Node>) -> Node {
        Node::new(NodeKind::Binary {
            op,
            left: self.clone(),
            right: other.into(),
        })
    }

    pub fn eq(&self, other: impl Into<Node>) -> Node {
        self.binary(Operator::Eq, other)
    }

    pub fn ne(&self, other: impl Into<Node>) -> Node {
        self.binary(Operator::Ne, other)
    }

    pub fn lt(&self, other: impl Into<Node>) -> Node {
        self.binary(Operator::Lt, other)
    }

    pub fn le(&self, other: impl Into<Node>) -> Node {
        self.binary(Operator::Le, other)
    }

    pub fn gt(&self, other: impl Into<Node>) -> Node {
        self.binary(Operator::Gt, other)
    }

    pub fn ge(&self, other: impl Into<Node>) -> Node {
        self.binary(Operator::Ge, other)
    }

    pub fn and(&self, other: impl Into<Node>) -> Node {
        self.binary(Operator::And, other)
    }

    pub fn or(&self, other: impl Into<Node>) -> Node {
        self.binary(Operator::Or, other)
    }

    pub fn add(&self, other: impl Into<Node>) -> Node {
        self.binary(Operator::Add, other)
    }

    pub fn sub(&self, other: impl Into<Node>) -> Node {
        self.binary(Operator::Sub, other)
    }

    pub fn mul(&self, other: impl Into<Node>) -> Node {
        self.binary(Operator::Mul, other)
    }

    pub fn div(&self, other: impl Into<Node>) -> Node {
        self.binary(Operator::Div, other)
    }

    pub fn rem(&self, other: impl Into<Node>) -> Node {
        self.binary(Operator::Rem, other)
    }

    pub fn like(&self, other: impl Into<Node>) -> Node {
        self.binary(Operator::Like, other)
    }

    pub fn is_null(&self) -> Node {
        self.binary(Operator::Is, Node::new(NodeKind::Raw("NULL".to_string())))
    }

    pub fn is_not_null(&self) -> Node {
        self.binary(Operator::IsNot, Node::new(NodeKind::Raw("NULL".to_string())))
    }
}

impl From<&Node> for Node {
    fn from(node: &Node) -> Self {
        node.clone()
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::new(NodeKind::Const(value))
    }
}

impl From<Select> for Node {
    fn from(select: Select) -> Self {
        Node::new(NodeKind::Select(select))
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.kind(), f)
    }
}

/// A short description used in error messages.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            NodeKind::Const(value) => write!(f, "Const({})", value),
            NodeKind::Raw(sql) => write!(f, "Raw({})", sql),
            NodeKind::Label(label) => write!(f, "Label({})", label),
            NodeKind::Field { table, column, .. } => match table.kind() {
                NodeKind::Table(schema) => write!(f, "Field({}.{})", schema.name, column),
                _ => write!(f, "Field(subquery.{})", column),
            },
            NodeKind::Function { name, .. } => write!(f, "Function({})", name),
            NodeKind::Binary { op, .. } => write!(f, "Binary({})", op),
            NodeKind::Desc(_) => write!(f, "Desc"),
            NodeKind::Labeled { label, .. } => write!(f, "Labeled({})", label),
            NodeKind::Join { kind, .. } => write!(f, "Join({})", kind),
            NodeKind::CrossJoin { .. } => write!(f, "CrossJoin"),
            NodeKind::Table(schema) => write!(f, "Table({})", schema.name),
            NodeKind::Subquery(_) => write!(f, "Subquery"),
            NodeKind::Select(_) => write!(f, "Select"),
        }
    }
}
