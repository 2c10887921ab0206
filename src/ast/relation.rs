//! Builder methods shared by tables and statements.

use crate::ast::{JoinKind, Node, NodeKind, Select};

fn collect<I, N>(fields: I) -> Vec<Node>
where
    I: IntoIterator<Item = N>,
    N: Into<Node>,
{
    fields.into_iter().map(Into::into).collect()
}

/// Anything a SELECT can be derived from.
///
/// Every method returns a new statement; the receiver is left as it was.
pub trait Relation {
    /// The statement the builder methods start from.
    fn to_select(&self) -> Select;

    /// Replace the projected fields.
    fn project<I, N>(&self, fields: I) -> Select
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        Select {
            project: collect(fields),
            ..self.to_select()
        }
    }

    /// Append an INNER JOIN.
    fn join(&self, table: impl Into<Node>, on: impl Into<Node>) -> Select {
        self.to_select().with_join(Node::new(NodeKind::Join {
            kind: JoinKind::Inner,
            table: table.into(),
            on: on.into(),
        }))
    }

    /// Append a LEFT JOIN.
    fn leftjoin(&self, table: impl Into<Node>, on: impl Into<Node>) -> Select {
        self.to_select().with_join(Node::new(NodeKind::Join {
            kind: JoinKind::Left,
            table: table.into(),
            on: on.into(),
        }))
    }

    /// Append a CROSS JOIN.
    fn crossjoin(&self, table: impl Into<Node>) -> Select {
        self.to_select().with_join(Node::new(NodeKind::CrossJoin {
            table: table.into(),
        }))
    }

    /// Add a WHERE condition, AND-ed onto any existing one.
    fn filter(&self, expr: impl Into<Node>) -> Select {
        self.to_select().with_filter(expr.into())
    }

    /// Replace the GROUP BY expressions.
    fn group<I, N>(&self, fields: I) -> Select
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        Select {
            group: collect(fields),
            ..self.to_select()
        }
    }

    /// Replace the ORDER BY expressions.
    fn order<I, N>(&self, fields: I) -> Select
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        Select {
            order: collect(fields),
            ..self.to_select()
        }
    }
}

impl Relation for Select {
    fn to_select(&self) -> Select {
        self.clone()
    }
}

impl Relation for Node {
    fn to_select(&self) -> Select {
        match self.kind() {
            NodeKind::Select(select) => select.clone(),
            _ => Select::new(self.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builders::{constant, raw};
    use crate::ast::Operator;
    use crate::schema::{ColumnDef, TableSchema};

    fn table() -> Node {
        Node::table(&TableSchema::new(
            "item",
            vec![ColumnDef::plain("id"), ColumnDef::plain("price")],
        ))
    }

    #[test]
    fn test_builders_leave_receiver_untouched() {
        let t = table();
        let base = t.project([t.field("id").unwrap()]);
        let filtered = base.filter(raw("1 = 1"));
        let joined = base.crossjoin(table());

        assert!(base.condition().is_none());
        assert!(base.joins().is_empty());
        assert!(filtered.condition().is_some());
        assert_eq!(joined.joins().len(), 1);
        assert!(filtered.joins().is_empty());
        assert!(filtered.source().ptr_eq(&t));
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let t = table();
        let a = t.field("price").unwrap().gt(constant(1));
        let b = t.field("price").unwrap().lt(constant(10));
        let select = t.filter(&a).filter(&b);

        match select.condition().map(Node::kind) {
            Some(NodeKind::Binary { op, left, right }) => {
                assert_eq!(*op, Operator::And);
                assert!(left.ptr_eq(&a));
                assert!(right.ptr_eq(&b));
            }
            other => panic!("expected AND, got {:?}", other),
        }
    }

    #[test]
    fn test_joins_append_in_order() {
        let t = table();
        let select = t.crossjoin(table()).leftjoin(table(), raw("TRUE"));
        assert!(matches!(select.joins()[0].kind(), NodeKind::CrossJoin { .. }));
        assert!(matches!(
            select.joins()[1].kind(),
            NodeKind::Join { kind: JoinKind::Left, .. }
        ));
    }

    #[test]
    fn test_select_node_keeps_building() {
        let t = table();
        let node = Node::from(t.project([t.field("id").unwrap()]));
        let select = node.order([t.field("id").unwrap().desc()]);
        assert_eq!(select.projections().len(), 1);
        assert_eq!(select.ordering().len(), 1);
    }

    #[test]
    fn test_row_keys() {
        let t = table();
        let select = t.project([t.field("id").unwrap(), constant(1).label("one")]);
        assert_eq!(select.row_keys(), vec![Some("id"), Some("one")]);
    }
}
