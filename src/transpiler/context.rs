//! Per-compilation state.

use std::collections::HashMap;

use crate::ast::{Node, Value};
use crate::transpiler::traits::SqlGenerator;

/// Mutable state for a single compilation pass.
///
/// Nodes are stateless, so bound values and table aliases live here. Values
/// are appended in the order their placeholders are emitted, which is why a
/// statement must be compiled strictly left to right. A context is consumed
/// by [`CompileContext::finish`] and never reused.
pub struct CompileContext<'g> {
    generator: &'g dyn SqlGenerator,
    values: Vec<Value>,
    // holding the node keeps its address from being reused mid-compile
    aliases: HashMap<usize, (Node, String)>,
}

impl<'g> CompileContext<'g> {
    pub fn new(generator: &'g dyn SqlGenerator) -> Self {
        Self {
            generator,
            values: Vec::new(),
            aliases: HashMap::new(),
        }
    }

    /// Record a bound value and return its placeholder.
    pub fn bind(&mut self, value: &Value) -> String {
        self.values.push(value.clone());
        self.generator.placeholder(self.values.len())
    }

    /// Return the quoted alias of a table node, allocating `t<N>` on first
    /// sight. Nodes are told apart by identity, not by content.
    pub fn alias_for(&mut self, table: &Node) -> String {
        let next = self.aliases.len();
        let generator = self.generator;
        let (_, alias) = self.aliases.entry(table.identity()).or_insert_with(|| {
            let alias = generator.quote_identifier(&format!("t{}", next));
            (table.clone(), alias)
        });
        alias.clone()
    }

    /// Quote a name.
    pub fn quote(&self, name: &str) -> String {
        self.generator.quote_identifier(name)
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Consume the context, yielding the bound values in placeholder order.
    pub fn finish(self) -> Vec<Value> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnDef, TableSchema};
    use crate::transpiler::sql::postgres::PostgresGenerator;

    fn table() -> Node {
        Node::table(&TableSchema::new("user", vec![ColumnDef::plain("id")]))
    }

    #[test]
    fn test_alias_by_identity() {
        let generator = PostgresGenerator;
        let mut ctx = CompileContext::new(&generator);
        let a = table();
        let b = table();

        assert_eq!(ctx.alias_for(&a), "\"t0\"");
        assert_eq!(ctx.alias_for(&b), "\"t1\"");
        assert_eq!(ctx.alias_for(&a.clone()), "\"t0\"");
    }

    #[test]
    fn test_bind_numbers_placeholders() {
        let generator = PostgresGenerator;
        let mut ctx = CompileContext::new(&generator);
        assert_eq!(ctx.bind(&Value::Int(3)), "$1");
        assert_eq!(ctx.bind(&Value::Int(1)), "$2");
        assert_eq!(ctx.finish(), vec![Value::Int(3), Value::Int(1)]);
    }

    #[test]
    fn test_alias_survives_dropped_handle() {
        let generator = PostgresGenerator;
        let mut ctx = CompileContext::new(&generator);
        let first = ctx.alias_for(&table());
        let second = ctx.alias_for(&table());
        assert_ne!(first, second);
    }
}
