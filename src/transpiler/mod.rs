//! SQL compiler for query trees.
//!
//! Lowers a [`Select`] into SQL text plus the ordered list of values bound to
//! its placeholders.

pub mod context;
pub mod dialect;
mod nodes;
mod select;
pub mod sql;
pub mod traits;

#[cfg(test)]
mod tests;

use std::fmt;

use serde::Serialize;

use crate::ast::{Node, Select, Value};
use crate::error::QueryResult;
pub use context::CompileContext;
pub use dialect::Dialect;
pub use traits::SqlGenerator;

/// The syntactic positions a node can be compiled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Statement,
    Expression,
    Projection,
    Join,
    Table,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Statement => write!(f, "statement"),
            Role::Expression => write!(f, "expression"),
            Role::Projection => write!(f, "projection"),
            Role::Join => write!(f, "join"),
            Role::Table => write!(f, "table"),
        }
    }
}

/// SQL text and the values for its placeholders, in order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    pub sql: String,
    pub values: Vec<Value>,
}

impl fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sql)
    }
}

/// Trait for compiling statements to SQL.
pub trait ToSql {
    /// Compile with a caller-supplied generator. Each call uses a fresh context.
    fn compile_with(&self, generator: &dyn SqlGenerator) -> QueryResult<CompiledQuery>;

    /// Compile using the default dialect.
    fn to_sql(&self) -> QueryResult<CompiledQuery> {
        self.to_sql_with_dialect(Dialect::default())
    }

    /// Compile with a specific dialect.
    fn to_sql_with_dialect(&self, dialect: Dialect) -> QueryResult<CompiledQuery> {
        self.compile_with(dialect.generator().as_ref())
    }
}

fn finish(sql: String, ctx: CompileContext) -> CompiledQuery {
    let values = ctx.finish();
    tracing::debug!(sql = %sql, params = values.len(), "compiled select");
    CompiledQuery { sql, values }
}

impl ToSql for Select {
    fn compile_with(&self, generator: &dyn SqlGenerator) -> QueryResult<CompiledQuery> {
        let mut ctx = CompileContext::new(generator);
        let sql = select::build_select(self, &mut ctx)?;
        Ok(finish(sql, ctx))
    }
}

impl ToSql for Node {
    fn compile_with(&self, generator: &dyn SqlGenerator) -> QueryResult<CompiledQuery> {
        let mut ctx = CompileContext::new(generator);
        let sql = self.compile_statement(&mut ctx)?;
        Ok(finish(sql, ctx))
    }
}
