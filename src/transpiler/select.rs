//! SELECT statement assembly.

use crate::ast::{Node, Select};
use crate::error::{QueryError, QueryResult};
use crate::transpiler::context::CompileContext;

type CompileFn = fn(&Node, &mut CompileContext) -> QueryResult<String>;

fn compile_list(nodes: &[Node], ctx: &mut CompileContext, compile: CompileFn) -> QueryResult<String> {
    let parts = nodes
        .iter()
        .map(|node| compile(node, ctx))
        .collect::<QueryResult<Vec<_>>>()?;
    Ok(parts.join(","))
}

/// Build a SELECT into `ctx`.
///
/// Clauses are compiled in the order they appear in the output text, so
/// aliases are numbered and values bound left to right.
pub(crate) fn build_select(select: &Select, ctx: &mut CompileContext) -> QueryResult<String> {
    if select.project.is_empty() {
        return Err(QueryError::EmptyProjection);
    }

    let mut sql = Vec::new();

    let fields = compile_list(&select.project, ctx, Node::compile_projection)?;
    sql.push(format!("SELECT {}", fields));
    sql.push(format!("FROM {}", select.source.compile_table(ctx)?));

    for join in &select.joins {
        sql.push(join.compile_join(ctx)?);
    }

    if let Some(filter) = &select.filter {
        sql.push(format!("WHERE {}", filter.compile_expression(ctx)?));
    }

    if !select.group.is_empty() {
        let group = compile_list(&select.group, ctx, Node::compile_expression)?;
        sql.push(format!("GROUP BY {}", group));
    }

    if !select.order.is_empty() {
        let order = compile_list(&select.order, ctx, Node::compile_ordering)?;
        sql.push(format!("ORDER BY {}", order));
    }

    Ok(sql.join(" "))
}
