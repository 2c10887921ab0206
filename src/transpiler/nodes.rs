//! Role dispatch: how each node renders in each syntactic position.

use crate::ast::{Node, NodeKind, Operator};
use crate::error::{QueryError, QueryResult};
use crate::transpiler::Role;
use crate::transpiler::context::CompileContext;
use crate::transpiler::select::build_select;

impl Node {
    fn unsupported(&self, role: Role) -> QueryError {
        QueryError::capability(role, self)
    }

    pub(crate) fn compile_statement(&self, ctx: &mut CompileContext) -> QueryResult<String> {
        match self.kind() {
            NodeKind::Select(select) => build_select(select, ctx),
            _ => Err(self.unsupported(Role::Statement)),
        }
    }

    pub(crate) fn compile_expression(&self, ctx: &mut CompileContext) -> QueryResult<String> {
        match self.kind() {
            // Bound at the point of emission so values line up with placeholders.
            NodeKind::Const(value) => Ok(ctx.bind(value)),
            NodeKind::Raw(sql) => Ok(sql.clone()),
            NodeKind::Label(label) => Ok(ctx.quote(label)),
            NodeKind::Field { table, column, .. } => {
                let alias = ctx.alias_for(table);
                Ok(format!("{}.{}", alias, ctx.quote(column)))
            }
            NodeKind::Function { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| arg.compile_expression(ctx))
                    .collect::<QueryResult<Vec<_>>>()?;
                Ok(format!("{}({})", name, args.join(",")))
            }
            NodeKind::Binary { op, left, right } => {
                let left = left.compile_operand(*op, false, ctx)?;
                let right = right.compile_operand(*op, true, ctx)?;
                Ok(format!("{} {} {}", left, op, right))
            }
            NodeKind::Subquery(select) => Ok(format!("({})", build_select(select, ctx)?)),
            _ => Err(self.unsupported(Role::Expression)),
        }
    }

    /// A binary operand, parenthesized when it binds looser than `parent` or
    /// when both are comparisons.
    fn compile_operand(
        &self,
        parent: Operator,
        right: bool,
        ctx: &mut CompileContext,
    ) -> QueryResult<String> {
        let sql = self.compile_expression(ctx)?;
        let wrap = match self.kind() {
            NodeKind::Binary { op, .. } => {
                op.precedence() < parent.precedence()
                    || (op.is_comparison() && parent.is_comparison())
                    || (right
                        && op.precedence() == parent.precedence()
                        && !(*op == parent && parent.is_associative()))
            }
            _ => false,
        };
        if wrap { Ok(format!("({})", sql)) } else { Ok(sql) }
    }

    /// An ORDER BY item: any expression, or a descending wrapper around one.
    pub(crate) fn compile_ordering(&self, ctx: &mut CompileContext) -> QueryResult<String> {
        match self.kind() {
            NodeKind::Desc(expr) => Ok(format!("{} DESC", expr.compile_expression(ctx)?)),
            _ => self.compile_expression(ctx),
        }
    }

    pub(crate) fn compile_projection(&self, ctx: &mut CompileContext) -> QueryResult<String> {
        match self.kind() {
            NodeKind::Labeled { label, expr } => {
                let expr = expr.compile_expression(ctx)?;
                Ok(format!("{} AS {}", expr, ctx.quote(label)))
            }
            NodeKind::Field { row_key, .. } => {
                let expr = self.compile_expression(ctx)?;
                Ok(format!("{} AS {}", expr, ctx.quote(row_key)))
            }
            _ => Err(self.unsupported(Role::Projection)),
        }
    }

    pub(crate) fn compile_join(&self, ctx: &mut CompileContext) -> QueryResult<String> {
        match self.kind() {
            NodeKind::Join { kind, table, on } => {
                let table = table.compile_table(ctx)?;
                let on = on.compile_expression(ctx)?;
                Ok(format!("{} JOIN {} ON {}", kind, table, on))
            }
            NodeKind::CrossJoin { table } => {
                Ok(format!("CROSS JOIN {}", table.compile_table(ctx)?))
            }
            _ => Err(self.unsupported(Role::Join)),
        }
    }

    pub(crate) fn compile_table(&self, ctx: &mut CompileContext) -> QueryResult<String> {
        match self.kind() {
            NodeKind::Table(schema) => {
                let alias = ctx.alias_for(self);
                Ok(format!("{} AS {}", ctx.quote(&schema.name), alias))
            }
            NodeKind::Subquery(select) => {
                let alias = ctx.alias_for(self);
                Ok(format!("({}) AS {}", build_select(select, ctx)?, alias))
            }
            _ => Err(self.unsupported(Role::Table)),
        }
    }
}
