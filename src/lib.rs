//! # relsql: relational query trees
//!
//! Build SELECT statements as immutable values, then compile them into
//! parameterized SQL. Nothing is ever interpolated: constants become bound
//! placeholders and tables get generated aliases, so self-joins and correlated
//! subqueries compose without collisions.
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use relsql::prelude::*;
//!
//! let user = schema.table("user")?;
//! let post = schema.table("post")?;
//!
//! let q = user
//!     .leftjoin(&post, post.field("user_id")?.eq(user.field("id")?))
//!     .group([user.field("username")?])
//!     .project([user.field("username")?, count_of(post.field("id")?).label("posts")]);
//!
//! let compiled = q.to_sql()?;
//! // => SELECT "t0"."username" AS "username",COUNT("t1"."id") AS "posts"
//! //    FROM "user" AS "t0" LEFT JOIN "post" AS "t1" ON "t1"."user_id" = "t0"."id"
//! //    GROUP BY "t0"."username"
//! ```

pub mod ast;
pub mod config;
pub mod engine;
pub mod error;
pub mod parser;
pub mod schema;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::builders::*;
    pub use crate::ast::*;
    pub use crate::config::Config;
    pub use crate::engine::{Executor, Row};
    pub use crate::error::*;
    pub use crate::schema::{ColumnDef, LinkTable, SchemaProvider, SchemaRegistry, TableSchema};
    pub use crate::transpiler::{CompiledQuery, Dialect, ToSql};
}

/// Compile a statement with the given dialect.
///
/// # Example
///
/// ```
/// use relsql::prelude::*;
///
/// let user = Node::table(&TableSchema::new("user", vec![ColumnDef::plain("id")]));
/// let q = user.project([user.field("id").unwrap()]).filter(user.field("id").unwrap().eq(constant(7)));
/// let compiled = relsql::compile(&q, Dialect::SQLite).unwrap();
/// assert_eq!(compiled.sql, r#"SELECT "t0"."id" AS "id" FROM "user" AS "t0" WHERE "t0"."id" = ?"#);
/// assert_eq!(compiled.values, vec![Value::Int(7)]);
/// ```
pub fn compile(
    select: &ast::Select,
    dialect: transpiler::Dialect,
) -> Result<transpiler::CompiledQuery, error::QueryError> {
    transpiler::ToSql::to_sql_with_dialect(select, dialect)
}
