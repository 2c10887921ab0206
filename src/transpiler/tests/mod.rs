//! Transpiler test modules.
//!
//! Tests are organized by category:
//! - `core`: statement assembly, aliasing and parameter order
//! - `capability`: nodes compiled in roles they do not support
//! - `dialects`: quoting and placeholder styles


use crate::ast::Node;
use crate::schema::{ColumnDef, LinkTable, TableSchema};

pub(super) fn user() -> Node {
    Node::table(&TableSchema::new(
        "user",
        vec![ColumnDef::plain("id"), ColumnDef::plain("username")],
    ))
}

pub(super) fn post() -> Node {
    Node::table(&TableSchema::new(
        "post",
        vec![
            ColumnDef::plain("id"),
            ColumnDef::plain("title"),
            ColumnDef::new("user", "user_id"),
        ],
    ))
}

pub(super) fn model1() -> Node {
    Node::table(&TableSchema::new(
        "model1",
        vec![ColumnDef::plain("id"), ColumnDef::plain("a"), ColumnDef::plain("b")],
    ))
}

pub(super) fn model2() -> Node {
    Node::table(&TableSchema::new(
        "model2",
        vec![
            ColumnDef::plain("id"),
            ColumnDef::plain("c"),
            ColumnDef::new("m1", "m1_id"),
        ],
    ))
}

pub(super) fn tagged() -> Node {
    Node::table(&TableSchema::new(
        "tagged",
        vec![ColumnDef::plain("id"), ColumnDef::plain("a")],
    ))
}

pub(super) fn tagged_link() -> Node {
    Node::table(&LinkTable::new(
        "tagged_m2s",
        ColumnDef::new("tagged", "tagged_id"),
        ColumnDef::new("model2", "model2_id"),
    ))
}

/// Shorthand for an infallible field lookup in tests.
pub(super) fn f(table: &Node, name: &str) -> Node {
    table.field(name).unwrap()
}
