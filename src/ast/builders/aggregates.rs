//! Aggregate function builders (COUNT, SUM, AVG, etc.)

use super::{func, raw};
use crate::ast::Node;

/// COUNT(*) aggregate
pub fn count() -> Node {
    func("COUNT", [raw("*")])
}

/// COUNT(expr) aggregate
pub fn count_of(expr: impl Into<Node>) -> Node {
    func("COUNT", [expr.into()])
}

/// SUM(expr) aggregate
pub fn sum(expr: impl Into<Node>) -> Node {
    func("SUM", [expr.into()])
}

/// AVG(expr) aggregate
pub fn avg(expr: impl Into<Node>) -> Node {
    func("AVG", [expr.into()])
}

/// MIN(expr) aggregate
pub fn min(expr: impl Into<Node>) -> Node {
    func("MIN", [expr.into()])
}

/// MAX(expr) aggregate
pub fn max(expr: impl Into<Node>) -> Node {
    func("MAX", [expr.into()])
}
