use serde::{Deserialize, Serialize};

/// Binary operators joining two expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// Equal (=)
    Eq,
    /// Not equal (<>)
    Ne,
    /// Less than (<)
    Lt,
    /// Less than or equal (<=)
    Le,
    /// Greater than (>)
    Gt,
    /// Greater than or equal (>=)
    Ge,
    /// Logical AND
    And,
    /// Logical OR
    Or,
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Sub,
    /// Multiplication (*)
    Mul,
    /// Division (/)
    Div,
    /// Modulo (%)
    Rem,
    /// IS (for NULL checks)
    Is,
    /// IS NOT
    IsNot,
    /// Pattern match (LIKE)
    Like,
}

impl Operator {
    pub fn sql_symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "<>",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Rem => "%",
            Operator::Is => "IS",
            Operator::IsNot => "IS NOT",
            Operator::Like => "LIKE",
        }
    }
}

impl Operator {
    /// Binding strength; higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            Operator::Or => 1,
            Operator::And => 2,
            Operator::Eq
            | Operator::Ne
            | Operator::Lt
            | Operator::Le
            | Operator::Gt
            | Operator::Ge
            | Operator::Is
            | Operator::IsNot
            | Operator::Like => 3,
            Operator::Add | Operator::Sub => 4,
            Operator::Mul | Operator::Div | Operator::Rem => 5,
        }
    }

    /// Comparison, IS and LIKE operators. These do not chain, so one nested
    /// directly in another always needs parentheses.
    pub fn is_comparison(&self) -> bool {
        self.precedence() == 3
    }

    /// Whether `a op (b op c)` equals `a op b op c`.
    pub fn is_associative(&self) -> bool {
        matches!(
            self,
            Operator::And | Operator::Or | Operator::Add | Operator::Mul
        )
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.sql_symbol())
    }
}
