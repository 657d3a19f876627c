//! Operator kinds shared by the AST and the type-descriptor hooks.
//!
//! Each binary or unary operator maps to one capability hook on the type
//! descriptor of its left (or only) operand; see [`BinaryOp::hook_name`].

use std::fmt;

/// Binary operators of the shading language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `&&` (short-circuit, `bool` only)
    And,
    /// `||` (short-circuit, `bool` only)
    Or,
}

impl BinaryOp {
    /// Source-level spelling of the operator.
    pub const fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }

    /// Name of the type-descriptor hook implementing this operator.
    pub const fn hook_name(&self) -> &'static str {
        match self {
            BinaryOp::Add => "op_add",
            BinaryOp::Sub => "op_sub",
            BinaryOp::Mul => "op_mul",
            BinaryOp::Div => "op_div",
            BinaryOp::Eq
            | BinaryOp::Ne
            | BinaryOp::Lt
            | BinaryOp::Le
            | BinaryOp::Gt
            | BinaryOp::Ge => "op_compare",
            BinaryOp::And | BinaryOp::Or => "op_logical",
        }
    }

    /// Whether this is a comparison producing `bool`.
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge
        )
    }

    /// Whether this is a short-circuiting logical operator.
    pub const fn is_logical(&self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    /// Whether this is an arithmetic operator.
    pub const fn is_arithmetic(&self) -> bool {
        matches!(
            self,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div
        )
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// `-x`
    Neg,
    /// `!x`
    Not,
}

impl UnaryOp {
    /// Source-level spelling of the operator.
    pub const fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }

    /// Name of the type-descriptor hook implementing this operator.
    pub const fn hook_name(&self) -> &'static str {
        match self {
            UnaryOp::Neg => "op_neg",
            UnaryOp::Not => "op_not",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
