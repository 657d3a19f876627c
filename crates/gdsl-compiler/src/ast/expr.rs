//! Expression nodes.

use gdsl_core::{BinaryOp, Span, UnaryOp};

use super::{Ident, TypeName};

/// An expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Expr<'ast> {
    /// Literal value
    Literal(LiteralExpr),
    /// Variable reference
    Ident(Ident<'ast>),
    /// Unary prefix operation
    Unary(&'ast UnaryExpr<'ast>),
    /// Binary operation
    Binary(&'ast BinaryExpr<'ast>),
    /// Assignment to a variable
    Assign(&'ast AssignExpr<'ast>),
    /// Function call
    Call(&'ast CallExpr<'ast>),
    /// Type construction, `T(args)`
    Construct(&'ast ConstructExpr<'ast>),
}

impl<'ast> Expr<'ast> {
    /// Get the span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Self::Literal(e) => e.span,
            Self::Ident(e) => e.span,
            Self::Unary(e) => e.span,
            Self::Binary(e) => e.span,
            Self::Assign(e) => e.span,
            Self::Call(e) => e.span,
            Self::Construct(e) => e.span,
        }
    }
}

/// A literal value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    /// `true` / `false`
    Bool(bool),
    /// Integer literal
    Int(i32),
    /// Float literal
    Float(f32),
}

/// A literal expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiteralExpr {
    /// The value.
    pub value: Literal,
    /// Source location.
    pub span: Span,
}

/// `op operand`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnaryExpr<'ast> {
    /// The operator.
    pub op: UnaryOp,
    /// The operand.
    pub operand: &'ast Expr<'ast>,
    /// Source location.
    pub span: Span,
}

/// `left op right`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinaryExpr<'ast> {
    /// The operator.
    pub op: BinaryOp,
    /// Left operand.
    pub left: &'ast Expr<'ast>,
    /// Right operand.
    pub right: &'ast Expr<'ast>,
    /// Source location.
    pub span: Span,
}

/// `target = value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssignExpr<'ast> {
    /// The variable assigned to.
    pub target: Ident<'ast>,
    /// The new value.
    pub value: &'ast Expr<'ast>,
    /// Source location.
    pub span: Span,
}

/// `callee(args)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallExpr<'ast> {
    /// In-language name of the function.
    pub callee: Ident<'ast>,
    /// Arguments in order.
    pub args: &'ast [Expr<'ast>],
    /// Source location.
    pub span: Span,
}

/// `T(args)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstructExpr<'ast> {
    /// The type constructed.
    pub ty: TypeName<'ast>,
    /// Arguments in order.
    pub args: &'ast [Expr<'ast>],
    /// Source location.
    pub span: Span,
}
