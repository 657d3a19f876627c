//! Statement nodes.

use gdsl_core::Span;

use super::{Expr, Ident, TypeName};

/// A statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Stmt<'ast> {
    /// Expression statement (expr;)
    Expr(ExprStmt<'ast>),
    /// Local variable declaration
    VarDecl(VarDeclStmt<'ast>),
    /// Return statement
    Return(ReturnStmt<'ast>),
    /// Break statement
    Break(BreakStmt),
    /// Continue statement
    Continue(ContinueStmt),
    /// Block statement
    Block(Block<'ast>),
    /// If statement
    If(&'ast IfStmt<'ast>),
    /// While loop
    While(&'ast WhileStmt<'ast>),
}

impl<'ast> Stmt<'ast> {
    /// Get the span of this statement.
    pub fn span(&self) -> Span {
        match self {
            Self::Expr(s) => s.span,
            Self::VarDecl(s) => s.span,
            Self::Return(s) => s.span,
            Self::Break(s) => s.span,
            Self::Continue(s) => s.span,
            Self::Block(s) => s.span,
            Self::If(s) => s.span,
            Self::While(s) => s.span,
        }
    }

    /// Whether this statement unconditionally leaves its block.
    pub fn is_terminator(&self) -> bool {
        matches!(self, Self::Return(_) | Self::Break(_) | Self::Continue(_))
    }
}

/// An expression evaluated for its side effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExprStmt<'ast> {
    /// The expression.
    pub expr: &'ast Expr<'ast>,
    /// Source location.
    pub span: Span,
}

/// `T name;` or `T name = init;`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VarDeclStmt<'ast> {
    /// Declared type.
    pub ty: TypeName<'ast>,
    /// Variable name.
    pub name: Ident<'ast>,
    /// Optional initializer. Without one the type's default initializer runs.
    pub init: Option<&'ast Expr<'ast>>,
    /// Source location.
    pub span: Span,
}

/// `return;` or `return expr;`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnStmt<'ast> {
    /// Optional return value.
    pub value: Option<&'ast Expr<'ast>>,
    /// Source location.
    pub span: Span,
}

/// `break;`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakStmt {
    /// Source location.
    pub span: Span,
}

/// `continue;`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContinueStmt {
    /// Source location.
    pub span: Span,
}

/// `{ stmts }`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Block<'ast> {
    /// Statements in order.
    pub stmts: &'ast [Stmt<'ast>],
    /// Source location.
    pub span: Span,
}

/// `if (condition) then_stmt else else_stmt`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IfStmt<'ast> {
    /// Condition, of type `bool`.
    pub condition: &'ast Expr<'ast>,
    /// Then branch.
    pub then_stmt: &'ast Stmt<'ast>,
    /// Optional else branch.
    pub else_stmt: Option<&'ast Stmt<'ast>>,
    /// Source location.
    pub span: Span,
}

/// `while (condition) body`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhileStmt<'ast> {
    /// Condition, of type `bool`.
    pub condition: &'ast Expr<'ast>,
    /// Loop body.
    pub body: &'ast Stmt<'ast>,
    /// Source location.
    pub span: Span,
}
