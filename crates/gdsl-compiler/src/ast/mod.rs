//! AST consumed by the code generator.
//!
//! Nodes are small `Copy` values that borrow their children from an arena
//! (`&'ast` references and slices), the way a parser backed by
//! [`bumpalo::Bump`] produces them. Type names are kept as written and resolved
//! against the type table during code generation.
//!
//! [`AstBuilder`] allocates nodes in a `Bump` for front ends and tests.

mod builder;
mod expr;
mod item;
mod stmt;

pub use builder::AstBuilder;
pub use expr::{
    AssignExpr, BinaryExpr, CallExpr, ConstructExpr, Expr, Literal, LiteralExpr, UnaryExpr,
};
pub use item::{ArgDecl, FunctionDecl, Item, PrototypeDecl, Unit};
pub use stmt::{
    Block, BreakStmt, ContinueStmt, ExprStmt, IfStmt, ReturnStmt, Stmt, VarDeclStmt, WhileStmt,
};

use gdsl_core::Span;

/// A name as written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ident<'ast> {
    /// The name.
    pub name: &'ast str,
    /// Source location.
    pub span: Span,
}

impl<'ast> Ident<'ast> {
    /// Create an identifier.
    pub fn new(name: &'ast str, span: Span) -> Self {
        Self { name, span }
    }
}

/// A type as written in the source, e.g. `float3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeName<'ast> {
    /// Canonical type name.
    pub name: &'ast str,
    /// Source location.
    pub span: Span,
}

impl<'ast> TypeName<'ast> {
    /// Create a type name.
    pub fn new(name: &'ast str, span: Span) -> Self {
        Self { name, span }
    }
}
