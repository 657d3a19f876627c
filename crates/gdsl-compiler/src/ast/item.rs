//! Top-level declarations.

use gdsl_core::Span;

use super::{Block, Ident, TypeName};

/// One declared argument of a prototype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArgDecl<'ast> {
    /// Argument name.
    pub name: Ident<'ast>,
    /// Argument type.
    pub ty: TypeName<'ast>,
    /// Source location.
    pub span: Span,
}

/// A function signature, possibly external.
///
/// ```text
/// float add(float x, float y);
/// extern "gd_builtin_normalize" float3 normalize(float3 v);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrototypeDecl<'ast> {
    /// In-language name.
    pub name: Ident<'ast>,
    /// Linkage name for functions implemented outside the module.
    pub extern_name: Option<&'ast str>,
    /// Return type.
    pub return_type: TypeName<'ast>,
    /// Arguments in order.
    pub args: &'ast [ArgDecl<'ast>],
    /// Source location.
    pub span: Span,
}

/// A prototype with a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FunctionDecl<'ast> {
    /// The signature.
    pub prototype: &'ast PrototypeDecl<'ast>,
    /// The body.
    pub body: Block<'ast>,
    /// Source location.
    pub span: Span,
}

/// A top-level item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Item<'ast> {
    /// Forward or external declaration.
    Prototype(&'ast PrototypeDecl<'ast>),
    /// Function definition.
    Function(&'ast FunctionDecl<'ast>),
}

impl<'ast> Item<'ast> {
    /// In-language name of the declared function.
    pub fn name(&self) -> &'ast str {
        match self {
            Item::Prototype(p) => p.name.name,
            Item::Function(f) => f.prototype.name.name,
        }
    }

    /// Source location.
    pub fn span(&self) -> Span {
        match self {
            Item::Prototype(p) => p.span,
            Item::Function(f) => f.span,
        }
    }
}

/// A compilation unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit<'ast> {
    /// Items in source order.
    pub items: &'ast [Item<'ast>],
}
