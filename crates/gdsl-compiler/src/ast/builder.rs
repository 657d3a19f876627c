//! Arena-backed AST construction.

use std::cell::Cell;

use bumpalo::Bump;
use gdsl_core::{BinaryOp, Span, UnaryOp};

use super::*;

/// Allocates AST nodes in a [`Bump`] arena.
///
/// Every node gets a distinct synthetic span (line `n`, column 1), so
/// diagnostics can be traced back to the node that caused them.
///
/// ```
/// use bumpalo::Bump;
/// use gdsl_compiler::ast::AstBuilder;
///
/// let arena = Bump::new();
/// let ast = AstBuilder::new(&arena);
/// let sum = ast.binary(gdsl_core::BinaryOp::Add, ast.var("a"), ast.var("b"));
/// let body = [ast.ret(Some(sum))];
/// let f = ast.function(
///     ast.prototype("add", "float", &[ast.arg("a", "float"), ast.arg("b", "float")]),
///     &body,
/// );
/// assert_eq!(f.prototype.args.len(), 2);
/// ```
pub struct AstBuilder<'ast> {
    arena: &'ast Bump,
    line: Cell<u32>,
}

impl<'ast> AstBuilder<'ast> {
    /// Create a builder over an arena.
    pub fn new(arena: &'ast Bump) -> Self {
        Self {
            arena,
            line: Cell::new(0),
        }
    }

    /// The next synthetic span.
    pub fn span(&self) -> Span {
        let line = self.line.get() + 1;
        self.line.set(line);
        Span::new(line, 1, 1)
    }

    fn str(&self, s: &str) -> &'ast str {
        self.arena.alloc_str(s)
    }

    fn exprs(&self, args: &[&'ast Expr<'ast>]) -> &'ast [Expr<'ast>] {
        self.arena.alloc_slice_fill_iter(args.iter().map(|e| **e))
    }

    // ==========================================================================
    // Names
    // ==========================================================================

    /// An identifier.
    pub fn ident(&self, name: &str) -> Ident<'ast> {
        Ident::new(self.str(name), self.span())
    }

    /// A type name.
    pub fn ty(&self, name: &str) -> TypeName<'ast> {
        TypeName::new(self.str(name), self.span())
    }

    // ==========================================================================
    // Expressions
    // ==========================================================================

    fn literal(&self, value: Literal) -> &'ast Expr<'ast> {
        self.arena.alloc(Expr::Literal(LiteralExpr {
            value,
            span: self.span(),
        }))
    }

    /// `true` / `false`
    pub fn bool(&self, value: bool) -> &'ast Expr<'ast> {
        self.literal(Literal::Bool(value))
    }

    /// Integer literal.
    pub fn int(&self, value: i32) -> &'ast Expr<'ast> {
        self.literal(Literal::Int(value))
    }

    /// Float literal.
    pub fn float(&self, value: f32) -> &'ast Expr<'ast> {
        self.literal(Literal::Float(value))
    }

    /// Variable reference.
    pub fn var(&self, name: &str) -> &'ast Expr<'ast> {
        self.arena.alloc(Expr::Ident(self.ident(name)))
    }

    /// `op operand`
    pub fn unary(&self, op: UnaryOp, operand: &'ast Expr<'ast>) -> &'ast Expr<'ast> {
        let node = self.arena.alloc(UnaryExpr {
            op,
            operand,
            span: self.span(),
        });
        self.arena.alloc(Expr::Unary(node))
    }

    /// `left op right`
    pub fn binary(
        &self,
        op: BinaryOp,
        left: &'ast Expr<'ast>,
        right: &'ast Expr<'ast>,
    ) -> &'ast Expr<'ast> {
        let node = self.arena.alloc(BinaryExpr {
            op,
            left,
            right,
            span: self.span(),
        });
        self.arena.alloc(Expr::Binary(node))
    }

    /// `target = value`
    pub fn assign(&self, target: &str, value: &'ast Expr<'ast>) -> &'ast Expr<'ast> {
        let node = self.arena.alloc(AssignExpr {
            target: self.ident(target),
            value,
            span: self.span(),
        });
        self.arena.alloc(Expr::Assign(node))
    }

    /// `callee(args)`
    pub fn call(&self, callee: &str, args: &[&'ast Expr<'ast>]) -> &'ast Expr<'ast> {
        let node = self.arena.alloc(CallExpr {
            callee: self.ident(callee),
            args: self.exprs(args),
            span: self.span(),
        });
        self.arena.alloc(Expr::Call(node))
    }

    /// `T(args)`
    pub fn construct(&self, ty: &str, args: &[&'ast Expr<'ast>]) -> &'ast Expr<'ast> {
        let node = self.arena.alloc(ConstructExpr {
            ty: self.ty(ty),
            args: self.exprs(args),
            span: self.span(),
        });
        self.arena.alloc(Expr::Construct(node))
    }

    // ==========================================================================
    // Statements
    // ==========================================================================

    /// `expr;`
    pub fn expr_stmt(&self, expr: &'ast Expr<'ast>) -> Stmt<'ast> {
        Stmt::Expr(ExprStmt {
            expr,
            span: self.span(),
        })
    }

    /// `T name = init;` / `T name;`
    pub fn decl(&self, ty: &str, name: &str, init: Option<&'ast Expr<'ast>>) -> Stmt<'ast> {
        Stmt::VarDecl(VarDeclStmt {
            ty: self.ty(ty),
            name: self.ident(name),
            init,
            span: self.span(),
        })
    }

    /// `return value;`
    pub fn ret(&self, value: Option<&'ast Expr<'ast>>) -> Stmt<'ast> {
        Stmt::Return(ReturnStmt {
            value,
            span: self.span(),
        })
    }

    /// `break;`
    pub fn brk(&self) -> Stmt<'ast> {
        Stmt::Break(BreakStmt { span: self.span() })
    }

    /// `continue;`
    pub fn cont(&self) -> Stmt<'ast> {
        Stmt::Continue(ContinueStmt { span: self.span() })
    }

    /// `{ stmts }`
    pub fn block(&self, stmts: &[Stmt<'ast>]) -> Stmt<'ast> {
        Stmt::Block(Block {
            stmts: self.arena.alloc_slice_copy(stmts),
            span: self.span(),
        })
    }

    /// `if (condition) then_stmt else else_stmt`
    pub fn if_else(
        &self,
        condition: &'ast Expr<'ast>,
        then_stmt: Stmt<'ast>,
        else_stmt: Option<Stmt<'ast>>,
    ) -> Stmt<'ast> {
        let node = self.arena.alloc(IfStmt {
            condition,
            then_stmt: self.arena.alloc(then_stmt),
            else_stmt: else_stmt.map(|s| &*self.arena.alloc(s)),
            span: self.span(),
        });
        Stmt::If(node)
    }

    /// `while (condition) body`
    pub fn while_loop(&self, condition: &'ast Expr<'ast>, body: Stmt<'ast>) -> Stmt<'ast> {
        let node = self.arena.alloc(WhileStmt {
            condition,
            body: self.arena.alloc(body),
            span: self.span(),
        });
        Stmt::While(node)
    }

    // ==========================================================================
    // Items
    // ==========================================================================

    /// `name: ty` argument.
    pub fn arg(&self, name: &str, ty: &str) -> ArgDecl<'ast> {
        ArgDecl {
            name: self.ident(name),
            ty: self.ty(ty),
            span: self.span(),
        }
    }

    /// A locally defined prototype.
    pub fn prototype(
        &self,
        name: &str,
        return_type: &str,
        args: &[ArgDecl<'ast>],
    ) -> &'ast PrototypeDecl<'ast> {
        self.arena.alloc(PrototypeDecl {
            name: self.ident(name),
            extern_name: None,
            return_type: self.ty(return_type),
            args: self.arena.alloc_slice_copy(args),
            span: self.span(),
        })
    }

    /// An external prototype linked as `extern_name`.
    pub fn external(
        &self,
        name: &str,
        extern_name: &str,
        return_type: &str,
        args: &[ArgDecl<'ast>],
    ) -> &'ast PrototypeDecl<'ast> {
        self.arena.alloc(PrototypeDecl {
            name: self.ident(name),
            extern_name: Some(self.str(extern_name)),
            return_type: self.ty(return_type),
            args: self.arena.alloc_slice_copy(args),
            span: self.span(),
        })
    }

    /// A function definition.
    pub fn function(
        &self,
        prototype: &'ast PrototypeDecl<'ast>,
        body: &[Stmt<'ast>],
    ) -> &'ast FunctionDecl<'ast> {
        self.arena.alloc(FunctionDecl {
            prototype,
            body: Block {
                stmts: self.arena.alloc_slice_copy(body),
                span: self.span(),
            },
            span: prototype.span,
        })
    }

    /// A compilation unit.
    pub fn unit(&self, items: &[Item<'ast>]) -> Unit<'ast> {
        Unit {
            items: self.arena.alloc_slice_copy(items),
        }
    }
}
