//! Statement code generation.
//!
//! The [`StmtCompiler`] lowers AST statements into IR basic blocks:
//! - Blocks with scoped locals destroyed on exit
//! - Variable declarations with an initializer or the type's default value
//! - `if`/`else` and `while` with `break`/`continue`
//! - `return` with type checking and cleanup of every live local
//!
//! Statements that follow a terminator in the same block are never emitted;
//! [`UnreachablePolicy`] decides whether that is a warning or an error.

mod block;
mod if_stmt;
mod return_stmt;
mod var_decl;
mod while_stmt;

use gdsl_core::{CompilationError, Diagnostic, Diagnostics, Result};
use gdsl_ir::{FuncId, IrBuilder, IrError};
use gdsl_registry::{HookContext, TypeTable};
use tracing::warn;

use crate::ast::{ExprStmt, Stmt};
use crate::control::ControlFrame;
use crate::expr::ExprCompiler;
use crate::options::{CompilerOptions, UnreachablePolicy};
use crate::state::ParserState;

/// Lowers statements into the function the builder is positioned in.
pub struct StmtCompiler<'a, 'm> {
    state: &'a mut ParserState,
    builder: &'a mut IrBuilder<'m>,
    types: &'a TypeTable,
    options: &'a CompilerOptions,
    /// Sink for warnings about dropped statements
    diagnostics: &'a mut Diagnostics,
}

impl<'a, 'm> StmtCompiler<'a, 'm> {
    pub fn new(
        state: &'a mut ParserState,
        builder: &'a mut IrBuilder<'m>,
        types: &'a TypeTable,
        options: &'a CompilerOptions,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            state,
            builder,
            types,
            options,
            diagnostics,
        }
    }

    /// Compile a statement.
    pub fn compile(&mut self, stmt: &Stmt<'_>) -> Result<()> {
        match stmt {
            Stmt::Expr(expr_stmt) => self.compile_expr_stmt(expr_stmt),
            Stmt::VarDecl(var_decl) => self.compile_var_decl(var_decl),
            Stmt::Return(ret) => self.compile_return(ret),
            Stmt::Break(brk) => self.compile_break(brk),
            Stmt::Continue(cont) => self.compile_continue(cont),
            Stmt::Block(block) => self.compile_block(block),
            Stmt::If(if_stmt) => self.compile_if(if_stmt),
            Stmt::While(while_stmt) => self.compile_while(while_stmt),
        }
    }

    /// Compile a statement list in the current scope.
    ///
    /// Once the current block is terminated the rest of the list is dropped.
    pub fn compile_stmts(&mut self, stmts: &[Stmt<'_>]) -> Result<()> {
        for stmt in stmts {
            if self.builder.is_terminated() {
                return self.unreachable(stmt);
            }
            self.compile(stmt)?;
        }
        Ok(())
    }

    fn unreachable(&mut self, stmt: &Stmt<'_>) -> Result<()> {
        let error = CompilationError::UnreachableCode { span: stmt.span() };
        match self.options.unreachable_code {
            UnreachablePolicy::Error => Err(error),
            UnreachablePolicy::Warn => {
                let function = self
                    .state
                    .control
                    .current_function()
                    .map(|f| f.name.clone());
                warn!(span = %stmt.span(), function = function.as_deref(), "dropping unreachable code");
                let diagnostic = Diagnostic::warning(error);
                self.diagnostics.push(match function {
                    Some(name) => diagnostic.in_function(name),
                    None => diagnostic,
                });
                Ok(())
            }
        }
    }

    /// Compile an expression statement, destroying its temporary result.
    fn compile_expr_stmt(&mut self, expr_stmt: &ExprStmt<'_>) -> Result<()> {
        let mut expr_compiler = self.expr_compiler();
        let value = expr_compiler.compile(expr_stmt.expr)?;
        expr_compiler.release(&value)
    }

    /// Run `f` inside `frame`, popping it whether or not `f` succeeds.
    fn with_frame<T>(
        &mut self,
        frame: ControlFrame,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.state.control.push(frame);
        let result = f(self);
        self.state.control.pop();
        result
    }

    /// Create an expression compiler over the same state.
    fn expr_compiler(&mut self) -> ExprCompiler<'_, 'm> {
        ExprCompiler::new(
            &mut *self.state,
            &mut *self.builder,
            self.types,
            self.options,
        )
    }

    fn hooks(&mut self) -> HookContext<'_, 'm> {
        HookContext::new(&mut *self.builder, self.types)
    }

    fn current_function(&self) -> Result<FuncId> {
        Ok(self
            .builder
            .current_function()
            .ok_or(IrError::NoInsertPoint)?)
    }
}
