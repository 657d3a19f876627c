//! Local variable declarations.

use gdsl_core::{CompilationError, Result, builtins};

use super::StmtCompiler;
use crate::ast::VarDeclStmt;

impl<'a, 'm> StmtCompiler<'a, 'm> {
    /// `T name = init;` or `T name;`
    ///
    /// The initializer is generated before the name is declared, so it sees
    /// any outer variable of the same name. Without an initializer the
    /// type's `default_initialize` hook provides the value. The slot is an
    /// entry-block alloca.
    pub fn compile_var_decl(&mut self, decl: &VarDeclStmt<'_>) -> Result<()> {
        let types = self.types;
        let name = decl.name.name;
        let ty = types.resolve_name(decl.ty.name, decl.ty.span)?;
        if ty == builtins::VOID {
            return Err(CompilationError::InvalidOperation {
                message: format!("variable '{name}' cannot have type 'void'"),
                span: decl.ty.span,
            });
        }
        self.state.variables.check_declarable(name, decl.name.span)?;
        let representation = types
            .representation(ty)
            .map_err(|e| e.with_span(decl.ty.span))?;

        let value = match decl.init {
            Some(init) => {
                let what = format!("initializer of '{name}'");
                let mut expr_compiler = self.expr_compiler();
                let value = expr_compiler.check(init, ty, &what)?;
                expr_compiler.materialize(value)?
            }
            None => {
                types
                    .resolve(ty)?
                    .default_initialize(&mut self.hooks())
                    .map_err(|e| e.with_span(decl.span))?
                    .value
            }
        };

        let ptr = self.builder.build_entry_alloca(representation, name)?;
        self.builder.build_store(value, ptr.clone())?;
        self.state
            .variables
            .declare(name, ty, ptr, decl.name.span)
    }
}
