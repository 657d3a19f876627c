//! Return statements.

use gdsl_core::{CompilationError, Result, builtins};

use super::StmtCompiler;
use crate::ast::ReturnStmt;
use crate::lifecycle;

impl<'a, 'm> StmtCompiler<'a, 'm> {
    /// Compile a return statement.
    ///
    /// The value is checked against the innermost function's return type and
    /// materialized (borrowed values are copied) before every live local of
    /// the function is destroyed, innermost first. Then `ret` is emitted.
    pub fn compile_return(&mut self, ret: &ReturnStmt<'_>) -> Result<()> {
        let frame = self
            .state
            .control
            .current_function()
            .cloned()
            .ok_or_else(|| CompilationError::Internal {
                message: "return outside of a function".to_string(),
                span: ret.span,
            })?;
        let returns_void = frame.return_type == builtins::VOID;

        let value = match (ret.value, returns_void) {
            (None, true) => None,
            (None, false) => {
                return Err(CompilationError::TypeMismatch {
                    message: format!(
                        "function '{}' must return a value of type '{}'",
                        frame.name,
                        self.types.name_of(frame.return_type).unwrap_or("?")
                    ),
                    span: ret.span,
                });
            }
            (Some(expr), true) => {
                return Err(CompilationError::TypeMismatch {
                    message: format!("void function '{}' cannot return a value", frame.name),
                    span: expr.span(),
                });
            }
            (Some(expr), false) => {
                let what = format!("return value of '{}'", frame.name);
                let mut expr_compiler = self.expr_compiler();
                let value = expr_compiler.check(expr, frame.return_type, &what)?;
                Some(expr_compiler.materialize(value)?)
            }
        };

        let slots = self.state.variables.live_slots_from(frame.scope_depth);
        lifecycle::destroy_slots(&mut self.hooks(), &slots)?;
        Ok(self.builder.build_ret(value)?)
    }
}
