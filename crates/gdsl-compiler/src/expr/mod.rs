//! Expression code generation.
//!
//! The [`ExprCompiler`] lowers AST expressions to IR in the current block.
//! Operators and construction are delegated to the type descriptor hooks of
//! the operand types; the compiler itself only handles name resolution,
//! calls, assignment, short-circuit logic and value lifetimes.
//!
//! Every expression yields an [`ExprValue`]. Consumers must either store an
//! owned result somewhere (moving it) or [`release`](ExprCompiler::release) it.

mod assignment;
mod binary;
mod calls;
mod identifiers;
mod literals;
mod unary;

use gdsl_core::{CompilationError, Result, Span, TypeHash, builtins};
use gdsl_ir::{FuncId, IrBuilder, IrError, Value};
use gdsl_registry::{HookContext, TypeTable};

use crate::ast::Expr;
use crate::conversion::find_conversion;
use crate::expr_value::ExprValue;
use crate::lifecycle;
use crate::options::CompilerOptions;
use crate::state::ParserState;

/// Lowers expressions into the block the builder is positioned in.
pub struct ExprCompiler<'a, 'm> {
    state: &'a mut ParserState,
    builder: &'a mut IrBuilder<'m>,
    types: &'a TypeTable,
    options: &'a CompilerOptions,
}

impl<'a, 'm> ExprCompiler<'a, 'm> {
    pub fn new(
        state: &'a mut ParserState,
        builder: &'a mut IrBuilder<'m>,
        types: &'a TypeTable,
        options: &'a CompilerOptions,
    ) -> Self {
        Self {
            state,
            builder,
            types,
            options,
        }
    }

    /// Generate `expr` and return its value.
    pub fn compile(&mut self, expr: &Expr<'_>) -> Result<ExprValue> {
        match expr {
            Expr::Literal(lit) => literals::compile_literal(lit),
            Expr::Ident(ident) => identifiers::compile_ident(self, ident),
            Expr::Unary(unary) => unary::compile_unary(self, unary),
            Expr::Binary(binary) => binary::compile_binary(self, binary),
            Expr::Assign(assign) => assignment::compile_assign(self, assign),
            Expr::Call(call) => calls::compile_call(self, call),
            Expr::Construct(construct) => calls::compile_construct(self, construct),
        }
    }

    /// Generate `expr` and convert it to `expected`.
    ///
    /// `what` names the context in the mismatch message, e.g. `initializer of 'x'`.
    pub fn check(&mut self, expr: &Expr<'_>, expected: TypeHash, what: &str) -> Result<ExprValue> {
        let value = self.compile(expr)?;
        self.coerce(value, expected, expr.span(), what)
    }

    /// Generate a branch condition, which must be `bool`.
    pub fn condition(&mut self, expr: &Expr<'_>) -> Result<Value> {
        let value = self.compile(expr)?;
        if value.ty != builtins::BOOL {
            return Err(CompilationError::TypeMismatch {
                message: format!(
                    "condition must be 'bool', found '{}'",
                    self.type_name(value.ty)
                ),
                span: expr.span(),
            });
        }
        Ok(value.value)
    }

    /// Apply the implicit conversion from `value.ty` to `expected`.
    pub fn coerce(
        &mut self,
        value: ExprValue,
        expected: TypeHash,
        span: Span,
        what: &str,
    ) -> Result<ExprValue> {
        match find_conversion(value.ty, expected, self.options) {
            Some(conversion) if conversion.is_exact() => Ok(value),
            Some(conversion) => {
                let converted = conversion.apply(self.builder, value.value)?;
                Ok(ExprValue::owned(expected, converted))
            }
            None => Err(CompilationError::TypeMismatch {
                message: format!(
                    "{what}: expected '{}', found '{}'",
                    self.type_name(expected),
                    self.type_name(value.ty)
                ),
                span,
            }),
        }
    }

    /// Take ownership of an expression result, copying borrowed values.
    pub fn materialize(&mut self, value: ExprValue) -> Result<Value> {
        lifecycle::materialize(&mut self.hooks(), value)
    }

    /// Destroy an owned temporary once it has been consumed.
    pub fn release(&mut self, value: &ExprValue) -> Result<()> {
        lifecycle::release(&mut self.hooks(), value)
    }

    fn release_all(&mut self, values: &[ExprValue]) -> Result<()> {
        values.iter().try_for_each(|v| self.release(v))
    }

    /// Hook context over this compiler's builder.
    pub(crate) fn hooks(&mut self) -> HookContext<'_, 'm> {
        HookContext::new(&mut *self.builder, self.types)
    }

    fn type_name(&self, ty: TypeHash) -> String {
        self.types.name_of(ty).unwrap_or("?").to_string()
    }

    fn current_function(&self) -> Result<FuncId> {
        Ok(self
            .builder
            .current_function()
            .ok_or(IrError::NoInsertPoint)?)
    }
}
