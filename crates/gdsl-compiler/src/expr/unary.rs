//! Unary operators.

use gdsl_core::Result;

use super::ExprCompiler;
use crate::ast::UnaryExpr;
use crate::expr_value::ExprValue;

/// Dispatch to the operand type's `op_neg` / `op_not` hook.
pub(super) fn compile_unary(compiler: &mut ExprCompiler<'_, '_>, unary: &UnaryExpr<'_>) -> Result<ExprValue> {
    let operand = compiler.compile(unary.operand)?;
    let types = compiler.types;
    let descriptor = types.resolve(operand.ty)?;
    let result = descriptor
        .unary_op(&mut compiler.hooks(), unary.op, &operand.typed())
        .map_err(|e| e.with_span(unary.span))?;
    compiler.release(&operand)?;
    Ok(result.into())
}
