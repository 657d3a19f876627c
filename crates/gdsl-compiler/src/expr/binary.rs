//! Binary operators.
//!
//! Arithmetic and comparison operators dispatch to the hooks of the left
//! operand's type. `+` and `*` fall back to the right operand's type with the
//! operands swapped, so `2.0 * v` works when only `float3` knows how to scale.
//! `&&` and `||` are lowered here as short-circuit branches.

use gdsl_core::{BinaryOp, CompilationError, Result, builtins};
use gdsl_ir::{Constant, IrError, IrType};
use gdsl_registry::TypedResult;

use super::ExprCompiler;
use crate::ast::BinaryExpr;
use crate::expr_value::ExprValue;

pub(super) fn compile_binary(compiler: &mut ExprCompiler<'_, '_>, binary: &BinaryExpr<'_>) -> Result<ExprValue> {
    if binary.op.is_logical() {
        return compile_logical(compiler, binary);
    }

    let lhs = compiler.compile(binary.left)?;
    let rhs = compiler.compile(binary.right)?;
    let result = apply(compiler, binary.op, &lhs, &rhs).map_err(|e| e.with_span(binary.span))?;
    compiler.release(&lhs)?;
    compiler.release(&rhs)?;
    Ok(result.into())
}

fn apply(compiler: &mut ExprCompiler<'_, '_>, op: BinaryOp, lhs: &ExprValue, rhs: &ExprValue) -> TypedResult {
    let (l, r) = (lhs.typed(), rhs.typed());
    let types = compiler.types;
    let descriptor = types.resolve(lhs.ty)?;
    let first = descriptor.binary_op(&mut compiler.hooks(), op, &l, &r);

    let commutative = matches!(op, BinaryOp::Add | BinaryOp::Mul);
    match first {
        Err(err @ CompilationError::NoOperator { .. }) if commutative && lhs.ty != rhs.ty => {
            let swapped = types.resolve(rhs.ty)?;
            swapped
                .binary_op(&mut compiler.hooks(), op, &r, &l)
                .map_err(|_| err)
        }
        other => other,
    }
}

/// `a && b` / `a || b`:
///
/// ```text
/// entry:  %a = ...
///         br %a, and.rhs, and.end      ; || swaps the targets
/// and.rhs: %b = ...
///         br and.end
/// and.end: phi bool [false, entry], [%b, and.rhs]
/// ```
fn compile_logical(compiler: &mut ExprCompiler<'_, '_>, binary: &BinaryExpr<'_>) -> Result<ExprValue> {
    let is_and = binary.op == BinaryOp::And;
    let lhs = compiler.compile(binary.left)?;
    require_bool(compiler, binary, &lhs)?;

    let func = compiler.current_function()?;
    let lhs_block = compiler
        .builder
        .current_block()
        .ok_or(IrError::NoInsertPoint)?;
    let (rhs_label, end_label) = if is_and {
        ("and.rhs", "and.end")
    } else {
        ("or.rhs", "or.end")
    };
    let rhs_block = compiler.builder.append_block(func, rhs_label)?;
    let end_block = compiler.builder.append_block(func, end_label)?;

    if is_and {
        compiler.builder.build_cond_br(lhs.value, rhs_block, end_block)?;
    } else {
        compiler.builder.build_cond_br(lhs.value, end_block, rhs_block)?;
    }

    compiler.builder.position_at_end(func, rhs_block);
    let rhs = compiler.compile(binary.right)?;
    require_bool(compiler, binary, &rhs)?;
    let rhs_end = compiler
        .builder
        .current_block()
        .ok_or(IrError::NoInsertPoint)?;
    compiler.builder.build_br(end_block)?;

    compiler.builder.position_at_end(func, end_block);
    let short_circuit = Constant::Bool(!is_and).into();
    let value = compiler.builder.build_phi(
        IrType::Bool,
        vec![(short_circuit, lhs_block), (rhs.value, rhs_end)],
    )?;
    Ok(ExprValue::owned(builtins::BOOL, value))
}

fn require_bool(compiler: &ExprCompiler<'_, '_>, binary: &BinaryExpr<'_>, operand: &ExprValue) -> Result<()> {
    if operand.ty == builtins::BOOL {
        return Ok(());
    }
    Err(CompilationError::TypeMismatch {
        message: format!(
            "operands of '{}' must be 'bool', found '{}'",
            binary.op,
            compiler.type_name(operand.ty)
        ),
        span: binary.span,
    })
}
