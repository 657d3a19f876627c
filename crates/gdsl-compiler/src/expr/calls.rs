//! Function calls and type construction.

use gdsl_core::Result;
use gdsl_registry::TypedValue;
use tracing::trace;

use super::ExprCompiler;
use crate::ast::{CallExpr, ConstructExpr, Expr};
use crate::expr_value::ExprValue;
use crate::overload::resolve_overload;

fn compile_args(compiler: &mut ExprCompiler<'_, '_>, args: &[Expr<'_>]) -> Result<Vec<ExprValue>> {
    args.iter().map(|arg| compiler.compile(arg)).collect()
}

/// `f(args)`: resolve the overload, convert the arguments and emit one call.
///
/// Arguments are passed borrowed; owned temporaries are destroyed after the
/// call returns. The result is owned by the caller.
pub(super) fn compile_call(compiler: &mut ExprCompiler<'_, '_>, call: &CallExpr<'_>) -> Result<ExprValue> {
    let args = compile_args(compiler, call.args)?;
    let arg_types: Vec<_> = args.iter().map(|a| a.ty).collect();

    let matched = resolve_overload(
        &compiler.state.functions,
        compiler.types,
        call.callee.name,
        &arg_types,
        compiler.options,
        call.span,
    )?;
    let entry = compiler.state.functions.entry(matched.entry)?;
    let (func, return_type) = (entry.func, entry.prototype.return_type());
    trace!(callee = call.callee.name, cost = matched.total_cost, "resolved call");

    let mut operands = Vec::with_capacity(args.len());
    for (arg, conversion) in args.iter().zip(&matched.conversions) {
        operands.push(conversion.apply(compiler.builder, arg.value.clone())?);
    }
    let value = compiler.builder.build_call(func, operands)?;

    compiler.release_all(&args)?;
    Ok(ExprValue::owned(return_type, value))
}

/// `T(args)` through the type's `construct` hook.
pub(super) fn compile_construct(
    compiler: &mut ExprCompiler<'_, '_>,
    construct: &ConstructExpr<'_>,
) -> Result<ExprValue> {
    let types = compiler.types;
    let ty = types.resolve_name(construct.ty.name, construct.ty.span)?;
    let args = compile_args(compiler, construct.args)?;
    let typed: Vec<TypedValue> = args.iter().map(ExprValue::typed).collect();

    let descriptor = types.resolve(ty)?;
    let result = descriptor
        .construct(&mut compiler.hooks(), &typed)
        .map_err(|e| e.with_span(construct.span))?;

    compiler.release_all(&args)?;
    Ok(result.into())
}
