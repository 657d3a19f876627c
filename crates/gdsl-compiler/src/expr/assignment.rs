//! Assignment to a variable.

use gdsl_core::Result;

use super::ExprCompiler;
use crate::ast::AssignExpr;
use crate::expr_value::ExprValue;
use crate::lifecycle;

/// `x = value`
///
/// The new value is produced (and copied, if borrowed) before the old one is
/// destroyed, so `x = x` keeps a live value. The expression result is the
/// stored value, borrowed from the slot.
pub(super) fn compile_assign(compiler: &mut ExprCompiler<'_, '_>, assign: &AssignExpr<'_>) -> Result<ExprValue> {
    let slot = compiler
        .state
        .variables
        .resolve(assign.target.name, assign.target.span)?
        .clone();

    let value = compiler.compile(assign.value)?;
    let what = format!("assignment to '{}'", slot.name);
    let value = compiler.coerce(value, slot.ty, assign.value.span(), &what)?;
    let new = compiler.materialize(value)?;

    let mut cx = compiler.hooks();
    if lifecycle::needs_destroy(&cx, slot.ty)? {
        let old = cx.builder().build_load(slot.ptr.clone())?;
        lifecycle::destroy_value(&mut cx, slot.ty, old)?;
    }
    cx.builder().build_store(new.clone(), slot.ptr)?;

    Ok(ExprValue::borrowed(slot.ty, new))
}
