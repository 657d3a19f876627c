//! Variable reads.

use gdsl_core::Result;

use super::ExprCompiler;
use crate::ast::Ident;
use crate::expr_value::ExprValue;

/// Load the variable's current value. The slot keeps ownership.
pub(super) fn compile_ident(compiler: &mut ExprCompiler<'_, '_>, ident: &Ident<'_>) -> Result<ExprValue> {
    let slot = compiler.state.variables.resolve(ident.name, ident.span)?;
    let (ty, ptr) = (slot.ty, slot.ptr.clone());
    let value = compiler.builder.build_load(ptr)?;
    Ok(ExprValue::borrowed(ty, value))
}
