//! Object lifetime: copying, destroying and moving values of types with
//! lifecycle hooks.
//!
//! Only types that advertise [`TypeCapabilities::COPY`] or
//! [`TypeCapabilities::DESTROY`] have their hooks invoked; every other type
//! is copied and dropped as a plain IR value.

use gdsl_core::{Result, TypeHash};
use gdsl_ir::Value;
use gdsl_registry::{HookContext, TypeCapabilities};
use tracing::trace;

use crate::expr_value::ExprValue;
use crate::symbols::VariableSlot;

/// Copy `value` through the type's copy hook, if it has one.
pub fn copy_value(cx: &mut HookContext<'_, '_>, ty: TypeHash, value: Value) -> Result<Value> {
    let descriptor = cx.types().resolve(ty)?;
    if !descriptor.capabilities().contains(TypeCapabilities::COPY) {
        return Ok(value);
    }
    trace!(ty = descriptor.name(), "copy");
    descriptor.copy(cx, value)
}

/// Destroy `value` through the type's destroy hook, if it has one.
pub fn destroy_value(cx: &mut HookContext<'_, '_>, ty: TypeHash, value: Value) -> Result<()> {
    let descriptor = cx.types().resolve(ty)?;
    if !descriptor.capabilities().contains(TypeCapabilities::DESTROY) {
        return Ok(());
    }
    trace!(ty = descriptor.name(), "destroy");
    descriptor.destroy(cx, value)
}

/// Whether values of `ty` need explicit destruction.
pub fn needs_destroy(cx: &HookContext<'_, '_>, ty: TypeHash) -> Result<bool> {
    Ok(cx
        .types()
        .resolve(ty)?
        .capabilities()
        .contains(TypeCapabilities::DESTROY))
}

/// Turn an expression result into a value the consumer owns.
///
/// Owned temporaries are moved; borrowed variable reads are copied.
pub fn materialize(cx: &mut HookContext<'_, '_>, value: ExprValue) -> Result<Value> {
    if value.is_owned() {
        Ok(value.value)
    } else {
        copy_value(cx, value.ty, value.value)
    }
}

/// Destroy an expression result if it is an owned temporary.
pub fn release(cx: &mut HookContext<'_, '_>, value: &ExprValue) -> Result<()> {
    if value.is_owned() && !value.value.is_void() {
        destroy_value(cx, value.ty, value.value.clone())?;
    }
    Ok(())
}

/// Destroy the values held by `slots`, last declared first.
pub fn destroy_slots(cx: &mut HookContext<'_, '_>, slots: &[VariableSlot]) -> Result<()> {
    for slot in slots.iter().rev() {
        if !needs_destroy(cx, slot.ty)? {
            continue;
        }
        let value = cx.builder().build_load(slot.ptr.clone())?;
        destroy_value(cx, slot.ty, value)?;
    }
    Ok(())
}
