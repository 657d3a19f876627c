//! `dfunc`: a distribution (reflectance) function object.
//!
//! Distributions live in the renderer. Generated code holds a pointer to one and
//! drives its lifetime through runtime intrinsics: every value is created,
//! copied or combined by the runtime and must eventually be destroyed exactly
//! once.

use gdsl_core::{BinaryOp, CompilationError, Result, Span, TypeHash, builtins};
use gdsl_ir::{IrType, Value};
use tracing::trace;

use crate::{HookContext, TypeCapabilities, TypeDescriptor, TypedResult, TypedValue};

/// Runtime intrinsic symbols.
pub mod intrinsics {
    /// `dfunc* (shader*, context*)`
    pub const CREATE: &str = "gd_builtin_dfunc_create";
    /// `dfunc* ()`
    pub const EMPTY: &str = "gd_builtin_dfunc_empty";
    /// `dfunc* (dfunc*)`
    pub const COPY: &str = "gd_builtin_dfunc_copy";
    /// `void (dfunc*)`
    pub const DESTROY: &str = "gd_builtin_dfunc_destroy";
    /// `dfunc* (dfunc*, dfunc*)`
    pub const ADD: &str = "gd_builtin_dfunc_add";
    /// `dfunc* (dfunc*, float)`
    pub const SCALE: &str = "gd_builtin_dfunc_scale";
}

fn dfunc_ptr() -> IrType {
    IrType::opaque_ptr("dfunc")
}

/// `dfunc`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DFuncType;

impl DFuncType {
    fn typed(value: Value) -> TypedValue {
        TypedValue::new(builtins::DFUNC, value)
    }
}

impl TypeDescriptor for DFuncType {
    fn name(&self) -> &str {
        "dfunc"
    }

    fn mangle(&self) -> &str {
        "df"
    }

    fn type_hash(&self) -> TypeHash {
        builtins::DFUNC
    }

    fn representation(&self) -> Option<IrType> {
        Some(dfunc_ptr())
    }

    fn capabilities(&self) -> TypeCapabilities {
        TypeCapabilities::CONSTRUCT
            | TypeCapabilities::DEFAULT_INIT
            | TypeCapabilities::LIFECYCLE
            | TypeCapabilities::ARITHMETIC
    }

    /// `dfunc(shader, context)` instantiates a shader's distribution.
    fn construct(&self, cx: &mut HookContext<'_, '_>, args: &[TypedValue]) -> TypedResult {
        let [shader, context] = args else {
            return Err(CompilationError::TypeMismatch {
                message: format!(
                    "dfunc expects (shader_handle, context_ptr), got {} argument(s)",
                    args.len()
                ),
                span: Span::default(),
            });
        };
        if shader.ty != builtins::SHADER_HANDLE || context.ty != builtins::CONTEXT_PTR {
            return Err(CompilationError::TypeMismatch {
                message: format!(
                    "dfunc expects (shader_handle, context_ptr), got ({}, {})",
                    cx.type_name(shader.ty),
                    cx.type_name(context.ty)
                ),
                span: Span::default(),
            });
        }
        let params = vec![
            cx.representation(builtins::SHADER_HANDLE)?,
            cx.representation(builtins::CONTEXT_PTR)?,
        ];
        let value = cx.call_intrinsic(
            intrinsics::CREATE,
            params,
            dfunc_ptr(),
            vec![shader.value.clone(), context.value.clone()],
        )?;
        Ok(Self::typed(value))
    }

    /// An empty distribution, so every `dfunc` variable always owns a live object.
    fn default_initialize(&self, cx: &mut HookContext<'_, '_>) -> TypedResult {
        let value = cx.call_intrinsic(intrinsics::EMPTY, vec![], dfunc_ptr(), vec![])?;
        Ok(Self::typed(value))
    }

    fn copy(&self, cx: &mut HookContext<'_, '_>, value: Value) -> Result<Value> {
        trace!("dfunc copy");
        cx.call_intrinsic(intrinsics::COPY, vec![dfunc_ptr()], dfunc_ptr(), vec![value])
    }

    fn destroy(&self, cx: &mut HookContext<'_, '_>, value: Value) -> Result<()> {
        trace!("dfunc destroy");
        cx.call_intrinsic(intrinsics::DESTROY, vec![dfunc_ptr()], IrType::Void, vec![value])?;
        Ok(())
    }

    /// Sum of two distributions. Operands are borrowed; the result is new.
    fn op_add(&self, cx: &mut HookContext<'_, '_>, lhs: &TypedValue, rhs: &TypedValue) -> TypedResult {
        if rhs.ty != builtins::DFUNC {
            return Err(cx.no_operator(BinaryOp::Add, lhs, rhs));
        }
        let value = cx.call_intrinsic(
            intrinsics::ADD,
            vec![dfunc_ptr(), dfunc_ptr()],
            dfunc_ptr(),
            vec![lhs.value.clone(), rhs.value.clone()],
        )?;
        Ok(Self::typed(value))
    }

    /// A distribution scaled by a numeric weight.
    fn op_mul(&self, cx: &mut HookContext<'_, '_>, lhs: &TypedValue, rhs: &TypedValue) -> TypedResult {
        let Some(weight) = cx.to_float(rhs)? else {
            return Err(cx.no_operator(BinaryOp::Mul, lhs, rhs));
        };
        let value = cx.call_intrinsic(
            intrinsics::SCALE,
            vec![dfunc_ptr(), IrType::F32],
            dfunc_ptr(),
            vec![lhs.value.clone(), weight],
        )?;
        Ok(Self::typed(value))
    }
}
