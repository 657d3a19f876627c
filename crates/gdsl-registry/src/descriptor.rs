//! The type descriptor trait.
//!
//! Each hook has a default: construction and operators fail with a type error,
//! default initialization produces the zero value of the representation, copy
//! is a plain value copy, and destroy does nothing. Concrete types override only
//! what they support and advertise it through [`TypeDescriptor::capabilities`].

use std::fmt;

use gdsl_core::{BinaryOp, CompilationError, Result, Span, TypeHash, UnaryOp};
use gdsl_ir::{Constant, IrType, Value};

use crate::{HookContext, TypeCapabilities, TypedResult, TypedValue};

/// A language type: identity, IR representation and code generation hooks.
pub trait TypeDescriptor: fmt::Debug {
    /// Canonical name, e.g. `float3`.
    fn name(&self) -> &str;

    /// Short token used in mangled function names, e.g. `f3`.
    fn mangle(&self) -> &str;

    /// Identity hash, derived from the name.
    fn type_hash(&self) -> TypeHash {
        TypeHash::from_name(self.name())
    }

    /// IR type of values of this type. `None` for compile-time marker types.
    fn representation(&self) -> Option<IrType>;

    /// Hooks this type implements.
    fn capabilities(&self) -> TypeCapabilities {
        TypeCapabilities::empty()
    }

    /// `T(args)`.
    fn construct(&self, _cx: &mut HookContext<'_, '_>, _args: &[TypedValue]) -> TypedResult {
        Err(CompilationError::NotConstructible {
            name: self.name().to_string(),
            span: Span::default(),
        })
    }

    /// Value of a declared but uninitialized variable.
    fn default_initialize(&self, _cx: &mut HookContext<'_, '_>) -> TypedResult {
        let Some(ty) = self.representation() else {
            return Err(CompilationError::NoRepresentation {
                name: self.name().to_string(),
                span: Span::default(),
            });
        };
        let zero = if ty.is_pointer() {
            Constant::Null(ty)
        } else {
            Constant::Zero(ty)
        };
        Ok(TypedValue::new(self.type_hash(), zero.into()))
    }

    /// Produce an independent copy of `value`.
    fn copy(&self, _cx: &mut HookContext<'_, '_>, value: Value) -> Result<Value> {
        Ok(value)
    }

    /// Release whatever `value` owns.
    fn destroy(&self, _cx: &mut HookContext<'_, '_>, _value: Value) -> Result<()> {
        Ok(())
    }

    /// `lhs + rhs`, with `lhs` of this type.
    fn op_add(
        &self,
        cx: &mut HookContext<'_, '_>,
        lhs: &TypedValue,
        rhs: &TypedValue,
    ) -> TypedResult {
        Err(cx.no_operator(BinaryOp::Add, lhs, rhs))
    }

    /// `lhs - rhs`.
    fn op_sub(
        &self,
        cx: &mut HookContext<'_, '_>,
        lhs: &TypedValue,
        rhs: &TypedValue,
    ) -> TypedResult {
        Err(cx.no_operator(BinaryOp::Sub, lhs, rhs))
    }

    /// `lhs * rhs`.
    fn op_mul(
        &self,
        cx: &mut HookContext<'_, '_>,
        lhs: &TypedValue,
        rhs: &TypedValue,
    ) -> TypedResult {
        Err(cx.no_operator(BinaryOp::Mul, lhs, rhs))
    }

    /// `lhs / rhs`.
    fn op_div(
        &self,
        cx: &mut HookContext<'_, '_>,
        lhs: &TypedValue,
        rhs: &TypedValue,
    ) -> TypedResult {
        Err(cx.no_operator(BinaryOp::Div, lhs, rhs))
    }

    /// Comparison operators (`op.is_comparison()`), producing `bool`.
    fn op_compare(
        &self,
        cx: &mut HookContext<'_, '_>,
        op: BinaryOp,
        lhs: &TypedValue,
        rhs: &TypedValue,
    ) -> TypedResult {
        Err(cx.no_operator(op, lhs, rhs))
    }

    /// Dispatch a binary operator to the matching hook.
    ///
    /// `&&` and `||` are lowered by the code generator and never reach here.
    fn binary_op(
        &self,
        cx: &mut HookContext<'_, '_>,
        op: BinaryOp,
        lhs: &TypedValue,
        rhs: &TypedValue,
    ) -> TypedResult {
        match op {
            BinaryOp::Add => self.op_add(cx, lhs, rhs),
            BinaryOp::Sub => self.op_sub(cx, lhs, rhs),
            BinaryOp::Mul => self.op_mul(cx, lhs, rhs),
            BinaryOp::Div => self.op_div(cx, lhs, rhs),
            op if op.is_comparison() => self.op_compare(cx, op, lhs, rhs),
            op => Err(cx.no_operator(op, lhs, rhs)),
        }
    }

    /// `-operand`.
    fn op_neg(&self, cx: &mut HookContext<'_, '_>, operand: &TypedValue) -> TypedResult {
        Err(cx.no_unary_operator(UnaryOp::Neg, operand))
    }

    /// `!operand`.
    fn op_not(&self, cx: &mut HookContext<'_, '_>, operand: &TypedValue) -> TypedResult {
        Err(cx.no_unary_operator(UnaryOp::Not, operand))
    }

    /// Dispatch a unary operator to the matching hook.
    fn unary_op(
        &self,
        cx: &mut HookContext<'_, '_>,
        op: UnaryOp,
        operand: &TypedValue,
    ) -> TypedResult {
        match op {
            UnaryOp::Neg => self.op_neg(cx, operand),
            UnaryOp::Not => self.op_not(cx, operand),
        }
    }
}
