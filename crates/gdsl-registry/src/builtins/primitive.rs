//! `void`, `bool`, `int` and `float`.
//!
//! Mixed `int`/`float` arithmetic and comparison promote the `int` operand to
//! `float`, whichever side it is on.

use gdsl_core::{BinaryOp, CompilationError, Span, builtins};
use gdsl_ir::{ArithOp, CmpPred, IrType};

use crate::{HookContext, TypeCapabilities, TypeDescriptor, TypedResult, TypedValue};

/// `void`: the absence of a value.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidType;

impl TypeDescriptor for VoidType {
    fn name(&self) -> &str {
        "void"
    }

    fn mangle(&self) -> &str {
        "v"
    }

    fn representation(&self) -> Option<IrType> {
        Some(IrType::Void)
    }

    fn default_initialize(&self, _cx: &mut HookContext<'_, '_>) -> TypedResult {
        Err(CompilationError::InvalidOperation {
            message: "cannot declare a value of type 'void'".to_string(),
            span: Span::default(),
        })
    }
}

/// `bool`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolType;

impl TypeDescriptor for BoolType {
    fn name(&self) -> &str {
        "bool"
    }

    fn mangle(&self) -> &str {
        "b"
    }

    fn representation(&self) -> Option<IrType> {
        Some(IrType::Bool)
    }

    fn capabilities(&self) -> TypeCapabilities {
        TypeCapabilities::COMPARE
    }

    fn op_compare(
        &self,
        cx: &mut HookContext<'_, '_>,
        op: BinaryOp,
        lhs: &TypedValue,
        rhs: &TypedValue,
    ) -> TypedResult {
        let pred = match op {
            BinaryOp::Eq => CmpPred::Eq,
            BinaryOp::Ne => CmpPred::Ne,
            _ => return Err(cx.no_operator(op, lhs, rhs)),
        };
        if rhs.ty != builtins::BOOL {
            return Err(cx.no_operator(op, lhs, rhs));
        }
        let value = cx
            .builder()
            .build_cmp(pred, lhs.value.clone(), rhs.value.clone())?;
        Ok(TypedValue::new(builtins::BOOL, value))
    }

    fn op_not(&self, cx: &mut HookContext<'_, '_>, operand: &TypedValue) -> TypedResult {
        let value = cx.builder().build_not(operand.value.clone())?;
        Ok(TypedValue::new(builtins::BOOL, value))
    }
}

/// `int`: 32-bit signed integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntType;

impl TypeDescriptor for IntType {
    fn name(&self) -> &str {
        "int"
    }

    fn mangle(&self) -> &str {
        "i"
    }

    fn representation(&self) -> Option<IrType> {
        Some(IrType::I32)
    }

    fn capabilities(&self) -> TypeCapabilities {
        TypeCapabilities::ARITHMETIC | TypeCapabilities::COMPARE
    }

    fn op_add(&self, cx: &mut HookContext<'_, '_>, lhs: &TypedValue, rhs: &TypedValue) -> TypedResult {
        numeric_arith(cx, BinaryOp::Add, lhs, rhs)
    }

    fn op_sub(&self, cx: &mut HookContext<'_, '_>, lhs: &TypedValue, rhs: &TypedValue) -> TypedResult {
        numeric_arith(cx, BinaryOp::Sub, lhs, rhs)
    }

    fn op_mul(&self, cx: &mut HookContext<'_, '_>, lhs: &TypedValue, rhs: &TypedValue) -> TypedResult {
        numeric_arith(cx, BinaryOp::Mul, lhs, rhs)
    }

    fn op_div(&self, cx: &mut HookContext<'_, '_>, lhs: &TypedValue, rhs: &TypedValue) -> TypedResult {
        numeric_arith(cx, BinaryOp::Div, lhs, rhs)
    }

    fn op_compare(
        &self,
        cx: &mut HookContext<'_, '_>,
        op: BinaryOp,
        lhs: &TypedValue,
        rhs: &TypedValue,
    ) -> TypedResult {
        numeric_compare(cx, op, lhs, rhs)
    }

    fn op_neg(&self, cx: &mut HookContext<'_, '_>, operand: &TypedValue) -> TypedResult {
        let value = cx.builder().build_neg(operand.value.clone())?;
        Ok(TypedValue::new(builtins::INT, value))
    }
}

/// `float`: 32-bit IEEE float.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatType;

impl TypeDescriptor for FloatType {
    fn name(&self) -> &str {
        "float"
    }

    fn mangle(&self) -> &str {
        "f"
    }

    fn representation(&self) -> Option<IrType> {
        Some(IrType::F32)
    }

    fn capabilities(&self) -> TypeCapabilities {
        TypeCapabilities::ARITHMETIC | TypeCapabilities::COMPARE
    }

    fn op_add(&self, cx: &mut HookContext<'_, '_>, lhs: &TypedValue, rhs: &TypedValue) -> TypedResult {
        numeric_arith(cx, BinaryOp::Add, lhs, rhs)
    }

    fn op_sub(&self, cx: &mut HookContext<'_, '_>, lhs: &TypedValue, rhs: &TypedValue) -> TypedResult {
        numeric_arith(cx, BinaryOp::Sub, lhs, rhs)
    }

    fn op_mul(&self, cx: &mut HookContext<'_, '_>, lhs: &TypedValue, rhs: &TypedValue) -> TypedResult {
        numeric_arith(cx, BinaryOp::Mul, lhs, rhs)
    }

    fn op_div(&self, cx: &mut HookContext<'_, '_>, lhs: &TypedValue, rhs: &TypedValue) -> TypedResult {
        numeric_arith(cx, BinaryOp::Div, lhs, rhs)
    }

    fn op_compare(
        &self,
        cx: &mut HookContext<'_, '_>,
        op: BinaryOp,
        lhs: &TypedValue,
        rhs: &TypedValue,
    ) -> TypedResult {
        numeric_compare(cx, op, lhs, rhs)
    }

    fn op_neg(&self, cx: &mut HookContext<'_, '_>, operand: &TypedValue) -> TypedResult {
        let value = cx.builder().build_neg(operand.value.clone())?;
        Ok(TypedValue::new(builtins::FLOAT, value))
    }
}

fn arith_op(op: BinaryOp, float: bool) -> Option<ArithOp> {
    Some(match (op, float) {
        (BinaryOp::Add, false) => ArithOp::IAdd,
        (BinaryOp::Sub, false) => ArithOp::ISub,
        (BinaryOp::Mul, false) => ArithOp::IMul,
        (BinaryOp::Div, false) => ArithOp::SDiv,
        (BinaryOp::Add, true) => ArithOp::FAdd,
        (BinaryOp::Sub, true) => ArithOp::FSub,
        (BinaryOp::Mul, true) => ArithOp::FMul,
        (BinaryOp::Div, true) => ArithOp::FDiv,
        _ => return None,
    })
}

/// Comparison predicate for a comparison operator.
pub(crate) fn cmp_pred(op: BinaryOp) -> Option<CmpPred> {
    Some(match op {
        BinaryOp::Eq => CmpPred::Eq,
        BinaryOp::Ne => CmpPred::Ne,
        BinaryOp::Lt => CmpPred::Lt,
        BinaryOp::Le => CmpPred::Le,
        BinaryOp::Gt => CmpPred::Gt,
        BinaryOp::Ge => CmpPred::Ge,
        _ => return None,
    })
}

fn numeric_arith(
    cx: &mut HookContext<'_, '_>,
    op: BinaryOp,
    lhs: &TypedValue,
    rhs: &TypedValue,
) -> TypedResult {
    match (lhs.ty, rhs.ty) {
        (builtins::INT, builtins::INT) => {
            let Some(arith) = arith_op(op, false) else {
                return Err(cx.no_operator(op, lhs, rhs));
            };
            let value = cx
                .builder()
                .build_arith(arith, lhs.value.clone(), rhs.value.clone())?;
            Ok(TypedValue::new(builtins::INT, value))
        }
        (builtins::INT | builtins::FLOAT, builtins::INT | builtins::FLOAT) => {
            let Some(arith) = arith_op(op, true) else {
                return Err(cx.no_operator(op, lhs, rhs));
            };
            let (Some(l), Some(r)) = (cx.to_float(lhs)?, cx.to_float(rhs)?) else {
                return Err(cx.no_operator(op, lhs, rhs));
            };
            let value = cx.builder().build_arith(arith, l, r)?;
            Ok(TypedValue::new(builtins::FLOAT, value))
        }
        _ => Err(cx.no_operator(op, lhs, rhs)),
    }
}

fn numeric_compare(
    cx: &mut HookContext<'_, '_>,
    op: BinaryOp,
    lhs: &TypedValue,
    rhs: &TypedValue,
) -> TypedResult {
    let Some(pred) = cmp_pred(op) else {
        return Err(cx.no_operator(op, lhs, rhs));
    };
    let value = match (lhs.ty, rhs.ty) {
        (builtins::INT, builtins::INT) => {
            cx.builder()
                .build_cmp(pred, lhs.value.clone(), rhs.value.clone())?
        }
        (builtins::INT | builtins::FLOAT, builtins::INT | builtins::FLOAT) => {
            let (Some(l), Some(r)) = (cx.to_float(lhs)?, cx.to_float(rhs)?) else {
                return Err(cx.no_operator(op, lhs, rhs));
            };
            cx.builder().build_cmp(pred, l, r)?
        }
        _ => return Err(cx.no_operator(op, lhs, rhs)),
    };
    Ok(TypedValue::new(builtins::BOOL, value))
}
