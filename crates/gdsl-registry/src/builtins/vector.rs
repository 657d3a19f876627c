//! `float2`, `float3` and `float4`.

use gdsl_core::{BinaryOp, CompilationError, Span, TypeHash, builtins};
use gdsl_ir::{ArithOp, IrType, Value};

use crate::{HookContext, TypeCapabilities, TypeDescriptor, TypedResult, TypedValue};

/// A float vector of 2 to 4 components.
///
/// Vectors are constructed from one scalar per component (ints are promoted),
/// or from a single scalar broadcast to every component. `+` and `-` are
/// component-wise; `*` accepts a vector or a scalar; `/` accepts a scalar or a
/// vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatVectorType {
    width: u8,
    name: &'static str,
    mangle: &'static str,
}

impl FloatVectorType {
    /// `float2`
    pub const FLOAT2: Self = Self {
        width: 2,
        name: "float2",
        mangle: "f2",
    };
    /// `float3`
    pub const FLOAT3: Self = Self {
        width: 3,
        name: "float3",
        mangle: "f3",
    };
    /// `float4`
    pub const FLOAT4: Self = Self {
        width: 4,
        name: "float4",
        mangle: "f4",
    };

    /// Component count.
    pub fn width(&self) -> u8 {
        self.width
    }

    fn typed(&self, value: Value) -> TypedValue {
        TypedValue::new(self.type_hash(), value)
    }

    fn componentwise(
        &self,
        cx: &mut HookContext<'_, '_>,
        op: BinaryOp,
        arith: ArithOp,
        lhs: &TypedValue,
        rhs: &TypedValue,
        allow_scalar: bool,
    ) -> TypedResult {
        let rhs_value = if rhs.ty == self.type_hash() {
            rhs.value.clone()
        } else if allow_scalar && builtins::is_numeric(rhs.ty) {
            match cx.to_float(rhs)? {
                Some(scalar) => cx.builder().build_splat(scalar, self.width)?,
                None => return Err(cx.no_operator(op, lhs, rhs)),
            }
        } else {
            return Err(cx.no_operator(op, lhs, rhs));
        };
        let value = cx
            .builder()
            .build_arith(arith, lhs.value.clone(), rhs_value)?;
        Ok(self.typed(value))
    }
}

impl TypeDescriptor for FloatVectorType {
    fn name(&self) -> &str {
        self.name
    }

    fn mangle(&self) -> &str {
        self.mangle
    }

    fn type_hash(&self) -> TypeHash {
        match self.width {
            2 => builtins::FLOAT2,
            3 => builtins::FLOAT3,
            _ => builtins::FLOAT4,
        }
    }

    fn representation(&self) -> Option<IrType> {
        Some(IrType::Vector(self.width))
    }

    fn capabilities(&self) -> TypeCapabilities {
        TypeCapabilities::CONSTRUCT | TypeCapabilities::ARITHMETIC
    }

    fn construct(&self, cx: &mut HookContext<'_, '_>, args: &[TypedValue]) -> TypedResult {
        let mut lanes = Vec::with_capacity(args.len());
        for arg in args {
            match cx.to_float(arg)? {
                Some(lane) => lanes.push(lane),
                None => {
                    return Err(CompilationError::TypeMismatch {
                        message: format!(
                            "{} component must be numeric, found '{}'",
                            self.name,
                            cx.type_name(arg.ty)
                        ),
                        span: Span::default(),
                    });
                }
            }
        }

        let value = match lanes.len() {
            1 => {
                let scalar = lanes.remove(0);
                cx.builder().build_splat(scalar, self.width)?
            }
            n if n == self.width as usize => cx.builder().build_vector(lanes)?,
            n => {
                return Err(CompilationError::TypeMismatch {
                    message: format!(
                        "{} expects {} components, got {}",
                        self.name, self.width, n
                    ),
                    span: Span::default(),
                });
            }
        };
        Ok(self.typed(value))
    }

    fn op_add(&self, cx: &mut HookContext<'_, '_>, lhs: &TypedValue, rhs: &TypedValue) -> TypedResult {
        self.componentwise(cx, BinaryOp::Add, ArithOp::FAdd, lhs, rhs, false)
    }

    fn op_sub(&self, cx: &mut HookContext<'_, '_>, lhs: &TypedValue, rhs: &TypedValue) -> TypedResult {
        self.componentwise(cx, BinaryOp::Sub, ArithOp::FSub, lhs, rhs, false)
    }

    fn op_mul(&self, cx: &mut HookContext<'_, '_>, lhs: &TypedValue, rhs: &TypedValue) -> TypedResult {
        self.componentwise(cx, BinaryOp::Mul, ArithOp::FMul, lhs, rhs, true)
    }

    fn op_div(&self, cx: &mut HookContext<'_, '_>, lhs: &TypedValue, rhs: &TypedValue) -> TypedResult {
        self.componentwise(cx, BinaryOp::Div, ArithOp::FDiv, lhs, rhs, true)
    }

    fn op_neg(&self, cx: &mut HookContext<'_, '_>, operand: &TypedValue) -> TypedResult {
        let value = cx.builder().build_neg(operand.value.clone())?;
        Ok(self.typed(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::test_support::emit;
    use gdsl_ir::{Constant, InstKind};

    #[test]
    fn construct_from_components_promotes_ints() {
        let module = emit(vec![], |cx| {
            let args = [
                TypedValue::new(builtins::FLOAT, Constant::float(1.0).into()),
                TypedValue::new(builtins::INT, Constant::Int(2).into()),
                TypedValue::new(builtins::FLOAT, Constant::float(3.0).into()),
            ];
            let v = FloatVectorType::FLOAT3.construct(cx, &args).unwrap();
            assert_eq!(v.ty, builtins::FLOAT3);
            assert_eq!(cx.builder().value_type(&v.value).unwrap(), IrType::Vector(3));
        });
        let f = module.function_by_name("test").unwrap();
        assert_eq!(
            f.instructions()
                .filter(|i| matches!(i.kind, InstKind::Cast { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn construct_from_scalar_splats() {
        emit(vec![], |cx| {
            let args = [TypedValue::new(builtins::FLOAT, Constant::float(0.5).into())];
            let v = FloatVectorType::FLOAT4.construct(cx, &args).unwrap();
            assert_eq!(cx.builder().value_type(&v.value).unwrap(), IrType::Vector(4));
        });
    }

    #[test]
    fn construct_wrong_arity_fails() {
        emit(vec![], |cx| {
            let args = [
                TypedValue::new(builtins::FLOAT, Constant::float(1.0).into()),
                TypedValue::new(builtins::FLOAT, Constant::float(2.0).into()),
            ];
            let err = FloatVectorType::FLOAT3.construct(cx, &args).unwrap_err();
            assert_eq!(err.to_string(), "at 0:0: float3 expects 3 components, got 2");
        });
    }

    #[test]
    fn scalar_multiply_splats() {
        emit(vec![IrType::Vector(3), IrType::F32], |cx| {
            let v = TypedValue::new(builtins::FLOAT3, Value::Arg(0));
            let s = TypedValue::new(builtins::FLOAT, Value::Arg(1));
            let r = FloatVectorType::FLOAT3
                .binary_op(cx, BinaryOp::Mul, &v, &s)
                .unwrap();
            assert_eq!(r.ty, builtins::FLOAT3);
            let err = FloatVectorType::FLOAT3
                .binary_op(cx, BinaryOp::Add, &v, &s)
                .unwrap_err();
            assert!(matches!(err, CompilationError::NoOperator { .. }));
        });
    }

    #[test]
    fn mismatched_widths_rejected() {
        emit(vec![IrType::Vector(3), IrType::Vector(2)], |cx| {
            let a = TypedValue::new(builtins::FLOAT3, Value::Arg(0));
            let b = TypedValue::new(builtins::FLOAT2, Value::Arg(1));
            assert!(FloatVectorType::FLOAT3.binary_op(cx, BinaryOp::Add, &a, &b).is_err());
        });
    }
}
