//! The environment handed to type hooks.

use gdsl_core::{BinaryOp, CompilationError, Result, Span, TypeHash, UnaryOp, builtins};
use gdsl_ir::{CastOp, FuncId, IrBuilder, IrType, Linkage, Signature, Value};

use crate::{TypeTable, TypedValue};

/// What a type hook may touch while emitting code: the IR builder positioned at
/// the current insertion point, and the (read-only) type table.
pub struct HookContext<'a, 'm> {
    builder: &'a mut IrBuilder<'m>,
    types: &'a TypeTable,
}

impl<'a, 'm> HookContext<'a, 'm> {
    /// Wrap a builder and a type table.
    pub fn new(builder: &'a mut IrBuilder<'m>, types: &'a TypeTable) -> Self {
        Self { builder, types }
    }

    /// The IR builder.
    pub fn builder(&mut self) -> &mut IrBuilder<'m> {
        &mut *self.builder
    }

    /// The type table.
    pub fn types(&self) -> &'a TypeTable {
        self.types
    }

    /// Display name of a type, falling back to its hash for unknown types.
    pub fn type_name(&self, ty: TypeHash) -> String {
        self.types
            .name_of(ty)
            .map(str::to_string)
            .unwrap_or_else(|| ty.to_string())
    }

    /// IR representation of a type.
    pub fn representation(&self, ty: TypeHash) -> Result<IrType> {
        self.types.representation(ty)
    }

    /// Declare a runtime intrinsic as an external function, once per module.
    pub fn intrinsic(&mut self, name: &str, params: Vec<IrType>, ret: IrType) -> Result<FuncId> {
        Ok(self
            .builder
            .declare_function(name, Signature::new(params, ret), Linkage::External)?)
    }

    /// Declare (if needed) and call a runtime intrinsic.
    pub fn call_intrinsic(
        &mut self,
        name: &str,
        params: Vec<IrType>,
        ret: IrType,
        args: Vec<Value>,
    ) -> Result<Value> {
        let callee = self.intrinsic(name, params, ret)?;
        Ok(self.builder.build_call(callee, args)?)
    }

    /// Convert an `int` or `float` operand to a float value. `None` for other types.
    pub fn to_float(&mut self, operand: &TypedValue) -> Result<Option<Value>> {
        match operand.ty {
            builtins::FLOAT => Ok(Some(operand.value.clone())),
            builtins::INT => Ok(Some(
                self.builder
                    .build_cast(CastOp::SiToFp, operand.value.clone())?,
            )),
            _ => Ok(None),
        }
    }

    /// The error for a missing binary operator.
    pub fn no_operator(&self, op: BinaryOp, lhs: &TypedValue, rhs: &TypedValue) -> CompilationError {
        CompilationError::NoOperator {
            op: op.symbol(),
            left: self.type_name(lhs.ty),
            right: self.type_name(rhs.ty),
            span: Span::default(),
        }
    }

    /// The error for a missing unary operator.
    pub fn no_unary_operator(&self, op: UnaryOp, operand: &TypedValue) -> CompilationError {
        CompilationError::NoUnaryOperator {
            op: op.symbol(),
            operand: self.type_name(operand.ty),
            span: Span::default(),
        }
    }
}
