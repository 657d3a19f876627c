//! Expression results for the code generator.
//!
//! `ExprValue` pairs the IR value of an expression with its language type and
//! records whether the expression produced a fresh value the caller now owns.

use gdsl_core::TypeHash;
use gdsl_ir::Value;
use gdsl_registry::TypedValue;

/// Where the value of an expression lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ownership {
    /// A fresh value (literal, operator or call result, construction).
    /// Whoever consumes it is responsible for destroying it.
    #[default]
    Owned,
    /// A value read from a variable slot. The slot still owns it.
    Borrowed,
}

/// Result of generating an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprValue {
    pub ty: TypeHash,
    pub value: Value,
    pub ownership: Ownership,
}

impl ExprValue {
    /// A fresh value owned by the consumer.
    pub fn owned(ty: TypeHash, value: Value) -> Self {
        Self {
            ty,
            value,
            ownership: Ownership::Owned,
        }
    }

    /// A value still owned by a variable slot.
    pub fn borrowed(ty: TypeHash, value: Value) -> Self {
        Self {
            ty,
            value,
            ownership: Ownership::Borrowed,
        }
    }

    pub fn is_owned(&self) -> bool {
        self.ownership == Ownership::Owned
    }

    /// View as a hook operand.
    pub fn typed(&self) -> TypedValue {
        TypedValue::new(self.ty, self.value.clone())
    }
}

impl From<TypedValue> for ExprValue {
    fn from(value: TypedValue) -> Self {
        ExprValue::owned(value.ty, value.value)
    }
}
