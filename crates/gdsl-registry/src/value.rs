//! Typed IR values.

use gdsl_core::{CompilationError, TypeHash, builtins};
use gdsl_ir::Value;

/// An IR value paired with the language type it represents.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
    /// Language type.
    pub ty: TypeHash,
    /// IR value.
    pub value: Value,
}

impl TypedValue {
    /// Pair a value with its type.
    pub fn new(ty: TypeHash, value: Value) -> Self {
        Self { ty, value }
    }

    /// The result of an expression that produces nothing.
    pub fn void() -> Self {
        Self {
            ty: builtins::VOID,
            value: Value::Void,
        }
    }

    /// Whether this is a `void` result.
    pub fn is_void(&self) -> bool {
        self.ty == builtins::VOID
    }
}

/// Outcome of emitting a typed value. An error always carries the producer's
/// diagnostic.
pub type TypedResult = Result<TypedValue, CompilationError>;
