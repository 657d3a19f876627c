//! Errors raised while building IR.
//!
//! These indicate the code generator tried to emit malformed IR. They are
//! surfaced to users as internal compiler errors, never as language errors.

use gdsl_core::CompilationError;
use thiserror::Error;

use crate::IrType;

/// Errors from [`IrBuilder`](crate::IrBuilder) and [`IrModule`](crate::IrModule).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IrError {
    /// No block is selected for emission.
    #[error("no insertion point")]
    NoInsertPoint,

    /// Emission into a block that already ends in a terminator.
    #[error("block '{block}' is already terminated")]
    BlockTerminated {
        /// Label of the block.
        block: String,
    },

    /// A block has no terminator.
    #[error("block '{block}' has no terminator")]
    MissingTerminator {
        /// Label of the block.
        block: String,
    },

    /// An operand has the wrong type.
    #[error("{context}: expected '{expected}', found '{found}'")]
    TypeMismatch {
        /// What was being built.
        context: &'static str,
        /// Expected type.
        expected: IrType,
        /// Actual type.
        found: IrType,
    },

    /// A non-pointer operand was used where a pointer is required.
    #[error("{context}: '{found}' is not a pointer")]
    NotAPointer {
        /// What was being built.
        context: &'static str,
        /// Actual type.
        found: IrType,
    },

    /// A call passed the wrong number of arguments.
    #[error("call to '{function}' expects {expected} argument(s), got {got}")]
    ArgumentCount {
        /// Callee name.
        function: String,
        /// Declared parameter count.
        expected: usize,
        /// Provided argument count.
        got: usize,
    },

    /// A function was redeclared with a different signature.
    #[error("function '{name}' redeclared with a different signature")]
    SignatureMismatch {
        /// Function name.
        name: String,
    },

    /// A function id does not exist in the module.
    #[error("unknown function id {id}")]
    UnknownFunction {
        /// The id.
        id: u32,
    },

    /// An instruction id does not exist in the function.
    #[error("unknown value %{id}")]
    UnknownValue {
        /// The id.
        id: u32,
    },

    /// An argument index is out of range.
    #[error("function '{function}' has no argument {index}")]
    UnknownArgument {
        /// Function name.
        function: String,
        /// Argument index.
        index: u32,
    },

    /// A type without storage size was allocated.
    #[error("cannot allocate unsized type '{ty}'")]
    Unsized {
        /// The type.
        ty: IrType,
    },
}

/// Malformed IR reaching the language layer is a compiler bug, reported as an
/// internal error with no source position.
impl From<IrError> for CompilationError {
    fn from(error: IrError) -> Self {
        CompilationError::Ir {
            message: error.to_string(),
        }
    }
}
