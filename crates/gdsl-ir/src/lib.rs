//! A small SSA intermediate representation for gdsl.
//!
//! The compiler lowers shading-language functions into an [`IrModule`] via an
//! [`IrBuilder`]. The representation is deliberately close to LLVM IR (typed
//! values, stack slots, basic blocks with a single terminator) so a backend can
//! translate it one instruction at a time for JIT or AOT execution.

mod builder;
mod error;
mod function;
mod instruction;
mod module;
mod printer;
mod types;
mod value;

pub use builder::IrBuilder;
pub use error::IrError;
pub use function::{BasicBlock, IrFunction, Linkage, Signature};
pub use instruction::{ArithOp, CastOp, CmpPred, InstKind, Instruction};
pub use module::IrModule;
pub use types::{IrType, StructType};
pub use value::{BlockId, Constant, FuncId, InstId, Value};
