//! Symbol tables: lexically scoped variables and overloaded functions.

mod functions;
mod variables;

pub use functions::{EntryId, FunctionEntry, FunctionTable};
pub use variables::{VariableSlot, VariableTable};
