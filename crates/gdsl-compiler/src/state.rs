//! Mutable generation state owned by the AST producer.

use crate::control::ControlState;
use crate::symbols::{FunctionTable, VariableTable};

/// Symbol tables and control stack for one compilation unit.
///
/// Passed explicitly to every generation step. Functions persist across
/// the unit; variables and control frames are reset between functions.
#[derive(Debug, Default)]
pub struct ParserState {
    pub variables: VariableTable,
    pub functions: FunctionTable,
    pub control: ControlState,
}

impl ParserState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop per-function state after a function finishes or fails.
    pub fn reset_function_state(&mut self) {
        self.variables.clear();
        self.control.clear();
    }
}
