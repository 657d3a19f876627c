//! Blocks and lexical scopes.

use std::slice;

use gdsl_core::Result;

use super::StmtCompiler;
use crate::ast::{Block, Stmt};
use crate::lifecycle;

impl<'a, 'm> StmtCompiler<'a, 'm> {
    /// `{ stmts }`
    pub fn compile_block(&mut self, block: &Block<'_>) -> Result<()> {
        self.compile_scoped(block.stmts)
    }

    /// Compile a branch or loop body in its own scope.
    pub(super) fn compile_nested(&mut self, stmt: &Stmt<'_>) -> Result<()> {
        self.compile_scoped(slice::from_ref(stmt))
    }

    /// Compile `stmts` in a fresh scope.
    ///
    /// If control falls off the end, the scope's locals are destroyed in
    /// reverse declaration order. Terminators have already cleaned up.
    pub(super) fn compile_scoped(&mut self, stmts: &[Stmt<'_>]) -> Result<()> {
        self.state.variables.push_scope();
        let result = self.compile_stmts(stmts);
        let slots = self.state.variables.pop_scope();
        result?;

        if !self.builder.is_terminated() {
            lifecycle::destroy_slots(&mut self.hooks(), &slots)?;
        }
        Ok(())
    }
}
