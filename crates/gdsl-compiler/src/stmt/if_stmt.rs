//! If/else control flow.

use gdsl_core::Result;
use gdsl_ir::IrError;

use super::StmtCompiler;
use crate::ast::IfStmt;
use crate::control::ControlFrame;

impl<'a, 'm> StmtCompiler<'a, 'm> {
    /// Compile an if statement.
    ///
    /// The condition must be `bool`. Block layout:
    /// ```text
    /// entry:   br %cond, then, else      ; or if.end without else
    /// then:    [then] br if.end
    /// else:    [else] br if.end
    /// if.end:
    /// ```
    /// With an else branch, `if.end` only exists if some branch falls
    /// through; otherwise the builder stays in a terminated block and
    /// whatever follows is unreachable.
    pub fn compile_if(&mut self, if_stmt: &IfStmt<'_>) -> Result<()> {
        let cond = self.expr_compiler().condition(if_stmt.condition)?;
        let func = self.current_function()?;
        let then_block = self.builder.append_block(func, "then")?;

        let Some(else_stmt) = if_stmt.else_stmt else {
            let end_block = self.builder.append_block(func, "if.end")?;
            self.builder.build_cond_br(cond, then_block, end_block)?;
            self.with_frame(ControlFrame::Conditional, |this| {
                this.builder.position_at_end(func, then_block);
                this.compile_nested(if_stmt.then_stmt)?;
                if !this.builder.is_terminated() {
                    this.builder.build_br(end_block)?;
                }
                Ok(())
            })?;
            self.builder.position_at_end(func, end_block);
            return Ok(());
        };

        let else_block = self.builder.append_block(func, "else")?;
        self.builder.build_cond_br(cond, then_block, else_block)?;

        let open_ends = self.with_frame(ControlFrame::Conditional, |this| {
            let mut open = Vec::with_capacity(2);
            for (block, stmt) in [(then_block, if_stmt.then_stmt), (else_block, else_stmt)] {
                this.builder.position_at_end(func, block);
                this.compile_nested(stmt)?;
                if !this.builder.is_terminated() {
                    open.push(this.builder.current_block().ok_or(IrError::NoInsertPoint)?);
                }
            }
            Ok(open)
        })?;

        if open_ends.is_empty() {
            return Ok(());
        }
        let end_block = self.builder.append_block(func, "if.end")?;
        for block in open_ends {
            self.builder.position_at_end(func, block);
            self.builder.build_br(end_block)?;
        }
        self.builder.position_at_end(func, end_block);
        Ok(())
    }
}
