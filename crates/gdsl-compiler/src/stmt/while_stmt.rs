//! While loops, `break` and `continue`.

use gdsl_core::{CompilationError, Result};
use gdsl_ir::{Constant, Value};

use super::StmtCompiler;
use crate::ast::{BreakStmt, ContinueStmt, WhileStmt};
use crate::control::{ControlFrame, LoopFrame};
use crate::lifecycle;

impl<'a, 'm> StmtCompiler<'a, 'm> {
    /// Compile a while loop.
    ///
    /// Block layout:
    /// ```text
    ///             br while.cond
    /// while.cond: br %cond, while.body, while.end
    /// while.body: [body] br while.cond
    /// while.end:
    /// ```
    ///
    /// A literal `true` condition branches straight to the body, so
    /// `while.end` is only reachable through `break`.
    pub fn compile_while(&mut self, while_stmt: &WhileStmt<'_>) -> Result<()> {
        let func = self.current_function()?;
        let cond_block = self.builder.append_block(func, "while.cond")?;
        let body_block = self.builder.append_block(func, "while.body")?;
        let end_block = self.builder.append_block(func, "while.end")?;

        self.builder.build_br(cond_block)?;
        self.builder.position_at_end(func, cond_block);
        let cond = self.expr_compiler().condition(while_stmt.condition)?;
        if cond == Value::Const(Constant::Bool(true)) {
            self.builder.build_br(body_block)?;
        } else {
            self.builder.build_cond_br(cond, body_block, end_block)?;
        }

        let frame = LoopFrame {
            continue_block: cond_block,
            break_block: end_block,
            scope_depth: self.state.variables.depth() + 1,
        };
        self.with_frame(ControlFrame::Loop(frame), |this| {
            this.builder.position_at_end(func, body_block);
            this.compile_nested(while_stmt.body)?;
            if !this.builder.is_terminated() {
                this.builder.build_br(cond_block)?;
            }
            Ok(())
        })?;

        self.builder.position_at_end(func, end_block);
        Ok(())
    }

    /// `break;` destroys the loop body's locals and jumps past the loop.
    pub fn compile_break(&mut self, brk: &BreakStmt) -> Result<()> {
        let target = self.loop_frame("break", brk.span)?;
        self.leave_loop(&target)?;
        Ok(self.builder.build_br(target.break_block)?)
    }

    /// `continue;` destroys the loop body's locals and re-tests the condition.
    pub fn compile_continue(&mut self, cont: &ContinueStmt) -> Result<()> {
        let target = self.loop_frame("continue", cont.span)?;
        self.leave_loop(&target)?;
        Ok(self.builder.build_br(target.continue_block)?)
    }

    fn loop_frame(&self, keyword: &'static str, span: gdsl_core::Span) -> Result<LoopFrame> {
        self.state
            .control
            .innermost_loop()
            .copied()
            .ok_or(CompilationError::BreakOutsideLoop { keyword, span })
    }

    fn leave_loop(&mut self, target: &LoopFrame) -> Result<()> {
        let slots = self.state.variables.live_slots_from(target.scope_depth);
        lifecycle::destroy_slots(&mut self.hooks(), &slots)
    }
}
