//! Control-flow frame stack.
//!
//! Frames record the context statements need: the function being generated
//! (for `return`), enclosing loops (for `break` / `continue`) and conditional
//! arms. Every push is matched by a pop on both success and error paths.

use gdsl_core::TypeHash;
use gdsl_ir::BlockId;

/// The function whose body is being generated.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionFrame {
    /// In-language function name
    pub name: String,
    /// Declared return type
    pub return_type: TypeHash,
    /// Variable scope depth of the argument scope
    pub scope_depth: usize,
}

/// An enclosing loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopFrame {
    /// Target of `continue`
    pub continue_block: BlockId,
    /// Target of `break`
    pub break_block: BlockId,
    /// Scope depth of the loop body; locals at or below it die on exit
    pub scope_depth: usize,
}

/// One entry on the control stack.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFrame {
    Function(FunctionFrame),
    Loop(LoopFrame),
    Conditional,
}

/// Stack of [`ControlFrame`]s, innermost last.
#[derive(Debug, Default)]
pub struct ControlState {
    frames: Vec<ControlFrame>,
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, frame: ControlFrame) {
        self.frames.push(frame);
    }

    pub fn pop(&mut self) -> Option<ControlFrame> {
        self.frames.pop()
    }

    /// Number of open frames.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The innermost function frame.
    pub fn current_function(&self) -> Option<&FunctionFrame> {
        self.frames.iter().rev().find_map(|frame| match frame {
            ControlFrame::Function(f) => Some(f),
            _ => None,
        })
    }

    /// The innermost loop inside the current function.
    pub fn innermost_loop(&self) -> Option<&LoopFrame> {
        for frame in self.frames.iter().rev() {
            match frame {
                ControlFrame::Loop(l) => return Some(l),
                ControlFrame::Function(_) => return None,
                ControlFrame::Conditional => {}
            }
        }
        None
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
