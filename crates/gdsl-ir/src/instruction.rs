//! IR instruction set.
//!
//! Instructions are stored per function and referenced by [`InstId`]. Every
//! basic block ends in exactly one terminator ([`InstKind::is_terminator`]).

use crate::{BlockId, FuncId, IrType, Value};

/// Arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    /// Integer addition.
    IAdd,
    /// Integer subtraction.
    ISub,
    /// Integer multiplication.
    IMul,
    /// Signed integer division.
    SDiv,
    /// Float (or float vector) addition.
    FAdd,
    /// Float (or float vector) subtraction.
    FSub,
    /// Float (or float vector) multiplication.
    FMul,
    /// Float (or float vector) division.
    FDiv,
}

impl ArithOp {
    /// Mnemonic used by the printer.
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            ArithOp::IAdd => "add",
            ArithOp::ISub => "sub",
            ArithOp::IMul => "mul",
            ArithOp::SDiv => "sdiv",
            ArithOp::FAdd => "fadd",
            ArithOp::FSub => "fsub",
            ArithOp::FMul => "fmul",
            ArithOp::FDiv => "fdiv",
        }
    }

    /// Whether this operates on floats.
    pub const fn is_float(&self) -> bool {
        matches!(
            self,
            ArithOp::FAdd | ArithOp::FSub | ArithOp::FMul | ArithOp::FDiv
        )
    }
}

/// Comparison predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CmpPred {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl CmpPred {
    /// Mnemonic used by the printer.
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            CmpPred::Eq => "eq",
            CmpPred::Ne => "ne",
            CmpPred::Lt => "lt",
            CmpPred::Le => "le",
            CmpPred::Gt => "gt",
            CmpPred::Ge => "ge",
        }
    }
}

/// Conversion operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastOp {
    /// Signed integer to float.
    SiToFp,
    /// Float to signed integer (truncating).
    FpToSi,
}

impl CastOp {
    /// Mnemonic used by the printer.
    pub const fn mnemonic(&self) -> &'static str {
        match self {
            CastOp::SiToFp => "sitofp",
            CastOp::FpToSi => "fptosi",
        }
    }
}

/// The operation performed by an instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum InstKind {
    /// Reserve a stack slot; yields a pointer to `ty`.
    Alloca { ty: IrType, size: u32 },
    /// Read through a pointer.
    Load { ptr: Value },
    /// Write through a pointer.
    Store { value: Value, ptr: Value },
    /// Two-operand arithmetic.
    Arith { op: ArithOp, lhs: Value, rhs: Value },
    /// Comparison producing `i1`. `float` selects ordered float comparison.
    Cmp {
        pred: CmpPred,
        float: bool,
        lhs: Value,
        rhs: Value,
    },
    /// Arithmetic negation.
    Neg { value: Value },
    /// Boolean complement.
    Not { value: Value },
    /// Scalar conversion.
    Cast { op: CastOp, value: Value },
    /// Assemble a float vector from scalar lanes.
    BuildVector { lanes: Vec<Value> },
    /// Broadcast a scalar to every lane of a float vector.
    Splat { value: Value, lanes: u8 },
    /// Direct call.
    Call { callee: FuncId, args: Vec<Value> },
    /// SSA merge of values flowing in from predecessor blocks.
    Phi { incoming: Vec<(Value, BlockId)> },
    /// Return from the function.
    Ret { value: Option<Value> },
    /// Unconditional branch.
    Br { target: BlockId },
    /// Conditional branch on an `i1`.
    CondBr {
        cond: Value,
        then_block: BlockId,
        else_block: BlockId,
    },
    /// Marks a block control never reaches.
    Unreachable,
}

impl InstKind {
    /// Whether this instruction ends a basic block.
    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            InstKind::Ret { .. }
                | InstKind::Br { .. }
                | InstKind::CondBr { .. }
                | InstKind::Unreachable
        )
    }

    /// Blocks control may transfer to after this instruction.
    pub fn successors(&self) -> Vec<BlockId> {
        match self {
            InstKind::Br { target } => vec![*target],
            InstKind::CondBr {
                then_block,
                else_block,
                ..
            } => vec![*then_block, *else_block],
            _ => Vec::new(),
        }
    }

    /// Whether this is a call to `callee`.
    pub fn calls(&self, callee: FuncId) -> bool {
        matches!(self, InstKind::Call { callee: c, .. } if *c == callee)
    }
}

/// An instruction together with its result type and optional debug name.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// The operation.
    pub kind: InstKind,
    /// Result type (`Void` for instructions without a result).
    pub ty: IrType,
    /// Debug name for the result, if any.
    pub name: Option<String>,
}

impl Instruction {
    /// Whether this instruction produces a value.
    pub fn has_result(&self) -> bool {
        !self.ty.is_void()
    }
}
