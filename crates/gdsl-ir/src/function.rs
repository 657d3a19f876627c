//! IR functions and basic blocks.

use crate::{BlockId, InstId, InstKind, Instruction, IrError, IrType, Value};

/// Symbol visibility of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Linkage {
    /// Defined in this module.
    Local,
    /// Implemented outside the module (runtime intrinsic or host function).
    External,
}

/// Parameter and return types of a function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    /// Parameter types in order.
    pub params: Vec<IrType>,
    /// Return type.
    pub ret: IrType,
}

impl Signature {
    /// Create a signature.
    pub fn new(params: Vec<IrType>, ret: IrType) -> Self {
        Self { params, ret }
    }
}

/// A labelled straight-line sequence of instructions.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicBlock {
    /// Block label.
    pub label: String,
    /// Instructions in order.
    pub insts: Vec<InstId>,
}

/// A function declaration, optionally with a body.
#[derive(Debug, Clone, PartialEq)]
pub struct IrFunction {
    name: String,
    signature: Signature,
    linkage: Linkage,
    blocks: Vec<BasicBlock>,
    insts: Vec<Instruction>,
}

impl IrFunction {
    pub(crate) fn new(name: String, signature: Signature, linkage: Linkage) -> Self {
        Self {
            name,
            signature,
            linkage,
            blocks: Vec::new(),
            insts: Vec::new(),
        }
    }

    /// Symbol name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter and return types.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Linkage.
    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    /// Whether the function has no body.
    pub fn is_declaration(&self) -> bool {
        self.blocks.is_empty()
    }

    /// All basic blocks, entry first.
    pub fn blocks(&self) -> &[BasicBlock] {
        &self.blocks
    }

    /// A basic block by id.
    pub fn block(&self, id: BlockId) -> Option<&BasicBlock> {
        self.blocks.get(id.0 as usize)
    }

    /// An instruction by id.
    pub fn inst(&self, id: InstId) -> Option<&Instruction> {
        self.insts.get(id.0 as usize)
    }

    /// Instructions of a block, in order.
    pub fn block_insts(&self, id: BlockId) -> impl Iterator<Item = &Instruction> {
        self.block(id)
            .into_iter()
            .flat_map(|b| b.insts.iter())
            .filter_map(|i| self.insts.get(i.0 as usize))
    }

    /// All instructions in block order.
    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.blocks
            .iter()
            .flat_map(|b| b.insts.iter())
            .filter_map(|i| self.insts.get(i.0 as usize))
    }

    /// The terminator of a block, if it has one.
    pub fn terminator(&self, id: BlockId) -> Option<&Instruction> {
        let last = *self.block(id)?.insts.last()?;
        self.inst(last).filter(|i| i.kind.is_terminator())
    }

    /// Whether a block already ends in a terminator.
    pub fn is_terminated(&self, id: BlockId) -> bool {
        self.terminator(id).is_some()
    }

    /// Successor blocks of a block (empty for unterminated or `ret` blocks).
    pub fn successors(&self, id: BlockId) -> Vec<BlockId> {
        self.terminator(id)
            .map(|t| t.kind.successors())
            .unwrap_or_default()
    }

    /// Type of a value used inside this function.
    pub fn value_type(&self, value: &Value) -> Result<IrType, IrError> {
        match value {
            Value::Const(c) => Ok(c.ty()),
            Value::Arg(i) => self
                .signature
                .params
                .get(*i as usize)
                .cloned()
                .ok_or(IrError::UnknownArgument {
                    function: self.name.clone(),
                    index: *i,
                }),
            Value::Inst(id) => self
                .inst(*id)
                .map(|i| i.ty.clone())
                .ok_or(IrError::UnknownValue { id: id.0 }),
            Value::Void => Ok(IrType::Void),
        }
    }

    /// Drop the body, leaving only the declaration.
    pub fn clear_body(&mut self) {
        self.blocks.clear();
        self.insts.clear();
    }

    /// Check structural well-formedness: every block ends in exactly one
    /// terminator and no terminator appears mid-block.
    pub fn verify(&self) -> Result<(), IrError> {
        for block in &self.blocks {
            let Some((last, body)) = block.insts.split_last() else {
                return Err(IrError::MissingTerminator {
                    block: block.label.clone(),
                });
            };
            let last_is_term = self
                .inst(*last)
                .is_some_and(|i| i.kind.is_terminator());
            if !last_is_term {
                return Err(IrError::MissingTerminator {
                    block: block.label.clone(),
                });
            }
            if body
                .iter()
                .filter_map(|i| self.inst(*i))
                .any(|i| i.kind.is_terminator())
            {
                return Err(IrError::BlockTerminated {
                    block: block.label.clone(),
                });
            }
        }
        Ok(())
    }

    pub(crate) fn add_block(&mut self, label: String) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        self.blocks.push(BasicBlock {
            label,
            insts: Vec::new(),
        });
        id
    }

    pub(crate) fn push_inst(&mut self, block: BlockId, inst: Instruction) -> InstId {
        let id = InstId(self.insts.len() as u32);
        self.insts.push(inst);
        if let Some(b) = self.blocks.get_mut(block.0 as usize) {
            b.insts.push(id);
        }
        id
    }

    /// Insert at `index` within `block` (used to hoist allocas into the entry block).
    pub(crate) fn insert_inst(&mut self, block: BlockId, index: usize, inst: Instruction) -> InstId {
        let id = InstId(self.insts.len() as u32);
        self.insts.push(inst);
        if let Some(b) = self.blocks.get_mut(block.0 as usize) {
            let index = index.min(b.insts.len());
            b.insts.insert(index, id);
        }
        id
    }

    /// Number of leading allocas in a block.
    pub(crate) fn leading_allocas(&self, block: BlockId) -> usize {
        self.block_insts(block)
            .take_while(|i| matches!(i.kind, InstKind::Alloca { .. }))
            .count()
    }
}
