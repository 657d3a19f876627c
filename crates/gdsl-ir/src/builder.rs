//! Instruction builder.
//!
//! [`IrBuilder`] borrows a caller-owned [`IrModule`] and appends instructions
//! at its current insertion point. Every `build_*` method type-checks its
//! operands and refuses to emit into a block that already ends in a
//! terminator, so the generated IR stays well formed even when the code
//! generator above it makes a mistake.
//!
//! # Example
//!
//! ```
//! use gdsl_ir::{ArithOp, IrBuilder, IrModule, IrType, Linkage, Signature, Value};
//!
//! let mut module = IrModule::new("demo");
//! let mut builder = IrBuilder::new(&mut module);
//! let sig = Signature::new(vec![IrType::F32, IrType::F32], IrType::F32);
//! let f = builder.declare_function("add", sig, Linkage::Local).unwrap();
//! let entry = builder.append_block(f, "entry").unwrap();
//! builder.position_at_end(f, entry);
//! let sum = builder.build_arith(ArithOp::FAdd, Value::Arg(0), Value::Arg(1)).unwrap();
//! builder.build_ret(Some(sum)).unwrap();
//! assert!(module.function(f).unwrap().verify().is_ok());
//! ```

use crate::{
    ArithOp, BlockId, CastOp, CmpPred, FuncId, InstId, InstKind, Instruction, IrError,
    IrFunction, IrModule, IrType, Linkage, Signature, Value,
};

type Result<T> = std::result::Result<T, IrError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Position {
    func: FuncId,
    block: BlockId,
}

/// Appends instructions to functions of a borrowed module.
pub struct IrBuilder<'m> {
    module: &'m mut IrModule,
    position: Option<Position>,
}

impl<'m> IrBuilder<'m> {
    /// Create a builder with no insertion point.
    pub fn new(module: &'m mut IrModule) -> Self {
        Self {
            module,
            position: None,
        }
    }

    /// The module being built.
    pub fn module(&self) -> &IrModule {
        self.module
    }

    /// The module being built, mutably.
    pub fn module_mut(&mut self) -> &mut IrModule {
        self.module
    }

    /// Declare (or re-find) a function in the module.
    pub fn declare_function(
        &mut self,
        name: &str,
        signature: Signature,
        linkage: Linkage,
    ) -> Result<FuncId> {
        self.module.declare_function(name, signature, linkage)
    }

    // ==========================================================================
    // Positioning
    // ==========================================================================

    /// Append a new block to `func`. Labels are made unique within the function.
    pub fn append_block(&mut self, func: FuncId, label: &str) -> Result<BlockId> {
        let function = self.module.function_mut(func)?;
        let taken = function
            .blocks()
            .iter()
            .filter(|b| b.label == label || b.label.starts_with(&format!("{label}.")))
            .count();
        let label = if taken == 0 {
            label.to_string()
        } else {
            format!("{label}.{taken}")
        };
        Ok(function.add_block(label))
    }

    /// Emit subsequent instructions at the end of `block`.
    pub fn position_at_end(&mut self, func: FuncId, block: BlockId) {
        self.position = Some(Position { func, block });
    }

    /// Drop the insertion point.
    pub fn clear_position(&mut self) {
        self.position = None;
    }

    /// Function containing the insertion point.
    pub fn current_function(&self) -> Option<FuncId> {
        self.position.map(|p| p.func)
    }

    /// Block containing the insertion point.
    pub fn current_block(&self) -> Option<BlockId> {
        self.position.map(|p| p.block)
    }

    /// Whether the current block already ends in a terminator.
    pub fn is_terminated(&self) -> bool {
        self.position.is_some_and(|p| {
            self.module
                .function(p.func)
                .is_ok_and(|f| f.is_terminated(p.block))
        })
    }

    fn position(&self) -> Result<Position> {
        self.position.ok_or(IrError::NoInsertPoint)
    }

    fn current(&self) -> Result<&IrFunction> {
        let pos = self.position()?;
        self.module.function(pos.func)
    }

    /// Type of a value in the current function.
    pub fn value_type(&self, value: &Value) -> Result<IrType> {
        self.current()?.value_type(value)
    }

    fn emit(&mut self, kind: InstKind, ty: IrType, name: Option<&str>) -> Result<InstId> {
        let pos = self.position()?;
        let function = self.module.function_mut(pos.func)?;
        if function.is_terminated(pos.block) {
            let block = function
                .block(pos.block)
                .map(|b| b.label.clone())
                .unwrap_or_default();
            return Err(IrError::BlockTerminated { block });
        }
        Ok(function.push_inst(
            pos.block,
            Instruction {
                kind,
                ty,
                name: name.map(str::to_string),
            },
        ))
    }

    fn emit_value(&mut self, kind: InstKind, ty: IrType, name: Option<&str>) -> Result<Value> {
        self.emit(kind, ty, name).map(Value::Inst)
    }

    fn expect_type(&self, value: &Value, expected: &IrType, context: &'static str) -> Result<()> {
        let found = self.value_type(value)?;
        if &found != expected {
            return Err(IrError::TypeMismatch {
                context,
                expected: expected.clone(),
                found,
            });
        }
        Ok(())
    }

    // ==========================================================================
    // Memory
    // ==========================================================================

    /// Reserve a stack slot in the entry block of the current function.
    ///
    /// The slot is hoisted ahead of any non-alloca instruction so that slots
    /// created inside loops are allocated once per call.
    pub fn build_entry_alloca(&mut self, ty: IrType, name: &str) -> Result<Value> {
        let size = ty
            .size_in_bytes()
            .ok_or_else(|| IrError::Unsized { ty: ty.clone() })?;
        let pos = self.position()?;
        let function = self.module.function_mut(pos.func)?;
        let entry = BlockId(0);
        let index = function.leading_allocas(entry);
        let id = function.insert_inst(
            entry,
            index,
            Instruction {
                kind: InstKind::Alloca {
                    ty: ty.clone(),
                    size,
                },
                ty: ty.pointer_to(),
                name: Some(name.to_string()),
            },
        );
        Ok(Value::Inst(id))
    }

    /// Load the value behind `ptr`.
    pub fn build_load(&mut self, ptr: Value) -> Result<Value> {
        let ptr_ty = self.value_type(&ptr)?;
        let Some(pointee) = ptr_ty.pointee().cloned() else {
            return Err(IrError::NotAPointer {
                context: "load",
                found: ptr_ty,
            });
        };
        self.emit_value(InstKind::Load { ptr }, pointee, None)
    }

    /// Store `value` through `ptr`.
    pub fn build_store(&mut self, value: Value, ptr: Value) -> Result<()> {
        let ptr_ty = self.value_type(&ptr)?;
        let Some(pointee) = ptr_ty.pointee().cloned() else {
            return Err(IrError::NotAPointer {
                context: "store",
                found: ptr_ty,
            });
        };
        self.expect_type(&value, &pointee, "store")?;
        self.emit(InstKind::Store { value, ptr }, IrType::Void, None)?;
        Ok(())
    }

    // ==========================================================================
    // Arithmetic
    // ==========================================================================

    /// Two-operand arithmetic. Both operands must share a type suitable for `op`.
    pub fn build_arith(&mut self, op: ArithOp, lhs: Value, rhs: Value) -> Result<Value> {
        let ty = self.value_type(&lhs)?;
        self.expect_type(&rhs, &ty, "arithmetic")?;
        let ok = if op.is_float() {
            ty.is_float_like()
        } else {
            ty == IrType::I32
        };
        if !ok {
            return Err(IrError::TypeMismatch {
                context: "arithmetic",
                expected: if op.is_float() {
                    IrType::F32
                } else {
                    IrType::I32
                },
                found: ty,
            });
        }
        self.emit_value(InstKind::Arith { op, lhs, rhs }, ty, None)
    }

    /// Scalar comparison producing `i1`.
    pub fn build_cmp(&mut self, pred: CmpPred, lhs: Value, rhs: Value) -> Result<Value> {
        let ty = self.value_type(&lhs)?;
        self.expect_type(&rhs, &ty, "comparison")?;
        let float = match ty {
            IrType::F32 => true,
            IrType::I32 | IrType::Bool => false,
            other => {
                return Err(IrError::TypeMismatch {
                    context: "comparison",
                    expected: IrType::F32,
                    found: other,
                });
            }
        };
        self.emit_value(
            InstKind::Cmp {
                pred,
                float,
                lhs,
                rhs,
            },
            IrType::Bool,
            None,
        )
    }

    /// Arithmetic negation of an int, float, or float vector.
    pub fn build_neg(&mut self, value: Value) -> Result<Value> {
        let ty = self.value_type(&value)?;
        if !(ty.is_float_like() || ty == IrType::I32) {
            return Err(IrError::TypeMismatch {
                context: "negation",
                expected: IrType::F32,
                found: ty,
            });
        }
        self.emit_value(InstKind::Neg { value }, ty, None)
    }

    /// Boolean complement.
    pub fn build_not(&mut self, value: Value) -> Result<Value> {
        self.expect_type(&value, &IrType::Bool, "not")?;
        self.emit_value(InstKind::Not { value }, IrType::Bool, None)
    }

    /// Scalar numeric conversion.
    pub fn build_cast(&mut self, op: CastOp, value: Value) -> Result<Value> {
        let (from, to) = match op {
            CastOp::SiToFp => (IrType::I32, IrType::F32),
            CastOp::FpToSi => (IrType::F32, IrType::I32),
        };
        self.expect_type(&value, &from, "cast")?;
        self.emit_value(InstKind::Cast { op, value }, to, None)
    }

    /// Assemble a float vector from 2 to 4 float lanes.
    pub fn build_vector(&mut self, lanes: Vec<Value>) -> Result<Value> {
        for lane in &lanes {
            self.expect_type(lane, &IrType::F32, "vector lane")?;
        }
        let width = lanes.len() as u8;
        self.emit_value(InstKind::BuildVector { lanes }, IrType::Vector(width), None)
    }

    /// Broadcast a float scalar to a vector.
    pub fn build_splat(&mut self, value: Value, lanes: u8) -> Result<Value> {
        self.expect_type(&value, &IrType::F32, "splat")?;
        self.emit_value(InstKind::Splat { value, lanes }, IrType::Vector(lanes), None)
    }

    // ==========================================================================
    // Calls and control flow
    // ==========================================================================

    /// Call `callee`. Returns [`Value::Void`] for void callees.
    pub fn build_call(&mut self, callee: FuncId, args: Vec<Value>) -> Result<Value> {
        let (name, signature) = {
            let f = self.module.function(callee)?;
            (f.name().to_string(), f.signature().clone())
        };
        if signature.params.len() != args.len() {
            return Err(IrError::ArgumentCount {
                function: name,
                expected: signature.params.len(),
                got: args.len(),
            });
        }
        for (arg, param) in args.iter().zip(&signature.params) {
            self.expect_type(arg, param, "call argument")?;
        }
        let ret = signature.ret.clone();
        let id = self.emit(InstKind::Call { callee, args }, ret.clone(), None)?;
        Ok(if ret.is_void() {
            Value::Void
        } else {
            Value::Inst(id)
        })
    }

    /// Merge values from predecessor blocks.
    pub fn build_phi(&mut self, ty: IrType, incoming: Vec<(Value, BlockId)>) -> Result<Value> {
        for (value, _) in &incoming {
            self.expect_type(value, &ty, "phi")?;
        }
        self.emit_value(InstKind::Phi { incoming }, ty, None)
    }

    /// Return from the current function.
    pub fn build_ret(&mut self, value: Option<Value>) -> Result<()> {
        let ret = self.current()?.signature().ret.clone();
        match &value {
            Some(v) => self.expect_type(v, &ret, "return")?,
            None if !ret.is_void() => {
                return Err(IrError::TypeMismatch {
                    context: "return",
                    expected: ret,
                    found: IrType::Void,
                });
            }
            None => {}
        }
        self.emit(InstKind::Ret { value }, IrType::Void, None)?;
        Ok(())
    }

    /// Unconditional branch.
    pub fn build_br(&mut self, target: BlockId) -> Result<()> {
        self.emit(InstKind::Br { target }, IrType::Void, None)?;
        Ok(())
    }

    /// Terminate a block control never reaches.
    pub fn build_unreachable(&mut self) -> Result<()> {
        self.emit(InstKind::Unreachable, IrType::Void, None)?;
        Ok(())
    }

    /// Conditional branch.
    pub fn build_cond_br(
        &mut self,
        cond: Value,
        then_block: BlockId,
        else_block: BlockId,
    ) -> Result<()> {
        self.expect_type(&cond, &IrType::Bool, "branch condition")?;
        self.emit(
            InstKind::CondBr {
                cond,
                then_block,
                else_block,
            },
            IrType::Void,
            None,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Constant;

    fn setup(module: &mut IrModule, params: Vec<IrType>, ret: IrType) -> (IrBuilder<'_>, FuncId) {
        let mut builder = IrBuilder::new(module);
        let f = builder
            .declare_function("f", Signature::new(params, ret), Linkage::Local)
            .unwrap();
        let entry = builder.append_block(f, "entry").unwrap();
        builder.position_at_end(f, entry);
        (builder, f)
    }

    #[test]
    fn emission_without_position_fails() {
        let mut module = IrModule::new("m");
        let mut builder = IrBuilder::new(&mut module);
        assert_eq!(builder.build_ret(None), Err(IrError::NoInsertPoint));
    }

    #[test]
    fn no_emission_after_terminator() {
        let mut module = IrModule::new("m");
        let (mut builder, _) = setup(&mut module, vec![], IrType::Void);
        builder.build_ret(None).unwrap();
        assert!(builder.is_terminated());
        assert!(matches!(
            builder.build_ret(None),
            Err(IrError::BlockTerminated { .. })
        ));
    }

    #[test]
    fn allocas_are_hoisted_to_entry() {
        let mut module = IrModule::new("m");
        let (mut builder, f) = setup(&mut module, vec![IrType::F32], IrType::Void);
        let slot = builder.build_entry_alloca(IrType::F32, "x").unwrap();
        builder.build_store(Value::Arg(0), slot.clone()).unwrap();
        let body = builder.append_block(f, "body").unwrap();
        builder.build_br(body).unwrap();
        builder.position_at_end(f, body);
        builder.build_entry_alloca(IrType::I32, "y").unwrap();
        builder.build_ret(None).unwrap();

        let function = module.function(f).unwrap();
        let entry: Vec<_> = function.block_insts(BlockId(0)).collect();
        assert!(matches!(entry[0].kind, InstKind::Alloca { .. }));
        assert!(matches!(entry[1].kind, InstKind::Alloca { .. }));
        assert!(matches!(entry[2].kind, InstKind::Store { .. }));
        assert!(function.verify().is_ok());
    }

    #[test]
    fn store_checks_pointee_type() {
        let mut module = IrModule::new("m");
        let (mut builder, _) = setup(&mut module, vec![], IrType::Void);
        let slot = builder.build_entry_alloca(IrType::F32, "x").unwrap();
        let result = builder.build_store(Constant::Int(1).into(), slot);
        assert!(matches!(result, Err(IrError::TypeMismatch { .. })));
    }

    #[test]
    fn unsized_alloca_fails() {
        let mut module = IrModule::new("m");
        let (mut builder, _) = setup(&mut module, vec![], IrType::Void);
        let result = builder.build_entry_alloca(IrType::Opaque("light".into()), "l");
        assert!(matches!(result, Err(IrError::Unsized { .. })));
    }

    #[test]
    fn call_checks_arity_and_types() {
        let mut module = IrModule::new("m");
        let (mut builder, _) = setup(&mut module, vec![], IrType::Void);
        let callee = builder
            .declare_function(
                "g",
                Signature::new(vec![IrType::F32], IrType::F32),
                Linkage::External,
            )
            .unwrap();
        assert!(matches!(
            builder.build_call(callee, vec![]),
            Err(IrError::ArgumentCount { .. })
        ));
        assert!(matches!(
            builder.build_call(callee, vec![Constant::Int(1).into()]),
            Err(IrError::TypeMismatch { .. })
        ));
        let v = builder
            .build_call(callee, vec![Constant::float(1.0).into()])
            .unwrap();
        assert_eq!(builder.value_type(&v).unwrap(), IrType::F32);
    }

    #[test]
    fn void_call_yields_void_value() {
        let mut module = IrModule::new("m");
        let (mut builder, _) = setup(&mut module, vec![], IrType::Void);
        let callee = builder
            .declare_function("h", Signature::new(vec![], IrType::Void), Linkage::External)
            .unwrap();
        assert_eq!(builder.build_call(callee, vec![]).unwrap(), Value::Void);
    }

    #[test]
    fn return_type_is_checked() {
        let mut module = IrModule::new("m");
        let (mut builder, _) = setup(&mut module, vec![], IrType::F32);
        assert!(builder.build_ret(None).is_err());
        assert!(builder.build_ret(Some(Constant::Int(0).into())).is_err());
        assert!(builder.build_ret(Some(Constant::float(0.0).into())).is_ok());
    }

    #[test]
    fn block_labels_are_unique() {
        let mut module = IrModule::new("m");
        let (mut builder, f) = setup(&mut module, vec![], IrType::Void);
        builder.append_block(f, "then").unwrap();
        builder.append_block(f, "then").unwrap();
        let function = builder.module().function(f).unwrap();
        let labels: Vec<_> = function.blocks().iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["entry", "then", "then.1"]);
    }

    #[test]
    fn arith_rejects_mixed_types() {
        let mut module = IrModule::new("m");
        let (mut builder, _) = setup(&mut module, vec![IrType::I32, IrType::F32], IrType::Void);
        assert!(
            builder
                .build_arith(ArithOp::FAdd, Value::Arg(0), Value::Arg(1))
                .is_err()
        );
        assert!(
            builder
                .build_arith(ArithOp::FAdd, Value::Arg(1), Value::Arg(1))
                .is_ok()
        );
    }
}
