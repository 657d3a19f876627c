//! Textual dump of IR in an LLVM-like syntax, for debugging and tests.

use std::fmt;

use crate::{InstKind, Instruction, IrFunction, IrModule, Linkage};

impl fmt::Display for IrModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "; module '{}'", self.name())?;
        for (_, function) in self.functions() {
            writeln!(f)?;
            write_function(f, self, function)?;
        }
        Ok(())
    }
}

fn write_function(f: &mut fmt::Formatter<'_>, module: &IrModule, func: &IrFunction) -> fmt::Result {
    let keyword = if func.is_declaration() {
        "declare"
    } else {
        "define"
    };
    let linkage = match func.linkage() {
        Linkage::Local => "internal ",
        Linkage::External => "",
    };
    write!(
        f,
        "{} {}{} @{}(",
        keyword,
        linkage,
        func.signature().ret,
        func.name()
    )?;
    for (i, param) in func.signature().params.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{} %arg{}", param, i)?;
    }
    f.write_str(")")?;

    if func.is_declaration() {
        return writeln!(f);
    }

    writeln!(f, " {{")?;
    for block in func.blocks() {
        writeln!(f, "{}:", block.label)?;
        for id in &block.insts {
            let Some(inst) = func.inst(*id) else {
                continue;
            };
            f.write_str("  ")?;
            if inst.has_result() {
                write!(f, "%{} = ", id.0)?;
            }
            write_inst(f, module, func, inst)?;
            if let Some(name) = &inst.name {
                write!(f, " ; {}", name)?;
            }
            writeln!(f)?;
        }
    }
    writeln!(f, "}}")
}

fn label(func: &IrFunction, id: crate::BlockId) -> &str {
    func.block(id).map(|b| b.label.as_str()).unwrap_or("?")
}

fn write_inst(
    f: &mut fmt::Formatter<'_>,
    module: &IrModule,
    func: &IrFunction,
    inst: &Instruction,
) -> fmt::Result {
    match &inst.kind {
        InstKind::Alloca { ty, size } => write!(f, "alloca {}, size {}", ty, size),
        InstKind::Load { ptr } => write!(f, "load {}, {}", inst.ty, ptr),
        InstKind::Store { value, ptr } => write!(f, "store {}, {}", value, ptr),
        InstKind::Arith { op, lhs, rhs } => {
            write!(f, "{} {} {}, {}", op.mnemonic(), inst.ty, lhs, rhs)
        }
        InstKind::Cmp {
            pred,
            float,
            lhs,
            rhs,
        } => {
            let (kind, prefix) = if *float { ("fcmp", "o") } else { ("icmp", "") };
            write!(f, "{} {}{} {}, {}", kind, prefix, pred.mnemonic(), lhs, rhs)
        }
        InstKind::Neg { value } => write!(f, "neg {} {}", inst.ty, value),
        InstKind::Not { value } => write!(f, "not {}", value),
        InstKind::Cast { op, value } => write!(f, "{} {} to {}", op.mnemonic(), value, inst.ty),
        InstKind::BuildVector { lanes } => {
            write!(f, "vector {} [", inst.ty)?;
            for (i, lane) in lanes.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", lane)?;
            }
            f.write_str("]")
        }
        InstKind::Splat { value, lanes } => write!(f, "splat {} x {}", value, lanes),
        InstKind::Call { callee, args } => {
            let name = module
                .function(*callee)
                .map(IrFunction::name)
                .unwrap_or("?");
            write!(f, "call {} @{}(", inst.ty, name)?;
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", arg)?;
            }
            f.write_str(")")
        }
        InstKind::Phi { incoming } => {
            write!(f, "phi {} ", inst.ty)?;
            for (i, (value, block)) in incoming.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "[{}, %{}]", value, label(func, *block))?;
            }
            Ok(())
        }
        InstKind::Ret { value: Some(v) } => write!(f, "ret {}", v),
        InstKind::Ret { value: None } => f.write_str("ret void"),
        InstKind::Br { target } => write!(f, "br %{}", label(func, *target)),
        InstKind::Unreachable => f.write_str("unreachable"),
        InstKind::CondBr {
            cond,
            then_block,
            else_block,
        } => write!(
            f,
            "br {}, %{}, %{}",
            cond,
            label(func, *then_block),
            label(func, *else_block)
        ),
    }
}

#[cfg(test)]
mod tests {
    use crate::{ArithOp, IrBuilder, IrModule, IrType, Linkage, Signature, Value};

    #[test]
    fn prints_declarations_and_definitions() {
        let mut module = IrModule::new("shaders");
        let mut builder = IrBuilder::new(&mut module);
        builder
            .declare_function(
                "gd_builtin_dfunc_empty",
                Signature::new(vec![], IrType::opaque_ptr("dfunc")),
                Linkage::External,
            )
            .unwrap();
        let f = builder
            .declare_function(
                "add$f.f",
                Signature::new(vec![IrType::F32, IrType::F32], IrType::F32),
                Linkage::Local,
            )
            .unwrap();
        let entry = builder.append_block(f, "entry").unwrap();
        builder.position_at_end(f, entry);
        let sum = builder
            .build_arith(ArithOp::FAdd, Value::Arg(0), Value::Arg(1))
            .unwrap();
        builder.build_ret(Some(sum)).unwrap();

        let text = module.to_string();
        assert!(text.contains("declare %dfunc* @gd_builtin_dfunc_empty()"));
        assert!(text.contains("define internal float @add$f.f(float %arg0, float %arg1) {"));
        assert!(text.contains("%0 = fadd float %arg0, %arg1"));
        assert!(text.contains("ret %0"));
    }
}
