//! IR values and constants.

use std::fmt;

use ordered_float::OrderedFloat;

use crate::IrType;

/// Index of a function within an [`IrModule`](crate::IrModule).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FuncId(pub u32);

/// Index of a basic block within its function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub u32);

/// Index of an instruction within its function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstId(pub u32);

/// A compile-time constant.
///
/// Floats are wrapped in [`OrderedFloat`] so constants can be compared and hashed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    /// `i1` literal.
    Bool(bool),
    /// `i32` literal.
    Int(i32),
    /// `float` literal.
    Float(OrderedFloat<f32>),
    /// Null pointer of the given pointer type.
    Null(IrType),
    /// All-zero value of the given type.
    Zero(IrType),
}

impl Constant {
    /// Float constant.
    pub fn float(value: f32) -> Self {
        Constant::Float(OrderedFloat(value))
    }

    /// Type of the constant.
    pub fn ty(&self) -> IrType {
        match self {
            Constant::Bool(_) => IrType::Bool,
            Constant::Int(_) => IrType::I32,
            Constant::Float(_) => IrType::F32,
            Constant::Null(ty) | Constant::Zero(ty) => ty.clone(),
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Bool(b) => write!(f, "{}", b),
            Constant::Int(i) => write!(f, "{}", i),
            Constant::Float(v) => write!(f, "{:?}", v.into_inner()),
            Constant::Null(_) => f.write_str("null"),
            Constant::Zero(_) => f.write_str("zeroinitializer"),
        }
    }
}

/// An operand or result in the IR.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// An inline constant.
    Const(Constant),
    /// The n-th incoming parameter of the enclosing function.
    Arg(u32),
    /// The result of an instruction.
    Inst(InstId),
    /// The absence of a value, produced by `void` calls.
    Void,
}

impl Value {
    /// Whether this is the `void` marker.
    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }
}

impl From<Constant> for Value {
    fn from(constant: Constant) -> Self {
        Value::Const(constant)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Const(c) => write!(f, "{}", c),
            Value::Arg(i) => write!(f, "%arg{}", i),
            Value::Inst(id) => write!(f, "%{}", id.0),
            Value::Void => f.write_str("void"),
        }
    }
}
