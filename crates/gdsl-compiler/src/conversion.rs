//! Implicit conversions between language types.
//!
//! The only implicit conversion is `int` to `float`. Distinct domain types
//! (vectors, distributions, handles) never convert into each other.

use gdsl_core::{Result, TypeHash, builtins};
use gdsl_ir::{CastOp, IrBuilder, Value};

use crate::options::CompilerOptions;

/// The kind of conversion being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionKind {
    /// No conversion needed (exact match).
    Identity,
    /// Signed integer to float.
    IntToFloat,
}

/// A conversion with its cost for overload resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    pub kind: ConversionKind,
    /// Lower is better.
    pub cost: u32,
}

impl Conversion {
    pub const IDENTITY: Conversion = Conversion {
        kind: ConversionKind::Identity,
        cost: 0,
    };

    pub const INT_TO_FLOAT: Conversion = Conversion {
        kind: ConversionKind::IntToFloat,
        cost: 1,
    };

    pub fn is_exact(&self) -> bool {
        self.kind == ConversionKind::Identity
    }

    /// Emit the conversion of `value`.
    pub fn apply(&self, builder: &mut IrBuilder<'_>, value: Value) -> Result<Value> {
        match self.kind {
            ConversionKind::Identity => Ok(value),
            ConversionKind::IntToFloat => Ok(builder.build_cast(CastOp::SiToFp, value)?),
        }
    }
}

/// The conversion from `from` to `to`, if one is allowed.
pub fn find_conversion(
    from: TypeHash,
    to: TypeHash,
    options: &CompilerOptions,
) -> Option<Conversion> {
    if from == to {
        return Some(Conversion::IDENTITY);
    }
    if options.implicit_conversions && from == builtins::INT && to == builtins::FLOAT {
        return Some(Conversion::INT_TO_FLOAT);
    }
    None
}
