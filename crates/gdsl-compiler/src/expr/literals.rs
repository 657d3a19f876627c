//! Literal expressions.

use gdsl_core::{Result, builtins};
use gdsl_ir::Constant;

use crate::ast::{Literal, LiteralExpr};
use crate::expr_value::ExprValue;

/// Literals lower to IR constants.
pub(super) fn compile_literal(lit: &LiteralExpr) -> Result<ExprValue> {
    let (ty, constant) = match lit.value {
        Literal::Bool(b) => (builtins::BOOL, Constant::Bool(b)),
        Literal::Int(i) => (builtins::INT, Constant::Int(i)),
        Literal::Float(f) => (builtins::FLOAT, Constant::float(f)),
    };
    Ok(ExprValue::owned(ty, constant.into()))
}
