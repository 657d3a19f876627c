//! Overload resolution for function calls.
//!
//! ## Algorithm
//!
//! 1. Collect the candidates declared under the callee's name
//! 2. Filter them by argument count
//! 3. Find a conversion for every argument, dropping candidates that need
//!    a conversion that does not exist
//! 4. Rank the viable candidates by total conversion cost

mod ranking;

pub use ranking::find_best_match;

use gdsl_core::{CompilationError, Result, Span, TypeHash};
use gdsl_registry::TypeTable;
use tracing::trace;

use crate::conversion::{Conversion, find_conversion};
use crate::options::CompilerOptions;
use crate::symbols::{EntryId, FunctionTable};

/// Result of successful overload resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct OverloadMatch {
    /// The selected function.
    pub entry: EntryId,
    /// Conversion for each argument.
    pub conversions: Vec<Conversion>,
    /// Total conversion cost (lower is better).
    pub total_cost: u32,
}

impl OverloadMatch {
    /// Number of arguments passed without conversion.
    pub fn exact_matches(&self) -> usize {
        self.conversions.iter().filter(|c| c.is_exact()).count()
    }
}

/// Resolve a call to `name` with arguments of `arg_types`.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn resolve_overload(
    functions: &FunctionTable,
    types: &TypeTable,
    name: &str,
    arg_types: &[TypeHash],
    options: &CompilerOptions,
    span: Span,
) -> Result<OverloadMatch> {
    if !functions.contains(name) {
        return Err(CompilationError::UnknownFunction {
            name: name.to_string(),
            span,
        });
    }

    let viable: Vec<OverloadMatch> = functions
        .overloads(name)
        .filter(|(_, entry)| entry.prototype.args().len() == arg_types.len())
        .filter_map(|(id, entry)| {
            let conversions = entry
                .prototype
                .args()
                .iter()
                .zip(arg_types)
                .map(|(param, &arg)| find_conversion(arg, param.ty, options))
                .collect::<Option<Vec<_>>>()?;
            let total_cost = conversions.iter().map(|c| c.cost).sum();
            Some(OverloadMatch {
                entry: id,
                conversions,
                total_cost,
            })
        })
        .collect();

    trace!(name, viable = viable.len(), "overload candidates");

    if viable.is_empty() {
        let args: Vec<_> = arg_types
            .iter()
            .map(|&t| types.name_of(t).unwrap_or("?"))
            .collect();
        return Err(CompilationError::NoMatchingOverload {
            name: name.to_string(),
            args: args.join(", "),
            span,
        });
    }

    find_best_match(&viable, functions, types, span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prototype::{FunctionArgument, Prototype};
    use gdsl_core::builtins;
    use gdsl_ir::FuncId;

    fn declare(table: &mut FunctionTable, name: &str, params: &[TypeHash]) -> EntryId {
        let args = params
            .iter()
            .enumerate()
            .map(|(i, &ty)| FunctionArgument::new(format!("a{i}"), ty, Span::default()))
            .collect();
        let id = table.len() as u32;
        table.insert(
            Prototype::local(name, builtins::VOID, args, Span::default()),
            FuncId(id),
        )
    }

    fn resolve(table: &FunctionTable, name: &str, args: &[TypeHash]) -> Result<OverloadMatch> {
        resolve_overload(
            table,
            &TypeTable::with_builtins(),
            name,
            args,
            &CompilerOptions::default(),
            Span::point(1, 1),
        )
    }

    #[test]
    fn exact_match_wins() {
        let mut table = FunctionTable::new();
        let ab = declare(&mut table, "f", &[builtins::DFUNC, builtins::FLOAT3]);
        declare(&mut table, "f", &[builtins::DFUNC, builtins::FLOAT4]);

        let m = resolve(&table, "f", &[builtins::DFUNC, builtins::FLOAT3]).unwrap();
        assert_eq!(m.entry, ab);
        assert_eq!(m.total_cost, 0);
    }

    #[test]
    fn widening_is_used_when_needed() {
        let mut table = FunctionTable::new();
        let f = declare(&mut table, "scale", &[builtins::FLOAT]);
        let m = resolve(&table, "scale", &[builtins::INT]).unwrap();
        assert_eq!(m.entry, f);
        assert_eq!(m.conversions, vec![Conversion::INT_TO_FLOAT]);
    }

    #[test]
    fn exact_beats_widening() {
        let mut table = FunctionTable::new();
        declare(&mut table, "g", &[builtins::FLOAT]);
        let int = declare(&mut table, "g", &[builtins::INT]);
        let m = resolve(&table, "g", &[builtins::INT]).unwrap();
        assert_eq!(m.entry, int);
    }

    #[test]
    fn equal_cost_is_ambiguous() {
        let mut table = FunctionTable::new();
        declare(&mut table, "h", &[builtins::FLOAT, builtins::INT]);
        declare(&mut table, "h", &[builtins::INT, builtins::FLOAT]);
        let err = resolve(&table, "h", &[builtins::INT, builtins::INT]).unwrap_err();
        assert!(matches!(err, CompilationError::AmbiguousOverload { .. }));
    }

    #[test]
    fn arity_mismatch_is_no_match() {
        let mut table = FunctionTable::new();
        declare(&mut table, "add", &[builtins::FLOAT, builtins::FLOAT]);
        let err = resolve(&table, "add", &[builtins::FLOAT]).unwrap_err();
        match err {
            CompilationError::NoMatchingOverload { name, args, .. } => {
                assert_eq!(name, "add");
                assert_eq!(args, "float");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_function() {
        let table = FunctionTable::new();
        let err = resolve(&table, "nope", &[]).unwrap_err();
        assert!(matches!(err, CompilationError::UnknownFunction { .. }));
    }

    #[test]
    fn domain_types_do_not_convert() {
        let mut table = FunctionTable::new();
        declare(&mut table, "shade", &[builtins::SHADER_HANDLE]);
        let err = resolve(&table, "shade", &[builtins::LIGHT]).unwrap_err();
        assert!(matches!(err, CompilationError::NoMatchingOverload { .. }));
    }
}
