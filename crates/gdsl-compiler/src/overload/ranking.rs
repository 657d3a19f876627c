//! Cost-based ranking for overload resolution.

use gdsl_core::{CompilationError, Result, Span};
use gdsl_registry::TypeTable;

use super::OverloadMatch;
use crate::symbols::FunctionTable;

/// Find the best match from viable candidates.
///
/// The lowest total cost wins. Among candidates tied on cost, the one with
/// the most exact matches wins; any remaining tie is ambiguous.
pub fn find_best_match(
    viable: &[OverloadMatch],
    functions: &FunctionTable,
    types: &TypeTable,
    span: Span,
) -> Result<OverloadMatch> {
    let Some(min_cost) = viable.iter().map(|m| m.total_cost).min() else {
        return Err(CompilationError::Internal {
            message: "overload ranking without candidates".to_string(),
            span,
        });
    };
    let cheapest: Vec<_> = viable.iter().filter(|m| m.total_cost == min_cost).collect();

    let most_exact = cheapest
        .iter()
        .map(|m| m.exact_matches())
        .max()
        .unwrap_or_default();
    let best: Vec<_> = cheapest
        .into_iter()
        .filter(|m| m.exact_matches() == most_exact)
        .collect();

    match best.as_slice() {
        [single] => Ok((*single).clone()),
        tied => Err(ambiguous_overload_error(tied, functions, types, span)),
    }
}

fn ambiguous_overload_error(
    tied: &[&OverloadMatch],
    functions: &FunctionTable,
    types: &TypeTable,
    span: Span,
) -> CompilationError {
    let described: Vec<_> = tied
        .iter()
        .filter_map(|m| functions.get(m.entry))
        .map(|entry| entry.prototype.describe(types))
        .collect();
    let name = tied
        .first()
        .and_then(|m| functions.get(m.entry))
        .map(|entry| entry.prototype.name().to_string())
        .unwrap_or_default();

    CompilationError::AmbiguousOverload {
        name,
        candidates: described.join(", "),
        span,
    }
}
