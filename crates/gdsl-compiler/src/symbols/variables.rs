//! Lexically scoped variable table.
//!
//! Each scope records the slots declared in it, in declaration order. Lookup
//! walks scopes from innermost to outermost, so a nested declaration shadows
//! an outer one until its scope is popped.

use gdsl_core::{CompilationError, Result, Span, TypeHash};
use gdsl_ir::Value;
use rustc_hash::FxHashMap;

// ============================================================================
// Types
// ============================================================================

/// A declared variable and the stack slot holding it.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableSlot {
    /// Variable name
    pub name: String,
    /// Language type of the stored value
    pub ty: TypeHash,
    /// Pointer returned by the slot's alloca
    pub ptr: Value,
    /// Source location of the declaration
    pub span: Span,
    /// Scope depth the variable was declared at (1 = outermost scope)
    pub depth: usize,
}

#[derive(Debug, Default)]
struct Scope {
    slots: Vec<VariableSlot>,
    by_name: FxHashMap<String, usize>,
}

// ============================================================================
// VariableTable
// ============================================================================

/// Stack of variable scopes for the function being generated.
#[derive(Debug, Default)]
pub struct VariableTable {
    scopes: Vec<Scope>,
}

impl VariableTable {
    /// Create an empty table with no open scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a nested scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Close the innermost scope, returning its slots in declaration order.
    pub fn pop_scope(&mut self) -> Vec<VariableSlot> {
        self.scopes.pop().map(|s| s.slots).unwrap_or_default()
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Fail if `name` is already declared in the innermost scope.
    pub fn check_declarable(&self, name: &str, span: Span) -> Result<()> {
        let Some(scope) = self.scopes.last() else {
            return Err(CompilationError::Internal {
                message: format!("variable '{name}' declared outside any scope"),
                span,
            });
        };
        match scope.by_name.get(name) {
            Some(&index) => Err(CompilationError::VariableRedeclaration {
                name: name.to_string(),
                original_span: scope.slots[index].span,
                new_span: span,
            }),
            None => Ok(()),
        }
    }

    /// Declare a variable in the innermost scope.
    pub fn declare(&mut self, name: &str, ty: TypeHash, ptr: Value, span: Span) -> Result<()> {
        self.check_declarable(name, span)?;
        let depth = self.scopes.len();
        let Some(scope) = self.scopes.last_mut() else {
            return Err(CompilationError::internal("no open scope"));
        };
        scope.by_name.insert(name.to_string(), scope.slots.len());
        scope.slots.push(VariableSlot {
            name: name.to_string(),
            ty,
            ptr,
            span,
            depth,
        });
        Ok(())
    }

    /// Find the innermost declaration of `name`.
    pub fn lookup(&self, name: &str) -> Option<&VariableSlot> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.by_name.get(name).map(|&i| &scope.slots[i]))
    }

    /// Resolve `name` or fail with [`CompilationError::UnknownVariable`].
    pub fn resolve(&self, name: &str, span: Span) -> Result<&VariableSlot> {
        self.lookup(name).ok_or_else(|| CompilationError::UnknownVariable {
            name: name.to_string(),
            span,
        })
    }

    /// Slots declared at scope depth `depth` or deeper, outermost first.
    ///
    /// Cleanup walks this list in reverse.
    pub fn live_slots_from(&self, depth: usize) -> Vec<VariableSlot> {
        self.scopes
            .iter()
            .skip(depth.saturating_sub(1))
            .flat_map(|scope| scope.slots.iter().cloned())
            .collect()
    }

    /// Drop every scope.
    pub fn clear(&mut self) {
        self.scopes.clear();
    }
}
