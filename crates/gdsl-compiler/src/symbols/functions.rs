//! Flat function table with overload sets.
//!
//! Every in-language name maps to an ordered list of candidate entries. An
//! entry is unique per parameter list: declaring the same parameters again
//! reuses the entry when the return type and linkage agree, and is a
//! [`CompilationError::PrototypeConflict`] otherwise.

use gdsl_core::{CompilationError, Result, Span};
use gdsl_ir::FuncId;
use rustc_hash::FxHashMap;

use crate::prototype::Prototype;

/// Index of a [`FunctionEntry`] in its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub usize);

/// A declared function.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionEntry {
    pub prototype: Prototype,
    /// IR declaration backing this entry
    pub func: FuncId,
    /// Whether a body has been generated
    pub defined: bool,
}

/// All functions declared in the unit.
#[derive(Debug, Default)]
pub struct FunctionTable {
    entries: Vec<FunctionEntry>,
    by_name: FxHashMap<String, Vec<EntryId>>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the entry with the same name and parameter types as `prototype`.
    ///
    /// Returns `Ok(None)` if there is none, and fails if the entry disagrees
    /// on return type or linkage.
    pub fn find(&self, prototype: &Prototype) -> Result<Option<EntryId>> {
        let Some(existing) = self
            .overloads(prototype.name())
            .find(|(_, entry)| entry.prototype.args_match(prototype))
        else {
            return Ok(None);
        };
        let (id, entry) = existing;

        if entry.prototype.return_type() != prototype.return_type() {
            return Err(CompilationError::PrototypeConflict {
                name: prototype.name().to_string(),
                message: "redeclared with a different return type".to_string(),
                span: prototype.span(),
            });
        }
        if entry.prototype.extern_name() != prototype.extern_name() {
            return Err(CompilationError::PrototypeConflict {
                name: prototype.name().to_string(),
                message: "redeclared with a different linkage".to_string(),
                span: prototype.span(),
            });
        }
        Ok(Some(id))
    }

    /// Append a new entry. Callers check [`find`](Self::find) first.
    pub fn insert(&mut self, prototype: Prototype, func: FuncId) -> EntryId {
        let id = EntryId(self.entries.len());
        self.by_name
            .entry(prototype.name().to_string())
            .or_default()
            .push(id);
        self.entries.push(FunctionEntry {
            prototype,
            func,
            defined: false,
        });
        id
    }

    /// Record that `id` now has a body.
    pub fn mark_defined(&mut self, id: EntryId, span: Span) -> Result<()> {
        let entry = self
            .entries
            .get_mut(id.0)
            .ok_or_else(|| CompilationError::internal(format!("unknown function entry {}", id.0)))?;
        if entry.defined {
            return Err(CompilationError::FunctionRedefinition {
                name: entry.prototype.name().to_string(),
                span,
            });
        }
        entry.defined = true;
        Ok(())
    }

    /// Forget a body, e.g. after its generation failed.
    pub fn mark_undefined(&mut self, id: EntryId) {
        if let Some(entry) = self.entries.get_mut(id.0) {
            entry.defined = false;
        }
    }

    /// Candidates for `name` in declaration order.
    pub fn overloads<'t>(
        &'t self,
        name: &str,
    ) -> impl Iterator<Item = (EntryId, &'t FunctionEntry)> + 't {
        self.by_name
            .get(name)
            .into_iter()
            .flatten()
            .map(|&id| (id, &self.entries[id.0]))
    }

    /// Whether any function is declared under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn get(&self, id: EntryId) -> Option<&FunctionEntry> {
        self.entries.get(id.0)
    }

    /// Like [`get`](Self::get), failing with an internal error.
    pub fn entry(&self, id: EntryId) -> Result<&FunctionEntry> {
        self.get(id)
            .ok_or_else(|| CompilationError::internal(format!("unknown function entry {}", id.0)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (EntryId, &FunctionEntry)> {
        self.entries.iter().enumerate().map(|(i, e)| (EntryId(i), e))
    }
}
