//! TypeTable - the interning registry of type descriptors.
//!
//! Descriptors are stored once, keyed by [`TypeHash`], with secondary indexes by
//! name and by mangling token. During code generation the table is read-only.
//!
//! # Example
//!
//! ```
//! use gdsl_core::builtins;
//! use gdsl_registry::TypeTable;
//!
//! let types = TypeTable::with_builtins();
//! assert_eq!(types.lookup("float3"), Some(builtins::FLOAT3));
//! assert_eq!(types.name_of(builtins::ISECT), Some("isect"));
//! ```

use std::fmt;

use gdsl_core::{CompilationError, RegistrationError, Result, Span, TypeHash};
use gdsl_ir::IrType;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::TypeDescriptor;
use crate::builtins;

/// Interned type descriptors.
#[derive(Default)]
pub struct TypeTable {
    types: FxHashMap<TypeHash, Box<dyn TypeDescriptor>>,
    by_name: FxHashMap<String, TypeHash>,
    by_mangle: FxHashMap<String, TypeHash>,
}

impl TypeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table holding every built-in type.
    pub fn with_builtins() -> Self {
        let mut table = Self::new();
        for descriptor in builtins::all() {
            table.insert(descriptor);
        }
        table
    }

    /// Register a descriptor.
    ///
    /// Fails if the name is taken, or if the hash or mangling token collides with
    /// another type.
    pub fn register(
        &mut self,
        descriptor: Box<dyn TypeDescriptor>,
    ) -> std::result::Result<TypeHash, RegistrationError> {
        let name = descriptor.name().to_string();
        if self.by_name.contains_key(&name) {
            return Err(RegistrationError::DuplicateType(name));
        }
        let hash = descriptor.type_hash();
        let clash = self
            .types
            .get(&hash)
            .map(|d| d.name().to_string())
            .or_else(|| {
                self.by_mangle
                    .get(descriptor.mangle())
                    .and_then(|h| self.name_of(*h))
                    .map(str::to_string)
            });
        if let Some(existing) = clash {
            return Err(RegistrationError::Collision { name, existing });
        }
        Ok(self.insert(descriptor))
    }

    fn insert(&mut self, descriptor: Box<dyn TypeDescriptor>) -> TypeHash {
        let hash = descriptor.type_hash();
        trace!(name = descriptor.name(), mangle = descriptor.mangle(), %hash, "register type");
        self.by_name.insert(descriptor.name().to_string(), hash);
        self.by_mangle.insert(descriptor.mangle().to_string(), hash);
        self.types.insert(hash, descriptor);
        hash
    }

    /// A descriptor by hash.
    pub fn get(&self, hash: TypeHash) -> Option<&dyn TypeDescriptor> {
        self.types.get(&hash).map(|d| d.as_ref())
    }

    /// A descriptor by name.
    pub fn get_by_name(&self, name: &str) -> Option<&dyn TypeDescriptor> {
        self.lookup(name).and_then(|h| self.get(h))
    }

    /// Hash of a named type.
    pub fn lookup(&self, name: &str) -> Option<TypeHash> {
        self.by_name.get(name).copied()
    }

    /// Hash of the type with a mangling token.
    pub fn lookup_mangle(&self, token: &str) -> Option<TypeHash> {
        self.by_mangle.get(token).copied()
    }

    /// Name of a type.
    pub fn name_of(&self, hash: TypeHash) -> Option<&str> {
        self.get(hash).map(|d| d.name())
    }

    /// Mangling token of a type.
    pub fn mangle_of(&self, hash: TypeHash) -> Option<&str> {
        self.get(hash).map(|d| d.mangle())
    }

    /// A descriptor by hash, as a compilation error if absent.
    ///
    /// Hashes reaching code generation come from the table, so a miss is an
    /// internal error.
    pub fn resolve(&self, hash: TypeHash) -> Result<&dyn TypeDescriptor> {
        self.get(hash)
            .ok_or_else(|| CompilationError::internal(format!("unregistered type {hash}")))
    }

    /// A descriptor by name, as a compilation error if absent.
    pub fn resolve_name(&self, name: &str, span: Span) -> Result<TypeHash> {
        self.lookup(name).ok_or_else(|| CompilationError::UnknownType {
            name: name.to_string(),
            span,
        })
    }

    /// IR representation of a type. Marker types fail with `NoRepresentation`.
    pub fn representation(&self, hash: TypeHash) -> Result<IrType> {
        let descriptor = self.resolve(hash)?;
        descriptor
            .representation()
            .ok_or_else(|| CompilationError::NoRepresentation {
                name: descriptor.name().to_string(),
                span: Span::default(),
            })
    }

    /// Whether a type is registered.
    pub fn contains(&self, hash: TypeHash) -> bool {
        self.types.contains_key(&hash)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All descriptors, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn TypeDescriptor> {
        self.types.values().map(|d| d.as_ref())
    }
}

impl fmt::Debug for TypeTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.by_name.keys().collect();
        names.sort();
        f.debug_struct("TypeTable").field("types", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdsl_core::builtins as hashes;

    #[derive(Debug)]
    struct Custom(&'static str, &'static str);

    impl TypeDescriptor for Custom {
        fn name(&self) -> &str {
            self.0
        }
        fn mangle(&self) -> &str {
            self.1
        }
        fn representation(&self) -> Option<IrType> {
            Some(IrType::F32)
        }
    }

    #[test]
    fn builtins_are_registered() {
        let types = TypeTable::with_builtins();
        assert_eq!(types.len(), 14);
        for (name, token) in [
            ("void", "v"),
            ("bool", "b"),
            ("int", "i"),
            ("float", "f"),
            ("float2", "f2"),
            ("float3", "f3"),
            ("float4", "f4"),
            ("ray", "r"),
            ("isect", "is"),
            ("light", "lt"),
            ("dfunc", "df"),
            ("shader_handle", "sh"),
            ("context_ptr", "ctx"),
            ("module", "mod"),
        ] {
            let hash = types.lookup(name).unwrap();
            assert_eq!(types.mangle_of(hash), Some(token), "{name}");
            assert_eq!(types.lookup_mangle(token), Some(hash));
        }
    }

    #[test]
    fn builtin_hashes_match_constants() {
        let types = TypeTable::with_builtins();
        assert_eq!(types.lookup("dfunc"), Some(hashes::DFUNC));
        assert_eq!(types.lookup("context_ptr"), Some(hashes::CONTEXT_PTR));
    }

    #[test]
    fn duplicate_name_rejected() {
        let mut types = TypeTable::with_builtins();
        let err = types.register(Box::new(Custom("float", "zz"))).unwrap_err();
        assert_eq!(err, RegistrationError::DuplicateType("float".into()));
    }

    #[test]
    fn duplicate_mangle_rejected() {
        let mut types = TypeTable::with_builtins();
        let err = types.register(Box::new(Custom("spectrum", "f"))).unwrap_err();
        assert!(matches!(err, RegistrationError::Collision { .. }));
    }

    #[test]
    fn custom_type_registers() {
        let mut types = TypeTable::with_builtins();
        let hash = types.register(Box::new(Custom("spectrum", "sp"))).unwrap();
        assert_eq!(types.name_of(hash), Some("spectrum"));
        assert_eq!(types.representation(hash).unwrap(), IrType::F32);
    }

    #[test]
    fn marker_type_has_no_representation() {
        let types = TypeTable::with_builtins();
        let err = types.representation(hashes::MODULE).unwrap_err();
        assert!(matches!(err, CompilationError::NoRepresentation { .. }));
    }

    #[test]
    fn unknown_type_name() {
        let types = TypeTable::with_builtins();
        let err = types.resolve_name("spectrum", Span::new(1, 1, 8)).unwrap_err();
        assert!(matches!(err, CompilationError::UnknownType { .. }));
    }
}
