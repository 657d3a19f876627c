//! Name-derived identity for types.
//!
//! [`TypeHash`] is a 64-bit hash of a canonical type name. Because the
//! computation is a `const fn`, the hashes of the built-in types are available
//! as constants in [`builtins`] and can be compared without touching the type
//! table.
//!
//! ```
//! use gdsl_core::{TypeHash, builtins};
//!
//! assert_eq!(TypeHash::from_name("float"), builtins::FLOAT);
//! assert_ne!(TypeHash::from_name("float3"), builtins::FLOAT);
//! ```

use std::fmt;
use xxhash_rust::const_xxh64::xxh64;

/// Domain marker mixed into every type hash.
const TYPE_DOMAIN: u64 = 0x2fac10b63a6cc57c;

/// A deterministic 64-bit hash identifying a type.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeHash(pub u64);

impl TypeHash {
    /// Hash of a canonical type name.
    #[inline]
    pub const fn from_name(name: &str) -> Self {
        TypeHash(TYPE_DOMAIN ^ xxh64(name.as_bytes(), 0))
    }
}

impl fmt::Debug for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeHash({:#018x})", self.0)
    }
}

impl fmt::Display for TypeHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#018x}", self.0)
    }
}

/// Hashes of the built-in language types.
pub mod builtins {
    use super::TypeHash;

    /// `void`
    pub const VOID: TypeHash = TypeHash::from_name("void");
    /// `bool`
    pub const BOOL: TypeHash = TypeHash::from_name("bool");
    /// `int` (32-bit signed)
    pub const INT: TypeHash = TypeHash::from_name("int");
    /// `float` (32-bit)
    pub const FLOAT: TypeHash = TypeHash::from_name("float");
    /// `float2`
    pub const FLOAT2: TypeHash = TypeHash::from_name("float2");
    /// `float3`
    pub const FLOAT3: TypeHash = TypeHash::from_name("float3");
    /// `float4`
    pub const FLOAT4: TypeHash = TypeHash::from_name("float4");
    /// `ray`
    pub const RAY: TypeHash = TypeHash::from_name("ray");
    /// `isect`
    pub const ISECT: TypeHash = TypeHash::from_name("isect");
    /// `light`
    pub const LIGHT: TypeHash = TypeHash::from_name("light");
    /// `dfunc`, the reflectance distribution type
    pub const DFUNC: TypeHash = TypeHash::from_name("dfunc");
    /// `shader_handle`
    pub const SHADER_HANDLE: TypeHash = TypeHash::from_name("shader_handle");
    /// `context_ptr`, the hidden shading-context pointer
    pub const CONTEXT_PTR: TypeHash = TypeHash::from_name("context_ptr");
    /// `module`, a compile-time marker with no IR representation
    pub const MODULE: TypeHash = TypeHash::from_name("module");

    /// Whether a type is one of the scalar numeric primitives.
    #[inline]
    pub fn is_numeric(hash: TypeHash) -> bool {
        hash == INT || hash == FLOAT
    }

    /// Component count of a float vector type, if `hash` is one.
    #[inline]
    pub fn vector_width(hash: TypeHash) -> Option<u8> {
        match hash {
            h if h == FLOAT2 => Some(2),
            h if h == FLOAT3 => Some(3),
            h if h == FLOAT4 => Some(4),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_same_hash() {
        assert_eq!(TypeHash::from_name("ray"), TypeHash::from_name("ray"));
        assert_ne!(TypeHash::from_name("ray"), TypeHash::from_name("isect"));
    }

    #[test]
    fn builtin_constants_match_runtime_hash() {
        assert_eq!(builtins::DFUNC, TypeHash::from_name("dfunc"));
        assert_eq!(builtins::MODULE, TypeHash::from_name("module"));
    }

    #[test]
    fn vector_width_lookup() {
        assert_eq!(builtins::vector_width(builtins::FLOAT3), Some(3));
        assert_eq!(builtins::vector_width(builtins::FLOAT), None);
        assert!(builtins::is_numeric(builtins::INT));
        assert!(!builtins::is_numeric(builtins::DFUNC));
    }
}
