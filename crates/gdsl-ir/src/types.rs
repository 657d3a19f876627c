//! IR type system.
//!
//! These are the machine-level shapes that language types lower to. They carry
//! no language semantics; the type descriptors decide which [`IrType`] a
//! language type uses.

use std::fmt;

/// A type in the intermediate representation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IrType {
    /// No value.
    Void,
    /// 1-bit boolean.
    Bool,
    /// 32-bit signed integer.
    I32,
    /// 32-bit float.
    F32,
    /// Vector of `lanes` 32-bit floats.
    Vector(u8),
    /// Pointer to a value of the inner type.
    Ptr(Box<IrType>),
    /// Named opaque type. Only meaningful behind a pointer.
    Opaque(String),
    /// Named aggregate with ordered fields.
    Struct(StructType),
}

/// A named aggregate type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructType {
    /// Struct name (printed as `%name`).
    pub name: String,
    /// Field types in declaration order.
    pub fields: Vec<IrType>,
}

impl IrType {
    /// Pointer to `self`.
    pub fn pointer_to(self) -> IrType {
        IrType::Ptr(Box::new(self))
    }

    /// Pointer to a named opaque type.
    pub fn opaque_ptr(name: impl Into<String>) -> IrType {
        IrType::Opaque(name.into()).pointer_to()
    }

    /// Named struct type.
    pub fn structure(name: impl Into<String>, fields: Vec<IrType>) -> IrType {
        IrType::Struct(StructType {
            name: name.into(),
            fields,
        })
    }

    /// Whether this is `void`.
    pub fn is_void(&self) -> bool {
        matches!(self, IrType::Void)
    }

    /// Whether this is a pointer.
    pub fn is_pointer(&self) -> bool {
        matches!(self, IrType::Ptr(_))
    }

    /// Whether this is a float scalar or float vector.
    pub fn is_float_like(&self) -> bool {
        matches!(self, IrType::F32 | IrType::Vector(_))
    }

    /// The pointee type, if this is a pointer.
    pub fn pointee(&self) -> Option<&IrType> {
        match self {
            IrType::Ptr(inner) => Some(inner),
            _ => None,
        }
    }

    /// Storage size in bytes, or `None` for unsized types (`void`, opaque).
    pub fn size_in_bytes(&self) -> Option<u32> {
        match self {
            IrType::Void | IrType::Opaque(_) => None,
            IrType::Bool => Some(1),
            IrType::I32 | IrType::F32 => Some(4),
            IrType::Vector(lanes) => Some(4 * u32::from(*lanes)),
            IrType::Ptr(_) => Some(8),
            IrType::Struct(s) => {
                let mut size = 0u32;
                let mut align = 1u32;
                for field in &s.fields {
                    let field_size = field.size_in_bytes()?;
                    let field_align = field.alignment();
                    size = size.next_multiple_of(field_align) + field_size;
                    align = align.max(field_align);
                }
                Some(size.next_multiple_of(align))
            }
        }
    }

    /// Natural alignment in bytes.
    pub fn alignment(&self) -> u32 {
        match self {
            IrType::Void | IrType::Bool | IrType::Opaque(_) => 1,
            IrType::I32 | IrType::F32 => 4,
            IrType::Vector(lanes) => {
                if *lanes == 3 {
                    16
                } else {
                    (4 * u32::from(*lanes)).next_power_of_two()
                }
            }
            IrType::Ptr(_) => 8,
            IrType::Struct(s) => s.fields.iter().map(IrType::alignment).max().unwrap_or(1),
        }
    }
}

impl fmt::Display for IrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IrType::Void => f.write_str("void"),
            IrType::Bool => f.write_str("i1"),
            IrType::I32 => f.write_str("i32"),
            IrType::F32 => f.write_str("float"),
            IrType::Vector(lanes) => write!(f, "<{} x float>", lanes),
            IrType::Ptr(inner) => write!(f, "{}*", inner),
            IrType::Opaque(name) => write!(f, "%{}", name),
            IrType::Struct(s) => write!(f, "%{}", s.name),
        }
    }
}
