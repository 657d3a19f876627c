//! gdsl type registry.
//!
//! Every language type is described by a [`TypeDescriptor`]: its name and
//! mangling token, its IR representation, and optional hooks for construction,
//! default initialization, copying, destruction and operators. Descriptors are
//! interned once in a [`TypeTable`] and referenced by [`TypeHash`] afterwards.
//!
//! ```
//! use gdsl_core::builtins;
//! use gdsl_registry::TypeTable;
//!
//! let types = TypeTable::with_builtins();
//! let dfunc = types.get(builtins::DFUNC).unwrap();
//! assert_eq!(dfunc.mangle(), "df");
//! ```
//!
//! [`TypeHash`]: gdsl_core::TypeHash

pub mod builtins;
mod capabilities;
mod context;
mod descriptor;
mod table;
mod value;

pub use capabilities::TypeCapabilities;
pub use context::HookContext;
pub use descriptor::TypeDescriptor;
pub use table::TypeTable;
pub use value::{TypedResult, TypedValue};
