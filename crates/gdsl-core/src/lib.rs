//! Core types shared by every gdsl crate.
//!
//! - [`Span`] for source locations
//! - [`TypeHash`] for type identity, with the [`builtins`] hashes
//! - [`BinaryOp`] / [`UnaryOp`] operator vocabulary
//! - [`CompilationError`], [`RegistrationError`] and [`Diagnostics`]

mod diagnostics;
mod error;
mod operator;
mod span;
mod type_hash;

pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use error::{CompilationError, ErrorKind, RegistrationError};
pub use operator::{BinaryOp, UnaryOp};
pub use span::Span;
pub use type_hash::{TypeHash, builtins};

/// Result type for compilation.
pub type Result<T> = std::result::Result<T, CompilationError>;
