//! gdsl: semantic analysis and IR generation for a shading language.
//!
//! The crate ties together the workspace members:
//!
//! - [`ir`]: the in-memory IR module, its builder and printer
//! - [`types`]: type descriptors, the built-in types and the type table
//! - [`ast`]: the AST consumed by the compiler and an arena builder for it
//! - [`Compiler`]: turns a unit of prototypes and functions into IR
//!
//! ```
//! use gdsl::prelude::*;
//!
//! let arena = Bump::new();
//! let ast = AstBuilder::new(&arena);
//! let add = ast.function(
//!     ast.prototype("add", "float", &[ast.arg("a", "float"), ast.arg("b", "float")]),
//!     &[ast.ret(Some(ast.binary(BinaryOp::Add, ast.var("a"), ast.var("b"))))],
//! );
//! let unit = ast.unit(&[Item::Function(add)]);
//!
//! let mut module = IrModule::new("shader");
//! let result = gdsl::compile(&unit, &mut module);
//! assert!(result.is_success());
//! assert!(module.function_by_name("add$f.f").is_some());
//! ```

pub use bumpalo::Bump;
pub use gdsl_compiler::{
    CompilationResult, Compiler, CompilerOptions, ParserState, Prototype, UnreachablePolicy,
};
pub use gdsl_core::{
    BinaryOp, CompilationError, Diagnostic, DiagnosticKind, Diagnostics, ErrorKind,
    RegistrationError, Span, TypeHash, UnaryOp, builtins,
};

/// Intermediate representation.
pub mod ir {
    pub use gdsl_ir::*;
}

/// Type descriptors and the type table.
pub mod types {
    pub use gdsl_registry::builtins::*;
    pub use gdsl_registry::{
        HookContext, TypeCapabilities, TypeDescriptor, TypeTable, TypedResult, TypedValue,
    };

    /// Runtime intrinsics called by `dfunc` hooks.
    pub use gdsl_registry::builtins::distribution::intrinsics;
}

/// AST nodes and the arena builder.
pub mod ast {
    pub use gdsl_compiler::ast::*;
}

/// Compile `unit` into `module` against the built-in types with default options.
pub fn compile(unit: &ast::Unit<'_>, module: &mut ir::IrModule) -> CompilationResult {
    let types = types::TypeTable::with_builtins();
    Compiler::new(&types).compile_unit(unit, module)
}

pub mod prelude {
    pub use crate::ast::{AstBuilder, Item, Unit};
    pub use crate::ir::{IrModule, Linkage};
    pub use crate::types::{TypeDescriptor, TypeTable};
    pub use crate::{
        BinaryOp, Bump, CompilationError, CompilationResult, Compiler, CompilerOptions,
        Diagnostics, ErrorKind, UnaryOp, UnreachablePolicy, builtins,
    };
}
