//! gdsl Compiler
//!
//! Semantic analysis and IR generation for the gdsl shading language.
//!
//! ## Architecture
//!
//! A unit is processed in a single pass, in source order. Prototypes are
//! registered as they are met, so a function must be declared before it is
//! called. Each function body is generated independently: a failure is
//! recorded as a diagnostic, the partial body is dropped, and generation
//! continues with the next item.
//!
//! ## Modules
//!
//! - [`ast`]: Arena-allocated AST consumed by the compiler
//! - [`control`]: Control-flow frame stack
//! - [`conversion`]: Implicit conversions and their costs
//! - [`expr`]: Expression code generation
//! - [`function_compiler`]: Per-function generation
//! - [`lifecycle`]: Copy/destroy of values with lifecycle hooks
//! - [`overload`]: Overload resolution for calls
//! - [`prototype`]: Function prototypes and their IR declarations
//! - [`return_checker`]: CFG-based return path verification
//! - [`stmt`]: Statement code generation
//! - [`symbols`]: Variable and function tables

pub mod ast;
pub mod control;
pub mod conversion;
pub mod expr;
mod expr_value;
pub mod function_compiler;
pub mod lifecycle;
mod options;
pub mod overload;
pub mod prototype;
pub mod return_checker;
mod state;
pub mod stmt;
pub mod symbols;

pub use control::{ControlFrame, ControlState, FunctionFrame, LoopFrame};
pub use conversion::{Conversion, ConversionKind, find_conversion};
pub use expr::ExprCompiler;
pub use expr_value::{ExprValue, Ownership};
pub use function_compiler::FunctionCompiler;
pub use options::{CompilerOptions, UnreachablePolicy};
pub use overload::{OverloadMatch, resolve_overload};
pub use prototype::{FunctionArgument, Prototype};
pub use return_checker::ReturnChecker;
pub use state::ParserState;
pub use stmt::StmtCompiler;
pub use symbols::{EntryId, FunctionEntry, FunctionTable, VariableSlot, VariableTable};

// Re-export CompilationError from core for convenience
pub use gdsl_core::CompilationError;

use gdsl_core::{Diagnostic, Diagnostics, Result};
use gdsl_ir::{IrBuilder, IrModule};
use gdsl_registry::TypeTable;
use tracing::{debug, warn};

use crate::ast::{Item, PrototypeDecl, Unit};

/// Result of compiling a unit.
#[derive(Debug, Default)]
pub struct CompilationResult {
    /// Errors and warnings, in the order they were found.
    pub diagnostics: Diagnostics,
    /// Functions whose bodies were generated.
    pub compiled: Vec<String>,
    /// Items that failed.
    pub failed: Vec<String>,
}

impl CompilationResult {
    /// Whether the unit compiled without errors. Warnings are allowed.
    pub fn is_success(&self) -> bool {
        !self.diagnostics.has_errors()
    }
}

/// Compiles units against a type table into a caller-supplied module.
pub struct Compiler<'t> {
    types: &'t TypeTable,
    options: CompilerOptions,
}

impl<'t> Compiler<'t> {
    pub fn new(types: &'t TypeTable) -> Self {
        Self::with_options(types, CompilerOptions::default())
    }

    pub fn with_options(types: &'t TypeTable, options: CompilerOptions) -> Self {
        Self { types, options }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn types(&self) -> &'t TypeTable {
        self.types
    }

    /// Compile `unit` into `module` with fresh symbol tables.
    pub fn compile_unit(&self, unit: &Unit<'_>, module: &mut IrModule) -> CompilationResult {
        let mut state = ParserState::new();
        self.compile_unit_with_state(unit, module, &mut state)
    }

    /// Compile `unit` into `module`, keeping symbols in `state`.
    ///
    /// Functions already in `state` are visible to the unit, which lets a
    /// caller feed several units into one module.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn compile_unit_with_state(
        &self,
        unit: &Unit<'_>,
        module: &mut IrModule,
        state: &mut ParserState,
    ) -> CompilationResult {
        let mut builder = IrBuilder::new(module);
        let mut result = CompilationResult::default();

        for item in unit.items {
            let outcome = match item {
                Item::Prototype(decl) => self
                    .declare_prototype(decl, state, &mut builder)
                    .map(|_| ()),
                Item::Function(decl) => {
                    let compiled = FunctionCompiler::new(
                        state,
                        &mut builder,
                        self.types,
                        &self.options,
                        &mut result.diagnostics,
                    )
                    .compile(decl);
                    compiled.map(|_| result.compiled.push(item.name().to_string()))
                }
            };

            if let Err(error) = outcome {
                let error = error.with_span(item.span());
                warn!(item = item.name(), %error, "generation failed, continuing");
                result
                    .diagnostics
                    .push(Diagnostic::error(error).in_function(item.name()));
                result.failed.push(item.name().to_string());
            }
            state.reset_function_state();
        }

        debug!(
            compiled = result.compiled.len(),
            failed = result.failed.len(),
            warnings = result.diagnostics.warning_count(),
            "unit finished"
        );
        result
    }

    /// Register a bodiless prototype (local forward declaration or external).
    pub fn declare_prototype(
        &self,
        decl: &PrototypeDecl<'_>,
        state: &mut ParserState,
        builder: &mut IrBuilder<'_>,
    ) -> Result<EntryId> {
        Prototype::from_decl(decl, self.types)?.declare(state, builder, self.types)
    }
}
