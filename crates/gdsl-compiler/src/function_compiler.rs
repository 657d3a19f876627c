//! Function compiler for generating IR from function definitions.
//!
//! [`FunctionCompiler`] takes one function from prototype to finished body:
//!
//! - Declaring (or reusing) the IR function from its prototype
//! - Binding arguments to entry-block slots that own a copy of each argument
//! - Compiling the body inside a `Function` control frame
//! - Adding the implicit `ret void` for void functions
//! - Verifying return paths for non-void functions
//!
//! On failure after the body was started, the partial body is removed from
//! the module so only the declaration remains.
//!
//! # Example
//!
//! ```ignore
//! let mut compiler = FunctionCompiler::new(state, &mut builder, types, &options, &mut diagnostics);
//! let func = compiler.compile(decl)?;
//! ```

use gdsl_core::{CompilationError, Diagnostics, Result, Span, builtins};
use gdsl_ir::{FuncId, IrBuilder, IrError, Value};
use gdsl_registry::{HookContext, TypeTable};
use tracing::debug;

use crate::ast::FunctionDecl;
use crate::control::{ControlFrame, FunctionFrame};
use crate::lifecycle;
use crate::options::CompilerOptions;
use crate::prototype::{FunctionArgument, Prototype};
use crate::return_checker::ReturnChecker;
use crate::state::ParserState;
use crate::stmt::StmtCompiler;

/// Compiles function definitions into the builder's module.
pub struct FunctionCompiler<'a, 'm> {
    state: &'a mut ParserState,
    builder: &'a mut IrBuilder<'m>,
    types: &'a TypeTable,
    options: &'a CompilerOptions,
    diagnostics: &'a mut Diagnostics,
}

impl<'a, 'm> FunctionCompiler<'a, 'm> {
    pub fn new(
        state: &'a mut ParserState,
        builder: &'a mut IrBuilder<'m>,
        types: &'a TypeTable,
        options: &'a CompilerOptions,
        diagnostics: &'a mut Diagnostics,
    ) -> Self {
        Self {
            state,
            builder,
            types,
            options,
            diagnostics,
        }
    }

    /// Generate `decl` and return its IR function.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn compile(&mut self, decl: &FunctionDecl<'_>) -> Result<FuncId> {
        let prototype = Prototype::from_decl(decl.prototype, self.types)?;
        if prototype.is_external() {
            return Err(CompilationError::InvalidOperation {
                message: format!("external function '{}' cannot have a body", prototype.name()),
                span: decl.span,
            });
        }

        let entry = prototype.declare(self.state, self.builder, self.types)?;
        let func = self.state.functions.entry(entry)?.func;
        self.state.functions.mark_defined(entry, decl.span)?;
        debug!(name = prototype.name(), "generating function");

        let result = self.emit_function(&prototype, func, decl);
        self.builder.clear_position();

        if result.is_err() {
            self.state.functions.mark_undefined(entry);
            self.builder.module_mut().function_mut(func)?.clear_body();
        }
        result.map(|()| func)
    }

    /// Entry block, argument scope and function frame around the body.
    fn emit_function(
        &mut self,
        prototype: &Prototype,
        func: FuncId,
        decl: &FunctionDecl<'_>,
    ) -> Result<()> {
        let entry = self.builder.append_block(func, "entry")?;
        self.builder.position_at_end(func, entry);

        self.state.variables.push_scope();
        self.state.control.push(ControlFrame::Function(FunctionFrame {
            name: prototype.name().to_string(),
            return_type: prototype.return_type(),
            scope_depth: self.state.variables.depth(),
        }));

        let result = self.emit_body(prototype, func, decl);

        self.state.control.pop();
        self.state.variables.pop_scope();
        result
    }

    fn emit_body(
        &mut self,
        prototype: &Prototype,
        func: FuncId,
        decl: &FunctionDecl<'_>,
    ) -> Result<()> {
        for (index, arg) in prototype.args().iter().enumerate() {
            self.create_argument_alloca(index, arg)?;
        }

        // Body statements share the argument scope, so redeclaring an
        // argument is an error.
        StmtCompiler::new(
            self.state,
            self.builder,
            self.types,
            self.options,
            self.diagnostics,
        )
        .compile_stmts(decl.body.stmts)?;

        self.implicit_exit(prototype, func, decl.span)?;

        let function = self.builder.module().function(func)?;
        if !ReturnChecker::new().all_paths_return(function) {
            return Err(CompilationError::MissingReturn {
                name: prototype.name().to_string(),
                span: decl.span,
            });
        }
        Ok(function.verify()?)
    }

    /// Bind argument `index` to a slot holding its own copy of the value.
    fn create_argument_alloca(&mut self, index: usize, arg: &FunctionArgument) -> Result<()> {
        let representation = self
            .types
            .representation(arg.ty)
            .map_err(|e| e.with_span(arg.span))?;
        let ptr = self.builder.build_entry_alloca(representation, &arg.name)?;

        let incoming = Value::Arg(index as u32);
        let mut cx = HookContext::new(&mut *self.builder, self.types);
        let value = lifecycle::copy_value(&mut cx, arg.ty, incoming)?;
        self.builder.build_store(value, ptr.clone())?;

        self.state
            .variables
            .declare(&arg.name, arg.ty, ptr, arg.span)
    }

    /// Close a body whose last block falls through.
    ///
    /// A block no path reaches (the exit of a `while (true)` without `break`)
    /// is sealed with `unreachable`. Otherwise void functions destroy their
    /// locals and return, and non-void functions are missing a return.
    fn implicit_exit(&mut self, prototype: &Prototype, func: FuncId, span: Span) -> Result<()> {
        if self.builder.is_terminated() {
            return Ok(());
        }

        let block = self
            .builder
            .current_block()
            .ok_or(IrError::NoInsertPoint)?;
        let function = self.builder.module().function(func)?;
        if !ReturnChecker::new().is_reachable(function, block) {
            return Ok(self.builder.build_unreachable()?);
        }

        if prototype.return_type() != builtins::VOID {
            return Err(CompilationError::MissingReturn {
                name: prototype.name().to_string(),
                span,
            });
        }
        let slots = self.state.variables.live_slots_from(1);
        let mut cx = HookContext::new(&mut *self.builder, self.types);
        lifecycle::destroy_slots(&mut cx, &slots)?;
        Ok(self.builder.build_ret(None)?)
    }
}
