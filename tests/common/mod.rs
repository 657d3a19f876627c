//! Shared helpers for the integration tests.

#![allow(dead_code)]

use gdsl::ir::{InstKind, Instruction, IrFunction, IrModule};
use gdsl::prelude::*;

/// Compile `unit` against the built-in types.
pub fn compile(unit: &Unit<'_>) -> (IrModule, CompilationResult) {
    compile_with(unit, CompilerOptions::default())
}

pub fn compile_with(unit: &Unit<'_>, options: CompilerOptions) -> (IrModule, CompilationResult) {
    let types = TypeTable::with_builtins();
    let mut module = IrModule::new("test");
    let result = Compiler::with_options(&types, options).compile_unit(unit, &mut module);
    (module, result)
}

/// The IR function emitted under `symbol`.
pub fn function<'m>(module: &'m IrModule, symbol: &str) -> &'m IrFunction {
    module
        .function_by_name(symbol)
        .unwrap_or_else(|| panic!("no function '{symbol}' in module:\n{module}"))
}

/// Instructions of `symbol` matching `pred`.
pub fn find<'m>(
    module: &'m IrModule,
    symbol: &str,
    pred: impl Fn(&InstKind) -> bool,
) -> Vec<&'m Instruction> {
    function(module, symbol)
        .instructions()
        .filter(|inst| pred(&inst.kind))
        .collect()
}

/// Block labels of `symbol`, in order.
pub fn labels(module: &IrModule, symbol: &str) -> Vec<String> {
    function(module, symbol)
        .blocks()
        .iter()
        .map(|b| b.label.clone())
        .collect()
}

/// The only error of a failed compilation.
pub fn single_error(result: &CompilationResult) -> &CompilationError {
    let errors: Vec<_> = result.diagnostics.errors().collect();
    assert_eq!(errors.len(), 1, "expected one error, got:\n{}", result.diagnostics);
    &errors[0].error
}

pub fn assert_success(result: &CompilationResult) {
    assert!(result.is_success(), "compilation failed:\n{}", result.diagnostics);
}
