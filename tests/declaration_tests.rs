//! Prototype declaration, overload identity and per-function failure isolation.

mod common;

use common::{assert_success, compile, find, function, single_error};
use gdsl::ir::{Constant, InstKind, Linkage, Value};
use gdsl::prelude::*;

// ============================================================================
// Redeclaration
// ============================================================================

#[test]
fn identical_prototype_before_definition_is_one_function() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let args = [ast.arg("a", "float")];
    let unit = ast.unit(&[
        Item::Prototype(ast.prototype("half", "float", &args)),
        Item::Function(ast.function(
            ast.prototype("half", "float", &args),
            &[ast.ret(Some(ast.binary(BinaryOp::Div, ast.var("a"), ast.float(2.0))))],
        )),
    ]);

    let (module, result) = compile(&unit);
    assert_success(&result);
    assert_eq!(module.function_count(), 1);
    assert!(!function(&module, "half$f").is_declaration());
}

#[test]
fn conflicting_return_type_is_rejected() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[
        Item::Prototype(ast.prototype("f", "float", &[])),
        Item::Prototype(ast.prototype("f", "int", &[])),
    ]);

    let (module, result) = compile(&unit);
    assert!(matches!(
        single_error(&result),
        CompilationError::PrototypeConflict { name, .. } if name == "f"
    ));
    assert_eq!(module.function_count(), 1);
    assert_eq!(result.failed, vec!["f".to_string()]);
}

#[test]
fn redefinition_keeps_first_body() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[
        Item::Function(ast.function(
            ast.prototype("one", "float", &[]),
            &[ast.ret(Some(ast.float(1.0)))],
        )),
        Item::Function(ast.function(
            ast.prototype("one", "float", &[]),
            &[ast.ret(Some(ast.float(2.0)))],
        )),
    ]);

    let (module, result) = compile(&unit);
    assert!(matches!(
        single_error(&result),
        CompilationError::FunctionRedefinition { .. }
    ));
    assert_eq!(result.compiled, vec!["one".to_string()]);

    let rets = find(&module, "one$", |k| matches!(k, InstKind::Ret { .. }));
    assert_eq!(rets.len(), 1);
    assert_eq!(
        rets[0].kind,
        InstKind::Ret {
            value: Some(Value::Const(Constant::float(1.0)))
        }
    );
}

#[test]
fn unknown_type_in_prototype() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Prototype(ast.prototype(
        "f",
        "float",
        &[ast.arg("v", "float9")],
    ))]);

    let (module, result) = compile(&unit);
    assert!(matches!(
        single_error(&result),
        CompilationError::UnknownType { name, .. } if name == "float9"
    ));
    assert_eq!(module.function_count(), 0);
}

#[test]
fn void_argument_is_rejected() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Prototype(ast.prototype(
        "f",
        "float",
        &[ast.arg("v", "void")],
    ))]);

    let (_, result) = compile(&unit);
    assert!(matches!(
        single_error(&result),
        CompilationError::InvalidOperation { .. }
    ));
}

// ============================================================================
// External prototypes
// ============================================================================

#[test]
fn external_overloads_resolve_by_argument_type() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[
        Item::Prototype(ast.external(
            "tint",
            "gd_tint3",
            "dfunc",
            &[ast.arg("d", "dfunc"), ast.arg("c", "float3")],
        )),
        Item::Prototype(ast.external(
            "tint",
            "gd_tint4",
            "dfunc",
            &[ast.arg("d", "dfunc"), ast.arg("c", "float4")],
        )),
        Item::Function(ast.function(
            ast.prototype("paint", "dfunc", &[ast.arg("d", "dfunc"), ast.arg("c", "float4")]),
            &[ast.ret(Some(ast.call("tint", &[ast.var("d"), ast.var("c")])))],
        )),
    ]);

    let (module, result) = compile(&unit);
    assert_success(&result);

    let tint4 = function(&module, "gd_tint4");
    assert_eq!(tint4.linkage(), Linkage::External);
    assert!(tint4.is_declaration());
    assert_eq!(module.count_calls("paint$df.f4", "gd_tint4"), 1);
    assert_eq!(module.count_calls("paint$df.f4", "gd_tint3"), 0);
}

#[test]
fn identical_external_declarations_collapse() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let args = [ast.arg("x", "float")];
    let unit = ast.unit(&[
        Item::Prototype(ast.external("sin", "sinf", "float", &args)),
        Item::Prototype(ast.external("sin", "sinf", "float", &args)),
    ]);

    let (module, result) = compile(&unit);
    assert_success(&result);
    assert_eq!(module.function_count(), 1);
    assert!(module.function_by_name("sinf").is_some());
}

#[test]
fn external_with_other_link_name_conflicts() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let args = [ast.arg("x", "float")];
    let unit = ast.unit(&[
        Item::Prototype(ast.external("sin", "sinf", "float", &args)),
        Item::Prototype(ast.external("sin", "fast_sin", "float", &args)),
    ]);

    let (_, result) = compile(&unit);
    assert!(matches!(
        single_error(&result),
        CompilationError::PrototypeConflict { .. }
    ));
}

#[test]
fn external_with_body_is_rejected() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.external("sqrt", "sqrtf", "float", &[ast.arg("x", "float")]),
        &[ast.ret(Some(ast.var("x")))],
    ))]);

    let (_, result) = compile(&unit);
    assert!(matches!(
        single_error(&result),
        CompilationError::InvalidOperation { .. }
    ));
}

#[test]
fn call_with_two_equally_good_overloads_is_ambiguous() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[
        Item::Prototype(ast.external(
            "blend",
            "blend_fi",
            "float",
            &[ast.arg("a", "float"), ast.arg("b", "int")],
        )),
        Item::Prototype(ast.external(
            "blend",
            "blend_if",
            "float",
            &[ast.arg("a", "int"), ast.arg("b", "float")],
        )),
        Item::Function(ast.function(
            ast.prototype("main", "float", &[]),
            &[ast.ret(Some(ast.call("blend", &[ast.int(1), ast.int(2)])))],
        )),
    ]);

    let (module, result) = compile(&unit);
    let error = single_error(&result);
    assert!(matches!(
        error,
        CompilationError::AmbiguousOverload { name, candidates, .. }
            if name == "blend" && candidates.contains("blend(float, int)")
    ));
    assert_eq!(error.kind(), ErrorKind::Resolution);
    assert!(function(&module, "main$").is_declaration());
}

// ============================================================================
// Failure isolation
// ============================================================================

#[test]
fn callee_must_be_declared_before_call() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[
        Item::Function(ast.function(
            ast.prototype("main", "float", &[]),
            &[ast.ret(Some(ast.call("later", &[])))],
        )),
        Item::Function(ast.function(
            ast.prototype("later", "float", &[]),
            &[ast.ret(Some(ast.float(1.0)))],
        )),
    ]);

    let (module, result) = compile(&unit);
    assert!(matches!(
        single_error(&result),
        CompilationError::UnknownFunction { name, .. } if name == "later"
    ));
    assert_eq!(result.failed, vec!["main".to_string()]);
    assert_eq!(result.compiled, vec!["later".to_string()]);

    // The failed function stays declared but loses its body.
    assert!(function(&module, "main$").is_declaration());
    assert!(!function(&module, "later$").is_declaration());
}

#[test]
fn failed_function_does_not_leak_locals() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[
        Item::Function(ast.function(
            ast.prototype("broken", "float", &[]),
            &[
                ast.decl("float", "x", Some(ast.float(1.0))),
                ast.ret(Some(ast.var("nope"))),
            ],
        )),
        Item::Function(ast.function(
            ast.prototype("uses_x", "float", &[]),
            &[ast.ret(Some(ast.var("x")))],
        )),
    ]);

    let (_, result) = compile(&unit);
    let errors: Vec<_> = result.diagnostics.errors().collect();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].function.as_deref(), Some("broken"));
    assert!(matches!(
        &errors[1].error,
        CompilationError::UnknownVariable { name, .. } if name == "x"
    ));
    assert_eq!(errors[1].function.as_deref(), Some("uses_x"));
}

#[test]
fn errors_carry_source_spans() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("f", "float", &[]),
        &[ast.ret(Some(ast.var("missing")))],
    ))]);

    let (_, result) = compile(&unit);
    let error = single_error(&result);
    assert!(error.span().line > 0, "{error}");
}
