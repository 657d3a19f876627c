//! Expression and statement lowering, checked against the emitted IR.

mod common;

use common::{assert_success, compile, compile_with, find, function, labels, single_error};
use gdsl::ir::{CastOp, Constant, InstKind, Value};
use gdsl::prelude::*;

fn is_call(kind: &InstKind) -> bool {
    matches!(kind, InstKind::Call { .. })
}

// ============================================================================
// Calls and overloads
// ============================================================================

#[test]
fn call_passes_constant_arguments() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[
        Item::Prototype(ast.prototype(
            "add",
            "float",
            &[ast.arg("a", "float"), ast.arg("b", "float")],
        )),
        Item::Function(ast.function(
            ast.prototype("main", "float", &[]),
            &[ast.ret(Some(ast.call("add", &[ast.float(1.0), ast.float(2.0)])))],
        )),
    ]);

    let (module, result) = compile(&unit);
    assert_success(&result);

    let calls = find(&module, "main$", is_call);
    assert_eq!(calls.len(), 1);
    let InstKind::Call { args, .. } = &calls[0].kind else {
        unreachable!()
    };
    assert_eq!(
        args,
        &vec![
            Value::Const(Constant::float(1.0)),
            Value::Const(Constant::float(2.0))
        ]
    );
    assert_eq!(module.count_calls("main$", "add$f.f"), 1);
}

#[test]
fn int_argument_widens_to_float() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[
        Item::Prototype(ast.prototype("half", "float", &[ast.arg("a", "float")])),
        Item::Function(ast.function(
            ast.prototype("main", "float", &[]),
            &[ast.ret(Some(ast.call("half", &[ast.int(3)])))],
        )),
    ]);

    let (module, result) = compile(&unit);
    assert_success(&result);
    let casts = find(&module, "main$", |k| {
        matches!(k, InstKind::Cast { op: CastOp::SiToFp, .. })
    });
    assert_eq!(casts.len(), 1);
}

#[test]
fn widening_can_be_disabled() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[
        Item::Prototype(ast.prototype("half", "float", &[ast.arg("a", "float")])),
        Item::Function(ast.function(
            ast.prototype("main", "float", &[]),
            &[ast.ret(Some(ast.call("half", &[ast.int(3)])))],
        )),
    ]);

    let options = CompilerOptions::new().with_implicit_conversions(false);
    let (_, result) = compile_with(&unit, options);
    assert!(matches!(
        single_error(&result),
        CompilationError::NoMatchingOverload { name, args, .. } if name == "half" && args == "int"
    ));
}

#[test]
fn exact_overload_beats_widening() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[
        Item::Prototype(ast.external("abs", "absf", "float", &[ast.arg("x", "float")])),
        Item::Prototype(ast.external("abs", "absi", "int", &[ast.arg("x", "int")])),
        Item::Function(ast.function(
            ast.prototype("main", "int", &[]),
            &[ast.ret(Some(ast.call("abs", &[ast.int(-2)])))],
        )),
    ]);

    let (module, result) = compile(&unit);
    assert_success(&result);
    assert_eq!(module.count_calls("main$", "absi"), 1);
    assert_eq!(module.count_calls("main$", "absf"), 0);
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn scalar_times_vector_splats() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("scale", "float3", &[ast.arg("s", "float"), ast.arg("v", "float3")]),
        &[ast.ret(Some(ast.binary(BinaryOp::Mul, ast.var("s"), ast.var("v"))))],
    ))]);

    let (module, result) = compile(&unit);
    assert_success(&result);
    let splats = find(&module, "scale$f.f3", |k| {
        matches!(k, InstKind::Splat { lanes: 3, .. })
    });
    assert_eq!(splats.len(), 1);
}

#[test]
fn vector_plus_scalar_has_no_operator() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("shift", "float3", &[ast.arg("v", "float3"), ast.arg("s", "float")]),
        &[ast.ret(Some(ast.binary(BinaryOp::Add, ast.var("v"), ast.var("s"))))],
    ))]);

    let (_, result) = compile(&unit);
    assert!(matches!(
        single_error(&result),
        CompilationError::NoOperator { op: "+", left, right, .. }
            if left == "float3" && right == "float"
    ));
}

#[test]
fn logical_and_short_circuits() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("both", "bool", &[ast.arg("a", "bool"), ast.arg("b", "bool")]),
        &[ast.ret(Some(ast.binary(BinaryOp::And, ast.var("a"), ast.var("b"))))],
    ))]);

    let (module, result) = compile(&unit);
    assert_success(&result);
    assert_eq!(labels(&module, "both$b.b"), vec!["entry", "and.rhs", "and.end"]);
    let phis = find(&module, "both$b.b", |k| matches!(k, InstKind::Phi { .. }));
    assert_eq!(phis.len(), 1);
}

#[test]
fn logical_operands_must_be_bool() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("either", "bool", &[ast.arg("a", "bool"), ast.arg("x", "float")]),
        &[ast.ret(Some(ast.binary(BinaryOp::Or, ast.var("a"), ast.var("x"))))],
    ))]);

    let (_, result) = compile(&unit);
    assert!(matches!(
        single_error(&result),
        CompilationError::TypeMismatch { .. }
    ));
}

#[test]
fn negation_emits_neg() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("flip", "float", &[ast.arg("x", "float")]),
        &[ast.ret(Some(ast.unary(UnaryOp::Neg, ast.var("x"))))],
    ))]);

    let (module, result) = compile(&unit);
    assert_success(&result);
    assert_eq!(
        find(&module, "flip$f", |k| matches!(k, InstKind::Neg { .. })).len(),
        1
    );
}

#[test]
fn not_on_float_has_no_operator() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("f", "bool", &[ast.arg("x", "float")]),
        &[ast.ret(Some(ast.unary(UnaryOp::Not, ast.var("x"))))],
    ))]);

    let (_, result) = compile(&unit);
    assert!(matches!(
        single_error(&result),
        CompilationError::NoUnaryOperator { op: "!", .. }
    ));
}

// ============================================================================
// Construction and variables
// ============================================================================

#[test]
fn vector_construction_builds_vector() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("up", "float3", &[]),
        &[ast.ret(Some(ast.construct(
            "float3",
            &[ast.float(0.0), ast.int(1), ast.float(0.0)],
        )))],
    ))]);

    let (module, result) = compile(&unit);
    assert_success(&result);
    let vectors = find(&module, "up$", |k| {
        matches!(k, InstKind::BuildVector { lanes } if lanes.len() == 3)
    });
    assert_eq!(vectors.len(), 1);
}

#[test]
fn light_is_not_constructible() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("f", "void", &[]),
        &[ast.expr_stmt(ast.construct("light", &[]))],
    ))]);

    let (_, result) = compile(&unit);
    assert!(matches!(
        single_error(&result),
        CompilationError::NotConstructible { name, .. } if name == "light"
    ));
}

#[test]
fn unknown_variable_is_reported() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("f", "float", &[]),
        &[ast.ret(Some(ast.var("ghost")))],
    ))]);

    let (_, result) = compile(&unit);
    assert!(matches!(
        single_error(&result),
        CompilationError::UnknownVariable { name, .. } if name == "ghost"
    ));
}

#[test]
fn redeclaration_in_same_scope_fails() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("f", "void", &[]),
        &[
            ast.decl("float", "x", None),
            ast.decl("int", "x", None),
        ],
    ))]);

    let (_, result) = compile(&unit);
    assert!(matches!(
        single_error(&result),
        CompilationError::VariableRedeclaration { name, .. } if name == "x"
    ));
}

#[test]
fn nested_scope_may_shadow() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("f", "int", &[]),
        &[
            ast.decl("int", "x", Some(ast.int(1))),
            ast.block(&[ast.decl("float", "x", Some(ast.float(2.0)))]),
            ast.ret(Some(ast.var("x"))),
        ],
    ))]);

    let (_, result) = compile(&unit);
    assert_success(&result);
}

#[test]
fn argument_cannot_be_redeclared_in_body() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("f", "void", &[ast.arg("a", "float")]),
        &[ast.decl("float", "a", None)],
    ))]);

    let (_, result) = compile(&unit);
    assert!(matches!(
        single_error(&result),
        CompilationError::VariableRedeclaration { .. }
    ));
}

#[test]
fn assignment_converts_int_to_float() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("f", "float", &[]),
        &[
            ast.decl("float", "x", None),
            ast.expr_stmt(ast.assign("x", ast.int(4))),
            ast.ret(Some(ast.var("x"))),
        ],
    ))]);

    let (module, result) = compile(&unit);
    assert_success(&result);
    assert_eq!(
        find(&module, "f$", |k| matches!(k, InstKind::Cast { .. })).len(),
        1
    );
}

// ============================================================================
// Statements and control flow
// ============================================================================

#[test]
fn statements_after_return_are_dropped_with_warning() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("f", "float", &[]),
        &[
            ast.ret(Some(ast.float(1.0))),
            ast.decl("float", "dead", Some(ast.float(2.0))),
        ],
    ))]);

    let (module, result) = compile(&unit);
    assert_success(&result);
    assert_eq!(result.diagnostics.warning_count(), 1);

    let insts: Vec<_> = function(&module, "f$").instructions().collect();
    assert_eq!(insts.len(), 1);
    assert!(matches!(insts[0].kind, InstKind::Ret { .. }));
}

#[test]
fn unreachable_code_can_be_an_error() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("f", "float", &[]),
        &[ast.ret(Some(ast.float(1.0))), ast.ret(Some(ast.float(2.0)))],
    ))]);

    let options = CompilerOptions::new().with_unreachable_code(UnreachablePolicy::Error);
    let (_, result) = compile_with(&unit, options);
    assert!(matches!(
        single_error(&result),
        CompilationError::UnreachableCode { .. }
    ));
}

#[test]
fn if_without_else_misses_return() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("f", "float", &[ast.arg("c", "bool")]),
        &[ast.if_else(ast.var("c"), ast.ret(Some(ast.float(1.0))), None)],
    ))]);

    let (_, result) = compile(&unit);
    assert!(matches!(
        single_error(&result),
        CompilationError::MissingReturn { name, .. } if name == "f"
    ));
}

#[test]
fn if_else_returning_on_both_paths_has_no_merge_block() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("sign", "float", &[ast.arg("x", "float")]),
        &[ast.if_else(
            ast.binary(BinaryOp::Lt, ast.var("x"), ast.float(0.0)),
            ast.ret(Some(ast.float(-1.0))),
            Some(ast.ret(Some(ast.float(1.0)))),
        )],
    ))]);

    let (module, result) = compile(&unit);
    assert_success(&result);
    assert_eq!(labels(&module, "sign$f"), vec!["entry", "then", "else"]);
}

#[test]
fn condition_must_be_bool() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("f", "void", &[ast.arg("x", "float")]),
        &[ast.if_else(ast.var("x"), ast.block(&[]), None)],
    ))]);

    let (_, result) = compile(&unit);
    assert!(matches!(
        single_error(&result),
        CompilationError::TypeMismatch { message, .. } if message.contains("condition")
    ));
}

#[test]
fn void_function_gets_implicit_return() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("noop", "void", &[]),
        &[],
    ))]);

    let (module, result) = compile(&unit);
    assert_success(&result);
    let insts: Vec<_> = function(&module, "noop$").instructions().collect();
    assert_eq!(insts.len(), 1);
    assert_eq!(insts[0].kind, InstKind::Ret { value: None });
}

#[test]
fn while_with_break_and_continue() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("count", "int", &[]),
        &[
            ast.decl("int", "i", Some(ast.int(0))),
            ast.while_loop(
                ast.binary(BinaryOp::Lt, ast.var("i"), ast.int(10)),
                ast.block(&[
                    ast.expr_stmt(ast.assign(
                        "i",
                        ast.binary(BinaryOp::Add, ast.var("i"), ast.int(1)),
                    )),
                    ast.if_else(
                        ast.binary(BinaryOp::Eq, ast.var("i"), ast.int(5)),
                        ast.cont(),
                        None,
                    ),
                    ast.if_else(
                        ast.binary(BinaryOp::Eq, ast.var("i"), ast.int(8)),
                        ast.brk(),
                        None,
                    ),
                ]),
            ),
            ast.ret(Some(ast.var("i"))),
        ],
    ))]);

    let (module, result) = compile(&unit);
    assert_success(&result);
    let blocks = labels(&module, "count$");
    for label in ["while.cond", "while.body", "while.end"] {
        assert!(blocks.iter().any(|b| b == label), "missing {label} in {blocks:?}");
    }
}

#[test]
fn infinite_loop_needs_no_trailing_return() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("spin", "float", &[]),
        &[ast.while_loop(
            ast.bool(true),
            ast.block(&[ast.ret(Some(ast.float(1.0)))]),
        )],
    ))]);

    let (module, result) = compile(&unit);
    assert_success(&result);
    assert!(find(&module, "spin$", |k| matches!(k, InstKind::CondBr { .. })).is_empty());
    assert_eq!(
        find(&module, "spin$", |k| matches!(k, InstKind::Unreachable)).len(),
        1
    );
}

#[test]
fn infinite_loop_with_break_still_needs_return() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("spin", "float", &[ast.arg("c", "bool")]),
        &[ast.while_loop(
            ast.bool(true),
            ast.block(&[ast.if_else(ast.var("c"), ast.brk(), None)]),
        )],
    ))]);

    let (_, result) = compile(&unit);
    assert!(matches!(
        single_error(&result),
        CompilationError::MissingReturn { name, .. } if name == "spin"
    ));
}

#[test]
fn break_outside_loop_fails() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("f", "void", &[]),
        &[ast.brk()],
    ))]);

    let (_, result) = compile(&unit);
    assert!(matches!(
        single_error(&result),
        CompilationError::BreakOutsideLoop { keyword: "break", .. }
    ));
}

#[test]
fn return_value_must_match_function() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[
        Item::Function(ast.function(
            ast.prototype("v", "void", &[]),
            &[ast.ret(Some(ast.float(1.0)))],
        )),
        Item::Function(ast.function(
            ast.prototype("g", "float", &[]),
            &[ast.ret(None)],
        )),
    ]);

    let (_, result) = compile(&unit);
    let messages: Vec<String> = result
        .diagnostics
        .errors()
        .map(|d| d.error.to_string())
        .collect();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("void function 'v' cannot return a value"));
    assert!(messages[1].contains("function 'g' must return a value of type 'float'"));
}

#[test]
fn printed_module_names_mangled_symbols() {
    let arena = Bump::new();
    let ast = AstBuilder::new(&arena);
    let unit = ast.unit(&[Item::Function(ast.function(
        ast.prototype("add", "float", &[ast.arg("a", "float"), ast.arg("b", "float")]),
        &[ast.ret(Some(ast.binary(BinaryOp::Add, ast.var("a"), ast.var("b"))))],
    ))]);

    let (module, result) = compile(&unit);
    assert_success(&result);
    let text = module.to_string();
    assert!(text.contains("@add$f.f("), "{text}");
}
