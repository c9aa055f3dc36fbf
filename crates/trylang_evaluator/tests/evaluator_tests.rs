//! Evaluator integration tests.
//!
//! Programs are built with the syntax builder, bound, lowered, and then
//! evaluated against a fresh store.

use pretty_assertions::assert_eq;
use trylang_binder::{Binder, BoundBlockStatement, BoundExpression, BoundStatement, BoundWhileStatement};
use trylang_core::value::{TypeSymbol, Value};
use trylang_evaluator::{evaluate, ArithmeticFault, InternalError, RuntimeError, VariableStore};
use trylang_lowerer::lower_program;
use trylang_options::CompilerOptions;
use trylang_syntax::{NodeId, SyntaxKind, SyntaxTreeBuilder};

fn compile(f: impl FnOnce(&mut SyntaxTreeBuilder) -> Vec<NodeId>) -> BoundBlockStatement {
    let mut b = SyntaxTreeBuilder::new();
    let statements = f(&mut b);
    let tree = b.finish(statements);
    let program = Binder::bind_program(&tree);
    assert!(
        program.diagnostics.is_empty(),
        "unexpected diagnostics:\n{}",
        program.diagnostics
    );
    lower_program(program.statement)
}

fn run(
    program: &BoundBlockStatement,
    options: &CompilerOptions,
) -> (Result<Option<Value>, RuntimeError>, VariableStore) {
    let mut store = VariableStore::new();
    let result = evaluate(program, &mut store, options);
    (result, store)
}

fn run_default(program: &BoundBlockStatement) -> (Result<Option<Value>, RuntimeError>, VariableStore) {
    run(program, &CompilerOptions::default())
}

fn store_of(entries: &[(&str, Value)]) -> VariableStore {
    entries.iter().copied().collect()
}

/// `lhs <op> rhs;` as a single expression statement.
fn binary_program(lhs: i64, op: SyntaxKind, rhs: i64) -> BoundBlockStatement {
    compile(|b| {
        let l = b.int(lhs);
        let r = b.int(rhs);
        let e = b.binary(l, op, r);
        vec![b.expression_statement(e)]
    })
}

// ============================================================================
// Straight-line code
// ============================================================================

#[test]
fn test_empty_program_has_no_value() {
    let program = compile(|_| Vec::new());
    let (result, store) = run_default(&program);
    assert_eq!(result, Ok(None));
    assert!(store.is_empty());
}

#[test]
fn test_declarations_only_have_no_value() {
    let program = compile(|b| {
        let one = b.int(1);
        vec![b.var_declaration("x", one)]
    });
    let (result, store) = run_default(&program);
    assert_eq!(result, Ok(None));
    assert_eq!(store, store_of(&[("x", Value::Int(1))]));
}

#[test]
fn test_arithmetic_precedence_as_built() {
    // 2 + 3 * 4 - 10 / 3 % 2
    let program = compile(|b| {
        let two = b.int(2);
        let three = b.int(3);
        let four = b.int(4);
        let product = b.binary(three, SyntaxKind::StarToken, four);
        let sum = b.binary(two, SyntaxKind::PlusToken, product);
        let ten = b.int(10);
        let three = b.int(3);
        let quotient = b.binary(ten, SyntaxKind::SlashToken, three);
        let two = b.int(2);
        let rem = b.binary(quotient, SyntaxKind::PercentToken, two);
        let e = b.binary(sum, SyntaxKind::MinusToken, rem);
        vec![b.expression_statement(e)]
    });
    assert_eq!(run_default(&program).0, Ok(Some(Value::Int(13))));
}

#[test]
fn test_unary_operators() {
    let program = compile(|b| {
        let five = b.int(5);
        let neg = b.unary(SyntaxKind::MinusToken, five);
        let plus = b.unary(SyntaxKind::PlusToken, neg);
        vec![b.expression_statement(plus)]
    });
    assert_eq!(run_default(&program).0, Ok(Some(Value::Int(-5))));

    let program = compile(|b| {
        let t = b.boolean(true);
        let not = b.unary(SyntaxKind::BangToken, t);
        vec![b.expression_statement(not)]
    });
    assert_eq!(run_default(&program).0, Ok(Some(Value::Bool(false))));
}

#[test]
fn test_integer_division_truncates_toward_zero() {
    let program = binary_program(-7, SyntaxKind::SlashToken, 2);
    assert_eq!(run_default(&program).0, Ok(Some(Value::Int(-3))));
    let program = binary_program(-7, SyntaxKind::PercentToken, 2);
    assert_eq!(run_default(&program).0, Ok(Some(Value::Int(-1))));
}

#[test]
fn test_comparisons_and_equality() {
    let cases = [
        (SyntaxKind::LessToken, 1, 2, true),
        (SyntaxKind::LessEqualsToken, 2, 2, true),
        (SyntaxKind::GreaterToken, 1, 2, false),
        (SyntaxKind::GreaterEqualsToken, 3, 2, true),
        (SyntaxKind::EqualsEqualsToken, 4, 4, true),
        (SyntaxKind::BangEqualsToken, 4, 4, false),
    ];
    for (op, l, r, expected) in cases {
        let program = binary_program(l, op, r);
        assert_eq!(run_default(&program).0, Ok(Some(Value::Bool(expected))), "{:?}", op);
    }

    let program = compile(|b| {
        let t = b.boolean(true);
        let f = b.boolean(false);
        let e = b.binary(t, SyntaxKind::BangEqualsToken, f);
        vec![b.expression_statement(e)]
    });
    assert_eq!(run_default(&program).0, Ok(Some(Value::Bool(true))));
}

#[test]
fn test_assignment_yields_assigned_value() {
    let program = compile(|b| {
        let one = b.int(1);
        let decl = b.var_declaration("x", one);
        let five = b.int(5);
        let assign = b.assignment("x", five);
        vec![decl, b.expression_statement(assign)]
    });
    let (result, store) = run_default(&program);
    assert_eq!(result, Ok(Some(Value::Int(5))));
    assert_eq!(store.get("x", TypeSymbol::Int), Some(Value::Int(5)));
}

// ============================================================================
// Control flow
// ============================================================================

#[test]
fn test_if_assigns_and_returns_last_value() {
    // var x = 1; if x == 1 { x = 2; } x;
    let program = compile(|b| {
        let one = b.int(1);
        let decl = b.var_declaration("x", one);
        let x = b.name("x");
        let one = b.int(1);
        let cond = b.binary(x, SyntaxKind::EqualsEqualsToken, one);
        let two = b.int(2);
        let assign = b.assignment("x", two);
        let assign_stmt = b.expression_statement(assign);
        let then_block = b.block(vec![assign_stmt]);
        let if_stmt = b.if_statement(cond, then_block, None);
        let x = b.name("x");
        let tail = b.expression_statement(x);
        vec![decl, if_stmt, tail]
    });
    let (result, store) = run_default(&program);
    assert_eq!(result, Ok(Some(Value::Int(2))));
    assert_eq!(store, store_of(&[("x", Value::Int(2))]));
}

#[test]
fn test_if_else_takes_else_branch() {
    let program = compile(|b| {
        let f = b.boolean(false);
        let ten = b.int(10);
        let then_stmt = b.expression_statement(ten);
        let twenty = b.int(20);
        let else_stmt = b.expression_statement(twenty);
        vec![b.if_statement(f, then_stmt, Some(else_stmt))]
    });
    assert_eq!(run_default(&program).0, Ok(Some(Value::Int(20))));
}

#[test]
fn test_while_counts_to_three() {
    // var i = 0; while i < 3 { i = i + 1; }
    let program = compile(|b| {
        let zero = b.int(0);
        let decl = b.var_declaration("i", zero);
        let i = b.name("i");
        let three = b.int(3);
        let cond = b.binary(i, SyntaxKind::LessToken, three);
        let i = b.name("i");
        let one = b.int(1);
        let sum = b.binary(i, SyntaxKind::PlusToken, one);
        let assign = b.assignment("i", sum);
        let body_stmt = b.expression_statement(assign);
        let body = b.block(vec![body_stmt]);
        vec![decl, b.while_statement(cond, body)]
    });
    let (result, store) = run_default(&program);
    assert_eq!(result, Ok(Some(Value::Int(3))));
    assert_eq!(store, store_of(&[("i", Value::Int(3))]));
}

#[test]
fn test_while_false_never_runs_body() {
    let program = compile(|b| {
        let zero = b.int(0);
        let decl = b.var_declaration("x", zero);
        let f = b.boolean(false);
        let one = b.int(1);
        let assign = b.assignment("x", one);
        let body = b.expression_statement(assign);
        vec![decl, b.while_statement(f, body)]
    });
    let (result, store) = run_default(&program);
    assert_eq!(result, Ok(None));
    assert_eq!(store.get("x", TypeSymbol::Int), Some(Value::Int(0)));
}

#[test]
fn test_for_loop_sums_and_leaves_counter_past_bound() {
    // var sum = 0; for i = 1 to 3 { sum = sum + i; }
    let program = compile(|b| {
        let zero = b.int(0);
        let decl = b.var_declaration("sum", zero);
        let lo = b.int(1);
        let hi = b.int(3);
        let s = b.name("sum");
        let i = b.name("i");
        let add = b.binary(s, SyntaxKind::PlusToken, i);
        let assign = b.assignment("sum", add);
        let body_stmt = b.expression_statement(assign);
        let body = b.block(vec![body_stmt]);
        vec![decl, b.for_statement("i", lo, hi, body)]
    });
    let (result, store) = run_default(&program);
    // The increment `i = i + 1` is the last expression statement executed.
    assert_eq!(result, Ok(Some(Value::Int(4))));
    assert_eq!(
        store,
        store_of(&[("sum", Value::Int(6)), ("i", Value::Int(4))])
    );
}

#[test]
fn test_empty_for_loop_store() {
    let program = compile(|b| {
        let lo = b.int(1);
        let hi = b.int(3);
        let body = b.block(Vec::new());
        vec![b.for_statement("i", lo, hi, body)]
    });
    let (_, store) = run_default(&program);
    assert_eq!(store, store_of(&[("i", Value::Int(4))]));
}

#[test]
fn test_for_upper_bound_is_reevaluated() {
    // var n = 3; var count = 0; for i = 1 to n { n = n - 1; count = count + 1; }
    let program = compile(|b| {
        let three = b.int(3);
        let n_decl = b.var_declaration("n", three);
        let zero = b.int(0);
        let count_decl = b.var_declaration("count", zero);
        let lo = b.int(1);
        let hi = b.name("n");
        let n = b.name("n");
        let one = b.int(1);
        let dec = b.binary(n, SyntaxKind::MinusToken, one);
        let n_assign = b.assignment("n", dec);
        let n_stmt = b.expression_statement(n_assign);
        let count = b.name("count");
        let one = b.int(1);
        let inc = b.binary(count, SyntaxKind::PlusToken, one);
        let count_assign = b.assignment("count", inc);
        let count_stmt = b.expression_statement(count_assign);
        let body = b.block(vec![n_stmt, count_stmt]);
        let for_stmt = b.for_statement("i", lo, hi, body);
        vec![n_decl, count_decl, for_stmt]
    });
    let (_, store) = run_default(&program);
    // i=1 (n 3->2), i=2 (n 2->1), then 3 <= 1 fails.
    assert_eq!(store.get("count", TypeSymbol::Int), Some(Value::Int(2)));
}

#[test]
fn test_for_loop_with_empty_range() {
    let program = compile(|b| {
        let zero = b.int(0);
        let decl = b.var_declaration("hits", zero);
        let lo = b.int(5);
        let hi = b.int(1);
        let h = b.name("hits");
        let one = b.int(1);
        let inc = b.binary(h, SyntaxKind::PlusToken, one);
        let assign = b.assignment("hits", inc);
        let body = b.expression_statement(assign);
        vec![decl, b.for_statement("i", lo, hi, body)]
    });
    let (result, store) = run_default(&program);
    assert_eq!(result, Ok(None));
    assert_eq!(store.get("hits", TypeSymbol::Int), Some(Value::Int(0)));
    assert_eq!(store.get("i", TypeSymbol::Int), Some(Value::Int(5)));
}

// ============================================================================
// Short-circuit evaluation
// ============================================================================

#[test]
fn test_and_short_circuits_division_by_zero() {
    // false && (1 / 0 == 0)
    let program = compile(|b| {
        let f = b.boolean(false);
        let one = b.int(1);
        let zero = b.int(0);
        let div = b.binary(one, SyntaxKind::SlashToken, zero);
        let zero = b.int(0);
        let cmp = b.binary(div, SyntaxKind::EqualsEqualsToken, zero);
        let paren = b.parenthesized(cmp);
        let and = b.binary(f, SyntaxKind::AmpersandAmpersandToken, paren);
        vec![b.expression_statement(and)]
    });
    assert_eq!(run_default(&program).0, Ok(Some(Value::Bool(false))));
}

#[test]
fn test_or_short_circuits_assignment() {
    // var x = 0; true || (x = 1) == 1; x
    let program = compile(|b| {
        let zero = b.int(0);
        let decl = b.var_declaration("x", zero);
        let t = b.boolean(true);
        let one = b.int(1);
        let assign = b.assignment("x", one);
        let paren = b.parenthesized(assign);
        let one = b.int(1);
        let cmp = b.binary(paren, SyntaxKind::EqualsEqualsToken, one);
        let or = b.binary(t, SyntaxKind::PipePipeToken, cmp);
        let or_stmt = b.expression_statement(or);
        let x = b.name("x");
        vec![decl, or_stmt, b.expression_statement(x)]
    });
    assert_eq!(run_default(&program).0, Ok(Some(Value::Int(0))));
}

#[test]
fn test_and_evaluates_right_when_left_true() {
    let program = compile(|b| {
        let t = b.boolean(true);
        let f = b.boolean(false);
        let and = b.binary(t, SyntaxKind::AmpersandAmpersandToken, f);
        vec![b.expression_statement(and)]
    });
    assert_eq!(run_default(&program).0, Ok(Some(Value::Bool(false))));
}

// ============================================================================
// Arithmetic faults
// ============================================================================

#[test]
fn test_division_by_zero_leaves_store_intact() {
    // var x = 5; x = 1 / 0;
    let program = compile(|b| {
        let five = b.int(5);
        let decl = b.var_declaration("x", five);
        let one = b.int(1);
        let zero = b.int(0);
        let div = b.binary(one, SyntaxKind::SlashToken, zero);
        let assign = b.assignment("x", div);
        vec![decl, b.expression_statement(assign)]
    });
    let (result, store) = run_default(&program);
    assert_eq!(result, Err(RuntimeError::Arithmetic(ArithmeticFault::DivisionByZero)));
    assert_eq!(store, store_of(&[("x", Value::Int(5))]));
}

#[test]
fn test_modulo_by_zero_faults_even_when_wrapping() {
    let program = binary_program(7, SyntaxKind::PercentToken, 0);
    let wrapping = CompilerOptions::default().with_checked_arithmetic(false);
    assert_eq!(
        run(&program, &wrapping).0,
        Err(RuntimeError::Arithmetic(ArithmeticFault::DivisionByZero))
    );
}

#[test]
fn test_overflow_checked_and_wrapping() {
    let program = binary_program(i64::MAX, SyntaxKind::PlusToken, 1);

    let (result, _) = run_default(&program);
    assert_eq!(
        result.map_err(|e| e.arithmetic_fault()),
        Err(Some(ArithmeticFault::Overflow { operator: "+" }))
    );

    let wrapping = CompilerOptions::default().with_checked_arithmetic(false);
    assert_eq!(run(&program, &wrapping).0, Ok(Some(Value::Int(i64::MIN))));
}

#[test]
fn test_min_divided_by_minus_one() {
    let program = compile(|b| {
        let min = b.int(i64::MIN);
        let one = b.int(1);
        let neg_one = b.unary(SyntaxKind::MinusToken, one);
        let div = b.binary(min, SyntaxKind::SlashToken, neg_one);
        vec![b.expression_statement(div)]
    });
    assert_eq!(
        run_default(&program).0,
        Err(RuntimeError::Arithmetic(ArithmeticFault::Overflow { operator: "/" }))
    );
    let wrapping = CompilerOptions::default().with_checked_arithmetic(false);
    assert_eq!(run(&program, &wrapping).0, Ok(Some(Value::Int(i64::MIN))));
}

#[test]
fn test_negating_min_overflows() {
    let program = compile(|b| {
        let min = b.int(i64::MIN);
        let neg = b.unary(SyntaxKind::MinusToken, min);
        vec![b.expression_statement(neg)]
    });
    assert_eq!(
        run_default(&program).0,
        Err(RuntimeError::Arithmetic(ArithmeticFault::Overflow { operator: "-" }))
    );
}

#[test]
fn test_fault_inside_loop_keeps_earlier_iterations() {
    // var i = 0; while true { i = i + 1; i = 10 / (3 - i); }
    let program = compile(|b| {
        let zero = b.int(0);
        let decl = b.var_declaration("i", zero);
        let t = b.boolean(true);
        let i = b.name("i");
        let one = b.int(1);
        let inc = b.binary(i, SyntaxKind::PlusToken, one);
        let inc_assign = b.assignment("i", inc);
        let inc_stmt = b.expression_statement(inc_assign);
        let ten = b.int(10);
        let three = b.int(3);
        let i = b.name("i");
        let diff = b.binary(three, SyntaxKind::MinusToken, i);
        let paren = b.parenthesized(diff);
        let div = b.binary(ten, SyntaxKind::SlashToken, paren);
        let div_assign = b.assignment("i", div);
        let div_stmt = b.expression_statement(div_assign);
        let body = b.block(vec![inc_stmt, div_stmt]);
        vec![decl, b.while_statement(t, body)]
    });
    // i: 0 -> 1 -> 10/2 = 5 -> 6 -> 10/-3 = -3 -> -2 -> 10/5 = 2 -> 3 -> 10/0 faults.
    let (result, store) = run_default(&program);
    assert_eq!(result, Err(RuntimeError::Arithmetic(ArithmeticFault::DivisionByZero)));
    assert_eq!(store.get("i", TypeSymbol::Int), Some(Value::Int(3)));
}

// ============================================================================
// Internal errors
// ============================================================================

#[test]
fn test_unlowered_statement_is_internal_error() {
    let program = BoundBlockStatement::new(vec![BoundStatement::While(BoundWhileStatement {
        condition: BoundExpression::literal(false),
        body: Box::new(BoundStatement::block(Vec::new())),
    })]);
    let (result, _) = run_default(&program);
    let error = result.expect_err("unlowered while must not run");
    assert!(error.is_internal());
    assert_eq!(
        error,
        RuntimeError::Internal(InternalError::UnloweredStatement(
            trylang_binder::BoundNodeKind::WhileStatement
        ))
    );
}

#[test]
fn test_missing_store_entry_is_internal_error() {
    let x = trylang_binder::VariableSymbol::mutable("x", TypeSymbol::Int);
    let program = BoundBlockStatement::new(vec![BoundStatement::expression(
        BoundExpression::variable(x),
    )]);
    let (result, _) = run_default(&program);
    assert_eq!(
        result,
        Err(RuntimeError::Internal(InternalError::UndefinedVariable("x".to_string())))
    );
}

#[test]
fn test_error_expression_is_internal_error() {
    let program = BoundBlockStatement::new(vec![BoundStatement::expression(
        BoundExpression::error(TypeSymbol::Int),
    )]);
    assert_eq!(
        run_default(&program).0,
        Err(RuntimeError::Internal(InternalError::ErrorExpression))
    );
}

#[test]
fn test_goto_to_missing_label_is_internal_error() {
    let label = trylang_binder::BoundLabel::new(9);
    let program = BoundBlockStatement::new(vec![BoundStatement::goto(label)]);
    assert_eq!(
        run_default(&program).0,
        Err(RuntimeError::Internal(InternalError::UnresolvedLabel(label)))
    );
}

#[test]
fn test_store_is_caller_owned_across_runs() {
    let program = compile(|b| {
        let one = b.int(1);
        vec![b.var_declaration("x", one)]
    });
    let mut store = store_of(&[("other", Value::Bool(true))]);
    evaluate(&program, &mut store, &CompilerOptions::default()).expect("first run");
    evaluate(&program, &mut store, &CompilerOptions::default()).expect("second run");
    assert_eq!(
        store,
        store_of(&[("other", Value::Bool(true)), ("x", Value::Int(1))])
    );
}
