//! Tail calls run in bounded frame depth; other calls keep their frames.

use erl_ir::{BinaryOp, CaseBranch, Clause, Expr, ModuleDecl};
use erl_value::{EvalErrorKind, Value};
use pretty_assertions::assert_eq;

use super::{build, function, kind, len_module, op, process_with, sum_module};
use crate::Process;

#[test]
fn million_step_accumulator_runs_in_constant_depth() {
    let mut process = build(Process::builder().max_call_depth(4), vec![sum_module()]);
    let result = process.try_evaluate(Some("acc"), "sum", vec![Value::int(1_000_000)]);
    assert_eq!(result, Ok(Value::int(500_000_500_000_i64)));
    assert_eq!(process.call_depth(), 0);
}

#[test]
fn tail_calls_are_counted() {
    let mut process = build(Process::builder().profile(true), vec![sum_module()]);
    assert_eq!(
        process.evaluate(Some("acc"), "sum", vec![Value::int(10)]),
        Value::int(55)
    );
    let counters = process.counters().cloned().unwrap_or_default();
    // sum/1, sum/2, then ten rewinds of sum/2.
    assert_eq!(counters.tail_calls, 10);
    assert_eq!(counters.function_calls, 12);
}

/// `even(0) -> true; even(N) -> odd(N - 1).`
/// `odd(0) -> false; odd(N) -> even(N - 1).`
fn parity_module() -> ModuleDecl {
    let step = |target: &str| {
        Expr::call(
            target,
            vec![op(BinaryOp::Sub, Expr::var("N"), Expr::int(1))],
        )
    };
    ModuleDecl::new("parity")
        .export_all()
        .function(function(
            "even",
            vec![
                Clause::new(vec![Expr::int(0)], vec![Expr::atom("true")]),
                Clause::new(vec![Expr::var("N")], vec![step("odd")]),
            ],
        ))
        .function(function(
            "odd",
            vec![
                Clause::new(vec![Expr::int(0)], vec![Expr::atom("false")]),
                Clause::new(vec![Expr::var("N")], vec![step("even")]),
            ],
        ))
}

#[test]
fn mutual_tail_recursion_is_bounded() {
    let mut process = build(Process::builder().max_call_depth(3), vec![parity_module()]);
    assert_eq!(
        process.try_evaluate(Some("parity"), "even", vec![Value::int(100_001)]),
        Ok(Value::FALSE)
    );
    assert_eq!(
        process.try_evaluate(Some("parity"), "odd", vec![Value::int(100_001)]),
        Ok(Value::TRUE)
    );
}

/// `countdown(N) -> case N of 0 -> done; _ -> countdown(N - 1) end.`
fn countdown_module() -> ModuleDecl {
    ModuleDecl::new("loop").export_all().function(function(
        "countdown",
        vec![Clause::new(
            vec![Expr::var("N")],
            vec![Expr::case(
                Expr::var("N"),
                vec![
                    CaseBranch::new(Expr::int(0), vec![Expr::atom("done")]),
                    CaseBranch::new(
                        Expr::var("_"),
                        vec![Expr::call(
                            "countdown",
                            vec![op(BinaryOp::Sub, Expr::var("N"), Expr::int(1))],
                        )],
                    ),
                ],
            )],
        )],
    ))
}

#[test]
fn case_branches_in_last_position_are_tail_positions() {
    let mut process = build(Process::builder().max_call_depth(2), vec![countdown_module()]);
    assert_eq!(
        process.evaluate(Some("loop"), "countdown", vec![Value::int(100_000)]),
        Value::atom("done")
    );
}

#[test]
fn disabled_tail_calls_push_frames() {
    let mut process = build(
        Process::builder().tail_calls(false).max_call_depth(50),
        vec![countdown_module()],
    );
    assert_eq!(
        process.evaluate(Some("loop"), "countdown", vec![Value::int(10)]),
        Value::atom("done")
    );
    let deep = process.try_evaluate(Some("loop"), "countdown", vec![Value::int(100)]);
    assert_eq!(kind(deep), Some(EvalErrorKind::StackOverflow { depth: 50 }));
    assert_eq!(process.call_depth(), 0);
}

#[test]
fn non_tail_recursion_keeps_its_frames() {
    let mut process = process_with(vec![len_module()]);
    let items: Vec<Value> = (0..20_000).map(Value::int).collect();
    assert_eq!(
        process.evaluate(Some("lists2"), "len", vec![Value::list(items)]),
        Value::int(20_000)
    );
}

/// `a(0) -> 0; a(N) -> 1 + b(N).`  `b(N) -> a(N - 1).`
///
/// `b` tail-calls `a`, but the live `a` frame is still waiting to add 1,
/// so it must not be replaced.
#[test]
fn pending_continuations_are_not_discarded() {
    let decl = ModuleDecl::new("pending")
        .export_all()
        .function(function(
            "a",
            vec![
                Clause::new(vec![Expr::int(0)], vec![Expr::int(0)]),
                Clause::new(
                    vec![Expr::var("N")],
                    vec![op(
                        BinaryOp::Add,
                        Expr::int(1),
                        Expr::call("b", vec![Expr::var("N")]),
                    )],
                ),
            ],
        ))
        .function(function(
            "b",
            vec![Clause::new(
                vec![Expr::var("N")],
                vec![Expr::call(
                    "a",
                    vec![op(BinaryOp::Sub, Expr::var("N"), Expr::int(1))],
                )],
            )],
        ));
    let mut process = process_with(vec![decl]);
    assert_eq!(
        process.evaluate(Some("pending"), "a", vec![Value::int(25)]),
        Value::int(25)
    );
}

/// `f(0) -> 0; f(N) -> X = f(N - 1), X + 1.`
#[test]
fn calls_before_the_last_statement_are_not_tail_calls() {
    let decl = ModuleDecl::new("inner").export_all().function(function(
        "f",
        vec![
            Clause::new(vec![Expr::int(0)], vec![Expr::int(0)]),
            Clause::new(
                vec![Expr::var("N")],
                vec![
                    Expr::matches(
                        Expr::var("X"),
                        Expr::call("f", vec![op(BinaryOp::Sub, Expr::var("N"), Expr::int(1))]),
                    ),
                    op(BinaryOp::Add, Expr::var("X"), Expr::int(1)),
                ],
            ),
        ],
    ));
    let mut process = process_with(vec![decl]);
    assert_eq!(
        process.evaluate(Some("inner"), "f", vec![Value::int(50)]),
        Value::int(50)
    );
}

/// `down(N) when N > 0 -> down(N - 1).` has no clause for 0.
#[test]
fn rewound_call_without_matching_clause() {
    let decl = ModuleDecl::new("nobase").export_all().function(function(
        "down",
        vec![Clause::new(
            vec![Expr::var("N")],
            vec![Expr::call(
                "down",
                vec![op(BinaryOp::Sub, Expr::var("N"), Expr::int(1))],
            )],
        )
        .with_guard(erl_ir::Guard::new(op(
            BinaryOp::Gt,
            Expr::var("N"),
            Expr::int(0),
        )))],
    ));
    let mut process = process_with(vec![decl]);
    assert_eq!(
        process.evaluate(Some("nobase"), "down", vec![Value::int(3)]),
        Value::error("no_such_tailcall_function")
    );
    assert_eq!(
        process.evaluate(Some("nobase"), "down", vec![Value::int(0)]),
        Value::error("no matching function found")
    );
}

/// `nest(0, Acc) -> Acc; nest(N, Acc) -> nest(N - 1, {Acc}).`
fn nest_module() -> ModuleDecl {
    ModuleDecl::new("nest").export_all().function(function(
        "nest",
        vec![
            Clause::new(vec![Expr::int(0), Expr::var("Acc")], vec![Expr::var("Acc")]),
            Clause::new(
                vec![Expr::var("N"), Expr::var("Acc")],
                vec![Expr::call(
                    "nest",
                    vec![
                        op(BinaryOp::Sub, Expr::var("N"), Expr::int(1)),
                        Expr::tuple(vec![Expr::var("Acc")]),
                    ],
                )],
            ),
        ],
    ))
}

#[test]
fn values_built_by_tail_recursion_compare_and_drop() {
    let mut process = process_with(vec![nest_module()]);
    let mut nest = |inner: &str| {
        process.evaluate(
            Some("nest"),
            "nest",
            vec![Value::int(1_000_000), Value::atom(inner)],
        )
    };
    let a = nest("ok");
    let b = nest("ok");
    let c = nest("other");
    assert!(a.as_tuple().is_some());
    assert!(a == b);
    assert!(a != c);
    assert_eq!(a.compare(&c), Some(std::cmp::Ordering::Less));
    drop(a);
    drop(b);
    drop(c);
}
