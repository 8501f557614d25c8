//! Evaluator tests that run whole modules through a `Process`.

mod tail_call_tests;

use erl_ir::{BinaryOp, Clause, Expr, FunctionDecl, ModuleDecl};
use erl_value::{EvalErrorKind, EvalResult, Value};

use crate::{Process, ProcessBuilder};

/// Build a process from `builder` and compile `decls` into it.
fn build(builder: ProcessBuilder, decls: Vec<ModuleDecl>) -> Process {
    let mut process = builder.build();
    for decl in decls {
        let name = decl.module_name();
        if let Err(err) = process.compile_module(decl) {
            panic!("module {name:?} failed to compile: {err}");
        }
    }
    process
}

fn process_with(decls: Vec<ModuleDecl>) -> Process {
    build(Process::builder(), decls)
}

fn ints(items: &[i64]) -> Value {
    Value::list(items.iter().copied().map(Value::int).collect())
}

fn kind(result: EvalResult) -> Option<EvalErrorKind> {
    result.err().map(|err| err.kind)
}

fn op(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::binary(op, left, right)
}

fn function(name: &str, clauses: Vec<Clause>) -> FunctionDecl {
    FunctionDecl::new(name, clauses)
}

/// `sum(N) -> sum(N, 0).`
/// `sum(0, Acc) -> Acc; sum(N, Acc) -> sum(N - 1, Acc + N).`
fn sum_module() -> ModuleDecl {
    ModuleDecl::new("acc")
        .export(&[("sum", 1)])
        .function(function(
            "sum",
            vec![Clause::new(
                vec![Expr::var("N")],
                vec![Expr::call("sum", vec![Expr::var("N"), Expr::int(0)])],
            )],
        ))
        .function(function(
            "sum",
            vec![
                Clause::new(
                    vec![Expr::int(0), Expr::var("Acc")],
                    vec![Expr::var("Acc")],
                ),
                Clause::new(
                    vec![Expr::var("N"), Expr::var("Acc")],
                    vec![Expr::call(
                        "sum",
                        vec![
                            op(BinaryOp::Sub, Expr::var("N"), Expr::int(1)),
                            op(BinaryOp::Add, Expr::var("Acc"), Expr::var("N")),
                        ],
                    )],
                ),
            ],
        ))
}

/// `len([]) -> 0; len([_ | T]) -> 1 + len(T).`
fn len_module() -> ModuleDecl {
    ModuleDecl::new("lists2").export_all().function(function(
        "len",
        vec![
            Clause::new(vec![Expr::nil()], vec![Expr::int(0)]),
            Clause::new(
                vec![Expr::cons(vec![Expr::var("_")], Expr::var("T"))],
                vec![op(
                    BinaryOp::Add,
                    Expr::int(1),
                    Expr::call("len", vec![Expr::var("T")]),
                )],
            ),
        ],
    ))
}
