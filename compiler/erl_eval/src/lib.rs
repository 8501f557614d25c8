#![allow(
    clippy::result_large_err,
    reason = "EvalError is returned by value on every evaluation path"
)]
//! erl eval - tree-walking evaluator for the erlite language.
//!
//! # Architecture
//!
//! - `Process`: one sequential evaluation context with its own call stack
//! - `CallStack` / `Frame`: per-call scopes, tail-position tracking, backtraces
//! - `bind`: structural pattern matching into the current frame
//! - `evaluate_binary` / `evaluate_unary`: operators over evaluated values
//! - `Module`: the contract shared by `CompiledModule` (interpreted) and
//!   `NativeModule` (host functions)
//! - `SharedModuleRegistry`: module table shared between processes
//! - `EvalMode` / `ProcessBuilder`: limits and configuration
//!
//! ```ignore
//! let mut process = Process::new();
//! process.compile_module(decl)?;
//! let sum = process.evaluate(Some("math"), "sum", vec![Value::int(10)]);
//! ```
//!
//! # Re-exports
//!
//! Value and error types come from `erl_value`, the expression tree from
//! `erl_ir`.

mod bifs;
mod binder;
mod call_stack;
mod diagnostics;
mod eval_mode;
mod exec;
mod module;
mod operators;
mod process;
mod registry;
mod unary_operators;

pub use binder::bind;
pub use call_stack::{CallStack, Frame};
pub use diagnostics::{init_tracing, EvalCounters};
pub use eval_mode::{BudgetExceeded, EvalMode, ModeState};
pub use module::{
    CompileError, CompiledModule, FunctionGroup, Module, ModuleInfo, NativeFn, NativeFunction,
    NativeModule, NativeModuleBuilder,
};
pub use operators::evaluate_binary;
pub use process::{CancelToken, Process, ProcessBuilder};
pub use registry::{ModuleRegistry, SharedModuleRegistry};
pub use unary_operators::evaluate_unary;

pub use erl_value::{EvalBacktrace, EvalError, EvalErrorKind, EvalResult, Value};

#[cfg(test)]
mod tests;
