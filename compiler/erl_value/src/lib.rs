#![allow(
    clippy::result_large_err,
    reason = "EvalError is returned by every evaluation step; boxing it would touch the whole evaluator"
)]
//! Runtime values and evaluation errors for the erlite evaluator.
//!
//! This crate provides:
//! - Runtime value types (`Value`, `Heap`, `List`, `Tuple`)
//! - Evaluation error types (`EvalError`, `EvalResult`) and their factories
//!
//! # Value Types
//!
//! All heap allocations go through `Value::` factory methods; the `Heap<T>`
//! wrapper enforces this, and its `Arc` makes values thread-safe to share.

mod errors;
mod value;

pub use errors::{
    // Type errors
    bad_argument,
    // Pattern errors
    bad_match,
    bad_match_on_case,
    // Resource limits
    budget_exceeded,
    call_depth_exceeded,
    cancelled,
    cannot_concat,
    division_by_zero,
    expected_atom,
    // Lookup errors
    invalid_module_info_call,
    no_matching_function,
    no_matching_module,
    no_matching_tuple_item,
    no_such_tail_call_function,
    not_a_boolean,
    not_a_list,
    not_a_proper_list,
    // Not implemented
    not_implemented,
    not_integers,
    not_integral,
    not_numbers,
    undefined_variable,
    unresolved_function,
    BacktraceFrame,
    EvalBacktrace,
    EvalError,
    EvalErrorKind,
    EvalResult,
};
pub use value::{Cons, Elements, Heap, List, Tuple, Value, ValueKind};
