//! The tree-walking evaluator.
//!
//! Evaluation is split by concern, each file adding methods to `Process`:
//!
//! - `expr`: literals, variables, operators, `=`
//! - `block`: statement sequences, `case`, the tail-call trampoline
//! - `guard`: `when` guards
//! - `call`: call resolution, frames, clause selection, module dispatch
//!
//! # Tail calls
//!
//! The last statement of a function body is evaluated in tail position.
//! When it calls a function whose frame is already live (and only tail
//! frames lie above it), evaluation does not recurse: the call unwinds as
//! [`Flow::TailCall`] to the `invoke` that owns that frame, which drops the
//! frame and everything above it, pushes a fresh one and loops. Both the
//! frame stack and the native stack stay bounded for self and mutual tail
//! recursion.

mod block;
mod call;
mod expr;
mod guard;

use std::sync::Arc;

use erl_value::{no_such_tail_call_function, EvalResult, Value};

use crate::module::CompiledModule;

pub(crate) use call::{raise_error_value, TailCall};

/// The module whose functions unqualified calls see first; `None` for
/// expressions evaluated outside any function.
pub(crate) type Enclosing<'a> = Option<&'a Arc<CompiledModule>>;

/// Outcome of evaluating something that may end in a tail call.
pub(crate) enum Flow {
    Value(Value),
    /// A tail call that replaces the frame at `TailCall::frame`.
    TailCall(TailCall),
}

impl Flow {
    /// The value of a flow in non-tail context. A tail call can't legally
    /// reach one, so a stray one is reported rather than run.
    pub(crate) fn into_value(self) -> EvalResult {
        match self {
            Flow::Value(value) => Ok(value),
            Flow::TailCall(_) => Err(no_such_tail_call_function()),
        }
    }
}
