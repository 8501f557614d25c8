//! `when` guards.

use erl_ir::{Combinator, Expr, Guard};

use super::Enclosing;
use crate::process::Process;

impl Process {
    /// Whether `guard` accepts the current bindings; no guard always does.
    ///
    /// `;` ends an alternative and `,` chains tests within one, so the
    /// guard holds if every test of some alternative is `true`. Tests run
    /// left to right, each at most once, skipping what can no longer change
    /// the outcome. A test that fails or yields anything but `true` is false.
    pub(super) fn guard_passes(&mut self, module: Enclosing<'_>, guard: Option<&Guard>) -> bool {
        let Some(guard) = guard else {
            return true;
        };
        if guard.clauses.is_empty() {
            return true;
        }
        guard
            .clauses
            .split_inclusive(|clause| clause.combinator == Combinator::Or)
            .any(|alternative| {
                alternative
                    .iter()
                    .all(|clause| self.guard_test(module, &clause.expr))
            })
    }

    fn guard_test(&mut self, module: Enclosing<'_>, test: &Expr) -> bool {
        matches!(self.eval(module, test), Ok(value) if value.is_true())
    }
}
