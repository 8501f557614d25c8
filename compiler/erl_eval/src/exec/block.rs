//! Statement sequences and `case`.

use std::sync::atomic::Ordering;

use erl_ir::{CaseExpr, Expr, Name};
use erl_value::{bad_match_on_case, cancelled, EvalError, EvalResult, Value};

use super::{Enclosing, Flow};
use crate::binder::bind;
use crate::process::Process;

impl Process {
    /// Evaluate a body outside tail position.
    pub(crate) fn eval_block(&mut self, module: Enclosing<'_>, body: &[Expr]) -> EvalResult {
        self.eval_body(module, body, false)?.into_value()
    }

    /// Evaluate statements in order; the first error aborts the body.
    ///
    /// A `case` in last position is not evaluated recursively: the selected
    /// branch's body replaces the current one and the loop continues, so
    /// its last statement is in tail position too. With `tail` set, a call
    /// in last position may come back as [`Flow::TailCall`]. An empty body
    /// is `ok`.
    pub(super) fn eval_body(
        &mut self,
        module: Enclosing<'_>,
        mut body: &[Expr],
        tail: bool,
    ) -> Result<Flow, EvalError> {
        loop {
            let Some((last, init)) = body.split_last() else {
                return Ok(Flow::Value(Value::Atom(Name::OK)));
            };
            for statement in init {
                self.checkpoint()?;
                self.eval(module, statement)?;
            }
            self.checkpoint()?;
            match last {
                Expr::Invocation(call) => return self.eval_invocation(module, call, tail),
                Expr::Case(case) => body = self.select_branch(module, case)?,
                other => return self.eval(module, other).map(Flow::Value),
            }
        }
    }

    /// Statement boundary: honour cancellation, count the statement.
    fn checkpoint(&mut self) -> Result<(), EvalError> {
        if let Some(token) = &self.cancellation {
            if token.load(Ordering::Relaxed) {
                return Err(cancelled());
            }
        }
        self.mode_state.count_statement();
        Ok(())
    }

    /// Evaluate the subject once and pick the first branch whose pattern
    /// and guard accept it. The chosen branch's bindings stay in the frame;
    /// a rejected branch leaves none behind.
    pub(super) fn select_branch<'a>(
        &mut self,
        module: Enclosing<'_>,
        case: &'a CaseExpr,
    ) -> Result<&'a [Expr], EvalError> {
        let subject = self.eval(module, &case.subject)?;
        for branch in &case.branches {
            self.mode_state.count_pattern_match();
            self.stack.current_mut().push_scope();
            if bind(&branch.pattern, &subject, self.stack.current_mut(), false)
                && self.guard_passes(module, branch.guard.as_ref())
            {
                self.stack.current_mut().commit_scope();
                return Ok(&branch.body);
            }
            self.stack.current_mut().pop_scope();
        }
        Err(bad_match_on_case())
    }
}
