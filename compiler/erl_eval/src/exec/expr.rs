//! Expression evaluation.

use erl_ir::{BinaryOp, Expr};
use erl_value::{bad_match, undefined_variable, EvalError, EvalResult, Value};

use super::Enclosing;
use crate::binder::bind;
use crate::operators::evaluate_binary;
use crate::process::Process;
use crate::unary_operators::evaluate_unary;

impl Process {
    /// Evaluate `expr` in the current frame.
    pub(crate) fn eval(&mut self, module: Enclosing<'_>, expr: &Expr) -> EvalResult {
        match expr {
            Expr::Atom(name) => Ok(Value::Atom(*name)),
            Expr::Variable(name) => self
                .stack
                .current()
                .get(*name)
                .cloned()
                .ok_or_else(|| undefined_variable(name.as_str())),
            Expr::Constant(n) => Ok(Value::Number(n.clone())),
            Expr::Tuple(elements) => Ok(Value::tuple(self.eval_all(module, elements)?)),
            Expr::List(list) => {
                let items = self.eval_all(module, &list.elements)?;
                let tail = match &list.tail {
                    Some(tail) => self.eval(module, tail)?,
                    None => Value::nil(),
                };
                Ok(Value::improper_list(items, tail))
            }
            Expr::Unary { op, operand } => evaluate_unary(&self.eval(module, operand)?, *op),
            Expr::Binary { op, left, right } => self.eval_binary(module, *op, left, right),
            Expr::Invocation(call) => self.eval_invocation(module, call, false)?.into_value(),
            Expr::Case(case) => {
                let body = self.select_branch(module, case)?;
                self.eval_block(module, body)
            }
        }
    }

    /// Evaluate left to right, stopping at the first error.
    pub(super) fn eval_all(
        &mut self,
        module: Enclosing<'_>,
        exprs: &[Expr],
    ) -> Result<Vec<Value>, EvalError> {
        exprs.iter().map(|expr| self.eval(module, expr)).collect()
    }

    fn eval_binary(
        &mut self,
        module: Enclosing<'_>,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
    ) -> EvalResult {
        match op {
            BinaryOp::Match => self.eval_match(module, left, right),
            BinaryOp::AndAlso => {
                if self.eval(module, left)?.is_true() {
                    self.eval(module, right)
                } else {
                    Ok(Value::FALSE)
                }
            }
            BinaryOp::OrElse => {
                let left = self.eval(module, left)?;
                if left.is_true() {
                    Ok(left)
                } else {
                    self.eval(module, right)
                }
            }
            _ => {
                let left = self.eval(module, left)?;
                let right = self.eval(module, right)?;
                evaluate_binary(&left, &right, op)
            }
        }
    }

    /// `Pattern = Expr`: the right side first, then a match whose bindings
    /// are kept only if the whole pattern matches.
    fn eval_match(&mut self, module: Enclosing<'_>, pattern: &Expr, value: &Expr) -> EvalResult {
        let value = self.eval(module, value)?;
        self.mode_state.count_pattern_match();
        let frame = self.stack.current_mut();
        frame.push_scope();
        if bind(pattern, &value, frame, false) {
            frame.commit_scope();
            Ok(value)
        } else {
            frame.pop_scope();
            Err(bad_match())
        }
    }
}
