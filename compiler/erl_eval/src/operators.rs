//! Binary operator implementations for the evaluator.
//!
//! Provides direct enum-based dispatch for the strict binary operators.
//! `=`, `andalso` and `orelse` never reach this module: they control
//! evaluation order and are handled by the expression evaluator.

use std::cmp::Ordering;

use erl_ir::{BinaryOp, Number};
use erl_value::{not_a_boolean, not_numbers, EvalError, EvalResult, Value};

/// Evaluate a strict binary operation on two already-evaluated operands.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Add => numeric(left, right, |a, b| Ok(a + b)),
        BinaryOp::Sub => numeric(left, right, |a, b| Ok(a - b)),
        BinaryOp::Mul => numeric(left, right, |a, b| Ok(a * b)),
        BinaryOp::Div => numeric(left, right, |a, b| Ok(a.divide(b)?)),
        BinaryOp::IntDiv => numeric(left, right, |a, b| Ok(a.int_div(b)?)),
        BinaryOp::Rem => numeric(left, right, |a, b| Ok(a.rem(b)?)),

        BinaryOp::And => boolean(left, right, |a, b| a && b),
        BinaryOp::Or => boolean(left, right, |a, b| a || b),
        BinaryOp::Xor => boolean(left, right, |a, b| a ^ b),

        BinaryOp::Lt => Ok(ordered(left, right, Ordering::is_lt)),
        BinaryOp::LtEq => Ok(ordered(left, right, Ordering::is_le)),
        BinaryOp::Gt => Ok(ordered(left, right, Ordering::is_gt)),
        BinaryOp::GtEq => Ok(ordered(left, right, Ordering::is_ge)),

        BinaryOp::Eq => Ok(Value::boolean(left == right)),
        BinaryOp::NotEq => Ok(Value::boolean(left != right)),
        BinaryOp::ExactEq => Ok(Value::boolean(left.exact_eq(right))),
        BinaryOp::ExactNotEq => Ok(Value::boolean(!left.exact_eq(right))),

        BinaryOp::Concat => left.concat(right),

        BinaryOp::Match | BinaryOp::AndAlso | BinaryOp::OrElse => Err(EvalError::new(format!(
            "operator `{}` cannot be applied to evaluated operands",
            op.as_symbol()
        ))),
    }
}

fn numeric(
    left: &Value,
    right: &Value,
    op: impl FnOnce(&Number, &Number) -> Result<Number, EvalError>,
) -> EvalResult {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => op(a, b).map(Value::Number),
        _ => Err(not_numbers()),
    }
}

fn boolean(left: &Value, right: &Value, op: impl FnOnce(bool, bool) -> bool) -> EvalResult {
    match (left.as_bool(), right.as_bool()) {
        (Some(a), Some(b)) => Ok(Value::boolean(op(a, b))),
        _ => Err(not_a_boolean()),
    }
}

/// Term-order comparison. Unordered operands (NaN) compare false.
fn ordered(left: &Value, right: &Value, test: fn(Ordering) -> bool) -> Value {
    Value::boolean(left.compare(right).is_some_and(test))
}
