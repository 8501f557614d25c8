//! Unary operator implementations for the evaluator.
//!
//! Provides direct enum-based dispatch for unary operations. The type set
//! is fixed (not user-extensible), so pattern matching is preferred over
//! trait objects for better performance and exhaustiveness checking.

use erl_ir::UnaryOp;
use erl_value::{not_a_boolean, not_integral, not_numbers, EvalResult, Value};

/// Evaluate a unary operation on an already-evaluated operand.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> EvalResult {
    match (value, op) {
        (Value::Number(n), UnaryOp::Plus) => Ok(Value::Number(n.clone())),
        (Value::Number(n), UnaryOp::Neg) => Ok(Value::Number(-n)),
        (Value::Number(n), UnaryOp::BNot) => Ok(Value::Number(n.bnot()?)),
        (_, UnaryOp::Plus | UnaryOp::Neg) => Err(not_numbers()),
        (_, UnaryOp::BNot) => Err(not_integral()),
        (_, UnaryOp::Not) => match value.as_bool() {
            Some(b) => Ok(Value::boolean(!b)),
            None => Err(not_a_boolean()),
        },
    }
}

#[cfg(test)]
mod tests {
    use erl_value::EvalErrorKind;
    use pretty_assertions::assert_eq;

    use super::*;

    fn kind(result: EvalResult) -> Option<EvalErrorKind> {
        result.err().map(|e| e.kind)
    }

    #[test]
    fn negation_keeps_representation() {
        assert_eq!(evaluate_unary(&Value::int(5), UnaryOp::Neg), Ok(Value::int(-5)));
        let negated = evaluate_unary(&Value::float(2.5), UnaryOp::Neg);
        assert!(negated.is_ok_and(|v| v.exact_eq(&Value::float(-2.5))));
    }

    #[test]
    fn plus_is_identity_on_numbers() {
        assert_eq!(evaluate_unary(&Value::int(3), UnaryOp::Plus), Ok(Value::int(3)));
        assert_eq!(
            kind(evaluate_unary(&Value::atom("a"), UnaryOp::Plus)),
            Some(EvalErrorKind::NotNumbers)
        );
    }

    #[test]
    fn bnot_of_integers() {
        assert_eq!(evaluate_unary(&Value::int(16), UnaryOp::BNot), Ok(Value::int(-17)));
        assert_eq!(evaluate_unary(&Value::int(-17), UnaryOp::BNot), Ok(Value::int(16)));
    }

    #[test]
    fn bnot_rejects_floats_and_non_numbers() {
        assert_eq!(
            kind(evaluate_unary(&Value::float(1.0), UnaryOp::BNot)),
            Some(EvalErrorKind::NotIntegral)
        );
        assert_eq!(
            kind(evaluate_unary(&Value::nil(), UnaryOp::BNot)),
            Some(EvalErrorKind::NotIntegral)
        );
    }

    #[test]
    fn not_requires_boolean() {
        assert_eq!(evaluate_unary(&Value::TRUE, UnaryOp::Not), Ok(Value::FALSE));
        assert_eq!(evaluate_unary(&Value::FALSE, UnaryOp::Not), Ok(Value::TRUE));
        assert_eq!(
            kind(evaluate_unary(&Value::atom("maybe"), UnaryOp::Not)),
            Some(EvalErrorKind::NotABoolean)
        );
    }
}
