//! Structural pattern binding.
//!
//! Patterns share the expression representation: a variable, atom,
//! constant, tuple or list expression in pattern position describes the
//! shape a value must have. Binding either succeeds, having added the
//! pattern's fresh variables to the frame, or fails.
//!
//! Bindings made before a compound pattern fails are left in the frame.
//! Callers that need all-or-nothing behaviour run the attempt inside a
//! pushed scope and commit or pop it (see [`Frame::push_scope`]).

use erl_ir::{BinaryOp, Expr, ListExpr, Name, UnaryOp};
use erl_value::{List, Value};

use crate::call_stack::Frame;

/// Bind `pattern` against `value`, adding new variables to `frame`.
///
/// `allow_match_binding` is set only where call parameters are bound: it
/// lets a parameter of the form `Pattern = Var` bind the argument to both
/// `Pattern` and `Var`.
pub fn bind(pattern: &Expr, value: &Value, frame: &mut Frame, allow_match_binding: bool) -> bool {
    match pattern {
        Expr::Binary {
            op: BinaryOp::Match,
            left,
            right,
        } if allow_match_binding => {
            matches!(**right, Expr::Variable(_))
                && bind(left, value, frame, false)
                && bind(right, value, frame, false)
        }
        Expr::Variable(name) => bind_variable(*name, value, frame),
        Expr::Atom(atom) => value.as_atom() == Some(*atom),
        Expr::Constant(n) => value.as_number().is_some_and(|v| v.loose_eq(n)),
        // Negative literals arrive as a negated constant.
        Expr::Unary {
            op: UnaryOp::Neg,
            operand,
        } => match (&**operand, value.as_number()) {
            (Expr::Constant(n), Some(v)) => v.loose_eq(&-n),
            _ => false,
        },
        Expr::Tuple(elements) => match value.as_tuple() {
            Some(items) if items.len() == elements.len() => elements
                .iter()
                .zip(items)
                .all(|(element, item)| bind(element, item, frame, false)),
            _ => false,
        },
        Expr::List(list) => bind_list(list, value, frame),
        _ => false,
    }
}

fn bind_variable(name: Name, value: &Value, frame: &mut Frame) -> bool {
    if name.is_wildcard() {
        return true;
    }
    match frame.get(name) {
        Some(current) => current == value,
        None => {
            frame.set(name, value.clone());
            true
        }
    }
}

/// `[P1, ..., Pn | Tail]`: walk the cells in lockstep with the element
/// patterns, then match `Tail` (or `[]` when absent) against what is left.
fn bind_list(pattern: &ListExpr, value: &Value, frame: &mut Frame) -> bool {
    if !matches!(value, Value::List(_)) {
        return false;
    }
    let mut rest = value;
    for element in &pattern.elements {
        let Some(cell) = rest.as_list().and_then(List::cell) else {
            return false;
        };
        if !bind(element, cell.head(), frame, false) {
            return false;
        }
        rest = cell.tail();
    }
    match &pattern.tail {
        Some(tail) => bind(tail, rest, frame, false),
        None => rest.as_list().is_some_and(List::is_empty),
    }
}

#[cfg(test)]
mod tests;
