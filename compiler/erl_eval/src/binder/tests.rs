use pretty_assertions::assert_eq;

use super::*;

fn frame() -> Frame {
    Frame::new(Name::intern("test"), Name::intern("f"), 0, false)
}

fn ints(items: &[i64]) -> Value {
    Value::list(items.iter().copied().map(Value::int).collect())
}

fn var(frame: &Frame, name: &str) -> Option<Value> {
    frame.get(Name::intern(name)).cloned()
}

// Variables

#[test]
fn wildcard_matches_without_binding() {
    let mut f = frame();
    assert!(bind(&Expr::var("_"), &Value::int(1), &mut f, false));
    assert!(f.bindings().is_empty());
}

#[test]
fn unbound_variable_binds() {
    let mut f = frame();
    assert!(bind(&Expr::var("X"), &Value::atom("a"), &mut f, false));
    assert_eq!(var(&f, "X"), Some(Value::atom("a")));
}

#[test]
fn bound_variable_must_be_equal() {
    let mut f = frame();
    f.set(Name::intern("X"), Value::int(1));
    assert!(bind(&Expr::var("X"), &Value::float(1.0), &mut f, false));
    assert!(!bind(&Expr::var("X"), &Value::int(2), &mut f, false));
    assert_eq!(var(&f, "X"), Some(Value::int(1)));
}

#[test]
fn repeated_variable_in_pattern_must_agree() {
    let mut f = frame();
    let pattern = Expr::tuple(vec![Expr::var("X"), Expr::var("X")]);
    let same = Value::tuple(vec![Value::int(1), Value::int(1)]);
    let different = Value::tuple(vec![Value::int(1), Value::int(2)]);
    assert!(bind(&pattern, &same, &mut f, false));
    let mut f = frame();
    assert!(!bind(&pattern, &different, &mut f, false));
}

// Literals

#[test]
fn atom_pattern_matches_by_name() {
    let mut f = frame();
    assert!(bind(&Expr::atom("ok"), &Value::atom("ok"), &mut f, false));
    assert!(!bind(&Expr::atom("ok"), &Value::atom("error"), &mut f, false));
    assert!(!bind(&Expr::atom("ok"), &Value::int(1), &mut f, false));
}

#[test]
fn constant_pattern_uses_loose_equality() {
    let mut f = frame();
    assert!(bind(&Expr::int(1), &Value::float(1.0), &mut f, false));
    assert!(!bind(&Expr::int(1), &Value::int(2), &mut f, false));
    assert!(!bind(&Expr::int(1), &Value::atom("1"), &mut f, false));
}

#[test]
fn negated_constant_pattern() {
    let mut f = frame();
    let pattern = Expr::unary(erl_ir::UnaryOp::Neg, Expr::int(3));
    assert!(bind(&pattern, &Value::int(-3), &mut f, false));
    assert!(!bind(&pattern, &Value::int(3), &mut f, false));
}

// Tuples

#[test]
fn tuple_pattern_binds_elements() {
    let mut f = frame();
    let pattern = Expr::tuple(vec![Expr::atom("a"), Expr::var("X")]);
    let value = Value::tuple(vec![Value::atom("a"), Value::int(2)]);
    assert!(bind(&pattern, &value, &mut f, false));
    assert_eq!(var(&f, "X"), Some(Value::int(2)));
}

#[test]
fn tuple_pattern_mismatch_fails() {
    let mut f = frame();
    let pattern = Expr::tuple(vec![Expr::atom("a"), Expr::var("X")]);
    let value = Value::tuple(vec![Value::atom("b"), Value::int(2)]);
    assert!(!bind(&pattern, &value, &mut f, false));
    assert_eq!(var(&f, "X"), None);
}

#[test]
fn tuple_pattern_needs_equal_arity() {
    let mut f = frame();
    let pattern = Expr::tuple(vec![Expr::var("X")]);
    let value = Value::tuple(vec![Value::int(1), Value::int(2)]);
    assert!(!bind(&pattern, &value, &mut f, false));
}

#[test]
fn partial_bindings_stay_without_scope() {
    let mut f = frame();
    let pattern = Expr::tuple(vec![Expr::var("X"), Expr::atom("b")]);
    let value = Value::tuple(vec![Value::int(1), Value::atom("c")]);
    assert!(!bind(&pattern, &value, &mut f, false));
    assert_eq!(var(&f, "X"), Some(Value::int(1)));
}

#[test]
fn scoped_attempt_discards_partial_bindings() {
    let mut f = frame();
    let pattern = Expr::tuple(vec![Expr::var("X"), Expr::atom("b")]);
    let value = Value::tuple(vec![Value::int(1), Value::atom("c")]);
    f.push_scope();
    assert!(!bind(&pattern, &value, &mut f, false));
    f.pop_scope();
    assert_eq!(var(&f, "X"), None);
}

// Lists

#[test]
fn head_tail_pattern_splits_list() {
    let mut f = frame();
    let pattern = Expr::cons(vec![Expr::var("H")], Expr::var("T"));
    assert!(bind(&pattern, &ints(&[1, 2, 3]), &mut f, false));
    assert_eq!(var(&f, "H"), Some(Value::int(1)));
    assert_eq!(var(&f, "T"), Some(ints(&[2, 3])));
}

#[test]
fn head_tail_pattern_rejects_empty_list() {
    let mut f = frame();
    let pattern = Expr::cons(vec![Expr::var("H")], Expr::var("T"));
    assert!(!bind(&pattern, &Value::nil(), &mut f, false));
    assert!(f.bindings().is_empty());
}

#[test]
fn empty_pattern_matches_only_empty_list() {
    let mut f = frame();
    assert!(bind(&Expr::nil(), &Value::nil(), &mut f, false));
    assert!(!bind(&Expr::nil(), &ints(&[1]), &mut f, false));
    assert!(!bind(&Expr::nil(), &Value::tuple(vec![]), &mut f, false));
}

#[test]
fn fixed_pattern_needs_exact_length() {
    let mut f = frame();
    let pattern = Expr::list(vec![Expr::var("A"), Expr::var("B")]);
    assert!(bind(&pattern, &ints(&[1, 2]), &mut f, false));
    let mut f = frame();
    assert!(!bind(&pattern, &ints(&[1, 2, 3]), &mut f, false));
    let mut f = frame();
    assert!(!bind(&pattern, &ints(&[1]), &mut f, false));
}

#[test]
fn fixed_pattern_rejects_improper_list() {
    let mut f = frame();
    let pattern = Expr::list(vec![Expr::var("A")]);
    let value = Value::improper_list(vec![Value::int(1)], Value::int(2));
    assert!(!bind(&pattern, &value, &mut f, false));
}

#[test]
fn tail_pattern_binds_improper_tail() {
    let mut f = frame();
    let pattern = Expr::cons(vec![Expr::var("A"), Expr::var("B")], Expr::var("T"));
    let value = Value::improper_list(vec![Value::int(1), Value::int(2)], Value::int(3));
    assert!(bind(&pattern, &value, &mut f, false));
    assert_eq!(var(&f, "T"), Some(Value::int(3)));
}

#[test]
fn tail_pattern_binds_empty_rest() {
    let mut f = frame();
    let pattern = Expr::cons(vec![Expr::var("H")], Expr::var("T"));
    assert!(bind(&pattern, &ints(&[1]), &mut f, false));
    assert_eq!(var(&f, "T"), Some(Value::nil()));
}

#[test]
fn string_pattern_matches_char_codes() {
    let mut f = frame();
    assert!(bind(&Expr::string("hi"), &Value::string("hi"), &mut f, false));
    assert!(!bind(&Expr::string("hi"), &Value::string("ho"), &mut f, false));
}

// Match binding

#[test]
fn match_pattern_binds_both_sides_in_parameters() {
    let mut f = frame();
    let pattern = Expr::matches(
        Expr::tuple(vec![Expr::atom("ok"), Expr::var("V")]),
        Expr::var("Msg"),
    );
    let value = Value::tuple(vec![Value::atom("ok"), Value::int(5)]);
    assert!(bind(&pattern, &value, &mut f, true));
    assert_eq!(var(&f, "V"), Some(Value::int(5)));
    assert_eq!(var(&f, "Msg"), Some(value));
}

#[test]
fn match_pattern_rejected_outside_parameters() {
    let mut f = frame();
    let pattern = Expr::matches(Expr::var("A"), Expr::var("B"));
    assert!(!bind(&pattern, &Value::int(1), &mut f, false));
}

#[test]
fn match_pattern_requires_variable_on_right() {
    let mut f = frame();
    let pattern = Expr::matches(Expr::var("A"), Expr::atom("b"));
    assert!(!bind(&pattern, &Value::atom("b"), &mut f, true));
}

#[test]
fn non_pattern_expressions_never_match() {
    let mut f = frame();
    let pattern = Expr::call("f", vec![]);
    assert!(!bind(&pattern, &Value::int(1), &mut f, false));
}
