use std::cmp::Ordering;

use pretty_assertions::assert_eq;

use super::*;

fn ints(range: std::ops::RangeInclusive<i64>) -> Vec<Value> {
    range.map(Value::int).collect()
}

#[test]
fn nil_has_zero_length() {
    assert!(List::NIL.is_empty());
    assert_eq!(List::NIL.length(), Some(0));
    assert!(List::NIL.head().is_none());
}

#[test]
fn proper_list_caches_length() {
    let list = Value::list(ints(1..=3));
    let cells = list.as_list().map(List::length);
    assert_eq!(cells, Some(Some(3)));
}

#[test]
fn improper_list_has_no_length() {
    let list = Value::improper_list(ints(1..=2), Value::int(3));
    let list = list.as_list().cloned().unwrap_or(List::NIL);
    assert_eq!(list.length(), None);
    assert!(!list.is_proper());
}

#[test]
fn iter_reports_improper_tail() {
    let value = Value::improper_list(ints(1..=2), Value::atom("end"));
    let Value::List(list) = &value else {
        panic!("expected a list");
    };
    let mut items = list.iter();
    let heads: Vec<Value> = items.by_ref().cloned().collect();
    assert_eq!(heads, ints(1..=2));
    assert_eq!(items.improper_tail(), Some(&Value::atom("end")));
}

#[test]
fn iter_of_proper_list_has_no_improper_tail() {
    let value = Value::list(ints(1..=2));
    let Value::List(list) = &value else {
        panic!("expected a list");
    };
    let mut items = list.iter();
    assert_eq!(items.by_ref().count(), 2);
    assert_eq!(items.improper_tail(), None);
}

#[test]
fn head_and_tail() {
    let value = Value::list(ints(1..=3));
    let list = value.as_list().cloned().unwrap_or(List::NIL);
    assert_eq!(list.head(), Some(&Value::int(1)));
    assert_eq!(list.tail(), Some(&Value::list(ints(2..=3))));
}

#[test]
fn shared_tail_is_equal_by_pointer() {
    let tail = Value::list(ints(2..=1000));
    let a = Value::cons(Value::int(1), tail.clone());
    let b = Value::cons(Value::int(1), tail);
    assert_eq!(a, b);
}

#[test]
fn proper_prefix_sorts_first() {
    let short = Value::list(ints(1..=2));
    let long = Value::list(ints(1..=3));
    assert_eq!(short.compare(&long), Some(Ordering::Less));
    assert_eq!(long.compare(&short), Some(Ordering::Greater));
}

#[test]
fn improper_tail_compares_by_term_order() {
    // A number tail sorts before the [] that ends a proper list.
    let improper = Value::improper_list(ints(1..=1), Value::int(2));
    let proper = Value::list(ints(1..=1));
    assert_eq!(improper.compare(&proper), Some(Ordering::Less));
}

#[test]
fn dropping_a_long_list_does_not_overflow() {
    let list = Value::list((0..1_000_000).map(Value::int).collect());
    assert_eq!(list.length(), Some(1_000_000));
    drop(list);
}

#[test]
fn debug_shows_improper_tail() {
    let value = Value::improper_list(ints(1..=1), Value::atom("x"));
    let Value::List(list) = &value else {
        panic!("expected a list");
    };
    let debug = format!("{list:?}");
    assert!(debug.contains("| Atom(Name("), "{debug}");
    assert!(debug.contains("\"x\""), "{debug}");
}
