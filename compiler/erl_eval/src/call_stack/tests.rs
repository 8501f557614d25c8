use erl_value::EvalErrorKind;
use pretty_assertions::assert_eq;

use super::*;

fn name(text: &str) -> Name {
    Name::intern(text)
}

fn frame(function: &str, tail_position: bool) -> Frame {
    Frame::new(name("m"), name(function), 1, tail_position)
}

// Frame scopes

#[test]
fn lookup_scans_innermost_first() {
    let mut f = frame("f", false);
    f.set(name("X"), Value::int(1));
    f.push_scope();
    f.set(name("Y"), Value::int(2));
    assert_eq!(f.get(name("X")), Some(&Value::int(1)));
    assert_eq!(f.get(name("Y")), Some(&Value::int(2)));
    assert_eq!(f.get(name("Z")), None);
}

#[test]
fn popped_scope_discards_bindings() {
    let mut f = frame("f", false);
    f.push_scope();
    f.set(name("X"), Value::int(1));
    f.pop_scope();
    assert_eq!(f.get(name("X")), None);
    assert_eq!(f.scope_depth(), 1);
}

#[test]
fn committed_scope_keeps_bindings() {
    let mut f = frame("f", false);
    f.push_scope();
    f.set(name("X"), Value::int(1));
    f.commit_scope();
    assert_eq!(f.get(name("X")), Some(&Value::int(1)));
    assert_eq!(f.scope_depth(), 1);
}

#[test]
fn outermost_scope_is_never_popped() {
    let mut f = frame("f", false);
    f.set(name("X"), Value::int(1));
    f.pop_scope();
    f.commit_scope();
    assert_eq!(f.get(name("X")), Some(&Value::int(1)));
}

#[test]
fn forget_removes_from_all_scopes() {
    let mut f = frame("f", false);
    f.set(name("X"), Value::int(1));
    f.push_scope();
    f.set(name("X"), Value::int(2));
    assert!(f.forget(name("X")));
    assert_eq!(f.get(name("X")), None);
    assert!(!f.forget(name("X")));
}

#[test]
fn forget_all_clears_everything() {
    let mut f = frame("f", false);
    f.set(name("A"), Value::int(1));
    f.push_scope();
    f.set(name("B"), Value::int(2));
    f.forget_all();
    assert!(f.bindings().is_empty());
    assert_eq!(f.scope_depth(), 1);
}

#[test]
fn bindings_are_sorted_and_shadowed() {
    let mut f = frame("f", false);
    f.set(name("B"), Value::int(1));
    f.set(name("A"), Value::int(2));
    let names: Vec<&str> = f.bindings().iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[test]
fn frame_displays_signature() {
    assert_eq!(frame("go", false).to_string(), "m:go/1");
}

// CallStack

#[test]
fn empty_stack_exposes_root_frame() {
    let mut stack = CallStack::default();
    assert_eq!(stack.depth(), 0);
    stack.current_mut().set(name("X"), Value::int(1));
    assert_eq!(stack.root().get(name("X")), Some(&Value::int(1)));
}

#[test]
fn push_respects_depth_limit() {
    let mut stack = CallStack::new(Some(2));
    assert!(stack.push(frame("a", false)).is_ok());
    assert!(stack.push(frame("b", false)).is_ok());
    let err = stack.push(frame("c", false)).err().map(|e| e.kind);
    assert_eq!(err, Some(EvalErrorKind::StackOverflow { depth: 2 }));
    assert_eq!(stack.depth(), 2);
}

#[test]
fn truncate_restores_depth() {
    let mut stack = CallStack::default();
    for f in ["a", "b", "c"] {
        assert!(stack.push(frame(f, false)).is_ok());
    }
    stack.truncate(1);
    assert_eq!(stack.depth(), 1);
    assert_eq!(stack.current().function(), name("a"));
}

#[test]
fn tail_candidate_found_through_tail_frames() {
    let mut stack = CallStack::default();
    assert!(stack.push(frame("f", false)).is_ok());
    assert!(stack.push(frame("g", true)).is_ok());
    assert!(stack.push(frame("h", true)).is_ok());
    assert_eq!(stack.tail_call_candidate(name("m"), name("f"), 1), Some(0));
}

#[test]
fn tail_candidate_blocked_by_non_tail_frame() {
    let mut stack = CallStack::default();
    assert!(stack.push(frame("f", false)).is_ok());
    assert!(stack.push(frame("g", false)).is_ok());
    assert_eq!(stack.tail_call_candidate(name("m"), name("f"), 1), None);
    assert_eq!(stack.tail_call_candidate(name("m"), name("g"), 1), Some(1));
}

#[test]
fn tail_candidate_needs_matching_arity() {
    let mut stack = CallStack::default();
    assert!(stack.push(frame("f", true)).is_ok());
    assert_eq!(stack.tail_call_candidate(name("m"), name("f"), 2), None);
}

#[test]
fn backtrace_is_innermost_first() {
    let mut stack = CallStack::default();
    assert!(stack.push(frame("outer", false)).is_ok());
    assert!(stack.push(frame("inner", false)).is_ok());
    let names: Vec<String> = stack
        .capture()
        .frames()
        .iter()
        .map(|f| f.name.clone())
        .collect();
    assert_eq!(names, vec!["m:inner/1", "m:outer/1"]);
}

#[test]
fn attach_backtrace_keeps_first_capture() {
    let mut stack = CallStack::default();
    assert!(stack.push(frame("inner", false)).is_ok());
    let err = stack.attach_backtrace(erl_value::bad_match());
    stack.truncate(0);
    assert!(stack.push(frame("other", false)).is_ok());
    let err = stack.attach_backtrace(err);
    let first = err
        .backtrace
        .as_ref()
        .and_then(|b| b.frames().first())
        .map(|f| f.name.clone());
    assert_eq!(first.as_deref(), Some("m:inner/1"));
}
