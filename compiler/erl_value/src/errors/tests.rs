use pretty_assertions::assert_eq;

use super::*;

// Kind → message

#[test]
fn type_errors_have_expected_messages() {
    assert_eq!(not_numbers().message, "not numbers");
    assert_eq!(not_integers().message, "not integers");
    assert_eq!(not_integral().message, "not integral");
    assert_eq!(not_a_boolean().message, "not a boolean");
    assert_eq!(not_a_list().message, "not a list");
    assert_eq!(not_a_proper_list().message, "not a proper list");
    assert_eq!(cannot_concat().message, "can't concat");
    assert_eq!(expected_atom().message, "must be called with atom");
}

#[test]
fn undefined_variable_has_correct_kind() {
    let err = undefined_variable("X");
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "X".to_string()
        }
    );
    assert_eq!(err.message, "No such variable X");
}

#[test]
fn unresolved_function_names_target() {
    let err = unresolved_function("foo", 2);
    assert_eq!(err.message, "no matching function 'foo/2'");
}

#[test]
fn module_level_lookup_messages() {
    assert_eq!(no_matching_function().message, "no matching function found");
    assert_eq!(
        no_matching_module("lists").message,
        "no matching module found: lists"
    );
    assert_eq!(no_matching_tuple_item().message, "no matching tuple item");
    assert_eq!(invalid_module_info_call().message, "no matching function");
}

#[test]
fn structural_mismatch_messages() {
    assert_eq!(bad_match().message, "bad match");
    assert_eq!(bad_match_on_case().message, "bad match on case");
    assert_eq!(
        no_such_tail_call_function().message,
        "no_such_tailcall_function"
    );
}

#[test]
fn not_implemented_message() {
    let err = not_implemented("is_function/2");
    assert_eq!(err.message, "is_function/2 nyi");
}

#[test]
fn resource_limit_kinds() {
    assert_eq!(
        call_depth_exceeded(512).kind,
        EvalErrorKind::StackOverflow { depth: 512 }
    );
    assert_eq!(
        budget_exceeded(10).message,
        "evaluation budget of 10 calls exceeded"
    );
    assert_eq!(cancelled().kind, EvalErrorKind::Cancelled);
}

#[test]
fn bad_argument_names_builtin() {
    assert_eq!(bad_argument("hd", 1).message, "bad argument in hd/1");
}

#[test]
fn custom_error_keeps_message() {
    let err = EvalError::new("host failure");
    assert_eq!(
        err.kind,
        EvalErrorKind::Custom {
            message: "host failure".to_string()
        }
    );
    assert_eq!(err.to_string(), "host failure");
}

// Conversions

#[test]
fn numeric_errors_convert() {
    let err: EvalError = NumericError::DivisionByZero.into();
    assert_eq!(err.kind, EvalErrorKind::DivisionByZero);
    let err: EvalError = NumericError::NotIntegral.into();
    assert_eq!(err.kind, EvalErrorKind::NotIntegral);
    let err: EvalError = NumericError::NotIntegers.into();
    assert_eq!(err.kind, EvalErrorKind::NotIntegers);
}

#[test]
fn error_converts_to_error_value() {
    let value = bad_match().to_value();
    assert_eq!(value, Value::error("bad match"));
}

// Backtrace

#[test]
fn backtrace_display_lists_frames() {
    let trace = EvalBacktrace::new(vec![
        BacktraceFrame {
            name: "m:inner/1".to_string(),
        },
        BacktraceFrame {
            name: "m:outer/0".to_string(),
        },
    ]);
    assert_eq!(trace.len(), 2);
    assert_eq!(
        trace.to_string(),
        "stack backtrace:\n  0: m:inner/1\n  1: m:outer/0\n"
    );
}

#[test]
fn empty_backtrace_displays_nothing() {
    assert!(EvalBacktrace::default().is_empty());
    assert_eq!(EvalBacktrace::default().to_string(), "");
}

#[test]
fn with_backtrace_attaches() {
    let err = bad_match().with_backtrace(EvalBacktrace::new(vec![BacktraceFrame {
        name: "m:f/0".to_string(),
    }]));
    assert_eq!(err.backtrace.map(|b| b.len()), Some(1));
}
