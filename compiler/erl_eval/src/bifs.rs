//! The `erlang` module: builtins reachable from every process.
//!
//! Type tests answer `true`/`false` for any argument; the accessors fail
//! with "bad argument" outside their domain.

use std::cmp::Ordering;

use chrono::{Datelike, Local, Timelike};
use erl_ir::Number;
use erl_value::{
    bad_argument, expected_atom, not_a_list, not_a_proper_list, not_implemented, EvalResult,
    List, Value, ValueKind,
};

use crate::module::{NativeModule, NativeModuleBuilder};
use crate::process::Process;

pub(crate) fn erlang_module() -> NativeModule {
    NativeModuleBuilder::new("erlang")
        .function("date", date)
        .function("time", time)
        .function("is_list", is_list)
        .function("is_number", is_number)
        .function("is_float", is_float)
        .function("is_integer", is_integer)
        .function("is_atom", is_atom)
        .function("is_tuple", is_tuple)
        .function("is_function", is_function)
        .function("is_function", is_function_with_arity)
        .function("is_reference", is_reference)
        .function("is_bitstring", is_bitstring)
        .function("is_port", is_port)
        .function("is_pid", is_pid)
        .function("length", length)
        .function("get_module_info", get_module_info)
        .function("abs", abs)
        .function("hd", hd)
        .function("tl", tl)
        .function("tuple_size", tuple_size)
        .function("element", element)
        .function("atom_to_list", atom_to_list)
        .build()
}

/// `{Year, Month, Day}` in local time.
fn date(_: &mut Process) -> EvalResult {
    let today = Local::now().date_naive();
    Ok(Value::tuple(vec![
        Value::int(today.year()),
        Value::int(today.month()),
        Value::int(today.day()),
    ]))
}

/// `{Hour, Minute, Second}` in local time.
fn time(_: &mut Process) -> EvalResult {
    let now = Local::now().time();
    Ok(Value::tuple(vec![
        Value::int(now.hour()),
        Value::int(now.minute()),
        Value::int(now.second()),
    ]))
}

fn is_kind(value: &Value, kind: ValueKind) -> EvalResult {
    Ok(Value::boolean(value.kind() == kind))
}

fn is_list(_: &mut Process, value: &Value) -> EvalResult {
    is_kind(value, ValueKind::List)
}

fn is_number(_: &mut Process, value: &Value) -> EvalResult {
    is_kind(value, ValueKind::Number)
}

fn is_float(_: &mut Process, value: &Value) -> EvalResult {
    Ok(Value::boolean(
        value.as_number().is_some_and(|n| !n.is_integral()),
    ))
}

fn is_integer(_: &mut Process, value: &Value) -> EvalResult {
    Ok(Value::boolean(value.as_number().is_some_and(Number::is_integral)))
}

fn is_atom(_: &mut Process, value: &Value) -> EvalResult {
    is_kind(value, ValueKind::Atom)
}

fn is_tuple(_: &mut Process, value: &Value) -> EvalResult {
    is_kind(value, ValueKind::Tuple)
}

fn is_function(_: &mut Process, value: &Value) -> EvalResult {
    is_kind(value, ValueKind::Fun)
}

// Funs are opaque, so there is no arity to compare against yet.
fn is_function_with_arity(_: &mut Process, _: &Value, _: &Value) -> EvalResult {
    Err(not_implemented("is_function/2"))
}

fn is_reference(_: &mut Process, value: &Value) -> EvalResult {
    is_kind(value, ValueKind::Reference)
}

fn is_bitstring(_: &mut Process, value: &Value) -> EvalResult {
    is_kind(value, ValueKind::BitString)
}

fn is_port(_: &mut Process, value: &Value) -> EvalResult {
    is_kind(value, ValueKind::Port)
}

fn is_pid(_: &mut Process, value: &Value) -> EvalResult {
    is_kind(value, ValueKind::Pid)
}

fn length(_: &mut Process, value: &Value) -> EvalResult {
    let list = value.as_list().ok_or_else(not_a_list)?;
    list.length().map(Value::int).ok_or_else(not_a_proper_list)
}

/// `module_info/0` of the named module.
fn get_module_info(process: &mut Process, module: &Value) -> EvalResult {
    let name = module.as_atom().ok_or_else(expected_atom)?;
    process.try_evaluate(Some(name.as_str()), "module_info", Vec::new())
}

fn abs(_: &mut Process, value: &Value) -> EvalResult {
    let n = value.as_number().ok_or_else(|| bad_argument("abs", 1))?;
    let negative = n.compare(&Number::from(0)) == Some(Ordering::Less);
    Ok(Value::Number(if negative { -n } else { n.clone() }))
}

fn hd(_: &mut Process, value: &Value) -> EvalResult {
    value
        .as_list()
        .and_then(List::head)
        .cloned()
        .ok_or_else(|| bad_argument("hd", 1))
}

fn tl(_: &mut Process, value: &Value) -> EvalResult {
    value
        .as_list()
        .and_then(List::tail)
        .cloned()
        .ok_or_else(|| bad_argument("tl", 1))
}

fn tuple_size(_: &mut Process, value: &Value) -> EvalResult {
    value
        .as_tuple()
        .map(|items| Value::int(items.len()))
        .ok_or_else(|| bad_argument("tuple_size", 1))
}

/// `element(N, Tuple)`, 1-based.
fn element(_: &mut Process, index: &Value, tuple: &Value) -> EvalResult {
    let items = tuple.as_tuple();
    let index = index.as_number().and_then(Number::to_usize);
    match (index, items) {
        (Some(n), Some(items)) if n >= 1 => items
            .get(n - 1)
            .cloned()
            .ok_or_else(|| bad_argument("element", 2)),
        _ => Err(bad_argument("element", 2)),
    }
}

fn atom_to_list(_: &mut Process, value: &Value) -> EvalResult {
    let name = value
        .as_atom()
        .ok_or_else(|| bad_argument("atom_to_list", 1))?;
    Ok(Value::string(name.as_str()))
}
