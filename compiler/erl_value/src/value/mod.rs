//! Runtime values.
//!
//! Every heap payload (tuple elements, list cells, error messages) is held
//! in a [`Heap<T>`], which only this module can allocate. Values are
//! immutable after construction, so cloning one is a reference-count bump
//! and a value can be shared freely between processes.
//!
//! # Equality
//!
//! `PartialEq` is the loose `==` of the language: numbers compare by value
//! across representations (`1 == 1.0`), everything else structurally.
//! [`Value::exact_eq`] is `=:=`, which additionally requires top-level
//! numbers to share a representation.
//!
//! # Ordering
//!
//! Values of different kinds order by [`ValueKind`]; values of the same
//! kind order by content. See [`Value::compare`].
//!
//! # Depth
//!
//! A tail-recursive program can build values nested far deeper than the
//! native stack. Equality, ordering and teardown walk nested tuples and
//! lists with an explicit worklist; formatting grows the stack on demand.

mod heap;
mod list;
mod tuple;

use std::cmp::Ordering;
use std::fmt;

use erl_ir::{BigInt, Name, Number};
use erl_stack::ensure_sufficient_stack;

use crate::errors::{cannot_concat, not_a_list, EvalResult};

pub use heap::Heap;
pub use list::{Cons, Elements, List};
pub use tuple::Tuple;

/// A runtime value.
#[derive(Clone)]
pub enum Value {
    /// An error travelling as a value, carrying its message.
    Error(Heap<str>),
    Number(Number),
    Atom(Name),
    Reference(u64),
    Fun(u64),
    Port(u64),
    Pid(u64),
    Tuple(Heap<Tuple>),
    List(List),
    BitString(Heap<[u8]>),
}

/// The kind of a value, in term order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueKind {
    Error,
    Number,
    Atom,
    Reference,
    Fun,
    Port,
    Pid,
    Tuple,
    List,
    BitString,
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Error => "error",
            ValueKind::Number => "number",
            ValueKind::Atom => "atom",
            ValueKind::Reference => "reference",
            ValueKind::Fun => "fun",
            ValueKind::Port => "port",
            ValueKind::Pid => "pid",
            ValueKind::Tuple => "tuple",
            ValueKind::List => "list",
            ValueKind::BitString => "bitstring",
        }
    }
}

impl Value {
    /// The atom `true`.
    pub const TRUE: Value = Value::Atom(Name::TRUE);
    /// The atom `false`.
    pub const FALSE: Value = Value::Atom(Name::FALSE);

    // Factories

    #[inline]
    pub fn int(n: impl Into<BigInt>) -> Self {
        Value::Number(Number::int(n))
    }

    #[inline]
    pub fn float(f: f64) -> Self {
        Value::Number(Number::Float(f))
    }

    #[inline]
    pub fn number(n: impl Into<Number>) -> Self {
        Value::Number(n.into())
    }

    #[inline]
    pub fn atom(name: &str) -> Self {
        Value::Atom(Name::intern(name))
    }

    #[inline]
    pub fn boolean(b: bool) -> Self {
        if b {
            Value::TRUE
        } else {
            Value::FALSE
        }
    }

    pub fn error(message: &str) -> Self {
        Value::Error(Heap::from_text(message))
    }

    pub fn tuple(items: Vec<Value>) -> Self {
        Value::Tuple(Heap::new(Tuple::new(items)))
    }

    /// `[]`
    #[inline]
    pub const fn nil() -> Self {
        Value::List(List::NIL)
    }

    /// `[head | tail]`
    pub fn cons(head: Value, tail: Value) -> Self {
        Value::List(List::cons(head, tail))
    }

    /// A proper list of `items`.
    pub fn list(items: Vec<Value>) -> Self {
        List::from_items(items, Value::nil())
    }

    /// `[items... | tail]`; improper unless `tail` is a list.
    pub fn improper_list(items: Vec<Value>, tail: Value) -> Self {
        List::from_items(items, tail)
    }

    /// A string as a list of character codes.
    pub fn string(text: &str) -> Self {
        Value::list(text.chars().map(|c| Value::int(u32::from(c))).collect())
    }

    pub fn bitstring(bytes: Vec<u8>) -> Self {
        Value::BitString(Heap::from_vec(bytes))
    }

    // Accessors

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Error(_) => ValueKind::Error,
            Value::Number(_) => ValueKind::Number,
            Value::Atom(_) => ValueKind::Atom,
            Value::Reference(_) => ValueKind::Reference,
            Value::Fun(_) => ValueKind::Fun,
            Value::Port(_) => ValueKind::Port,
            Value::Pid(_) => ValueKind::Pid,
            Value::Tuple(_) => ValueKind::Tuple,
            Value::List(_) => ValueKind::List,
            Value::BitString(_) => ValueKind::BitString,
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// The message of an error value.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Value::Error(message) => Some(&**message),
            _ => None,
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    #[inline]
    pub fn as_atom(&self) -> Option<Name> {
        match self {
            Value::Atom(name) => Some(*name),
            _ => None,
        }
    }

    /// `Some` only for the atoms `true` and `false`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Atom(Name::TRUE) => Some(true),
            Value::Atom(Name::FALSE) => Some(false),
            _ => None,
        }
    }

    #[inline]
    pub fn is_true(&self) -> bool {
        matches!(self, Value::Atom(Name::TRUE))
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Value::Tuple(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// Element count of a proper list; `None` for improper lists and non-lists.
    pub fn length(&self) -> Option<usize> {
        self.as_list().and_then(List::length)
    }

    // Operations

    /// `=:=`: like `==`, but top-level numbers must also share a representation.
    pub fn exact_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.exact_eq(b),
            _ => self == other,
        }
    }

    /// Term order. `None` only when a float comparison involves NaN.
    ///
    /// Tuples compare by size, then element-wise; lists element-wise, with
    /// a proper prefix first and improper tails compared as values.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            let ordering = match (a, b) {
                (Value::Tuple(x), Value::Tuple(y)) => match x.len().cmp(&y.len()) {
                    Ordering::Equal => {
                        pending.extend(x.iter().zip(y.iter()).rev());
                        continue;
                    }
                    unequal => unequal,
                },
                (Value::List(x), Value::List(y)) => match (x.cell(), y.cell()) {
                    (None, None) => continue,
                    (None, Some(_)) => Ordering::Less,
                    (Some(_), None) => Ordering::Greater,
                    (Some(c), Some(d)) => {
                        pending.push((c.tail(), d.tail()));
                        pending.push((c.head(), d.head()));
                        continue;
                    }
                },
                _ => a.compare_flat(b)?,
            };
            if ordering != Ordering::Equal {
                return Some(ordering);
            }
        }
        Some(Ordering::Equal)
    }

    /// Order of two values that are not both tuples or both lists.
    fn compare_flat(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Error(a), Value::Error(b)) => Some((**a).cmp(&**b)),
            (Value::Number(a), Value::Number(b)) => a.compare(b),
            (Value::Atom(a), Value::Atom(b)) => Some(a.cmp_text(*b)),
            (Value::Reference(a), Value::Reference(b))
            | (Value::Fun(a), Value::Fun(b))
            | (Value::Port(a), Value::Port(b))
            | (Value::Pid(a), Value::Pid(b)) => Some(a.cmp(b)),
            (Value::BitString(a), Value::BitString(b)) => Some((**a).cmp(&**b)),
            _ => Some(self.kind().cmp(&other.kind())),
        }
    }

    /// `++`: copy the left list onto `right`.
    ///
    /// `[] ++ X` is `X`. A left operand that is not a list fails with
    /// "not a list"; one that ends in a non-list tail fails with "can't concat".
    pub fn concat(&self, right: &Value) -> EvalResult {
        let Value::List(left) = self else {
            return Err(not_a_list());
        };
        left.append(right.clone()).ok_or_else(cannot_concat)
    }
}

impl Value {
    /// `==` on two values that are not both tuples or both lists.
    fn eq_flat(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a.loose_eq(b),
            (Value::Atom(a), Value::Atom(b)) => a == b,
            (Value::Reference(a), Value::Reference(b))
            | (Value::Fun(a), Value::Fun(b))
            | (Value::Port(a), Value::Port(b))
            | (Value::Pid(a), Value::Pid(b)) => a == b,
            (Value::BitString(a), Value::BitString(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            match (a, b) {
                (Value::Tuple(x), Value::Tuple(y)) => {
                    if Heap::ptr_eq(x, y) {
                        continue;
                    }
                    if x.len() != y.len() {
                        return false;
                    }
                    pending.extend(x.iter().zip(y.iter()));
                }
                (Value::List(x), Value::List(y)) => match (x.cell(), y.cell()) {
                    (None, None) => {}
                    (Some(c), Some(d)) if std::ptr::eq(c, d) => {}
                    (Some(c), Some(d)) => {
                        pending.push((c.tail(), d.tail()));
                        pending.push((c.head(), d.head()));
                    }
                    _ => return false,
                },
                _ => {
                    if !a.eq_flat(b) {
                        return false;
                    }
                }
            }
        }
        true
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(b: bool) -> Self {
        Value::boolean(b)
    }
}

impl From<Number> for Value {
    #[inline]
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Name> for Value {
    #[inline]
    fn from(name: Name) -> Self {
        Value::Atom(name)
    }
}

impl From<i64> for Value {
    #[inline]
    fn from(n: i64) -> Self {
        Value::int(n)
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(f: f64) -> Self {
        Value::float(f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.fmt_display(f))
    }
}

impl Value {
    fn fmt_display(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Error(message) => write!(f, "Error: {}", &**message),
            Value::Number(n) => write!(f, "{n}"),
            Value::Atom(name) => write!(f, "{name}"),
            Value::Reference(id) => write!(f, "#Ref<{id}>"),
            Value::Fun(id) => write!(f, "#Fun<{id}>"),
            Value::Port(id) => write!(f, "#Port<{id}>"),
            Value::Pid(id) => write!(f, "#Pid<{id}>"),
            Value::Tuple(items) => {
                f.write_str("{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("}")
            }
            Value::List(list) => fmt_list(list, f),
            Value::BitString(bytes) => {
                f.write_str("<<")?;
                for (i, byte) in bytes.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{byte}")?;
                }
                f.write_str(">>")
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Value::Error(message) => f.debug_tuple("Error").field(&&**message).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::Atom(name) => f.debug_tuple("Atom").field(name).finish(),
            Value::Reference(id) => f.debug_tuple("Reference").field(id).finish(),
            Value::Fun(id) => f.debug_tuple("Fun").field(id).finish(),
            Value::Port(id) => f.debug_tuple("Port").field(id).finish(),
            Value::Pid(id) => f.debug_tuple("Pid").field(id).finish(),
            Value::Tuple(items) => f.debug_tuple("Tuple").field(&items.as_slice()).finish(),
            Value::List(list) => f.debug_tuple("List").field(list).finish(),
            Value::BitString(bytes) => f.debug_tuple("BitString").field(&&**bytes).finish(),
        })
    }
}

/// Whether dropping `value` may release nested tuples or list cells.
fn nests(value: &Value) -> bool {
    matches!(value, Value::Tuple(_) | Value::List(List(Some(_))))
}

/// Drop `pending` and everything it uniquely owns without recursing:
/// each uniquely owned tuple or cell is emptied onto the worklist before
/// its shell is dropped.
fn dismantle(mut pending: Vec<Value>) {
    while let Some(value) = pending.pop() {
        match value {
            Value::Tuple(tuple) => {
                if let Ok(mut owned) = Heap::try_unwrap(tuple) {
                    pending.extend(owned.take_elements());
                }
            }
            Value::List(List(Some(cell))) => {
                if let Ok(mut owned) = Heap::try_unwrap(cell) {
                    pending.extend(owned.take_children());
                }
            }
            _ => {}
        }
    }
}

/// The printable character of a list element, if it is one.
fn printable_char(value: &Value) -> Option<char> {
    let code = value.as_number()?.to_i64()?;
    if (32..=127).contains(&code) {
        u32::try_from(code).ok().and_then(char::from_u32)
    } else {
        None
    }
}

fn fmt_list(list: &List, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if !list.is_empty() && list.is_proper() && list.iter().all(|v| printable_char(v).is_some()) {
        f.write_str("\"")?;
        for c in list.iter().filter_map(printable_char) {
            write!(f, "{c}")?;
        }
        return f.write_str("\"");
    }

    f.write_str("[")?;
    let mut items = list.iter();
    for (i, item) in items.by_ref().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    if let Some(tail) = items.improper_tail() {
        write!(f, "|{tail}")?;
    }
    f.write_str("]")
}
