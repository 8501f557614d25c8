//! Cons lists.
//!
//! A list is either empty or a cell holding a head value and a tail value.
//! The tail is usually another list; any other value makes the list
//! improper (`[1, 2 | 3]`). Each cell caches the length of the proper list
//! it starts, or `None` when the chain ends in a non-list tail.

use std::fmt;
use std::mem;

use super::{dismantle, nests, Heap, Value};

/// A list value: `[]` or a shared cons cell.
#[derive(Clone)]
pub struct List(pub(super) Option<Heap<Cons>>);

/// One cons cell.
pub struct Cons {
    head: Value,
    tail: Value,
    len: Option<usize>,
}

impl Cons {
    fn new(head: Value, tail: Value) -> Self {
        let len = match &tail {
            Value::List(list) => list.length().map(|n| n + 1),
            _ => None,
        };
        Cons { head, tail, len }
    }

    #[inline]
    pub fn head(&self) -> &Value {
        &self.head
    }

    #[inline]
    pub fn tail(&self) -> &Value {
        &self.tail
    }

    /// Move head and tail out, leaving `[]` in both.
    pub(super) fn take_children(&mut self) -> Vec<Value> {
        vec![
            mem::replace(&mut self.head, Value::nil()),
            mem::replace(&mut self.tail, Value::nil()),
        ]
    }
}

impl List {
    /// `[]`
    pub const NIL: List = List(None);

    /// Prepend `head` to `tail`.
    pub(super) fn cons(head: Value, tail: Value) -> Self {
        List(Some(Heap::new(Cons::new(head, tail))))
    }

    /// Build `[items... | tail]`, back to front.
    pub(super) fn from_items(items: Vec<Value>, tail: Value) -> Value {
        items
            .into_iter()
            .rev()
            .fold(tail, |acc, item| Value::List(List::cons(item, acc)))
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// The first cell, if any.
    #[inline]
    pub fn cell(&self) -> Option<&Cons> {
        self.0.as_deref()
    }

    #[inline]
    pub fn head(&self) -> Option<&Value> {
        self.cell().map(Cons::head)
    }

    #[inline]
    pub fn tail(&self) -> Option<&Value> {
        self.cell().map(Cons::tail)
    }

    /// Number of elements of a proper list; `None` for an improper one.
    #[inline]
    pub fn length(&self) -> Option<usize> {
        match &self.0 {
            None => Some(0),
            Some(cell) => cell.len,
        }
    }

    #[inline]
    pub fn is_proper(&self) -> bool {
        self.length().is_some()
    }

    /// Iterate over the heads of the cons chain.
    pub fn iter(&self) -> Elements<'_> {
        Elements {
            current: self.cell(),
            improper_tail: None,
        }
    }

    /// Copy the cells of this list onto `tail`, replacing the final `[]`.
    ///
    /// Returns `None` when this list is improper and so has no `[]` to replace.
    pub(super) fn append(&self, tail: Value) -> Option<Value> {
        let mut items = Vec::with_capacity(self.length()?);
        items.extend(self.iter().cloned());
        Some(List::from_items(items, tail))
    }
}

// Walks both chains in lockstep so long lists don't recurse per element.
impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        let (mut a, mut b) = (self, other);
        loop {
            match (&a.0, &b.0) {
                (None, None) => return true,
                (Some(x), Some(y)) => {
                    if Heap::ptr_eq(x, y) {
                        return true;
                    }
                    if x.head != y.head {
                        return false;
                    }
                    match (&x.tail, &y.tail) {
                        (Value::List(next_a), Value::List(next_b)) => {
                            a = next_a;
                            b = next_b;
                        }
                        (tail_a, tail_b) => return tail_a == tail_b,
                    }
                }
                _ => return false,
            }
        }
    }
}

/// Iterator over list heads; remembers an improper tail once it is reached.
pub struct Elements<'a> {
    current: Option<&'a Cons>,
    improper_tail: Option<&'a Value>,
}

impl<'a> Elements<'a> {
    /// The non-list value that ended the chain, once iteration has reached it.
    pub fn improper_tail(&self) -> Option<&'a Value> {
        self.improper_tail
    }
}

impl<'a> Iterator for Elements<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<&'a Value> {
        let cell = self.current?;
        self.current = match &cell.tail {
            Value::List(next) => next.cell(),
            other => {
                self.improper_tail = Some(other);
                None
            }
        };
        Some(&cell.head)
    }
}

// Long lists and lists nested through their heads would otherwise drop
// with one native frame per cell.
impl Drop for Cons {
    fn drop(&mut self) {
        if nests(&self.head) || nests(&self.tail) {
            dismantle(self.take_children());
        }
    }
}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut items = self.iter();
        let mut dbg = f.debug_list();
        dbg.entries(items.by_ref());
        if let Some(tail) = items.improper_tail() {
            dbg.entry(&format_args!("| {tail:?}"));
        }
        dbg.finish()
    }
}

#[cfg(test)]
mod tests;
