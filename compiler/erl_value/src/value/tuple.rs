//! Tuple payloads.

use std::mem;
use std::ops::Deref;

use super::{dismantle, nests, Value};

/// The elements of a tuple value.
pub struct Tuple(Box<[Value]>);

impl Tuple {
    pub(super) fn new(items: Vec<Value>) -> Self {
        Tuple(items.into_boxed_slice())
    }

    #[inline]
    pub fn as_slice(&self) -> &[Value] {
        &self.0
    }

    /// Move the elements out, leaving the tuple empty.
    pub(super) fn take_elements(&mut self) -> Vec<Value> {
        mem::take(&mut self.0).into_vec()
    }
}

impl Deref for Tuple {
    type Target = [Value];

    #[inline]
    fn deref(&self) -> &[Value] {
        &self.0
    }
}

// Nested tuples would otherwise drop with one native frame per level.
impl Drop for Tuple {
    fn drop(&mut self) {
        if self.0.iter().any(nests) {
            dismantle(self.take_elements());
        }
    }
}
