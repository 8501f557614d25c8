//! Call frames and the per-process call stack.
//!
//! A [`Frame`] is created for every dispatched call and holds the call's
//! variable bindings as a stack of scopes, innermost last. The root frame
//! belongs to the process itself and holds bindings made by free-standing
//! expressions; it is never popped.
//!
//! # Tail positions
//!
//! Every frame records whether its call was made from a tail position.
//! A tail call may replace the nearest frame with the same signature only
//! if every frame above that one was itself entered from a tail position:
//! a frame entered from a non-tail position still has work to do after
//! its callee returns, so the scan in [`CallStack::tail_call_candidate`]
//! stops there.

use std::fmt;

use erl_ir::Name;
use erl_value::{call_depth_exceeded, BacktraceFrame, EvalBacktrace, EvalError, Value};
use rustc_hash::FxHashMap;
use smallvec::{smallvec, SmallVec};

type Scope = FxHashMap<Name, Value>;

/// Bindings and identity of one function call.
pub struct Frame {
    module: Name,
    function: Name,
    arity: usize,
    tail_position: bool,
    scopes: SmallVec<[Scope; 2]>,
}

impl Frame {
    pub fn new(module: Name, function: Name, arity: usize, tail_position: bool) -> Self {
        Frame {
            module,
            function,
            arity,
            tail_position,
            scopes: smallvec![Scope::default()],
        }
    }

    fn root() -> Self {
        Frame::new(Name::EMPTY, Name::EMPTY, 0, false)
    }

    #[inline]
    pub fn module(&self) -> Name {
        self.module
    }

    #[inline]
    pub fn function(&self) -> Name {
        self.function
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[inline]
    pub fn tail_position(&self) -> bool {
        self.tail_position
    }

    /// Whether this frame runs `module:function/arity`.
    #[inline]
    pub fn runs(&self, module: Name, function: Name, arity: usize) -> bool {
        self.module == module && self.function == function && self.arity == arity
    }

    /// Look a variable up, innermost scope first.
    pub fn get(&self, name: Name) -> Option<&Value> {
        self.scopes.iter().rev().find_map(|scope| scope.get(&name))
    }

    /// Bind a variable in the innermost scope.
    pub fn set(&mut self, name: Name, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, value);
        }
    }

    /// Open a scope for a match attempt.
    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Discard the innermost scope and its bindings (failed attempt).
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Close the innermost scope, keeping its bindings (successful attempt).
    pub fn commit_scope(&mut self) {
        if self.scopes.len() < 2 {
            return;
        }
        if let Some(scope) = self.scopes.pop() {
            if let Some(parent) = self.scopes.last_mut() {
                parent.extend(scope);
            }
        }
    }

    #[inline]
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// Remove a binding from every scope. Returns whether it was bound.
    pub fn forget(&mut self, name: Name) -> bool {
        let mut found = false;
        for scope in &mut self.scopes {
            found |= scope.remove(&name).is_some();
        }
        found
    }

    /// Remove every binding and collapse to a single scope.
    pub fn forget_all(&mut self) {
        self.scopes.truncate(1);
        if let Some(scope) = self.scopes.first_mut() {
            scope.clear();
        }
    }

    /// Every visible binding, sorted by name.
    pub fn bindings(&self) -> Vec<(Name, Value)> {
        let mut visible: FxHashMap<Name, &Value> = FxHashMap::default();
        for scope in &self.scopes {
            visible.extend(scope.iter().map(|(name, value)| (*name, value)));
        }
        let mut bindings: Vec<(Name, Value)> = visible
            .into_iter()
            .map(|(name, value)| (name, value.clone()))
            .collect();
        bindings.sort_by(|(a, _), (b, _)| a.cmp_text(*b));
        bindings
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}/{}", self.module, self.function, self.arity)
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("signature", &format_args!("{self}"))
            .field("tail_position", &self.tail_position)
            .field("scopes", &self.scopes.len())
            .finish()
    }
}

/// Live call stack of one process.
///
/// Call frames are indexed from 0 (the outermost call); the root frame sits
/// below them and is not counted by [`depth`](Self::depth).
#[derive(Debug)]
pub struct CallStack {
    root: Frame,
    frames: Vec<Frame>,
    max_depth: Option<usize>,
}

impl CallStack {
    /// `max_depth` is `None` for unlimited.
    pub fn new(max_depth: Option<usize>) -> Self {
        CallStack {
            root: Frame::root(),
            frames: Vec::new(),
            max_depth,
        }
    }

    /// Push a call frame, checking the depth limit.
    ///
    /// The frame is NOT pushed on overflow.
    pub fn push(&mut self, frame: Frame) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.frames.len() >= max {
                return Err(call_depth_exceeded(max));
            }
        }
        self.frames.push(frame);
        Ok(())
    }

    /// Drop every frame at index `depth` and above.
    #[inline]
    pub fn truncate(&mut self, depth: usize) {
        self.frames.truncate(depth);
    }

    /// Number of call frames, excluding the root frame.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// The innermost frame, or the root frame when no call is active.
    #[inline]
    pub fn current(&self) -> &Frame {
        self.frames.last().unwrap_or(&self.root)
    }

    #[inline]
    pub fn current_mut(&mut self) -> &mut Frame {
        match self.frames.last_mut() {
            Some(frame) => frame,
            None => &mut self.root,
        }
    }

    #[inline]
    pub fn root(&self) -> &Frame {
        &self.root
    }

    #[inline]
    pub fn root_mut(&mut self) -> &mut Frame {
        &mut self.root
    }

    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// Index of the frame a tail call to `module:function/arity` may replace.
    ///
    /// Scans from the innermost frame outwards and gives up at the first
    /// frame entered from a non-tail position (after checking that frame
    /// itself).
    pub fn tail_call_candidate(&self, module: Name, function: Name, arity: usize) -> Option<usize> {
        for (index, frame) in self.frames.iter().enumerate().rev() {
            if frame.runs(module, function, arity) {
                return Some(index);
            }
            if !frame.tail_position {
                return None;
            }
        }
        None
    }

    /// Snapshot of the live frames, innermost first.
    pub fn capture(&self) -> EvalBacktrace {
        let frames = self
            .frames
            .iter()
            .rev()
            .map(|frame| BacktraceFrame {
                name: frame.to_string(),
            })
            .collect();
        EvalBacktrace::new(frames)
    }

    /// Attach a backtrace of the live frames to `err`, unless it already has one.
    pub fn attach_backtrace(&self, err: EvalError) -> EvalError {
        if self.frames.is_empty() || err.backtrace.is_some() {
            return err;
        }
        err.with_backtrace(self.capture())
    }
}

impl Default for CallStack {
    /// Creates an unlimited call stack.
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests;
