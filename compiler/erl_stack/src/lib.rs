//! Native stack guard for the tree-walking evaluator.
//!
//! Tail calls never grow the native stack, but ordinary recursion such as
//! `len([_|T]) -> 1 + len(T)` does: every nested call re-enters the
//! evaluator. Wrapping each re-entry in [`ensure_sufficient_stack`] moves the
//! work onto a freshly allocated segment whenever the remaining stack drops
//! below [`RED_ZONE`], so deep user recursion is limited by memory instead of
//! the thread's initial stack size.
//!
//! WASM has no `stacker` support; there the closure runs directly and callers
//! are expected to configure a call depth limit instead.

/// Stack space that must remain before entering another evaluation level.
pub const RED_ZONE: usize = 128 * 1024;

/// Size of each additional stack segment.
pub const STACK_PER_RECURSION: usize = 2 * 1024 * 1024;

/// Run `f`, growing the native stack first if less than [`RED_ZONE`] bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version: call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
