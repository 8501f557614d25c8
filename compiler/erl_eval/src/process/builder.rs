//! `ProcessBuilder` for creating `Process` instances with various configurations.

use std::sync::Arc;

use erl_ir::Name;

use super::{CancelToken, Process};
use crate::bifs;
use crate::call_stack::CallStack;
use crate::eval_mode::{EvalMode, ModeState};
use crate::registry::SharedModuleRegistry;

/// Builder for creating `Process` instances.
///
/// The defaults give an unbounded `Interpret` process with tail calls
/// enabled, a private module registry holding the `erlang` builtins, and
/// `erlang` as the only default module for unqualified calls.
#[must_use]
pub struct ProcessBuilder {
    mode: EvalMode,
    registry: Option<SharedModuleRegistry>,
    default_modules: Vec<Name>,
    tail_calls: bool,
    max_call_depth: Option<usize>,
    cancellation: Option<CancelToken>,
    profile: bool,
    with_builtins: bool,
}

impl Default for ProcessBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessBuilder {
    pub fn new() -> Self {
        Self {
            mode: EvalMode::default(),
            registry: None,
            default_modules: vec![Name::ERLANG],
            tail_calls: true,
            max_call_depth: None,
            cancellation: None,
            profile: false,
            with_builtins: true,
        }
    }

    /// Set the evaluation mode.
    ///
    /// Controls the call depth limit and the call budget.
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Share a module registry with other processes.
    pub fn registry(mut self, registry: SharedModuleRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Modules searched, in order, for unqualified calls that the calling
    /// module does not define.
    pub fn default_modules(mut self, modules: Vec<&str>) -> Self {
        self.default_modules = modules.into_iter().map(Name::intern).collect();
        self
    }

    /// With tail calls disabled every call pushes a frame.
    pub fn tail_calls(mut self, enabled: bool) -> Self {
        self.tail_calls = enabled;
        self
    }

    /// Override the mode's call depth limit.
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    /// Checked before every statement; once set, evaluation fails with
    /// "evaluation cancelled".
    pub fn cancellation(mut self, token: CancelToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Collect `EvalCounters`.
    pub fn profile(mut self, enabled: bool) -> Self {
        self.profile = enabled;
        self
    }

    /// Register the `erlang` builtin module (on by default).
    pub fn with_builtins(mut self, enabled: bool) -> Self {
        self.with_builtins = enabled;
        self
    }

    /// Build the process.
    pub fn build(self) -> Process {
        let registry = self.registry.unwrap_or_default();
        if self.with_builtins && !registry.read().contains(Name::ERLANG) {
            registry.register(Arc::new(bifs::erlang_module()));
        }

        let mut mode_state = ModeState::new(&self.mode);
        if self.profile {
            mode_state.enable_counters();
        }

        let max_depth = self.max_call_depth.or_else(|| self.mode.max_call_depth());

        Process {
            registry,
            default_modules: self.default_modules,
            stack: CallStack::new(max_depth),
            mode: self.mode,
            mode_state,
            tail_calls: self.tail_calls,
            cancellation: self.cancellation,
        }
    }
}
