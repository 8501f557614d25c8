//! Evaluation processes.
//!
//! A [`Process`] is one sequential evaluation context: it owns a call stack
//! and references a (possibly shared) module registry. It evaluates one
//! request to completion before starting the next. The evaluator itself
//! lives in `crate::exec`; this module holds the host-facing API.

mod builder;

pub use builder::ProcessBuilder;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use erl_ir::{Expr, ModuleDecl, Name};
use erl_value::{no_matching_module, unresolved_function, EvalResult, Value};

use crate::call_stack::CallStack;
use crate::diagnostics::EvalCounters;
use crate::eval_mode::{EvalMode, ModeState};
use crate::exec::raise_error_value;
use crate::module::{CompileError, CompiledModule, Module};
use crate::registry::SharedModuleRegistry;

/// Cooperative cancellation flag; store `true` to stop a running evaluation.
pub type CancelToken = Arc<AtomicBool>;

/// One sequential evaluation context.
pub struct Process {
    pub(crate) registry: SharedModuleRegistry,
    pub(crate) default_modules: Vec<Name>,
    pub(crate) stack: CallStack,
    pub(crate) mode: EvalMode,
    pub(crate) mode_state: ModeState,
    pub(crate) tail_calls: bool,
    pub(crate) cancellation: Option<CancelToken>,
}

impl Default for Process {
    fn default() -> Self {
        Self::new()
    }
}

impl Process {
    /// A process with the default configuration; see [`ProcessBuilder`].
    pub fn new() -> Self {
        ProcessBuilder::new().build()
    }

    pub fn builder() -> ProcessBuilder {
        ProcessBuilder::new()
    }

    /// Call `module:function(args)`, or `function(args)` resolved through
    /// the default modules when `module` is `None`.
    ///
    /// Failures come back as [`Value::Error`].
    pub fn evaluate(&mut self, module: Option<&str>, function: &str, args: Vec<Value>) -> Value {
        self.try_evaluate(module, function, args)
            .unwrap_or_else(|err| err.to_value())
    }

    /// Like [`evaluate`](Self::evaluate), keeping the typed error and its
    /// backtrace.
    pub fn try_evaluate(
        &mut self,
        module: Option<&str>,
        function: &str,
        args: Vec<Value>,
    ) -> EvalResult {
        let function = Name::intern(function);
        let target = match module {
            Some(name) => self
                .registry
                .get(Name::intern(name))
                .ok_or_else(|| no_matching_module(name))?,
            None => self
                .default_module_for(function, args.len())
                .ok_or_else(|| unresolved_function(function.as_str(), args.len()))?,
        };
        let entry = self.stack.depth();
        let result = target
            .evaluate(self, function, &args)
            .and_then(raise_error_value);
        self.stack.truncate(entry);
        result
    }

    /// Evaluate a free-standing expression in the current frame, which is
    /// the root frame unless called from inside a native function.
    ///
    /// Bindings made by `=` stay visible to later expressions.
    pub fn eval_expr(&mut self, expr: &Expr) -> Value {
        self.eval_exprs(std::slice::from_ref(expr))
    }

    /// Evaluate a sequence of expressions; the last one's value is returned.
    pub fn eval_exprs(&mut self, exprs: &[Expr]) -> Value {
        self.try_eval_exprs(exprs).unwrap_or_else(|err| err.to_value())
    }

    pub fn try_eval_exprs(&mut self, exprs: &[Expr]) -> EvalResult {
        let entry = self.stack.depth();
        let result = self.eval_block(None, exprs);
        self.stack.truncate(entry);
        result
    }

    /// Drop a root-frame binding. Returns whether it existed.
    pub fn forget(&mut self, name: &str) -> bool {
        self.stack.root_mut().forget(Name::intern(name))
    }

    /// Drop every root-frame binding.
    pub fn forget_all(&mut self) {
        self.stack.root_mut().forget_all();
    }

    /// The value bound to `name` in the root frame.
    pub fn binding(&self, name: &str) -> Option<&Value> {
        self.stack.root().get(Name::intern(name))
    }

    /// Root-frame bindings, sorted by name.
    pub fn bindings(&self) -> Vec<(Name, Value)> {
        self.stack.root().bindings()
    }

    /// Register a module, replacing any module of the same name.
    pub fn add_module(&mut self, module: Arc<dyn Module>) {
        self.registry.register(module);
    }

    /// Compile a declaration and register the result.
    pub fn compile_module(&mut self, decl: ModuleDecl) -> Result<(), CompileError> {
        let module = CompiledModule::compile(decl)?;
        self.registry.register(module);
        Ok(())
    }

    pub fn registry(&self) -> &SharedModuleRegistry {
        &self.registry
    }

    pub fn stack(&self) -> &CallStack {
        &self.stack
    }

    /// Number of live call frames; zero between evaluations.
    pub fn call_depth(&self) -> usize {
        self.stack.depth()
    }

    pub fn mode(&self) -> &EvalMode {
        &self.mode
    }

    /// Function calls counted against the mode's budget so far.
    pub fn call_count(&self) -> u64 {
        self.mode_state.call_count
    }

    /// Profiling counters, when enabled with [`ProcessBuilder::profile`].
    pub fn counters(&self) -> Option<&EvalCounters> {
        self.mode_state.counters()
    }

    /// The first default module that exports `function/arity`.
    pub(crate) fn default_module_for(&self, function: Name, arity: usize) -> Option<Arc<dyn Module>> {
        self.default_modules
            .iter()
            .filter_map(|name| self.registry.get(*name))
            .find(|module| module.function_exists(function, arity))
    }
}
