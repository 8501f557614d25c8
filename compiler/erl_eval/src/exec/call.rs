//! Call resolution, frames and module dispatch.

use std::sync::Arc;

use erl_ir::{Clause, Invocation, Name};
use erl_stack::ensure_sufficient_stack;
use erl_value::{
    no_matching_function, no_matching_module, no_such_tail_call_function, unresolved_function,
    EvalError, EvalResult, Value,
};

use super::{Enclosing, Flow};
use crate::binder::bind;
use crate::call_stack::Frame;
use crate::module::{CompiledModule, FunctionGroup, Module};
use crate::process::Process;

/// A call that replaces the live frame at index `frame`.
pub(crate) struct TailCall {
    frame: usize,
    module: Arc<CompiledModule>,
    group: Arc<FunctionGroup>,
    args: Vec<Value>,
}

/// Where a call goes.
enum Target {
    /// An interpreted function, run directly by the evaluator.
    Compiled(Arc<CompiledModule>, Arc<FunctionGroup>),
    /// Anything else goes through `Module::evaluate`: native functions,
    /// `module_info`, and misses the module itself reports.
    Dispatch(Arc<dyn Module>),
}

impl Process {
    /// Evaluate a call. Only calls with `tail` set may produce
    /// [`Flow::TailCall`].
    pub(super) fn eval_invocation(
        &mut self,
        module: Enclosing<'_>,
        call: &Invocation,
        tail: bool,
    ) -> Result<Flow, EvalError> {
        let args = self.eval_all(module, &call.args)?;
        let tail = tail && self.tail_calls;
        match self.resolve(module, call.module, call.function, args.len())? {
            Target::Compiled(callee, group) => {
                if tail {
                    let candidate =
                        self.stack
                            .tail_call_candidate(callee.name(), group.name(), group.arity());
                    if let Some(frame) = candidate {
                        return Ok(Flow::TailCall(TailCall {
                            frame,
                            module: callee,
                            group,
                            args,
                        }));
                    }
                }
                self.invoke(callee, group, args, tail)
            }
            Target::Dispatch(target) => self.dispatch(&target, call.function, &args).map(Flow::Value),
        }
    }

    /// Unqualified calls try the enclosing module (private functions
    /// included), then the default modules in order. Qualified calls go to
    /// the named module.
    fn resolve(
        &self,
        enclosing: Enclosing<'_>,
        module: Option<Name>,
        function: Name,
        arity: usize,
    ) -> Result<Target, EvalError> {
        if let Some(name) = module {
            let found = self
                .registry
                .get(name)
                .ok_or_else(|| no_matching_module(name.as_str()))?;
            return Ok(target(found, function, arity));
        }
        if let Some(current) = enclosing {
            if function == Name::MODULE_INFO && arity <= 1 {
                let module: Arc<dyn Module> = current.clone();
                return Ok(Target::Dispatch(module));
            }
            if let Some(group) = current.group(function, arity) {
                return Ok(Target::Compiled(Arc::clone(current), Arc::clone(group)));
            }
        }
        self.default_module_for(function, arity)
            .map(|found| target(found, function, arity))
            .ok_or_else(|| unresolved_function(function.as_str(), arity))
    }

    /// Run `group` in a new frame at the current depth, looping for every
    /// tail call that targets that frame. The stack is back at its entry
    /// depth when this returns, error or not.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(module = %module.name(), function = %group.name(), arity = group.arity())
    )]
    pub(crate) fn invoke(
        &mut self,
        module: Arc<CompiledModule>,
        group: Arc<FunctionGroup>,
        args: Vec<Value>,
        tail: bool,
    ) -> Result<Flow, EvalError> {
        let entry = self.stack.depth();
        let result =
            ensure_sufficient_stack(|| self.run_frame(entry, module, group, args, tail))
                .map_err(|err| self.stack.attach_backtrace(err));
        self.stack.truncate(entry);
        result
    }

    fn run_frame(
        &mut self,
        index: usize,
        mut module: Arc<CompiledModule>,
        mut group: Arc<FunctionGroup>,
        mut args: Vec<Value>,
        tail_position: bool,
    ) -> Result<Flow, EvalError> {
        let mut rewound = false;
        loop {
            self.mode_state.check_budget()?;
            self.mode_state.count_function_call();
            self.stack.push(Frame::new(
                module.name(),
                group.name(),
                group.arity(),
                tail_position,
            ))?;
            let clause = self.select_clause(&module, &group, &args, rewound)?;
            match self.eval_body(Some(&module), &clause.body, true)? {
                Flow::TailCall(call) if call.frame == index => {
                    tracing::debug!(
                        module = %call.module.name(),
                        function = %call.group.name(),
                        arity = call.group.arity(),
                        depth = index,
                        "tail call rewind"
                    );
                    self.mode_state.count_tail_call();
                    self.stack.truncate(index);
                    module = call.module;
                    group = call.group;
                    args = call.args;
                    rewound = true;
                }
                flow => return Ok(flow),
            }
        }
    }

    /// Pick the first clause whose parameters bind `args` and whose guard
    /// holds. Each attempt binds into a fresh scope that is kept only for
    /// the selected clause.
    fn select_clause<'g>(
        &mut self,
        module: &Arc<CompiledModule>,
        group: &'g FunctionGroup,
        args: &[Value],
        rewound: bool,
    ) -> Result<&'g Clause, EvalError> {
        for (index, clause) in group.clauses().iter().enumerate() {
            self.mode_state.count_pattern_match();
            self.stack.current_mut().push_scope();
            let bound = clause
                .params
                .iter()
                .zip(args)
                .all(|(param, arg)| bind(param, arg, self.stack.current_mut(), true));
            if bound && self.guard_passes(Some(module), clause.guard.as_ref()) {
                self.stack.current_mut().commit_scope();
                tracing::trace!(function = %group.name(), clause = index, "selected clause");
                return Ok(clause);
            }
            self.stack.current_mut().pop_scope();
        }
        Err(if rewound {
            no_such_tail_call_function()
        } else {
            no_matching_function()
        })
    }

    /// Call through `Module::evaluate` in a frame of its own. Native frames
    /// are never tail frames, so no tail call unwinds through host code.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(module = %target.name(), function = %function, arity = args.len())
    )]
    fn dispatch(&mut self, target: &Arc<dyn Module>, function: Name, args: &[Value]) -> EvalResult {
        self.mode_state.check_budget()?;
        self.mode_state.count_function_call();
        let entry = self.stack.depth();
        self.stack
            .push(Frame::new(target.name(), function, args.len(), false))?;
        let result = target
            .evaluate(self, function, args)
            .and_then(raise_error_value)
            .map_err(|err| self.stack.attach_backtrace(err));
        self.stack.truncate(entry);
        result
    }

    /// Run a function of a compiled module on behalf of `Module::evaluate`.
    pub(crate) fn call_group(&mut self, group: &Arc<FunctionGroup>, args: Vec<Value>) -> EvalResult {
        let module = group.module().ok_or_else(no_matching_function)?;
        self.invoke(module, Arc::clone(group), args, false)?
            .into_value()
    }
}

/// Compiled public functions run directly; everything else is dispatched.
fn target(found: Arc<dyn Module>, function: Name, arity: usize) -> Target {
    if function == Name::MODULE_INFO {
        return Target::Dispatch(found);
    }
    let compiled = found
        .as_compiled()
        .and_then(|module| module.public_group(function, arity))
        .and_then(|group| Some((group.module()?, Arc::clone(group))));
    match compiled {
        Some((module, group)) => Target::Compiled(module, group),
        None => Target::Dispatch(found),
    }
}

/// Host functions may report failure as an error value.
pub(crate) fn raise_error_value(value: Value) -> EvalResult {
    if let Some(message) = value.error_message() {
        return Err(EvalError::new(message));
    }
    Ok(value)
}
