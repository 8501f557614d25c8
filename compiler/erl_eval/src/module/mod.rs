//! The module dispatch contract.
//!
//! Interpreted ([`CompiledModule`]) and host-implemented ([`NativeModule`])
//! modules answer the same questions: which `name/arity` pairs they export,
//! how to evaluate one of them, and what `module_info` reports. The
//! provided [`Module::evaluate`] handles `module_info` and error-valued
//! arguments uniformly before delegating to [`Module::evaluate_local`].

mod compiled;
mod info;
mod native;

use erl_ir::{FunctionRef, Name};
use erl_value::{EvalError, EvalResult, Value};

use crate::process::Process;

pub use compiled::{CompileError, CompiledModule, FunctionGroup};
pub use info::ModuleInfo;
pub use native::{NativeFn, NativeFunction, NativeModule, NativeModuleBuilder};

/// A named collection of callable functions.
pub trait Module: Send + Sync {
    fn name(&self) -> Name;

    /// Whether `name/arity` can be called from outside the module.
    fn function_exists(&self, name: Name, arity: usize) -> bool;

    /// Every function, public or not, in declaration order.
    fn functions(&self) -> &[FunctionRef];

    /// Precomputed `module_info` answers.
    fn info(&self) -> &ModuleInfo;

    /// Run `name/args.len()`. Only public functions are reachable.
    fn evaluate_local(&self, process: &mut Process, name: Name, args: &[Value]) -> EvalResult;

    /// The interpreted module behind this handle, if it is one.
    fn as_compiled(&self) -> Option<&CompiledModule> {
        None
    }

    /// External entry point: answers `module_info/0,1`, returns the first
    /// error-valued argument unchanged, and otherwise evaluates locally.
    fn evaluate(&self, process: &mut Process, name: Name, args: &[Value]) -> EvalResult {
        if name == Name::MODULE_INFO {
            return self.info().query(args);
        }
        if let Some(message) = args.iter().find_map(Value::error_message) {
            return Err(EvalError::new(message));
        }
        self.evaluate_local(process, name, args)
    }
}
