//! Host-implemented modules.
//!
//! A native module is an explicit registration table from `name/arity` to
//! a host function with the uniform signature
//! `Fn(&mut Process, &[Value]) -> EvalResult`. [`NativeFunction`] adapts
//! functions taking zero to three `&Value` parameters to that signature and
//! derives the arity from the parameter count:
//!
//! ```ignore
//! let module = NativeModuleBuilder::new("math")
//!     .function("double", |_: &mut Process, x: &Value| x_times_two(x))
//!     .build();
//! ```

use std::fmt;
use std::sync::Arc;

use erl_ir::{FunctionRef, Name};
use erl_value::{no_matching_function, EvalResult, Value};
use rustc_hash::FxHashMap;

use super::{Module, ModuleInfo};
use crate::process::Process;

/// A host function behind the uniform calling convention.
pub type NativeFn = Arc<dyn Fn(&mut Process, &[Value]) -> EvalResult + Send + Sync>;

/// A host function whose arity is known from its signature.
///
/// `Args` only distinguishes the implementations for different parameter
/// counts; it is inferred from the function's signature.
pub trait NativeFunction<Args>: Send + Sync + 'static {
    const ARITY: usize;

    fn into_native(self) -> NativeFn;
}

impl<F> NativeFunction<()> for F
where
    F: Fn(&mut Process) -> EvalResult + Send + Sync + 'static,
{
    const ARITY: usize = 0;

    fn into_native(self) -> NativeFn {
        Arc::new(move |process, _| self(process))
    }
}

impl<F> NativeFunction<(Value,)> for F
where
    F: Fn(&mut Process, &Value) -> EvalResult + Send + Sync + 'static,
{
    const ARITY: usize = 1;

    fn into_native(self) -> NativeFn {
        Arc::new(move |process, args| match args {
            [a] => self(process, a),
            _ => Err(no_matching_function()),
        })
    }
}

impl<F> NativeFunction<(Value, Value)> for F
where
    F: Fn(&mut Process, &Value, &Value) -> EvalResult + Send + Sync + 'static,
{
    const ARITY: usize = 2;

    fn into_native(self) -> NativeFn {
        Arc::new(move |process, args| match args {
            [a, b] => self(process, a, b),
            _ => Err(no_matching_function()),
        })
    }
}

impl<F> NativeFunction<(Value, Value, Value)> for F
where
    F: Fn(&mut Process, &Value, &Value, &Value) -> EvalResult + Send + Sync + 'static,
{
    const ARITY: usize = 3;

    fn into_native(self) -> NativeFn {
        Arc::new(move |process, args| match args {
            [a, b, c] => self(process, a, b, c),
            _ => Err(no_matching_function()),
        })
    }
}

/// Collects host functions for a [`NativeModule`].
#[must_use]
pub struct NativeModuleBuilder {
    name: Name,
    functions: Vec<(FunctionRef, NativeFn)>,
}

impl NativeModuleBuilder {
    pub fn new(name: &str) -> Self {
        NativeModuleBuilder {
            name: Name::intern(name),
            functions: Vec::new(),
        }
    }

    /// Register `f` under `name`, with the arity of its signature.
    pub fn function<Args, F: NativeFunction<Args>>(self, name: &str, f: F) -> Self {
        self.insert(FunctionRef::new(name, F::ARITY), f.into_native())
    }

    /// Register a function taking its arguments as a slice. The slice
    /// always has exactly `arity` elements.
    pub fn function_n<F>(self, name: &str, arity: usize, f: F) -> Self
    where
        F: Fn(&mut Process, &[Value]) -> EvalResult + Send + Sync + 'static,
    {
        self.insert(FunctionRef::new(name, arity), Arc::new(f))
    }

    /// Re-registering a `name/arity` replaces the earlier function.
    fn insert(mut self, key: FunctionRef, f: NativeFn) -> Self {
        match self.functions.iter_mut().find(|(existing, _)| *existing == key) {
            Some(slot) => slot.1 = f,
            None => self.functions.push((key, f)),
        }
        self
    }

    pub fn build(self) -> NativeModule {
        let order: Vec<FunctionRef> = self.functions.iter().map(|(key, _)| *key).collect();
        let functions = self
            .functions
            .into_iter()
            .map(|(key, f)| ((key.name, key.arity), f))
            .collect();
        NativeModule {
            name: self.name,
            info: ModuleInfo::new(&order, &order),
            order,
            functions,
        }
    }
}

/// A module of host functions. Every function is public.
pub struct NativeModule {
    name: Name,
    functions: FxHashMap<(Name, usize), NativeFn>,
    order: Vec<FunctionRef>,
    info: ModuleInfo,
}

impl Module for NativeModule {
    fn name(&self) -> Name {
        self.name
    }

    fn function_exists(&self, name: Name, arity: usize) -> bool {
        self.functions.contains_key(&(name, arity))
    }

    fn functions(&self) -> &[FunctionRef] {
        &self.order
    }

    fn info(&self) -> &ModuleInfo {
        &self.info
    }

    fn evaluate_local(&self, process: &mut Process, name: Name, args: &[Value]) -> EvalResult {
        match self.functions.get(&(name, args.len())) {
            Some(f) => f(process, args),
            None => Err(no_matching_function()),
        }
    }
}

impl fmt::Debug for NativeModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeModule")
            .field("name", &self.name)
            .field("functions", &self.order)
            .finish_non_exhaustive()
    }
}
