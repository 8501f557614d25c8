//! Interpreted modules.
//!
//! [`CompiledModule::compile`] turns a [`ModuleDecl`] into a table of
//! function groups. Each group keeps a non-owning back-reference to its
//! module, assigned once while the module is built, so a running function
//! always knows which module resolves its unqualified calls.

use std::fmt;
use std::sync::{Arc, Weak};

use erl_ir::{Clause, FunctionRef, ModuleDecl, Name};
use erl_value::{no_matching_function, EvalResult, Value};
use rustc_hash::{FxHashMap, FxHashSet};

use super::{Module, ModuleInfo};
use crate::process::Process;

/// Why a module declaration was rejected.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("module declaration has no -module attribute")]
    MissingModuleName,
    #[error("function {name}/{arity} is defined more than once")]
    DuplicateFunction { name: Name, arity: usize },
    #[error("a clause of {name}/{arity} takes {found} parameters")]
    ArityMismatch {
        name: Name,
        arity: usize,
        found: usize,
    },
    #[error("function {name}/{arity} has no clauses")]
    EmptyFunction { name: Name, arity: usize },
    /// `module_info/0,1` are provided for every module.
    #[error("function {name}/{arity} already defined")]
    ReservedFunction { name: Name, arity: usize },
}

/// All clauses of one `name/arity`, tried in declaration order.
pub struct FunctionGroup {
    name: Name,
    arity: usize,
    clauses: Vec<Clause>,
    public: bool,
    module_name: Name,
    module: Weak<CompiledModule>,
}

impl FunctionGroup {
    #[inline]
    pub fn name(&self) -> Name {
        self.name
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.arity
    }

    #[inline]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    #[inline]
    pub fn is_public(&self) -> bool {
        self.public
    }

    #[inline]
    pub fn module_name(&self) -> Name {
        self.module_name
    }

    /// The owning module; `None` only once the module has been dropped.
    pub fn module(&self) -> Option<Arc<CompiledModule>> {
        self.module.upgrade()
    }
}

impl fmt::Debug for FunctionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FunctionGroup({}:{}/{}, {} clauses)",
            self.module_name,
            self.name,
            self.arity,
            self.clauses.len()
        )
    }
}

/// A module built from a parsed declaration.
pub struct CompiledModule {
    name: Name,
    functions: FxHashMap<(Name, usize), Arc<FunctionGroup>>,
    order: Vec<FunctionRef>,
    info: ModuleInfo,
}

impl CompiledModule {
    /// Validate `decl` and build the module.
    ///
    /// Visibility is fixed here: `-compile(export_all)` makes every function
    /// public, otherwise only the `name/arity` pairs listed in `-export`
    /// attributes are. Exports naming undeclared functions are ignored.
    pub fn compile(decl: ModuleDecl) -> Result<Arc<Self>, CompileError> {
        let name = decl.module_name().ok_or(CompileError::MissingModuleName)?;
        validate(&decl)?;

        let exported: FxHashSet<FunctionRef> = decl.exported().collect();
        let export_all = decl.exports_all();
        let order: Vec<FunctionRef> = decl
            .functions
            .iter()
            .map(|f| FunctionRef {
                name: f.name,
                arity: f.arity,
            })
            .collect();
        let exports: Vec<FunctionRef> = order
            .iter()
            .copied()
            .filter(|f| export_all || exported.contains(f))
            .collect();
        let info = ModuleInfo::new(&exports, &order);

        tracing::debug!(
            module = %name,
            functions = order.len(),
            exports = exports.len(),
            "compiled module"
        );

        Ok(Arc::new_cyclic(|module| {
            let functions = decl
                .functions
                .into_iter()
                .map(|f| {
                    let key = FunctionRef {
                        name: f.name,
                        arity: f.arity,
                    };
                    let group = FunctionGroup {
                        name: f.name,
                        arity: f.arity,
                        clauses: f.clauses,
                        public: export_all || exported.contains(&key),
                        module_name: name,
                        module: module.clone(),
                    };
                    ((f.name, f.arity), Arc::new(group))
                })
                .collect();
            CompiledModule {
                name,
                functions,
                order,
                info,
            }
        }))
    }

    /// Any function of this module, public or not.
    pub fn group(&self, name: Name, arity: usize) -> Option<&Arc<FunctionGroup>> {
        self.functions.get(&(name, arity))
    }

    /// A function callable from outside the module.
    pub fn public_group(&self, name: Name, arity: usize) -> Option<&Arc<FunctionGroup>> {
        self.group(name, arity).filter(|group| group.public)
    }
}

fn validate(decl: &ModuleDecl) -> Result<(), CompileError> {
    let mut seen = FxHashSet::default();
    for function in &decl.functions {
        let (name, arity) = (function.name, function.arity);
        if name == Name::MODULE_INFO && arity <= 1 {
            return Err(CompileError::ReservedFunction { name, arity });
        }
        if !seen.insert((name, arity)) {
            return Err(CompileError::DuplicateFunction { name, arity });
        }
        if function.clauses.is_empty() {
            return Err(CompileError::EmptyFunction { name, arity });
        }
        if let Some(clause) = function.clauses.iter().find(|c| c.arity() != arity) {
            return Err(CompileError::ArityMismatch {
                name,
                arity,
                found: clause.arity(),
            });
        }
    }
    Ok(())
}

impl Module for CompiledModule {
    fn name(&self) -> Name {
        self.name
    }

    fn function_exists(&self, name: Name, arity: usize) -> bool {
        self.public_group(name, arity).is_some()
    }

    fn functions(&self) -> &[FunctionRef] {
        &self.order
    }

    fn info(&self) -> &ModuleInfo {
        &self.info
    }

    fn evaluate_local(&self, process: &mut Process, name: Name, args: &[Value]) -> EvalResult {
        match self.public_group(name, args.len()) {
            Some(group) => process.call_group(group, args.to_vec()),
            None => Err(no_matching_function()),
        }
    }

    fn as_compiled(&self) -> Option<&CompiledModule> {
        Some(self)
    }
}

impl fmt::Debug for CompiledModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledModule")
            .field("name", &self.name)
            .field("functions", &self.order)
            .finish_non_exhaustive()
    }
}
