//! Module registry.
//!
//! A [`ModuleRegistry`] maps module names to modules. Processes hold it
//! through [`SharedModuleRegistry`], so several processes can share one
//! table and registration is serialized against lookups. Lookups clone the
//! module handle and release the lock before anything is evaluated, which
//! lets a running function register further modules.

use std::fmt;
use std::sync::Arc;

use erl_ir::Name;
use rustc_hash::FxHashMap;

use crate::module::Module;

/// Module name to module.
#[derive(Default)]
pub struct ModuleRegistry {
    modules: FxHashMap<Name, Arc<dyn Module>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `module` under its own name, replacing any module already
    /// registered under that name.
    pub fn register(&mut self, module: Arc<dyn Module>) {
        let name = module.name();
        if self.modules.insert(name, module).is_some() {
            tracing::debug!(module = %name, "replaced module");
        } else {
            tracing::debug!(module = %name, "registered module");
        }
    }

    pub fn get(&self, name: Name) -> Option<Arc<dyn Module>> {
        self.modules.get(&name).cloned()
    }

    pub fn contains(&self, name: Name) -> bool {
        self.modules.contains_key(&name)
    }

    pub fn remove(&mut self, name: Name) -> Option<Arc<dyn Module>> {
        self.modules.remove(&name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Registered module names, sorted by text.
    pub fn names(&self) -> Vec<Name> {
        let mut names: Vec<Name> = self.modules.keys().copied().collect();
        names.sort_by(|a, b| a.cmp_text(*b));
        names
    }
}

impl fmt::Debug for ModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

/// Thread-safe handle to a [`ModuleRegistry`].
///
/// Uses `Arc<RwLock<_>>`; clones share the same table.
#[derive(Clone, Default)]
pub struct SharedModuleRegistry(Arc<parking_lot::RwLock<ModuleRegistry>>);

impl SharedModuleRegistry {
    pub fn new(registry: ModuleRegistry) -> Self {
        SharedModuleRegistry(Arc::new(parking_lot::RwLock::new(registry)))
    }

    /// Get read access to the registry.
    pub fn read(&self) -> parking_lot::RwLockReadGuard<'_, ModuleRegistry> {
        self.0.read()
    }

    /// Get write access to the registry.
    pub fn write(&self) -> parking_lot::RwLockWriteGuard<'_, ModuleRegistry> {
        self.0.write()
    }

    pub fn register(&self, module: Arc<dyn Module>) {
        self.write().register(module);
    }

    /// Look up a module; the lock is released before this returns.
    pub fn get(&self, name: Name) -> Option<Arc<dyn Module>> {
        self.read().get(name)
    }
}

impl fmt::Debug for SharedModuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedModuleRegistry({:?})", &*self.0.read())
    }
}
