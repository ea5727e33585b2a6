//! Handler registry.

use std::collections::HashMap;
use std::sync::Arc;

use super::Handler;

/// A named group of handler functions, addressed by the module half of a
/// handler reference.
pub struct HandlerModule {
    name: String,
    functions: HashMap<String, Arc<dyn Handler>>,
}

impl HandlerModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: HashMap::new(),
        }
    }

    /// Add a function to this module, replacing any previous one of the same name.
    pub fn with_function<H>(mut self, name: impl Into<String>, handler: H) -> Self
    where
        H: Handler + 'static,
    {
        self.functions.insert(name.into(), Arc::new(handler));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn function(&self, name: &str) -> Option<Arc<dyn Handler>> {
        self.functions.get(name).cloned()
    }

    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Registry of every handler the process can serve.
///
/// Built once at startup and read-only afterwards, so lookups need no lock.
#[derive(Default)]
pub struct HandlerRegistry {
    modules: HashMap<String, HandlerModule>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module. A module with the same name is merged into, with
    /// the incoming functions taking precedence.
    pub fn register(&mut self, module: HandlerModule) {
        match self.modules.get_mut(module.name()) {
            Some(existing) => existing.functions.extend(module.functions),
            None => {
                self.modules.insert(module.name.clone(), module);
            }
        }
    }

    /// Register a single function under `module:function`.
    pub fn register_fn<H>(&mut self, module: &str, function: &str, handler: H)
    where
        H: Handler + 'static,
    {
        self.register(HandlerModule::new(module).with_function(function, handler));
    }

    pub fn module(&self, name: &str) -> Option<&HandlerModule> {
        self.modules.get(name)
    }

    /// All `module:function` identifiers, sorted.
    pub fn references(&self) -> Vec<String> {
        let mut references: Vec<String> = self
            .modules
            .values()
            .flat_map(|module| {
                module
                    .function_names()
                    .into_iter()
                    .map(move |function| format!("{}:{}", module.name(), function))
            })
            .collect();
        references.sort();
        references
    }
}
