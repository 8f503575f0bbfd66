use std::{any::Any, collections::HashMap};

use crate::target::SupportAdapter;

/// A registered platform binding (builder/exporter pair, or whatever the
/// binding exposes). `as_any` enables typed retrieval from the registry.
pub trait Adapter: Send + Sync {
    fn adapter(&self) -> SupportAdapter;

    fn as_any(&self) -> &dyn Any;
}

/// Registry of all loaded platform adapters.
///
/// Constructed once at process start and passed by reference to whatever
/// dispatches inbound events and outbound sends. No ambient globals.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: HashMap<SupportAdapter, Box<dyn Adapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    pub fn register(&mut self, adapter: Box<dyn Adapter>) {
        self.adapters.insert(adapter.adapter(), adapter);
    }

    pub fn get(&self, tag: SupportAdapter) -> Option<&dyn Adapter> {
        self.adapters.get(&tag).map(|a| a.as_ref())
    }

    /// Typed lookup: the registered adapter downcast to its concrete type.
    pub fn get_as<T: Adapter + 'static>(&self, tag: SupportAdapter) -> Option<&T> {
        self.get(tag).and_then(|a| a.as_any().downcast_ref::<T>())
    }

    pub fn list(&self) -> Vec<SupportAdapter> {
        self.adapters.keys().copied().collect()
    }
}
