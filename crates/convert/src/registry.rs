//! Name-keyed adapter registry.

use crate::adapter::{Adapter, CollectionAdapter};
use crate::context::ContextRenderer;
use crate::error::{ConversionError, ConversionFailure};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Anything that can be looked up by name in a [`Registry`].
pub trait Named {
    fn name(&self) -> &str;
}

impl<T> Named for dyn Adapter<Item = T> {
    fn name(&self) -> &str {
        Adapter::name(self)
    }
}

impl<T> Named for dyn CollectionAdapter<Item = T> {
    fn name(&self) -> &str {
        Adapter::name(self)
    }
}

impl Named for dyn ContextRenderer {
    fn name(&self) -> &str {
        ContextRenderer::name(self)
    }
}

/// Concurrency-safe map from tool name to adapter.
///
/// Registering a second adapter under an existing name replaces the first.
pub struct Registry<A: ?Sized> {
    adapters: RwLock<HashMap<String, Arc<A>>>,
}

impl<A: ?Sized> Default for Registry<A> {
    fn default() -> Self {
        Self {
            adapters: RwLock::new(HashMap::new()),
        }
    }
}

impl<A: ?Sized> fmt::Debug for Registry<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.adapters.read().keys().cloned().collect();
        names.sort();
        f.debug_struct("Registry").field("adapters", &names).finish()
    }
}

impl<A: ?Sized + Named> Registry<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, adapter: Arc<A>) {
        let name = adapter.name().to_string();
        if self.adapters.write().insert(name.clone(), adapter).is_some() {
            tracing::debug!(name = %name, "replaced previously registered adapter");
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<A>> {
        self.adapters.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.adapters.read().contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.adapters.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.adapters.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.read().is_empty()
    }
}

impl<A> Registry<A>
where
    A: ?Sized + Named + Adapter,
{
    /// Convert native bytes of format `from` into format `to`.
    ///
    /// Both adapters are resolved before any decoding happens.
    pub fn convert(&self, data: &[u8], from: &str, to: &str) -> Result<Vec<u8>, ConversionError> {
        let source = self
            .get(from)
            .ok_or_else(|| ConversionError::new(from, to, ConversionFailure::UnknownSource(from.into())))?;
        let target = self
            .get(to)
            .ok_or_else(|| ConversionError::new(from, to, ConversionFailure::UnknownTarget(to.into())))?;

        let item = source
            .parse(data)
            .map_err(|e| ConversionError::new(from, to, e))?;
        let out = target
            .marshal(&item)
            .map_err(|e| ConversionError::new(from, to, e))?;

        tracing::debug!(from, to, bytes = out.len(), "converted");
        Ok(out)
    }
}
