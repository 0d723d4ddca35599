//! Variant tag → adapter lookup.
//!
//! Populated once at setup through [`AdapterRegistryBuilder`]; the built
//! registry is immutable and shared by every session.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::adapter::LifeCycleAdapter;
use super::error::{RegistryError, UnknownVariantError};
use crate::adapters::{ComboAdapter, ListAdapter, ShellAdapter, ToolBarAdapter, ToolItemAdapter};
use crate::widget::{VariantTag, Widget};

pub struct AdapterRegistry {
    adapters: HashMap<VariantTag, Arc<dyn LifeCycleAdapter>>,
}

impl AdapterRegistry {
    pub fn builder() -> AdapterRegistryBuilder {
        AdapterRegistryBuilder {
            adapters: HashMap::new(),
        }
    }

    /// Builder pre-populated with the built-in variants.
    pub fn builtin_builder() -> AdapterRegistryBuilder {
        let mut adapters: HashMap<VariantTag, Arc<dyn LifeCycleAdapter>> = HashMap::new();
        adapters.insert(VariantTag::SHELL, Arc::new(ShellAdapter::new()));
        adapters.insert(VariantTag::TOOL_BAR, Arc::new(ToolBarAdapter::new()));
        adapters.insert(VariantTag::TOOL_ITEM, Arc::new(ToolItemAdapter::new()));
        adapters.insert(VariantTag::LIST, Arc::new(ListAdapter::new()));
        adapters.insert(VariantTag::COMBO, Arc::new(ComboAdapter::new()));
        AdapterRegistryBuilder { adapters }
    }

    /// Registry with the built-in variants only.
    pub fn builtin() -> Self {
        Self::builtin_builder().build()
    }

    pub fn resolve(&self, widget: &Widget) -> Result<&dyn LifeCycleAdapter, UnknownVariantError> {
        self.adapters
            .get(widget.variant())
            .map(|adapter| adapter.as_ref())
            .ok_or_else(|| UnknownVariantError {
                widget: widget.id().clone(),
                variant: widget.variant().clone(),
            })
    }

    pub fn contains(&self, variant: &VariantTag) -> bool {
        self.adapters.contains_key(variant)
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut variants: Vec<&str> = self.adapters.keys().map(VariantTag::as_str).collect();
        variants.sort_unstable();
        f.debug_struct("AdapterRegistry")
            .field("variants", &variants)
            .finish()
    }
}

pub struct AdapterRegistryBuilder {
    adapters: HashMap<VariantTag, Arc<dyn LifeCycleAdapter>>,
}

impl AdapterRegistryBuilder {
    /// Register an adapter. Each tag may be registered once.
    pub fn register(
        mut self,
        variant: VariantTag,
        adapter: impl LifeCycleAdapter + 'static,
    ) -> Result<Self, RegistryError> {
        if self.adapters.contains_key(&variant) {
            return Err(RegistryError::Duplicate(variant));
        }
        tracing::debug!(variant = %variant, "Registered life-cycle adapter");
        self.adapters.insert(variant, Arc::new(adapter));
        Ok(self)
    }

    pub fn build(self) -> AdapterRegistry {
        AdapterRegistry {
            adapters: self.adapters,
        }
    }
}
