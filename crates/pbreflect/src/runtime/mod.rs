// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime type handles and their resolver.
//!
//! Mapping a schema type name to the in-memory representation that evaluates
//! it is a capability injected into the registry, not a global lookup. Types
//! unknown to the resolver are simply "unknown at runtime".
//!
//! # Example
//!
//! ```
//! use pbreflect::runtime::{RuntimeType, RuntimeTypeResolver, RuntimeTypeTable};
//!
//! struct Person;
//!
//! let table = RuntimeTypeTable::new();
//! table.register(RuntimeType::of::<Person>("acme.Person"));
//!
//! assert!(table.resolve("acme.Person").is_some());
//! assert!(table.resolve("acme.Unknown").is_none());
//! ```

mod layout;

pub use layout::{LayoutProperty, MessageLayout, OneofAlternative, PresenceProbe};

use dashmap::DashMap;
use std::any::{Any, TypeId};
use std::sync::Arc;

/// Shared handle to a runtime type.
pub type RuntimeTypeHandle = Arc<RuntimeType>;

/// In-memory representation backing a schema type.
#[derive(Debug, Clone)]
pub struct RuntimeType {
    name: Arc<str>,
    type_id: Option<TypeId>,
    layout: Option<MessageLayout>,
}

impl RuntimeType {
    /// A runtime type known only by name (dynamic messages, oneof wrappers).
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            type_id: None,
            layout: None,
        }
    }

    /// A runtime type backed by the Rust type `T`.
    pub fn of<T: Any>(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            type_id: Some(TypeId::of::<T>()),
            layout: None,
        }
    }

    /// Attach generated-layout metadata.
    #[must_use]
    pub fn with_layout(mut self, layout: MessageLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_id(&self) -> Option<TypeId> {
        self.type_id
    }

    pub fn layout(&self) -> Option<&MessageLayout> {
        self.layout.as_ref()
    }

    /// Whether `instance` is a value of this runtime type.
    ///
    /// Name-only types cannot be checked and accept any instance.
    pub fn is_instance(&self, instance: &dyn Any) -> bool {
        self.type_id.map_or(true, |id| instance.type_id() == id)
    }
}

/// Resolves a fully-qualified schema type name to its runtime type.
pub trait RuntimeTypeResolver: Send + Sync {
    /// Returns `None` when the type has no runtime representation.
    fn resolve(&self, type_name: &str) -> Option<RuntimeTypeHandle>;
}

/// Concurrent [`DashMap`]-backed [`RuntimeTypeResolver`].
#[derive(Debug, Default)]
pub struct RuntimeTypeTable {
    types: DashMap<Arc<str>, RuntimeTypeHandle>,
}

impl RuntimeTypeTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a runtime type under its own name, replacing any previous one.
    pub fn register(&self, runtime_type: RuntimeType) -> RuntimeTypeHandle {
        let handle = Arc::new(runtime_type);
        let key: Arc<str> = Arc::from(handle.name());
        if self.types.insert(key, Arc::clone(&handle)).is_some() {
            log::debug!("[runtime] replaced runtime type {}", handle.name());
        }
        handle
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl RuntimeTypeResolver for RuntimeTypeTable {
    fn resolve(&self, type_name: &str) -> Option<RuntimeTypeHandle> {
        self.types.get(type_name).map(|entry| Arc::clone(entry.value()))
    }
}
