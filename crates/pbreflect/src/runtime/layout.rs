// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generated-layout metadata of a message struct.
//!
//! A code generator (or a hand-written adapter) describes the physical field
//! order of its struct together with the oneof alternatives stored in shared
//! slots. Each alternative carries a presence probe, so disambiguating a slot
//! against a live instance is a table walk rather than a name lookup.

use super::RuntimeTypeHandle;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Presence check for one oneof alternative against a live instance.
///
/// Returns `false` for instances of an unexpected type.
pub type PresenceProbe = Arc<dyn Fn(&dyn Any) -> bool + Send + Sync>;

/// One physical property of a generated struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutProperty {
    /// Layout-visible name (`HomeAddress`).
    pub name: Arc<str>,
    /// Declared schema name (`home_address`), or the oneof name for a slot.
    pub orig_name: Arc<str>,
    /// Property holds a repeated value (lists and maps).
    pub repeated: bool,
}

impl LayoutProperty {
    pub fn new(name: impl Into<Arc<str>>, orig_name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            orig_name: orig_name.into(),
            repeated: false,
        }
    }

    #[must_use]
    pub fn repeated(mut self) -> Self {
        self.repeated = true;
        self
    }
}

/// One alternative of a oneof group stored in a shared layout slot.
#[derive(Clone)]
pub struct OneofAlternative {
    /// Declared schema name of the alternative (`email`).
    pub orig_name: Arc<str>,
    /// Layout index of the shared slot.
    pub position: usize,
    /// Runtime type of the alternative's wrapper.
    pub runtime_type: RuntimeTypeHandle,
    /// Accessor name on the generated struct (`Email`).
    pub accessor: Arc<str>,
    probe: PresenceProbe,
}

impl OneofAlternative {
    pub fn new<F>(
        orig_name: impl Into<Arc<str>>,
        position: usize,
        runtime_type: RuntimeTypeHandle,
        accessor: impl Into<Arc<str>>,
        probe: F,
    ) -> Self
    where
        F: Fn(&dyn Any) -> bool + Send + Sync + 'static,
    {
        Self {
            orig_name: orig_name.into(),
            position,
            runtime_type,
            accessor: accessor.into(),
            probe: Arc::new(probe),
        }
    }

    /// Build an alternative whose probe only inspects instances of `M`.
    pub fn for_message<M, F>(
        orig_name: impl Into<Arc<str>>,
        position: usize,
        runtime_type: RuntimeTypeHandle,
        accessor: impl Into<Arc<str>>,
        is_set: F,
    ) -> Self
    where
        M: Any,
        F: Fn(&M) -> bool + Send + Sync + 'static,
    {
        Self::new(orig_name, position, runtime_type, accessor, move |instance| {
            instance.downcast_ref::<M>().is_some_and(|message| is_set(message))
        })
    }

    pub fn probe(&self) -> &PresenceProbe {
        &self.probe
    }

    /// Whether `instance` currently holds this alternative.
    pub fn is_set(&self, instance: &dyn Any) -> bool {
        (self.probe)(instance)
    }
}

impl fmt::Debug for OneofAlternative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OneofAlternative")
            .field("orig_name", &self.orig_name)
            .field("position", &self.position)
            .field("runtime_type", &self.runtime_type.name())
            .field("accessor", &self.accessor)
            .finish_non_exhaustive()
    }
}

/// Ordered struct properties plus oneof alternatives.
#[derive(Debug, Clone, Default)]
pub struct MessageLayout {
    properties: Vec<LayoutProperty>,
    oneofs: Vec<OneofAlternative>,
}

impl MessageLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next physical property; its layout index is its order.
    #[must_use]
    pub fn property(mut self, property: LayoutProperty) -> Self {
        self.properties.push(property);
        self
    }

    #[must_use]
    pub fn oneof(mut self, alternative: OneofAlternative) -> Self {
        self.oneofs.push(alternative);
        self
    }

    pub fn properties(&self) -> &[LayoutProperty] {
        &self.properties
    }

    pub fn oneofs(&self) -> &[OneofAlternative] {
        &self.oneofs
    }
}
