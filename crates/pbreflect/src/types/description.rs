// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-message-type metadata with a lazily built field index.
//!
//! The field index (name map + slot map) is built once, on first access,
//! and published with a single atomic swap. Concurrent first readers
//! serialize on a build lock; readers either find nothing or the complete
//! index, never a partial one.
//!
//! Two build paths:
//!
//! - **Layout**: the runtime type carries generated-layout metadata. Positions
//!   are layout indices and oneof alternatives share their slot's position.
//! - **Descriptor**: no layout available. A field's `position` is its declared
//!   number, but the index slots are declaration order (`0..field_count()`).
//!   Slots are never shared, so no instance probing is needed.

use super::field::{FieldDescription, FieldSeed};
use crate::config::{RegistryConfig, MAP_ENTRY_KEY_POSITION, MAP_ENTRY_VALUE_POSITION};
use crate::descriptor::{
    camel_case, declared_wire_type, is_map_entry, oneof_group, DescriptorProto,
    FieldDescriptorProto, FileDescription, Label, Syntax,
};
use crate::runtime::{
    MessageLayout, OneofAlternative, RuntimeType, RuntimeTypeHandle, RuntimeTypeResolver,
};
use arc_swap::ArcSwapOption;
use parking_lot::Mutex;
use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

/// Field caches of one type. Built in one piece, never mutated afterwards.
#[derive(Debug, Default)]
struct FieldIndex {
    by_name: HashMap<Arc<str>, Arc<FieldDescription>>,
    /// Layout index on the layout path, declaration index otherwise.
    by_slot: BTreeMap<usize, Vec<Arc<FieldDescription>>>,
    /// (declaration order, field), sorted by `finish`.
    declared: Vec<(usize, Arc<FieldDescription>)>,
}

impl FieldIndex {
    fn insert(&mut self, order: usize, slot: usize, field: FieldDescription) {
        let field = Arc::new(field);
        self.by_name
            .insert(field.declared_name_shared(), Arc::clone(&field));
        self.by_slot
            .entry(slot)
            .or_default()
            .push(Arc::clone(&field));
        self.declared.push((order, field));
    }

    fn finish(mut self) -> Self {
        self.declared.sort_by_key(|(order, _)| *order);
        self
    }
}

/// Metadata for one message type.
pub struct TypeDescription {
    type_name: Arc<str>,
    file: Arc<FileDescription>,
    descriptor: Arc<DescriptorProto>,
    config: RegistryConfig,
    resolver: Option<Arc<dyn RuntimeTypeResolver>>,
    runtime_type: OnceLock<Option<RuntimeTypeHandle>>,
    fields: ArcSwapOption<FieldIndex>,
    build_lock: Mutex<()>,
    builds: AtomicUsize,
}

impl TypeDescription {
    pub fn new(
        type_name: impl Into<Arc<str>>,
        file: Arc<FileDescription>,
        descriptor: Arc<DescriptorProto>,
        config: RegistryConfig,
        resolver: Option<Arc<dyn RuntimeTypeResolver>>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            file,
            descriptor,
            config,
            resolver,
            runtime_type: OnceLock::new(),
            fields: ArcSwapOption::empty(),
            build_lock: Mutex::new(()),
            builds: AtomicUsize::new(0),
        }
    }

    /// Fully-qualified name of the type.
    pub fn name(&self) -> &str {
        &self.type_name
    }

    pub fn file(&self) -> &Arc<FileDescription> {
        &self.file
    }

    pub fn syntax(&self) -> Syntax {
        self.file.syntax()
    }

    pub fn descriptor(&self) -> &DescriptorProto {
        &self.descriptor
    }

    /// Whether this is a synthetic map-entry type.
    pub fn is_map_entry(&self) -> bool {
        is_map_entry(&self.descriptor)
    }

    /// Number of distinct field slots.
    ///
    /// Oneof alternatives sharing a slot count once.
    pub fn field_count(&self) -> usize {
        self.field_index().by_slot.len()
    }

    /// Field with exactly this declared name.
    pub fn field_by_name(&self, name: &str) -> Option<Arc<FieldDescription>> {
        self.field_index().by_name.get(name).cloned()
    }

    /// Fields occupying index slot `slot`, in build order.
    ///
    /// More than one entry only for oneof alternatives sharing a slot.
    pub fn fields_at(&self, slot: usize) -> Vec<Arc<FieldDescription>> {
        self.field_index()
            .by_slot
            .get(&slot)
            .cloned()
            .unwrap_or_default()
    }

    /// All fields in declaration order.
    pub fn fields(&self) -> Vec<Arc<FieldDescription>> {
        self.field_index()
            .declared
            .iter()
            .map(|(_, field)| Arc::clone(field))
            .collect()
    }

    /// Declared name of the field in index slot `slot`.
    ///
    /// A single occupant is returned without looking at `instance`. A shared
    /// oneof slot is resolved by probing `instance` for each alternative in
    /// declaration order; `None` when no alternative is set.
    pub fn field_name_at_index(&self, slot: usize, instance: &dyn Any) -> Option<Arc<str>> {
        let index = self.field_index();
        let candidates = index.by_slot.get(&slot)?;

        if let [only] = candidates.as_slice() {
            return Some(only.declared_name_shared());
        }

        let found = candidates
            .iter()
            .find(|field| field.is_set_in(instance).unwrap_or(false))
            .map(|field| field.declared_name_shared());
        if found.is_none() {
            log::trace!(
                "[type-desc] {}: no oneof alternative set at slot {}",
                self.type_name,
                slot
            );
        }
        found
    }

    /// Key and value fields of a map-entry type (slots 0 and 1).
    pub fn map_entry_fields(&self) -> Option<(Arc<FieldDescription>, Arc<FieldDescription>)> {
        if !self.is_map_entry() {
            return None;
        }
        let index = self.field_index();
        let key = index.by_slot.get(&MAP_ENTRY_KEY_POSITION)?.first()?;
        let value = index.by_slot.get(&MAP_ENTRY_VALUE_POSITION)?.first()?;
        Some((Arc::clone(key), Arc::clone(value)))
    }

    /// Runtime type backing this schema type, resolved once.
    ///
    /// `None` means the type is unknown at runtime; that is not a failure.
    pub fn reflect_type(&self) -> Option<RuntimeTypeHandle> {
        self.runtime_type
            .get_or_init(|| {
                let resolved = self
                    .resolver
                    .as_ref()
                    .and_then(|resolver| resolver.resolve(&self.type_name));
                if resolved.is_none() {
                    log::trace!("[type-desc] {}: no runtime type", self.type_name);
                }
                resolved
            })
            .clone()
    }

    /// Number of times the field index was built: 0 before first access,
    /// 1 afterwards.
    pub fn cache_builds(&self) -> usize {
        self.builds.load(Ordering::Acquire)
    }

    fn field_index(&self) -> Arc<FieldIndex> {
        if let Some(index) = self.fields.load_full() {
            return index;
        }

        let _guard = self.build_lock.lock();
        if let Some(index) = self.fields.load_full() {
            return index;
        }

        let index = Arc::new(self.build_index());
        self.fields.store(Some(Arc::clone(&index)));
        index
    }

    fn build_index(&self) -> FieldIndex {
        self.builds.fetch_add(1, Ordering::AcqRel);

        let runtime = self.reflect_type();
        let index = match runtime.as_deref().and_then(RuntimeType::layout) {
            Some(layout) => self.index_from_layout(layout),
            None => self.index_from_descriptor(),
        };
        log::debug!(
            "[type-desc] {}: indexed {} fields at {} slots (layout={})",
            self.type_name,
            index.by_name.len(),
            index.by_slot.len(),
            runtime.as_deref().is_some_and(|rt| rt.layout().is_some())
        );
        index
    }

    fn index_from_layout(&self, layout: &MessageLayout) -> FieldIndex {
        let declared: HashMap<&str, (usize, &FieldDescriptorProto)> = self
            .descriptor
            .field
            .iter()
            .enumerate()
            .map(|(order, field)| (field.name(), (order, field)))
            .collect();

        let mut index = FieldIndex::default();

        for (position, property) in layout.properties().iter().enumerate() {
            if self.config.is_reserved(&property.orig_name) {
                continue;
            }
            // Oneof slots have no declared field; their alternatives follow.
            let Some(&(order, descriptor)) = declared.get(&*property.orig_name) else {
                log::trace!(
                    "[type-desc] {}: layout property {} is not a declared field",
                    self.type_name,
                    property.orig_name
                );
                continue;
            };
            let seed = self.seed(
                descriptor,
                position,
                Arc::clone(&property.name),
                property.repeated,
                None,
            );
            if let Some(field) = seed {
                index.insert(order, position, field);
            }
        }

        let mut alternatives: Vec<(usize, &FieldDescriptorProto, &OneofAlternative)> = layout
            .oneofs()
            .iter()
            .filter(|alt| !self.config.is_reserved(&alt.orig_name))
            .filter_map(|alt| match declared.get(&*alt.orig_name) {
                Some(&(order, descriptor)) => Some((order, descriptor, alt)),
                None => {
                    log::warn!(
                        "[type-desc] {}: oneof alternative {} is not a declared field",
                        self.type_name,
                        alt.orig_name
                    );
                    None
                }
            })
            .collect();
        alternatives.sort_by_key(|(order, ..)| *order);

        for (order, descriptor, alt) in alternatives {
            let seed = self.seed(
                descriptor,
                alt.position,
                Arc::clone(&alt.accessor),
                false,
                Some(alt.clone()),
            );
            if let Some(field) = seed {
                index.insert(order, alt.position, field);
            }
        }

        index.finish()
    }

    // `position` is the field number; the slot is the index among kept fields,
    // so slots stay dense for sparsely numbered types.
    fn index_from_descriptor(&self) -> FieldIndex {
        let mut index = FieldIndex::default();

        for (order, descriptor) in self.descriptor.field.iter().enumerate() {
            if self.config.is_reserved(descriptor.name()) {
                continue;
            }
            let Ok(position) = usize::try_from(descriptor.number()) else {
                log::warn!(
                    "[type-desc] {}: field {} has invalid number {}",
                    self.type_name,
                    descriptor.name(),
                    descriptor.number()
                );
                continue;
            };
            let repeated = descriptor.label() == Label::Repeated;
            let accessor = Arc::from(camel_case(descriptor.name()));
            if let Some(field) = self.seed(descriptor, position, accessor, repeated, None) {
                let slot = index.declared.len();
                index.insert(order, slot, field);
            }
        }

        index.finish()
    }

    fn seed(
        &self,
        descriptor: &FieldDescriptorProto,
        position: usize,
        accessor_name: Arc<str>,
        repeated: bool,
        oneof: Option<OneofAlternative>,
    ) -> Option<FieldDescription> {
        let wire_type = match declared_wire_type(descriptor) {
            Ok(wire_type) => wire_type,
            Err(issue) => {
                log::warn!(
                    "[type-desc] {}: skipping field {} ({:?})",
                    self.type_name,
                    descriptor.name(),
                    issue
                );
                return None;
            }
        };
        Some(FieldDescription::from_seed(FieldSeed {
            descriptor,
            wire_type,
            position,
            accessor_name,
            repeated,
            oneof_group: oneof_group(&self.descriptor, descriptor),
            oneof,
            syntax: self.syntax(),
        }))
    }
}

impl fmt::Debug for TypeDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescription")
            .field("type_name", &self.type_name)
            .field("file", &self.file.name())
            .field("syntax", &self.syntax())
            .field("initialized", &self.fields.load().is_some())
            .finish_non_exhaustive()
    }
}
