// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type registry: fully-qualified name -> [`TypeDescription`].
//!
//! # Lifecycle
//!
//! ```text
//! registration (single writer, &mut self)
//!   register_file() x N   -> descriptors, files, enum values
//! sharing (read-only, Arc<TypeRegistry>)
//!   describe_type()       -> TypeDescription built on first resolution,
//!                            memoized for the registry's lifetime
//! ```
//!
//! Registration validates every field's wire type up front, so translating a
//! field to a [`CheckedType`] later never meets an unmapped type.
//!
//! # Example
//!
//! ```
//! use pbreflect::descriptor::{DescriptorProto, FieldDescriptorProto, FileDescriptorProto, WireType};
//! use pbreflect::registry::TypeRegistry;
//!
//! let file = FileDescriptorProto {
//!     name: Some("acme/person.proto".to_string()),
//!     package: Some("acme".to_string()),
//!     syntax: Some("proto3".to_string()),
//!     message_type: vec![DescriptorProto {
//!         name: Some("Person".to_string()),
//!         field: vec![FieldDescriptorProto {
//!             name: Some("name".to_string()),
//!             number: Some(1),
//!             r#type: Some(WireType::String as i32),
//!             ..Default::default()
//!         }],
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//!
//! let mut registry = TypeRegistry::new();
//! registry.register_file(file).unwrap();
//!
//! let person = registry.describe_type("acme.Person").unwrap();
//! assert_eq!(person.field_count(), 1);
//! assert_eq!(registry.find_field_type("acme.Person", "name").unwrap().to_string(), "string");
//! ```

mod enums;
mod errors;

pub use enums::EnumValueDescription;
pub use errors::RegistryError;

use crate::config::RegistryConfig;
use crate::descriptor::{
    declared_wire_type, qualify, sanitize_proto_name, DescriptorProto, EnumDescriptorProto,
    FileDescription, FileDescriptorProto, Syntax,
};
use crate::runtime::RuntimeTypeResolver;
use crate::types::{CheckedType, TypeDescription};
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Resolves a type name to its [`TypeDescription`].
///
/// Implemented by [`TypeRegistry`]; tests can supply their own.
pub trait TypeProvider {
    /// Returns `None` for unknown names.
    fn describe_type(&self, type_name: &str) -> Option<Arc<TypeDescription>>;
}

/// Lookup statistics (point-in-time snapshot).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LookupStats {
    /// Resolutions served by an already built description.
    pub hits: u64,
    /// Resolutions that built a new description.
    pub misses: u64,
    /// Resolutions of unregistered names.
    pub unknown: u64,
}

/// Lock-free lookup counters (Relaxed ordering).
#[derive(Debug, Default)]
struct LookupCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    unknown: AtomicU64,
}

impl LookupCounters {
    fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    fn record_unknown(&self) {
        self.unknown.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> LookupStats {
        LookupStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            unknown: self.unknown.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone)]
struct MessageEntry {
    file: Arc<FileDescription>,
    descriptor: Arc<DescriptorProto>,
}

/// Messages and enums collected from one file before it is committed.
#[derive(Default)]
struct StagedFile {
    messages: Vec<(Arc<str>, DescriptorProto)>,
    enums: Vec<(Arc<str>, EnumDescriptorProto)>,
}

/// Process-wide schema registry.
pub struct TypeRegistry {
    config: RegistryConfig,
    resolver: Option<Arc<dyn RuntimeTypeResolver>>,
    files: HashMap<Arc<str>, Arc<FileDescription>>,
    messages: HashMap<Arc<str>, MessageEntry>,
    enum_values: HashMap<Arc<str>, EnumValueDescription>,
    described: DashMap<Arc<str>, Arc<TypeDescription>>,
    stats: LookupCounters,
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::with_config(RegistryConfig::default())
    }
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config,
            resolver: None,
            files: HashMap::new(),
            messages: HashMap::new(),
            enum_values: HashMap::new(),
            described: DashMap::new(),
            stats: LookupCounters::default(),
        }
    }

    /// Attach the resolver used to find runtime types (and their generated
    /// layouts). Without one every type takes the descriptor-only path.
    #[must_use]
    pub fn with_runtime_types(mut self, resolver: Arc<dyn RuntimeTypeResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ===================================================================
    // Registration (single writer)
    // ===================================================================

    /// Register every message and enum declared in `file`.
    ///
    /// Either the whole file is registered or nothing is.
    pub fn register_file(
        &mut self,
        file: FileDescriptorProto,
    ) -> Result<Arc<FileDescription>, RegistryError> {
        if self.files.contains_key(file.name()) {
            return Err(RegistryError::DuplicateFile(file.name().to_string()));
        }

        let mut staged = StagedFile::default();
        for message in &file.message_type {
            self.stage_message(file.package(), message, &mut staged)?;
        }
        for enum_type in &file.enum_type {
            staged
                .enums
                .push((Arc::from(qualify(file.package(), enum_type.name())), enum_type.clone()));
        }
        self.check_unique(&staged)?;

        let syntax = Syntax::from_descriptor(file.syntax());
        let mut description = FileDescription::new(file.name(), file.package(), syntax);
        for (name, _) in &staged.messages {
            description.push_message(Arc::clone(name));
        }
        for (name, _) in &staged.enums {
            description.push_enum(Arc::clone(name));
        }
        let description = Arc::new(description);

        for (name, descriptor) in staged.messages {
            let entry = MessageEntry {
                file: Arc::clone(&description),
                descriptor: Arc::new(descriptor),
            };
            self.messages.insert(name, entry);
        }
        for (enum_name, enum_type) in staged.enums {
            for value in &enum_type.value {
                let name: Arc<str> = Arc::from(qualify(&enum_name, value.name()));
                let desc = EnumValueDescription::new(
                    Arc::clone(&name),
                    Arc::clone(&enum_name),
                    value.number(),
                );
                self.enum_values.insert(name, desc);
            }
        }

        log::debug!(
            "[registry] registered {} ({}): {} messages, {} enums",
            description.name(),
            description.syntax(),
            description.message_names().len(),
            description.enum_names().len()
        );
        self.files
            .insert(Arc::from(description.name()), Arc::clone(&description));
        Ok(description)
    }

    fn stage_message(
        &self,
        scope: &str,
        message: &DescriptorProto,
        staged: &mut StagedFile,
    ) -> Result<(), RegistryError> {
        let qualified = qualify(scope, message.name());
        let mut descriptor = message.clone();
        self.check_field_types(&qualified, &mut descriptor)?;

        for nested in &message.nested_type {
            self.stage_message(&qualified, nested, staged)?;
        }
        for enum_type in &message.enum_type {
            staged
                .enums
                .push((Arc::from(qualify(&qualified, enum_type.name())), enum_type.clone()));
        }
        staged.messages.push((Arc::from(qualified), descriptor));
        Ok(())
    }

    fn check_field_types(
        &self,
        type_name: &str,
        descriptor: &mut DescriptorProto,
    ) -> Result<(), RegistryError> {
        if self.config.strict_field_types() {
            for field in &descriptor.field {
                declared_wire_type(field).map_err(|issue| RegistryError::InvalidFieldType {
                    type_name: type_name.to_string(),
                    field: field.name().to_string(),
                    issue,
                })?;
            }
            return Ok(());
        }

        descriptor.field.retain(|field| match declared_wire_type(field) {
            Ok(_) => true,
            Err(issue) => {
                log::warn!(
                    "[registry] dropping field {}.{} ({:?})",
                    type_name,
                    field.name(),
                    issue
                );
                false
            }
        });
        Ok(())
    }

    fn check_unique(&self, staged: &StagedFile) -> Result<(), RegistryError> {
        let mut seen = HashSet::new();
        let names = staged
            .messages
            .iter()
            .map(|(name, _)| name)
            .chain(staged.enums.iter().map(|(name, _)| name));
        for name in names {
            let exists = self.messages.contains_key(name)
                || self.files.values().any(|file| file.enum_names().contains(name));
            if exists || !seen.insert(Arc::clone(name)) {
                return Err(RegistryError::DuplicateType(name.to_string()));
            }
        }
        Ok(())
    }

    // ===================================================================
    // Lookups (read-only, concurrent)
    // ===================================================================

    /// Description of a message type, built on first resolution.
    ///
    /// Accepts names with or without the leading dot.
    pub fn describe_type(&self, type_name: &str) -> Option<Arc<TypeDescription>> {
        let type_name = sanitize_proto_name(type_name);

        let hit = self
            .described
            .get(type_name)
            .map(|entry| Arc::clone(entry.value()));
        if let Some(description) = hit {
            self.stats.record_hit();
            return Some(description);
        }

        let Some((name, entry)) = self.messages.get_key_value(type_name) else {
            self.stats.record_unknown();
            log::trace!("[registry] unknown type {}", type_name);
            return None;
        };

        // Racing first resolutions share one entry; only the builder counts a miss.
        let mut built = false;
        let description = self
            .described
            .entry(Arc::clone(name))
            .or_insert_with(|| {
                built = true;
                Arc::new(TypeDescription::new(
                    Arc::clone(name),
                    Arc::clone(&entry.file),
                    Arc::clone(&entry.descriptor),
                    self.config.clone(),
                    self.resolver.clone(),
                ))
            })
            .value()
            .clone();
        if built {
            self.stats.record_miss();
        } else {
            self.stats.record_hit();
        }
        Some(description)
    }

    /// Checked type of `field` on message `type_name`.
    pub fn find_field_type(&self, type_name: &str, field: &str) -> Option<CheckedType> {
        let description = self.describe_type(type_name)?;
        let field = description.field_by_name(field)?;
        Some(field.checked_type(self))
    }

    pub fn describe_file(&self, file_name: &str) -> Option<Arc<FileDescription>> {
        self.files.get(file_name).cloned()
    }

    /// Enum constant by fully-qualified value name (`acme.Person.Kind.ADMIN`).
    pub fn describe_enum_value(&self, value_name: &str) -> Option<&EnumValueDescription> {
        self.enum_values.get(sanitize_proto_name(value_name))
    }

    pub fn contains_type(&self, type_name: &str) -> bool {
        self.messages.contains_key(sanitize_proto_name(type_name))
    }

    /// Every registered message name, in no particular order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(|name| &**name)
    }

    /// Snapshot of the lookup counters.
    #[must_use]
    pub fn stats(&self) -> LookupStats {
        self.stats.snapshot()
    }
}

impl TypeProvider for TypeRegistry {
    fn describe_type(&self, type_name: &str) -> Option<Arc<TypeDescription>> {
        TypeRegistry::describe_type(self, type_name)
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("files", &self.files.len())
            .field("messages", &self.messages.len())
            .field("described", &self.described.len())
            .field("runtime_types", &self.resolver.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
