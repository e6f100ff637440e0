// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Reflection configuration - single source of truth.
//!
//! Centralizes the schema constants the reflection layer depends on and the
//! knobs a [`TypeRegistry`](crate::registry::TypeRegistry) is built with.
//!
//! # Architecture
//!
//! - **Level 1 (Static)**: constants fixed by protobuf code generation
//!   (reserved field prefix, syntax names, map-entry layout)
//! - **Level 2 (Registry)**: [`RegistryConfig`], chosen once per registry
//!
//! # Example
//!
//! ```
//! use pbreflect::config::RegistryConfig;
//!
//! let config = RegistryConfig::default()
//!     .with_reserved_prefix("XXX_")
//!     .with_strict_field_types(true);
//! assert!(config.strict_field_types());
//! ```

use std::sync::Arc;

// =======================================================================
// Code generation constants
// =======================================================================

/// Prefix of book-keeping fields emitted by protobuf code generators.
///
/// Fields whose declared name starts with this prefix never appear in a
/// type's field caches.
pub const RESERVED_FIELD_PREFIX: &str = "XXX_";

/// Value of `FileDescriptorProto.syntax` for proto3 files.
pub const PROTO3_SYNTAX: &str = "proto3";

/// Value of `FileDescriptorProto.syntax` for editions files.
pub const EDITIONS_SYNTAX: &str = "editions";

/// Separator between package, outer and nested type names.
pub const TYPE_NAME_SEPARATOR: char = '.';

// =======================================================================
// Map entries
// =======================================================================

/// Position of the key field inside a synthetic map-entry type.
pub const MAP_ENTRY_KEY_POSITION: usize = 0;

/// Position of the value field inside a synthetic map-entry type.
pub const MAP_ENTRY_VALUE_POSITION: usize = 1;

// =======================================================================
// Registry configuration
// =======================================================================

/// Per-registry configuration.
///
/// Cheap to clone: the prefix is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    reserved_prefix: Arc<str>,
    strict_field_types: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            reserved_prefix: Arc::from(RESERVED_FIELD_PREFIX),
            strict_field_types: true,
        }
    }
}

impl RegistryConfig {
    /// Override the book-keeping field prefix.
    #[must_use]
    pub fn with_reserved_prefix(mut self, prefix: impl Into<Arc<str>>) -> Self {
        self.reserved_prefix = prefix.into();
        self
    }

    /// Reject (`true`) or drop with a warning (`false`) fields whose wire
    /// type is missing or unknown at registration time.
    #[must_use]
    pub fn with_strict_field_types(mut self, strict: bool) -> Self {
        self.strict_field_types = strict;
        self
    }

    /// Book-keeping field prefix.
    #[must_use]
    pub fn reserved_prefix(&self) -> &Arc<str> {
        &self.reserved_prefix
    }

    /// Whether unknown field wire types abort registration.
    #[must_use]
    pub fn strict_field_types(&self) -> bool {
        self.strict_field_types
    }

    /// Returns `true` when `name` is a generated book-keeping field.
    ///
    /// An empty prefix disables the filter.
    #[must_use]
    pub fn is_reserved(&self, name: &str) -> bool {
        !self.reserved_prefix.is_empty() && name.starts_with(&*self.reserved_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RegistryConfig::default();
        assert_eq!(&**config.reserved_prefix(), RESERVED_FIELD_PREFIX);
        assert!(config.strict_field_types());
    }

    #[test]
    fn test_reserved_names() {
        let config = RegistryConfig::default();
        assert!(config.is_reserved("XXX_unrecognized"));
        assert!(!config.is_reserved("xxx_lowercase"));
        assert!(!config.is_reserved("name"));

        let custom = RegistryConfig::default().with_reserved_prefix("__");
        assert!(custom.is_reserved("__sizecache"));
        assert!(!custom.is_reserved("XXX_sizecache"));
    }

    #[test]
    fn test_empty_prefix_disables_filter() {
        let config = RegistryConfig::default().with_reserved_prefix("");
        assert!(!config.is_reserved("XXX_unrecognized"));
        assert!(!config.is_reserved(""));
    }
}
