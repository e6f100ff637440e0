// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for schema registration.
//!
//! Lookups never fail: unknown names are `None`. Only the single-writer
//! registration phase reports errors, so configuration defects surface when
//! the schema is loaded rather than while an expression is checked.

use crate::descriptor::WireTypeIssue;
use std::fmt;

/// Registration failure modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A file with this name was already registered.
    DuplicateFile(String),
    /// A message or enum with this fully-qualified name already exists.
    DuplicateType(String),
    /// A field's wire type is missing or not a known descriptor type.
    InvalidFieldType {
        /// Fully-qualified message name.
        type_name: String,
        /// Declared field name.
        field: String,
        issue: WireTypeIssue,
    },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateFile(name) => write!(f, "File already registered: {}", name),
            Self::DuplicateType(name) => write!(f, "Type already registered: {}", name),
            Self::InvalidFieldType {
                type_name,
                field,
                issue: WireTypeIssue::Missing,
            } => write!(f, "Field {}.{} has no wire type", type_name, field),
            Self::InvalidFieldType {
                type_name,
                field,
                issue: WireTypeIssue::Unknown(raw),
            } => write!(f, "Field {}.{} has unknown wire type {}", type_name, field, raw),
        }
    }
}

impl std::error::Error for RegistryError {}
