// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! File-level grouping of schema types.

use crate::config::{EDITIONS_SYNTAX, PROTO3_SYNTAX};
use std::fmt;
use std::sync::Arc;

/// Schema syntax dialect of a file.
///
/// Governs presence rules: scalars only carry presence outside proto3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Syntax {
    /// `syntax = "proto2"` (also the default when unset).
    #[default]
    Proto2,
    /// `syntax = "proto3"`.
    Proto3,
    /// `edition = "..."` files.
    Editions,
}

impl Syntax {
    /// Parse the `FileDescriptorProto.syntax` string.
    pub fn from_descriptor(syntax: &str) -> Self {
        match syntax {
            PROTO3_SYNTAX => Self::Proto3,
            EDITIONS_SYNTAX => Self::Editions,
            _ => Self::Proto2,
        }
    }

    pub fn is_proto3(self) -> bool {
        self == Self::Proto3
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proto2 => write!(f, "proto2"),
            Self::Proto3 => write!(f, "proto3"),
            Self::Editions => write!(f, "editions"),
        }
    }
}

/// Metadata for one registered schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescription {
    name: Arc<str>,
    package: Arc<str>,
    syntax: Syntax,
    message_names: Vec<Arc<str>>,
    enum_names: Vec<Arc<str>>,
}

impl FileDescription {
    pub(crate) fn new(name: &str, package: &str, syntax: Syntax) -> Self {
        Self {
            name: Arc::from(name),
            package: Arc::from(package),
            syntax,
            message_names: Vec::new(),
            enum_names: Vec::new(),
        }
    }

    pub(crate) fn push_message(&mut self, qualified: Arc<str>) {
        self.message_names.push(qualified);
    }

    pub(crate) fn push_enum(&mut self, qualified: Arc<str>) {
        self.enum_names.push(qualified);
    }

    /// File path as recorded by the schema compiler (`acme/person.proto`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared package, empty when the file has none.
    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn syntax(&self) -> Syntax {
        self.syntax
    }

    /// Fully-qualified names of every message declared in the file,
    /// nested types included, in declaration order.
    pub fn message_names(&self) -> &[Arc<str>] {
        &self.message_names
    }

    /// Fully-qualified names of every enum declared in the file.
    pub fn enum_names(&self) -> &[Arc<str>] {
        &self.enum_names
    }
}
