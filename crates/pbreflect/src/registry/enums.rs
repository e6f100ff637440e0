// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Enum value metadata.

use std::sync::Arc;

/// One enum constant, addressable by `<enum type>.<VALUE>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValueDescription {
    name: Arc<str>,
    enum_name: Arc<str>,
    number: i32,
}

impl EnumValueDescription {
    pub(crate) fn new(name: Arc<str>, enum_name: Arc<str>, number: i32) -> Self {
        Self {
            name,
            enum_name,
            number,
        }
    }

    /// Fully-qualified value name (`acme.Person.Kind.ADMIN`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully-qualified name of the owning enum.
    pub fn enum_name(&self) -> &str {
        &self.enum_name
    }

    /// Numeric value; enums are integers to the type checker.
    pub fn number(&self) -> i32 {
        self.number
    }
}
