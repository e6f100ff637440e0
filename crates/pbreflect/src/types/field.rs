// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-field metadata.

use super::checked::{field_kind, to_checked_type, CheckedType, FieldKind};
use super::TypeDescription;
use crate::descriptor::{sanitize_proto_name, FieldDescriptorProto, Syntax, WireType};
use crate::registry::TypeProvider;
use crate::runtime::{OneofAlternative, RuntimeTypeHandle};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Inputs for one [`FieldDescription`], assembled during a type's cache build.
pub(crate) struct FieldSeed<'a> {
    pub descriptor: &'a FieldDescriptorProto,
    pub wire_type: WireType,
    pub position: usize,
    pub accessor_name: Arc<str>,
    pub repeated: bool,
    pub oneof_group: Option<&'a str>,
    pub oneof: Option<OneofAlternative>,
    pub syntax: Syntax,
}

/// Metadata for a single field declared within a message type.
///
/// Unifies the declared descriptor with the field's position in the physical
/// layout and its oneof/repeated classification. Immutable once built.
#[derive(Debug, Clone)]
pub struct FieldDescription {
    declared_name: Arc<str>,
    accessor_name: Arc<str>,
    number: i32,
    position: usize,
    wire_type: WireType,
    type_name: Arc<str>,
    repeated: bool,
    oneof_group: Option<Arc<str>>,
    oneof: Option<OneofAlternative>,
    syntax: Syntax,
}

impl FieldDescription {
    pub(crate) fn from_seed(seed: FieldSeed<'_>) -> Self {
        Self {
            declared_name: Arc::from(seed.descriptor.name()),
            accessor_name: seed.accessor_name,
            number: seed.descriptor.number(),
            position: seed.position,
            wire_type: seed.wire_type,
            type_name: Arc::from(sanitize_proto_name(seed.descriptor.type_name())),
            repeated: seed.repeated,
            oneof_group: seed.oneof_group.map(Arc::from),
            oneof: seed.oneof,
            syntax: seed.syntax,
        }
    }

    /// Schema name of the field (`home_address`), as written in expressions.
    pub fn declared_name(&self) -> &str {
        &self.declared_name
    }

    pub(crate) fn declared_name_shared(&self) -> Arc<str> {
        Arc::clone(&self.declared_name)
    }

    /// Layout-visible name on the generated struct (`HomeAddress`).
    pub fn accessor_name(&self) -> &str {
        &self.accessor_name
    }

    /// Field number from the schema.
    pub fn number(&self) -> i32 {
        self.number
    }

    /// Index into the physical field layout.
    ///
    /// Layout index when generated-layout metadata exists, otherwise the
    /// declared field number.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn wire_type(&self) -> WireType {
        self.wire_type
    }

    pub fn kind(&self) -> FieldKind {
        field_kind(self.wire_type)
    }

    /// Declared type name of message and enum fields, without the leading
    /// dot. Empty for scalars.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn syntax(&self) -> Syntax {
        self.syntax
    }

    pub fn is_enum(&self) -> bool {
        self.kind() == FieldKind::Enum
    }

    pub fn is_message(&self) -> bool {
        self.kind() == FieldKind::Message
    }

    /// Also true for map fields; see [`FieldDescription::is_map`].
    pub fn is_repeated(&self) -> bool {
        self.repeated
    }

    /// True for oneof alternatives stored in a shared layout slot.
    ///
    /// Fields indexed without layout metadata are never reported as oneof,
    /// even when the descriptor declares a group; see
    /// [`FieldDescription::oneof_group`].
    pub fn is_oneof(&self) -> bool {
        self.oneof.is_some()
    }

    /// Name of the oneof group declaring this field, on either build path.
    pub fn oneof_group(&self) -> Option<&str> {
        self.oneof_group.as_deref()
    }

    /// Layout alternative backing this field when it lives in a shared slot.
    pub fn oneof_alternative(&self) -> Option<&OneofAlternative> {
        self.oneof.as_ref()
    }

    /// Runtime type of the oneof alternative's wrapper.
    pub fn oneof_type(&self) -> Option<&RuntimeTypeHandle> {
        self.oneof.as_ref().map(|alt| &alt.runtime_type)
    }

    /// Whether `instance` holds this oneof alternative.
    ///
    /// `None` when the field has no layout alternative to probe.
    pub fn is_set_in(&self, instance: &dyn Any) -> Option<bool> {
        self.oneof.as_ref().map(|alt| alt.is_set(instance))
    }

    /// Whether "explicitly set" is distinguishable from "holds the default".
    pub fn supports_presence(&self) -> bool {
        !self.is_repeated() && (self.is_message() || !self.syntax.is_proto3())
    }

    /// True for repeated message fields whose target type is a map entry.
    ///
    /// Resolution failures count as "not a map".
    pub fn is_map(&self, types: &dyn TypeProvider) -> bool {
        self.map_entry_type(types).is_some()
    }

    pub(crate) fn map_entry_type(&self, types: &dyn TypeProvider) -> Option<Arc<TypeDescription>> {
        if !self.is_repeated() || !self.is_message() {
            return None;
        }
        types
            .describe_type(self.type_name())
            .filter(|entry| entry.is_map_entry())
    }

    /// Type-check-time representation of the field.
    pub fn checked_type(&self, types: &dyn TypeProvider) -> CheckedType {
        to_checked_type(self, types)
    }
}

impl fmt::Display for FieldDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_name = if self.type_name.is_empty() {
            format!("{:?}", self.wire_type).to_lowercase()
        } else {
            self.type_name.to_string()
        };
        write!(
            f,
            "{} {} = {} `oneof={}`",
            type_name,
            self.declared_name,
            self.position,
            self.is_oneof()
        )
    }
}
