// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Checked-type algebra consumed by the expression type checker.
//!
//! [`to_checked_type`] derives a [`CheckedType`] from a field:
//!
//! ```text
//! map field       -> Map(key, value)   (map-entry positions 0 and 1)
//! repeated field  -> List(element)
//! otherwise       -> primitive | well-known | wrapper | message
//! ```
//!
//! Enums are integers. Message fields named in the well-known table take the
//! checker-native representation instead of `Message(name)`.

use super::FieldDescription;
use crate::descriptor::WireType;
use crate::registry::TypeProvider;
use std::fmt;
use std::sync::Arc;

/// Primitive kinds of the checker's type algebra.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Bool,
    Int64,
    Uint64,
    Double,
    String,
    Bytes,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Int64 => "int",
            Self::Uint64 => "uint",
            Self::Double => "double",
            Self::String => "string",
            Self::Bytes => "bytes",
        };
        f.write_str(name)
    }
}

/// Schema types with a checker-native representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownKind {
    Any,
    Timestamp,
    Duration,
}

impl WellKnownKind {
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Any => "google.protobuf.Any",
            Self::Timestamp => "google.protobuf.Timestamp",
            Self::Duration => "google.protobuf.Duration",
        }
    }
}

/// Type representation handed to the type checker.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CheckedType {
    /// Dynamically typed value (`google.protobuf.Value`).
    Dyn,
    Primitive(PrimitiveKind),
    WellKnown(WellKnownKind),
    /// Message type by fully-qualified name.
    Message(Arc<str>),
    List(Box<CheckedType>),
    Map(Box<CheckedType>, Box<CheckedType>),
    /// Nullable primitive (`google.protobuf.*Value` wrappers).
    Wrapper(PrimitiveKind),
}

impl CheckedType {
    pub fn message(type_name: impl Into<Arc<str>>) -> Self {
        Self::Message(type_name.into())
    }

    pub fn list(elem: Self) -> Self {
        Self::List(Box::new(elem))
    }

    pub fn map(key: Self, value: Self) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }
}

impl fmt::Display for CheckedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dyn => f.write_str("dyn"),
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::WellKnown(kind) => f.write_str(kind.type_name()),
            Self::Message(name) => f.write_str(name),
            Self::List(elem) => write!(f, "list({elem})"),
            Self::Map(key, value) => write!(f, "map({key}, {value})"),
            Self::Wrapper(kind) => write!(f, "wrapper({kind})"),
        }
    }
}

/// Classification of a declared wire type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar(PrimitiveKind),
    Enum,
    /// Messages and groups.
    Message,
}

/// Fixed wire-type table.
///
/// The `match` is exhaustive over every wire type a descriptor can carry, so
/// a new wire type fails to compile here instead of at translation time.
pub fn field_kind(wire_type: WireType) -> FieldKind {
    match wire_type {
        WireType::Double | WireType::Float => FieldKind::Scalar(PrimitiveKind::Double),
        WireType::Int64
        | WireType::Int32
        | WireType::Sint32
        | WireType::Sint64
        | WireType::Sfixed32
        | WireType::Sfixed64 => FieldKind::Scalar(PrimitiveKind::Int64),
        WireType::Uint64 | WireType::Uint32 | WireType::Fixed32 | WireType::Fixed64 => {
            FieldKind::Scalar(PrimitiveKind::Uint64)
        }
        WireType::Bool => FieldKind::Scalar(PrimitiveKind::Bool),
        WireType::String => FieldKind::Scalar(PrimitiveKind::String),
        WireType::Bytes => FieldKind::Scalar(PrimitiveKind::Bytes),
        WireType::Enum => FieldKind::Enum,
        WireType::Message | WireType::Group => FieldKind::Message,
    }
}

/// Well-known type overrides, keyed by fully-qualified message name.
pub fn well_known(type_name: &str) -> Option<CheckedType> {
    let checked = match type_name {
        "google.protobuf.Any" => CheckedType::WellKnown(WellKnownKind::Any),
        "google.protobuf.Duration" => CheckedType::WellKnown(WellKnownKind::Duration),
        "google.protobuf.Timestamp" => CheckedType::WellKnown(WellKnownKind::Timestamp),
        "google.protobuf.BoolValue" => CheckedType::Wrapper(PrimitiveKind::Bool),
        "google.protobuf.BytesValue" => CheckedType::Wrapper(PrimitiveKind::Bytes),
        "google.protobuf.DoubleValue" | "google.protobuf.FloatValue" => {
            CheckedType::Wrapper(PrimitiveKind::Double)
        }
        "google.protobuf.Int32Value" | "google.protobuf.Int64Value" => {
            CheckedType::Wrapper(PrimitiveKind::Int64)
        }
        "google.protobuf.UInt32Value" | "google.protobuf.UInt64Value" => {
            CheckedType::Wrapper(PrimitiveKind::Uint64)
        }
        "google.protobuf.StringValue" => CheckedType::Wrapper(PrimitiveKind::String),
        "google.protobuf.Value" => CheckedType::Dyn,
        "google.protobuf.ListValue" => CheckedType::list(CheckedType::Dyn),
        "google.protobuf.Struct" => {
            CheckedType::map(CheckedType::Primitive(PrimitiveKind::String), CheckedType::Dyn)
        }
        _ => return None,
    };
    Some(checked)
}

/// Checked type of a field, including list and map composition.
pub fn to_checked_type(field: &FieldDescription, types: &dyn TypeProvider) -> CheckedType {
    if let Some(entry) = field.map_entry_type(types) {
        if let Some((key, value)) = entry.map_entry_fields() {
            return CheckedType::map(to_primitive_or_message(&key), to_primitive_or_message(&value));
        }
        log::warn!(
            "[checked] map entry {} of field {} lacks key/value fields",
            entry.name(),
            field.declared_name()
        );
    }
    if field.is_repeated() {
        return CheckedType::list(to_primitive_or_message(field));
    }
    to_primitive_or_message(field)
}

/// Element-level checked type; ignores the repeated flag.
pub fn to_primitive_or_message(field: &FieldDescription) -> CheckedType {
    match field.kind() {
        FieldKind::Message => {
            well_known(field.type_name()).unwrap_or_else(|| CheckedType::message(field.type_name()))
        }
        FieldKind::Enum => CheckedType::Primitive(PrimitiveKind::Int64),
        FieldKind::Scalar(kind) => CheckedType::Primitive(kind),
    }
}
