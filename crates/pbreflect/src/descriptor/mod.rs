// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Read-only view over protobuf schema descriptors.
//!
//! Descriptors arrive as `prost-types` structs from whatever loader parsed the
//! schema. This module only reads them: name sanitization, syntax dialect,
//! declared wire types and per-file grouping.

mod file;
mod names;

pub use file::{FileDescription, Syntax};
pub use names::{camel_case, qualify, sanitize_proto_name};

pub use prost_types::field_descriptor_proto::{Label, Type as WireType};
pub use prost_types::{
    DescriptorProto, EnumDescriptorProto, FieldDescriptorProto, FileDescriptorProto,
};

/// Why a field's declared wire type could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireTypeIssue {
    /// `type` was not set on the descriptor.
    Missing,
    /// `type` holds a value outside `FieldDescriptorProto.Type`.
    Unknown(i32),
}

/// Decode the declared wire type of a field descriptor.
pub fn declared_wire_type(field: &FieldDescriptorProto) -> Result<WireType, WireTypeIssue> {
    let raw = field.r#type.ok_or(WireTypeIssue::Missing)?;
    WireType::try_from(raw).map_err(|_| WireTypeIssue::Unknown(raw))
}

/// Returns `true` when the descriptor is a synthetic map-entry type.
pub fn is_map_entry(message: &DescriptorProto) -> bool {
    message
        .options
        .as_ref()
        .is_some_and(|options| options.map_entry())
}

/// Name of the real oneof group a field belongs to.
///
/// proto3 `optional` fields live in a synthetic single-member oneof; those are
/// not reported.
pub fn oneof_group<'a>(message: &'a DescriptorProto, field: &FieldDescriptorProto) -> Option<&'a str> {
    if field.proto3_optional() {
        return None;
    }
    let index = usize::try_from(field.oneof_index?).ok()?;
    message.oneof_decl.get(index).map(|decl| decl.name())
}
