// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type and field descriptions, and their checked-type translation.
//!
//! - [`TypeDescription`]: one message type; lazily indexes its fields by name
//!   and by layout position.
//! - [`FieldDescription`]: one field; predicates, presence rules, map
//!   detection.
//! - [`CheckedType`]: the representation handed to the expression checker.

mod checked;
mod description;
mod field;

pub use checked::{
    field_kind, to_checked_type, to_primitive_or_message, well_known, CheckedType, FieldKind,
    PrimitiveKind, WellKnownKind,
};
pub use description::TypeDescription;
pub use field::FieldDescription;
