// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # pbreflect - protobuf type reflection for expression checkers
//!
//! Builds queryable metadata for protobuf message types and derives from it
//! the type representation an expression-language type checker consumes.
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                    Type checker / evaluator                         |
//! |   field_count | field_by_name | field_name_at_index | checked_type |
//! +---------------------------------------------------------------------+
//! |                         TypeRegistry                                |
//! |   name -> TypeDescription (built on first resolution, memoized)    |
//! +---------------------------------------------------------------------+
//! |          TypeDescription / FieldDescription / CheckedType           |
//! |   field index published once (ArcSwap), oneof slot probing         |
//! +---------------------------------------------------------------------+
//! |   Descriptor view (prost-types)   |   Runtime types (layout, probes)|
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Modules Overview
//!
//! - [`registry`] - schema registration and type lookup (start here)
//! - [`types`] - type/field descriptions and the checked-type algebra
//! - [`runtime`] - runtime type handles and generated-layout metadata
//! - [`descriptor`] - read-only helpers over schema descriptors
//! - [`config`] - constants and registry configuration
//!
//! ## Logging
//!
//! Diagnostics go through the [`log`] facade; install any logger to see them.

/// Constants and registry configuration.
pub mod config;
/// Read-only view over protobuf schema descriptors.
pub mod descriptor;
/// Type registry (name -> type description).
pub mod registry;
/// Runtime type handles and generated-layout metadata.
pub mod runtime;
/// Type and field descriptions, checked-type translation.
pub mod types;

pub use config::RegistryConfig;
pub use descriptor::{FileDescription, Syntax};
pub use registry::{EnumValueDescription, LookupStats, RegistryError, TypeProvider, TypeRegistry};
pub use runtime::{
    LayoutProperty, MessageLayout, OneofAlternative, RuntimeType, RuntimeTypeHandle,
    RuntimeTypeResolver, RuntimeTypeTable,
};
pub use types::{
    CheckedType, FieldDescription, FieldKind, PrimitiveKind, TypeDescription, WellKnownKind,
};

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
