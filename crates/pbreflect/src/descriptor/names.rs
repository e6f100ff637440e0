// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type and field name helpers.

use crate::config::TYPE_NAME_SEPARATOR;

/// Strip schema-internal prefix characters from a descriptor type name.
///
/// Descriptors reference types by fully-qualified names with a leading dot
/// (`.google.protobuf.Timestamp`); everything above this layer uses the bare
/// form.
pub fn sanitize_proto_name(name: &str) -> &str {
    name.trim_start_matches(TYPE_NAME_SEPARATOR)
}

/// Join a scope (package or enclosing type) and a simple name.
pub fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}{TYPE_NAME_SEPARATOR}{name}")
    }
}

/// Derive the generated-struct accessor name of a snake_case field.
///
/// Underscores are dropped and the following character is upper-cased; a
/// leading underscore becomes `X` so the result stays a public identifier.
pub fn camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 1);
    let mut chars = name.chars().peekable();

    if chars.peek() == Some(&'_') {
        out.push('X');
        chars.next();
    }

    let mut upper_next = true;
    for c in chars {
        if c == '_' {
            upper_next = true;
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
        if c.is_ascii_digit() {
            upper_next = true;
        }
    }
    out
}
