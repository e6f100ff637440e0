// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//! Tests for TypeRegistry.

use super::*;
use crate::descriptor::{FieldDescriptorProto, Label, WireType, WireTypeIssue};
use crate::types::{CheckedType, PrimitiveKind};
use prost_types::{EnumValueDescriptorProto, MessageOptions};
use std::sync::Barrier;
use std::thread;

fn field(name: &str, number: i32, wire_type: WireType) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(wire_type as i32),
        ..Default::default()
    }
}

fn message(name: &str, fields: Vec<FieldDescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: fields,
        ..Default::default()
    }
}

fn status_enum() -> EnumDescriptorProto {
    EnumDescriptorProto {
        name: Some("Status".to_string()),
        value: vec![
            EnumValueDescriptorProto {
                name: Some("ACTIVE".to_string()),
                number: Some(0),
                ..Default::default()
            },
            EnumValueDescriptorProto {
                name: Some("SUSPENDED".to_string()),
                number: Some(3),
                ..Default::default()
            },
        ],
        ..Default::default()
    }
}

fn account_file() -> FileDescriptorProto {
    let mut account = message(
        "Account",
        vec![
            field("id", 1, WireType::Uint64),
            FieldDescriptorProto {
                type_name: Some(".bank.Account.Owner".to_string()),
                ..field("owner", 2, WireType::Message)
            },
            FieldDescriptorProto {
                type_name: Some(".bank.Status".to_string()),
                ..field("status", 3, WireType::Enum)
            },
            FieldDescriptorProto {
                type_name: Some(".bank.Account.BalancesEntry".to_string()),
                label: Some(Label::Repeated as i32),
                ..field("balances", 4, WireType::Message)
            },
        ],
    );
    let mut balances = message(
        "BalancesEntry",
        vec![
            field("key", 1, WireType::String),
            field("value", 2, WireType::Double),
        ],
    );
    balances.options = Some(MessageOptions {
        map_entry: Some(true),
        ..Default::default()
    });
    let mut owner = message("Owner", vec![field("name", 1, WireType::String)]);
    owner.enum_type.push(EnumDescriptorProto {
        name: Some("Role".to_string()),
        ..Default::default()
    });
    account.nested_type = vec![owner, balances];

    FileDescriptorProto {
        name: Some("bank/account.proto".to_string()),
        package: Some("bank".to_string()),
        syntax: Some("proto3".to_string()),
        message_type: vec![account],
        enum_type: vec![status_enum()],
        ..Default::default()
    }
}

fn loaded() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register_file(account_file()).expect("register account");
    registry
}

#[test]
fn registers_nested_types_with_qualified_names() {
    let registry = loaded();

    let mut names: Vec<&str> = registry.type_names().collect();
    names.sort_unstable();
    assert_eq!(
        names,
        ["bank.Account", "bank.Account.BalancesEntry", "bank.Account.Owner"]
    );

    let file = registry
        .describe_file("bank/account.proto")
        .expect("registered file");
    assert_eq!(file.package(), "bank");
    assert_eq!(file.syntax(), Syntax::Proto3);
    assert_eq!(file.message_names().len(), 3);
    let enums: Vec<&str> = file.enum_names().iter().map(|n| &**n).collect();
    assert_eq!(enums, ["bank.Account.Owner.Role", "bank.Status"]);
}

#[test]
fn describe_type_accepts_leading_dot() {
    let registry = loaded();

    let plain = registry.describe_type("bank.Account").expect("plain name");
    let dotted = registry.describe_type(".bank.Account").expect("dotted name");
    assert!(Arc::ptr_eq(&plain, &dotted));
    assert!(registry.contains_type(".bank.Account.Owner"));
}

#[test]
fn unknown_type_is_absent() {
    let registry = loaded();

    assert!(registry.describe_type("bank.Missing").is_none());
    assert!(registry.describe_type("").is_none());
    assert!(registry.describe_file("bank/missing.proto").is_none());
    assert_eq!(registry.stats().unknown, 2);
}

#[test]
fn descriptions_are_built_once_per_name() {
    let registry = loaded();

    let first = registry.describe_type("bank.Account").expect("registered");
    let second = registry.describe_type("bank.Account").expect("registered");
    assert!(Arc::ptr_eq(&first, &second));

    let stats = registry.stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
}

#[test]
fn find_field_type_resolves_through_registry() {
    let registry = loaded();

    assert_eq!(
        registry.find_field_type("bank.Account", "id"),
        Some(CheckedType::Primitive(PrimitiveKind::Uint64))
    );
    assert_eq!(
        registry.find_field_type("bank.Account", "owner"),
        Some(CheckedType::message("bank.Account.Owner"))
    );
    assert_eq!(
        registry.find_field_type("bank.Account", "status"),
        Some(CheckedType::Primitive(PrimitiveKind::Int64))
    );
    assert_eq!(
        registry.find_field_type("bank.Account", "balances"),
        Some(CheckedType::map(
            CheckedType::Primitive(PrimitiveKind::String),
            CheckedType::Primitive(PrimitiveKind::Double)
        ))
    );
    assert_eq!(registry.find_field_type("bank.Account", "missing"), None);
    assert_eq!(registry.find_field_type("bank.Missing", "id"), None);
}

#[test]
fn enum_values_are_addressable() {
    let registry = loaded();

    let suspended = registry
        .describe_enum_value("bank.Status.SUSPENDED")
        .expect("enum value");
    assert_eq!(suspended.number(), 3);
    assert_eq!(suspended.enum_name(), "bank.Status");
    assert_eq!(suspended.name(), "bank.Status.SUSPENDED");

    assert!(registry.describe_enum_value(".bank.Status.ACTIVE").is_some());
    assert!(registry.describe_enum_value("bank.Status.CLOSED").is_none());
}

#[test]
fn duplicate_file_is_rejected() {
    let mut registry = loaded();
    let err = registry
        .register_file(account_file())
        .expect_err("second registration");
    assert_eq!(err, RegistryError::DuplicateFile("bank/account.proto".to_string()));
}

#[test]
fn duplicate_type_rejects_whole_file() {
    let mut registry = loaded();

    let clash = FileDescriptorProto {
        name: Some("bank/clash.proto".to_string()),
        package: Some("bank".to_string()),
        message_type: vec![
            message("Ledger", vec![field("id", 1, WireType::Uint64)]),
            message("Account", vec![field("id", 1, WireType::Uint64)]),
        ],
        ..Default::default()
    };
    let err = registry.register_file(clash).expect_err("clashing type");
    assert_eq!(err, RegistryError::DuplicateType("bank.Account".to_string()));

    // Nothing from the rejected file leaked in.
    assert!(!registry.contains_type("bank.Ledger"));
    assert!(registry.describe_file("bank/clash.proto").is_none());
}

#[test]
fn duplicate_enum_name_is_rejected() {
    let mut registry = loaded();

    let clash = FileDescriptorProto {
        name: Some("bank/status.proto".to_string()),
        package: Some("bank".to_string()),
        enum_type: vec![status_enum()],
        ..Default::default()
    };
    let err = registry.register_file(clash).expect_err("clashing enum");
    assert_eq!(err, RegistryError::DuplicateType("bank.Status".to_string()));
}

#[test]
fn unknown_wire_type_fails_fast() {
    let mut registry = TypeRegistry::new();

    let mut broken = field("weird", 2, WireType::String);
    broken.r#type = Some(77);
    let file = FileDescriptorProto {
        name: Some("bank/broken.proto".to_string()),
        package: Some("bank".to_string()),
        message_type: vec![message("Broken", vec![field("id", 1, WireType::Uint64), broken])],
        ..Default::default()
    };

    let err = registry.register_file(file).expect_err("unknown wire type");
    assert_eq!(
        err,
        RegistryError::InvalidFieldType {
            type_name: "bank.Broken".to_string(),
            field: "weird".to_string(),
            issue: WireTypeIssue::Unknown(77),
        }
    );
    assert!(!registry.contains_type("bank.Broken"));
}

#[test]
fn lenient_registry_drops_unknown_wire_types() {
    let config = RegistryConfig::default().with_strict_field_types(false);
    let mut registry = TypeRegistry::with_config(config);

    let mut missing = field("untyped", 2, WireType::String);
    missing.r#type = None;
    let file = FileDescriptorProto {
        name: Some("bank/lenient.proto".to_string()),
        package: Some("bank".to_string()),
        message_type: vec![message("Lenient", vec![field("id", 1, WireType::Uint64), missing])],
        ..Default::default()
    };
    registry.register_file(file).expect("lenient registration");

    let lenient = registry.describe_type("bank.Lenient").expect("registered");
    assert_eq!(lenient.field_count(), 1);
    assert!(lenient.field_by_name("untyped").is_none());
}

#[test]
fn custom_reserved_prefix_reaches_descriptions() {
    let config = RegistryConfig::default().with_reserved_prefix("internal_");
    let mut registry = TypeRegistry::with_config(config);

    let file = FileDescriptorProto {
        name: Some("bank/internal.proto".to_string()),
        package: Some("bank".to_string()),
        message_type: vec![message(
            "Audit",
            vec![
                field("id", 1, WireType::Uint64),
                field("internal_seq", 2, WireType::Uint64),
                field("XXX_kept", 3, WireType::Bool),
            ],
        )],
        ..Default::default()
    };
    registry.register_file(file).expect("register audit");

    let audit = registry.describe_type("bank.Audit").expect("registered");
    assert!(audit.field_by_name("internal_seq").is_none());
    assert!(audit.field_by_name("XXX_kept").is_some());
    assert_eq!(audit.field_count(), 2);
}

#[test]
fn racing_first_resolutions_count_one_miss() {
    const THREADS: usize = 12;

    for _ in 0..8 {
        let registry = Arc::new(loaded());
        let barrier = Arc::new(Barrier::new(THREADS));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    if fastrand::bool() {
                        thread::yield_now();
                    }
                    registry.describe_type("bank.Account").expect("registered")
                })
            })
            .collect();

        let described: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().expect("thread should succeed"))
            .collect();
        assert!(described.iter().all(|d| Arc::ptr_eq(d, &described[0])));

        let stats = registry.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, THREADS as u64 - 1);
        assert_eq!(stats.unknown, 0);
    }
}

#[test]
fn stats_are_readable_while_lookups_run() {
    let registry = Arc::new(loaded());

    let reader = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            let mut last = 0;
            for _ in 0..500 {
                let stats = registry.stats();
                let total = stats.hits + stats.misses + stats.unknown;
                assert!(total >= last);
                last = total;
            }
        })
    };
    for i in 0..500 {
        let name = if i % 5 == 0 { "bank.Missing" } else { "bank.Account.Owner" };
        let _ = registry.describe_type(name);
    }
    reader.join().expect("reader should succeed");

    let stats = registry.stats();
    assert_eq!(stats.hits + stats.misses + stats.unknown, 500);
    assert_eq!(stats.unknown, 100);
    assert_eq!(stats.misses, 1);
}
