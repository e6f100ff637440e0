// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::semicolon_if_nothing_returned)] // Benchmark code formatting
#![allow(clippy::cast_possible_wrap)] // Field numbers from loop counters

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pbreflect::descriptor::{
    DescriptorProto, FieldDescriptorProto, FileDescriptorProto, Label, WireType,
};
use pbreflect::{
    LayoutProperty, MessageLayout, OneofAlternative, RuntimeType, RuntimeTypeTable, TypeRegistry,
};
use prost_types::OneofDescriptorProto;
use std::sync::Arc;

const WIDE_FIELDS: usize = 64;

struct Sample {
    choice: u8,
}

fn scalar(name: &str, number: i32) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        label: Some(Label::Optional as i32),
        r#type: Some(WireType::Int64 as i32),
        ..Default::default()
    }
}

/// `bench.Wide` with 64 scalars, `bench.Sample` with a 3-way oneof.
fn registry() -> TypeRegistry {
    let wide = DescriptorProto {
        name: Some("Wide".to_string()),
        field: (1..=WIDE_FIELDS)
            .map(|n| scalar(&format!("field_{n}"), n as i32))
            .collect(),
        ..Default::default()
    };
    let choices = ["first", "second", "third"];
    let sample = DescriptorProto {
        name: Some("Sample".to_string()),
        field: choices
            .iter()
            .zip(1..)
            .map(|(name, number)| FieldDescriptorProto {
                oneof_index: Some(0),
                ..scalar(name, number)
            })
            .collect(),
        oneof_decl: vec![OneofDescriptorProto {
            name: Some("choice".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    };

    let mut layout = MessageLayout::new().property(LayoutProperty::new("Choice", "choice"));
    for (tag, name) in (1u8..).zip(choices) {
        let wrapper = Arc::new(RuntimeType::new(format!("bench.Sample.{name}")));
        layout = layout.oneof(OneofAlternative::for_message::<Sample, _>(
            name,
            0,
            wrapper,
            name,
            move |s| s.choice == tag,
        ));
    }
    let runtime = RuntimeTypeTable::new();
    runtime.register(RuntimeType::of::<Sample>("bench.Sample").with_layout(layout));

    let mut registry = TypeRegistry::new().with_runtime_types(Arc::new(runtime));
    registry
        .register_file(FileDescriptorProto {
            name: Some("bench/lookup.proto".to_string()),
            package: Some("bench".to_string()),
            syntax: Some("proto3".to_string()),
            message_type: vec![wide, sample],
            ..Default::default()
        })
        .unwrap();
    registry
}

// ============================================================================
// Registry Benchmarks
// ============================================================================

/// Benchmark: describe_type on a memoized description
/// Target: < 100 ns
fn bench_describe_type_hit(c: &mut Criterion) {
    let registry = registry();
    registry.describe_type("bench.Wide").unwrap();

    c.bench_function("describe_type_hit", |b| {
        b.iter(|| registry.describe_type(black_box(".bench.Wide")))
    });
}

/// Benchmark: find_field_type (lookup + checked type translation)
fn bench_find_field_type(c: &mut Criterion) {
    let registry = registry();

    c.bench_function("find_field_type", |b| {
        b.iter(|| registry.find_field_type(black_box("bench.Wide"), black_box("field_32")))
    });
}

// ============================================================================
// Field Cache Benchmarks
// ============================================================================

/// Benchmark: field_by_name on a warm 64-field cache
/// Target: < 50 ns
fn bench_field_by_name(c: &mut Criterion) {
    let registry = registry();
    let wide = registry.describe_type("bench.Wide").unwrap();
    wide.field_count();

    c.bench_function("field_by_name_64", |b| {
        b.iter(|| wide.field_by_name(black_box("field_48")))
    });
}

/// Benchmark: field_name_at_index through a 3-way oneof slot
fn bench_oneof_probe(c: &mut Criterion) {
    let registry = registry();
    let sample_type = registry.describe_type("bench.Sample").unwrap();
    let instance = Sample { choice: 3 };

    c.bench_function("field_name_at_index_oneof", |b| {
        b.iter(|| sample_type.field_name_at_index(black_box(0), &instance))
    });
}

criterion_group!(registry_benches, bench_describe_type_hit, bench_find_field_type);

criterion_group!(field_benches, bench_field_by_name, bench_oneof_probe);

criterion_main!(registry_benches, field_benches);
