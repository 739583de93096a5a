// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Bench code readability over pedantic
#![allow(clippy::cast_possible_truncation)] // Test parameters
#![allow(clippy::missing_panics_doc)] // Benches panic on failure

//! Encode/decode throughput for catalogue schemas.
//!
//! - fixed-width tuples (`session-id`)
//! - count-prefixed sets (`role-set`)
//! - tagged unions with nested payloads (`count-or-parser-errors2`)
//! - read-until-exhausted batches (`event-batch`)
//! - cold vs warm resolution

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use wirecodec::{get_codec, spec::catalogue, Resolver, Value};

// ============================================================================
// Benchmark 1: fixed-width tuple
// ============================================================================

fn bench_session_id(c: &mut Criterion) {
    let codec = get_codec("session-id").unwrap();
    let values = [Value::Int64(7), Value::Int64(42)];
    let bytes = codec.to_bytes(&values).unwrap();

    let mut group = c.benchmark_group("session_id");
    group.throughput(Throughput::Bytes(bytes.len() as u64));
    group.bench_function("encode", |b| {
        b.iter(|| black_box(codec.to_bytes(black_box(&values)).unwrap()))
    });
    group.bench_function("decode", |b| {
        b.iter(|| black_box(codec.decode(black_box(&bytes)).unwrap()))
    });
    group.finish();
}

// ============================================================================
// Benchmark 2: sets and choices
// ============================================================================

fn bench_role_set(c: &mut Criterion) {
    let codec = get_codec("role-set").unwrap();
    let roles = [Value::Set((0..64).map(|i| Value::String(format!("ROLE_{}", i))).collect())];
    let bytes = codec.to_bytes(&roles).unwrap();

    let mut group = c.benchmark_group("role_set");
    group.throughput(Throughput::Elements(64));
    group.bench_function("encode_x64", |b| {
        b.iter(|| black_box(codec.to_bytes(black_box(&roles)).unwrap()))
    });
    group.bench_function("decode_x64", |b| {
        b.iter(|| black_box(codec.decode(black_box(&bytes)).unwrap()))
    });
    group.finish();
}

fn bench_choice(c: &mut Criterion) {
    let codec = get_codec("count-or-parser-errors2").unwrap();
    let report = Value::tuple([Value::Int32(3), Value::Int32(14), "unexpected token".into()]);
    let values = [Value::choice(1, [report])];
    let bytes = codec.to_bytes(&values).unwrap();

    let mut group = c.benchmark_group("choice");
    group.bench_function("encode", |b| {
        b.iter(|| black_box(codec.to_bytes(black_box(&values)).unwrap()))
    });
    group.bench_function("decode", |b| {
        b.iter(|| black_box(codec.decode(black_box(&bytes)).unwrap()))
    });
    group.finish();
}

// ============================================================================
// Benchmark 3: read-until-exhausted batch
// ============================================================================

fn bench_event_batch(c: &mut Criterion) {
    let codec = get_codec("event-batch").unwrap();
    let events = Value::List(
        (0..1000)
            .map(|i| {
                Value::tuple([
                    Value::Int64(1_700_000_000 + i),
                    Value::String(format!("topic_{}", i % 8)),
                    Value::Bytes(vec![i as u8; 32]),
                ])
            })
            .collect(),
    );
    let values = [events];
    let bytes = codec.to_bytes(&values).unwrap();

    let mut group = c.benchmark_group("event_batch");
    group.throughput(Throughput::Elements(1000));
    group.bench_function("encode_x1000", |b| {
        b.iter(|| black_box(codec.to_bytes(black_box(&values)).unwrap()))
    });
    group.bench_function("decode_x1000", |b| {
        b.iter(|| black_box(codec.decode(black_box(&bytes)).unwrap()))
    });
    group.finish();
}

// ============================================================================
// Benchmark 4: resolution
// ============================================================================

fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    group.bench_function("cold_subscribe_request", |b| {
        b.iter(|| {
            let resolver = Resolver::new(catalogue());
            black_box(resolver.codec("subscribe-request").unwrap())
        })
    });
    group.bench_function("warm_subscribe_request", |b| {
        b.iter(|| black_box(get_codec("subscribe-request").unwrap()))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_session_id,
    bench_role_set,
    bench_choice,
    bench_event_batch,
    bench_resolution
);
criterion_main!(benches);
