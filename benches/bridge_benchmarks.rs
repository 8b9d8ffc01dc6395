//! Performance benchmarks for the typed buffer bridge.
//!
//! Measures the two hot operations: narrowing a handle to its native view
//! and building handles from strings of a few representative sizes.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use typed_buffer::{ArrayBuffer, ByteBuffer, DirectByteBuffer, TypedBufferBridge};

fn bench_unwrap(c: &mut Criterion) {
    let bridge = TypedBufferBridge::new();
    let handle = ByteBuffer::Direct(DirectByteBuffer::new(ArrayBuffer::new(4096)));

    c.bench_function("unwrap_direct", |b| {
        b.iter(|| {
            let view = bridge.unwrap(black_box(&handle)).unwrap();
            black_box(view.byte_length())
        })
    });
}

fn bench_from_string(c: &mut Criterion) {
    let bridge = TypedBufferBridge::new();
    let mut group = c.benchmark_group("from_string");
    for size in [16usize, 256, 4096] {
        let text = "x".repeat(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(format!("utf8_{size}"), |b| {
            b.iter(|| {
                let handle = bridge.from_string(black_box(Some(&text))).unwrap();
                black_box(handle.capacity())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_unwrap, bench_from_string);
criterion_main!(benches);
