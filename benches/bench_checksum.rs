//! Throughput of the Internet checksum over buffer sizes representative of
//! the builders that call it (a bare UDP header through a GRE-encapsulated
//! OSPF LSU).
//!
//! ```bash
//! cargo bench --bench bench_checksum
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use t50_core::checksum::internet_checksum;

fn bench_checksum(c: &mut Criterion) {
    let mut group = c.benchmark_group("internet_checksum");
    for size in [28usize, 64, 256, 1500] {
        let data = vec![0xAAu8; size];
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| internet_checksum(black_box(data)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_checksum);
criterion_main!(benches);
