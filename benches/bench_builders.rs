//! Throughput of the packet builders: pure CPU, no IO.
//!
//! ```bash
//! cargo bench --bench bench_builders
//! ```

use criterion::{criterion_group, criterion_main, Criterion};
use t50_core::buffer::PacketBuffer;
use t50_core::builders::{icmp, tcp, udp};
use t50_core::config::sample_config;
use t50_core::rng::Prng;

fn bench_udp(c: &mut Criterion) {
    let cfg = sample_config();
    let mut buf = PacketBuffer::new();
    let mut rng = Prng::seeded(1);
    c.bench_function("udp::build", |b| {
        b.iter(|| udp::build(&cfg, &mut buf, &mut rng))
    });
}

fn bench_tcp(c: &mut Criterion) {
    let cfg = sample_config();
    let mut buf = PacketBuffer::new();
    let mut rng = Prng::seeded(1);
    c.bench_function("tcp::build", |b| {
        b.iter(|| tcp::build(&cfg, &mut buf, &mut rng))
    });
}

fn bench_icmp(c: &mut Criterion) {
    let cfg = sample_config();
    let mut buf = PacketBuffer::new();
    let mut rng = Prng::seeded(1);
    c.bench_function("icmp::build", |b| {
        b.iter(|| icmp::build(&cfg, &mut buf, &mut rng))
    });
}

criterion_group!(benches, bench_udp, bench_tcp, bench_icmp);
criterion_main!(benches);
