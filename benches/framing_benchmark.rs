use argali_tether::{deframer::Deframer, framer, FrameAddress};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn payload_with_escapes(size: usize) -> Vec<u8> {
    (0..size)
        .map(|i| match i % 7 {
            0 => 0x7E,
            3 => 0x7D,
            _ => (i % 256) as u8,
        })
        .collect()
}

fn benchmark_framing(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame");
    for size in [16usize, 256, 1024] {
        let payload = payload_with_escapes(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &payload, |b, payload| {
            b.iter(|| framer::frame(black_box(payload), FrameAddress::Device, 0))
        });
    }
    group.finish();
}

fn benchmark_deframing(c: &mut Criterion) {
    let mut group = c.benchmark_group("deframe");
    for size in [16usize, 256, 1024] {
        let payload = payload_with_escapes(size);
        let wire = framer::frame(&payload, FrameAddress::Device, 0);
        group.bench_with_input(BenchmarkId::from_parameter(size), &wire, |b, wire| {
            b.iter(|| {
                let mut d = Deframer::new();
                black_box(d.feed(wire))
            })
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_framing, benchmark_deframing);
criterion_main!(benches);
