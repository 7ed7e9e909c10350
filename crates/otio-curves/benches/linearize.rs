//! Criterion bench for bezier linearization across curve sizes.
//!
//! Grounded on the teacher's `sezkp-ffts/benches/ntt.rs`: deterministic
//! inputs, one `BenchmarkId` per size, throughput reported in segments.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use otio_core::Ordinate;
use otio_curves::{BezierCurve, BezierSegment, ControlPoint, LinearizeConfig};

fn cp(i: f64, o: f64) -> ControlPoint {
    ControlPoint {
        r#in: Ordinate::from_ratio((i * (1i128 << 20) as f64) as i128, 1i128 << 20),
        out: Ordinate::from_ratio((o * (1i128 << 20) as f64) as i128, 1i128 << 20),
    }
}

/// A curve made of `n` S-shaped segments joined end to end.
fn det_curve(n: usize) -> BezierCurve {
    let mut segments = Vec::with_capacity(n);
    for i in 0..n {
        let base_in = i as f64;
        let base_out = i as f64;
        let seg = BezierSegment::new(
            cp(base_in, base_out),
            cp(base_in + 0.1, base_out + 0.9),
            cp(base_in + 0.9, base_out + 0.1),
            cp(base_in + 1.0, base_out + 1.0),
        )
        .expect("S-curve segments stay monotonic in `in` by construction");
        segments.push(seg);
    }
    BezierCurve::new(segments).expect("segments join C0 by construction")
}

fn bench_linearize(c: &mut Criterion) {
    let mut group = c.benchmark_group("bezier_linearize");

    for &n in &[1usize, 8, 64] {
        let curve = det_curve(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(BenchmarkId::new("linearize", n), |b| {
            b.iter(|| {
                black_box(curve.linearize(LinearizeConfig::default()));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_linearize);
criterion_main!(benches);
