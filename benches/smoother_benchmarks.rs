//! Benchmarks for tracking smoothing and detection mapping

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use head_parallax::{
    detection::{DetectionMapper, FaceBox, FaceDetection},
    smoother::TrackingSmoother,
};

fn benchmark_smoother(c: &mut Criterion) {
    let mut group = c.benchmark_group("smoother");

    // Noisy head positions arriving at detector cadence
    let targets: Vec<(f64, f64, f64)> = (0..100)
        .map(|i| {
            let t = i as f64 * 0.05;
            let x = 0.6 * t.sin() + 0.05 * (rand::random::<f64>() - 0.5);
            let y = 0.3 * (2.0 * t).cos() + 0.05 * (rand::random::<f64>() - 0.5);
            (x, y, 1.0 + 0.1 * (rand::random::<f64>() - 0.5))
        })
        .collect();

    for factor in [0.08, 0.12, 1.0] {
        let mut smoother = TrackingSmoother::new(factor);
        group.bench_with_input(BenchmarkId::new("tick", factor), &targets[0], |b, &(x, y, z)| {
            smoother.update_target(x, y, z);
            b.iter(|| black_box(smoother.tick()));
        });

        group.bench_with_input(BenchmarkId::new("sequence_100", factor), &targets, |b, data| {
            b.iter(|| {
                let mut smoother = TrackingSmoother::new(factor);
                for (i, &(x, y, z)) in data.iter().enumerate() {
                    // Detections land on roughly every third frame
                    if i % 3 == 0 {
                        smoother.update_target(black_box(x), black_box(y), black_box(z));
                    }
                    black_box(smoother.tick());
                }
            });
        });
    }

    group.finish();
}

fn benchmark_mapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("detection_mapping");
    let mapper = DetectionMapper::default();

    let detections: Vec<FaceDetection> = (0..100)
        .map(|_| {
            let bbox = FaceBox::new(
                rand::random::<f64>(),
                rand::random::<f64>(),
                0.1 + 0.4 * rand::random::<f64>(),
                0.1 + 0.4 * rand::random::<f64>(),
            );
            FaceDetection::new(bbox, rand::random::<f32>())
        })
        .collect();

    group.bench_function("map_single", |b| {
        let bbox = detections[0].bbox;
        b.iter(|| black_box(mapper.map(black_box(&bbox))));
    });

    group.bench_function("process_100", |b| {
        b.iter(|| {
            for detection in &detections {
                black_box(mapper.process(std::slice::from_ref(detection)));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_smoother, benchmark_mapping);
criterion_main!(benches);
