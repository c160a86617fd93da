//! Benchmarks for the dispersion field scan

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sprawlgis_algorithms::dispersion::{dispersion_field, DispersionParams};
use sprawlgis_core::{GeoTransform, Raster};

/// Classified grid with a deterministic scattered build-up pattern
/// (roughly a fifth of the cells).
fn create_classified(size: usize) -> Raster<i32> {
    let mut grid = Raster::new(size, size);
    grid.set_transform(GeoTransform::new(0.0, size as f64 * 30.0, 30.0, -30.0));
    grid.set_nodata(Some(0));

    for row in 0..size {
        for col in 0..size {
            if (row * 31 + col * 17) % 5 == 0 {
                grid.set(row, col, 1).unwrap();
            }
        }
    }
    grid
}

fn bench_dispersion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispersion_field");
    group.sample_size(10);

    for size in [128, 256, 512].iter() {
        let grid = create_classified(*size);
        let params = DispersionParams {
            radius: 600.0, // 20-cell window at 30m pixels
            ..Default::default()
        };

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| dispersion_field(black_box(&grid), black_box(&grid), &params).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_dispersion);
criterion_main!(benches);
