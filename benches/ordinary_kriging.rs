use co_kriging::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn create_samples(domain: [[f64; 2]; 2], n_points: usize) -> Vec<SamplePoint> {
    let mut samples = vec![];
    for _ in 0..n_points {
        let lat = rand::random::<f64>() * (domain[1][0] - domain[0][0]) + domain[0][0];
        let lon = rand::random::<f64>() * (domain[1][1] - domain[0][1]) + domain[0][1];
        let v = rand::random::<f64>() * 50.0;
        samples.push(SamplePoint::new(lat, lon, v));
    }
    samples
}

fn create_grid(domain: [[f64; 2]; 2], n: [usize; 2]) -> Vec<GeoPoint> {
    let d_lat = (domain[1][0] - domain[0][0]) / n[0] as f64;
    let d_lon = (domain[1][1] - domain[0][1]) / n[1] as f64;

    let mut grid = vec![];
    for i in 0..n[0] {
        for j in 0..n[1] {
            grid.push(GeoPoint::new(
                domain[0][0] + (i as f64 + 0.5) * d_lat,
                domain[0][1] + (j as f64 + 0.5) * d_lon,
            ));
        }
    }
    grid
}

fn criterion_benchmark(c: &mut Criterion) {
    let domain = [[-7.7756, 110.3736], [-7.7647, 110.3827]];
    let query = GeoPoint::new(-7.769, 110.378);

    for n_points in [8, 32] {
        let samples = create_samples(domain, n_points);
        c.bench_function(&format!("fit and krige {n_points} samples"), |b| {
            b.iter(|| {
                let mut engine = KrigingEngine::default();
                engine.interpolate(black_box(&query), black_box(&samples))
            })
        });
    }

    let samples = create_samples(domain, 8);
    let params = fit_parameters(&samples, &VariogramParameters::default());
    let grid = create_grid(domain, [50, 50]);
    c.bench_function("krige 50x50 grid", |b| {
        b.iter(|| ok_estimate_batch(black_box(&grid), black_box(&samples), black_box(&params)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
