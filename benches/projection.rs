use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

use std::f64::consts::PI;

use skyplot_geom::{
  math::XYZ,
  proj::{Projection, SkyProjection},
  tick::Lut,
  HALF_PI, TWICE_PI,
};

fn gen_rand_xyz(n: usize) -> Vec<XYZ> {
  let mut rng = rand::thread_rng();
  (0..n)
    .map(|_| XYZ::from_coo(rng.gen::<f64>() * TWICE_PI, rng.gen::<f64>() * PI - HALF_PI))
    .collect()
}

pub fn benchmark_proj_unproj(proj: &SkyProjection, positions: &[XYZ]) -> usize {
  positions
    .iter()
    .filter_map(|v| proj.project(v))
    .filter_map(|p| proj.unproject(&p))
    .count()
}

pub fn benchmark_lookup(lut: &Lut, values: &[f64]) -> f64 {
  values.iter().map(|v| lut.lookup_index(*v)).sum()
}

fn bench_proj(c: &mut Criterion) {
  let mut group = c.benchmark_group("Project/unproject");
  group.sample_size(10);

  let positions = gen_rand_xyz(black_box(100000));
  for (i, proj) in SkyProjection::all().iter().enumerate() {
    group.bench_with_input(BenchmarkId::new(proj.name(), i), proj, |b, proj| {
      b.iter(|| benchmark_proj_unproj(proj, &positions))
    });
  }
  group.finish();
}

fn bench_lut(c: &mut Criterion) {
  let mut group = c.benchmark_group("Lut lookup");

  let mut rng = rand::thread_rng();
  let values: Vec<f64> = (0..10000).map(|_| rng.gen::<f64>() * 100.0).collect();
  for n in [100_i64, 1000, 10000] {
    let lut = Lut::build(0, n, |i| (i as f64 / n as f64 * 10.0).powi(2));
    group.bench_with_input(BenchmarkId::new("Lookup", n), &lut, |b, lut| {
      b.iter(|| benchmark_lookup(lut, &values))
    });
  }
  group.finish();
}

criterion_group!(benches, bench_proj, bench_lut);
criterion_main!(benches);
