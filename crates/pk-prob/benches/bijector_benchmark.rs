use criterion::{Criterion, criterion_group, criterion_main};
use ndarray::Array1;
use pk_prob::{Bijector, MoyalCdf, Variable};
use std::hint::black_box;

fn bench_moyal_cdf(c: &mut Criterion) {
    let x = Array1::linspace(-10.0, 30.0, 10_000).into_dyn();
    let y = Array1::linspace(0.001, 0.999, 10_000).into_dyn();
    let b = MoyalCdf::new(0.3, 5.0, true).unwrap();

    c.bench_function("moyal_cdf_forward_10k", |bch| bch.iter(|| black_box(b.forward(&x).unwrap())));

    c.bench_function("moyal_cdf_inverse_10k", |bch| bch.iter(|| black_box(b.inverse(&y).unwrap())));

    c.bench_function("moyal_cdf_fldj_10k", |bch| {
        bch.iter(|| black_box(b.forward_log_det_jacobian(&x, 1).unwrap()))
    });

    c.bench_function("moyal_cdf_ildj_10k", |bch| {
        bch.iter(|| black_box(b.inverse_log_det_jacobian(&y, 1).unwrap()))
    });

    let scale = Variable::new(5.0);
    let bv = MoyalCdf::new(0.3, &scale, true).unwrap();
    c.bench_function("moyal_cdf_forward_variable_scale_10k", |bch| {
        bch.iter(|| black_box(bv.forward(&x).unwrap()))
    });
}

criterion_group!(benches, bench_moyal_cdf);
criterion_main!(benches);
