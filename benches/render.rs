#[macro_use]
extern crate criterion;
extern crate mandelframe;
extern crate num;

use criterion::Criterion;
use mandelframe::{render, RenderParams};
use num::Complex;

fn bench_workers(c: &mut Criterion) {
    c.bench_function_over_inputs(
        "render 160x90",
        |b, &&workers| {
            let params =
                RenderParams::new(Complex::new(-1.0, 0.0), 160, 90, workers, 100, 2.0).unwrap();
            b.iter(|| render(&params).unwrap())
        },
        &[1, 2, 4, 8],
    );
}

criterion_group!(benches, bench_workers);
criterion_main!(benches);
