use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use mpifft::{
    comm::SelfComm,
    traits::transform::DistributedTransform,
    types::{Alignment, Dealias, Decomposition, Exchange},
    DistributedFftBuilder,
};
use num_complex::Complex;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn pencil_f32(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pencil R2C f32");
    group
        .sample_size(10)
        .measurement_time(Duration::from_secs(10));

    let n = 64;
    let shape = [n, n, n];

    for dealias in [Dealias::None, Dealias::ThreeHalves] {
        let fft = DistributedFftBuilder::<f32, _>::new()
            .shape(&shape)
            .communicator(SelfComm)
            .decomposition(Decomposition::Pencil {
                alignment: Alignment::Y,
                grid: None,
            })
            .exchange(Exchange::Generalized)
            .build_r2c()
            .unwrap();

        let real_shape = if dealias.is_padded() {
            fft.local_real_shape_padded().unwrap()
        } else {
            fft.local_real_shape()
        };

        let mut rng = StdRng::seed_from_u64(0);
        let mut a = (0..real_shape.iter().product::<usize>())
            .map(|_| rng.gen::<f32>())
            .collect::<Vec<_>>();
        let mut c_hat =
            vec![Complex::new(0f32, 0f32); fft.local_complex_shape().iter().product()];

        group.bench_function(format!("round trip, N={n}^3, dealias={dealias:?}"), |bench| {
            bench.iter(|| {
                fft.forward(&a, &mut c_hat, dealias).unwrap();
                fft.inverse(&c_hat, &mut a, dealias).unwrap();
            })
        });
    }
}

criterion_group!(benches, pencil_f32);
criterion_main!(benches);
