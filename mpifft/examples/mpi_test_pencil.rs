//? mpirun -n {{NPROCESSES}} --features "mpi"

#[cfg(feature = "mpi")]
fn main() {
    use mpi::traits::Communicator;
    use mpifft::{
        comm::SelfComm,
        helpers::local_block,
        traits::transform::DistributedTransform,
        types::{Alignment, Dealias, Decomposition, Exchange},
        DistributedFftBuilder,
    };
    use num_complex::Complex;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let universe = mpi::initialize().unwrap();
    let world = universe.world();
    let rank = world.rank();

    let shape = [32, 64, 128];
    let complex_shape = [32, 64, 65];
    let padded_shape = [48, 96, 192];

    // Spectral array with the top third of the modes of every axis zeroed
    let mut rng = StdRng::seed_from_u64(0);
    let a = (0..shape.iter().product::<usize>())
        .map(|_| rng.gen::<f64>())
        .collect::<Vec<_>>();
    let reference = DistributedFftBuilder::<f64, _>::new()
        .shape(&shape)
        .communicator(SelfComm)
        .build_r2c()
        .unwrap();
    let mut c = vec![Complex::new(0.0, 0.0); complex_shape.iter().product()];
    reference.forward(&a, &mut c, Dealias::TwoThirds).unwrap();
    let mut a_pad = vec![0.0; padded_shape.iter().product()];
    reference
        .inverse(&c, &mut a_pad, Dealias::ThreeHalves)
        .unwrap();

    for alignment in [Alignment::X, Alignment::Y] {
        let fft = DistributedFftBuilder::<f64, _>::new()
            .shape(&shape)
            .communicator(world.duplicate())
            .decomposition(Decomposition::Pencil {
                alignment,
                grid: None,
            })
            .exchange(Exchange::Generalized)
            .build_r2c()
            .unwrap();

        let c_local = local_block(&c, &complex_shape, &fft.local_complex_slice());
        let mut a_local = vec![0.0; fft.local_real_shape_padded().unwrap().iter().product()];
        fft.inverse(&c_local, &mut a_local, Dealias::ThreeHalves)
            .unwrap();

        let expected = local_block(&a_pad, &padded_shape, &fft.local_real_slice_padded().unwrap());
        for (found, expected) in a_local.iter().zip(expected.iter()) {
            assert!((found - expected).abs() < 1e-8);
        }

        let mut d_local = vec![Complex::new(0.0, 0.0); c_local.len()];
        fft.forward(&a_local, &mut d_local, Dealias::ThreeHalves)
            .unwrap();
        for (found, expected) in d_local.iter().zip(c_local.iter()) {
            assert!((found - expected).norm() < 1e-8 * expected.norm().max(1.0));
        }

        if rank == 0 {
            println!(
                "...test_pencil_padded_{alignment:?} passed on grid {:?}",
                fft.grid().dims
            )
        }
    }
}

#[cfg(not(feature = "mpi"))]
fn main() {}
