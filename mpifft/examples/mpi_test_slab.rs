//? mpirun -n {{NPROCESSES}} --features "mpi"

#[cfg(feature = "mpi")]
fn main() {
    use mpi::traits::Communicator;
    use mpifft::{
        comm::SelfComm,
        helpers::local_block,
        traits::transform::DistributedTransform,
        types::{Dealias, Decomposition, Exchange},
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
    let comm = world.duplicate();
    let rank = world.rank();

    let shape = [32, 64, 128];
    let complex_shape = [32, 64, 65];

    // Every process generates the same global array
    let mut rng = StdRng::seed_from_u64(0);
    let a = (0..shape.iter().product::<usize>())
        .map(|_| rng.gen::<f64>())
        .collect::<Vec<_>>();

    // Reference on a single process
    let reference = DistributedFftBuilder::<f64, _>::new()
        .shape(&shape)
        .communicator(SelfComm)
        .build_r2c()
        .unwrap();
    let mut c = vec![Complex::new(0.0, 0.0); complex_shape.iter().product()];
    reference.forward(&a, &mut c, Dealias::None).unwrap();

    for exchange in [
        Exchange::Uniform,
        Exchange::PaddedUniform,
        Exchange::Generalized,
    ] {
        let fft = DistributedFftBuilder::<f64, _>::new()
            .shape(&shape)
            .communicator(comm.duplicate())
            .decomposition(Decomposition::Slab)
            .exchange(exchange);

        // Uniform exchanges need evenly divisible extents
        let fft = match fft.build_r2c() {
            Ok(fft) => fft,
            Err(err) => {
                if rank == 0 {
                    println!("...skipping {exchange:?}: {err}");
                }
                continue;
            }
        };

        let a_local = local_block(&a, &shape, &fft.local_real_slice());
        let mut c_local = vec![Complex::new(0.0, 0.0); fft.local_complex_shape().iter().product()];
        fft.forward(&a_local, &mut c_local, Dealias::None).unwrap();

        let expected = local_block(&c, &complex_shape, &fft.local_complex_slice());
        for (found, expected) in c_local.iter().zip(expected.iter()) {
            assert!((found - expected).norm() < 1e-8 * expected.norm().max(1.0));
        }

        let mut b_local = vec![0.0; a_local.len()];
        fft.inverse(&c_local, &mut b_local, Dealias::None).unwrap();
        for (found, expected) in b_local.iter().zip(a_local.iter()) {
            assert!((found - expected).abs() < 1e-8);
        }

        if rank == 0 {
            println!("...test_slab_{exchange:?} passed")
        }
    }
}

#[cfg(not(feature = "mpi"))]
fn main() {}
