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
    let rank = world.rank();

    let shape = [30, 40];

    let mut rng = StdRng::seed_from_u64(0);
    let a = (0..shape.iter().product::<usize>())
        .map(|_| Complex::new(rng.gen::<f64>(), rng.gen::<f64>()))
        .collect::<Vec<_>>();

    let reference = DistributedFftBuilder::<f64, _>::new()
        .shape(&shape)
        .communicator(SelfComm)
        .decomposition(Decomposition::Line)
        .build_c2c()
        .unwrap();
    let mut c = vec![Complex::new(0.0, 0.0); a.len()];
    reference.forward(&a, &mut c, Dealias::None).unwrap();

    let fft = DistributedFftBuilder::<f64, _>::new()
        .shape(&shape)
        .communicator(world.duplicate())
        .decomposition(Decomposition::Line)
        .exchange(Exchange::Generalized)
        .build_c2c()
        .unwrap();

    let a_local = local_block(&a, &shape, &fft.local_real_slice());
    let mut c_local = vec![Complex::new(0.0, 0.0); fft.local_complex_shape().iter().product()];
    fft.forward(&a_local, &mut c_local, Dealias::None).unwrap();

    let expected = local_block(&c, &shape, &fft.local_complex_slice());
    for (found, expected) in c_local.iter().zip(expected.iter()) {
        assert!((found - expected).norm() < 1e-8 * expected.norm().max(1.0));
    }

    let mut b_local = vec![Complex::new(0.0, 0.0); a_local.len()];
    fft.inverse(&c_local, &mut b_local, Dealias::None).unwrap();
    for (found, expected) in b_local.iter().zip(a_local.iter()) {
        assert!((found - expected).norm() < 1e-8);
    }

    if rank == 0 {
        println!("...test_line_c2c passed")
    }
}

#[cfg(not(feature = "mpi"))]
fn main() {}
