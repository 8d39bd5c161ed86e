//! # Process Groups
//!
//! Implementations of [`Communicator`](crate::traits::communicator::Communicator) over which arrays are distributed.
//!
//! # Features
//! * [`SelfComm`], a group of one process used as a deterministic serial reference.
//! * [`ThreadComm`], a group of threads exchanging messages over channels, for testing multi-rank layouts
//!   without an MPI installation.
//! * MPI communicators, with the `mpi` feature.
#[cfg(feature = "mpi")]
mod mpi_comm;
mod single;
mod threaded;

pub use single::SelfComm;
pub use threaded::ThreadComm;
