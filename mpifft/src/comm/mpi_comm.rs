//! MPI communicators
use mpi::{
    datatype::{Partition, PartitionMut},
    topology::{Color, SimpleCommunicator},
    traits::{Communicator as MpiCommunicator, CommunicatorCollectives},
    Count,
};

use crate::{errors::MpiFftError, traits::communicator::Communicator};

/// Convert byte counts or displacements to MPI counts.
fn to_counts(values: &[usize]) -> Result<Vec<Count>, MpiFftError> {
    values
        .iter()
        .map(|&v| {
            Count::try_from(v).map_err(|_| {
                MpiFftError::Communication(format!("message of {v} bytes exceeds the MPI count range"))
            })
        })
        .collect()
}

impl Communicator for SimpleCommunicator {
    fn rank(&self) -> usize {
        MpiCommunicator::rank(self) as usize
    }

    fn size(&self) -> usize {
        MpiCommunicator::size(self) as usize
    }

    fn all_to_all_bytes(&self, send: &[u8], recv: &mut [u8]) -> Result<(), MpiFftError> {
        if send.len() != recv.len() {
            return Err(MpiFftError::Communication(format!(
                "all-to-all buffers differ in length, {} sent and {} received",
                send.len(),
                recv.len()
            )));
        }
        self.all_to_all_into(send, recv);
        Ok(())
    }

    fn all_to_all_varcount_bytes(
        &self,
        send: &[u8],
        send_counts: &[usize],
        send_displs: &[usize],
        recv: &mut [u8],
        recv_counts: &[usize],
        recv_displs: &[usize],
    ) -> Result<(), MpiFftError> {
        let partition_snd = Partition::new(send, to_counts(send_counts)?, to_counts(send_displs)?);
        let mut partition_received =
            PartitionMut::new(recv, to_counts(recv_counts)?, to_counts(recv_displs)?);
        self.all_to_all_varcount_into(&partition_snd, &mut partition_received);
        Ok(())
    }

    fn split(&self, color: usize, key: usize) -> Result<Self, MpiFftError> {
        let color = Count::try_from(color)
            .map_err(|_| MpiFftError::Communication(format!("colour {color} out of range")))?;
        let key = Count::try_from(key)
            .map_err(|_| MpiFftError::Communication(format!("key {key} out of range")))?;
        self.split_by_color_with_key(Color::with_value(color), key)
            .ok_or_else(|| MpiFftError::Communication("failed to split communicator".to_string()))
    }
}
