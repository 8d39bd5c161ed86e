//! Group of a single process
use crate::{errors::MpiFftError, traits::communicator::Communicator};

/// Group containing only the calling process, exchanges are local copies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelfComm;

impl Communicator for SelfComm {
    fn rank(&self) -> usize {
        0
    }

    fn size(&self) -> usize {
        1
    }

    fn all_to_all_bytes(&self, send: &[u8], recv: &mut [u8]) -> Result<(), MpiFftError> {
        if send.len() != recv.len() {
            return Err(MpiFftError::Communication(format!(
                "all-to-all buffers differ in length, {} sent and {} received",
                send.len(),
                recv.len()
            )));
        }
        recv.copy_from_slice(send);
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
        if send_counts.is_empty()
            || send_displs.is_empty()
            || recv_counts.is_empty()
            || recv_displs.is_empty()
        {
            return Err(MpiFftError::Communication(
                "counts and displacements must hold one entry for the single rank".to_string(),
            ));
        }
        if send_counts[0] != recv_counts[0] {
            return Err(MpiFftError::Communication(format!(
                "sent {} bytes to self but expected {}",
                send_counts[0], recv_counts[0]
            )));
        }
        let count = send_counts[0];
        recv[recv_displs[0]..recv_displs[0] + count]
            .copy_from_slice(&send[send_displs[0]..send_displs[0] + count]);
        Ok(())
    }

    fn split(&self, _color: usize, _key: usize) -> Result<Self, MpiFftError> {
        Ok(SelfComm)
    }
}
