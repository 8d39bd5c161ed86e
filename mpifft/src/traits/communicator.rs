//! Process group abstraction
use bytemuck::Pod;

use crate::errors::MpiFftError;

/// Interface for the process group over which an array is distributed.
///
/// All exchanges are blocking collectives: every member of the group must make the matching call,
/// in the same order, or the group deadlocks. Elements cross the boundary as raw bytes.
pub trait Communicator: Sized {
    /// Index of this process within the group.
    fn rank(&self) -> usize;

    /// Number of processes in the group.
    fn size(&self) -> usize;

    /// Exchange equal sized blocks, block `j` of `send` is delivered to rank `j` and block `j` of `recv`
    /// is received from rank `j`.
    ///
    /// # Arguments
    /// * `send` - Send buffer, its length a multiple of the group size.
    /// * `recv` - Receive buffer, the same length as `send`.
    fn all_to_all_bytes(&self, send: &[u8], recv: &mut [u8]) -> Result<(), MpiFftError>;

    /// Exchange variable sized blocks.
    ///
    /// # Arguments
    /// * `send` - Send buffer.
    /// * `send_counts` - Number of bytes sent to each rank.
    /// * `send_displs` - Offset in `send` of the block for each rank.
    /// * `recv` - Receive buffer.
    /// * `recv_counts` - Number of bytes received from each rank.
    /// * `recv_displs` - Offset in `recv` of the block from each rank.
    #[allow(clippy::too_many_arguments)]
    fn all_to_all_varcount_bytes(
        &self,
        send: &[u8],
        send_counts: &[usize],
        send_displs: &[usize],
        recv: &mut [u8],
        recv_counts: &[usize],
        recv_displs: &[usize],
    ) -> Result<(), MpiFftError>;

    /// Partition the group into sub-groups of processes sharing a colour, ordered by key. Collective.
    fn split(&self, color: usize, key: usize) -> Result<Self, MpiFftError>;

    /// Typed version of [`Communicator::all_to_all_bytes`].
    fn all_to_all<E: Pod>(&self, send: &[E], recv: &mut [E]) -> Result<(), MpiFftError> {
        self.all_to_all_bytes(
            bytemuck::cast_slice(send),
            bytemuck::cast_slice_mut(recv),
        )
    }

    /// Typed version of [`Communicator::all_to_all_varcount_bytes`], counts and displacements in elements.
    #[allow(clippy::too_many_arguments)]
    fn all_to_all_varcount<E: Pod>(
        &self,
        send: &[E],
        send_counts: &[usize],
        send_displs: &[usize],
        recv: &mut [E],
        recv_counts: &[usize],
        recv_displs: &[usize],
    ) -> Result<(), MpiFftError> {
        let bytes = |v: &[usize]| {
            v.iter()
                .map(|&c| c * std::mem::size_of::<E>())
                .collect::<Vec<_>>()
        };
        self.all_to_all_varcount_bytes(
            bytemuck::cast_slice(send),
            &bytes(send_counts),
            &bytes(send_displs),
            bytemuck::cast_slice_mut(recv),
            &bytes(recv_counts),
            &bytes(recv_displs),
        )
    }
}
