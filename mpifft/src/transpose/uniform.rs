//! Uniform block exchange
use bytemuck::Pod;
use tracing::instrument;

use crate::{
    errors::MpiFftError,
    traits::{communicator::Communicator, transpose::Transpose},
    transpose::{
        pack::{check_buffers, displacements, pack, recv_counts, send_counts, split_slots, unpack},
        types::{Redistribution, UniformExchange},
    },
};

impl Transpose for UniformExchange {
    #[instrument(level = "debug", skip_all, fields(gather = redistribution.gather, scatter = redistribution.scatter))]
    fn transpose<E: Pod + Send + Sync, C: Communicator>(
        &self,
        comm: &C,
        redistribution: &Redistribution,
        input: &[E],
        output: &mut [E],
    ) -> Result<(), MpiFftError> {
        check_buffers(redistribution, input, output)?;

        let counts_snd = send_counts(redistribution);
        let counts_recv = recv_counts(redistribution);
        let block = counts_snd.first().copied().unwrap_or(0);
        if counts_snd
            .iter()
            .chain(counts_recv.iter())
            .any(|&count| count != block)
        {
            return Err(MpiFftError::Communication(format!(
                "uniform exchange requires equal blocks, found {counts_snd:?} sent and {counts_recv:?} received"
            )));
        }

        let displs = displacements(&counts_snd);
        let mut send = vec![E::zeroed(); block * counts_snd.len()];
        pack(
            redistribution,
            input,
            split_slots(&mut send, &displs, &counts_snd),
        );

        let mut received = vec![E::zeroed(); send.len()];
        comm.all_to_all(&send, &mut received)?;

        unpack(redistribution, &received, &displs, output);
        Ok(())
    }
}
