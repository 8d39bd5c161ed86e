//! Generalised block exchange
use bytemuck::Pod;
use tracing::instrument;

use crate::{
    errors::MpiFftError,
    traits::{communicator::Communicator, transpose::Transpose},
    transpose::{
        pack::{check_buffers, displacements, pack, recv_counts, send_counts, split_slots, unpack},
        types::{GeneralizedExchange, Redistribution},
    },
};

impl Transpose for GeneralizedExchange {
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
        let displs_snd = displacements(&counts_snd);
        let counts_recv = recv_counts(redistribution);
        let displs_recv = displacements(&counts_recv);

        let mut send = vec![E::zeroed(); counts_snd.iter().sum()];
        pack(
            redistribution,
            input,
            split_slots(&mut send, &displs_snd, &counts_snd),
        );

        let mut received = vec![E::zeroed(); counts_recv.iter().sum()];
        comm.all_to_all_varcount(
            &send,
            &counts_snd,
            &displs_snd,
            &mut received,
            &counts_recv,
            &displs_recv,
        )?;

        unpack(redistribution, &received, &displs_recv, output);
        Ok(())
    }
}
