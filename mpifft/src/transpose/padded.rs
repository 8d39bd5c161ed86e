//! Padded uniform block exchange
use bytemuck::Pod;
use tracing::instrument;

use crate::{
    errors::MpiFftError,
    helpers::n_elements,
    traits::{communicator::Communicator, transpose::Transpose},
    transpose::{
        pack::{check_buffers, pack, recv_counts, send_counts, split_slots, unpack},
        types::{PaddedUniformExchange, Redistribution},
    },
};

/// Size of the slot holding any block of a redistribution, identical on every rank of the sub-group.
fn slot_size(redistribution: &Redistribution) -> usize {
    let mut shape = redistribution.input_shape.clone();
    shape[redistribution.gather] = redistribution
        .gather_ranges
        .iter()
        .map(|r| r.len())
        .max()
        .unwrap_or(0);
    shape[redistribution.scatter] = redistribution
        .scatter_ranges
        .iter()
        .map(|r| r.len())
        .max()
        .unwrap_or(0);
    n_elements(&shape)
}

impl Transpose for PaddedUniformExchange {
    #[instrument(level = "debug", skip_all, fields(gather = redistribution.gather, scatter = redistribution.scatter))]
    fn transpose<E: Pod + Send + Sync, C: Communicator>(
        &self,
        comm: &C,
        redistribution: &Redistribution,
        input: &[E],
        output: &mut [E],
    ) -> Result<(), MpiFftError> {
        check_buffers(redistribution, input, output)?;

        let slot = slot_size(redistribution);
        let size = redistribution.scatter_ranges.len();
        let displs = (0..size).map(|peer| peer * slot).collect::<Vec<_>>();

        // Blocks are compact at the start of their zero padded slots
        let counts_snd = send_counts(redistribution);
        let mut send = vec![E::zeroed(); slot * size];
        pack(
            redistribution,
            input,
            split_slots(&mut send, &displs, &counts_snd),
        );

        let mut received = vec![E::zeroed(); slot * size];
        comm.all_to_all(&send, &mut received)?;

        debug_assert!(recv_counts(redistribution).iter().all(|&c| c <= slot));
        unpack(redistribution, &received, &displs, output);
        Ok(())
    }
}
