//! Packing and unpacking of the blocks exchanged by a transpose
use bytemuck::Pod;
use rayon::prelude::*;

use crate::{
    errors::MpiFftError,
    helpers::{copy_box, n_elements},
    transpose::types::Redistribution,
};

/// Check the local buffers against the shapes of a redistribution.
pub(crate) fn check_buffers<E>(
    redistribution: &Redistribution,
    input: &[E],
    output: &[E],
) -> Result<(), MpiFftError> {
    MpiFftError::check_len(&redistribution.input_shape, input.len())?;
    MpiFftError::check_len(&redistribution.output_shape, output.len())
}

/// Shape of the block sent to `peer`.
pub(crate) fn send_shape(redistribution: &Redistribution, peer: usize) -> Vec<usize> {
    let mut shape = redistribution.input_shape.clone();
    shape[redistribution.scatter] = redistribution.scatter_ranges[peer].len();
    shape
}

/// Shape of the block received from `peer`.
pub(crate) fn recv_shape(redistribution: &Redistribution, peer: usize) -> Vec<usize> {
    let mut shape = redistribution.output_shape.clone();
    shape[redistribution.gather] = redistribution.gather_ranges[peer].len();
    shape
}

/// Number of elements sent to each peer.
pub(crate) fn send_counts(redistribution: &Redistribution) -> Vec<usize> {
    (0..redistribution.scatter_ranges.len())
        .map(|peer| n_elements(&send_shape(redistribution, peer)))
        .collect()
}

/// Number of elements received from each peer.
pub(crate) fn recv_counts(redistribution: &Redistribution) -> Vec<usize> {
    (0..redistribution.gather_ranges.len())
        .map(|peer| n_elements(&recv_shape(redistribution, peer)))
        .collect()
}

/// Offsets of blocks stored back to back.
pub(crate) fn displacements(counts: &[usize]) -> Vec<usize> {
    counts
        .iter()
        .scan(0, |acc, &x| {
            let tmp = *acc;
            *acc += x;
            Some(tmp)
        })
        .collect()
}

/// Copy the block destined for each peer into its send slot. `slots[peer]` must hold at least the
/// elements of the block.
pub(crate) fn pack<E: Pod + Send + Sync>(
    redistribution: &Redistribution,
    input: &[E],
    slots: Vec<&mut [E]>,
) {
    let ndim = redistribution.input_shape.len();
    slots.into_par_iter().enumerate().for_each(|(peer, slot)| {
        let shape = send_shape(redistribution, peer);
        let mut offset = vec![0; ndim];
        offset[redistribution.scatter] = redistribution.scatter_ranges[peer].start;
        copy_box(
            input,
            &redistribution.input_shape,
            &offset,
            slot,
            &shape,
            &vec![0; ndim],
            &shape,
        );
    });
}

/// Copy the block received from each peer, starting at `displs[peer]` of `recv`, into the output.
/// Indices of the gather axis held by no peer are zeroed.
pub(crate) fn unpack<E: Pod>(
    redistribution: &Redistribution,
    recv: &[E],
    displs: &[usize],
    output: &mut [E],
) {
    let ndim = redistribution.output_shape.len();
    let gather = redistribution.gather;

    let covered = redistribution
        .gather_ranges
        .last()
        .map_or(0, |range| range.end);
    if covered < redistribution.output_shape[gather] {
        output.fill(E::zeroed());
    }

    for (peer, &displ) in displs.iter().enumerate() {
        let shape = recv_shape(redistribution, peer);
        let mut offset = vec![0; ndim];
        offset[gather] = redistribution.gather_ranges[peer].start;
        copy_box(
            &recv[displ..displ + n_elements(&shape)],
            &shape,
            &vec![0; ndim],
            output,
            &redistribution.output_shape,
            &offset,
            &shape,
        );
    }
}

/// Split a buffer into the disjoint slots given by ascending offsets and lengths.
pub(crate) fn split_slots<'a, E>(
    mut buffer: &'a mut [E],
    displs: &[usize],
    counts: &[usize],
) -> Vec<&'a mut [E]> {
    let mut slots = Vec::with_capacity(counts.len());
    let mut position = 0;
    for (&displ, &count) in displs.iter().zip(counts.iter()) {
        let (_, rest) = std::mem::take(&mut buffer).split_at_mut(displ - position);
        let (slot, rest) = rest.split_at_mut(count);
        slots.push(slot);
        buffer = rest;
        position = displ + count;
    }
    slots
}

#[cfg(test)]
mod test {
    use crate::transpose::{
        pack::{displacements, pack, recv_counts, send_counts, split_slots, unpack},
        types::Redistribution,
    };

    #[test]
    fn test_pack_unpack_single_rank() {
        // With one peer a transpose is a copy
        let redistribution = Redistribution {
            group: 0,
            input_shape: vec![3, 4],
            output_shape: vec![3, 4],
            gather: 0,
            scatter: 1,
            gather_ranges: vec![0..3],
            scatter_ranges: vec![0..4],
        };
        let input = (0..12).collect::<Vec<i64>>();
        let counts = send_counts(&redistribution);
        assert_eq!(counts, recv_counts(&redistribution));

        let mut send = vec![0; 12];
        pack(&redistribution, &input, split_slots(&mut send, &[0], &counts));

        let mut output = vec![0; 12];
        unpack(&redistribution, &send, &displacements(&counts), &mut output);
        assert_eq!(output, input);
    }

    #[test]
    fn test_slots() {
        let mut buffer = (0..10).collect::<Vec<u8>>();
        let slots = split_slots(&mut buffer, &[0, 4, 8], &[3, 2, 2]);
        assert_eq!(slots[0], &[0, 1, 2]);
        assert_eq!(slots[1], &[4, 5]);
        assert_eq!(slots[2], &[8, 9]);
        assert_eq!(displacements(&[3, 2, 2]), vec![0, 3, 5]);
    }
}
