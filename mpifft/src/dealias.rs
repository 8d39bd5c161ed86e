//! # Dealiasing
//!
//! Remapping of spectral coefficients between resolutions along a single local axis, and the two-thirds
//! truncation mask. Coefficients are never transformed here, only moved and zeroed.
//!
//! An axis of `n` coefficients in FFT ordering holds the non-negative frequencies `0..(n+1)/2` in its
//! low block and the negative frequencies in its high block. Padding to `m > n` keeps both blocks at
//! the ends of the longer axis, so every mode retains its frequency. Along the conjugate symmetry
//! reduced axis only non-negative frequencies exist and the coefficients are a plain prefix.
use num::Zero;

use crate::helpers::{copy_box, frequency, strides};

/// Extents of the low and high frequency blocks of an axis of `n` coefficients.
fn blocks(n: usize) -> (usize, usize) {
    let low = (n + 1) / 2;
    (low, n - low)
}

fn with_axis(shape: &[usize], axis: usize, extent: usize) -> Vec<usize> {
    let mut shape = shape.to_vec();
    shape[axis] = extent;
    shape
}

fn at_axis(ndim: usize, axis: usize, index: usize) -> Vec<usize> {
    let mut offset = vec![0; ndim];
    offset[axis] = index;
    offset
}

/// Zero pad `axis` of `input` into `output`.
///
/// # Arguments
/// * `input` - Buffer of shape `shape`.
/// * `shape` - Shape of `input`.
/// * `axis` - Axis padded, must be local.
/// * `padded` - Extent of `axis` in `output`.
/// * `reduced` - Whether `axis` is the conjugate symmetry reduced axis.
/// * `output` - Buffer of `shape` with `axis` of extent `padded`, overwritten.
pub fn pad_axis<E: Copy + Zero>(
    input: &[E],
    shape: &[usize],
    axis: usize,
    padded: usize,
    reduced: bool,
    output: &mut [E],
) {
    let ndim = shape.len();
    let n = shape[axis];
    let output_shape = with_axis(shape, axis, padded);
    output.fill(E::zero());

    let (low, high) = if reduced { (n, 0) } else { blocks(n) };
    let zero = vec![0; ndim];

    copy_box(
        input,
        shape,
        &zero,
        output,
        &output_shape,
        &zero,
        &with_axis(shape, axis, low),
    );
    if high > 0 {
        copy_box(
            input,
            shape,
            &at_axis(ndim, axis, low),
            output,
            &output_shape,
            &at_axis(ndim, axis, padded - high),
            &with_axis(shape, axis, high),
        );
    }
}

/// Discard the padded region of `axis` of `input`, the inverse of [`pad_axis`].
///
/// # Arguments
/// * `input` - Buffer of shape `shape`.
/// * `shape` - Shape of `input`, `axis` at padded extent.
/// * `axis` - Axis truncated, must be local.
/// * `n` - Extent of `axis` in `output`.
/// * `reduced` - Whether `axis` is the conjugate symmetry reduced axis.
/// * `output` - Buffer of `shape` with `axis` of extent `n`, overwritten.
pub fn truncate_axis<E: Copy + Zero>(
    input: &[E],
    shape: &[usize],
    axis: usize,
    n: usize,
    reduced: bool,
    output: &mut [E],
) {
    let ndim = shape.len();
    let padded = shape[axis];
    let output_shape = with_axis(shape, axis, n);

    let (low, high) = if reduced { (n, 0) } else { blocks(n) };
    let zero = vec![0; ndim];

    copy_box(
        input,
        shape,
        &zero,
        output,
        &output_shape,
        &zero,
        &with_axis(shape, axis, low),
    );
    if high > 0 {
        copy_box(
            input,
            shape,
            &at_axis(ndim, axis, padded - high),
            output,
            &output_shape,
            &at_axis(ndim, axis, low),
            &with_axis(shape, axis, high),
        );
    }
}

/// Whether a mode of frequency `k` on an axis of `n` modes survives the two-thirds truncation,
/// i.e. `|k|` does not exceed two thirds of the Nyquist frequency `n/2`.
pub fn retained(k: isize, n: usize) -> bool {
    3 * k.unsigned_abs() <= n
}

/// Zero every coefficient of a local spectral block with a frequency beyond two thirds of the Nyquist
/// frequency along any axis.
///
/// # Arguments
/// * `data` - Local block of shape `shape`.
/// * `shape` - Local shape.
/// * `offset` - Global index of the first local coefficient along each axis.
/// * `lengths` - Global transform length of each axis.
/// * `reduced` - The conjugate symmetry reduced axis, if any.
pub fn apply_mask<E: Copy + Zero>(
    data: &mut [E],
    shape: &[usize],
    offset: &[usize],
    lengths: &[usize],
    reduced: Option<usize>,
) {
    // Local indices to zero along each axis
    let masks = shape
        .iter()
        .enumerate()
        .map(|(axis, &extent)| {
            (0..extent)
                .map(|i| {
                    let global = offset[axis] + i;
                    let k = if reduced == Some(axis) {
                        global as isize
                    } else {
                        frequency(global, lengths[axis])
                    };
                    !retained(k, lengths[axis])
                })
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    if masks.iter().all(|mask| mask.iter().all(|&m| !m)) {
        return;
    }

    let strides = strides(shape);
    for (index, value) in data.iter_mut().enumerate() {
        let masked = masks
            .iter()
            .zip(strides.iter().zip(shape.iter()))
            .any(|(mask, (&stride, &extent))| mask[(index / stride) % extent]);
        if masked {
            *value = E::zero();
        }
    }
}
