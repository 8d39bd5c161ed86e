//! Helper functions for row-major multidimensional buffers
use std::ops::Range;

/// Number of elements described by a shape.
pub fn n_elements(shape: &[usize]) -> usize {
    shape.iter().product()
}

/// Row-major strides of a shape.
pub fn strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = vec![1; shape.len()];
    for axis in (0..shape.len().saturating_sub(1)).rev() {
        strides[axis] = strides[axis + 1] * shape[axis + 1];
    }
    strides
}

/// Global extent of an axis under the 3/2-rule, `ceil(3n/2)`.
pub fn padded_extent(n: usize) -> usize {
    (3 * n + 1) / 2
}

/// Signed frequency of index `i` of an axis with `n` modes, following the usual FFT ordering in which
/// the Nyquist mode of an even axis is counted as negative.
pub fn frequency(i: usize, n: usize) -> isize {
    if i < (n + 1) / 2 {
        i as isize
    } else {
        i as isize - n as isize
    }
}

/// Copy a box of extent `extent` between two row-major buffers.
///
/// # Arguments
/// * `src` - Source buffer of shape `src_shape`.
/// * `src_offset` - Corner of the box in the source.
/// * `dst` - Destination buffer of shape `dst_shape`.
/// * `dst_offset` - Corner of the box in the destination.
/// * `extent` - Extent of the box along each axis.
pub fn copy_box<E: Copy>(
    src: &[E],
    src_shape: &[usize],
    src_offset: &[usize],
    dst: &mut [E],
    dst_shape: &[usize],
    dst_offset: &[usize],
    extent: &[usize],
) {
    let ndim = extent.len();
    if ndim == 0 || extent.iter().any(|&e| e == 0) {
        return;
    }

    let src_strides = strides(src_shape);
    let dst_strides = strides(dst_shape);
    let run = extent[ndim - 1];

    // Odometer over all but the innermost axis, which is copied as one contiguous run
    let mut index = vec![0usize; ndim - 1];
    loop {
        let mut s = src_offset[ndim - 1];
        let mut d = dst_offset[ndim - 1];
        for (axis, &i) in index.iter().enumerate() {
            s += (src_offset[axis] + i) * src_strides[axis];
            d += (dst_offset[axis] + i) * dst_strides[axis];
        }
        dst[d..d + run].copy_from_slice(&src[s..s + run]);

        let mut axis = ndim - 1;
        loop {
            if axis == 0 {
                return;
            }
            axis -= 1;
            index[axis] += 1;
            if index[axis] < extent[axis] {
                break;
            }
            index[axis] = 0;
        }
    }
}

/// Extract the block described by `slice` from a global row-major array, e.g. the locally owned
/// part of a reference array computed on a single process.
pub fn local_block<E: Copy + Default>(
    global: &[E],
    global_shape: &[usize],
    slice: &[Range<usize>],
) -> Vec<E> {
    let extent = slice.iter().map(|r| r.len()).collect::<Vec<_>>();
    let offset = slice.iter().map(|r| r.start).collect::<Vec<_>>();
    let mut block = vec![E::default(); n_elements(&extent)];
    copy_box(
        global,
        global_shape,
        &offset,
        &mut block,
        &extent,
        &vec![0; extent.len()],
        &extent,
    );
    block
}

#[cfg(test)]
mod test {
    use super::{copy_box, frequency, local_block, padded_extent, strides};

    #[test]
    fn test_strides() {
        assert_eq!(strides(&[2, 3, 4]), vec![12, 4, 1]);
        assert_eq!(strides(&[5]), vec![1]);
    }

    #[test]
    fn test_frequency() {
        let n = 8;
        let freqs = (0..n).map(|i| frequency(i, n)).collect::<Vec<_>>();
        assert_eq!(freqs, vec![0, 1, 2, 3, -4, -3, -2, -1]);

        let n = 5;
        let freqs = (0..n).map(|i| frequency(i, n)).collect::<Vec<_>>();
        assert_eq!(freqs, vec![0, 1, 2, -2, -1]);
    }

    #[test]
    fn test_padded_extent() {
        assert_eq!(padded_extent(32), 48);
        assert_eq!(padded_extent(7), 11);
    }

    #[test]
    fn test_copy_box_3d() {
        let shape = [3, 4, 5];
        let src = (0..60).collect::<Vec<usize>>();
        let mut dst = vec![0; 2 * 2 * 3];
        copy_box(
            &src,
            &shape,
            &[1, 2, 1],
            &mut dst,
            &[2, 2, 3],
            &[0, 0, 0],
            &[2, 2, 3],
        );
        let expected = vec![31, 32, 33, 36, 37, 38, 51, 52, 53, 56, 57, 58];
        assert_eq!(dst, expected);
    }

    #[test]
    fn test_local_block() {
        let shape = [4, 6];
        let global = (0..24).collect::<Vec<usize>>();
        let block = local_block(&global, &shape, &[2..4, 0..6]);
        assert_eq!(block, (12..24).collect::<Vec<_>>());
        let block = local_block(&global, &shape, &[0..4, 5..6]);
        assert_eq!(block, vec![5, 11, 17, 23]);
    }
}
