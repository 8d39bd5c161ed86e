//! Splitting rules for distributed axes
use std::ops::Range;

use crate::{errors::MpiFftError, types::Exchange};

/// Index range of part `p` of `n` indices split as evenly as possible over `parts`, the first
/// `n % parts` parts holding one extra index.
pub fn balanced_range(n: usize, parts: usize, p: usize) -> Range<usize> {
    let q = n / parts;
    let r = n % parts;
    let start = p * q + p.min(r);
    let len = q + usize::from(p < r);
    start..start + len
}

/// Split an axis of global extent `extent` over `parts` processes.
///
/// Uniform exchanges require every block to be the same size. When the axis is the conjugate symmetry
/// reduced axis and `extent` does not divide evenly, its last (Nyquist) index is dropped from the
/// distribution and only `extent - 1` indices are split. Padded uniform exchanges pad the blocks of the reduced axis instead, so its blocks may differ.
/// Generalised exchanges accept any extent no smaller than `parts`.
///
/// # Arguments
/// * `axis` - Array axis being split, for error reporting.
/// * `extent` - Global extent of the axis.
/// * `parts` - Number of processes sharing the axis.
/// * `exchange` - Exchange strategy of the transform.
/// * `reduced` - Whether the axis is the conjugate symmetry reduced axis.
pub fn split_extent(
    axis: usize,
    extent: usize,
    parts: usize,
    exchange: Exchange,
    reduced: bool,
) -> Result<Vec<Range<usize>>, MpiFftError> {
    let usable = if reduced && exchange == Exchange::Uniform && parts > 0 && extent % parts != 0 {
        extent.saturating_sub(1)
    } else {
        extent
    };

    if parts == 0 || usable < parts {
        return Err(MpiFftError::Shape {
            axis,
            extent,
            parts,
            reason: "fewer indices than processes",
        });
    }

    let balanced = match exchange {
        Exchange::Generalized => true,
        Exchange::PaddedUniform => reduced,
        Exchange::Uniform => false,
    };

    if !balanced && usable % parts != 0 {
        return Err(MpiFftError::Shape {
            axis,
            extent,
            parts,
            reason: "not divisible, select the padded uniform or generalized exchange",
        });
    }

    Ok((0..parts).map(|p| balanced_range(usable, parts, p)).collect())
}
