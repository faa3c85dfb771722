use rayon::prelude::*;

use crate::shape::Size;

use super::naive::conv_row;

/// Cross-correlation with output rows distributed over the rayon pool.
///
/// Each row is summed in the same order as the reference loop, so results
/// match the reference within float tolerance.
pub(super) fn conv2d_parallel(
    input: &[f32],
    in_size: Size,
    filter: &[f32],
    filter_size: Size,
    stride: Size,
    out_size: Size,
    output: &mut [f32],
) {
    output
        .par_chunks_mut(out_size.columns)
        .enumerate()
        .for_each(|(oh, row)| conv_row(input, in_size, filter, filter_size, stride, oh, row));
}
