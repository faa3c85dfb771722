use crate::shape::Size;

use super::simd;

/// Reference sliding-window cross-correlation (no kernel flip).
///
/// `input` must already be padded. Shapes are validated by the caller.
pub(super) fn conv2d_naive(
    input: &[f32],
    in_size: Size,
    filter: &[f32],
    filter_size: Size,
    stride: Size,
    out_size: Size,
    output: &mut [f32],
) {
    for (oh, row) in output.chunks_exact_mut(out_size.columns).enumerate() {
        conv_row(input, in_size, filter, filter_size, stride, oh, row);
    }
}

/// Fill one output row `oh`.
pub(super) fn conv_row(
    input: &[f32],
    in_size: Size,
    filter: &[f32],
    filter_size: Size,
    stride: Size,
    oh: usize,
    row: &mut [f32],
) {
    let kw = filter_size.columns;
    for (ow, out) in row.iter_mut().enumerate() {
        let mut sum = 0.0f32;
        for kh in 0..filter_size.rows {
            let ih = oh * stride.rows + kh;
            let iw = ow * stride.columns;
            sum += simd::dot_f32(input, in_size.index(ih, iw), filter, kh * kw, kw);
        }
        *out = sum;
    }
}
