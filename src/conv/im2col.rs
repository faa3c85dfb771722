//! Im2col + tiled GEMM convolution.
//!
//! Unfolds input patches into a column matrix, then multiplies the filter row
//! against it tile by tile for cache-friendly access patterns.

use crate::error::{zeroed, Error, Result};
use crate::shape::Size;

use super::simd;

const TILE: usize = 32;

/// Unfold input patches into a column matrix.
///
/// Output shape: rows = `filter rows * filter columns`, cols = `out rows * out columns`
fn im2col(
    input: &[f32],
    in_size: Size,
    filter_size: Size,
    stride: Size,
    out_size: Size,
    col: &mut [f32],
) {
    let col_cols = out_size.len();
    for kh in 0..filter_size.rows {
        for kw in 0..filter_size.columns {
            let row_off = (kh * filter_size.columns + kw) * col_cols;
            for oh in 0..out_size.rows {
                let ih = oh * stride.rows + kh;
                let dst = row_off + oh * out_size.columns;
                for ow in 0..out_size.columns {
                    let iw = ow * stride.columns + kw;
                    col[dst + ow] = input[in_size.index(ih, iw)];
                }
            }
        }
    }
}

/// Tiled vector-matrix multiply: c = a * B.
///
/// a: 1 x k, B: k x n, c: 1 x n
fn gemv_tiled(a: &[f32], b: &[f32], n: usize, k: usize, c: &mut [f32]) {
    c.fill(0.0);

    let mut pp = 0;
    while pp < k {
        let p_end = (pp + TILE).min(k);
        let mut jj = 0;
        while jj < n {
            let j_end = (jj + TILE).min(n);
            for p in pp..p_end {
                simd::axpy_f32(c, jj, b, p * n + jj, a[p], j_end - jj);
            }
            jj += TILE;
        }
        pp += TILE;
    }
}

/// Im2col + GEMM convolution.
///
/// Works with any filter size and stride. The column scratch is allocated
/// before `output` is touched, so an allocation failure leaves it unchanged.
pub(super) fn conv2d_im2col(
    input: &[f32],
    in_size: Size,
    filter: &[f32],
    filter_size: Size,
    stride: Size,
    out_size: Size,
    output: &mut [f32],
) -> Result<()> {
    let col_rows = filter_size.len();
    let col_cols = out_size.len();
    let elements = col_rows
        .checked_mul(col_cols)
        .ok_or(Error::AllocationFailure { elements: usize::MAX })?;
    let mut col = zeroed(elements)?;

    im2col(input, in_size, filter_size, stride, out_size, &mut col);
    gemv_tiled(filter, &col, col_cols, col_rows, output);
    Ok(())
}
