//! Transposed (adjoint) convolution.
//!
//! Every signal sample scatters a scaled copy of the filter onto the output at
//! `(i * stride.rows, j * stride.columns)`; overlapping contributions add up.
//! Under [`PaddingMode::Same`] the border given by [`TransposeSamePadding`] is
//! cropped from the result. That trim is derived independently of the forward
//! [`compute_padding`](crate::padding::compute_padding).

use crate::conv::simd;
use crate::error::{check_len, zeroed, Error, Result};
use crate::padding::{validate_geometry, PaddingPolicy, TransposeSamePadding};
use crate::shape::{EdgePadding, PaddingMode, Size};

/// Untrimmed output shape: `(in - 1) * stride + filter` per axis.
///
/// Independent of the padding mode. `InvalidShape` when the result does not
/// fit in `usize`.
pub fn transposed_full_size(stride: Size, filter_size: Size, input_size: Size) -> Result<Size> {
    validate_geometry(stride, filter_size, input_size)?;
    let along = |input: usize, stride: usize, filter: usize| {
        (input - 1).checked_mul(stride)?.checked_add(filter)
    };
    let rows = along(input_size.rows, stride.rows, filter_size.rows);
    let columns = along(input_size.columns, stride.columns, filter_size.columns);
    let full = match (rows, columns) {
        (Some(rows), Some(columns)) => Size::new(rows, columns),
        _ => {
            return Err(Error::InvalidShape(format!(
                "transposed output of {} through {} at stride {} overflows usize",
                input_size, filter_size, stride
            )))
        }
    };
    full.checked_len()?;
    Ok(full)
}

/// Border cropped from the untrimmed output under `mode`.
pub fn transposed_trim(
    stride: Size,
    mode: PaddingMode,
    filter_size: Size,
    input_size: Size,
) -> Result<EdgePadding> {
    match mode {
        PaddingMode::Valid => {
            validate_geometry(stride, filter_size, input_size)?;
            Ok(EdgePadding::ZERO)
        }
        PaddingMode::Same => TransposeSamePadding.edges(stride, filter_size, input_size),
    }
}

/// Final output shape of [`transposed_convolve`], after any trim.
pub fn transposed_output_size(
    stride: Size,
    mode: PaddingMode,
    filter_size: Size,
    input_size: Size,
) -> Result<Size> {
    let full = transposed_full_size(stride, filter_size, input_size)?;
    let trim = transposed_trim(stride, mode, filter_size, input_size)?;
    Ok(Size::new(full.rows - trim.vertical(), full.columns - trim.horizontal()))
}

/// Upsample `signal` through `filter` and `stride`.
///
/// Returns the output buffer and its shape.
pub fn transposed_convolve(
    signal: &[f32],
    filter: &[f32],
    stride: Size,
    mode: PaddingMode,
    filter_size: Size,
    input_size: Size,
) -> Result<(Vec<f32>, Size)> {
    let out_size = transposed_output_size(stride, mode, filter_size, input_size)?;
    let mut output = zeroed(out_size.len())?;
    transposed_convolve_into(
        signal,
        filter,
        &mut output,
        stride,
        mode,
        filter_size,
        input_size,
    )?;
    Ok((output, out_size))
}

/// Transposed convolution into a caller-sized `output`.
///
/// `output` must hold exactly [`transposed_output_size`] elements. On error it
/// is left untouched.
pub fn transposed_convolve_into(
    signal: &[f32],
    filter: &[f32],
    output: &mut [f32],
    stride: Size,
    mode: PaddingMode,
    filter_size: Size,
    input_size: Size,
) -> Result<Size> {
    tracing::trace!(%input_size, %filter_size, %stride, %mode, "transposed conv2d");

    let full = transposed_full_size(stride, filter_size, input_size)?;
    let trim = transposed_trim(stride, mode, filter_size, input_size)?;
    let out_size = Size::new(full.rows - trim.vertical(), full.columns - trim.horizontal());
    check_len("signal", signal, input_size.len())?;
    check_len("filter", filter, filter_size.len())?;
    check_len("output", output, out_size.len())?;

    if trim.is_zero() {
        output.fill(0.0);
        scatter(signal, input_size, filter, filter_size, stride, full, output);
        return Ok(out_size);
    }

    tracing::debug!(%trim, %full, "trimming transposed output");
    let mut working = zeroed(full.len())?;
    scatter(signal, input_size, filter, filter_size, stride, full, &mut working);

    for (r, dst) in output.chunks_exact_mut(out_size.columns).enumerate() {
        let start = full.index(r + trim.top, trim.left);
        dst.copy_from_slice(&working[start..start + out_size.columns]);
    }
    Ok(out_size)
}

// Accumulates into `out`, which must start zeroed.
fn scatter(
    signal: &[f32],
    in_size: Size,
    filter: &[f32],
    filter_size: Size,
    stride: Size,
    out_size: Size,
    out: &mut [f32],
) {
    let fw = filter_size.columns;
    for (i, row) in signal.chunks_exact(in_size.columns).enumerate() {
        for (j, &v) in row.iter().enumerate() {
            for fr in 0..filter_size.rows {
                let dst = out_size.index(i * stride.rows + fr, j * stride.columns);
                simd::axpy_f32(out, dst, filter, fr * fw, v, fw);
            }
        }
    }
}
