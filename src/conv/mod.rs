//! Forward 2D cross-correlation.
//!
//! Provides several algorithms over the same contract: naive (reference),
//! Im2col+GEMV, and a row-parallel variant of the reference loop.

mod im2col;
mod naive;
mod parallel;
pub(crate) mod simd;

use im2col::conv2d_im2col;
use naive::conv2d_naive;
use parallel::conv2d_parallel;

use std::borrow::Cow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{check_len, zeroed, Error, Result};
use crate::padding::{compute_padding, zero_pad};
use crate::shape::{PaddingMode, Size};

/// Selects which convolution algorithm to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConvAlgorithm {
    /// Nested sliding-window loop (reference implementation).
    #[default]
    Naive,
    /// Im2col unfolding + tiled GEMV.
    Im2col,
    /// Reference loop with output rows split across the rayon thread pool.
    Parallel,
}

/// Output shape of [`convolve`] for the given geometry.
///
/// Pure: callers use this to size the output before running the kernel.
/// Rejects non-positive dimensions and filters larger than the padded signal.
pub fn conv_output_size(
    stride: Size,
    mode: PaddingMode,
    filter_size: Size,
    input_size: Size,
) -> Result<Size> {
    let padding = compute_padding(stride, mode, filter_size, input_size)?;
    let padded = padding.grow(input_size)?;
    if filter_size.rows > padded.rows || filter_size.columns > padded.columns {
        tracing::warn!(%filter_size, %padded, "filter exceeds padded signal");
        return Err(Error::InvalidShape(format!(
            "filter {} exceeds {} signal of {}",
            filter_size, mode, padded
        )));
    }
    let out = Size::new(
        (padded.rows - filter_size.rows) / stride.rows + 1,
        (padded.columns - filter_size.columns) / stride.columns + 1,
    );
    out.checked_len()?;
    Ok(out)
}

/// Cross-correlate `signal` with `filter` using the reference algorithm.
///
/// Returns the output buffer and its shape.
pub fn convolve(
    signal: &[f32],
    filter: &[f32],
    stride: Size,
    mode: PaddingMode,
    filter_size: Size,
    input_size: Size,
) -> Result<(Vec<f32>, Size)> {
    convolve_with(
        ConvAlgorithm::Naive,
        signal,
        filter,
        stride,
        mode,
        filter_size,
        input_size,
    )
}

/// [`convolve`] with an explicit algorithm.
pub fn convolve_with(
    algorithm: ConvAlgorithm,
    signal: &[f32],
    filter: &[f32],
    stride: Size,
    mode: PaddingMode,
    filter_size: Size,
    input_size: Size,
) -> Result<(Vec<f32>, Size)> {
    let out_size = conv_output_size(stride, mode, filter_size, input_size)?;
    let mut output = zeroed(out_size.len())?;
    convolve_into(
        algorithm,
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

/// Cross-correlate into a caller-sized `output`.
///
/// `output` must hold exactly [`conv_output_size`] elements. Every check and
/// scratch allocation happens before `output` is written, so on error it is
/// left exactly as provided.
pub fn convolve_into(
    algorithm: ConvAlgorithm,
    signal: &[f32],
    filter: &[f32],
    output: &mut [f32],
    stride: Size,
    mode: PaddingMode,
    filter_size: Size,
    input_size: Size,
) -> Result<Size> {
    tracing::trace!(?algorithm, %input_size, %filter_size, %stride, %mode, "conv2d");

    let out_size = conv_output_size(stride, mode, filter_size, input_size)?;
    check_len("signal", signal, input_size.len())?;
    check_len("filter", filter, filter_size.len())?;
    check_len("output", output, out_size.len())?;

    let padding = compute_padding(stride, mode, filter_size, input_size)?;
    let (working, in_size): (Cow<'_, [f32]>, Size) = if padding.is_zero() {
        (Cow::Borrowed(signal), input_size)
    } else {
        let (padded, padded_size) = zero_pad(signal, input_size, padding)?;
        (Cow::Owned(padded), padded_size)
    };

    conv2d(algorithm, &working, in_size, filter, filter_size, stride, out_size, output)?;
    Ok(out_size)
}

/// Dispatch convolution to the selected algorithm.
///
/// Input should already be padded and all shapes validated.
fn conv2d(
    algorithm: ConvAlgorithm,
    input: &[f32],
    in_size: Size,
    filter: &[f32],
    filter_size: Size,
    stride: Size,
    out_size: Size,
    output: &mut [f32],
) -> Result<()> {
    match algorithm {
        ConvAlgorithm::Naive => {
            conv2d_naive(input, in_size, filter, filter_size, stride, out_size, output);
        }
        ConvAlgorithm::Im2col => {
            conv2d_im2col(input, in_size, filter, filter_size, stride, out_size, output)?;
        }
        ConvAlgorithm::Parallel => {
            conv2d_parallel(input, in_size, filter, filter_size, stride, out_size, output);
        }
    }
    Ok(())
}
