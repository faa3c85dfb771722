//! Padding arithmetic and the zero/stride padders.
//!
//! Forward and transposed convolution derive "same" padding with different
//! formulas. Both are kept as named policies so callers can see which numeric
//! behavior they get:
//!
//! - [`ConvSamePadding`]: `out = ceil(in / stride)`,
//!   `total = max((out - 1) * stride + filter - in, 0)`.
//! - [`TransposeSamePadding`]: `total = max(filter - stride, 0)`, cropped from
//!   the untrimmed transposed output.
//!
//! In both, the leading edge (top/left) gets `floor(total / 2)` and the
//! trailing edge (bottom/right) the remainder.

mod stride;
mod zero;

pub use stride::{stride_pad, stride_pad_bordered, stride_pad_shrunk, stride_padded_size};
pub use zero::{border_pad, shrink, zero_pad, zero_pad_same};

use crate::error::{Error, Result};
use crate::shape::{EdgePadding, PaddingMode, Size};

/// A rule deriving per-edge padding from stride, filter and input shapes.
pub trait PaddingPolicy {
    fn edges(&self, stride: Size, filter_size: Size, input_size: Size) -> Result<EdgePadding>;
}

/// "Same" padding for forward convolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvSamePadding;

/// Border trimmed from a transposed convolution under "same" padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransposeSamePadding;

impl PaddingPolicy for ConvSamePadding {
    fn edges(&self, stride: Size, filter_size: Size, input_size: Size) -> Result<EdgePadding> {
        validate_geometry(stride, filter_size, input_size)?;

        // (out - 1) * stride + filter - input, with (out - 1) * stride < input.
        let along = |input: usize, stride: usize, filter: usize| {
            let out = input.div_ceil(stride);
            filter.saturating_sub(input - (out - 1) * stride)
        };
        let (top, bottom) = split(along(input_size.rows, stride.rows, filter_size.rows));
        let (left, right) = split(along(input_size.columns, stride.columns, filter_size.columns));
        Ok(EdgePadding { top, bottom, left, right })
    }
}

impl PaddingPolicy for TransposeSamePadding {
    fn edges(&self, stride: Size, filter_size: Size, input_size: Size) -> Result<EdgePadding> {
        validate_geometry(stride, filter_size, input_size)?;

        let (top, bottom) = split(filter_size.rows.saturating_sub(stride.rows));
        let (left, right) = split(filter_size.columns.saturating_sub(stride.columns));
        Ok(EdgePadding { top, bottom, left, right })
    }
}

/// Per-edge padding a forward convolution applies under `mode`.
///
/// `Valid` always yields zero padding; `Same` follows [`ConvSamePadding`].
/// Depends only on the shapes, never on buffer contents.
pub fn compute_padding(
    stride: Size,
    mode: PaddingMode,
    filter_size: Size,
    input_size: Size,
) -> Result<EdgePadding> {
    let padding = match mode {
        PaddingMode::Valid => {
            validate_geometry(stride, filter_size, input_size)?;
            EdgePadding::ZERO
        }
        PaddingMode::Same => ConvSamePadding.edges(stride, filter_size, input_size)?,
    };
    tracing::debug!(%stride, %mode, %filter_size, %input_size, %padding, "computed padding");
    Ok(padding)
}

// Leading edge gets the floor half.
fn split(total: usize) -> (usize, usize) {
    let lead = total / 2;
    (lead, total - lead)
}

pub(crate) fn validate_geometry(stride: Size, filter_size: Size, input_size: Size) -> Result<()> {
    let checked = stride
        .ensure_positive("stride")
        .and_then(|_| filter_size.ensure_buffer("filter"))
        .and_then(|_| input_size.ensure_buffer("input"))
        .map(|_| ());
    if let Err(Error::InvalidShape(reason)) = &checked {
        tracing::warn!(
            %stride, %filter_size, %input_size, %reason,
            "rejecting convolution geometry"
        );
    }
    checked
}
