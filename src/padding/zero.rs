use crate::error::{check_len, zeroed, Error, Result};
use crate::shape::{EdgePadding, PaddingMode, Size};

use super::compute_padding;

/// Copy `input` into the interior of a new zero buffer grown by `padding`.
///
/// The source is left untouched. An empty source yields an all-zero buffer
/// of the padded size.
pub fn zero_pad(
    input: &[f32],
    input_size: Size,
    padding: EdgePadding,
) -> Result<(Vec<f32>, Size)> {
    input_size.ensure_buffer("input")?;
    let padded_size = padding.grow(input_size)?;
    let mut padded = zeroed(padded_size.checked_len()?)?;

    if input.is_empty() {
        return Ok((padded, padded_size));
    }
    check_len("input", input, input_size.len())?;

    for (r, row) in input.chunks_exact(input_size.columns).enumerate() {
        let start = padded_size.index(r + padding.top, padding.left);
        padded[start..start + input_size.columns].copy_from_slice(row);
    }
    Ok((padded, padded_size))
}

/// Zero-pad `input` by the "same" padding a forward convolution with
/// `filter_size` and `stride` would apply.
pub fn zero_pad_same(
    input: &[f32],
    input_size: Size,
    filter_size: Size,
    stride: Size,
) -> Result<(Vec<f32>, Size)> {
    let padding = compute_padding(stride, PaddingMode::Same, filter_size, input_size)?;
    zero_pad(input, input_size, padding)
}

/// Surround `input` with a one-pixel ring of zeros.
pub fn border_pad(input: &[f32], input_size: Size) -> Result<(Vec<f32>, Size)> {
    zero_pad(input, input_size, EdgePadding::uniform(1))
}

/// Remove `by` rows and columns from every edge of `input`.
pub fn shrink(input: &[f32], input_size: Size, by: usize) -> Result<(Vec<f32>, Size)> {
    let len = input_size.ensure_buffer("input")?;
    check_len("input", input, len)?;
    if by == 0 {
        return Ok((input.to_vec(), input_size));
    }
    if by >= input_size.rows.div_ceil(2) || by >= input_size.columns.div_ceil(2) {
        return Err(Error::InvalidShape(format!(
            "cannot shrink {} by {} on every edge",
            input_size, by
        )));
    }

    let out_size = Size::new(input_size.rows - 2 * by, input_size.columns - 2 * by);
    let mut out = Vec::new();
    out.try_reserve_exact(out_size.len())
        .map_err(|_| Error::AllocationFailure { elements: out_size.len() })?;
    for row in input.chunks_exact(input_size.columns).skip(by).take(out_size.rows) {
        out.extend_from_slice(&row[by..by + out_size.columns]);
    }
    Ok((out, out_size))
}
