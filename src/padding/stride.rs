use crate::error::{check_len, zeroed, Error, Result};
use crate::shape::{EdgePadding, Size};

use super::{shrink, zero_pad};

/// Shape of `input_size` after inserting `stride - 1` zeros between samples.
///
/// `InvalidShape` when the dilated shape does not fit in `usize`.
pub fn stride_padded_size(input_size: Size, stride: Size) -> Result<Size> {
    let grow = |dim: usize, s: usize| {
        s.saturating_sub(1).checked_mul(dim.saturating_sub(1))?.checked_add(dim)
    };
    let rows = grow(input_size.rows, stride.rows);
    let columns = grow(input_size.columns, stride.columns);
    let out = match (rows, columns) {
        (Some(rows), Some(columns)) => Size::new(rows, columns),
        _ => {
            return Err(Error::InvalidShape(format!(
                "{} at stride {} overflows usize",
                input_size, stride
            )))
        }
    };
    out.checked_len()?;
    Ok(out)
}

/// Insert `stride - 1` zero gaps between consecutive samples on each axis.
///
/// Sample `(r, c)` lands at `(r * stride.rows, c * stride.columns)`. Each axis
/// is handled on its own, so a stride of 1 along one axis leaves that axis
/// dense while the other is still dilated.
pub fn stride_pad(input: &[f32], input_size: Size, stride: Size) -> Result<(Vec<f32>, Size)> {
    let len = input_size.ensure_buffer("input")?;
    stride.ensure_positive("stride")?;
    check_len("input", input, len)?;

    let out_size = stride_padded_size(input_size, stride)?;
    if out_size == input_size {
        return Ok((input.to_vec(), out_size));
    }

    let mut out = zeroed(out_size.len())?;
    for (r, row) in input.chunks_exact(input_size.columns).enumerate() {
        let base = out_size.index(r * stride.rows, 0);
        for (c, &v) in row.iter().enumerate() {
            out[base + c * stride.columns] = v;
        }
    }
    Ok((out, out_size))
}

/// [`stride_pad`] followed by a zero border `rings` pixels wide.
pub fn stride_pad_bordered(
    input: &[f32],
    input_size: Size,
    stride: Size,
    rings: usize,
) -> Result<(Vec<f32>, Size)> {
    let (out, size) = stride_pad(input, input_size, stride)?;
    if rings == 0 {
        return Ok((out, size));
    }
    zero_pad(&out, size, EdgePadding::uniform(rings))
}

/// [`stride_pad`] followed by removing `by` rows and columns from every edge.
pub fn stride_pad_shrunk(
    input: &[f32],
    input_size: Size,
    stride: Size,
    by: usize,
) -> Result<(Vec<f32>, Size)> {
    let (out, size) = stride_pad(input, input_size, stride)?;
    shrink(&out, size, by)
}
