//! Conversions between nested row grids and flat row-major buffers.

use crate::error::{check_len, Error, Result};
use crate::shape::Size;

/// Flatten a grid of equal-length rows into a row-major buffer.
pub fn flatten<R: AsRef<[f32]>>(grid: &[R]) -> Result<(Vec<f32>, Size)> {
    let columns = grid.first().map(|r| r.as_ref().len()).unwrap_or(0);
    let size = Size::new(grid.len(), columns);
    let len = size.ensure_buffer("grid")?;

    let mut flat = Vec::with_capacity(len);
    for (r, row) in grid.iter().enumerate() {
        let row = row.as_ref();
        if row.len() != columns {
            return Err(Error::InvalidShape(format!(
                "ragged grid: row {} has {} columns, expected {}",
                r,
                row.len(),
                columns
            )));
        }
        flat.extend_from_slice(row);
    }
    Ok((flat, size))
}

/// Split a row-major buffer back into rows.
pub fn unflatten(buffer: &[f32], size: Size) -> Result<Vec<Vec<f32>>> {
    let len = size.ensure_buffer("buffer")?;
    check_len("buffer", buffer, len)?;
    Ok(buffer.chunks_exact(size.columns).map(<[f32]>::to_vec).collect())
}

/// Rotate a buffer by 180 degrees: `(r, c)` moves to `(rows-1-r, columns-1-c)`.
///
/// A flipped filter turns cross-correlation into true convolution. At stride
/// 1, correlating a signal padded by `filter - 1` on every edge with the
/// flipped filter gives the same result as [`crate::transposed_convolve`].
pub fn flip180(buffer: &[f32], size: Size) -> Result<Vec<f32>> {
    let len = size.ensure_buffer("buffer")?;
    check_len("buffer", buffer, len)?;
    // Row-major reversal reverses both axes at once.
    Ok(buffer.iter().rev().copied().collect())
}
