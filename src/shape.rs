use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Shape of a flat row-major buffer: `index = row * columns + column`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub rows: usize,
    pub columns: usize,
}

impl Size {
    pub const fn new(rows: usize, columns: usize) -> Self {
        Size { rows, columns }
    }

    /// A square `n x n` size.
    pub const fn square(n: usize) -> Self {
        Size { rows: n, columns: n }
    }

    /// Number of elements a buffer of this shape holds.
    ///
    /// Shapes coming from callers go through [`Size::checked_len`] first.
    pub const fn len(&self) -> usize {
        self.rows * self.columns
    }

    /// Element count, or `InvalidShape` when it does not fit in `usize`.
    pub fn checked_len(&self) -> Result<usize> {
        self.rows
            .checked_mul(self.columns)
            .ok_or_else(|| Error::InvalidShape(format!("{} elements overflow usize", self)))
    }

    pub const fn is_empty(&self) -> bool {
        self.rows == 0 || self.columns == 0
    }

    #[inline]
    pub const fn index(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    pub(crate) fn ensure_positive(&self, what: &str) -> Result<()> {
        if self.is_empty() {
            return Err(Error::InvalidShape(format!(
                "{} must have positive dimensions, got {}",
                what, self
            )));
        }
        Ok(())
    }

    /// Positive dimensions and an addressable element count.
    pub(crate) fn ensure_buffer(&self, what: &str) -> Result<usize> {
        self.ensure_positive(what)?;
        self.checked_len()
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.columns)
    }
}

impl From<(usize, usize)> for Size {
    fn from((rows, columns): (usize, usize)) -> Self {
        Size { rows, columns }
    }
}

/// Padding policy applied before a convolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PaddingMode {
    /// No padding. The output shrinks by the filter footprint.
    #[default]
    Valid,
    /// Zero padding chosen so the output is `ceil(input / stride)` per axis.
    Same,
}

impl fmt::Display for PaddingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaddingMode::Valid => write!(f, "valid"),
            PaddingMode::Same => write!(f, "same"),
        }
    }
}

/// Per-edge padding amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EdgePadding {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl EdgePadding {
    pub const ZERO: EdgePadding = EdgePadding { top: 0, bottom: 0, left: 0, right: 0 };

    pub const fn new(top: usize, bottom: usize, left: usize, right: usize) -> Self {
        EdgePadding { top, bottom, left, right }
    }

    /// Same amount on every edge.
    pub const fn uniform(n: usize) -> Self {
        EdgePadding { top: n, bottom: n, left: n, right: n }
    }

    pub const fn is_zero(&self) -> bool {
        self.top == 0 && self.bottom == 0 && self.left == 0 && self.right == 0
    }

    pub const fn vertical(&self) -> usize {
        self.top.saturating_add(self.bottom)
    }

    pub const fn horizontal(&self) -> usize {
        self.left.saturating_add(self.right)
    }

    /// Size of a buffer of shape `size` after this padding is added.
    ///
    /// `InvalidShape` when either padded dimension overflows `usize`.
    pub fn grow(&self, size: Size) -> Result<Size> {
        let rows = size.rows.checked_add(self.top).and_then(|r| r.checked_add(self.bottom));
        let columns = size.columns.checked_add(self.left).and_then(|c| c.checked_add(self.right));
        match (rows, columns) {
            (Some(rows), Some(columns)) => Ok(Size::new(rows, columns)),
            _ => Err(Error::InvalidShape(format!("padding {} overflows {}", self, size))),
        }
    }
}

impl fmt::Display for EdgePadding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "top={} bottom={} left={} right={}",
            self.top, self.bottom, self.left, self.right
        )
    }
}
