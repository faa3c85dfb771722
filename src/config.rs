#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::conv::ConvAlgorithm;
use crate::shape::{PaddingMode, Size};

/// Convolution settings shared by the forward and transposed passes.
///
/// Defaults to stride 1x1, `Valid` padding and the naive algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConvParams {
    pub stride: Size,
    pub padding: PaddingMode,
    pub algorithm: ConvAlgorithm,
}

impl Default for ConvParams {
    fn default() -> Self {
        ConvParams {
            stride: Size::square(1),
            padding: PaddingMode::Valid,
            algorithm: ConvAlgorithm::Naive,
        }
    }
}

impl ConvParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stride(mut self, stride: impl Into<Size>) -> Self {
        self.stride = stride.into();
        self
    }

    pub fn with_padding(mut self, padding: PaddingMode) -> Self {
        self.padding = padding;
        self
    }

    /// Forward algorithm. The transposed pass always scatters directly.
    pub fn with_algorithm(mut self, algorithm: ConvAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }
}
