//! Dense 2D convolution kernels on flat row-major `f32` buffers.
//!
//! Provides forward cross-correlation, transposed (adjoint) convolution and
//! the padding arithmetic relating input, filter and stride sizes under
//! `Valid` and `Same` padding. Buffers are caller-owned; every output size is
//! available from a pure function so callers can allocate before running a
//! kernel.
//!
//! # Example
//!
//! ```
//! use convcore::{convolve, PaddingMode, Size};
//!
//! let signal = vec![1.0f32; 9];
//! let filter = vec![1.0f32; 4];
//! let (out, size) = convolve(
//!     &signal,
//!     &filter,
//!     Size::square(1),
//!     PaddingMode::Valid,
//!     Size::square(2),
//!     Size::square(3),
//! )
//! .unwrap();
//! assert_eq!(size, Size::square(2));
//! assert_eq!(out, vec![4.0; 4]);
//! ```

/// Size, padding mode and per-edge padding value types.
pub mod shape;
/// Error type shared by all kernels.
pub mod error;
/// Padding arithmetic, zero padding and stride padding.
pub mod padding;
/// Forward cross-correlation and algorithm selection.
pub mod conv;
/// Transposed (adjoint) convolution.
pub mod transpose;
/// Grid flattening and filter rotation.
pub mod grid;
/// Convolution parameters.
pub mod config;
/// Filter-owning convolution wrapper.
pub mod layer;

pub use config::ConvParams;
pub use conv::{conv_output_size, convolve, convolve_into, convolve_with, ConvAlgorithm};
pub use error::{Error, Result};
pub use grid::{flatten, flip180, unflatten};
pub use layer::Conv2d;
pub use padding::{
    border_pad, compute_padding, shrink, stride_pad, stride_pad_bordered, stride_pad_shrunk,
    stride_padded_size, zero_pad, zero_pad_same, ConvSamePadding, PaddingPolicy,
    TransposeSamePadding,
};
pub use shape::{EdgePadding, PaddingMode, Size};
pub use transpose::{
    transposed_convolve, transposed_convolve_into, transposed_full_size, transposed_output_size,
    transposed_trim,
};
