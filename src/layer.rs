use std::fmt;

use crate::config::ConvParams;
use crate::conv::{conv_output_size, convolve_into, convolve_with};
use crate::error::{check_len, Result};
use crate::shape::Size;
use crate::transpose::{transposed_convolve, transposed_convolve_into, transposed_output_size};

/// Single-channel 2D convolution with an owned filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Conv2d {
    filter: Vec<f32>,
    filter_size: Size,
    params: ConvParams,
}

impl Conv2d {
    pub fn new(filter: Vec<f32>, filter_size: Size) -> Result<Self> {
        Self::with_params(filter, filter_size, ConvParams::default())
    }

    pub fn with_params(filter: Vec<f32>, filter_size: Size, params: ConvParams) -> Result<Self> {
        let len = filter_size.ensure_buffer("filter")?;
        params.stride.ensure_positive("stride")?;
        check_len("filter", &filter, len)?;
        Ok(Conv2d { filter, filter_size, params })
    }

    pub fn filter(&self) -> &[f32] {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut [f32] {
        &mut self.filter
    }

    pub fn filter_size(&self) -> Size {
        self.filter_size
    }

    pub fn params(&self) -> &ConvParams {
        &self.params
    }

    /// Output shape of [`Conv2d::forward`] for an input of `input_size`.
    pub fn output_size(&self, input_size: Size) -> Result<Size> {
        conv_output_size(self.params.stride, self.params.padding, self.filter_size, input_size)
    }

    /// Output shape of [`Conv2d::transposed`] for an input of `input_size`.
    pub fn transposed_output_size(&self, input_size: Size) -> Result<Size> {
        transposed_output_size(
            self.params.stride,
            self.params.padding,
            self.filter_size,
            input_size,
        )
    }

    pub fn forward(&self, signal: &[f32], input_size: Size) -> Result<(Vec<f32>, Size)> {
        let p = &self.params;
        convolve_with(
            p.algorithm,
            signal,
            &self.filter,
            p.stride,
            p.padding,
            self.filter_size,
            input_size,
        )
    }

    pub fn forward_into(
        &self,
        signal: &[f32],
        input_size: Size,
        output: &mut [f32],
    ) -> Result<Size> {
        let p = &self.params;
        convolve_into(
            p.algorithm,
            signal,
            &self.filter,
            output,
            p.stride,
            p.padding,
            self.filter_size,
            input_size,
        )
    }

    pub fn transposed(&self, signal: &[f32], input_size: Size) -> Result<(Vec<f32>, Size)> {
        let p = &self.params;
        transposed_convolve(signal, &self.filter, p.stride, p.padding, self.filter_size, input_size)
    }

    pub fn transposed_into(
        &self,
        signal: &[f32],
        input_size: Size,
        output: &mut [f32],
    ) -> Result<Size> {
        let p = &self.params;
        transposed_convolve_into(
            signal,
            &self.filter,
            output,
            p.stride,
            p.padding,
            self.filter_size,
            input_size,
        )
    }
}

impl fmt::Display for Conv2d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Conv2d(filter={}, stride={}, padding={}, algorithm={:?})",
            self.filter_size, self.params.stride, self.params.padding, self.params.algorithm
        )
    }
}
