//! Shape-checked affine transform
//!
//! Thin wrapper over Burn's [`Linear`] that refuses inputs whose last dimension
//! does not match the configured input width instead of failing deep inside a
//! matmul.

use crate::error::{QrnnError, Result};
use burn::module::Module;
use burn::nn::{Initializer, Linear, LinearConfig};
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Dense (fully connected) layer: `y = x·Wᵀ + b`
///
/// Applied over any rank; the transform broadcasts over the leading dims so a
/// `[batch, seq, in_size]` input becomes `[batch, seq, out_size]`.
#[derive(Module, Debug)]
pub struct Dense<B: Backend> {
    linear: Linear<B>,
    #[module(skip)]
    in_size: usize,
    #[module(skip)]
    out_size: usize,
}

impl<B: Backend> Dense<B> {
    /// Create a new dense layer with Burn's default (Kaiming uniform) init
    ///
    /// # Arguments
    /// * `in_size` - Width of the input features
    /// * `out_size` - Width of the output features
    /// * `bias` - Whether to learn an additive bias
    /// * `device` - Device to create the module on
    pub fn new(in_size: usize, out_size: usize, bias: bool, device: &B::Device) -> Self {
        let linear = LinearConfig::new(in_size, out_size)
            .with_bias(bias)
            .init(device);

        Self {
            linear,
            in_size,
            out_size,
        }
    }

    /// Create a dense layer with an explicit weight initializer
    pub fn with_initializer(
        in_size: usize,
        out_size: usize,
        bias: bool,
        initializer: Initializer,
        device: &B::Device,
    ) -> Self {
        let linear = LinearConfig::new(in_size, out_size)
            .with_bias(bias)
            .with_initializer(initializer)
            .init(device);

        Self {
            linear,
            in_size,
            out_size,
        }
    }

    pub fn in_size(&self) -> usize {
        self.in_size
    }

    pub fn out_size(&self) -> usize {
        self.out_size
    }

    pub fn has_bias(&self) -> bool {
        self.linear.bias.is_some()
    }

    /// Weight matrix, stored as `[in_size, out_size]`
    pub fn weight(&self) -> Tensor<B, 2> {
        self.linear.weight.val()
    }

    /// Bias vector `[out_size]`, if the layer has one
    pub fn bias(&self) -> Option<Tensor<B, 1>> {
        self.linear.bias.as_ref().map(|b| b.val())
    }

    /// Apply the transform
    ///
    /// # Errors
    /// [`QrnnError::Shape`] if the last dimension of `input` is not `in_size`.
    pub fn forward<const D: usize>(&self, input: Tensor<B, D>) -> Result<Tensor<B, D>> {
        let dims = input.dims();
        let last = dims[D - 1];
        if last != self.in_size {
            return Err(QrnnError::shape("Dense::forward", self.in_size, last));
        }
        Ok(self.linear.forward(input))
    }
}
