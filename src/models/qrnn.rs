//! QRNN sentence classifier
//!
//! A stack of [`QrnnLayer`]s followed by a [`ClassifierHead`] applied to the
//! hidden state of the final timestep.

use super::{ClassifierHead, Classifier};
use crate::error::{QrnnError, Result as QrnnResult};
use crate::layers::Mode;
use crate::rnn::{Gating, QrnnLayer};
use burn::config::Config;
use burn::module::Module;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Construction parameters for [`Qrnn`]
#[derive(Config, Debug)]
pub struct QrnnConfig {
    /// Embedding width of the input sequence
    pub inp_dim: usize,
    /// Hidden width of every QRNN layer
    pub model_dim: usize,
    /// Stack depth (>= 1)
    pub num_layers: usize,
    /// Hidden width of the classification head
    pub mlp_dim: usize,
    /// Number of output logits
    pub num_classes: usize,
    /// Pre-activation width: 1, 2, or a causal convolution for >= 3
    #[config(default = 3)]
    pub kernel_size: usize,
    /// Dropout probability in the head, active only in [`Mode::Train`]
    #[config(default = 0.5)]
    pub dropout_rate: f64,
    #[config(default = "Gating::DoubleScaled")]
    pub gating: Gating,
}

impl QrnnConfig {
    /// Build the model
    ///
    /// # Errors
    /// [`QrnnError::Configuration`] for `num_layers < 1`, a zero width,
    /// `kernel_size == 0` or a dropout rate outside `[0, 1)`.
    pub fn init<B: Backend>(&self, device: &B::Device) -> QrnnResult<Qrnn<B>> {
        if self.num_layers < 1 {
            return Err(QrnnError::config(format!(
                "num_layers must be >= 1, got {}",
                self.num_layers
            )));
        }

        let mut layers = Vec::with_capacity(self.num_layers);
        let mut x_dim = self.inp_dim;
        for _ in 0..self.num_layers {
            layers.push(
                QrnnLayer::new(x_dim, self.model_dim, self.kernel_size, device)?
                    .with_gating(self.gating),
            );
            x_dim = self.model_dim;
        }

        let head = ClassifierHead::new(
            self.model_dim,
            self.mlp_dim,
            self.num_classes,
            self.dropout_rate,
            device,
        )?;

        tracing::debug!(
            "Built QRNN classifier: {} layers, {} -> {}, kernel_size={}, head {} -> {} -> {}",
            self.num_layers,
            self.inp_dim,
            self.model_dim,
            self.kernel_size,
            self.model_dim,
            self.mlp_dim,
            self.num_classes
        );

        Ok(Qrnn {
            layers,
            head,
            inp_dim: self.inp_dim,
            model_dim: self.model_dim,
        })
    }
}

/// Stacked QRNN classifier
///
/// # Type Parameters
/// * `B` - The backend type
#[derive(Module, Debug)]
pub struct Qrnn<B: Backend> {
    /// Layer `i`'s output sequence is layer `i + 1`'s input
    layers: Vec<QrnnLayer<B>>,
    head: ClassifierHead<B>,
    #[module(skip)]
    inp_dim: usize,
    #[module(skip)]
    model_dim: usize,
}

impl<B: Backend> Qrnn<B> {
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> &[QrnnLayer<B>] {
        &self.layers
    }

    pub fn inp_dim(&self) -> usize {
        self.inp_dim
    }

    pub fn model_dim(&self) -> usize {
        self.model_dim
    }

    /// Run the input through every layer of the stack
    ///
    /// # Arguments
    /// * `input` - `[batch, seq_len, inp_dim]`
    ///
    /// # Returns
    /// The top layer's hidden states, `[batch, seq_len, model_dim]`
    pub fn forward_sequence(&self, input: Tensor<B, 3>) -> QrnnResult<Tensor<B, 3>> {
        let mut x = input;
        for layer in &self.layers {
            x = layer.forward(x)?;
        }
        Ok(x)
    }

    /// Classify a batch of sequences
    ///
    /// The summary is the literal last timestep; padded sequences are not
    /// masked.
    ///
    /// # Arguments
    /// * `input` - `[batch, seq_len, inp_dim]`, `seq_len >= 1`
    /// * `mode` - Enables head dropout in [`Mode::Train`]
    ///
    /// # Returns
    /// Unnormalised logits `[batch, num_classes]`
    pub fn forward(&self, input: Tensor<B, 3>, mode: Mode) -> QrnnResult<Tensor<B, 2>> {
        let [batch_size, seq_len, _] = input.dims();
        if seq_len == 0 {
            return Err(QrnnError::shape("Qrnn sequence length", ">= 1", seq_len));
        }
        if batch_size == 0 {
            // Still rejects a wrong feature width
            let device = input.device();
            self.forward_sequence(input)?;
            return Ok(Tensor::zeros([0, self.head.num_classes()], &device));
        }

        let hidden = self.forward_sequence(input)?;
        let summary = hidden
            .narrow(1, seq_len - 1, 1)
            .reshape([batch_size, self.model_dim]);

        self.head.forward(summary, mode)
    }
}

impl<B: Backend> Classifier<B> for Qrnn<B> {
    fn forward(&self, input: Tensor<B, 3>, mode: Mode) -> QrnnResult<Tensor<B, 2>> {
        Qrnn::forward(self, input, mode)
    }

    fn num_classes(&self) -> usize {
        self.head.num_classes()
    }
}
