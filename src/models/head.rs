//! Classification head shared by every model

use crate::error::{QrnnError, Result};
use crate::layers::{Dense, Mode, ModeDropout};
use burn::module::Module;
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Three affine layers with ReLU and dropout between them
///
/// ```text
/// logits = L2(ReLU(dropout(L1(ReLU(dropout(L0(summary)))))))
/// ```
#[derive(Module, Debug)]
pub struct ClassifierHead<B: Backend> {
    l0: Dense<B>,
    l1: Dense<B>,
    l2: Dense<B>,
    dropout: ModeDropout,
}

impl<B: Backend> ClassifierHead<B> {
    /// Create a new head
    ///
    /// # Arguments
    /// * `in_dim` - Width of the sequence summary
    /// * `mlp_dim` - Width of the two hidden layers
    /// * `num_classes` - Number of output logits
    /// * `dropout_rate` - Dropout probability in `[0, 1)`
    /// * `device` - Device to create the module on
    pub fn new(
        in_dim: usize,
        mlp_dim: usize,
        num_classes: usize,
        dropout_rate: f64,
        device: &B::Device,
    ) -> Result<Self> {
        if in_dim == 0 || mlp_dim == 0 || num_classes == 0 {
            return Err(QrnnError::config(format!(
                "classifier head dims must be positive, got {} -> {} -> {}",
                in_dim, mlp_dim, num_classes
            )));
        }

        Ok(Self {
            l0: Dense::new(in_dim, mlp_dim, true, device),
            l1: Dense::new(mlp_dim, mlp_dim, true, device),
            l2: Dense::new(mlp_dim, num_classes, true, device),
            dropout: ModeDropout::new(dropout_rate)?,
        })
    }

    pub fn in_dim(&self) -> usize {
        self.l0.in_size()
    }

    pub fn num_classes(&self) -> usize {
        self.l2.out_size()
    }

    pub fn dropout_rate(&self) -> f64 {
        self.dropout.prob()
    }

    /// Map `[batch, in_dim]` summaries to `[batch, num_classes]` logits
    pub fn forward(&self, summary: Tensor<B, 2>, mode: Mode) -> Result<Tensor<B, 2>> {
        let q = self.l0.forward(summary)?;
        let q = activation::relu(self.dropout.forward(q, mode));
        let q = self.l1.forward(q)?;
        let q = activation::relu(self.dropout.forward(q, mode));
        self.l2.forward(q)
    }
}
