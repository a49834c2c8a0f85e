//! Continuous bag-of-words baseline

use super::{ClassifierHead, Classifier};
use crate::error::{QrnnError, Result as QrnnResult};
use crate::layers::Mode;
use burn::config::Config;
use burn::module::Module;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

#[derive(Config, Debug)]
pub struct CbowConfig {
    pub inp_dim: usize,
    pub mlp_dim: usize,
    pub num_classes: usize,
    #[config(default = 0.5)]
    pub dropout_rate: f64,
}

impl CbowConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> QrnnResult<Cbow<B>> {
        let head = ClassifierHead::new(
            self.inp_dim,
            self.mlp_dim,
            self.num_classes,
            self.dropout_rate,
            device,
        )?;
        tracing::debug!(
            "Built CBOW classifier: {} -> {} -> {}",
            self.inp_dim,
            self.mlp_dim,
            self.num_classes
        );
        Ok(Cbow { head })
    }
}

/// Averages the embeddings over time and classifies the mean
#[derive(Module, Debug)]
pub struct Cbow<B: Backend> {
    head: ClassifierHead<B>,
}

impl<B: Backend> Cbow<B> {
    pub fn forward(&self, input: Tensor<B, 3>, mode: Mode) -> QrnnResult<Tensor<B, 2>> {
        let [batch_size, seq_len, features] = input.dims();
        if seq_len == 0 {
            return Err(QrnnError::shape("Cbow sequence length", ">= 1", seq_len));
        }
        if features != self.head.in_dim() {
            return Err(QrnnError::shape("Cbow input features", self.head.in_dim(), features));
        }
        if batch_size == 0 {
            return Ok(Tensor::zeros([0, self.head.num_classes()], &input.device()));
        }
        let summary = input.mean_dim(1).reshape([batch_size, features]);
        self.head.forward(summary, mode)
    }
}

impl<B: Backend> Classifier<B> for Cbow<B> {
    fn forward(&self, input: Tensor<B, 3>, mode: Mode) -> QrnnResult<Tensor<B, 2>> {
        Cbow::forward(self, input, mode)
    }

    fn num_classes(&self) -> usize {
        self.head.num_classes()
    }
}
