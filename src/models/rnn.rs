//! LSTM baselines: last-step ("rnn") and mean-pooled ("rnn_pool") summaries

use super::{ClassifierHead, Classifier};
use crate::error::Result as QrnnResult;
use crate::layers::Mode;
use crate::rnn::Lstm;
use burn::config::Config;
use burn::constant;
use burn::module::Module;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use std::fmt;

/// How the LSTM hidden sequence is reduced to one vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Pooling {
    /// Hidden state of the final timestep
    #[default]
    Last,
    /// Mean of the hidden states over time
    Mean,
}

impl fmt::Display for Pooling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pooling::Last => write!(f, "last"),
            Pooling::Mean => write!(f, "mean"),
        }
    }
}

constant!(Pooling);

#[derive(Config, Debug)]
pub struct RnnConfig {
    pub inp_dim: usize,
    pub model_dim: usize,
    pub mlp_dim: usize,
    pub num_classes: usize,
    #[config(default = 0.5)]
    pub dropout_rate: f64,
    #[config(default = "Pooling::Last")]
    pub pooling: Pooling,
}

impl RnnConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> QrnnResult<RnnClassifier<B>> {
        let head = ClassifierHead::new(
            self.model_dim,
            self.mlp_dim,
            self.num_classes,
            self.dropout_rate,
            device,
        )?;
        tracing::debug!(
            "Built LSTM classifier ({:?} pooling): {} -> {}",
            self.pooling,
            self.inp_dim,
            self.model_dim
        );
        Ok(RnnClassifier {
            lstm: Lstm::new(self.inp_dim, self.model_dim, device),
            head,
            pooling: self.pooling,
        })
    }
}

#[derive(Module, Debug)]
pub struct RnnClassifier<B: Backend> {
    lstm: Lstm<B>,
    head: ClassifierHead<B>,
    #[module(skip)]
    pooling: Pooling,
}

impl<B: Backend> RnnClassifier<B> {
    pub fn pooling(&self) -> Pooling {
        self.pooling
    }

    pub fn forward(&self, input: Tensor<B, 3>, mode: Mode) -> QrnnResult<Tensor<B, 2>> {
        let hidden = self.lstm.forward(input)?;
        let [batch_size, seq_len, hidden_size] = hidden.dims();
        if batch_size == 0 {
            return Ok(Tensor::zeros([0, self.head.num_classes()], &hidden.device()));
        }

        let summary = match self.pooling {
            Pooling::Last => hidden.narrow(1, seq_len - 1, 1),
            Pooling::Mean => hidden.mean_dim(1),
        }
        .reshape([batch_size, hidden_size]);

        self.head.forward(summary, mode)
    }
}

impl<B: Backend> Classifier<B> for RnnClassifier<B> {
    fn forward(&self, input: Tensor<B, 3>, mode: Mode) -> QrnnResult<Tensor<B, 2>> {
        RnnClassifier::forward(self, input, mode)
    }

    fn num_classes(&self) -> usize {
        self.head.num_classes()
    }
}
