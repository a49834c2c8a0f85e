//! # Sentence Classifiers
//!
//! Every model maps an embedded batch `[batch, seq_len, inp_dim]` to
//! unnormalised logits `[batch, num_classes]` through the same
//! [`ClassifierHead`]; they differ only in how the sequence is summarised.
//!
//! | Model | Summary | Config |
//! |-------|---------|--------|
//! | [`Qrnn`] | Last hidden state of a QRNN stack | [`QrnnConfig`] |
//! | [`RnnClassifier`] | Last or mean LSTM hidden state | [`RnnConfig`] |
//! | [`Cbow`] | Mean of the input embeddings | [`CbowConfig`] |
//!
//! ## Example
//!
//! ```ignore
//! use qrnn::prelude::*;
//!
//! let model = QrnnConfig::new(50, 100, 2, 256, 2)
//!     .with_kernel_size(2)
//!     .init::<Backend>(&device)?;
//!
//! let logits = model.forward(embedded, Mode::Eval)?; // [batch, 2]
//! ```

pub mod cbow;
pub mod head;
pub mod qrnn;
pub mod rnn;

pub use cbow::{Cbow, CbowConfig};
pub use head::ClassifierHead;
pub use qrnn::{Qrnn, QrnnConfig};
pub use rnn::{Pooling, RnnClassifier, RnnConfig};

use crate::error::Result;
use crate::layers::Mode;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// A model that turns embedded sequences into class logits
pub trait Classifier<B: Backend> {
    /// `[batch, seq_len, inp_dim]` -> `[batch, num_classes]`
    fn forward(&self, input: Tensor<B, 3>, mode: Mode) -> Result<Tensor<B, 2>>;

    fn num_classes(&self) -> usize;
}
