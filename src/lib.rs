//! # QRNN - Quasi-Recurrent Neural Networks (Rust)
//!
//! Quasi-recurrent sentence classifiers built on the Burn framework.
//!
//! ## Features
//!
//! - **QRNN layers**: parallel pre-activation (pointwise, two-step, or causal
//!   convolution) followed by a minimal elementwise recurrence
//! - **Stacked classifier**: QRNN layers plus a dropout/ReLU MLP head
//! - **Baselines**: bag-of-words and LSTM (last-step or mean-pooled)
//! - **Explicit train/eval mode**: dropout never guesses from the backend
//! - **Training loop**: Adam, trailing accuracy and time-per-token reports
//!
//! ## Quick Start
//!
//! ```rust
//! use burn::backend::NdArray;
//! use burn::tensor::Tensor;
//! use qrnn::prelude::*;
//!
//! type Backend = NdArray<f32>;
//! let device = Default::default();
//!
//! let model = QrnnConfig::new(3, 4, 1, 4, 2)
//!     .with_kernel_size(1)
//!     .init::<Backend>(&device)
//!     .unwrap();
//!
//! let input = Tensor::<Backend, 3>::zeros([2, 5, 3], &device);
//! let logits = model.forward(input, Mode::Eval).unwrap();
//! assert_eq!(logits.dims(), [2, 2]);
//! ```
//!
//! ## Layer-level Usage
//!
//! ```ignore
//! use qrnn::rnn::{Gating, QrnnLayer};
//!
//! let layer = QrnnLayer::<Backend>::new(50, 100, 3, &device)?
//!     .with_gating(Gating::Canonical);
//! let hidden = layer.forward(embedded)?; // [batch, seq_len, 100]
//! ```

pub mod cells;
pub mod error;
pub mod layers;
pub mod models;
pub mod rnn;
pub mod training;

pub use error::{QrnnError, Result};

pub mod prelude {
    pub use crate::cells::{strnn, Direction, LstmCell};
    pub use crate::error::{QrnnError, Result};
    pub use crate::layers::{Dense, Mode, ModeDropout};
    pub use crate::models::{
        Cbow, CbowConfig, Classifier, ClassifierHead, Pooling, Qrnn, QrnnConfig, RnnClassifier,
        RnnConfig,
    };
    pub use crate::rnn::{Gating, Lstm, QrnnLayer};
    pub use crate::training::{Batch, Trainer, TrainingConfig};
}
