//! # Training Loop
//!
//! A minimal supervised loop for the classifiers in [`crate::models`].
//! Callers own data loading and embedding: they pass pre-embedded
//! [`Batch`]es for training (autodiff backend) and evaluation (inner backend).
//!
//! ```ignore
//! use burn::backend::{Autodiff, NdArray};
//! use qrnn::prelude::*;
//!
//! type Train = Autodiff<NdArray<f32>>;
//!
//! let model = QrnnConfig::new(50, 100, 2, 256, 2).init::<Train>(&device)?;
//! let trainer = Trainer::new(TrainingConfig::new().with_training_steps(500))?;
//! let outcome = trainer.fit(model, &train_batches, &eval_batches)?;
//! ```
//!
//! Progress is reported through `tracing`: a `Step` line every
//! `statistics_interval_steps` and an `Eval Step` line every
//! `eval_interval_steps`. The same reports are returned in
//! [`TrainingOutcome`].

pub mod stats;
pub mod trainer;

pub use stats::{accuracy, correct_count, TrailingStats};
pub use trainer::{
    evaluate, Batch, EvalReport, StepReport, Trainer, TrainingConfig, TrainingOutcome,
};
