//! Running statistics reported by the training loop

use crate::error::{QrnnError, Result};
use burn::tensor::backend::Backend;
use burn::tensor::{ElementConversion, Int, Tensor};

/// Exponential moving averages of batch accuracy and time per token
///
/// `value = decay * value + (1 - decay) * sample`, starting from zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailingStats {
    decay: f64,
    accuracy: f64,
    time_per_token: f64,
}

impl TrailingStats {
    pub fn new(decay: f64) -> Self {
        Self {
            decay,
            accuracy: 0.0,
            time_per_token: 0.0,
        }
    }

    pub fn update(&mut self, accuracy: f64, time_per_token: f64) {
        self.accuracy = self.decay * self.accuracy + (1.0 - self.decay) * accuracy;
        self.time_per_token =
            self.decay * self.time_per_token + (1.0 - self.decay) * time_per_token;
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn time_per_token(&self) -> f64 {
        self.time_per_token
    }
}

/// Number of rows whose argmax matches the label
///
/// # Arguments
/// * `logits` - `[batch, num_classes]`
/// * `labels` - `[batch]` class indices
pub fn correct_count<B: Backend>(logits: Tensor<B, 2>, labels: Tensor<B, 1, Int>) -> Result<usize> {
    let [batch_size, _] = logits.dims();
    let [num_labels] = labels.dims();
    if num_labels != batch_size {
        return Err(QrnnError::shape("accuracy labels", batch_size, num_labels));
    }
    if batch_size == 0 {
        return Ok(0);
    }

    // argmax keeps the reduced dim: [batch, 1] -> [batch]
    let predictions = logits.argmax(1).reshape([batch_size]);
    let correct = predictions
        .equal(labels)
        .int()
        .sum()
        .into_scalar()
        .elem::<i64>();

    Ok(correct as usize)
}

/// Fraction of rows whose argmax matches the label (0 for an empty batch)
pub fn accuracy<B: Backend>(logits: Tensor<B, 2>, labels: Tensor<B, 1, Int>) -> Result<f64> {
    let [batch_size, _] = logits.dims();
    let correct = correct_count(logits, labels)?;
    if batch_size == 0 {
        return Ok(0.0);
    }
    Ok(correct as f64 / batch_size as f64)
}
