//! Dropout driven by an explicit train/eval flag
//!
//! Burn's own `Dropout` switches on whether the backend tracks gradients. The
//! models here take the mode as an argument instead, so evaluation on an
//! autodiff backend is still deterministic.

use crate::error::{QrnnError, Result};
use burn::module::Module;
use burn::tensor::backend::Backend;
use burn::tensor::{Distribution, Tensor};

/// Forward-pass mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Mode {
    /// Dropout active
    Train,
    /// Dropout is the identity
    #[default]
    Eval,
}

impl Mode {
    pub fn is_train(self) -> bool {
        self == Mode::Train
    }
}

/// Inverted dropout with a caller-supplied [`Mode`]
#[derive(Module, Clone, Debug)]
pub struct ModeDropout {
    prob: f64,
}

impl ModeDropout {
    /// Create a dropout layer
    ///
    /// # Errors
    /// [`QrnnError::Configuration`] unless `0 <= prob < 1`.
    pub fn new(prob: f64) -> Result<Self> {
        if !(0.0..1.0).contains(&prob) {
            return Err(QrnnError::config(format!(
                "dropout rate must be in [0, 1), got {}",
                prob
            )));
        }
        Ok(Self { prob })
    }

    pub fn prob(&self) -> f64 {
        self.prob
    }

    /// Zero each element with probability `prob` and rescale survivors by
    /// `1 / (1 - prob)`. Identity in [`Mode::Eval`].
    pub fn forward<B: Backend, const D: usize>(
        &self,
        input: Tensor<B, D>,
        mode: Mode,
    ) -> Tensor<B, D> {
        if !mode.is_train() || self.prob == 0.0 {
            return input;
        }

        let keep = 1.0 - self.prob;
        let mask = input.random_like(Distribution::Bernoulli(keep));
        input * mask / keep
    }
}
