//! LSTM Sequence Layer
//!
//! Runs an [`LstmCell`] over a batch-first sequence. Used by the recurrent
//! baseline classifiers.

use crate::cells::LstmCell;
use crate::error::{QrnnError, Result};
use burn::module::Module;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// LSTM RNN Layer
///
/// # Type Parameters
/// * `B` - The backend type
#[derive(Module, Debug)]
pub struct Lstm<B: Backend> {
    /// The LSTM cell for processing individual timesteps
    cell: LstmCell<B>,
}

impl<B: Backend> Lstm<B> {
    /// Create a new LSTM layer
    ///
    /// # Arguments
    /// * `input_size` - Number of input features
    /// * `hidden_size` - Number of hidden units
    /// * `device` - Device to create the module on
    pub fn new(input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        Self {
            cell: LstmCell::new(input_size, hidden_size, device),
        }
    }

    /// Get input size
    pub fn input_size(&self) -> usize {
        self.cell.input_size()
    }

    /// Get hidden size
    pub fn hidden_size(&self) -> usize {
        self.cell.hidden_size()
    }

    /// Forward pass through the LSTM layer
    ///
    /// Hidden and cell state start at zero on every call.
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch, seq, features]`
    ///
    /// # Returns
    /// Hidden states for every timestep, `[batch, seq, hidden_size]`. An empty
    /// batch yields an empty output.
    ///
    /// # Errors
    /// [`QrnnError::Shape`] for a wrong feature width or an empty sequence.
    pub fn forward(&self, input: Tensor<B, 3>) -> Result<Tensor<B, 3>> {
        let device = input.device();
        let [batch_size, seq_len, features] = input.dims();

        if features != self.input_size() {
            return Err(QrnnError::shape("Lstm input features", self.input_size(), features));
        }
        if seq_len == 0 {
            return Err(QrnnError::shape("Lstm sequence length", ">= 1", seq_len));
        }
        if batch_size == 0 {
            return Ok(Tensor::zeros([0, seq_len, self.hidden_size()], &device));
        }

        let mut hidden = Tensor::<B, 2>::zeros([batch_size, self.hidden_size()], &device);
        let mut cell = hidden.clone();
        let mut outputs: Vec<Tensor<B, 2>> = Vec::with_capacity(seq_len);

        for t in 0..seq_len {
            // input[batch, t, features] -> [batch, features]
            let step_input = input.clone().narrow(1, t, 1).reshape([batch_size, features]);
            let (new_hidden, new_cell) = self.cell.forward(step_input, (hidden, cell))?;
            hidden = new_hidden;
            cell = new_cell;
            outputs.push(hidden.clone());
        }

        Ok(Tensor::stack(outputs, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray<f32>;

    #[test]
    fn test_lstm_rnn_forward() {
        let device = Default::default();
        let lstm = Lstm::<TestBackend>::new(20, 50, &device);

        let input = Tensor::<TestBackend, 3>::zeros([4, 10, 20], &device);
        let output = lstm.forward(input).unwrap();

        assert_eq!(output.dims(), [4, 10, 50]);
    }

    #[test]
    fn test_lstm_rnn_rejects_empty_sequence() {
        let device = Default::default();
        let lstm = Lstm::<TestBackend>::new(3, 5, &device);

        let input = Tensor::<TestBackend, 3>::zeros([2, 0, 3], &device);
        assert!(lstm.forward(input).unwrap_err().is_shape());
    }
}
