use crate::error::{QrnnError, Result};
use crate::layers::Dense;
use burn::module::Module;
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Standard LSTM cell used by the recurrent baselines
///
/// Implements the standard LSTM equations:
/// - g = tanh(W_ig @ x + b_ig + W_hg @ h)
/// - i = sigmoid(W_ii @ x + b_ii + W_hi @ h)
/// - f = sigmoid(W_if @ x + b_if + W_hf @ h + 1)
/// - o = sigmoid(W_io @ x + b_io + W_ho @ h)
/// - c' = f * c + i * g
/// - h' = o * tanh(c')
#[derive(Module, Debug)]
pub struct LstmCell<B: Backend> {
    #[module(skip)]
    input_size: usize,
    #[module(skip)]
    hidden_size: usize,
    input_map: Dense<B>,     // Maps input to 4 * hidden_size (with bias)
    recurrent_map: Dense<B>, // Maps hidden state to 4 * hidden_size (no bias)
}

impl<B: Backend> LstmCell<B> {
    /// Create a new LSTM cell
    ///
    /// # Arguments
    /// * `input_size` - Size of the input features
    /// * `hidden_size` - Size of the hidden state
    /// * `device` - Device to create the module on
    pub fn new(input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        let input_map = Dense::new(input_size, 4 * hidden_size, true, device);
        let recurrent_map = Dense::new(hidden_size, 4 * hidden_size, false, device);

        Self {
            input_size,
            hidden_size,
            input_map,
            recurrent_map,
        }
    }

    /// Get the input size
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Get the hidden size
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Perform one timestep
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch_size, input_size]`
    /// * `states` - Tuple of (hidden_state, cell_state), each of shape `[batch_size, hidden_size]`
    ///
    /// # Returns
    /// Tuple of (new_hidden_state, new_cell_state)
    pub fn forward(
        &self,
        input: Tensor<B, 2>,
        states: (Tensor<B, 2>, Tensor<B, 2>),
    ) -> Result<(Tensor<B, 2>, Tensor<B, 2>)> {
        let (hidden_state, cell_state) = states;

        let batch_size = input.dims()[0];
        let expected = [batch_size, self.hidden_size];
        if hidden_state.dims() != expected || cell_state.dims() != expected {
            return Err(QrnnError::shape(
                "LstmCell state",
                expected,
                (hidden_state.dims(), cell_state.dims()),
            ));
        }

        let z = self.input_map.forward(input)? + self.recurrent_map.forward(hidden_state)?;

        let chunks = z.chunk(4, 1);
        let candidate = chunks[0].clone().tanh();
        let input_gate = activation::sigmoid(chunks[1].clone());
        let forget_gate = activation::sigmoid(chunks[2].clone() + 1.0);
        let output_gate = activation::sigmoid(chunks[3].clone());

        let new_cell = cell_state * forget_gate + candidate * input_gate;
        let new_hidden = new_cell.clone().tanh() * output_gate;

        Ok((new_hidden, new_cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::nn::Initializer;
    use burn::tensor::backend::Backend as BurnBackend;

    type TestBackend = NdArray<f32>;
    type TestDevice = <TestBackend as BurnBackend>::Device;

    fn get_test_device() -> TestDevice {
        Default::default()
    }

    /// All weights and biases zero, leaving only the +1 forget bias
    fn zero_cell(input_size: usize, hidden_size: usize) -> LstmCell<TestBackend> {
        let device = get_test_device();
        LstmCell {
            input_size,
            hidden_size,
            input_map: Dense::with_initializer(
                input_size,
                4 * hidden_size,
                true,
                Initializer::Zeros,
                &device,
            ),
            recurrent_map: Dense::with_initializer(
                hidden_size,
                4 * hidden_size,
                false,
                Initializer::Zeros,
                &device,
            ),
        }
    }

    #[test]
    fn test_lstm_cell_gate_widths() {
        let device = get_test_device();
        let cell = LstmCell::<TestBackend>::new(6, 5, &device);

        assert_eq!(cell.input_size(), 6);
        assert_eq!(cell.hidden_size(), 5);
        // Four gates share one projection of each source
        assert_eq!(cell.input_map.out_size(), 20);
        assert_eq!(cell.recurrent_map.out_size(), 20);
        assert!(!cell.recurrent_map.has_bias());
    }

    #[test]
    fn test_lstm_cell_forget_bias_with_zero_weights() {
        let device = get_test_device();
        let cell = zero_cell(3, 2);

        let input = Tensor::<TestBackend, 2>::ones([1, 3], &device);
        let h = Tensor::<TestBackend, 2>::ones([1, 2], &device);
        let c = Tensor::<TestBackend, 2>::full([1, 2], 2.0, &device);

        let (new_h, new_c) = cell.forward(input, (h, c)).unwrap();

        // g = 0, so c' = sigmoid(1) * c and h' = 0.5 * tanh(c')
        let keep = 1.0 / (1.0 + (-1.0f32).exp());
        let new_c = new_c.into_data().to_vec::<f32>().unwrap();
        let new_h = new_h.into_data().to_vec::<f32>().unwrap();
        for (c, h) in new_c.iter().zip(new_h.iter()) {
            assert!((c - 2.0 * keep).abs() < 1e-6, "cell {}", c);
            assert!((h - 0.5 * (2.0 * keep).tanh()).abs() < 1e-6, "hidden {}", h);
        }
    }

    #[test]
    fn test_lstm_cell_rows_are_independent() {
        let device = get_test_device();
        let cell = LstmCell::<TestBackend>::new(4, 3, &device);

        let input = Tensor::<TestBackend, 2>::from_floats(
            [[0.5, -0.5, 1.0, 0.0], [0.5, -0.5, 1.0, 0.0]],
            &device,
        );
        let h = Tensor::<TestBackend, 2>::zeros([2, 3], &device);
        let c = Tensor::<TestBackend, 2>::from_floats([[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]], &device);

        let (_, new_c) = cell.forward(input, (h, c)).unwrap();
        let rows = new_c.into_data().to_vec::<f32>().unwrap();

        // Same input, different carried state
        assert_ne!(rows[..3], rows[3..]);
    }

    #[test]
    fn test_lstm_state_shape_mismatch() {
        let device = get_test_device();
        let cell = LstmCell::<TestBackend>::new(10, 20, &device);

        let input = Tensor::<TestBackend, 2>::zeros([2, 10], &device);
        let h = Tensor::<TestBackend, 2>::zeros([2, 19], &device);
        let c = Tensor::<TestBackend, 2>::zeros([2, 20], &device);
        assert!(cell.forward(input.clone(), (h, c)).unwrap_err().is_shape());

        let h = Tensor::<TestBackend, 2>::zeros([2, 20], &device);
        let c = Tensor::<TestBackend, 2>::zeros([3, 20], &device);
        assert!(cell.forward(input, (h, c)).unwrap_err().is_shape());
    }
}
