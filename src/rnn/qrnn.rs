//! Quasi-Recurrent Neural Network (QRNN) Layer
//!
//! A QRNN layer splits an RNN's gate computation in two:
//!
//! 1. A **pre-activation** that sees the whole sequence at once (a linear map
//!    of the current step, of the current and previous step, or a causal
//!    convolution), producing forget, candidate and output logits.
//! 2. The [minimal recurrence](crate::cells::strnn), the only sequential step.

use crate::cells::{strnn, Direction};
use crate::error::{QrnnError, Result};
use crate::layers::Dense;
use burn::constant;
use burn::module::Module;
use burn::nn::conv::{Conv1d, Conv1dConfig};
use burn::nn::PaddingConfig1d;
use burn::tensor::activation;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use std::fmt;

/// How the candidate update is scaled before the recurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Gating {
    /// `z = (1 - f) ⊙ tanh(z_raw)`; the recurrence applies `(1 - f)` again.
    /// Reproduces the reference sentiment models numerically.
    #[default]
    DoubleScaled,
    /// `z = tanh(z_raw)`; `(1 - f)` is applied once, inside the recurrence.
    Canonical,
}

impl fmt::Display for Gating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gating::DoubleScaled => write!(f, "double-scaled"),
            Gating::Canonical => write!(f, "canonical"),
        }
    }
}

constant!(Gating);

/// A single QRNN layer
///
/// The pre-activation mode is picked from `kernel_size`:
///
/// | `kernel_size` | Pre-activation at step t |
/// |---------------|--------------------------|
/// | 1 | `W(x_t)` |
/// | 2 | `W(x_t) + V(x_{t-1})`, with `x_{-1} = 0` |
/// | k ≥ 3 | causal conv1d over `x_{t-k+1..=t}`, zero left padding |
///
/// No state survives between calls: the cell state and the "previous step"
/// padding are rebuilt as zeros from the live batch size every forward pass.
///
/// # Type Parameters
/// * `B` - The backend type
#[derive(Module, Debug)]
pub struct QrnnLayer<B: Backend> {
    /// Current-step transform (k = 1 with bias, k = 2 without)
    w: Option<Dense<B>>,
    /// Previous-step transform (k = 2 only, with bias)
    v: Option<Dense<B>>,
    /// Causal convolution (k >= 3)
    conv: Option<Conv1d<B>>,
    #[module(skip)]
    in_size: usize,
    #[module(skip)]
    out_size: usize,
    #[module(skip)]
    kernel_size: usize,
    #[module(skip)]
    gating: Gating,
    #[module(skip)]
    direction: Direction,
}

impl<B: Backend> QrnnLayer<B> {
    /// Create a new QRNN layer
    ///
    /// # Arguments
    /// * `in_size` - Number of input features
    /// * `out_size` - Width of the hidden state
    /// * `kernel_size` - Temporal width of the pre-activation (>= 1)
    /// * `device` - Device to create the module on
    ///
    /// # Errors
    /// [`QrnnError::Configuration`] for a zero width or `kernel_size == 0`.
    pub fn new(
        in_size: usize,
        out_size: usize,
        kernel_size: usize,
        device: &B::Device,
    ) -> Result<Self> {
        if in_size == 0 || out_size == 0 {
            return Err(QrnnError::config(format!(
                "QRNN layer sizes must be positive, got {} -> {}",
                in_size, out_size
            )));
        }

        let gate_size = 3 * out_size;
        let (w, v, conv) = match kernel_size {
            0 => {
                return Err(QrnnError::config("kernel_size must be >= 1, got 0"));
            }
            1 => (Some(Dense::new(in_size, gate_size, true, device)), None, None),
            2 => (
                Some(Dense::new(in_size, gate_size, false, device)),
                Some(Dense::new(in_size, gate_size, true, device)),
                None,
            ),
            k => {
                let conv = Conv1dConfig::new(in_size, gate_size, k)
                    .with_padding(PaddingConfig1d::Valid)
                    .with_bias(true)
                    .init(device);
                (None, None, Some(conv))
            }
        };

        Ok(Self {
            w,
            v,
            conv,
            in_size,
            out_size,
            kernel_size,
            gating: Gating::default(),
            direction: Direction::default(),
        })
    }

    /// Select how the candidate update is scaled (default: [`Gating::DoubleScaled`])
    pub fn with_gating(mut self, gating: Gating) -> Self {
        self.gating = gating;
        self
    }

    /// Select the scan direction of the recurrence (default: [`Direction::Forward`])
    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Get input size
    pub fn in_size(&self) -> usize {
        self.in_size
    }

    /// Get hidden/output size
    pub fn out_size(&self) -> usize {
        self.out_size
    }

    pub fn kernel_size(&self) -> usize {
        self.kernel_size
    }

    pub fn gating(&self) -> Gating {
        self.gating
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn check_input(&self, input: &Tensor<B, 3>) -> Result<[usize; 3]> {
        let dims = input.dims();
        if dims[2] != self.in_size {
            return Err(QrnnError::shape("QrnnLayer input features", self.in_size, dims[2]));
        }
        Ok(dims)
    }

    /// Compute the raw gate logits for every timestep
    ///
    /// # Arguments
    /// * `input` - `[batch, seq_len, in_size]`
    ///
    /// # Returns
    /// `[batch, seq_len, 3 * out_size]`, laid out as forget, candidate and
    /// output logits along the last axis.
    pub fn pre_activation(&self, input: Tensor<B, 3>) -> Result<Tensor<B, 3>> {
        let [batch_size, seq_len, _] = self.check_input(&input)?;
        let device = input.device();
        let gate_size = 3 * self.out_size;

        if seq_len == 0 || batch_size == 0 {
            return Ok(Tensor::zeros([batch_size, seq_len, gate_size], &device));
        }

        match (&self.w, &self.v, &self.conv) {
            (Some(w), None, None) => w.forward(input),
            (Some(w), Some(v), None) => {
                // Shift right by one step, zero-filling t = 0
                let zero_step = Tensor::<B, 3>::zeros([batch_size, 1, self.in_size], &device);
                let prev = if seq_len == 1 {
                    zero_step
                } else {
                    Tensor::cat(vec![zero_step, input.clone().narrow(1, 0, seq_len - 1)], 1)
                };
                Ok(w.forward(input)? + v.forward(prev)?)
            }
            (None, None, Some(conv)) => {
                let padding = Tensor::<B, 3>::zeros(
                    [batch_size, self.kernel_size - 1, self.in_size],
                    &device,
                );
                // [batch, in_size, seq_len + k - 1] -> [batch, 3 * out_size, seq_len]
                let padded = Tensor::cat(vec![padding, input], 1).swap_dims(1, 2);
                Ok(conv.forward(padded).swap_dims(1, 2))
            }
            _ => Err(QrnnError::config(format!(
                "QRNN layer has no pre-activation for kernel_size {}",
                self.kernel_size
            ))),
        }
    }

    /// Forward pass through the layer
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch, seq_len, in_size]`
    ///
    /// # Returns
    /// Hidden states `h = c ⊙ o` of shape `[batch, seq_len, out_size]`.
    ///
    /// # Errors
    /// [`QrnnError::Shape`] if the feature dimension is not `in_size`.
    pub fn forward(&self, input: Tensor<B, 3>) -> Result<Tensor<B, 3>> {
        let [batch_size, seq_len, _] = self.check_input(&input)?;
        let device = input.device();

        if seq_len == 0 || batch_size == 0 {
            return Ok(Tensor::zeros([batch_size, seq_len, self.out_size], &device));
        }

        let gates = self.pre_activation(input)?.chunk(3, 2);
        let forget = activation::sigmoid(gates[0].clone());
        let candidate = gates[1].clone().tanh();
        let output_gate = activation::sigmoid(gates[2].clone());

        let candidate = match self.gating {
            Gating::DoubleScaled => forget.clone().neg().add_scalar(1.0) * candidate,
            Gating::Canonical => candidate,
        };

        let c_init = Tensor::<B, 2>::zeros([batch_size, self.out_size], &device);
        let cells = strnn(forget, candidate, c_init, self.direction)?;

        Ok(cells * output_gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::tensor::backend::Backend as BurnBackend;
    use burn::tensor::Distribution;

    type TestBackend = NdArray<f32>;
    type TestDevice = <TestBackend as BurnBackend>::Device;

    fn get_test_device() -> TestDevice {
        Default::default()
    }

    fn to_vec(t: Tensor<TestBackend, 3>) -> Vec<f32> {
        t.into_data().to_vec::<f32>().unwrap()
    }

    #[test]
    fn test_qrnn_layer_modes() {
        let device = get_test_device();

        let k1 = QrnnLayer::<TestBackend>::new(6, 4, 1, &device).unwrap();
        assert!(k1.w.as_ref().map(|w| w.has_bias()).unwrap_or(false));
        assert!(k1.v.is_none() && k1.conv.is_none());

        let k2 = QrnnLayer::<TestBackend>::new(6, 4, 2, &device).unwrap();
        assert!(!k2.w.as_ref().map(|w| w.has_bias()).unwrap_or(true));
        assert!(k2.v.as_ref().map(|v| v.has_bias()).unwrap_or(false));

        let k3 = QrnnLayer::<TestBackend>::new(6, 4, 3, &device).unwrap();
        assert!(k3.w.is_none() && k3.conv.is_some());
    }

    #[test]
    fn test_kernel_two_first_step_sees_zero_history() {
        let device = get_test_device();
        let layer = QrnnLayer::<TestBackend>::new(5, 3, 2, &device).unwrap();

        let x =
            Tensor::<TestBackend, 3>::random([2, 4, 5], Distribution::Uniform(-1.0, 1.0), &device);
        let pre = layer.pre_activation(x.clone()).unwrap();
        let pre_0 = pre.narrow(1, 0, 1);

        // W(x_0) + V(0) = W(x_0) + b_V
        let w = layer.w.as_ref().unwrap();
        let v_bias = layer.v.as_ref().unwrap().bias().unwrap();
        let expected = w.forward(x.narrow(1, 0, 1)).unwrap() + v_bias.unsqueeze::<3>();

        for (a, b) in to_vec(pre_0).iter().zip(to_vec(expected).iter()) {
            assert!((a - b).abs() < 1e-5, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_single_step_sequence_for_every_mode() {
        let device = get_test_device();
        for k in [1, 2, 3, 5] {
            let layer = QrnnLayer::<TestBackend>::new(4, 6, k, &device).unwrap();
            let x = Tensor::<TestBackend, 3>::ones([3, 1, 4], &device);
            let out = layer.forward(x).unwrap();
            assert_eq!(out.dims(), [3, 1, 6], "kernel_size {}", k);
        }
    }
}
