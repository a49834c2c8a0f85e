//! Sequential minimal recurrence
//!
//! The one part of a QRNN that cannot run in parallel across time: each cell
//! state reads the previous one. Everything inside a step is elementwise, so
//! the scan is vectorised over batch and features.

use crate::error::{QrnnError, Result};
use burn::constant;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;
use std::fmt;

/// Scan direction over the time axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum Direction {
    /// t = 0, 1, ..., S-1
    #[default]
    Forward,
    /// t = S-1, ..., 0; the initial state sits just past the end
    Reverse,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Reverse => write!(f, "reverse"),
        }
    }
}

// Stored on layers as plain configuration, not as parameters
constant!(Direction);

/// Run the minimal recurrence
///
/// ```text
/// c[:, t] = f[:, t] ⊙ c[:, t-1] + (1 - f[:, t]) ⊙ z[:, t],   c[:, -1] = c_init
/// ```
///
/// In [`Direction::Reverse`] the scan walks backwards (`c[:, t]` reads
/// `c[:, t+1]`, with `c[:, S] = c_init`). The output is always in the original
/// time order.
///
/// # Arguments
/// * `f` - Forget gates `[batch, seq, features]`, values in (0, 1)
/// * `z` - Candidate updates `[batch, seq, features]`
/// * `c_init` - State before the first processed step `[batch, features]`
/// * `direction` - Order in which timesteps are consumed
///
/// # Returns
/// Cell states `[batch, seq, features]`. An empty sequence or an empty batch
/// yields an empty output.
///
/// # Errors
/// [`QrnnError::Shape`] if `f` and `z` disagree, or `c_init` does not match
/// their batch and feature dims.
pub fn strnn<B: Backend>(
    f: Tensor<B, 3>,
    z: Tensor<B, 3>,
    c_init: Tensor<B, 2>,
    direction: Direction,
) -> Result<Tensor<B, 3>> {
    let f_dims = f.dims();
    let z_dims = z.dims();
    if f_dims != z_dims {
        return Err(QrnnError::shape("strnn gates", f_dims, z_dims));
    }

    let [batch_size, seq_len, features] = f_dims;
    let c_dims = c_init.dims();
    if c_dims != [batch_size, features] {
        return Err(QrnnError::shape(
            "strnn initial state",
            [batch_size, features],
            c_dims,
        ));
    }

    if seq_len == 0 || batch_size == 0 {
        return Ok(f);
    }

    let step = |t: usize, c_prev: Tensor<B, 2>| -> Tensor<B, 2> {
        let f_t: Tensor<B, 2> = f.clone().narrow(1, t, 1).reshape([batch_size, features]);
        let z_t: Tensor<B, 2> = z.clone().narrow(1, t, 1).reshape([batch_size, features]);
        let keep = f_t.clone().neg().add_scalar(1.0);
        f_t * c_prev + keep * z_t
    };

    let mut states: Vec<Tensor<B, 2>> = Vec::with_capacity(seq_len);
    let mut c = c_init;

    match direction {
        Direction::Forward => {
            for t in 0..seq_len {
                c = step(t, c);
                states.push(c.clone());
            }
        }
        Direction::Reverse => {
            for t in (0..seq_len).rev() {
                c = step(t, c);
                states.push(c.clone());
            }
            states.reverse();
        }
    }

    Ok(Tensor::stack(states, 1))
}
