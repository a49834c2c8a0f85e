//! # Recurrence Primitives
//!
//! The per-timestep machinery that the sequence layers in [`crate::rnn`] are
//! built on.
//!
//! | Item | Description | Used by |
//! |------|-------------|---------|
//! | [`strnn`] | Minimal gated recurrence | [`QrnnLayer`](crate::rnn::QrnnLayer) |
//! | [`LstmCell`] | Standard LSTM step | [`Lstm`](crate::rnn::Lstm) baselines |
//!
//! ## Minimal Recurrence
//!
//! ```text
//! c_t = f_t ⊙ c_{t-1} + (1 - f_t) ⊙ z_t
//! ```
//!
//! There is no matrix multiply inside the scan: all learned transforms happen
//! beforehand, over the whole sequence at once. The scan is the only place in
//! the crate where timesteps must be visited in order.
//!
//! ## Tensor Shapes
//!
//! | Tensor | Shape |
//! |--------|-------|
//! | `f`, `z` | `[batch, seq_len, features]` |
//! | `c_init` | `[batch, features]` |
//! | output | `[batch, seq_len, features]` |

pub mod lstm_cell;
pub mod strnn;

pub use lstm_cell::LstmCell;
pub use strnn::{strnn, Direction};
