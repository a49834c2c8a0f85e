//! # Sequence Layers
//!
//! Layers that consume a whole `[batch, seq_len, features]` tensor and return
//! one hidden vector per timestep.
//!
//! | Layer | Parallel across time | Recurrence |
//! |-------|----------------------|------------|
//! | [`QrnnLayer`] | Pre-activation: yes | Elementwise [`strnn`](crate::cells::strnn) |
//! | [`Lstm`] | No | Full matmul per step |
//!
//! ## QRNN Gating
//!
//! ```text
//! f, z, o = chunk(pre_activation(x), 3)
//! f = σ(f)
//! z = (1 - f) ⊙ tanh(z)      // Gating::DoubleScaled (default)
//! z = tanh(z)                // Gating::Canonical
//! o = σ(o)
//! c = strnn(f, z, 0)
//! h = c ⊙ o
//! ```
//!
//! `DoubleScaled` applies `(1 - f)` twice in total, once here and once inside
//! the recurrence. It is the default because it matches the numbers of the
//! sentiment models these layers were first trained for; pick
//! `Gating::Canonical` for the textbook QRNN update.
//!
//! ## Pre-activation Modes
//!
//! ```ignore
//! use qrnn::rnn::QrnnLayer;
//!
//! let pointwise = QrnnLayer::<Backend>::new(50, 100, 1, &device)?; // W(x_t)
//! let bigram = QrnnLayer::<Backend>::new(50, 100, 2, &device)?;    // W(x_t) + V(x_{t-1})
//! let conv = QrnnLayer::<Backend>::new(50, 100, 3, &device)?;      // causal conv, width 3
//!
//! let h = conv.forward(input)?; // [batch, seq_len, 100]
//! ```
//!
//! The convolution family is causal but is not numerically equivalent to the
//! `kernel_size` 1 and 2 paths, even where their receptive fields coincide.

pub mod lstm;
pub mod qrnn;

pub use lstm::Lstm;
pub use qrnn::{Gating, QrnnLayer};
