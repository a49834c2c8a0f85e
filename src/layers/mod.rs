//! # Building Blocks
//!
//! Leaf layers reused by every model in the crate.
//!
//! | Layer | Description |
//! |-------|-------------|
//! | [`Dense`] | Affine transform with a last-dimension shape check |
//! | [`ModeDropout`] | Inverted dropout controlled by an explicit [`Mode`] |
//!
//! ## Train vs. Eval
//!
//! Every model forward takes a [`Mode`]. Dropout only fires in
//! [`Mode::Train`]; in [`Mode::Eval`] it is the identity regardless of the
//! configured rate.

pub mod dense;
pub mod dropout;

pub use dense::Dense;
pub use dropout::{Mode, ModeDropout};
