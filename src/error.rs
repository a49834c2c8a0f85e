//! Error types shared by every layer and model in the crate.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QrnnError {
    /// Tensor dimensions disagree at a transform or recurrence boundary.
    #[error("Shape mismatch in {context}: expected {expected}, got {got}")]
    Shape {
        context: &'static str,
        expected: String,
        got: String,
    },

    /// A layer, model or trainer was constructed with unsupported settings.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl QrnnError {
    pub(crate) fn shape(
        context: &'static str,
        expected: impl std::fmt::Debug,
        got: impl std::fmt::Debug,
    ) -> Self {
        QrnnError::Shape {
            context,
            expected: format!("{:?}", expected),
            got: format!("{:?}", got),
        }
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        QrnnError::Configuration(msg.into())
    }

    /// True for the dimension-mismatch class of errors.
    pub fn is_shape(&self) -> bool {
        matches!(self, QrnnError::Shape { .. })
    }

    /// True for construction-time configuration errors.
    pub fn is_configuration(&self) -> bool {
        matches!(self, QrnnError::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, QrnnError>;
