//! use dercert::error::DerCertError;

use thiserror::Error;

use crate::pki::SigningError;

/// Represents errors that can occur in the dercert library.
///
/// Encoding itself never fails; these cover input conversion and signing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DerCertError {
    /// Error due to invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The signing capability could not produce a signature.
    #[error("Signing failed: {0}")]
    Signing(#[from] SigningError),
}
