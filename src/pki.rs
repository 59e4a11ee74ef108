//! The signing capability a certificate is signed with.

use ecdsa::signature::hazmat::PrehashSigner;
use thiserror::Error;
use tracing::debug;

use crate::key::{Curve, KeyPair};

/// Errors raised by a [`CertificateSigner`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SigningError {
    /// The key is missing or cannot be used (locked keystore, absent token).
    #[error("Key unavailable: {0}")]
    KeyUnavailable(String),

    /// The certificate names a curve the key does not belong to.
    #[error("Key is on {key} but the certificate requires {certificate}")]
    CurveMismatch { key: Curve, certificate: Curve },

    /// The cryptographic backend failed.
    #[error("Signature backend error: {0}")]
    Backend(String),
}

impl From<ecdsa::Error> for SigningError {
    fn from(err: ecdsa::Error) -> Self {
        SigningError::Backend(err.to_string())
    }
}

/// Produces ECDSA signatures over a precomputed message digest.
///
/// Implementations may block (hardware tokens, OS keystores) and may fail;
/// callers get the failure back unchanged.
pub trait CertificateSigner {
    /// Signs `digest` with the key on `curve`, returning a DER-encoded
    /// `ECDSA-Sig-Value`.
    fn sign_digest(&self, curve: Curve, digest: &[u8]) -> Result<Vec<u8>, SigningError>;
}

impl<T: CertificateSigner + ?Sized> CertificateSigner for &T {
    fn sign_digest(&self, curve: Curve, digest: &[u8]) -> Result<Vec<u8>, SigningError> {
        (**self).sign_digest(curve, digest)
    }
}

/// Left-pads `digest` with zeros to the curve's field size.
///
/// A digest shorter than the group order is used as an integer as-is, so the
/// padding leaves the signed value unchanged while satisfying the minimum
/// prehash length for P-521.
fn field_sized_prehash(digest: &[u8], curve: Curve) -> Vec<u8> {
    let size = curve.field_size();
    if digest.len() >= size {
        return digest.to_vec();
    }
    let mut prehash = vec![0u8; size - digest.len()];
    prehash.extend_from_slice(digest);
    prehash
}

impl CertificateSigner for KeyPair {
    fn sign_digest(&self, curve: Curve, digest: &[u8]) -> Result<Vec<u8>, SigningError> {
        if self.curve() != curve {
            return Err(SigningError::CurveMismatch {
                key: self.curve(),
                certificate: curve,
            });
        }
        debug!(%curve, digest_len = digest.len(), "signing digest");

        let prehash = field_sized_prehash(digest, curve);
        let signature = match self {
            KeyPair::EcdsaP256 { signing_key } => {
                let signature: p256::ecdsa::Signature = signing_key.sign_prehash(&prehash)?;
                signature.to_der().as_bytes().to_vec()
            }
            KeyPair::EcdsaP384 { signing_key } => {
                let signature: p384::ecdsa::Signature = signing_key.sign_prehash(&prehash)?;
                signature.to_der().as_bytes().to_vec()
            }
            KeyPair::EcdsaP521 { signing_key } => {
                // The generic key has no prehash signer for P-521; p521 wraps it.
                let signing_key = p521::ecdsa::SigningKey::from(signing_key.clone());
                let signature: p521::ecdsa::Signature = signing_key.sign_prehash(&prehash)?;
                signature.to_der().as_bytes().to_vec()
            }
        };
        Ok(signature)
    }
}
