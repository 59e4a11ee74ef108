use std::fmt;

use p256::ecdsa::SigningKey as P256SigningKey;
use p384::ecdsa::SigningKey as P384SigningKey;
use tracing::debug;

use crate::asn1::ObjectIdentifier;
use crate::asn1::oid::db;
use crate::cert::params::SubjectPublicKeyInfo;
use crate::error::DerCertError;

type P521SigningKey = ecdsa::SigningKey<p521::NistP521>;

/// The NIST curves a certificate key can live on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Curve {
    P256,
    P384,
    P521,
}

impl Curve {
    /// The namedCurve identifier carried in the SubjectPublicKeyInfo.
    pub fn named_curve_oid(self) -> ObjectIdentifier {
        match self {
            Curve::P256 => db::SECP256R1,
            Curve::P384 => db::SECP384R1,
            Curve::P521 => db::SECP521R1,
        }
    }

    /// Size in bytes of a field element (and of a private scalar).
    pub fn field_size(self) -> usize {
        match self {
            Curve::P256 => 32,
            Curve::P384 => 48,
            Curve::P521 => 66,
        }
    }
}

impl fmt::Display for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Curve::P256 => f.write_str("P-256"),
            Curve::P384 => f.write_str("P-384"),
            Curve::P521 => f.write_str("P-521"),
        }
    }
}

/// An ECDSA key pair held in memory.
#[derive(Debug, Clone)]
pub enum KeyPair {
    EcdsaP256 { signing_key: P256SigningKey },
    EcdsaP384 { signing_key: P384SigningKey },
    EcdsaP521 { signing_key: P521SigningKey },
}

impl KeyPair {
    /// Generate an ECDSA P-256 key pair.
    pub fn generate_ecdsa_p256() -> Self {
        Self::generate(Curve::P256)
    }

    /// Generate an ECDSA P-384 key pair.
    pub fn generate_ecdsa_p384() -> Self {
        Self::generate(Curve::P384)
    }

    /// Generate an ECDSA P-521 key pair.
    pub fn generate_ecdsa_p521() -> Self {
        Self::generate(Curve::P521)
    }

    pub fn generate(curve: Curve) -> Self {
        let mut rng = rand_core::OsRng;
        debug!(%curve, "generating key pair");
        match curve {
            Curve::P256 => KeyPair::EcdsaP256 {
                signing_key: P256SigningKey::random(&mut rng),
            },
            Curve::P384 => KeyPair::EcdsaP384 {
                signing_key: P384SigningKey::random(&mut rng),
            },
            Curve::P521 => KeyPair::EcdsaP521 {
                signing_key: P521SigningKey::random(&mut rng),
            },
        }
    }

    /// Imports a private scalar given as big-endian bytes.
    pub fn from_secret_bytes(curve: Curve, secret: &[u8]) -> Result<Self, DerCertError> {
        let invalid = |e: ecdsa::Error| {
            DerCertError::InvalidInput(format!("invalid {curve} private key: {e}"))
        };
        Ok(match curve {
            Curve::P256 => KeyPair::EcdsaP256 {
                signing_key: P256SigningKey::from_slice(secret).map_err(invalid)?,
            },
            Curve::P384 => KeyPair::EcdsaP384 {
                signing_key: P384SigningKey::from_slice(secret).map_err(invalid)?,
            },
            Curve::P521 => KeyPair::EcdsaP521 {
                signing_key: P521SigningKey::from_slice(secret).map_err(invalid)?,
            },
        })
    }

    pub fn curve(&self) -> Curve {
        match self {
            KeyPair::EcdsaP256 { .. } => Curve::P256,
            KeyPair::EcdsaP384 { .. } => Curve::P384,
            KeyPair::EcdsaP521 { .. } => Curve::P521,
        }
    }

    /// The public key as an uncompressed SEC1 point (`04 || X || Y`).
    pub fn public_key_sec1(&self) -> Vec<u8> {
        match self {
            KeyPair::EcdsaP256 { signing_key } => signing_key
                .verifying_key()
                .to_encoded_point(false)
                .as_bytes()
                .to_vec(),
            KeyPair::EcdsaP384 { signing_key } => signing_key
                .verifying_key()
                .to_encoded_point(false)
                .as_bytes()
                .to_vec(),
            KeyPair::EcdsaP521 { signing_key } => signing_key
                .verifying_key()
                .to_encoded_point(false)
                .as_bytes()
                .to_vec(),
        }
    }

    pub fn subject_public_key_info(&self) -> SubjectPublicKeyInfo {
        SubjectPublicKeyInfo::from_sec1_point(self.curve(), &self.public_key_sec1())
    }
}
