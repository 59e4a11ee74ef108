pub mod extensions;
pub mod params;

use tracing::debug;

use crate::asn1::oid::db;
use crate::asn1::{BitString, Node, ObjectIdentifier, ToAsn1};
use crate::error::DerCertError;
use crate::key::KeyPair;
use crate::pem_utils::der_to_pem;
use crate::tbs_certificate::TbsCertificate;
use params::CertificateParams;

pub type Result<T> = std::result::Result<T, DerCertError>;

/// Represents the supported signature algorithms for certificates.
///
/// This enum provides a mapping to the corresponding OIDs for each algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// ECDSA over SHA-256 (1.2.840.10045.4.3.2).
    #[default]
    EcdsaWithSha256,
}

impl SignatureAlgorithm {
    pub fn oid(self) -> ObjectIdentifier {
        match self {
            SignatureAlgorithm::EcdsaWithSha256 => db::ECDSA_WITH_SHA_256,
        }
    }
}

/// `AlgorithmIdentifier`. ECDSA algorithms carry no parameters, not even NULL.
impl ToAsn1 for SignatureAlgorithm {
    fn to_asn1(&self) -> Node {
        Node::sequence([self.oid().into()])
    }
}

/// Represents a signed X.509 certificate.
///
/// This struct provides methods to encode the certificate into DER or PEM formats.
/// The outer signature algorithm always matches the one inside the TBS.
#[derive(Debug, Clone)]
pub struct Certificate {
    tbs_certificate: TbsCertificate,
    signature_value: BitString,
}

impl Certificate {
    pub(crate) fn new(tbs_certificate: TbsCertificate, signature_value: BitString) -> Self {
        Self {
            tbs_certificate,
            signature_value,
        }
    }

    pub fn tbs_certificate(&self) -> &TbsCertificate {
        &self.tbs_certificate
    }

    pub fn signature_algorithm(&self) -> SignatureAlgorithm {
        self.tbs_certificate.signature
    }

    /// The DER-encoded `ECDSA-Sig-Value` wrapped in a BIT STRING.
    pub fn signature_value(&self) -> &BitString {
        &self.signature_value
    }

    /// Encodes the certificate into DER format.
    pub fn to_der(&self) -> Vec<u8> {
        ToAsn1::to_der(self)
    }

    /// Encodes the certificate into PEM format.
    pub fn to_pem(&self) -> String {
        der_to_pem(&self.to_der(), "CERTIFICATE")
    }

    /// Creates a new self-signed certificate.
    ///
    /// # Arguments
    /// * `params` - The subject, serial number, validity and extensions.
    /// * `key` - The key pair whose public half is certified and whose
    ///   private half signs.
    ///
    /// # Returns
    /// A `Certificate` whose issuer equals its subject.
    pub fn new_self_signed(params: &CertificateParams, key: &KeyPair) -> Result<Self> {
        debug!(
            serial = params.serial_number,
            curve = %key.curve(),
            "creating self-signed certificate"
        );
        TbsCertificate::builder()
            .serial_number(params.serial_number)
            .issuer(params.subject.clone())
            .subject(params.subject.clone())
            .validity(params.validity.clone())
            .subject_public_key_info(key.subject_public_key_info())
            .extensions(params.extensions.clone())
            .build()
            .sign(key)
    }
}

/// `SEQUENCE { tbsCertificate, signatureAlgorithm, signatureValue }`
impl ToAsn1 for Certificate {
    fn to_asn1(&self) -> Node {
        Node::sequence([
            self.tbs_certificate.to_asn1(),
            self.signature_algorithm().to_asn1(),
            self.signature_value.clone().into(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asn1::node::tests::{read_header, split_children};
    use crate::key::Curve;
    use params::{Name, Validity};
    use time::macros::datetime;

    #[test]
    fn test_signature_algorithm_encoding() {
        assert_eq!(
            SignatureAlgorithm::EcdsaWithSha256.to_der(),
            [0x30, 0x0A, 0x06, 0x08, 0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x04, 0x03, 0x02]
        );
    }

    #[test]
    fn test_self_signed_structure() {
        let key = KeyPair::from_secret_bytes(Curve::P256, &[0x07; 32]).unwrap();
        let params = CertificateParams::builder()
            .subject(Name::new(Some("Test".to_string()), None))
            .serial_number(42)
            .validity(Validity::starting(datetime!(2001-01-01 0:00 UTC)))
            .build();
        let cert = Certificate::new_self_signed(&params, &key).unwrap();

        assert_eq!(cert.tbs_certificate().issuer, cert.tbs_certificate().subject);
        assert_eq!(cert.signature_value().unused_bits(), 0);

        let der = cert.to_der();
        let (tag, len, header_len) = read_header(&der);
        assert_eq!(tag, 0x30);
        assert_eq!(header_len + len, der.len());

        let parts = split_children(&der[header_len..]);
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], cert.tbs_certificate().to_der());
        assert_eq!(parts[1], SignatureAlgorithm::EcdsaWithSha256.to_der());
        assert_eq!(parts[2][0], 0x03);
    }

    #[test]
    fn test_pem_label() {
        let key = KeyPair::generate_ecdsa_p384();
        let tbs = TbsCertificate::builder()
            .serial_number(1)
            .validity(Validity::for_days(1))
            .subject_public_key_info(key.subject_public_key_info())
            .build();
        let pem = tbs.sign(&key).unwrap().to_pem();
        assert!(pem.starts_with("-----BEGIN CERTIFICATE-----"));
        assert!(pem.trim_end().ends_with("-----END CERTIFICATE-----"));
    }
}
