use bon::Builder;
use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use crate::asn1::{BitString, Children, Node, ToAsn1};
use crate::cert::extensions::Extension;
use crate::cert::params::{Name, SubjectPublicKeyInfo, Validity};
use crate::cert::{Certificate, SignatureAlgorithm};
use crate::error::DerCertError;
use crate::pki::CertificateSigner;

/// The certificate format version. Only v3 is produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[repr(u8)]
pub enum Version {
    #[default]
    V3 = 2,
}

/// `[0] EXPLICIT INTEGER`
impl ToAsn1 for Version {
    fn to_asn1(&self) -> Node {
        Node::explicit(0, [Node::integer(*self as u8)])
    }
}

/// Represents the "To Be Signed" (TBS) portion of an X.509 certificate.
///
/// # Fields
/// * `version` - The certificate version, always v3.
/// * `serial_number` - The unique identifier for the certificate.
/// * `signature` - The algorithm used to sign the certificate.
/// * `issuer` - The name of the certificate issuer.
/// * `validity` - The certificate's validity period.
/// * `subject` - The name of the certificate subject.
/// * `subject_public_key_info` - The public key of the certificate subject.
/// * `extensions` - Additional X.509 extensions for the certificate.
#[derive(Debug, Clone, Builder)]
pub struct TbsCertificate {
    #[builder(default)]
    pub version: Version,
    pub serial_number: u64,
    #[builder(default)]
    pub signature: SignatureAlgorithm,
    #[builder(default)]
    pub issuer: Name,
    pub validity: Validity,
    #[builder(default)]
    pub subject: Name,
    pub subject_public_key_info: SubjectPublicKeyInfo,
    #[builder(default)]
    pub extensions: Vec<Extension>,
}

impl ToAsn1 for TbsCertificate {
    fn to_asn1(&self) -> Node {
        let extensions = (!self.extensions.is_empty()).then(|| {
            Node::explicit(
                3,
                [Node::sequence(self.extensions.iter().map(Extension::to_asn1))],
            )
        });

        Node::sequence(
            Children::new()
                .with(self.version.to_asn1())
                .with(Node::integer(self.serial_number))
                .with(self.signature.to_asn1())
                .with(self.issuer.to_asn1())
                .with(self.validity.to_asn1())
                .with(self.subject.to_asn1())
                .with(self.subject_public_key_info.to_asn1())
                .with_opt(extensions),
        )
    }
}

impl TbsCertificate {
    /// Signs the encoded TBS with `signer` and assembles the certificate.
    ///
    /// The digest is taken over the exact bytes that end up in the
    /// certificate. Signer failures are returned as [`DerCertError::Signing`].
    pub fn sign<S: CertificateSigner + ?Sized>(
        self,
        signer: &S,
    ) -> Result<Certificate, DerCertError> {
        let tbs_der = self.to_der();
        let digest = match self.signature {
            SignatureAlgorithm::EcdsaWithSha256 => Sha256::digest(&tbs_der),
        };
        trace!(digest_len = digest.len(), "computed TBS digest");
        let curve = self.subject_public_key_info.curve();
        debug!(
            serial = self.serial_number,
            tbs_len = tbs_der.len(),
            %curve,
            "signing certificate"
        );

        let signature = signer.sign_digest(curve, &digest)?;
        Ok(Certificate::new(self, BitString::from_bytes(signature)))
    }
}
