//! # DerCert - A Pure Rust DER Encoder and Self-Signed Certificate Builder
//!
//! DerCert builds DER-encoded X.509 v3 certificates from a small tree of ASN.1
//! nodes, and signs them with ECDSA over SHA-256. Encoding never fails: every
//! value knows its own length, so a whole certificate is produced in one pass.
//!
//! ## Supported Key Types
//!
//! - **ECDSA**: P-256, P-384 and P-521 curves, always signed with SHA-256
//!
//! ## Supported Certificate Formats
//!
//! - **DER**: Distinguished Encoding Rules (binary format)
//! - **PEM**: Privacy-Enhanced Mail (base64-encoded text format)
//!
//! ## Quick Start
//!
//! ### Generating a Self-Signed Certificate
//!
//! ```rust,no_run
//! use dercert::{
//!     key::KeyPair,
//!     cert::{Certificate, params::{CertificateParams, Name, Validity}},
//! };
//!
//! # fn main() -> Result<(), dercert::error::DerCertError> {
//! let key_pair = KeyPair::generate_ecdsa_p256();
//!
//! let subject = Name::builder()
//!     .common_name("example.com".to_string())
//!     .email_address("admin@example.com".to_string())
//!     .build();
//!
//! let params = CertificateParams::builder()
//!     .subject(subject)
//!     .serial_number(1)
//!     .validity(Validity::for_days(365))
//!     .build();
//!
//! let certificate = Certificate::new_self_signed(&params, &key_pair)?;
//! println!("Certificate:\n{}", certificate.to_pem());
//! # Ok(())
//! # }
//! ```
//!
//! ### Signing With an External Key
//!
//! Anything implementing [`pki::CertificateSigner`] can sign, such as a key held
//! in a hardware token. The certificate only needs the public key.
//!
//! ```rust,no_run
//! use dercert::{
//!     cert::params::{Name, SubjectPublicKeyInfo, Validity},
//!     key::Curve,
//!     pki::{CertificateSigner, SigningError},
//!     tbs_certificate::TbsCertificate,
//! };
//!
//! struct Token;
//!
//! impl CertificateSigner for Token {
//!     fn sign_digest(&self, _curve: Curve, _digest: &[u8]) -> Result<Vec<u8>, SigningError> {
//!         Err(SigningError::KeyUnavailable("token not inserted".to_string()))
//!     }
//! }
//!
//! # fn main() -> Result<(), dercert::error::DerCertError> {
//! let point = [0x04; 65];
//! let name = Name::new(Some("device".to_string()), None);
//! let tbs = TbsCertificate::builder()
//!     .serial_number(7)
//!     .issuer(name.clone())
//!     .subject(name)
//!     .validity(Validity::for_days(30))
//!     .subject_public_key_info(SubjectPublicKeyInfo::from_sec1_point(Curve::P256, &point))
//!     .build();
//! let certificate = tbs.sign(&Token)?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Working with Certificate Extensions
//!
//! ```rust,no_run
//! use dercert::{
//!     key::KeyPair,
//!     cert::{
//!         Certificate,
//!         params::{CertificateParams, Name, Validity},
//!         extensions::{Extension, GeneralName, SubjectAltName, ExtendedKeyUsage, ExtendedKeyUsageOption},
//!     },
//! };
//!
//! # fn main() -> Result<(), dercert::error::DerCertError> {
//! let key_pair = KeyPair::generate_ecdsa_p384();
//!
//! let san = SubjectAltName {
//!     names: vec![GeneralName::dns("example.com"), GeneralName::dns("www.example.com")],
//! };
//! let eku = ExtendedKeyUsage {
//!     usage: vec![ExtendedKeyUsageOption::ServerAuth, ExtendedKeyUsageOption::ClientAuth],
//! };
//!
//! let params = CertificateParams::builder()
//!     .subject(Name::new(Some("example.com".to_string()), None))
//!     .serial_number(2)
//!     .validity(Validity::for_days(90))
//!     .extensions(vec![
//!         Extension::from_extension(san, false),
//!         Extension::from_extension(eku, true),
//!     ])
//!     .build();
//!
//! let certificate = Certificate::new_self_signed(&params, &key_pair)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`asn1`]: The DER encoder, object identifiers and the node tree
//! - [`cert`]: Certificate model, names, validity and extensions
//! - [`key`]: Curves and in-memory ECDSA key pairs
//! - [`pki`]: The signing capability used to sign certificates
//! - [`tbs_certificate`]: The to-be-signed structure and the signing pipeline
//! - [`error`]: Error types

pub mod asn1;
pub mod cert;
pub mod error;
pub mod key;
pub mod pem_utils;
pub mod pki;
pub mod tbs_certificate;
