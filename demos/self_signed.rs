use std::net::{IpAddr, Ipv6Addr};

use dercert::cert::Certificate;
use dercert::cert::extensions::{
    BasicConstraints, Extension, ExtendedKeyUsage, ExtendedKeyUsageOption, GeneralName,
    SubjectAltName,
};
use dercert::cert::params::{CertificateParams, Name, Validity};
use dercert::error::DerCertError;
use dercert::key::KeyPair;

fn main() -> Result<(), DerCertError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Generate a key pair for the certificate using ECDSA P-256
    let key = KeyPair::generate_ecdsa_p256();

    let subject = Name::builder()
        .common_name("localhost".to_string())
        .organization("Example Corp".to_string())
        .email_address("admin@example.com".to_string())
        .build();

    let params = CertificateParams::builder()
        .subject(subject)
        .serial_number(1)
        .validity(Validity::for_days(365))
        .extensions(vec![
            Extension::from_extension(BasicConstraints::default(), true),
            Extension::from_extension(
                ExtendedKeyUsage {
                    usage: vec![ExtendedKeyUsageOption::ServerAuth],
                },
                false,
            ),
            Extension::from_extension(
                SubjectAltName {
                    names: vec![
                        GeneralName::dns("localhost"),
                        GeneralName::Ip(IpAddr::V6(Ipv6Addr::LOCALHOST)),
                    ],
                },
                false,
            ),
        ])
        .build();

    let cert = Certificate::new_self_signed(&params, &key)?;
    print!("{}", cert.to_pem());
    Ok(())
}
