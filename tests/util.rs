#![allow(dead_code)]

use dercert::cert::params::{CertificateParams, Name, Validity};
use dercert::key::{Curve, KeyPair};
use time::OffsetDateTime;
use time::macros::datetime;

pub const SERIAL: u64 = 0x0123_4568_7890;

/// 2001-01-01T00:00:00Z
pub fn reference_date() -> OffsetDateTime {
    datetime!(2001-01-01 0:00 UTC)
}

/// A key with a fixed private scalar so encodings are reproducible.
pub fn fixed_key(curve: Curve) -> KeyPair {
    let secret = vec![0x5A; curve.field_size()];
    let secret = match curve {
        // The top bits of a P-521 scalar must leave it below the group order.
        Curve::P521 => {
            let mut secret = secret;
            secret[0] = 0x00;
            secret
        }
        _ => secret,
    };
    KeyPair::from_secret_bytes(curve, &secret).unwrap()
}

pub fn test_name() -> Name {
    Name::new(
        Some("Test".to_string()),
        Some("test@example.com".to_string()),
    )
}

pub fn sample_params() -> CertificateParams {
    CertificateParams::builder()
        .subject(test_name())
        .serial_number(SERIAL)
        .validity(Validity::starting(reference_date()))
        .build()
}

/// Reads one DER element from the front of `der`, returning
/// (tag, whole element, rest).
pub fn read_element(der: &[u8]) -> (u8, &[u8], &[u8]) {
    let tag = der[0];
    let (len, header_len) = if der[1] & 0x80 == 0 {
        (der[1] as usize, 2)
    } else {
        let n = (der[1] & 0x7F) as usize;
        let len = der[2..2 + n]
            .iter()
            .fold(0usize, |acc, b| (acc << 8) | *b as usize);
        (len, 2 + n)
    };
    let (element, rest) = der.split_at(header_len + len);
    (tag, element, rest)
}

/// The content octets of a single DER element.
pub fn content(element: &[u8]) -> &[u8] {
    let header_len = if element[1] & 0x80 == 0 {
        2
    } else {
        2 + (element[1] & 0x7F) as usize
    };
    &element[header_len..]
}

/// Splits a certificate into (tbs, signature algorithm, signature bit string).
pub fn split_certificate(der: &[u8]) -> (&[u8], &[u8], &[u8]) {
    let (tag, cert, rest) = read_element(der);
    assert_eq!(tag, 0x30);
    assert!(rest.is_empty());
    let body = content(cert);
    let (_, tbs, body) = read_element(body);
    let (_, algorithm, body) = read_element(body);
    let (_, signature, body) = read_element(body);
    assert!(body.is_empty());
    (tbs, algorithm, signature)
}
