//! Object identifiers.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use super::der::{DerBuilder, DerEncode, Header, Tag, base128_len, write_base128};
use crate::error::DerCertError;

/// An OBJECT IDENTIFIER such as `1.2.840.10045.4.3.2`.
///
/// Always holds at least two arcs; the first is 0, 1 or 2 and, under 0 or 1,
/// the second is below 40.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectIdentifier {
    arcs: Cow<'static, [u64]>,
}

impl ObjectIdentifier {
    /// Builds an identifier from a static arc list; usable in constants.
    ///
    /// Panics on an invalid arc list.
    pub const fn new_static(arcs: &'static [u64]) -> Self {
        assert!(arcs.len() >= 2, "an object identifier needs two arcs");
        assert!(arcs[0] <= 2, "the first arc must be 0, 1 or 2");
        assert!(arcs[0] == 2 || arcs[1] < 40, "the second arc must be below 40");
        assert!(arcs[1] <= u64::MAX - 80, "the second arc is too large");
        Self {
            arcs: Cow::Borrowed(arcs),
        }
    }

    /// Panics on an invalid arc list.
    pub fn new(arcs: impl Into<Vec<u64>>) -> Self {
        let arcs = arcs.into();
        if let Err(err) = validate(&arcs) {
            panic!("{err}");
        }
        Self {
            arcs: Cow::Owned(arcs),
        }
    }

    /// Returns a new identifier with `arcs` appended.
    pub fn child(&self, arcs: &[u64]) -> Self {
        let mut extended = self.arcs.to_vec();
        extended.extend_from_slice(arcs);
        Self {
            arcs: Cow::Owned(extended),
        }
    }

    pub fn arcs(&self) -> &[u64] {
        &self.arcs
    }

    /// Iterates the subidentifiers: the first two arcs merged, then the rest.
    fn subidentifiers(&self) -> impl Iterator<Item = u64> + '_ {
        std::iter::once(40 * self.arcs[0] + self.arcs[1]).chain(self.arcs[2..].iter().copied())
    }
}

fn validate(arcs: &[u64]) -> Result<(), DerCertError> {
    match arcs {
        [first, second, ..] => {
            if *first > 2 {
                Err(DerCertError::InvalidInput(format!(
                    "first OID arc must be 0, 1 or 2, got {first}"
                )))
            } else if *first < 2 && *second >= 40 {
                Err(DerCertError::InvalidInput(format!(
                    "second OID arc must be below 40 under {first}, got {second}"
                )))
            } else if *second > u64::MAX - 80 {
                Err(DerCertError::InvalidInput(format!(
                    "second OID arc is too large: {second}"
                )))
            } else {
                Ok(())
            }
        }
        _ => Err(DerCertError::InvalidInput(
            "an OID needs at least two arcs".to_string(),
        )),
    }
}

impl FromStr for ObjectIdentifier {
    type Err = DerCertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let arcs = s
            .split('.')
            .map(|arc| {
                arc.parse::<u64>()
                    .map_err(|e| DerCertError::InvalidInput(format!("bad OID arc {arc:?}: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        validate(&arcs)?;
        Ok(Self {
            arcs: Cow::Owned(arcs),
        })
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arc) in self.arcs.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{arc}")?;
        }
        Ok(())
    }
}

impl DerEncode for ObjectIdentifier {
    fn header(&self) -> Header {
        let len = self.subidentifiers().map(base128_len).sum();
        Header::primitive(Tag::ObjectIdentifier, len)
    }

    fn encode_content(&self, builder: &mut DerBuilder) {
        let mut content = Vec::new();
        for subidentifier in self.subidentifiers() {
            write_base128(&mut content, subidentifier);
        }
        builder.extend_from_slice(&content);
    }
}

/// Identifiers used by the certificate model.
pub mod db {
    use super::ObjectIdentifier;

    /// ecdsa-with-SHA256 (RFC 5758)
    pub const ECDSA_WITH_SHA_256: ObjectIdentifier =
        ObjectIdentifier::new_static(&[1, 2, 840, 10045, 4, 3, 2]);

    /// ANSI X9.62 root, the parent of the EC key and curve identifiers.
    pub const ANSI_X9_62: ObjectIdentifier = ObjectIdentifier::new_static(&[1, 2, 840, 10045]);
    pub const ID_EC_PUBLIC_KEY: ObjectIdentifier =
        ObjectIdentifier::new_static(&[1, 2, 840, 10045, 2, 1]);
    pub const SECP256R1: ObjectIdentifier =
        ObjectIdentifier::new_static(&[1, 2, 840, 10045, 3, 1, 7]);
    pub const SECP384R1: ObjectIdentifier = ObjectIdentifier::new_static(&[1, 3, 132, 0, 34]);
    pub const SECP521R1: ObjectIdentifier = ObjectIdentifier::new_static(&[1, 3, 132, 0, 35]);

    pub const AT_COUNTRY_NAME: ObjectIdentifier = ObjectIdentifier::new_static(&[2, 5, 4, 6]);
    pub const AT_LOCALITY_NAME: ObjectIdentifier = ObjectIdentifier::new_static(&[2, 5, 4, 7]);
    pub const AT_STATE_OR_PROVINCE_NAME: ObjectIdentifier =
        ObjectIdentifier::new_static(&[2, 5, 4, 8]);
    pub const AT_ORGANIZATION_NAME: ObjectIdentifier =
        ObjectIdentifier::new_static(&[2, 5, 4, 10]);
    pub const AT_ORGANIZATIONAL_UNIT_NAME: ObjectIdentifier =
        ObjectIdentifier::new_static(&[2, 5, 4, 11]);
    pub const AT_COMMON_NAME: ObjectIdentifier = ObjectIdentifier::new_static(&[2, 5, 4, 3]);
    /// PKCS #9 emailAddress
    pub const EMAIL_ADDRESS: ObjectIdentifier =
        ObjectIdentifier::new_static(&[1, 2, 840, 113549, 1, 9, 1]);

    pub const CE_SUBJECT_ALT_NAME: ObjectIdentifier = ObjectIdentifier::new_static(&[2, 5, 29, 17]);
    pub const CE_KEY_USAGE: ObjectIdentifier = ObjectIdentifier::new_static(&[2, 5, 29, 15]);
    pub const CE_BASIC_CONSTRAINTS: ObjectIdentifier =
        ObjectIdentifier::new_static(&[2, 5, 29, 19]);
    pub const CE_EXT_KEY_USAGE: ObjectIdentifier = ObjectIdentifier::new_static(&[2, 5, 29, 37]);

    /// id-kp, parent of the extended key usage purposes.
    pub const ID_KP: ObjectIdentifier = ObjectIdentifier::new_static(&[1, 3, 6, 1, 5, 5, 7, 3]);
}
