use bon::Builder;
use time::Duration;
use time::OffsetDateTime;

use crate::asn1::oid::db;
use crate::asn1::{BitString, Children, GeneralizedTime, Node, ObjectIdentifier, ToAsn1};
use crate::cert::extensions::Extension;
use crate::key::Curve;

/// Parameters for a self-signed certificate.
///
/// # Fields
/// * `subject` - The name of the certificate subject, which is also the issuer.
/// * `serial_number` - The certificate serial number.
/// * `validity` - The validity period.
/// * `extensions` - X.509 extensions, in order.
#[derive(Clone, Debug, Builder)]
pub struct CertificateParams {
    #[builder(default)]
    pub subject: Name,
    pub serial_number: u64,
    pub validity: Validity,
    #[builder(default)]
    pub extensions: Vec<Extension>,
}

/// A certificate subject or issuer name.
///
/// Each present attribute becomes its own relative distinguished name, in the
/// order country, state, locality, organization, organizational unit, common
/// name, email address. Absent attributes are left out entirely.
///
/// # Fields
/// * `country` - The country (C).
/// * `state` - The state or province (ST).
/// * `locality` - The locality or city (L).
/// * `organization` - The organization (O).
/// * `organization_unit` - The organizational unit (OU).
/// * `common_name` - The common name (CN).
/// * `email_address` - The PKCS #9 email address, encoded as an IA5String.
#[derive(Clone, Debug, Builder, Default, PartialEq, Eq)]
pub struct Name {
    pub country: Option<String>,
    pub state: Option<String>,
    pub locality: Option<String>,
    pub organization: Option<String>,
    pub organization_unit: Option<String>,
    pub common_name: Option<String>,
    pub email_address: Option<String>,
}

impl Name {
    /// A name holding only a common name and, optionally, an email address.
    pub fn new(common_name: Option<String>, email_address: Option<String>) -> Self {
        Self {
            common_name,
            email_address,
            ..Self::default()
        }
    }
}

/// `SET { SEQUENCE { type, value } }`
fn relative_name(oid: ObjectIdentifier, value: Node) -> Node {
    Node::set([Node::sequence([oid.into(), value])])
}

impl ToAsn1 for Name {
    fn to_asn1(&self) -> Node {
        let attribute = |oid: ObjectIdentifier, value: &Option<String>| {
            value
                .as_ref()
                .map(|v| relative_name(oid, Node::string(v.as_str())))
        };

        Node::sequence(
            Children::new()
                .with_opt(attribute(db::AT_COUNTRY_NAME, &self.country))
                .with_opt(attribute(db::AT_STATE_OR_PROVINCE_NAME, &self.state))
                .with_opt(attribute(db::AT_LOCALITY_NAME, &self.locality))
                .with_opt(attribute(db::AT_ORGANIZATION_NAME, &self.organization))
                .with_opt(attribute(
                    db::AT_ORGANIZATIONAL_UNIT_NAME,
                    &self.organization_unit,
                ))
                .with_opt(attribute(db::AT_COMMON_NAME, &self.common_name))
                .with_opt(
                    self.email_address
                        .as_ref()
                        .map(|email| relative_name(db::EMAIL_ADDRESS, Node::ia5_string(email))),
                ),
        )
    }
}

/// Certificate validity period.
///
/// Both ends are checked when the period is built, so encoding never fails.
/// An absent end encodes as `99991231235959Z`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validity {
    not_before: GeneralizedTime,
    not_after: GeneralizedTime,
}

impl Validity {
    pub fn new(not_before: GeneralizedTime, not_after: GeneralizedTime) -> Self {
        Self {
            not_before,
            not_after,
        }
    }

    /// A validity period starting at `not_before` with no end date.
    ///
    /// Panics if `not_before` is outside years 0 to 9999 in UTC.
    pub fn starting(not_before: OffsetDateTime) -> Self {
        Self::new(GeneralizedTime::at(not_before), GeneralizedTime::indefinite())
    }

    /// Sets the end of the validity period.
    ///
    /// Panics if `not_after` is outside years 0 to 9999 in UTC.
    pub fn until(mut self, not_after: OffsetDateTime) -> Self {
        self.not_after = GeneralizedTime::at(not_after);
        self
    }

    /// Creates a validity period starting now for the given number of days.
    ///
    /// An end date that cannot be represented falls back to no end date.
    pub fn for_days(days: i64) -> Self {
        let now = OffsetDateTime::now_utc();
        let not_after = days
            .checked_mul(SECONDS_PER_DAY)
            .and_then(|seconds| now.checked_add(Duration::seconds(seconds)))
            .and_then(|end| GeneralizedTime::try_at(end).ok())
            .unwrap_or_else(GeneralizedTime::indefinite);
        Self::new(GeneralizedTime::at(now), not_after)
    }

    pub fn not_before(&self) -> GeneralizedTime {
        self.not_before
    }

    pub fn not_after(&self) -> GeneralizedTime {
        self.not_after
    }
}

const SECONDS_PER_DAY: i64 = 86_400;

impl ToAsn1 for Validity {
    fn to_asn1(&self) -> Node {
        Node::sequence([self.not_before.into(), self.not_after.into()])
    }
}

/// The subject's public key, already DER-encoded, tagged with its curve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubjectPublicKeyInfo {
    P256(Vec<u8>),
    P384(Vec<u8>),
    P521(Vec<u8>),
}

impl SubjectPublicKeyInfo {
    /// Wraps a complete SubjectPublicKeyInfo DER blob produced elsewhere.
    pub fn from_der(curve: Curve, der: impl Into<Vec<u8>>) -> Self {
        let der = der.into();
        match curve {
            Curve::P256 => SubjectPublicKeyInfo::P256(der),
            Curve::P384 => SubjectPublicKeyInfo::P384(der),
            Curve::P521 => SubjectPublicKeyInfo::P521(der),
        }
    }

    /// Builds the SubjectPublicKeyInfo for an uncompressed or compressed SEC1 point:
    /// `SEQUENCE { SEQUENCE { id-ecPublicKey, namedCurve }, BIT STRING point }`.
    pub fn from_sec1_point(curve: Curve, point: &[u8]) -> Self {
        let algorithm = Node::sequence([
            db::ID_EC_PUBLIC_KEY.into(),
            curve.named_curve_oid().into(),
        ]);
        let spki = Node::sequence([algorithm, BitString::from_bytes(point).into()]);
        Self::from_der(curve, spki.to_der())
    }

    pub fn curve(&self) -> Curve {
        match self {
            SubjectPublicKeyInfo::P256(_) => Curve::P256,
            SubjectPublicKeyInfo::P384(_) => Curve::P384,
            SubjectPublicKeyInfo::P521(_) => Curve::P521,
        }
    }

    pub fn as_der(&self) -> &[u8] {
        match self {
            SubjectPublicKeyInfo::P256(der)
            | SubjectPublicKeyInfo::P384(der)
            | SubjectPublicKeyInfo::P521(der) => der,
        }
    }
}

impl ToAsn1 for SubjectPublicKeyInfo {
    fn to_asn1(&self) -> Node {
        Node::Raw(self.as_der().to_vec())
    }
}
