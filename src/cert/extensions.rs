use std::net::IpAddr;

use crate::asn1::oid::db;
use crate::asn1::{BitString, Children, Ia5String, Node, ObjectIdentifier, ToAsn1};

/// Trait for encoding X.509 extension values.
///
/// # Example
/// ```
/// use dercert::cert::extensions::{SubjectAltName, GeneralName, X509Extension};
/// let san = SubjectAltName {
///     names: vec![GeneralName::dns("example.com")],
/// };
/// let value = san.to_extension_value().to_der();
/// assert_eq!(&value[..4], [0x30, 0x0D, 0x82, 0x0B]);
/// ```
pub trait X509Extension {
    /// The Object Identifier (OID) for the extension.
    const OID: ObjectIdentifier;

    /// The extension value, before it is wrapped in an OCTET STRING.
    fn to_extension_value(&self) -> Node;
}

/// Represents an X.509 extension.
///
/// # Fields
/// * `oid` - The object identifier of the extension.
/// * `critical` - Indicates if the extension is critical.
/// * `value` - The DER-encoded value of the extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extension {
    pub oid: ObjectIdentifier,
    pub critical: bool,
    /// DER-encoded extension value
    pub value: Vec<u8>,
}

impl Extension {
    /// Creates an `Extension` from a specific extension.
    pub fn from_extension<E: X509Extension>(extension: E, critical: bool) -> Self {
        Self {
            oid: E::OID,
            critical,
            value: extension.to_extension_value().to_der(),
        }
    }
}

/// `SEQUENCE { extnID, critical BOOLEAN DEFAULT FALSE, extnValue OCTET STRING }`
///
/// DER leaves a DEFAULT value out, so `critical` only appears when true.
impl ToAsn1 for Extension {
    fn to_asn1(&self) -> Node {
        Node::sequence(
            Children::new()
                .with(self.oid.clone())
                .with_opt(self.critical.then_some(true))
                .with(Node::OctetString(self.value.clone())),
        )
    }
}

/// A single entry of a SubjectAltName.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneralName {
    /// rfc822Name `[1]`
    Email(Ia5String),
    /// dNSName `[2]`
    Dns(Ia5String),
    /// uniformResourceIdentifier `[6]`
    Uri(Ia5String),
    /// iPAddress `[7]`
    Ip(IpAddr),
}

impl GeneralName {
    /// Panics if `name` is not ASCII.
    pub fn dns(name: impl Into<String>) -> Self {
        GeneralName::Dns(Ia5String::new(name))
    }

    /// Panics if `address` is not ASCII.
    pub fn email(address: impl Into<String>) -> Self {
        GeneralName::Email(Ia5String::new(address))
    }

    /// Panics if `uri` is not ASCII.
    pub fn uri(uri: impl Into<String>) -> Self {
        GeneralName::Uri(Ia5String::new(uri))
    }
}

impl ToAsn1 for GeneralName {
    fn to_asn1(&self) -> Node {
        match self {
            GeneralName::Email(address) => Node::implicit(1, address.as_str().as_bytes()),
            GeneralName::Dns(name) => Node::implicit(2, name.as_str().as_bytes()),
            GeneralName::Uri(uri) => Node::implicit(6, uri.as_str().as_bytes()),
            GeneralName::Ip(IpAddr::V4(ip)) => Node::implicit(7, ip.octets()),
            GeneralName::Ip(IpAddr::V6(ip)) => Node::implicit(7, ip.octets()),
        }
    }
}

/// Represents the Subject Alternative Name (SAN) extension.
///
/// This extension specifies additional identities for the subject of the certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectAltName {
    pub names: Vec<GeneralName>,
}

impl X509Extension for SubjectAltName {
    const OID: ObjectIdentifier = db::CE_SUBJECT_ALT_NAME;

    fn to_extension_value(&self) -> Node {
        Node::sequence(self.names.iter().map(GeneralName::to_asn1))
    }
}

/// Represents the Basic Constraints extension.
///
/// # Fields
/// * `is_ca` - Indicates if the certificate is a CA.
/// * `max_path_length` - The maximum number of intermediate CAs allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BasicConstraints {
    pub is_ca: bool,
    pub max_path_length: Option<u32>,
}

impl X509Extension for BasicConstraints {
    const OID: ObjectIdentifier = db::CE_BASIC_CONSTRAINTS;

    fn to_extension_value(&self) -> Node {
        Node::sequence(
            Children::new()
                .with_opt(self.is_ca.then_some(true))
                .with_opt(self.max_path_length.map(Node::integer)),
        )
    }
}

/// A bit of the Key Usage extension, numbered as in RFC 5280.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum KeyUsageOption {
    DigitalSignature = 0,
    NonRepudiation = 1,
    KeyEncipherment = 2,
    DataEncipherment = 3,
    KeyAgreement = 4,
    KeyCertSign = 5,
    CrlSign = 6,
    EncipherOnly = 7,
    DecipherOnly = 8,
}

/// Represents the Key Usage extension.
///
/// This extension defines the purpose of the key contained in the certificate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyUsage {
    pub usage: Vec<KeyUsageOption>,
}

impl KeyUsage {
    /// The named bit list as a DER BIT STRING: trailing zero bits and bytes
    /// are dropped.
    fn to_bit_string(&self) -> BitString {
        let mut bytes = [0u8; 2];
        for bit in &self.usage {
            let bit = *bit as usize;
            bytes[bit / 8] |= 0x80 >> (bit % 8);
        }
        let used = bytes.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
        match bytes[..used].last() {
            Some(last) => BitString::new(&bytes[..used], last.trailing_zeros() as u8),
            None => BitString::from_bytes(Vec::new()),
        }
    }
}

impl X509Extension for KeyUsage {
    const OID: ObjectIdentifier = db::CE_KEY_USAGE;

    fn to_extension_value(&self) -> Node {
        self.to_bit_string().into()
    }
}

/// Represents the Extended Key Usage extension.
///
/// This extension indicates purposes for which the public key may be used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtendedKeyUsage {
    pub usage: Vec<ExtendedKeyUsageOption>,
}

impl X509Extension for ExtendedKeyUsage {
    const OID: ObjectIdentifier = db::CE_EXT_KEY_USAGE;

    fn to_extension_value(&self) -> Node {
        Node::sequence(
            self.usage
                .iter()
                .map(|usage| ObjectIdentifier::from(*usage).into()),
        )
    }
}

/// Represents an option for the Extended Key Usage extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExtendedKeyUsageOption {
    ServerAuth,
    ClientAuth,
    CodeSigning,
    EmailProtection,
    TimeStamping,
    OcspSigning,
}

impl From<ExtendedKeyUsageOption> for ObjectIdentifier {
    fn from(value: ExtendedKeyUsageOption) -> Self {
        let purpose = match value {
            ExtendedKeyUsageOption::ServerAuth => 1,
            ExtendedKeyUsageOption::ClientAuth => 2,
            ExtendedKeyUsageOption::CodeSigning => 3,
            ExtendedKeyUsageOption::EmailProtection => 4,
            ExtendedKeyUsageOption::TimeStamping => 8,
            ExtendedKeyUsageOption::OcspSigning => 9,
        };
        db::ID_KP.child(&[purpose])
    }
}
