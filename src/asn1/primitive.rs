//! DER encodings for primitive values.

use super::der::{DerBuilder, DerEncode, Header, Tag};
use crate::error::DerCertError;

impl DerEncode for bool {
    fn header(&self) -> Header {
        Header::primitive(Tag::Boolean, 1)
    }

    fn encode_content(&self, builder: &mut DerBuilder) {
        builder.push(if *self { 0xFF } else { 0x00 });
    }
}

/// Minimal two's-complement encoding of `value`.
///
/// Returns the 16-byte big-endian representation and the index of its first
/// significant octet. A leading octet is redundant when it and the top bit of
/// the next octet are all zeros or all ones.
fn integer_octets(value: i128) -> ([u8; 16], usize) {
    let bytes = value.to_be_bytes();
    let mut start = 0;
    while start < bytes.len() - 1 {
        let redundant = match bytes[start] {
            0x00 => bytes[start + 1] & 0x80 == 0,
            0xFF => bytes[start + 1] & 0x80 != 0,
            _ => false,
        };
        if !redundant {
            break;
        }
        start += 1;
    }
    (bytes, start)
}

/// An INTEGER of any width up to 64 bits, signed or unsigned.
///
/// Widening to `i128` keeps the sign of signed values and gives unsigned
/// values with their top bit set the extra zero octet they need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Integer(i128);

macro_rules! impl_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Integer {
                fn from(value: $ty) -> Self {
                    Integer(value as i128)
                }
            }

            impl DerEncode for $ty {
                fn header(&self) -> Header {
                    Integer::from(*self).header()
                }

                fn encode_content(&self, builder: &mut DerBuilder) {
                    Integer::from(*self).encode_content(builder)
                }
            }
        )*
    };
}

impl_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl DerEncode for Integer {
    fn header(&self) -> Header {
        let (bytes, start) = integer_octets(self.0);
        Header::primitive(Tag::Integer, bytes.len() - start)
    }

    fn encode_content(&self, builder: &mut DerBuilder) {
        let (bytes, start) = integer_octets(self.0);
        builder.extend_from_slice(&bytes[start..]);
    }
}

/// OCTET STRING: raw bytes.
impl DerEncode for [u8] {
    fn header(&self) -> Header {
        Header::primitive(Tag::OctetString, self.len())
    }

    fn encode_content(&self, builder: &mut DerBuilder) {
        builder.extend_from_slice(self);
    }
}

impl DerEncode for Vec<u8> {
    fn header(&self) -> Header {
        self.as_slice().header()
    }

    fn encode_content(&self, builder: &mut DerBuilder) {
        self.as_slice().encode_content(builder)
    }
}

/// A BIT STRING: content bytes plus the number of unused bits in the last byte.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BitString {
    bytes: Vec<u8>,
    unused_bits: u8,
}

impl BitString {
    /// Panics if `unused_bits` is above 7, or non-zero for empty content.
    pub fn new(bytes: impl Into<Vec<u8>>, unused_bits: u8) -> Self {
        let bytes = bytes.into();
        assert!(unused_bits <= 7, "a bit string has at most 7 unused bits");
        assert!(
            !bytes.is_empty() || unused_bits == 0,
            "an empty bit string has no unused bits"
        );
        Self { bytes, unused_bits }
    }

    /// A bit string whose every bit is significant.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(bytes, 0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn unused_bits(&self) -> u8 {
        self.unused_bits
    }
}

impl DerEncode for BitString {
    fn header(&self) -> Header {
        Header::primitive(Tag::BitString, 1 + self.bytes.len())
    }

    fn encode_content(&self, builder: &mut DerBuilder) {
        builder.push(self.unused_bits);
        builder.extend_from_slice(&self.bytes);
    }
}

/// Characters allowed in a PrintableString besides ASCII letters and digits.
const PRINTABLE_PUNCTUATION: &[u8] = b" '()+,-./:=?";

fn is_printable(s: &str) -> bool {
    s.bytes()
        .all(|b| b.is_ascii_alphanumeric() || PRINTABLE_PUNCTUATION.contains(&b))
}

/// Character strings pick PrintableString when every character allows it and
/// UTF8String otherwise.
impl DerEncode for str {
    fn header(&self) -> Header {
        let tag = if is_printable(self) {
            Tag::PrintableString
        } else {
            Tag::Utf8String
        };
        Header::primitive(tag, self.len())
    }

    fn encode_content(&self, builder: &mut DerBuilder) {
        builder.extend_from_slice(self.as_bytes());
    }
}

impl DerEncode for String {
    fn header(&self) -> Header {
        self.as_str().header()
    }

    fn encode_content(&self, builder: &mut DerBuilder) {
        self.as_str().encode_content(builder)
    }
}

/// An IA5String, used for email addresses and DNS or URI names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ia5String(String);

impl Ia5String {
    /// Panics if `content` is not pure ASCII.
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        assert!(content.is_ascii(), "IA5String content must be ASCII");
        Self(content)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Ia5String {
    type Error = DerCertError;

    fn try_from(content: String) -> Result<Self, Self::Error> {
        if content.is_ascii() {
            Ok(Self(content))
        } else {
            Err(DerCertError::InvalidInput(format!(
                "IA5String must be ASCII: {content:?}"
            )))
        }
    }
}

impl TryFrom<&str> for Ia5String {
    type Error = DerCertError;

    fn try_from(content: &str) -> Result<Self, Self::Error> {
        Self::try_from(content.to_string())
    }
}

impl DerEncode for Ia5String {
    fn header(&self) -> Header {
        Header::primitive(Tag::Ia5String, self.0.len())
    }

    fn encode_content(&self, builder: &mut DerBuilder) {
        builder.extend_from_slice(self.0.as_bytes());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Null;

impl DerEncode for Null {
    fn header(&self) -> Header {
        Header::primitive(Tag::Null, 0)
    }

    fn encode_content(&self, _builder: &mut DerBuilder) {}
}
