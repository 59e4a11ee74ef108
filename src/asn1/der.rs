//! DER tag-length-value framing.
//!
//! This is the only place that knows how identifier and length octets are laid
//! out. Everything else produces a [`Header`] sized from its own content and
//! appends that content through a [`DerBuilder`].

/// Universal tag numbers used by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Tag {
    Boolean = 1,
    Integer = 2,
    BitString = 3,
    OctetString = 4,
    Null = 5,
    ObjectIdentifier = 6,
    Utf8String = 12,
    Sequence = 16,
    Set = 17,
    PrintableString = 19,
    Ia5String = 22,
    GeneralizedTime = 24,
}

/// The two class bits of an identifier octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TagClass {
    Universal = 0,
    Application = 1,
    ContextSpecific = 2,
    Private = 3,
}

/// The constructed bit of an identifier octet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Primitivity {
    Primitive = 0,
    Constructed = 1,
}

/// Low-tag-number form holds tag numbers up to 30; this value escapes to the
/// high-tag-number form.
const HIGH_TAG_ESCAPE: u8 = 0x1F;

/// Largest content length that fits the short length form.
const SHORT_LENGTH_MAX: usize = 0x7F;

/// Identifier and length octets of a single DER value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub tag_value: u8,
    pub class: TagClass,
    pub primitivity: Primitivity,
    pub content_len: usize,
}

impl Header {
    pub fn new(tag_value: u8, class: TagClass, primitivity: Primitivity, content_len: usize) -> Self {
        Self {
            tag_value,
            class,
            primitivity,
            content_len,
        }
    }

    /// A universal, primitive header.
    pub fn primitive(tag: Tag, content_len: usize) -> Self {
        Self::new(tag as u8, TagClass::Universal, Primitivity::Primitive, content_len)
    }

    /// A universal, constructed header such as SEQUENCE or SET.
    pub fn constructed(tag: Tag, content_len: usize) -> Self {
        Self::new(tag as u8, TagClass::Universal, Primitivity::Constructed, content_len)
    }

    /// An explicit context-specific tag `[tag_number]` wrapping other values.
    pub fn explicit(tag_number: u8, content_len: usize) -> Self {
        Self::new(
            tag_number,
            TagClass::ContextSpecific,
            Primitivity::Constructed,
            content_len,
        )
    }

    /// An implicit context-specific tag `[tag_number]` replacing a primitive's own tag.
    pub fn implicit(tag_number: u8, content_len: usize) -> Self {
        Self::new(
            tag_number,
            TagClass::ContextSpecific,
            Primitivity::Primitive,
            content_len,
        )
    }

    /// Number of octets [`Header::encode`] writes.
    pub fn encoded_len(&self) -> usize {
        let tag_len = if self.tag_value >= HIGH_TAG_ESCAPE {
            1 + base128_len(u64::from(self.tag_value))
        } else {
            1
        };
        let length_len = if self.content_len <= SHORT_LENGTH_MAX {
            1
        } else {
            1 + minimal_be_len(self.content_len)
        };
        tag_len + length_len
    }

    /// Appends the identifier octet(s) followed by the length octet(s).
    pub fn encode(&self, out: &mut Vec<u8>) {
        let identifier = ((self.class as u8) << 6)
            | ((self.primitivity as u8) << 5)
            | self.tag_value.min(HIGH_TAG_ESCAPE);
        out.push(identifier);

        if self.tag_value >= HIGH_TAG_ESCAPE {
            write_base128(out, u64::from(self.tag_value));
        }

        if self.content_len <= SHORT_LENGTH_MAX {
            out.push(self.content_len as u8);
            return;
        }

        let len_bytes = self.content_len.to_be_bytes();
        let significant = &len_bytes[len_bytes.len() - minimal_be_len(self.content_len)..];
        out.push(0x80 | significant.len() as u8);
        out.extend_from_slice(significant);
    }
}

/// Byte count of `value` in big-endian with no leading zero octet.
fn minimal_be_len(value: usize) -> usize {
    let bits = usize::BITS - value.leading_zeros();
    (bits as usize).div_ceil(8).max(1)
}

/// Number of base-128 groups needed for `value`.
pub(crate) fn base128_len(value: u64) -> usize {
    let bits = u64::BITS - value.leading_zeros();
    (bits as usize).div_ceil(7).max(1)
}

/// Writes `value` as base-128 groups, most significant first, with the
/// continuation bit set on every octet except the last.
pub(crate) fn write_base128(out: &mut Vec<u8>, value: u64) {
    let groups = base128_len(value);
    for i in (0..groups).rev() {
        let group = ((value >> (7 * i)) & 0x7F) as u8;
        if i == 0 {
            out.push(group);
        } else {
            out.push(group | 0x80);
        }
    }
}

/// Append-only accumulator for DER output.
#[derive(Debug, Default, Clone)]
pub struct DerBuilder {
    bytes: Vec<u8>,
}

impl DerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_header(&mut self, header: &Header) {
        header.encode(&mut self.bytes);
    }

    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    pub fn extend<I: IntoIterator<Item = u8>>(&mut self, bytes: I) {
        self.bytes.extend(bytes);
    }

    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Appends the complete TLV encoding of `value`.
    pub fn append<E: DerEncode + ?Sized>(&mut self, value: &E) {
        self.append_header(&value.header());
        value.encode_content(self);
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// A value with a fixed DER header and content encoding.
///
/// `header().content_len` must equal the number of bytes `encode_content`
/// appends.
pub trait DerEncode {
    fn header(&self) -> Header;

    fn encode_content(&self, builder: &mut DerBuilder);

    fn to_der(&self) -> Vec<u8> {
        let mut builder = DerBuilder::new();
        builder.append(self);
        builder.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(header: Header) -> Vec<u8> {
        let mut out = Vec::new();
        header.encode(&mut out);
        assert_eq!(out.len(), header.encoded_len());
        out
    }

    #[test]
    fn test_short_form_length() {
        assert_eq!(encode(Header::primitive(Tag::OctetString, 0)), [0x04, 0x00]);
        assert_eq!(encode(Header::primitive(Tag::OctetString, 127)), [0x04, 0x7F]);
    }

    #[test]
    fn test_long_form_length_is_minimal() {
        assert_eq!(
            encode(Header::constructed(Tag::Sequence, 128)),
            [0x30, 0x81, 0x80]
        );
        assert_eq!(
            encode(Header::constructed(Tag::Sequence, 252)),
            [0x30, 0x81, 0xFC]
        );
        assert_eq!(
            encode(Header::constructed(Tag::Sequence, 256)),
            [0x30, 0x82, 0x01, 0x00]
        );
        assert_eq!(
            encode(Header::constructed(Tag::Sequence, 0x01_00_00)),
            [0x30, 0x83, 0x01, 0x00, 0x00]
        );
    }

    #[test]
    fn test_identifier_octet() {
        assert_eq!(encode(Header::constructed(Tag::Set, 0)), [0x31, 0x00]);
        assert_eq!(encode(Header::explicit(0, 3)), [0xA0, 0x03]);
        assert_eq!(encode(Header::explicit(3, 0)), [0xA3, 0x00]);
        assert_eq!(encode(Header::implicit(2, 1)), [0x82, 0x01]);
        assert_eq!(
            encode(Header::new(5, TagClass::Application, Primitivity::Primitive, 0)),
            [0x45, 0x00]
        );
        assert_eq!(
            encode(Header::new(1, TagClass::Private, Primitivity::Constructed, 0)),
            [0xE1, 0x00]
        );
    }

    #[test]
    fn test_high_tag_number_form() {
        assert_eq!(encode(Header::explicit(0x1E, 0)), [0xBE, 0x00]);
        assert_eq!(encode(Header::explicit(0x1F, 0)), [0xBF, 0x1F, 0x00]);
        assert_eq!(encode(Header::explicit(0x7F, 0)), [0xBF, 0x7F, 0x00]);
        assert_eq!(encode(Header::explicit(0x80, 0)), [0xBF, 0x81, 0x00, 0x00]);
        assert_eq!(encode(Header::explicit(0xFF, 0)), [0xBF, 0x81, 0x7F, 0x00]);
    }

    #[test]
    fn test_base128() {
        let mut out = Vec::new();
        write_base128(&mut out, 840);
        assert_eq!(out, [0x86, 0x48]);

        out.clear();
        write_base128(&mut out, 0);
        assert_eq!(out, [0x00]);

        out.clear();
        write_base128(&mut out, 113549);
        assert_eq!(out, [0x86, 0xF7, 0x0D]);
    }
}
