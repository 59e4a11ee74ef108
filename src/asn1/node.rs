//! ASN.1 value trees.
//!
//! A [`Node`] is either a scalar leaf, a pre-encoded blob, or a constructed
//! value holding ordered children. Domain types describe themselves as a tree
//! through [`ToAsn1`] and get their DER bytes from it.
//!
//! ```
//! use dercert::asn1::{Children, Node};
//!
//! let common_name: Option<&str> = Some("Test");
//! let email: Option<&str> = None;
//!
//! let name = Node::sequence(
//!     Children::new()
//!         .with_opt(common_name.map(|cn| Node::set([Node::string(cn)])))
//!         .with_opt(email.map(|e| Node::set([Node::ia5_string(e)]))),
//! );
//! assert_eq!(name.to_der(), [0x30, 0x08, 0x31, 0x06, 0x13, 0x04, b'T', b'e', b's', b't']);
//! ```

use super::der::{DerBuilder, Header, Tag};
use super::oid::ObjectIdentifier;
use super::primitive::{BitString, Ia5String, Integer, Null};
use super::time::GeneralizedTime;

/// How a constructed node is tagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constructed {
    Sequence,
    Set,
    /// Explicit context-specific tag `[n]`.
    Explicit(u8),
}

impl Constructed {
    fn header(self, content_len: usize) -> Header {
        match self {
            Constructed::Sequence => Header::constructed(Tag::Sequence, content_len),
            Constructed::Set => Header::constructed(Tag::Set, content_len),
            Constructed::Explicit(tag_number) => Header::explicit(tag_number, content_len),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Boolean(bool),
    Integer(Integer),
    OctetString(Vec<u8>),
    BitString(BitString),
    /// PrintableString or UTF8String, chosen from the content.
    String(String),
    Ia5String(Ia5String),
    Time(GeneralizedTime),
    Oid(ObjectIdentifier),
    Null,
    /// Already DER-encoded bytes, emitted verbatim.
    Raw(Vec<u8>),
    /// A primitive value under an implicit context-specific tag `[n]`.
    Implicit { tag_number: u8, content: Vec<u8> },
    Constructed { kind: Constructed, children: Vec<Node> },
}

impl Node {
    pub fn integer(value: impl Into<Integer>) -> Self {
        Node::Integer(value.into())
    }

    pub fn string(value: impl Into<String>) -> Self {
        Node::String(value.into())
    }

    /// Panics if `value` is not ASCII.
    pub fn ia5_string(value: impl Into<String>) -> Self {
        Node::Ia5String(Ia5String::new(value))
    }

    pub fn sequence(children: impl IntoIterator<Item = Node>) -> Self {
        Node::Constructed {
            kind: Constructed::Sequence,
            children: children.into_iter().collect(),
        }
    }

    pub fn set(children: impl IntoIterator<Item = Node>) -> Self {
        Node::Constructed {
            kind: Constructed::Set,
            children: children.into_iter().collect(),
        }
    }

    pub fn explicit(tag_number: u8, children: impl IntoIterator<Item = Node>) -> Self {
        Node::Constructed {
            kind: Constructed::Explicit(tag_number),
            children: children.into_iter().collect(),
        }
    }

    pub fn implicit(tag_number: u8, content: impl Into<Vec<u8>>) -> Self {
        Node::Implicit {
            tag_number,
            content: content.into(),
        }
    }

    pub fn to_der(&self) -> Vec<u8> {
        let mut builder = DerBuilder::new();
        self.encode(&mut builder);
        builder.into_bytes()
    }

    /// Appends this node to `builder`.
    ///
    /// Constructed nodes encode every child on its own first, so the parent
    /// header can carry the exact summed length.
    pub fn encode(&self, builder: &mut DerBuilder) {
        match self {
            Node::Boolean(value) => builder.append(value),
            Node::Integer(value) => builder.append(value),
            Node::OctetString(bytes) => builder.append(bytes),
            Node::BitString(bits) => builder.append(bits),
            Node::String(value) => builder.append(value),
            Node::Ia5String(value) => builder.append(value),
            Node::Time(time) => builder.append(time),
            Node::Oid(oid) => builder.append(oid),
            Node::Null => builder.append(&Null),
            Node::Raw(bytes) => builder.extend_from_slice(bytes),
            Node::Implicit {
                tag_number,
                content,
            } => {
                builder.append_header(&Header::implicit(*tag_number, content.len()));
                builder.extend_from_slice(content);
            }
            Node::Constructed { kind, children } => {
                let encoded: Vec<Vec<u8>> = children.iter().map(Node::to_der).collect();
                let content_len = encoded.iter().map(Vec::len).sum();
                builder.append_header(&kind.header(content_len));
                for child in &encoded {
                    builder.extend_from_slice(child);
                }
            }
        }
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Boolean(value)
    }
}

impl From<BitString> for Node {
    fn from(value: BitString) -> Self {
        Node::BitString(value)
    }
}

impl From<Ia5String> for Node {
    fn from(value: Ia5String) -> Self {
        Node::Ia5String(value)
    }
}

impl From<GeneralizedTime> for Node {
    fn from(value: GeneralizedTime) -> Self {
        Node::Time(value)
    }
}

impl From<ObjectIdentifier> for Node {
    fn from(value: ObjectIdentifier) -> Self {
        Node::Oid(value)
    }
}

impl From<Null> for Node {
    fn from(_: Null) -> Self {
        Node::Null
    }
}

/// Ordered children of a constructed node, assembled with optional and
/// alternative entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Children(Vec<Node>);

impl Children {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, node: impl Into<Node>) -> Self {
        self.0.push(node.into());
        self
    }

    /// Adds `node` if present; `None` contributes nothing.
    pub fn with_opt(mut self, node: Option<impl Into<Node>>) -> Self {
        if let Some(node) = node {
            self.0.push(node.into());
        }
        self
    }

    /// Adds the node built by `first` when `condition` holds, otherwise the one
    /// built by `second`. Only the chosen branch is evaluated.
    pub fn with_either(
        self,
        condition: bool,
        first: impl FnOnce() -> Node,
        second: impl FnOnce() -> Node,
    ) -> Self {
        if condition {
            self.with(first())
        } else {
            self.with(second())
        }
    }

    /// Flattens a nested block of nodes into this list, keeping their order.
    pub fn with_all(mut self, nodes: impl IntoIterator<Item = Node>) -> Self {
        self.0.extend(nodes);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Children {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<Node> for Children {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Children(iter.into_iter().collect())
    }
}

/// A domain value that describes itself as an ASN.1 tree.
pub trait ToAsn1 {
    fn to_asn1(&self) -> Node;

    fn to_der(&self) -> Vec<u8> {
        self.to_asn1().to_der()
    }
}

impl ToAsn1 for Node {
    fn to_asn1(&self) -> Node {
        self.clone()
    }

    fn to_der(&self) -> Vec<u8> {
        Node::to_der(self)
    }
}
