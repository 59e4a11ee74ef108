//! An encode-only ASN.1 DER engine.
//!
//! [`der`] frames values, [`primitive`], [`time`] and [`oid`] encode leaves, and
//! [`node`] composes them into trees.

pub mod der;
pub mod node;
pub mod oid;
pub mod primitive;
pub mod time;

pub use der::{DerBuilder, DerEncode, Header, Primitivity, Tag, TagClass};
pub use node::{Children, Constructed, Node, ToAsn1};
pub use oid::ObjectIdentifier;
pub use primitive::{BitString, Ia5String, Integer, Null};
pub use self::time::GeneralizedTime;
