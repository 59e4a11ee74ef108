//! Property-based tests for the DER encoder.
//!
//! Every encoded element must carry a minimal length that matches its
//! content, and integers must be minimal two's complement.

use dercert::asn1::{DerEncode, Node, ObjectIdentifier};
use proptest::prelude::*;

/// Decodes a header: (tag, content length, header length).
fn read_header(der: &[u8]) -> (u8, usize, usize) {
    if der[1] & 0x80 == 0 {
        return (der[0], der[1] as usize, 2);
    }
    let n = (der[1] & 0x7F) as usize;
    let len = der[2..2 + n]
        .iter()
        .fold(0usize, |acc, b| (acc << 8) | *b as usize);
    (der[0], len, 2 + n)
}

fn decode_integer(content: &[u8]) -> i128 {
    let seed: i128 = if content[0] & 0x80 != 0 { -1 } else { 0 };
    content
        .iter()
        .fold(seed, |acc, b| (acc << 8) | *b as i128)
}

// Strategy for OIDs with a valid first pair of arcs.
fn arb_oid() -> impl Strategy<Value = Vec<u64>> {
    (0u64..=2, 0u64..40, prop::collection::vec(any::<u64>(), 0..6)).prop_map(
        |(first, second, rest)| {
            let mut arcs = vec![first, second];
            arcs.extend(rest);
            arcs
        },
    )
}

proptest! {
    #[test]
    fn octet_string_length_is_minimal(len in 0usize..70_000) {
        let der = Node::OctetString(vec![0xA5; len]).to_der();
        let (tag, content_len, header_len) = read_header(&der);
        prop_assert_eq!(tag, 0x04);
        prop_assert_eq!(content_len, len);
        prop_assert_eq!(der.len(), header_len + len);

        let expected_header = match len {
            0..=0x7F => 2,
            0x80..=0xFF => 3,
            0x100..=0xFFFF => 4,
            _ => 5,
        };
        prop_assert_eq!(header_len, expected_header);
    }

    #[test]
    fn signed_integers_are_minimal(value in any::<i64>()) {
        let der = Node::integer(value).to_der();
        let (tag, len, header_len) = read_header(&der);
        prop_assert_eq!(tag, 0x02);
        let content = &der[header_len..];
        prop_assert_eq!(content.len(), len);
        prop_assert_eq!(decode_integer(content), value as i128);
        if content.len() > 1 {
            let redundant = (content[0] == 0x00 && content[1] & 0x80 == 0)
                || (content[0] == 0xFF && content[1] & 0x80 != 0);
            prop_assert!(!redundant);
        }
    }

    #[test]
    fn unsigned_integers_stay_positive(value in any::<u64>()) {
        let der = Node::integer(value).to_der();
        let content = &der[2..];
        prop_assert_eq!(content[0] & 0x80, 0);
        prop_assert_eq!(decode_integer(content), value as i128);
    }

    #[test]
    fn nested_sequences_add_up(sizes in prop::collection::vec(0usize..300, 0..8)) {
        let children = sizes.iter().map(|n| Node::OctetString(vec![1; *n]));
        let der = Node::sequence(children).to_der();
        let (tag, len, header_len) = read_header(&der);
        prop_assert_eq!(tag, 0x30);
        prop_assert_eq!(der.len(), header_len + len);

        let mut rest = &der[header_len..];
        for size in &sizes {
            let (_, child_len, child_header) = read_header(rest);
            prop_assert_eq!(child_len, *size);
            rest = &rest[child_header + child_len..];
        }
        prop_assert!(rest.is_empty());
    }

    #[test]
    fn oid_text_round_trips(arcs in arb_oid()) {
        let oid = ObjectIdentifier::new(arcs.clone());
        let parsed: ObjectIdentifier = oid.to_string().parse().unwrap();
        prop_assert_eq!(parsed.arcs(), &arcs[..]);
        prop_assert_eq!(parsed.to_der(), oid.to_der());
    }
}
