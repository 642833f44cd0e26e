//! Property-based tests for the PDU codec.
//!
//! Generated PDUs must survive encode/decode unchanged, their encodings
//! must be canonical, and no input of any shape may make decoding panic.

use bytes::Bytes;
use proptest::prelude::*;
use snmp_pdu::{Oid, Pdu, PduCodec, PduError, PduType, RawVarbindCodec, Value, VarBind};

// =============================================================================
// Arbitrary Implementations
// =============================================================================

/// Strategy for generating valid OIDs that can round-trip through BER.
///
/// The first two arcs share one subidentifier, so arc1 is 0..=2 and arc2 is
/// below 40 unless arc1 is 2, where any u32 fits. Single-arc OIDs decode as
/// two arcs and are left out.
fn arb_oid() -> impl Strategy<Value = Oid> {
    prop_oneof![
        Just(Oid::empty()),
        (0u32..=2, prop::collection::vec(any::<u32>(), 1..=19)).prop_map(
            |(arc1, remaining_arcs)| {
                let arc2 = if arc1 < 2 {
                    remaining_arcs[0] % 40
                } else {
                    remaining_arcs[0]
                };

                let mut arcs = vec![arc1, arc2];
                arcs.extend_from_slice(&remaining_arcs[1..]);
                Oid::from_slice(&arcs)
            }
        ),
    ]
}

fn arb_bytes() -> impl Strategy<Value = Bytes> {
    prop::collection::vec(any::<u8>(), 0..=256).prop_map(Bytes::from)
}

fn arb_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i32>().prop_map(Value::Integer),
        arb_bytes().prop_map(Value::OctetString),
        Just(Value::Null),
        arb_oid().prop_map(Value::ObjectIdentifier),
        any::<[u8; 4]>().prop_map(Value::IpAddress),
        any::<u32>().prop_map(Value::Counter32),
        any::<u32>().prop_map(Value::Gauge32),
        any::<u32>().prop_map(Value::TimeTicks),
        arb_bytes().prop_map(Value::Opaque),
        any::<u64>().prop_map(Value::Counter64),
        Just(Value::NoSuchObject),
        Just(Value::NoSuchInstance),
        Just(Value::EndOfMibView),
    ]
}

fn arb_varbinds() -> impl Strategy<Value = Vec<VarBind>> {
    prop::collection::vec(
        (arb_oid(), arb_value()).prop_map(|(oid, value)| VarBind::new(oid, value)),
        0..=10,
    )
}

fn arb_pdu_type() -> impl Strategy<Value = PduType> {
    prop::sample::select(PduType::ALL.to_vec())
}

fn arb_pdu_error() -> impl Strategy<Value = PduError> {
    prop::sample::select(PduError::ALL.to_vec())
}

fn arb_pdu() -> impl Strategy<Value = Pdu> {
    (
        arb_pdu_type(),
        any::<i32>(),
        arb_pdu_error(),
        0..=i32::MAX,
        arb_varbinds(),
    )
        .prop_map(|(pdu_type, request_id, error, error_index, varbinds)| Pdu {
            pdu_type,
            request_id,
            error,
            error_index,
            varbinds,
        })
}

/// A valid encoding with one byte overwritten.
fn arb_corrupted_encoding() -> impl Strategy<Value = Vec<u8>> {
    (arb_pdu(), any::<prop::sample::Index>(), any::<u8>()).prop_map(|(pdu, index, byte)| {
        let mut data = pdu.encode().to_vec();
        let i = index.index(data.len());
        data[i] = byte;
        data
    })
}

// =============================================================================
// Round Trips
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn pdu_round_trip(pdu in arb_pdu()) {
        let decoded = Pdu::decode(pdu.encode()).unwrap();
        prop_assert_eq!(decoded, pdu);
    }

    #[test]
    fn pdu_encoding_is_canonical(pdu in arb_pdu()) {
        let encoded = pdu.encode();
        let reencoded = Pdu::decode(encoded.clone()).unwrap().encode();
        prop_assert_eq!(reencoded, encoded);
    }

    #[test]
    fn raw_codec_reproduces_input(pdu in arb_pdu()) {
        let encoded = pdu.encode();
        let codec = PduCodec::new(RawVarbindCodec);
        let raw = codec.decode(encoded.clone()).unwrap();
        prop_assert_eq!(raw.varbinds.len(), pdu.varbinds.len());
        prop_assert_eq!(codec.encode(&raw), encoded);
    }

    #[test]
    fn indefinite_outer_length_decodes_the_same(pdu in arb_pdu()) {
        let encoded = pdu.encode();
        // Swap the outer definite header for 0x80 and append end-of-contents.
        let header = match encoded[1] {
            n if n < 0x80 => 2,
            n => 2 + usize::from(n & 0x7F),
        };
        let mut indefinite = vec![encoded[0], 0x80];
        indefinite.extend_from_slice(&encoded[header..]);
        indefinite.extend_from_slice(&[0x00, 0x00]);

        prop_assert_eq!(Pdu::decode(Bytes::from(indefinite)).unwrap(), pdu);
    }
}

// =============================================================================
// Hostile Input
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(4000))]

    #[test]
    fn decode_never_panics(data in prop::collection::vec(any::<u8>(), 0..=512)) {
        let data = Bytes::from(data);
        let _ = PduCodec::new(RawVarbindCodec).decode(data.clone());
        if let Ok(pdu) = Pdu::decode(data) {
            prop_assert_eq!(Pdu::decode(pdu.encode()).unwrap(), pdu);
        }
    }

    #[test]
    fn decode_with_pdu_prefix_never_panics(
        tag in 0xA0u8..=0xA8,
        body in prop::collection::vec(any::<u8>(), 0..=256),
    ) {
        let mut data = vec![tag];
        data.extend(body);
        let _ = Pdu::decode(Bytes::from(data));
    }

    #[test]
    fn corrupted_encoding_never_panics(data in arb_corrupted_encoding()) {
        let data = Bytes::from(data);
        let _ = Pdu::decode(data.clone());
        let _ = PduCodec::new(RawVarbindCodec).decode(data);
    }
}

// =============================================================================
// Edge Cases (deterministic)
// =============================================================================

#[test]
fn integer_boundary_values() {
    for request_id in [0, 1, -1, 127, 128, -128, -129, i32::MAX, i32::MIN] {
        let pdu: Pdu = Pdu::new(PduType::GetRequest, request_id);
        assert_eq!(Pdu::decode(pdu.encode()).unwrap(), pdu);
    }
}

#[test]
fn large_varbind_list_uses_long_form_length() {
    let varbinds: Vec<VarBind> = (0..50)
        .map(|i| {
            VarBind::new(
                Oid::from_slice(&[1, 3, 6, 1, 2, 1, 2, 2, 1, 10, i]),
                Value::Counter32(i),
            )
        })
        .collect();
    let pdu = Pdu::response(1, varbinds);
    let encoded = pdu.encode();
    assert_eq!(encoded[1], 0x82);
    assert_eq!(Pdu::decode(encoded).unwrap(), pdu);
}
