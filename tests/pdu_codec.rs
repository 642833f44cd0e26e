//! Wire-level PDU decoding and encoding against hand-built buffers.

use bytes::Bytes;
use snmp_pdu::ber::MAX_LENGTH;
use snmp_pdu::error::DecodeErrorKind;
use snmp_pdu::{
    Error, Pdu, PduCodec, PduError, PduType, RawVarbindCodec, Value, VarBind, oid,
};

fn wire(hex_str: &str) -> Bytes {
    Bytes::from(hex::decode(hex_str.replace(' ', "")).unwrap())
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn empty_get_request_round_trips() {
    let pdu: Pdu = Pdu::new(PduType::GetRequest, 42);
    let encoded = pdu.encode();
    assert_eq!(hex::encode(&encoded), "a00b02012a0201000201003000");

    let decoded = Pdu::decode(encoded).unwrap();
    assert_eq!(decoded.pdu_type, PduType::GetRequest);
    assert_eq!(decoded.pdu_type.code(), 160);
    assert_eq!(decoded.request_id, 42);
    assert_eq!(decoded.error, PduError::NoError);
    assert_eq!(decoded.error_index, 0);
    assert!(decoded.varbinds.is_empty());
    assert_eq!(decoded, pdu);
}

#[test]
fn hand_built_error_response() {
    // GetResponse, id 7, noSuchName, index 1, { sysDescr.0 = NULL }
    let data = wire("a2 19 020107 020102 020101 300e 300c 06082b06010201010100 0500");

    let pdu = Pdu::decode(data.clone()).unwrap();
    assert_eq!(pdu.pdu_type, PduType::GetResponse);
    assert_eq!(pdu.request_id, 7);
    assert_eq!(pdu.error.name(), "NoSuchName");
    assert_eq!(pdu.error_index, 1);
    assert_eq!(pdu.varbinds.len(), 1);
    assert_eq!(
        pdu.varbinds[0],
        VarBind::null(oid!(1, 3, 6, 1, 2, 1, 1, 1, 0))
    );
    assert_eq!(
        pdu.offending_varbind().map(|vb| &vb.oid),
        Some(&oid!(1, 3, 6, 1, 2, 1, 1, 1, 0))
    );

    assert_eq!(pdu.encode(), data);
}

#[test]
fn widest_object_identifier_value_round_trips() {
    let value = Value::ObjectIdentifier(oid!(2, u32::MAX, 1));
    let pdu = Pdu::response(7, vec![VarBind::new(oid!(1, 3, 6, 1, 2, 1, 1, 2, 0), value)]);
    assert_eq!(Pdu::decode(pdu.encode()).unwrap(), pdu);
}

#[test]
fn every_pdu_type_round_trips() {
    for pdu_type in PduType::ALL {
        let mut pdu: Pdu = Pdu::new(pdu_type, -1);
        pdu.varbinds.push(VarBind::new(
            oid!(1, 3, 6, 1, 6, 3, 1, 1, 4, 1, 0),
            Value::ObjectIdentifier(oid!(1, 3, 6, 1, 4, 1, 9999)),
        ));
        let encoded = pdu.encode();
        assert_eq!(encoded[0], pdu_type.code());
        assert_eq!(Pdu::decode(encoded).unwrap(), pdu, "{pdu_type}");
    }
}

#[test]
fn every_error_status_round_trips() {
    for error in PduError::ALL {
        let pdu = Pdu::<VarBind>::new(PduType::GetResponse, 3).to_error_response(error, 0);
        assert_eq!(Pdu::decode(pdu.encode()).unwrap().error, error);
    }
}

// =============================================================================
// Rejections
// =============================================================================

#[test]
fn tags_outside_the_pdu_range_are_rejected() {
    assert_eq!(
        Pdu::decode(wire("9f0b020101020100020100 3000")).unwrap_err(),
        Error::UnknownPduType { code: 159 }
    );
    assert_eq!(
        Pdu::decode(wire("a90b020101020100020100 3000")).unwrap_err(),
        Error::UnknownPduType { code: 169 }
    );
    assert_eq!(
        Pdu::decode(wire("300b020101020100020100 3000")).unwrap_err(),
        Error::UnknownPduType { code: 0x30 }
    );
}

#[test]
fn unknown_tag_is_reported_before_length() {
    // Length octet 0xFF would be invalid, but the tag is checked first.
    assert_eq!(
        Pdu::decode(wire("a9ff")).unwrap_err(),
        Error::UnknownPduType { code: 169 }
    );
}

#[test]
fn error_status_19_is_rejected() {
    assert_eq!(
        Pdu::decode(wire("a20b020101020113020100 3000")).unwrap_err(),
        Error::UnknownPduError { code: 19 }
    );
    assert_eq!(
        Pdu::decode(wire("a20b0201010201ff020100 3000")).unwrap_err(),
        Error::UnknownPduError { code: -1 }
    );
}

#[test]
fn three_elements_are_malformed() {
    assert_eq!(
        Pdu::decode(wire("a009 020101 020100 020100")).unwrap_err(),
        Error::MalformedPdu {
            offset: 0,
            kind: DecodeErrorKind::MissingPduFields { found: 3 }
        }
    );
}

#[test]
fn empty_body_is_malformed() {
    assert_eq!(
        Pdu::decode(wire("a000")).unwrap_err(),
        Error::MalformedPdu {
            offset: 0,
            kind: DecodeErrorKind::MissingPduFields { found: 0 }
        }
    );
}

#[test]
fn varbind_list_must_be_a_sequence() {
    assert_eq!(
        Pdu::decode(wire("a00b 020101 020100 020100 0400")).unwrap_err(),
        Error::TypeMismatch {
            offset: 11,
            expected: 0x30,
            actual: 0x04
        }
    );
}

#[test]
fn request_id_must_be_an_integer() {
    assert_eq!(
        Pdu::decode(wire("a00b 040101 020100 020100 3000")).unwrap_err(),
        Error::TypeMismatch {
            offset: 2,
            expected: 0x02,
            actual: 0x04
        }
    );
}

#[test]
fn negative_error_index_is_rejected() {
    assert_eq!(
        Pdu::decode(wire("a20b 020101 020105 0201ff 3000")).unwrap_err(),
        Error::MalformedPdu {
            offset: 8,
            kind: DecodeErrorKind::NegativeErrorIndex(-1)
        }
    );
}

#[test]
fn integer_wider_than_32_bits_is_rejected() {
    // request-id 0x0100000000
    assert_eq!(
        Pdu::decode(wire("a00f 02050100000000 020100 020100 3000")).unwrap_err(),
        Error::MalformedPdu {
            offset: 4,
            kind: DecodeErrorKind::IntegerOverflow
        }
    );
}

#[test]
fn trailing_bytes_are_rejected() {
    assert_eq!(
        Pdu::decode(wire("a00b02012a020100020100 3000 00")).unwrap_err(),
        Error::MalformedPdu {
            offset: 13,
            kind: DecodeErrorKind::TrailingData { remaining: 1 }
        }
    );
}

#[test]
fn empty_and_truncated_input() {
    assert_eq!(
        Pdu::decode(Bytes::new()).unwrap_err(),
        Error::MalformedPdu {
            offset: 0,
            kind: DecodeErrorKind::TruncatedData
        }
    );
    let err = Pdu::decode(wire("a00b020101")).unwrap_err();
    assert!(matches!(err, Error::MalformedPdu { .. }), "{err:?}");
}

#[test]
fn malformed_binding_reports_absolute_offset() {
    // Binding value is a NULL with one content octet.
    let err = Pdu::decode(wire("a013 020101 020100 020100 3008 3006 06012b 050100")).unwrap_err();
    assert_eq!(
        err,
        Error::VarbindDecode {
            offset: 20,
            kind: DecodeErrorKind::InvalidNull
        }
    );
    assert_eq!(err.offset(), Some(20));
}

#[test]
fn oversized_encoding_is_rejected_on_decode() {
    let huge = Value::OctetString(Bytes::from(vec![0x41; 3 * 1024 * 1024]));
    let pdu = Pdu::response(1, vec![VarBind::new(oid!(1, 3), huge)]);
    let encoded = pdu.encode();
    assert_eq!(&encoded[..2], &[0xA2, 0x83]);

    assert_eq!(
        Pdu::decode(encoded.clone()).unwrap_err(),
        Error::MalformedPdu {
            offset: 1,
            kind: DecodeErrorKind::LengthExceedsMax {
                length: encoded.len() - 5,
                max: MAX_LENGTH
            }
        }
    );
}

// =============================================================================
// Tolerated Input
// =============================================================================

#[test]
fn indefinite_outer_length_matches_definite_form() {
    let definite = Pdu::decode(wire("a00b02012a020100020100 3000")).unwrap();
    let indefinite = Pdu::decode(wire("a08002012a020100020100 3000 0000")).unwrap();
    assert_eq!(indefinite, definite);
    assert_eq!(indefinite.encode(), wire("a00b02012a020100020100 3000"));
}

#[test]
fn indefinite_varbind_list_is_accepted() {
    let data = wire("a080 020101 020100 020100 3080 3005 06012b 0500 0000 0000");
    let pdu = Pdu::decode(data).unwrap();
    assert_eq!(pdu.varbinds, vec![VarBind::null(oid!(1, 3))]);
}

#[test]
fn non_minimal_encodings_decode_to_canonical_value() {
    // Long-form lengths and a zero-padded request-id.
    let data = wire("a08110 0203000001 02810100 020100 30820000");
    let pdu = Pdu::decode(data).unwrap();
    assert_eq!(pdu, Pdu::new(PduType::GetRequest, 1));
    assert_eq!(pdu.encode(), wire("a00b020101020100020100 3000"));
}

#[test]
fn extra_pdu_elements_are_ignored() {
    let pdu = Pdu::decode(wire("a00d 020105 020100 020100 3000 0500")).unwrap();
    assert_eq!(pdu, Pdu::new(PduType::GetRequest, 5));
}

#[test]
fn get_bulk_fields_travel_in_error_slots() {
    // non-repeaters 0, max-repetitions 10
    let pdu = Pdu::decode(wire("a50b 020101 020100 02010a 3000")).unwrap();
    assert_eq!(pdu.pdu_type, PduType::GetBulkRequest);
    assert_eq!(pdu.error, PduError::NoError);
    assert_eq!(pdu.error_index, 10);
}

// =============================================================================
// Raw Binding Codec
// =============================================================================

#[test]
fn raw_codec_accepts_any_binding_shape() {
    // The standard codec rejects a bare INTEGER binding; the raw codec keeps it.
    let data = wire("a00e 020101 020100 020100 3003 020107");
    assert!(matches!(
        Pdu::decode(data.clone()),
        Err(Error::VarbindDecode { offset: 13, .. })
    ));

    let codec = PduCodec::new(RawVarbindCodec);
    let pdu = codec.decode(data.clone()).unwrap();
    assert_eq!(pdu.varbinds, vec![wire("020107")]);
    assert_eq!(codec.encode(&pdu), data);
}
