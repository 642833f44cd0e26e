//! BER length encoding and decoding.
//!
//! Length octets follow X.690 Section 8.1.3:
//! - Short form: one octet, bit 8 clear, value 0-127
//! - Long form: initial octet (bit 8 set, bits 7-1 = count), then `count` length octets
//! - Indefinite form (0x80): contents run until a pair of end-of-contents octets
//!
//! The encoder only ever produces the minimal definite form.

use crate::error::{DecodeErrorKind, Error, Result};

/// Maximum length we'll accept.
///
/// Real PDUs are a few kilobytes at most; anything claiming more than 2MB is
/// treated as hostile before any buffer arithmetic happens.
pub const MAX_LENGTH: usize = 0x200000; // 2MB

/// Decoded length octets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    /// Contents span exactly this many octets.
    Definite(usize),
    /// Contents are terminated by end-of-contents octets (constructed only).
    Indefinite,
}

/// Encode a length value (returns bytes in reverse order for prepending)
///
/// Uses short form for lengths <= 127, minimal long form otherwise. Every
/// `usize` is representable, including lengths the decoder refuses
/// (above [`MAX_LENGTH`] or wider than four octets).
pub fn encode_length(len: usize) -> ([u8; 9], usize) {
    let mut buf = [0u8; 9];

    if len <= 127 {
        buf[0] = len as u8;
        return (buf, 1);
    }

    let mut n = 0;
    let mut rest = len;
    while rest > 0 {
        buf[n] = rest as u8;
        rest >>= 8;
        n += 1;
    }
    buf[n] = 0x80 | n as u8;
    (buf, n + 1)
}

/// Number of octets [`encode_length`] emits for `len`.
pub fn length_encoded_len(len: usize) -> usize {
    encode_length(len).1
}

/// Decode length octets, returning (length, bytes_consumed).
///
/// `base_offset` is only used to position errors within the enclosing buffer.
pub fn decode_length(data: &[u8], base_offset: usize) -> Result<(Length, usize)> {
    let Some(&first) = data.first() else {
        return Err(Error::malformed(base_offset, DecodeErrorKind::TruncatedData));
    };

    if first == 0x80 {
        return Ok((Length::Indefinite, 1));
    }

    if first & 0x80 == 0 {
        return Ok((Length::Definite(first as usize), 1));
    }

    // X.690 8.1.3.5(c): 0xFF is reserved
    if first == 0xFF {
        return Err(Error::malformed(base_offset, DecodeErrorKind::InvalidLength));
    }

    let num_octets = (first & 0x7F) as usize;
    if num_octets > 4 {
        return Err(Error::malformed(
            base_offset,
            DecodeErrorKind::LengthTooLong { octets: num_octets },
        ));
    }

    if data.len() < 1 + num_octets {
        return Err(Error::malformed(base_offset, DecodeErrorKind::TruncatedData));
    }

    let len = data[1..=num_octets]
        .iter()
        .fold(0usize, |acc, &b| (acc << 8) | b as usize);

    if len > MAX_LENGTH {
        return Err(Error::malformed(
            base_offset,
            DecodeErrorKind::LengthExceedsMax {
                length: len,
                max: MAX_LENGTH,
            },
        ));
    }

    Ok((Length::Definite(len), 1 + num_octets))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definite(data: &[u8]) -> (usize, usize) {
        match decode_length(data, 0).unwrap() {
            (Length::Definite(len), consumed) => (len, consumed),
            other => panic!("expected definite length, got {:?}", other),
        }
    }

    #[test]
    fn test_short_form() {
        assert_eq!(definite(&[0]), (0, 1));
        assert_eq!(definite(&[1]), (1, 1));
        assert_eq!(definite(&[127]), (127, 1));
    }

    #[test]
    fn test_long_form() {
        assert_eq!(definite(&[0x81, 128]), (128, 2));
        assert_eq!(definite(&[0x81, 255]), (255, 2));
        assert_eq!(definite(&[0x82, 0x01, 0x00]), (256, 3));
        assert_eq!(definite(&[0x82, 0xFF, 0xFF]), (65535, 3));
    }

    #[test]
    fn test_indefinite_form() {
        assert_eq!(decode_length(&[0x80], 0).unwrap(), (Length::Indefinite, 1));
    }

    #[test]
    fn test_reserved_initial_octet_rejected() {
        let err = decode_length(&[0xFF, 0, 0], 4).unwrap_err();
        assert_eq!(err, Error::malformed(4, DecodeErrorKind::InvalidLength));
    }

    #[test]
    fn test_truncated_long_form() {
        let err = decode_length(&[0x82, 0x01], 0).unwrap_err();
        assert_eq!(err, Error::malformed(0, DecodeErrorKind::TruncatedData));
        assert!(decode_length(&[], 0).is_err());
    }

    #[test]
    fn test_too_many_length_octets() {
        let err = decode_length(&[0x85, 0, 0, 0, 0, 1], 0).unwrap_err();
        assert_eq!(
            err,
            Error::malformed(0, DecodeErrorKind::LengthTooLong { octets: 5 })
        );
    }

    #[test]
    fn test_accept_non_minimal_length() {
        // X.690 8.1.3.5 Note 2 permits redundant leading zero octets
        assert_eq!(definite(&[0x82, 0x00, 0x05]), (5, 3));
        assert_eq!(definite(&[0x81, 0x01]), (1, 2));
        assert_eq!(definite(&[0x83, 0x00, 0x00, 0x80]), (128, 4));
    }

    #[test]
    fn test_max_length_enforced() {
        let max = MAX_LENGTH;
        let at_max = [0x83, (max >> 16) as u8, (max >> 8) as u8, max as u8];
        assert_eq!(definite(&at_max), (MAX_LENGTH, 4));

        let over = MAX_LENGTH + 1;
        let over_bytes = [
            0x84,
            (over >> 24) as u8,
            (over >> 16) as u8,
            (over >> 8) as u8,
            over as u8,
        ];
        match decode_length(&over_bytes, 0) {
            Err(Error::MalformedPdu { kind, .. }) => assert!(
                matches!(kind, DecodeErrorKind::LengthExceedsMax { .. }),
                "Expected LengthExceedsMax, got {:?}",
                kind
            ),
            other => panic!("Expected MalformedPdu, got {:?}", other),
        }
    }

    #[test]
    fn test_encode_short() {
        let (buf, len) = encode_length(0);
        assert_eq!(&buf[..len], &[0]);

        let (buf, len) = encode_length(127);
        assert_eq!(&buf[..len], &[127]);
    }

    #[test]
    fn test_encode_long_is_minimal() {
        let (buf, len) = encode_length(128);
        assert_eq!(&buf[..len], &[128, 0x81]);

        let (buf, len) = encode_length(256);
        assert_eq!(&buf[..len], &[0, 1, 0x82]);

        let (buf, len) = encode_length(0x01_0000);
        assert_eq!(&buf[..len], &[0, 0, 1, 0x83]);
    }

    #[test]
    fn test_length_encoded_len() {
        assert_eq!(length_encoded_len(0), 1);
        assert_eq!(length_encoded_len(127), 1);
        assert_eq!(length_encoded_len(128), 2);
        assert_eq!(length_encoded_len(255), 2);
        assert_eq!(length_encoded_len(256), 3);
        assert_eq!(length_encoded_len(MAX_LENGTH), 4);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_encode_length_beyond_four_octets() {
        let (buf, len) = encode_length(0x1_0000_0000);
        assert_eq!(&buf[..len], &[0, 0, 0, 0, 1, 0x85]);
        assert_eq!(length_encoded_len(usize::MAX), 9);
    }
}
