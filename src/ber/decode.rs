//! BER decoding.
//!
//! Zero-copy decoding over `Bytes`. Every sub-decoder remembers where its
//! window starts in the original buffer, so error offsets are always
//! absolute.

use bytes::Bytes;

use super::length::{Length, decode_length};
use super::{MAX_DEPTH, tag};
use crate::error::{DecodeErrorKind, Error, Result};
use crate::oid::Oid;

/// One complete TLV split out of a buffer without interpreting its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: u8,
    offset: usize,
    content_offset: usize,
    raw: Bytes,
    content: Bytes,
}

impl Element {
    /// The element's tag octet.
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// Absolute offset of the tag octet.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The whole TLV, header included.
    pub fn raw(&self) -> &Bytes {
        &self.raw
    }

    /// Content octets. For indefinite-length elements the trailing
    /// end-of-contents pair is excluded.
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Consume the element, keeping only its full encoding.
    pub fn into_raw(self) -> Bytes {
        self.raw
    }

    /// Decoder positioned over the content octets.
    pub fn contents(&self) -> Decoder {
        Decoder::at(self.content.clone(), self.content_offset)
    }
}

/// BER decoder that reads from a byte buffer.
#[derive(Debug, Clone)]
pub struct Decoder {
    data: Bytes,
    offset: usize,
    base: usize,
}

impl Decoder {
    /// Create a new decoder from bytes.
    pub fn new(data: Bytes) -> Self {
        Self::at(data, 0)
    }

    /// Create a decoder from a byte slice (copies the data).
    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    /// Decoder whose first byte sits at `base` in some enclosing buffer.
    pub(crate) fn at(data: Bytes, base: usize) -> Self {
        Self {
            data,
            offset: 0,
            base,
        }
    }

    /// Absolute offset of the next unread byte.
    pub fn offset(&self) -> usize {
        self.base + self.offset
    }

    /// Get remaining bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Check if we've reached the end.
    pub fn is_empty(&self) -> bool {
        self.offset >= self.data.len()
    }

    /// Peek at the next byte without consuming it.
    pub fn peek_byte(&self) -> Option<u8> {
        self.data.get(self.offset).copied()
    }

    /// Get remaining data as a slice.
    pub fn remaining_slice(&self) -> &[u8] {
        &self.data[self.offset..]
    }

    fn fail(&self, at: usize, kind: DecodeErrorKind) -> Error {
        tracing::debug!(target: "snmp_pdu::ber", { snmp.offset = at, kind = %kind }, "BER decode failed");
        Error::malformed(at, kind)
    }

    fn mismatch(&self, at: usize, expected: u8, actual: u8) -> Error {
        tracing::debug!(target: "snmp_pdu::ber", { snmp.offset = at, expected, actual }, "unexpected tag");
        Error::TypeMismatch {
            offset: at,
            expected,
            actual,
        }
    }

    /// Read a single byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        let Some(byte) = self.peek_byte() else {
            return Err(self.fail(self.offset(), DecodeErrorKind::TruncatedData));
        };
        self.offset += 1;
        Ok(byte)
    }

    /// Read a tag byte.
    ///
    /// Multi-octet tags never occur in SNMP and are rejected.
    pub fn read_tag(&mut self) -> Result<u8> {
        let at = self.offset();
        let tag = self.read_byte()?;
        if tag::tag_number(tag) == tag::HIGH_TAG_NUMBER {
            return Err(self.fail(at, DecodeErrorKind::UnsupportedTag(tag)));
        }
        Ok(tag)
    }

    /// Read length octets.
    pub fn read_length(&mut self) -> Result<Length> {
        let (len, consumed) = decode_length(self.remaining_slice(), self.offset())?;
        self.offset += consumed;
        Ok(len)
    }

    /// Read length octets that must be in definite form.
    pub fn read_definite_length(&mut self) -> Result<usize> {
        let at = self.offset();
        match self.read_length()? {
            Length::Definite(len) => Ok(len),
            Length::Indefinite => Err(self.fail(at, DecodeErrorKind::IndefinitePrimitive)),
        }
    }

    /// Read raw bytes without copying.
    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes> {
        if len > self.remaining() {
            return Err(self.fail(
                self.offset(),
                DecodeErrorKind::InsufficientData {
                    needed: len,
                    available: self.remaining(),
                },
            ));
        }
        let bytes = self.data.slice(self.offset..self.offset + len);
        self.offset += len;
        Ok(bytes)
    }

    /// Read and expect a specific primitive tag, returning the content length.
    pub fn expect_tag(&mut self, expected: u8) -> Result<usize> {
        let at = self.offset();
        let tag = self.read_tag()?;
        if tag != expected {
            return Err(self.mismatch(at, expected, tag));
        }
        self.read_definite_length()
    }

    /// Split off the next complete TLV.
    ///
    /// Definite and indefinite lengths are both accepted; nested
    /// indefinite elements are scanned up to [`MAX_DEPTH`] levels deep.
    pub fn read_element(&mut self) -> Result<Element> {
        let start = self.offset;
        let tag = self.read_tag()?;
        let (content_start, content) = self.read_content(tag, 0)?;
        Ok(Element {
            tag,
            offset: self.base + start,
            content_offset: self.base + content_start,
            raw: self.data.slice(start..self.offset),
            content,
        })
    }

    /// Read length and content for an already-consumed tag.
    fn read_content(&mut self, tag: u8, depth: usize) -> Result<(usize, Bytes)> {
        let length_at = self.offset();
        match self.read_length()? {
            Length::Definite(len) => {
                let start = self.offset;
                if len > self.remaining() {
                    return Err(self.fail(length_at, DecodeErrorKind::TlvOverflow));
                }
                Ok((start, self.read_bytes(len)?))
            }
            Length::Indefinite => {
                if !tag::is_constructed(tag) {
                    return Err(self.fail(length_at, DecodeErrorKind::IndefinitePrimitive));
                }
                let start = self.offset;
                let end = self.scan_to_end_of_contents(depth)?;
                let content = self.data.slice(start..end);
                self.offset = end + 2;
                Ok((start, content))
            }
        }
    }

    /// Skip child elements until an end-of-contents pair, returning its
    /// position. Leaves `self.offset` at the pair.
    fn scan_to_end_of_contents(&mut self, depth: usize) -> Result<usize> {
        if depth >= MAX_DEPTH {
            return Err(self.fail(
                self.offset(),
                DecodeErrorKind::NestingTooDeep { max: MAX_DEPTH },
            ));
        }
        loop {
            match self.remaining_slice() {
                [tag::END_OF_CONTENTS, 0x00, ..] => return Ok(self.offset),
                rest if rest.len() < 2 => {
                    return Err(self.fail(self.offset(), DecodeErrorKind::MissingEndOfContents));
                }
                _ => {
                    let tag = self.read_tag()?;
                    self.read_content(tag, depth + 1)?;
                }
            }
        }
    }

    /// Read a BER integer (signed, at most 32 bits).
    pub fn read_integer(&mut self) -> Result<i32> {
        let len = self.expect_tag(tag::universal::INTEGER)?;
        self.read_integer_value(len)
    }

    /// Read integer value given the length.
    ///
    /// Content longer than four octets is accepted only when the extra
    /// leading octets are sign extension.
    pub fn read_integer_value(&mut self, len: usize) -> Result<i32> {
        let at = self.offset();
        if len == 0 {
            return Err(self.fail(at, DecodeErrorKind::ZeroLengthInteger));
        }
        let bytes = self.read_bytes(len)?;
        decode_i32(&bytes).ok_or_else(|| self.fail(at, DecodeErrorKind::IntegerOverflow))
    }

    /// Read a 64-bit unsigned integer (Counter64).
    pub fn read_integer64(&mut self, expected_tag: u8) -> Result<u64> {
        let len = self.expect_tag(expected_tag)?;
        self.read_integer64_value(len)
    }

    /// Read 64-bit unsigned integer value given the length.
    pub fn read_integer64_value(&mut self, len: usize) -> Result<u64> {
        let at = self.offset();
        if len == 0 {
            return Err(self.fail(at, DecodeErrorKind::ZeroLengthInteger));
        }
        let bytes = self.read_bytes(len)?;
        let significant = strip_leading_zeros(&bytes);
        if significant.len() > 8 {
            return Err(self.fail(at, DecodeErrorKind::Integer64TooLong { length: len }));
        }
        Ok(significant
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | b as u64))
    }

    /// Read an unsigned 32-bit integer with specific tag.
    pub fn read_unsigned32(&mut self, expected_tag: u8) -> Result<u32> {
        let len = self.expect_tag(expected_tag)?;
        self.read_unsigned32_value(len)
    }

    /// Read unsigned 32-bit integer value given length.
    pub fn read_unsigned32_value(&mut self, len: usize) -> Result<u32> {
        let at = self.offset();
        if len == 0 {
            return Err(self.fail(at, DecodeErrorKind::ZeroLengthInteger));
        }
        let bytes = self.read_bytes(len)?;
        let significant = strip_leading_zeros(&bytes);
        if significant.len() > 4 {
            return Err(self.fail(at, DecodeErrorKind::IntegerOverflow));
        }
        Ok(significant
            .iter()
            .fold(0u32, |acc, &b| (acc << 8) | b as u32))
    }

    /// Read an OCTET STRING.
    pub fn read_octet_string(&mut self) -> Result<Bytes> {
        let len = self.expect_tag(tag::universal::OCTET_STRING)?;
        self.read_bytes(len)
    }

    /// Read a NULL.
    pub fn read_null(&mut self) -> Result<()> {
        let len = self.expect_tag(tag::universal::NULL)?;
        if len != 0 {
            return Err(self.fail(self.offset(), DecodeErrorKind::InvalidNull));
        }
        Ok(())
    }

    /// Read an OBJECT IDENTIFIER.
    pub fn read_oid(&mut self) -> Result<Oid> {
        let len = self.expect_tag(tag::universal::OBJECT_IDENTIFIER)?;
        self.read_oid_value(len)
    }

    /// Read an OID given a pre-read length.
    pub fn read_oid_value(&mut self, len: usize) -> Result<Oid> {
        let at = self.offset();
        let bytes = self.read_bytes(len)?;
        Oid::from_ber(&bytes).map_err(|err| match err {
            Error::MalformedPdu { offset, kind } => self.fail(at + offset, kind),
            other => other,
        })
    }

    /// Read an IP address.
    pub fn read_ip_address(&mut self) -> Result<[u8; 4]> {
        let len = self.expect_tag(tag::application::IP_ADDRESS)?;
        self.read_ip_address_value(len)
    }

    /// Read IP address octets given the length.
    pub fn read_ip_address_value(&mut self, len: usize) -> Result<[u8; 4]> {
        if len != 4 {
            return Err(self.fail(
                self.offset(),
                DecodeErrorKind::InvalidIpAddressLength { length: len },
            ));
        }
        let bytes = self.read_bytes(4)?;
        Ok([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Read a SEQUENCE, returning a decoder for its contents.
    pub fn read_sequence(&mut self) -> Result<Decoder> {
        self.read_constructed(tag::universal::SEQUENCE)
    }

    /// Read a constructed type with a specific tag, returning a decoder for its contents.
    pub fn read_constructed(&mut self, expected_tag: u8) -> Result<Decoder> {
        let at = self.offset();
        match self.peek_byte() {
            Some(actual) if actual != expected_tag => {
                return Err(self.mismatch(at, expected_tag, actual));
            }
            _ => {}
        }
        Ok(self.read_element()?.contents())
    }

    /// Skip a TLV (tag-length-value) without parsing.
    pub fn skip_tlv(&mut self) -> Result<()> {
        self.read_element().map(|_| ())
    }

    /// Fail unless every byte has been consumed.
    pub fn finish(&self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.fail(
                self.offset(),
                DecodeErrorKind::TrailingData {
                    remaining: self.remaining(),
                },
            ))
        }
    }
}

/// Decode two's-complement content into an `i32`.
///
/// Returns `None` when the value needs more than 32 bits.
fn decode_i32(mut bytes: &[u8]) -> Option<i32> {
    while bytes.len() > 4 {
        let redundant = (bytes[0] == 0x00 && bytes[1] & 0x80 == 0)
            || (bytes[0] == 0xFF && bytes[1] & 0x80 != 0);
        if !redundant {
            return None;
        }
        bytes = &bytes[1..];
    }
    let seed: i32 = if bytes[0] & 0x80 != 0 { -1 } else { 0 };
    Some(bytes.iter().fold(seed, |acc, &b| (acc << 8) | b as i32))
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[first..]
}
