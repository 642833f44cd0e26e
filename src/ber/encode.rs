//! BER encoding.
//!
//! [`EncodeBuf`] fills its buffer back to front: contents are pushed first,
//! then the length, then the tag. A constructed element therefore knows its
//! content length without a second pass. Children of a constructed element
//! must be pushed in reverse order.

use bytes::Bytes;

use super::length::encode_length;
use super::tag;
use crate::oid::Oid;

/// Reverse-filling BER encode buffer.
#[derive(Debug, Clone)]
pub struct EncodeBuf {
    buf: Vec<u8>,
}

impl EncodeBuf {
    /// Create a new buffer.
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    /// Create a buffer with a specific capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Push a single tag octet.
    pub fn push_tag(&mut self, tag: u8) {
        self.buf.push(tag);
    }

    /// Push length octets in minimal definite form.
    pub fn push_length(&mut self, len: usize) {
        let (bytes, n) = encode_length(len);
        self.buf.extend_from_slice(&bytes[..n]);
    }

    /// Push raw content octets.
    pub fn push_bytes(&mut self, data: &[u8]) {
        self.buf.extend(data.iter().rev());
    }

    /// Push a constructed element whose children are written by `f`.
    ///
    /// `f` must push the children last to first.
    pub fn push_constructed(&mut self, tag: u8, f: impl FnOnce(&mut Self)) {
        let mark = self.buf.len();
        f(self);
        let content_len = self.buf.len() - mark;
        self.push_length(content_len);
        self.push_tag(tag);
    }

    /// Push a SEQUENCE.
    pub fn push_sequence(&mut self, f: impl FnOnce(&mut Self)) {
        self.push_constructed(tag::universal::SEQUENCE, f);
    }

    /// Push a primitive element.
    pub fn push_primitive(&mut self, tag: u8, content: &[u8]) {
        self.push_bytes(content);
        self.push_length(content.len());
        self.push_tag(tag);
    }

    /// Push an INTEGER using the fewest content octets.
    pub fn push_integer(&mut self, value: i32) {
        let bytes = value.to_be_bytes();
        let n = integer_content_len(value);
        self.push_primitive(tag::universal::INTEGER, &bytes[4 - n..]);
    }

    /// Push an unsigned 32-bit value (Counter32, Gauge32, TimeTicks).
    pub fn push_unsigned32(&mut self, tag: u8, value: u32) {
        let bytes = u64::from(value).to_be_bytes();
        let n = unsigned32_content_len(value);
        self.push_primitive(tag, &bytes[8 - n..]);
    }

    /// Push a Counter64.
    pub fn push_integer64(&mut self, value: u64) {
        let mut bytes = [0u8; 9];
        bytes[1..].copy_from_slice(&value.to_be_bytes());
        let n = unsigned64_content_len(value);
        self.push_primitive(tag::application::COUNTER64, &bytes[9 - n..]);
    }

    /// Push an OCTET STRING.
    pub fn push_octet_string(&mut self, data: &[u8]) {
        self.push_primitive(tag::universal::OCTET_STRING, data);
    }

    /// Push a NULL.
    pub fn push_null(&mut self) {
        self.push_length(0);
        self.push_tag(tag::universal::NULL);
    }

    /// Push an OBJECT IDENTIFIER.
    pub fn push_oid(&mut self, oid: &Oid) {
        self.push_primitive(tag::universal::OBJECT_IDENTIFIER, &oid.to_ber_smallvec());
    }

    /// Push an IpAddress.
    pub fn push_ip_address(&mut self, addr: [u8; 4]) {
        self.push_primitive(tag::application::IP_ADDRESS, &addr);
    }

    /// Push a complete, already-encoded TLV.
    pub fn push_encoded(&mut self, tlv: &[u8]) {
        self.push_bytes(tlv);
    }

    /// Finish encoding and return the bytes in wire order.
    pub fn finish(mut self) -> Bytes {
        self.buf.reverse();
        Bytes::from(self.buf)
    }
}

impl Default for EncodeBuf {
    fn default() -> Self {
        Self::new()
    }
}

/// Content octets of a minimally encoded INTEGER.
pub fn integer_content_len(value: i32) -> usize {
    let bytes = value.to_be_bytes();
    let mut n = 4;
    while n > 1 {
        let i = 4 - n;
        let redundant = (bytes[i] == 0x00 && bytes[i + 1] & 0x80 == 0)
            || (bytes[i] == 0xFF && bytes[i + 1] & 0x80 != 0);
        if !redundant {
            break;
        }
        n -= 1;
    }
    n
}

/// Content octets of an unsigned 32-bit value, including a leading zero
/// when the top bit would otherwise read as a sign.
pub fn unsigned32_content_len(value: u32) -> usize {
    (32 - value.leading_zeros() as usize) / 8 + 1
}

/// Content octets of a Counter64 value.
pub fn unsigned64_content_len(value: u64) -> usize {
    (64 - value.leading_zeros() as usize) / 8 + 1
}
