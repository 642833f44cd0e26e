//! SNMP value types.
//!
//! [`Value`] covers the SMIv2 application types and the three varbind
//! exception markers.

use crate::ber::{Decoder, EncodeBuf, integer_content_len, length_encoded_len, tag};
use crate::ber::{unsigned32_content_len, unsigned64_content_len};
use crate::error::{DecodeErrorKind, Error, Result};
use crate::oid::Oid;
use bytes::Bytes;

/// SNMP value.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Value {
    /// INTEGER (signed 32-bit)
    Integer(i32),

    /// OCTET STRING.
    ///
    /// SMIv2 caps these at 65535 octets; the cap is not enforced on decode.
    OctetString(Bytes),

    /// NULL
    Null,

    /// OBJECT IDENTIFIER
    ObjectIdentifier(Oid),

    /// IpAddress (4 bytes, network order)
    IpAddress([u8; 4]),

    /// Counter32 (wrapping)
    Counter32(u32),

    /// Gauge32 / Unsigned32
    Gauge32(u32),

    /// TimeTicks (hundredths of a second)
    TimeTicks(u32),

    /// Opaque (legacy wrapper around arbitrary BER)
    Opaque(Bytes),

    /// Counter64 (SNMPv2c/v3 only)
    Counter64(u64),

    /// noSuchObject exception: the agent knows the object but has no value for it.
    NoSuchObject,

    /// noSuchInstance exception: the object exists but not this instance.
    NoSuchInstance,

    /// endOfMibView exception: a GETNEXT/GETBULK walk ran off the end of the view.
    ///
    /// ```
    /// use snmp_pdu::Value;
    ///
    /// assert!(Value::EndOfMibView.is_exception());
    /// assert!(!Value::Null.is_exception());
    /// ```
    EndOfMibView,

    /// Any other tag, kept verbatim so it can be re-encoded.
    ///
    /// Encoding writes whatever tag is given, but only tags accepted by
    /// [`Value::is_unknown_tag`] decode back to `Unknown`. A known tag such
    /// as 0x02 decodes as its own variant; 0x24 and multi-octet tag forms
    /// are rejected.
    Unknown { tag: u8, data: Bytes },
}

impl Value {
    /// Get as `i32` if this is an Integer.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Get as `u32` for the unsigned 32-bit types or a non-negative Integer.
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => Some(*v),
            Value::Integer(v) => u32::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Get as `u64`, widening the 32-bit unsigned types.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Counter64(v) => Some(*v),
            other => other.as_u32().map(u64::from),
        }
    }

    /// Raw bytes of an OctetString or Opaque.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::OctetString(v) | Value::Opaque(v) => Some(v),
            _ => None,
        }
    }

    /// OctetString or Opaque content as UTF-8 text.
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }

    pub fn as_oid(&self) -> Option<&Oid> {
        match self {
            Value::ObjectIdentifier(oid) => Some(oid),
            _ => None,
        }
    }

    pub fn as_ip(&self) -> Option<std::net::Ipv4Addr> {
        match self {
            Value::IpAddress(bytes) => Some(std::net::Ipv4Addr::from(*bytes)),
            _ => None,
        }
    }

    /// True if [`decode`](Self::decode) maps `tag` to [`Value::Unknown`].
    ///
    /// ```
    /// use snmp_pdu::Value;
    ///
    /// assert!(Value::is_unknown_tag(0x47));
    /// assert!(Value::is_unknown_tag(0x30));
    /// assert!(!Value::is_unknown_tag(0x02));
    /// assert!(!Value::is_unknown_tag(0x24));
    /// ```
    pub const fn is_unknown_tag(tag: u8) -> bool {
        if tag::tag_number(tag) == tag::HIGH_TAG_NUMBER
            || tag == tag::universal::OCTET_STRING_CONSTRUCTED
        {
            return false;
        }
        if tag::is_constructed(tag) {
            return true;
        }
        !matches!(
            tag,
            tag::universal::INTEGER
                | tag::universal::OCTET_STRING
                | tag::universal::NULL
                | tag::universal::OBJECT_IDENTIFIER
                | tag::application::IP_ADDRESS
                | tag::application::COUNTER32
                | tag::application::GAUGE32
                | tag::application::TIMETICKS
                | tag::application::OPAQUE
                | tag::application::COUNTER64
                | tag::context::NO_SUCH_OBJECT
                | tag::context::NO_SUCH_INSTANCE
                | tag::context::END_OF_MIB_VIEW
        )
    }

    /// Check if this is an exception value.
    pub fn is_exception(&self) -> bool {
        matches!(
            self,
            Value::NoSuchObject | Value::NoSuchInstance | Value::EndOfMibView
        )
    }

    /// Returns the total BER-encoded length (tag + length + content).
    pub(crate) fn ber_encoded_len(&self) -> usize {
        let tlv = |content_len: usize| 1 + length_encoded_len(content_len) + content_len;
        match self {
            Value::Integer(v) => tlv(integer_content_len(*v)),
            Value::OctetString(data) | Value::Opaque(data) => tlv(data.len()),
            Value::Unknown { data, .. } => tlv(data.len()),
            Value::ObjectIdentifier(oid) => oid.ber_encoded_len(),
            Value::IpAddress(_) => tlv(4),
            Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => {
                tlv(unsigned32_content_len(*v))
            }
            Value::Counter64(v) => tlv(unsigned64_content_len(*v)),
            Value::Null | Value::NoSuchObject | Value::NoSuchInstance | Value::EndOfMibView => 2,
        }
    }

    /// Encode to BER.
    pub fn encode(&self, buf: &mut EncodeBuf) {
        match self {
            Value::Integer(v) => buf.push_integer(*v),
            Value::OctetString(data) => buf.push_octet_string(data),
            Value::Null => buf.push_null(),
            Value::ObjectIdentifier(oid) => buf.push_oid(oid),
            Value::IpAddress(addr) => buf.push_ip_address(*addr),
            Value::Counter32(v) => buf.push_unsigned32(tag::application::COUNTER32, *v),
            Value::Gauge32(v) => buf.push_unsigned32(tag::application::GAUGE32, *v),
            Value::TimeTicks(v) => buf.push_unsigned32(tag::application::TIMETICKS, *v),
            Value::Opaque(data) => buf.push_primitive(tag::application::OPAQUE, data),
            Value::Counter64(v) => buf.push_integer64(*v),
            Value::NoSuchObject => buf.push_primitive(tag::context::NO_SUCH_OBJECT, &[]),
            Value::NoSuchInstance => buf.push_primitive(tag::context::NO_SUCH_INSTANCE, &[]),
            Value::EndOfMibView => buf.push_primitive(tag::context::END_OF_MIB_VIEW, &[]),
            Value::Unknown { tag: t, data } => buf.push_primitive(*t, data),
        }
    }

    /// Decode from BER.
    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        let at = decoder.offset();
        match decoder.peek_byte() {
            // Net-snmp does not parse the constructed form either.
            Some(tag::universal::OCTET_STRING_CONSTRUCTED) => {
                return Err(Error::malformed(at, DecodeErrorKind::ConstructedOctetString));
            }
            Some(t) if tag::is_constructed(t) => {
                let element = decoder.read_element()?;
                return Ok(Value::Unknown {
                    tag: element.tag(),
                    data: element.content().clone(),
                });
            }
            _ => {}
        }

        let tag = decoder.read_tag()?;
        let len = decoder.read_definite_length()?;

        let value = match tag {
            tag::universal::INTEGER => Value::Integer(decoder.read_integer_value(len)?),
            tag::universal::OCTET_STRING => Value::OctetString(decoder.read_bytes(len)?),
            tag::universal::NULL => {
                if len != 0 {
                    return Err(Error::malformed(decoder.offset(), DecodeErrorKind::InvalidNull));
                }
                Value::Null
            }
            tag::universal::OBJECT_IDENTIFIER => {
                Value::ObjectIdentifier(decoder.read_oid_value(len)?)
            }
            tag::application::IP_ADDRESS => {
                Value::IpAddress(decoder.read_ip_address_value(len)?)
            }
            tag::application::COUNTER32 => Value::Counter32(decoder.read_unsigned32_value(len)?),
            tag::application::GAUGE32 => Value::Gauge32(decoder.read_unsigned32_value(len)?),
            tag::application::TIMETICKS => Value::TimeTicks(decoder.read_unsigned32_value(len)?),
            tag::application::OPAQUE => Value::Opaque(decoder.read_bytes(len)?),
            tag::application::COUNTER64 => Value::Counter64(decoder.read_integer64_value(len)?),
            // Exceptions should be empty; stray content is skipped.
            tag::context::NO_SUCH_OBJECT => {
                decoder.read_bytes(len)?;
                Value::NoSuchObject
            }
            tag::context::NO_SUCH_INSTANCE => {
                decoder.read_bytes(len)?;
                Value::NoSuchInstance
            }
            tag::context::END_OF_MIB_VIEW => {
                decoder.read_bytes(len)?;
                Value::EndOfMibView
            }
            _ => Value::Unknown {
                tag,
                data: decoder.read_bytes(len)?,
            },
        };
        Ok(value)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(v) => write!(f, "{}", v),
            Value::OctetString(data) => match std::str::from_utf8(data) {
                Ok(s) => write!(f, "{}", s),
                Err(_) => write!(f, "0x{}", hex::encode(data)),
            },
            Value::Null => write!(f, "NULL"),
            Value::ObjectIdentifier(oid) => write!(f, "{}", oid),
            Value::IpAddress(addr) => write!(f, "{}", std::net::Ipv4Addr::from(*addr)),
            Value::Counter32(v) | Value::Gauge32(v) => write!(f, "{}", v),
            Value::TimeTicks(v) => {
                let secs = v / 100;
                write!(
                    f,
                    "{}d {}h {}m {}s",
                    secs / 86400,
                    (secs % 86400) / 3600,
                    (secs % 3600) / 60,
                    secs % 60
                )
            }
            Value::Opaque(data) => write!(f, "Opaque(0x{})", hex::encode(data)),
            Value::Counter64(v) => write!(f, "{}", v),
            Value::NoSuchObject => write!(f, "noSuchObject"),
            Value::NoSuchInstance => write!(f, "noSuchInstance"),
            Value::EndOfMibView => write!(f, "endOfMibView"),
            Value::Unknown { tag, data } => {
                write!(f, "Unknown(tag=0x{:02X}, data=0x{})", tag, hex::encode(data))
            }
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::OctetString(Bytes::copy_from_slice(s.as_bytes()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::OctetString(Bytes::from(s))
    }
}

impl From<&[u8]> for Value {
    fn from(data: &[u8]) -> Self {
        Value::OctetString(Bytes::copy_from_slice(data))
    }
}

impl From<Bytes> for Value {
    fn from(data: Bytes) -> Self {
        Value::OctetString(data)
    }
}

impl From<Oid> for Value {
    fn from(oid: Oid) -> Self {
        Value::ObjectIdentifier(oid)
    }
}

impl From<std::net::Ipv4Addr> for Value {
    fn from(addr: std::net::Ipv4Addr) -> Self {
        Value::IpAddress(addr.octets())
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Counter64(v)
    }
}
