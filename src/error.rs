//! Error types for snmp-pdu.
//!
//! Every failure the crate can report is a variant of [`Error`]. Decoding is
//! the only fallible direction; encoding a structurally valid [`Pdu`] cannot
//! fail.
//!
//! # Decode failures
//!
//! | Variant | Meaning |
//! |---------|---------|
//! | [`Error::MalformedPdu`] | not a well-formed BER element, or missing the four PDU fields |
//! | [`Error::UnknownPduType`] | outer tag outside 0xA0..=0xA8 |
//! | [`Error::UnknownPduError`] | error-status outside 0..=18 |
//! | [`Error::TypeMismatch`] | an INTEGER or SEQUENCE field carried another tag |
//! | [`Error::VarbindDecode`] | the variable-binding codec rejected an element |
//!
//! ```
//! use bytes::Bytes;
//! use snmp_pdu::{Error, Pdu};
//!
//! // Tag 0xA9 is one past Report.
//! let err = Pdu::decode(Bytes::from_static(&[0xA9, 0x00])).unwrap_err();
//! assert!(matches!(err, Error::UnknownPduType { code: 0xA9 }));
//! ```
//!
//! [`Pdu`]: crate::pdu::Pdu

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// BER decode error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeErrorKind {
    /// Expected different tag.
    UnexpectedTag { expected: u8, actual: u8 },
    /// Multi-octet tag form, never used by SNMP.
    UnsupportedTag(u8),
    /// Data truncated unexpectedly.
    TruncatedData,
    /// Invalid BER length encoding.
    InvalidLength,
    /// Indefinite length on a primitive element.
    IndefinitePrimitive,
    /// Indefinite-length element without an end-of-contents marker.
    MissingEndOfContents,
    /// Constructed elements nested deeper than [`MAX_DEPTH`](crate::ber::MAX_DEPTH).
    NestingTooDeep { max: usize },
    /// Integer value does not fit in 32 bits.
    IntegerOverflow,
    /// Zero-length integer.
    ZeroLengthInteger,
    /// Invalid OID encoding.
    InvalidOidEncoding,
    /// OID has more arcs than allowed.
    OidTooLong { count: usize, max: usize },
    /// Constructed OCTET STRING not supported.
    ConstructedOctetString,
    /// NULL with non-zero length.
    InvalidNull,
    /// Invalid IP address length.
    InvalidIpAddressLength { length: usize },
    /// Length field too long.
    LengthTooLong { octets: usize },
    /// Length exceeds maximum.
    LengthExceedsMax { length: usize, max: usize },
    /// Integer64 too long.
    Integer64TooLong { length: usize },
    /// TLV extends past end of data.
    TlvOverflow,
    /// Insufficient data for read.
    InsufficientData { needed: usize, available: usize },
    /// PDU body holds fewer than the four required fields.
    MissingPduFields { found: usize },
    /// Error index is negative.
    NegativeErrorIndex(i32),
    /// Bytes left over after a complete element.
    TrailingData { remaining: usize },
}

impl std::fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedTag { expected, actual } => {
                write!(f, "expected tag 0x{:02X}, got 0x{:02X}", expected, actual)
            }
            Self::UnsupportedTag(tag) => write!(f, "unsupported multi-octet tag 0x{:02X}", tag),
            Self::TruncatedData => write!(f, "unexpected end of data"),
            Self::InvalidLength => write!(f, "invalid length encoding"),
            Self::IndefinitePrimitive => {
                write!(f, "indefinite length on a primitive element")
            }
            Self::MissingEndOfContents => write!(f, "missing end-of-contents octets"),
            Self::NestingTooDeep { max } => {
                write!(f, "constructed elements nested deeper than {}", max)
            }
            Self::IntegerOverflow => write!(f, "integer overflow"),
            Self::ZeroLengthInteger => write!(f, "zero-length integer"),
            Self::InvalidOidEncoding => write!(f, "invalid OID encoding"),
            Self::OidTooLong { count, max } => {
                write!(f, "OID has {} arcs, exceeds maximum {}", count, max)
            }
            Self::ConstructedOctetString => {
                write!(f, "constructed OCTET STRING (0x24) not supported")
            }
            Self::InvalidNull => write!(f, "NULL with non-zero length"),
            Self::InvalidIpAddressLength { length } => {
                write!(f, "IP address must be 4 bytes, got {}", length)
            }
            Self::LengthTooLong { octets } => {
                write!(f, "length encoding too long ({} octets)", octets)
            }
            Self::LengthExceedsMax { length, max } => {
                write!(f, "length {} exceeds maximum {}", length, max)
            }
            Self::Integer64TooLong { length } => {
                write!(f, "integer64 too long: {} bytes", length)
            }
            Self::TlvOverflow => write!(f, "TLV extends past end of data"),
            Self::InsufficientData { needed, available } => {
                write!(f, "need {} bytes but only {} remaining", needed, available)
            }
            Self::MissingPduFields { found } => {
                write!(f, "expected 4 elements, found {}", found)
            }
            Self::NegativeErrorIndex(index) => write!(f, "negative error index {}", index),
            Self::TrailingData { remaining } => {
                write!(f, "{} trailing bytes after element", remaining)
            }
        }
    }
}

/// OID validation error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OidErrorKind {
    /// Invalid arc value.
    InvalidArc,
    /// First arc must be 0, 1, or 2.
    InvalidFirstArc(u32),
    /// Second arc too large for first arc value.
    InvalidSecondArc { first: u32, second: u32 },
    /// A lone arc has no BER form of its own.
    SingleArc,
    /// OID has too many arcs (exceeds MAX_OID_LEN).
    TooManyArcs { count: usize, max: usize },
}

impl std::fmt::Display for OidErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArc => write!(f, "invalid arc value"),
            Self::InvalidFirstArc(v) => write!(f, "first arc must be 0, 1, or 2, got {}", v),
            Self::InvalidSecondArc { first, second } => {
                write!(f, "second arc {} too large for first arc {}", second, first)
            }
            Self::SingleArc => write!(f, "OID needs at least two arcs"),
            Self::TooManyArcs { count, max } => {
                write!(f, "OID has {} arcs, exceeds maximum {}", count, max)
            }
        }
    }
}

/// Reasons a [`SecurityCredential`](crate::v3::SecurityCredential) is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialErrorKind {
    /// Security name is empty.
    EmptyName,
    /// Level requires authentication but no auth key was given.
    MissingAuthKey,
    /// Level requires privacy but no privacy key was given.
    MissingPrivKey,
    /// Auth key was given but is empty.
    EmptyAuthKey,
    /// Privacy key was given but is empty.
    EmptyPrivKey,
}

impl std::fmt::Display for CredentialErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "security name must not be empty"),
            Self::MissingAuthKey => write!(f, "security level requires an authentication key"),
            Self::MissingPrivKey => write!(f, "security level requires a privacy key"),
            Self::EmptyAuthKey => write!(f, "authentication key is empty"),
            Self::EmptyPrivKey => write!(f, "privacy key is empty"),
        }
    }
}

/// The error type for all snmp-pdu operations.
///
/// # Matching on decode failures
///
/// ```
/// use snmp_pdu::Error;
///
/// fn is_framing_problem(error: &Error) -> bool {
///     matches!(error, Error::MalformedPdu { .. } | Error::TypeMismatch { .. })
/// }
///
/// fn is_unknown_code(error: &Error) -> bool {
///     matches!(error, Error::UnknownPduType { .. } | Error::UnknownPduError { .. })
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Buffer is not a well-formed BER PDU.
    #[error("malformed PDU at offset {offset}: {kind}")]
    MalformedPdu {
        offset: usize,
        kind: DecodeErrorKind,
    },

    /// Outer tag is not one of the nine PDU types.
    #[error("unknown PDU type: {code} (0x{code:02X})")]
    UnknownPduType { code: i32 },

    /// Error-status field is not one of the nineteen status codes.
    #[error("unknown PDU error status: {code}")]
    UnknownPduError { code: i32 },

    /// A field carried the wrong ASN.1 tag.
    #[error("type mismatch at offset {offset}: expected tag 0x{expected:02X}, got 0x{actual:02X}")]
    TypeMismatch {
        offset: usize,
        expected: u8,
        actual: u8,
    },

    /// Variable-binding codec rejected an element.
    #[error("varbind decode error at offset {offset}: {kind}")]
    VarbindDecode {
        offset: usize,
        kind: DecodeErrorKind,
    },

    /// Invalid OID format.
    #[error("invalid OID: {kind}")]
    InvalidOid {
        kind: OidErrorKind,
        input: Option<Box<str>>, // Only allocated when parsing string input
    },

    /// Security credential violates its level's key requirements.
    #[error("invalid security credential: {kind}")]
    InvalidCredential { kind: CredentialErrorKind },
}

impl Error {
    /// Create a malformed-PDU error.
    pub fn malformed(offset: usize, kind: DecodeErrorKind) -> Self {
        Self::MalformedPdu { offset, kind }
    }

    /// Create an invalid OID error from a kind (no input string).
    pub fn invalid_oid(kind: OidErrorKind) -> Self {
        Self::InvalidOid { kind, input: None }
    }

    /// Create an invalid OID error with the input string that failed.
    pub fn invalid_oid_with_input(kind: OidErrorKind, input: impl Into<Box<str>>) -> Self {
        Self::InvalidOid {
            kind,
            input: Some(input.into()),
        }
    }

    /// Create a credential validation error.
    pub fn credential(kind: CredentialErrorKind) -> Self {
        Self::InvalidCredential { kind }
    }

    /// Re-attribute a BER-level failure to the varbind codec.
    ///
    /// Framing and tag errors raised while parsing a binding become
    /// [`Error::VarbindDecode`]; other variants pass through untouched.
    pub fn into_varbind_error(self) -> Self {
        match self {
            Self::MalformedPdu { offset, kind } => Self::VarbindDecode { offset, kind },
            Self::TypeMismatch {
                offset,
                expected,
                actual,
            } => Self::VarbindDecode {
                offset,
                kind: DecodeErrorKind::UnexpectedTag { expected, actual },
            },
            other => other,
        }
    }

    /// Byte offset of a decode failure, if this is one.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::MalformedPdu { offset, .. }
            | Self::TypeMismatch { offset, .. }
            | Self::VarbindDecode { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}
