//! BER (Basic Encoding Rules) subset used by SNMP.
//!
//! [`Decoder`] reads zero-copy out of a `Bytes` buffer and accepts both
//! definite and indefinite lengths. [`EncodeBuf`] always writes minimal
//! definite-length encodings.

mod decode;
mod encode;
mod length;
pub mod tag;

pub use decode::{Decoder, Element};
pub use encode::{
    EncodeBuf, integer_content_len, unsigned32_content_len, unsigned64_content_len,
};
pub use length::{Length, MAX_LENGTH, decode_length, encode_length, length_encoded_len};

/// Deepest nesting of indefinite-length constructed elements the decoder
/// will follow.
pub const MAX_DEPTH: usize = 32;
