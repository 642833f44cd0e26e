//! PDU wire codec.

use bytes::Bytes;

use super::{Pdu, PduError, PduType};
use crate::ber::{Decoder, Element, EncodeBuf, tag};
use crate::error::{DecodeErrorKind, Error, Result};
use crate::varbind::VarBindCodec;

/// Encodes and decodes one variable binding.
///
/// [`PduCodec`] splits the varbind list into elements and hands each
/// element's complete encoding (tag, length and content) to `decode`.
/// Errors returned here reach the caller of [`PduCodec::decode`] unchanged.
pub trait VarbindCodec {
    /// Decoded form of one binding.
    type Varbind;

    /// Decode one binding from its raw TLV.
    ///
    /// `offset` is where `raw` starts in the PDU buffer, for error reporting.
    fn decode(&self, raw: Bytes, offset: usize) -> Result<Self::Varbind>;

    /// Append one binding's complete TLV to `buf`.
    fn encode(&self, varbind: &Self::Varbind, buf: &mut EncodeBuf);
}

impl<C: VarbindCodec + ?Sized> VarbindCodec for &C {
    type Varbind = C::Varbind;

    fn decode(&self, raw: Bytes, offset: usize) -> Result<Self::Varbind> {
        (**self).decode(raw, offset)
    }

    fn encode(&self, varbind: &Self::Varbind, buf: &mut EncodeBuf) {
        (**self).encode(varbind, buf)
    }
}

/// Keeps each binding as its raw encoded TLV.
///
/// Encoding writes the stored bytes back verbatim, so any accepted
/// varbind list round-trips byte for byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawVarbindCodec;

impl VarbindCodec for RawVarbindCodec {
    type Varbind = Bytes;

    fn decode(&self, raw: Bytes, _offset: usize) -> Result<Bytes> {
        Ok(raw)
    }

    fn encode(&self, varbind: &Bytes, buf: &mut EncodeBuf) {
        buf.push_encoded(varbind);
    }
}

/// Converts between BER buffers and [`Pdu`] values.
///
/// ```
/// use snmp_pdu::{Pdu, PduCodec, PduType, RawVarbindCodec};
/// use bytes::Bytes;
///
/// let codec = PduCodec::new(RawVarbindCodec);
/// let pdu: Pdu<Bytes> = Pdu::new(PduType::GetRequest, 42);
/// let wire = codec.encode(&pdu);
/// assert_eq!(&wire[..], &[0xA0, 0x0B, 0x02, 0x01, 0x2A, 0x02, 0x01, 0x00, 0x02, 0x01, 0x00, 0x30, 0x00]);
/// assert_eq!(codec.decode(wire).unwrap(), pdu);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PduCodec<C = VarBindCodec> {
    varbinds: C,
}

impl<C: VarbindCodec> PduCodec<C> {
    /// Create a codec that delegates bindings to `varbinds`.
    pub fn new(varbinds: C) -> Self {
        Self { varbinds }
    }

    /// The binding codec in use.
    pub fn varbind_codec(&self) -> &C {
        &self.varbinds
    }

    /// Decode exactly one PDU from `data`.
    ///
    /// The outer tag is checked against the nine PDU types before anything
    /// else is parsed. The body must hold request-id, error-status and
    /// error-index INTEGERs followed by the varbind SEQUENCE; elements after
    /// the fourth are ignored. Bytes after the PDU are an error.
    pub fn decode(&self, data: impl Into<Bytes>) -> Result<Pdu<C::Varbind>> {
        let mut decoder = Decoder::new(data.into());

        let Some(first) = decoder.peek_byte() else {
            tracing::debug!(target: "snmp_pdu::pdu", "empty PDU buffer");
            return Err(Error::malformed(0, DecodeErrorKind::TruncatedData));
        };
        let pdu_type = PduType::from_code(i32::from(first)).inspect_err(|_| {
            tracing::debug!(target: "snmp_pdu::pdu", { snmp.tag = first }, "unknown PDU type");
        })?;

        let outer = decoder.read_element()?;
        decoder.finish()?;

        let mut body = outer.contents();
        let mut elements = Vec::with_capacity(4);
        while !body.is_empty() {
            elements.push(body.read_element()?);
        }

        let [request_id, error, error_index, varbinds, extra @ ..] = elements.as_slice() else {
            let kind = DecodeErrorKind::MissingPduFields {
                found: elements.len(),
            };
            tracing::debug!(target: "snmp_pdu::pdu", { snmp.offset = outer.offset(), kind = %kind }, "PDU body too short");
            return Err(Error::malformed(outer.offset(), kind));
        };
        if !extra.is_empty() {
            tracing::debug!(target: "snmp_pdu::pdu", { snmp.offset = extra[0].offset(), count = extra.len() }, "ignoring extra PDU elements");
        }

        let request_id = read_integer(request_id)?;

        let error = PduError::from_code(read_integer(error)?).inspect_err(|err| {
            tracing::debug!(target: "snmp_pdu::pdu", { error = %err }, "unknown error status");
        })?;

        let error_index_at = error_index.offset();
        let error_index = read_integer(error_index)?;
        if error_index < 0 {
            let kind = DecodeErrorKind::NegativeErrorIndex(error_index);
            tracing::debug!(target: "snmp_pdu::pdu", { snmp.offset = error_index_at, kind = %kind }, "negative error index");
            return Err(Error::malformed(error_index_at, kind));
        }

        let varbinds = self.decode_varbinds(varbinds)?;

        Ok(Pdu {
            pdu_type,
            request_id,
            error,
            error_index,
            varbinds,
        })
    }

    fn decode_varbinds(&self, list: &Element) -> Result<Vec<C::Varbind>> {
        if list.tag() != tag::universal::SEQUENCE {
            tracing::debug!(target: "snmp_pdu::pdu", { snmp.offset = list.offset(), snmp.tag = list.tag() }, "varbind list is not a SEQUENCE");
            return Err(Error::TypeMismatch {
                offset: list.offset(),
                expected: tag::universal::SEQUENCE,
                actual: list.tag(),
            });
        }

        let mut items = list.contents();
        let mut varbinds = Vec::new();
        while !items.is_empty() {
            let element = items.read_element()?;
            let offset = element.offset();
            varbinds.push(self.varbinds.decode(element.into_raw(), offset)?);
        }
        Ok(varbinds)
    }

    /// Encode a PDU to a fresh buffer.
    ///
    /// Output always uses minimal INTEGER content and minimal definite lengths.
    ///
    /// Encoding never fails. A PDU whose content exceeds
    /// [`MAX_LENGTH`](crate::ber::MAX_LENGTH) is still written out, but
    /// [`decode`](Self::decode) rejects it with `LengthExceedsMax`.
    pub fn encode(&self, pdu: &Pdu<C::Varbind>) -> Bytes {
        let mut buf = EncodeBuf::new();
        self.encode_into(pdu, &mut buf);
        buf.finish()
    }

    /// Prepend a PDU to whatever `buf` already holds.
    ///
    /// Used when the PDU is the last element of an enclosing message.
    pub fn encode_into(&self, pdu: &Pdu<C::Varbind>, buf: &mut EncodeBuf) {
        buf.push_constructed(pdu.pdu_type.code(), |buf| {
            buf.push_sequence(|buf| {
                for varbind in pdu.varbinds.iter().rev() {
                    self.varbinds.encode(varbind, buf);
                }
            });
            buf.push_integer(pdu.error_index);
            buf.push_integer(pdu.error.code());
            buf.push_integer(pdu.request_id);
        });
    }
}

fn read_integer(element: &Element) -> Result<i32> {
    Decoder::at(element.raw().clone(), element.offset()).read_integer()
}
