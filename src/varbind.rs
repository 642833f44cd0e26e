//! Variable binding (VarBind) type and the default binding codec.

use bytes::Bytes;

use crate::ber::{Decoder, EncodeBuf, length_encoded_len};
use crate::error::Result;
use crate::oid::Oid;
use crate::pdu::VarbindCodec;
use crate::value::Value;

/// Variable binding - an OID-value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct VarBind {
    /// The object identifier.
    pub oid: Oid,
    /// The value.
    pub value: Value,
}

impl VarBind {
    /// Create a new VarBind.
    pub fn new(oid: Oid, value: Value) -> Self {
        Self { oid, value }
    }

    /// Create a VarBind with a NULL value, as used in GET-style requests.
    pub fn null(oid: Oid) -> Self {
        Self {
            oid,
            value: Value::Null,
        }
    }

    /// Encode as `SEQUENCE { OID, value }`.
    pub fn encode(&self, buf: &mut EncodeBuf) {
        buf.push_sequence(|buf| {
            self.value.encode(buf);
            buf.push_oid(&self.oid);
        });
    }

    /// Exact encoded size in bytes, computed without encoding.
    pub fn encoded_size(&self) -> usize {
        let content_len = self.oid.ber_encoded_len() + self.value.ber_encoded_len();
        1 + length_encoded_len(content_len) + content_len
    }

    /// Decode one binding, leaving the decoder just past it.
    pub fn decode(decoder: &mut Decoder) -> Result<Self> {
        let mut seq = decoder.read_sequence()?;
        let oid = seq.read_oid()?;
        let value = Value::decode(&mut seq)?;
        seq.finish()?;
        Ok(VarBind { oid, value })
    }
}

impl std::fmt::Display for VarBind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.oid, self.value)
    }
}

/// The standard binding codec: each element is `SEQUENCE { OID, value }`.
///
/// Every failure is reported as [`Error::VarbindDecode`](crate::Error::VarbindDecode).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VarBindCodec;

impl VarbindCodec for VarBindCodec {
    type Varbind = VarBind;

    fn decode(&self, raw: Bytes, offset: usize) -> Result<VarBind> {
        let mut decoder = Decoder::at(raw, offset);
        VarBind::decode(&mut decoder)
            .and_then(|vb| decoder.finish().map(|()| vb))
            .map_err(|err| {
                let err = err.into_varbind_error();
                tracing::debug!(target: "snmp_pdu::varbind", { snmp.offset = offset, error = %err }, "rejected variable binding");
                err
            })
    }

    fn encode(&self, varbind: &VarBind, buf: &mut EncodeBuf) {
        varbind.encode(buf);
    }
}
