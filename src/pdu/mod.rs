//! SNMP Protocol Data Units (PDUs).
//!
//! [`Pdu`] is a plain value type; [`PduCodec`] maps it to and from BER.
//! The varbind type is a parameter so callers can plug in their own
//! [`VarbindCodec`].

mod codec;
mod error_status;
mod pdu_type;

pub use codec::{PduCodec, RawVarbindCodec, VarbindCodec};
pub use error_status::PduError;
pub use pdu_type::PduType;

use bytes::Bytes;

use crate::error::Result;
use crate::oid::Oid;
use crate::varbind::{VarBind, VarBindCodec};

/// Generic PDU structure shared by every PDU type.
#[derive(Debug, Clone, PartialEq)]
pub struct Pdu<V = VarBind> {
    /// PDU type
    pub pdu_type: PduType,
    /// Request ID for correlating requests and responses
    pub request_id: i32,
    /// Error status (`NoError` for requests)
    pub error: PduError,
    /// 1-based index of the offending varbind, 0 when there is none.
    ///
    /// Must not be negative; decoding rejects negative values.
    pub error_index: i32,
    /// Variable bindings, in wire order
    pub varbinds: Vec<V>,
}

impl<V> Pdu<V> {
    /// Create a PDU with no error and no bindings.
    pub fn new(pdu_type: PduType, request_id: i32) -> Self {
        Self {
            pdu_type,
            request_id,
            error: PduError::NoError,
            error_index: 0,
            varbinds: Vec::new(),
        }
    }

    /// Create a successful GetResponse.
    pub fn response(request_id: i32, varbinds: Vec<V>) -> Self {
        Self {
            varbinds,
            ..Self::new(PduType::GetResponse, request_id)
        }
    }

    /// Check if this is an error response.
    pub fn is_error(&self) -> bool {
        self.error.is_error()
    }

    /// Check if this is a confirmed-class PDU (requires response).
    pub fn is_confirmed(&self) -> bool {
        self.pdu_type.is_confirmed()
    }

    /// Check if this is a notification PDU (Trap or Inform).
    pub fn is_notification(&self) -> bool {
        self.pdu_type.is_notification()
    }

    /// The varbind `error_index` points at, if any.
    ///
    /// ```
    /// use snmp_pdu::{oid, Pdu, PduError};
    ///
    /// let mut pdu = Pdu::get_request(7, &[oid!(1, 3, 6, 1, 2, 1, 1, 1, 0), oid!(1, 3, 6, 1, 2, 1, 1, 9, 0)]);
    /// assert!(pdu.offending_varbind().is_none());
    ///
    /// pdu.error = PduError::NoSuchName;
    /// pdu.error_index = 2;
    /// assert_eq!(pdu.offending_varbind().unwrap().oid, oid!(1, 3, 6, 1, 2, 1, 1, 9, 0));
    /// ```
    pub fn offending_varbind(&self) -> Option<&V> {
        if !self.is_error() {
            return None;
        }
        let index = usize::try_from(self.error_index).ok()?;
        self.varbinds.get(index.checked_sub(1)?)
    }
}

impl<V: Clone> Pdu<V> {
    /// GetResponse echoing this PDU's request ID and bindings.
    ///
    /// Used to acknowledge an InformRequest.
    pub fn to_response(&self) -> Self {
        Self::response(self.request_id, self.varbinds.clone())
    }

    /// GetResponse carrying an error status.
    pub fn to_error_response(&self, error: PduError, error_index: i32) -> Self {
        Self {
            error,
            error_index,
            ..self.to_response()
        }
    }
}

impl Pdu {
    /// Create a GetRequest with NULL-valued bindings.
    pub fn get_request(request_id: i32, oids: &[Oid]) -> Self {
        Self::with_null_bindings(PduType::GetRequest, request_id, oids)
    }

    /// Create a GetNextRequest with NULL-valued bindings.
    pub fn get_next_request(request_id: i32, oids: &[Oid]) -> Self {
        Self::with_null_bindings(PduType::GetNextRequest, request_id, oids)
    }

    /// Create a SetRequest.
    pub fn set_request(request_id: i32, varbinds: Vec<VarBind>) -> Self {
        Self {
            varbinds,
            ..Self::new(PduType::SetRequest, request_id)
        }
    }

    fn with_null_bindings(pdu_type: PduType, request_id: i32, oids: &[Oid]) -> Self {
        Self {
            varbinds: oids.iter().cloned().map(VarBind::null).collect(),
            ..Self::new(pdu_type, request_id)
        }
    }

    /// Decode with the standard [`VarBindCodec`].
    pub fn decode(data: impl Into<Bytes>) -> Result<Self> {
        PduCodec::new(VarBindCodec).decode(data)
    }

    /// Encode with the standard [`VarBindCodec`].
    ///
    /// See [`PduCodec::encode`] for the size limit on the decode side.
    pub fn encode(&self) -> Bytes {
        PduCodec::new(VarBindCodec).encode(self)
    }
}
