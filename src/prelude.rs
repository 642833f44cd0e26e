//! Prelude module for convenient imports.
//!
//! ```rust
//! use snmp_pdu::prelude::*;
//!
//! let pdu = Pdu::get_next_request(1, &[oid!(1, 3, 6, 1)]);
//! assert_eq!(Pdu::decode(pdu.encode()).unwrap(), pdu);
//! ```
//!
//! This imports:
//! - PDU model and codecs: [`Pdu`], [`PduType`], [`PduError`], [`PduCodec`]
//! - Bindings: [`VarBind`], [`Oid`], [`Value`]
//! - Error handling: [`Error`], [`Result`]
//! - SNMPv3 credentials: [`SecurityCredential`], [`SecurityLevel`]
//! - The [`oid!`] macro

pub use crate::error::{Error, Result};
pub use crate::oid::Oid;
pub use crate::pdu::{Pdu, PduCodec, PduError, PduType, RawVarbindCodec, VarbindCodec};
pub use crate::v3::{AuthProtocol, PrivProtocol, SecurityCredential, SecurityLevel};
pub use crate::value::Value;
pub use crate::varbind::{VarBind, VarBindCodec};

#[doc(no_inline)]
pub use crate::oid;
