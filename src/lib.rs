//! # snmp-pdu
//!
//! Encoding and decoding of SNMP Protocol Data Units.
//!
//! ## Features
//!
//! - All nine PDU types, from GetRequest (0xA0) to Report (0xA8)
//! - Strict BER decoding with absolute error offsets
//! - Zero-copy decoding on top of [`bytes::Bytes`]
//! - Pluggable variable-binding codecs ([`VarbindCodec`])
//! - SNMPv3 credential data model with fail-fast validation
//!
//! Message framing (version, community, USM headers), transports and
//! cryptography are out of scope.
//!
//! ## Quick Start
//!
//! ```rust
//! use snmp_pdu::{Pdu, PduError, PduType, oid};
//!
//! let request = Pdu::get_request(42, &[oid!(1, 3, 6, 1, 2, 1, 1, 1, 0)]);
//! let wire = request.encode();
//!
//! let decoded = Pdu::decode(wire)?;
//! assert_eq!(decoded.pdu_type, PduType::GetRequest);
//! assert_eq!(decoded.error, PduError::NoError);
//! assert_eq!(decoded, request);
//! # Ok::<(), snmp_pdu::Error>(())
//! ```
//!
//! ## Raw Bindings
//!
//! ```rust
//! use snmp_pdu::{PduCodec, RawVarbindCodec};
//!
//! let wire: &[u8] = &[
//!     0xA2, 0x12, 0x02, 0x01, 0x01, 0x02, 0x01, 0x00, 0x02, 0x01, 0x00,
//!     0x30, 0x07, 0x30, 0x05, 0x06, 0x01, 0x2B, 0x05, 0x00,
//! ];
//! let codec = PduCodec::new(RawVarbindCodec);
//! let pdu = codec.decode(bytes::Bytes::copy_from_slice(wire))?;
//! assert_eq!(&pdu.varbinds[0][..], &wire[13..]);
//! assert_eq!(&codec.encode(&pdu)[..], wire);
//! # Ok::<(), snmp_pdu::Error>(())
//! ```

pub mod ber;
pub mod error;
pub mod oid;
pub mod pdu;
pub mod prelude;
pub mod v3;
pub mod value;
pub mod varbind;

pub use error::{Error, Result};
pub use oid::Oid;
pub use pdu::{Pdu, PduCodec, PduError, PduType, RawVarbindCodec, VarbindCodec};
pub use v3::{
    AuthProtocol, ParseProtocolError, PrivProtocol, SecurityCredential, SecurityLevel,
};
pub use value::Value;
pub use varbind::{VarBind, VarBindCodec};
