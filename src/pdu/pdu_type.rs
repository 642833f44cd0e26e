//! PDU type table.

use crate::ber::tag;
use crate::error::{Error, Result};

/// PDU type, identified on the wire by its context-specific constructed tag.
///
/// The set is closed: tags outside 0xA0..=0xA8 have no representation.
///
/// ```
/// use snmp_pdu::PduType;
///
/// let t = PduType::from_code(162).unwrap();
/// assert_eq!(t, PduType::GetResponse);
/// assert_eq!(t.name(), "GetResponse");
/// assert!(PduType::from_code(169).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PduType {
    GetRequest = tag::pdu::GET_REQUEST,
    GetNextRequest = tag::pdu::GET_NEXT_REQUEST,
    GetResponse = tag::pdu::GET_RESPONSE,
    SetRequest = tag::pdu::SET_REQUEST,
    /// SNMPv1 Trap. Its body layout differs from every other PDU.
    Trap = tag::pdu::TRAP,
    GetBulkRequest = tag::pdu::GET_BULK_REQUEST,
    InformRequest = tag::pdu::INFORM_REQUEST,
    TrapV2 = tag::pdu::TRAP_V2,
    Report = tag::pdu::REPORT,
}

impl PduType {
    /// All PDU types in tag order.
    pub const ALL: [PduType; 9] = [
        Self::GetRequest,
        Self::GetNextRequest,
        Self::GetResponse,
        Self::SetRequest,
        Self::Trap,
        Self::GetBulkRequest,
        Self::InformRequest,
        Self::TrapV2,
        Self::Report,
    ];

    /// Look up a PDU type by its tag value.
    pub fn from_code(code: i32) -> Result<Self> {
        Self::lookup(code).ok_or(Error::UnknownPduType { code })
    }

    /// Whether `code` is one of the nine PDU tags.
    pub fn contains(code: i32) -> bool {
        Self::lookup(code).is_some()
    }

    fn lookup(code: i32) -> Option<Self> {
        let tag = u8::try_from(code).ok()?;
        let pdu_type = match tag {
            tag::pdu::GET_REQUEST => Self::GetRequest,
            tag::pdu::GET_NEXT_REQUEST => Self::GetNextRequest,
            tag::pdu::GET_RESPONSE => Self::GetResponse,
            tag::pdu::SET_REQUEST => Self::SetRequest,
            tag::pdu::TRAP => Self::Trap,
            tag::pdu::GET_BULK_REQUEST => Self::GetBulkRequest,
            tag::pdu::INFORM_REQUEST => Self::InformRequest,
            tag::pdu::TRAP_V2 => Self::TrapV2,
            tag::pdu::REPORT => Self::Report,
            _ => return None,
        };
        Some(pdu_type)
    }

    /// The tag byte.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::GetRequest => "GetRequest",
            Self::GetNextRequest => "GetNextRequest",
            Self::GetResponse => "GetResponse",
            Self::SetRequest => "SetRequest",
            Self::Trap => "Trap",
            Self::GetBulkRequest => "GetBulkRequest",
            Self::InformRequest => "InformRequest",
            Self::TrapV2 => "TrapV2",
            Self::Report => "Report",
        }
    }

    /// Confirmed-class PDUs expect a response (RFC 3411 Section 2.8).
    pub fn is_confirmed(self) -> bool {
        matches!(
            self,
            Self::GetRequest
                | Self::GetNextRequest
                | Self::GetBulkRequest
                | Self::SetRequest
                | Self::InformRequest
        )
    }

    /// Trap, TrapV2 and InformRequest.
    pub fn is_notification(self) -> bool {
        matches!(self, Self::Trap | Self::TrapV2 | Self::InformRequest)
    }
}

impl TryFrom<u8> for PduType {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self> {
        Self::from_code(i32::from(tag))
    }
}

impl std::fmt::Display for PduType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_run_160_to_168() {
        for (i, t) in PduType::ALL.iter().enumerate() {
            assert_eq!(t.code() as usize, 160 + i);
            assert_eq!(PduType::from_code(160 + i as i32).unwrap(), *t);
            assert!(PduType::contains(t.code() as i32));
        }
    }

    #[test]
    fn unknown_codes_fail() {
        for code in [-1, 0, 0x30, 159, 169, 0xBF, 256 + 160] {
            assert_eq!(
                PduType::from_code(code).unwrap_err(),
                Error::UnknownPduType { code }
            );
            assert!(!PduType::contains(code));
        }
    }

    #[test]
    fn names_are_distinct_and_match_display() {
        let names: std::collections::HashSet<_> = PduType::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(names.len(), 9);
        assert_eq!(PduType::Trap.to_string(), "Trap");
        assert_eq!(PduType::GetBulkRequest.name(), "GetBulkRequest");
    }

    #[test]
    fn classes() {
        assert!(PduType::InformRequest.is_confirmed());
        assert!(PduType::InformRequest.is_notification());
        assert!(!PduType::GetResponse.is_confirmed());
        assert!(!PduType::Report.is_notification());
        assert!(PduType::TrapV2.is_notification());
    }

    #[test]
    fn try_from_tag_byte() {
        assert_eq!(PduType::try_from(0xA8).unwrap(), PduType::Report);
        assert!(PduType::try_from(0x9F).is_err());
    }
}
