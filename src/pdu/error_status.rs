//! Error-status table (RFC 3416 Section 3).

use crate::error::{Error, Result};

/// Error status carried in a PDU.
///
/// Codes 0 through 18 are the only legal values; anything else fails to
/// decode rather than mapping to a catch-all.
///
/// ```
/// use snmp_pdu::PduError;
///
/// let status = PduError::from_code(2).unwrap();
/// assert_eq!(status, PduError::NoSuchName);
/// assert_eq!(status.name(), "NoSuchName");
/// assert!(PduError::from_code(19).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum PduError {
    #[default]
    NoError = 0,
    /// Response would exceed the transport's size limit.
    TooBig = 1,
    /// SNMPv1 only; v2c+ reports missing objects with exception values.
    NoSuchName = 2,
    /// SNMPv1 only.
    BadValue = 3,
    /// SNMPv1 only.
    ReadOnly = 4,
    GenErr = 5,
    NoAccess = 6,
    WrongType = 7,
    WrongLength = 8,
    WrongEncoding = 9,
    WrongValue = 10,
    NoCreation = 11,
    InconsistentValue = 12,
    ResourceUnavailable = 13,
    CommitFailed = 14,
    UndoFailed = 15,
    /// Access denied by VACM.
    AuthorizationError = 16,
    NotWritable = 17,
    InconsistentName = 18,
}

impl PduError {
    /// All error statuses in code order.
    pub const ALL: [PduError; 19] = [
        Self::NoError,
        Self::TooBig,
        Self::NoSuchName,
        Self::BadValue,
        Self::ReadOnly,
        Self::GenErr,
        Self::NoAccess,
        Self::WrongType,
        Self::WrongLength,
        Self::WrongEncoding,
        Self::WrongValue,
        Self::NoCreation,
        Self::InconsistentValue,
        Self::ResourceUnavailable,
        Self::CommitFailed,
        Self::UndoFailed,
        Self::AuthorizationError,
        Self::NotWritable,
        Self::InconsistentName,
    ];

    /// Look up a status by code.
    pub fn from_code(code: i32) -> Result<Self> {
        Self::lookup(code).ok_or(Error::UnknownPduError { code })
    }

    /// Whether `code` is a legal error status.
    pub fn contains(code: i32) -> bool {
        Self::lookup(code).is_some()
    }

    fn lookup(code: i32) -> Option<Self> {
        let status = match code {
            0 => Self::NoError,
            1 => Self::TooBig,
            2 => Self::NoSuchName,
            3 => Self::BadValue,
            4 => Self::ReadOnly,
            5 => Self::GenErr,
            6 => Self::NoAccess,
            7 => Self::WrongType,
            8 => Self::WrongLength,
            9 => Self::WrongEncoding,
            10 => Self::WrongValue,
            11 => Self::NoCreation,
            12 => Self::InconsistentValue,
            13 => Self::ResourceUnavailable,
            14 => Self::CommitFailed,
            15 => Self::UndoFailed,
            16 => Self::AuthorizationError,
            17 => Self::NotWritable,
            18 => Self::InconsistentName,
            _ => return None,
        };
        Some(status)
    }

    /// Wire code.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Canonical name.
    pub fn name(self) -> &'static str {
        match self {
            Self::NoError => "NoError",
            Self::TooBig => "TooBig",
            Self::NoSuchName => "NoSuchName",
            Self::BadValue => "BadValue",
            Self::ReadOnly => "ReadOnly",
            Self::GenErr => "GenErr",
            Self::NoAccess => "NoAccess",
            Self::WrongType => "WrongType",
            Self::WrongLength => "WrongLength",
            Self::WrongEncoding => "WrongEncoding",
            Self::WrongValue => "WrongValue",
            Self::NoCreation => "NoCreation",
            Self::InconsistentValue => "InconsistentValue",
            Self::ResourceUnavailable => "ResourceUnavailable",
            Self::CommitFailed => "CommitFailed",
            Self::UndoFailed => "UndoFailed",
            Self::AuthorizationError => "AuthorizationError",
            Self::NotWritable => "NotWritable",
            Self::InconsistentName => "InconsistentName",
        }
    }

    /// Anything other than `NoError`.
    pub fn is_error(self) -> bool {
        self != Self::NoError
    }
}

impl std::fmt::Display for PduError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
