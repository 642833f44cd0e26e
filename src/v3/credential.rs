//! USM user credentials.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{AuthProtocol, PrivProtocol, SecurityLevel};
use crate::error::{CredentialErrorKind, Error, Result};

/// Key or password material, wiped from memory on drop.
///
/// `Debug` never prints the bytes.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(Vec<u8>);

impl SecretKey {
    /// Wrap raw key bytes.
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self(key.into())
    }

    /// The key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SecretKey").field(&"[REDACTED]").finish()
    }
}

impl From<&str> for SecretKey {
    fn from(s: &str) -> Self {
        Self::new(s.as_bytes())
    }
}

impl From<String> for SecretKey {
    fn from(s: String) -> Self {
        Self::new(s.into_bytes())
    }
}

impl From<&[u8]> for SecretKey {
    fn from(b: &[u8]) -> Self {
        Self::new(b)
    }
}

impl From<Vec<u8>> for SecretKey {
    fn from(b: Vec<u8>) -> Self {
        Self(b)
    }
}

/// Security parameters for one SNMPv3 principal.
///
/// A credential always satisfies its level: authNoPriv and authPriv carry a
/// non-empty auth key, authPriv also carries a non-empty privacy key. The
/// only way to obtain one is [`SecurityCredential::builder`], which checks
/// this up front.
///
/// ```
/// use snmp_pdu::{Error, SecurityCredential, SecurityLevel};
/// use snmp_pdu::error::CredentialErrorKind;
///
/// let cred = SecurityCredential::builder("admin")
///     .auth_key("authpass123")
///     .build()
///     .unwrap();
/// assert_eq!(cred.level(), SecurityLevel::AuthNoPriv);
///
/// let err = SecurityCredential::builder("admin")
///     .level(SecurityLevel::AuthPriv)
///     .auth_key("authpass123")
///     .build()
///     .unwrap_err();
/// assert_eq!(err, Error::InvalidCredential { kind: CredentialErrorKind::MissingPrivKey });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(try_from = "CredentialRecord")
)]
pub struct SecurityCredential {
    name: String,
    level: SecurityLevel,
    auth_protocol: AuthProtocol,
    auth_key: Option<SecretKey>,
    priv_protocol: PrivProtocol,
    priv_key: Option<SecretKey>,
}

impl SecurityCredential {
    /// Start building a credential for `name`.
    ///
    /// Defaults: authNoPriv, SHA, DES, no keys.
    pub fn builder(name: impl Into<String>) -> SecurityCredentialBuilder {
        SecurityCredentialBuilder {
            name: name.into(),
            level: SecurityLevel::default(),
            auth_protocol: AuthProtocol::default(),
            auth_key: None,
            priv_protocol: PrivProtocol::default(),
            priv_key: None,
        }
    }

    /// Security name (USM user name).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> SecurityLevel {
        self.level
    }

    pub fn auth_protocol(&self) -> AuthProtocol {
        self.auth_protocol
    }

    /// Authentication key, if one was supplied.
    pub fn auth_key(&self) -> Option<&[u8]> {
        self.auth_key.as_ref().map(SecretKey::as_bytes)
    }

    pub fn priv_protocol(&self) -> PrivProtocol {
        self.priv_protocol
    }

    /// Privacy key, if one was supplied.
    pub fn priv_key(&self) -> Option<&[u8]> {
        self.priv_key.as_ref().map(SecretKey::as_bytes)
    }

    pub fn requires_auth(&self) -> bool {
        self.level.requires_auth()
    }

    pub fn requires_priv(&self) -> bool {
        self.level.requires_priv()
    }

    /// msgFlags byte for a message sent with this credential.
    ///
    /// ```
    /// use snmp_pdu::{SecurityCredential, SecurityLevel};
    ///
    /// let cred = SecurityCredential::builder("public")
    ///     .level(SecurityLevel::NoAuthNoPriv)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(cred.msg_flags(true), 0x04);
    /// assert_eq!(cred.msg_flags(false), 0x00);
    /// ```
    pub fn msg_flags(&self, reportable: bool) -> u8 {
        let reportable = if reportable { 0x04 } else { 0x00 };
        self.level.to_flags() | reportable
    }
}

/// Builder for [`SecurityCredential`].
#[derive(Debug, Clone)]
#[must_use]
pub struct SecurityCredentialBuilder {
    name: String,
    level: SecurityLevel,
    auth_protocol: AuthProtocol,
    auth_key: Option<SecretKey>,
    priv_protocol: PrivProtocol,
    priv_key: Option<SecretKey>,
}

impl SecurityCredentialBuilder {
    pub fn level(mut self, level: SecurityLevel) -> Self {
        self.level = level;
        self
    }

    pub fn auth_protocol(mut self, protocol: AuthProtocol) -> Self {
        self.auth_protocol = protocol;
        self
    }

    /// Set the authentication key or password.
    pub fn auth_key(mut self, key: impl Into<SecretKey>) -> Self {
        self.auth_key = Some(key.into());
        self
    }

    pub fn priv_protocol(mut self, protocol: PrivProtocol) -> Self {
        self.priv_protocol = protocol;
        self
    }

    /// Set the privacy key or password.
    pub fn priv_key(mut self, key: impl Into<SecretKey>) -> Self {
        self.priv_key = Some(key.into());
        self
    }

    /// Validate and build.
    ///
    /// Keys for a level that does not use them are kept but have no effect.
    pub fn build(self) -> Result<SecurityCredential> {
        if self.name.is_empty() {
            return Err(Error::credential(CredentialErrorKind::EmptyName));
        }
        if self.auth_key.as_ref().is_some_and(SecretKey::is_empty) {
            return Err(Error::credential(CredentialErrorKind::EmptyAuthKey));
        }
        if self.priv_key.as_ref().is_some_and(SecretKey::is_empty) {
            return Err(Error::credential(CredentialErrorKind::EmptyPrivKey));
        }
        if self.level.requires_auth() && self.auth_key.is_none() {
            return Err(Error::credential(CredentialErrorKind::MissingAuthKey));
        }
        if self.level.requires_priv() && self.priv_key.is_none() {
            return Err(Error::credential(CredentialErrorKind::MissingPrivKey));
        }

        Ok(SecurityCredential {
            name: self.name,
            level: self.level,
            auth_protocol: self.auth_protocol,
            auth_key: self.auth_key,
            priv_protocol: self.priv_protocol,
            priv_key: self.priv_key,
        })
    }
}

/// Config-file shape of a credential; validated through the builder.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct CredentialRecord {
    name: String,
    #[serde(default)]
    level: SecurityLevel,
    #[serde(default)]
    auth_protocol: AuthProtocol,
    #[serde(default)]
    auth_key: Option<String>,
    #[serde(default)]
    priv_protocol: PrivProtocol,
    #[serde(default)]
    priv_key: Option<String>,
}

#[cfg(feature = "serde")]
impl TryFrom<CredentialRecord> for SecurityCredential {
    type Error = Error;

    fn try_from(record: CredentialRecord) -> Result<Self> {
        let mut builder = SecurityCredential::builder(record.name)
            .level(record.level)
            .auth_protocol(record.auth_protocol)
            .priv_protocol(record.priv_protocol);
        if let Some(key) = record.auth_key {
            builder = builder.auth_key(key);
        }
        if let Some(key) = record.priv_key {
            builder = builder.priv_key(key);
        }
        builder.build()
    }
}
