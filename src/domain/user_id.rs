//! Type-safe user identity.
//!
//! [`UserId`] wraps the opaque identity string issued by the session layer.
//! The gateway never interprets it beyond requiring it to be non-blank.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

/// Identity of the user owning one or more live connections.
///
/// Used as the key of [`super::ConnectionRegistry`]. Construction rejects
/// empty and whitespace-only strings; the value is otherwise kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Validates and wraps a raw identity.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingUserId`] if `raw` is empty or blank.
    pub fn parse(raw: impl Into<String>) -> Result<Self, GatewayError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(GatewayError::MissingUserId);
        }
        Ok(Self(raw))
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = GatewayError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn accepts_opaque_identity() {
        let Ok(id) = UserId::parse("65f1c0ffee") else {
            panic!("valid id rejected");
        };
        assert_eq!(id.as_str(), "65f1c0ffee");
        assert_eq!(id.to_string(), "65f1c0ffee");
    }

    #[test]
    fn rejects_empty_and_blank() {
        assert!(matches!(UserId::parse(""), Err(GatewayError::MissingUserId)));
        assert!(matches!(
            UserId::parse("   "),
            Err(GatewayError::MissingUserId)
        ));
    }

    #[test]
    fn keeps_surrounding_whitespace_verbatim() {
        let Ok(id) = UserId::parse(" u1") else {
            panic!("valid id rejected");
        };
        assert_ne!(id.as_str(), "u1");
    }

    #[test]
    fn deserialization_validates() {
        let ok: Result<UserId, _> = serde_json::from_str("\"u1\"");
        assert!(ok.is_ok());
        let blank: Result<UserId, _> = serde_json::from_str("\"\"");
        assert!(blank.is_err());
    }
}
