//! 24-hex-character record identifiers.
//!
//! Ids are generated as a 4-byte unix timestamp followed by 8 random bytes,
//! hex-encoded to 24 characters. The format check is the strict validation
//! gate for id-shaped request parameters.

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A 24-hex-character record identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ObjectId(String);

/// Error returned when parsing a malformed id.
#[derive(Debug, Clone, Error)]
#[error("invalid id: expected 24 hex characters")]
pub struct InvalidObjectId;

impl ObjectId {
    /// Generate a fresh id: 4-byte unix timestamp + 8 random bytes, hex-encoded.
    pub fn generate() -> Self {
        let mut bytes = [0u8; 12];
        let ts = chrono::Utc::now().timestamp() as u32;
        bytes[..4].copy_from_slice(&ts.to_be_bytes());
        rand::thread_rng().fill_bytes(&mut bytes[4..]);
        Self(hex::encode(bytes))
    }

    /// Check whether a string is id-shaped (exactly 24 hex characters after trimming).
    pub fn is_valid(raw: &str) -> bool {
        let raw = raw.trim();
        raw.len() == 24 && raw.bytes().all(|b| b.is_ascii_hexdigit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ObjectId {
    type Err = InvalidObjectId;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        if Self::is_valid(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(InvalidObjectId)
        }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_valid() {
        let id = ObjectId::generate();
        assert_eq!(id.as_str().len(), 24);
        assert!(ObjectId::is_valid(id.as_str()));
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(ObjectId::generate(), ObjectId::generate());
    }

    #[test]
    fn valid_hex_parses() {
        let id: ObjectId = "507f1f77bcf86cd799439011".parse().unwrap();
        assert_eq!(id.as_str(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let id: ObjectId = " 507f1f77bcf86cd799439011 ".parse().unwrap();
        assert_eq!(id.as_str(), "507f1f77bcf86cd799439011");
    }

    #[test]
    fn uppercase_hex_is_accepted() {
        assert!(ObjectId::is_valid("507F1F77BCF86CD799439011"));
    }

    #[test]
    fn wrong_length_rejected() {
        assert!(!ObjectId::is_valid("507f1f77bcf86cd79943901"));
        assert!(!ObjectId::is_valid("507f1f77bcf86cd7994390111"));
        assert!(!ObjectId::is_valid(""));
    }

    #[test]
    fn non_hex_rejected() {
        assert!(!ObjectId::is_valid("507f1f77bcf86cd79943901z"));
        assert!("not-an-id".parse::<ObjectId>().is_err());
    }

    #[test]
    fn deserialize_rejects_malformed() {
        let result: Result<ObjectId, _> = serde_json::from_str("\"nope\"");
        assert!(result.is_err());
    }
}
