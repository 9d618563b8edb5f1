//! Account and chain identifiers.
//!
//! Substrate account ids are 32-byte public keys. In JSON call arguments and
//! request files they appear as hex strings, sometimes with and sometimes
//! without the `0x` prefix:
//! - Prefixed: "0xd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d"
//! - Bare: "d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d"
//!
//! [`AccountId`] parses both and always renders the prefixed lowercase form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Length in bytes of an account id.
pub const ACCOUNT_ID_LEN: usize = 32;

/// Error returned when an account id string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountIdError {
    /// The string contained non-hex characters.
    InvalidHex(String),
    /// The decoded value had the wrong number of bytes.
    InvalidLength { expected: usize, got: usize },
}

impl fmt::Display for AccountIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountIdError::InvalidHex(input) => write!(f, "invalid hex account id: {}", input),
            AccountIdError::InvalidLength { expected, got } => write!(
                f,
                "invalid account id length: expected {} bytes, got {}",
                expected, got
            ),
        }
    }
}

impl std::error::Error for AccountIdError {}

/// A 32-byte account handle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId([u8; ACCOUNT_ID_LEN]);

impl AccountId {
    pub const fn new(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Parse a hex account id, with or without `0x` prefix.
    ///
    /// # Examples
    ///
    /// ```
    /// use delegated_sign_types::AccountId;
    ///
    /// let id = AccountId::from_hex(
    ///     "0xD43593C715FDD31C61141ABD04A99FD6822C8558854CCDE39A5684E7A56DA27D",
    /// )
    /// .unwrap();
    /// assert_eq!(
    ///     id.to_string(),
    ///     "0xd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d"
    /// );
    /// ```
    pub fn from_hex(input: &str) -> Result<Self, AccountIdError> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);

        let bytes =
            hex::decode(digits).map_err(|_| AccountIdError::InvalidHex(input.to_string()))?;

        let array: [u8; ACCOUNT_ID_LEN] =
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| AccountIdError::InvalidLength {
                    expected: ACCOUNT_ID_LEN,
                    got: bytes.len(),
                })?;

        Ok(Self(array))
    }

    pub fn as_bytes(&self) -> &[u8; ACCOUNT_ID_LEN] {
        &self.0
    }

    /// Short display form: first and last four bytes.
    pub fn short(&self) -> String {
        let full = hex::encode(self.0);
        format!("0x{}…{}", &full[..8], &full[full.len() - 8..])
    }
}

impl From<[u8; ACCOUNT_ID_LEN]> for AccountId {
    fn from(bytes: [u8; ACCOUNT_ID_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for AccountId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for AccountId {
    type Err = AccountIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self)
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Chain identifier (genesis hash in practice).
///
/// Normalized to trimmed lowercase so lookups are insensitive to how the
/// caller spelled the hash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ChainId(String);

impl ChainId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(id.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ChainId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl From<&str> for ChainId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<ChainId> for String {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: &str = "0xd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";

    #[test]
    fn test_parse_with_and_without_prefix() {
        let prefixed: AccountId = ALICE.parse().unwrap();
        let bare: AccountId = ALICE.trim_start_matches("0x").parse().unwrap();
        let upper: AccountId = ALICE.to_uppercase().replace("0X", "0x").parse().unwrap();

        assert_eq!(prefixed, bare);
        assert_eq!(prefixed, upper);
        assert_eq!(prefixed.to_string(), ALICE);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(matches!(
            AccountId::from_hex("0x1234"),
            Err(AccountIdError::InvalidLength {
                expected: 32,
                got: 2
            })
        ));
        assert!(matches!(
            AccountId::from_hex("not-hex"),
            Err(AccountIdError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_serde_uses_hex_string() {
        let id: AccountId = ALICE.parse().unwrap();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, serde_json::json!(ALICE));

        let back: AccountId = serde_json::from_value(json).unwrap();
        assert_eq!(back, id);

        let err = serde_json::from_value::<AccountId>(serde_json::json!("0xabc"));
        assert!(err.is_err());
    }

    #[test]
    fn test_short_form() {
        let id: AccountId = ALICE.parse().unwrap();
        assert_eq!(id.short(), "0xd43593c7…a56da27d");
    }

    #[test]
    fn test_chain_id_normalized() {
        let a = ChainId::new("  0xABCD ");
        let b: ChainId = serde_json::from_value(serde_json::json!("0xabcd")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "0xabcd");
        assert_eq!(serde_json::to_value(&a).unwrap(), serde_json::json!("0xabcd"));
    }
}
