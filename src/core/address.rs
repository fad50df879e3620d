//! Fixed-width account identifiers
//!
//! An [`Address`] is 20 opaque bytes rendered as `0x` followed by 40 hex
//! digits. The all-zero value is the null account and never a valid
//! transfer destination or approval target.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Byte length of an address
pub const ADDRESS_LEN: usize = 20;

/// Address parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
    #[error("Invalid address hex: {0}")]
    InvalidHex(String),
}

/// A ledger account (or token) address
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The null account
    pub const NULL: Address = Address([0u8; ADDRESS_LEN]);

    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn is_null(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }

    /// Abbreviated form for log lines, e.g. `0x1a2b…9f0e`
    pub fn short(&self) -> String {
        let hex = hex::encode(self.0);
        format!("0x{}…{}", &hex[..4], &hex[hex.len() - 4..])
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes = hex::decode(trimmed).map_err(|e| AddressError::InvalidHex(e.to_string()))?;
        if bytes.len() != ADDRESS_LEN {
            return Err(AddressError::InvalidLength(bytes.len()));
        }
        let mut out = [0u8; ADDRESS_LEN];
        out.copy_from_slice(&bytes);
        Ok(Self(out))
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.to_string()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_address() {
        let null: Address = "0x0000000000000000000000000000000000000000".parse().unwrap();
        assert_eq!(null, Address::NULL);
        assert!(null.is_null());
        assert_eq!(Address::default(), Address::NULL);
    }

    #[test]
    fn test_parse_and_display() {
        let text = "0x1a2b3c4d5e6f708192a3b4c5d6e7f8091a2b3c4d";
        let address: Address = text.parse().unwrap();
        assert_eq!(address.to_string(), text);
        assert!(!address.is_null());

        // Prefix is optional, case-insensitive hex
        let bare: Address = "1A2B3C4D5E6F708192A3B4C5D6E7F8091A2B3C4D".parse().unwrap();
        assert_eq!(bare, address);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "0x1234".parse::<Address>(),
            Err(AddressError::InvalidLength(2))
        ));
        assert!(matches!(
            "0xnothex".parse::<Address>(),
            Err(AddressError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_serde_as_hex_string() {
        let address = Address::from_bytes([0xab; ADDRESS_LEN]);
        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"0x{}\"", "ab".repeat(ADDRESS_LEN)));

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);
        assert!(serde_json::from_str::<Address>("\"0x12\"").is_err());
    }
}
