//! Participant addresses.
//!
//! An [`Address`] is an opaque 160-bit identifier for a creator, investor,
//! or platform identity. Addresses are equality-comparable; the only
//! ordering the ledger relies on is registration order, which the
//! registries maintain themselves.

use serde::{Deserialize, Serialize};

/// An opaque 160-bit participant identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(pub [u8; 20]);

/// Error parsing an address from its hex text form.
#[derive(Debug, thiserror::Error)]
pub enum AddressParseError {
    /// Input was not 40 hex characters (after an optional `0x` prefix).
    #[error("address must be 40 hex characters, got {0}")]
    BadLength(usize),

    /// Input contained a non-hex character.
    #[error("invalid hex in address: {0}")]
    BadHex(#[from] hex::FromHexError),
}

impl Address {
    /// The all-zero address. Never a valid participant.
    pub const ZERO: Address = Address([0u8; 20]);

    /// Whether this is the all-zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    /// Parse an address from lowercase or uppercase hex, with or without
    /// a `0x` prefix.
    ///
    /// # Errors
    ///
    /// - [`AddressParseError::BadLength`] if the input is not 40 hex chars
    /// - [`AddressParseError::BadHex`] on a non-hex character
    pub fn from_hex(s: &str) -> Result<Self, AddressParseError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        if s.len() != 40 {
            return Err(AddressParseError::BadLength(s.len()));
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Address(bytes))
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_address() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address([1u8; 20]).is_zero());
    }

    #[test]
    fn test_display_roundtrip() {
        let addr = Address([0xab; 20]);
        let text = addr.to_string();
        assert!(text.starts_with("0x"));
        let parsed = Address::from_hex(&text).expect("parse");
        assert_eq!(parsed, addr);
    }

    #[test]
    fn test_from_hex_without_prefix() {
        let addr = Address::from_hex("00000000000000000000000000000000000000ff").expect("parse");
        assert_eq!(addr.0[19], 0xff);
    }

    #[test]
    fn test_from_hex_bad_length() {
        assert!(Address::from_hex("0x1234").is_err());
    }

    #[test]
    fn test_from_hex_bad_char() {
        assert!(Address::from_hex("zz00000000000000000000000000000000000000").is_err());
    }
}
