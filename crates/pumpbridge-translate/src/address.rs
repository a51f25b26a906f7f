//! Hardware addresses.
//!
//! Controllers are addressed by their 6-byte wireless MAC. The canonical
//! text form is exactly `xx:xx:xx:xx:xx:xx`, lowercase hex, and parsing
//! accepts nothing else: bus topics embed addresses as path segments, so a
//! loosely parsed address would alias distinct devices.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TranslateError;

/// Canonical text length: six two-digit groups joined by five colons.
const ADDRESS_TEXT_LEN: usize = 17;

/// A 6-byte wireless hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address([u8; 6]);

impl Address {
    /// The all-ones broadcast address.
    pub const BROADCAST: Address = Address([0xFF; 6]);

    /// Wrap raw address bytes.
    pub fn new(octets: [u8; 6]) -> Self {
        Address(octets)
    }

    /// The raw address bytes.
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// Parse the canonical text form.
    ///
    /// Fails unless the input is exactly 17 characters of lowercase
    /// colon-separated hex pairs.
    pub fn parse(text: &str) -> Result<Self, TranslateError> {
        let malformed = || TranslateError::MalformedAddress(text.to_string());

        if text.len() != ADDRESS_TEXT_LEN {
            return Err(malformed());
        }

        let mut octets = [0u8; 6];
        for (i, group) in text.split(':').enumerate() {
            if i >= 6 || group.len() != 2 {
                return Err(malformed());
            }
            // Lowercase hex digits only; from_str_radix alone would also
            // accept uppercase and a leading sign.
            if !group
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
            {
                return Err(malformed());
            }
            octets[i] = u8::from_str_radix(group, 16).map_err(|_| malformed())?;
        }

        Ok(Address(octets))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = &self.0;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            o[0], o[1], o[2], o[3], o[4], o[5]
        )
    }
}

impl FromStr for Address {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Address::parse(s)
    }
}

impl From<[u8; 6]> for Address {
    fn from(octets: [u8; 6]) -> Self {
        Address(octets)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Address::parse(&text).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trip() {
        for octets in [
            [0u8; 6],
            [0xFF; 6],
            [0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF],
            [0x00, 0x01, 0x0A, 0x10, 0x7F, 0x80],
        ] {
            let addr = Address::new(octets);
            assert_eq!(Address::parse(&addr.to_string()).unwrap(), addr);
        }
    }

    #[test]
    fn test_canonical_form() {
        assert_eq!(
            Address::new([0xAA, 0xBB, 0xCC, 0xDD, 0xEE, 0xFF]).to_string(),
            "aa:bb:cc:dd:ee:ff"
        );
        assert_eq!(Address::new([0; 6]).to_string(), "00:00:00:00:00:00");
    }

    #[test]
    fn test_malformed_rejected() {
        for bad in [
            "",
            "aa:bb:cc:dd:ee",       // too few groups
            "aa:bb:cc:dd:ee:ff:00", // too many groups
            "aa:bb:cc:dd:ee:f",     // short group
            "aabbccddeeff",         // no separators
            "AA:BB:CC:DD:EE:FF",    // uppercase
            "aa-bb-cc-dd-ee-ff",    // wrong separator
            "gg:bb:cc:dd:ee:ff",    // not hex
            "+f:bb:cc:dd:ee:ff",    // sign accepted by from_str_radix
            "aa:bb:cc:dd:ee:ff ",   // trailing junk
        ] {
            assert!(Address::parse(bad).is_err(), "accepted {:?}", bad);
        }
    }
}
