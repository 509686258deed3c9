//! Chain address type with `0x` prefix.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::error::TypesError;

/// An EVM-style account address, always `0x` followed by 40 characters.
///
/// Only the shape is checked. There is no checksum or on-chain existence
/// validation.
#[derive(Clone, Debug, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChainAddress(String);

impl ChainAddress {
    /// The standard prefix for all chain addresses.
    pub const PREFIX: &'static str = "0x";

    /// Total length of a well-formed address, prefix included.
    pub const LEN: usize = 42;

    /// Parse an address, checking length and prefix.
    pub fn parse(raw: impl Into<String>) -> Result<Self, TypesError> {
        let s = raw.into();
        if !Self::is_well_formed(&s) {
            return Err(TypesError::InvalidAddress(s));
        }
        Ok(Self(s))
    }

    /// Whether `raw` has the shape of a chain address.
    pub fn is_well_formed(raw: &str) -> bool {
        raw.len() == Self::LEN && raw.starts_with(Self::PREFIX)
    }

    /// Return the raw address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against a raw string.
    pub fn matches(&self, raw: &str) -> bool {
        self.0.eq_ignore_ascii_case(raw)
    }

    /// Shortened form for display, e.g. `0x1234…abcd`.
    pub fn short(&self) -> String {
        match (self.0.get(..6), self.0.get(Self::LEN - 4..)) {
            (Some(head), Some(tail)) => format!("{head}…{tail}"),
            _ => self.0.clone(),
        }
    }
}

// Hex addresses are case-insensitive; mixed-case only encodes a checksum.
impl PartialEq for ChainAddress {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Hash for ChainAddress {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
    }
}

impl fmt::Display for ChainAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChainAddress {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ChainAddress {
    type Error = TypesError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

impl From<ChainAddress> for String {
    fn from(address: ChainAddress) -> Self {
        address.0
    }
}
