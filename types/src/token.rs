//! Token identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::ChainAddress;

/// Which token a balance query or transfer refers to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenId {
    /// The chain's base currency.
    Native,
    /// A contract-issued token.
    Contract(ChainAddress),
}

impl TokenId {
    /// Sentinel address SDKs use to mean "the native token".
    pub const NATIVE_SENTINEL: &'static str = "0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE";

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "{}", Self::NATIVE_SENTINEL),
            Self::Contract(address) => write!(f, "{address}"),
        }
    }
}
