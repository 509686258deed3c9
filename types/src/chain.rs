//! Chain identifier.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::TypesError;
use crate::hash::TxHash;

/// Identifies which EVM chain the app pays on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    /// Polygon PoS mainnet.
    Polygon,
    /// Polygon Mumbai testnet.
    Mumbai,
    /// Ethereum mainnet.
    Ethereum,
    /// Ethereum Sepolia testnet.
    Sepolia,
}

impl Chain {
    /// EIP-155 chain id.
    pub fn chain_id(&self) -> u64 {
        match self {
            Self::Polygon => 137,
            Self::Mumbai => 80001,
            Self::Ethereum => 1,
            Self::Sepolia => 11155111,
        }
    }

    /// Symbol of the native (gas) currency.
    pub fn native_symbol(&self) -> &'static str {
        match self {
            Self::Polygon | Self::Mumbai => "MATIC",
            Self::Ethereum | Self::Sepolia => "ETH",
        }
    }

    /// Base URL of the primary block explorer.
    pub fn explorer_url(&self) -> &'static str {
        match self {
            Self::Polygon => "https://polygonscan.com",
            Self::Mumbai => "https://mumbai.polygonscan.com",
            Self::Ethereum => "https://etherscan.io",
            Self::Sepolia => "https://sepolia.etherscan.io",
        }
    }

    /// Public RPC endpoint used when none is configured.
    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Self::Polygon => "https://polygon-rpc.com",
            Self::Mumbai => "https://rpc-mumbai.maticvigil.com",
            Self::Ethereum => "https://eth.llamarpc.com",
            Self::Sepolia => "https://rpc.sepolia.org",
        }
    }

    /// Explorer page for a transaction.
    pub fn tx_url(&self, hash: &TxHash) -> String {
        format!("{}/tx/{}", self.explorer_url(), hash)
    }

    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Polygon => "polygon",
            Self::Mumbai => "mumbai",
            Self::Ethereum => "ethereum",
            Self::Sepolia => "sepolia",
        }
    }
}

impl FromStr for Chain {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "polygon" | "matic" => Ok(Self::Polygon),
            "mumbai" => Ok(Self::Mumbai),
            "ethereum" | "mainnet" => Ok(Self::Ethereum),
            "sepolia" => Ok(Self::Sepolia),
            _ => Err(TypesError::UnknownChain(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_url_joins_explorer_and_hash() {
        let hash = TxHash::new([0xab; 32]);
        let url = Chain::Polygon.tx_url(&hash);
        assert!(url.starts_with("https://polygonscan.com/tx/0xabab"));
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Polygon".parse::<Chain>().unwrap(), Chain::Polygon);
        assert_eq!("sepolia".parse::<Chain>().unwrap(), Chain::Sepolia);
        assert!("solana".parse::<Chain>().is_err());
    }
}
