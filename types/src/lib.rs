//! Fundamental types for LUV NFT Pay.
//!
//! This crate defines the value types shared across every other crate in the
//! workspace: addresses, amounts, transaction hashes, chains, tokens,
//! profiles and timestamps.

pub mod address;
pub mod amount;
pub mod chain;
pub mod error;
pub mod hash;
pub mod profile;
pub mod time;
pub mod token;

pub use address::ChainAddress;
pub use amount::TokenAmount;
pub use chain::Chain;
pub use error::TypesError;
pub use hash::TxHash;
pub use profile::Profile;
pub use time::Timestamp;
pub use token::TokenId;
