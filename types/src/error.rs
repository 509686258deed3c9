//! Error type for parsing the shared value types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid chain address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("amount has more than {max} fractional digits: {raw}")]
    TooPrecise { raw: String, max: u32 },

    #[error("amount out of range: {0}")]
    AmountOverflow(String),

    #[error("invalid transaction hash: {0}")]
    InvalidTxHash(String),

    #[error("unknown chain: {0}")]
    UnknownChain(String),
}
