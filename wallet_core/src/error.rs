use luvpay_types::TypesError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("no wallet connected")]
    NotConnected,

    #[error("unsupported token: {0}")]
    UnsupportedToken(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("node RPC error: {0}")]
    Rpc(String),

    #[error("transaction {0} reverted")]
    Reverted(String),

    #[error("profile resolver error: {0}")]
    Resolver(String),

    #[error("{0}")]
    Other(String),
}

impl From<TypesError> for WalletError {
    fn from(err: TypesError) -> Self {
        match err {
            TypesError::InvalidAddress(raw) => Self::InvalidAddress(raw),
            TypesError::InvalidAmount(_)
            | TypesError::TooPrecise { .. }
            | TypesError::AmountOverflow(_) => Self::InvalidAmount(err.to_string()),
            other => Self::Other(other.to_string()),
        }
    }
}
