//! Profile resolver contract.

use async_trait::async_trait;
use luvpay_types::{ChainAddress, Profile};

use crate::error::WalletError;

#[async_trait]
pub trait ProfileResolver: Send + Sync {
    /// Profiles whose handle matches a partial query.
    async fn search_profiles(&self, query: &str) -> Result<Vec<Profile>, WalletError>;

    /// Profiles owned by `address`.
    async fn profiles_owned_by(&self, address: &ChainAddress) -> Result<Vec<Profile>, WalletError>;
}
