//! Wallet core library for LUV NFT Pay.
//!
//! Defines the contracts the payment flow consumes and ships network
//! adapters for them:
//! - [`WalletSession`]: connected address, balances, transfers
//! - [`ProfileResolver`]: social profile search and ownership lookup
//! - [`RpcWalletSession`]: Ethereum JSON-RPC for node-managed accounts
//! - [`LensClient`]: Lens Protocol GraphQL resolver

pub mod error;
pub mod lens;
pub mod profiles;
pub mod rpc;
pub mod session;

pub use error::WalletError;
pub use lens::{LensClient, DEFAULT_LENS_API_URL};
pub use profiles::ProfileResolver;
pub use rpc::{RpcClient, RpcWalletSession};
pub use session::{Balance, TransferReceipt, WalletSession};
