//! Nullable infrastructure for deterministic testing.
//!
//! Every external collaborator of the payment flow (clock, wallet session,
//! profile resolver) has a test-friendly implementation here that:
//! - Returns deterministic values
//! - Can be controlled programmatically
//! - Records calls for assertions
//! - Never touches the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod profiles;
pub mod session;

pub use clock::NullClock;
pub use profiles::NullProfileResolver;
pub use session::{NullWalletSession, TransferCall};
