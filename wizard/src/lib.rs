//! Send-payment wizard for LUV NFT Pay.
//!
//! A single-user, four-phase state machine:
//!
//! 0. pick a recipient, either a raw address or a resolved social profile
//! 1. enter an amount, checked against the available balance
//! 2. review and confirm (or cancel back to the start)
//! 3. submit the transfer and land on success or failure (with retry)
//!
//! The wizard owns no I/O. Balance, profile search results and transfer
//! outcomes are fed in by the caller; the async helpers in [`wizard`] wire
//! it to a [`WalletSession`](luvpay_wallet_core::WalletSession) and
//! [`ProfileResolver`](luvpay_wallet_core::ProfileResolver).

pub mod error;
pub mod search;
pub mod state;
pub mod validation;
pub mod wizard;

pub use error::{Event, Field, ValidationError, WizardError};
pub use search::{ProfileSearch, SearchRequest, SearchView, DEFAULT_SEARCH_DEBOUNCE_MS};
pub use state::{
    AmountSelection, Phase, RecipientMode, RecipientSelection, Step, SubmissionResult,
    WizardState,
};
pub use validation::{accepts_amount_input, validate_address, validate_amount, MAX_AMOUNT_INPUT_LEN};
pub use wizard::{BackOutcome, ConfirmSummary, PaymentWizard, TransferRequest};
