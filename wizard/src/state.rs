//! Wizard state: phases, selections and submission outcome.

use std::fmt;

use luvpay_types::{ChainAddress, TokenAmount, TxHash};
use serde::{Deserialize, Serialize};

/// The four top-level phases of the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    Recipient,
    Amount,
    Confirm,
    Send,
}

impl Phase {
    pub fn index(&self) -> u8 {
        match self {
            Self::Recipient => 0,
            Self::Amount => 1,
            Self::Confirm => 2,
            Self::Send => 3,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Recipient => "Who are you paying?",
            Self::Amount => "How much are you paying?",
            Self::Confirm => "Ready to send?",
            Self::Send => "Sending Payment",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Recipient => "Who's the lucky recipient?",
            Self::Amount => "How much do you want to send?",
            Self::Confirm => "Review your payment and confirm.",
            Self::Send => "Please wait while we send your payment.",
        }
    }
}

/// How the recipient is being chosen in phase 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecipientMode {
    Address,
    Profile,
}

impl RecipientMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Address => "Wallet Address",
            Self::Profile => "Lens Profile",
        }
    }
}

/// The chosen recipient. The address is always well-formed and never the
/// session's own address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecipientSelection {
    Address {
        value: ChainAddress,
    },
    Profile {
        profile_id: String,
        resolved_address: ChainAddress,
        display_name: String,
    },
}

impl RecipientSelection {
    pub fn address(&self) -> &ChainAddress {
        match self {
            Self::Address { value } => value,
            Self::Profile {
                resolved_address, ..
            } => resolved_address,
        }
    }

    /// Handle of the profile owner, when paying a profile.
    pub fn profile_name(&self) -> Option<&str> {
        match self {
            Self::Address { .. } => None,
            Self::Profile { display_name, .. } => Some(display_name),
        }
    }
}

/// A validated amount: positive, at most 18 input characters, and no more
/// than the balance at validation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountSelection {
    /// Exactly what the user typed; this string is what gets transferred.
    pub raw: String,
    pub numeric: TokenAmount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmissionResult {
    Pending,
    Success { tx_hash: TxHash },
    Failure { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardState {
    pub phase: Phase,
    pub recipient_mode: Option<RecipientMode>,
    pub recipient: Option<RecipientSelection>,
    pub amount: Option<AmountSelection>,
    pub submission: Option<SubmissionResult>,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Recipient,
            recipient_mode: None,
            recipient: None,
            amount: None,
            submission: None,
        }
    }

    /// The fine-grained step, splitting phase 0 by mode and phase 3 by outcome.
    pub fn step(&self) -> Step {
        match self.phase {
            Phase::Recipient => match self.recipient_mode {
                None => Step::SelectRecipientMode,
                Some(RecipientMode::Address) => Step::EnterAddress,
                Some(RecipientMode::Profile) => Step::SearchProfile,
            },
            Phase::Amount => Step::EnterAmount,
            Phase::Confirm => Step::Confirm,
            Phase::Send => match self.submission {
                Some(SubmissionResult::Success { .. }) => Step::Succeeded,
                Some(SubmissionResult::Failure { .. }) => Step::Failed,
                _ => Step::Submitting,
            },
        }
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

/// Every state the user can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    SelectRecipientMode,
    EnterAddress,
    SearchProfile,
    EnterAmount,
    Confirm,
    Submitting,
    Succeeded,
    Failed,
}

impl Step {
    pub fn phase(&self) -> Phase {
        match self {
            Self::SelectRecipientMode | Self::EnterAddress | Self::SearchProfile => {
                Phase::Recipient
            }
            Self::EnterAmount => Phase::Amount,
            Self::Confirm => Phase::Confirm,
            Self::Submitting | Self::Succeeded | Self::Failed => Phase::Send,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SelectRecipientMode => "recipient mode selection",
            Self::EnterAddress => "address entry",
            Self::SearchProfile => "profile search",
            Self::EnterAmount => "amount entry",
            Self::Confirm => "confirmation",
            Self::Submitting => "submission",
            Self::Succeeded => "payment success",
            Self::Failed => "payment failure",
        };
        f.write_str(name)
    }
}
