use std::fmt;

use luvpay_types::TokenAmount;
use thiserror::Error;

use crate::state::Step;

/// Which input field a validation error belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Address,
    Amount,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address => write!(f, "address"),
            Self::Amount => write!(f, "amount"),
        }
    }
}

/// Input errors. Shown inline next to the field; never leave the phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter an {0}")]
    EmptyInput(Field),

    #[error("You can't pay yourself")]
    SelfPayment,

    #[error("Invalid address")]
    MalformedAddress,

    #[error("Invalid amount")]
    MalformedAmount,

    #[error("Insufficient funds")]
    InsufficientFunds {
        requested: TokenAmount,
        available: TokenAmount,
    },

    #[error("Invalid amount")]
    NegativeAmount,
}

/// User events the wizard reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    ChooseMode,
    SubmitAddress,
    EditSearch,
    PickCandidate,
    SubmitAmount,
    Cancel,
    Confirm,
    Settle,
    Retry,
    Back,
    GoHome,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ChooseMode => "choose a recipient mode",
            Self::SubmitAddress => "submit an address",
            Self::EditSearch => "search profiles",
            Self::PickCandidate => "pick a profile",
            Self::SubmitAmount => "submit an amount",
            Self::Cancel => "cancel",
            Self::Confirm => "confirm",
            Self::Settle => "settle a transfer",
            Self::Retry => "retry",
            Self::Back => "go back",
            Self::GoHome => "go home",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("cannot {event} during {step}")]
    InvalidTransition { event: Event, step: Step },
}
