//! Input validation for the address and amount fields.
//!
//! Address validation is shape-only (length and `0x` prefix). There is no
//! checksum or on-chain existence check.

use luvpay_types::{ChainAddress, TokenAmount};

use crate::error::{Field, ValidationError};
use crate::state::AmountSelection;

/// Longest amount input accepted, bounding decimal precision.
pub const MAX_AMOUNT_INPUT_LEN: usize = 18;

/// Validate a recipient address typed by the user (or reported as a
/// profile owner) against the session's own address.
pub fn validate_address(
    candidate: &str,
    session_address: &ChainAddress,
) -> Result<ChainAddress, ValidationError> {
    if candidate.trim().is_empty() {
        return Err(ValidationError::EmptyInput(Field::Address));
    }
    if session_address.matches(candidate) {
        return Err(ValidationError::SelfPayment);
    }
    ChainAddress::parse(candidate).map_err(|_| ValidationError::MalformedAddress)
}

/// Validate an amount against the available balance.
pub fn validate_amount(
    raw: &str,
    available: &TokenAmount,
) -> Result<AmountSelection, ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::EmptyInput(Field::Amount));
    }
    if raw.len() > MAX_AMOUNT_INPUT_LEN {
        return Err(ValidationError::MalformedAmount);
    }
    let numeric = TokenAmount::parse(raw).map_err(|_| ValidationError::MalformedAmount)?;
    if numeric.is_zero() {
        return Err(ValidationError::EmptyInput(Field::Amount));
    }
    if numeric > *available {
        return Err(ValidationError::InsufficientFunds {
            requested: numeric,
            available: *available,
        });
    }
    if numeric.is_negative() {
        return Err(ValidationError::NegativeAmount);
    }
    Ok(AmountSelection {
        raw: raw.to_string(),
        numeric,
    })
}

/// Whether a keystroke's resulting amount text may replace the draft.
///
/// Negative input and input longer than [`MAX_AMOUNT_INPUT_LEN`] are
/// dropped at the field, so the previous draft stays.
pub fn accepts_amount_input(raw: &str) -> bool {
    !raw.starts_with('-') && raw.len() <= MAX_AMOUNT_INPUT_LEN
}
