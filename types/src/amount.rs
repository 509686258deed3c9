//! Token amount type.
//!
//! Amounts are decimals in display units (e.g. `1.5` ETH). The chain itself
//! counts in base units with 18 fractional digits; `to_wei`/`from_wei` convert
//! between the two without going through floating point.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// A token amount in display units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenAmount(Decimal);

impl TokenAmount {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Fractional digits of the native token's base unit.
    pub const DECIMALS: u32 = 18;

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Parse a plain decimal string such as `"10"`, `"0.25"` or `".5"`.
    ///
    /// Exponents, separators and whitespace are rejected.
    pub fn parse(raw: &str) -> Result<Self, TypesError> {
        let unsigned = raw.strip_prefix('-').unwrap_or(raw);
        let mut digits = 0usize;
        let mut dots = 0usize;
        for c in unsigned.chars() {
            match c {
                '0'..='9' => digits += 1,
                '.' => dots += 1,
                _ => return Err(TypesError::InvalidAmount(raw.to_string())),
            }
        }
        if digits == 0 || dots > 1 {
            return Err(TypesError::InvalidAmount(raw.to_string()));
        }

        let mut normalized = raw.trim_end_matches('.').to_string();
        if unsigned.starts_with('.') {
            let sign = if raw.starts_with('-') { "-" } else { "" };
            normalized = format!("{sign}0{}", unsigned.trim_end_matches('.'));
        }

        Decimal::from_str(&normalized)
            .map(Self)
            .map_err(|_| TypesError::AmountOverflow(raw.to_string()))
    }

    /// Convert from base units (wei).
    pub fn from_wei(wei: u128) -> Result<Self, TypesError> {
        let mantissa =
            i128::try_from(wei).map_err(|_| TypesError::AmountOverflow(wei.to_string()))?;
        Decimal::try_from_i128_with_scale(mantissa, Self::DECIMALS)
            .map(|d| Self(d.normalize()))
            .map_err(|_| TypesError::AmountOverflow(wei.to_string()))
    }

    /// Convert to base units (wei).
    pub fn to_wei(&self) -> Result<u128, TypesError> {
        let d = self.0.normalize();
        if d.is_sign_negative() && !d.is_zero() {
            return Err(TypesError::InvalidAmount(d.to_string()));
        }
        let scale = d.scale();
        if scale > Self::DECIMALS {
            return Err(TypesError::TooPrecise {
                raw: d.to_string(),
                max: Self::DECIMALS,
            });
        }
        d.mantissa()
            .unsigned_abs()
            .checked_mul(10u128.pow(Self::DECIMALS - scale))
            .ok_or_else(|| TypesError::AmountOverflow(d.to_string()))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl FromStr for TokenAmount {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_decimals() {
        assert_eq!(TokenAmount::parse("10").unwrap().to_string(), "10");
        assert_eq!(TokenAmount::parse("0.25").unwrap().to_string(), "0.25");
        assert_eq!(TokenAmount::parse(".5").unwrap().to_string(), "0.5");
        assert_eq!(TokenAmount::parse("5.").unwrap().to_string(), "5");
        assert!(TokenAmount::parse("-3").unwrap().is_negative());
    }

    #[test]
    fn rejects_non_plain_input() {
        for raw in ["", ".", "-", "1e5", "1_000", " 1", "1.2.3", "abc", "0x10"] {
            assert!(TokenAmount::parse(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn wei_conversion() {
        let one = TokenAmount::parse("1").unwrap();
        assert_eq!(one.to_wei().unwrap(), 1_000_000_000_000_000_000);
        let half = TokenAmount::from_wei(500_000_000_000_000_000).unwrap();
        assert_eq!(half.to_string(), "0.5");
    }

    #[test]
    fn to_wei_rejects_excess_precision() {
        let tiny = TokenAmount::parse("0.0000000000000000001").unwrap();
        assert!(matches!(tiny.to_wei(), Err(TypesError::TooPrecise { .. })));
    }

    #[test]
    fn to_wei_rejects_negative() {
        let neg = TokenAmount::parse("-1").unwrap();
        assert!(neg.to_wei().is_err());
    }

    #[test]
    fn ordering_is_numeric() {
        let a = TokenAmount::parse("10").unwrap();
        let b = TokenAmount::parse("9.99").unwrap();
        assert!(a > b);
        assert_eq!(TokenAmount::parse("10.0").unwrap(), a);
    }
}
