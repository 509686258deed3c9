//! Display formatting for balances and amounts.

use luvpay_types::TokenAmount;
use rust_decimal::RoundingStrategy;

/// Fractional digits shown for balances.
pub const DISPLAY_DECIMALS: u32 = 4;

/// Format an amount for display: thousands grouped with commas, at most
/// [`DISPLAY_DECIMALS`] fractional digits, truncated toward zero so a
/// displayed balance is never more than what is held.
pub fn format_number(amount: &TokenAmount) -> String {
    let truncated = amount
        .value()
        .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::ToZero)
        .normalize()
        .to_string();

    let (sign, unsigned) = match truncated.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", truncated.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(raw: &str) -> String {
        format_number(&TokenAmount::parse(raw).unwrap())
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(fmt("1234567"), "1,234,567");
        assert_eq!(fmt("999"), "999");
        assert_eq!(fmt("1000"), "1,000");
    }

    #[test]
    fn truncates_fraction() {
        assert_eq!(fmt("25.123456"), "25.1234");
        assert_eq!(fmt("0.99999"), "0.9999");
        assert_eq!(fmt("1.50"), "1.5");
    }

    #[test]
    fn keeps_sign() {
        assert_eq!(fmt("-1234.5"), "-1,234.5");
    }
}
