//! Fixed-point token amounts
//!
//! Balances are integers in the smallest denomination; human-facing amounts
//! are scaled by `10^decimals`.

use thiserror::Error;

/// Amount in the smallest indivisible denomination
pub type Balance = u128;

/// Decimal exponent every ledger is constructed with
pub const TOKEN_DECIMALS: u8 = 18;

/// One whole token in fixed point representation
pub const ONE_TOKEN: Balance = 10u128.pow(TOKEN_DECIMALS as u32);

/// Unit conversion errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitsError {
    #[error("Empty amount")]
    Empty,
    #[error("Invalid amount: {0}")]
    InvalidDigits(String),
    #[error("Too many fractional digits: {got}, at most {max}")]
    TooPrecise { got: usize, max: u8 },
    #[error("Amount overflows the balance range: {0}")]
    Overflow(String),
}

/// `10^decimals`, or `None` when it does not fit a [`Balance`]
pub fn scale(decimals: u8) -> Option<Balance> {
    10u128.checked_pow(decimals as u32)
}

/// Serde adapter writing balances as decimal strings.
///
/// JSON numbers above `u64::MAX` do not survive every serde path, and every
/// interesting balance at 18 decimals is above it.
pub mod amount_string {
    use super::Balance;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Balance, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Balance, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}

/// Parse a decimal string like `"100"` or `"1.5"` into base units.
pub fn parse_units(amount: &str, decimals: u8) -> Result<Balance, UnitsError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(UnitsError::Empty);
    }

    let (whole, fraction) = match amount.split_once('.') {
        Some((w, f)) => (w, f),
        None => (amount, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(UnitsError::InvalidDigits(amount.to_string()));
    }
    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return Err(UnitsError::InvalidDigits(amount.to_string()));
    }
    if fraction.len() > decimals as usize {
        return Err(UnitsError::TooPrecise {
            got: fraction.len(),
            max: decimals,
        });
    }

    let overflow = || UnitsError::Overflow(amount.to_string());
    let base = scale(decimals).ok_or_else(overflow)?;

    let whole_value: Balance = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| overflow())?
    };

    // Right-pad the fraction to exactly `decimals` digits
    let fraction_value: Balance = if fraction.is_empty() {
        0
    } else {
        let padded = format!("{:0<width$}", fraction, width = decimals as usize);
        padded.parse().map_err(|_| overflow())?
    };

    whole_value
        .checked_mul(base)
        .and_then(|v| v.checked_add(fraction_value))
        .ok_or_else(overflow)
}

/// Render base units as a decimal string, trimming trailing zeros.
pub fn format_units(value: Balance, decimals: u8) -> String {
    if decimals == 0 {
        return value.to_string();
    }
    let digits = format!("{:0>width$}", value, width = decimals as usize + 1);
    let (whole, fraction) = digits.split_at(digits.len() - decimals as usize);
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, fraction)
    }
}

/// `n` whole tokens in base units.
///
/// Panics on overflow; meant for literals in scripts and tests.
pub fn tokens(n: u128) -> Balance {
    n.checked_mul(ONE_TOKEN)
        .unwrap_or_else(|| panic!("{} tokens overflow the balance range", n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_whole_tokens() {
        assert_eq!(parse_units("100", 18).unwrap(), 100 * ONE_TOKEN);
        assert_eq!(
            parse_units("1000000000000", 18).unwrap(),
            1_000_000_000_000u128 * ONE_TOKEN
        );
        assert_eq!(parse_units("0", 18).unwrap(), 0);
    }

    #[test]
    fn test_parse_fractions() {
        assert_eq!(parse_units("1.5", 18).unwrap(), 1_500_000_000_000_000_000);
        assert_eq!(parse_units(".25", 2).unwrap(), 25);
        assert_eq!(parse_units("7.", 2).unwrap(), 700);
        assert_eq!(parse_units("0.000000000000000001", 18).unwrap(), 1);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_units("", 18), Err(UnitsError::Empty));
        assert!(matches!(parse_units(".", 18), Err(UnitsError::InvalidDigits(_))));
        assert!(matches!(parse_units("-1", 18), Err(UnitsError::InvalidDigits(_))));
        assert!(matches!(parse_units("1e18", 18), Err(UnitsError::InvalidDigits(_))));
        assert!(matches!(
            parse_units("0.123", 2),
            Err(UnitsError::TooPrecise { got: 3, max: 2 })
        ));
    }

    #[test]
    fn test_parse_overflow() {
        // u128::MAX is ~3.4e38, so 1e21 whole tokens at 18 decimals overflows
        assert!(matches!(
            parse_units("1000000000000000000000", 18),
            Err(UnitsError::Overflow(_))
        ));
    }

    #[test]
    fn test_format_units() {
        assert_eq!(format_units(tokens(100), 18), "100");
        assert_eq!(format_units(1_500_000_000_000_000_000, 18), "1.5");
        assert_eq!(format_units(1, 18), "0.000000000000000001");
        assert_eq!(format_units(0, 18), "0");
        assert_eq!(format_units(42, 0), "42");
    }

    #[test]
    fn test_amount_string_serde() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Wrapped {
            #[serde(with = "amount_string")]
            value: Balance,
        }

        let json = serde_json::to_string(&Wrapped { value: tokens(100) }).unwrap();
        assert_eq!(json, r#"{"value":"100000000000000000000"}"#);
        let back: Wrapped = serde_json::from_str(&json).unwrap();
        assert_eq!(back.value, tokens(100));
        assert!(serde_json::from_str::<Wrapped>(r#"{"value":"-1"}"#).is_err());
    }

    #[test]
    fn test_tokens_helper() {
        assert_eq!(tokens(999_999_999_900), 999_999_999_900 * ONE_TOKEN);
    }
}
