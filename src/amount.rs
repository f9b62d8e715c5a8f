// Amount parsing and display
//
// Entry amounts are parsed strictly: text that is not a decimal number never
// becomes an Entry. Income is read leniently: anything unparseable counts as zero.

use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use crate::error::{LedgerError, Result};

/// Parse raw field text as a decimal amount.
///
/// Accepted: optional sign, digits, optional fraction, optional exponent
/// (`"1200"`, `"-3.5"`, `".5"`, `"1e3"`). Whitespace, separators, currency
/// symbols and non-finite words are rejected as-is; nothing is trimmed.
pub fn parse_amount(raw: &str) -> Result<Decimal> {
    let invalid = || LedgerError::InvalidAmount {
        raw: raw.to_string(),
    };

    if !is_decimal_literal(raw) {
        return Err(invalid());
    }

    match raw.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => parse_scientific(mantissa, exponent).ok_or_else(invalid),
        None => Decimal::from_str(raw).map_err(|_| invalid()),
    }
}

/// Most integer digits a `Decimal` can hold
const MAX_INTEGER_DIGITS: i64 = 29;

/// Rewrite `mantissa × 10^exponent` in fixed-point form and parse that, so both
/// spellings of a number round to 28 places the same way.
fn parse_scientific(mantissa: &str, exponent: &str) -> Option<Decimal> {
    let (negative, unsigned) = split_sign(mantissa);
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    let (exp_negative, exp_digits) = split_sign(exponent);
    let magnitude = exp_digits.parse::<i64>().unwrap_or(i64::MAX);
    let exp = if exp_negative { -magnitude } else { magnitude };

    let digits = format!("{int_part}{frac_part}");
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Some(Decimal::ZERO);
    }

    // Decimal point position counted from the first significant digit
    let leading_zeros = (digits.len() - significant.len()) as i64;
    let point = (int_part.len() as i64 - leading_zeros).saturating_add(exp);
    if point > MAX_INTEGER_DIGITS {
        return None;
    }
    // Below 1e-29 everything rounds to zero at 28 places
    if point < -MAX_INTEGER_DIGITS {
        return Some(Decimal::ZERO);
    }

    let len = significant.len() as i64;
    let mut text = String::with_capacity(significant.len() + 32);
    if negative {
        text.push('-');
    }
    if point <= 0 {
        text.push_str("0.");
        text.push_str(&"0".repeat((-point) as usize));
        text.push_str(significant);
    } else if point >= len {
        text.push_str(significant);
        text.push_str(&"0".repeat((point - len) as usize));
    } else {
        let (whole, fraction) = significant.split_at(point as usize);
        text.push_str(whole);
        text.push('.');
        text.push_str(fraction);
    }

    Decimal::from_str(&text).ok()
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

/// `a + b`, pinned to `Decimal::MAX`/`MIN` instead of overflowing
pub fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(if b.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

/// `a - b`, pinned to `Decimal::MAX`/`MIN` instead of overflowing
pub fn saturating_sub(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or(if b.is_sign_negative() {
        Decimal::MAX
    } else {
        Decimal::MIN
    })
}

/// Lenient income reading: absent or unparseable text is zero.
pub fn parse_income(raw: Option<&str>) -> Decimal {
    raw.and_then(|text| parse_amount(text).ok())
        .unwrap_or(Decimal::ZERO)
}

/// Format for display: two fraction digits, symbol prefixed, sign first.
pub fn format_money(value: Decimal, symbol: &str) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{}{:.2}", symbol, rounded.abs())
    } else {
        format!("{}{:.2}", symbol, rounded.abs())
    }
}

/// Shape check: `[+-]? (digits [. digits?] | . digits) ([eE] [+-]? digits)?`
fn is_decimal_literal(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if matches!(bytes.get(i), Some(b'+') | Some(b'-')) {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}
