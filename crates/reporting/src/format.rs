//! Value formatting shared by every renderer.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to `dp` places, half away from zero, normalising negative zero.
fn round(value: Decimal, dp: u32) -> Decimal {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() { Decimal::ZERO } else { rounded }
}

/// `$1,234.50`, or `-$1,234.50` for negative amounts.
pub fn currency(value: Decimal, symbol: &str) -> String {
    let rounded = round(value, 2);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let digits = format!("{:.2}", rounded.abs());
    format!("{}{}{}", sign, symbol, group_thousands(&digits))
}

/// `42.86%`
pub fn percentage(value: Decimal) -> String {
    format!("{:.2}%", round(value, 2))
}

/// `1.25`
pub fn ratio(value: Decimal) -> String {
    format!("{:.2}", round(value, 2))
}

/// `2.5`
pub fn one_decimal(value: Decimal) -> String {
    format!("{:.1}", round(value, 1))
}

/// `1,500`
pub fn count(value: u32) -> String {
    group_thousands(&value.to_string())
}

/// Inserts `,` separators into the integer part of an unsigned number string.
fn group_thousands(digits: &str) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}
