// ── Display formatting ──
//
// Prices and weights are rendered in the Persian locale: Persian digits,
// `٬` thousands separators, `٫` decimal separator.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rendered for absent prices and weights.
pub const MISSING: &str = "—";

const CURRENCY: &str = "تومان";
const GRAMS: &str = "گرم";
const THOUSANDS_SEPARATOR: char = '\u{066C}';
const DECIMAL_SEPARATOR: char = '\u{066B}';
const MAX_FRACTION_DIGITS: u32 = 3;

/// `Some(1234567)` ⇒ `"۱٬۲۳۴٬۵۶۷ تومان"`, `None` ⇒ `"—"`.
pub fn format_price(price: Option<Decimal>) -> String {
    match price {
        Some(value) => format!("{} {CURRENCY}", format_number(value)),
        None => MISSING.to_owned(),
    }
}

/// `Some(3.5)` ⇒ `"۳٫۵ گرم"`, `None` ⇒ `"—"`.
pub fn format_weight(weight: Option<Decimal>) -> String {
    match weight {
        Some(value) => format!("{} {GRAMS}", format_number(value)),
        None => MISSING.to_owned(),
    }
}

/// Grouped Persian-digit rendering of `value`, at most three fraction digits.
pub fn format_number(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();

    let plain = rounded.abs().to_string();
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };

    let mut out = String::with_capacity(plain.len() * 3);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }

    let len = int_part.len();
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(THOUSANDS_SEPARATOR);
        }
        out.push(persian_digit(c));
    }

    if let Some(frac) = frac_part {
        out.push(DECIMAL_SEPARATOR);
        out.extend(frac.chars().map(persian_digit));
    }

    out
}

/// Unsigned integer in Persian digits, without grouping (badges, quantities).
pub fn persian_digits(n: u64) -> String {
    n.to_string().chars().map(persian_digit).collect()
}

fn persian_digit(c: char) -> char {
    match c {
        '0' => '۰',
        '1' => '۱',
        '2' => '۲',
        '3' => '۳',
        '4' => '۴',
        '5' => '۵',
        '6' => '۶',
        '7' => '۷',
        '8' => '۸',
        '9' => '۹',
        other => other,
    }
}
