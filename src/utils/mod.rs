//! Formatting utilities
//!
//! Currency and percentage display using Brazilian locale conventions:
//! `.` for thousands, `,` for decimals.

use rust_decimal::Decimal;

/// Format a number with two decimals in Brazilian locale: "1.234,56"
pub fn format_decimal_br(value: Decimal) -> String {
    let negative = value < Decimal::ZERO;
    let rounded = format!("{:.2}", value.abs());
    let (integer, decimals) = rounded.split_once('.').unwrap_or((&rounded, "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    let digits: Vec<char> = integer.chars().collect();
    for (i, ch) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(*ch);
    }

    format!("{}{},{}", if negative { "-" } else { "" }, grouped, decimals)
}

/// Format as Brazilian Real: "R$ 1.234,56"
pub fn format_currency(value: Decimal) -> String {
    format!("R$ {}", format_decimal_br(value))
}

/// Format a percentage with an explicit sign for positive values: "+25,00%"
pub fn format_signed_percent(value: Decimal) -> String {
    let sign = if value > Decimal::ZERO { "+" } else { "" };
    format!("{}{}%", sign, format_decimal_br(value))
}

/// Format a 0..=1 share as a percentage: "33,33%"
pub fn format_share(share: Decimal) -> String {
    format!("{}%", format_decimal_br(share * Decimal::from(100)))
}
