// Input normalization and display helpers shared by the engine and the CLI.
use std::str::FromStr;

/// Turns raw user text into an amount. Empty, unparsable, NaN and infinite
/// input all become 0, so stored bill/tip/expense values are always finite.
pub fn parse_amount(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    match f64::from_str(trimmed) {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Same as [`parse_amount`] for values that arrive as numbers rather than text.
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

// Renders e.g. "$55.00" or "-$10.50". A value that rounds to zero never gets a sign.
pub fn format_money(value: f64, symbol: &str, decimals: usize) -> String {
    let magnitude = format!("{:.*}", decimals, finite_or_zero(value).abs());
    let negative = value < 0.0 && magnitude.chars().any(|c| c.is_ascii_digit() && c != '0');
    if negative {
        format!("-{}{}", symbol, magnitude)
    } else {
        format!("{}{}", symbol, magnitude)
    }
}
