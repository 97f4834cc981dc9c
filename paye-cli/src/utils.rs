use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a string cannot be parsed as a percentage.
#[derive(Debug, Error)]
#[error("invalid percentage '{input}': {source}")]
pub struct ParsePercentError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Parses a percentage such as `"8"`, `"7.5"` or `"8%"`.
///
/// The value is not range-checked; the estimator clamps pension rates
/// itself. Empty input is 0.
pub fn parse_percent(s: &str) -> Result<Decimal, ParsePercentError> {
    let normalized = s.trim().trim_end_matches('%').trim();
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid percentage: {}", e);
        ParsePercentError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses an on/off switch. Returns `None` when the value is not recognised.
pub fn parse_switch(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "on" | "1" => Some(true),
        "false" | "no" | "n" | "off" | "0" => Some(false),
        _ => None,
    }
}
