//! Duration value parsing.
//!
//! String values take a unit suffix: `ms`, `s`, `m`, `h`, `d`. A bare number
//! (string or numeric node) is milliseconds.

use std::time::Duration;

/// Parse a duration literal. Returns `None` on malformed input.
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let split = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, suffix) = trimmed.split_at(split);
    let amount: u64 = digits.parse().ok()?;

    let duration = match suffix.trim() {
        "" | "ms" => Duration::from_millis(amount),
        "s" => Duration::from_secs(amount),
        "m" => Duration::from_secs(amount.checked_mul(60)?),
        "h" => Duration::from_secs(amount.checked_mul(3600)?),
        "d" => Duration::from_secs(amount.checked_mul(86_400)?),
        _ => return None,
    };
    Some(duration)
}
