use rust_decimal::Decimal;

pub mod automation;
pub mod bookings;
pub mod pricing_rules;
pub mod properties;
pub mod rate_plans;

/// Collapse whitespace runs and strip control characters from one-line input.
pub(crate) fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

/// Normalize an ISO 4217 code: trimmed, uppercased, three ASCII letters.
pub(crate) fn sanitize_currency(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.len() == 3 && trimmed.chars().all(|ch| ch.is_ascii_alphabetic()) {
        Some(trimmed.to_ascii_uppercase())
    } else {
        None
    }
}

/// Parse a decimal entered by the user, rounded to minor-unit precision.
pub(crate) fn parse_decimal(input: &str) -> Option<Decimal> {
    input
        .trim()
        .parse::<Decimal>()
        .ok()
        .map(crate::pricing::round_rate)
}
