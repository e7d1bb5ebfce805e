//! Input validation for both submission modes.
//!
//! The feature form is filtered at keystroke level, so submission-time
//! validation stays permissive: empty or malformed numeric text parses to
//! 0 rather than being rejected.

use crate::model::{FeatureForm, ParsedFeatures};
use thiserror::Error;

/// Client-side failures that never reach the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid Instagram username")]
    EmptyInput,
    #[error("Feature values cannot be negative")]
    NegativeValue,
}

/// Trim the handle and reject it when nothing remains.
pub fn validate_handle(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    Ok(trimmed.to_string())
}

/// Keystroke filter for the numeric form fields: empty or decimal digits
/// only. A rejected edit leaves the buffer unchanged.
pub fn feature_field_ok(raw: &str) -> bool {
    raw.chars().all(|c| c.is_ascii_digit())
}

fn parse_or_zero(raw: &str) -> i64 {
    raw.parse::<i64>().unwrap_or(0)
}

/// Parse the feature form at submission time. Unreachable through the
/// keystroke filter, the negativity check still runs because programmatic
/// state changes bypass the filter.
pub fn validate_feature_set(form: &FeatureForm) -> Result<ParsedFeatures, ValidationError> {
    let parsed = ParsedFeatures {
        follower_count: parse_or_zero(&form.follower_count),
        following_count: parse_or_zero(&form.following_count),
        media_count: parse_or_zero(&form.media_count),
        username_digit_count: parse_or_zero(&form.username_digit_count),
        username_length: parse_or_zero(&form.username_length),
    };
    ensure_non_negative(&parsed)?;
    Ok(parsed)
}

/// Shared non-negativity gate, also used for feature values supplied as
/// CLI flags (which skip the keystroke filter entirely).
pub fn ensure_non_negative(parsed: &ParsedFeatures) -> Result<(), ValidationError> {
    if parsed.values().iter().any(|v| *v < 0) {
        return Err(ValidationError::NegativeValue);
    }
    Ok(())
}
