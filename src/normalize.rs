//! Display normalization for successful results and failures.

use crate::engine::SubmitError;
use crate::model::{FeatureSnapshot, Mode, Verdict};

/// Derived display score: fewer digits in the handle scores higher.
///
/// The service bounds `username_digit_ratio` to [0, 1]; out-of-range
/// values are passed through uncorrected, matching the original behavior.
pub fn username_score(username_digit_ratio: f64) -> String {
    format!("{:.1}/10", (1.0 - username_digit_ratio) * 10.0)
}

/// Label/value rows for the derived metrics grid. Only handle-mode
/// responses that carry a feature snapshot ever display these.
pub fn metric_rows(features: &FeatureSnapshot) -> Vec<(&'static str, String)> {
    vec![
        ("Followers", features.follower_count.to_string()),
        ("Following", features.following_count.to_string()),
        ("Posts", features.media_count.to_string()),
        (
            "Username Score",
            username_score(features.username_digit_ratio),
        ),
    ]
}

pub fn verdict_headline(verdict: Verdict) -> String {
    format!("This account is likely {}", verdict.as_display())
}

pub fn verdict_detail(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Real => "This account shows characteristics of a genuine Instagram profile.",
        Verdict::Fake => "This account exhibits several signs that may indicate it is fake or spam.",
    }
}

/// Collapse any submission failure into the single user-facing message:
/// a service-supplied detail verbatim when present, otherwise the
/// mode-specific generic fallback.
pub fn error_message(mode: Mode, err: &SubmitError) -> String {
    match err {
        SubmitError::Service {
            detail: Some(detail),
            ..
        } => detail.clone(),
        _ => mode.generic_error().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn username_score_is_deterministic() {
        assert_eq!(username_score(0.3), "7.0/10");
        assert_eq!(username_score(0.0), "10.0/10");
        assert_eq!(username_score(1.0), "0.0/10");
    }

    #[test]
    fn out_of_range_ratio_passes_through() {
        // Known gap carried over from the original: no client-side clamp.
        assert_eq!(username_score(1.5), "-5.0/10");
    }

    #[test]
    fn metric_rows_cover_the_display_grid() {
        let f = FeatureSnapshot {
            follower_count: 150,
            following_count: 300,
            media_count: 25,
            username_digit_count: 0,
            username_length: 16,
            followers_following_ratio: 0.4983,
            username_digit_ratio: 0.0,
        };
        let rows = metric_rows(&f);
        assert_eq!(rows[0], ("Followers", "150".to_string()));
        assert_eq!(rows[1], ("Following", "300".to_string()));
        assert_eq!(rows[2], ("Posts", "25".to_string()));
        assert_eq!(rows[3], ("Username Score", "10.0/10".to_string()));
    }

    #[test]
    fn verdict_copy_matches_display_text() {
        assert_eq!(
            verdict_headline(Verdict::Fake),
            "This account is likely FAKE"
        );
        assert_eq!(
            verdict_detail(Verdict::Real),
            "This account shows characteristics of a genuine Instagram profile."
        );
        assert_eq!(
            verdict_detail(Verdict::Fake),
            "This account exhibits several signs that may indicate it is fake or spam."
        );
    }

    #[test]
    fn service_detail_is_preferred_verbatim() {
        let err = SubmitError::Service {
            status: 422,
            detail: Some("username not found".to_string()),
        };
        assert_eq!(error_message(Mode::ByHandle, &err), "username not found");
    }

    #[test]
    fn missing_detail_falls_back_to_mode_specific_message() {
        let err = SubmitError::Service {
            status: 500,
            detail: None,
        };
        assert_eq!(
            error_message(Mode::ByHandle, &err),
            "Failed to analyze account. Please try again."
        );
        assert_eq!(
            error_message(Mode::ByFeatures, &err),
            "Failed to analyze features. Please try again."
        );
    }
}
