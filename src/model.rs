use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for the classification service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

/// Which input tab drives the next submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    ByHandle,
    ByFeatures,
}

impl Mode {
    /// Fallback message when a submission fails without a service-supplied detail.
    pub fn generic_error(self) -> &'static str {
        match self {
            Mode::ByHandle => "Failed to analyze account. Please try again.",
            Mode::ByFeatures => "Failed to analyze features. Please try again.",
        }
    }
}

/// Binary classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Real,
    Fake,
}

impl Verdict {
    pub fn as_display(self) -> &'static str {
        match self {
            Verdict::Real => "REAL",
            Verdict::Fake => "FAKE",
        }
    }
}

/// Feature snapshot echoed/enriched by the service for handle lookups.
///
/// The five counts use the service's camelCase names; the two derived
/// ratios keep its snake_case names (the backend mixes both).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSnapshot {
    #[serde(rename = "userFollowerCount")]
    pub follower_count: i64,
    #[serde(rename = "userFollowingCount")]
    pub following_count: i64,
    #[serde(rename = "userMediaCount")]
    pub media_count: i64,
    #[serde(rename = "usernameDigitCount")]
    pub username_digit_count: i64,
    #[serde(rename = "usernameLength")]
    pub username_length: i64,
    #[serde(default)]
    pub followers_following_ratio: f64,
    #[serde(default)]
    pub username_digit_ratio: f64,
}

/// Successful response from either predict endpoint.
///
/// `features` is typically absent for feature-mode submissions; `username`
/// is only echoed by the username endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub prediction: Verdict,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub features: Option<FeatureSnapshot>,
}

/// Validated numeric profile statistics for a feature-mode submission.
/// Serializes directly as the `/predict/features` request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParsedFeatures {
    #[serde(rename = "userFollowerCount")]
    pub follower_count: i64,
    #[serde(rename = "userFollowingCount")]
    pub following_count: i64,
    #[serde(rename = "userMediaCount")]
    pub media_count: i64,
    #[serde(rename = "usernameDigitCount")]
    pub username_digit_count: i64,
    #[serde(rename = "usernameLength")]
    pub username_length: i64,
}

impl ParsedFeatures {
    pub fn values(&self) -> [i64; 5] {
        [
            self.follower_count,
            self.following_count,
            self.media_count,
            self.username_digit_count,
            self.username_length,
        ]
    }
}

/// Raw text buffers behind the feature form. The keystroke filter keeps
/// every buffer empty or digits-only; parsing to numbers happens at
/// submission time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureForm {
    pub follower_count: String,
    pub following_count: String,
    pub media_count: String,
    pub username_digit_count: String,
    pub username_length: String,
}

impl FeatureForm {
    pub fn clear(&mut self) {
        self.follower_count.clear();
        self.following_count.clear();
        self.media_count.clear();
        self.username_digit_count.clear();
        self.username_length.clear();
    }
}

/// Lifecycle of the single outstanding submission. A new submission
/// overwrites the previous terminal state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Succeeded(Prediction),
    Failed(String),
}

impl SubmissionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending)
    }
}

/// Request payload chosen by the active mode at submit time.
#[derive(Debug, Clone)]
pub enum SubmitRequest {
    Handle(String),
    Features(ParsedFeatures),
}

impl SubmitRequest {
    pub fn mode(&self) -> Mode {
        match self {
            SubmitRequest::Handle(_) => Mode::ByHandle,
            SubmitRequest::Features(_) => Mode::ByFeatures,
        }
    }
}

/// Events emitted by the controller and consumed by presentation layers.
///
/// Both lifecycle events echo the staleness token the UI stamped on the
/// submission; the UI applies an event only while that token is still the
/// current one.
#[derive(Debug, Clone)]
pub enum AppEvent {
    SubmissionStarted {
        token: u64,
        mode: Mode,
    },
    SubmissionSettled {
        token: u64,
        mode: Mode,
        outcome: Result<Prediction, String>,
    },
    Info(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prediction_parses_username_response_with_features() {
        let body = r#"{
            "username": "sadinsawarangani",
            "prediction": "real",
            "features": {
                "userFollowerCount": 150,
                "userFollowingCount": 300,
                "userMediaCount": 25,
                "usernameDigitCount": 0,
                "usernameLength": 16,
                "followers_following_ratio": 0.4983,
                "username_digit_ratio": 0.0
            }
        }"#;
        let p: Prediction = serde_json::from_str(body).expect("parse");
        assert_eq!(p.prediction, Verdict::Real);
        let f = p.features.expect("features present");
        assert_eq!(f.follower_count, 150);
        assert_eq!(f.username_length, 16);
        assert_eq!(f.username_digit_ratio, 0.0);
    }

    #[test]
    fn prediction_parses_feature_response_without_features() {
        let p: Prediction = serde_json::from_str(r#"{"prediction": "fake"}"#).expect("parse");
        assert_eq!(p.prediction, Verdict::Fake);
        assert!(p.features.is_none());
        assert!(p.username.is_none());
    }

    #[test]
    fn prediction_ignores_unknown_fields() {
        let p: Prediction =
            serde_json::from_str(r#"{"prediction": "real", "model_version": 3}"#).expect("parse");
        assert_eq!(p.prediction, Verdict::Real);
    }

    #[test]
    fn parsed_features_serialize_with_service_names() {
        let parsed = ParsedFeatures {
            follower_count: 150,
            following_count: 300,
            media_count: 25,
            username_digit_count: 2,
            username_length: 12,
        };
        let v = serde_json::to_value(parsed).expect("serialize");
        assert_eq!(v["userFollowerCount"], 150);
        assert_eq!(v["userFollowingCount"], 300);
        assert_eq!(v["userMediaCount"], 25);
        assert_eq!(v["usernameDigitCount"], 2);
        assert_eq!(v["usernameLength"], 12);
    }

    #[test]
    fn missing_ratios_default_to_zero() {
        let body = r#"{
            "prediction": "real",
            "features": {
                "userFollowerCount": 1,
                "userFollowingCount": 1,
                "userMediaCount": 1,
                "usernameDigitCount": 0,
                "usernameLength": 5
            }
        }"#;
        let p: Prediction = serde_json::from_str(body).expect("parse");
        let f = p.features.expect("features present");
        assert_eq!(f.followers_following_ratio, 0.0);
        assert_eq!(f.username_digit_ratio, 0.0);
    }
}
