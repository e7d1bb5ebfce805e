use crate::model::{
    AppEvent, FeatureForm, FeatureSnapshot, Mode, SubmissionState, Verdict,
};
use crate::validate;

pub const TAB_TITLES: [&str; 3] = ["By Username", "By Features", "Help"];
pub const FEATURE_FIELD_COUNT: usize = 5;

pub const FEATURE_LABELS: [&str; FEATURE_FIELD_COUNT] = [
    "Follower Count",
    "Following Count",
    "Post Count",
    "Digits in Username",
    "Username Length",
];

pub const FEATURE_PLACEHOLDERS: [&str; FEATURE_FIELD_COUNT] =
    ["e.g., 150", "e.g., 300", "e.g., 25", "e.g., 0", "e.g., 12"];

/// All interactive state, owned by the UI thread only.
///
/// Both input buffers persist independently across tab switches; only an
/// explicit reset clears them.
pub struct UiState {
    pub tab: usize,
    pub mode: Mode,
    pub username: String,
    pub features: FeatureForm,
    /// Focused feature field (features tab only).
    pub focus: usize,
    pub submission: SubmissionState,
    pub info: String,
    /// Staleness token, minted here and stamped on every outgoing
    /// submission. Reset and mode switch advance it, so any event still
    /// carrying an older token belongs to a view that no longer exists.
    pub token: u64,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            tab: 0,
            mode: Mode::ByHandle,
            username: String::new(),
            features: FeatureForm::default(),
            focus: 0,
            submission: SubmissionState::Idle,
            info: String::new(),
            token: 0,
        }
    }
}

impl UiState {
    pub fn is_loading(&self) -> bool {
        self.submission.is_pending()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.submission {
            SubmissionState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn verdict(&self) -> Option<Verdict> {
        match &self.submission {
            SubmissionState::Succeeded(p) => Some(p.prediction),
            _ => None,
        }
    }

    /// The derived metrics grid is handle-mode only and requires a feature
    /// snapshot in the response.
    pub fn grid_features(&self) -> Option<&FeatureSnapshot> {
        if self.mode != Mode::ByHandle {
            return None;
        }
        match &self.submission {
            SubmissionState::Succeeded(p) => p.features.as_ref(),
            _ => None,
        }
    }

    /// Select a tab; returns true when the active mode changed and any
    /// in-flight submission must be invalidated.
    pub fn select_tab(&mut self, tab: usize) -> bool {
        self.tab = tab % TAB_TITLES.len();
        match self.tab {
            0 => self.switch_mode(Mode::ByHandle),
            1 => self.switch_mode(Mode::ByFeatures),
            _ => false,
        }
    }

    /// Switch modes: a stale result or error from one tab is never shown
    /// under the other. Input buffers are left alone.
    fn switch_mode(&mut self, mode: Mode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.submission = SubmissionState::Idle;
        self.token += 1;
        true
    }

    /// Clear inputs and display state. The active mode (and tab) is
    /// preserved; calling this twice is the same as calling it once.
    pub fn reset(&mut self) {
        self.username.clear();
        self.features.clear();
        self.focus = 0;
        self.submission = SubmissionState::Idle;
        self.info.clear();
        self.token += 1;
    }

    /// Enter Pending and mint the token for the outgoing submission.
    /// Pending is set here, not on the echoed event, so a reset that lands
    /// between the keypress and the controller's acknowledgement cannot be
    /// undone by that acknowledgement.
    pub fn begin_submission(&mut self) -> u64 {
        self.token += 1;
        self.submission = SubmissionState::Pending;
        self.info.clear();
        self.token
    }

    /// A client-side validation failure maps straight to the error banner;
    /// no request was attempted.
    pub fn fail_validation(&mut self, message: String) {
        self.submission = SubmissionState::Failed(message);
    }

    pub fn apply_event(&mut self, ev: AppEvent) {
        match ev {
            AppEvent::SubmissionStarted { token, .. } => {
                if token != self.token {
                    return;
                }
                self.submission = SubmissionState::Pending;
                self.info.clear();
            }
            AppEvent::SubmissionSettled { token, outcome, .. } => {
                if token != self.token {
                    // Stale resolution: the view was reset or switched
                    // after this request went out.
                    return;
                }
                self.info.clear();
                self.submission = match outcome {
                    Ok(prediction) => SubmissionState::Succeeded(prediction),
                    Err(message) => SubmissionState::Failed(message),
                };
            }
            AppEvent::Info(message) => self.info = message,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FEATURE_FIELD_COUNT;
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + FEATURE_FIELD_COUNT - 1) % FEATURE_FIELD_COUNT;
    }

    pub fn feature_field(&self, idx: usize) -> &str {
        match idx {
            0 => &self.features.follower_count,
            1 => &self.features.following_count,
            2 => &self.features.media_count,
            3 => &self.features.username_digit_count,
            _ => &self.features.username_length,
        }
    }

    fn feature_field_mut(&mut self, idx: usize) -> &mut String {
        match idx {
            0 => &mut self.features.follower_count,
            1 => &mut self.features.following_count,
            2 => &mut self.features.media_count,
            3 => &mut self.features.username_digit_count,
            _ => &mut self.features.username_length,
        }
    }

    /// Append a character to the focused buffer. Feature fields go through
    /// the keystroke filter; a rejected character leaves the buffer
    /// unchanged.
    pub fn type_char(&mut self, c: char) {
        match self.mode {
            Mode::ByHandle => self.username.push(c),
            Mode::ByFeatures => {
                let focus = self.focus;
                let field = self.feature_field_mut(focus);
                let mut candidate = field.clone();
                candidate.push(c);
                if validate::feature_field_ok(&candidate) {
                    *field = candidate;
                }
            }
        }
    }

    pub fn backspace(&mut self) {
        match self.mode {
            Mode::ByHandle => {
                self.username.pop();
            }
            Mode::ByFeatures => {
                let focus = self.focus;
                self.feature_field_mut(focus).pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Prediction;

    fn real_prediction_with_features() -> Prediction {
        Prediction {
            username: Some("sadinsawarangani".to_string()),
            prediction: Verdict::Real,
            features: Some(FeatureSnapshot {
                follower_count: 150,
                following_count: 300,
                media_count: 25,
                username_digit_count: 0,
                username_length: 16,
                followers_following_ratio: 0.4983,
                username_digit_ratio: 0.0,
            }),
        }
    }

    fn settled_ok(token: u64, prediction: Prediction) -> AppEvent {
        AppEvent::SubmissionSettled {
            token,
            mode: Mode::ByHandle,
            outcome: Ok(prediction),
        }
    }

    #[test]
    fn submission_settles_into_succeeded() {
        let mut state = UiState::default();
        let token = state.begin_submission();
        assert!(state.is_loading());
        state.apply_event(AppEvent::SubmissionStarted {
            token,
            mode: Mode::ByHandle,
        });
        assert!(state.is_loading());

        state.apply_event(settled_ok(token, real_prediction_with_features()));
        assert!(!state.is_loading());
        assert_eq!(state.verdict(), Some(Verdict::Real));
        let features = state.grid_features().expect("grid shown in handle mode");
        assert_eq!(features.follower_count, 150);
    }

    #[test]
    fn stale_resolution_after_reset_is_ignored() {
        let mut state = UiState::default();
        state.username = "slowpoke".to_string();
        let token = state.begin_submission();
        state.reset();
        assert_eq!(state.submission, SubmissionState::Idle);

        state.apply_event(settled_ok(token, real_prediction_with_features()));
        assert_eq!(state.submission, SubmissionState::Idle);
        assert!(state.username.is_empty());
    }

    #[test]
    fn stale_started_after_reset_does_not_resurrect_loading() {
        let mut state = UiState::default();
        state.username = "slowpoke".to_string();
        let token = state.begin_submission();
        // Reset lands before the controller's acknowledgement arrives.
        state.reset();

        state.apply_event(AppEvent::SubmissionStarted {
            token,
            mode: Mode::ByHandle,
        });
        assert!(!state.is_loading());
        assert_eq!(state.submission, SubmissionState::Idle);
    }

    #[test]
    fn stale_resolution_after_mode_switch_is_ignored() {
        let mut state = UiState::default();
        let token = state.begin_submission();
        assert!(state.select_tab(1));

        state.apply_event(settled_ok(token, real_prediction_with_features()));
        assert_eq!(state.submission, SubmissionState::Idle);
    }

    #[test]
    fn reset_is_idempotent_and_preserves_mode() {
        let mut state = UiState::default();
        state.select_tab(1);
        state.features.follower_count = "150".to_string();
        state.begin_submission();

        state.reset();
        let after_once = (
            state.mode,
            state.username.clone(),
            state.features.clone(),
            state.submission.clone(),
        );
        state.reset();
        let after_twice = (
            state.mode,
            state.username.clone(),
            state.features.clone(),
            state.submission.clone(),
        );
        assert_eq!(after_once, after_twice);
        assert_eq!(state.mode, Mode::ByFeatures);
        assert_eq!(state.submission, SubmissionState::Idle);
    }

    #[test]
    fn mode_switch_clears_display_but_not_buffers() {
        let mut state = UiState::default();
        state.username = "someuser".to_string();
        state.features.follower_count = "150".to_string();
        let token = state.begin_submission();
        state.apply_event(settled_ok(token, real_prediction_with_features()));

        state.select_tab(1);
        assert_eq!(state.submission, SubmissionState::Idle);
        assert_eq!(state.username, "someuser");
        assert_eq!(state.features.follower_count, "150");

        // Switching back does not resurrect the old result.
        state.select_tab(0);
        assert_eq!(state.submission, SubmissionState::Idle);
    }

    #[test]
    fn grid_is_hidden_in_feature_mode() {
        let mut state = UiState::default();
        state.select_tab(1);
        let token = state.begin_submission();
        state.apply_event(AppEvent::SubmissionSettled {
            token,
            mode: Mode::ByFeatures,
            outcome: Ok(real_prediction_with_features()),
        });
        assert_eq!(state.verdict(), Some(Verdict::Real));
        assert!(state.grid_features().is_none());
    }

    #[test]
    fn rejected_keystroke_leaves_buffer_unchanged() {
        let mut state = UiState::default();
        state.select_tab(1);
        state.type_char('1');
        state.type_char('5');
        state.type_char('-');
        state.type_char('.');
        state.type_char('x');
        state.type_char('0');
        assert_eq!(state.features.follower_count, "150");
    }

    #[test]
    fn handle_buffer_accepts_any_character() {
        let mut state = UiState::default();
        for c in "user_99.x".chars() {
            state.type_char(c);
        }
        assert_eq!(state.username, "user_99.x");
        state.backspace();
        assert_eq!(state.username, "user_99.");
    }

    #[test]
    fn validation_failure_shows_error_without_loading() {
        let mut state = UiState::default();
        state.fail_validation("Please enter a valid Instagram username".to_string());
        assert_eq!(
            state.error(),
            Some("Please enter a valid Instagram username")
        );
        assert!(!state.is_loading());
    }

    #[test]
    fn new_submission_replaces_previous_error() {
        let mut state = UiState::default();
        state.fail_validation("Feature values cannot be negative".to_string());
        state.begin_submission();
        assert!(state.error().is_none());
        assert!(state.is_loading());
    }

    #[test]
    fn info_line_is_cleared_when_submission_settles() {
        let mut state = UiState::default();
        let token = state.begin_submission();
        state.apply_event(AppEvent::Info("Analysis already in progress".to_string()));
        assert_eq!(state.info, "Analysis already in progress");

        state.apply_event(settled_ok(token, real_prediction_with_features()));
        assert!(state.info.is_empty());

        state.apply_event(AppEvent::Info("Analysis already in progress".to_string()));
        state.begin_submission();
        assert!(state.info.is_empty());
    }
}
