//! Text summary builder for one-shot CLI output.

use crate::model::{Mode, Prediction};
use crate::normalize;

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

/// Build the text-mode lines for a settled prediction. The derived
/// metrics only appear for handle submissions, same as the TUI grid.
pub(crate) fn build_text_summary(mode: Mode, prediction: &Prediction) -> TextSummary {
    let mut lines = Vec::new();

    if let Some(username) = prediction.username.as_deref() {
        lines.push(format!("Username: {}", username));
    }
    lines.push(format!("Verdict: {}", prediction.prediction.as_display()));

    if mode == Mode::ByHandle {
        if let Some(features) = prediction.features.as_ref() {
            for (label, value) in normalize::metric_rows(features) {
                lines.push(format!("{}: {}", label, value));
            }
        }
    }

    lines.push(normalize::verdict_detail(prediction.prediction).to_string());
    TextSummary { lines }
}
