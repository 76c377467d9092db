use serde::{Deserialize, Serialize};

/// Which of the three mutually-exclusive feedback regions to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    /// In-flight indicator.
    Loading,
    /// Delivery confirmation.
    Success,
    /// Validation, transport, or server failure.
    Error,
}

/// Desired presentation of the submit control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitControl {
    /// Whether the control accepts clicks.
    pub enabled: bool,
    /// Visible label.
    pub label: String,
}

impl SubmitControl {
    /// Ready to accept a submission.
    #[must_use]
    pub fn ready() -> Self {
        Self {
            enabled: true,
            label: "Send Message".to_string(),
        }
    }

    /// A submission is in flight.
    #[must_use]
    pub fn sending() -> Self {
        Self {
            enabled: false,
            label: "Sending...".to_string(),
        }
    }

    /// Locked out during a rate-limit cooldown, counting down.
    #[must_use]
    pub fn cooling_down(remaining_secs: u64) -> Self {
        Self {
            enabled: false,
            label: format!("Wait {remaining_secs}s"),
        }
    }
}

/// Escalation tier of the character counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CounterTier {
    /// Default presentation.
    Normal,
    /// Approaching the maximum.
    Warning,
    /// At or beyond the danger threshold.
    Danger,
}
