use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::feedback::CounterTier;
use super::form::{FieldId, FieldSpec};

// ============ Counter ============

/// Character counter escalation thresholds for the message field.
///
/// Purely cosmetic — the counter never blocks submission by itself; length
/// enforcement lives in the validation rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterThresholds {
    /// Nominal maximum the tiers are calibrated against.
    pub max: usize,
    /// Counts at or above this are [`CounterTier::Warning`].
    pub warning_from: usize,
    /// Counts at or above this are [`CounterTier::Danger`].
    pub danger_from: usize,
}

impl CounterThresholds {
    /// Percentage-calibrated thresholds: warning at 75% of `max`, danger at 90%.
    #[must_use]
    pub fn percent_of_max(max: usize) -> Self {
        Self {
            max,
            warning_from: max * 75 / 100,
            danger_from: max * 90 / 100,
        }
    }

    /// Absolute thresholds that escalate strictly *above* the given counts:
    /// `absolute(2000, 1500, 1800)` keeps 1500 normal and 1800 warning.
    #[must_use]
    pub fn absolute(max: usize, warning_over: usize, danger_over: usize) -> Self {
        Self {
            max,
            warning_from: warning_over + 1,
            danger_from: danger_over + 1,
        }
    }

    /// Tier for the given character count.
    #[must_use]
    pub fn tier(&self, count: usize) -> CounterTier {
        if count >= self.danger_from {
            CounterTier::Danger
        } else if count >= self.warning_from {
            CounterTier::Warning
        } else {
            CounterTier::Normal
        }
    }
}

// ============ Dismissal ============

/// Auto-dismiss delays for the feedback banners.
///
/// `None` keeps the banner until the next state transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DismissPolicy {
    /// Delay before a success banner hides itself.
    pub success_after: Option<Duration>,
    /// Delay before an error banner hides itself.
    pub error_after: Option<Duration>,
}

// ============ Validation rules ============

/// Which rule set [`validate_field`](crate::validation::validate_field) applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationRules {
    /// Short-circuit chain over declared constraints: required-and-empty,
    /// then email pattern, then declared maximum length. Only the first
    /// failing rule produces a message.
    Declared,
    /// Per-field minimum-length thresholds plus the email pattern. At most
    /// one message per field; the form check still visits every field.
    MinimumLengths,
}

// ============ Advisory limit ============

/// Client-side submission-rate advisory.
///
/// Never authoritative — the backend enforces the real limit; this only
/// drives the pre-emptive warning banner on page load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisoryLimit {
    /// Rolling window the history is pruned to.
    pub window: Duration,
    /// Warn when this many submissions remain inside the window.
    pub warn_threshold: usize,
}

impl Default for AdvisoryLimit {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(60 * 60),
            warn_threshold: 4,
        }
    }
}

// ============ Profile ============

/// Per-deployment preset bundling everything that differs between the two
/// page variants: field constraints, rule set, counter calibration, banner
/// dismissal, cooldown, and reset timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormProfile {
    /// Field constraints, in page order.
    pub fields: Vec<FieldSpec>,
    /// Validation rule set.
    pub rules: ValidationRules,
    /// Counter calibration.
    pub counter: CounterThresholds,
    /// Banner auto-dismiss delays.
    pub dismiss: DismissPolicy,
    /// Submit lockout after a server-reported rate limit. A server-supplied
    /// `retry_after` overrides this default.
    pub cooldown: Duration,
    /// Whether the post-success reset happens when the success banner
    /// auto-dismisses (relay) instead of immediately on delivery (token
    /// backend).
    pub reset_on_dismiss: bool,
    /// Soft rate-limit advisory; `None` disables the page-load check.
    pub advisory: Option<AdvisoryLimit>,
}

impl FormProfile {
    /// Preset for the token-protected first-party deployment.
    #[must_use]
    pub fn token_backend() -> Self {
        Self {
            fields: vec![
                FieldSpec {
                    id: FieldId::Name,
                    required: true,
                    max_len: None,
                    min_len: None,
                },
                FieldSpec {
                    id: FieldId::Email,
                    required: true,
                    max_len: None,
                    min_len: None,
                },
                FieldSpec {
                    id: FieldId::Subject,
                    required: true,
                    max_len: None,
                    min_len: None,
                },
                FieldSpec {
                    id: FieldId::Message,
                    required: true,
                    max_len: Some(2000),
                    min_len: None,
                },
            ],
            rules: ValidationRules::Declared,
            counter: CounterThresholds::percent_of_max(2000),
            dismiss: DismissPolicy {
                success_after: Some(Duration::from_secs(5)),
                error_after: Some(Duration::from_secs(8)),
            },
            cooldown: Duration::from_secs(60),
            reset_on_dismiss: false,
            advisory: Some(AdvisoryLimit::default()),
        }
    }

    /// Preset for the third-party relay deployment.
    #[must_use]
    pub fn relay() -> Self {
        Self {
            fields: vec![
                FieldSpec {
                    id: FieldId::Name,
                    required: true,
                    max_len: None,
                    min_len: Some(2),
                },
                FieldSpec {
                    id: FieldId::Email,
                    required: true,
                    max_len: None,
                    min_len: None,
                },
                FieldSpec {
                    id: FieldId::Subject,
                    required: true,
                    max_len: None,
                    min_len: Some(3),
                },
                FieldSpec {
                    id: FieldId::Message,
                    required: true,
                    max_len: None,
                    min_len: Some(10),
                },
            ],
            rules: ValidationRules::MinimumLengths,
            counter: CounterThresholds::absolute(2000, 1500, 1800),
            dismiss: DismissPolicy {
                success_after: Some(Duration::from_secs(5)),
                error_after: None,
            },
            cooldown: Duration::from_secs(60),
            reset_on_dismiss: true,
            advisory: None,
        }
    }

    /// Constraints for one field, if the profile declares any.
    #[must_use]
    pub fn spec_of(&self, field: FieldId) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.id == field)
    }
}
