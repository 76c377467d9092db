//! 核心类型定义

mod feedback;
mod form;
mod profile;

pub use feedback::{CounterTier, FeedbackKind, SubmitControl};
pub use form::{FieldId, FieldSpec, FieldValidationResult, FormState, FormValues};
pub use profile::{AdvisoryLimit, CounterThresholds, DismissPolicy, FormProfile, ValidationRules};
