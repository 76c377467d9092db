//! Relay MailTransport trait 实现

use async_trait::async_trait;

use crate::error::Result;
use crate::traits::{MailTransport, RawApiError, TransportErrorMapper};
use crate::transports::common::submission_form;
use crate::types::{
    DeliveryReceipt, FieldType, Submission, TransportConfigField, TransportKind, TransportMetadata,
};
use crate::utils::log_sanitizer::mask_email;

use super::{REPLY_TO_FIELD, RelayErrorBody, RelayTransport, SUBJECT_FIELD};

impl RelayTransport {
    /// 由访客填写的主题合成 `_subject` 字段值
    pub(crate) fn synthesized_subject(&self, submission: &Submission) -> String {
        format!("{}: {}", self.subject_prefix, submission.subject)
    }
}

#[async_trait]
impl MailTransport for RelayTransport {
    fn id(&self) -> &'static str {
        "relay"
    }

    fn metadata() -> TransportMetadata {
        TransportMetadata {
            kind: TransportKind::Relay,
            display_name: "Form relay".to_string(),
            description: "Third-party mail-forwarding service, no first-party backend".to_string(),
            config_fields: vec![
                TransportConfigField {
                    name: "endpoint".to_string(),
                    label: "Relay URL".to_string(),
                    field_type: FieldType::Url,
                    required: true,
                },
                TransportConfigField {
                    name: "subjectPrefix".to_string(),
                    label: "Subject prefix".to_string(),
                    field_type: FieldType::Text,
                    required: true,
                },
            ],
        }
    }

    async fn submit(&self, submission: &Submission) -> Result<DeliveryReceipt> {
        log::debug!(
            "[{}] Relaying submission, reply-to {}",
            self.id(),
            mask_email(&submission.email)
        );

        let form = submission_form(submission)
            .text(SUBJECT_FIELD, self.synthesized_subject(submission))
            .text(REPLY_TO_FIELD, submission.email.clone());

        let (status, response_text) = self.post_submission(form).await?;

        if (200..300).contains(&status) {
            // 中继不回确认文案，仅以状态确认收妥
            return Ok(DeliveryReceipt { message: None });
        }

        // 失败时尽力解析结构化错误体；解析不动就按未知拒绝处理
        if let Ok(body) = serde_json::from_str::<RelayErrorBody>(&response_text)
            && let Some(errors) = body.errors
        {
            return Err(self.fields_rejected(&errors));
        }

        Err(self.unknown_error(RawApiError::with_code(
            status.to_string(),
            if response_text.is_empty() {
                format!("Relay refused the submission (HTTP {status})")
            } else {
                response_text
            },
        )))
    }
}
