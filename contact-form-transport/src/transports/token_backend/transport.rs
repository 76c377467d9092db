//! Token backend MailTransport trait 实现

use async_trait::async_trait;

use crate::error::{Result, TransportError};
use crate::traits::{MailTransport, RawApiError, TransportErrorMapper};
use crate::transports::common::submission_form;
use crate::types::{
    DeliveryReceipt, FieldType, Submission, TransportConfigField, TransportKind, TransportMetadata,
};

use super::{TOKEN_FIELD, TokenBackendTransport};

#[async_trait]
impl MailTransport for TokenBackendTransport {
    fn id(&self) -> &'static str {
        "token-backend"
    }

    fn metadata() -> TransportMetadata {
        TransportMetadata {
            kind: TransportKind::TokenBackend,
            display_name: "First-party backend".to_string(),
            description: "Token-protected first-party contact endpoint".to_string(),
            config_fields: vec![TransportConfigField {
                name: "endpoint".to_string(),
                label: "Endpoint URL".to_string(),
                field_type: FieldType::Url,
                required: true,
            }],
        }
    }

    async fn prepare(&self) -> Result<()> {
        self.fetch_token().await.map(|_| ())
    }

    async fn submit(&self, submission: &Submission) -> Result<DeliveryReceipt> {
        let token = self.current_token().await?;
        let form = submission_form(submission).text(TOKEN_FIELD, token);

        let response = self.post_submission(form).await?;

        if response.success {
            // 令牌单次有效，成功后立即换新；失败不影响本次投递结果，
            // 下次提交会懒取
            if let Err(e) = self.fetch_token().await {
                log::warn!("[{}] Post-delivery token refresh failed: {e}", self.id());
            }
            return Ok(DeliveryReceipt {
                message: response.message,
            });
        }

        let raw = RawApiError {
            code: response.error_code,
            message: response
                .message
                .unwrap_or_else(|| "Unknown error".to_string()),
        };
        let err = self.map_error(raw);

        if matches!(err, TransportError::TokenRejected { .. }) {
            // 旧令牌已作废，主动补取新令牌
            self.invalidate_token().await;
            if let Err(e) = self.fetch_token().await {
                log::warn!("[{}] Token refresh after rejection failed: {e}", self.id());
            }
        }

        Err(err)
    }
}
