use async_trait::async_trait;

use crate::error::{Result, TransportError};
use crate::types::{DeliveryReceipt, Submission, TransportMetadata};

/// 原始服务端错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（后端业务码或 HTTP 状态码，各 Transport 格式不同）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// Transport 错误映射 Trait（内部使用）
/// 各 Transport 实现此 trait 以将原始服务端错误映射到统一错误类型
pub(crate) trait TransportErrorMapper {
    /// 返回 Transport 标识符
    fn transport_name(&self) -> &'static str;

    /// 将原始服务端错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError) -> TransportError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> TransportError {
        TransportError::ParseError {
            transport: self.transport_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> TransportError {
        TransportError::Unknown {
            transport: self.transport_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// 邮件投递 Trait
///
/// 一次 [`submit`](MailTransport::submit) 恰好对应一次网络请求；不做自动重试，
/// 由调用方决定恢复策略。
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// 投递通道标识符
    fn id(&self) -> &'static str;

    /// 获取 Transport 元数据（类型级别）
    ///
    /// 返回该 Transport 的元数据，包括名称、描述、配置字段等。
    /// 此方法不需要实例，可以在创建 Transport 之前调用。
    fn metadata() -> TransportMetadata
    where
        Self: Sized;

    /// 投递前准备（页面就绪时调用）
    ///
    /// 令牌保护的通道在此预取防伪令牌；无准备步骤的通道使用默认空实现。
    /// 准备失败不应阻止后续提交尝试。
    async fn prepare(&self) -> Result<()> {
        Ok(())
    }

    /// 投递一份表单提交
    async fn submit(&self, submission: &Submission) -> Result<DeliveryReceipt>;
}
