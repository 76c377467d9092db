//! Token backend 响应类型

use serde::Deserialize;

/// 令牌签发响应（`GET ?get_token=1`）
#[derive(Debug, Deserialize)]
pub(crate) struct TokenIssueResponse {
    pub success: bool,
    #[serde(default)]
    pub csrf_token: Option<String>,
}

/// 提交响应
#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_code: Option<String>,
}
