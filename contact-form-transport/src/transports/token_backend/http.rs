//! Token backend HTTP 请求方法

use reqwest::multipart::Form;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::{RawApiError, TransportErrorMapper};

use super::{
    AJAX_MARKER_HEADER, AJAX_MARKER_VALUE, SubmitResponse, TOKEN_QUERY_FLAG, TokenBackendTransport,
    TokenIssueResponse,
};

impl TokenBackendTransport {
    /// 向后端请求一枚新的防伪令牌并写入缓存
    pub(crate) async fn fetch_token(&self) -> Result<String> {
        let url = format!("{}?{}", self.endpoint, TOKEN_QUERY_FLAG);

        let (_, response_text) = HttpUtils::execute_request(
            self.client.get(&url),
            self.transport_name(),
            "GET",
            &url,
        )
        .await?;

        let issued: TokenIssueResponse =
            HttpUtils::parse_json(&response_text, self.transport_name())?;

        if !issued.success {
            return Err(self.unknown_error(RawApiError::new(
                "Token endpoint refused to issue a token",
            )));
        }

        let Some(token) = issued.csrf_token.filter(|t| !t.is_empty()) else {
            return Err(self.parse_error("响应中缺少 csrf_token 字段"));
        };

        *self.token.write().await = Some(token.clone());
        log::debug!("[{}] Anti-forgery token refreshed", self.transport_name());
        Ok(token)
    }

    /// 取当前令牌；缓存缺失时懒取
    ///
    /// 初始化时取令牌失败不应把表单锁死，所以这里兜底再取一次。
    pub(crate) async fn current_token(&self) -> Result<String> {
        if let Some(token) = self.token.read().await.clone() {
            return Ok(token);
        }
        self.fetch_token().await
    }

    /// 清除缓存的令牌（令牌被拒后调用）
    pub(crate) async fn invalidate_token(&self) {
        *self.token.write().await = None;
    }

    /// 提交 multipart 表单体并解析响应
    ///
    /// 后端无论业务成败都返回 JSON 信封，HTTP 状态不参与判定
    /// （429 与网关错误已在 `HttpUtils` 中统一处理）。
    pub(crate) async fn post_submission(&self, form: Form) -> Result<SubmitResponse> {
        let request = self
            .client
            .post(&self.endpoint)
            .header(AJAX_MARKER_HEADER, AJAX_MARKER_VALUE)
            .multipart(form);

        let (_, response_text) =
            HttpUtils::execute_request(request, self.transport_name(), "POST", &self.endpoint)
                .await?;

        HttpUtils::parse_json(&response_text, self.transport_name())
    }
}
