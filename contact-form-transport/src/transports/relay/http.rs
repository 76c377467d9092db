//! Relay HTTP 请求方法

use reqwest::header::ACCEPT;
use reqwest::multipart::Form;

use crate::error::Result;
use crate::http_client::HttpUtils;
use crate::traits::TransportErrorMapper;

use super::{ACCEPT_JSON, RelayTransport};

impl RelayTransport {
    /// 投递 multipart 表单体，返回 HTTP 状态与原始响应文本
    ///
    /// 与 token backend 不同，中继以 HTTP 状态表达成败，
    /// 响应体只在失败时才值得解析。
    pub(crate) async fn post_submission(&self, form: Form) -> Result<(u16, String)> {
        let request = self
            .client
            .post(&self.endpoint)
            .header(ACCEPT, ACCEPT_JSON)
            .multipart(form);

        HttpUtils::execute_request(request, self.transport_name(), "POST", &self.endpoint).await
    }
}
