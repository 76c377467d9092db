//! Transport 公共工具函数

use std::time::Duration;

use reqwest::Client;
use reqwest::multipart::Form;

use crate::types::Submission;

// ============ HTTP Client ============

/// 默认连接超时（秒）
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 创建带超时配置的 HTTP Client
pub fn create_http_client() -> Client {
    Client::builder()
        .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
        .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
        .build()
        .expect("Failed to create HTTP client")
}

// ============ Multipart Body ============

/// 将提交内容序列化为 multipart 表单体。
///
/// 字段顺序与页面表单一致：name、email、subject、message，
/// 之后追加隐藏的 honeypot/meta 字段。Transport 特有字段
/// （防伪令牌、`_subject`/`_replyto`）由各 Transport 自行追加。
pub fn submission_form(submission: &Submission) -> Form {
    let mut form = Form::new()
        .text("name", submission.name.clone())
        .text("email", submission.email.clone())
        .text("subject", submission.subject.clone())
        .text("message", submission.message.clone());

    for (field, value) in &submission.extra {
        form = form.text(field.clone(), value.clone());
    }

    form
}
