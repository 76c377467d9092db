//! 第三方表单中继 Transport

mod error;
mod http;
mod transport;
mod types;

use reqwest::Client;

use crate::transports::common::create_http_client;

pub(crate) use types::RelayErrorBody;

/// 中继要求的 Accept 请求头值
pub(crate) const ACCEPT_JSON: &str = "application/json";
/// 合成的主题字段名
pub(crate) const SUBJECT_FIELD: &str = "_subject";
/// 合成的回信地址字段名
pub(crate) const REPLY_TO_FIELD: &str = "_replyto";

/// 第三方表单中继 Transport
///
/// 无第一方后端：浏览器直接把 multipart 表单投给中继服务，
/// 成败以 HTTP 状态判定，失败时尽力解析 `{errors: [...]}` 错误体。
pub struct RelayTransport {
    pub(crate) client: Client,
    pub(crate) endpoint: String,
    pub(crate) subject_prefix: String,
}

impl RelayTransport {
    pub fn new(endpoint: String, subject_prefix: String) -> Self {
        Self {
            client: create_http_client(),
            endpoint,
            subject_prefix,
        }
    }
}
