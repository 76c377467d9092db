//! 令牌保护的第一方后端 Transport

mod error;
mod http;
mod transport;
mod types;

use reqwest::Client;
use tokio::sync::RwLock;

use crate::transports::common::create_http_client;

pub(crate) use types::{SubmitResponse, TokenIssueResponse};

/// 请求防伪令牌的查询标志
pub(crate) const TOKEN_QUERY_FLAG: &str = "get_token=1";
/// AJAX 标记请求头
pub(crate) const AJAX_MARKER_HEADER: &str = "X-Requested-With";
pub(crate) const AJAX_MARKER_VALUE: &str = "XMLHttpRequest";
/// 提交体中的令牌字段名
pub(crate) const TOKEN_FIELD: &str = "csrf_token";
/// 服务端限流业务码
pub(crate) const RATE_LIMIT_CODE: &str = "RATE_LIMIT";

/// 令牌保护的第一方后端 Transport
///
/// 防伪令牌完全由本类型持有：页面就绪时通过 [`prepare`](crate::MailTransport::prepare)
/// 预取，提交成功或令牌被拒后刷新，缓存缺失时在提交前懒取。
pub struct TokenBackendTransport {
    pub(crate) client: Client,
    pub(crate) endpoint: String,
    pub(crate) token: RwLock<Option<String>>,
}

impl TokenBackendTransport {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: create_http_client(),
            endpoint,
            token: RwLock::new(None),
        }
    }
}
