//! Relay 错误体类型

use serde::Deserialize;

/// 中继失败响应体（尽力解析）
#[derive(Debug, Deserialize)]
pub(crate) struct RelayErrorBody {
    #[serde(default)]
    pub errors: Option<Vec<RelayFieldError>>,
}

/// 结构化字段错误条目
///
/// 中继服务的条目形如 `{field, code, message}`，三个字段都可能缺失。
#[derive(Debug, Deserialize)]
pub(crate) struct RelayFieldError {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RelayFieldError {
    /// 渲染为 `field: message` 形式的展示文本
    pub fn describe(&self) -> String {
        match (&self.field, &self.message) {
            (Some(field), Some(message)) => format!("{field}: {message}"),
            (Some(field), None) => field.clone(),
            (None, Some(message)) => message.clone(),
            (None, None) => "invalid field".to_string(),
        }
    }
}
