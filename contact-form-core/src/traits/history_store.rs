//! 提交历史存储抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;

/// 宿主未另行配置时建议使用的存储键
pub const DEFAULT_HISTORY_KEY: &str = "contact_form_submissions";

/// 提交历史存储 Trait
///
/// 历史是单个键下的一段 JSON（毫秒时间戳数组）；键由平台实现绑定
/// （[`DEFAULT_HISTORY_KEY`] 为约定默认值）。
///
/// 平台实现:
/// - WASM/DOM: `localStorage` 读写
/// - 桌面壳: 配置目录下的单文件
/// - 测试: 内存 mock
///
/// 存储按读-改-写使用且无锁；正确性依赖宿主的单线程事件模型，
/// 而非任何显式同步。
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// 读取原始 JSON
    ///
    /// # Returns
    /// * `Ok(Some(json))` - 键存在
    /// * `Ok(None)` - 键不存在（尚无历史）
    async fn load_raw_json(&self) -> CoreResult<Option<String>>;

    /// 写回原始 JSON
    ///
    /// # Arguments
    /// * `json` - JSON 字符串
    async fn save_raw_json(&self, json: &str) -> CoreResult<()>;
}
