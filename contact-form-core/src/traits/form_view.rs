//! 视图表面抽象 Trait

use async_trait::async_trait;

use crate::types::{CounterTier, FeedbackKind, FieldId, SubmitControl};

/// 视图表面 Trait
///
/// 控制器只通过此 trait 触达页面：三块互斥的反馈区域、提交控件、
/// 单字段校验标记与字符计数。控制器保证一次只显示一条横幅
/// （进入任何新状态前先 [`clear_feedback`](FormView::clear_feedback)）。
///
/// 平台实现:
/// - WASM/DOM: 绑定 loading / sent-message / error-message 区域与提交按钮
/// - 测试: 记录调用序列的内存 mock
#[async_trait]
pub trait FormView: Send + Sync {
    /// 隐藏所有反馈横幅
    async fn clear_feedback(&self);

    /// 显示一条反馈横幅
    ///
    /// 宿主应把横幅滚动到可见位置（浏览器实现对应 `scrollIntoView`）。
    async fn show_feedback(&self, kind: FeedbackKind, message: &str);

    /// 更新提交控件的可用状态与文案
    async fn set_submit_control(&self, control: &SubmitControl);

    /// 标记或清除单字段校验状态
    ///
    /// # Arguments
    /// * `field` - 字段
    /// * `error` - `Some(消息)` 标记为无效并展示消息；`None` 清除标记
    async fn set_field_validity(&self, field: FieldId, error: Option<&str>);

    /// 更新消息字段的字符计数显示
    async fn set_counter(&self, count: usize, tier: CounterTier);

    /// 清空表单字段（投递成功后的重置）
    async fn reset_fields(&self);
}
