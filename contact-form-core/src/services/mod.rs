//! 业务逻辑服务层

mod form_controller;
mod rate_advisor;

pub use form_controller::FormController;
pub use rate_advisor::RateAdvisor;

use std::sync::Arc;

use contact_form_transport::MailTransport;

use crate::traits::{Clock, FormView, HistoryStore};

/// 控制器上下文 - 持有所有注入的能力
///
/// 宿主（页面壳）需要创建此上下文，并注入平台特定的视图、存储与时钟实现。
/// 生命周期与页面一致：页面就绪时创建，页面卸载时随之丢弃。
pub struct ControllerContext {
    /// 邮件投递通道
    pub transport: Arc<dyn MailTransport>,
    /// 视图表面
    pub view: Arc<dyn FormView>,
    /// 提交历史存储
    pub history: Arc<dyn HistoryStore>,
    /// 时钟
    pub clock: Arc<dyn Clock>,
}

impl ControllerContext {
    /// 创建控制器上下文
    #[must_use]
    pub fn new(
        transport: Arc<dyn MailTransport>,
        view: Arc<dyn FormView>,
        history: Arc<dyn HistoryStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            transport,
            view,
            history,
            clock,
        }
    }
}
