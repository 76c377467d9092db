//! 软性提交限额提示服务
//!
//! 仅供预警使用，不具权威性：真正的限流由后端执行，这里只在
//! 页面加载时根据本地提交历史提前亮出警示横幅。

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::ControllerContext;
use crate::types::AdvisoryLimit;

/// 软性提交限额提示服务
pub struct RateAdvisor {
    ctx: Arc<ControllerContext>,
    advisory: AdvisoryLimit,
}

impl RateAdvisor {
    /// 创建提示服务实例
    #[must_use]
    pub fn new(ctx: Arc<ControllerContext>, advisory: AdvisoryLimit) -> Self {
        Self { ctx, advisory }
    }

    /// 页面加载时检查
    ///
    /// 裁剪窗口外的历史并写回（无论是否预警都写回），返回是否应当
    /// 显示预警横幅。
    pub async fn check_on_load(&self) -> CoreResult<bool> {
        let recent = self.pruned_history().await?;
        self.write_back(&recent).await?;

        let should_warn = recent.len() >= self.advisory.warn_threshold;
        if should_warn {
            log::warn!(
                "Submission history has {} entries inside the window, advising restraint",
                recent.len()
            );
        }
        Ok(should_warn)
    }

    /// 记录一次成功投递
    pub async fn record(&self) -> CoreResult<()> {
        let mut recent = self.pruned_history().await?;
        recent.push(self.ctx.clock.now_millis());
        self.write_back(&recent).await
    }

    /// 读取历史并裁剪到滚动窗口内
    ///
    /// 历史损坏（非法 JSON）按空历史对待，不让陈年脏数据卡死表单。
    async fn pruned_history(&self) -> CoreResult<Vec<i64>> {
        let raw = self.ctx.history.load_raw_json().await?;
        let stamps: Vec<i64> = raw
            .as_deref()
            .and_then(|json| serde_json::from_str(json).ok())
            .unwrap_or_default();

        let now = self.ctx.clock.now_millis();
        let window_ms = i64::try_from(self.advisory.window.as_millis()).unwrap_or(i64::MAX);

        Ok(stamps
            .into_iter()
            .filter(|stamp| now - stamp < window_ms)
            .collect())
    }

    async fn write_back(&self, stamps: &[i64]) -> CoreResult<()> {
        let json = serde_json::to_string(stamps)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;
        self.ctx.history.save_raw_json(&json).await
    }
}
