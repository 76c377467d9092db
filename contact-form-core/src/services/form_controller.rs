//! 表单提交控制器
//!
//! 把页面的离散事件（就绪、blur、input、submit、定时器）收拢成一台
//! 显式状态机：Idle → Loading → Success | Error。所有触发都在宿主的
//! 单线程事件模型上串行执行；异步步骤（令牌获取、提交 POST）挂起
//! 当前处理流程期间提交控件保持禁用，杜绝并发的第二次提交。
//!
//! 任何状态切换都会先取消先前计划的消隐/冷却定时器再安排新的，
//! 过期定时器不可能藏起后来动作刚亮出的横幅。

use std::sync::Arc;
use std::time::Duration;

use contact_form_transport::{DeliveryReceipt, TransportError};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::error::{CoreError, CoreResult};
use crate::services::{ControllerContext, RateAdvisor};
use crate::types::{
    FeedbackKind, FieldId, FieldValidationResult, FormProfile, FormState, FormValues,
    SubmitControl,
};
use crate::validation::{validate_field, validate_form};

// ============ 用户可见文案 ============

pub(crate) const MSG_INIT_FAILED: &str = "Failed to initialize form. Please refresh the page.";
pub(crate) const MSG_FIX_ERRORS: &str = "Please correct the errors below.";
pub(crate) const MSG_SENDING: &str = "Sending your message...";
pub(crate) const MSG_NETWORK: &str =
    "Network error. Please check your connection and try again.";
pub(crate) const MSG_GENERIC_FAILURE: &str =
    "Sorry, there was an error sending your message. Please try again.";
pub(crate) const MSG_CHECK_FIELDS: &str = "Please check your form fields and try again.";
pub(crate) const MSG_RATE_LIMITED: &str =
    "Too many requests. Please wait before sending another message.";
pub(crate) const MSG_APPROACHING_LIMIT: &str =
    "You are approaching the submission limit. Please wait before sending another message.";
pub(crate) const MSG_DEFAULT_SUCCESS: &str = "Your message has been sent. Thank you!";

/// 计划中的一次性定时任务句柄
#[derive(Default)]
struct TimerSlots {
    dismiss: Option<JoinHandle<()>>,
    cooldown: Option<JoinHandle<()>>,
}

/// 表单提交控制器
///
/// 页面就绪时创建一次，页面卸载时随宿主一并丢弃。每个页面触发器
/// 对应一个分发方法：[`initialize`](Self::initialize)、
/// [`handle_field_blur`](Self::handle_field_blur)、
/// [`handle_field_input`](Self::handle_field_input)、
/// [`handle_submit`](Self::handle_submit)。
pub struct FormController {
    ctx: Arc<ControllerContext>,
    profile: Arc<FormProfile>,
    state: Arc<RwLock<FormState>>,
    values: Arc<RwLock<FormValues>>,
    timers: Arc<Mutex<TimerSlots>>,
    advisor: Option<RateAdvisor>,
}

impl FormController {
    /// 创建控制器实例
    ///
    /// # Arguments
    /// * `ctx` - 注入的平台能力
    /// * `profile` - 页面部署变体的预设
    /// * `hidden_fields` - 页面标记里的隐藏 honeypot/meta 字段
    #[must_use]
    pub fn new(
        ctx: Arc<ControllerContext>,
        profile: FormProfile,
        hidden_fields: Vec<(String, String)>,
    ) -> Self {
        let advisor = profile
            .advisory
            .clone()
            .map(|advisory| RateAdvisor::new(ctx.clone(), advisory));

        Self {
            ctx,
            profile: Arc::new(profile),
            state: Arc::new(RwLock::new(FormState::Idle)),
            values: Arc::new(RwLock::new(FormValues::new(hidden_fields))),
            timers: Arc::new(Mutex::new(TimerSlots::default())),
            advisor,
        }
    }

    /// 当前状态
    pub async fn state(&self) -> FormState {
        *self.state.read().await
    }

    // ============ 页面触发器 ============

    /// 页面就绪
    ///
    /// 发布初始控件与计数显示，跑软性限额预警，再做投递准备
    /// （token 变体在此预取防伪令牌）。准备失败只亮横幅，不阻塞
    /// 后续提交——通道会在提交时懒取令牌重试。
    pub async fn initialize(&self) -> CoreResult<()> {
        self.ctx
            .view
            .set_submit_control(&SubmitControl::ready())
            .await;
        self.publish_counter().await;

        if let Some(advisor) = &self.advisor {
            match advisor.check_on_load().await {
                Ok(true) => self.show_error_banner(MSG_APPROACHING_LIMIT).await,
                Ok(false) => {}
                Err(e) => log::error!("Submission-history check failed: {e}"),
            }
        }

        if let Err(e) = self.ctx.transport.prepare().await {
            log::error!("Form initialization failed: {e}");
            self.show_error_banner(MSG_INIT_FAILED).await;
        }

        Ok(())
    }

    /// 字段输入
    ///
    /// 镜像最新值、清除该字段的错误标记；消息字段同时刷新计数。
    pub async fn handle_field_input(&self, field: FieldId, value: &str) {
        self.values.write().await.set(field, value.to_string());
        self.ctx.view.set_field_validity(field, None).await;

        if field == FieldId::Message {
            self.publish_counter().await;
        }
    }

    /// 字段失焦：就地校验并发布结果
    pub async fn handle_field_blur(&self, field: FieldId) -> CoreResult<FieldValidationResult> {
        let spec = self
            .profile
            .spec_of(field)
            .ok_or_else(|| CoreError::UnknownField(field.to_string()))?;

        let result = {
            let values = self.values.read().await;
            validate_field(spec, values.value_of(field), self.profile.rules)
        };

        self.ctx
            .view
            .set_field_validity(field, result.error_message.as_deref())
            .await;
        Ok(result)
    }

    /// 提交
    ///
    /// 校验通过才放行：Idle → Loading（先禁用提交控件），恰好发出
    /// 一次网络请求，然后依结果收敛到 Success 或 Error。在途提交或
    /// 冷却期内的重复触发被直接忽略。
    pub async fn handle_submit(&self) -> CoreResult<()> {
        if *self.state.read().await == FormState::Loading {
            log::debug!("Ignoring submit while a submission is in flight");
            return Ok(());
        }
        if self.cooldown_active().await {
            log::debug!("Ignoring submit during cooldown");
            return Ok(());
        }

        // 表单级校验：访问全部字段并标记每个无效项
        let results = {
            let values = self.values.read().await;
            validate_form(&self.profile, &values)
        };
        let mut all_valid = true;
        for result in &results {
            self.ctx
                .view
                .set_field_validity(result.field, result.error_message.as_deref())
                .await;
            all_valid &= result.is_valid;
        }
        if !all_valid {
            self.show_error_banner(MSG_FIX_ERRORS).await;
            return Ok(());
        }

        // Idle → Loading：先禁用控件，再发起唯一一次请求
        self.cancel_timers().await;
        *self.state.write().await = FormState::Loading;
        self.ctx.view.clear_feedback().await;
        self.ctx
            .view
            .set_submit_control(&SubmitControl::sending())
            .await;
        self.ctx
            .view
            .show_feedback(FeedbackKind::Loading, MSG_SENDING)
            .await;

        let submission = self.values.read().await.to_submission();
        match self.ctx.transport.submit(&submission).await {
            Ok(receipt) => self.on_delivered(receipt).await,
            Err(e) => self.on_failed(e).await,
        }

        Ok(())
    }

    // ============ 结果处理 ============

    async fn on_delivered(&self, receipt: DeliveryReceipt) {
        log::info!("Submission delivered via {}", self.ctx.transport.id());

        self.cancel_timers().await;
        *self.state.write().await = FormState::Success;
        self.ctx.view.clear_feedback().await;
        self.ctx
            .view
            .set_submit_control(&SubmitControl::ready())
            .await;

        let message = receipt
            .message
            .unwrap_or_else(|| MSG_DEFAULT_SUCCESS.to_string());
        self.ctx
            .view
            .show_feedback(FeedbackKind::Success, &message)
            .await;

        if let Some(advisor) = &self.advisor {
            if let Err(e) = advisor.record().await {
                log::error!("Failed to record submission timestamp: {e}");
            }
        }

        if self.profile.reset_on_dismiss {
            // 横幅消隐时一并重置（中继页面的行为）
            self.schedule_dismiss(self.profile.dismiss.success_after, true)
                .await;
        } else {
            self.reset_form().await;
            self.schedule_dismiss(self.profile.dismiss.success_after, false)
                .await;
        }
    }

    async fn on_failed(&self, err: TransportError) {
        if err.is_expected() {
            log::warn!("Submission failed: {err}");
        } else {
            log::error!("Submission failed: {err}");
        }

        self.cancel_timers().await;
        *self.state.write().await = FormState::Error;
        self.ctx
            .view
            .set_submit_control(&SubmitControl::ready())
            .await;

        let banner = match &err {
            TransportError::RateLimited { .. } => MSG_RATE_LIMITED.to_string(),
            TransportError::NetworkError { .. } | TransportError::Timeout { .. } => {
                MSG_NETWORK.to_string()
            }
            TransportError::FieldsRejected { .. } => MSG_CHECK_FIELDS.to_string(),
            TransportError::ParseError { .. } | TransportError::SerializationError { .. } => {
                MSG_GENERIC_FAILURE.to_string()
            }
            other => other
                .server_message()
                .map_or_else(|| MSG_GENERIC_FAILURE.to_string(), str::to_string),
        };
        self.show_error_banner(&banner).await;

        if let TransportError::RateLimited { retry_after, .. } = &err {
            let secs = retry_after.unwrap_or(self.profile.cooldown.as_secs());
            self.start_cooldown(secs).await;
        }
    }

    // ============ 视图辅助 ============

    /// 亮出错误横幅并按策略安排消隐
    ///
    /// 只取消旧的消隐定时器；冷却倒计时不受横幅更迭影响。
    async fn show_error_banner(&self, message: &str) {
        {
            let mut timers = self.timers.lock().await;
            if let Some(handle) = timers.dismiss.take() {
                handle.abort();
            }
        }
        self.ctx.view.clear_feedback().await;
        self.ctx
            .view
            .show_feedback(FeedbackKind::Error, message)
            .await;
        self.schedule_dismiss(self.profile.dismiss.error_after, false)
            .await;
    }

    async fn publish_counter(&self) {
        let count = {
            let values = self.values.read().await;
            values.value_of(FieldId::Message).chars().count()
        };
        self.ctx
            .view
            .set_counter(count, self.profile.counter.tier(count))
            .await;
    }

    async fn reset_form(&self) {
        self.values.write().await.reset();
        self.ctx.view.reset_fields().await;
        self.publish_counter().await;
    }

    // ============ 定时器 ============

    async fn cancel_timers(&self) {
        let mut timers = self.timers.lock().await;
        if let Some(handle) = timers.dismiss.take() {
            handle.abort();
        }
        if let Some(handle) = timers.cooldown.take() {
            handle.abort();
        }
    }

    async fn cooldown_active(&self) -> bool {
        self.timers
            .lock()
            .await
            .cooldown
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// 安排横幅消隐；`reset_after` 为真时消隐同时重置表单与计数
    async fn schedule_dismiss(&self, delay: Option<Duration>, reset_after: bool) {
        let Some(delay) = delay else {
            return;
        };

        let ctx = self.ctx.clone();
        let values = self.values.clone();
        let state = self.state.clone();
        let counter = self.profile.counter.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            ctx.view.clear_feedback().await;
            if reset_after {
                values.write().await.reset();
                ctx.view.reset_fields().await;
                ctx.view.set_counter(0, counter.tier(0)).await;
            }
            *state.write().await = FormState::Idle;
        });

        let mut timers = self.timers.lock().await;
        if let Some(old) = timers.dismiss.replace(handle) {
            old.abort();
        }
    }

    /// 进入冷却：禁用提交控件并逐秒倒数到 "Wait 0s"，随后恢复
    async fn start_cooldown(&self, total_secs: u64) {
        log::warn!("Entering submission cooldown for {total_secs}s");

        let ctx = self.ctx.clone();
        let handle = tokio::spawn(async move {
            let mut remaining = total_secs;
            loop {
                ctx.view
                    .set_submit_control(&SubmitControl::cooling_down(remaining))
                    .await;
                tokio::time::sleep(Duration::from_secs(1)).await;
                if remaining == 0 {
                    break;
                }
                remaining -= 1;
            }
            ctx.view.set_submit_control(&SubmitControl::ready()).await;
        });

        let mut timers = self.timers.lock().await;
        if let Some(old) = timers.cooldown.replace(handle) {
            old.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_controller, fill_valid_fields, ViewEvent};
    use crate::types::CounterTier;

    const HOUR_MS: i64 = 60 * 60 * 1000;

    fn short_cooldown_profile() -> FormProfile {
        let mut profile = FormProfile::token_backend();
        profile.cooldown = Duration::from_secs(3);
        profile
    }

    // ---- Submission happy path ----

    #[tokio::test]
    async fn valid_submit_delivers_exactly_once() {
        let (controller, view, _history, _clock, transport) =
            create_test_controller(FormProfile::token_backend());
        transport.push_ok(Some("Thank you, talk soon!")).await;

        fill_valid_fields(&controller).await;
        controller.handle_submit().await.unwrap();

        assert_eq!(transport.submission_count().await, 1);
        assert_eq!(controller.state().await, FormState::Success);

        let sent = transport.submissions().await;
        assert_eq!(sent[0].email, "jane@example.com");
        assert_eq!(sent[0].name, "Jane Doe");

        let banners = view.banners().await;
        assert!(banners.contains(&(FeedbackKind::Loading, MSG_SENDING.to_string())));
        assert!(banners.contains(&(FeedbackKind::Success, "Thank you, talk soon!".to_string())));
    }

    #[tokio::test]
    async fn submit_disables_control_before_request() {
        let (controller, view, _history, _clock, transport) =
            create_test_controller(FormProfile::token_backend());
        transport.push_ok(None).await;

        fill_valid_fields(&controller).await;
        controller.handle_submit().await.unwrap();

        let events = view.events().await;
        let sending_at = events
            .iter()
            .position(|e| {
                matches!(e, ViewEvent::SetSubmitControl(control) if !control.enabled && control.label == "Sending...")
            })
            .expect("control must be disabled first");
        let success_at = events
            .iter()
            .position(|e| matches!(e, ViewEvent::ShowFeedback(FeedbackKind::Success, _)))
            .expect("success banner must appear");
        assert!(sending_at < success_at, "Loading 必须先禁用控件");
    }

    #[tokio::test]
    async fn token_variant_resets_immediately_on_success() {
        let (controller, view, _history, _clock, transport) =
            create_test_controller(FormProfile::token_backend());
        transport.push_ok(None).await;

        fill_valid_fields(&controller).await;
        controller.handle_submit().await.unwrap();

        assert_eq!(view.reset_count().await, 1);
        // 重置后计数归零
        assert_eq!(view.counters().await.last(), Some(&(0, CounterTier::Normal)));
    }

    #[tokio::test]
    async fn success_records_submission_history() {
        let (controller, _view, history, clock, transport) =
            create_test_controller(FormProfile::token_backend());
        clock.set(7 * HOUR_MS);
        transport.push_ok(None).await;

        fill_valid_fields(&controller).await;
        controller.handle_submit().await.unwrap();

        assert_eq!(
            history.raw().await.as_deref(),
            Some(format!("[{}]", 7 * HOUR_MS).as_str())
        );
    }

    // ---- Form-level validation ----

    #[tokio::test]
    async fn invalid_form_blocks_submission() {
        let (controller, view, _history, _clock, transport) =
            create_test_controller(FormProfile::token_backend());

        controller.handle_submit().await.unwrap();

        assert_eq!(transport.submission_count().await, 0);
        assert_eq!(controller.state().await, FormState::Idle);
        assert!(view
            .banners()
            .await
            .contains(&(FeedbackKind::Error, MSG_FIX_ERRORS.to_string())));

        // 每个无效字段都被标记
        for field in FieldId::all() {
            let marks = view.field_marks(field).await;
            assert!(
                matches!(marks.last(), Some(Some(_))),
                "{field} 应被标记为无效"
            );
        }
    }

    // ---- Auto-dismiss ----

    #[tokio::test(start_paused = true)]
    async fn success_banner_auto_dismisses() {
        let (controller, view, _history, _clock, transport) =
            create_test_controller(FormProfile::token_backend());
        transport.push_ok(None).await;

        fill_valid_fields(&controller).await;
        controller.handle_submit().await.unwrap();
        let clears_before = view.clear_count().await;

        tokio::time::sleep(Duration::from_secs(6)).await;

        assert!(view.clear_count().await > clears_before, "5 秒后横幅应消隐");
        assert_eq!(controller.state().await, FormState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn relay_resets_fields_at_dismiss_time() {
        let (controller, view, _history, _clock, transport) =
            create_test_controller(FormProfile::relay());
        transport.push_ok(None).await;

        fill_valid_fields(&controller).await;
        controller.handle_submit().await.unwrap();

        // 中继页面成功横幅用默认文案，且重置要等到消隐
        assert!(view
            .banners()
            .await
            .contains(&(FeedbackKind::Success, MSG_DEFAULT_SUCCESS.to_string())));
        assert_eq!(view.reset_count().await, 0);

        tokio::time::sleep(Duration::from_secs(6)).await;

        assert_eq!(view.reset_count().await, 1);
        assert_eq!(view.counters().await.last(), Some(&(0, CounterTier::Normal)));
        assert_eq!(controller.state().await, FormState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn token_error_banner_dismisses_after_eight_seconds() {
        let (controller, view, _history, _clock, transport) =
            create_test_controller(FormProfile::token_backend());
        transport
            .push_err(TransportError::NetworkError {
                transport: "scripted".to_string(),
                detail: "connection refused".to_string(),
            })
            .await;

        fill_valid_fields(&controller).await;
        controller.handle_submit().await.unwrap();

        assert!(view
            .banners()
            .await
            .contains(&(FeedbackKind::Error, MSG_NETWORK.to_string())));
        let clears_before = view.clear_count().await;

        tokio::time::sleep(Duration::from_secs(9)).await;
        assert!(view.clear_count().await > clears_before);
        assert_eq!(controller.state().await, FormState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn relay_error_banner_persists() {
        let (controller, view, _history, _clock, transport) =
            create_test_controller(FormProfile::relay());
        transport
            .push_err(TransportError::Unknown {
                transport: "scripted".to_string(),
                raw_code: Some("500".to_string()),
                raw_message: "Relay refused the submission (HTTP 500)".to_string(),
            })
            .await;

        fill_valid_fields(&controller).await;
        controller.handle_submit().await.unwrap();
        let clears_before = view.clear_count().await;

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(view.clear_count().await, clears_before, "中继错误横幅不自动消隐");
        assert_eq!(controller.state().await, FormState::Error);
    }

    // ---- Failure banners ----

    #[tokio::test]
    async fn network_error_shows_generic_connectivity_banner() {
        let (controller, view, _history, _clock, transport) =
            create_test_controller(FormProfile::token_backend());
        transport
            .push_err(TransportError::Timeout {
                transport: "scripted".to_string(),
                detail: "30s elapsed".to_string(),
            })
            .await;

        fill_valid_fields(&controller).await;
        controller.handle_submit().await.unwrap();

        assert_eq!(controller.state().await, FormState::Error);
        assert!(view
            .banners()
            .await
            .contains(&(FeedbackKind::Error, MSG_NETWORK.to_string())));
        assert_eq!(view.last_control().await.map(|c| c.enabled), Some(true));
    }

    #[tokio::test]
    async fn server_refusal_shows_server_message() {
        let (controller, view, _history, _clock, transport) =
            create_test_controller(FormProfile::token_backend());
        transport
            .push_err(TransportError::Unknown {
                transport: "scripted".to_string(),
                raw_code: None,
                raw_message: "Message flagged as spam".to_string(),
            })
            .await;

        fill_valid_fields(&controller).await;
        controller.handle_submit().await.unwrap();

        assert!(view
            .banners()
            .await
            .contains(&(FeedbackKind::Error, "Message flagged as spam".to_string())));
    }

    #[tokio::test]
    async fn token_rejection_shows_server_message() {
        let (controller, view, _history, _clock, transport) =
            create_test_controller(FormProfile::token_backend());
        transport
            .push_err(TransportError::TokenRejected {
                transport: "scripted".to_string(),
                raw_message: Some("Invalid security token. Please refresh.".to_string()),
            })
            .await;

        fill_valid_fields(&controller).await;
        controller.handle_submit().await.unwrap();

        assert!(view.banners().await.contains(&(
            FeedbackKind::Error,
            "Invalid security token. Please refresh.".to_string()
        )));
    }

    #[tokio::test]
    async fn fields_rejection_prompts_field_check() {
        let (controller, view, _history, _clock, transport) =
            create_test_controller(FormProfile::relay());
        transport
            .push_err(TransportError::FieldsRejected {
                transport: "scripted".to_string(),
                errors: vec!["email: should be an email".to_string()],
            })
            .await;

        fill_valid_fields(&controller).await;
        controller.handle_submit().await.unwrap();

        assert!(view
            .banners()
            .await
            .contains(&(FeedbackKind::Error, MSG_CHECK_FIELDS.to_string())));
    }

    #[tokio::test]
    async fn malformed_response_maps_to_generic_failure() {
        let (controller, view, _history, _clock, transport) =
            create_test_controller(FormProfile::relay());
        transport
            .push_err(TransportError::ParseError {
                transport: "scripted".to_string(),
                detail: "expected value at line 1".to_string(),
            })
            .await;

        fill_valid_fields(&controller).await;
        controller.handle_submit().await.unwrap();

        assert!(view
            .banners()
            .await
            .contains(&(FeedbackKind::Error, MSG_GENERIC_FAILURE.to_string())));
    }

    // ---- Cooldown ----

    #[tokio::test(start_paused = true)]
    async fn rate_limit_counts_down_then_reenables() {
        let (controller, view, _history, _clock, transport) =
            create_test_controller(short_cooldown_profile());
        transport
            .push_err(TransportError::RateLimited {
                transport: "scripted".to_string(),
                retry_after: None,
                raw_message: Some("Too many".to_string()),
            })
            .await;

        fill_valid_fields(&controller).await;
        controller.handle_submit().await.unwrap();

        assert!(view
            .banners()
            .await
            .contains(&(FeedbackKind::Error, MSG_RATE_LIMITED.to_string())));

        tokio::time::sleep(Duration::from_secs(6)).await;

        let labels = view.control_labels().await;
        let countdown: Vec<&str> = labels
            .iter()
            .map(String::as_str)
            .filter(|label| label.starts_with("Wait"))
            .collect();
        assert_eq!(countdown, vec!["Wait 3s", "Wait 2s", "Wait 1s", "Wait 0s"]);
        assert_eq!(
            view.last_control().await,
            Some(SubmitControl::ready()),
            "倒数结束后控件恢复"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn default_cooldown_starts_at_sixty() {
        let (controller, view, _history, _clock, transport) =
            create_test_controller(FormProfile::token_backend());
        transport
            .push_err(TransportError::RateLimited {
                transport: "scripted".to_string(),
                retry_after: None,
                raw_message: None,
            })
            .await;

        fill_valid_fields(&controller).await;
        controller.handle_submit().await.unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(view
            .control_labels()
            .await
            .contains(&"Wait 60s".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn server_retry_after_overrides_default_cooldown() {
        let (controller, view, _history, _clock, transport) =
            create_test_controller(FormProfile::token_backend());
        transport
            .push_err(TransportError::RateLimited {
                transport: "scripted".to_string(),
                retry_after: Some(2),
                raw_message: None,
            })
            .await;

        fill_valid_fields(&controller).await;
        controller.handle_submit().await.unwrap();
        tokio::time::sleep(Duration::from_secs(4)).await;

        let labels = view.control_labels().await;
        assert!(labels.contains(&"Wait 2s".to_string()));
        assert!(!labels.contains(&"Wait 60s".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn submit_ignored_during_cooldown() {
        let (controller, _view, _history, _clock, transport) =
            create_test_controller(short_cooldown_profile());
        transport
            .push_err(TransportError::RateLimited {
                transport: "scripted".to_string(),
                retry_after: None,
                raw_message: None,
            })
            .await;

        fill_valid_fields(&controller).await;
        controller.handle_submit().await.unwrap();
        assert_eq!(transport.submission_count().await, 1);

        // 冷却期内的触发被忽略
        controller.handle_submit().await.unwrap();
        assert_eq!(transport.submission_count().await, 1);

        // 冷却结束后恢复
        tokio::time::sleep(Duration::from_secs(6)).await;
        controller.handle_submit().await.unwrap();
        assert_eq!(transport.submission_count().await, 2);
    }

    // ---- Re-entrancy ----

    #[tokio::test(start_paused = true)]
    async fn submit_ignored_while_in_flight() {
        let (controller, _view, _history, _clock, transport) =
            create_test_controller(FormProfile::token_backend());
        transport.set_delay(Duration::from_secs(10)).await;
        transport.push_ok(None).await;

        fill_valid_fields(&controller).await;

        let in_flight = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.handle_submit().await })
        };
        tokio::task::yield_now().await;

        // 第二次触发撞上在途提交，直接忽略
        controller.handle_submit().await.unwrap();

        tokio::time::sleep(Duration::from_secs(11)).await;
        in_flight.await.unwrap().unwrap();
        assert_eq!(transport.submission_count().await, 1);
    }

    // ---- Field triggers ----

    #[tokio::test]
    async fn blur_marks_invalid_field_and_input_clears_it() {
        let (controller, view, _history, _clock, _transport) =
            create_test_controller(FormProfile::token_backend());

        controller
            .handle_field_input(FieldId::Email, "not-an-email")
            .await;
        let result = controller.handle_field_blur(FieldId::Email).await.unwrap();
        assert!(!result.is_valid);

        let marks = view.field_marks(FieldId::Email).await;
        assert_eq!(
            marks.last().cloned().flatten().as_deref(),
            Some("Please enter a valid email address.")
        );

        controller
            .handle_field_input(FieldId::Email, "jane@example.com")
            .await;
        let marks = view.field_marks(FieldId::Email).await;
        assert_eq!(marks.last(), Some(&None));
    }

    #[tokio::test]
    async fn message_input_escalates_counter() {
        let (controller, view, _history, _clock, _transport) =
            create_test_controller(FormProfile::relay());

        controller
            .handle_field_input(FieldId::Message, &"a".repeat(1800))
            .await;
        assert_eq!(
            view.counters().await.last(),
            Some(&(1800, CounterTier::Warning))
        );

        controller
            .handle_field_input(FieldId::Message, &"a".repeat(1801))
            .await;
        assert_eq!(
            view.counters().await.last(),
            Some(&(1801, CounterTier::Danger))
        );
    }

    // ---- Initialization ----

    #[tokio::test]
    async fn initialize_publishes_control_and_counter() {
        let (controller, view, _history, _clock, _transport) =
            create_test_controller(FormProfile::token_backend());

        controller.initialize().await.unwrap();

        assert_eq!(view.last_control().await, Some(SubmitControl::ready()));
        assert_eq!(view.counters().await.last(), Some(&(0, CounterTier::Normal)));
    }

    #[tokio::test]
    async fn initialize_warns_when_history_is_crowded() {
        let (controller, view, history, clock, _transport) =
            create_test_controller(FormProfile::token_backend());
        clock.set(10 * HOUR_MS);
        history
            .seed(&format!(
                "[{},{},{},{}]",
                10 * HOUR_MS - 100,
                10 * HOUR_MS - 200,
                10 * HOUR_MS - 300,
                10 * HOUR_MS - 400
            ))
            .await;

        controller.initialize().await.unwrap();

        assert!(view
            .banners()
            .await
            .contains(&(FeedbackKind::Error, MSG_APPROACHING_LIMIT.to_string())));
    }

    #[tokio::test]
    async fn initialize_stays_quiet_when_history_is_stale() {
        let (controller, view, history, clock, _transport) =
            create_test_controller(FormProfile::token_backend());
        clock.set(10 * HOUR_MS);
        history
            .seed(&format!("[{},{}]", 8 * HOUR_MS, 8 * HOUR_MS + 100))
            .await;

        controller.initialize().await.unwrap();

        assert!(view.banners().await.is_empty());
        assert_eq!(history.raw().await.as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn failed_prepare_is_surfaced_but_not_fatal() {
        let (controller, view, _history, _clock, transport) =
            create_test_controller(FormProfile::token_backend());
        transport
            .fail_next_prepare(TransportError::NetworkError {
                transport: "scripted".to_string(),
                detail: "connection refused".to_string(),
            })
            .await;
        transport.push_ok(None).await;

        controller.initialize().await.unwrap();
        assert!(view
            .banners()
            .await
            .contains(&(FeedbackKind::Error, MSG_INIT_FAILED.to_string())));

        // 初始化失败不阻塞后续提交
        fill_valid_fields(&controller).await;
        controller.handle_submit().await.unwrap();
        assert_eq!(transport.submission_count().await, 1);
        assert_eq!(controller.state().await, FormState::Success);
    }
}
