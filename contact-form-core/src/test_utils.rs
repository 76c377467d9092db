//! 测试辅助模块
//!
//! 提供 mock 能力实现和便捷的测试工厂方法。

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use contact_form_transport::{
    DeliveryReceipt, MailTransport, Submission, TransportError, TransportKind, TransportMetadata,
};
use tokio::sync::{Mutex, RwLock};

use crate::error::CoreResult;
use crate::services::{ControllerContext, FormController};
use crate::traits::{Clock, FormView, HistoryStore};
use crate::types::{CounterTier, FeedbackKind, FieldId, FormProfile, SubmitControl};

// ===== MockView =====

/// 视图调用记录
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    ClearFeedback,
    ShowFeedback(FeedbackKind, String),
    SetSubmitControl(SubmitControl),
    SetFieldValidity(FieldId, Option<String>),
    SetCounter(usize, CounterTier),
    ResetFields,
}

/// 按顺序记录全部调用的视图 mock
pub struct MockView {
    events: RwLock<Vec<ViewEvent>>,
}

impl MockView {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(Vec::new()),
        }
    }

    pub async fn events(&self) -> Vec<ViewEvent> {
        self.events.read().await.clone()
    }

    /// 已显示的横幅（kind, message）序列
    pub async fn banners(&self) -> Vec<(FeedbackKind, String)> {
        self.events
            .read()
            .await
            .iter()
            .filter_map(|e| match e {
                ViewEvent::ShowFeedback(kind, message) => Some((*kind, message.clone())),
                _ => None,
            })
            .collect()
    }

    /// 提交控件文案序列
    pub async fn control_labels(&self) -> Vec<String> {
        self.events
            .read()
            .await
            .iter()
            .filter_map(|e| match e {
                ViewEvent::SetSubmitControl(control) => Some(control.label.clone()),
                _ => None,
            })
            .collect()
    }

    /// 最后一次控件更新
    pub async fn last_control(&self) -> Option<SubmitControl> {
        self.events
            .read()
            .await
            .iter()
            .rev()
            .find_map(|e| match e {
                ViewEvent::SetSubmitControl(control) => Some(control.clone()),
                _ => None,
            })
    }

    /// 某字段的标记历史（`None` 表示被清除）
    pub async fn field_marks(&self, field: FieldId) -> Vec<Option<String>> {
        self.events
            .read()
            .await
            .iter()
            .filter_map(|e| match e {
                ViewEvent::SetFieldValidity(f, message) if *f == field => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// 计数显示历史
    pub async fn counters(&self) -> Vec<(usize, CounterTier)> {
        self.events
            .read()
            .await
            .iter()
            .filter_map(|e| match e {
                ViewEvent::SetCounter(count, tier) => Some((*count, *tier)),
                _ => None,
            })
            .collect()
    }

    pub async fn reset_count(&self) -> usize {
        self.events
            .read()
            .await
            .iter()
            .filter(|e| matches!(e, ViewEvent::ResetFields))
            .count()
    }

    pub async fn clear_count(&self) -> usize {
        self.events
            .read()
            .await
            .iter()
            .filter(|e| matches!(e, ViewEvent::ClearFeedback))
            .count()
    }
}

#[async_trait]
impl FormView for MockView {
    async fn clear_feedback(&self) {
        self.events.write().await.push(ViewEvent::ClearFeedback);
    }

    async fn show_feedback(&self, kind: FeedbackKind, message: &str) {
        self.events
            .write()
            .await
            .push(ViewEvent::ShowFeedback(kind, message.to_string()));
    }

    async fn set_submit_control(&self, control: &SubmitControl) {
        self.events
            .write()
            .await
            .push(ViewEvent::SetSubmitControl(control.clone()));
    }

    async fn set_field_validity(&self, field: FieldId, error: Option<&str>) {
        self.events
            .write()
            .await
            .push(ViewEvent::SetFieldValidity(field, error.map(String::from)));
    }

    async fn set_counter(&self, count: usize, tier: CounterTier) {
        self.events
            .write()
            .await
            .push(ViewEvent::SetCounter(count, tier));
    }

    async fn reset_fields(&self) {
        self.events.write().await.push(ViewEvent::ResetFields);
    }
}

// ===== MockHistoryStore =====

pub struct MockHistoryStore {
    raw: RwLock<Option<String>>,
}

impl MockHistoryStore {
    pub fn new() -> Self {
        Self {
            raw: RwLock::new(None),
        }
    }

    pub async fn seed(&self, json: &str) {
        *self.raw.write().await = Some(json.to_string());
    }

    pub async fn raw(&self) -> Option<String> {
        self.raw.read().await.clone()
    }
}

#[async_trait]
impl HistoryStore for MockHistoryStore {
    async fn load_raw_json(&self) -> CoreResult<Option<String>> {
        Ok(self.raw.read().await.clone())
    }

    async fn save_raw_json(&self, json: &str) -> CoreResult<()> {
        *self.raw.write().await = Some(json.to_string());
        Ok(())
    }
}

// ===== MockClock =====

pub struct MockClock {
    now: AtomicI64,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            now: AtomicI64::new(0),
        }
    }

    pub fn set(&self, millis: i64) {
        self.now.store(millis, Ordering::SeqCst);
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

// ===== ScriptedTransport =====

/// 按脚本返回结果的投递通道 mock
///
/// 结果队列为空时默认投递成功（无确认文案）。
pub struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<DeliveryReceipt, TransportError>>>,
    prepare_error: Mutex<Option<TransportError>>,
    submissions: RwLock<Vec<Submission>>,
    delay: RwLock<Option<Duration>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            outcomes: Mutex::new(VecDeque::new()),
            prepare_error: Mutex::new(None),
            submissions: RwLock::new(Vec::new()),
            delay: RwLock::new(None),
        }
    }

    pub async fn push_ok(&self, message: Option<&str>) {
        self.outcomes.lock().await.push_back(Ok(DeliveryReceipt {
            message: message.map(String::from),
        }));
    }

    pub async fn push_err(&self, err: TransportError) {
        self.outcomes.lock().await.push_back(Err(err));
    }

    pub async fn fail_next_prepare(&self, err: TransportError) {
        *self.prepare_error.lock().await = Some(err);
    }

    /// 让后续提交在返回前挂起给定时长（配合暂停时钟模拟在途请求）
    pub async fn set_delay(&self, delay: Duration) {
        *self.delay.write().await = Some(delay);
    }

    pub async fn submission_count(&self) -> usize {
        self.submissions.read().await.len()
    }

    pub async fn submissions(&self) -> Vec<Submission> {
        self.submissions.read().await.clone()
    }
}

#[async_trait]
impl MailTransport for ScriptedTransport {
    fn id(&self) -> &'static str {
        "scripted"
    }

    fn metadata() -> TransportMetadata {
        TransportMetadata {
            kind: TransportKind::TokenBackend,
            display_name: "Scripted".to_string(),
            description: "Test double".to_string(),
            config_fields: Vec::new(),
        }
    }

    async fn prepare(&self) -> contact_form_transport::Result<()> {
        match self.prepare_error.lock().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn submit(
        &self,
        submission: &Submission,
    ) -> contact_form_transport::Result<DeliveryReceipt> {
        self.submissions.write().await.push(submission.clone());

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        match self.outcomes.lock().await.pop_front() {
            Some(outcome) => outcome,
            None => Ok(DeliveryReceipt { message: None }),
        }
    }
}

// ===== 工厂方法 =====

/// 创建测试用 `ControllerContext`
pub fn create_test_context() -> (
    Arc<ControllerContext>,
    Arc<MockView>,
    Arc<MockHistoryStore>,
    Arc<MockClock>,
    Arc<ScriptedTransport>,
) {
    let view = Arc::new(MockView::new());
    let history = Arc::new(MockHistoryStore::new());
    let clock = Arc::new(MockClock::new());
    let transport = Arc::new(ScriptedTransport::new());

    let ctx = Arc::new(ControllerContext::new(
        transport.clone(),
        view.clone(),
        history.clone(),
        clock.clone(),
    ));

    (ctx, view, history, clock, transport)
}

/// 创建测试用 `FormController`
pub fn create_test_controller(
    profile: FormProfile,
) -> (
    Arc<FormController>,
    Arc<MockView>,
    Arc<MockHistoryStore>,
    Arc<MockClock>,
    Arc<ScriptedTransport>,
) {
    let (ctx, view, history, clock, transport) = create_test_context();
    let controller = Arc::new(FormController::new(ctx, profile, Vec::new()));
    (controller, view, history, clock, transport)
}

/// 填入一组全部通过校验的字段值
pub async fn fill_valid_fields(controller: &FormController) {
    controller
        .handle_field_input(FieldId::Name, "Jane Doe")
        .await;
    controller
        .handle_field_input(FieldId::Email, "jane@example.com")
        .await;
    controller
        .handle_field_input(FieldId::Subject, "Print inquiry")
        .await;
    controller
        .handle_field_input(FieldId::Message, "I'd like to order a large print.")
        .await;
}
