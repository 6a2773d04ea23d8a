//! 骑手工作台
//!
//! 三个标签页：可接配送、进行中配送、通知。每个标签页在激活时加载，
//! 任何操作成功后重新加载当前标签页。状态流转由后端执行，
//! 这里只负责展示当前进度并提供下一步操作。

use super::{LoadTicket, Loadable, StateCell};
use crate::client::ApiClient;
use crate::error::ClientError;
use crate::request::HttpClient;
use crate::session::SessionStore;
use farmgate_shared::{Delivery, DeliveryStatus, Notification};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiderTab {
    #[default]
    Available,
    Active,
    Notifications,
}

impl RiderTab {
    pub const ALL: [RiderTab; 3] = [RiderTab::Available, RiderTab::Active, RiderTab::Notifications];
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RiderView {
    pub tab: RiderTab,
    pub available: Loadable<Vec<Delivery>>,
    pub active: Loadable<Vec<Delivery>>,
    pub notifications: Loadable<Vec<Notification>>,
    /// 所有标签页共用一条错误提示，每次加载开始时清除
    pub error: Option<String>,
}

impl RiderView {
    /// 标签文字，配送类标签带数量
    pub fn tab_label(&self, tab: RiderTab) -> String {
        match tab {
            RiderTab::Available => format!("Available Deliveries ({})", self.available.items().len()),
            RiderTab::Active => format!("Active Deliveries ({})", self.active.items().len()),
            RiderTab::Notifications => "Notifications".to_string(),
        }
    }

    pub fn is_loading(&self) -> bool {
        match self.tab {
            RiderTab::Available => self.available.is_loading(),
            RiderTab::Active => self.active.is_loading(),
            RiderTab::Notifications => self.notifications.is_loading(),
        }
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        match self.tab {
            RiderTab::Available if self.available.items().is_empty() => {
                Some("No available deliveries at the moment")
            }
            RiderTab::Active if self.active.items().is_empty() => {
                Some("You have no active deliveries")
            }
            RiderTab::Notifications if self.notifications.items().is_empty() => {
                Some("No notifications yet")
            }
            _ => None,
        }
    }

    fn on_failed(&mut self, prefix: &str, err: &ClientError) {
        self.error = Some(format!("{}{}", prefix, err.user_message(&err.to_string())));
    }
}

// =========================================================
// 配送卡片
// =========================================================

/// 单张配送卡片上的表单状态
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeliveryCardView {
    pub reject_open: bool,
    pub reject_reason: String,
    pub status_open: bool,
    pub selected_status: Option<DeliveryStatus>,
    pub status_notes: String,
}

impl DeliveryCardView {
    pub fn toggle_reject(&mut self) {
        self.reject_open = !self.reject_open;
    }

    pub fn cancel_reject(&mut self) {
        self.reject_open = false;
        self.reject_reason.clear();
    }

    pub fn can_confirm_reject(&self) -> bool {
        !self.reject_reason.trim().is_empty()
    }

    /// 原因为空时不提交；提交后收起表单
    pub fn on_reject_submit(&mut self) -> Option<String> {
        if !self.can_confirm_reject() {
            return None;
        }
        let reason = std::mem::take(&mut self.reject_reason);
        self.reject_open = false;
        Some(reason)
    }

    pub fn toggle_status(&mut self) {
        self.status_open = !self.status_open;
    }

    /// 选择框的值，空字符串表示未选择
    pub fn select_status(&mut self, raw: &str) {
        self.selected_status = DeliveryStatus::from_str_opt(raw)
            .filter(|s| DeliveryStatus::RIDER_UPDATES.contains(s));
    }

    pub fn on_status_submit(&mut self) -> Option<(DeliveryStatus, String)> {
        let status = self.selected_status.take()?;
        let notes = std::mem::take(&mut self.status_notes);
        self.status_open = false;
        Some((status, notes))
    }
}

/// 已完成的配送不再显示进度与状态更新
pub fn can_update_status(delivery: &Delivery) -> bool {
    delivery.status != DeliveryStatus::Completed
}

/// 到达买家处后才提供 "完成配送"
pub fn can_complete(delivery: &Delivery) -> bool {
    delivery.status == DeliveryStatus::Arrived
}

/// 进度条上的一步
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerStep {
    pub status: DeliveryStatus,
    pub number: usize,
    pub active: bool,
    pub completed: bool,
}

/// 当前状态及其之前的步骤都算已完成；不在线性进度中的状态没有已完成步骤
pub fn tracker_steps(current: DeliveryStatus) -> Vec<TrackerStep> {
    let current_index = current.step_index();
    DeliveryStatus::PROGRESSION
        .iter()
        .enumerate()
        .map(|(idx, &status)| TrackerStep {
            status,
            number: idx + 1,
            active: status == current,
            completed: current_index.is_some_and(|c| idx <= c),
        })
        .collect()
}

// =========================================================
// 加载
// =========================================================

fn begin<T>(state: &impl StateCell<RiderView>, pick: fn(&mut RiderView) -> &mut Loadable<T>) -> Option<LoadTicket> {
    state.update(|s| {
        s.error = None;
        pick(s).begin()
    })
}

fn finish<T: Default>(
    state: &impl StateCell<RiderView>,
    ticket: LoadTicket,
    pick: fn(&mut RiderView) -> &mut Loadable<T>,
    result: Result<T, ClientError>,
    fallback: &str,
) {
    state.update(|s| {
        if let Some(Err(msg)) = pick(s).apply_or_keep(ticket, result.map_err(|_| fallback.to_string())) {
            s.error = Some(msg);
        }
    });
}

pub async fn load_available<H, S, C>(client: &ApiClient<H, S>, state: &C)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<RiderView>,
{
    let Some(ticket) = begin(state, |s| &mut s.available) else {
        return;
    };
    let result = client.available_deliveries().await;
    finish(state, ticket, |s| &mut s.available, result, "Failed to load available deliveries");
}

pub async fn load_active<H, S, C>(client: &ApiClient<H, S>, state: &C)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<RiderView>,
{
    let Some(ticket) = begin(state, |s| &mut s.active) else {
        return;
    };
    let result = client.my_pending_deliveries().await;
    finish(state, ticket, |s| &mut s.active, result, "Failed to load pending deliveries");
}

pub async fn load_notifications<H, S, C>(client: &ApiClient<H, S>, state: &C)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<RiderView>,
{
    let Some(ticket) = begin(state, |s| &mut s.notifications) else {
        return;
    };
    let result = client.my_notifications().await;
    finish(state, ticket, |s| &mut s.notifications, result, "Failed to load notifications");
}

/// 重新加载当前标签页
pub async fn reload<H, S, C>(client: &ApiClient<H, S>, state: &C)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<RiderView>,
{
    match state.read(|s| s.tab) {
        Some(RiderTab::Available) => load_available(client, state).await,
        Some(RiderTab::Active) => load_active(client, state).await,
        Some(RiderTab::Notifications) => load_notifications(client, state).await,
        None => {}
    }
}

pub async fn select_tab<H, S, C>(client: &ApiClient<H, S>, state: &C, tab: RiderTab)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<RiderView>,
{
    if state.update(|s| s.tab = tab).is_none() {
        return;
    }
    reload(client, state).await;
}

// =========================================================
// 配送操作
// =========================================================

pub async fn accept<H, S, C>(client: &ApiClient<H, S>, state: &C, delivery_id: u64)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<RiderView>,
{
    match client.accept_delivery(delivery_id).await {
        Ok(_) => {
            info!(delivery_id, "delivery accepted");
            reload(client, state).await;
        }
        Err(e) => {
            state.update(|s| s.on_failed("Failed to accept delivery: ", &e));
        }
    }
}

pub async fn reject<H, S, C>(client: &ApiClient<H, S>, state: &C, delivery_id: u64, reason: &str)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<RiderView>,
{
    if reason.trim().is_empty() {
        return;
    }
    match client.reject_delivery(delivery_id, reason).await {
        Ok(_) => {
            info!(delivery_id, "delivery rejected");
            reload(client, state).await;
        }
        Err(e) => {
            state.update(|s| s.on_failed("Failed to reject delivery: ", &e));
        }
    }
}

pub async fn update_status<H, S, C>(
    client: &ApiClient<H, S>,
    state: &C,
    delivery_id: u64,
    status: DeliveryStatus,
    notes: &str,
) where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<RiderView>,
{
    match client.update_delivery_status(delivery_id, status, notes).await {
        Ok(_) => {
            info!(delivery_id, status = status.as_str(), "delivery status updated");
            reload(client, state).await;
        }
        Err(e) => {
            state.update(|s| s.on_failed("Failed to update delivery status: ", &e));
        }
    }
}

pub async fn complete<H, S, C>(client: &ApiClient<H, S>, state: &C, delivery_id: u64)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<RiderView>,
{
    match client.complete_delivery(delivery_id).await {
        Ok(_) => {
            info!(delivery_id, "delivery completed");
            reload(client, state).await;
        }
        Err(e) => {
            state.update(|s| s.on_failed("Failed to complete delivery: ", &e));
        }
    }
}
