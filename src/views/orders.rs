use super::{Loadable, StateCell};
use crate::client::ApiClient;
use crate::request::HttpClient;
use crate::session::SessionStore;
use farmgate_shared::{Order, OrderStatus};
use std::collections::BTreeSet;
use tracing::{info, warn};

/// 顾客的订单列表（轮询）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrdersView {
    pub orders: Loadable<Vec<Order>>,
    pub error: Option<String>,
    pub expanded: Option<u64>,
    /// 正在询问 "是否已收货" 的订单
    pub delivery_prompt: Option<u64>,
    /// 用户关闭过询问的订单，不再自动弹出
    dismissed: BTreeSet<u64>,
    pub confirming: Option<u64>,
}

/// 展开订单后的状态说明
pub fn status_note(order: &Order) -> Option<String> {
    match order.status {
        OrderStatus::Rejected => order.rejection_reason.as_ref().map(|reason| {
            format!(
                "Rejection Reason: {}. Items have been returned to your cart. You can modify quantities and try again.",
                reason
            )
        }),
        OrderStatus::Approved => {
            Some("Your order has been approved by the farmer! Preparing for delivery...".to_string())
        }
        OrderStatus::SimulationDelivery => Some(
            "Your order is on its way! Please confirm when you have received it.".to_string(),
        ),
        _ => None,
    }
}

impl OrdersView {
    pub fn toggle_expand(&mut self, id: u64) {
        self.expanded = if self.expanded == Some(id) { None } else { Some(id) };
    }

    /// 有订单进入模拟配送时弹出收货确认
    fn refresh_prompt(&mut self) {
        if self.delivery_prompt.is_some() {
            return;
        }
        let dismissed = &self.dismissed;
        self.delivery_prompt = self.orders.data().and_then(|orders| {
            orders
                .iter()
                .find(|o| o.status == OrderStatus::SimulationDelivery && !dismissed.contains(&o.id))
                .map(|o| o.id)
        });
    }

    pub fn on_loaded(&mut self, ticket: super::LoadTicket, result: Result<Vec<Order>, String>) {
        if let Some(outcome) = self.orders.apply_or_keep(ticket, result) {
            self.error = outcome.err();
            self.refresh_prompt();
        }
    }

    pub fn close_prompt(&mut self) {
        if let Some(id) = self.delivery_prompt.take() {
            self.dismissed.insert(id);
        }
    }
}

pub async fn load_orders<H, S, C>(client: &ApiClient<H, S>, state: &C)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<OrdersView>,
{
    let Some(ticket) = state.update(|s| s.orders.begin()) else {
        return;
    };
    let result = client.my_orders().await.map_err(|e| {
        warn!(error = %e, "failed to load orders");
        "Failed to load orders".to_string()
    });
    state.update(|s| s.on_loaded(ticket, result));
}

pub async fn confirm_received<H, S, C>(client: &ApiClient<H, S>, state: &C, order_id: u64)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<OrdersView>,
{
    state.update(|s| s.confirming = Some(order_id));
    match client.confirm_received(order_id).await {
        Ok(_) => {
            info!(order_id, "delivery confirmed");
            state.update(|s| s.delivery_prompt = None);
            load_orders(client, state).await;
        }
        Err(e) => {
            state.update(|s| s.error = Some(e.user_message("Failed to confirm delivery")));
        }
    }
    state.update(|s| s.confirming = None);
}
