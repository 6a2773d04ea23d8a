use super::{Feedback, Loadable, StateCell};
use crate::client::ApiClient;
use crate::request::HttpClient;
use crate::session::SessionStore;
use farmgate_shared::Order;
use tracing::{debug, info};

/// 农户待处理订单（轮询）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FarmerOrdersView {
    pub orders: Loadable<Vec<Order>>,
    pub rejecting: Option<u64>,
    pub reject_reason: String,
    pub feedback: Option<Feedback>,
}

impl FarmerOrdersView {
    pub fn start_reject(&mut self, id: u64) {
        self.rejecting = Some(id);
        self.reject_reason.clear();
    }

    pub fn cancel_reject(&mut self) {
        self.rejecting = None;
        self.reject_reason.clear();
    }

    /// 拒单原因必填
    pub fn on_reject_submit(&mut self) -> Option<String> {
        let reason = self.reject_reason.trim();
        if reason.is_empty() {
            self.feedback = Some(Feedback::Error(
                "Please provide a reason for rejection".to_string(),
            ));
            return None;
        }
        self.feedback = None;
        Some(reason.to_string())
    }
}

/// 拉取失败（非农户账号或暂无订单）时按空列表处理，不显示错误
pub async fn load_pending<H, S, C>(client: &ApiClient<H, S>, state: &C)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<FarmerOrdersView>,
{
    let Some(ticket) = state.update(|s| s.orders.begin()) else {
        return;
    };
    let orders = match client.pending_orders().await {
        Ok(orders) => orders,
        Err(e) => {
            debug!(error = %e, "pending orders unavailable");
            Vec::new()
        }
    };
    state.update(|s| s.orders.apply(ticket, Ok(orders)));
}

pub async fn approve<H, S, C>(client: &ApiClient<H, S>, state: &C, order_id: u64)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<FarmerOrdersView>,
{
    state.update(|s| s.feedback = None);
    match client.approve_order(order_id).await {
        Ok(_) => {
            info!(order_id, "order approved");
            state.update(|s| {
                s.feedback = Some(Feedback::Success("Order approved successfully!".to_string()))
            });
            load_pending(client, state).await;
        }
        Err(e) => {
            state.update(|s| {
                s.feedback = Some(Feedback::Error(e.user_message("Failed to approve order")))
            });
        }
    }
}

pub async fn reject<H, S, C>(client: &ApiClient<H, S>, state: &C, order_id: u64)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<FarmerOrdersView>,
{
    let Some(Some(reason)) = state.update(|s| s.on_reject_submit()) else {
        return;
    };
    match client.reject_order(order_id, &reason).await {
        Ok(_) => {
            info!(order_id, "order rejected");
            state.update(|s| {
                s.feedback = Some(Feedback::Success(
                    "Order rejected. Items returned to customer's cart.".to_string(),
                ));
                s.cancel_reject();
            });
            load_pending(client, state).await;
        }
        Err(e) => {
            state.update(|s| {
                s.feedback = Some(Feedback::Error(e.user_message("Failed to reject order")))
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mock, test_client};
    use farmgate_shared::protocol::HttpMethod;
    use serde_json::json;
    use std::cell::RefCell;

    #[tokio::test]
    async fn test_failed_fetch_falls_back_to_empty_without_error() {
        let client = test_client();
        mock(&client, HttpMethod::Get, "/api/orders/my_pending_orders/", 200, json!([{"id": 1, "status": "IN_PROGRESS"}]));
        mock(&client, HttpMethod::Get, "/api/orders/my_pending_orders/", 403, json!({"detail": "Not a farmer"}));
        let state = RefCell::new(FarmerOrdersView::default());

        load_pending(&client, &state).await;
        assert_eq!(state.borrow().orders.items().len(), 1);

        load_pending(&client, &state).await;
        let view = state.borrow();
        assert!(view.orders.items().is_empty());
        assert!(view.orders.error().is_none());
        assert!(view.feedback.is_none());
    }

    #[tokio::test]
    async fn test_reject_requires_reason() {
        let client = test_client();
        let state = RefCell::new(FarmerOrdersView::default());
        state.borrow_mut().start_reject(5);
        state.borrow_mut().reject_reason = "  ".into();

        reject(&client, &state, 5).await;

        assert_eq!(client.http().request_count(), 0);
        assert_eq!(
            state.borrow().feedback,
            Some(Feedback::Error("Please provide a reason for rejection".to_string()))
        );
    }

    #[tokio::test]
    async fn test_reject_sends_reason_and_reloads() {
        let client = test_client();
        mock(&client, HttpMethod::Post, "/api/orders/5/reject/", 200, json!({}));
        mock(&client, HttpMethod::Get, "/api/orders/my_pending_orders/", 200, json!([]));
        let state = RefCell::new(FarmerOrdersView::default());
        state.borrow_mut().start_reject(5);
        state.borrow_mut().reject_reason = "Sold out".into();

        reject(&client, &state, 5).await;

        let requests = client.http().requests.borrow();
        assert_eq!(requests[0].json_body(), json!({"reason": "Sold out"}));
        assert_eq!(requests.len(), 2);
        let view = state.borrow();
        assert_eq!(view.rejecting, None);
        assert!(view.feedback.as_ref().is_some_and(|f| !f.is_error()));
    }

    #[tokio::test]
    async fn test_approve_error_message() {
        let client = test_client();
        mock(&client, HttpMethod::Post, "/api/orders/5/approve/", 400, json!({"error": "Order already processed"}));
        let state = RefCell::new(FarmerOrdersView::default());

        approve(&client, &state, 5).await;

        assert_eq!(
            state.borrow().feedback,
            Some(Feedback::Error("Order already processed".to_string()))
        );
    }
}
