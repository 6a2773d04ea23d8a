use super::{Feedback, Loadable, StateCell};
use crate::client::ApiClient;
use crate::error::ClientError;
use crate::request::HttpClient;
use crate::session::SessionStore;
use farmgate_shared::{CartItem, CheckoutResponse, Order};
use tracing::info;

const ORDER_CREATED: &str = "Order created! Waiting for farmer approval...";

/// 数量变更对应的操作
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CartAction {
    Update { id: u64, quantity: f64 },
    Remove { id: u64 },
}

impl CartAction {
    /// 数量小于 1 时移除该项
    pub fn for_quantity(id: u64, quantity: f64) -> Self {
        if quantity.is_nan() || quantity < 1.0 {
            CartAction::Remove { id }
        } else {
            CartAction::Update { id, quantity }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartView {
    pub items: Loadable<Vec<CartItem>>,
    pub error: Option<String>,
    pub checking_out: bool,
    /// 刚刚生成的订单（结算确认页）
    pub order: Option<Order>,
    pub notice: Option<Feedback>,
}

impl CartView {
    pub fn total(&self) -> f64 {
        self.items
            .data()
            .map_or(0.0, |items| items.iter().map(CartItem::line_total).sum())
    }

    pub fn is_empty(&self) -> bool {
        self.items.data().is_none_or(Vec::is_empty)
    }

    pub fn visible_error(&self) -> Option<&str> {
        self.error.as_deref().or(self.items.error())
    }

    /// 结算前检查；空购物车不发请求
    pub fn on_checkout_start(&mut self) -> bool {
        if self.is_empty() {
            self.error = Some("Cart is empty".to_string());
            return false;
        }
        self.checking_out = true;
        self.error = None;
        true
    }

    pub fn on_checkout(&mut self, result: Result<CheckoutResponse, ClientError>) {
        self.checking_out = false;
        match result {
            Ok(resp) => {
                self.items.set_ready(Vec::new());
                self.notice = Some(Feedback::Success(
                    resp.message.unwrap_or_else(|| ORDER_CREATED.to_string()),
                ));
                self.order = Some(resp.order);
            }
            Err(e) => self.error = Some(e.user_message("Checkout failed")),
        }
    }

    /// 关闭确认页，继续购物
    pub fn continue_shopping(&mut self) {
        self.order = None;
        self.notice = None;
    }
}

pub async fn load_cart<H, S, C>(client: &ApiClient<H, S>, state: &C)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<CartView>,
{
    let Some(ticket) = state.update(|s| s.items.begin()) else {
        return;
    };
    let result = client
        .get_cart()
        .await
        .map_err(|_| "Failed to load cart".to_string());
    state.update(|s| {
        // 刷新失败时保留已有条目，只显示错误
        if let Some(outcome) = s.items.apply_or_keep(ticket, result) {
            s.error = outcome.err();
        }
    });
}

pub async fn remove_item<H, S, C>(client: &ApiClient<H, S>, state: &C, id: u64)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<CartView>,
{
    match client.remove_cart_item(id).await {
        Ok(_) => load_cart(client, state).await,
        Err(_) => {
            state.update(|s| s.error = Some("Failed to remove item".to_string()));
        }
    }
}

pub async fn change_quantity<H, S, C>(client: &ApiClient<H, S>, state: &C, id: u64, quantity: f64)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<CartView>,
{
    match CartAction::for_quantity(id, quantity) {
        CartAction::Remove { id } => remove_item(client, state, id).await,
        CartAction::Update { id, quantity } => match client.update_cart_item(id, quantity).await {
            Ok(_) => load_cart(client, state).await,
            Err(_) => {
                state.update(|s| s.error = Some("Failed to update quantity".to_string()));
            }
        },
    }
}

pub async fn checkout<H, S, C>(client: &ApiClient<H, S>, state: &C)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<CartView>,
{
    if state.update(|s| s.on_checkout_start()) != Some(true) {
        return;
    }
    let result = client.checkout().await;
    if let Ok(resp) = &result {
        info!(order_id = resp.order.id, "order created");
    }
    state.update(|s| s.on_checkout(result));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mock, test_client};
    use farmgate_shared::OrderStatus;
    use farmgate_shared::protocol::HttpMethod;
    use serde_json::json;
    use std::cell::RefCell;

    fn cart_json() -> serde_json::Value {
        json!([
            { "id": 1, "quantity": 2, "post": { "id": 10, "title": "Rice", "price": "50.00", "unit": "KG" } },
            { "id": 2, "quantity": "1.5", "post": { "id": 11, "title": "Corn", "price": 20, "unit": "KG" } }
        ])
    }

    #[tokio::test]
    async fn test_load_and_total() {
        let client = test_client();
        mock(&client, HttpMethod::Get, "/api/cart/", 200, cart_json());
        let state = RefCell::new(CartView::default());

        load_cart(&client, &state).await;

        assert_eq!(state.borrow().total(), 130.0);
    }

    #[tokio::test]
    async fn test_quantity_below_one_removes_item() {
        let client = test_client();
        mock(&client, HttpMethod::Delete, "/api/cart/1/", 204, serde_json::Value::Null);
        mock(&client, HttpMethod::Get, "/api/cart/", 200, json!([]));
        let state = RefCell::new(CartView::default());

        change_quantity(&client, &state, 1, 0.9).await;

        let requests = client.http().requests.borrow();
        assert_eq!(requests[0].method, HttpMethod::Delete);
        assert_eq!(requests[1].method, HttpMethod::Get);
    }

    #[tokio::test]
    async fn test_update_failure_sets_error() {
        let client = test_client();
        mock(&client, HttpMethod::Patch, "/api/cart/2/", 400, json!({"error": "Not enough stock"}));
        let state = RefCell::new(CartView::default());

        change_quantity(&client, &state, 2, 3.0).await;

        assert_eq!(state.borrow().visible_error(), Some("Failed to update quantity"));
        assert_eq!(client.http().request_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_items() {
        let client = test_client();
        mock(&client, HttpMethod::Get, "/api/cart/", 200, cart_json());
        mock(&client, HttpMethod::Patch, "/api/cart/2/", 200, json!({}));
        mock(&client, HttpMethod::Get, "/api/cart/", 500, json!({}));
        let state = RefCell::new(CartView::default());
        load_cart(&client, &state).await;

        change_quantity(&client, &state, 2, 3.0).await;

        let view = state.borrow();
        assert!(!view.is_empty());
        assert_eq!(view.total(), 130.0);
        assert_eq!(view.visible_error(), Some("Failed to load cart"));
    }

    #[tokio::test]
    async fn test_checkout_on_empty_cart_issues_no_request() {
        let client = test_client();
        let state = RefCell::new(CartView::default());
        state.borrow_mut().items.set_ready(Vec::new());

        checkout(&client, &state).await;

        assert_eq!(client.http().request_count(), 0);
        assert_eq!(state.borrow().error.as_deref(), Some("Cart is empty"));
    }

    #[tokio::test]
    async fn test_successful_checkout_clears_cart_and_shows_order() {
        let client = test_client();
        mock(&client, HttpMethod::Get, "/api/cart/", 200, cart_json());
        mock(
            &client,
            HttpMethod::Post,
            "/api/orders/checkout/",
            201,
            json!({ "order": { "id": 77, "status": "IN_PROGRESS", "items": [], "total_amount": "130.00" } }),
        );
        let state = RefCell::new(CartView::default());
        load_cart(&client, &state).await;

        checkout(&client, &state).await;

        let view = state.borrow();
        assert!(view.is_empty());
        assert_eq!(view.total(), 0.0);
        let order = view.order.as_ref().unwrap();
        assert_eq!(order.id, 77);
        assert_eq!(order.status, OrderStatus::InProgress);
        assert_eq!(view.notice.as_ref().map(Feedback::message), Some(ORDER_CREATED));
    }

    #[tokio::test]
    async fn test_checkout_error_uses_backend_message() {
        let client = test_client();
        mock(&client, HttpMethod::Get, "/api/cart/", 200, cart_json());
        mock(&client, HttpMethod::Post, "/api/orders/checkout/", 400, json!({"error": "Insufficient stock for Rice"}));
        let state = RefCell::new(CartView::default());
        load_cart(&client, &state).await;

        checkout(&client, &state).await;

        let view = state.borrow();
        assert_eq!(view.error.as_deref(), Some("Insufficient stock for Rice"));
        assert!(!view.is_empty());
        assert!(view.order.is_none());
    }
}
