use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::request::HttpClient;
use crate::session::SessionStore;
use farmgate_shared::protocol::{
    Ack, ApproveOrderRequest, CheckoutRequest, ConfirmReceivedRequest, MyOrdersRequest,
    OrderDetailRequest, PendingOrdersRequest, RejectOrderRequest,
};
use farmgate_shared::{CheckoutResponse, Order};

impl<H: HttpClient, S: SessionStore> ApiClient<H, S> {
    /// 将购物车结算为订单
    pub async fn checkout(&self) -> ClientResult<CheckoutResponse> {
        self.call(&CheckoutRequest).await
    }

    pub async fn my_orders(&self) -> ClientResult<Vec<Order>> {
        self.call(&MyOrdersRequest).await
    }

    /// 等待当前农户处理的订单
    pub async fn pending_orders(&self) -> ClientResult<Vec<Order>> {
        self.call(&PendingOrdersRequest).await
    }

    pub async fn order_detail(&self, id: u64) -> ClientResult<Order> {
        self.call(&OrderDetailRequest { id }).await
    }

    pub async fn approve_order(&self, id: u64) -> ClientResult<Ack> {
        self.call(&ApproveOrderRequest { id }).await
    }

    pub async fn reject_order(&self, id: u64, reason: &str) -> ClientResult<Ack> {
        self.call(&RejectOrderRequest {
            id,
            reason: reason.to_string(),
        })
        .await
    }

    pub async fn confirm_received(&self, id: u64) -> ClientResult<Ack> {
        self.call(&ConfirmReceivedRequest { id }).await
    }
}
