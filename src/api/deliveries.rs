use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::request::HttpClient;
use crate::session::SessionStore;
use farmgate_shared::protocol::{
    AcceptDeliveryRequest, Ack, CompleteDeliveryRequest, DeliveryList, ListDeliveriesRequest,
    RejectDeliveryRequest, UpdateDeliveryStatusRequest,
};
use farmgate_shared::{Delivery, DeliveryStatus};

impl<H: HttpClient, S: SessionStore> ApiClient<H, S> {
    pub async fn list_deliveries(&self, list: DeliveryList) -> ClientResult<Vec<Delivery>> {
        self.call(&ListDeliveriesRequest(list)).await
    }

    pub async fn available_deliveries(&self) -> ClientResult<Vec<Delivery>> {
        self.list_deliveries(DeliveryList::Available).await
    }

    pub async fn my_deliveries(&self) -> ClientResult<Vec<Delivery>> {
        self.list_deliveries(DeliveryList::Mine).await
    }

    pub async fn my_pending_deliveries(&self) -> ClientResult<Vec<Delivery>> {
        self.list_deliveries(DeliveryList::MyPending).await
    }

    pub async fn accept_delivery(&self, id: u64) -> ClientResult<Ack> {
        self.call(&AcceptDeliveryRequest { id }).await
    }

    pub async fn reject_delivery(&self, id: u64, reason: &str) -> ClientResult<Ack> {
        self.call(&RejectDeliveryRequest {
            id,
            reason: reason.to_string(),
        })
        .await
    }

    pub async fn update_delivery_status(
        &self,
        id: u64,
        status: DeliveryStatus,
        notes: &str,
    ) -> ClientResult<Ack> {
        self.call(&UpdateDeliveryStatusRequest {
            id,
            status,
            notes: notes.to_string(),
        })
        .await
    }

    pub async fn complete_delivery(&self, id: u64) -> ClientResult<Ack> {
        self.call(&CompleteDeliveryRequest { id }).await
    }
}
