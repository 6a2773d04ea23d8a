use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::request::HttpClient;
use crate::session::SessionStore;
use farmgate_shared::Notification;
use farmgate_shared::protocol::{Ack, ListNotificationsRequest, MarkNotificationReadRequest};

impl<H: HttpClient, S: SessionStore> ApiClient<H, S> {
    pub async fn my_notifications(&self) -> ClientResult<Vec<Notification>> {
        self.call(&ListNotificationsRequest { unread_only: false })
            .await
    }

    pub async fn unread_notifications(&self) -> ClientResult<Vec<Notification>> {
        self.call(&ListNotificationsRequest { unread_only: true })
            .await
    }

    pub async fn mark_notification_read(&self, id: u64) -> ClientResult<Ack> {
        self.call(&MarkNotificationReadRequest { id }).await
    }
}
