use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::request::HttpClient;
use crate::session::SessionStore;
use farmgate_shared::protocol::{
    Ack, AdminDashboardRequest, AdminUsersRequest, ReactivateUserRequest, SuspendUserRequest,
};
use farmgate_shared::{AdminDashboard, User};

impl<H: HttpClient, S: SessionStore> ApiClient<H, S> {
    pub async fn admin_dashboard(&self) -> ClientResult<AdminDashboard> {
        self.call(&AdminDashboardRequest).await
    }

    pub async fn admin_users(&self) -> ClientResult<Vec<User>> {
        self.call(&AdminUsersRequest).await
    }

    pub async fn suspend_user(&self, id: u64, reason: &str) -> ClientResult<Ack> {
        self.call(&SuspendUserRequest {
            id,
            reason: reason.to_string(),
        })
        .await
    }

    pub async fn reactivate_user(&self, id: u64) -> ClientResult<Ack> {
        self.call(&ReactivateUserRequest { id }).await
    }
}
