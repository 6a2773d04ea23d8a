use super::{Feedback, Loadable, StateCell};
use crate::client::ApiClient;
use crate::request::HttpClient;
use crate::session::SessionStore;
use farmgate_shared::{AdminDashboard, Role, User};
use tracing::info;

pub const DEFAULT_SUSPENSION_REASON: &str = "No reason provided";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminTab {
    #[default]
    Overview,
    Users,
    Posts,
    Comments,
    Orders,
}

impl AdminTab {
    pub const ALL: [AdminTab; 5] = [
        AdminTab::Overview,
        AdminTab::Users,
        AdminTab::Posts,
        AdminTab::Comments,
        AdminTab::Orders,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AdminTab::Overview => "Overview",
            AdminTab::Users => "User Management",
            AdminTab::Posts => "Recent Posts",
            AdminTab::Comments => "Recent Comments",
            AdminTab::Orders => "Recent Orders",
        }
    }
}

/// 等待确认的账号操作
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    Suspend { user_id: u64, username: String, reason: String },
    Reactivate { user_id: u64, username: String },
}

/// 仪表盘统计与用户列表一起加载，任一失败都视为整体失败
#[derive(Debug, Clone, PartialEq)]
pub struct AdminData {
    pub dashboard: AdminDashboard,
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminView {
    pub tab: AdminTab,
    pub data: Loadable<AdminData>,
    pub pending: Option<PendingAction>,
    pub feedback: Option<Feedback>,
}

impl AdminView {
    pub fn open_suspend(&mut self, user: &User) {
        self.pending = Some(PendingAction::Suspend {
            user_id: user.id,
            username: user.username.clone(),
            reason: String::new(),
        });
    }

    pub fn open_reactivate(&mut self, user: &User) {
        self.pending = Some(PendingAction::Reactivate {
            user_id: user.id,
            username: user.username.clone(),
        });
    }

    pub fn set_reason(&mut self, value: &str) {
        if let Some(PendingAction::Suspend { reason, .. }) = &mut self.pending {
            *reason = value.to_string();
        }
    }

    pub fn close_modal(&mut self) {
        self.pending = None;
    }

    pub fn users(&self) -> &[User] {
        self.data.data().map(|d| d.users.as_slice()).unwrap_or_default()
    }
}

pub async fn load_dashboard<H, S, C>(client: &ApiClient<H, S>, state: &C, viewer: &User)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<AdminView>,
{
    let Some(ticket) = state.update(|s| s.data.begin()) else {
        return;
    };
    if !viewer.has_role(Role::Admin) {
        state.update(|s| {
            s.data.apply(
                ticket,
                Err("You do not have permission to access this page".to_string()),
            )
        });
        return;
    }

    let (dashboard, users) = futures::join!(client.admin_dashboard(), client.admin_users());
    let result = match (dashboard, users) {
        (Ok(dashboard), Ok(users)) => Ok(AdminData { dashboard, users }),
        _ => Err("Failed to load admin dashboard".to_string()),
    };
    state.update(|s| s.data.apply(ticket, result));
}

/// 执行当前弹窗中的操作；成功后关闭弹窗并重新加载
pub async fn confirm_action<H, S, C>(client: &ApiClient<H, S>, state: &C, viewer: &User)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<AdminView>,
{
    let Some(Some(action)) = state.read(|s| s.pending.clone()) else {
        return;
    };

    let (result, success, error_prefix) = match &action {
        PendingAction::Suspend { user_id, username, reason } => {
            let reason = if reason.trim().is_empty() {
                DEFAULT_SUSPENSION_REASON
            } else {
                reason.as_str()
            };
            (
                client.suspend_user(*user_id, reason).await,
                format!("User {} has been suspended", username),
                "Error suspending user: ",
            )
        }
        PendingAction::Reactivate { user_id, username } => (
            client.reactivate_user(*user_id).await,
            format!("User {} has been reactivated", username),
            "Error reactivating user: ",
        ),
    };

    match result {
        Ok(_) => {
            info!(message = %success, "admin action applied");
            state.update(|s| {
                s.pending = None;
                s.feedback = Some(Feedback::Success(success));
            });
            load_dashboard(client, state, viewer).await;
        }
        Err(e) => {
            let message = format!("{}{}", error_prefix, e.user_message("Unknown error"));
            state.update(|s| s.feedback = Some(Feedback::Error(message)));
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

    fn user(role: &str) -> User {
        serde_json::from_value(json!({"id": 1, "username": "root", "role": role})).unwrap()
    }

    fn mock_dashboard(client: &crate::testing::TestClient) {
        mock(
            client,
            HttpMethod::Get,
            "/api/auth/admin/dashboard/",
            200,
            json!({"statistics": {"total_users": 3, "total_orders": 1}, "recent_activity": {}}),
        );
        mock(
            client,
            HttpMethod::Get,
            "/api/auth/admin/users-management/",
            200,
            json!([
                {"id": 5, "username": "ana", "role": "FARMER"},
                {"id": 6, "username": "ben", "role": "CUSTOMER", "is_suspended": true, "suspension_reason": "spam"}
            ]),
        );
    }

    #[tokio::test]
    async fn test_non_admin_is_refused_without_requests() {
        let client = test_client();
        let state = RefCell::new(AdminView::default());

        load_dashboard(&client, &state, &user("CUSTOMER")).await;

        assert_eq!(client.http().request_count(), 0);
        assert_eq!(
            state.borrow().data.error(),
            Some("You do not have permission to access this page")
        );
    }

    #[tokio::test]
    async fn test_loads_dashboard_and_users_together() {
        let client = test_client();
        mock_dashboard(&client);
        let state = RefCell::new(AdminView::default());

        load_dashboard(&client, &state, &user("ADMIN")).await;

        let view = state.borrow();
        assert_eq!(view.users().len(), 2);
        assert_eq!(view.data.data().unwrap().dashboard.statistics.total_users, 3);
        assert_eq!(client.http().request_count(), 2);
    }

    #[tokio::test]
    async fn test_either_failure_fails_the_whole_load() {
        let client = test_client();
        mock(&client, HttpMethod::Get, "/api/auth/admin/dashboard/", 200, json!({}));
        mock(&client, HttpMethod::Get, "/api/auth/admin/users-management/", 500, json!({}));
        let state = RefCell::new(AdminView::default());

        load_dashboard(&client, &state, &user("ADMIN")).await;

        assert_eq!(state.borrow().data.error(), Some("Failed to load admin dashboard"));
    }

    #[tokio::test]
    async fn test_suspend_without_reason_uses_default_and_reloads() {
        let client = test_client();
        mock_dashboard(&client);
        mock(&client, HttpMethod::Post, "/api/auth/admin/users/5/suspend/", 200, json!({}));
        let admin = user("ADMIN");
        let state = RefCell::new(AdminView::default());
        load_dashboard(&client, &state, &admin).await;

        let target = state.borrow().users()[0].clone();
        state.borrow_mut().open_suspend(&target);
        confirm_action(&client, &state, &admin).await;

        let suspend = &client.http().requests_to(&crate::testing::url("/api/auth/admin/users/5/suspend/"))[0];
        assert_eq!(suspend.json_body(), json!({"reason": "No reason provided"}));
        let view = state.borrow();
        assert_eq!(view.pending, None);
        assert_eq!(
            view.feedback,
            Some(Feedback::Success("User ana has been suspended".to_string()))
        );
        assert_eq!(client.http().request_count(), 5);
    }

    #[tokio::test]
    async fn test_reactivate_error_keeps_modal_open() {
        let client = test_client();
        mock(&client, HttpMethod::Post, "/api/auth/admin/users/6/reactivate/", 400, json!({"error": "User is not suspended"}));
        let state = RefCell::new(AdminView::default());
        state.borrow_mut().open_reactivate(&serde_json::from_value(json!({"id": 6, "username": "ben", "role": "CUSTOMER"})).unwrap());

        confirm_action(&client, &state, &user("ADMIN")).await;

        let view = state.borrow();
        assert!(view.pending.is_some());
        assert_eq!(
            view.feedback,
            Some(Feedback::Error("Error reactivating user: User is not suspended".to_string()))
        );
    }
}
