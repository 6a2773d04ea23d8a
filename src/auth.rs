//! 会话流程
//!
//! 登录、注册、恢复会话与注销。唯一的 "故障恢复" 在 [`restore_session`]：
//! who-am-I 校验失败时无条件清除凭据，按匿名用户继续。

use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::request::HttpClient;
use crate::session::SessionStore;
use farmgate_shared::{Credentials, Registration, User};
use tracing::{info, warn};

/// 登录：保存令牌、安装默认头，再用 who-am-I 确认
pub async fn login<H: HttpClient, S: SessionStore>(
    client: &ApiClient<H, S>,
    username: &str,
    password: &str,
) -> ClientResult<User> {
    let credentials = Credentials {
        username: username.to_string(),
        password: password.to_string(),
    };
    let tokens = client.login(&credentials).await?;
    client.session().save(&tokens.access)?;
    client.set_credential(Some(&tokens.access));

    let user = client.me().await?;
    info!(username = %user.username, role = user.role.as_str(), "logged in");
    Ok(user)
}

/// 注册后立即用同一组凭据登录
pub async fn register<H: HttpClient, S: SessionStore>(
    client: &ApiClient<H, S>,
    registration: &Registration,
) -> ClientResult<User> {
    client.register(registration).await?;
    let account = registration.account();
    login(client, &account.username, &account.password).await
}

/// 应用加载时恢复会话
///
/// 没有存储的令牌时直接返回 `None`（访客浏览）。
pub async fn restore_session<H: HttpClient, S: SessionStore>(
    client: &ApiClient<H, S>,
) -> Option<User> {
    let token = client.stored_credential()?;
    client.set_credential(Some(&token));

    match client.me().await {
        Ok(user) => Some(user),
        Err(e) => {
            warn!(error = %e, "stored credential rejected, continuing as guest");
            client.clear_credential();
            None
        }
    }
}

pub fn logout<H: HttpClient, S: SessionStore>(client: &ApiClient<H, S>) {
    client.clear_credential();
    info!("logged out");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mock, test_client};
    use farmgate_shared::AccountFields;
    use farmgate_shared::protocol::HttpMethod;
    use serde_json::json;

    fn me_json() -> serde_json::Value {
        json!({ "id": 7, "username": "ana", "email": "ana@example.com", "role": "FARMER" })
    }

    #[tokio::test]
    async fn test_login_saves_token_and_confirms_with_me() {
        let client = test_client();
        mock(&client, HttpMethod::Post, "/api/auth/login/", 200, json!({"access": "A1", "refresh": "R1"}));
        mock(&client, HttpMethod::Get, "/api/auth/me/", 200, me_json());

        let user = login(&client, "ana", "pw").await.unwrap();

        assert_eq!(user.username, "ana");
        assert_eq!(client.stored_credential().as_deref(), Some("A1"));
        let me_req = client.http().last_request().unwrap();
        assert_eq!(me_req.header("Authorization"), Some("Bearer A1"));
    }

    #[tokio::test]
    async fn test_failed_login_stores_nothing() {
        let client = test_client();
        mock(
            &client,
            HttpMethod::Post,
            "/api/auth/login/",
            401,
            json!({"detail": "No active account found with the given credentials"}),
        );

        let err = login(&client, "ana", "bad").await.unwrap_err();

        assert_eq!(
            err.user_message("Login failed."),
            "No active account found with the given credentials"
        );
        assert_eq!(client.stored_credential(), None);
        assert_eq!(client.http().request_count(), 1);
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let client = test_client();
        mock(&client, HttpMethod::Post, "/api/auth/register/rider/", 201, json!({"id": 7}));
        mock(&client, HttpMethod::Post, "/api/auth/login/", 200, json!({"access": "A2"}));
        mock(&client, HttpMethod::Get, "/api/auth/me/", 200, me_json());

        let registration = Registration::Rider {
            account: AccountFields {
                username: "ana".into(),
                password: "pw".into(),
                ..AccountFields::default()
            },
            phone: "0917".into(),
            vehicle_type: "Motorcycle".into(),
            vehicle_plate: "ABC-123".into(),
        };
        register(&client, &registration).await.unwrap();

        let login_req = &client.http().requests_to(&crate::testing::url("/api/auth/login/"))[0];
        assert_eq!(login_req.json_body(), json!({"username": "ana", "password": "pw"}));
        assert_eq!(client.stored_credential().as_deref(), Some("A2"));
    }

    #[tokio::test]
    async fn test_restore_without_token_is_guest_and_silent() {
        let client = test_client();
        assert!(restore_session(&client).await.is_none());
        assert_eq!(client.http().request_count(), 0);
    }

    #[tokio::test]
    async fn test_restore_with_rejected_token_clears_session() {
        let client = test_client();
        client.session().save("stale").unwrap();
        mock(&client, HttpMethod::Get, "/api/auth/me/", 401, json!({"detail": "Token expired"}));
        mock(&client, HttpMethod::Get, "/api/posts/", 200, json!([]));

        assert!(restore_session(&client).await.is_none());
        assert_eq!(client.stored_credential(), None);

        client.list_posts(Vec::new()).await.unwrap();
        assert_eq!(client.http().last_request().unwrap().header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_restore_with_valid_token() {
        let client = test_client();
        client.session().save("good").unwrap();
        mock(&client, HttpMethod::Get, "/api/auth/me/", 200, me_json());

        let user = restore_session(&client).await.unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(client.stored_credential().as_deref(), Some("good"));
    }

    #[tokio::test]
    async fn test_restore_keeps_token_when_timestamp_has_no_zone() {
        let client = test_client();
        client.session().save("good").unwrap();
        mock(
            &client,
            HttpMethod::Get,
            "/api/auth/me/",
            200,
            json!({"id": 7, "username": "ana", "role": "FARMER", "date_joined": "2024-03-09T14:05:00"}),
        );

        let user = restore_session(&client).await.unwrap();
        assert_eq!(user.username, "ana");
        assert!(user.date_joined.is_some());
        assert_eq!(client.stored_credential().as_deref(), Some("good"));
    }

    #[tokio::test]
    async fn test_logout_clears() {
        let client = test_client();
        client.session().save("tok").unwrap();
        client.set_credential(Some("tok"));

        logout(&client);
        assert_eq!(client.stored_credential(), None);
    }
}
