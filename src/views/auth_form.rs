use super::StateCell;
use crate::auth;
use crate::client::ApiClient;
use crate::request::HttpClient;
use crate::session::SessionStore;
use farmgate_shared::{AccountFields, Registration, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    RegisterCustomer,
    RegisterFarmer,
    RegisterRider,
}

impl AuthMode {
    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::Login => "Login to EcoLabs",
            _ => "Create an Account",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            AuthMode::Login => "Login",
            AuthMode::RegisterCustomer => "Register as Customer",
            AuthMode::RegisterFarmer => "Register as Farmer",
            AuthMode::RegisterRider => "Register as Rider",
        }
    }

    fn pending_status(&self) -> &'static str {
        match self {
            AuthMode::Login => "Logging in...",
            AuthMode::RegisterCustomer => "Creating account...",
            AuthMode::RegisterFarmer => "Creating farmer account...",
            AuthMode::RegisterRider => "Creating rider account...",
        }
    }

    fn fallback_error(&self) -> &'static str {
        match self {
            AuthMode::Login => "Login failed.",
            _ => "Registration failed.",
        }
    }
}

/// 登录 / 注册表单
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthFormView {
    pub mode: AuthMode,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub first_name: String,
    pub last_name: String,
    pub farm_name: String,
    pub phone: String,
    pub vehicle_type: String,
    pub vehicle_plate: String,
    pub status: Option<String>,
    pub error: Option<String>,
}

impl AuthFormView {
    /// 切换模式时保留用户名和邮箱，清空其余字段
    pub fn switch_mode(&mut self, mode: AuthMode) {
        *self = Self {
            mode,
            username: std::mem::take(&mut self.username),
            email: std::mem::take(&mut self.email),
            ..Self::default()
        };
    }

    fn account(&self) -> AccountFields {
        AccountFields {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        }
    }

    fn missing_required(&self) -> bool {
        let blank = |v: &str| v.trim().is_empty();
        if blank(&self.username) || self.password.is_empty() {
            return true;
        }
        if self.mode == AuthMode::Login {
            return false;
        }
        let account_missing = blank(&self.email)
            || blank(&self.first_name)
            || blank(&self.last_name)
            || self.confirm_password.is_empty();
        account_missing
            || match self.mode {
                AuthMode::RegisterFarmer => blank(&self.farm_name),
                AuthMode::RegisterRider => blank(&self.phone),
                _ => false,
            }
    }

    /// 注册表单对应的请求；登录模式返回 `None`
    pub fn registration(&self) -> Option<Registration> {
        let account = self.account();
        match self.mode {
            AuthMode::Login => None,
            AuthMode::RegisterCustomer => Some(Registration::Customer(account)),
            AuthMode::RegisterFarmer => Some(Registration::Farmer {
                account,
                farm_name: self.farm_name.trim().to_string(),
            }),
            AuthMode::RegisterRider => Some(Registration::Rider {
                account,
                phone: self.phone.trim().to_string(),
                vehicle_type: self.vehicle_type.trim().to_string(),
                vehicle_plate: self.vehicle_plate.trim().to_string(),
            }),
        }
    }

    /// 提交前校验；通过时进入提交中状态
    pub fn on_submit(&mut self) -> bool {
        self.status = None;
        self.error = None;
        if self.missing_required() {
            self.error = Some("Please fill in all required fields.".to_string());
            return false;
        }
        if self.mode != AuthMode::Login && self.password != self.confirm_password {
            self.error = Some("Passwords do not match.".to_string());
            return false;
        }
        self.status = Some(self.mode.pending_status().to_string());
        true
    }
}

/// 提交表单；成功时返回已登录的用户，调用方负责跳转到仪表盘
pub async fn submit<H, S, C>(client: &ApiClient<H, S>, state: &C) -> Option<User>
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<AuthFormView>,
{
    let form = state.update(|s| s.on_submit().then(|| s.clone()))??;

    let result = match form.registration() {
        Some(registration) => auth::register(client, &registration).await,
        None => auth::login(client, form.username.trim(), &form.password).await,
    };

    match result {
        Ok(user) => Some(user),
        Err(e) => {
            state.update(|s| {
                s.status = None;
                s.error = Some(e.user_message(form.mode.fallback_error()));
            });
            None
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

    fn filled(mode: AuthMode) -> AuthFormView {
        AuthFormView {
            mode,
            username: "ana".into(),
            email: "ana@example.com".into(),
            password: "pw".into(),
            confirm_password: "pw".into(),
            first_name: "Ana".into(),
            last_name: "Reyes".into(),
            farm_name: "Green Acres".into(),
            phone: "0917".into(),
            ..AuthFormView::default()
        }
    }

    #[tokio::test]
    async fn test_login_with_empty_fields_sends_nothing() {
        let client = test_client();
        let state = RefCell::new(AuthFormView {
            username: "ana".into(),
            ..AuthFormView::default()
        });

        assert!(submit(&client, &state).await.is_none());
        assert_eq!(client.http().request_count(), 0);
        assert!(state.borrow().error.is_some());
    }

    #[tokio::test]
    async fn test_password_mismatch_sends_nothing() {
        let client = test_client();
        let mut form = filled(AuthMode::RegisterCustomer);
        form.confirm_password = "other".into();
        let state = RefCell::new(form);

        assert!(submit(&client, &state).await.is_none());
        assert_eq!(client.http().request_count(), 0);
        assert_eq!(state.borrow().error.as_deref(), Some("Passwords do not match."));
    }

    #[tokio::test]
    async fn test_farmer_registration_payload_then_login() {
        let client = test_client();
        mock(&client, HttpMethod::Post, "/api/auth/register/farmer/", 201, json!({}));
        mock(&client, HttpMethod::Post, "/api/auth/login/", 200, json!({"access": "A"}));
        mock(&client, HttpMethod::Get, "/api/auth/me/", 200, json!({"id": 3, "username": "ana", "role": "FARMER"}));
        let state = RefCell::new(filled(AuthMode::RegisterFarmer));

        let user = submit(&client, &state).await.unwrap();

        assert_eq!(user.id, 3);
        let register = client.http().requests.borrow()[0].json_body();
        assert_eq!(register["farm_name"], "Green Acres");
        assert_eq!(register["username"], "ana");
        assert_eq!(state.borrow().status.as_deref(), Some("Creating farmer account..."));
    }

    #[tokio::test]
    async fn test_login_failure_shows_backend_detail() {
        let client = test_client();
        mock(&client, HttpMethod::Post, "/api/auth/login/", 401, json!({"detail": "Invalid credentials"}));
        let state = RefCell::new(filled(AuthMode::Login));

        assert!(submit(&client, &state).await.is_none());

        let view = state.borrow();
        assert_eq!(view.status, None);
        assert_eq!(view.error.as_deref(), Some("Invalid credentials"));
    }

    #[tokio::test]
    async fn test_registration_failure_falls_back() {
        let client = test_client();
        client.http().go_offline();
        let state = RefCell::new(filled(AuthMode::RegisterRider));

        assert!(submit(&client, &state).await.is_none());
        assert_eq!(state.borrow().error.as_deref(), Some("Registration failed."));
    }

    #[test]
    fn test_switch_mode_clears_secrets() {
        let mut form = filled(AuthMode::Login);
        form.error = Some("x".into());
        form.switch_mode(AuthMode::RegisterRider);

        assert_eq!(form.mode, AuthMode::RegisterRider);
        assert_eq!(form.username, "ana");
        assert!(form.password.is_empty());
        assert!(form.farm_name.is_empty());
        assert_eq!(form.error, None);
    }
}
