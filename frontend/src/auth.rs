//! 会话上下文
//!
//! 持有全局唯一的 API 客户端和当前用户。组件通过 [`use_auth`] 取得，
//! 角色相关的界面都从 `user` 信号派生。

use crate::web::{BrowserSession, FetchClient};
use farmgate::config::{ENV_API_URL, ENV_FARMER_POLL, ENV_ORDERS_POLL, ENV_RIDER_POLL};
use farmgate::{ApiClient, ClientConfig};
use farmgate_shared::User;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub type WebClient = ApiClient<FetchClient, BrowserSession>;

/// 编译期注入的配置
fn build_config() -> ClientConfig {
    ClientConfig::from_lookup(|key| {
        let value = match key {
            ENV_API_URL => option_env!("FARMGATE_API_URL"),
            ENV_ORDERS_POLL => option_env!("FARMGATE_ORDERS_POLL_SECS"),
            ENV_FARMER_POLL => option_env!("FARMGATE_FARMER_POLL_SECS"),
            ENV_RIDER_POLL => option_env!("FARMGATE_RIDER_POLL_SECS"),
            _ => None,
        };
        value.map(str::to_string)
    })
}

#[derive(Clone, Copy)]
pub struct AuthContext {
    client: StoredValue<WebClient>,
    /// 当前用户，`None` 为访客
    pub user: RwSignal<Option<User>>,
    /// 应用加载时恢复会话期间为 true
    pub restoring: RwSignal<bool>,
}

impl AuthContext {
    pub fn new() -> Self {
        let client = ApiClient::new(build_config(), FetchClient, BrowserSession);
        Self {
            client: StoredValue::new(client),
            user: RwSignal::new(None),
            restoring: RwSignal::new(true),
        }
    }

    pub fn client(&self) -> WebClient {
        self.client.get_value()
    }

    pub fn config(&self) -> ClientConfig {
        self.client.with_value(|c| c.config().clone())
    }

    pub fn logout(&self) {
        farmgate::auth::logout(&self.client());
        self.user.set(None);
    }
}

pub fn use_auth() -> AuthContext {
    expect_context::<AuthContext>()
}

/// 应用加载时恢复会话：有令牌则用 who-am-I 校验，失败时按访客继续
pub fn init_auth(ctx: AuthContext) {
    spawn_local(async move {
        let user = farmgate::auth::restore_session(&ctx.client()).await;
        ctx.user.set(user);
        ctx.restoring.set(false);
    });
}
