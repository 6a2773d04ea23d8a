//! Farmgate 前端应用
//!
//! 采用 Context-Driven 的结构：
//! - `web`: 浏览器端适配（传输、存储、定时器、路由、日志）
//! - `auth`: 会话上下文（客户端 + 当前用户）
//! - `pages` / `components`: UI 层，状态与流程来自 `farmgate::views`

mod auth;

mod pages {
    pub mod dashboard;
    pub mod learn_more;
    pub mod login;
    pub mod welcome;
}

mod components {
    pub mod admin;
    pub mod cart;
    pub mod comments;
    pub mod confirmation_modal;
    pub mod delivery_card;
    pub mod farmer_orders;
    pub mod notifications;
    pub mod orders;
    pub mod post_card;
    pub mod post_feed;
    pub mod post_form;
    pub mod rider;
}

pub(crate) mod web {
    pub mod cell;
    pub mod files;
    mod http;
    pub mod logging;
    pub mod poll;
    pub mod router;
    mod storage;
    mod timer;

    pub use cell::SignalCell;
    pub use http::FetchClient;
    pub use storage::BrowserSession;
}

use crate::auth::{AuthContext, init_auth};
use crate::pages::dashboard::DashboardPage;
use crate::pages::learn_more::LearnMorePage;
use crate::pages::login::LoginPage;
use crate::pages::welcome::WelcomePage;
use farmgate::route::AppRoute;
use leptos::prelude::*;
use web::router::{Router, RouterOutlet};

pub use web::logging::init_logging;

/// 路由匹配函数
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Welcome => view! { <WelcomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! { <DashboardPage /> }.into_any(),
        AppRoute::LearnMore => view! { <LearnMorePage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);
    init_auth(auth_ctx);

    view! {
        <Router>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
