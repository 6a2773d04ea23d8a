//! Farmgate 客户端核心
//!
//! 与 UI 框架无关的部分都在这里，可以原生编译并测试：
//! - `client` / `request` / `session`: HTTP 适配层与令牌存储
//! - `api`: 每个后端资源一组访问方法
//! - `auth`: 登录、注册、恢复会话
//! - `views`: 各组件的状态机与异步流程
//! - `feed`: 轮询订阅
//! - `route`: 页面路由表
//!
//! 浏览器端的传输、存储与定时器由 `farmgate-frontend` 提供。

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod feed;
pub mod request;
pub mod route;
pub mod session;
pub mod views;

#[cfg(test)]
mod testing;

pub use client::{ApiClient, RequestOptions};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ErrorKind};
pub use feed::{Sleeper, Subscription, poll};
pub use request::{FormPart, HttpClient, HttpRequest, HttpResponse, RequestBody};
pub use route::{AppRoute, RouteMatch};
pub use session::{MemorySessionStore, SESSION_STORAGE_KEY, SessionStore};

#[cfg(not(target_arch = "wasm32"))]
pub use request::ReqwestHttpClient;
