//! 资源访问模块
//!
//! 每个后端资源一个子模块，每个方法对应恰好一个 HTTP 请求：
//! 不做批量、缓存或分页逻辑，查询参数原样透传。
//! 方法都以 `impl ApiClient` 的形式挂在客户端上。

pub mod admin;
pub mod auth;
pub mod cart;
pub mod comments;
pub mod deliveries;
pub mod notifications;
pub mod orders;
pub mod posts;

pub use posts::ImageFile;
