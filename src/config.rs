use std::time::Duration;
use tracing::{info, warn};

// =========================================================
// 运行时配置 (Runtime Configuration)
// =========================================================

/// 默认值：未配置时 API 走相对路径（由开发服务器代理到后端）
pub const DEFAULT_API_URL: &str = "/";
const DEFAULT_ORDERS_POLL_SECS: u64 = 5;
const DEFAULT_FARMER_POLL_SECS: u64 = 3;
const DEFAULT_RIDER_POLL_SECS: u64 = 5;

pub const ENV_API_URL: &str = "FARMGATE_API_URL";
pub const ENV_ORDERS_POLL: &str = "FARMGATE_ORDERS_POLL_SECS";
pub const ENV_FARMER_POLL: &str = "FARMGATE_FARMER_POLL_SECS";
pub const ENV_RIDER_POLL: &str = "FARMGATE_RIDER_POLL_SECS";

/// 客户端配置
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub base_url: String,
    /// 顾客订单列表轮询间隔
    pub orders_poll: Duration,
    /// 农户待处理订单轮询间隔
    pub farmer_orders_poll: Duration,
    /// 骑手进行中配送轮询间隔
    pub rider_poll: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            orders_poll: Duration::from_secs(DEFAULT_ORDERS_POLL_SECS),
            farmer_orders_poll: Duration::from_secs(DEFAULT_FARMER_POLL_SECS),
            rider_poll: Duration::from_secs(DEFAULT_RIDER_POLL_SECS),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// 从环境变量读取，读不到或格式错误时使用默认值
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 使用任意键值来源构建配置（前端在编译期通过 `option_env!` 注入）
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base_url = match lookup(ENV_API_URL) {
            Some(url) if !url.trim().is_empty() => url,
            _ => {
                info!("{ENV_API_URL} not set, using default: {DEFAULT_API_URL}");
                DEFAULT_API_URL.to_string()
            }
        };

        Self {
            base_url,
            orders_poll: secs(&lookup, ENV_ORDERS_POLL, DEFAULT_ORDERS_POLL_SECS),
            farmer_orders_poll: secs(&lookup, ENV_FARMER_POLL, DEFAULT_FARMER_POLL_SECS),
            rider_poll: secs(&lookup, ENV_RIDER_POLL, DEFAULT_RIDER_POLL_SECS),
        }
    }

    /// 拼接完整 URL；base 为 "/" 时保持相对路径
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

fn secs(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u64) -> Duration {
    let value = match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(v) if v > 0 => v,
            _ => {
                warn!("Invalid {key} value: {raw:?}, using default {default}");
                default
            }
        },
    };
    Duration::from_secs(value)
}
