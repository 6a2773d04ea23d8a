//! 定时器
//!
//! 轮询订阅使用的 [`Sleeper`]，基于 `gloo-timers` 的 `setTimeout` future。

use farmgate::feed::Sleeper;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default)]
pub struct TimeoutSleeper;

#[async_trait::async_trait(?Send)]
impl Sleeper for TimeoutSleeper {
    async fn sleep(&self, duration: Duration) {
        gloo_timers::future::sleep(duration).await;
    }
}
