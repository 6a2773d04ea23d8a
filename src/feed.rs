//! 轮询订阅
//!
//! 把 "固定间隔重新拉取" 包装成一个可取消的订阅：
//! [`poll`] 返回 [`Subscription`] 守卫与结果流，守卫被 drop 或取消后流随即结束。
//! 流是拉取式的，上一次拉取完成前不会开始下一次。

use futures::Stream;
use futures::future::Future;
use futures::stream::{AbortHandle, abortable, unfold};
use std::time::Duration;

/// 计时器抽象：浏览器端基于 gloo-timers，测试中立即返回
#[async_trait::async_trait(?Send)]
pub trait Sleeper {
    async fn sleep(&self, duration: Duration);
}

/// 不等待的计时器
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateSleeper;

#[async_trait::async_trait(?Send)]
impl Sleeper for ImmediateSleeper {
    async fn sleep(&self, _duration: Duration) {}
}

/// 订阅守卫，drop 时取消
#[derive(Debug)]
pub struct Subscription {
    handle: AbortHandle,
}

impl Subscription {
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_aborted()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// 立即拉取一次，之后每隔 `interval` 拉取一次
pub fn poll<Z, F, Fut, T>(
    sleeper: Z,
    interval: Duration,
    fetch: F,
) -> (Subscription, impl Stream<Item = T>)
where
    Z: Sleeper,
    F: FnMut() -> Fut,
    Fut: Future<Output = T>,
{
    let ticks = unfold(
        (sleeper, fetch, true),
        move |(sleeper, mut fetch, first)| async move {
            if !first {
                sleeper.sleep(interval).await;
            }
            let item = fetch().await;
            Some((item, (sleeper, fetch, false)))
        },
    );
    let (stream, handle) = abortable(ticks);
    (Subscription { handle }, stream)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use std::cell::Cell;
    use std::rc::Rc;

    #[tokio::test]
    async fn test_poll_fetches_sequentially() {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let (_sub, stream) = poll(ImmediateSleeper, Duration::from_secs(5), move || {
            let counter = counter.clone();
            async move {
                counter.set(counter.get() + 1);
                counter.get()
            }
        });

        let seen: Vec<u32> = stream.take(3).collect().await;
        assert_eq!(seen, vec![1, 2, 3]);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn test_dropping_subscription_ends_stream() {
        let (sub, stream) = poll(ImmediateSleeper, Duration::from_secs(3), || async { 1u8 });
        let mut stream = Box::pin(stream);

        assert_eq!(stream.next().await, Some(1));
        drop(sub);
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test]
    async fn test_cancel_is_observable() {
        let (sub, stream) = poll(ImmediateSleeper, Duration::from_secs(3), || async { () });
        let mut stream = Box::pin(stream);
        sub.cancel();
        assert!(sub.is_cancelled());
        assert_eq!(stream.next().await, None);
    }
}
