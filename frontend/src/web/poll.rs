//! 组件级轮询
//!
//! 挂载时订阅，卸载时取消。每一轮的结果已经由视图流程写入状态，这里只负责驱动。

use super::timer::TimeoutSleeper;
use futures::StreamExt;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use std::time::Duration;

pub fn use_poll<F, Fut>(interval: Duration, fetch: F)
where
    F: FnMut() -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    let (subscription, ticks) = farmgate::poll(TimeoutSleeper, interval, fetch);
    spawn_local(ticks.for_each(|_| async {}));
    on_cleanup(move || subscription.cancel());
}
