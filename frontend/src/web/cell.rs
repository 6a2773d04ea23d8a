//! 信号状态容器
//!
//! 把 `RwSignal` 包装成核心库的 [`StateCell`]，视图流程直接写入组件信号。
//! 组件卸载后信号被回收，`try_update` 返回 `None`，进行中的流程随之结束。

use farmgate::views::StateCell;
use leptos::prelude::*;

pub struct SignalCell<T: 'static>(RwSignal<T>);

impl<T: 'static> Clone for SignalCell<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for SignalCell<T> {}

impl<T: Send + Sync + 'static> SignalCell<T> {
    pub fn new(value: T) -> Self {
        Self(RwSignal::new(value))
    }

    pub fn signal(&self) -> RwSignal<T> {
        self.0
    }
}

impl<T: Send + Sync + 'static> StateCell<T> for SignalCell<T> {
    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.0.try_update(f)
    }

    fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        self.0.try_with(f)
    }
}
