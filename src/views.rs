//! 视图状态机
//!
//! 每个有状态组件对应一个与 UI 框架无关的数据结构和若干 `on_*` 转移方法，
//! 加上驱动 "加载 → 数据 | 错误" 流程的异步操作。
//! 状态保存在实现了 [`StateCell`] 的容器里：前端是信号，测试中是 `RefCell`。

pub mod admin;
pub mod auth_form;
pub mod cart;
pub mod comments;
pub mod dashboard;
pub mod farmer_orders;
pub mod loadable;
pub mod notifications;
pub mod orders;
pub mod post_feed;
pub mod post_form;
pub mod rider;

use std::cell::RefCell;

pub use loadable::{LoadState, LoadTicket, Loadable};

/// 组件状态容器
///
/// 组件卸载后容器可能失效，此时返回 `None`，进行中的操作应直接结束。
pub trait StateCell<T> {
    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R>;
    fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R>;
}

impl<T> StateCell<T> for RefCell<T> {
    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }

    fn read<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }
}

/// 操作结果提示（成功或失败），展示一段时间后由界面清除
#[derive(Debug, Clone, PartialEq)]
pub enum Feedback {
    Success(String),
    Error(String),
}

impl Feedback {
    pub fn message(&self) -> &str {
        match self {
            Feedback::Success(msg) | Feedback::Error(msg) => msg,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Feedback::Error(_))
    }
}

/// 解析数量输入；空白或非数字返回 `None`
pub fn parse_quantity(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    value.is_finite().then_some(value)
}
