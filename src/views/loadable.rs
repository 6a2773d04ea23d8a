use crate::error::ClientError;

/// 单次加载的序号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

/// 三态加载状态机：loading → ready | failed
///
/// 每次加载先领取一个 [`LoadTicket`]。比已应用结果更旧的响应会被丢弃，
/// 慢响应不会覆盖较新的状态。
#[derive(Debug, Clone, PartialEq)]
pub struct Loadable<T> {
    state: LoadState<T>,
    issued: u64,
    applied: u64,
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self {
            state: LoadState::Loading,
            issued: 0,
            applied: 0,
        }
    }
}

impl<T> Loadable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 开始一次加载。已有数据时保持展示，失败状态回到 Loading。
    pub fn begin(&mut self) -> LoadTicket {
        self.issued += 1;
        if matches!(self.state, LoadState::Failed(_)) {
            self.state = LoadState::Loading;
        }
        LoadTicket(self.issued)
    }

    /// 开始一次加载并清空当前数据（例如切换筛选条件）
    pub fn restart(&mut self) -> LoadTicket {
        self.state = LoadState::Loading;
        self.begin()
    }

    /// 应用加载结果；过期的结果返回 `false` 且不修改状态
    pub fn apply(&mut self, ticket: LoadTicket, result: Result<T, String>) -> bool {
        if ticket.0 <= self.applied {
            return false;
        }
        self.applied = ticket.0;
        self.state = match result {
            Ok(data) => LoadState::Ready(data),
            Err(msg) => LoadState::Failed(msg),
        };
        true
    }

    /// 应用客户端结果，错误转换为 `fallback` 或后端消息
    pub fn apply_result(
        &mut self,
        ticket: LoadTicket,
        result: Result<T, ClientError>,
        fallback: &str,
    ) -> bool {
        self.apply(ticket, result.map_err(|e| e.user_message(fallback)))
    }

    pub fn set_ready(&mut self, data: T) {
        self.applied = self.issued;
        self.state = LoadState::Ready(data);
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading) || self.issued > self.applied
    }

    pub fn data(&self) -> Option<&T> {
        match &self.state {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match &mut self.state {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

impl<T: Default> Loadable<T> {
    /// 轮询刷新：失败时保留已有数据，没有数据时使用默认值（空列表）。
    ///
    /// 返回 `None` 表示结果已过期；否则返回本次失败的消息（成功为 `Ok`）。
    pub fn apply_or_keep(
        &mut self,
        ticket: LoadTicket,
        result: Result<T, String>,
    ) -> Option<Result<(), String>> {
        if ticket.0 <= self.applied {
            return None;
        }
        self.applied = ticket.0;
        match result {
            Ok(data) => {
                self.state = LoadState::Ready(data);
                Some(Ok(()))
            }
            Err(msg) => {
                if !matches!(self.state, LoadState::Ready(_)) {
                    self.state = LoadState::Ready(T::default());
                }
                Some(Err(msg))
            }
        }
    }
}

impl<T: Clone> Loadable<Vec<T>> {
    /// 列表数据，未就绪时为空
    pub fn items(&self) -> Vec<T> {
        self.data().cloned().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_then_ready() {
        let mut l: Loadable<Vec<u8>> = Loadable::new();
        assert!(l.is_loading());
        let t = l.begin();
        assert!(l.apply(t, Ok(vec![1])));
        assert!(!l.is_loading());
        assert_eq!(l.data(), Some(&vec![1]));
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut l: Loadable<&str> = Loadable::new();
        let slow = l.begin();
        let fast = l.begin();

        assert!(l.apply(fast, Ok("new")));
        assert!(!l.apply(slow, Ok("old")));
        assert_eq!(l.data(), Some(&"new"));
    }

    #[test]
    fn test_refresh_keeps_data_until_result() {
        let mut l: Loadable<u8> = Loadable::new();
        let t = l.begin();
        l.apply(t, Ok(1));

        let t = l.begin();
        assert_eq!(l.data(), Some(&1));
        assert!(l.is_loading());

        l.apply(t, Err("Failed to load".into()));
        assert_eq!(l.error(), Some("Failed to load"));
        assert_eq!(l.data(), None);

        l.begin();
        assert_eq!(l.state(), &LoadState::Loading);
    }

    #[test]
    fn test_refresh_failure_keeps_data_or_falls_back_to_empty() {
        let mut l: Loadable<Vec<u8>> = Loadable::new();
        let t = l.begin();
        assert_eq!(l.apply_or_keep(t, Err("down".into())), Some(Err("down".into())));
        assert_eq!(l.data(), Some(&vec![]));

        let t = l.begin();
        l.apply_or_keep(t, Ok(vec![4]));
        let t = l.begin();
        l.apply_or_keep(t, Err("down".into()));
        assert_eq!(l.data(), Some(&vec![4]));

        let old = l.begin();
        let new = l.begin();
        l.apply_or_keep(new, Ok(vec![5]));
        assert_eq!(l.apply_or_keep(old, Ok(vec![1])), None);
    }
}
