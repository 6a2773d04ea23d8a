//! 会话存储
//!
//! 只保存一个访问令牌：登录时写入，应用加载时读取，注销或 who-am-I
//! 校验失败时清除。没有过期跟踪，也没有刷新令牌流程。

use crate::error::ClientResult;
use std::sync::{Arc, RwLock};

/// 本地存储中令牌使用的键
pub const SESSION_STORAGE_KEY: &str = "accessToken";

/// 会话存储特性
///
/// 浏览器端由 frontend 基于 localStorage 实现；测试与原生端使用内存实现。
pub trait SessionStore {
    fn save(&self, token: &str) -> ClientResult<()>;
    fn read(&self) -> Option<String>;
    fn clear(&self);
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn save(&self, token: &str) -> ClientResult<()> {
        (**self).save(token)
    }

    fn read(&self) -> Option<String> {
        (**self).read()
    }

    fn clear(&self) {
        (**self).clear()
    }
}

/// 内存会话存储
///
/// 克隆后共享同一份令牌，便于在测试中同时持有客户端与存储。
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    token: Arc<RwLock<Option<String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        if let Ok(mut guard) = store.token.write() {
            *guard = Some(token.to_string());
        }
        store
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, token: &str) -> ClientResult<()> {
        let mut guard = self
            .token
            .write()
            .map_err(|e| crate::error::ClientError::Storage(e.to_string()))?;
        *guard = Some(token.to_string());
        Ok(())
    }

    fn read(&self) -> Option<String> {
        self.token.read().ok()?.clone()
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_read_clear() {
        let store = MemorySessionStore::new();
        assert_eq!(store.read(), None);

        store.save("tok-1").unwrap();
        assert_eq!(store.read().as_deref(), Some("tok-1"));

        let shared = store.clone();
        shared.save("tok-2").unwrap();
        assert_eq!(store.read().as_deref(), Some("tok-2"));

        store.clear();
        assert_eq!(shared.read(), None);
    }
}
