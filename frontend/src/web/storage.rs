//! LocalStorage 会话存储
//!
//! 令牌以原始字符串保存在 `accessToken` 键下，不做 JSON 包装。

use farmgate::error::{ClientError, ClientResult};
use farmgate::session::{SESSION_STORAGE_KEY, SessionStore};
use gloo_storage::{LocalStorage, Storage};

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSession;

impl SessionStore for BrowserSession {
    fn save(&self, token: &str) -> ClientResult<()> {
        LocalStorage::raw()
            .set_item(SESSION_STORAGE_KEY, token)
            .map_err(|e| ClientError::Storage(format!("{:?}", e)))
    }

    fn read(&self) -> Option<String> {
        LocalStorage::raw()
            .get_item(SESSION_STORAGE_KEY)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    fn clear(&self) {
        LocalStorage::delete(SESSION_STORAGE_KEY);
    }
}
