use super::StateCell;
use crate::client::ApiClient;
use crate::request::HttpClient;
use crate::session::SessionStore;
use farmgate_shared::Notification;
use tracing::warn;

/// 通知列表
///
/// 以外部加载好的列表为初始值，标记已读只修改本地副本，不重新加载。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationsView {
    pub items: Vec<Notification>,
}

impl NotificationsView {
    pub fn from_items(items: Vec<Notification>) -> Self {
        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.is_read).count()
    }

    pub fn on_marked(&mut self, id: u64) {
        if let Some(n) = self.items.iter_mut().find(|n| n.id == id) {
            n.is_read = true;
        }
    }
}

/// 标记为已读；失败只记录日志，界面保持不变
pub async fn mark_read<H, S, C>(client: &ApiClient<H, S>, state: &C, id: u64) -> bool
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<NotificationsView>,
{
    match client.mark_notification_read(id).await {
        Ok(_) => state.update(|s| s.on_marked(id)).is_some(),
        Err(e) => {
            warn!(notification_id = id, error = %e, "failed to mark notification as read");
            false
        }
    }
}
