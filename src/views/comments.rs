use super::{Loadable, StateCell};
use crate::client::ApiClient;
use crate::request::HttpClient;
use crate::session::SessionStore;
use farmgate_shared::{Comment, User};

pub const COMMENT_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, PartialEq)]
pub struct CommentsView {
    pub post_id: u64,
    pub comments: Loadable<Vec<Comment>>,
    pub draft: String,
    pub posting: bool,
    pub error: Option<String>,
    /// 等待确认删除的评论
    pub delete_target: Option<u64>,
}

impl CommentsView {
    pub fn new(post_id: u64) -> Self {
        Self {
            post_id,
            comments: Loadable::new(),
            draft: String::new(),
            posting: false,
            error: None,
            delete_target: None,
        }
    }

    pub fn count(&self) -> usize {
        self.comments.data().map_or(0, Vec::len)
    }

    pub fn can_submit(&self) -> bool {
        !self.posting && !self.draft.trim().is_empty()
    }

    /// 只有作者本人能删除
    pub fn can_delete(comment: &Comment, user: Option<&User>) -> bool {
        user.is_some_and(|u| comment.is_authored_by(u))
    }

    pub fn open_delete(&mut self, comment_id: u64) {
        self.delete_target = Some(comment_id);
    }

    pub fn close_delete(&mut self) {
        self.delete_target = None;
    }

    pub fn visible_error(&self) -> Option<&str> {
        self.error.as_deref().or(self.comments.error())
    }
}

pub async fn load_comments<H, S, C>(client: &ApiClient<H, S>, state: &C)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<CommentsView>,
{
    let Some((ticket, post_id)) = state.update(|s| (s.comments.begin(), s.post_id)) else {
        return;
    };
    let result = client
        .list_comments(post_id, Vec::new())
        .await
        .map_err(|_| "Failed to load comments".to_string());
    state.update(|s| {
        if s.comments.apply(ticket, result) {
            s.error = None;
        }
    });
}

/// 发表评论；内容为空时不发请求
pub async fn submit_comment<H, S, C>(client: &ApiClient<H, S>, state: &C) -> bool
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<CommentsView>,
{
    let Some(Some((post_id, content))) = state.update(|s| {
        if !s.can_submit() {
            return None;
        }
        s.posting = true;
        s.error = None;
        Some((s.post_id, s.draft.clone()))
    }) else {
        return false;
    };

    let ok = match client.create_comment(post_id, &content).await {
        Ok(_) => {
            state.update(|s| s.draft.clear());
            load_comments(client, state).await;
            true
        }
        Err(_) => {
            state.update(|s| s.error = Some("Failed to post comment".to_string()));
            false
        }
    };
    state.update(|s| s.posting = false);
    ok
}

pub async fn confirm_delete<H, S, C>(client: &ApiClient<H, S>, state: &C) -> bool
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<CommentsView>,
{
    let Some(Some((post_id, comment_id))) =
        state.read(|s| s.delete_target.map(|id| (s.post_id, id)))
    else {
        return false;
    };

    match client.delete_comment(post_id, comment_id).await {
        Ok(_) => {
            load_comments(client, state).await;
            state.update(|s| s.close_delete());
            true
        }
        Err(_) => {
            state.update(|s| s.error = Some("Failed to delete comment".to_string()));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mock, test_client};
    use farmgate_shared::protocol::HttpMethod;
    use farmgate_shared::{CommentAuthor, Role};
    use serde_json::json;
    use std::cell::RefCell;

    #[tokio::test]
    async fn test_blank_comment_issues_no_request() {
        let client = test_client();
        let state = RefCell::new(CommentsView::new(4));
        state.borrow_mut().draft = "   ".into();

        assert!(!submit_comment(&client, &state).await);
        assert_eq!(client.http().request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_reloads_list() {
        let client = test_client();
        mock(&client, HttpMethod::Post, "/api/posts/4/comments/", 201, json!({"id": 1, "content": "Nice"}));
        mock(&client, HttpMethod::Get, "/api/posts/4/comments/", 200, json!([{"id": 1, "content": "Nice"}]));
        let state = RefCell::new(CommentsView::new(4));
        state.borrow_mut().draft = "Nice".into();

        assert!(submit_comment(&client, &state).await);

        let view = state.borrow();
        assert_eq!(view.count(), 1);
        assert_eq!(view.draft, "");
        assert!(!view.posting);
        assert_eq!(client.http().requests.borrow()[0].json_body(), json!({"content": "Nice"}));
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_modal_open() {
        let client = test_client();
        mock(&client, HttpMethod::Delete, "/api/posts/4/comments/9/", 500, json!({}));
        let state = RefCell::new(CommentsView::new(4));
        state.borrow_mut().open_delete(9);

        assert!(!confirm_delete(&client, &state).await);
        let view = state.borrow();
        assert_eq!(view.delete_target, Some(9));
        assert_eq!(view.visible_error(), Some("Failed to delete comment"));
    }

    #[test]
    fn test_only_author_may_delete() {
        let comment = Comment {
            id: 1,
            content: "hi".into(),
            author: Some(CommentAuthor { id: 3, username: "bo".into() }),
            created_at: None,
        };
        let mut user = User {
            id: 3,
            username: "bo".into(),
            email: String::new(),
            role: Role::Customer,
            first_name: String::new(),
            last_name: String::new(),
            date_joined: None,
            is_suspended: false,
            suspension_reason: None,
        };
        assert!(CommentsView::can_delete(&comment, Some(&user)));
        user.id = 4;
        assert!(!CommentsView::can_delete(&comment, Some(&user)));
        assert!(!CommentsView::can_delete(&comment, None));
    }
}
