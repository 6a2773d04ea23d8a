use crate::client::ApiClient;
use crate::error::ClientResult;
use crate::request::HttpClient;
use crate::session::SessionStore;
use farmgate_shared::Comment;
use farmgate_shared::protocol::{
    Ack, CreateCommentRequest, DeleteCommentRequest, ListCommentsRequest, UpdateCommentRequest,
};

impl<H: HttpClient, S: SessionStore> ApiClient<H, S> {
    pub async fn list_comments(
        &self,
        post_id: u64,
        params: Vec<(String, String)>,
    ) -> ClientResult<Vec<Comment>> {
        self.call(&ListCommentsRequest { post_id, params }).await
    }

    pub async fn create_comment(&self, post_id: u64, content: &str) -> ClientResult<Comment> {
        self.call(&CreateCommentRequest {
            post_id,
            content: content.to_string(),
        })
        .await
    }

    pub async fn update_comment(
        &self,
        post_id: u64,
        comment_id: u64,
        content: &str,
    ) -> ClientResult<Comment> {
        self.call(&UpdateCommentRequest {
            post_id,
            comment_id,
            content: content.to_string(),
        })
        .await
    }

    pub async fn delete_comment(&self, post_id: u64, comment_id: u64) -> ClientResult<Ack> {
        self.call(&DeleteCommentRequest {
            post_id,
            comment_id,
        })
        .await
    }
}
