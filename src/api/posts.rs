use crate::client::{ApiClient, RequestOptions};
use crate::error::ClientResult;
use crate::request::{FormPart, HttpClient, RequestBody};
use crate::session::SessionStore;
use farmgate_shared::protocol::{
    Ack, ApiRequest, CreatePostRequest, DeletePostImageRequest, DeletePostRequest, GetPostRequest,
    HttpMethod, ListPostsRequest, UpdatePostRequest, upload_images_path,
};
use farmgate_shared::{Post, PostDraft};

/// 待上传的图片文件
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn into_part(self, field: &str) -> FormPart {
        FormPart::File {
            name: field.to_string(),
            file_name: self.file_name,
            content_type: self.content_type,
            bytes: self.bytes,
        }
    }
}

/// 帖子字段的 multipart 形式：未填写的价格与数量不发送
fn draft_parts(draft: &PostDraft) -> Vec<FormPart> {
    let mut parts = vec![
        FormPart::text("title", draft.title.as_str()),
        FormPart::text("content", draft.content.as_str()),
    ];
    if let Some(price) = draft.price {
        parts.push(FormPart::text("price", price.to_string()));
    }
    if let Some(quantity) = draft.quantity {
        parts.push(FormPart::text("quantity", quantity.to_string()));
    }
    parts.push(FormPart::text("unit", draft.unit.as_str()));
    parts
}

impl<H: HttpClient, S: SessionStore> ApiClient<H, S> {
    pub async fn list_posts(&self, params: Vec<(String, String)>) -> ClientResult<Vec<Post>> {
        self.call(&ListPostsRequest { params }).await
    }

    pub async fn get_post(&self, id: u64) -> ClientResult<Post> {
        self.call(&GetPostRequest { id }).await
    }

    /// JSON 方式创建帖子
    pub async fn create_post(&self, draft: &PostDraft) -> ClientResult<Post> {
        self.call(&CreatePostRequest(draft.clone())).await
    }

    /// multipart 方式创建帖子（农户发帖表单使用）
    pub async fn create_post_multipart(&self, draft: &PostDraft) -> ClientResult<Post> {
        let req = CreatePostRequest(draft.clone());
        let resp = self
            .request(
                HttpMethod::Post,
                &req.path(),
                RequestBody::Multipart(draft_parts(draft)),
                RequestOptions::default(),
            )
            .await?;
        resp.json()
    }

    pub async fn update_post(&self, id: u64, draft: &PostDraft) -> ClientResult<Post> {
        self.call(&UpdatePostRequest {
            id,
            draft: draft.clone(),
        })
        .await
    }

    pub async fn delete_post(&self, id: u64) -> ClientResult<Ack> {
        self.call(&DeletePostRequest { id }).await
    }

    /// 上传图片，每个文件一个 `images` 字段
    pub async fn upload_images(&self, post_id: u64, files: Vec<ImageFile>) -> ClientResult<Ack> {
        let parts = files.into_iter().map(|f| f.into_part("images")).collect();
        let resp = self
            .request(
                HttpMethod::Post,
                &upload_images_path(post_id),
                RequestBody::Multipart(parts),
                RequestOptions::default(),
            )
            .await?;
        resp.json()
    }

    pub async fn delete_post_image(&self, post_id: u64, image_id: u64) -> ClientResult<Ack> {
        self.call(&DeletePostImageRequest { post_id, image_id }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mock, test_client};
    use farmgate_shared::Unit;
    use serde_json::json;

    fn post_json(id: u64) -> serde_json::Value {
        json!({ "id": id, "title": "Kale", "content": "Fresh", "unit": "KG", "images": [] })
    }

    #[tokio::test]
    async fn test_multipart_create_skips_empty_price_and_quantity() {
        let client = test_client();
        mock(&client, HttpMethod::Post, "/api/posts/", 201, post_json(9));

        let draft = PostDraft {
            title: "Kale".into(),
            content: "Fresh".into(),
            price: Some(45.5),
            quantity: None,
            unit: Unit::G,
        };
        let post = client.create_post_multipart(&draft).await.unwrap();
        assert_eq!(post.id, 9);

        let last = client.http().last_request().unwrap();
        let RequestBody::Multipart(parts) = last.body else {
            panic!("expected multipart body");
        };
        let names: Vec<&str> = parts.iter().map(FormPart::name).collect();
        assert_eq!(names, vec!["title", "content", "price", "unit"]);
        assert!(parts.contains(&FormPart::text("unit", "G")));
        assert!(parts.contains(&FormPart::text("price", "45.5")));
    }

    #[tokio::test]
    async fn test_upload_images_uses_images_field_per_file() {
        let client = test_client();
        mock(&client, HttpMethod::Post, "/api/posts/3/upload_images/", 200, json!({"uploaded": 2}));

        let file = |n: &str| ImageFile {
            file_name: n.to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![1, 2, 3],
        };
        client.upload_images(3, vec![file("a.png"), file("b.png")]).await.unwrap();

        let last = client.http().last_request().unwrap();
        let RequestBody::Multipart(parts) = last.body else {
            panic!("expected multipart body");
        };
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|p| p.name() == "images"));
    }

    #[tokio::test]
    async fn test_delete_image_sends_image_id_body() {
        let client = test_client();
        mock(&client, HttpMethod::Delete, "/api/posts/3/delete_image/", 204, serde_json::Value::Null);

        client.delete_post_image(3, 17).await.unwrap();

        let last = client.http().last_request().unwrap();
        assert_eq!(last.json_body(), json!({ "image_id": 17 }));
    }
}
