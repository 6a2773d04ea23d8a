use super::*;
use crate::request::RequestBody;
use crate::testing::{mock, test_client};
use farmgate_shared::protocol::HttpMethod;
use serde_json::json;
use std::cell::RefCell;

fn image(name: &str, content_type: &str, size: usize) -> (ImageFile, String) {
    (
        ImageFile {
            file_name: name.to_string(),
            content_type: content_type.to_string(),
            bytes: vec![0; size],
        },
        String::new(),
    )
}

fn filled_form() -> PostFormView {
    PostFormView {
        title: "  Carrots ".into(),
        content: "Sweet".into(),
        price: "60".into(),
        quantity: "abc".into(),
        ..PostFormView::default()
    }
}

// =========================================================
// 校验
// =========================================================

#[tokio::test]
async fn test_empty_required_fields_issue_no_request() {
    let client = test_client();
    let state = RefCell::new(PostFormView {
        content: "only a description".into(),
        ..PostFormView::default()
    });

    assert_eq!(submit(&client, &state).await, None);
    assert_eq!(state.borrow().error.as_deref(), Some("Title is required"));

    state.borrow_mut().title = "Title".into();
    state.borrow_mut().content = "   ".into();
    assert_eq!(submit(&client, &state).await, None);
    assert_eq!(state.borrow().error.as_deref(), Some("Description is required"));

    assert_eq!(client.http().request_count(), 0);
}

#[test]
fn test_draft_trims_and_ignores_bad_numbers() {
    let draft = filled_form().draft().unwrap();
    assert_eq!(draft.title, "Carrots");
    assert_eq!(draft.price, Some(60.0));
    assert_eq!(draft.quantity, None);
    assert_eq!(draft.unit, Unit::Kg);
}

#[test]
fn test_image_limits() {
    let mut form = PostFormView::default();
    form.add_images(vec![
        image("ok.png", "image/png", 10),
        image("big.jpg", "image/jpeg", MAX_IMAGE_BYTES as usize + 1),
        image("doc.pdf", "application/pdf", 10),
    ]);
    assert_eq!(form.images.len(), 1);
    assert_eq!(
        form.error.as_deref(),
        Some("\"doc.pdf\" has unsupported format. Allowed: JPEG, PNG, GIF, WebP.")
    );

    let many: Vec<_> = (0..15).map(|i| image(&format!("{i}.gif"), "image/gif", 1)).collect();
    form.add_images(many);
    assert_eq!(form.images.len(), 1);
    assert_eq!(
        form.error.as_deref(),
        Some("Maximum 15 images allowed. You have 1, trying to add 15.")
    );

    let id = form.images[0].id.clone();
    form.remove_image(&id);
    assert!(form.images.is_empty());
}

// =========================================================
// 提交流程
// =========================================================

#[tokio::test]
async fn test_create_then_upload_then_reset() {
    let client = test_client();
    mock(&client, HttpMethod::Post, "/api/posts/", 201, json!({"id": 31, "title": "Carrots"}));
    mock(&client, HttpMethod::Post, "/api/posts/31/upload_images/", 200, json!({}));
    let mut form = filled_form();
    form.add_images(vec![image("a.webp", "image/webp", 3)]);
    let state = RefCell::new(form);

    assert_eq!(submit(&client, &state).await, Some(31));

    let requests = client.http().requests.borrow();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].body.is_multipart());
    let RequestBody::Multipart(parts) = &requests[1].body else {
        panic!("expected multipart upload");
    };
    assert_eq!(parts.len(), 1);

    let view = state.borrow();
    assert_eq!(view.title, "");
    assert!(view.images.is_empty());
    assert_eq!(view.success.as_deref(), Some("Post created successfully!"));
}

#[tokio::test]
async fn test_upload_failure_keeps_post_and_retries_upload_only() {
    let client = test_client();
    mock(&client, HttpMethod::Post, "/api/posts/", 201, json!({"id": 8, "title": "Carrots"}));
    mock(&client, HttpMethod::Post, "/api/posts/8/upload_images/", 413, json!({"detail": "too big"}));
    mock(&client, HttpMethod::Post, "/api/posts/8/upload_images/", 200, json!({}));
    let mut form = filled_form();
    form.add_images(vec![image("a.png", "image/png", 3)]);
    let state = RefCell::new(form);

    assert_eq!(submit(&client, &state).await, None);
    {
        let view = state.borrow();
        assert_eq!(view.error.as_deref(), Some(UPLOAD_FAILED));
        assert_eq!(view.created_post_id, Some(8));
        assert_eq!(view.title, "  Carrots ");
    }

    assert_eq!(submit(&client, &state).await, Some(8));
    assert_eq!(client.http().requests_to(&crate::testing::url("/api/posts/")).len(), 1);
}

#[tokio::test]
async fn test_create_error_messages() {
    let client = test_client();
    mock(&client, HttpMethod::Post, "/api/posts/", 400, json!({"price": ["A valid number is required."], "unit": "bad"}));
    let state = RefCell::new(filled_form());

    submit(&client, &state).await;
    assert_eq!(
        state.borrow().error.as_deref(),
        Some("price: A valid number is required., unit: bad")
    );

    let server = ClientError::Http { status: 500, body: "<html>".into() };
    assert_eq!(
        create_error_message(&server),
        "Server error - please contact support or check backend logs"
    );
}
