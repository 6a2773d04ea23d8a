use super::*;
use crate::request::FormPart;
use crate::testing::{mock, test_client, url};
use farmgate_shared::protocol::{GetCartRequest, ListPostsRequest, MeRequest};
use serde_json::json;

// =========================================================
// 凭据注入
// =========================================================

#[tokio::test]
async fn test_stored_credential_is_attached_to_every_request() {
    let client = test_client();
    client.session().save("tok-abc").unwrap();
    mock(&client, HttpMethod::Get, "/api/cart/", 200, json!([]));
    mock(&client, HttpMethod::Get, "/api/posts/", 200, json!([]));

    client.call(&GetCartRequest).await.unwrap();
    client.call(&ListPostsRequest::default()).await.unwrap();

    let requests = client.http().requests.borrow();
    assert_eq!(requests.len(), 2);
    for req in requests.iter() {
        assert_eq!(req.header("Authorization"), Some("Bearer tok-abc"));
    }
}

#[tokio::test]
async fn test_clear_credential_removes_header_from_next_request() {
    let client = test_client();
    client.session().save("tok-abc").unwrap();
    client.set_credential(Some("tok-abc"));
    mock(&client, HttpMethod::Get, "/api/cart/", 200, json!([]));

    client.call(&GetCartRequest).await.unwrap();
    client.clear_credential();
    client.call(&GetCartRequest).await.unwrap();

    let last = client.http().last_request().unwrap();
    assert_eq!(last.header("Authorization"), None);
    assert_eq!(client.stored_credential(), None);
}

#[tokio::test]
async fn test_stored_credential_wins_over_default_header() {
    let client = test_client();
    client.set_credential(Some("old"));
    client.session().save("new").unwrap();
    mock(&client, HttpMethod::Get, "/api/cart/", 200, json!([]));

    client.call(&GetCartRequest).await.unwrap();

    let last = client.http().last_request().unwrap();
    assert_eq!(last.header("Authorization"), Some("Bearer new"));
}

#[tokio::test]
async fn test_default_header_used_without_stored_credential() {
    let client = test_client();
    client.set_credential(Some("mem-only"));
    mock(&client, HttpMethod::Get, "/api/cart/", 200, json!([]));

    client.call(&GetCartRequest).await.unwrap();

    let last = client.http().last_request().unwrap();
    assert_eq!(last.header("Authorization"), Some("Bearer mem-only"));
}

// =========================================================
// 请求构造与错误
// =========================================================

#[tokio::test]
async fn test_query_is_encoded_and_passed_through() {
    let client = test_client();
    let path = "/api/posts/?role=farmer&search=green%20kale";
    client
        .http()
        .mock_response(HttpMethod::Get, &url(path), 200, json!([]));

    let req = ListPostsRequest {
        params: vec![
            ("role".to_string(), "farmer".to_string()),
            ("search".to_string(), "green kale".to_string()),
        ],
    };
    let posts = client.call(&req).await.unwrap();

    assert!(posts.is_empty());
    assert_eq!(client.http().last_request().unwrap().url, url(path));
}

#[tokio::test]
async fn test_non_2xx_becomes_http_error_with_body() {
    let client = test_client();
    mock(&client, HttpMethod::Get, "/api/auth/me/", 401, json!({"detail": "Token expired"}));

    let err = client.call(&MeRequest).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.status(), Some(401));
    assert_eq!(err.user_message("fallback"), "Token expired");
}

#[tokio::test]
async fn test_network_failure_propagates() {
    let client = test_client();
    client.http().go_offline();

    let err = client.call(&GetCartRequest).await.unwrap_err();
    assert_eq!(err.kind(), crate::error::ErrorKind::Network);
}

#[tokio::test]
async fn test_multipart_request_carries_no_json_content_type() {
    let client = test_client();
    mock(&client, HttpMethod::Post, "/api/posts/1/upload_images/", 200, json!({}));

    let body = RequestBody::Multipart(vec![FormPart::text("title", "x")]);
    client
        .request(
            HttpMethod::Post,
            "/api/posts/1/upload_images/",
            body,
            RequestOptions::default(),
        )
        .await
        .unwrap();

    let last = client.http().last_request().unwrap();
    assert_eq!(last.header("Content-Type"), None);
    assert!(last.body.is_multipart());
}

#[tokio::test]
async fn test_extra_headers_from_options() {
    let client = test_client();
    mock(&client, HttpMethod::Get, "/api/cart/", 200, json!([]));

    let options = RequestOptions {
        headers: vec![("X-Trace".to_string(), "1".to_string())],
        ..RequestOptions::default()
    };
    client
        .request(HttpMethod::Get, "/api/cart/", RequestBody::Empty, options)
        .await
        .unwrap();

    assert_eq!(client.http().last_request().unwrap().header("X-Trace"), Some("1"));
}

#[test]
fn test_encode_component() {
    assert_eq!(encode_component("a b&c=d"), "a%20b%26c%3Dd");
    assert_eq!(encode_component("kale-1.0_~"), "kale-1.0_~");
}
