use super::*;
use crate::testing::{mock, test_client, url};
use farmgate_shared::protocol::HttpMethod;
use farmgate_shared::{Role, Unit};
use serde_json::json;
use std::cell::RefCell;

// =========================================================
// 辅助函数
// =========================================================

fn post(author_id: u64, price: Option<f64>, quantity: Option<f64>) -> Post {
    Post {
        id: 5,
        title: "Tomatoes".into(),
        content: "Ripe".into(),
        price,
        quantity,
        unit: Unit::Kg,
        images: Vec::new(),
        image_url: None,
        author_id: Some(author_id),
        author_name: Some("Mang Jose".into()),
        created_at: None,
    }
}

fn user(id: u64) -> User {
    User {
        id,
        username: "u".into(),
        email: String::new(),
        role: Role::Customer,
        first_name: String::new(),
        last_name: String::new(),
        date_joined: None,
        is_suspended: false,
        suspension_reason: None,
    }
}

// =========================================================
// 帖子流
// =========================================================

#[tokio::test]
async fn test_farmer_filter_passes_role_query() {
    let client = test_client();
    mock(&client, HttpMethod::Get, "/api/posts/", 200, json!([]));
    client.http().mock_response(
        HttpMethod::Get,
        &url("/api/posts/?role=farmer"),
        200,
        json!([{ "id": 1, "title": "Kale", "unit": "KG" }]),
    );
    let state = RefCell::new(PostFeedView::default());

    load_posts(&client, &state).await;
    assert!(state.borrow().is_empty());

    change_filter(&client, &state, FeedFilter::Farmers).await;
    assert_eq!(state.borrow().posts.items().len(), 1);

    // 相同筛选不重新请求
    change_filter(&client, &state, FeedFilter::Farmers).await;
    assert_eq!(client.http().request_count(), 2);
}

#[tokio::test]
async fn test_failed_feed_shows_fixed_message() {
    let client = test_client();
    mock(&client, HttpMethod::Get, "/api/posts/", 500, json!({"detail": "boom"}));
    let state = RefCell::new(PostFeedView::default());

    load_posts(&client, &state).await;

    let view = state.borrow();
    assert_eq!(view.posts.error(), Some("Failed to load posts"));
    assert!(view.posts.items().is_empty());
}

// =========================================================
// 帖子卡片
// =========================================================

#[test]
fn test_owner_and_cart_rules() {
    let priced = post(1, Some(40.0), Some(10.0));
    assert!(is_owner(&priced, Some(&user(1))));
    assert!(!can_add_to_cart(&priced, Some(&user(1))));
    assert!(can_add_to_cart(&priced, Some(&user(2))));
    assert!(can_add_to_cart(&priced, None));

    let unpriced = post(1, None, Some(10.0));
    assert!(!can_add_to_cart(&unpriced, Some(&user(2))));

    let free = post(1, Some(0.0), Some(10.0));
    assert!(can_add_to_cart(&free, Some(&user(2))));
}

#[test]
fn test_quantity_bounds() {
    let p = post(1, Some(40.0), Some(2.5));
    assert_eq!(validate_quantity(&p, "2.5"), Ok(2.5));
    assert_eq!(
        validate_quantity(&p, "0"),
        Err("Please enter a valid quantity".to_string())
    );
    assert_eq!(
        validate_quantity(&p, ""),
        Err("Please enter a valid quantity".to_string())
    );
    assert_eq!(
        validate_quantity(&p, "3"),
        Err("Maximum available: 2.5 kg".to_string())
    );
}

#[tokio::test]
async fn test_invalid_quantity_issues_no_request() {
    let client = test_client();
    let state = RefCell::new(PostCardView {
        selector_open: true,
        quantity_input: "-1".into(),
        ..PostCardView::default()
    });

    add_to_cart(&client, &state, &post(1, Some(40.0), Some(10.0))).await;

    assert_eq!(client.http().request_count(), 0);
    assert!(state.borrow().feedback.as_ref().is_some_and(Feedback::is_error));
}

#[tokio::test]
async fn test_add_to_cart_success_closes_selector() {
    let client = test_client();
    mock(&client, HttpMethod::Post, "/api/cart/", 201, json!({"id": 3}));
    let state = RefCell::new(PostCardView {
        selector_open: true,
        quantity_input: "2".into(),
        ..PostCardView::default()
    });

    add_to_cart(&client, &state, &post(1, Some(40.0), Some(10.0))).await;

    let view = state.borrow();
    assert!(!view.selector_open);
    assert!(!view.cart_busy);
    assert_eq!(view.quantity_input, "");
    assert_eq!(
        view.feedback,
        Some(Feedback::Success("Added to cart".to_string()))
    );
}

#[tokio::test]
async fn test_delete_failure_reports_detail() {
    let client = test_client();
    mock(
        &client,
        HttpMethod::Delete,
        "/api/posts/5/",
        403,
        json!({"detail": "You do not have permission to perform this action."}),
    );
    let state = RefCell::new(PostCardView {
        confirm_delete: true,
        ..PostCardView::default()
    });

    assert!(!delete_post(&client, &state, 5).await);

    let view = state.borrow();
    assert!(view.confirm_delete);
    assert_eq!(
        view.feedback.as_ref().map(Feedback::message),
        Some("You do not have permission to perform this action.")
    );
}

#[test]
fn test_image_navigation_wraps() {
    let mut card = PostCardView::default();
    card.prev_image(3);
    assert_eq!(card.image_index, 2);
    card.next_image(3);
    assert_eq!(card.image_index, 0);
    card.next_image(0);
    assert_eq!(card.image_index, 0);
}
