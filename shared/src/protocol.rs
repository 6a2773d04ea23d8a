use crate::{
    AdminDashboard, CartItem, CheckoutResponse, Comment, Credentials, Delivery, DeliveryStatus,
    Notification, Order, Post, PostDraft, Registration, TokenPair, User,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that binds one backend operation to exactly one HTTP verb + path.
///
/// Paths keep the trailing slash the backend router expects.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;

    /// The URL path, relative to the API base.
    fn path(&self) -> String;

    /// Query parameters, passed through unchanged.
    fn query(&self) -> Vec<(String, String)> {
        Vec::new()
    }

    /// JSON body, if any.
    fn body(&self) -> Option<Value> {
        None
    }
}

/// 操作类接口（审批、接单等）的响应体形状不固定，且客户端随后会整体重新加载，
/// 因此统一按任意 JSON 接收。
pub type Ack = Value;

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest(pub Credentials);

impl ApiRequest for LoginRequest {
    type Response = TokenPair;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/auth/login/".to_string()
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "username": self.0.username, "password": self.0.password }))
    }
}

/// Who-am-I check for the stored credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeRequest;

impl ApiRequest for MeRequest {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/auth/me/".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest(pub Registration);

impl ApiRequest for RegisterRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        let kind = match &self.0 {
            Registration::Customer(_) => "customer",
            Registration::Farmer { .. } => "farmer",
            Registration::Rider { .. } => "rider",
        };
        format!("/api/auth/register/{}/", kind)
    }

    fn body(&self) -> Option<Value> {
        let account = self.0.account();
        let mut body = json!({
            "username": account.username,
            "email": account.email,
            "password": account.password,
            "first_name": account.first_name,
            "last_name": account.last_name,
        });
        let extra = match &self.0 {
            Registration::Customer(_) => json!({}),
            Registration::Farmer { farm_name, .. } => json!({ "farm_name": farm_name }),
            Registration::Rider {
                phone,
                vehicle_type,
                vehicle_plate,
                ..
            } => json!({
                "phone": phone,
                "vehicle_type": vehicle_type,
                "vehicle_plate": vehicle_plate,
            }),
        };
        if let (Some(target), Value::Object(extra)) = (body.as_object_mut(), extra) {
            target.extend(extra);
        }
        Some(body)
    }
}

// =========================================================
// Posts
// =========================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPostsRequest {
    pub params: Vec<(String, String)>,
}

impl ApiRequest for ListPostsRequest {
    type Response = Vec<Post>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/posts/".to_string()
    }

    fn query(&self) -> Vec<(String, String)> {
        self.params.clone()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetPostRequest {
    pub id: u64,
}

impl ApiRequest for GetPostRequest {
    type Response = Post;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/posts/{}/", self.id)
    }
}

/// JSON variant of post creation (the multipart variant is built by the client)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest(pub PostDraft);

impl ApiRequest for CreatePostRequest {
    type Response = Post;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/posts/".to_string()
    }

    fn body(&self) -> Option<Value> {
        serde_json::to_value(&self.0).ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub id: u64,
    pub draft: PostDraft,
}

impl ApiRequest for UpdatePostRequest {
    type Response = Post;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("/api/posts/{}/", self.id)
    }

    fn body(&self) -> Option<Value> {
        serde_json::to_value(&self.draft).ok()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePostRequest {
    pub id: u64,
}

impl ApiRequest for DeletePostRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/posts/{}/", self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletePostImageRequest {
    pub post_id: u64,
    pub image_id: u64,
}

impl ApiRequest for DeletePostImageRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/posts/{}/delete_image/", self.post_id)
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "image_id": self.image_id }))
    }
}

pub fn upload_images_path(post_id: u64) -> String {
    format!("/api/posts/{}/upload_images/", post_id)
}

// =========================================================
// Comments
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCommentsRequest {
    pub post_id: u64,
    pub params: Vec<(String, String)>,
}

impl ApiRequest for ListCommentsRequest {
    type Response = Vec<Comment>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/posts/{}/comments/", self.post_id)
    }

    fn query(&self) -> Vec<(String, String)> {
        self.params.clone()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub post_id: u64,
    pub content: String,
}

impl ApiRequest for CreateCommentRequest {
    type Response = Comment;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/api/posts/{}/comments/", self.post_id)
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "content": self.content }))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCommentRequest {
    pub post_id: u64,
    pub comment_id: u64,
    pub content: String,
}

impl ApiRequest for UpdateCommentRequest {
    type Response = Comment;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("/api/posts/{}/comments/{}/", self.post_id, self.comment_id)
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "content": self.content }))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteCommentRequest {
    pub post_id: u64,
    pub comment_id: u64,
}

impl ApiRequest for DeleteCommentRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/posts/{}/comments/{}/", self.post_id, self.comment_id)
    }
}

// =========================================================
// Cart
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetCartRequest;

impl ApiRequest for GetCartRequest {
    type Response = Vec<CartItem>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/cart/".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub post: u64,
    pub quantity: f64,
}

impl ApiRequest for AddToCartRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/cart/".to_string()
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "post": self.post, "quantity": self.quantity }))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCartItemRequest {
    pub id: u64,
    pub quantity: f64,
}

impl ApiRequest for UpdateCartItemRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("/api/cart/{}/", self.id)
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "quantity": self.quantity }))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveCartItemRequest {
    pub id: u64,
}

impl ApiRequest for RemoveCartItemRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("/api/cart/{}/", self.id)
    }
}

/// Cart-scoped checkout endpoint (the cart view checks out through orders)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartCheckoutRequest;

impl ApiRequest for CartCheckoutRequest {
    type Response = CheckoutResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/cart/checkout/".to_string()
    }
}

// =========================================================
// Orders
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest;

impl ApiRequest for CheckoutRequest {
    type Response = CheckoutResponse;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        "/api/orders/checkout/".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyOrdersRequest;

impl ApiRequest for MyOrdersRequest {
    type Response = Vec<Order>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/orders/my_orders/".to_string()
    }
}

/// Orders awaiting the current farmer's decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingOrdersRequest;

impl ApiRequest for PendingOrdersRequest {
    type Response = Vec<Order>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/orders/my_pending_orders/".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetailRequest {
    pub id: u64,
}

impl ApiRequest for OrderDetailRequest {
    type Response = Order;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("/api/orders/{}/", self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveOrderRequest {
    pub id: u64,
}

impl ApiRequest for ApproveOrderRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/api/orders/{}/approve/", self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectOrderRequest {
    pub id: u64,
    pub reason: String,
}

impl ApiRequest for RejectOrderRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/api/orders/{}/reject/", self.id)
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "reason": self.reason }))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmReceivedRequest {
    pub id: u64,
}

impl ApiRequest for ConfirmReceivedRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/api/orders/{}/confirm_received/", self.id)
    }
}

// =========================================================
// Deliveries
// =========================================================

/// Which delivery listing to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryList {
    Available,
    Mine,
    MyPending,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDeliveriesRequest(pub DeliveryList);

impl ApiRequest for ListDeliveriesRequest {
    type Response = Vec<Delivery>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        match self.0 {
            DeliveryList::Available => "/api/deliveries/available/",
            DeliveryList::Mine => "/api/deliveries/my_deliveries/",
            DeliveryList::MyPending => "/api/deliveries/my_pending/",
        }
        .to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptDeliveryRequest {
    pub id: u64,
}

impl ApiRequest for AcceptDeliveryRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/api/deliveries/{}/accept/", self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectDeliveryRequest {
    pub id: u64,
    pub reason: String,
}

impl ApiRequest for RejectDeliveryRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/api/deliveries/{}/reject/", self.id)
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "reason": self.reason }))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDeliveryStatusRequest {
    pub id: u64,
    pub status: DeliveryStatus,
    pub notes: String,
}

impl ApiRequest for UpdateDeliveryStatusRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/api/deliveries/{}/update_status/", self.id)
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "status": self.status.as_str(), "notes": self.notes }))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteDeliveryRequest {
    pub id: u64,
}

impl ApiRequest for CompleteDeliveryRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/api/deliveries/{}/complete/", self.id)
    }
}

// =========================================================
// Notifications
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListNotificationsRequest {
    pub unread_only: bool,
}

impl ApiRequest for ListNotificationsRequest {
    type Response = Vec<Notification>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        if self.unread_only {
            "/api/notifications/unread/".to_string()
        } else {
            "/api/notifications/my_notifications/".to_string()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkNotificationReadRequest {
    pub id: u64,
}

impl ApiRequest for MarkNotificationReadRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("/api/notifications/{}/mark_as_read/", self.id)
    }
}

// =========================================================
// Admin
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminDashboardRequest;

impl ApiRequest for AdminDashboardRequest {
    type Response = AdminDashboard;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/auth/admin/dashboard/".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUsersRequest;

impl ApiRequest for AdminUsersRequest {
    type Response = Vec<User>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/api/auth/admin/users-management/".to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspendUserRequest {
    pub id: u64,
    pub reason: String,
}

impl ApiRequest for SuspendUserRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/api/auth/admin/users/{}/suspend/", self.id)
    }

    fn body(&self) -> Option<Value> {
        Some(json!({ "reason": self.reason }))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactivateUserRequest {
    pub id: u64,
}

impl ApiRequest for ReactivateUserRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("/api/auth/admin/users/{}/reactivate/", self.id)
    }
}
