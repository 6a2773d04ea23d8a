use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod date;
pub mod protocol;
pub mod serde_helper;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";

/// 单个帖子允许的最大图片数量
pub const MAX_POST_IMAGES: usize = 15;
/// 单张图片的最大字节数 (5 MiB)
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
/// 允许上传的图片 MIME 类型
pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];

// =========================================================
// 用户与认证 (Users & Auth)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Farmer,
    Rider,
    Admin,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Customer => "Customer",
            Role::Farmer => "Farmer",
            Role::Rider => "Rider",
            Role::Admin => "Admin",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "CUSTOMER",
            Role::Farmer => "FARMER",
            Role::Rider => "RIDER",
            Role::Admin => "ADMIN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, with = "serde_helper::datetime_opt")]
    pub date_joined: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_suspended: bool,
    #[serde(default)]
    pub suspension_reason: Option<String>,
}

impl User {
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role
    }

    /// 头像上显示的首字母
    pub fn initial(&self) -> String {
        self.username
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

/// 登录接口返回的令牌对
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// 三种注册表单共用的字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountFields {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Registration {
    Customer(AccountFields),
    Farmer {
        account: AccountFields,
        farm_name: String,
    },
    Rider {
        account: AccountFields,
        phone: String,
        vehicle_type: String,
        vehicle_plate: String,
    },
}

impl Registration {
    pub fn account(&self) -> &AccountFields {
        match self {
            Registration::Customer(account) => account,
            Registration::Farmer { account, .. } => account,
            Registration::Rider { account, .. } => account,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            Registration::Customer(_) => Role::Customer,
            Registration::Farmer { .. } => Role::Farmer,
            Registration::Rider { .. } => Role::Rider,
        }
    }
}

// =========================================================
// 帖子与评论 (Posts & Comments)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Unit {
    #[default]
    Kg,
    G,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "KG",
            Unit::G => "G",
        }
    }

    /// 页面上显示的短单位
    pub fn short(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::G => "g",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostImage {
    pub id: u64,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, with = "serde_helper::decimal_opt")]
    pub price: Option<f64>,
    #[serde(default, with = "serde_helper::decimal_opt")]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default)]
    pub images: Vec<PostImage>,
    /// 旧版单图字段
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub author_id: Option<u64>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default, with = "serde_helper::datetime_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Post {
    /// 图集：优先使用多图，否则回退到旧版单图
    pub fn gallery(&self) -> Vec<String> {
        if !self.images.is_empty() {
            self.images.iter().map(|img| img.image_url.clone()).collect()
        } else {
            self.image_url.iter().cloned().collect()
        }
    }

    pub fn author_display(&self) -> &str {
        self.author_name.as_deref().unwrap_or("Farmer")
    }
}

/// 创建或整体替换帖子时提交的字段
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    pub unit: Unit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub id: u64,
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub content: String,
    #[serde(default)]
    pub author: Option<CommentAuthor>,
    #[serde(default, with = "serde_helper::datetime_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Comment {
    pub fn is_authored_by(&self, user: &User) -> bool {
        self.author.as_ref().is_some_and(|a| a.id == user.id)
    }
}

// =========================================================
// 购物车与订单 (Cart & Orders)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: u64,
    pub post: Post,
    #[serde(with = "serde_helper::decimal")]
    pub quantity: f64,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.post.price.unwrap_or(0.0) * self.quantity
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    InProgress,
    Approved,
    Rejected,
    SimulationDelivery,
    Completed,
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::InProgress => "In Progress",
            OrderStatus::Approved => "Approved",
            OrderStatus::Rejected => "Rejected",
            OrderStatus::SimulationDelivery => "Out for Delivery",
            OrderStatus::Completed => "Completed",
            OrderStatus::Unknown => "Pending",
        }
    }

    /// 状态徽章的样式类名
    pub fn css_class(&self) -> &'static str {
        match self {
            OrderStatus::InProgress => "status-in-progress",
            OrderStatus::Approved => "status-approved",
            OrderStatus::Rejected => "status-rejected",
            OrderStatus::Completed => "status-completed",
            OrderStatus::SimulationDelivery | OrderStatus::Unknown => "status-pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: u64,
    pub post: Post,
    #[serde(with = "serde_helper::decimal")]
    pub quantity: f64,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default, with = "serde_helper::decimal_opt")]
    pub price: Option<f64>,
    #[serde(default, with = "serde_helper::decimal_opt")]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub farmer_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default, with = "serde_helper::decimal")]
    pub total_amount: f64,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default, with = "serde_helper::datetime_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub order: Order,
    #[serde(default)]
    pub message: Option<String>,
}

// =========================================================
// 配送与通知 (Deliveries & Notifications)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Pending,
    Accepted,
    PickedUpOtw,
    PickedUp,
    OtwToBuyer,
    Arrived,
    Completed,
    Rejected,
    Expired,
    #[serde(other)]
    Unknown,
}

impl DeliveryStatus {
    /// 骑手配送的线性进度
    pub const PROGRESSION: [DeliveryStatus; 6] = [
        DeliveryStatus::Accepted,
        DeliveryStatus::PickedUpOtw,
        DeliveryStatus::PickedUp,
        DeliveryStatus::OtwToBuyer,
        DeliveryStatus::Arrived,
        DeliveryStatus::Completed,
    ];

    /// 骑手可以通过 update_status 手动设置的状态
    pub const RIDER_UPDATES: [DeliveryStatus; 4] = [
        DeliveryStatus::PickedUpOtw,
        DeliveryStatus::PickedUp,
        DeliveryStatus::OtwToBuyer,
        DeliveryStatus::Arrived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "PENDING",
            DeliveryStatus::Accepted => "ACCEPTED",
            DeliveryStatus::PickedUpOtw => "PICKED_UP_OTW",
            DeliveryStatus::PickedUp => "PICKED_UP",
            DeliveryStatus::OtwToBuyer => "OTW_TO_BUYER",
            DeliveryStatus::Arrived => "ARRIVED",
            DeliveryStatus::Completed => "COMPLETED",
            DeliveryStatus::Rejected => "REJECTED",
            DeliveryStatus::Expired => "EXPIRED",
            DeliveryStatus::Unknown => "UNKNOWN",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "Pending",
            DeliveryStatus::Accepted => "Accepted",
            DeliveryStatus::PickedUpOtw => "On the Way to Pickup",
            DeliveryStatus::PickedUp => "Picked Up",
            DeliveryStatus::OtwToBuyer => "On the Way to Buyer",
            DeliveryStatus::Arrived => "Arrived at Buyer",
            DeliveryStatus::Completed => "Completed",
            DeliveryStatus::Rejected => "Rejected",
            DeliveryStatus::Expired => "Expired",
            DeliveryStatus::Unknown => "Unknown",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            DeliveryStatus::Accepted => "Delivery accepted by rider",
            DeliveryStatus::PickedUpOtw => "Rider heading to pickup location",
            DeliveryStatus::PickedUp => "Items picked up from sender",
            DeliveryStatus::OtwToBuyer => "Rider heading to delivery address",
            DeliveryStatus::Arrived => "Rider arrived at destination",
            DeliveryStatus::Completed => "Delivery completed successfully",
            _ => "",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Self> {
        let status = match s {
            "PENDING" => DeliveryStatus::Pending,
            "ACCEPTED" => DeliveryStatus::Accepted,
            "PICKED_UP_OTW" => DeliveryStatus::PickedUpOtw,
            "PICKED_UP" => DeliveryStatus::PickedUp,
            "OTW_TO_BUYER" => DeliveryStatus::OtwToBuyer,
            "ARRIVED" => DeliveryStatus::Arrived,
            "COMPLETED" => DeliveryStatus::Completed,
            "REJECTED" => DeliveryStatus::Rejected,
            "EXPIRED" => DeliveryStatus::Expired,
            _ => return None,
        };
        Some(status)
    }

    /// 在线性进度中的位置，不在进度中的状态返回 None
    pub fn step_index(&self) -> Option<usize> {
        Self::PROGRESSION.iter().position(|s| s == self)
    }

    /// 线性进度中的下一个状态
    pub fn next(&self) -> Option<DeliveryStatus> {
        let idx = self.step_index()?;
        Self::PROGRESSION.get(idx + 1).copied()
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            DeliveryStatus::Completed | DeliveryStatus::Rejected | DeliveryStatus::Expired
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryStatusUpdate {
    pub status: DeliveryStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, with = "serde_helper::datetime_opt")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// 配送卡片上展示的订单摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryOrderDetails {
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default, with = "serde_helper::decimal")]
    pub total_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delivery {
    pub id: u64,
    #[serde(default)]
    pub order: Option<u64>,
    #[serde(default)]
    pub order_details: Option<DeliveryOrderDetails>,
    pub status: DeliveryStatus,
    #[serde(default)]
    pub rider_name: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub status_updates: Vec<DeliveryStatusUpdate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    NewDelivery,
    DeliveryExpired,
    StatusUpdate,
    #[serde(other)]
    Other,
}

impl NotificationKind {
    pub fn css_class(&self) -> &'static str {
        match self {
            NotificationKind::NewDelivery => "new-delivery",
            NotificationKind::DeliveryExpired => "expired",
            NotificationKind::StatusUpdate => "status-update",
            NotificationKind::Other => "default",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    pub notification_type: NotificationKind,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default, with = "serde_helper::datetime_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

// =========================================================
// 管理后台 (Admin)
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminStatistics {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_farmers: u64,
    #[serde(default)]
    pub total_customers: u64,
    #[serde(default)]
    pub total_posts: u64,
    #[serde(default)]
    pub total_comments: u64,
    #[serde(default)]
    pub total_orders: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentPost {
    pub title: String,
    pub author: String,
    #[serde(default, with = "serde_helper::datetime_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentComment {
    pub content: String,
    pub author: String,
    #[serde(default)]
    pub post: String,
    #[serde(default, with = "serde_helper::datetime_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentOrder {
    pub id: u64,
    pub user: String,
    pub status: String,
    #[serde(default, with = "serde_helper::decimal")]
    pub total_price: f64,
    #[serde(default, with = "serde_helper::datetime_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    #[serde(default)]
    pub posts: Vec<RecentPost>,
    #[serde(default)]
    pub comments: Vec<RecentComment>,
    #[serde(default)]
    pub orders: Vec<RecentOrder>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdminDashboard {
    #[serde(default)]
    pub statistics: AdminStatistics,
    #[serde(default)]
    pub recent_activity: RecentActivity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_decodes_uppercase() {
        let user: User = serde_json::from_str(
            r#"{"id":7,"username":"ana","email":"a@b.c","role":"FARMER","is_suspended":false}"#,
        )
        .unwrap();
        assert_eq!(user.role, Role::Farmer);
        assert!(user.has_role(Role::Farmer));
        assert_eq!(user.initial(), "A");
    }

    #[test]
    fn test_post_gallery_falls_back_to_legacy_image() {
        let post: Post = serde_json::from_str(
            r#"{"id":1,"title":"Kale","price":"40.00","unit":"KG","image_url":"/m/kale.jpg"}"#,
        )
        .unwrap();
        assert_eq!(post.gallery(), vec!["/m/kale.jpg".to_string()]);
        assert_eq!(post.price, Some(40.0));
        assert_eq!(post.author_display(), "Farmer");
    }

    #[test]
    fn test_unknown_statuses_do_not_fail_decoding() {
        let order: Order =
            serde_json::from_str(r#"{"id":3,"status":"ON_HOLD","total_amount":"0"}"#).unwrap();
        assert_eq!(order.status, OrderStatus::Unknown);

        let n: Notification =
            serde_json::from_str(r#"{"id":1,"notification_type":"PROMO"}"#).unwrap();
        assert_eq!(n.notification_type, NotificationKind::Other);
    }

    #[test]
    fn test_delivery_progression() {
        assert_eq!(DeliveryStatus::Accepted.next(), Some(DeliveryStatus::PickedUpOtw));
        assert_eq!(DeliveryStatus::Arrived.next(), Some(DeliveryStatus::Completed));
        assert_eq!(DeliveryStatus::Completed.next(), None);
        assert_eq!(DeliveryStatus::Pending.next(), None);
        assert_eq!(DeliveryStatus::from_str_opt("OTW_TO_BUYER"), Some(DeliveryStatus::OtwToBuyer));
        assert_eq!(DeliveryStatus::from_str_opt("nope"), None);
    }

    #[test]
    fn test_cart_line_total() {
        let item: CartItem = serde_json::from_str(
            r#"{"id":2,"quantity":"1.5","post":{"id":9,"title":"Eggs","price":"10.00"}}"#,
        )
        .unwrap();
        assert!((item.line_total() - 15.0).abs() < f64::EPSILON);
    }
}
