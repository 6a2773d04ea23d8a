use super::{Feedback, Loadable, StateCell, parse_quantity};
use crate::client::ApiClient;
use crate::request::HttpClient;
use crate::session::SessionStore;
use farmgate_shared::{Post, User};
use tracing::info;

// =========================================================
// 帖子流 (Post Feed)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedFilter {
    #[default]
    All,
    Farmers,
}

impl FeedFilter {
    pub fn label(&self) -> &'static str {
        match self {
            FeedFilter::All => "All Posts",
            FeedFilter::Farmers => "From Farmers",
        }
    }

    pub fn params(&self) -> Vec<(String, String)> {
        match self {
            FeedFilter::All => Vec::new(),
            FeedFilter::Farmers => vec![("role".to_string(), "farmer".to_string())],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostFeedView {
    pub filter: FeedFilter,
    pub posts: Loadable<Vec<Post>>,
}

impl PostFeedView {
    /// 切换筛选；未变化时返回 `false`
    pub fn on_filter(&mut self, filter: FeedFilter) -> bool {
        if self.filter == filter {
            return false;
        }
        self.filter = filter;
        true
    }

    /// 首次加载且尚无数据时显示整块 loading
    pub fn is_initial_loading(&self) -> bool {
        self.posts.is_loading() && self.posts.data().is_none_or(Vec::is_empty)
    }

    pub fn is_empty(&self) -> bool {
        !self.posts.is_loading() && self.posts.data().is_some_and(Vec::is_empty)
    }
}

pub async fn load_posts<H, S, C>(client: &ApiClient<H, S>, state: &C)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<PostFeedView>,
{
    let Some((ticket, params)) = state.update(|s| (s.posts.begin(), s.filter.params())) else {
        return;
    };
    let result = client
        .list_posts(params)
        .await
        .map_err(|_| "Failed to load posts".to_string());
    state.update(|s| s.posts.apply(ticket, result));
}

pub async fn change_filter<H, S, C>(client: &ApiClient<H, S>, state: &C, filter: FeedFilter)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<PostFeedView>,
{
    if state.update(|s| s.on_filter(filter)) == Some(true) {
        load_posts(client, state).await;
    }
}

// =========================================================
// 帖子卡片 (Post Card)
// =========================================================

pub fn is_owner(post: &Post, user: Option<&User>) -> bool {
    match (user, post.author_id) {
        (Some(user), Some(author)) => user.id == author,
        _ => false,
    }
}

/// 带价格字段（含 `"0.00"`）且不是自己的帖子才能加入购物车
pub fn can_add_to_cart(post: &Post, user: Option<&User>) -> bool {
    post.price.is_some() && !is_owner(post, user)
}

/// 校验购买数量：`0 < q ≤ 可售数量`
pub fn validate_quantity(post: &Post, raw: &str) -> Result<f64, String> {
    let quantity = match parse_quantity(raw) {
        Some(q) if q > 0.0 => q,
        _ => return Err("Please enter a valid quantity".to_string()),
    };
    if let Some(available) = post.quantity {
        if quantity > available {
            return Err(format!(
                "Maximum available: {} {}",
                available,
                post.unit.short()
            ));
        }
    }
    Ok(quantity)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostCardView {
    pub show_comments: bool,
    pub selector_open: bool,
    pub quantity_input: String,
    pub cart_busy: bool,
    pub confirm_delete: bool,
    pub delete_busy: bool,
    pub feedback: Option<Feedback>,
    pub image_index: usize,
    pub image_modal: bool,
}

impl PostCardView {
    pub fn toggle_comments(&mut self) {
        self.show_comments = !self.show_comments;
    }

    pub fn open_selector(&mut self) {
        self.selector_open = true;
    }

    pub fn cancel_selector(&mut self) {
        self.selector_open = false;
        self.quantity_input.clear();
    }

    /// 校验数量并进入提交状态；校验失败时不发请求
    pub fn on_add_submit(&mut self, post: &Post) -> Option<f64> {
        match validate_quantity(post, &self.quantity_input) {
            Ok(q) => {
                self.cart_busy = true;
                self.feedback = None;
                Some(q)
            }
            Err(msg) => {
                self.feedback = Some(Feedback::Error(msg));
                None
            }
        }
    }

    pub fn on_added(&mut self, result: Result<(), String>) {
        self.cart_busy = false;
        match result {
            Ok(()) => {
                self.feedback = Some(Feedback::Success("Added to cart".to_string()));
                self.cancel_selector();
            }
            Err(msg) => self.feedback = Some(Feedback::Error(msg)),
        }
    }

    pub fn on_deleted(&mut self, result: Result<(), String>) {
        self.delete_busy = false;
        match result {
            Ok(()) => self.confirm_delete = false,
            Err(msg) => self.feedback = Some(Feedback::Error(msg)),
        }
    }

    pub fn next_image(&mut self, count: usize) {
        if count > 0 {
            self.image_index = (self.image_index + 1) % count;
        }
    }

    pub fn prev_image(&mut self, count: usize) {
        if count > 0 {
            self.image_index = (self.image_index + count - 1) % count;
        }
    }
}

pub async fn add_to_cart<H, S, C>(client: &ApiClient<H, S>, state: &C, post: &Post)
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<PostCardView>,
{
    let Some(Some(quantity)) = state.update(|s| s.on_add_submit(post)) else {
        return;
    };
    let result = client
        .add_to_cart(post.id, quantity)
        .await
        .map(|_| ())
        .map_err(|e| e.user_message("Failed to add to cart"));
    state.update(|s| s.on_added(result));
}

/// 删除自己的帖子；成功时返回 `true`，由父组件重新加载列表
pub async fn delete_post<H, S, C>(client: &ApiClient<H, S>, state: &C, post_id: u64) -> bool
where
    H: HttpClient,
    S: SessionStore,
    C: StateCell<PostCardView>,
{
    state.update(|s| s.delete_busy = true);
    let result = client
        .delete_post(post_id)
        .await
        .map(|_| ())
        .map_err(|e| e.user_message("Failed to delete post"));
    let ok = result.is_ok();
    if ok {
        info!(post_id, "post deleted");
    }
    state.update(|s| s.on_deleted(result));
    ok
}

#[cfg(test)]
mod tests;
