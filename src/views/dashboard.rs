use farmgate_shared::{Role, User};

/// 仪表盘标签页
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardTab {
    #[default]
    Feed,
    MyPosts,
    FarmerOrders,
    Cart,
    MyOrders,
    Deliveries,
    Admin,
    Profile,
}

impl DashboardTab {
    pub fn label(&self) -> &'static str {
        match self {
            DashboardTab::Feed => "Feed",
            DashboardTab::MyPosts => "My Posts",
            DashboardTab::FarmerOrders => "Orders",
            DashboardTab::Cart => "Cart",
            DashboardTab::MyOrders => "My Orders",
            DashboardTab::Deliveries => "Deliveries",
            DashboardTab::Admin => "Admin",
            DashboardTab::Profile => "Profile",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DashboardTab::Feed => "Browse all posts",
            DashboardTab::MyPosts => "Manage your posts",
            DashboardTab::FarmerOrders => "Manage customer orders",
            DashboardTab::Cart => "View shopping cart",
            DashboardTab::MyOrders => "View your orders",
            DashboardTab::Deliveries => "Manage deliveries",
            DashboardTab::Admin => "Admin dashboard",
            DashboardTab::Profile => "Account settings",
        }
    }
}

/// 当前用户可见的标签页，按展示顺序排列
///
/// 访客只有 Feed。这里的隐藏只是界面层面的，真正的权限由后端判定。
pub fn tabs_for(user: Option<&User>) -> Vec<DashboardTab> {
    let mut tabs = vec![DashboardTab::Feed];
    let Some(user) = user else {
        return tabs;
    };
    if user.has_role(Role::Farmer) {
        tabs.extend([DashboardTab::MyPosts, DashboardTab::FarmerOrders]);
    }
    tabs.push(DashboardTab::Cart);
    match user.role {
        Role::Customer => tabs.push(DashboardTab::MyOrders),
        Role::Rider => tabs.push(DashboardTab::Deliveries),
        Role::Admin => tabs.push(DashboardTab::Admin),
        Role::Farmer => {}
    }
    tabs.push(DashboardTab::Profile);
    tabs
}

pub fn account_type(role: Role) -> String {
    format!("{} Account", role.label())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    pub tab: DashboardTab,
    /// 每次发布新帖后递增，帖子流据此重新加载
    pub feed_refresh: u64,
}

impl DashboardView {
    /// 不可见的标签页忽略
    pub fn select(&mut self, tab: DashboardTab, user: Option<&User>) -> bool {
        if !tabs_for(user).contains(&tab) {
            return false;
        }
        self.tab = tab;
        true
    }

    /// 用户变化（登录、注销、会话失效）后当前标签不可见时回到 Feed
    pub fn on_user_changed(&mut self, user: Option<&User>) {
        if !tabs_for(user).contains(&self.tab) {
            self.tab = DashboardTab::Feed;
        }
    }

    pub fn on_post_created(&mut self) {
        self.feed_refresh += 1;
        self.tab = DashboardTab::Feed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(role: &str) -> User {
        serde_json::from_value(json!({"id": 1, "username": "ana", "role": role})).unwrap()
    }

    #[test]
    fn test_tabs_by_role() {
        use DashboardTab::*;
        assert_eq!(tabs_for(None), vec![Feed]);
        assert_eq!(
            tabs_for(Some(&user("FARMER"))),
            vec![Feed, MyPosts, FarmerOrders, Cart, Profile]
        );
        assert_eq!(tabs_for(Some(&user("CUSTOMER"))), vec![Feed, Cart, MyOrders, Profile]);
        assert_eq!(tabs_for(Some(&user("RIDER"))), vec![Feed, Cart, Deliveries, Profile]);
        assert_eq!(tabs_for(Some(&user("ADMIN"))), vec![Feed, Cart, Admin, Profile]);
    }

    #[test]
    fn test_admin_tab_only_for_admins() {
        for role in ["CUSTOMER", "FARMER", "RIDER"] {
            assert!(!tabs_for(Some(&user(role))).contains(&DashboardTab::Admin));
        }
        let mut view = DashboardView::default();
        assert!(!view.select(DashboardTab::Admin, Some(&user("RIDER"))));
        assert_eq!(view.tab, DashboardTab::Feed);
        assert!(view.select(DashboardTab::Admin, Some(&user("ADMIN"))));
    }

    #[test]
    fn test_logout_falls_back_to_feed() {
        let farmer = user("FARMER");
        let mut view = DashboardView::default();
        view.select(DashboardTab::FarmerOrders, Some(&farmer));

        view.on_user_changed(Some(&farmer));
        assert_eq!(view.tab, DashboardTab::FarmerOrders);

        view.on_user_changed(None);
        assert_eq!(view.tab, DashboardTab::Feed);
    }

    #[test]
    fn test_post_created_returns_to_refreshed_feed() {
        let mut view = DashboardView {
            tab: DashboardTab::MyPosts,
            feed_refresh: 2,
        };
        view.on_post_created();
        assert_eq!(view, DashboardView { tab: DashboardTab::Feed, feed_refresh: 3 });
        assert_eq!(account_type(Role::Rider), "Rider Account");
    }
}
