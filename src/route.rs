//! 路由定义
//!
//! 纯数据层，不依赖 DOM。前端的 history 路由器根据这里的解析结果
//! 决定渲染哪个页面，以及是否需要用 replaceState 改写地址栏。
//! 路由本身不做任何访问控制：仪表盘对访客同样开放，只按角色隐藏标签页。

use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Welcome,
    Login,
    Dashboard,
    LearnMore,
}

/// 路径解析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch {
    Found(AppRoute),
    /// 未知路径，改写地址栏后渲染目标路由
    Redirect(AppRoute),
}

impl RouteMatch {
    pub fn route(&self) -> AppRoute {
        match self {
            RouteMatch::Found(route) | RouteMatch::Redirect(route) => *route,
        }
    }
}

impl AppRoute {
    pub const ALL: [AppRoute; 4] = [
        AppRoute::Welcome,
        AppRoute::Login,
        AppRoute::Dashboard,
        AppRoute::LearnMore,
    ];

    /// 精确匹配，末尾的 `/` 忽略
    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        Self::ALL
            .into_iter()
            .find(|route| route.to_path().trim_end_matches('/') == trimmed)
    }

    /// 未知路径一律重定向到首页
    pub fn resolve(path: &str) -> RouteMatch {
        match Self::from_path(path) {
            Some(route) => RouteMatch::Found(route),
            None => RouteMatch::Redirect(AppRoute::Welcome),
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Welcome => "/",
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::LearnMore => "/learn-more",
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_paths() {
        assert_eq!(AppRoute::resolve("/"), RouteMatch::Found(AppRoute::Welcome));
        assert_eq!(AppRoute::resolve("/login"), RouteMatch::Found(AppRoute::Login));
        assert_eq!(AppRoute::resolve("/dashboard/"), RouteMatch::Found(AppRoute::Dashboard));
        assert_eq!(AppRoute::resolve("/learn-more"), RouteMatch::Found(AppRoute::LearnMore));
        assert_eq!(AppRoute::resolve(""), RouteMatch::Found(AppRoute::Welcome));
    }

    #[test]
    fn test_unknown_paths_redirect_home() {
        for path in ["/404", "/dashboard/orders", "/LOGIN", "/learn"] {
            let m = AppRoute::resolve(path);
            assert_eq!(m, RouteMatch::Redirect(AppRoute::Welcome), "{path}");
            assert_eq!(m.route().to_path(), "/");
        }
    }

    #[test]
    fn test_paths_round_trip() {
        for route in AppRoute::ALL {
            assert_eq!(AppRoute::from_path(&route.to_string()), Some(route));
        }
    }
}
