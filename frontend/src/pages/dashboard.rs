use crate::auth::use_auth;
use crate::components::admin::AdminDashboard;
use crate::components::cart::CartPanel;
use crate::components::farmer_orders::FarmerOrdersPanel;
use crate::components::orders::OrdersPanel;
use crate::components::post_feed::PostFeed;
use crate::components::post_form::PostForm;
use crate::components::rider::RiderDashboard;
use crate::web::router::use_router;
use farmgate::route::AppRoute;
use farmgate::views::dashboard::{DashboardTab, DashboardView, account_type, tabs_for};
use farmgate_shared::User;
use farmgate_shared::date::format_date;
use leptos::prelude::*;

fn profile(user: User, on_logout: impl Fn() + 'static) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow max-w-lg">
            <div class="card-body">
                <h2 class="card-title">"Profile"</h2>
                <p><span class="font-semibold">"Username: "</span>{user.username.clone()}</p>
                <p><span class="font-semibold">"Email: "</span>{user.email.clone()}</p>
                <p><span class="font-semibold">"Account Type: "</span>{account_type(user.role)}</p>
                <p><span class="font-semibold">"Member Since: "</span>{format_date(user.date_joined.as_ref())}</p>
                <div class="card-actions justify-end">
                    <button class="btn btn-error" on:click=move |_| on_logout()>"Logout"</button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let view_state = RwSignal::new(DashboardView::default());

    // 登录状态变化后修正当前标签
    Effect::new(move |_| {
        auth.user.with(|u| view_state.update(|v| v.on_user_changed(u.as_ref())));
    });

    let logout = move || {
        auth.logout();
        router.navigate_to(AppRoute::Login);
    };

    let feed_refresh = Signal::derive(move || view_state.with(|v| v.feed_refresh));
    let on_created = Callback::new(move |_post_id: u64| view_state.update(|v| v.on_post_created()));

    let header = move || {
        match auth.user.get() {
            Some(user) => view! {
                <div class="flex items-center gap-3">
                    <div class="avatar placeholder">
                        <div class="bg-primary text-primary-content rounded-full w-10">
                            <span>{user.initial()}</span>
                        </div>
                    </div>
                    <div class="text-right">
                        <p class="font-semibold">{user.username.clone()}</p>
                        <p class="text-xs text-base-content/60">{user.role.label()}</p>
                    </div>
                </div>
            }
            .into_any(),
            None => view! {
                <button class="btn btn-primary" on:click=move |_| router.navigate_to(AppRoute::Login)>
                    "Login / Sign Up"
                </button>
            }
            .into_any(),
        }
    };

    let content = move || {
        let tab = view_state.with(|v| v.tab);
        let user = auth.user.get();
        match (tab, user) {
            (DashboardTab::Feed, _) => view! { <PostFeed refresh=feed_refresh /> }.into_any(),
            (DashboardTab::MyPosts, Some(_)) => view! {
                <div class="space-y-6">
                    <PostForm on_created=on_created />
                    <PostFeed refresh=feed_refresh />
                </div>
            }
            .into_any(),
            (DashboardTab::FarmerOrders, Some(_)) => view! { <FarmerOrdersPanel /> }.into_any(),
            (DashboardTab::Cart, Some(_)) => view! { <CartPanel /> }.into_any(),
            (DashboardTab::MyOrders, Some(_)) => view! { <OrdersPanel /> }.into_any(),
            (DashboardTab::Deliveries, Some(_)) => view! { <RiderDashboard /> }.into_any(),
            (DashboardTab::Admin, Some(user)) => view! { <AdminDashboard viewer=user /> }.into_any(),
            (DashboardTab::Profile, Some(user)) => profile(user, logout).into_any(),
            (_, None) => view! { <PostFeed refresh=feed_refresh /> }.into_any(),
        }
    };

    view! {
        <Show
            when=move || !auth.restoring.get()
            fallback=|| view! {
                <div class="flex items-center justify-center min-h-screen">
                    <span class="loading loading-spinner loading-lg text-primary"></span>
                    <span class="ml-3">"Loading..."</span>
                </div>
            }
        >
            <div class="min-h-screen bg-base-200">
                <header class="navbar bg-base-100 shadow px-4">
                    <div class="flex-1">
                        <h1 class="text-xl font-bold">"Farmers Market"</h1>
                    </div>
                    <div class="flex-none">{header}</div>
                </header>

                <div class="max-w-6xl mx-auto p-4 space-y-4">
                    <div role="tablist" class="tabs tabs-boxed">
                        {move || {
                            auth.user.with(|u| tabs_for(u.as_ref()))
                                .into_iter()
                                .map(|tab| view! {
                                    <a
                                        role="tab"
                                        class="tab"
                                        title=tab.title()
                                        class:tab-active=move || view_state.with(|v| v.tab == tab)
                                        on:click=move |_| {
                                            auth.user.with_untracked(|u| {
                                                view_state.update(|v| {
                                                    v.select(tab, u.as_ref());
                                                })
                                            })
                                        }
                                    >
                                        {tab.label()}
                                    </a>
                                })
                                .collect_view()
                        }}
                    </div>
                    <main>{content}</main>
                </div>
            </div>
        </Show>
    }
}
