use crate::auth::use_auth;
use crate::components::post_card::PostCard;
use crate::web::SignalCell;
use farmgate::views::post_feed::{self, FeedFilter, PostFeedView};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 帖子流；`refresh` 变化时重新加载
#[component]
pub fn PostFeed(#[prop(into)] refresh: Signal<u64>) -> impl IntoView {
    let auth = use_auth();
    let cell = SignalCell::new(PostFeedView::default());
    let state = cell.signal();

    let reload = move || {
        spawn_local(async move {
            post_feed::load_posts(&auth.client(), &cell).await;
        });
    };

    // 首次挂载也会执行一次
    Effect::new(move |_| {
        refresh.track();
        reload();
    });

    let select = move |filter: FeedFilter| {
        spawn_local(async move {
            post_feed::change_filter(&auth.client(), &cell, filter).await;
        });
    };

    view! {
        <div class="space-y-4">
            <div role="tablist" class="tabs tabs-boxed w-fit">
                {[FeedFilter::All, FeedFilter::Farmers]
                    .into_iter()
                    .map(|filter| view! {
                        <a
                            role="tab"
                            class="tab"
                            class:tab-active=move || state.with(|s| s.filter == filter)
                            on:click=move |_| select(filter)
                        >
                            {filter.label()}
                        </a>
                    })
                    .collect_view()}
            </div>

            {move || state.with(|s| s.posts.error().map(str::to_string)).map(|msg| view! {
                <div role="alert" class="alert alert-error">
                    <span>{msg}</span>
                    <button class="btn btn-sm" on:click=move |_| reload()>"Retry"</button>
                </div>
            })}

            <Show
                when=move || !state.with(|s| s.is_initial_loading())
                fallback=|| view! {
                    <div class="flex justify-center py-10">
                        <span class="loading loading-spinner loading-lg text-primary"></span>
                    </div>
                }
            >
                <Show
                    when=move || !state.with(|s| s.is_empty())
                    fallback=|| view! {
                        <p class="text-center text-base-content/60 py-10">"No posts yet. Be the first to share!"</p>
                    }
                >
                    <div class="grid md:grid-cols-2 xl:grid-cols-3 gap-4">
                        <For
                            each=move || state.with(|s| s.posts.items())
                            key=|post| post.id
                            children=move |post| view! {
                                <PostCard post=post on_deleted=Callback::new(move |_| reload()) />
                            }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}
