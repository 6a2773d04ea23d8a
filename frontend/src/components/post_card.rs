use crate::auth::use_auth;
use crate::components::comments::CommentSection;
use crate::components::confirmation_modal::ConfirmationModal;
use crate::web::SignalCell;
use farmgate::views::Feedback;
use farmgate::views::post_feed::{self, PostCardView};
use farmgate_shared::Post;
use farmgate_shared::date::{format_date, format_money};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::time::Duration;

const FEEDBACK_TTL: Duration = Duration::from_secs(3);

fn feedback_alert(feedback: Feedback) -> impl IntoView {
    let class = if feedback.is_error() {
        "alert alert-error text-sm py-1"
    } else {
        "alert alert-success text-sm py-1"
    };
    view! { <div role="alert" class=class>{feedback.message().to_string()}</div> }
}

#[component]
pub fn PostCard(post: Post, on_deleted: Callback<()>) -> impl IntoView {
    let auth = use_auth();
    let cell = SignalCell::new(PostCardView::default());
    let state = cell.signal();
    let post = StoredValue::new(post);

    let post_id = post.with_value(|p| p.id);
    let gallery = post.with_value(Post::gallery);
    let count = gallery.len();
    let gallery = StoredValue::new(gallery);

    let is_owner = move || auth.user.with(|u| post.with_value(|p| post_feed::is_owner(p, u.as_ref())));
    // 访客不显示加入购物车
    let can_add = move || {
        auth.user.with(|u| {
            u.is_some() && post.with_value(|p| post_feed::can_add_to_cart(p, u.as_ref()))
        })
    };

    // 提示展示一段时间后清除
    Effect::new(move |_| {
        if state.with(|s| s.feedback.is_some()) {
            set_timeout(
                move || {
                    let _ = state.try_update(|s| s.feedback = None);
                },
                FEEDBACK_TTL,
            );
        }
    });

    let on_add = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        spawn_local(async move {
            let post = post.get_value();
            post_feed::add_to_cart(&auth.client(), &cell, &post).await;
        });
    };

    let on_delete = Callback::new(move |_| {
        spawn_local(async move {
            if post_feed::delete_post(&auth.client(), &cell, post_id).await {
                on_deleted.run(());
            }
        });
    });

    let current_image = move || {
        let idx = state.with(|s| s.image_index);
        gallery.with_value(|g| g.get(idx).cloned())
    };

    view! {
        <div class="card bg-base-100 shadow">
            {move || current_image().map(|src| view! {
                <figure class="relative">
                    <img
                        src=src
                        class="w-full h-56 object-cover cursor-pointer"
                        on:click=move |_| state.update(|s| s.image_modal = true)
                    />
                    <Show when=move || { count > 1 }>
                        <button
                            class="btn btn-circle btn-sm absolute left-2"
                            on:click=move |_| state.update(|s| s.prev_image(count))
                        >"❮"</button>
                        <button
                            class="btn btn-circle btn-sm absolute right-2"
                            on:click=move |_| state.update(|s| s.next_image(count))
                        >"❯"</button>
                        <span class="badge absolute bottom-2 right-2">
                            {move || format!("{} / {}", state.with(|s| s.image_index) + 1, count)}
                        </span>
                    </Show>
                </figure>
            })}

            <div class="card-body">
                {post.with_value(|p| view! {
                    <div class="flex justify-between items-start">
                        <h2 class="card-title">{p.title.clone()}</h2>
                        <span class="text-xs text-base-content/60">{format_date(p.created_at.as_ref())}</span>
                    </div>
                    <p class="text-sm text-base-content/70">{format!("by {}", p.author_display())}</p>
                    <p>{p.content.clone()}</p>
                    <div class="flex gap-3 text-sm">
                        {p.price.map(|price| view! {
                            <span class="badge badge-primary">{format!("{} / {}", format_money(price), p.unit.short())}</span>
                        })}
                        {p.quantity.map(|q| view! {
                            <span class="badge badge-ghost">{format!("{} {} available", q, p.unit.short())}</span>
                        })}
                    </div>
                })}

                {move || state.with(|s| s.feedback.clone()).map(feedback_alert)}

                <div class="card-actions justify-end items-center">
                    <button class="btn btn-ghost btn-sm" on:click=move |_| state.update(|s| s.toggle_comments())>
                        {move || if state.with(|s| s.show_comments) { "Hide Comments" } else { "Comments" }}
                    </button>
                    <Show when=move || can_add() && !state.with(|s| s.selector_open)>
                        <button class="btn btn-primary btn-sm" on:click=move |_| state.update(|s| s.open_selector())>
                            "Add to Cart"
                        </button>
                    </Show>
                    <Show when=is_owner>
                        <button
                            class="btn btn-error btn-outline btn-sm"
                            on:click=move |_| state.update(|s| s.confirm_delete = true)
                        >
                            "Delete"
                        </button>
                    </Show>
                </div>

                <Show when=move || state.with(|s| s.selector_open)>
                    <form class="join w-full" on:submit=on_add>
                        <input
                            type="number"
                            min="0"
                            step="any"
                            class="input input-bordered input-sm join-item flex-1"
                            placeholder=move || post.with_value(|p| format!("Quantity ({})", p.unit.short()))
                            prop:value=move || state.with(|s| s.quantity_input.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| s.quantity_input = value);
                            }
                        />
                        <button class="btn btn-primary btn-sm join-item" disabled=move || state.with(|s| s.cart_busy)>
                            {move || if state.with(|s| s.cart_busy) { "Adding..." } else { "Add" }}
                        </button>
                        <button
                            type="button"
                            class="btn btn-ghost btn-sm join-item"
                            on:click=move |_| state.update(|s| s.cancel_selector())
                        >
                            "Cancel"
                        </button>
                    </form>
                </Show>

                <Show when=move || state.with(|s| s.show_comments)>
                    <CommentSection post_id=post_id />
                </Show>
            </div>

            <div class="modal" class:modal-open=move || state.with(|s| s.image_modal)>
                <div class="modal-box max-w-4xl">
                    {move || current_image().map(|src| view! { <img src=src class="w-full" /> })}
                </div>
                <div class="modal-backdrop" on:click=move |_| state.update(|s| s.image_modal = false)></div>
            </div>

            <ConfirmationModal
                open=Signal::derive(move || state.with(|s| s.confirm_delete))
                title="Delete Post"
                message=Signal::derive(move || {
                    post.with_value(|p| format!("Are you sure you want to delete \"{}\"?", p.title))
                })
                confirm_label="Delete"
                danger=true
                busy=Signal::derive(move || state.with(|s| s.delete_busy))
                on_confirm=on_delete
                on_cancel=Callback::new(move |_| state.update(|s| s.confirm_delete = false))
            />
        </div>
    }
}
