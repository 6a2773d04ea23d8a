use crate::auth::use_auth;
use crate::components::confirmation_modal::ConfirmationModal;
use crate::web::SignalCell;
use farmgate::views::comments::{self, COMMENT_MAX_CHARS, CommentsView};
use farmgate_shared::Comment;
use farmgate_shared::date::format_datetime;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn CommentSection(post_id: u64) -> impl IntoView {
    let auth = use_auth();
    let cell = SignalCell::new(CommentsView::new(post_id));
    let state = cell.signal();

    spawn_local(async move {
        comments::load_comments(&auth.client(), &cell).await;
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        spawn_local(async move {
            comments::submit_comment(&auth.client(), &cell).await;
        });
    };

    let render_comment = move |comment: Comment| {
        let id = comment.id;
        let deletable = auth.user.with(|u| CommentsView::can_delete(&comment, u.as_ref()));
        let author = comment
            .author
            .as_ref()
            .map(|a| a.username.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        view! {
            <li class="py-2 border-b border-base-200">
                <div class="flex justify-between items-center text-sm">
                    <span class="font-semibold">{author}</span>
                    <span class="text-base-content/60">{format_datetime(comment.created_at.as_ref())}</span>
                </div>
                <p class="text-sm">{comment.content}</p>
                <Show when=move || deletable>
                    <button
                        class="btn btn-ghost btn-xs text-error"
                        on:click=move |_| state.update(|s| s.open_delete(id))
                    >
                        "Delete"
                    </button>
                </Show>
            </li>
        }
    };

    view! {
        <div class="mt-3 border-t border-base-200 pt-3">
            <h4 class="font-semibold mb-2">{move || format!("Comments ({})", state.with(|s| s.count()))}</h4>

            {move || state.with(|s| s.visible_error().map(str::to_string)).map(|msg| view! {
                <div role="alert" class="alert alert-error text-sm py-1">{msg}</div>
            })}

            <Show
                when=move || !state.with(|s| s.comments.is_loading() && s.count() == 0)
                fallback=|| view! { <span class="loading loading-dots loading-sm"></span> }
            >
                <ul>
                    {move || state.with(|s| s.comments.items()).into_iter().map(render_comment).collect_view()}
                </ul>
            </Show>

            <Show when=move || auth.user.with(Option::is_some)>
                <form class="flex gap-2 mt-2" on:submit=on_submit>
                    <input
                        type="text"
                        class="input input-bordered input-sm flex-1"
                        placeholder="Write a comment..."
                        maxlength=COMMENT_MAX_CHARS
                        prop:value=move || state.with(|s| s.draft.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            state.update(|s| s.draft = value);
                        }
                    />
                    <button
                        class="btn btn-primary btn-sm"
                        disabled=move || !state.with(|s| s.can_submit())
                    >
                        {move || if state.with(|s| s.posting) { "Posting..." } else { "Post" }}
                    </button>
                </form>
            </Show>

            <ConfirmationModal
                open=Signal::derive(move || state.with(|s| s.delete_target.is_some()))
                title="Delete Comment"
                message=Signal::derive(|| "Are you sure you want to delete this comment?".to_string())
                confirm_label="Delete"
                danger=true
                on_confirm=Callback::new(move |_| {
                    spawn_local(async move {
                        comments::confirm_delete(&auth.client(), &cell).await;
                    });
                })
                on_cancel=Callback::new(move |_| state.update(|s| s.close_delete()))
            />
        </div>
    }
}
