use crate::auth::use_auth;
use crate::web::SignalCell;
use farmgate::views::notifications::{self, NotificationsView};
use farmgate_shared::Notification;
use farmgate_shared::date::format_datetime;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn NotificationsList(items: Vec<Notification>) -> impl IntoView {
    let auth = use_auth();
    let cell = SignalCell::new(NotificationsView::from_items(items));
    let state = cell.signal();

    let mark = move |id: u64| {
        spawn_local(async move {
            notifications::mark_read(&auth.client(), &cell, id).await;
        });
    };

    view! {
        <div class="space-y-2">
            <p class="text-sm text-base-content/60">
                {move || format!("{} unread", state.with(|s| s.unread_count()))}
            </p>
            <For
                each=move || state.with(|s| s.items.clone())
                key=|n| (n.id, n.is_read)
                children=move |n| {
                    let id = n.id;
                    let unread = !n.is_read;
                    let class = format!(
                        "alert notification {}{}",
                        n.notification_type.css_class(),
                        if unread { " unread" } else { "" }
                    );
                    view! {
                        <div class=class>
                            <div class="flex-1">
                                <h4 class="font-semibold">{n.title}</h4>
                                <p class="text-sm">{n.message}</p>
                                <p class="text-xs text-base-content/60">{format_datetime(n.created_at.as_ref())}</p>
                            </div>
                            <Show when=move || unread>
                                <button class="btn btn-ghost btn-xs" on:click=move |_| mark(id)>
                                    "Mark as read"
                                </button>
                            </Show>
                        </div>
                    }
                }
            />
        </div>
    }
}
