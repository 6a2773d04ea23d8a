use crate::auth::use_auth;
use crate::web::SignalCell;
use crate::web::poll::use_poll;
use farmgate::views::orders::{self, OrdersView, status_note};
use farmgate_shared::Order;
use farmgate_shared::date::{format_datetime, format_money};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 顾客订单列表，按配置的间隔轮询
#[component]
pub fn OrdersPanel() -> impl IntoView {
    let auth = use_auth();
    let cell = SignalCell::new(OrdersView::default());
    let state = cell.signal();

    use_poll(auth.config().orders_poll, move || async move {
        orders::load_orders(&auth.client(), &cell).await;
    });

    let confirm = move |order_id: u64| {
        spawn_local(async move {
            orders::confirm_received(&auth.client(), &cell, order_id).await;
        });
    };

    let render_order = move |order: Order| {
        let id = order.id;
        let note = status_note(&order);
        let expanded = move || state.with(|s| s.expanded == Some(id));
        let items = StoredValue::new(order.items);
        view! {
            <div class="card bg-base-100 shadow">
                <div class="card-body py-4">
                    <div
                        class="flex justify-between items-center cursor-pointer"
                        on:click=move |_| state.update(|s| s.toggle_expand(id))
                    >
                        <div>
                            <h3 class="font-semibold">{format!("Order #{}", id)}</h3>
                            <p class="text-xs text-base-content/60">{format_datetime(order.created_at.as_ref())}</p>
                        </div>
                        <div class="flex items-center gap-3">
                            <span class=format!("badge {}", order.status.css_class())>{order.status.label()}</span>
                            <span class="font-bold">{format_money(order.total_amount)}</span>
                        </div>
                    </div>
                    <Show when=expanded>
                        <ul class="text-sm mt-2">
                            {items.get_value().into_iter().map(|item| view! {
                                <li class="flex justify-between">
                                    <span>{format!("{} × {} {}", item.post.title, item.quantity, item.unit.short())}</span>
                                    <span>{item.total_price.map(format_money).unwrap_or_default()}</span>
                                </li>
                            }).collect_view()}
                        </ul>
                        {note.clone().map(|n| view! { <p class="alert text-sm mt-2">{n}</p> })}
                    </Show>
                </div>
            </div>
        }
    };

    view! {
        <div class="space-y-4">
            {move || state.with(|s| s.error.clone()).map(|msg| view! {
                <div role="alert" class="alert alert-error">{msg}</div>
            })}
            <Show
                when=move || state.with(|s| s.orders.data().is_some())
                fallback=|| view! { <span class="loading loading-spinner loading-lg"></span> }
            >
                <Show
                    when=move || state.with(|s| !s.orders.items().is_empty())
                    fallback=|| view! { <p class="text-center text-base-content/60 py-10">"You have no orders yet"</p> }
                >
                    {move || state.with(|s| s.orders.items()).into_iter().map(render_order).collect_view()}
                </Show>
            </Show>

            <div class="modal" class:modal-open=move || state.with(|s| s.delivery_prompt.is_some())>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">"Has your order arrived?"</h3>
                    <p class="py-4">
                        {move || state.with(|s| s.delivery_prompt).map(|id| {
                            format!("Order #{} is out for delivery. Please confirm once you have received it.", id)
                        })}
                    </p>
                    <div class="modal-action">
                        <button class="btn" on:click=move |_| state.update(|s| s.close_prompt())>"Not Yet"</button>
                        <button
                            class="btn btn-primary"
                            disabled=move || state.with(|s| s.confirming.is_some())
                            on:click=move |_| {
                                if let Some(id) = state.with_untracked(|s| s.delivery_prompt) {
                                    confirm(id);
                                }
                            }
                        >
                            "Yes, I Received It"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
