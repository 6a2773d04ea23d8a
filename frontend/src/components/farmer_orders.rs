use crate::auth::use_auth;
use crate::web::SignalCell;
use crate::web::poll::use_poll;
use farmgate::views::farmer_orders::{self, FarmerOrdersView};
use farmgate_shared::Order;
use farmgate_shared::date::{format_datetime, format_money};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 农户待处理订单，按配置的间隔轮询
#[component]
pub fn FarmerOrdersPanel() -> impl IntoView {
    let auth = use_auth();
    let cell = SignalCell::new(FarmerOrdersView::default());
    let state = cell.signal();

    use_poll(auth.config().farmer_orders_poll, move || async move {
        farmer_orders::load_pending(&auth.client(), &cell).await;
    });

    let approve = move |id: u64| {
        spawn_local(async move {
            farmer_orders::approve(&auth.client(), &cell, id).await;
        });
    };
    let reject = move |id: u64| {
        spawn_local(async move {
            farmer_orders::reject(&auth.client(), &cell, id).await;
        });
    };

    let render_order = move |order: Order| {
        let id = order.id;
        let rejecting = move || state.with(|s| s.rejecting == Some(id));
        view! {
            <div class="card bg-base-100 shadow">
                <div class="card-body py-4">
                    <div class="flex justify-between">
                        <div>
                            <h3 class="font-semibold">{format!("Order #{}", id)}</h3>
                            <p class="text-sm">{order.customer_name.clone().unwrap_or_default()}</p>
                            <p class="text-xs text-base-content/60">{format_datetime(order.created_at.as_ref())}</p>
                        </div>
                        <span class="font-bold">{format_money(order.total_amount)}</span>
                    </div>
                    <ul class="text-sm">
                        {order.items.into_iter().map(|item| view! {
                            <li>{format!("{} × {} {}", item.post.title, item.quantity, item.unit.short())}</li>
                        }).collect_view()}
                    </ul>
                    <Show
                        when=rejecting
                        fallback=move || view! {
                            <div class="card-actions justify-end">
                                <button class="btn btn-success btn-sm" on:click=move |_| approve(id)>"Approve"</button>
                                <button
                                    class="btn btn-error btn-outline btn-sm"
                                    on:click=move |_| state.update(|s| s.start_reject(id))
                                >
                                    "Reject"
                                </button>
                            </div>
                        }
                    >
                        <textarea
                            class="textarea textarea-bordered w-full"
                            placeholder="Reason for rejection"
                            prop:value=move || state.with(|s| s.reject_reason.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| s.reject_reason = value);
                            }
                        ></textarea>
                        <div class="card-actions justify-end">
                            <button class="btn btn-ghost btn-sm" on:click=move |_| state.update(|s| s.cancel_reject())>
                                "Cancel"
                            </button>
                            <button class="btn btn-error btn-sm" on:click=move |_| reject(id)>"Confirm Reject"</button>
                        </div>
                    </Show>
                </div>
            </div>
        }
    };

    view! {
        <div class="space-y-4">
            {move || state.with(|s| s.feedback.clone()).map(|fb| {
                let class = if fb.is_error() { "alert alert-error" } else { "alert alert-success" };
                view! { <div role="alert" class=class>{fb.message().to_string()}</div> }
            })}
            <Show
                when=move || state.with(|s| s.orders.data().is_some())
                fallback=|| view! { <span class="loading loading-spinner loading-lg"></span> }
            >
                <Show
                    when=move || state.with(|s| !s.orders.items().is_empty())
                    fallback=|| view! { <p class="text-center text-base-content/60 py-10">"No pending orders"</p> }
                >
                    {move || state.with(|s| s.orders.items()).into_iter().map(render_order).collect_view()}
                </Show>
            </Show>
        </div>
    }
}
