use crate::auth::use_auth;
use crate::web::SignalCell;
use farmgate::views::cart::{self, CartView};
use farmgate::views::parse_quantity;
use farmgate_shared::date::format_money;
use farmgate_shared::{CartItem, Order};
use leptos::prelude::*;
use leptos::task::spawn_local;

fn order_summary(order: Order, on_continue: impl Fn() + 'static) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h2 class="card-title">{format!("Order #{}", order.id)}</h2>
                <span class=format!("badge {}", order.status.css_class())>{order.status.label()}</span>
                <ul class="text-sm">
                    {order.items.into_iter().map(|item| view! {
                        <li>{format!("{} × {} {}", item.post.title, item.quantity, item.unit.short())}</li>
                    }).collect_view()}
                </ul>
                <p class="font-bold">{format!("Total: {}", format_money(order.total_amount))}</p>
                <div class="card-actions justify-end">
                    <button class="btn btn-primary" on:click=move |_| on_continue()>"Continue Shopping"</button>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn CartPanel() -> impl IntoView {
    let auth = use_auth();
    let cell = SignalCell::new(CartView::default());
    let state = cell.signal();

    spawn_local(async move {
        cart::load_cart(&auth.client(), &cell).await;
    });

    let set_quantity = move |id: u64, raw: String| {
        let quantity = parse_quantity(&raw).unwrap_or(0.0);
        spawn_local(async move {
            cart::change_quantity(&auth.client(), &cell, id, quantity).await;
        });
    };
    let remove = move |id: u64| {
        spawn_local(async move {
            cart::remove_item(&auth.client(), &cell, id).await;
        });
    };
    let checkout = move |_| {
        spawn_local(async move {
            cart::checkout(&auth.client(), &cell).await;
        });
    };

    let render_item = move |item: CartItem| {
        let id = item.id;
        let line_total = item.line_total();
        view! {
            <tr>
                <td>{item.post.title.clone()}</td>
                <td>{item.post.price.map(format_money).unwrap_or_default()}</td>
                <td>
                    <input
                        type="number"
                        min="0"
                        step="any"
                        class="input input-bordered input-sm w-24"
                        prop:value=item.quantity.to_string()
                        on:change=move |ev| set_quantity(id, event_target_value(&ev))
                    />
                    " " {item.post.unit.short()}
                </td>
                <td>{format_money(line_total)}</td>
                <td>
                    <button class="btn btn-ghost btn-xs text-error" on:click=move |_| remove(id)>"Remove"</button>
                </td>
            </tr>
        }
    };

    view! {
        <div class="space-y-4">
            {move || state.with(|s| s.notice.clone()).map(|notice| view! {
                <div role="status" class="alert alert-success">{notice.message().to_string()}</div>
            })}
            {move || state.with(|s| s.visible_error().map(str::to_string)).map(|msg| view! {
                <div role="alert" class="alert alert-error">{msg}</div>
            })}

            {move || match state.with(|s| s.order.clone()) {
                Some(order) => order_summary(order, move || state.update(|s| s.continue_shopping())).into_any(),
                None => view! {
                    <Show
                        when=move || !state.with(|s| s.items.is_loading() && s.items.data().is_none())
                        fallback=|| view! { <span class="loading loading-spinner loading-lg"></span> }
                    >
                        <Show
                            when=move || !state.with(|s| s.is_empty())
                            fallback=|| view! { <p class="text-center text-base-content/60 py-10">"Your cart is empty"</p> }
                        >
                            <div class="overflow-x-auto bg-base-100 rounded-box shadow">
                                <table class="table">
                                    <thead>
                                        <tr>
                                            <th>"Product"</th>
                                            <th>"Price"</th>
                                            <th>"Quantity"</th>
                                            <th>"Subtotal"</th>
                                            <th></th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        {move || state.with(|s| s.items.items()).into_iter().map(render_item).collect_view()}
                                    </tbody>
                                </table>
                            </div>
                            <div class="flex justify-end items-center gap-4">
                                <span class="text-lg font-bold">
                                    {move || format!("Total: {}", format_money(state.with(|s| s.total())))}
                                </span>
                                <button
                                    class="btn btn-primary"
                                    disabled=move || state.with(|s| s.checking_out)
                                    on:click=checkout
                                >
                                    {move || if state.with(|s| s.checking_out) { "Processing..." } else { "Checkout" }}
                                </button>
                            </div>
                        </Show>
                    </Show>
                }
                .into_any(),
            }}
        </div>
    }
}
