use crate::web::SignalCell;
use farmgate::views::rider::{DeliveryCardView, can_complete, can_update_status, tracker_steps};
use farmgate_shared::date::{format_datetime, format_money};
use farmgate_shared::{Delivery, DeliveryStatus};
use leptos::prelude::*;

/// 卡片上的操作，由骑手工作台执行
#[derive(Debug, Clone, PartialEq)]
pub enum DeliveryAction {
    Accept,
    Reject(String),
    UpdateStatus(DeliveryStatus, String),
    Complete,
}

fn tracker(current: DeliveryStatus) -> impl IntoView {
    view! {
        <ul class="steps steps-vertical lg:steps-horizontal w-full text-xs">
            {tracker_steps(current)
                .into_iter()
                .map(|step| {
                    let class = if step.completed { "step step-primary" } else { "step" };
                    view! {
                        <li class=class data-content=step.number.to_string() class:font-bold=step.active>
                            {step.status.label()}
                        </li>
                    }
                })
                .collect_view()}
        </ul>
    }
}

#[component]
pub fn DeliveryCard(
    delivery: Delivery,
    /// 可接单列表中为 true，显示接受/拒绝
    #[prop(optional)]
    offer: bool,
    on_action: Callback<(u64, DeliveryAction)>,
) -> impl IntoView {
    let cell = SignalCell::new(DeliveryCardView::default());
    let state = cell.signal();
    let id = delivery.id;
    let updatable = can_update_status(&delivery);
    let completable = can_complete(&delivery);
    let status = delivery.status;
    let details = delivery.order_details;
    let updates = delivery.status_updates;
    let has_history = !offer && !updates.is_empty();

    let act = move |action: DeliveryAction| on_action.run((id, action));

    let offer_actions = move || {
        view! {
            <Show
                when=move || state.with(|s| s.reject_open)
                fallback=move || view! {
                    <div class="card-actions justify-end">
                        <button class="btn btn-success btn-sm" on:click=move |_| act(DeliveryAction::Accept)>"Accept"</button>
                        <button class="btn btn-error btn-outline btn-sm" on:click=move |_| state.update(|s| s.toggle_reject())>
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
                    <button class="btn btn-ghost btn-sm" on:click=move |_| state.update(|s| s.cancel_reject())>"Cancel"</button>
                    <button
                        class="btn btn-error btn-sm"
                        disabled=move || !state.with(|s| s.can_confirm_reject())
                        on:click=move |_| {
                            if let Some(reason) = state.try_update(|s| s.on_reject_submit()).flatten() {
                                act(DeliveryAction::Reject(reason));
                            }
                        }
                    >
                        "Confirm Reject"
                    </button>
                </div>
            </Show>
        }
    };

    let progress_actions = move || {
        view! {
            <Show when=move || updatable>
                {tracker(status)}
                <div class="card-actions justify-end">
                    <button class="btn btn-outline btn-sm" on:click=move |_| state.update(|s| s.toggle_status())>
                        "Update Status"
                    </button>
                    <Show when=move || completable>
                        <button class="btn btn-success btn-sm" on:click=move |_| act(DeliveryAction::Complete)>
                            "Complete Delivery"
                        </button>
                    </Show>
                </div>
                <Show when=move || state.with(|s| s.status_open)>
                    <div class="space-y-2">
                        <select
                            class="select select-bordered select-sm w-full"
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| s.select_status(&value));
                            }
                        >
                            <option value="">"Select status"</option>
                            {DeliveryStatus::RIDER_UPDATES
                                .into_iter()
                                .map(|s| view! { <option value=s.as_str()>{s.label()}</option> })
                                .collect_view()}
                        </select>
                        <textarea
                            class="textarea textarea-bordered textarea-sm w-full"
                            placeholder="Notes (optional)"
                            prop:value=move || state.with(|s| s.status_notes.clone())
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| s.status_notes = value);
                            }
                        ></textarea>
                        <button
                            class="btn btn-primary btn-sm"
                            disabled=move || state.with(|s| s.selected_status.is_none())
                            on:click=move |_| {
                                if let Some((next, notes)) = state.try_update(|s| s.on_status_submit()).flatten() {
                                    act(DeliveryAction::UpdateStatus(next, notes));
                                }
                            }
                        >
                            "Save"
                        </button>
                    </div>
                </Show>
            </Show>
        }
    };

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body py-4">
                <div class="flex justify-between items-center">
                    <h3 class="font-semibold">{format!("Delivery #{}", id)}</h3>
                    <span class="badge">{status.label()}</span>
                </div>
                {details.map(|d| view! {
                    <p class="text-sm">{d.customer_name.unwrap_or_default()}</p>
                    <ul class="text-sm">
                        {d.items.into_iter().map(|item| view! {
                            <li>{format!("{} × {} {}", item.post.title, item.quantity, item.unit.short())}</li>
                        }).collect_view()}
                    </ul>
                    <p class="font-bold text-sm">{format_money(d.total_amount)}</p>
                })}
                <p class="text-xs text-base-content/60">{status.description()}</p>

                {if offer { offer_actions().into_any() } else { progress_actions().into_any() }}

                <Show when=move || has_history>
                    <details class="text-xs">
                        <summary>"Status history"</summary>
                        <ul>
                            {updates.iter().map(|u| view! {
                                <li>
                                    {format!("{} · {}", format_datetime(u.updated_at.as_ref()), u.status.label())}
                                    {u.notes.clone().map(|n| format!(" · {}", n))}
                                </li>
                            }).collect_view()}
                        </ul>
                    </details>
                </Show>
            </div>
        </div>
    }
}
