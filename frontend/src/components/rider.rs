use crate::auth::use_auth;
use crate::components::delivery_card::{DeliveryAction, DeliveryCard};
use crate::components::notifications::NotificationsList;
use crate::web::SignalCell;
use crate::web::poll::use_poll;
use farmgate::views::rider::{self, RiderTab, RiderView};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 骑手工作台；当前标签页按配置的间隔刷新
#[component]
pub fn RiderDashboard() -> impl IntoView {
    let auth = use_auth();
    let cell = SignalCell::new(RiderView::default());
    let state = cell.signal();

    use_poll(auth.config().rider_poll, move || async move {
        rider::reload(&auth.client(), &cell).await;
    });

    let select = move |tab: RiderTab| {
        spawn_local(async move {
            rider::select_tab(&auth.client(), &cell, tab).await;
        });
    };

    let on_action = Callback::new(move |(id, action): (u64, DeliveryAction)| {
        spawn_local(async move {
            let client = auth.client();
            match action {
                DeliveryAction::Accept => rider::accept(&client, &cell, id).await,
                DeliveryAction::Reject(reason) => rider::reject(&client, &cell, id, &reason).await,
                DeliveryAction::UpdateStatus(status, notes) => {
                    rider::update_status(&client, &cell, id, status, &notes).await
                }
                DeliveryAction::Complete => rider::complete(&client, &cell, id).await,
            }
        });
    });

    let body = move || {
        let (tab, loading, empty) = state.with(|s| (s.tab, s.is_loading(), s.empty_message()));
        if let Some(msg) = empty {
            if loading {
                return view! { <span class="loading loading-spinner loading-lg"></span> }.into_any();
            }
            return view! { <p class="text-center text-base-content/60 py-10">{msg}</p> }.into_any();
        }
        match tab {
            RiderTab::Available => state
                .with(|s| s.available.items())
                .into_iter()
                .map(|d| view! { <DeliveryCard delivery=d offer=true on_action=on_action /> })
                .collect_view()
                .into_any(),
            RiderTab::Active => state
                .with(|s| s.active.items())
                .into_iter()
                .map(|d| view! { <DeliveryCard delivery=d on_action=on_action /> })
                .collect_view()
                .into_any(),
            RiderTab::Notifications => {
                let items = state.with(|s| s.notifications.items());
                view! { <NotificationsList items=items /> }.into_any()
            }
        }
    };

    view! {
        <div class="space-y-4">
            <div role="tablist" class="tabs tabs-bordered">
                {RiderTab::ALL
                    .into_iter()
                    .map(|tab| view! {
                        <a
                            role="tab"
                            class="tab"
                            class:tab-active=move || state.with(|s| s.tab == tab)
                            on:click=move |_| select(tab)
                        >
                            {move || state.with(|s| s.tab_label(tab))}
                        </a>
                    })
                    .collect_view()}
            </div>
            {move || state.with(|s| s.error.clone()).map(|msg| view! {
                <div role="alert" class="alert alert-error">{msg}</div>
            })}
            <div class="grid gap-4">{body}</div>
        </div>
    }
}
