use crate::auth::use_auth;
use crate::web::SignalCell;
use farmgate::views::admin::{self, AdminData, AdminTab, AdminView, PendingAction};
use farmgate_shared::User;
use farmgate_shared::date::{format_date, format_money};
use leptos::prelude::*;
use leptos::task::spawn_local;

fn overview(data: &AdminData) -> impl IntoView {
    let stats = &data.dashboard.statistics;
    let cards = [
        ("Total Users", stats.total_users),
        ("Farmers", stats.total_farmers),
        ("Customers", stats.total_customers),
        ("Posts", stats.total_posts),
        ("Comments", stats.total_comments),
        ("Orders", stats.total_orders),
    ];
    view! {
        <div class="stats stats-vertical md:stats-horizontal shadow w-full bg-base-100">
            {cards.into_iter().map(|(label, value)| view! {
                <div class="stat">
                    <div class="stat-title">{label}</div>
                    <div class="stat-value">{value}</div>
                </div>
            }).collect_view()}
        </div>
    }
}

fn recent_table(data: &AdminData, tab: AdminTab) -> AnyView {
    let activity = &data.dashboard.recent_activity;
    match tab {
        AdminTab::Posts => view! {
            <table class="table">
                <thead><tr><th>"Title"</th><th>"Author"</th><th>"Created"</th></tr></thead>
                <tbody>
                    {activity.posts.iter().map(|p| view! {
                        <tr>
                            <td>{p.title.clone()}</td>
                            <td>{p.author.clone()}</td>
                            <td>{format_date(p.created_at.as_ref())}</td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        }
        .into_any(),
        AdminTab::Comments => view! {
            <table class="table">
                <thead><tr><th>"Comment"</th><th>"Author"</th><th>"Post"</th><th>"Created"</th></tr></thead>
                <tbody>
                    {activity.comments.iter().map(|c| view! {
                        <tr>
                            <td>{c.content.clone()}</td>
                            <td>{c.author.clone()}</td>
                            <td>{c.post.clone()}</td>
                            <td>{format_date(c.created_at.as_ref())}</td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        }
        .into_any(),
        AdminTab::Orders => view! {
            <table class="table">
                <thead><tr><th>"Order"</th><th>"Customer"</th><th>"Status"</th><th>"Total"</th><th>"Created"</th></tr></thead>
                <tbody>
                    {activity.orders.iter().map(|o| view! {
                        <tr>
                            <td>{format!("#{}", o.id)}</td>
                            <td>{o.user.clone()}</td>
                            <td>{o.status.clone()}</td>
                            <td>{format_money(o.total_price)}</td>
                            <td>{format_date(o.created_at.as_ref())}</td>
                        </tr>
                    }).collect_view()}
                </tbody>
            </table>
        }
        .into_any(),
        AdminTab::Overview | AdminTab::Users => ().into_any(),
    }
}

#[component]
pub fn AdminDashboard(viewer: User) -> impl IntoView {
    let auth = use_auth();
    let cell = SignalCell::new(AdminView::default());
    let state = cell.signal();
    let viewer = StoredValue::new(viewer);

    spawn_local(async move {
        admin::load_dashboard(&auth.client(), &cell, &viewer.get_value()).await;
    });

    let confirm = move |_| {
        spawn_local(async move {
            admin::confirm_action(&auth.client(), &cell, &viewer.get_value()).await;
        });
    };

    let user_row = move |user: User| {
        let suspended = user.is_suspended;
        let target = StoredValue::new(user.clone());
        view! {
            <tr>
                <td>{user.username.clone()}</td>
                <td>{user.email.clone()}</td>
                <td>{user.role.label()}</td>
                <td>
                    {if suspended {
                        view! { <span class="badge badge-error">"Suspended"</span> }.into_any()
                    } else {
                        view! { <span class="badge badge-success">"Active"</span> }.into_any()
                    }}
                    {user.suspension_reason.clone().map(|r| view! { <p class="text-xs">{r}</p> })}
                </td>
                <td>{format_date(user.date_joined.as_ref())}</td>
                <td>
                    {if suspended {
                        view! {
                            <button
                                class="btn btn-success btn-xs"
                                on:click=move |_| target.with_value(|u| state.update(|s| s.open_reactivate(u)))
                            >
                                "Reactivate"
                            </button>
                        }.into_any()
                    } else {
                        view! {
                            <button
                                class="btn btn-error btn-xs"
                                on:click=move |_| target.with_value(|u| state.update(|s| s.open_suspend(u)))
                            >
                                "Suspend"
                            </button>
                        }.into_any()
                    }}
                </td>
            </tr>
        }
    };

    let body = move || {
        let tab = state.with(|s| s.tab);
        if tab == AdminTab::Users {
            return view! {
                <table class="table">
                    <thead>
                        <tr><th>"Username"</th><th>"Email"</th><th>"Role"</th><th>"Status"</th><th>"Joined"</th><th></th></tr>
                    </thead>
                    <tbody>
                        {state.with(|s| s.users().to_vec()).into_iter().map(user_row).collect_view()}
                    </tbody>
                </table>
            }
            .into_any();
        }
        state.with(|s| {
            s.data.data().map(|data| match tab {
                AdminTab::Overview => overview(data).into_any(),
                _ => recent_table(data, tab),
            })
        })
        .into_any()
    };

    let modal_text = move || {
        state.with(|s| match &s.pending {
            Some(PendingAction::Suspend { username, .. }) => {
                format!("Suspend {}? They will not be able to log in.", username)
            }
            Some(PendingAction::Reactivate { username, .. }) => format!("Reactivate {}?", username),
            None => String::new(),
        })
    };
    let is_suspend = move || state.with(|s| matches!(s.pending, Some(PendingAction::Suspend { .. })));

    view! {
        <div class="space-y-4">
            {move || state.with(|s| s.feedback.clone()).map(|fb| {
                let class = if fb.is_error() { "alert alert-error" } else { "alert alert-success" };
                view! { <div role="alert" class=class>{fb.message().to_string()}</div> }
            })}

            <Show
                when=move || state.with(|s| s.data.error().is_none())
                fallback=move || view! {
                    <div role="alert" class="alert alert-error">
                        {move || state.with(|s| s.data.error().map(str::to_string))}
                    </div>
                }
            >
                <div role="tablist" class="tabs tabs-boxed">
                    {AdminTab::ALL
                        .into_iter()
                        .map(|tab| view! {
                            <a
                                role="tab"
                                class="tab"
                                class:tab-active=move || state.with(|s| s.tab == tab)
                                on:click=move |_| state.update(|s| s.tab = tab)
                            >
                                {tab.label()}
                            </a>
                        })
                        .collect_view()}
                </div>
                <Show
                    when=move || state.with(|s| s.data.data().is_some())
                    fallback=|| view! { <span class="loading loading-spinner loading-lg"></span> }
                >
                    <div class="overflow-x-auto bg-base-100 rounded-box shadow">{body}</div>
                </Show>
            </Show>

            <div class="modal" class:modal-open=move || state.with(|s| s.pending.is_some())>
                <div class="modal-box">
                    <h3 class="font-bold text-lg">
                        {move || if is_suspend() { "Suspend User" } else { "Reactivate User" }}
                    </h3>
                    <p class="py-4">{modal_text}</p>
                    <Show when=is_suspend>
                        <textarea
                            class="textarea textarea-bordered w-full"
                            placeholder="Reason for suspension"
                            prop:value=move || state.with(|s| match &s.pending {
                                Some(PendingAction::Suspend { reason, .. }) => reason.clone(),
                                _ => String::new(),
                            })
                            on:input=move |ev| {
                                let value = event_target_value(&ev);
                                state.update(|s| s.set_reason(&value));
                            }
                        ></textarea>
                    </Show>
                    <div class="modal-action">
                        <button class="btn" on:click=move |_| state.update(|s| s.close_modal())>"Cancel"</button>
                        <button
                            class=move || if is_suspend() { "btn btn-error" } else { "btn btn-success" }
                            on:click=confirm
                        >
                            "Confirm"
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
