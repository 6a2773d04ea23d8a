use crate::auth::use_auth;
use crate::web::SignalCell;
use crate::web::router::use_router;
use farmgate::route::AppRoute;
use farmgate::views::auth_form::{self, AuthFormView, AuthMode};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 与表单某个字段绑定的输入框
fn text_field(
    form: RwSignal<AuthFormView>,
    label: &'static str,
    kind: &'static str,
    get: fn(&AuthFormView) -> String,
    set: fn(&mut AuthFormView, String),
) -> impl IntoView {
    view! {
        <div class="form-control">
            <label class="label">
                <span class="label-text">{label}</span>
            </label>
            <input
                type=kind
                class="input input-bordered"
                prop:value=move || form.with(get)
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| set(f, value));
                }
            />
        </div>
    }
}

fn account_fields(form: RwSignal<AuthFormView>) -> impl IntoView {
    view! {
        {text_field(form, "First Name", "text", |f| f.first_name.clone(), |f, v| f.first_name = v)}
        {text_field(form, "Last Name", "text", |f| f.last_name.clone(), |f, v| f.last_name = v)}
        {text_field(form, "Email", "email", |f| f.email.clone(), |f, v| f.email = v)}
    }
}

fn role_fields(form: RwSignal<AuthFormView>, mode: AuthMode) -> AnyView {
    match mode {
        AuthMode::RegisterFarmer => {
            text_field(form, "Farm Name", "text", |f| f.farm_name.clone(), |f, v| f.farm_name = v)
                .into_any()
        }
        AuthMode::RegisterRider => view! {
            {text_field(form, "Phone", "tel", |f| f.phone.clone(), |f, v| f.phone = v)}
            {text_field(form, "Vehicle Type", "text", |f| f.vehicle_type.clone(), |f, v| f.vehicle_type = v)}
            {text_field(form, "Vehicle Plate", "text", |f| f.vehicle_plate.clone(), |f, v| f.vehicle_plate = v)}
        }
        .into_any(),
        _ => ().into_any(),
    }
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();
    let cell = SignalCell::new(AuthFormView::default());
    let form = cell.signal();
    let (submitting, set_submitting) = signal(false);

    // 已登录则直接进入仪表盘
    Effect::new(move |_| {
        if !auth.restoring.get() && auth.user.with(Option::is_some) {
            router.navigate_to(AppRoute::Dashboard);
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        set_submitting.set(true);
        spawn_local(async move {
            let user = auth_form::submit(&auth.client(), &cell).await;
            let _ = set_submitting.try_set(false);
            if let Some(user) = user {
                auth.user.set(Some(user));
                router.navigate_to(AppRoute::Dashboard);
            }
        });
    };

    let mode = move || form.with(|f| f.mode);
    let switch = move |next: AuthMode| form.update(|f| f.switch_mode(next));

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">{move || mode().title()}</h1>
                    <p class="text-base-content/70">"Farmers Market"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        {move || form.with(|f| f.error.clone()).map(|msg| view! {
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{msg}</span>
                            </div>
                        })}
                        {move || form.with(|f| f.status.clone()).map(|msg| view! {
                            <div role="status" class="alert alert-info text-sm py-2">
                                <span>{msg}</span>
                            </div>
                        })}

                        {text_field(form, "Username", "text", |f| f.username.clone(), |f, v| f.username = v)}
                        <Show when=move || mode() != AuthMode::Login>
                            {account_fields(form)}
                        </Show>
                        {move || role_fields(form, mode())}
                        {text_field(form, "Password", "password", |f| f.password.clone(), |f, v| f.password = v)}
                        <Show when=move || mode() != AuthMode::Login>
                            {text_field(
                                form,
                                "Confirm Password",
                                "password",
                                |f| f.confirm_password.clone(),
                                |f, v| f.confirm_password = v,
                            )}
                        </Show>

                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || submitting.get()>
                                {move || if submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> }.into_any()
                                } else {
                                    ().into_any()
                                }}
                                {move || mode().submit_label()}
                            </button>
                        </div>

                        <div class="text-sm text-center space-y-1 mt-2">
                            <Show
                                when=move || mode() == AuthMode::Login
                                fallback=move || view! {
                                    <p>
                                        "Already have an account? "
                                        <a class="link link-primary" on:click=move |_| switch(AuthMode::Login)>"Login"</a>
                                    </p>
                                }
                            >
                                <p>
                                    "Don't have an account? "
                                    <a class="link link-primary" on:click=move |_| switch(AuthMode::RegisterCustomer)>"Create one"</a>
                                </p>
                                <p>
                                    <a class="link" on:click=move |_| switch(AuthMode::RegisterFarmer)>"Register as farmer"</a>
                                    " · "
                                    <a class="link" on:click=move |_| switch(AuthMode::RegisterRider)>"Register as rider"</a>
                                </p>
                            </Show>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
