use leptos::prelude::*;

/// 通用确认弹窗
#[component]
pub fn ConfirmationModal(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: String,
    #[prop(into)] message: Signal<String>,
    #[prop(into, default = "Confirm".to_string())] confirm_label: String,
    #[prop(optional)] danger: bool,
    #[prop(into, default = Signal::stored(false))] busy: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let confirm_class = if danger { "btn btn-error" } else { "btn btn-primary" };

    view! {
        <div class="modal" class:modal-open=move || open.get()>
            <div class="modal-box">
                <h3 class="font-bold text-lg">{title}</h3>
                <p class="py-4">{move || message.get()}</p>
                <div class="modal-action">
                    <button
                        class="btn"
                        disabled=move || busy.get()
                        on:click=move |_| on_cancel.run(())
                    >
                        "Cancel"
                    </button>
                    <button
                        class=confirm_class
                        disabled=move || busy.get()
                        on:click=move |_| on_confirm.run(())
                    >
                        <Show when=move || busy.get()>
                            <span class="loading loading-spinner loading-sm"></span>
                        </Show>
                        {confirm_label}
                    </button>
                </div>
            </div>
            <div class="modal-backdrop" on:click=move |_| on_cancel.run(())></div>
        </div>
    }
}
