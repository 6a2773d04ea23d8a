use crate::auth::use_auth;
use crate::web::SignalCell;
use crate::web::files;
use farmgate::views::post_form::{self, CONTENT_MAX_CHARS, PostFormView, TITLE_MAX_CHARS};
use farmgate_shared::{MAX_POST_IMAGES, Unit};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn PostForm(on_created: Callback<u64>) -> impl IntoView {
    let auth = use_auth();
    let cell = SignalCell::new(PostFormView::default());
    let state = cell.signal();

    let on_files = move |ev: leptos::ev::Event| {
        let selected = files::take_selected(&ev);
        if selected.is_empty() {
            return;
        }
        spawn_local(async move {
            let mut loaded = Vec::with_capacity(selected.len());
            for file in &selected {
                if let Some(image) = files::read_image(file).await {
                    loaded.push(image);
                }
            }
            let _ = state.try_update(|s| s.add_images(loaded));
        });
    };

    let remove = move |id: String| {
        state.update(|s| {
            if let Some(img) = s.images.iter().find(|img| img.id == id) {
                files::revoke_preview(&img.preview);
            }
            s.remove_image(&id);
        });
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if state.with_untracked(|s| s.submitting) {
            return;
        }
        let previews: Vec<String> = state.with_untracked(|s| s.images.iter().map(|i| i.preview.clone()).collect());
        spawn_local(async move {
            if let Some(post_id) = post_form::submit(&auth.client(), &cell).await {
                previews.iter().for_each(|url| files::revoke_preview(url));
                on_created.run(post_id);
            }
        });
    };

    let bind = move |get: fn(&PostFormView) -> String, set: fn(&mut PostFormView, String)| {
        (
            move || state.with(get),
            move |ev: leptos::ev::Event| {
                let value = event_target_value(&ev);
                state.update(|s| set(s, value));
            },
        )
    };
    let (title, on_title) = bind(|s| s.title.clone(), |s, v| s.title = v);
    let (content, on_content) = bind(|s| s.content.clone(), |s, v| s.content = v);
    let (price, on_price) = bind(|s| s.price.clone(), |s, v| s.price = v);
    let (quantity, on_quantity) = bind(|s| s.quantity.clone(), |s, v| s.quantity = v);

    view! {
        <div class="card bg-base-100 shadow">
            <form class="card-body" on:submit=on_submit>
                <h2 class="card-title">"Create a Post"</h2>

                {move || state.with(|s| s.error.clone()).map(|msg| view! {
                    <div role="alert" class="alert alert-error text-sm py-2">{msg}</div>
                })}
                {move || state.with(|s| s.success.clone()).map(|msg| view! {
                    <div role="status" class="alert alert-success text-sm py-2">{msg}</div>
                })}

                <input
                    type="text"
                    class="input input-bordered"
                    placeholder="Title"
                    maxlength=TITLE_MAX_CHARS
                    prop:value=title
                    on:input=on_title
                />
                <textarea
                    class="textarea textarea-bordered"
                    placeholder="Describe your produce..."
                    maxlength=CONTENT_MAX_CHARS
                    prop:value=content
                    on:input=on_content
                ></textarea>

                <div class="grid grid-cols-3 gap-2">
                    <input
                        type="number"
                        min="0"
                        step="0.01"
                        class="input input-bordered"
                        placeholder="Price"
                        prop:value=price
                        on:input=on_price
                    />
                    <input
                        type="number"
                        min="0"
                        step="any"
                        class="input input-bordered"
                        placeholder="Quantity"
                        prop:value=quantity
                        on:input=on_quantity
                    />
                    <select
                        class="select select-bordered"
                        on:change=move |ev| {
                            let unit = if event_target_value(&ev) == Unit::G.as_str() { Unit::G } else { Unit::Kg };
                            state.update(|s| s.unit = unit);
                        }
                    >
                        {[Unit::Kg, Unit::G]
                            .into_iter()
                            .map(|unit| view! {
                                <option
                                    value=unit.as_str()
                                    selected=move || state.with(|s| s.unit == unit)
                                >
                                    {unit.short()}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </div>

                <div class="form-control">
                    <label class="label">
                        <span class="label-text">
                            {move || format!("Images ({}/{})", state.with(|s| s.images.len()), MAX_POST_IMAGES)}
                        </span>
                    </label>
                    <input
                        type="file"
                        accept="image/jpeg,image/png,image/gif,image/webp"
                        multiple
                        class="file-input file-input-bordered file-input-sm"
                        disabled=move || !state.with(|s| s.can_add_images())
                        on:change=on_files
                    />
                </div>

                <div class="grid grid-cols-5 gap-2">
                    <For
                        each=move || state.with(|s| s.images.clone())
                        key=|img| (img.id.clone(), img.uploaded)
                        children=move |img| {
                            let id = img.id;
                            let uploaded = img.uploaded;
                            view! {
                                <div class="relative">
                                    <img src=img.preview class="h-20 w-full object-cover rounded" />
                                    <Show when=move || uploaded>
                                        <span class="badge badge-success badge-xs absolute bottom-1 left-1">"uploaded"</span>
                                    </Show>
                                    <button
                                        type="button"
                                        class="btn btn-circle btn-xs absolute top-1 right-1"
                                        on:click=move |_| remove(id.clone())
                                    >
                                        "✕"
                                    </button>
                                </div>
                            }
                        }
                    />
                </div>

                <div class="card-actions justify-end">
                    <button class="btn btn-primary" disabled=move || state.with(|s| s.submitting)>
                        {move || state.with(|s| {
                            if s.uploading {
                                "Uploading images..."
                            } else if s.submitting {
                                "Posting..."
                            } else {
                                "Post"
                            }
                        })}
                    </button>
                </div>
            </form>
        </div>
    }
}
