use leptos::prelude::*;

/// Read-only label/value row; empty values render as "Non renseigné"
#[component]
pub fn InfoRow(label: &'static str, #[prop(into)] value: Signal<String>) -> impl IntoView {
    view! {
        <div class="info-row">
            <span class="info-label">{label}</span>
            <span class="info-value">
                {move || {
                    let value = value.get();
                    if value.trim().is_empty() { "Non renseigné".to_string() } else { value }
                }}
            </span>
        </div>
    }
}

/// Label/value row that swaps to a text input while the form is in edit mode
#[component]
pub fn EditableRow(
    label: &'static str,
    #[prop(into)] editing: Signal<bool>,
    field: RwSignal<String>,
) -> impl IntoView {
    view! {
        <div class="info-row">
            <span class="info-label">{label}</span>
            {move || {
                if editing.get() {
                    view! {
                        <input
                            class="info-input"
                            prop:value=move || field.get()
                            on:input=move |ev| field.set(event_target_value(&ev))
                        />
                    }
                        .into_any()
                } else {
                    view! {
                        <span class="info-value">
                            {move || {
                                let value = field.get();
                                if value.trim().is_empty() {
                                    "Non renseigné".to_string()
                                } else {
                                    value
                                }
                            }}
                        </span>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
