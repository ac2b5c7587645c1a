use crate::ui::icon::{Icon, icons};
use leptos::prelude::*;

/// Generic form field component with label and input
#[component]
pub fn FormField(
    /// Field label text
    label: &'static str,
    /// Whether field is required (shows red asterisk)
    #[prop(default = false)]
    required: bool,
    /// Input type (text, password, url, etc.)
    #[prop(default = "text")]
    input_type: &'static str,
    /// Placeholder text
    #[prop(default = "")]
    placeholder: &'static str,
    /// Current value signal
    value: RwSignal<String>,
    /// Optional error message to display
    #[prop(optional)]
    error: Option<RwSignal<Option<String>>>,
) -> impl IntoView {
    view! {
        <div class="space-y-1.5">
            <label class="label">
                {label}
                {required.then(|| view! { <span class="text-red-500 ml-0.5">"*"</span> })}
            </label>
            <input
                type=input_type
                class="input-base"
                class:border-red-500=move || error.is_some_and(|e| e.get().is_some())
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| {
                    value.set(event_target_value(&ev));
                    if let Some(e) = error {
                        e.set(None);
                    }
                }
            />
            {move || {
                error.and_then(|e| e.get()).map(|err| view! {
                    <div class="flex items-center gap-1 text-sm text-red-500">
                        <Icon name=icons::ALERT_CIRCLE class="w-4 h-4"/>
                        <span>{err}</span>
                    </div>
                })
            }}
        </div>
    }
}

/// Select/dropdown bound to a string signal
#[component]
pub fn SelectField(
    /// Field label text, omitted when empty
    #[prop(default = "")]
    label: &'static str,
    /// Current value signal
    value: RwSignal<String>,
    /// Options as (value, display_text) pairs
    #[prop(into)]
    options: Signal<Vec<(String, String)>>,
    /// Placeholder shown as a disabled first option
    #[prop(optional)]
    placeholder: Option<&'static str>,
) -> impl IntoView {
    view! {
        <div class="space-y-1.5">
            {(!label.is_empty()).then(|| view! { <label class="label">{label}</label> })}
            <select
                class="select-base"
                prop:value=move || value.get()
                on:change=move |ev| value.set(event_target_value(&ev))
            >
                {placeholder.map(|text| view! {
                    <option value="" disabled=true>{text}</option>
                })}
                {move || {
                    options.get().into_iter().map(|(val, text)| {
                        view! { <option value=val>{text}</option> }
                    }).collect_view()
                }}
            </select>
        </div>
    }
}

/// Checkbox form field component
#[component]
pub fn CheckboxField(
    /// Field label text
    label: &'static str,
    /// Current checked state
    checked: RwSignal<bool>,
) -> impl IntoView {
    view! {
        <label class="flex items-center gap-2 cursor-pointer">
            <input
                type="checkbox"
                class="w-4 h-4 rounded"
                prop:checked=move || checked.get()
                on:change=move |ev| checked.set(event_target_checked(&ev))
            />
            <span class="label">{label}</span>
        </label>
    }
}
