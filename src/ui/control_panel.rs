//! Collapsible control panel: object selection, generation and local edits

use crate::core::FieldType;
use crate::core::api::FIELD_LIMIT_OPTIONS;
use crate::ui::common::{Button, ButtonVariant, CheckboxField, SelectField};
use crate::ui::editor_state::use_editor_state;
use crate::ui::icon::{Icon, icons};
use crate::ui::notifications::use_notifications;
use leptos::prelude::*;

#[component]
pub fn ControlPanel(
    /// Starts an ERD generation for the current selection
    on_generate: Callback<()>,
) -> impl IntoView {
    let editor = use_editor_state();

    view! {
        <section class="space-y-4">
            <div class="flex items-center gap-4">
                <Button on_click=Callback::new(move |_| editor.collapsed.update(|c| *c = !*c))>
                    {move || if editor.collapsed.get() {
                        view! { <Icon name=icons::CHEVRON_DOWN class="w-4 h-4"/> "Expand All" }.into_any()
                    } else {
                        view! { <Icon name=icons::CHEVRON_UP class="w-4 h-4"/> "Collapse All" }.into_any()
                    }}
                </Button>
                <span class="font-bold text-gray-800">"Salesforce ER Diagram Tools"</span>
            </div>

            <Show when=move || !editor.collapsed.get()>
                <div class="space-y-4">
                    <ObjectPicker />

                    <div class="flex flex-wrap items-center gap-4">
                        <CheckboxField
                            label="Show relationships with non-selected objects"
                            checked=editor.show_all_relationships
                        />
                        <span class="text-gray-300">"|"</span>
                        <FieldLimitSelect />
                    </div>

                    <Button
                        variant=ButtonVariant::Primary
                        on_click=on_generate
                        loading=editor.generating
                    >
                        "Generate ERD"
                    </Button>

                    <div class="flex flex-wrap items-end gap-4">
                        <AddObjectForm />
                        <span class="text-gray-300">"|"</span>
                        <AddFieldForm />
                    </div>

                    <AddAnnotationForm />
                </div>
            </Show>
        </section>
    }
}

/// Filterable multi-select over org objects and local custom objects
#[component]
fn ObjectPicker() -> impl IntoView {
    let editor = use_editor_state();
    let filter = RwSignal::new(String::new());

    let candidates = move || {
        let needle = filter.get().to_lowercase();
        let mut names = editor.objects.get();
        for custom in editor.custom_objects.get() {
            if !names.contains(&custom.name) {
                names.push(custom.name);
            }
        }
        names
            .into_iter()
            .filter(|name| needle.is_empty() || name.to_lowercase().contains(&needle))
            .collect::<Vec<_>>()
    };

    view! {
        <div class="space-y-2">
            <div class="flex items-center justify-between">
                <label class="label">"Select objects"</label>
                <span class="text-xs text-gray-500">
                    {move || format!("{} selected", editor.selected.get().len())}
                </span>
            </div>
            <input
                type="text"
                class="input-base"
                placeholder="Filter objects"
                prop:value=move || filter.get()
                on:input=move |ev| filter.set(event_target_value(&ev))
            />
            <div class="max-h-48 overflow-y-auto border border-gray-200 rounded-lg p-2 grid grid-cols-2 md:grid-cols-4 gap-1">
                <For
                    each=candidates
                    key=|name| name.clone()
                    let:name
                >
                    {
                        let checked_name = name.clone();
                        let toggle_name = name.clone();
                        view! {
                            <label class="flex items-center gap-2 text-sm cursor-pointer">
                                <input
                                    type="checkbox"
                                    prop:checked=move || editor.selected.get().contains(&checked_name)
                                    on:change=move |_| editor.toggle_selected(&toggle_name)
                                />
                                <span class="truncate">{name}</span>
                            </label>
                        }
                    }
                </For>
            </div>
        </div>
    }
}

#[component]
fn FieldLimitSelect() -> impl IntoView {
    let editor = use_editor_state();

    view! {
        <label class="flex items-center gap-2">
            <span class="label">"Field Limit"</span>
            <select
                class="select-base w-40"
                prop:value=move || editor.field_limit.get().to_string()
                on:change=move |ev| {
                    if let Ok(limit) = event_target_value(&ev).parse::<usize>() {
                        editor.field_limit.set(limit);
                    }
                }
            >
                {FIELD_LIMIT_OPTIONS
                    .iter()
                    .map(|(limit, label)| view! { <option value=limit.to_string()>{*label}</option> })
                    .collect_view()}
            </select>
        </label>
    }
}

#[component]
fn AddObjectForm() -> impl IntoView {
    let editor = use_editor_state();
    let notifications = use_notifications();
    let name = RwSignal::new(String::new());

    let add = Callback::new(move |_| {
        if editor.add_custom_object(&name.get_untracked()) {
            name.set(String::new());
        } else {
            notifications.warning("Add Object", "Object name is required");
        }
    });

    view! {
        <div class="flex items-center gap-2">
            <input
                type="text"
                class="input-base"
                placeholder="New object name"
                prop:value=move || name.get()
                on:input=move |ev| name.set(event_target_value(&ev))
            />
            <Button on_click=add icon=icons::PLUS>"Add Object"</Button>
        </div>
    }
}

#[component]
fn AddFieldForm() -> impl IntoView {
    let editor = use_editor_state();
    let notifications = use_notifications();
    let name = RwSignal::new(String::new());
    let field_type = RwSignal::new(FieldType::default().as_str().to_string());
    let relation = RwSignal::new(String::new());

    let type_options = Signal::derive(|| {
        FieldType::ALL
            .iter()
            .map(|t| (t.as_str().to_string(), t.label().to_string()))
            .collect::<Vec<_>>()
    });
    let target_options = Signal::derive(move || {
        editor
            .field_targets()
            .into_iter()
            .map(|n| (n.clone(), n))
            .collect::<Vec<_>>()
    });
    let is_lookup = move || FieldType::parse(&field_type.get()).is_some_and(|t| t.is_reference());

    let add = Callback::new(move |_| {
        let kind = FieldType::parse(&field_type.get_untracked()).unwrap_or_default();
        if editor.add_custom_field(&name.get_untracked(), kind, &relation.get_untracked()) {
            name.set(String::new());
            field_type.set(FieldType::default().as_str().to_string());
            relation.set(String::new());
        } else {
            notifications.warning("Add Field", "Field name and target object are required");
        }
    });

    view! {
        <div class="flex flex-wrap items-center gap-2">
            <input
                type="text"
                class="input-base w-48"
                placeholder="New field name"
                prop:value=move || name.get()
                on:input=move |ev| name.set(event_target_value(&ev))
            />
            <SelectField value=field_type options=type_options />
            <Show when=is_lookup>
                <SelectField
                    value=relation
                    options=target_options
                    placeholder="Select related object"
                />
            </Show>
            <SelectField value=editor.field_object options=target_options />
            <Button on_click=add icon=icons::PLUS>"Add Field"</Button>
        </div>
    }
}

#[component]
fn AddAnnotationForm() -> impl IntoView {
    let editor = use_editor_state();
    let text = RwSignal::new(String::new());

    let add = Callback::new(move |_| {
        if editor.add_annotation(&text.get_untracked()) {
            text.set(String::new());
        }
    });

    view! {
        <div class="flex items-center gap-2">
            <input
                type="text"
                class="input-base"
                placeholder="New annotation"
                prop:value=move || text.get()
                on:input=move |ev| text.set(event_target_value(&ev))
            />
            <Button on_click=add icon=icons::PLUS>"Add Annotation"</Button>
        </div>
    }
}

/// Annotations attached to the current ERD
#[component]
pub fn AnnotationList() -> impl IntoView {
    let editor = use_editor_state();

    view! {
        <Show when=move || editor.erd.with(|erd| !erd.annotations.is_empty())>
            <div class="mt-4 space-y-1">
                <h3 class="text-sm font-semibold text-gray-700">"Notes"</h3>
                <ul class="list-disc list-inside text-sm text-gray-600">
                    {move || editor.erd.with(|erd| {
                        erd.annotations
                            .iter()
                            .map(|a| view! { <li>{a.text.clone()}</li> })
                            .collect_view()
                    })}
                </ul>
            </div>
        </Show>
    }
}
