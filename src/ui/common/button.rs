use crate::ui::icon::{Icon, icons};
use leptos::prelude::*;

/// Button variant types
#[derive(Clone, Copy, PartialEq)]
pub enum ButtonVariant {
    Primary,
    Secondary,
    Danger,
}

impl ButtonVariant {
    fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "btn-primary",
            ButtonVariant::Secondary => "btn-secondary",
            ButtonVariant::Danger => "btn-danger",
        }
    }
}

/// Button with variants, reactive disabled/loading state and optional icon
#[component]
pub fn Button(
    /// Button variant style
    #[prop(default = ButtonVariant::Secondary)]
    variant: ButtonVariant,
    /// Click handler
    on_click: Callback<()>,
    /// Whether button is disabled
    #[prop(into, default = Signal::stored(false))]
    disabled: Signal<bool>,
    /// Whether button is in loading state
    #[prop(into, default = Signal::stored(false))]
    loading: Signal<bool>,
    /// Optional title/tooltip
    #[prop(optional)]
    title: Option<&'static str>,
    /// Button content (text or elements)
    children: Children,
    /// Optional icon name to show before text
    #[prop(optional)]
    icon: Option<&'static str>,
) -> impl IntoView {
    let classes = format!("btn-base {}", variant.class());

    view! {
        <button
            type="button"
            class=classes
            on:click=move |_| {
                if !loading.get_untracked() {
                    on_click.run(())
                }
            }
            disabled=move || disabled.get() || loading.get()
            title=title
        >
            {move || if loading.get() {
                view! { <Icon name=icons::LOADER class="w-4 h-4 animate-spin"/> }.into_any()
            } else if let Some(icon_name) = icon {
                view! { <Icon name=icon_name class="w-4 h-4"/> }.into_any()
            } else {
                ().into_any()
            }}
            {children()}
        </button>
    }
}

/// Button group container for multiple buttons
#[component]
pub fn ButtonGroup(
    /// Button elements
    children: Children,
) -> impl IntoView {
    view! {
        <div class="flex flex-wrap items-center gap-2">
            {children()}
        </div>
    }
}
