use crate::ui::common::{Button, ButtonGroup, ButtonVariant};
use crate::ui::editor_state::use_editor_state;
use crate::ui::export::{export_png, export_svg};
use crate::ui::icon::icons;
use crate::ui::notifications::use_notifications;
use leptos::prelude::*;

/// Export, history, zoom and logout actions above the diagram
#[component]
pub fn Toolbar(on_logout: Callback<()>) -> impl IntoView {
    let editor = use_editor_state();
    let notifications = use_notifications();

    let export = move |result: Result<(), String>| {
        if let Err(message) = result {
            leptos::logging::warn!("Export failed: {}", message);
            notifications.error("Export", message);
        }
    };

    view! {
        <ButtonGroup>
            <Button
                variant=ButtonVariant::Primary
                icon=icons::DOWNLOAD
                on_click=Callback::new(move |_| export(export_svg()))
            >
                "Export as SVG"
            </Button>
            <Button icon=icons::DOWNLOAD on_click=Callback::new(move |_| export(export_png()))>
                "Export as PNG"
            </Button>
            <Button
                icon=icons::UNDO
                disabled=Signal::derive(move || !editor.can_undo())
                on_click=Callback::new(move |_| editor.undo())
            >
                "Undo"
            </Button>
            <Button
                icon=icons::REDO
                disabled=Signal::derive(move || !editor.can_redo())
                on_click=Callback::new(move |_| editor.redo())
            >
                "Redo"
            </Button>
            <Button
                icon=icons::ZOOM_IN
                title="Zoom In"
                on_click=Callback::new(move |_| editor.zoom.update(|z| *z = z.zoom_in()))
            >
                "Zoom In"
            </Button>
            <Button
                icon=icons::ZOOM_OUT
                title="Zoom Out"
                on_click=Callback::new(move |_| editor.zoom.update(|z| *z = z.zoom_out()))
            >
                "Zoom Out"
            </Button>
            <Button
                icon=icons::RESET
                on_click=Callback::new(move |_| editor.zoom.update(|z| *z = z.reset()))
            >
                {move || format!("Reset Zoom ({}%)", (editor.zoom.get().value() * 100.0).round())}
            </Button>
            <Button variant=ButtonVariant::Danger icon=icons::LOGOUT on_click=on_logout>
                "Logout"
            </Button>
        </ButtonGroup>
    }
}
