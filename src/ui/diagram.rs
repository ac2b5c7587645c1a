//! Renders the ERD through the Mermaid library loaded in the page shell

use crate::core::MermaidBuilder;
use crate::ui::editor_state::use_editor_state;
use crate::ui::notifications::use_notifications;
use leptos::html::Div;
use leptos::prelude::*;

/// DOM id of the element holding the rendered `<svg>`
pub const DIAGRAM_CONTAINER_ID: &str = "erd-diagram";

#[cfg(not(feature = "ssr"))]
mod mermaid_js {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = mermaid, js_name = initialize)]
        pub fn initialize(config: &JsValue);

        /// Resolves to `{ svg, bindFunctions }`
        #[wasm_bindgen(js_namespace = mermaid, js_name = render, catch)]
        pub async fn render(id: &str, text: &str) -> Result<JsValue, JsValue>;
    }
}

#[cfg(not(feature = "ssr"))]
fn initialize_mermaid() {
    use serde::Serialize;

    let config = serde_json::json!({
        "startOnLoad": false,
        "securityLevel": "loose",
        "themeVariables": {
            "primaryColor": "#FFDDC1",
            "primaryTextColor": "#000000",
            "primaryBorderColor": "#FF5733",
            "secondaryColor": "#FFDDC1",
            "tertiaryColor": "#FDF0E3",
        },
    });

    match config.serialize(&serde_wasm_bindgen::Serializer::json_compatible()) {
        Ok(value) => mermaid_js::initialize(&value),
        Err(e) => leptos::logging::warn!("Invalid Mermaid config: {}", e),
    }
}

/// Render `text` into `container`, replacing what was there
#[cfg(not(feature = "ssr"))]
async fn render_into(
    container: web_sys::HtmlDivElement,
    render_id: String,
    text: String,
) -> Result<(), String> {
    container.set_inner_html("");

    let result = mermaid_js::render(&render_id, &text)
        .await
        .map_err(|e| format!("{:?}", e))?;
    let svg = js_sys::Reflect::get(&result, &"svg".into())
        .ok()
        .and_then(|v| v.as_string())
        .ok_or_else(|| "Mermaid returned no svg".to_string())?;

    container.set_inner_html(&svg);
    Ok(())
}

/// Scaled diagram area. Re-renders whenever the ERD, the selection or the
/// "show all relationships" flag changes.
#[component]
pub fn DiagramView() -> impl IntoView {
    let editor = use_editor_state();
    let notifications = use_notifications();
    let container: NodeRef<Div> = NodeRef::new();
    let render_count = StoredValue::new(0u64);

    #[cfg(not(feature = "ssr"))]
    initialize_mermaid();

    Effect::new(move |_| {
        let Some(_element) = container.get() else {
            return;
        };

        // Nothing generated or added yet
        if editor.erd.with(|erd| erd.is_empty()) {
            #[cfg(not(feature = "ssr"))]
            _element.set_inner_html("");
            return;
        }

        let text = editor.erd.with(|erd| {
            MermaidBuilder::new(erd)
                .selected(&editor.selected.get())
                .show_all_relationships(editor.show_all_relationships.get())
                .build()
        });
        leptos::logging::log!("Mermaid definition:\n{}", text);

        render_count.update_value(|n| *n += 1);
        let _render_id = format!("erd-svg-{}", render_count.get_value());

        #[cfg(not(feature = "ssr"))]
        leptos::task::spawn_local(async move {
            if let Err(e) = render_into(_element, _render_id, text).await {
                leptos::logging::error!("Mermaid rendering error: {}", e);
                notifications.error("Render failed", "Failed to render ERD diagram");
            }
        });
        #[cfg(feature = "ssr")]
        let _ = (text, notifications);
    });

    view! {
        <div class="w-full overflow-x-auto border border-gray-300 rounded-lg p-2.5 bg-white">
            <div
                id=DIAGRAM_CONTAINER_ID
                node_ref=container
                style=move || editor.zoom.get().css_transform()
            ></div>
        </div>
    }
}
