use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::core::api::DEFAULT_FIELD_LIMIT;
use crate::ui::editor_state::provide_editor_state;
use crate::ui::notifications::{NotificationsContainer, provide_notifications};
use crate::ui::pages::{HomePage, NotFoundPage};
use crate::ui::session::provide_session_context;

/// Mermaid bundle exposing the global `mermaid` object used by the diagram view
const MERMAID_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/mermaid@10/dist/mermaid.min.js";

pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <script src=MERMAID_SCRIPT></script>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Provides context that manages stylesheets, titles, meta tags, etc.
    provide_meta_context();

    provide_notifications();
    provide_session_context();
    // Outlives the editor page so late backend responses land in live signals
    provide_editor_state(DEFAULT_FIELD_LIMIT);

    view! {
        // id=leptos means cargo-leptos will hot-reload this stylesheet
        <Stylesheet id="leptos" href="/pkg/sferd.css"/>
        <Title text="Salesforce ERD Generator"/>

        <Router>
            <main>
                <Routes fallback=|| view! { <NotFoundPage/> }>
                    <Route path=path!("/") view=HomePage/>
                </Routes>
            </main>
        </Router>
        <NotificationsContainer/>
    }
}
