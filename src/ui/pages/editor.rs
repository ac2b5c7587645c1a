//! Editor page
//!
//! Wires backend calls to the control panel, the toolbar and the diagram.
//! The editor state itself is provided by the app so it outlives this page.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::api::GenerateErdRequest;
use crate::core::Notification;
use crate::ui::api_client::{self, ApiCallError};
use crate::ui::control_panel::{AnnotationList, ControlPanel};
use crate::ui::diagram::DiagramView;
use crate::ui::editor_state::{EditorState, use_editor_state};
use crate::ui::notifications::{NotificationManager, use_notifications};
use crate::ui::session::{SessionContext, use_session_context};
use crate::ui::toolbar::Toolbar;

/// Uniform handling of a lost session
fn session_expired(
    session: SessionContext,
    editor: EditorState,
    notifications: NotificationManager,
) {
    notifications.notify(Notification::session_expired());
    editor.reset();
    session.expire();
}

/// A response only applies while the org that issued the request is signed in
fn is_current_org(current: Option<&str>, requested: &str) -> bool {
    current == Some(requested)
}

#[component]
pub fn EditorPage() -> impl IntoView {
    let session = use_session_context();
    let notifications = use_notifications();
    let editor = use_editor_state();

    // Load the org's object list once the editor is mounted
    Effect::new(move |_| {
        let Some(instance_url) = session.instance_url() else {
            return;
        };

        spawn_local(async move {
            let result = api_client::get_objects(&instance_url).await;
            if !is_current_org(session.instance_url().as_deref(), &instance_url) {
                return;
            }

            match result {
                Ok(objects) => editor.set_objects(objects),
                Err(ApiCallError::Unauthorized) => {
                    session_expired(session, editor, notifications)
                }
                Err(ApiCallError::Failed(e)) => {
                    leptos::logging::error!("Fetch objects error: {}", e);
                    notifications.error("Objects", "Failed to fetch objects");
                    session_expired(session, editor, notifications);
                }
            }
        });
    });

    let on_generate = Callback::new(move |_| {
        let Some(instance_url) = session.instance_url() else {
            session_expired(session, editor, notifications);
            return;
        };

        let request = GenerateErdRequest {
            objects: editor.selected.get_untracked(),
            annotations: editor.erd.with_untracked(|erd| erd.annotations.clone()),
            field_limit: Some(editor.field_limit.get_untracked()),
        };

        editor.generating.set(true);
        spawn_local(async move {
            let result = api_client::generate_erd(&instance_url, &request).await;
            editor.generating.set(false);
            if !is_current_org(session.instance_url().as_deref(), &instance_url) {
                return;
            }

            match result {
                Ok(response) => {
                    if !editor.apply_generated(response) {
                        leptos::logging::warn!("Generated ERD arrived after the editor closed");
                    }
                }
                Err(ApiCallError::Unauthorized) => {
                    session_expired(session, editor, notifications)
                }
                Err(ApiCallError::Failed(e)) => {
                    leptos::logging::error!("Generate ERD error: {}", e);
                    notifications.error("Generate ERD", "Failed to generate ERD");
                }
            }
        });
    });

    let on_logout = Callback::new(move |_| {
        editor.reset();
        spawn_local(async move {
            session.logout().await;
        });
    });

    view! {
        <div class="min-h-screen bg-gray-50 p-5 space-y-5">
            <ControlPanel on_generate=on_generate />
            <Toolbar on_logout=on_logout />
            <DiagramView />
            <AnnotationList />
        </div>
    }
}
