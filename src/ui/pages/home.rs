use leptos::prelude::*;

use super::EditorPage;
use crate::ui::login_form::LoginForm;
use crate::ui::session::{SessionState, use_session_context};

/// Root route: login form until a session exists, then the editor
#[component]
pub fn HomePage() -> impl IntoView {
    let session = use_session_context();

    move || match session.state.get() {
        SessionState::Loading => view! {
            <div class="min-h-screen flex items-center justify-center">
                <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-blue-600"></div>
            </div>
        }
        .into_any(),
        SessionState::SignedOut => view! { <LoginForm /> }.into_any(),
        SessionState::SignedIn { .. } => view! { <EditorPage /> }.into_any(),
    }
}
