//! Session context for the signed-in Salesforce org
//!
//! The server keeps the Salesforce token behind a cookie. The client only
//! remembers the org instance URL (in localStorage) and sends it along with
//! every data request.

use crate::core::api::{LoginRequest, STORAGE_KEY_INSTANCE_URL};
use crate::ui::api_client;
use leptos::prelude::*;

/// Current session state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Initial state, checking localStorage
    #[default]
    Loading,
    SignedOut,
    SignedIn { instance_url: String },
}

#[derive(Clone, Copy)]
pub struct SessionContext {
    pub state: RwSignal<SessionState>,
    /// True while a login request is in flight
    pub loading: RwSignal<bool>,
    /// Message shown under the login form
    pub error: RwSignal<Option<String>>,
}

impl SessionContext {
    pub fn is_authenticated(&self) -> bool {
        matches!(self.state.get(), SessionState::SignedIn { .. })
    }

    /// Instance URL of the signed-in org, read without tracking
    pub fn instance_url(&self) -> Option<String> {
        match self.state.get_untracked() {
            SessionState::SignedIn { instance_url } => Some(instance_url),
            _ => None,
        }
    }

    pub fn clear_error(&self) {
        self.error.set(None);
    }

    /// Authenticate against `/login`. Returns the error message on failure.
    pub async fn sign_in(&self, request: LoginRequest) -> Result<(), String> {
        self.loading.set(true);
        self.error.set(None);

        let result = match api_client::login(&request).await {
            Ok(response) if response.success => match response.instance_url {
                Some(instance_url) => {
                    save_instance_url(&instance_url);
                    self.state.set(SessionState::SignedIn { instance_url });
                    Ok(())
                }
                None => Err("An error occurred during login".to_string()),
            },
            Ok(response) => Err(response
                .message
                .or(response.error)
                .unwrap_or_else(|| "Authentication failed".to_string())),
            Err(e) => {
                leptos::logging::error!("Login error: {}", e);
                Err("An error occurred during login".to_string())
            }
        };

        self.loading.set(false);
        if let Err(ref message) = result {
            self.error.set(Some(message.clone()));
        }
        result
    }

    /// Explicit logout: forget the org locally, then tell the server
    pub async fn logout(&self) {
        self.expire();
        api_client::logout().await;
    }

    /// Drop local session state without contacting the server
    pub fn expire(&self) {
        clear_instance_url();
        self.state.set(SessionState::SignedOut);
    }
}

/// Provide the session context to the component tree
pub fn provide_session_context() -> SessionContext {
    // Same initial state on server and client to avoid a hydration mismatch
    let state = RwSignal::new(SessionState::Loading);
    let ctx = SessionContext {
        state,
        loading: RwSignal::new(false),
        error: RwSignal::new(None),
    };

    #[cfg(not(feature = "ssr"))]
    {
        Effect::new(move |_| match load_instance_url() {
            Some(instance_url) => state.set(SessionState::SignedIn { instance_url }),
            None => state.set(SessionState::SignedOut),
        });
    }

    provide_context(ctx);
    ctx
}

pub fn use_session_context() -> SessionContext {
    expect_context::<SessionContext>()
}

#[cfg(not(feature = "ssr"))]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

#[cfg(not(feature = "ssr"))]
fn load_instance_url() -> Option<String> {
    local_storage()?
        .get_item(STORAGE_KEY_INSTANCE_URL)
        .ok()
        .flatten()
        .filter(|url| !url.is_empty())
}

#[cfg(not(feature = "ssr"))]
fn save_instance_url(instance_url: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(STORAGE_KEY_INSTANCE_URL, instance_url);
    }
}

#[cfg(feature = "ssr")]
fn save_instance_url(_instance_url: &str) {}

#[cfg(not(feature = "ssr"))]
fn clear_instance_url() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(STORAGE_KEY_INSTANCE_URL);
    }
}

#[cfg(feature = "ssr")]
fn clear_instance_url() {}
