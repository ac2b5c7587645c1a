//! Salesforce login form

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::core::api::{LoginEnvironment, LoginRequest};
use crate::ui::common::{FormField, SelectField};
use crate::ui::icon::{Icon, icons};
use crate::ui::notifications::use_notifications;
use crate::ui::session::use_session_context;

#[component]
pub fn LoginForm() -> impl IntoView {
    let session = use_session_context();
    let notifications = use_notifications();

    let environment = RwSignal::new(LoginEnvironment::Production.value().to_string());
    let custom_url = RwSignal::new(String::new());
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let security_token = RwSignal::new(String::new());

    let custom_url_error = RwSignal::new(None::<String>);
    let username_error = RwSignal::new(None::<String>);
    let password_error = RwSignal::new(None::<String>);

    let is_custom = move || environment.get() == LoginEnvironment::Custom.value();

    let environment_options = Signal::derive(|| {
        LoginEnvironment::ALL
            .iter()
            .map(|env| (env.value().to_string(), env.label().to_string()))
            .collect::<Vec<_>>()
    });

    let validate = move || {
        let mut valid = true;
        if username.get_untracked().trim().is_empty() {
            username_error.set(Some("Username is required".to_string()));
            valid = false;
        }
        if password.get_untracked().is_empty() {
            password_error.set(Some("Password is required".to_string()));
            valid = false;
        }
        valid
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        session.clear_error();

        if !validate() {
            return;
        }

        let env = LoginEnvironment::parse(&environment.get_untracked())
            .unwrap_or(LoginEnvironment::Production);
        let Some(instance_url) = env.instance_url(&custom_url.get_untracked()) else {
            custom_url_error.set(Some("Custom URL is required".to_string()));
            return;
        };

        let request = LoginRequest {
            instance_url,
            username: username.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            security_token: security_token.get_untracked().trim().to_string(),
        };

        spawn_local(async move {
            match session.sign_in(request).await {
                Ok(()) => {
                    password.set(String::new());
                    notifications.success("Logged in", "Connected to Salesforce");
                }
                Err(message) => notifications.error("Login failed", message),
            }
        });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 px-4">
            <form on:submit=on_submit class="w-full max-w-md space-y-5 bg-white p-8 rounded-xl shadow">
                <div class="text-center">
                    <h1 class="text-2xl font-bold text-gray-900">"Salesforce ERD Generator"</h1>
                    <p class="mt-2 text-sm text-gray-600">"Sign in to your Salesforce org"</p>
                </div>

                {move || {
                    session.error.get().map(|error| {
                        view! {
                            <div class="flex items-center gap-2 p-3 bg-red-100 border border-red-300 rounded-lg">
                                <Icon name=icons::ALERT_CIRCLE class="w-4 h-4 text-red-600"/>
                                <p class="text-sm text-red-700">{error}</p>
                            </div>
                        }
                    })
                }}

                <SelectField label="Environment" value=environment options=environment_options />

                <Show when=is_custom>
                    <FormField
                        label="Custom URL"
                        required=true
                        input_type="url"
                        placeholder="https://yourdomain.my.salesforce.com"
                        value=custom_url
                        error=custom_url_error
                    />
                </Show>

                <FormField label="Username" required=true value=username error=username_error />
                <FormField
                    label="Password"
                    required=true
                    input_type="password"
                    value=password
                    error=password_error
                />
                <FormField label="Security Token" input_type="password" value=security_token />

                <button
                    type="submit"
                    class="btn-base btn-primary w-full justify-center"
                    disabled=move || session.loading.get()
                >
                    {move || if session.loading.get() {
                        view! {
                            <span class="flex items-center gap-2">
                                <Icon name=icons::LOADER class="w-4 h-4 animate-spin"/>
                                "Logging in..."
                            </span>
                        }.into_any()
                    } else {
                        view! { <span>"Login"</span> }.into_any()
                    }}
                </button>
            </form>
        </div>
    }
}
