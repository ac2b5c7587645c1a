//! Toast notifications for login, generation and export feedback

use crate::core::{Notification, NotificationType};
use leptos::prelude::*;
use std::collections::VecDeque;

/// Maximum number of toasts on screen at once
const MAX_NOTIFICATIONS: usize = 5;

/// Delay between the exit transition starting and the toast being removed
#[cfg(not(feature = "ssr"))]
const EXIT_ANIMATION_MS: u32 = 300;

#[derive(Clone, Debug)]
pub struct NotificationItem {
    pub id: u64,
    pub notification: Notification,
}

/// Toast stack, rendered once at the app root
#[component]
pub fn NotificationsContainer() -> impl IntoView {
    let manager = use_notifications();
    let notifications = manager.notifications();

    view! {
        <div class="fixed top-4 right-4 z-50 flex flex-col gap-2 max-w-sm">
            <For
                each=move || notifications.get()
                key=|item| item.id
                let:item
            >
                <NotificationToast notification=item.notification id=item.id />
            </For>
        </div>
    }
}

#[component]
fn NotificationToast(notification: Notification, id: u64) -> impl IntoView {
    let manager = use_notifications();
    let (is_exiting, _set_is_exiting) = signal(false);

    if let Some(_ms) = notification.auto_dismiss_ms {
        #[cfg(not(feature = "ssr"))]
        {
            use gloo_timers::future::TimeoutFuture;
            use wasm_bindgen_futures::spawn_local;

            spawn_local(async move {
                TimeoutFuture::new(_ms).await;
                _set_is_exiting.set(true);
                TimeoutFuture::new(EXIT_ANIMATION_MS).await;
                manager.dismiss(id);
            });
        }
    }

    let (bg_class, border_class, icon_class) = match notification.notification_type {
        NotificationType::Success => ("bg-green-50", "border-green-300", "text-green-600"),
        NotificationType::Error => ("bg-red-50", "border-red-300", "text-red-600"),
        NotificationType::Warning => ("bg-yellow-50", "border-yellow-300", "text-yellow-600"),
        NotificationType::Info => ("bg-blue-50", "border-blue-300", "text-blue-600"),
    };

    let icon_path = match notification.notification_type {
        NotificationType::Success => "M9 12l2 2 4-4m6 2a9 9 0 11-18 0 9 9 0 0118 0z",
        NotificationType::Error => "M12 8v4m0 4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z",
        NotificationType::Warning => {
            "M12 9v2m0 4h.01m-6.938 4h13.856c1.54 0 2.502-1.667 1.732-3L13.732 4c-.77-1.333-2.694-1.333-3.464 0L3.34 16c-.77 1.333.192 3 1.732 3z"
        }
        NotificationType::Info => "M13 16h-1v-4h-1m1-4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z",
    };

    let container_class = format!(
        "flex items-start gap-3 p-4 rounded-lg border shadow-lg transition-all duration-300 {} {}",
        bg_class, border_class
    );
    let role = if notification.notification_type == NotificationType::Error {
        "alert"
    } else {
        "status"
    };

    view! {
        <div
            class=container_class
            role=role
            style=move || if is_exiting.get() { "opacity: 0; transform: translateX(1rem);" } else { "opacity: 1; transform: translateX(0);" }
        >
            <div class=icon_class>
                <svg class="w-5 h-5" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d=icon_path />
                </svg>
            </div>
            <div class="flex-1 min-w-0">
                <h4 class="text-sm font-medium text-gray-900">{notification.title}</h4>
                <p class="text-xs text-gray-600 mt-0.5">{notification.message}</p>
            </div>
            <button
                class="text-gray-400 hover:text-gray-700 transition-colors"
                aria-label="Dismiss"
                on:click=move |_| manager.dismiss(id)
            >
                <svg class="w-4 h-4" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                    <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12" />
                </svg>
            </button>
        </div>
    }
}

/// Shared handle to the toast queue
#[derive(Clone, Copy)]
pub struct NotificationManager {
    notifications: RwSignal<VecDeque<NotificationItem>>,
    next_id: RwSignal<u64>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            notifications: RwSignal::new(VecDeque::new()),
            next_id: RwSignal::new(0),
        }
    }

    pub fn notifications(&self) -> RwSignal<VecDeque<NotificationItem>> {
        self.notifications
    }

    pub fn notify(&self, notification: Notification) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);

        self.notifications.update(|n| {
            n.push_back(NotificationItem { id, notification });

            // Drop the oldest once the stack is full
            while n.len() > MAX_NOTIFICATIONS {
                n.pop_front();
            }
        });
    }

    pub fn success(&self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(Notification::success(title, message));
    }

    pub fn error(&self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(Notification::error(title, message));
    }

    pub fn warning(&self, title: impl Into<String>, message: impl Into<String>) {
        self.notify(Notification::warning(title, message));
    }

    pub fn dismiss(&self, id: u64) {
        self.notifications.update(|n| n.retain(|i| i.id != id));
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

pub fn provide_notifications() -> NotificationManager {
    let manager = NotificationManager::new();
    provide_context(manager);
    manager
}

pub fn use_notifications() -> NotificationManager {
    expect_context::<NotificationManager>()
}
