use leptos::prelude::*;

/// Inline outline icon (24x24 viewBox, stroke-based)
#[component]
pub fn Icon(
    /// Icon name, see [`icons`]
    name: &'static str,
    /// CSS classes for sizing/colour
    #[prop(default = "w-5 h-5")]
    class: &'static str,
) -> impl IntoView {
    let path = icons::path(name);

    view! {
        <svg
            class=class
            fill="none"
            stroke="currentColor"
            viewBox="0 0 24 24"
            aria-hidden="true"
        >
            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d=path />
        </svg>
    }
}

pub mod icons {
    pub const UNDO: &str = "undo";
    pub const REDO: &str = "redo";
    pub const ZOOM_IN: &str = "zoom-in";
    pub const ZOOM_OUT: &str = "zoom-out";
    pub const RESET: &str = "reset";
    pub const DOWNLOAD: &str = "download";
    pub const CHEVRON_UP: &str = "chevron-up";
    pub const CHEVRON_DOWN: &str = "chevron-down";
    pub const PLUS: &str = "plus";
    pub const LOGOUT: &str = "logout";
    pub const ALERT_CIRCLE: &str = "alert-circle";
    pub const LOADER: &str = "loader";

    pub(super) fn path(name: &str) -> &'static str {
        match name {
            UNDO => "M3 10h10a5 5 0 015 5v2M3 10l5-5M3 10l5 5",
            REDO => "M21 10H11a5 5 0 00-5 5v2m15-7l-5-5m5 5l-5 5",
            ZOOM_IN => "M21 21l-6-6m2-5a7 7 0 11-14 0 7 7 0 0114 0zM10 7v6m3-3H7",
            ZOOM_OUT => "M21 21l-6-6m2-5a7 7 0 11-14 0 7 7 0 0114 0zM13 10H7",
            RESET => "M4 4v5h.582m15.356 2A8.001 8.001 0 004.582 9m0 0H9m11 11v-5h-.581m0 0a8.003 8.003 0 01-15.357-2m15.357 2H15",
            DOWNLOAD => "M4 16v1a3 3 0 003 3h10a3 3 0 003-3v-1m-4-4l-4 4m0 0l-4-4m4 4V4",
            CHEVRON_UP => "M5 15l7-7 7 7",
            CHEVRON_DOWN => "M19 9l-7 7-7-7",
            PLUS => "M12 4v16m8-8H4",
            LOGOUT => "M17 16l4-4m0 0l-4-4m4 4H7m6 4v1a3 3 0 01-3 3H6a3 3 0 01-3-3V7a3 3 0 013-3h4a3 3 0 013 3v1",
            ALERT_CIRCLE => "M12 8v4m0 4h.01M21 12a9 9 0 11-18 0 9 9 0 0118 0z",
            LOADER => "M12 3a9 9 0 109 9",
            _ => "",
        }
    }
}
