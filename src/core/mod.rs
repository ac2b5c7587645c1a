//! Core domain models and business logic for Salesforce ER diagrams

pub mod api;
mod erd;
mod history;
pub mod mermaid;
mod notification;
mod viewport;

#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod erd_api;
#[cfg(feature = "ssr")]
pub mod salesforce;
#[cfg(feature = "ssr")]
pub mod session;

pub use erd::*;
pub use history::ErdHistory;
pub use mermaid::MermaidBuilder;
pub use notification::{Notification, NotificationType};
pub use viewport::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP, Zoom};
