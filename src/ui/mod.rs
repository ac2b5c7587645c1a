pub mod api_client;
pub mod common;
pub mod control_panel;
pub mod diagram;
pub mod editor_state;
pub mod export;
pub mod icon;
pub mod login_form;
pub mod notifications;
pub mod pages;
pub mod session;
pub mod toolbar;

pub use icon::{Icon, icons};
