//! sferd - Salesforce ER Diagram editor
//!
//! Signs into a Salesforce org, describes the selected sObjects and renders
//! them as a Mermaid entity-relationship diagram that can be extended with
//! local objects, fields and notes, then exported as SVG or PNG.

#![recursion_limit = "4096"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(App);
}
