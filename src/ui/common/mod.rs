//! Common reusable UI components shared by the login form and the editor

pub mod button;
pub mod form;

pub use button::{Button, ButtonGroup, ButtonVariant};
pub use form::{CheckboxField, FormField, SelectField};
