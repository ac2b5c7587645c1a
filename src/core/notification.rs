//! Toast notification payloads shown by the editor

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationType {
    Success,
    Error,
    Warning,
    Info,
}

/// A single toast
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub auto_dismiss_ms: Option<u32>,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            notification_type: NotificationType::Success,
            title: title.into(),
            message: message.into(),
            auto_dismiss_ms: Some(3000),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            notification_type: NotificationType::Error,
            title: title.into(),
            message: message.into(),
            auto_dismiss_ms: None, // Errors should be manually dismissed
        }
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            notification_type: NotificationType::Warning,
            title: title.into(),
            message: message.into(),
            auto_dismiss_ms: Some(5000),
        }
    }

    pub fn session_expired() -> Self {
        Self::error("Session expired", "Session expired. Please log in again.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_stay_until_dismissed() {
        let n = Notification::error("Export", "No diagram to export");
        assert_eq!(n.notification_type, NotificationType::Error);
        assert!(n.auto_dismiss_ms.is_none());
    }

    #[test]
    fn test_other_kinds_auto_dismiss() {
        assert_eq!(Notification::success("a", "b").auto_dismiss_ms, Some(3000));
        assert_eq!(Notification::warning("a", "b").auto_dismiss_ms, Some(5000));
    }

    #[test]
    fn test_session_expired_message() {
        let n = Notification::session_expired();
        assert_eq!(n.message, "Session expired. Please log in again.");
    }
}
