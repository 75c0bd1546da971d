//! User-facing notifications emitted by the bank details session.
//!
//! The session reports the outcome of each remote operation through a
//! [Notifier]. The web layer renders recorded notifications as alert
//! partials, and tests assert on them directly.

/// How a notification should be presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The operation completed and the user should be reassured.
    Success,
    /// The operation failed and the user should be warned.
    Error,
}

/// A single user-facing message: a title, a longer description, a severity
/// for styling, and an optional icon token.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Short headline, e.g. "Bank details saved".
    pub title: String,
    /// One or two sentences of detail.
    pub description: String,
    /// Success or error styling.
    pub severity: Severity,
    /// Optional icon token understood by the alert view, e.g. "bank".
    pub icon: Option<&'static str>,
}

impl Notification {
    /// Create a success notification.
    pub fn success(title: &str, description: &str) -> Self {
        Self {
            title: title.to_owned(),
            description: description.to_owned(),
            severity: Severity::Success,
            icon: None,
        }
    }

    /// Create an error notification.
    pub fn error(title: &str, description: &str) -> Self {
        Self {
            title: title.to_owned(),
            description: description.to_owned(),
            severity: Severity::Error,
            icon: None,
        }
    }

    /// Attach an icon token to the notification.
    pub fn with_icon(mut self, icon: &'static str) -> Self {
        self.icon = Some(icon);
        self
    }
}

/// A fire-and-forget sink for user-facing notifications.
///
/// Implementations must not fail; a notification that cannot be delivered is
/// dropped.
pub trait Notifier {
    /// Deliver `notification` to the user.
    fn notify(&mut self, notification: Notification);
}

/// A [Notifier] that records every notification in order.
///
/// Used by the HTTP handlers to collect the session's notifications for a
/// single request, and by tests to assert on them.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct NotificationLog {
    entries: Vec<Notification>,
}

impl NotificationLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded notifications, oldest first.
    pub fn entries(&self) -> &[Notification] {
        &self.entries
    }

    /// Remove and return the most recent notification, if any.
    pub fn take_last(&mut self) -> Option<Notification> {
        self.entries.pop()
    }
}

impl Notifier for NotificationLog {
    fn notify(&mut self, notification: Notification) {
        self.entries.push(notification);
    }
}

#[cfg(test)]
mod notification_log_tests {
    use super::{Notification, NotificationLog, Notifier, Severity};

    #[test]
    fn records_notifications_in_order() {
        let mut log = NotificationLog::new();

        log.notify(Notification::success("first", "one"));
        log.notify(Notification::error("second", "two"));

        assert_eq!(log.entries().len(), 2);
        assert_eq!(log.entries()[0].title, "first");
        assert_eq!(log.entries()[0].severity, Severity::Success);
        assert_eq!(log.entries()[1].title, "second");
        assert_eq!(log.entries()[1].severity, Severity::Error);
    }

    #[test]
    fn take_last_removes_most_recent() {
        let mut log = NotificationLog::new();
        log.notify(Notification::success("first", "one"));
        log.notify(Notification::success("second", "two").with_icon("bank"));

        let last = log.take_last().expect("expected a notification");

        assert_eq!(last.title, "second");
        assert_eq!(last.icon, Some("bank"));
        assert_eq!(log.entries().len(), 1);
    }
}
