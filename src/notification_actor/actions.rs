/// Custom actions for Notification entities.
#[derive(Debug, Clone)]
pub enum NotificationAction {
    /// Sets `is_read`. Repeating it is harmless.
    MarkRead,
}

/// Results from NotificationActions
#[derive(Debug, Clone)]
pub enum NotificationActionResult {
    /// The notification after the change, and whether it was unread before.
    MarkedRead { notification: crate::domain::Notification, was_unread: bool },
}
