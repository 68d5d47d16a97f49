use crate::domain::Notification;

/// Fire-and-forget sink for user-facing messages.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}
