use crate::domain::{Notification, Severity};
use crate::ports::Notifier;

/// Prints notifications: success and info on stdout, the rest on stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Success | Severity::Info => println!("{}", notification),
            Severity::Warning | Severity::Error => eprintln!("{}", notification),
        }
    }
}
