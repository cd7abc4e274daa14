//! Single-slot notification sink

use std::time::{Duration, Instant};

/// How long a notification stays visible unless dismissed
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Success => "Success",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

/// Holds at most one notification. A new one replaces whatever is showing.
#[derive(Clone, Debug, Default)]
pub struct NotificationSink {
    current: Option<(Notification, Instant)>,
}

impl NotificationSink {
    pub fn push(&mut self, message: impl Into<String>, severity: Severity) {
        self.push_at(message, severity, Instant::now());
    }

    pub fn push_at(&mut self, message: impl Into<String>, severity: Severity, now: Instant) {
        let notification = Notification {
            message: message.into(),
            severity,
        };
        match severity {
            Severity::Error => tracing::warn!(message = %notification.message, "Error notification"),
            _ => tracing::debug!(severity = severity.label(), message = %notification.message, "Notification"),
        }
        self.current = Some((notification, now));
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Drop the current notification once it has been visible for [`NOTIFICATION_TTL`]
    pub fn expire(&mut self, now: Instant) {
        if let Some((_, shown_at)) = &self.current {
            if now.saturating_duration_since(*shown_at) >= NOTIFICATION_TTL {
                self.current = None;
            }
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref().map(|(n, _)| n)
    }
}
