//! User-notification seam.
//!
//! Stores report outcomes as transient notifications (the toast layer of a
//! UI). The seam keeps the stores testable and lets the CLI route messages
//! through its own output.

/// How loudly a notification should be presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warn,
    Error,
}

/// A transient, user-facing message.
#[derive(Clone, Debug, PartialEq)]
pub struct Notification {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Notification {
    pub fn success(detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            summary: "Éxito".to_owned(),
            detail: detail.into(),
        }
    }

    pub fn warn(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warn,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: "Error".to_owned(),
            detail: detail.into(),
        }
    }
}

/// Deliver a notification to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Default notifier: routes notifications into the tracing pipeline at the
/// matching level.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Success => {
                tracing::info!(summary = %notification.summary, "{}", notification.detail)
            }
            Severity::Warn => {
                tracing::warn!(summary = %notification.summary, "{}", notification.detail)
            }
            Severity::Error => {
                tracing::error!(summary = %notification.summary, "{}", notification.detail)
            }
        }
    }
}
