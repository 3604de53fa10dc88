//! Notification collaborator.
//!
//! The domain depends only on the narrow [`Notifier`] contract: best-effort,
//! fire-and-forget delivery of a short text message to its recipients.
//! Delivery failures are logged and swallowed, never surfaced to the caller.

pub mod smtp;

pub use smtp::{SmtpConfig, SmtpConfigError, SmtpNotifier};

/// Best-effort notification sink.
pub trait Notifier {
    /// Dispatch `message` to `recipients`. Must not block on delivery
    /// confirmation and must not propagate delivery failures.
    fn notify(&self, message: &str, recipients: &[String]);
}

/// Notifier that drops every message. Used in tests and offline wiring.
#[derive(Debug, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _message: &str, recipients: &[String]) {
        tracing::debug!(count = recipients.len(), "notification dropped (noop sink)");
    }
}
