//! Fire-and-forget notifications emitted after writes.

use crate::logging::sanitize_message;
use log::info;

const MAX_NOTIFICATION_CHARS: usize = 200;

/// Outbound notification channel. Delivery is not guaranteed and failures
/// never reach the caller.
pub trait Notifier {
    fn send(&self, message: &str);
}

impl<N: Notifier + ?Sized> Notifier for &N {
    fn send(&self, message: &str) {
        (**self).send(message);
    }
}

/// Writes notifications to the catalog log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn send(&self, message: &str) {
        info!(
            "event=notification module=notifier status=sent message={}",
            sanitize_message(message, MAX_NOTIFICATION_CHARS)
        );
    }
}
