//! Logging-only notifier.

use tracing::info;

use pinpoint_protocols::{CapturedElement, SelectionEvent, SelectionNotifier};

/// Notifier that only writes selections to the log. Used when outbound
/// notifications are disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl SelectionNotifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    fn notify(&self, event: SelectionEvent, capture: &CapturedElement) {
        info!(event = %event, "Selection: {}", capture.summary());
    }
}
