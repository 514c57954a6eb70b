//! Progress reporting
//!
//! A documentation job reports discrete step events to a [`ProgressSink`].
//! Sinks are fire-and-forget: a sink that cannot deliver an event drops it,
//! and nothing a sink does can abort a crawl.

use tokio::sync::mpsc::UnboundedSender;

/// Number of steps in a documentation job
pub const TOTAL_STEPS: u8 = 7;

/// Job step numbers
pub mod step {
    pub const START: u8 = 1;
    pub const VISIT: u8 = 2;
    pub const EXTRACT: u8 = 3;
    pub const EXTRACTED: u8 = 4;
    pub const CREATE_FILE: u8 = 5;
    pub const FILE_READY: u8 = 6;
    pub const COMPLETE: u8 = 7;
}

/// One progress notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressEvent {
    pub step: u8,
    pub total_steps: u8,
    pub message: String,
    pub detail: String,
}

impl ProgressEvent {
    /// Creates an event for `step` out of [`TOTAL_STEPS`]
    pub fn new(step: u8, message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            step,
            total_steps: TOTAL_STEPS,
            message: message.into(),
            detail: detail.into(),
        }
    }

    /// Completion percentage, rounded to one decimal
    pub fn percent(&self) -> f64 {
        if self.total_steps == 0 {
            return 0.0;
        }
        let raw = f64::from(self.step) / f64::from(self.total_steps) * 100.0;
        (raw * 10.0).round() / 10.0
    }
}

/// Receives progress events
pub trait ProgressSink: Send + Sync {
    /// Delivers one event; must not fail or block for long
    fn report(&self, event: ProgressEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn report(&self, _event: ProgressEvent) {}
}

/// Writes events to the tracing log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn report(&self, event: ProgressEvent) {
        tracing::info!(
            "[{}/{} {:.1}%] {} - {}",
            event.step,
            event.total_steps,
            event.percent(),
            event.message,
            event.detail
        );
    }
}

/// Forwards events into a tokio channel
///
/// Once the receiver is gone, events are silently dropped.
#[derive(Debug, Clone)]
pub struct ChannelProgress {
    sender: UnboundedSender<ProgressEvent>,
}

impl ChannelProgress {
    pub fn new(sender: UnboundedSender<ProgressEvent>) -> Self {
        Self { sender }
    }
}

impl ProgressSink for ChannelProgress {
    fn report(&self, event: ProgressEvent) {
        if self.sender.send(event).is_err() {
            tracing::trace!("Progress receiver closed; dropping event");
        }
    }
}

impl<S: ProgressSink + ?Sized> ProgressSink for std::sync::Arc<S> {
    fn report(&self, event: ProgressEvent) {
        (**self).report(event)
    }
}

/// Shortens `text` to at most `max_chars` characters, appending `...` when cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}
