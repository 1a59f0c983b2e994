use crate::prelude::*;

/// The running status of a single MIDI byte stream.
///
/// Remembers the status and channel of the last channel message, so that data bytes with no
/// preceding status byte can be interpreted.
/// A running status belongs to exactly one stream: decoding two streams through the same
/// instance corrupts both.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RunningStatus {
    current: Option<(Status, Channel)>,
}
impl RunningStatus {
    /// A running status that has not seen any status byte yet.
    #[inline]
    pub fn new() -> RunningStatus {
        RunningStatus::default()
    }

    /// The status and channel that data bytes with no status byte continue, if any.
    #[inline]
    pub fn current(&self) -> Option<(Status, Channel)> {
        self.current
    }

    /// Record a channel status byte.
    pub fn set(&mut self, status: Status, channel: Channel) {
        if self.current != Some((status, channel)) {
            tracing::trace!(?status, channel = channel.number(), "running status changed");
            self.current = Some((status, channel));
        }
    }

    /// Forget the running status, as when a stream is restarted.
    #[inline]
    pub fn reset(&mut self) {
        self.current = None;
    }
}
