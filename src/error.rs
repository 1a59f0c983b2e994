use crate::status::Status;
use thiserror::Error;

/// Represents an error while decoding or encoding MIDI messages.
///
/// Every error is raised synchronously to the immediate caller and only invalidates the call
/// that produced it: a failed decode never alters the running status of its
/// [`Decoder`](struct.Decoder.html).
///
/// For a coarse classification of errors, see [`ErrorKind`](enum.ErrorKind.html).
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A fixed-size read ran past the end of the input buffer.
    #[error("truncated input: {needed} byte(s) requested at offset {offset}, buffer holds {len}")]
    Truncated {
        offset: usize,
        needed: usize,
        len: usize,
    },
    /// No terminator byte was found within the 4 bytes a variable-length quantity may span.
    #[error("variable-length quantity at offset {offset} has no terminator within 4 bytes")]
    VlqOverflow { offset: usize },
    /// There is no serializer for this status, so the message cannot be written.
    #[error("unsupported status {0:?}")]
    UnsupportedStatus(Status),
    /// A write ran past the end of the output buffer.
    #[error("out of space: {needed} byte(s) written at offset {offset}, buffer holds {len}")]
    OutOfSpace {
        offset: usize,
        needed: usize,
        len: usize,
    },
    /// A data byte was found before any status byte, so there is no running status to apply.
    #[error("data byte {byte:#04x} at offset {offset} with no running status")]
    NoRunningStatus { offset: usize, byte: u8 },
    /// The payload carried by a message does not have the shape its status requires.
    #[error("payload does not match status {0:?}")]
    PayloadMismatch(Status),
    /// A channel was given to a system status, or left out of a channel status.
    #[error("channel does not match status {0:?}")]
    ChannelMismatch(Status),
    /// A System Exclusive payload byte would break message framing if written.
    #[error("sysex byte {byte:#04x} at index {index} is not a data byte")]
    InvalidSysex { index: usize, byte: u8 },
    /// Uncompliant data, only reported if the `strict` feature is enabled.
    #[error("malformed midi at offset {offset}: {msg}")]
    Malformed { offset: usize, msg: &'static str },
}
impl Error {
    /// Broad category of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Truncated { .. }
            | Error::VlqOverflow { .. }
            | Error::UnsupportedStatus(..)
            | Error::OutOfSpace { .. } => ErrorKind::Range,
            Error::NoRunningStatus { .. }
            | Error::PayloadMismatch(..)
            | Error::ChannelMismatch(..)
            | Error::InvalidSysex { .. } => ErrorKind::Invalid,
            Error::Malformed { .. } => ErrorKind::Malformed,
        }
    }
}

/// The broad category of an [`Error`](enum.Error.html).
///
/// As a library consumer, detailed errors about what specific part of the MIDI standard was
/// violated are not very useful, so errors are broadly categorized into 3 classes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A read or write out of bounds, an oversized quantity, or a status the codec cannot write.
    Range,
    /// The message or byte stream makes no sense, regardless of how lenient the codec is.
    Invalid,
    /// Non-fatal error, but the data is clearly corrupted.
    ///
    /// This kind of error is not emitted by default, only if the `strict` crate feature is
    /// enabled.
    Malformed,
}

/// Reports uncompliant data.
///
/// Fails if the `strict` feature is enabled, otherwise the caller goes on repairing the data.
pub(crate) fn malformed(offset: usize, msg: &'static str) -> Result<()> {
    if cfg!(feature = "strict") {
        Err(Error::Malformed { offset, msg })
    } else {
        tracing::debug!(offset, msg, "repairing malformed midi");
        Ok(())
    }
}

/// The result type used by the MIDI codec.
pub type Result<T> = std::result::Result<T, Error>;
