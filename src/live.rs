//! The decode/encode engine for MIDI byte streams.
//!
//! Decoding is stateful because of running status, so it goes through a
//! [`Decoder`](struct.Decoder.html), one per input stream.
//! Encoding is stateless: every encoded message starts with its own status byte.

use crate::{
    error::malformed,
    message::Message,
    payload::DeserializationResult,
    running::RunningStatus,
    status::{
        channel_status_decoder, channel_status_encoder, has_status_byte, system_status_encoder,
    },
    prelude::*,
};
use std::collections::VecDeque;

/// The outcome of decoding a single message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded message, or `None` if its status is not modeled by the codec.
    pub message: Option<Message>,
    /// System Real Time messages found among the data bytes of `message`, in stream order.
    ///
    /// They arrived before `message` was complete, so they come first.
    pub interleaved: Vec<Message>,
    /// The offset right after the consumed bytes, where the next message starts.
    pub next_offset: usize,
}

/// A decode session over one MIDI byte stream.
///
/// The decoder owns the running status of its stream, so messages split across several calls
/// (and buffers) are decoded correctly as long as they go through the same decoder.
#[derive(Clone, Debug, Default)]
pub struct Decoder {
    running: RunningStatus,
}
impl Decoder {
    #[inline]
    pub fn new() -> Decoder {
        Decoder::default()
    }

    #[inline]
    pub fn running_status(&self) -> &RunningStatus {
        &self.running
    }

    /// Forget the running status, to start decoding an unrelated stream.
    #[inline]
    pub fn reset(&mut self) {
        self.running.reset();
    }

    /// Decode the message starting at `offset`.
    ///
    /// Messages whose status the codec does not model are skipped along with the data bytes
    /// that follow them, yielding a `Decoded` with no message.
    /// A data byte found before any channel status byte fails with `Error::NoRunningStatus`.
    ///
    /// System Real Time bytes (`0xF8..=0xFF`) may show up between the data bytes of a message.
    /// They are taken out and reported in `Decoded::interleaved`. Any other status byte found
    /// where a data byte belongs ends the message early: the incomplete message is dropped
    /// (`Error::Malformed` with the `strict` feature) and decoding resumes at that status byte.
    ///
    /// The running status is only updated once the message has been fully decoded, so a failed
    /// call leaves the decoder as it was.
    pub fn decode(&mut self, buf: &[u8], offset: usize) -> Result<Decoded> {
        let first = read_u8(buf, offset)?;
        if !has_status_byte(first) {
            //Running status
            let (status, channel) = self
                .running
                .current()
                .ok_or(Error::NoRunningStatus {
                    offset,
                    byte: first,
                })?;
            return decode_body(status, Some(channel), buf, offset);
        }
        if let Some(status) = Status::from_system_byte(first) {
            //System messages never take part in running status
            return decode_body(status, None, buf, offset + 1);
        }
        match channel_status_decoder(first) {
            Some((status, channel)) => {
                let decoded = decode_body(status, Some(channel), buf, offset + 1)?;
                if decoded.message.is_some() {
                    self.running.set(status, channel);
                }
                Ok(decoded)
            }
            None => {
                tracing::debug!(offset, byte = first, "skipping undefined status byte");
                Ok(Decoded {
                    message: None,
                    interleaved: Vec::new(),
                    next_offset: skip_data(buf, offset + 1),
                })
            }
        }
    }

    /// Iterate over every modeled message in `buf`.
    ///
    /// The iterator stops after yielding the first error.
    #[inline]
    pub fn messages<'a, 'b>(&'a mut self, buf: &'b [u8]) -> Messages<'a, 'b> {
        Messages {
            decoder: self,
            buf,
            offset: 0,
            queue: VecDeque::new(),
            failed: false,
        }
    }
}

/// Dispatch the payload starting at `body` to the deserializer of `status`.
fn decode_body(
    status: Status,
    channel: Option<Channel>,
    buf: &[u8],
    body: usize,
) -> Result<Decoded> {
    let de = match status.deserializer() {
        Some(de) => de,
        None => {
            tracing::debug!(?status, offset = body, "skipping unsupported status");
            return Ok(Decoded {
                message: None,
                interleaved: Vec::new(),
                next_offset: skip_data(buf, body),
            });
        }
    };
    let span = Span::scan(buf, body, status.payload_kind().data_len());
    if span.cut {
        malformed(span.end, "message cut short by a status byte")?;
        tracing::debug!(?status, offset = body, "dropping incomplete message");
        return Ok(Decoded {
            message: None,
            interleaved: span.realtime_messages(),
            next_offset: span.end,
        });
    }
    let res = if span.realtime.is_empty() {
        de(buf, body)?
    } else {
        //Hand the deserializer the body without the real-time bytes
        let (compact, positions): (Vec<u8>, Vec<usize>) = buf[body..span.end]
            .iter()
            .enumerate()
            .filter(|&(_, &b)| !is_realtime_byte(b))
            .map(|(i, &b)| (b, body + i))
            .unzip();
        let locate = |at: usize| positions.get(at).copied().unwrap_or(span.end);
        let res = de(&compact, 0).map_err(|err| match err {
            Error::Truncated { offset, needed, .. } => Error::Truncated {
                offset: locate(offset),
                needed,
                len: buf.len(),
            },
            Error::Malformed { offset, msg } => Error::Malformed {
                offset: locate(offset),
                msg,
            },
            err => err,
        })?;
        DeserializationResult {
            next_offset: locate(res.next_offset),
            payload: res.payload,
        }
    };
    Ok(Decoded {
        message: Some(Message::from_parts(status, channel, res.payload)),
        interleaved: span.realtime_messages(),
        next_offset: res.next_offset,
    })
}

#[inline]
fn is_realtime_byte(byte: u8) -> bool {
    byte >= 0xF8
}

/// The extent of a message body, up to its last data byte (or its SysEx terminator).
struct Span {
    end: usize,
    /// A status byte showed up before every data byte was read.
    cut: bool,
    realtime: Vec<u8>,
}
impl Span {
    /// Walk the body starting at `from`, expecting `len` data bytes, or data up to `0xF7` if
    /// `len` is `None`.
    ///
    /// Reaching the end of the buffer early is left for the deserializer to report.
    fn scan(buf: &[u8], from: usize, len: Option<usize>) -> Span {
        let mut span = Span {
            end: from,
            cut: false,
            realtime: Vec::new(),
        };
        let mut data = 0;
        while len.map_or(true, |len| data < len) {
            let byte = match buf.get(span.end) {
                Some(&byte) => byte,
                None => break,
            };
            if is_realtime_byte(byte) {
                span.realtime.push(byte);
            } else if has_status_byte(byte) {
                if len.is_none() && byte == 0xF7 {
                    span.end += 1;
                } else {
                    span.cut = len.is_some();
                }
                break;
            } else {
                data += 1;
            }
            span.end += 1;
        }
        span
    }

    /// The interleaved real-time bytes as messages. Undefined bytes (`0xFA`, `0xFD`) are dropped.
    fn realtime_messages(&self) -> Vec<Message> {
        self.realtime
            .iter()
            .filter_map(|&byte| Status::from_system_byte(byte)?.as_realtime())
            .map(Message::realtime)
            .collect()
    }
}

/// The offset of the first status byte at or after `from`, or the end of the buffer.
fn skip_data(buf: &[u8], from: usize) -> usize {
    buf.get(from..)
        .and_then(|rest| rest.iter().position(|&b| has_status_byte(b)))
        .map_or(buf.len(), |skip| from + skip)
}

/// An iterator over the messages in a buffer, created by
/// [`Decoder::messages`](struct.Decoder.html#method.messages).
#[derive(Debug)]
pub struct Messages<'a, 'b> {
    decoder: &'a mut Decoder,
    buf: &'b [u8],
    offset: usize,
    queue: VecDeque<Message>,
    failed: bool,
}
impl Messages<'_, '_> {
    /// The offset of the next byte to decode.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }
}
impl Iterator for Messages<'_, '_> {
    type Item = Result<Message>;

    fn next(&mut self) -> Option<Result<Message>> {
        if let Some(message) = self.queue.pop_front() {
            return Some(Ok(message));
        }
        while !self.failed && self.offset < self.buf.len() {
            match self.decoder.decode(self.buf, self.offset) {
                Ok(Decoded {
                    message,
                    interleaved,
                    next_offset,
                }) => {
                    self.offset = next_offset;
                    self.queue.extend(interleaved);
                    self.queue.extend(message);
                    if let Some(message) = self.queue.pop_front() {
                        return Some(Ok(message));
                    }
                }
                Err(err) => {
                    self.failed = true;
                    return Some(Err(err));
                }
            }
        }
        None
    }
}

/// Decode a single message from the start of `buf`, with no prior running status.
///
/// Returns `Ok(None)` if the status is not modeled by the codec. Real-time bytes interleaved
/// with the data bytes are discarded; go through a [`Decoder`](struct.Decoder.html) to keep them.
#[inline]
pub fn decode(buf: &[u8]) -> Result<Option<Message>> {
    Ok(Decoder::new().decode(buf, 0)?.message)
}

/// Write a message, status byte included, to the given writer.
pub(crate) fn write_message<M>(msg: &Message<M>, out: &mut dyn Write) -> Result<()> {
    let status = msg.status();
    let serializer = status
        .serializer()
        .ok_or(Error::UnsupportedStatus(status))?;
    let status_byte = match msg.channel() {
        Some(channel) => channel_status_encoder(status, channel),
        None => system_status_encoder(status),
    }
    .ok_or(Error::ChannelMismatch(status))?;
    out.write_all(&[status_byte])?;
    serializer(status, msg.payload(), out)
}

/// Encode a message into a new buffer holding exactly its wire bytes.
///
/// Fails with `Error::UnsupportedStatus` if the codec cannot write messages with this status.
pub fn encode<M>(msg: &Message<M>) -> Result<Vec<u8>> {
    let mut counter = WriteCounter(0);
    write_message(msg, &mut counter)?;
    let mut out = Vec::with_capacity(counter.0);
    write_message(msg, &mut out)?;
    Ok(out)
}

/// Encode a message into `buf` starting at `offset`, returning the offset right after it.
///
/// Fails with `Error::OutOfSpace` if the message does not fit.
pub fn encode_into<M>(msg: &Message<M>, buf: &mut [u8], offset: usize) -> Result<usize> {
    let mut cursor = Cursor::from_parts(buf, offset)?;
    write_message(msg, &mut cursor)?;
    Ok(cursor.cursor())
}

/// Decode several independent streams, each with its own running status.
///
/// With the `parallel` feature the streams are decoded on the `rayon` thread pool.
pub fn decode_streams(streams: &[&[u8]]) -> Vec<Result<Vec<Message>>> {
    fn decode_all(raw: &[u8]) -> Result<Vec<Message>> {
        Decoder::new().messages(raw).collect()
    }

    //Attempt to use multiple threads if there is more than one stream
    #[cfg(feature = "parallel")]
    {
        if streams.len() > 1 {
            use rayon::prelude::*;

            return streams.par_iter().map(|raw| decode_all(raw)).collect();
        }
    }
    //Fall back to single-threaded
    streams.iter().map(|raw| decode_all(raw)).collect()
}
