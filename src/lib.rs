//! # Overview
//!
//! `midiwire` is a MIDI 1.0 wire-format codec: it turns raw MIDI bytes into typed messages and
//! typed messages back into the exact bytes the protocol requires.
//!
//! Usage is as simple as:
//!
//! ```rust
//! use midiwire::{Decoder, Status};
//!
//! let mut decoder = Decoder::new();
//! // A Note On on channel 1, followed by a second note sharing its status byte.
//! let raw = [0x90, 69, 80, 72, 90];
//!
//! let messages = decoder.messages(&raw).collect::<Result<Vec<_>, _>>().unwrap();
//! assert_eq!(messages.len(), 2);
//! assert_eq!(messages[1].status(), Status::NoteOn);
//! assert_eq!(messages[0].note().unwrap().name(), "A4");
//! ```
//!
//! # Encoding messages
//!
//! Every encoded message is self-contained, that is, the status byte is always written:
//!
//! ```rust
//! use midiwire::{encode, num::u7, Channel, Message};
//!
//! let channel = Channel::new(1).unwrap();
//! let msg = Message::note_on(channel, u7::new(69), u7::new(80));
//! assert_eq!(encode(&msg).unwrap(), vec![0x90, 69, 80]);
//! ```
//!
//! # About running status
//!
//! MIDI allows omitting the status byte of a channel message when it is the same as the status
//! of the previous channel message.
//! Interpreting these bytes requires remembering the last status, and this memory belongs to a
//! single byte stream.
//! For this reason running status lives inside a [`Decoder`](struct.Decoder.html) and not in a
//! global: use one decoder per input stream.
//!
//! # Publishing decoded messages
//!
//! The [`Reader`](struct.Reader.html) type ties a decoder to a [`Sink`](trait.Sink.html), pushing
//! every decoded message to it exactly once.
//! A `crossbeam-channel` sender is a sink, so decoded messages can be consumed from any thread:
//!
//! ```rust
//! use midiwire::{message_channel, Reader};
//!
//! let (tx, rx) = message_channel();
//! let mut reader = Reader::new(tx);
//! reader.read(&[0xF8, 0xB0, 71, 22]).unwrap();
//!
//! assert_eq!(rx.try_iter().count(), 2);
//! ```
//!
//! # About features
//!
//! - The `strict` feature
//!
//!   By default `midiwire` recovers from slightly corrupted data: a message cut short by a
//!   status byte is dropped and an unterminated System Exclusive message extends up to the next
//!   status byte or the end of the buffer.
//!   By enabling the `strict` feature these situations produce errors of the kind
//!   `ErrorKind::Malformed` instead.
//!
//! - The `parallel` feature
//!
//!   Enabled by default. Makes [`decode_streams`](fn.decode_streams.html) decode independent
//!   streams in parallel through the `rayon` dependency.

macro_rules! bail {
    ($err:expr) => {{
        return Err($err.into());
    }};
}
macro_rules! ensure {
    ($cond:expr, $err:expr) => {{
        if !$cond {
            bail!($err)
        }
    }};
}

/// All of the errors this crate produces.
mod error;

mod prelude {
    pub(crate) use crate::{
        error::{Error, Result},
        io::{Cursor, Write, WriteCounter},
        primitive::{read_data, read_u8, read_u7, u14, u28, u4, u7},
        status::{Channel, Status},
    };
    pub(crate) use std::{fmt, ops};

    pub(crate) fn bit_range<T>(val: T, range: ops::Range<u32>) -> T
    where
        T: From<u8>
            + ops::Shr<u32, Output = T>
            + ops::Shl<u32, Output = T>
            + ops::Not<Output = T>
            + ops::BitAnd<Output = T>,
    {
        let mask = !((!T::from(0)) << (range.end - range.start));
        (val >> range.start) & mask
    }
}

mod dispatch;
mod factory;
pub mod io;
mod live;
mod message;
mod note;
mod payload;
mod primitive;
mod realtime;
mod running;
mod sink;
mod status;
mod stream;

pub use crate::{
    dispatch::{Deserializer, Serializer},
    error::{Error, ErrorKind, Result},
    factory::ChannelFactory,
    live::{decode, decode_streams, encode, encode_into, Decoded, Decoder, Messages},
    message::Message,
    note::{NoteInfo, NOTE_TABLE},
    payload::{
        AfterTouch, ControlChange, DeserializationResult, Empty, Note, NumberValue, Payload,
        PayloadCodec, PayloadKind, PitchBend, SysexValue,
    },
    primitive::{read_vlq, vlq_len, write_vlq},
    realtime::{Observers, Subscription},
    running::RunningStatus,
    sink::{message_channel, Filtered, FnSink, Sink},
    status::{
        channel_status_decoder, channel_status_encoder, has_status_byte, is_system,
        system_status_encoder, Channel, MessageClass, RealtimeStatus, Status,
    },
    stream::{Decorator, NoDecorator, Reader, Writer, WriterOptions},
};

/// Exotically-sized integers used by the MIDI standard.
pub mod num {
    pub use crate::primitive::{u14, u28, u4, u7};
}

#[cfg(test)]
mod test;
