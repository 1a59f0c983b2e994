use crate::{
    payload::{
        AfterTouch, ControlChange, Note, NumberValue, Payload, PayloadKind, PitchBend, SysexValue,
    },
    prelude::*,
    status::RealtimeStatus,
};

/// A typed MIDI message.
///
/// A message carries a channel if and only if its status is a channel status, and the shape of
/// its payload is always the one its status determines.
/// Both properties are checked on construction, so every `Message` is writable as long as its
/// status has a serializer.
///
/// The `M` parameter is a typed annotation attached after decoding, `()` by default.
/// See [`Decorator`](trait.Decorator.html).
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub struct Message<M = ()> {
    status: Status,
    channel: Option<Channel>,
    payload: Option<Payload>,
    meta: M,
}
impl Message {
    /// Build a message, checking that the channel and payload match the status.
    pub fn new(
        status: Status,
        channel: Option<Channel>,
        payload: Option<Payload>,
    ) -> Result<Message> {
        ensure!(
            status.is_channel() == channel.is_some(),
            Error::ChannelMismatch(status)
        );
        let kind = payload.as_ref().map_or(PayloadKind::Empty, Payload::kind);
        ensure!(status.payload_kind() == kind, Error::PayloadMismatch(status));
        Ok(Message::from_parts(status, channel, payload))
    }

    #[inline]
    pub(crate) fn from_parts(
        status: Status,
        channel: Option<Channel>,
        payload: Option<Payload>,
    ) -> Message {
        Message {
            status,
            channel,
            payload,
            meta: (),
        }
    }

    pub fn note_on(channel: Channel, note: u7, velocity: u7) -> Message {
        Message::from_parts(
            Status::NoteOn,
            Some(channel),
            Some(Payload::Note(Note {
                value: note,
                velocity,
            })),
        )
    }

    pub fn note_off(channel: Channel, note: u7, velocity: u7) -> Message {
        Message::from_parts(
            Status::NoteOff,
            Some(channel),
            Some(Payload::Note(Note {
                value: note,
                velocity,
            })),
        )
    }

    pub fn poly_after_touch(channel: Channel, note: u7, value: u7) -> Message {
        Message::from_parts(
            Status::PolyphonicAfterTouch,
            Some(channel),
            Some(Payload::AfterTouch(AfterTouch { note, value })),
        )
    }

    pub fn control_change(channel: Channel, control: u7, value: u7) -> Message {
        Message::from_parts(
            Status::ControlChange,
            Some(channel),
            Some(Payload::ControlChange(ControlChange { control, value })),
        )
    }

    pub fn program_change(channel: Channel, program: u7) -> Message {
        Message::from_parts(
            Status::ProgramChange,
            Some(channel),
            Some(Payload::Number(NumberValue { value: program })),
        )
    }

    pub fn channel_after_touch(channel: Channel, value: u7) -> Message {
        Message::from_parts(
            Status::ChannelAfterTouch,
            Some(channel),
            Some(Payload::Number(NumberValue { value })),
        )
    }

    /// A pitch bend with its combined 14-bit value, where `0x2000` means no bend.
    pub fn pitch_bend(channel: Channel, value: u14) -> Message {
        Message::from_parts(
            Status::PitchBend,
            Some(channel),
            Some(Payload::PitchBend(PitchBend::from_value(value))),
        )
    }

    /// A System Exclusive message with the given data bytes.
    ///
    /// The bytes are only checked when the message is written, where any byte with its top bit
    /// set fails with `Error::InvalidSysex`.
    pub fn sysex(data: Vec<u8>) -> Message {
        Message::from_parts(Status::SysEx, None, Some(Payload::Sysex(SysexValue(data))))
    }

    pub fn realtime(status: RealtimeStatus) -> Message {
        Message::from_parts(status.into(), None, None)
    }

    /// A system message without payload.
    pub fn system(status: Status) -> Result<Message> {
        Message::new(status, None, None)
    }
}
impl<M> Message<M> {
    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    /// The channel of a channel message, `None` for system messages.
    #[inline]
    pub fn channel(&self) -> Option<Channel> {
        self.channel
    }

    #[inline]
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// The note payload of a Note On or Note Off message.
    #[inline]
    pub fn note(&self) -> Option<&Note> {
        match &self.payload {
            Some(Payload::Note(note)) => Some(note),
            _ => None,
        }
    }

    #[inline]
    pub fn meta(&self) -> &M {
        &self.meta
    }

    #[inline]
    pub fn meta_mut(&mut self) -> &mut M {
        &mut self.meta
    }

    /// Replace the annotation of this message.
    #[inline]
    pub fn annotate<N>(self, meta: N) -> Message<N> {
        Message {
            status: self.status,
            channel: self.channel,
            payload: self.payload,
            meta,
        }
    }

    /// Drop the annotation of this message.
    #[inline]
    pub fn strip(self) -> Message {
        self.annotate(())
    }

    #[inline]
    pub fn into_parts(self) -> (Status, Option<Channel>, Option<Payload>, M) {
        (self.status, self.channel, self.payload, self.meta)
    }
}
