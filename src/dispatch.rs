//! Status to (de)serializer dispatch.
//!
//! Both tables are closed matches over `Status`, so adding a status forces a decision on how it
//! is read and written.
//! A status that maps to `None` is one the codec does not model: decoding swallows it, encoding
//! refuses it.

use crate::{
    payload::{
        AfterTouch, ControlChange, DeserializationResult, Empty, Note, NumberValue, Payload,
        PayloadCodec, PitchBend, SysexValue,
    },
    prelude::*,
};

/// Reads the payload of a message, starting right after its status byte.
pub type Deserializer = fn(&[u8], usize) -> Result<DeserializationResult<Option<Payload>>>;

/// Writes the payload of a message with the given status, not including the status byte.
///
/// Fails with `Error::PayloadMismatch` if the payload does not have the shape of the status.
pub type Serializer = fn(Status, Option<&Payload>, &mut dyn Write) -> Result<()>;

fn deserialize_as<T: PayloadCodec>(
    buf: &[u8],
    offset: usize,
) -> Result<DeserializationResult<Option<Payload>>> {
    Ok(T::deserialize(buf, offset)?.map(T::into_payload))
}

fn serialize_as<T: PayloadCodec>(
    status: Status,
    payload: Option<&Payload>,
    out: &mut dyn Write,
) -> Result<()> {
    match T::from_payload(payload) {
        Some(payload) => payload.write(out),
        None => Err(Error::PayloadMismatch(status)),
    }
}

impl Status {
    /// The deserializer for messages with this status, if the codec can read them.
    pub fn deserializer(self) -> Option<Deserializer> {
        let de: Deserializer = match self {
            Status::NoteOff | Status::NoteOn => deserialize_as::<Note>,
            Status::PolyphonicAfterTouch => deserialize_as::<AfterTouch>,
            Status::ControlChange => deserialize_as::<ControlChange>,
            Status::ProgramChange | Status::ChannelAfterTouch => deserialize_as::<NumberValue>,
            Status::PitchBend => deserialize_as::<PitchBend>,
            Status::SysEx => deserialize_as::<SysexValue>,
            Status::TimingClock
            | Status::Start
            | Status::Continue
            | Status::Stop
            | Status::ActiveSensing
            | Status::SystemReset => deserialize_as::<Empty>,
            Status::Mtc | Status::SongPosition | Status::SongSelect | Status::TuneRequest => {
                return None
            }
        };
        Some(de)
    }

    /// The serializer for messages with this status, if the codec can write them.
    pub fn serializer(self) -> Option<Serializer> {
        let ser: Serializer = match self {
            Status::NoteOff | Status::NoteOn => serialize_as::<Note>,
            Status::PolyphonicAfterTouch => serialize_as::<AfterTouch>,
            Status::ControlChange => serialize_as::<ControlChange>,
            Status::ProgramChange | Status::ChannelAfterTouch => serialize_as::<NumberValue>,
            Status::PitchBend => serialize_as::<PitchBend>,
            Status::SysEx => serialize_as::<SysexValue>,
            Status::TimingClock
            | Status::Start
            | Status::Continue
            | Status::Stop
            | Status::ActiveSensing
            | Status::SystemReset => serialize_as::<Empty>,
            Status::Mtc | Status::SongPosition | Status::SongSelect | Status::TuneRequest => {
                return None
            }
        };
        Some(ser)
    }
}
