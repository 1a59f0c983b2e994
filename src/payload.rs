//! The payload shapes carried by MIDI messages, each with its own deserializer and serializer.
//!
//! Every deserializer is handed the offset of the first byte after the status byte, and reports
//! the offset right after the bytes it consumed.

use crate::{
    error::malformed,
    note::{NoteInfo, NOTE_TABLE},
    prelude::*,
};

/// A decoded payload paired with the offset right after its last byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeserializationResult<T> {
    pub payload: T,
    pub next_offset: usize,
}
impl<T> DeserializationResult<T> {
    #[inline]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DeserializationResult<U> {
        DeserializationResult {
            payload: f(self.payload),
            next_offset: self.next_offset,
        }
    }
}

/// The shape of a payload, determined entirely by the status of its message.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum PayloadKind {
    Note,
    AfterTouch,
    ControlChange,
    PitchBend,
    Number,
    Sysex,
    Empty,
}
impl PayloadKind {
    /// The fixed amount of data bytes carried by this kind, or `None` for System Exclusive
    /// data, which runs up to its terminator.
    #[inline]
    pub fn data_len(self) -> Option<usize> {
        match self {
            PayloadKind::Note
            | PayloadKind::AfterTouch
            | PayloadKind::ControlChange
            | PayloadKind::PitchBend => Some(2),
            PayloadKind::Number => Some(1),
            PayloadKind::Empty => Some(0),
            PayloadKind::Sysex => None,
        }
    }
}

/// The payload of a MIDI message.
///
/// Messages with an empty payload carry no `Payload` at all.
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum Payload {
    Note(Note),
    AfterTouch(AfterTouch),
    ControlChange(ControlChange),
    PitchBend(PitchBend),
    Number(NumberValue),
    Sysex(SysexValue),
}
impl Payload {
    #[inline]
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Note(..) => PayloadKind::Note,
            Payload::AfterTouch(..) => PayloadKind::AfterTouch,
            Payload::ControlChange(..) => PayloadKind::ControlChange,
            Payload::PitchBend(..) => PayloadKind::PitchBend,
            Payload::Number(..) => PayloadKind::Number,
            Payload::Sysex(..) => PayloadKind::Sysex,
        }
    }
}

/// A payload shape with a fixed deserializer/serializer pair.
pub trait PayloadCodec: Sized {
    /// The kind of payload this codec handles.
    const KIND: PayloadKind;

    /// Read the payload starting at `offset`, the first byte after the status byte.
    fn deserialize(buf: &[u8], offset: usize) -> Result<DeserializationResult<Self>>;

    /// Write the payload bytes, not including the status byte.
    fn write(&self, out: &mut dyn Write) -> Result<()>;

    /// Wrap this payload for storage in a message.
    fn into_payload(self) -> Option<Payload>;

    /// View the payload stored in a message as this shape, if it is one.
    fn from_payload(payload: Option<&Payload>) -> Option<&Self>;

    /// Write the payload into `buf` starting at `offset`, returning the offset right after the
    /// written bytes.
    fn serialize(&self, buf: &mut [u8], offset: usize) -> Result<usize> {
        let mut cursor = Cursor::from_parts(buf, offset)?;
        self.write(&mut cursor)?;
        Ok(cursor.cursor())
    }

    /// The exact amount of bytes `write` produces.
    fn encoded_len(&self) -> Result<usize> {
        let mut counter = WriteCounter(0);
        self.write(&mut counter)?;
        Ok(counter.0)
    }
}

/// Read `N` consecutive data bytes.
fn read_data_bytes<const N: usize>(buf: &[u8], offset: usize) -> Result<[u7; N]> {
    read_data(buf, offset, N)?;
    let mut out = [u7::default(); N];
    for (i, slot) in out.iter_mut().enumerate() {
        *slot = read_u7(buf, offset + i)?;
    }
    Ok(out)
}

macro_rules! two_byte_payload {
    {$(#[$attr:meta])* $name:ident { $first:ident, $second:ident } => $variant:ident} => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Default)]
        pub struct $name {
            pub $first: u7,
            pub $second: u7,
        }
        impl PayloadCodec for $name {
            const KIND: PayloadKind = PayloadKind::$variant;

            fn deserialize(buf: &[u8], offset: usize) -> Result<DeserializationResult<Self>> {
                let [$first, $second] = read_data_bytes::<2>(buf, offset)?;
                Ok(DeserializationResult {
                    payload: $name { $first, $second },
                    next_offset: offset + 2,
                })
            }

            fn write(&self, out: &mut dyn Write) -> Result<()> {
                out.write_all(&[self.$first.as_int(), self.$second.as_int()])
            }

            #[inline]
            fn into_payload(self) -> Option<Payload> {
                Some(Payload::$variant(self))
            }

            #[inline]
            fn from_payload(payload: Option<&Payload>) -> Option<&Self> {
                match payload {
                    Some(Payload::$variant(p)) => Some(p),
                    _ => None,
                }
            }
        }
    };
}

two_byte_payload! {
    /// The key and velocity of a Note On or Note Off message.
    Note { value, velocity } => Note
}
impl Note {
    /// The name and frequency of the key.
    #[inline]
    pub fn info(&self) -> &'static NoteInfo {
        &NOTE_TABLE[self.value.as_int() as usize]
    }

    /// The scientific pitch name of the key, for example `"A4"`.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.info().name
    }

    /// The center frequency of the key in Hz, with A4 tuned to 440 Hz.
    #[inline]
    pub fn frequency(&self) -> f64 {
        self.info().frequency
    }
}

two_byte_payload! {
    /// After-touch applied to a single key.
    AfterTouch { note, value } => AfterTouch
}

two_byte_payload! {
    /// A new value for a MIDI controller.
    ControlChange { control, value } => ControlChange
}

two_byte_payload! {
    /// A pitch bend, sent least significant byte first.
    ///
    /// The combined 14-bit value is centered at `0x2000`.
    PitchBend { lsb, msb } => PitchBend
}
impl PitchBend {
    /// The value of a pitch bend that does not bend at all.
    pub const CENTER: u16 = 0x2000;

    /// Build a pitch bend out of its combined 14-bit value.
    #[inline]
    pub fn from_value(value: u14) -> PitchBend {
        let value = value.as_int();
        PitchBend {
            lsb: u7::new(value as u8),
            msb: u7::new((value >> 7) as u8),
        }
    }

    /// The combined 14-bit value.
    #[inline]
    pub fn value(&self) -> u14 {
        u14::new(u16::from(self.msb.as_int()) << 7 | u16::from(self.lsb.as_int()))
    }
}

/// A single data byte, as carried by Program Change and Channel After-Touch messages.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Default)]
pub struct NumberValue {
    pub value: u7,
}
impl PayloadCodec for NumberValue {
    const KIND: PayloadKind = PayloadKind::Number;

    fn deserialize(buf: &[u8], offset: usize) -> Result<DeserializationResult<Self>> {
        let [value] = read_data_bytes::<1>(buf, offset)?;
        Ok(DeserializationResult {
            payload: NumberValue { value },
            next_offset: offset + 1,
        })
    }

    fn write(&self, out: &mut dyn Write) -> Result<()> {
        out.write_all(&[self.value.as_int()])
    }

    #[inline]
    fn into_payload(self) -> Option<Payload> {
        Some(Payload::Number(self))
    }

    #[inline]
    fn from_payload(payload: Option<&Payload>) -> Option<&Self> {
        match payload {
            Some(Payload::Number(p)) => Some(p),
            _ => None,
        }
    }
}

/// The data bytes of a System Exclusive message, not including the `0xF0` status byte nor the
/// `0xF7` terminator.
#[derive(Clone, PartialEq, Eq, Debug, Hash, Default)]
pub struct SysexValue(pub Vec<u8>);
impl SysexValue {
    pub const TERMINATOR: u8 = 0xF7;

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.0
    }
}
impl PayloadCodec for SysexValue {
    const KIND: PayloadKind = PayloadKind::Sysex;

    fn deserialize(buf: &[u8], offset: usize) -> Result<DeserializationResult<Self>> {
        let rest = buf.get(offset..).ok_or(Error::Truncated {
            offset,
            needed: 0,
            len: buf.len(),
        })?;
        //Any status byte ends the data, but only the terminator is consumed
        let (data, next_offset) = match rest.iter().position(|&b| bit_range(b, 7..8) != 0) {
            Some(end) if rest[end] == Self::TERMINATOR => (&rest[..end], offset + end + 1),
            Some(end) => {
                malformed(offset + end, "sysex cut short by a status byte")?;
                (&rest[..end], offset + end)
            }
            None => {
                malformed(buf.len(), "unterminated sysex")?;
                (rest, buf.len())
            }
        };
        Ok(DeserializationResult {
            payload: SysexValue(data.to_vec()),
            next_offset,
        })
    }

    fn write(&self, out: &mut dyn Write) -> Result<()> {
        if let Some(index) = self.0.iter().position(|&b| bit_range(b, 7..8) != 0) {
            bail!(Error::InvalidSysex {
                index,
                byte: self.0[index],
            });
        }
        out.write_all(&self.0)?;
        out.write_all(&[Self::TERMINATOR])
    }

    #[inline]
    fn into_payload(self) -> Option<Payload> {
        Some(Payload::Sysex(self))
    }

    #[inline]
    fn from_payload(payload: Option<&Payload>) -> Option<&Self> {
        match payload {
            Some(Payload::Sysex(p)) => Some(p),
            _ => None,
        }
    }
}

/// The absent payload of System Real Time messages.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash, Default)]
pub struct Empty;
impl PayloadCodec for Empty {
    const KIND: PayloadKind = PayloadKind::Empty;

    #[inline]
    fn deserialize(_buf: &[u8], offset: usize) -> Result<DeserializationResult<Self>> {
        Ok(DeserializationResult {
            payload: Empty,
            next_offset: offset,
        })
    }

    #[inline]
    fn write(&self, _out: &mut dyn Write) -> Result<()> {
        Ok(())
    }

    #[inline]
    fn into_payload(self) -> Option<Payload> {
        None
    }

    #[inline]
    fn from_payload(payload: Option<&Payload>) -> Option<&Self> {
        match payload {
            None => Some(&Empty),
            Some(_) => None,
        }
    }
}
