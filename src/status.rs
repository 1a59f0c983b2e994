//! The MIDI status model: which kind of message a status byte introduces.

use crate::{payload::PayloadKind, prelude::*};

/// Identifies the type of a MIDI message.
///
/// Channel statuses are identified by the top nibble of their status byte (the bottom nibble
/// carries the channel), while system statuses are identified by the full status byte.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum Status {
    /// Stop playing a note.
    NoteOff,
    /// Start playing a note. A velocity of zero is usually interpreted as a Note Off.
    NoteOn,
    /// After-touch applied to an individual note.
    PolyphonicAfterTouch,
    /// Modify the value of a MIDI controller.
    ControlChange,
    /// Change the program (also known as patch or instrument) of the channel.
    ProgramChange,
    /// After-touch applied to every note playing on the channel.
    ChannelAfterTouch,
    /// Special purpose pitch controller, with 14 bits of resolution.
    PitchBend,
    /// System Exclusive message, carrying arbitrary data bytes up to an `0xF7` terminator.
    SysEx,
    /// A MIDI Time Code Quarter Frame.
    Mtc,
    /// The number of MIDI beats (6 x MIDI clocks) elapsed since the start of the song.
    SongPosition,
    /// Select the song or sequence to play.
    SongSelect,
    /// Request analog synthesizers to tune their oscillators.
    TuneRequest,
    /// Sent 24 times per quarter note by clock-based MIDI systems.
    TimingClock,
    /// Start playing at the beginning of the song.
    Start,
    /// Continue playing from the current position.
    Continue,
    /// Stop playing immediately.
    Stop,
    /// Once transmitted, a message should arrive every 300ms or else the connection is
    /// considered broken.
    ActiveSensing,
    /// Return every device to its power-up condition.
    SystemReset,
}
impl Status {
    /// Every defined status.
    pub const ALL: [Status; 18] = [
        Status::NoteOff,
        Status::NoteOn,
        Status::PolyphonicAfterTouch,
        Status::ControlChange,
        Status::ProgramChange,
        Status::ChannelAfterTouch,
        Status::PitchBend,
        Status::SysEx,
        Status::Mtc,
        Status::SongPosition,
        Status::SongSelect,
        Status::TuneRequest,
        Status::TimingClock,
        Status::Start,
        Status::Continue,
        Status::Stop,
        Status::ActiveSensing,
        Status::SystemReset,
    ];

    /// The status code: the top nibble for channel statuses, or the full status byte for system
    /// statuses.
    #[inline]
    pub const fn code(self) -> u8 {
        use Status::*;
        match self {
            NoteOff => 0x8,
            NoteOn => 0x9,
            PolyphonicAfterTouch => 0xA,
            ControlChange => 0xB,
            ProgramChange => 0xC,
            ChannelAfterTouch => 0xD,
            PitchBend => 0xE,
            SysEx => 0xF0,
            Mtc => 0xF1,
            SongPosition => 0xF2,
            SongSelect => 0xF3,
            TuneRequest => 0xF6,
            TimingClock => 0xF8,
            Start => 0xF9,
            Continue => 0xFB,
            Stop => 0xFC,
            ActiveSensing => 0xFE,
            SystemReset => 0xFF,
        }
    }

    /// Look up the channel status for the top nibble of a status byte.
    #[inline]
    pub fn from_channel_nibble(nibble: u8) -> Option<Status> {
        use Status::*;
        Some(match nibble {
            0x8 => NoteOff,
            0x9 => NoteOn,
            0xA => PolyphonicAfterTouch,
            0xB => ControlChange,
            0xC => ProgramChange,
            0xD => ChannelAfterTouch,
            0xE => PitchBend,
            _ => return None,
        })
    }

    /// Look up the system status for a full status byte.
    #[inline]
    pub fn from_system_byte(byte: u8) -> Option<Status> {
        use Status::*;
        Some(match byte {
            0xF0 => SysEx,
            0xF1 => Mtc,
            0xF2 => SongPosition,
            0xF3 => SongSelect,
            0xF6 => TuneRequest,
            0xF8 => TimingClock,
            0xF9 => Start,
            0xFB => Continue,
            0xFC => Stop,
            0xFE => ActiveSensing,
            0xFF => SystemReset,
            _ => return None,
        })
    }

    /// Classify this status into one of the MIDI message classes.
    #[inline]
    pub fn class(self) -> MessageClass {
        use Status::*;
        match self {
            NoteOff | NoteOn | PolyphonicAfterTouch | ControlChange | ProgramChange
            | ChannelAfterTouch | PitchBend => MessageClass::Channel,
            SysEx => MessageClass::SystemExclusive,
            Mtc | SongPosition | SongSelect | TuneRequest => MessageClass::SystemCommon,
            TimingClock | Start | Continue | Stop | ActiveSensing | SystemReset => {
                MessageClass::SystemRealtime
            }
        }
    }

    /// Whether messages with this status are associated to a channel.
    #[inline]
    pub fn is_channel(self) -> bool {
        self.class() == MessageClass::Channel
    }

    /// The shape of the payload carried by messages with this status.
    ///
    /// This is a total function: every status, supported by the codec or not, determines its
    /// payload shape.
    #[inline]
    pub fn payload_kind(self) -> PayloadKind {
        use Status::*;
        match self {
            NoteOff | NoteOn => PayloadKind::Note,
            PolyphonicAfterTouch => PayloadKind::AfterTouch,
            ControlChange => PayloadKind::ControlChange,
            ProgramChange | ChannelAfterTouch => PayloadKind::Number,
            PitchBend => PayloadKind::PitchBend,
            SysEx => PayloadKind::Sysex,
            Mtc | SongPosition | SongSelect | TuneRequest | TimingClock | Start | Continue
            | Stop | ActiveSensing | SystemReset => PayloadKind::Empty,
        }
    }

    /// The real-time view of this status, if it is a System Real Time status.
    #[inline]
    pub fn as_realtime(self) -> Option<RealtimeStatus> {
        use Status::*;
        Some(match self {
            TimingClock => RealtimeStatus::TimingClock,
            Start => RealtimeStatus::Start,
            Continue => RealtimeStatus::Continue,
            Stop => RealtimeStatus::Stop,
            ActiveSensing => RealtimeStatus::ActiveSensing,
            SystemReset => RealtimeStatus::SystemReset,
            _ => return None,
        })
    }
}

/// The broad classes MIDI messages are divided into.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum MessageClass {
    /// A message associated to one of the 16 channels.
    Channel,
    /// A System Exclusive message.
    SystemExclusive,
    /// A System Common message.
    SystemCommon,
    /// A one-byte System Real Time message.
    SystemRealtime,
}

/// The subset of statuses that are System Real Time messages.
///
/// These are the statuses real-time handlers can subscribe to.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum RealtimeStatus {
    TimingClock,
    Start,
    Continue,
    Stop,
    ActiveSensing,
    SystemReset,
}
impl RealtimeStatus {
    /// Every real-time status.
    pub const ALL: [RealtimeStatus; 6] = [
        RealtimeStatus::TimingClock,
        RealtimeStatus::Start,
        RealtimeStatus::Continue,
        RealtimeStatus::Stop,
        RealtimeStatus::ActiveSensing,
        RealtimeStatus::SystemReset,
    ];

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }
}
impl From<RealtimeStatus> for Status {
    #[inline]
    fn from(status: RealtimeStatus) -> Status {
        match status {
            RealtimeStatus::TimingClock => Status::TimingClock,
            RealtimeStatus::Start => Status::Start,
            RealtimeStatus::Continue => Status::Continue,
            RealtimeStatus::Stop => Status::Stop,
            RealtimeStatus::ActiveSensing => Status::ActiveSensing,
            RealtimeStatus::SystemReset => Status::SystemReset,
        }
    }
}

/// A MIDI channel, numbered from 1 to 16.
///
/// On the wire, channels are encoded as a 4-bit nibble from 0 to 15.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Channel(u8);
impl Channel {
    /// The lowest channel, `1`.
    pub const MIN: Channel = Channel(1);
    /// The highest channel, `16`.
    pub const MAX: Channel = Channel(16);

    /// Create a channel from its number, in the range `1..=16`.
    #[inline]
    pub fn new(number: u8) -> Option<Channel> {
        if (1..=16).contains(&number) {
            Some(Channel(number))
        } else {
            None
        }
    }

    /// Create a channel from its wire nibble (channel = nibble + 1).
    #[inline]
    pub fn from_wire(nibble: u4) -> Channel {
        Channel(nibble.as_int() + 1)
    }

    /// The wire nibble of this channel (nibble = channel - 1).
    #[inline]
    pub fn to_wire(self) -> u4 {
        u4::new(self.0 - 1)
    }

    /// The channel number, in the range `1..=16`.
    #[inline]
    pub fn number(self) -> u8 {
        self.0
    }
}
impl fmt::Display for Channel {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Whether `byte` is one of the system statuses this codec knows about.
#[inline]
pub fn is_system(byte: u8) -> bool {
    Status::from_system_byte(byte).is_some()
}

/// Whether `byte` is a status byte (top bit set), as opposed to a data byte continuing a message
/// under running status.
#[inline]
pub fn has_status_byte(byte: u8) -> bool {
    bit_range(byte, 7..8) != 0
}

/// Compute the status byte of a channel message.
///
/// Returns `None` for system statuses.
#[inline]
pub fn channel_status_encoder(status: Status, channel: Channel) -> Option<u8> {
    if status.is_channel() {
        Some(status.code() << 4 | channel.to_wire().as_int())
    } else {
        None
    }
}

/// Compute the status byte of a system message.
///
/// Returns `None` for channel statuses.
#[inline]
pub fn system_status_encoder(status: Status) -> Option<u8> {
    if status.is_channel() {
        None
    } else {
        Some(status.code())
    }
}

/// Split a channel status byte into its status and channel.
///
/// Returns `None` if `byte` is not a channel status byte (`0x80 ..= 0xEF`).
#[inline]
pub fn channel_status_decoder(byte: u8) -> Option<(Status, Channel)> {
    let status = Status::from_channel_nibble(bit_range(byte, 4..8))?;
    Some((status, Channel::from_wire(u4::from(bit_range(byte, 0..4)))))
}
