use crate::{live::encode, message::Message, prelude::*};

/// Writes channel messages for a fixed channel straight into wire bytes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ChannelFactory {
    channel: Channel,
}
impl ChannelFactory {
    /// The velocity used by [`note_on_default`](#method.note_on_default).
    pub const DEFAULT_VELOCITY: u7 = u7::new(64);
    /// The controller selecting the most significant half of a bank number.
    pub const BANK_SELECT_MSB: u7 = u7::new(0);
    /// The controller selecting the least significant half of a bank number.
    pub const BANK_SELECT_LSB: u7 = u7::new(32);

    #[inline]
    pub fn new(channel: Channel) -> ChannelFactory {
        ChannelFactory { channel }
    }

    #[inline]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn note_on(&self, note: u7, velocity: u7) -> Result<Vec<u8>> {
        encode(&Message::note_on(self.channel, note, velocity))
    }

    /// A Note On with a velocity of 64.
    pub fn note_on_default(&self, note: u7) -> Result<Vec<u8>> {
        self.note_on(note, Self::DEFAULT_VELOCITY)
    }

    /// A Note Off with a velocity of 0.
    pub fn note_off(&self, note: u7) -> Result<Vec<u8>> {
        encode(&Message::note_off(self.channel, note, u7::new(0)))
    }

    pub fn control_change(&self, control: u7, value: u7) -> Result<Vec<u8>> {
        encode(&Message::control_change(self.channel, control, value))
    }

    /// A Control Change on controller 0.
    ///
    /// Together with a subsequent [`bank_select_lsb`](#method.bank_select_lsb), selects one of
    /// 16384 banks.
    pub fn bank_select_msb(&self, value: u7) -> Result<Vec<u8>> {
        self.control_change(Self::BANK_SELECT_MSB, value)
    }

    /// A Control Change on controller 32.
    pub fn bank_select_lsb(&self, value: u7) -> Result<Vec<u8>> {
        self.control_change(Self::BANK_SELECT_LSB, value)
    }

    pub fn program_change(&self, program: u7) -> Result<Vec<u8>> {
        encode(&Message::program_change(self.channel, program))
    }
}
