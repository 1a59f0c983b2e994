//! Simple building-block data that can be read in one go.
//! All reads are bounds-checked against the supplied buffer and take an explicit offset.

use crate::{error::malformed, prelude::*};

/// Read a single byte at `offset`.
#[inline]
pub(crate) fn read_u8(raw: &[u8], offset: usize) -> Result<u8> {
    raw.get(offset).copied().ok_or(Error::Truncated {
        offset,
        needed: 1,
        len: raw.len(),
    })
}

/// Read a run of `len` bytes starting at `offset`.
#[inline]
pub(crate) fn read_data(raw: &[u8], offset: usize, len: usize) -> Result<&[u8]> {
    offset
        .checked_add(len)
        .and_then(|end| raw.get(offset..end))
        .ok_or(Error::Truncated {
            offset,
            needed: len,
            len: raw.len(),
        })
}

/// Read a single data byte at `offset`.
///
/// Data bytes with the top bit set are uncompliant: they are masked down to 7 bits, unless the
/// `strict` feature is enabled.
#[inline]
pub(crate) fn read_u7(raw: &[u8], offset: usize) -> Result<u7> {
    let byte = read_u8(raw, offset)?;
    if bit_range(byte, 7..8) != 0 {
        malformed(offset, "data byte with top bit set")?;
    }
    Ok(u7::from(byte))
}

/// Slightly restricted integers.
macro_rules! restricted_int {
    {$(#[$attr:meta])* $name:ident : $inner:tt => $bits:expr} => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
        #[repr(transparent)]
        #[allow(non_camel_case_types)]
        pub struct $name($inner);
        impl From<$inner> for $name {
            /// Lossy conversion, loses top bits.
            #[inline]
            fn from(raw: $inner) -> $name {
                $name::from_int_lossy(raw)
            }
        }
        impl From<$name> for $inner {
            #[inline]
            fn from(restricted: $name) -> $inner {restricted.0}
        }
        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
        impl $name {
            const MASK: $inner = (1 << $bits) - 1;

            /// The maximum value that this restricted integer can hold.
            #[inline]
            pub const fn max_value() -> $name {
                $name (Self::MASK)
            }

            /// Creates a restricted int from its non-restricted counterpart by masking off the
            /// extra bits.
            #[inline]
            pub const fn new(raw: $inner) -> $name {
                $name (raw & Self::MASK)
            }

            /// Creates a restricted int from its non-restricted counterpart by masking off the
            /// extra bits.
            #[inline]
            pub const fn from_int_lossy(raw: $inner) -> $name {
                $name (raw & Self::MASK)
            }

            /// Returns `Some` if the raw integer is within range of the restricted integer, and
            /// `None` otherwise.
            #[inline]
            pub fn try_from(raw: $inner) -> Option<$name> {
                if raw <= Self::MASK {
                    Some($name(raw))
                }else{
                    None
                }
            }

            /// Get the inner integer out of the wrapper.
            /// The inner integer is guaranteed to be in range of the restricted wrapper.
            #[inline]
            pub const fn as_int(self) -> $inner {
                self.0
            }
        }
        impl PartialEq<$inner> for $name {
            fn eq(&self, rhs: &$inner) -> bool {
                self.as_int() == *rhs
            }
        }
        impl PartialOrd<$inner> for $name {
            fn partial_cmp(&self, rhs: &$inner) -> Option<std::cmp::Ordering> {
                Some(self.as_int().cmp(rhs))
            }
        }
        impl PartialEq<$name> for $inner {
            fn eq(&self, rhs: &$name) -> bool {
                *self == rhs.as_int()
            }
        }
        impl PartialOrd<$name> for $inner {
            fn partial_cmp(&self, rhs: &$name) -> Option<std::cmp::Ordering> {
                Some(self.cmp(&rhs.as_int()))
            }
        }
    };
}
restricted_int! {
    /// A 14-bit integer type.
    ///
    /// Wraps the `u16` type and ensures that the top two bits are always zero.
    u14: u16 => 14
}
restricted_int! {
    /// A 7-bit integer type, the range of every MIDI data byte.
    ///
    /// Wraps the `u8` type and ensures that the top bit is always zero.
    u7: u8 => 7
}
restricted_int! {
    /// A 4-bit integer type, the range of the channel nibble of a status byte.
    ///
    /// Wraps the `u8` type and ensures that the top 4 bits are always zero.
    u4: u8 => 4
}
restricted_int! {
    /// Referred to in the MIDI standard as "variable length quantity".
    ///
    /// Wraps the `u32` type and ensures that the top 4 bits are always zero.
    u28: u32 => 28
}

/// Read a variable-length quantity starting at `offset`.
///
/// Returns the decoded value along with the amount of bytes consumed.
/// Each byte contributes its bottom 7 bits, most significant group first, and the first byte
/// with the top bit clear terminates the quantity.
///
/// Fails with `Error::VlqOverflow` if no terminator is found within 4 bytes, and with
/// `Error::Truncated` if the buffer ends before the terminator.
pub fn read_vlq(raw: &[u8], offset: usize) -> Result<(u28, usize)> {
    let mut int: u32 = 0;
    for i in 0..4 {
        let byte = read_u8(raw, offset + i)?;
        int <<= 7;
        int |= bit_range(byte, 0..7) as u32;
        if bit_range(byte, 7..8) == 0 {
            //Since we did at max 4 reads of 7 bits each, there MUST be at max 28 bits in this int
            return Ok((u28::from(int), i + 1));
        }
    }
    Err(Error::VlqOverflow { offset })
}

/// Write a variable-length quantity, using as few bytes as possible.
pub fn write_vlq(value: u28, out: &mut dyn Write) -> Result<()> {
    let int = value.as_int();
    let mut skipping = true;
    for i in (0..4).rev() {
        let byte = ((int >> (i * 7)) & 0x7F) as u8;
        if skipping && byte == 0 && i != 0 {
            //Skip these leading zeros
        } else {
            skipping = false;
            let byte = if i == 0 {
                //Last byte
                byte
            } else {
                //Leading byte
                byte | 0x80
            };
            out.write_all(&[byte])?;
        }
    }
    Ok(())
}

/// The amount of bytes `write_vlq` produces for the given value.
#[inline]
pub fn vlq_len(value: u28) -> usize {
    match value.as_int() {
        0..=0x7F => 1,
        0x80..=0x3FFF => 2,
        0x4000..=0x1F_FFFF => 3,
        _ => 4,
    }
}
