//! Provides abstractions over writers, allowing serializers to target growable vectors, fixed
//! buffers and plain byte counters alike.
//!
//! The [`Write`](trait.Write.html) trait is object safe, so serializers take a `&mut dyn Write`.

use crate::prelude::*;

/// A destination for serialized MIDI bytes.
pub trait Write {
    /// Write all of the given bytes, or fail without a partial write being meaningful.
    fn write_all(&mut self, buf: &[u8]) -> Result<()>;
}

impl Write for Vec<u8> {
    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.extend_from_slice(buf);
        Ok(())
    }
}

/// Writes into a fixed-size buffer, starting at an arbitrary offset.
///
/// Writing past the end of the buffer fails with `Error::OutOfSpace`.
#[derive(Debug)]
pub struct Cursor<'a> {
    buf: &'a mut [u8],
    cur: usize,
}
impl<'a> Cursor<'a> {
    /// Create a cursor at the given offset of the buffer.
    ///
    /// Fails if the offset lies beyond the end of the buffer.
    #[inline]
    pub fn from_parts(buf: &'a mut [u8], cur: usize) -> Result<Cursor<'a>> {
        ensure!(
            cur <= buf.len(),
            Error::OutOfSpace {
                offset: cur,
                needed: 0,
                len: buf.len(),
            }
        );
        Ok(Cursor { buf, cur })
    }

    /// The offset at which the next byte will be written.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cur
    }
}
impl Write for Cursor<'_> {
    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        //Cannot overflow because `cur <= buf.len()` is always true.
        let up_to = self.cur + buf.len();
        ensure!(
            up_to <= self.buf.len(),
            Error::OutOfSpace {
                offset: self.cur,
                needed: buf.len(),
                len: self.buf.len(),
            }
        );
        self.buf[self.cur..up_to].copy_from_slice(buf);
        self.cur = up_to;
        Ok(())
    }
}

/// Counts the bytes written to it, without storing them.
///
/// Used to size output buffers exactly before serializing into them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteCounter(pub usize);
impl Write for WriteCounter {
    #[inline]
    fn write_all(&mut self, buf: &[u8]) -> Result<()> {
        self.0 += buf.len();
        Ok(())
    }
}
