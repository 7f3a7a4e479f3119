//! Read position over a fixed buffer, and the fixed-width primitive reads.
//!
//! [`Cursor`] is the only type that touches raw bytes. Every other read in
//! the crate goes through [`Cursor::read`] or [`Cursor::read_array`], which
//! either return exactly the requested bytes or fail without moving.
//!
//! All multi-byte values are little-endian regardless of host byte order.

use std::fmt;

use bytes::Bytes;

use crate::{BOOL_FALSE_ID, BOOL_TRUE_ID, ProtocolError, Result};

/// Read cursor over one decode session's buffer.
///
/// Invariant: `0 <= position <= buffer.len()`.
///
/// A cursor is exclusively owned by the call path doing the decode. Nested
/// object reads borrow it mutably in turn, so there is never more than one
/// read in flight. The buffer is released when the cursor is dropped, which
/// covers early returns on error.
#[derive(Debug, Clone)]
pub struct Cursor {
    buffer: Bytes,
    position: usize,
}

impl Cursor {
    /// Create a cursor at position 0.
    pub fn new(buffer: impl Into<Bytes>) -> Self {
        Self { buffer: buffer.into(), position: 0 }
    }

    /// Create a cursor over a copy of `data`.
    pub fn from_slice(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    /// Read exactly `n` bytes.
    ///
    /// The returned bytes share the cursor's buffer. On underrun the position
    /// is left where it was.
    pub fn read(&mut self, n: usize) -> Result<Bytes> {
        let end = self.claim(n)?;
        let out = self.buffer.slice(self.position..end);
        self.position = end;
        Ok(out)
    }

    /// Read exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let end = self.claim(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.buffer[self.position..end]);
        self.position = end;
        Ok(out)
    }

    /// Read a single byte.
    pub fn read_byte(&mut self) -> Result<u8> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    /// Read a signed 32-bit integer.
    pub fn read_i32(&mut self) -> Result<i32> {
        self.read_array().map(i32::from_le_bytes)
    }

    /// Read an unsigned 32-bit integer.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    /// Read a signed 64-bit integer.
    pub fn read_i64(&mut self) -> Result<i64> {
        self.read_array().map(i64::from_le_bytes)
    }

    /// Read an unsigned 64-bit integer.
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_array().map(u64::from_le_bytes)
    }

    /// Read a 32-bit IEEE-754 float.
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_array().map(f32::from_le_bytes)
    }

    /// Read a 64-bit IEEE-754 double.
    pub fn read_f64(&mut self) -> Result<f64> {
        self.read_array().map(f64::from_le_bytes)
    }

    /// Read a 128-bit value as its raw little-endian bytes.
    pub fn read_int128(&mut self) -> Result<[u8; 16]> {
        self.read_array()
    }

    /// Read a 256-bit value as its raw little-endian bytes.
    pub fn read_int256(&mut self) -> Result<[u8; 32]> {
        self.read_array()
    }

    /// Read a `bits`-wide integer.
    ///
    /// `bits` must be a positive multiple of 8. `signed` selects two's
    /// complement interpretation for the narrowing accessors on [`LargeInt`].
    pub fn read_large_int(&mut self, bits: usize, signed: bool) -> Result<LargeInt> {
        if bits == 0 || bits % 8 != 0 {
            return Err(ProtocolError::InvalidIntegerWidth(bits));
        }

        let bytes = self.read(bits / 8)?;
        Ok(LargeInt { bytes: bytes.to_vec(), signed })
    }

    /// Read a boxed `Bool`.
    ///
    /// Booleans travel as one of two constructor identifiers rather than as a
    /// byte.
    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_u32()? {
            BOOL_TRUE_ID => Ok(true),
            BOOL_FALSE_ID => Ok(false),
            found => Err(ProtocolError::UnexpectedConstructor { expected: "Bool", found }),
        }
    }

    /// Current position.
    pub fn tell(&self) -> usize {
        self.position
    }

    /// Move the position by a signed delta.
    pub fn seek(&mut self, offset: i64) -> Result<()> {
        let target = (self.position as i64).saturating_add(offset);
        if target < 0 || target as u64 > self.buffer.len() as u64 {
            return Err(ProtocolError::PositionOutOfBounds {
                position: target,
                len: self.buffer.len(),
            });
        }

        self.position = target as usize;
        Ok(())
    }

    /// Move the position to an absolute offset.
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position > self.buffer.len() {
            return Err(ProtocolError::PositionOutOfBounds {
                position: position as i64,
                len: self.buffer.len(),
            });
        }

        self.position = position;
        Ok(())
    }

    /// Bytes left between the position and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Whether every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// The whole underlying buffer, independent of position.
    pub fn get_bytes(&self) -> &Bytes {
        &self.buffer
    }

    /// Release the cursor and hand back its buffer.
    pub fn into_inner(self) -> Bytes {
        self.buffer
    }

    /// End offset of an `n`-byte read, or underrun.
    fn claim(&self, n: usize) -> Result<usize> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(ProtocolError::BufferUnderrun { needed: n, remaining });
        }

        Ok(self.position + n)
    }
}

/// Integer wider than the native types, kept as little-endian bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LargeInt {
    bytes: Vec<u8>,
    signed: bool,
}

impl LargeInt {
    /// Wrap little-endian bytes.
    pub fn from_le_bytes(bytes: impl Into<Vec<u8>>, signed: bool) -> Self {
        Self { bytes: bytes.into(), signed }
    }

    /// Little-endian bytes as read from the wire.
    pub fn as_le_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Width in bits.
    pub fn bits(&self) -> usize {
        self.bytes.len() * 8
    }

    /// Whether the value is interpreted as two's complement.
    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Whether the value is below zero.
    pub fn is_negative(&self) -> bool {
        self.signed && self.bytes.last().is_some_and(|b| b & 0x80 != 0)
    }

    /// Narrow to `i128`, if the value fits.
    pub fn to_i128(&self) -> Option<i128> {
        let fill = if self.is_negative() { 0xff } else { 0x00 };
        let buf = self.widen(fill)?;
        let value = i128::from_le_bytes(buf);

        // Sign of the narrowed value must survive truncation
        if (value < 0) != self.is_negative() {
            return None;
        }
        Some(value)
    }

    /// Narrow to `u128`, if the value fits.
    pub fn to_u128(&self) -> Option<u128> {
        if self.is_negative() {
            return None;
        }
        self.widen(0x00).map(u128::from_le_bytes)
    }

    /// Copy into 16 bytes padded with `fill`; `None` if any dropped byte
    /// differs from `fill`.
    fn widen(&self, fill: u8) -> Option<[u8; 16]> {
        let mut buf = [fill; 16];
        for (i, &b) in self.bytes.iter().enumerate() {
            match buf.get_mut(i) {
                Some(slot) => *slot = b,
                None if b == fill => {},
                None => return None,
            }
        }
        Some(buf)
    }
}

impl fmt::Display for LargeInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let big_endian: Vec<u8> = self.bytes.iter().rev().copied().collect();
        write!(f, "0x{}", hex::encode(big_endian))
    }
}
