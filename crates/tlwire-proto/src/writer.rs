//! Encoder for the same wire format.
//!
//! The decoder never needs this. It is here so fixtures and property tests
//! can produce buffers with the exact same rules the reader expects: short
//! form below 254 bytes, long form from 254 on, zero-filled padding.

use bytes::{BufMut, Bytes, BytesMut};

use crate::{
    BOOL_FALSE_ID, BOOL_TRUE_ID, LargeInt, ProtocolError, Result, VECTOR_ID,
    bytestring::{LONG_FORM_MARKER, MAX_BYTE_STRING_LEN},
};

/// A value that knows how to write itself, identifier included.
pub trait Serializable {
    /// Append the wire form of `self`.
    fn serialize(&self, writer: &mut Writer) -> Result<()>;
}

/// Growable output buffer.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: BytesMut,
}

impl Writer {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with preallocated space.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { buf: BytesMut::with_capacity(capacity) }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Finish and return the buffer.
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }

    /// Append bytes with no prefix or padding.
    pub fn write_raw(&mut self, data: &[u8]) {
        self.buf.put_slice(data);
    }

    /// Append one byte.
    pub fn write_byte(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    /// Append a signed 32-bit integer.
    pub fn write_i32(&mut self, value: i32) {
        self.buf.put_i32_le(value);
    }

    /// Append an unsigned 32-bit integer.
    pub fn write_u32(&mut self, value: u32) {
        self.buf.put_u32_le(value);
    }

    /// Append a signed 64-bit integer.
    pub fn write_i64(&mut self, value: i64) {
        self.buf.put_i64_le(value);
    }

    /// Append an unsigned 64-bit integer.
    pub fn write_u64(&mut self, value: u64) {
        self.buf.put_u64_le(value);
    }

    /// Append a 32-bit float.
    pub fn write_f32(&mut self, value: f32) {
        self.buf.put_f32_le(value);
    }

    /// Append a 64-bit double.
    pub fn write_f64(&mut self, value: f64) {
        self.buf.put_f64_le(value);
    }

    /// Append a 128-bit value given as little-endian bytes.
    pub fn write_int128(&mut self, value: &[u8; 16]) {
        self.buf.put_slice(value);
    }

    /// Append a 256-bit value given as little-endian bytes.
    pub fn write_int256(&mut self, value: &[u8; 32]) {
        self.buf.put_slice(value);
    }

    /// Append a large integer at its own width.
    pub fn write_large_int(&mut self, value: &LargeInt) {
        self.buf.put_slice(value.as_le_bytes());
    }

    /// Append a boxed `Bool`.
    pub fn write_bool(&mut self, value: bool) {
        self.write_u32(if value { BOOL_TRUE_ID } else { BOOL_FALSE_ID });
    }

    /// Append a length-prefixed, padded byte-string.
    pub fn write_bytes(&mut self, data: &[u8]) -> Result<()> {
        let len = data.len();
        let padding_need = if len < usize::from(LONG_FORM_MARKER) {
            self.buf.put_u8(len as u8);
            (len + 1) % 4
        } else if len <= MAX_BYTE_STRING_LEN {
            self.buf.put_u8(LONG_FORM_MARKER);
            self.buf.put_uint_le(len as u64, 3);
            len % 4
        } else {
            return Err(ProtocolError::PayloadTooLarge { size: len, max: MAX_BYTE_STRING_LEN });
        };

        self.buf.put_slice(data);
        if padding_need > 0 {
            self.buf.put_bytes(0, 4 - padding_need);
        }

        Ok(())
    }

    /// Append a UTF-8 string as a byte-string.
    pub fn write_string(&mut self, value: &str) -> Result<()> {
        self.write_bytes(value.as_bytes())
    }

    /// Append a boxed vector, writing each element with `element`.
    pub fn write_vector<T, F>(&mut self, items: &[T], mut element: F) -> Result<()>
    where
        F: FnMut(&mut Self, &T) -> Result<()>,
    {
        let count = i32::try_from(items.len())
            .map_err(|_| ProtocolError::VectorCountOverflow { len: items.len() })?;

        self.write_u32(VECTOR_ID);
        self.write_i32(count);
        for item in items {
            element(self, item)?;
        }

        Ok(())
    }

    /// Append a [`Serializable`] value.
    pub fn write_object<T: Serializable + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.serialize(self)
    }
}
