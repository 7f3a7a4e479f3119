//! Length-prefixed byte-strings.
//!
//! # Encoding
//!
//! ```text
//! short (len <= 253):  len:u8 | data[len] | pad to 4-byte total
//! long  (len >= 254):  0xFE | len:u24le | data[len] | pad so len % 4 == 0
//! ```
//!
//! In the short form the prefix byte counts toward alignment, so the padding
//! need is `(len + 1) % 4`. The long form prefix is already 4 bytes, so the
//! need is `len % 4`. The two formulas are not interchangeable. Padding bytes
//! are skipped without inspection.

use bytes::Bytes;

use crate::{Cursor, Result};

/// First byte marking the long form
pub const LONG_FORM_MARKER: u8 = 254;

/// Largest payload the 24-bit long form length can describe
pub const MAX_BYTE_STRING_LEN: usize = (1 << 24) - 1;

impl Cursor {
    /// Read a length-prefixed, padded byte-string.
    pub fn read_bytes(&mut self) -> Result<Bytes> {
        let first = self.read_byte()?;
        let (length, padding_need) = if first == LONG_FORM_MARKER {
            let [b0, b1, b2] = self.read_array::<3>()?;
            let length = usize::from(b0) | usize::from(b1) << 8 | usize::from(b2) << 16;
            (length, length % 4)
        } else {
            let length = usize::from(first);
            (length, (length + 1) % 4)
        };

        let data = self.read(length)?;
        if padding_need > 0 {
            self.read(4 - padding_need)?;
        }

        Ok(data)
    }

    /// Read a length-prefixed byte-string and decode it as UTF-8.
    pub fn read_string(&mut self) -> Result<String> {
        let data = self.read_bytes()?;
        let text = std::str::from_utf8(&data)?;
        Ok(text.to_owned())
    }
}

/// Bytes a byte-string of `len` payload bytes occupies on the wire.
pub fn encoded_len(len: usize) -> usize {
    let (prefix, padding_need) =
        if len < usize::from(LONG_FORM_MARKER) { (1, (len + 1) % 4) } else { (4, len % 4) };
    let padding = if padding_need > 0 { 4 - padding_need } else { 0 };
    prefix + len + padding
}

#[cfg(test)]
mod tests {
    use hex_literal::hex;

    use super::*;
    use crate::ProtocolError;

    #[test]
    fn short_form_with_padding() {
        let mut cursor = Cursor::from_slice(&hex!("02 41 42 00"));
        assert_eq!(cursor.read_bytes().unwrap().as_ref(), b"AB");
        assert_eq!(cursor.tell(), 4);
    }

    #[test]
    fn short_form_without_padding() {
        let mut cursor = Cursor::from_slice(&hex!("03 61 62 63 ff"));
        assert_eq!(cursor.read_bytes().unwrap().as_ref(), b"abc");
        assert_eq!(cursor.tell(), 4);
    }

    #[test]
    fn empty_short_form_pads_three() {
        let mut cursor = Cursor::from_slice(&hex!("00 00 00 00"));
        assert!(cursor.read_bytes().unwrap().is_empty());
        assert_eq!(cursor.tell(), 4);
    }

    #[test]
    fn long_form_aligned() {
        let mut data = hex!("fe 2c 01 00").to_vec();
        data.extend((0..300u32).map(|i| i as u8));

        let mut cursor = Cursor::new(data);
        let payload = cursor.read_bytes().unwrap();
        assert_eq!(payload.len(), 300);
        assert_eq!(payload[299], (299u32 % 256) as u8);
        assert_eq!(cursor.tell(), 4 + 300);
    }

    #[test]
    fn long_form_padded() {
        let mut data = hex!("fe ff 00 00").to_vec();
        data.extend(std::iter::repeat_n(0x55, 255));
        data.push(0);

        let mut cursor = Cursor::new(data);
        assert_eq!(cursor.read_bytes().unwrap().len(), 255);
        assert_eq!(cursor.tell(), 260);
    }

    #[test]
    fn long_form_max_length() {
        let mut data = hex!("fe ff ff ff").to_vec();
        data.resize(4 + MAX_BYTE_STRING_LEN + 1, 0x33);

        let mut cursor = Cursor::new(data);
        let payload = cursor.read_bytes().unwrap();
        assert_eq!(payload.len(), MAX_BYTE_STRING_LEN);
        assert_eq!(cursor.tell(), 4 + MAX_BYTE_STRING_LEN + 1);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn long_form_uses_all_three_length_bytes() {
        let len = 0x01_02_03;
        let mut data = hex!("fe 03 02 01").to_vec();
        data.extend((0..len).map(|i| (i % 251) as u8));
        data.push(0);

        let mut cursor = Cursor::new(data);
        let payload = cursor.read_bytes().unwrap();
        assert_eq!(payload.len(), len);
        assert_eq!(payload[len - 1], ((len - 1) % 251) as u8);
        // 0x010203 % 4 == 3, one filler byte
        assert_eq!(cursor.tell(), 4 + len + 1);
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn short_length_255_is_not_a_marker() {
        let mut data = vec![0xff];
        data.extend(std::iter::repeat_n(0x61, 255));
        data.extend_from_slice(&hex!("de ad"));

        let mut cursor = Cursor::new(data);
        assert_eq!(cursor.read_bytes().unwrap().len(), 255);
        assert_eq!(cursor.tell(), 256);
        assert_eq!(cursor.remaining(), 2);
    }

    #[test]
    fn non_canonical_long_form_accepted() {
        let mut cursor = Cursor::from_slice(&hex!("fe 02 00 00 41 42 00 00"));
        assert_eq!(cursor.read_bytes().unwrap().as_ref(), b"AB");
        // long form pads by len % 4, not (len + 1) % 4
        assert_eq!(cursor.tell(), 8);
    }

    #[test]
    fn missing_padding_is_underrun() {
        let mut cursor = Cursor::from_slice(&hex!("02 41 42"));
        assert_eq!(
            cursor.read_bytes(),
            Err(ProtocolError::BufferUnderrun { needed: 1, remaining: 0 })
        );
    }

    #[test]
    fn truncated_payload_is_underrun() {
        let mut cursor = Cursor::from_slice(&hex!("08 41 42"));
        assert!(matches!(cursor.read_bytes(), Err(ProtocolError::BufferUnderrun { .. })));

        let mut cursor = Cursor::from_slice(&hex!("fe 2c"));
        assert!(matches!(cursor.read_bytes(), Err(ProtocolError::BufferUnderrun { .. })));
    }

    #[test]
    fn string_rejects_invalid_utf8() {
        let mut cursor = Cursor::from_slice(&hex!("02 c3 28 00"));
        assert!(matches!(cursor.read_string(), Err(ProtocolError::InvalidEncoding(_))));
    }

    #[test]
    fn string_decodes_utf8() {
        let mut cursor = Cursor::from_slice(&hex!("06 68 c3 a9 6c 6c 6f 00"));
        assert_eq!(cursor.read_string().unwrap(), "héllo");
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn encoded_len_matches_both_forms() {
        assert_eq!(encoded_len(0), 4);
        assert_eq!(encoded_len(2), 4);
        assert_eq!(encoded_len(3), 4);
        assert_eq!(encoded_len(4), 8);
        assert_eq!(encoded_len(253), 256);
        assert_eq!(encoded_len(254), 260);
        assert_eq!(encoded_len(300), 304);
    }
}
