//! Arbitrary input to the byte-string reader.
//!
//! Both forms pad the record to a multiple of 4, including non-canonical
//! long-form encodings of short payloads.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tlwire_proto::Cursor;

fuzz_target!(|data: &[u8]| {
    let mut cursor = Cursor::from_slice(data);
    if let Ok(payload) = cursor.read_bytes() {
        assert_eq!(cursor.tell() % 4, 0);
        assert!(cursor.tell() >= payload.len() + 1);
        assert!(cursor.tell() <= data.len());
    }
});
