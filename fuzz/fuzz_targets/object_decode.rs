//! Arbitrary input to the schema object decoder.
//!
//! Must never panic. Anything that decodes must survive an encode and decode
//! cycle unchanged.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tlwire_schema::{decode, encode};

fuzz_target!(|data: &[u8]| {
    if let Ok(object) = decode(data.to_vec()) {
        let bytes = encode(&object).expect("decoded objects re-encode");
        assert_eq!(decode(bytes), Ok(object));
    }
});
