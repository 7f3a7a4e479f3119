//! Decoder for the TL binary wire format.
//!
//! Every value on the wire is one of three things: a fixed-width little-endian
//! primitive, a length-prefixed byte-string padded to a 4-byte boundary, or an
//! object introduced by a 4-byte constructor identifier. There is no schema
//! negotiation. The identifier is looked up in a [`TypeRegistry`] and the
//! registered routine reads the fields that follow.
//!
//! Decoding is layered:
//!
//! - [`Cursor`]: owns the buffer and position, reads primitives
//! - [`bytestring`]: short/long form byte-strings and text
//! - [`ObjectReader`]: identifier dispatch and recursion
//!
//! A [`Writer`] produces the same format. It exists for fixtures and tests;
//! nothing in the decoding path depends on it.
//!
//! # Failure
//!
//! Object bodies carry no length, so an unknown identifier leaves the stream
//! unsynchronized. Every error aborts the whole decode and no partially
//! populated value is ever returned.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bytestring;
pub mod config;
pub mod cursor;
pub mod errors;
pub mod object;
pub mod registry;
pub mod writer;

pub use config::ReaderConfig;
pub use cursor::{Cursor, LargeInt};
pub use errors::{ProtocolError, Result};
pub use object::ObjectReader;
pub use registry::{Constructor, PopulateFn, RegistryEntry, TypeRegistry};
pub use writer::{Serializable, Writer};

/// Identifier of the boxed `boolTrue` constructor.
pub const BOOL_TRUE_ID: u32 = 0x9972_75b5;

/// Identifier of the boxed `boolFalse` constructor.
pub const BOOL_FALSE_ID: u32 = 0xbc79_9737;

/// Identifier of the boxed `vector` constructor.
pub const VECTOR_ID: u32 = 0x1cb5_c415;
