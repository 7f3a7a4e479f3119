//! Error types for wire decoding.

use std::str::Utf8Error;

use thiserror::Error;

/// Result alias for decoding operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors produced while reading or writing the wire format.
///
/// None of these are recoverable mid-stream. After any error the cursor
/// position is unspecified and the in-progress value tree must be discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Fewer bytes remain than the read requires
    #[error("buffer underrun: need {needed} bytes, {remaining} remaining")]
    BufferUnderrun {
        /// Bytes the read asked for
        needed: usize,
        /// Bytes left between position and end of buffer
        remaining: usize,
    },

    /// Constructor identifier has no registry entry
    #[error("unknown type identifier {0:#010x}")]
    UnknownTypeIdentifier(u32),

    /// Byte-string payload is not valid UTF-8
    #[error("invalid utf-8 in string payload: {0}")]
    InvalidEncoding(#[from] Utf8Error),

    /// A known identifier appeared where a different type was required
    #[error("expected {expected}, found constructor {found:#010x}")]
    UnexpectedConstructor {
        /// Name of the type the field was declared as
        expected: &'static str,
        /// Identifier actually read
        found: u32,
    },

    /// Objects nested deeper than the configured limit
    #[error("object nesting exceeds depth limit of {limit}")]
    DepthLimitExceeded {
        /// Configured maximum depth
        limit: usize,
    },

    /// Vector count above the configured limit
    #[error("vector of {len} elements exceeds limit of {limit}")]
    VectorTooLong {
        /// Count read from the wire
        len: usize,
        /// Configured maximum
        limit: usize,
    },

    /// Vector count was negative
    #[error("negative vector length: {0}")]
    NegativeLength(i32),

    /// Seek target outside the buffer
    #[error("position {position} outside buffer of {len} bytes")]
    PositionOutOfBounds {
        /// Requested absolute position
        position: i64,
        /// Buffer length
        len: usize,
    },

    /// Large integer width is zero or not a whole number of bytes
    #[error("invalid integer width: {0} bits")]
    InvalidIntegerWidth(usize),

    /// Byte-string too long for the 24-bit long form
    #[error("byte-string of {size} bytes exceeds maximum of {max}")]
    PayloadTooLarge {
        /// Payload length
        size: usize,
        /// Largest encodable length
        max: usize,
    },

    /// Vector has more elements than the signed 32-bit count can hold
    #[error("vector of {len} elements exceeds the 32-bit count field")]
    VectorCountOverflow {
        /// Number of elements given to the writer
        len: usize,
    },

    /// Two constructors registered under the same identifier
    #[error("constructor {id:#010x} registered twice")]
    DuplicateConstructor {
        /// Conflicting identifier
        id: u32,
    },
}
