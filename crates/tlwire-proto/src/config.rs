//! Decoder limits.

/// Limits applied while decoding objects.
///
/// The wire format itself bounds nothing beyond the buffer length, so these
/// keep hostile input from recursing or allocating without limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Maximum nesting of objects below the root
    pub max_depth: usize,
    /// Maximum element count accepted for a vector
    pub max_vector_len: usize,
}

impl ReaderConfig {
    /// Default nesting limit
    pub const DEFAULT_MAX_DEPTH: usize = 64;

    /// Default vector length limit
    pub const DEFAULT_MAX_VECTOR_LEN: usize = 1 << 20;
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            max_vector_len: Self::DEFAULT_MAX_VECTOR_LEN,
        }
    }
}
