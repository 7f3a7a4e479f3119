//! Polymorphic object decoding.
//!
//! An object is a 4-byte little-endian identifier followed by the fields of
//! whichever constructor the identifier names. The layout is only known after
//! the identifier has been looked up, so decoding is a single depth-first
//! descent: each population routine reads its fields in order and calls back
//! into [`ObjectReader::read_object`] for nested objects.
//!
//! # Failure
//!
//! Object bodies carry no length prefix. If an identifier is unknown there is
//! no way to find where the object ends, so the whole decode is abandoned
//! rather than skipped. The same applies to every other error: it unwinds
//! through all enclosing reads and no partially populated value escapes.

use std::any::type_name;

use bytes::Bytes;

use crate::{Cursor, ProtocolError, ReaderConfig, Result, TypeRegistry, VECTOR_ID};

/// Decodes objects against a registry.
///
/// Holds the registry, the limits, and the current nesting depth. The cursor
/// is passed in on every call rather than stored, so population routines see
/// the same cursor the caller handed over.
#[derive(Debug)]
pub struct ObjectReader<'r, V> {
    registry: &'r TypeRegistry<V>,
    config: ReaderConfig,
    depth: usize,
}

impl<'r, V> ObjectReader<'r, V> {
    /// Create a reader with default limits.
    pub fn new(registry: &'r TypeRegistry<V>) -> Self {
        Self::with_config(registry, ReaderConfig::default())
    }

    /// Create a reader with explicit limits.
    pub fn with_config(registry: &'r TypeRegistry<V>, config: ReaderConfig) -> Self {
        Self { registry, config, depth: 0 }
    }

    /// Registry used for lookups.
    pub fn registry(&self) -> &'r TypeRegistry<V> {
        self.registry
    }

    /// Active limits.
    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Number of objects currently being populated.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Decode one root object from a fresh buffer.
    ///
    /// The cursor lives only for this call. Trailing bytes after the root
    /// object are ignored.
    pub fn decode(&mut self, buffer: impl Into<Bytes>) -> Result<V> {
        let mut cursor = Cursor::new(buffer);
        self.read_object(&mut cursor)
    }

    /// Read an identifier and the object it introduces.
    pub fn read_object(&mut self, cursor: &mut Cursor) -> Result<V> {
        let id = cursor.read_u32()?;
        self.populate(id, cursor)
    }

    /// Read a nested object and narrow it to the field's declared type.
    ///
    /// A registered constructor of the wrong type fails with
    /// [`ProtocolError::UnexpectedConstructor`].
    pub fn read_typed<T>(&mut self, cursor: &mut Cursor) -> Result<T>
    where
        T: TryFrom<V>,
    {
        let id = cursor.read_u32()?;
        let value = self.populate(id, cursor)?;
        T::try_from(value).map_err(|_| ProtocolError::UnexpectedConstructor {
            expected: short_type_name::<T>(),
            found: id,
        })
    }

    /// Read a boxed vector, decoding each element with `element`.
    ///
    /// The element count is checked against
    /// [`ReaderConfig::max_vector_len`] before anything is allocated.
    pub fn read_vector<T, F>(&mut self, cursor: &mut Cursor, mut element: F) -> Result<Vec<T>>
    where
        F: FnMut(&mut Cursor, &mut Self) -> Result<T>,
    {
        let id = cursor.read_u32()?;
        if id != VECTOR_ID {
            return Err(ProtocolError::UnexpectedConstructor { expected: "Vector", found: id });
        }

        let count = cursor.read_i32()?;
        let len = usize::try_from(count).map_err(|_| ProtocolError::NegativeLength(count))?;
        if len > self.config.max_vector_len {
            return Err(ProtocolError::VectorTooLong { len, limit: self.config.max_vector_len });
        }

        let mut items = Vec::with_capacity(vector_capacity(len, cursor.remaining()));
        for _ in 0..len {
            items.push(element(cursor, self)?);
        }

        Ok(items)
    }

    /// Read a boxed vector of objects.
    pub fn read_object_vector(&mut self, cursor: &mut Cursor) -> Result<Vec<V>> {
        self.read_vector(cursor, |cursor, objects| objects.read_object(cursor))
    }

    /// Read a boxed vector of objects of one declared type.
    pub fn read_typed_vector<T>(&mut self, cursor: &mut Cursor) -> Result<Vec<T>>
    where
        T: TryFrom<V>,
    {
        self.read_vector(cursor, |cursor, objects| objects.read_typed(cursor))
    }

    fn populate(&mut self, id: u32, cursor: &mut Cursor) -> Result<V> {
        let Some(entry) = self.registry.lookup(id) else {
            tracing::debug!(
                id = format_args!("{id:#010x}"),
                position = cursor.tell(),
                depth = self.depth,
                "unknown type identifier, aborting decode"
            );
            return Err(ProtocolError::UnknownTypeIdentifier(id));
        };

        if self.depth > self.config.max_depth {
            tracing::debug!(
                name = entry.name,
                limit = self.config.max_depth,
                "object nesting limit reached"
            );
            return Err(ProtocolError::DepthLimitExceeded { limit: self.config.max_depth });
        }

        tracing::trace!(
            id = format_args!("{id:#010x}"),
            name = entry.name,
            depth = self.depth,
            "decoding object"
        );

        let populate = entry.populate;
        self.depth += 1;
        let result = populate(cursor, self);
        self.depth -= 1;
        result
    }
}

/// Slots to reserve for a `len`-element vector.
///
/// Every element is at least 4 bytes on the wire, so a count larger than
/// `remaining / 4` is bound to underrun before the slots are used.
fn vector_capacity(len: usize, remaining: usize) -> usize {
    len.min(remaining / MIN_ELEMENT_LEN)
}

const MIN_ELEMENT_LEN: usize = 4;

fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
