//! Identifier to constructor mapping.
//!
//! The registry is populated once, outside the decoder, by whatever owns the
//! schema. During decoding it is only read, so one registry can serve any
//! number of concurrent decode sessions.

use std::{collections::HashMap, fmt};

use crate::{Cursor, ObjectReader, ProtocolError, Result};

/// Field-population routine for one constructor.
///
/// Reads the constructor's fields in layout order and builds the variant.
/// The identifier has already been consumed when this runs.
pub type PopulateFn<V> = fn(&mut Cursor, &mut ObjectReader<'_, V>) -> Result<V>;

/// A schema type that can be installed in a [`TypeRegistry`].
///
/// `V` is the registry's variant set. Implementors produce themselves and
/// convert into it.
pub trait Constructor<V>: Sized + Into<V> {
    /// Wire identifier
    const ID: u32;

    /// Schema name, for logs and errors
    const NAME: &'static str;

    /// Read this constructor's fields.
    fn populate(cursor: &mut Cursor, objects: &mut ObjectReader<'_, V>) -> Result<Self>;
}

/// A registered constructor.
pub struct RegistryEntry<V> {
    /// Wire identifier
    pub id: u32,
    /// Schema name
    pub name: &'static str,
    /// Field-population routine
    pub populate: PopulateFn<V>,
}

impl<V> Clone for RegistryEntry<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for RegistryEntry<V> {}

impl<V> fmt::Debug for RegistryEntry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("id", &format_args!("{:#010x}", self.id))
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Read-only lookup table from identifier to constructor.
pub struct TypeRegistry<V> {
    entries: HashMap<u32, RegistryEntry<V>>,
}

impl<V> TypeRegistry<V> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Install a [`Constructor`].
    pub fn register<T: Constructor<V>>(&mut self) -> Result<()> {
        self.register_fn(T::ID, T::NAME, populate_into::<V, T>)
    }

    /// Install a raw population routine.
    ///
    /// Fails if `id` is already taken; an identifier maps to exactly one
    /// layout.
    pub fn register_fn(
        &mut self,
        id: u32,
        name: &'static str,
        populate: PopulateFn<V>,
    ) -> Result<()> {
        if self.entries.contains_key(&id) {
            return Err(ProtocolError::DuplicateConstructor { id });
        }

        self.entries.insert(id, RegistryEntry { id, name, populate });
        Ok(())
    }

    /// Find the constructor for `id`.
    pub fn lookup(&self, id: u32) -> Option<&RegistryEntry<V>> {
        self.entries.get(&id)
    }

    /// Whether `id` is registered.
    pub fn contains(&self, id: u32) -> bool {
        self.entries.contains_key(&id)
    }

    /// Number of registered constructors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered identifiers, in no particular order.
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }
}

impl<V> Default for TypeRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for TypeRegistry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry").field("len", &self.entries.len()).finish()
    }
}

fn populate_into<V, T: Constructor<V>>(
    cursor: &mut Cursor,
    objects: &mut ObjectReader<'_, V>,
) -> Result<V> {
    T::populate(cursor, objects).map(Into::into)
}
