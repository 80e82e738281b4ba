//! Specialized collection types

pub use slotmap::{DefaultKey, SlotMap};

/// Typed handle for type-safe references into externally owned pools
///
/// The engine core never parses asset data; meshes, materials, and sounds
/// are referenced through these opaque, copyable handles and resolved by
/// whichever external system owns the pool.
pub struct TypedHandle<T> {
    key: DefaultKey,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> TypedHandle<T> {
    /// Create a new typed handle from a pool key
    pub fn new(key: DefaultKey) -> Self {
        Self {
            key,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Get the underlying pool key
    pub fn key(&self) -> DefaultKey {
        self.key
    }
}

// Manual impls: derives would bound T, but the phantom parameter carries no
// data.
impl<T> std::fmt::Debug for TypedHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("TypedHandle").field(&self.key).finish()
    }
}

impl<T> Clone for TypedHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedHandle<T> {}

impl<T> PartialEq for TypedHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<T> Eq for TypedHandle<T> {}

impl<T> std::hash::Hash for TypedHandle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
