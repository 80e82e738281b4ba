//! Engine-owned component type identities
//!
//! Typed component lookup needs a cheap, comparable per-type id. Instead of
//! leaking `std::any::TypeId` into call sites, the registry hands out small
//! monotonically assigned integers, memoized per concrete type on first
//! use. Ids are unique and stable within one process run; they are not
//! persistent across runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

/// Process-wide identity of a concrete component type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentTypeId(usize);

static NEXT_TYPE_ID: AtomicUsize = AtomicUsize::new(1);
static TYPE_TABLE: OnceLock<Mutex<HashMap<std::any::TypeId, ComponentTypeId>>> = OnceLock::new();

impl ComponentTypeId {
    /// Id for type `T`, allocated on first use and identical on every
    /// subsequent call within this process run
    pub fn of<T: 'static>() -> Self {
        let table = TYPE_TABLE.get_or_init(|| Mutex::new(HashMap::new()));
        let mut table = table.lock().unwrap_or_else(PoisonError::into_inner);
        *table
            .entry(std::any::TypeId::of::<T>())
            .or_insert_with(|| Self(NEXT_TYPE_ID.fetch_add(1, Ordering::Relaxed)))
    }

    /// Raw integer value, for logging and diagnostics
    pub fn raw(self) -> usize {
        self.0
    }
}
