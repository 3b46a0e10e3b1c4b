//! # Event Store
//!
//! Named, ordered candidate arrays for one event.
//!
//! ## Binding model
//! Array names are resolved to copyable `ArrayId` handles once, at module
//! setup; per-event access goes through the handle, never through the name.
//! A missing input array or a doubly-exported output array is a setup-time
//! error — the per-event path has no failure modes.
//!
//! ## Event boundary
//! The host empties every array between events with `clear_event()`;
//! handles stay valid across events for the lifetime of the store.

use kiransim_models::Candidate;
use std::collections::HashMap;

/// Handle to one named candidate array, valid for the store's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrayId(usize);

/// Errors raised while binding arrays at module setup.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("unknown input array: {0:?}")]
    UnknownArray(String),

    #[error("output array already exists: {0:?}")]
    DuplicateArray(String),
}

/// Named candidate arrays for the event being processed.
#[derive(Debug, Default)]
pub struct EventStore {
    arrays: Vec<Vec<Candidate>>,
    index: HashMap<String, ArrayId>,
}

impl EventStore {
    /// Create an empty store with no arrays.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the array `name` if absent and return its handle.
    ///
    /// Host wiring uses this to declare the arrays upstream producers fill;
    /// modules bind with `import`/`export` instead.
    pub fn declare(&mut self, name: &str) -> ArrayId {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = ArrayId(self.arrays.len());
        self.arrays.push(Vec::new());
        self.index.insert(name.to_string(), id);
        id
    }

    /// Resolve an existing input array.
    ///
    /// # Errors
    /// `StoreError::UnknownArray` if no array of that name was declared.
    pub fn import(&self, name: &str) -> Result<ArrayId, StoreError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| StoreError::UnknownArray(name.to_string()))
    }

    /// Create an output array owned by the calling module.
    ///
    /// # Errors
    /// `StoreError::DuplicateArray` if the name is already taken — two
    /// modules must not write to the same array.
    pub fn export(&mut self, name: &str) -> Result<ArrayId, StoreError> {
        if self.index.contains_key(name) {
            return Err(StoreError::DuplicateArray(name.to_string()));
        }
        Ok(self.declare(name))
    }

    /// Read an array's candidates in insertion order.
    pub fn array(&self, id: ArrayId) -> &[Candidate] {
        &self.arrays[id.0]
    }

    /// Append a candidate to an array.
    pub fn push(&mut self, id: ArrayId, candidate: Candidate) {
        self.arrays[id.0].push(candidate);
    }

    /// Number of candidates currently in an array.
    pub fn len(&self, id: ArrayId) -> usize {
        self.arrays[id.0].len()
    }

    /// Whether an array is currently empty.
    pub fn is_empty(&self, id: ArrayId) -> bool {
        self.arrays[id.0].is_empty()
    }

    /// Empty every array, keeping all bindings valid.
    ///
    /// Called by the host at the event boundary.
    pub fn clear_event(&mut self) {
        for array in &mut self.arrays {
            array.clear();
        }
    }
}
