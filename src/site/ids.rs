use std::fmt;
use std::marker::PhantomData;

/// Identifier of a drawn parcel. Starts at 1, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParcelId(pub u32);

/// Identifier of a tenant within a site. Starts at 1, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TenantId(pub u32);

impl From<u32> for ParcelId {
    fn from(raw: u32) -> Self {
        ParcelId(raw)
    }
}

impl From<u32> for TenantId {
    fn from(raw: u32) -> Self {
        TenantId(raw)
    }
}

impl fmt::Display for ParcelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("P{}", self.0))
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("T{}", self.0))
    }
}

/// Monotonic id source owned by whoever creates the records.
///
/// Not `Clone`: two copies would hand out the same ids.
#[derive(Debug)]
pub struct IdSequence<T> {
    /// `None` once every id has been handed out.
    next: Option<u32>,
    _marker: PhantomData<T>,
}

impl<T: From<u32>> IdSequence<T> {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    fn starting_at(first: u32) -> Self {
        Self {
            next: Some(first),
            _marker: PhantomData,
        }
    }

    /// Hand out the next id, or `None` when the sequence is exhausted.
    pub fn next_id(&mut self) -> Option<T> {
        let id = self.next?;
        self.next = id.checked_add(1);
        if self.next.is_none() {
            tracing::warn!("Id sequence exhausted at {}", id);
        }
        Some(T::from(id))
    }
}

impl<T: From<u32>> Default for IdSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}
