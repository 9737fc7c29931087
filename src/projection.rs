//! Write projections.
//!
//! Records read from Insightly carry fields the server owns: creation and
//! update timestamps, activity dates, resolved tag lists. Create and update
//! endpoints must never receive those, so every writable entity declares a
//! separate projection type listing exactly the fields it may send.

use serde::Serialize;

/// An entity with a fixed set of fields accepted by write endpoints.
pub trait Writable {
    /// The write-safe shape of this entity.
    type Projection: Serialize + Send + Sync;

    /// Copy the writable fields into a projection.
    fn to_projection(&self) -> Self::Projection;

    /// Overwrite this entity's writable fields from a projection.
    ///
    /// Read-only fields are left untouched.
    fn merge_projection(&mut self, projection: Self::Projection);
}

/// Project an optional entity; `None` stays `None`.
pub fn project<E: Writable>(entity: Option<&E>) -> Option<E::Projection> {
    entity.map(Writable::to_projection)
}

/// Server-assigned ids are `0` until the record exists.
pub(crate) fn assigned_id(id: u64) -> Option<u64> {
    (id != 0).then_some(id)
}
