//! Opaque identity for mounted keyboard fields.
//!
//! A `FieldId` is only ever used as a lookup key into the
//! [`InputRegistry`](crate::InputRegistry). It carries no data of its own and
//! stops meaning anything the moment the field it was allocated for is
//! dropped.

use std::fmt;

/// Handle identifying one mounted text-entry field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(u64);

impl FieldId {
    /// Create a `FieldId` from a raw value.
    ///
    /// Integrations normally get ids from
    /// [`KeyboardContext::allocate_field_id`](crate::KeyboardContext::allocate_field_id);
    /// this exists for tests and for bridging foreign id spaces.
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[inline]
    pub const fn as_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field#{}", self.0)
    }
}
