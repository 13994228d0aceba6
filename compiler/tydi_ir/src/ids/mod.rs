//! Arena index newtypes.
//!
//! Every cross-entity link in the resolved graph is one of these ids: a
//! `u32` index into the owning [`Graph`](crate::Graph) table. Links never
//! copy the referenced entity, so renaming a logic type is immediately
//! visible to every stream, port and net that points at it.

use std::fmt;
use std::hash::{Hash, Hasher};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Sentinel for a link that has not been resolved yet.
            pub const INVALID: $name = $name(u32::MAX);

            /// Create a new id from a raw index.
            #[inline]
            pub const fn new(index: u32) -> Self {
                $name(index)
            }

            /// Get the index into the arena.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            /// Get the raw u32 value.
            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            /// Check if this is a valid (non-sentinel) id.
            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl Hash for $name {
            #[inline]
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, concat!(stringify!($name), "({})"), self.0)
                } else {
                    write!(f, concat!(stringify!($name), "::INVALID"))
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }
    };
}

define_id!(
    /// Index into the logic type table.
    LogicTypeId
);

define_id!(
    /// Index into the streamlet table.
    StreamletId
);

define_id!(
    /// Index into the implementation table.
    ImplId
);

crate::static_assert_size!(LogicTypeId, 4);
crate::static_assert_size!(StreamletId, 4);
crate::static_assert_size!(ImplId, 4);

/// Convert an arena length into the next id, saturating below the sentinel.
pub(crate) fn to_u32(len: usize) -> u32 {
    u32::try_from(len)
        .ok()
        .filter(|&raw| raw != u32::MAX)
        .unwrap_or(u32::MAX - 1)
}
