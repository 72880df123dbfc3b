//! Strongly typed, zero-cost identifier wrappers.
//!
//! Two index spaces exist side by side:
//!
//! - `NodeId` / `EdgeId` index the road graph and the distance matrix.
//! - `StationId` indexes the slots of a dispatch-time `Inventory`, in the
//!   order stations were inserted.  Inventory order is the scorer's
//!   tie-break order, so it is deliberately separate from graph order.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to `MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a station node in the road graph and distance matrix.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed half-edge in the CSR adjacency arrays.
    pub struct EdgeId(u32);
}

typed_id! {
    /// Slot of a station in an `Inventory` (insertion order).
    pub struct StationId(u32);
}

typed_id! {
    /// Service vehicle index.  Vehicles act in ascending id order each round.
    pub struct VehicleId(u32);
}
