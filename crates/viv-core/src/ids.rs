//! Strongly typed, zero-cost identifier wrappers.
//!
//! The simulation stores all entities in arenas on `World`; every
//! cross-reference (an Activity's owning Asset, a Person's current Activity,
//! an Asset's occupants) is one of these typed indices.  "Ownership" edges
//! are indices into the owning arena; "weak" edges (occupant back-references)
//! are plain indices with no ownership semantics, so the object graph has no
//! reference cycles.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and as
//! deterministic tie-break keys without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// `true` unless this is the `INVALID` sentinel.
            #[inline(always)]
            pub fn is_valid(self) -> bool {
                self != Self::INVALID
            }

            /// Cast to `usize` for direct use as an arena index.
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
    };
}

typed_id! {
    /// Index of a person in the `World` person arena.
    pub struct PersonId(u32);
}

typed_id! {
    /// Index of a home (household) in the `World` home arena.
    pub struct HomeId(u32);
}

typed_id! {
    /// Index of an asset (bed, food source, transport, workplace) in the
    /// `World` asset arena.
    pub struct AssetId(u32);
}

typed_id! {
    /// Index of an activity slot in the `World` activity arena.  Slots are
    /// created with their asset and reused for its whole lifetime.
    pub struct ActivityId(u32);
}

typed_id! {
    /// Opaque location label.  Two entities interact only when co-located.
    /// `LocaleId::INVALID` on an asset means "roaming" — co-located with
    /// everyone (used for transport).
    pub struct LocaleId(u32);
}
