//! Strongly typed identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they sort and key maps without
//! ceremony.  The inner integer is `pub`; prefer `.index()` when using an ID
//! to address a `Vec`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
        #[derive(Serialize, Deserialize)]
        #[serde(transparent)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for u64 {
            #[inline(always)]
            fn from(id: $name) -> u64 {
                id.0 as u64
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
    /// Patient identity within one replication.  Assigned from a counter that
    /// starts at 1 and increases with every arrival.
    pub struct PatientId(u32);
}

typed_id! {
    /// Replication index.  Doubles as the study seed for that replication.
    pub struct RunId(u32);
}

typed_id! {
    /// Which logical quantity a [`RandomStream`][crate::RandomStream] samples.
    pub struct StreamId(u32);
}

impl PatientId {
    /// The patient after `self` in arrival order.
    #[inline]
    pub fn next(self) -> PatientId {
        PatientId(self.0 + 1)
    }
}

impl StreamId {
    /// Gaps between successive patient arrivals.
    pub const INTER_ARRIVAL: StreamId = StreamId(0);
    /// Nurse consultation durations.
    pub const CONSULTATION: StreamId = StreamId(1);
}
