//! Type-safe identifier wrappers around [`Uuid`].
//!
//! Entities whose identifiers are generated at runtime (the twin profile,
//! mobility bookings) get strongly-typed UUID newtypes so the compiler
//! rejects accidental mixing. Seed entities (districts, activities) keep
//! their human-readable string slugs (`"office"`, `"meeting"`) and are
//! plain `String` fields on the structs themselves.
//!
//! All generated IDs use UUID v7 (time-ordered), which keeps booking
//! lists naturally sorted by creation time.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for a digital-twin profile.
    TwinId
}

define_id! {
    /// Unique identifier for a mobility booking.
    BookingId
}
