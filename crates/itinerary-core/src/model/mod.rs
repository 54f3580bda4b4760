//! Domain types: trips, days, places, and transit legs.
//!
//! Persisted documents use camelCase field names.

mod place;
mod transit;
mod trip;

pub use place::{
    Coordinates, EmbedKind, EmbedSource, OpeningWindow, Place, PlaceCategory, PlaceEmbed,
    WeeklyHours, DEFAULT_PLACE_DURATION,
};
pub use transit::{TransitMode, TransitSegment};
pub use trip::{Day, Trip, ViewMode};

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Fresh random identifier.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Identifier of a [`Trip`].
    TripId
);
string_id!(
    /// Identifier of a [`Day`].
    DayId
);
string_id!(
    /// Identifier of a [`Place`].
    PlaceId
);
string_id!(
    /// Identifier of a [`TransitSegment`].
    TransitId
);
string_id!(EmbedId);
