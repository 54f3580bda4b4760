//! Application state and its reducer.
//!
//! [`AppState`] is a plain value. Every change goes through
//! [`reduce`] (or [`AppState::apply`]), which returns a new snapshot and
//! keeps these invariants:
//! - place `order` fields are dense `0..n-1` in list order
//! - transit legs only reference places present in their day
//! - place ids are unique within a trip

mod action;
mod reducer;
mod sample;
mod state;

pub use action::{Action, DayPatch, PlacePatch, TransitPatch, TripPatch};
pub use reducer::reduce;
pub use sample::sample_trip;
pub use state::AppState;
