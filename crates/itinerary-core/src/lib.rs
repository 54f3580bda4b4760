//! # Itinerary Core Library
//!
//! Core logic for a day-by-day trip planner. Every operation is available
//! through the `itinerary` CLI, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Time**: wall-clock `HH:MM` arithmetic with 24-hour wraparound
//! - **Model**: trips, days, places and transit legs (camelCase JSON)
//! - **Timeline**: the schedule calculator deriving place start times and
//!   gap warnings from durations, transit and anchors
//! - **Store**: immutable application state updated through a reducer
//! - **Storage**: SQLite-backed document store and TOML configuration
//!
//! ## Key Components
//!
//! - [`compute_schedule`]: derive a [`DaySchedule`] for a [`Day`]
//! - [`AppState`] / [`Action`]: state snapshot and the mutations on it
//! - [`BlobStore`]: persistence of the whole state document
//! - [`Config`]: application configuration management

pub mod error;
pub mod model;
pub mod storage;
pub mod store;
pub mod time;
pub mod timeline;

pub use error::{
    ConfigError, CoreError, Result, ScheduleError, StorageError, StoreError, TimeError,
    ValidationError,
};
pub use model::{Day, DayId, Place, PlaceId, TransitMode, TransitSegment, Trip, TripId, ViewMode};
pub use storage::{BlobStore, ClockFormat, Config};
pub use store::{Action, AppState};
pub use time::ClockTime;
pub use timeline::{compute_schedule, DaySchedule, GapWarning, OpeningStatus, ScheduleCalculator};
