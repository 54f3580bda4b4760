//! Day timeline: derived start times, gap warnings, opening-hours checks.
//!
//! This module provides:
//! - The schedule calculator (anchors, durations, transit legs)
//! - Gap detection between consecutive places
//! - Advisory opening-hours checks

mod calculator;
mod gap;
mod hours;

pub use calculator::{compute_schedule, DaySchedule, ScheduleCalculator};
pub use gap::{GapDetector, GapWarning, DEFAULT_GAP_THRESHOLD_MINUTES};
pub use hours::{check_opening_hours, OpeningStatus};
