//! Advisory check of scheduled visits against opening hours.

use serde::{Deserialize, Serialize};

use super::calculator::DaySchedule;
use crate::model::{Day, PlaceId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpeningStatus {
    /// The whole visit lies within the day's opening window.
    Fits,
    /// Some part of the visit falls outside the window.
    OutsideHours,
    /// No hours recorded for this weekday.
    Unknown,
}

/// Check every place of `day` that has opening hours.
///
/// Places without any `hours` are omitted.
pub fn check_opening_hours(day: &Day, schedule: &DaySchedule) -> Vec<(PlaceId, OpeningStatus)> {
    let weekday = day.weekday();
    day.places
        .iter()
        .filter_map(|place| {
            let hours = place.hours.as_ref()?;
            let start = schedule.start_of(&place.id)?;
            let status = match hours.for_weekday(weekday) {
                None => OpeningStatus::Unknown,
                Some(window) if window.contains_visit(start, place.duration) => OpeningStatus::Fits,
                Some(_) => OpeningStatus::OutsideHours,
            };
            Some((place.id.clone(), status))
        })
        .collect()
}
