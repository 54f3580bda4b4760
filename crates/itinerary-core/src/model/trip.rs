use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::{DayId, Place, PlaceId, TransitSegment, TripId};
use crate::error::ValidationError;
use crate::time::ClockTime;

/// A multi-day trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: TripId,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: Vec<Day>,
}

impl Trip {
    /// One empty day per calendar date in `start..=end`, numbered from 1.
    pub fn with_date_range(
        title: impl Into<String>,
        start: NaiveDate,
        end: NaiveDate,
        day_start: ClockTime,
    ) -> Result<Self, ValidationError> {
        if end < start {
            return Err(ValidationError::InvalidDateRange { start, end });
        }
        let days = start
            .iter_days()
            .take_while(|d| *d <= end)
            .enumerate()
            .map(|(i, date)| Day::new(i as u32 + 1, date, day_start))
            .collect();
        Ok(Self {
            id: TripId::generate(),
            title: title.into(),
            start_date: start,
            end_date: end,
            days,
        })
    }

    pub fn day(&self, id: &DayId) -> Option<&Day> {
        self.days.iter().find(|d| &d.id == id)
    }

    pub fn day_mut(&mut self, id: &DayId) -> Option<&mut Day> {
        self.days.iter_mut().find(|d| &d.id == id)
    }
}

/// One day of a trip: ordered places plus the legs between them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Day {
    pub id: DayId,
    pub day_number: u32,
    pub date: NaiveDate,
    /// Default start for the first place when it has no anchor.
    pub start_time: ClockTime,
    #[serde(default)]
    pub places: Vec<Place>,
    #[serde(default)]
    pub transit_segments: Vec<TransitSegment>,
}

impl Day {
    pub fn new(day_number: u32, date: NaiveDate, start_time: ClockTime) -> Self {
        Self {
            id: DayId::generate(),
            day_number,
            date,
            start_time,
            places: Vec::new(),
            transit_segments: Vec::new(),
        }
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    pub fn place(&self, id: &PlaceId) -> Option<&Place> {
        self.places.iter().find(|p| &p.id == id)
    }

    pub fn place_index(&self, id: &PlaceId) -> Option<usize> {
        self.places.iter().position(|p| &p.id == id)
    }

    /// First segment leaving `from`, regardless of where it goes.
    pub fn transit_from(&self, from: &PlaceId) -> Option<&TransitSegment> {
        self.transit_segments.iter().find(|t| &t.from_place_id == from)
    }

    /// Segment for the exact ordered pair `from -> to`.
    pub fn transit_between(&self, from: &PlaceId, to: &PlaceId) -> Option<&TransitSegment> {
        self.transit_segments.iter().find(|t| t.connects(from, to))
    }

    /// Rewrite `order` as a dense `0..n-1` sequence following list position.
    pub fn reindex(&mut self) {
        for (i, place) in self.places.iter_mut().enumerate() {
            place.order = i;
        }
    }

    /// Drop segments whose endpoints are no longer in the day.
    pub fn prune_transit(&mut self) {
        let places = &self.places;
        self.transit_segments.retain(|t| {
            places.iter().any(|p| p.id == t.from_place_id)
                && places.iter().any(|p| p.id == t.to_place_id)
        });
    }

    /// Total planned visit time, excluding transit. Saturates at `u32::MAX`.
    pub fn total_visit_minutes(&self) -> u32 {
        self.places
            .iter()
            .fold(0u32, |total, p| total.saturating_add(p.duration))
    }
}

/// Layout preference for the day view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Detail,
    Compact,
    Map,
}

impl std::str::FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "detail" => Ok(Self::Detail),
            "compact" => Ok(Self::Compact),
            "map" => Ok(Self::Map),
            other => Err(format!("unknown view mode: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn visit_minutes_sum_and_saturate() {
        let mut day = Day::new(1, date("2026-01-18"), ClockTime::from_minute_of_day(600));
        assert_eq!(day.total_visit_minutes(), 0);
        day.places.push(Place::new("A").with_id("a").with_duration(90));
        day.places.push(Place::new("B").with_id("b").with_duration(45));
        assert_eq!(day.total_visit_minutes(), 135);
        day.places.push(Place::new("C").with_id("c").with_duration(u32::MAX));
        assert_eq!(day.total_visit_minutes(), u32::MAX);
    }

    #[test]
    fn date_range_creates_numbered_days() {
        let trip = Trip::with_date_range(
            "Lisbon",
            date("2026-03-01"),
            date("2026-03-03"),
            "09:30".parse().unwrap(),
        )
        .unwrap();
        assert_eq!(trip.days.len(), 3);
        assert_eq!(trip.days[0].day_number, 1);
        assert_eq!(trip.days[2].date, date("2026-03-03"));
        assert!(trip.days.iter().all(|d| d.start_time.to_string() == "09:30"));
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let result = Trip::with_date_range(
            "Backwards",
            date("2026-03-03"),
            date("2026-03-01"),
            "10:00".parse().unwrap(),
        );
        assert!(matches!(result, Err(ValidationError::InvalidDateRange { .. })));
    }

    #[test]
    fn transit_lookups_differ_on_destination() {
        let mut day = Day::new(1, date("2026-01-18"), "10:00".parse().unwrap());
        day.places.push(Place::new("A").with_id("a"));
        day.places.push(Place::new("B").with_id("b"));
        day.transit_segments.push(TransitSegment::new(
            "a".into(),
            "c".into(),
            Default::default(),
            15,
        ));
        assert!(day.transit_from(&"a".into()).is_some());
        assert!(day.transit_between(&"a".into(), &"b".into()).is_none());

        day.prune_transit();
        assert!(day.transit_segments.is_empty());
    }
}
