//! Start-time computation for a day's places.
//!
//! One left-to-right pass: each place starts where the previous one ended
//! (plus transit), unless it carries an anchor, which resets the clock.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::gap::{GapDetector, GapWarning};
use crate::error::ScheduleError;
use crate::model::{Day, PlaceId};
use crate::time::ClockTime;

/// Derived times for one day. Recomputed on every render, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    /// Effective start of each place, in day order.
    pub place_times: IndexMap<PlaceId, ClockTime>,
    /// Gap minutes keyed by the place preceding the gap.
    pub gaps: IndexMap<PlaceId, i64>,
    /// Details for each entry in `gaps`.
    #[serde(skip)]
    pub warnings: Vec<GapWarning>,
}

impl DaySchedule {
    pub fn start_of(&self, id: &PlaceId) -> Option<ClockTime> {
        self.place_times.get(id).copied()
    }

    pub fn gap_after(&self, id: &PlaceId) -> Option<i64> {
        self.gaps.get(id).copied()
    }

    pub fn warning_after(&self, id: &PlaceId) -> Option<&GapWarning> {
        self.warnings.iter().find(|w| &w.place_id == id)
    }

    pub fn has_warnings(&self) -> bool {
        !self.gaps.is_empty()
    }
}

/// Schedule engine with a configurable gap threshold.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleCalculator {
    detector: GapDetector,
}

impl ScheduleCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Warn only for gaps strictly longer than `minutes`.
    pub fn with_gap_threshold(mut self, minutes: i64) -> Self {
        self.detector = self.detector.with_threshold(minutes);
        self
    }

    /// Derive place start times and gap warnings for `day`.
    ///
    /// # Errors
    /// Returns [`ScheduleError::InvalidInput`] if a place has a zero duration
    /// or shares its id with an earlier place.
    pub fn compute(&self, day: &Day) -> Result<DaySchedule, ScheduleError> {
        let mut seen = HashSet::with_capacity(day.places.len());
        for place in &day.places {
            if place.duration == 0 {
                return Err(ScheduleError::InvalidInput {
                    place_id: place.id.to_string(),
                    message: "duration must be positive".into(),
                });
            }
            if !seen.insert(&place.id) {
                return Err(ScheduleError::InvalidInput {
                    place_id: place.id.to_string(),
                    message: "duplicate place id".into(),
                });
            }
        }

        let place_times = self.place_times(day);
        let warnings = self.detector.find_gaps(day, &place_times);
        let gaps = warnings
            .iter()
            .map(|w| (w.place_id.clone(), w.minutes))
            .collect();

        trace!(
            day = %day.id,
            places = day.places.len(),
            gaps = warnings.len(),
            "computed day schedule"
        );

        Ok(DaySchedule {
            place_times,
            gaps,
            warnings,
        })
    }

    fn place_times(&self, day: &Day) -> IndexMap<PlaceId, ClockTime> {
        let mut times = IndexMap::with_capacity(day.places.len());
        let mut current = day.start_time;
        let last = day.places.len().saturating_sub(1);

        for (i, place) in day.places.iter().enumerate() {
            if let Some(anchor) = place.anchor_time {
                current = anchor;
            }
            times.insert(place.id.clone(), current);
            current = current.add_minutes(i64::from(place.duration));

            // Only the origin is matched; the leg may point elsewhere.
            if i < last {
                if let Some(transit) = day.transit_from(&place.id) {
                    current = current.add_minutes(i64::from(transit.duration));
                }
            }
        }
        times
    }
}

/// Compute a day's schedule with the default two-hour gap threshold.
pub fn compute_schedule(day: &Day) -> Result<DaySchedule, ScheduleError> {
    ScheduleCalculator::new().compute(day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Place, TransitMode, TransitSegment};

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn day(start: &str) -> Day {
        Day::new(1, "2026-01-18".parse().unwrap(), t(start))
    }

    fn leg(from: &str, to: &str, minutes: u32) -> TransitSegment {
        TransitSegment::new(from.into(), to.into(), TransitMode::Walk, minutes)
    }

    #[test]
    fn empty_day_yields_empty_schedule() {
        let schedule = compute_schedule(&day("10:00")).unwrap();
        assert!(schedule.place_times.is_empty());
        assert!(schedule.gaps.is_empty());
    }

    #[test]
    fn cumulative_times_with_transit() {
        let mut d = day("10:00");
        d.places.push(Place::new("A").with_id("a").with_duration(90));
        d.places.push(Place::new("B").with_id("b").with_duration(120));
        d.transit_segments.push(leg("a", "b", 12));

        let schedule = compute_schedule(&d).unwrap();
        assert_eq!(schedule.start_of(&"a".into()), Some(t("10:00")));
        assert_eq!(schedule.start_of(&"b".into()), Some(t("11:42")));
        assert!(!schedule.has_warnings());
    }

    #[test]
    fn arrival_at_twelve_forty_two() {
        let mut d = day("10:00");
        d.places.push(Place::new("A").with_id("a").with_duration(150));
        d.places.push(Place::new("B").with_id("b").with_duration(120));
        d.transit_segments.push(leg("a", "b", 12));

        let schedule = compute_schedule(&d).unwrap();
        assert_eq!(schedule.start_of(&"b".into()), Some(t("12:42")));
        assert_eq!(schedule.gap_after(&"a".into()), None);

        d.places[1].anchor_time = Some(t("19:30"));
        let anchored = compute_schedule(&d).unwrap();
        assert_eq!(anchored.start_of(&"b".into()), Some(t("19:30")));
        assert_eq!(anchored.gap_after(&"a".into()), Some(408));
    }

    #[test]
    fn anchor_overrides_and_warns() {
        let mut d = day("10:00");
        d.places.push(Place::new("A").with_id("a").with_duration(90));
        d.places.push(Place::new("B").with_id("b").with_duration(120).with_anchor(t("19:30")));
        d.transit_segments.push(leg("a", "b", 12));

        let schedule = compute_schedule(&d).unwrap();
        assert_eq!(schedule.start_of(&"b".into()), Some(t("19:30")));
        assert_eq!(schedule.gap_after(&"a".into()), Some(468));
        assert_eq!(schedule.warning_after(&"a".into()).unwrap().expected_start, t("11:42"));
    }

    #[test]
    fn anchor_discards_upstream_drift() {
        let mut d = day("08:00");
        d.places.push(Place::new("A").with_id("a").with_duration(600));
        d.places.push(Place::new("B").with_id("b").with_duration(60).with_anchor(t("09:00")));
        d.places.push(Place::new("C").with_id("c").with_duration(30));

        let schedule = compute_schedule(&d).unwrap();
        assert_eq!(schedule.start_of(&"b".into()), Some(t("09:00")));
        assert_eq!(schedule.start_of(&"c".into()), Some(t("10:00")));
    }

    #[test]
    fn transit_from_last_place_is_ignored() {
        let mut d = day("10:00");
        d.places.push(Place::new("A").with_id("a").with_duration(30));
        d.transit_segments.push(leg("a", "z", 500));
        let schedule = compute_schedule(&d).unwrap();
        assert_eq!(schedule.start_of(&"a".into()), Some(t("10:00")));
    }

    #[test]
    fn mismatched_leg_still_shifts_times_but_not_gaps() {
        let mut d = day("10:00");
        d.places.push(Place::new("A").with_id("a").with_duration(60));
        d.places.push(Place::new("B").with_id("b").with_duration(60));
        d.transit_segments.push(leg("a", "elsewhere", 300));

        let schedule = compute_schedule(&d).unwrap();
        assert_eq!(schedule.start_of(&"b".into()), Some(t("16:00")));
        assert!(schedule.gaps.is_empty());
    }

    #[test]
    fn first_matching_leg_wins() {
        let mut d = day("10:00");
        d.places.push(Place::new("A").with_id("a").with_duration(60));
        d.places.push(Place::new("B").with_id("b").with_duration(60));
        d.transit_segments.push(leg("a", "b", 10));
        d.transit_segments.push(leg("a", "b", 50));
        let schedule = compute_schedule(&d).unwrap();
        assert_eq!(schedule.start_of(&"b".into()), Some(t("11:10")));
    }

    #[test]
    fn wraps_past_midnight() {
        let mut d = day("23:00");
        d.places.push(Place::new("A").with_id("a").with_duration(90));
        d.places.push(Place::new("B").with_id("b").with_duration(30));
        let schedule = compute_schedule(&d).unwrap();
        assert_eq!(schedule.start_of(&"b".into()), Some(t("00:30")));
    }

    #[test]
    fn zero_duration_is_invalid_input() {
        let mut d = day("10:00");
        d.places.push(Place::new("A").with_id("a").with_duration(0));
        let err = compute_schedule(&d).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidInput { ref place_id, .. } if place_id == "a"));
    }

    #[test]
    fn repeated_place_id_is_invalid_input() {
        let mut d = day("10:00");
        d.places.push(Place::new("A").with_id("x").with_duration(60));
        d.places.push(Place::new("B").with_id("y").with_duration(60).with_anchor(t("23:59")));
        d.places.push(Place::new("C").with_id("x").with_duration(60));
        let err = compute_schedule(&d).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::InvalidInput {
                place_id: "x".into(),
                message: "duplicate place id".into(),
            }
        );
    }

    #[test]
    fn custom_threshold_reports_smaller_gaps() {
        let mut d = day("10:00");
        d.places.push(Place::new("A").with_id("a").with_duration(60));
        d.places.push(Place::new("B").with_id("b").with_anchor(t("12:00")));
        let schedule = ScheduleCalculator::new().with_gap_threshold(45).compute(&d).unwrap();
        assert_eq!(schedule.gap_after(&"a".into()), Some(60));
    }

    #[test]
    fn schedule_serializes_as_ordered_maps() {
        let mut d = day("10:00");
        d.places.push(Place::new("Z").with_id("z").with_duration(30));
        d.places.push(Place::new("A").with_id("a").with_duration(30));
        let json = serde_json::to_string(&compute_schedule(&d).unwrap()).unwrap();
        assert_eq!(json, r#"{"placeTimes":{"z":"10:00","a":"10:30"},"gaps":{}}"#);
    }
}
