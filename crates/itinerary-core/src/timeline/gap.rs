//! Gap detection between consecutive places.
//!
//! A gap is the distance between where the upstream schedule says the next
//! place should start and where it actually starts (its anchor, if any).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::model::{Day, PlaceId};
use crate::time::ClockTime;

/// Gaps strictly longer than this raise a warning.
pub const DEFAULT_GAP_THRESHOLD_MINUTES: i64 = 120;

/// An under-scheduled stretch before `next_place_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapWarning {
    /// The place the gap follows; warnings are keyed by this id.
    pub place_id: PlaceId,
    pub next_place_id: PlaceId,
    pub expected_start: ClockTime,
    pub actual_start: ClockTime,
    pub minutes: i64,
}

/// Detector for over-long gaps in a computed day.
#[derive(Debug, Clone, Copy)]
pub struct GapDetector {
    threshold_minutes: i64,
}

impl GapDetector {
    /// Create a detector with the default two-hour threshold.
    pub fn new() -> Self {
        Self {
            threshold_minutes: DEFAULT_GAP_THRESHOLD_MINUTES,
        }
    }

    /// Set the warning threshold.
    pub fn with_threshold(mut self, minutes: i64) -> Self {
        self.threshold_minutes = minutes;
        self
    }

    pub fn threshold(&self) -> i64 {
        self.threshold_minutes
    }

    /// Signed gap before `next`, not midnight-aware.
    ///
    /// The transit leg must match the exact pair `place -> next`.
    pub fn gap_between(
        &self,
        day: &Day,
        place_times: &IndexMap<PlaceId, ClockTime>,
        index: usize,
    ) -> Option<(ClockTime, ClockTime, i64)> {
        let place = day.places.get(index)?;
        let next = day.places.get(index + 1)?;
        let start = *place_times.get(&place.id)?;

        let transit = day
            .transit_between(&place.id, &next.id)
            .map_or(0, |t| t.duration);
        let expected = start.add_minutes(i64::from(place.duration) + i64::from(transit));
        let actual = next.anchor_time.unwrap_or(expected);
        Some((expected, actual, expected.minutes_until(actual)))
    }

    /// Warnings for every adjacent pair whose gap exceeds the threshold.
    pub fn find_gaps(
        &self,
        day: &Day,
        place_times: &IndexMap<PlaceId, ClockTime>,
    ) -> Vec<GapWarning> {
        let pairs = day.places.len().saturating_sub(1);
        (0..pairs)
            .filter_map(|i| {
                let (expected, actual, minutes) = self.gap_between(day, place_times, i)?;
                (minutes > self.threshold_minutes).then(|| GapWarning {
                    place_id: day.places[i].id.clone(),
                    next_place_id: day.places[i + 1].id.clone(),
                    expected_start: expected,
                    actual_start: actual,
                    minutes,
                })
            })
            .collect()
    }
}

impl Default for GapDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Place, TransitMode, TransitSegment};

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    /// A (90 min) then B anchored at `anchor`, with `transit` minutes between.
    fn day_with_anchor(anchor: &str, transit: u32) -> (Day, IndexMap<PlaceId, ClockTime>) {
        let mut day = Day::new(1, "2026-01-18".parse().unwrap(), t("10:00"));
        day.places.push(Place::new("A").with_id("a").with_duration(90));
        day.places.push(Place::new("B").with_id("b").with_anchor(t(anchor)));
        day.transit_segments.push(TransitSegment::new(
            "a".into(),
            "b".into(),
            TransitMode::Walk,
            transit,
        ));
        let mut times = IndexMap::new();
        times.insert(PlaceId::from("a"), t("10:00"));
        times.insert(PlaceId::from("b"), t(anchor));
        (day, times)
    }

    #[test]
    fn exact_threshold_does_not_warn() {
        // expected 11:30 + 0, anchor 13:30 -> exactly 120
        let (day, times) = day_with_anchor("13:30", 0);
        assert!(GapDetector::new().find_gaps(&day, &times).is_empty());
    }

    #[test]
    fn one_minute_over_threshold_warns() {
        let (day, times) = day_with_anchor("13:31", 0);
        let gaps = GapDetector::new().find_gaps(&day, &times);
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].minutes, 121);
        assert_eq!(gaps[0].place_id, PlaceId::from("a"));
    }

    #[test]
    fn transit_counts_toward_expected_start() {
        let (day, times) = day_with_anchor("19:30", 12);
        let gaps = GapDetector::new().find_gaps(&day, &times);
        assert_eq!(gaps[0].expected_start, t("11:42"));
        assert_eq!(gaps[0].minutes, 468);
    }

    #[test]
    fn negative_gap_passes_through_without_warning() {
        let (day, times) = day_with_anchor("11:00", 0);
        let (_, _, minutes) = GapDetector::new().gap_between(&day, &times, 0).unwrap();
        assert_eq!(minutes, -30);
        assert!(GapDetector::new().find_gaps(&day, &times).is_empty());
    }

    #[test]
    fn custom_threshold() {
        let (day, times) = day_with_anchor("12:30", 0);
        assert!(GapDetector::new().find_gaps(&day, &times).is_empty());
        let gaps = GapDetector::new().with_threshold(30).find_gaps(&day, &times);
        assert_eq!(gaps[0].minutes, 60);
    }
}
