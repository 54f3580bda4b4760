use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::action::Action;
use super::reducer::reduce;
use super::sample::sample_trip;
use crate::error::StoreError;
use crate::model::{Day, DayId, Trip, TripId, ViewMode};

/// Everything the editor knows: trips plus the current selection.
///
/// Values are never mutated in place by callers; [`AppState::apply`]
/// returns the next snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub trips: Vec<Trip>,
    #[serde(default)]
    pub current_trip_id: Option<TripId>,
    #[serde(default)]
    pub current_day_id: Option<DayId>,
    #[serde(default)]
    pub view_mode: ViewMode,
}

impl AppState {
    /// State seeded with the sample trip, first day selected.
    pub fn sample() -> Self {
        let trip = sample_trip();
        Self {
            current_trip_id: Some(trip.id.clone()),
            current_day_id: trip.days.first().map(|d| d.id.clone()),
            trips: vec![trip],
            view_mode: ViewMode::Detail,
        }
    }

    /// Apply one action, returning the next snapshot.
    ///
    /// # Errors
    /// Returns a [`StoreError`] and leaves `self` untouched if the action
    /// references unknown entities or carries invalid values.
    pub fn apply(&self, action: Action) -> Result<Self, StoreError> {
        reduce(self, action)
    }

    pub fn trip(&self, id: &TripId) -> Option<&Trip> {
        self.trips.iter().find(|t| &t.id == id)
    }

    pub fn current_trip(&self) -> Option<&Trip> {
        self.current_trip_id.as_ref().and_then(|id| self.trip(id))
    }

    pub fn current_day(&self) -> Option<&Day> {
        let trip = self.current_trip()?;
        self.current_day_id.as_ref().and_then(|id| trip.day(id))
    }

    /// Ids of the selected trip and day.
    ///
    /// # Errors
    /// Returns [`StoreError::NoSelection`] when nothing valid is selected.
    pub fn selection(&self) -> Result<(TripId, DayId), StoreError> {
        let trip = self.current_trip().ok_or(StoreError::NoSelection("trip"))?;
        let day = self.current_day().ok_or(StoreError::NoSelection("day"))?;
        Ok((trip.id.clone(), day.id.clone()))
    }

    /// Place ids must be unique within each trip.
    ///
    /// # Errors
    /// Returns [`StoreError::DuplicateId`] for the first repeated id.
    pub fn check_place_ids(&self) -> Result<(), StoreError> {
        for trip in &self.trips {
            let mut seen = HashSet::new();
            let places = trip.days.iter().flat_map(|d| &d.places);
            for place in places {
                if !seen.insert(&place.id) {
                    return Err(StoreError::DuplicateId {
                        kind: "place",
                        id: place.id.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_selects_first_day() {
        let state = AppState::sample();
        let day = state.current_day().unwrap();
        assert_eq!(day.day_number, 1);
        assert_eq!(day.places.len(), 4);
        assert!(state.selection().is_ok());
    }

    #[test]
    fn empty_state_has_no_selection() {
        let state = AppState::default();
        assert_eq!(state.selection(), Err(StoreError::NoSelection("trip")));
    }

    #[test]
    fn repeated_place_id_fails_check() {
        let mut state = AppState::sample();
        assert_eq!(state.check_place_ids(), Ok(()));
        let copy = state.trips[0].days[0].places[0].clone();
        state.trips[0].days[1].places.push(copy);
        assert_eq!(
            state.check_place_ids(),
            Err(StoreError::DuplicateId { kind: "place", id: "place-1".into() })
        );
    }

    #[test]
    fn state_document_roundtrip() {
        let state = AppState::sample();
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"currentTripId\":\"trip-1\""));
        assert!(json.contains("\"anchorTime\":\"19:30\""));
        let parsed: AppState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
