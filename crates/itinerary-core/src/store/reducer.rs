//! Pure state transitions.
//!
//! `reduce` clones the incoming snapshot, applies one action to the clone
//! and hands it back. The input is never modified, so a failed action
//! leaves the caller holding the last valid state.

use std::collections::HashSet;

use tracing::debug;

use super::action::Action;
use super::state::AppState;
use crate::error::{StoreError, ValidationError};
use crate::model::{Day, DayId, Place, PlaceId, TransitId, TransitSegment, Trip, TripId};
use crate::time::ensure_positive_duration;

/// Apply `action` to `state`, returning the next snapshot.
///
/// # Errors
/// Returns a [`StoreError`] if the action references unknown entities or
/// carries invalid values.
pub fn reduce(state: &AppState, action: Action) -> Result<AppState, StoreError> {
    let name = action.name();
    let mut next = state.clone();
    match action {
        Action::SetCurrentTrip(trip_id) => {
            let trip = find_trip(&next, &trip_id)?;
            let keep_day = next
                .current_day_id
                .as_ref()
                .is_some_and(|d| trip.day(d).is_some());
            let first_day = trip.days.first().map(|d| d.id.clone());
            if !keep_day {
                next.current_day_id = first_day;
            }
            next.current_trip_id = Some(trip_id);
        }
        Action::SetCurrentDay(day_id) => {
            let trip = next.current_trip().ok_or(StoreError::NoSelection("trip"))?;
            if trip.day(&day_id).is_none() {
                return Err(not_found("day", &day_id));
            }
            next.current_day_id = Some(day_id);
        }
        Action::SetViewMode(mode) => next.view_mode = mode,
        Action::AddTrip(trip) => {
            if next.trip(&trip.id).is_some() {
                return Err(StoreError::DuplicateId {
                    kind: "trip",
                    id: trip.id.to_string(),
                });
            }
            if next.current_trip().is_none() {
                next.current_trip_id = Some(trip.id.clone());
                next.current_day_id = trip.days.first().map(|d| d.id.clone());
            }
            next.trips.push(trip);
        }
        Action::UpdateTrip { trip_id, patch } => {
            patch.apply(find_trip_mut(&mut next, &trip_id)?)?;
        }
        Action::DeleteTrip(trip_id) => {
            find_trip(&next, &trip_id)?;
            next.trips.retain(|t| t.id != trip_id);
            if next.current_trip_id.as_ref() == Some(&trip_id) {
                next.current_trip_id = None;
                next.current_day_id = None;
            }
        }
        Action::UpdateDay {
            trip_id,
            day_id,
            patch,
        } => {
            patch.apply(find_day_mut(&mut next, &trip_id, &day_id)?);
        }
        Action::AddPlace {
            trip_id,
            day_id,
            place,
            after,
        } => {
            let trip = find_trip_mut(&mut next, &trip_id)?;
            if place_ids_in(trip).contains(&place.id) {
                return Err(StoreError::DuplicateId {
                    kind: "place",
                    id: place.id.to_string(),
                });
            }
            let day = trip
                .day_mut(&day_id)
                .ok_or_else(|| not_found("day", &day_id))?;
            insert_place(day, place, after.as_ref())?;
        }
        Action::UpdatePlace {
            trip_id,
            day_id,
            place_id,
            patch,
        } => {
            let day = find_day_mut(&mut next, &trip_id, &day_id)?;
            let place = day
                .places
                .iter_mut()
                .find(|p| p.id == place_id)
                .ok_or_else(|| not_found("place", &place_id))?;
            patch.apply(place)?;
        }
        Action::DeletePlace {
            trip_id,
            day_id,
            place_id,
        } => {
            let day = find_day_mut(&mut next, &trip_id, &day_id)?;
            remove_place(day, &place_id)?;
        }
        Action::ReorderPlaces {
            trip_id,
            day_id,
            place_ids,
        } => {
            let day = find_day_mut(&mut next, &trip_id, &day_id)?;
            reorder(day, &place_ids)?;
        }
        Action::MovePlace {
            trip_id,
            day_id,
            place_id,
            to_index,
        } => {
            let day = find_day_mut(&mut next, &trip_id, &day_id)?;
            let len = day.places.len();
            if to_index >= len {
                return Err(StoreError::OutOfBounds {
                    index: to_index,
                    len,
                });
            }
            let from = place_index(day, &place_id)?;
            let place = day.places.remove(from);
            day.places.insert(to_index, place);
            day.reindex();
        }
        Action::DuplicatePlace {
            trip_id,
            day_id,
            place_id,
        } => {
            let trip = find_trip_mut(&mut next, &trip_id)?;
            let taken = place_ids_in(trip);
            let day = trip
                .day_mut(&day_id)
                .ok_or_else(|| not_found("day", &day_id))?;
            let source = &day.places[place_index(day, &place_id)?];
            let mut copy = source.duplicate();
            while taken.contains(&copy.id) {
                copy.id = PlaceId::generate();
            }
            insert_place(day, copy, Some(&place_id))?;
        }
        Action::MovePlaceToDay {
            trip_id,
            from_day_id,
            place_id,
            to_day_id,
        } => {
            let trip = find_trip_mut(&mut next, &trip_id)?;
            if trip.day(&to_day_id).is_none() {
                return Err(not_found("day", &to_day_id));
            }
            if from_day_id != to_day_id {
                let source = trip
                    .day_mut(&from_day_id)
                    .ok_or_else(|| not_found("day", &from_day_id))?;
                let place = remove_place(source, &place_id)?;
                if let Some(target) = trip.day_mut(&to_day_id) {
                    insert_place(target, place, None)?;
                }
            }
        }
        Action::SetTransit {
            trip_id,
            day_id,
            from,
            to,
            mode,
            duration,
            route_summary,
        } => {
            let day = find_day_mut(&mut next, &trip_id, &day_id)?;
            ensure_positive_duration(duration)?;
            if from == to {
                return Err(ValidationError::InvalidValue {
                    field: "to".into(),
                    message: "a transit leg needs two different places".into(),
                }
                .into());
            }
            place_index(day, &from)?;
            place_index(day, &to)?;

            match day.transit_segments.iter_mut().find(|t| t.connects(&from, &to)) {
                Some(existing) => {
                    existing.mode = mode;
                    existing.duration = duration;
                    existing.route_summary = route_summary;
                }
                None => {
                    let mut segment = TransitSegment::new(from, to, mode, duration);
                    segment.route_summary = route_summary;
                    day.transit_segments.push(segment);
                }
            }
        }
        Action::UpdateTransit {
            trip_id,
            day_id,
            transit_id,
            patch,
        } => {
            let day = find_day_mut(&mut next, &trip_id, &day_id)?;
            patch.apply(find_transit_mut(day, &transit_id)?)?;
        }
        Action::CycleTransitMode {
            trip_id,
            day_id,
            transit_id,
        } => {
            let day = find_day_mut(&mut next, &trip_id, &day_id)?;
            let segment = find_transit_mut(day, &transit_id)?;
            segment.mode = segment.mode.next();
        }
        Action::DeleteTransit {
            trip_id,
            day_id,
            transit_id,
        } => {
            let day = find_day_mut(&mut next, &trip_id, &day_id)?;
            find_transit_mut(day, &transit_id)?;
            day.transit_segments.retain(|t| t.id != transit_id);
        }
    }
    debug!(action = name, trips = next.trips.len(), "applied action");
    Ok(next)
}

fn not_found(kind: &'static str, id: &impl ToString) -> StoreError {
    StoreError::NotFound {
        kind,
        id: id.to_string(),
    }
}

fn find_trip<'a>(state: &'a AppState, id: &TripId) -> Result<&'a Trip, StoreError> {
    state.trip(id).ok_or_else(|| not_found("trip", id))
}

fn find_trip_mut<'a>(state: &'a mut AppState, id: &TripId) -> Result<&'a mut Trip, StoreError> {
    state
        .trips
        .iter_mut()
        .find(|t| &t.id == id)
        .ok_or_else(|| not_found("trip", id))
}

fn find_day_mut<'a>(
    state: &'a mut AppState,
    trip_id: &TripId,
    day_id: &DayId,
) -> Result<&'a mut Day, StoreError> {
    find_trip_mut(state, trip_id)?
        .day_mut(day_id)
        .ok_or_else(|| not_found("day", day_id))
}

fn find_transit_mut<'a>(
    day: &'a mut Day,
    id: &TransitId,
) -> Result<&'a mut TransitSegment, StoreError> {
    day.transit_segments
        .iter_mut()
        .find(|t| &t.id == id)
        .ok_or_else(|| not_found("transit", id))
}

fn place_index(day: &Day, id: &PlaceId) -> Result<usize, StoreError> {
    day.place_index(id).ok_or_else(|| not_found("place", id))
}

fn place_ids_in(trip: &Trip) -> HashSet<PlaceId> {
    trip.days
        .iter()
        .flat_map(|d| d.places.iter().map(|p| p.id.clone()))
        .collect()
}

fn insert_place(day: &mut Day, place: Place, after: Option<&PlaceId>) -> Result<(), StoreError> {
    ensure_positive_duration(place.duration)?;
    if day.place(&place.id).is_some() {
        return Err(StoreError::DuplicateId {
            kind: "place",
            id: place.id.to_string(),
        });
    }
    let at = match after {
        Some(id) => place_index(day, id)? + 1,
        None => day.places.len(),
    };
    day.places.insert(at, place);
    day.reindex();
    Ok(())
}

/// Remove a place and every leg that names it.
fn remove_place(day: &mut Day, id: &PlaceId) -> Result<Place, StoreError> {
    let index = place_index(day, id)?;
    let place = day.places.remove(index);
    day.transit_segments.retain(|t| !t.touches(id));
    day.reindex();
    Ok(place)
}

fn reorder(day: &mut Day, ids: &[PlaceId]) -> Result<(), StoreError> {
    let unique: HashSet<&PlaceId> = ids.iter().collect();
    if ids.len() != day.places.len() || unique.len() != ids.len() {
        return Err(StoreError::InvalidReorder(format!(
            "expected {} distinct place ids, got {}",
            day.places.len(),
            ids.len()
        )));
    }
    let mut reordered = Vec::with_capacity(ids.len());
    for id in ids {
        let place = day
            .place(id)
            .ok_or_else(|| StoreError::InvalidReorder(format!("unknown place id: {id}")))?;
        reordered.push(place.clone());
    }
    day.places = reordered;
    day.reindex();
    Ok(())
}
