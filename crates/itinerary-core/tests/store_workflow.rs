//! End-to-end tests for state updates and their persistence.

use std::collections::HashSet;

use itinerary_core::model::{Day, DayId, Place, PlaceId, TransitMode, TripId, ViewMode};
use itinerary_core::store::{Action, AppState, PlacePatch};
use itinerary_core::timeline::compute_schedule;
use itinerary_core::{BlobStore, StoreError};
use proptest::prelude::*;

fn selection() -> (TripId, DayId) {
    ("trip-1".into(), "day-1".into())
}

fn day_one(state: &AppState) -> &Day {
    state.trips[0].day(&"day-1".into()).unwrap()
}

fn assert_day_invariants(day: &Day) {
    let orders: Vec<usize> = day.places.iter().map(|p| p.order).collect();
    assert_eq!(orders, (0..day.places.len()).collect::<Vec<_>>());
    for leg in &day.transit_segments {
        assert!(day.place(&leg.from_place_id).is_some());
        assert!(day.place(&leg.to_place_id).is_some());
    }
}

#[derive(Debug, Clone)]
enum Op {
    Move(usize, usize),
    Duplicate(usize),
    Delete(usize),
    Add(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..8, 0usize..8).prop_map(|(a, b)| Op::Move(a, b)),
        (0usize..8).prop_map(Op::Duplicate),
        (0usize..8).prop_map(Op::Delete),
        (0usize..8).prop_map(Op::Add),
    ]
}

fn to_action(state: &AppState, op: &Op) -> Option<Action> {
    let (trip_id, day_id) = selection();
    let places = &day_one(state).places;
    let pick = |i: usize| places.get(i % places.len().max(1)).map(|p| p.id.clone());
    Some(match op {
        Op::Move(from, to) => Action::MovePlace {
            trip_id,
            day_id,
            place_id: pick(*from)?,
            to_index: to % places.len().max(1),
        },
        Op::Duplicate(i) => Action::DuplicatePlace {
            trip_id,
            day_id,
            place_id: pick(*i)?,
        },
        Op::Delete(i) => Action::DeletePlace {
            trip_id,
            day_id,
            place_id: pick(*i)?,
        },
        Op::Add(i) => Action::AddPlace {
            trip_id,
            day_id,
            place: Place::new(format!("Stop {i}")).with_duration(30),
            after: pick(*i),
        },
    })
}

proptest! {
    #[test]
    fn prop_edits_keep_order_dense_and_ids_unique(ops in prop::collection::vec(op(), 0..20)) {
        let mut state = AppState::sample();
        for op in &ops {
            if let Some(action) = to_action(&state, op) {
                state = state.apply(action).unwrap();
            }
            let day = day_one(&state);
            assert_day_invariants(day);
            let ids: HashSet<&PlaceId> = day.places.iter().map(|p| &p.id).collect();
            prop_assert_eq!(ids.len(), day.places.len());
            prop_assert!(compute_schedule(day).is_ok());
        }
    }
}

#[test]
fn failed_action_leaves_state_untouched() {
    let state = AppState::sample();
    let (trip_id, day_id) = selection();
    let result = state.apply(Action::UpdatePlace {
        trip_id,
        day_id,
        place_id: "place-1".into(),
        patch: PlacePatch {
            duration: Some(0),
            ..Default::default()
        },
    });
    assert!(matches!(result, Err(StoreError::Validation(_))));
    assert_eq!(state, AppState::sample());
}

#[test]
fn unanchoring_restores_cumulative_schedule() {
    let (trip_id, day_id) = selection();
    let state = AppState::sample()
        .apply(Action::UpdatePlace {
            trip_id,
            day_id,
            place_id: "place-4".into(),
            patch: PlacePatch::unanchor(),
        })
        .unwrap();
    let schedule = compute_schedule(day_one(&state)).unwrap();
    // McNally 13:50 + 45 + 10 walk
    assert_eq!(schedule.start_of(&"place-4".into()).unwrap().to_string(), "14:45");
    assert!(schedule.gaps.is_empty());
}

#[test]
fn state_survives_store_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("itinerary.db");
    let (trip_id, day_id) = selection();

    let state = AppState::sample()
        .apply(Action::SetTransit {
            trip_id: trip_id.clone(),
            day_id: day_id.clone(),
            from: "place-1".into(),
            to: "place-2".into(),
            mode: TransitMode::Drive,
            duration: 20,
            route_summary: "via Houston St".into(),
        })
        .unwrap()
        .apply(Action::SetViewMode(ViewMode::Compact))
        .unwrap()
        .apply(Action::SetCurrentDay("day-2".into()))
        .unwrap();

    {
        let store = BlobStore::open_at(&path).unwrap();
        assert!(store.save_state(&state));
    }

    let reopened = BlobStore::open_at(&path).unwrap();
    let loaded = reopened.load_state_or_seed();
    assert_eq!(loaded, state);
    assert_eq!(loaded.current_day().unwrap().day_number, 2);
    let leg = day_one(&loaded)
        .transit_between(&"place-1".into(), &"place-2".into())
        .unwrap();
    assert_eq!(leg.mode, TransitMode::Drive);
    assert_eq!(leg.duration, 20);
}

#[test]
fn empty_store_seeds_sample() {
    let dir = tempfile::tempdir().unwrap();
    let store = BlobStore::open_at(&dir.path().join("itinerary.db")).unwrap();
    assert_eq!(store.load_state_or_seed(), AppState::sample());
}

#[test]
fn moving_place_between_days_keeps_both_days_consistent() {
    let (trip_id, day_id) = selection();
    let state = AppState::sample()
        .apply(Action::MovePlaceToDay {
            trip_id,
            from_day_id: day_id,
            place_id: "place-2".into(),
            to_day_id: "day-2".into(),
        })
        .unwrap();
    let trip = &state.trips[0];
    let first = trip.day(&"day-1".into()).unwrap();
    let second = trip.day(&"day-2".into()).unwrap();
    assert_day_invariants(first);
    assert_day_invariants(second);
    assert_eq!(first.places.len(), 3);
    assert_eq!(first.transit_segments.len(), 1);
    assert_eq!(second.places[0].id, PlaceId::from("place-2"));
}
