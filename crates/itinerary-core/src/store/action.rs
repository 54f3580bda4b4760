//! State transitions and partial-update payloads.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::{
    Coordinates, Day, DayId, Place, PlaceCategory, PlaceId, TransitId, TransitMode,
    TransitSegment, Trip, TripId, ViewMode, WeeklyHours,
};
use crate::time::{ensure_positive_duration, ClockTime};

/// Every mutation the application can perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetCurrentTrip(TripId),
    SetCurrentDay(DayId),
    SetViewMode(ViewMode),
    AddTrip(Trip),
    UpdateTrip {
        trip_id: TripId,
        patch: TripPatch,
    },
    DeleteTrip(TripId),
    UpdateDay {
        trip_id: TripId,
        day_id: DayId,
        patch: DayPatch,
    },
    /// Insert after `after`, or append when `None`.
    AddPlace {
        trip_id: TripId,
        day_id: DayId,
        place: Place,
        after: Option<PlaceId>,
    },
    UpdatePlace {
        trip_id: TripId,
        day_id: DayId,
        place_id: PlaceId,
        patch: PlacePatch,
    },
    DeletePlace {
        trip_id: TripId,
        day_id: DayId,
        place_id: PlaceId,
    },
    /// `place_ids` must be a permutation of the day's places.
    ReorderPlaces {
        trip_id: TripId,
        day_id: DayId,
        place_ids: Vec<PlaceId>,
    },
    MovePlace {
        trip_id: TripId,
        day_id: DayId,
        place_id: PlaceId,
        to_index: usize,
    },
    DuplicatePlace {
        trip_id: TripId,
        day_id: DayId,
        place_id: PlaceId,
    },
    MovePlaceToDay {
        trip_id: TripId,
        from_day_id: DayId,
        place_id: PlaceId,
        to_day_id: DayId,
    },
    /// Create or replace the leg for the ordered pair `from -> to`.
    SetTransit {
        trip_id: TripId,
        day_id: DayId,
        from: PlaceId,
        to: PlaceId,
        mode: TransitMode,
        duration: u32,
        route_summary: String,
    },
    UpdateTransit {
        trip_id: TripId,
        day_id: DayId,
        transit_id: TransitId,
        patch: TransitPatch,
    },
    CycleTransitMode {
        trip_id: TripId,
        day_id: DayId,
        transit_id: TransitId,
    },
    DeleteTransit {
        trip_id: TripId,
        day_id: DayId,
        transit_id: TransitId,
    },
}

impl Action {
    /// Short name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetCurrentTrip(_) => "set_current_trip",
            Self::SetCurrentDay(_) => "set_current_day",
            Self::SetViewMode(_) => "set_view_mode",
            Self::AddTrip(_) => "add_trip",
            Self::UpdateTrip { .. } => "update_trip",
            Self::DeleteTrip(_) => "delete_trip",
            Self::UpdateDay { .. } => "update_day",
            Self::AddPlace { .. } => "add_place",
            Self::UpdatePlace { .. } => "update_place",
            Self::DeletePlace { .. } => "delete_place",
            Self::ReorderPlaces { .. } => "reorder_places",
            Self::MovePlace { .. } => "move_place",
            Self::DuplicatePlace { .. } => "duplicate_place",
            Self::MovePlaceToDay { .. } => "move_place_to_day",
            Self::SetTransit { .. } => "set_transit",
            Self::UpdateTransit { .. } => "update_transit",
            Self::CycleTransitMode { .. } => "cycle_transit_mode",
            Self::DeleteTransit { .. } => "delete_transit",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TripPatch {
    pub title: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl TripPatch {
    pub(crate) fn apply(self, trip: &mut Trip) -> Result<(), ValidationError> {
        let start = self.start_date.unwrap_or(trip.start_date);
        let end = self.end_date.unwrap_or(trip.end_date);
        if end < start {
            return Err(ValidationError::InvalidDateRange { start, end });
        }
        if let Some(title) = self.title {
            trip.title = title;
        }
        trip.start_date = start;
        trip.end_date = end;
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DayPatch {
    pub start_time: Option<ClockTime>,
    pub date: Option<NaiveDate>,
}

impl DayPatch {
    pub(crate) fn apply(self, day: &mut Day) {
        if let Some(start) = self.start_time {
            day.start_time = start;
        }
        if let Some(date) = self.date {
            day.date = date;
        }
    }
}

/// Partial place update. `anchor_time: Some(None)` clears the anchor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlacePatch {
    pub name: Option<String>,
    pub address: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub duration: Option<u32>,
    pub anchor_time: Option<Option<ClockTime>>,
    pub notes: Option<String>,
    pub category: Option<PlaceCategory>,
    pub hours: Option<Option<WeeklyHours>>,
    pub photos: Option<Vec<String>>,
}

impl PlacePatch {
    pub fn anchor(time: ClockTime) -> Self {
        Self {
            anchor_time: Some(Some(time)),
            ..Self::default()
        }
    }

    pub fn unanchor() -> Self {
        Self {
            anchor_time: Some(None),
            ..Self::default()
        }
    }

    pub(crate) fn apply(self, place: &mut Place) -> Result<(), ValidationError> {
        let duration = self.duration.map(ensure_positive_duration).transpose()?;

        if let Some(name) = self.name {
            place.name = name;
        }
        if let Some(address) = self.address {
            place.address = address;
        }
        if let Some(coordinates) = self.coordinates {
            place.coordinates = coordinates;
        }
        if let Some(duration) = duration {
            place.duration = duration;
        }
        if let Some(anchor) = self.anchor_time {
            place.anchor_time = anchor;
        }
        if let Some(notes) = self.notes {
            place.notes = notes;
        }
        if let Some(category) = self.category {
            place.category = category;
        }
        if let Some(hours) = self.hours {
            place.hours = hours;
        }
        if let Some(photos) = self.photos {
            place.photos = photos;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitPatch {
    pub mode: Option<TransitMode>,
    pub duration: Option<u32>,
    pub route_summary: Option<String>,
}

impl TransitPatch {
    pub(crate) fn apply(self, segment: &mut TransitSegment) -> Result<(), ValidationError> {
        let duration = self.duration.map(ensure_positive_duration).transpose()?;
        if let Some(mode) = self.mode {
            segment.mode = mode;
        }
        if let Some(duration) = duration {
            segment.duration = duration;
        }
        if let Some(route) = self.route_summary {
            segment.route_summary = route;
        }
        Ok(())
    }
}
