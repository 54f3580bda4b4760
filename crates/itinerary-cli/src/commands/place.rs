//! Place commands for the current day.

use clap::Subcommand;
use itinerary_core::model::{DayId, Place, PlaceCategory, PlaceId};
use itinerary_core::store::{Action, PlacePatch};
use itinerary_core::time::parse_duration_input;
use itinerary_core::ClockTime;

use crate::common::{CmdResult, Session};

#[derive(Subcommand)]
pub enum PlaceAction {
    /// Add a place to the current day
    Add {
        /// Place name
        name: String,
        /// Insert after this place ID (default: append)
        #[arg(long)]
        after: Option<String>,
        /// Visit length, e.g. "90" or "1h 30m" (default from config)
        #[arg(long)]
        duration: Option<String>,
        #[arg(long)]
        address: Option<String>,
        /// cafe, restaurant, shopping, bookstore, museum, park, bar, hotel, other
        #[arg(long)]
        category: Option<String>,
    },
    /// Update fields of a place
    Update {
        /// Place ID
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Visit length, e.g. "45" or "2h"
        #[arg(long)]
        duration: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Pin a place to a time (default: its current computed start)
    Anchor {
        /// Place ID
        id: String,
        /// Time such as "19:30" or "7:30 PM"
        time: Option<String>,
    },
    /// Remove a place's anchor
    Unanchor {
        /// Place ID
        id: String,
    },
    /// Delete a place and its transit legs
    Delete {
        /// Place ID
        id: String,
    },
    /// Insert a copy right after the place
    Duplicate {
        /// Place ID
        id: String,
    },
    /// Move a place to a 0-based position
    Move {
        /// Place ID
        id: String,
        index: usize,
    },
    /// Set the full order of the day's places
    Reorder {
        /// Every place ID of the day, in the new order
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Move a place to the end of another day
    MoveDay {
        /// Place ID
        id: String,
        /// Target day ID
        day_id: String,
    },
}

pub fn run(action: PlaceAction) -> CmdResult {
    let mut session = Session::open()?;
    let (trip_id, day_id) = session.selection()?;
    let mut added = None;

    let action = match action {
        PlaceAction::Add {
            name,
            after,
            duration,
            address,
            category,
        } => {
            let duration = match duration {
                Some(input) => parse_duration_input(&input)?,
                None => session.config.schedule.default_place_duration,
            };
            let mut place = Place::new(name).with_duration(duration);
            if let Some(address) = address {
                place = place.with_address(address);
            }
            if let Some(category) = category {
                place = place.with_category(parse_category(&category));
            }
            added = Some(place.id.clone());
            Action::AddPlace {
                trip_id,
                day_id,
                place,
                after: after.map(PlaceId::from),
            }
        }
        PlaceAction::Update {
            id,
            name,
            address,
            notes,
            duration,
            category,
        } => Action::UpdatePlace {
            trip_id,
            day_id,
            place_id: PlaceId::from(id),
            patch: PlacePatch {
                name,
                address,
                notes,
                duration: duration.as_deref().map(parse_duration_input).transpose()?,
                category: category.as_deref().map(parse_category),
                ..PlacePatch::default()
            },
        },
        PlaceAction::Anchor { id, time } => {
            let place_id = PlaceId::from(id);
            let time = match time {
                Some(input) => ClockTime::parse_user_input(&input)?,
                None => {
                    let schedule = session.schedule(session.current_day()?)?;
                    schedule
                        .start_of(&place_id)
                        .ok_or_else(|| format!("place not found: {place_id}"))?
                }
            };
            Action::UpdatePlace {
                trip_id,
                day_id,
                place_id,
                patch: PlacePatch::anchor(time),
            }
        }
        PlaceAction::Unanchor { id } => Action::UpdatePlace {
            trip_id,
            day_id,
            place_id: PlaceId::from(id),
            patch: PlacePatch::unanchor(),
        },
        PlaceAction::Delete { id } => Action::DeletePlace {
            trip_id,
            day_id,
            place_id: PlaceId::from(id),
        },
        PlaceAction::Duplicate { id } => Action::DuplicatePlace {
            trip_id,
            day_id,
            place_id: PlaceId::from(id),
        },
        PlaceAction::Move { id, index } => Action::MovePlace {
            trip_id,
            day_id,
            place_id: PlaceId::from(id),
            to_index: index,
        },
        PlaceAction::Reorder { ids } => Action::ReorderPlaces {
            trip_id,
            day_id,
            place_ids: ids.into_iter().map(PlaceId::from).collect(),
        },
        PlaceAction::MoveDay { id, day_id: to_day } => Action::MovePlaceToDay {
            trip_id,
            from_day_id: day_id,
            place_id: PlaceId::from(id),
            to_day_id: DayId::from(to_day),
        },
    };

    session.apply(action)?;
    if let Some(id) = added {
        println!("Place added: {id}");
    }
    session.print_current_day()
}

fn parse_category(input: &str) -> PlaceCategory {
    input.parse().unwrap_or_default()
}
